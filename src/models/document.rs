//! Document format model
//!
//! Defines the closed set of document formats the service can extract text
//! from, together with extension and MIME type lookup.

use serde::{Deserialize, Serialize};

/// Supported document formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Pdf,
    Docx,
    Pptx,
    Xlsx,
    Xls,
    Csv,
    Txt,
    Rtf,
    Odt,
    Html,
    Eml,
    Epub,
}

/// Human-facing grouping used by the /formats endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatCategory {
    Documents,
    Presentations,
    Spreadsheets,
    Web,
    Email,
    Ebooks,
}

impl FormatCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormatCategory::Documents => "documents",
            FormatCategory::Presentations => "presentations",
            FormatCategory::Spreadsheets => "spreadsheets",
            FormatCategory::Web => "web",
            FormatCategory::Email => "email",
            FormatCategory::Ebooks => "ebooks",
        }
    }
}

impl DocumentFormat {
    /// All supported formats, in display order
    pub const ALL: &'static [DocumentFormat] = &[
        DocumentFormat::Pdf,
        DocumentFormat::Docx,
        DocumentFormat::Txt,
        DocumentFormat::Rtf,
        DocumentFormat::Odt,
        DocumentFormat::Pptx,
        DocumentFormat::Xlsx,
        DocumentFormat::Xls,
        DocumentFormat::Csv,
        DocumentFormat::Html,
        DocumentFormat::Eml,
        DocumentFormat::Epub,
    ];

    /// Look up a format by file extension (case-insensitive, no leading dot)
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Some(DocumentFormat::Pdf),
            "docx" => Some(DocumentFormat::Docx),
            "pptx" => Some(DocumentFormat::Pptx),
            "xlsx" => Some(DocumentFormat::Xlsx),
            "xls" => Some(DocumentFormat::Xls),
            "csv" => Some(DocumentFormat::Csv),
            "txt" => Some(DocumentFormat::Txt),
            "rtf" => Some(DocumentFormat::Rtf),
            "odt" => Some(DocumentFormat::Odt),
            "html" | "htm" => Some(DocumentFormat::Html),
            "eml" => Some(DocumentFormat::Eml),
            "epub" => Some(DocumentFormat::Epub),
            _ => None,
        }
    }

    /// Extensions recognized for this format
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            DocumentFormat::Pdf => &["pdf"],
            DocumentFormat::Docx => &["docx"],
            DocumentFormat::Pptx => &["pptx"],
            DocumentFormat::Xlsx => &["xlsx"],
            DocumentFormat::Xls => &["xls"],
            DocumentFormat::Csv => &["csv"],
            DocumentFormat::Txt => &["txt"],
            DocumentFormat::Rtf => &["rtf"],
            DocumentFormat::Odt => &["odt"],
            DocumentFormat::Html => &["html", "htm"],
            DocumentFormat::Eml => &["eml"],
            DocumentFormat::Epub => &["epub"],
        }
    }

    /// Canonical MIME type for this format
    pub fn mime_type(&self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "application/pdf",
            DocumentFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            DocumentFormat::Pptx => {
                "application/vnd.openxmlformats-officedocument.presentationml.presentation"
            }
            DocumentFormat::Xlsx => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
            DocumentFormat::Xls => "application/vnd.ms-excel",
            DocumentFormat::Csv => "text/csv",
            DocumentFormat::Txt => "text/plain",
            DocumentFormat::Rtf => "application/rtf",
            DocumentFormat::Odt => "application/vnd.oasis.opendocument.text",
            DocumentFormat::Html => "text/html",
            DocumentFormat::Eml => "message/rfc822",
            DocumentFormat::Epub => "application/epub+zip",
        }
    }

    pub fn category(&self) -> FormatCategory {
        match self {
            DocumentFormat::Pdf
            | DocumentFormat::Docx
            | DocumentFormat::Txt
            | DocumentFormat::Rtf
            | DocumentFormat::Odt => FormatCategory::Documents,
            DocumentFormat::Pptx => FormatCategory::Presentations,
            DocumentFormat::Xlsx | DocumentFormat::Xls | DocumentFormat::Csv => {
                FormatCategory::Spreadsheets
            }
            DocumentFormat::Html => FormatCategory::Web,
            DocumentFormat::Eml => FormatCategory::Email,
            DocumentFormat::Epub => FormatCategory::Ebooks,
        }
    }

    /// Every recognized extension across all formats, in display order
    pub fn supported_extensions() -> Vec<&'static str> {
        Self::ALL.iter().flat_map(|f| f.extensions()).copied().collect()
    }
}

/// Metadata about an uploaded file, echoed back in extraction responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileInfo {
    /// File size in bytes
    pub size: u64,
    /// MIME type derived from the detected format
    pub mime_type: Option<String>,
    /// File size in megabytes, rounded to two decimals
    pub size_mb: f64,
}

impl FileInfo {
    pub fn new(size: u64, format: Option<DocumentFormat>) -> Self {
        let size_mb = (size as f64 / (1024.0 * 1024.0) * 100.0).round() / 100.0;
        Self {
            size,
            mime_type: format.map(|f| f.mime_type().to_string()),
            size_mb,
        }
    }
}
