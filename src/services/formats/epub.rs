//! EPUB text extraction
//!
//! An EPUB is a zip archive of XHTML documents. Content documents are
//! read in archive order and passed through the HTML extractor, with a
//! blank line between documents.

use std::io::{Cursor, Read};

use anyhow::{bail, Context, Result};
use zip::ZipArchive;

use super::html;

pub fn extract(data: &[u8]) -> Result<String> {
    let mut archive =
        ZipArchive::new(Cursor::new(data)).context("not a valid EPUB archive")?;

    let content_documents: Vec<String> = archive
        .file_names()
        .filter(|name| {
            let lower = name.to_ascii_lowercase();
            lower.ends_with(".xhtml") || lower.ends_with(".html") || lower.ends_with(".htm")
        })
        .map(|name| name.to_string())
        .collect();

    if content_documents.is_empty() {
        bail!("EPUB archive contains no content documents");
    }

    let mut sections = Vec::with_capacity(content_documents.len());
    for name in content_documents {
        let mut markup = String::new();
        archive
            .by_name(&name)
            .with_context(|| format!("failed to open {}", name))?
            .read_to_string(&mut markup)
            .with_context(|| format!("failed to read {}", name))?;

        let text = html::text_from_html(&markup);
        if !text.is_empty() {
            sections.push(text);
        }
    }

    Ok(sections.join("\n\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    fn epub_with(chapters: &[(&str, &str)]) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("mimetype", SimpleFileOptions::default())
            .unwrap();
        writer.write_all(b"application/epub+zip").unwrap();
        for (name, body) in chapters {
            writer
                .start_file(*name, SimpleFileOptions::default())
                .unwrap();
            writer
                .write_all(format!("<html><body>{}</body></html>", body).as_bytes())
                .unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_chapters_extracted() {
        let epub = epub_with(&[
            ("OEBPS/chapter1.xhtml", "<p>Chapter one text.</p>"),
            ("OEBPS/chapter2.xhtml", "<p>Chapter two text.</p>"),
        ]);
        let text = extract(&epub).unwrap();
        assert!(text.contains("Chapter one text."));
        assert!(text.contains("Chapter two text."));
    }

    #[test]
    fn test_no_content_documents() {
        let epub = epub_with(&[]);
        assert!(extract(&epub).is_err());
    }

    #[test]
    fn test_rejects_non_zip() {
        assert!(extract(b"not an archive").is_err());
    }
}
