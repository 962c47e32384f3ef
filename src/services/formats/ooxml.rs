//! Office Open XML text extraction (docx, pptx)
//!
//! Both formats are zip archives of XML parts. Text lives in run elements
//! (`w:t` for WordprocessingML, `a:t` for DrawingML) grouped into
//! paragraphs (`w:p` / `a:p`).

use std::io::{Cursor, Read};

use anyhow::{bail, Context, Result};
use once_cell::sync::Lazy;
use quick_xml::events::Event;
use quick_xml::Reader;
use regex::Regex;
use zip::ZipArchive;

static SLIDE_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^ppt/slides/slide(\d+)\.xml$").unwrap());

/// Extract text from a Word document (docx)
pub fn extract_docx(data: &[u8]) -> Result<String> {
    let mut archive =
        ZipArchive::new(Cursor::new(data)).context("not a valid docx archive")?;

    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .context("docx archive is missing word/document.xml")?
        .read_to_string(&mut xml)
        .context("failed to read word/document.xml")?;

    parse_runs(&xml)
}

/// Extract text from a PowerPoint presentation (pptx)
///
/// Slides are visited in numeric order with a blank line between them.
pub fn extract_pptx(data: &[u8]) -> Result<String> {
    let mut archive =
        ZipArchive::new(Cursor::new(data)).context("not a valid pptx archive")?;

    let mut slides: Vec<(u32, String)> = archive
        .file_names()
        .filter_map(|name| {
            SLIDE_NAME
                .captures(name)
                .and_then(|c| c[1].parse().ok())
                .map(|n: u32| (n, name.to_string()))
        })
        .collect();
    slides.sort_by_key(|(n, _)| *n);

    if slides.is_empty() {
        bail!("pptx archive contains no slides");
    }

    let mut texts = Vec::with_capacity(slides.len());
    for (_, name) in slides {
        let mut xml = String::new();
        archive
            .by_name(&name)
            .with_context(|| format!("failed to open slide {}", name))?
            .read_to_string(&mut xml)
            .with_context(|| format!("failed to read slide {}", name))?;
        texts.push(parse_runs(&xml)?.trim_end().to_string());
    }

    Ok(texts.join("\n\n"))
}

/// Pull the text runs out of a WordprocessingML or DrawingML part.
///
/// Namespace prefixes differ between the two dialects but the local names
/// are the same: `t` for runs, `p` for paragraphs, `tab`/`br` for breaks.
fn parse_runs(xml: &str) -> Result<String> {
    let mut reader = Reader::from_str(xml);
    let mut out = String::new();
    let mut in_run = false;

    loop {
        match reader.read_event().context("malformed XML in document part")? {
            Event::Start(e) => {
                if e.local_name().as_ref() == b"t" {
                    in_run = true;
                }
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"t" => in_run = false,
                b"p" => out.push('\n'),
                _ => {}
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                b"tab" => out.push('\t'),
                b"br" => out.push('\n'),
                _ => {}
            },
            Event::Text(t) => {
                if in_run {
                    out.push_str(&t.unescape().context("invalid XML text content")?);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    fn zip_with(entries: &[(&str, &str)]) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, content) in entries {
            writer
                .start_file(*name, SimpleFileOptions::default())
                .unwrap();
            writer.write_all(content.as_bytes()).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    const DOCX_XML: &str = r#"<?xml version="1.0"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p><w:r><w:t>First paragraph</w:t></w:r></w:p>
    <w:p><w:r><w:t>Column A</w:t><w:tab/><w:t>Column B</w:t></w:r></w:p>
  </w:body>
</w:document>"#;

    #[test]
    fn test_docx_paragraphs_and_tabs() {
        let archive = zip_with(&[("word/document.xml", DOCX_XML)]);
        let text = extract_docx(&archive).unwrap();
        assert!(text.contains("First paragraph\n"));
        assert!(text.contains("Column A\tColumn B"));
    }

    #[test]
    fn test_docx_missing_document_part() {
        let archive = zip_with(&[("word/other.xml", "<x/>")]);
        let err = extract_docx(&archive).unwrap_err();
        assert!(err.to_string().contains("word/document.xml"));
    }

    #[test]
    fn test_docx_rejects_non_zip() {
        assert!(extract_docx(b"plain bytes").is_err());
    }

    #[test]
    fn test_docx_unescapes_entities() {
        let xml = r#"<w:document xmlns:w="ns"><w:body>
            <w:p><w:r><w:t>a &amp; b</w:t></w:r></w:p>
        </w:body></w:document>"#;
        let archive = zip_with(&[("word/document.xml", xml)]);
        let text = extract_docx(&archive).unwrap();
        assert!(text.contains("a & b"));
    }

    fn slide_xml(text: &str) -> String {
        format!(
            r#"<p:sld xmlns:p="pns" xmlns:a="ans"><p:cSld><p:spTree>
                <p:sp><p:txBody><a:p><a:r><a:t>{}</a:t></a:r></a:p></p:txBody></p:sp>
            </p:spTree></p:cSld></p:sld>"#,
            text
        )
    }

    #[test]
    fn test_pptx_slides_in_numeric_order() {
        // slide10 after slide2 only under numeric (not lexicographic) order
        let archive = zip_with(&[
            ("ppt/slides/slide10.xml", &slide_xml("ten")),
            ("ppt/slides/slide2.xml", &slide_xml("two")),
            ("ppt/slides/slide1.xml", &slide_xml("one")),
        ]);
        let text = extract_pptx(&archive).unwrap();
        let one = text.find("one").unwrap();
        let two = text.find("two").unwrap();
        let ten = text.find("ten").unwrap();
        assert!(one < two && two < ten);
    }

    #[test]
    fn test_pptx_without_slides() {
        let archive = zip_with(&[("ppt/presentation.xml", "<x/>")]);
        assert!(extract_pptx(&archive).is_err());
    }
}
