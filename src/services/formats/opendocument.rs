//! OpenDocument text extraction (odt)
//!
//! Text lives in `content.xml`, inside `text:p` and `text:h` elements.
//! Tabs, line breaks and repeated spaces use dedicated empty elements.

use std::io::{Cursor, Read};

use anyhow::{Context, Result};
use quick_xml::events::Event;
use quick_xml::Reader;
use zip::ZipArchive;

pub fn extract(data: &[u8]) -> Result<String> {
    let mut archive =
        ZipArchive::new(Cursor::new(data)).context("not a valid OpenDocument archive")?;

    let mut xml = String::new();
    archive
        .by_name("content.xml")
        .context("OpenDocument archive is missing content.xml")?
        .read_to_string(&mut xml)
        .context("failed to read content.xml")?;

    parse_content(&xml)
}

fn parse_content(xml: &str) -> Result<String> {
    let mut reader = Reader::from_str(xml);
    let mut out = String::new();
    let mut paragraph_depth: usize = 0;

    loop {
        match reader.read_event().context("malformed XML in content.xml")? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"p" | b"h" => paragraph_depth += 1,
                _ => {}
            },
            Event::End(e) => match e.local_name().as_ref() {
                b"p" | b"h" => {
                    paragraph_depth = paragraph_depth.saturating_sub(1);
                    out.push('\n');
                }
                _ => {}
            },
            Event::Empty(e) if paragraph_depth > 0 => match e.local_name().as_ref() {
                b"tab" => out.push('\t'),
                b"line-break" => out.push('\n'),
                b"s" => out.push(' '),
                _ => {}
            },
            Event::Text(t) if paragraph_depth > 0 => {
                out.push_str(&t.unescape().context("invalid XML text content")?);
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

    const CONTENT_XML: &str = r#"<?xml version="1.0"?>
<office:document-content xmlns:office="ons" xmlns:text="tns">
  <office:body><office:text>
    <text:h>Title</text:h>
    <text:p>Body with <text:span>nested span</text:span> text.</text:p>
    <text:p>Tabbed<text:tab/>value</text:p>
  </office:text></office:body>
</office:document-content>"#;

    fn odt_archive(content: &str) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("content.xml", SimpleFileOptions::default())
            .unwrap();
        writer.write_all(content.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_headings_and_paragraphs() {
        let text = extract(&odt_archive(CONTENT_XML)).unwrap();
        assert!(text.contains("Title\n"));
        assert!(text.contains("Body with nested span text.\n"));
        assert!(text.contains("Tabbed\tvalue"));
    }

    #[test]
    fn test_text_outside_paragraphs_is_ignored() {
        let xml = r#"<doc xmlns:text="tns">stray<text:p>kept</text:p></doc>"#;
        let text = extract(&odt_archive(xml)).unwrap();
        assert_eq!(text.trim(), "kept");
    }

    #[test]
    fn test_missing_content_xml() {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("mimetype", SimpleFileOptions::default())
            .unwrap();
        writer.write_all(b"application/vnd.oasis.opendocument.text").unwrap();
        let archive = writer.finish().unwrap().into_inner();

        let err = extract(&archive).unwrap_err();
        assert!(err.to_string().contains("content.xml"));
    }
}
