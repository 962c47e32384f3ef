//! Synthesized document fixtures
//!
//! Real documents are built in memory so the tests carry no binary
//! assets: zip-based formats through ZipWriter, PDFs through lopdf.

use std::io::{Cursor, Write};

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// Build a zip archive from (name, content) entries
pub fn zip_archive(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, content) in entries {
        writer
            .start_file(*name, SimpleFileOptions::default())
            .unwrap();
        writer.write_all(content.as_bytes()).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

/// A minimal docx containing two paragraphs
pub fn sample_docx() -> Vec<u8> {
    let document_xml = r#"<?xml version="1.0"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p><w:r><w:t>Quarterly results were strong.</w:t></w:r></w:p>
    <w:p><w:r><w:t>Revenue grew in all regions.</w:t></w:r></w:p>
  </w:body>
</w:document>"#;
    zip_archive(&[("word/document.xml", document_xml)])
}

/// A single-page PDF containing the given line of text
pub fn sample_pdf(text: &str) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let content = Content {
        operations: vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 24.into()]),
            Operation::new("Td", vec![100.into(), 600.into()]),
            Operation::new("Tj", vec![Object::string_literal(text)]),
            Operation::new("ET", vec![]),
        ],
    };
    let content_id = doc.add_object(Stream::new(
        dictionary! {},
        content.encode().expect("encode content stream"),
    ));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).expect("serialize PDF");
    bytes
}

pub const SAMPLE_CSV: &[u8] = b"city,population\nBerlin,3700000\nLisbon,545000\n";

pub const SAMPLE_HTML: &[u8] =
    b"<html><head><title>Report</title><script>ignored()</script></head>\
<body><h1>Annual Report</h1><p>All targets were met.</p></body></html>";

pub const SAMPLE_RTF: &[u8] = br"{\rtf1\ansi First line\par Second line\par}";

pub const SAMPLE_EML: &[u8] = b"From: sender@example.com\r\n\
To: recipient@example.com\r\n\
Subject: Meeting notes\r\n\
Content-Type: text/plain; charset=utf-8\r\n\
\r\n\
The meeting is moved to Thursday.\r\n";
