//! Per-format text extraction
//!
//! One module per format family. Every extractor takes raw document bytes
//! and returns the extracted plain text; failures carry enough context to
//! explain what was wrong with the document.

pub mod email;
pub mod epub;
pub mod html;
pub mod ooxml;
pub mod opendocument;
pub mod pdf;
pub mod rtf;
pub mod spreadsheet;
pub mod text;
