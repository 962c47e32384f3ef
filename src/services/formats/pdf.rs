//! PDF text extraction using lopdf

use anyhow::{bail, Context, Result};
use lopdf::Document;

/// Extract text from all pages of a PDF document.
///
/// `max_pages` limits how many pages are read; 0 means unlimited.
/// Encrypted documents are rejected.
pub fn extract(data: &[u8], max_pages: usize) -> Result<String> {
    let doc = Document::load_mem(data).context("failed to parse PDF document")?;

    if doc.is_encrypted() {
        bail!("PDF document is encrypted");
    }

    let pages = doc.get_pages();
    let mut page_texts = Vec::with_capacity(pages.len());

    for (index, page_number) in pages.keys().enumerate() {
        if max_pages > 0 && index >= max_pages {
            break;
        }
        let text = doc
            .extract_text(&[*page_number])
            .with_context(|| format!("failed to extract text from page {}", page_number))?;
        page_texts.push(text);
    }

    Ok(page_texts.join("\n"))
}
