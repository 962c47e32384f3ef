//! HTML text extraction using scraper
//!
//! Walks the DOM collecting text nodes, skipping non-content subtrees
//! (scripts, styles, head) and inserting line breaks at block boundaries.

use anyhow::Result;
use scraper::{ElementRef, Html};

/// Elements whose entire subtree carries no user-visible text
const SKIPPED: &[&str] = &["script", "style", "head", "template", "noscript"];

/// Elements that end a line of text
const BLOCK: &[&str] = &[
    "p", "div", "section", "article", "header", "footer", "li", "tr", "table", "ul", "ol",
    "blockquote", "pre", "h1", "h2", "h3", "h4", "h5", "h6", "title",
];

pub fn extract(data: &[u8]) -> Result<String> {
    let html = String::from_utf8_lossy(data);
    Ok(text_from_html(&html))
}

/// Extract visible text from an HTML fragment or document
pub fn text_from_html(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut raw = String::new();
    collect_text(document.root_element(), &mut raw);
    tidy(&raw)
}

fn collect_text(element: ElementRef, out: &mut String) {
    let name = element.value().name();
    if SKIPPED.contains(&name) {
        return;
    }
    if name == "br" {
        out.push('\n');
        return;
    }

    for node in element.children() {
        if let Some(child) = ElementRef::wrap(node) {
            collect_text(child, out);
        } else if let Some(text) = node.value().as_text() {
            out.push_str(text);
        }
    }

    if BLOCK.contains(&name) {
        out.push('\n');
    }
}

/// Collapse intra-line whitespace and runs of blank lines
fn tidy(raw: &str) -> String {
    let mut lines = Vec::new();
    let mut blank_pending = false;

    for line in raw.lines() {
        let collapsed = line.split_whitespace().collect::<Vec<_>>().join(" ");
        if collapsed.is_empty() {
            blank_pending = !lines.is_empty();
        } else {
            if blank_pending {
                lines.push(String::new());
                blank_pending = false;
            }
            lines.push(collapsed);
        }
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_document() {
        let html = "<html><head><title>Page</title></head>\
                    <body><h1>Heading</h1><p>First para.</p><p>Second para.</p></body></html>";
        let text = text_from_html(html);
        assert!(text.contains("Heading"));
        assert!(text.contains("First para.\nSecond para."));
    }

    #[test]
    fn test_scripts_and_styles_skipped() {
        let html = "<body><script>var hidden = 1;</script>\
                    <style>.x { color: red }</style><p>visible</p></body>";
        let text = text_from_html(html);
        assert!(!text.contains("hidden"));
        assert!(!text.contains("color"));
        assert!(text.contains("visible"));
    }

    #[test]
    fn test_br_becomes_newline() {
        let text = text_from_html("<p>line one<br>line two</p>");
        assert!(text.contains("line one\nline two"));
    }

    #[test]
    fn test_whitespace_collapsed() {
        let text = text_from_html("<p>a    lot\t\tof     space</p>");
        assert_eq!(text, "a lot of space");
    }

    #[test]
    fn test_inline_elements_do_not_break_lines() {
        let text = text_from_html("<p>one <b>bold</b> <i>italic</i> word</p>");
        assert_eq!(text, "one bold italic word");
    }

    #[test]
    fn test_extract_lossy_utf8() {
        let mut bytes = b"<p>ok".to_vec();
        bytes.push(0xFF);
        bytes.extend_from_slice(b"</p>");
        let text = extract(&bytes).unwrap();
        assert!(text.contains("ok"));
    }
}
