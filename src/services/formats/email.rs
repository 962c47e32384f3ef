//! E-mail (eml) text extraction using mail-parser
//!
//! Produces a short header block (Subject/From/To) followed by the
//! message body. A text/plain part is preferred; HTML-only messages are
//! converted through the HTML extractor.

use anyhow::{Context, Result};
use mail_parser::{Address, MessageParser};

use super::html;

pub fn extract(data: &[u8]) -> Result<String> {
    let message = MessageParser::default()
        .parse(data)
        .context("failed to parse e-mail message")?;

    let mut out = String::new();

    if let Some(subject) = message.subject() {
        out.push_str("Subject: ");
        out.push_str(subject);
        out.push('\n');
    }
    if let Some(from) = message.from() {
        let formatted = format_address(from);
        if !formatted.is_empty() {
            out.push_str("From: ");
            out.push_str(&formatted);
            out.push('\n');
        }
    }
    if let Some(to) = message.to() {
        let formatted = format_address(to);
        if !formatted.is_empty() {
            out.push_str("To: ");
            out.push_str(&formatted);
            out.push('\n');
        }
    }
    if !out.is_empty() {
        out.push('\n');
    }

    if let Some(body) = message.body_text(0) {
        out.push_str(&body);
    } else if let Some(body_html) = message.body_html(0) {
        out.push_str(&html::text_from_html(&body_html));
    }

    Ok(out)
}

fn format_address(address: &Address) -> String {
    address
        .iter()
        .filter_map(|addr| match (&addr.name, &addr.address) {
            (Some(name), Some(email)) => Some(format!("{} <{}>", name, email)),
            (None, Some(email)) => Some(email.to_string()),
            (Some(name), None) => Some(name.to_string()),
            (None, None) => None,
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIMPLE_EML: &[u8] = b"From: Alice <alice@example.com>\r\n\
To: bob@example.com\r\n\
Subject: Quarterly report\r\n\
Content-Type: text/plain; charset=utf-8\r\n\
\r\n\
Please find the numbers attached.\r\n";

    #[test]
    fn test_headers_and_body() {
        let text = extract(SIMPLE_EML).unwrap();
        assert!(text.contains("Subject: Quarterly report"));
        assert!(text.contains("From: Alice <alice@example.com>"));
        assert!(text.contains("To: bob@example.com"));
        assert!(text.contains("Please find the numbers attached."));
    }

    #[test]
    fn test_html_only_message() {
        let eml = b"From: a@example.com\r\n\
Subject: HTML\r\n\
Content-Type: text/html; charset=utf-8\r\n\
\r\n\
<html><body><p>rendered text</p></body></html>\r\n";
        let text = extract(eml).unwrap();
        assert!(text.contains("rendered text"));
        assert!(!text.contains("<p>"));
    }

    #[test]
    fn test_headers_precede_body() {
        let text = extract(SIMPLE_EML).unwrap();
        let subject = text.find("Subject:").unwrap();
        let body = text.find("Please find").unwrap();
        assert!(subject < body);
    }
}
