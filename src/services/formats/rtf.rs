//! RTF text extraction
//!
//! There is no established RTF crate, so this is a small control-word
//! aware stripper. It understands the escapes that carry text (`\'hh`,
//! `\uN`), the control words that produce breaks (`\par`, `\line`,
//! `\tab`) and skips destination groups that hold no document text
//! (font tables, color tables, embedded pictures and the like).

use anyhow::{bail, Result};

/// Destination groups whose content is metadata, not document text
const SKIPPED_DESTINATIONS: &[&str] = &[
    "fonttbl",
    "colortbl",
    "stylesheet",
    "info",
    "pict",
    "object",
    "header",
    "footer",
    "themedata",
    "xmlnstbl",
];

pub fn extract(data: &[u8]) -> Result<String> {
    let src = String::from_utf8_lossy(data);
    if !src.trim_start().starts_with("{\\rtf") {
        bail!("not an RTF document");
    }
    Ok(strip_rtf(&src))
}

fn strip_rtf(src: &str) -> String {
    let bytes = src.as_bytes();
    let len = bytes.len();
    let mut out = String::new();
    let mut i = 0;
    let mut depth: usize = 0;
    // Depth at which a skipped destination group started, if any
    let mut skip_from: Option<usize> = None;

    while i < len {
        match bytes[i] {
            b'{' => {
                depth += 1;
                i += 1;
                // `{\*` introduces an ignorable destination
                if skip_from.is_none() && src[i..].starts_with("\\*") {
                    skip_from = Some(depth);
                }
            }
            b'}' => {
                if skip_from == Some(depth) {
                    skip_from = None;
                }
                depth = depth.saturating_sub(1);
                i += 1;
            }
            b'\\' => {
                i += 1;
                if i >= len {
                    break;
                }
                match bytes[i] {
                    b'\'' => {
                        // \'hh hex-escaped byte
                        if let Some(hex) = src.get(i + 1..i + 3) {
                            if let Ok(b) = u8::from_str_radix(hex, 16) {
                                if skip_from.is_none() {
                                    out.push(b as char);
                                }
                            }
                        }
                        i = (i + 3).min(len);
                    }
                    b'\\' | b'{' | b'}' => {
                        if skip_from.is_none() {
                            out.push(bytes[i] as char);
                        }
                        i += 1;
                    }
                    b'~' => {
                        if skip_from.is_none() {
                            out.push(' ');
                        }
                        i += 1;
                    }
                    c if c.is_ascii_alphabetic() => {
                        let word_start = i;
                        while i < len && bytes[i].is_ascii_alphabetic() {
                            i += 1;
                        }
                        let word = &src[word_start..i];

                        let param_start = i;
                        if i < len && (bytes[i] == b'-' || bytes[i].is_ascii_digit()) {
                            i += 1;
                            while i < len && bytes[i].is_ascii_digit() {
                                i += 1;
                            }
                        }
                        let param = &src[param_start..i];

                        // A single space after a control word is a delimiter
                        if i < len && bytes[i] == b' ' {
                            i += 1;
                        }

                        if skip_from.is_none() {
                            match word {
                                "par" | "line" => out.push('\n'),
                                "tab" => out.push('\t'),
                                "u" => {
                                    if let Ok(cp) = param.parse::<i32>() {
                                        let cp = if cp < 0 { cp + 65536 } else { cp } as u32;
                                        if let Some(ch) = char::from_u32(cp) {
                                            out.push(ch);
                                        }
                                    }
                                    i = skip_unicode_fallback(bytes, i);
                                }
                                w if SKIPPED_DESTINATIONS.contains(&w) => {
                                    skip_from = Some(depth);
                                }
                                _ => {}
                            }
                        }
                    }
                    _ => i += 1,
                }
            }
            b'\r' | b'\n' => i += 1,
            b => {
                if skip_from.is_none() {
                    out.push(b as char);
                }
                i += 1;
            }
        }
    }

    out
}

/// After `\uN` the next character (or `\'hh` pair) is a fallback for
/// readers without unicode support and must not be emitted.
fn skip_unicode_fallback(bytes: &[u8], i: usize) -> usize {
    if bytes.get(i) == Some(&b'\\') && bytes.get(i + 1) == Some(&b'\'') {
        (i + 4).min(bytes.len())
    } else if i < bytes.len() {
        i + 1
    } else {
        i
    }
}
