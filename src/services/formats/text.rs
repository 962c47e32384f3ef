//! Plain text extraction
//!
//! UTF-8 is decoded as-is; anything else falls back to lossy decoding so
//! a stray byte never fails the whole upload.

use anyhow::Result;

pub fn extract(data: &[u8]) -> Result<String> {
    match std::str::from_utf8(data) {
        Ok(text) => Ok(text.to_string()),
        Err(_) => Ok(String::from_utf8_lossy(data).into_owned()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_utf8() {
        assert_eq!(extract("héllo wörld".as_bytes()).unwrap(), "héllo wörld");
    }

    #[test]
    fn test_invalid_utf8_is_lossy() {
        let mut data = b"ok ".to_vec();
        data.push(0xFF);
        data.extend_from_slice(b" still ok");
        let text = extract(&data).unwrap();
        assert!(text.starts_with("ok "));
        assert!(text.ends_with(" still ok"));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(extract(b"").unwrap(), "");
    }
}
