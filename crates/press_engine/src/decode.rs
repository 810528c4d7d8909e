use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_8};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedHtml {
    pub html: String,
    pub encoding_label: String,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("failed to decode bytes with {encoding}: {message}")]
    DecodeFailure { encoding: String, message: String },
}

/// Decode raw article bytes into UTF-8 using: BOM -> strict UTF-8 -> chardetng guess.
pub fn decode_html(bytes: &[u8]) -> Result<DecodedHtml, DecodeError> {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return decode_with(bytes, encoding);
    }

    if let Ok(text) = std::str::from_utf8(bytes) {
        return Ok(DecodedHtml {
            html: text.to_string(),
            encoding_label: UTF_8.name().to_string(),
        });
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let enc = detector.guess(None, true);
    decode_with(bytes, enc)
}

fn decode_with(bytes: &[u8], enc: &'static Encoding) -> Result<DecodedHtml, DecodeError> {
    let (text, _, had_errors) = enc.decode(bytes);
    if had_errors {
        return Err(DecodeError::DecodeFailure {
            encoding: enc.name().to_string(),
            message: "malformed byte sequence".into(),
        });
    }
    Ok(DecodedHtml {
        html: text.into_owned(),
        encoding_label: enc.name().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf8_bom_is_stripped() {
        let decoded = decode_html(b"\xEF\xBB\xBF<h1>Hi</h1>").unwrap();
        assert_eq!(decoded.html, "<h1>Hi</h1>");
        assert_eq!(decoded.encoding_label, "UTF-8");
    }

    #[test]
    fn latin1_bytes_fall_back_to_detection() {
        let decoded = decode_html(b"<p>Caf\xE9 cr\xE8me</p>").unwrap();
        assert_ne!(decoded.encoding_label, "UTF-8");
        assert!(decoded.html.starts_with("<p>Caf"));
        assert!(decoded.html.ends_with("me</p>"));
    }
}
