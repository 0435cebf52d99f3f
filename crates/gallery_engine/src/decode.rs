use chardetng::EncodingDetector;
use encoding_rs::Encoding;

/// How far into the document to look for a `<meta charset>` declaration.
const META_PRESCAN_BYTES: usize = 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedHtml {
    pub html: String,
    pub encoding_label: String,
    /// Whether malformed sequences were replaced with U+FFFD.
    pub had_errors: bool,
}

/// Decode raw bytes into UTF-8 using: BOM -> Content-Type charset -> meta charset -> chardetng.
///
/// Never fails; undecodable sequences become replacement characters so a page
/// with a few bad bytes still yields its images.
pub fn decode_html(bytes: &[u8], content_type: Option<&str>) -> DecodedHtml {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        return decode_with(&bytes[bom_len..], encoding);
    }

    let declared = content_type
        .and_then(charset_param)
        .or_else(|| meta_charset(bytes))
        .and_then(|label| Encoding::for_label(label.as_bytes()));
    if let Some(encoding) = declared {
        return decode_with(bytes, encoding);
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    decode_with(bytes, detector.guess(None, true))
}

fn charset_param(content_type: &str) -> Option<String> {
    content_type.split(';').skip(1).find_map(|part| {
        let (key, value) = part.split_once('=')?;
        key.trim()
            .eq_ignore_ascii_case("charset")
            .then(|| value.trim().trim_matches(['"', '\'']).to_string())
            .filter(|label| !label.is_empty())
    })
}

fn meta_charset(bytes: &[u8]) -> Option<String> {
    let head = &bytes[..bytes.len().min(META_PRESCAN_BYTES)];
    let head = String::from_utf8_lossy(head).to_ascii_lowercase();
    let mut rest = head.as_str();
    while let Some(pos) = rest.find("<meta") {
        rest = &rest[pos + "<meta".len()..];
        let tag = &rest[..rest.find('>').unwrap_or(rest.len())];
        if let Some(idx) = tag.find("charset=") {
            let label: String = tag[idx + "charset=".len()..]
                .trim_start_matches(['"', '\''])
                .chars()
                .take_while(|c| !matches!(c, '"' | '\'' | ';' | '/' | '>') && !c.is_whitespace())
                .collect();
            if !label.is_empty() {
                return Some(label);
            }
        }
    }
    None
}

fn decode_with(bytes: &[u8], encoding: &'static Encoding) -> DecodedHtml {
    let (text, had_errors) = encoding.decode_without_bom_handling(bytes);
    DecodedHtml {
        html: text.into_owned(),
        encoding_label: encoding.name().to_string(),
        had_errors,
    }
}

#[cfg(test)]
mod tests {
    use super::{charset_param, meta_charset};

    #[test]
    fn charset_param_is_case_insensitive_and_unquoted() {
        assert_eq!(
            charset_param("text/html; Charset=\"ISO-8859-1\""),
            Some("ISO-8859-1".to_string())
        );
        assert_eq!(charset_param("text/html"), None);
    }

    #[test]
    fn meta_charset_reads_both_forms() {
        assert_eq!(
            meta_charset(b"<html><head><meta charset=\"shift_jis\">"),
            Some("shift_jis".to_string())
        );
        assert_eq!(
            meta_charset(
                b"<meta http-equiv=\"Content-Type\" content=\"text/html; charset=windows-1251\">"
            ),
            Some("windows-1251".to_string())
        );
        assert_eq!(meta_charset(b"<meta name=\"viewport\">"), None);
    }
}
