//! Text helpers shared by the Markdown layer, the highlighter and the CLI.

use std::borrow::Cow;

/// Decode bytes to a string, handling the encodings Korean Markdown files
/// tend to arrive in.
///
/// 1. UTF-8 (BOM sniffing, including UTF-16 BOMs, via encoding_rs)
/// 2. The caller's encoding label, if any (`"euc-kr"`, `"shift_jis"`, ...)
/// 3. EUC-KR, when it decodes without errors
/// 4. Windows-1252, which accepts every byte
///
/// Valid UTF-8 input is returned without allocating.
pub fn decode_text<'a>(bytes: &'a [u8], hint_encoding: Option<&str>) -> Cow<'a, str> {
    let (result, _encoding, malformed) = encoding_rs::UTF_8.decode(bytes);
    if !malformed {
        return result;
    }

    if let Some(name) = hint_encoding
        && let Some(encoding) = encoding_rs::Encoding::for_label(name.as_bytes())
    {
        let (result, _, _) = encoding.decode(bytes);
        return result;
    }

    let (result, _, malformed) = encoding_rs::EUC_KR.decode(bytes);
    if !malformed {
        return result;
    }

    let (result, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
    result
}

/// Escape text for inclusion in HTML element content or a quoted attribute.
pub fn escape_html(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }

    let mut escaped = String::with_capacity(text.len() + text.len() / 4);
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

/// Uppercase the first character, leaving the rest untouched.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_utf8() {
        let bytes = "안녕하세요".as_bytes();
        assert!(matches!(decode_text(bytes, None), Cow::Borrowed("안녕하세요")));
    }

    #[test]
    fn test_decode_utf8_bom() {
        let bytes = b"\xEF\xBB\xBF# Title";
        assert_eq!(decode_text(bytes, None), "# Title");
    }

    #[test]
    fn test_decode_euc_kr_fallback() {
        let (bytes, _, _) = encoding_rs::EUC_KR.encode("한글 문서");
        assert_eq!(decode_text(&bytes, None), "한글 문서");
    }

    #[test]
    fn test_decode_with_hint() {
        // "café" in Windows-1252
        let bytes = b"caf\xE9";
        assert_eq!(decode_text(bytes, Some("windows-1252")), "café");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("plain"), "plain");
        assert_eq!(
            escape_html(r#"<a href="x">&'"#),
            "&lt;a href=&quot;x&quot;&gt;&amp;&#39;"
        );
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("warning"), "Warning");
        assert_eq!(capitalize(""), "");
    }
}
