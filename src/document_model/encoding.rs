//! File encodings and line endings.
//!
//! Content always lives in the buffer as UTF-8 with `\n` line ends. The
//! encoding and line ending a file was read with are remembered so that a
//! save writes the same form back.

use super::error::{EditError, EditResult};
use encoding_rs::Encoding;

/// Tried in order when loading a file.
pub const DEFAULT_ENCODINGS: &[&str] = &["utf-8", "euc-jp", "shift_jis"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnding {
    Unix,    // \n (LF)
    Windows, // \r\n (CRLF)
    Mac,     // \r (CR)
}

impl LineEnding {
    pub fn detect(content: &str) -> Self {
        if content.contains("\r\n") {
            LineEnding::Windows
        } else if content.contains('\r') {
            LineEnding::Mac
        } else {
            LineEnding::Unix
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            LineEnding::Unix => "unix",
            LineEnding::Windows => "dos",
            LineEnding::Mac => "mac",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "unix" | "linux" => Some(LineEnding::Unix),
            "dos" | "win" => Some(LineEnding::Windows),
            "mac" => Some(LineEnding::Mac),
            _ => None,
        }
    }

    /// Converts line ends of this format in `content` to `\n`. Other
    /// control characters are left alone so a save writes them back.
    pub fn normalize(&self, content: &str) -> String {
        match self {
            LineEnding::Unix => content.to_string(),
            LineEnding::Windows => content.replace("\r\n", "\n"),
            LineEnding::Mac => content.replace('\r', "\n"),
        }
    }

    /// Converts `\n` line ends to this format.
    pub fn apply(&self, content: &str) -> String {
        match self {
            LineEnding::Unix => content.to_string(),
            LineEnding::Windows => content.replace('\n', "\r\n"),
            LineEnding::Mac => content.replace('\n', "\r"),
        }
    }
}

/// Looks up a WHATWG label. Encodings that cannot be written back in their
/// own form (UTF-16, `replacement`) are refused.
pub fn encoding_for_label(label: &str) -> EditResult<&'static Encoding> {
    let label = label.trim();
    let encoding = Encoding::for_label(label.as_bytes())
        .ok_or_else(|| EditError::UnknownEncoding(label.to_string()))?;
    check_writable(encoding)?;
    Ok(encoding)
}

fn check_writable(encoding: &'static Encoding) -> EditResult<()> {
    if encoding.output_encoding() != encoding {
        return Err(EditError::UnsupportedEncoding {
            encoding: encoding.name(),
        });
    }
    Ok(())
}

pub fn encodings_for_labels<S: AsRef<str>>(labels: &[S]) -> EditResult<Vec<&'static Encoding>> {
    labels
        .iter()
        .map(|label| encoding_for_label(label.as_ref()))
        .collect()
}

pub fn default_encodings() -> Vec<&'static Encoding> {
    vec![
        encoding_rs::UTF_8,
        encoding_rs::EUC_JP,
        encoding_rs::SHIFT_JIS,
    ]
}

/// Decodes `bytes` with the first candidate that accepts them without a
/// single malformed sequence.
pub fn decode(bytes: &[u8], candidates: &[&'static Encoding]) -> Option<(String, &'static Encoding)> {
    candidates.iter().find_map(|&encoding| {
        encoding
            .decode_without_bom_handling_and_without_replacement(bytes)
            .map(|text| (text.into_owned(), encoding))
    })
}

/// Refuses to substitute characters the target encoding lacks.
pub fn encode(text: &str, encoding: &'static Encoding) -> EditResult<Vec<u8>> {
    // encoding_rs falls back to UTF-8 output for these
    check_writable(encoding)?;
    let (bytes, _, had_errors) = encoding.encode(text);
    if had_errors {
        return Err(EditError::Unencodable {
            encoding: encoding.name(),
        });
    }
    Ok(bytes.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_ending_detect() {
        assert_eq!(LineEnding::detect("a\nb"), LineEnding::Unix);
        assert_eq!(LineEnding::detect("a\r\nb"), LineEnding::Windows);
        assert_eq!(LineEnding::detect("a\rb"), LineEnding::Mac);
        assert_eq!(LineEnding::detect("no newline"), LineEnding::Unix);
    }

    #[test]
    fn test_line_ending_round_trip() {
        let text = "one\r\ntwo\r\n";
        let normalized = LineEnding::Windows.normalize(text);
        assert_eq!(normalized, "one\ntwo\n");
        assert_eq!(LineEnding::Windows.apply(&normalized), text);
        assert_eq!(LineEnding::Mac.apply(&normalized), "one\rtwo\r");
        assert_eq!(LineEnding::from_name("dos"), Some(LineEnding::Windows));
        assert_eq!(LineEnding::from_name("vms"), None);
    }

    #[test]
    fn test_windows_keeps_lone_carriage_returns() {
        let text = "progress\r50%\r\ndone\r\n";
        let normalized = LineEnding::Windows.normalize(text);
        assert_eq!(normalized, "progress\r50%\ndone\n");
        assert_eq!(LineEnding::Windows.apply(&normalized), text);
        assert_eq!(LineEnding::Mac.normalize("a\rb\r"), "a\nb\n");
    }

    #[test]
    fn test_labels() {
        let encodings = encodings_for_labels(DEFAULT_ENCODINGS).unwrap();
        assert_eq!(encodings, default_encodings());
        assert!(matches!(
            encoding_for_label("klingon"),
            Err(EditError::UnknownEncoding(label)) if label == "klingon"
        ));
        for label in ["utf-16le", "utf-16be", "iso-2022-kr"] {
            assert!(matches!(
                encoding_for_label(label),
                Err(EditError::UnsupportedEncoding { .. })
            ));
        }
    }

    #[test]
    fn test_decode_prefers_utf8() {
        let (text, encoding) = decode("héllo".as_bytes(), &default_encodings()).unwrap();
        assert_eq!(text, "héllo");
        assert_eq!(encoding, encoding_rs::UTF_8);
    }

    #[test]
    fn test_decode_east_asian() {
        let (euc, _, _) = encoding_rs::EUC_JP.encode("日本語");
        let (text, encoding) = decode(&euc, &default_encodings()).unwrap();
        assert_eq!(text, "日本語");
        assert_eq!(encoding, encoding_rs::EUC_JP);

        let (sjis, _, _) = encoding_rs::SHIFT_JIS.encode("日本語");
        let (text, encoding) = decode(&sjis, &default_encodings()).unwrap();
        assert_eq!(text, "日本語");
        assert_eq!(encoding, encoding_rs::SHIFT_JIS);
    }

    #[test]
    fn test_decode_failure() {
        assert!(decode(b"\xff\xff\xff", &default_encodings()).is_none());
        assert!(decode(b"\xff", &[encoding_rs::UTF_8]).is_none());
    }

    #[test]
    fn test_encode() {
        let bytes = encode("日本語", encoding_rs::SHIFT_JIS).unwrap();
        assert_eq!(bytes, vec![0x93, 0xFA, 0x96, 0x7B, 0x8C, 0xEA]);
        assert!(matches!(
            encode("😀", encoding_rs::EUC_JP),
            Err(EditError::Unencodable { encoding: "EUC-JP" })
        ));
        assert!(matches!(
            encode("hi", encoding_rs::UTF_16LE),
            Err(EditError::UnsupportedEncoding { encoding: "UTF-16LE" })
        ));
    }
}
