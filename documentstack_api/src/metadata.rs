//! Document metadata carried in success response headers.

use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use reqwest::header::{HeaderMap, CONTENT_DISPOSITION, CONTENT_LENGTH};

/// Filename used when `Content-Disposition` is missing or has no filename.
pub(crate) const DEFAULT_FILENAME: &str = "document.pdf";

const GENERATION_TIME_HEADER: &str = "x-generation-time-ms";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ResponseMetadata {
    pub filename: String,
    pub generation_time_ms: i64,
    pub content_length: u64,
}

impl ResponseMetadata {
    /// Extracts metadata from a 200 response's headers. `payload_len` is the
    /// number of body bytes actually read.
    pub fn from_headers(headers: &HeaderMap, payload_len: usize) -> Self {
        let filename = header_str(headers, CONTENT_DISPOSITION.as_str())
            .and_then(parse_filename)
            .unwrap_or_else(|| DEFAULT_FILENAME.to_string());
        let generation_time_ms = parse_int(headers, GENERATION_TIME_HEADER);
        let mut content_length: u64 = parse_int(headers, CONTENT_LENGTH.as_str());
        if content_length == 0 {
            content_length = payload_len as u64;
        }
        Self {
            filename,
            generation_time_ms,
            content_length,
        }
    }
}

fn filename_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"filename="?([^";\n]+)"?"#).expect("filename pattern is valid")
    })
}

/// First capture of the filename pattern in a `Content-Disposition` value.
fn parse_filename(disposition: &str) -> Option<String> {
    filename_pattern()
        .captures(disposition)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Header value as UTF-8. `HeaderValue::to_str` rejects anything outside
/// visible ASCII, which would drop non-ASCII filenames.
fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| std::str::from_utf8(v.as_bytes()).ok())
}

/// Missing or unparseable values read as zero.
fn parse_int<T: FromStr + Default>(headers: &HeaderMap, name: &str) -> T {
    header_str(headers, name)
        .and_then(|v| v.parse().ok())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(*name, HeaderValue::from_static(*value));
        }
        map
    }

    #[test]
    fn quoted_filename() {
        let meta = ResponseMetadata::from_headers(
            &headers(&[("content-disposition", "attachment; filename=\"invoice.pdf\"")]),
            10,
        );
        assert_eq!(meta.filename, "invoice.pdf");
    }

    #[test]
    fn non_ascii_filename_is_kept() {
        let mut map = HeaderMap::new();
        map.insert(
            CONTENT_DISPOSITION,
            HeaderValue::from_bytes("attachment; filename=\"résumé.pdf\"".as_bytes()).unwrap(),
        );
        let meta = ResponseMetadata::from_headers(&map, 1);
        assert_eq!(meta.filename, "résumé.pdf");
    }

    #[test]
    fn invalid_utf8_disposition_uses_default() {
        let mut map = HeaderMap::new();
        map.insert(
            CONTENT_DISPOSITION,
            HeaderValue::from_bytes(b"attachment; filename=\"\xff.pdf\"").unwrap(),
        );
        let meta = ResponseMetadata::from_headers(&map, 1);
        assert_eq!(meta.filename, DEFAULT_FILENAME);
    }

    #[test]
    fn unquoted_filename_stops_at_semicolon() {
        assert_eq!(
            parse_filename("attachment; filename=report.pdf; size=100").as_deref(),
            Some("report.pdf")
        );
    }

    #[test]
    fn missing_disposition_uses_default() {
        let meta = ResponseMetadata::from_headers(&HeaderMap::new(), 3);
        assert_eq!(meta.filename, DEFAULT_FILENAME);
    }

    #[test]
    fn disposition_without_filename_uses_default() {
        let meta = ResponseMetadata::from_headers(&headers(&[("content-disposition", "inline")]), 3);
        assert_eq!(meta.filename, "document.pdf");
    }

    #[test]
    fn generation_time_is_parsed() {
        let meta = ResponseMetadata::from_headers(&headers(&[("x-generation-time-ms", "245")]), 0);
        assert_eq!(meta.generation_time_ms, 245);

        let meta = ResponseMetadata::from_headers(&headers(&[("x-generation-time-ms", "fast")]), 0);
        assert_eq!(meta.generation_time_ms, 0);
    }

    #[test]
    fn negative_generation_time_is_kept() {
        let meta = ResponseMetadata::from_headers(&headers(&[("x-generation-time-ms", "-5")]), 0);
        assert_eq!(meta.generation_time_ms, -5);
    }

    #[test]
    fn content_length_header_wins_when_nonzero() {
        let meta = ResponseMetadata::from_headers(&headers(&[("content-length", "2048")]), 5);
        assert_eq!(meta.content_length, 2048);
    }

    #[test]
    fn zero_or_missing_content_length_falls_back_to_payload() {
        let meta = ResponseMetadata::from_headers(&headers(&[("content-length", "0")]), 5);
        assert_eq!(meta.content_length, 5);

        let meta = ResponseMetadata::from_headers(&HeaderMap::new(), 7);
        assert_eq!(meta.content_length, 7);

        let meta = ResponseMetadata::from_headers(&headers(&[("content-length", "lots")]), 9);
        assert_eq!(meta.content_length, 9);
    }
}
