//! Response-header sanitizing.
//!
//! Header collections come straight from scanned servers and can be
//! arbitrarily large. Before they are stored or displayed they are measured
//! as compact JSON and refused when over `MAX_HEADERS_SERIALIZED_SIZE`.

use std::collections::HashMap;
use std::io;
use std::ops::Deref;

use serde::Serialize;

use crate::config::MAX_HEADERS_SERIALIZED_SIZE;
use crate::error_handling::SanitizeError;

/// Response headers as received: name to value, no invariants.
pub type RawHeaderMap = HashMap<String, String>;

/// A header map that passed the size check.
///
/// Only [`sanitize_headers`] and [`try_sanitize_headers`] construct it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SanitizedHeaderMap(RawHeaderMap);

impl SanitizedHeaderMap {
    /// Returns the underlying map.
    pub fn into_inner(self) -> RawHeaderMap {
        self.0
    }
}

impl Deref for SanitizedHeaderMap {
    type Target = RawHeaderMap;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Counts bytes written without keeping them.
struct ByteCounter(usize);

impl io::Write for ByteCounter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0 += buf.len();
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Size in bytes of the compact JSON serialization of `headers`.
///
/// The serialization is streamed into a counter, so oversized inputs are
/// never copied into one big string.
///
/// # Errors
///
/// Returns `SanitizeError::Serialization` if `headers` cannot be serialized.
pub fn serialized_size<T>(headers: &T) -> Result<usize, SanitizeError>
where
    T: Serialize + ?Sized,
{
    let mut counter = ByteCounter(0);
    serde_json::to_writer(&mut counter, headers)?;
    Ok(counter.0)
}

/// Copies `headers` if its serialized size is within the storage ceiling.
///
/// Returns `None` when the map is too large or cannot be measured; never
/// fails otherwise.
pub fn sanitize_headers(headers: &RawHeaderMap) -> Option<SanitizedHeaderMap> {
    match try_sanitize_headers(headers) {
        Ok(sanitized) => Some(sanitized),
        Err(e) => {
            log::debug!("Rejecting response headers: {}", e);
            None
        }
    }
}

/// Copies `headers` if its serialized size is within the storage ceiling.
///
/// # Errors
///
/// - `SanitizeError::TooLarge` if the compact JSON form exceeds
///   `MAX_HEADERS_SERIALIZED_SIZE` bytes
/// - `SanitizeError::Serialization` if the map cannot be serialized
pub fn try_sanitize_headers(headers: &RawHeaderMap) -> Result<SanitizedHeaderMap, SanitizeError> {
    let size = serialized_size(headers)?;
    if size > MAX_HEADERS_SERIALIZED_SIZE {
        return Err(SanitizeError::TooLarge {
            size,
            limit: MAX_HEADERS_SERIALIZED_SIZE,
        });
    }
    Ok(SanitizedHeaderMap(headers.clone()))
}

/// Converts transport headers into a [`RawHeaderMap`].
///
/// Names come out lowercase (as `http` stores them). Repeated headers are
/// joined with `", "` in the order received; values that are not valid
/// UTF-8 are decoded lossily.
pub fn headers_to_map(headers: &reqwest::header::HeaderMap) -> RawHeaderMap {
    headers
        .keys()
        .map(|name| {
            let joined = headers
                .get_all(name)
                .iter()
                .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
                .collect::<Vec<_>>()
                .join(", ");
            (name.as_str().to_string(), joined)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::{HeaderMap, HeaderValue, SET_COOKIE, STRICT_TRANSPORT_SECURITY};

    /// Single-entry map whose compact JSON is exactly `size` bytes.
    ///
    /// `{"a":"` plus `"}` is 8 bytes of framing.
    fn map_of_serialized_size(size: usize) -> RawHeaderMap {
        let mut map = RawHeaderMap::new();
        map.insert("a".to_string(), "v".repeat(size - 8));
        map
    }

    #[test]
    fn test_serialized_size_matches_json_length() {
        let mut map = RawHeaderMap::new();
        map.insert("Server".to_string(), "nginx".to_string());
        let expected = serde_json::to_string(&map).unwrap().len();
        assert_eq!(serialized_size(&map).unwrap(), expected);
        assert_eq!(expected, r#"{"Server":"nginx"}"#.len());
    }

    #[test]
    fn test_serialized_size_counts_escapes() {
        let mut map = RawHeaderMap::new();
        map.insert("q".to_string(), "\"\n".to_string());
        // {"q":"\"\n"} with both characters escaped
        assert_eq!(serialized_size(&map).unwrap(), 12);
    }

    #[test]
    fn test_sanitize_at_limit_returns_copy() {
        let map = map_of_serialized_size(MAX_HEADERS_SERIALIZED_SIZE);
        assert_eq!(serialized_size(&map).unwrap(), MAX_HEADERS_SERIALIZED_SIZE);
        let sanitized = sanitize_headers(&map).expect("map at the limit is accepted");
        assert_eq!(*sanitized, map);
    }

    #[test]
    fn test_sanitize_over_limit_is_rejected() {
        let map = map_of_serialized_size(MAX_HEADERS_SERIALIZED_SIZE + 1);
        assert!(sanitize_headers(&map).is_none());
        match try_sanitize_headers(&map) {
            Err(SanitizeError::TooLarge { size, limit }) => {
                assert_eq!(size, MAX_HEADERS_SERIALIZED_SIZE + 1);
                assert_eq!(limit, MAX_HEADERS_SERIALIZED_SIZE);
            }
            other => panic!("expected TooLarge, got {:?}", other),
        }
    }

    #[test]
    fn test_sanitize_empty_map() {
        let map = RawHeaderMap::new();
        let sanitized = sanitize_headers(&map).unwrap();
        assert!(sanitized.is_empty());
    }

    #[test]
    fn test_sanitized_into_inner() {
        let mut map = RawHeaderMap::new();
        map.insert("X-Frame-Options".to_string(), "DENY".to_string());
        let sanitized = sanitize_headers(&map).unwrap();
        assert_eq!(sanitized.into_inner(), map);
    }

    #[test]
    fn test_sanitized_serializes_as_plain_map() {
        let mut map = RawHeaderMap::new();
        map.insert("Server".to_string(), "nginx".to_string());
        let sanitized = sanitize_headers(&map).unwrap();
        assert_eq!(
            serde_json::to_string(&sanitized).unwrap(),
            r#"{"Server":"nginx"}"#
        );
    }

    #[test]
    fn test_many_small_headers_are_rejected() {
        // Header count bomb: each value is small, the total is not
        let map: RawHeaderMap = (0..1000)
            .map(|i| (format!("x-evil-header-{}", i), "a".repeat(32)))
            .collect();
        assert!(sanitize_headers(&map).is_none());
    }

    #[test]
    fn test_headers_to_map_joins_repeated_values() {
        let mut headers = HeaderMap::new();
        headers.append(SET_COOKIE, HeaderValue::from_static("a=1"));
        headers.append(SET_COOKIE, HeaderValue::from_static("b=2"));
        headers.insert(
            STRICT_TRANSPORT_SECURITY,
            HeaderValue::from_static("max-age=63072000"),
        );
        let map = headers_to_map(&headers);
        assert_eq!(map.len(), 2);
        assert_eq!(map["set-cookie"], "a=1, b=2");
        assert_eq!(map["strict-transport-security"], "max-age=63072000");
    }

    #[test]
    fn test_headers_to_map_decodes_invalid_utf8_lossily() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-binary",
            HeaderValue::from_bytes(b"caf\xe9").unwrap(),
        );
        let map = headers_to_map(&headers);
        assert_eq!(map["x-binary"], "caf\u{fffd}");
    }
}
