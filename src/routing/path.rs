//! Sub-path derivation.
//!
//! # Responsibilities
//! - Remove the context path (mount prefix) from the request path
//! - Percent-decode the remaining sub-path
//!
//! # Design Decisions
//! - Prefix removal is by byte length, not path-aware
//! - Rules are selected against the decoded sub-path; capture values are read
//!   from the raw sub-path (see `captures`)
//! - `+` is kept as-is: paths are not form-encoded

use std::borrow::Cow;

use crate::routing::error::{RoutingError, RoutingResult};

/// The part of a request path that rules are evaluated against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubPath {
    raw: String,
    decoded: String,
}

impl SubPath {
    /// Strip `context_path` from `path` and decode what remains.
    pub fn from_request(path: &str, context_path: &str) -> RoutingResult<Self> {
        let raw = strip_context_path(path, context_path);
        let decoded = percent_decode(raw)?.into_owned();
        Ok(Self {
            raw: raw.to_string(),
            decoded,
        })
    }

    /// Sub-path as received, still percent-encoded.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Sub-path after percent-decoding.
    pub fn decoded(&self) -> &str {
        &self.decoded
    }
}

/// Remove the first `context_path.len()` bytes of `path`.
///
/// An out-of-range cut yields an empty sub-path.
pub fn strip_context_path<'a>(path: &'a str, context_path: &str) -> &'a str {
    path.get(context_path.len()..).unwrap_or("")
}

/// Percent-decode a path, rejecting malformed escapes and non UTF-8 output.
pub fn percent_decode(path: &str) -> RoutingResult<Cow<'_, str>> {
    let bytes = path.as_bytes();
    let mut idx = 0;
    while let Some(offset) = bytes[idx..].iter().position(|b| *b == b'%') {
        let pos = idx + offset;
        let escape = bytes.get(pos + 1..pos + 3);
        match escape {
            Some([hi, lo]) if hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit() => idx = pos + 3,
            _ => {
                return Err(RoutingError::PathDecode {
                    path: path.to_string(),
                    reason: format!("malformed escape sequence at byte {}", pos),
                });
            }
        }
    }

    urlencoding::decode(path).map_err(|e| RoutingError::PathDecode {
        path: path.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_context_path() {
        assert_eq!(strip_context_path("/products/v1/ecom/", "/products"), "/v1/ecom/");
        assert_eq!(strip_context_path("/v1/ecom/", ""), "/v1/ecom/");
        // Not path-aware: the prefix is cut by length only.
        assert_eq!(strip_context_path("/productsX/a", "/products"), "X/a");
        assert_eq!(strip_context_path("/p", "/products"), "");
    }

    #[test]
    fn test_decode_reserved_characters() {
        let sub = SubPath::from_request("/2124%3B2125", "").unwrap();
        assert_eq!(sub.raw(), "/2124%3B2125");
        assert_eq!(sub.decoded(), "/2124;2125");

        let sub = SubPath::from_request("/products/foo%20bar", "/products").unwrap();
        assert_eq!(sub.raw(), "/foo%20bar");
        assert_eq!(sub.decoded(), "/foo bar");
    }

    #[test]
    fn test_plus_is_not_a_space() {
        let sub = SubPath::from_request("/a+b", "").unwrap();
        assert_eq!(sub.decoded(), "/a+b");
    }

    #[test]
    fn test_malformed_escape_rejected() {
        assert!(matches!(
            percent_decode("/foo%zzbar"),
            Err(RoutingError::PathDecode { .. })
        ));
        assert!(matches!(
            percent_decode("/foo%2"),
            Err(RoutingError::PathDecode { .. })
        ));
    }

    #[test]
    fn test_invalid_utf8_rejected() {
        assert!(matches!(
            percent_decode("/%FF%FE"),
            Err(RoutingError::PathDecode { .. })
        ));
    }

    #[test]
    fn test_unencoded_path_borrowed() {
        assert!(matches!(percent_decode("/plain/path").unwrap(), Cow::Borrowed(_)));
    }
}
