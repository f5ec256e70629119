use alloc::string::String;
use core::fmt;

use crate::{atoms, error::Result};

/// A borrowed, uninterpreted JSON string: the bytes between the opening and
/// closing quote, escapes untouched.
///
/// Comparison against `&str` is raw byte comparison. That matches typical
/// ASCII and UTF-8 keys, but a key written with escapes (`"\u0041"`) will
/// not match its decoded form (`"A"`); callers needing escape-tolerant
/// matching must [`unescape`](RawJsonString::unescape) first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawJsonString<'a> {
    raw: &'a [u8],
}

impl<'a> RawJsonString<'a> {
    /// Slices the string body out of a suffix starting at the opening quote.
    pub(crate) fn from_quoted(value: &'a [u8]) -> Self {
        Self {
            raw: atoms::string_span(value),
        }
    }

    /// The raw bytes, escapes included.
    #[must_use]
    pub fn as_bytes(&self) -> &'a [u8] {
        self.raw
    }

    /// Decodes the escapes into an owned string, validating as it goes.
    pub fn unescape(&self) -> Result<String> {
        let mut out = String::new();
        atoms::unescape_into(self.raw, &mut out)?;
        Ok(out)
    }
}

impl PartialEq<&str> for RawJsonString<'_> {
    fn eq(&self, other: &&str) -> bool {
        self.raw == other.as_bytes()
    }
}

impl PartialEq<RawJsonString<'_>> for &str {
    fn eq(&self, other: &RawJsonString<'_>) -> bool {
        other == self
    }
}

impl fmt::Display for RawJsonString<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match core::str::from_utf8(self.raw) {
            Ok(s) => f.write_str(s),
            Err(_) => write!(f, "{:?}", self.raw),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_matching_is_escape_blind() {
        let quoted = b"\"\\u0041\" rest";
        let raw = RawJsonString::from_quoted(quoted);
        assert_eq!(raw.as_bytes(), br"\u0041");
        assert!(raw != "A");
        assert_eq!(raw.unescape().unwrap(), "A");

        let plain = RawJsonString::from_quoted(b"\"abc\",");
        assert!(plain == "abc");
    }
}
