//! Scalar leaf decoders.
//!
//! Converts raw scalar bytes into integers, floats, booleans and null,
//! validates literals, and unescapes strings on demand. Every function takes
//! a suffix slice of a padded buffer starting at the first byte of the
//! scalar, so lookahead never needs a bounds check beyond `slice.get`.

use alloc::string::String;

use crate::error::{Error, Result};

/// True for the six structural characters, JSON whitespace, and the `0x00`
/// padding sentinel. Every scalar literal must be followed by one of these.
pub(crate) fn is_structural_or_whitespace(b: u8) -> bool {
    matches!(
        b,
        b'{' | b'}' | b'[' | b']' | b',' | b':' | b' ' | b'\t' | b'\n' | b'\r' | 0
    )
}

pub(crate) fn is_true_atom(bytes: &[u8]) -> bool {
    bytes.len() >= 5 && &bytes[..4] == b"true" && is_structural_or_whitespace(bytes[4])
}

pub(crate) fn is_false_atom(bytes: &[u8]) -> bool {
    bytes.len() >= 6 && &bytes[..5] == b"false" && is_structural_or_whitespace(bytes[5])
}

pub(crate) fn is_null_atom(bytes: &[u8]) -> bool {
    bytes.len() >= 5 && &bytes[..4] == b"null" && is_structural_or_whitespace(bytes[4])
}

/// A decoded number, classified the way the tape stores it: signed where it
/// fits, unsigned above `i64::MAX`, double when the literal has a fraction
/// or exponent or overflows 64-bit integers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Number {
    Int(i64),
    UInt(u64),
    Double(f64),
}

struct ScannedNumber {
    end: usize,
    is_float: bool,
    negative: bool,
}

/// Validates the full JSON number grammar: optional leading `-`, an integer
/// part with no leading zeros (unless zero itself), an optional fraction,
/// an optional exponent, and a structural/whitespace terminator.
fn scan(bytes: &[u8]) -> Result<ScannedNumber> {
    let mut i = 0;
    let negative = bytes.first() == Some(&b'-');
    if negative {
        i += 1;
    }
    match bytes.get(i) {
        Some(b'0') => {
            i += 1;
            if matches!(bytes.get(i), Some(b'0'..=b'9')) {
                return Err(Error::Number);
            }
        }
        Some(b'1'..=b'9') => {
            while matches!(bytes.get(i), Some(b'0'..=b'9')) {
                i += 1;
            }
        }
        _ => return Err(Error::Number),
    }
    let mut is_float = false;
    if bytes.get(i) == Some(&b'.') {
        is_float = true;
        i += 1;
        if !matches!(bytes.get(i), Some(b'0'..=b'9')) {
            return Err(Error::Number);
        }
        while matches!(bytes.get(i), Some(b'0'..=b'9')) {
            i += 1;
        }
    }
    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        is_float = true;
        i += 1;
        if matches!(bytes.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        if !matches!(bytes.get(i), Some(b'0'..=b'9')) {
            return Err(Error::Number);
        }
        while matches!(bytes.get(i), Some(b'0'..=b'9')) {
            i += 1;
        }
    }
    match bytes.get(i) {
        None => {}
        Some(&b) if is_structural_or_whitespace(b) => {}
        Some(_) => return Err(Error::Number),
    }
    Ok(ScannedNumber {
        end: i,
        is_float,
        negative,
    })
}

fn fold_digits(digits: &[u8]) -> Result<u64> {
    let mut value: u64 = 0;
    for &d in digits {
        value = value
            .checked_mul(10)
            .and_then(|v| v.checked_add(u64::from(d - b'0')))
            .ok_or(Error::Number)?;
    }
    Ok(value)
}

/// Full-grammar unsigned decode. `Error::IncorrectType` for negative or
/// fractional/exponent literals, `Error::Number` for malformed digits or
/// overflow.
pub(crate) fn parse_u64(bytes: &[u8]) -> Result<u64> {
    if bytes.first() == Some(&b'-') {
        return Err(Error::IncorrectType);
    }
    let scanned = scan(bytes)?;
    if scanned.is_float {
        return Err(Error::IncorrectType);
    }
    fold_digits(&bytes[..scanned.end])
}

/// Full-grammar signed decode. `Error::IncorrectType` for fractional or
/// exponent literals, `Error::Number` for malformed digits or overflow.
pub(crate) fn parse_i64(bytes: &[u8]) -> Result<i64> {
    let scanned = scan(bytes)?;
    if scanned.is_float {
        return Err(Error::IncorrectType);
    }
    let digits = if scanned.negative {
        &bytes[1..scanned.end]
    } else {
        &bytes[..scanned.end]
    };
    let magnitude = fold_digits(digits)?;
    if scanned.negative {
        if magnitude > i64::MAX as u64 + 1 {
            return Err(Error::Number);
        }
        Ok((magnitude as i64).wrapping_neg())
    } else if magnitude > i64::MAX as u64 {
        Err(Error::Number)
    } else {
        Ok(magnitude as i64)
    }
}

/// Full-grammar double decode. Out-of-range literals are `Error::Number`;
/// underflow to zero is accepted.
pub(crate) fn parse_f64(bytes: &[u8]) -> Result<f64> {
    let scanned = scan(bytes)?;
    parse_double_text(&bytes[..scanned.end])
}

fn parse_double_text(text: &[u8]) -> Result<f64> {
    let text = core::str::from_utf8(text).map_err(|_| Error::Number)?;
    let value: f64 = text.parse().map_err(|_| Error::Number)?;
    if !value.is_finite() {
        return Err(Error::Number);
    }
    Ok(value)
}

/// Decode for the tape path: integers where they fit, otherwise promoted to
/// double.
pub(crate) fn parse_number(bytes: &[u8]) -> Result<Number> {
    let scanned = scan(bytes)?;
    if !scanned.is_float {
        let digits = if scanned.negative {
            &bytes[1..scanned.end]
        } else {
            &bytes[..scanned.end]
        };
        if let Ok(magnitude) = fold_digits(digits) {
            if scanned.negative {
                if magnitude <= i64::MAX as u64 + 1 {
                    return Ok(Number::Int((magnitude as i64).wrapping_neg()));
                }
            } else if magnitude <= i64::MAX as u64 {
                return Ok(Number::Int(magnitude as i64));
            } else {
                return Ok(Number::UInt(magnitude));
            }
        }
        // Integer overflowed 64 bits; promote.
    }
    Ok(Number::Double(parse_double_text(&bytes[..scanned.end])?))
}

/// Given a suffix slice starting at an opening quote, returns the raw
/// contents between the quotes, escapes untouched. Relies on stage 1 having
/// verified the string is terminated.
pub(crate) fn string_span(value: &[u8]) -> &[u8] {
    let mut i = 1;
    while i < value.len() {
        match value[i] {
            b'\\' => i += 2,
            b'"' => break,
            _ => i += 1,
        }
    }
    &value[1..i.min(value.len())]
}

/// Unescapes raw string contents (the bytes between the quotes) into `out`.
///
/// Rejects unescaped control characters and bad escape sequences with
/// `Error::String`, and non-UTF-8 spans with `Error::Utf8`.
pub(crate) fn unescape_into(raw: &[u8], out: &mut String) -> Result<()> {
    let mut i = 0;
    while i < raw.len() {
        match raw[i] {
            b'\\' => {
                i += 1;
                let Some(&esc) = raw.get(i) else {
                    return Err(Error::String);
                };
                i += 1;
                match esc {
                    b'"' => out.push('"'),
                    b'\\' => out.push('\\'),
                    b'/' => out.push('/'),
                    b'b' => out.push('\u{0008}'),
                    b'f' => out.push('\u{000C}'),
                    b'n' => out.push('\n'),
                    b'r' => out.push('\r'),
                    b't' => out.push('\t'),
                    b'u' => {
                        let (ch, next) = decode_unicode_escape(raw, i)?;
                        out.push(ch);
                        i = next;
                    }
                    _ => return Err(Error::String),
                }
            }
            0x00..=0x1F => return Err(Error::String),
            _ => {
                let start = i;
                while i < raw.len() && raw[i] != b'\\' && raw[i] >= 0x20 {
                    i += 1;
                }
                let span = core::str::from_utf8(&raw[start..i]).map_err(|_| Error::Utf8)?;
                out.push_str(span);
            }
        }
    }
    Ok(())
}

fn hex4(raw: &[u8], i: usize) -> Result<u32> {
    if raw.len() < i + 4 {
        return Err(Error::String);
    }
    let mut value = 0u32;
    for &b in &raw[i..i + 4] {
        let digit = match b {
            b'0'..=b'9' => b - b'0',
            b'a'..=b'f' => b - b'a' + 10,
            b'A'..=b'F' => b - b'A' + 10,
            _ => return Err(Error::String),
        };
        value = value << 4 | u32::from(digit);
    }
    Ok(value)
}

/// Decodes `\uXXXX` (plus a trailing low surrogate where required) starting
/// at the first hex digit. Returns the character and the index just past the
/// escape.
fn decode_unicode_escape(raw: &[u8], i: usize) -> Result<(char, usize)> {
    let first = hex4(raw, i)?;
    let mut next = i + 4;
    let code = if (0xD800..0xDC00).contains(&first) {
        if raw.get(next) != Some(&b'\\') || raw.get(next + 1) != Some(&b'u') {
            return Err(Error::String);
        }
        let low = hex4(raw, next + 2)?;
        if !(0xDC00..0xE000).contains(&low) {
            return Err(Error::String);
        }
        next += 6;
        0x10000 + ((first - 0xD800) << 10) + (low - 0xDC00)
    } else if (0xDC00..0xE000).contains(&first) {
        return Err(Error::String);
    } else {
        first
    };
    let ch = char::from_u32(code).ok_or(Error::String)?;
    Ok((ch, next))
}
