use thiserror::Error;

/// Errors surfaced by the engine.
///
/// Every fallible operation returns one of these as a value; nothing is ever
/// thrown. Once a parse call has returned an error the session is poisoned:
/// callers may still inspect buffers, but must not re-enter grammar
/// operations on the same session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// The input contained no structural characters at all.
    #[error("no JSON found in the input")]
    Empty,
    /// The structural stream violated the JSON grammar. Carries the driver's
    /// diagnostic message.
    #[error("{0}")]
    Tape(&'static str),
    /// A typed read was attempted on a value of a different kind.
    #[error("value is of a different type than requested")]
    IncorrectType,
    /// A number literal was malformed, or out of range for the requested
    /// representation.
    #[error("malformed or out-of-range number literal")]
    Number,
    /// A string literal contained an unescaped control character or an
    /// invalid escape sequence.
    #[error("malformed string literal")]
    String,
    /// Bytes that should have decoded to text were not valid UTF-8.
    #[error("invalid UTF-8")]
    Utf8,
    /// Nesting exceeded the builder's configured maximum depth.
    #[error("maximum nesting depth exceeded")]
    Depth,
}

/// Crate-wide result alias.
pub type Result<T> = core::result::Result<T, Error>;
