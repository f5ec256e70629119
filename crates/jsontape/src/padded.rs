//! Input buffers with read-ahead padding.
//!
//! Stage 2 and the on-demand iterator read a handful of bytes past the last
//! structural character without bounds checks; the scalar decoders likewise
//! scan forward until they hit a terminator. Both are safe only because every
//! input is stored with [`PADDING`] zeroed sentinel bytes past its logical
//! end, so a read that overshoots the document lands in the padding instead
//! of out of bounds.

use alloc::vec::Vec;

/// Number of sentinel bytes guaranteed past the logical end of the input.
pub const PADDING: usize = 64;

/// An owned input buffer followed by [`PADDING`] zeroed bytes.
///
/// The buffer is immutable for the duration of any parse session that
/// borrows it.
///
/// # Examples
///
/// ```
/// use jsontape::PaddedBytes;
///
/// let buf = PaddedBytes::from(r#"{"a":1}"#);
/// assert_eq!(buf.len(), 7);
/// assert_eq!(buf.as_slice(), br#"{"a":1}"#);
/// ```
#[derive(Debug, Clone)]
pub struct PaddedBytes {
    bytes: Vec<u8>,
    len: usize,
}

impl PaddedBytes {
    /// Copies `input` into a freshly padded buffer.
    #[must_use]
    pub fn from_slice(input: &[u8]) -> Self {
        let mut bytes = Vec::with_capacity(input.len() + PADDING);
        bytes.extend_from_slice(input);
        bytes.resize(input.len() + PADDING, 0);
        Self {
            bytes,
            len: input.len(),
        }
    }

    /// Logical length of the document, excluding padding.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The document bytes, excluding padding.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    /// The document bytes including the sentinel padding.
    pub(crate) fn padded(&self) -> &[u8] {
        &self.bytes
    }
}

impl From<&[u8]> for PaddedBytes {
    fn from(input: &[u8]) -> Self {
        Self::from_slice(input)
    }
}

impl From<&str> for PaddedBytes {
    fn from(input: &str) -> Self {
        Self::from_slice(input.as_bytes())
    }
}

impl From<Vec<u8>> for PaddedBytes {
    fn from(mut input: Vec<u8>) -> Self {
        let len = input.len();
        input.resize(len + PADDING, 0);
        Self { bytes: input, len }
    }
}

impl From<alloc::string::String> for PaddedBytes {
    fn from(input: alloc::string::String) -> Self {
        Self::from(input.into_bytes())
    }
}

impl AsRef<[u8]> for PaddedBytes {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}
