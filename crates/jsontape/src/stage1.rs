//! Stage 1: structural indexing.
//!
//! Produces the ordered array of byte offsets that stage 2 and the on-demand
//! iterator walk: one entry for each `{` `}` `[` `]` `,` `:`, for the opening
//! quote of every string, and for the first byte of every number or literal.
//! String contents are skipped with escape awareness and are never indexed,
//! which is what later makes container skipping safe against brackets inside
//! strings.
//!
//! This is the scalar reference indexer; it validates that the whole
//! document is UTF-8 and that every string is terminated, and appends three
//! sentinel entries pointing at the first padding byte so that stage 2 may
//! over-advance at end of document without bounds checks.

use alloc::vec::Vec;

use crate::{
    atoms::is_structural_or_whitespace,
    error::{Error, Result},
    padded::{PaddedBytes, PADDING},
};

/// Number of sentinel index entries appended past the real structurals.
const INDEX_TAIL: usize = 3;

/// The product of stage 1: strictly increasing byte offsets of every
/// structural character, plus the sentinel tail.
#[derive(Debug, Clone, Default)]
pub struct StructuralIndexes {
    indexes: Vec<u32>,
    n: usize,
}

impl StructuralIndexes {
    /// Empty scratch, ready to be filled by [`StructuralIndexes::index_into`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The real structural offsets, excluding the sentinel tail.
    #[must_use]
    pub fn as_slice(&self) -> &[u32] {
        &self.indexes[..self.n]
    }

    /// Number of real structurals.
    #[must_use]
    pub fn len(&self) -> usize {
        self.n
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Offsets including the sentinel tail, for cursors that over-advance.
    pub(crate) fn padded(&self) -> &[u32] {
        &self.indexes
    }

    /// Re-indexes `buf` into this scratch, replacing any previous contents.
    pub fn index_into(&mut self, buf: &PaddedBytes) -> Result<()> {
        let bytes = buf.as_slice();
        if bytes.len() > u32::MAX as usize - PADDING {
            return Err(Error::Tape("document exceeds the 4GiB indexing limit"));
        }
        core::str::from_utf8(bytes).map_err(|_| Error::Utf8)?;

        self.indexes.clear();
        let mut i = 0;
        while i < bytes.len() {
            match bytes[i] {
                b'{' | b'}' | b'[' | b']' | b',' | b':' => {
                    self.indexes.push(i as u32);
                    i += 1;
                }
                b'"' => {
                    self.indexes.push(i as u32);
                    i = skip_string(bytes, i + 1)?;
                }
                b' ' | b'\t' | b'\n' | b'\r' => i += 1,
                _ => {
                    // First byte of a number or literal; the rest of the run
                    // is left unindexed for the leaf decoders.
                    self.indexes.push(i as u32);
                    i += 1;
                    while i < bytes.len()
                        && !is_structural_or_whitespace(bytes[i])
                        && bytes[i] != b'"'
                    {
                        i += 1;
                    }
                }
            }
        }
        self.n = self.indexes.len();
        let sentinel = bytes.len() as u32;
        for _ in 0..INDEX_TAIL {
            self.indexes.push(sentinel);
        }
        Ok(())
    }
}

/// Advances past a string body opened just before `i`, returning the index
/// one past the closing quote.
fn skip_string(bytes: &[u8], mut i: usize) -> Result<usize> {
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'"' => return Ok(i + 1),
            _ => i += 1,
        }
    }
    Err(Error::String)
}

/// Indexes `buf` into a fresh [`StructuralIndexes`].
///
/// # Examples
///
/// ```
/// use jsontape::{index, PaddedBytes};
///
/// let buf = PaddedBytes::from(r#"{"a": 10}"#);
/// let indexes = index(&buf).unwrap();
/// assert_eq!(indexes.as_slice(), &[0, 1, 4, 6, 8]);
/// ```
pub fn index(buf: &PaddedBytes) -> Result<StructuralIndexes> {
    let mut indexes = StructuralIndexes::new();
    indexes.index_into(buf)?;
    Ok(indexes)
}
