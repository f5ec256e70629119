use core::ops::{Deref, DerefMut};

use crate::ondemand::JsonIterator;

/// Temporary exclusive ownership of the cursor during a child container
/// walk.
///
/// Obtain a lease immediately after entering a container (consuming its `{`
/// or `[`). While the lease is held the borrow checker keeps the parent from
/// touching the cursor; the lease cannot be copied and moves at most once.
///
/// If the walk stops early, dropping the lease skips to the end of the child
/// container so the parent resumes past its terminator. A walk that consumed
/// the container's closer itself (its `has_next_*` returned `false`, or it
/// called [`skip_container`](JsonIterator::skip_container)) must call
/// [`release`](Self::release) instead — the cursor is already positioned and
/// the drop-skip would eat the tokens that follow. A released lease is gone:
/// using it again is rejected at compile time.
///
/// # Examples
///
/// ```
/// use jsontape::{Parser, ParserOptions, PaddedBytes};
///
/// let buf = PaddedBytes::from(r#"{"skipped":[1,2,3],"wanted":4}"#);
/// let mut parser = Parser::new(ParserOptions::default());
/// let mut doc = parser.iterate(&buf)?;
///
/// assert!(doc.start_object()?);
/// assert!(doc.find_field_raw("skipped")?);
/// assert!(doc.start_array()?);
/// {
///     let mut walk = doc.lease();
///     assert_eq!(walk.get_uint64()?, 1);
///     // Dropped mid-array: the lease skips past the `]`.
/// }
/// assert!(doc.has_next_field()?);
/// assert!(doc.find_field_raw("wanted")?);
/// assert_eq!(doc.get_uint64()?, 4);
/// # Ok::<(), jsontape::Error>(())
/// ```
#[derive(Debug)]
pub struct IteratorLease<'p, 'a> {
    iter: &'p mut JsonIterator<'a>,
    released: bool,
}

impl<'p, 'a> IteratorLease<'p, 'a> {
    pub(crate) fn new(iter: &'p mut JsonIterator<'a>) -> Self {
        Self {
            iter,
            released: false,
        }
    }

    /// Returns control to the parent without skipping: the caller asserts
    /// the cursor already sits past the child's terminator.
    pub fn release(mut self) {
        self.released = true;
    }
}

impl<'a> Deref for IteratorLease<'_, 'a> {
    type Target = JsonIterator<'a>;

    fn deref(&self) -> &Self::Target {
        self.iter
    }
}

impl DerefMut for IteratorLease<'_, '_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.iter
    }
}

impl Drop for IteratorLease<'_, '_> {
    fn drop(&mut self) {
        if !self.released {
            // A truncated document makes the skip fail; the session is
            // poisoned either way, so the error has nowhere better to go.
            let _ = self.iter.skip_container();
        }
    }
}
