//! The top-level parse facade.
//!
//! A [`Parser`] owns the structural-index scratch so repeated parses reuse
//! its allocation. Each parse call borrows the parser exclusively, which is
//! what makes a session single-owner: the on-demand iterator and the
//! streaming tape iterator both hold the `&mut` borrow for as long as they
//! are live.

use crate::{
    error::{Error, Result},
    ondemand::JsonIterator,
    options::ParserOptions,
    padded::PaddedBytes,
    stage1::StructuralIndexes,
    stage2::{NoopBuilder, StructuralParser},
    tape::{Tape, TapeBuilder},
};

/// A reusable parse session factory.
///
/// # Examples
///
/// Tape mode:
///
/// ```
/// use jsontape::{PaddedBytes, Parser, ParserOptions, TapeNode};
///
/// let buf = PaddedBytes::from(r#"{"a":1}"#);
/// let mut parser = Parser::new(ParserOptions::default());
/// let tape = parser.parse(&buf)?;
/// assert_eq!(tape.nodes()[2], TapeNode::Int(1));
/// # Ok::<(), jsontape::Error>(())
/// ```
///
/// On-demand mode:
///
/// ```
/// use jsontape::{PaddedBytes, Parser, ParserOptions};
///
/// let buf = PaddedBytes::from(r#"{"a":{"b":2}}"#);
/// let mut parser = Parser::new(ParserOptions::default());
/// let mut doc = parser.iterate(&buf)?;
/// assert!(doc.start_object()?);
/// assert!(doc.find_field_raw("a")?);
/// assert!(doc.start_object()?);
/// assert!(doc.find_field_raw("b")?);
/// assert_eq!(doc.get_uint64()?, 2);
/// # Ok::<(), jsontape::Error>(())
/// ```
#[derive(Debug, Default)]
pub struct Parser {
    options: ParserOptions,
    indexes: StructuralIndexes,
}

impl Parser {
    #[must_use]
    pub fn new(options: ParserOptions) -> Self {
        Self {
            options,
            indexes: StructuralIndexes::new(),
        }
    }

    #[must_use]
    pub fn options(&self) -> ParserOptions {
        self.options
    }

    /// Parses `buf` into a pre-walked [`Tape`]. The buffer must hold exactly
    /// one top-level JSON value.
    pub fn parse(&mut self, buf: &PaddedBytes) -> Result<Tape> {
        self.indexes.index_into(buf)?;
        let mut builder = TapeBuilder::new(self.options.max_depth);
        let mut driver = StructuralParser::new(buf, &self.indexes, 0);
        driver.parse(&mut builder, false)?;
        Ok(builder.into_tape())
    }

    /// Validates `buf` against the JSON grammar without materializing
    /// anything. Scalar contents are not decoded; their validation is
    /// deferred to whoever reads them.
    pub fn validate(&mut self, buf: &PaddedBytes) -> Result<()> {
        self.indexes.index_into(buf)?;
        let mut builder = NoopBuilder::new(self.options.max_depth);
        let mut driver = StructuralParser::new(buf, &self.indexes, 0);
        driver.parse(&mut builder, false)
    }

    /// Begins an on-demand walk of `buf`. The returned iterator holds the
    /// session borrow; no other parse can start on this parser until it is
    /// dropped.
    pub fn iterate<'s>(&'s mut self, buf: &'s PaddedBytes) -> Result<JsonIterator<'s>> {
        self.indexes.index_into(buf)?;
        Ok(JsonIterator::new(buf, &self.indexes))
    }

    /// Parses a stream of concatenated top-level values, one [`Tape`] per
    /// iteration.
    ///
    /// ```
    /// use jsontape::{PaddedBytes, Parser, ParserOptions, TapeNode};
    ///
    /// let buf = PaddedBytes::from("1 2 3");
    /// let mut parser = Parser::new(ParserOptions::default());
    /// let roots: Vec<_> = parser
    ///     .parse_many(&buf)?
    ///     .map(|tape| tape.map(|t| t.nodes()[0]))
    ///     .collect::<jsontape::Result<_>>()?;
    /// assert_eq!(roots, [TapeNode::Int(1), TapeNode::Int(2), TapeNode::Int(3)]);
    /// # Ok::<(), jsontape::Error>(())
    /// ```
    pub fn parse_many<'s>(&'s mut self, buf: &'s PaddedBytes) -> Result<DocumentStream<'s>> {
        self.indexes.index_into(buf)?;
        Ok(DocumentStream {
            buf,
            indexes: &self.indexes,
            max_depth: self.options.max_depth,
            next: 0,
            failed: false,
        })
    }
}

/// Iterator over the top-level values of a streaming parse.
///
/// Persists `next_structural_index` between calls; ends when the structural
/// stream is exhausted, or permanently after the first error.
#[derive(Debug)]
pub struct DocumentStream<'a> {
    buf: &'a PaddedBytes,
    indexes: &'a StructuralIndexes,
    max_depth: usize,
    next: usize,
    failed: bool,
}

impl Iterator for DocumentStream<'_> {
    type Item = Result<Tape>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let mut builder = TapeBuilder::new(self.max_depth);
        let mut driver = StructuralParser::new(self.buf, self.indexes, self.next);
        match driver.parse(&mut builder, true) {
            Ok(()) => {
                self.next = driver.next_structural_index();
                Some(Ok(builder.into_tape()))
            }
            Err(Error::Empty) => None,
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }
}
