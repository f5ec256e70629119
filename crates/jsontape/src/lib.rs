//! A two-stage JSON parsing engine.
//!
//! Stage 1 scans the padded input buffer once and records the byte offset
//! of every structural character: container delimiters, separators, string
//! openers, and the first byte of each scalar. Stage 2 validates the JSON
//! grammar over that structural stream with a dense state machine, feeding
//! a pluggable [`Builder`]. Two consumers come built in: [`TapeBuilder`]
//! materializes a pre-walked [`Tape`], and [`JsonIterator`] walks the
//! document on demand without materializing anything.
//!
//! All errors are values ([`Error`]); input buffers carry 64 bytes of
//! sentinel padding ([`PaddedBytes`]) so the hot paths never bounds-check.
//!
//! # Examples
//!
//! ```
//! use jsontape::{PaddedBytes, Parser, ParserOptions};
//!
//! let buf = PaddedBytes::from(r#"{"name":"ada","scores":[1,2]}"#);
//! let mut parser = Parser::new(ParserOptions::default());
//!
//! // Tape mode: parse everything up front.
//! let tape = parser.parse(&buf)?;
//! assert_eq!(tape.to_json(), r#"{"name":"ada","scores":[1,2]}"#);
//!
//! // On-demand mode: touch only what you read.
//! let mut doc = parser.iterate(&buf)?;
//! assert!(doc.start_object()?);
//! assert!(doc.find_field_raw("name")?);
//! assert_eq!(doc.get_raw_json_string()?, "ada");
//! # Ok::<(), jsontape::Error>(())
//! ```

#![no_std]

extern crate alloc;

#[cfg(test)]
extern crate std;

mod atoms;
mod error;
mod ondemand;
mod options;
mod padded;
mod parser;
mod stage1;
mod stage2;
mod tape;

pub use error::{Error, Result};
pub use ondemand::{IteratorLease, JsonIterator, RawJsonString};
pub use options::{ParserOptions, DEFAULT_MAX_DEPTH};
pub use padded::{PaddedBytes, PADDING};
pub use parser::{DocumentStream, Parser};
pub use stage1::{index, StructuralIndexes};
pub use stage2::{Builder, ContainerKind, NoopBuilder, StructuralIterator, StructuralParser};
pub use tape::{Tape, TapeBuilder, TapeNode};

#[cfg(test)]
mod tests;
