//! Stage 2: grammar validation over the structural stream.
//!
//! The driver walks the structural indexes produced by stage 1 and encodes
//! the JSON grammar as a dense state machine: a `loop` dispatching on an
//! explicit `State` that carries the borrowed key/value slices between
//! steps. Each state consumes at most two structurals, so the branch
//! pattern stays short and predictable.
//!
//! After any container closes, the driver cannot know locally whether the
//! enclosing scope is an array, an object, or the document end, so it
//! re-dispatches on the next structural in `State::GenericNext` and asks
//! the builder (which keeps the kind stack) to confirm via the `try_*`
//! events. A structural that fits none of those continuations means the
//! document ended one step ago; the driver backs the cursor up exactly once
//! and finishes.

mod builder;
mod logger;
mod structural_iterator;

pub use builder::{Builder, ContainerKind, NoopBuilder};
pub use structural_iterator::StructuralIterator;

use logger::log_line;

use crate::{
    error::{Error, Result},
    padded::PaddedBytes,
    stage1::StructuralIndexes,
};

/// Grammar state, carrying the borrows the original would have kept in
/// registers across its jump targets.
enum State<'a> {
    ObjectBegin,
    ObjectColon { key: &'a [u8] },
    ObjectValue { key: &'a [u8] },
    ObjectNext,
    ArrayBegin,
    ArrayValue { value: &'a [u8] },
    ArrayNext,
    GenericNext,
    DocumentEnd,
}

/// The stage-2 driver: validates the structural stream against the JSON
/// grammar while feeding a [`Builder`].
#[derive(Debug)]
pub struct StructuralParser<'a> {
    iter: StructuralIterator<'a>,
    depth: u32,
    next_structural: usize,
}

impl<'a> StructuralParser<'a> {
    /// Positions a new driver at `start` within the structural stream.
    /// Non-streaming parses start at zero; streaming parses resume at the
    /// index persisted by the previous call.
    pub fn new(buf: &'a PaddedBytes, indexes: &'a StructuralIndexes, start: usize) -> Self {
        Self {
            iter: StructuralIterator::new(buf, indexes, start),
            depth: 0,
            next_structural: start,
        }
    }

    /// Current nesting depth (containers opened and not yet closed).
    #[must_use]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Byte offset of the most recently consumed structural.
    #[must_use]
    pub fn position(&self) -> usize {
        self.iter.position()
    }

    /// Cursor position persisted by the last `parse` call; streaming
    /// sessions pass it back as `start` to resume.
    #[must_use]
    pub fn next_structural_index(&self) -> usize {
        self.next_structural
    }

    fn error(&self, msg: &'static str) -> Error {
        log_line!(self, "error: {msg}");
        Error::Tape(msg)
    }

    /// Validates one JSON document, emitting events to `builder`.
    ///
    /// In streaming mode exactly one top-level value is consumed and the
    /// residual-token check is suppressed; otherwise the buffer must hold
    /// exactly one top-level value.
    pub fn parse<B: Builder<'a>>(&mut self, builder: &mut B, streaming: bool) -> Result<()> {
        if self.iter.at_end() {
            return Err(Error::Empty);
        }
        log_line!(self, "start document");
        builder.start_document(self)?;

        let mut state = {
            let value = self.iter.advance();
            match value[0] {
                b'{' => State::ObjectBegin,
                b'[' => {
                    // An unclosed top-level array would otherwise only be
                    // caught after the whole stream is consumed; checking the
                    // final structural up front also shields the builder from
                    // a class of mid-parse corruptions.
                    if !streaming && self.iter.last_structural_char() != Some(b']') {
                        return Err(self.error("unclosed top-level array"));
                    }
                    State::ArrayBegin
                }
                _ => {
                    log_line!(self, "root primitive");
                    builder.root_primitive(self, value)?;
                    State::DocumentEnd
                }
            }
        };

        loop {
            state = match state {
                State::ObjectBegin => {
                    let key = self.iter.advance();
                    match key[0] {
                        b'}' => {
                            log_line!(self, "empty object");
                            builder.empty_object(self)?;
                            State::GenericNext
                        }
                        b'"' => {
                            log_line!(self, "+object");
                            builder.start_object(self)?;
                            self.depth += 1;
                            State::ObjectColon { key }
                        }
                        _ => return Err(self.error("object field missing key")),
                    }
                }

                State::ObjectColon { key } => {
                    if self.iter.advance_char() != b':' {
                        return Err(self.error("missing colon after object key"));
                    }
                    State::ObjectValue { key }
                }

                State::ObjectValue { key } => {
                    let value = self.iter.advance();
                    match value[0] {
                        b'{' => {
                            let inner = self.iter.advance();
                            match inner[0] {
                                b'}' => {
                                    builder.empty_object_field(self, key)?;
                                    State::ObjectNext
                                }
                                b'"' => {
                                    log_line!(self, "+object field");
                                    builder.start_object_field(self, key)?;
                                    self.depth += 1;
                                    State::ObjectColon { key: inner }
                                }
                                _ => return Err(self.error("object field missing key")),
                            }
                        }
                        b'[' => {
                            let inner = self.iter.advance();
                            match inner[0] {
                                b']' => {
                                    builder.empty_array_field(self, key)?;
                                    State::ObjectNext
                                }
                                _ => {
                                    log_line!(self, "+array field");
                                    builder.start_array_field(self, key)?;
                                    self.depth += 1;
                                    State::ArrayValue { value: inner }
                                }
                            }
                        }
                        _ => {
                            log_line!(self, "field value");
                            builder.primitive_field(self, key, value)?;
                            State::ObjectNext
                        }
                    }
                }

                State::ObjectNext => match self.iter.advance_char() {
                    b',' => {
                        let key = self.iter.advance();
                        if key[0] != b'"' {
                            return Err(self.error("missing key in object field"));
                        }
                        State::ObjectColon { key }
                    }
                    b'}' => {
                        log_line!(self, "-object");
                        builder.end_object(self)?;
                        self.depth -= 1;
                        State::GenericNext
                    }
                    _ => return Err(self.error("missing comma between object fields")),
                },

                State::ArrayBegin => {
                    let value = self.iter.advance();
                    match value[0] {
                        b']' => {
                            log_line!(self, "empty array");
                            builder.empty_array(self)?;
                            State::GenericNext
                        }
                        _ => {
                            log_line!(self, "+array");
                            builder.start_array(self)?;
                            self.depth += 1;
                            State::ArrayValue { value }
                        }
                    }
                }

                State::ArrayValue { value } => match value[0] {
                    b'{' => {
                        let inner = self.iter.advance();
                        match inner[0] {
                            b'}' => {
                                builder.empty_object(self)?;
                                State::ArrayNext
                            }
                            b'"' => {
                                log_line!(self, "+object");
                                builder.start_object(self)?;
                                self.depth += 1;
                                State::ObjectColon { key: inner }
                            }
                            _ => return Err(self.error("object field missing key")),
                        }
                    }
                    b'[' => {
                        let inner = self.iter.advance();
                        match inner[0] {
                            b']' => {
                                builder.empty_array(self)?;
                                State::ArrayNext
                            }
                            _ => {
                                log_line!(self, "+array");
                                builder.start_array(self)?;
                                self.depth += 1;
                                State::ArrayValue { value: inner }
                            }
                        }
                    }
                    _ => {
                        log_line!(self, "value");
                        builder.primitive(self, value)?;
                        State::ArrayNext
                    }
                },

                State::ArrayNext => match self.iter.advance_char() {
                    b',' => {
                        let value = self.iter.advance();
                        State::ArrayValue { value }
                    }
                    b']' => {
                        log_line!(self, "-array");
                        builder.end_array(self)?;
                        self.depth -= 1;
                        State::GenericNext
                    }
                    _ => return Err(self.error("missing comma between array elements")),
                },

                // After a close we do not know what scope we are resuming:
                //   , "key" :   -> object
                //   , "value" , -> array with a string element
                //   , "value" ] -> end of array with a string element
                //   , <value>   -> array
                //   ]  }        -> another close
                //   otherwise   -> document end (we overshot by one)
                State::GenericNext => match self.iter.advance_char() {
                    b',' => {
                        let value = self.iter.advance();
                        match value[0] {
                            b'"' => match self.iter.advance_char() {
                                b':' => {
                                    builder.try_resume_object(self)?;
                                    State::ObjectValue { key: value }
                                }
                                b',' => {
                                    builder.try_resume_array(self, Some(value))?;
                                    let next = self.iter.advance();
                                    State::ArrayValue { value: next }
                                }
                                b']' => {
                                    builder.try_resume_array(self, Some(value))?;
                                    log_line!(self, "-array");
                                    builder.end_array(self)?;
                                    self.depth = self.depth.saturating_sub(1);
                                    State::GenericNext
                                }
                                _ => {
                                    return Err(
                                        self.error("missing comma or colon between values")
                                    )
                                }
                            },
                            b'[' => {
                                builder.try_resume_array(self, None)?;
                                State::ArrayBegin
                            }
                            b'{' => {
                                builder.try_resume_array(self, None)?;
                                State::ObjectBegin
                            }
                            _ => {
                                builder.try_resume_array(self, None)?;
                                State::ArrayValue { value }
                            }
                        }
                    }
                    b']' => {
                        log_line!(self, "-array");
                        builder.try_end_array(self)?;
                        self.depth = self.depth.saturating_sub(1);
                        State::GenericNext
                    }
                    b'}' => {
                        log_line!(self, "-object");
                        builder.try_end_object(self)?;
                        self.depth = self.depth.saturating_sub(1);
                        State::GenericNext
                    }
                    _ => {
                        // `,` `]` `}` never sit at document end, so this was
                        // the first structural of whatever follows the
                        // document. Overcorrected by one; back up.
                        self.iter.back_up();
                        State::DocumentEnd
                    }
                },

                State::DocumentEnd => {
                    log_line!(self, "end document");
                    builder.end_document(self)?;
                    return self.finish(streaming);
                }
            };
        }
    }

    fn finish(&mut self, streaming: bool) -> Result<()> {
        self.next_structural = self.iter.cursor();

        if self.depth != 0 {
            return Err(self.error("unclosed objects or arrays"));
        }
        if !streaming && self.next_structural != self.iter.n_structurals() {
            return Err(self.error("more than one JSON value at the root of the document"));
        }
        Ok(())
    }
}
