//! The DOM tape writer.

use alloc::vec::Vec;

use crate::{
    atoms,
    error::{Error, Result},
    stage2::{Builder, ContainerKind, StructuralParser},
    tape::{Tape, TapeNode},
};

struct Frame {
    kind: ContainerKind,
    node: usize,
    count: u32,
}

/// Builds a [`Tape`] from stage-2 events.
///
/// Keeps the container-kind stack the `try_*` events dispatch on, counts
/// children per frame, and patches each container's end link and count when
/// it closes.
pub struct TapeBuilder {
    tape: Tape,
    stack: Vec<Frame>,
    max_depth: usize,
}

impl TapeBuilder {
    #[must_use]
    pub fn new(max_depth: usize) -> Self {
        Self {
            tape: Tape::default(),
            stack: Vec::new(),
            max_depth,
        }
    }

    /// The finished tape. Meaningful only after a successful parse.
    #[must_use]
    pub fn into_tape(self) -> Tape {
        self.tape
    }

    fn bump(&mut self) {
        if let Some(frame) = self.stack.last_mut() {
            frame.count += 1;
        }
    }

    fn open(&mut self, kind: ContainerKind) -> Result<()> {
        if self.stack.len() >= self.max_depth {
            return Err(Error::Depth);
        }
        let node = self.tape.nodes.len();
        self.tape.nodes.push(match kind {
            ContainerKind::Object => TapeNode::StartObject { end: 0, count: 0 },
            ContainerKind::Array => TapeNode::StartArray { end: 0, count: 0 },
        });
        self.stack.push(Frame {
            kind,
            node,
            count: 0,
        });
        Ok(())
    }

    fn close(&mut self, kind: ContainerKind) -> Result<()> {
        let frame = match self.stack.pop() {
            Some(frame) if frame.kind == kind => frame,
            _ => return Err(Error::Tape("mismatched container close")),
        };
        let start = frame.node as u32;
        self.tape.nodes.push(match kind {
            ContainerKind::Object => TapeNode::EndObject { start },
            ContainerKind::Array => TapeNode::EndArray { start },
        });
        let end = self.tape.nodes.len() as u32;
        self.tape.nodes[frame.node] = match kind {
            ContainerKind::Object => TapeNode::StartObject {
                end,
                count: frame.count,
            },
            ContainerKind::Array => TapeNode::StartArray {
                end,
                count: frame.count,
            },
        };
        Ok(())
    }

    fn write_empty(&mut self, kind: ContainerKind) {
        let node = self.tape.nodes.len() as u32;
        match kind {
            ContainerKind::Object => {
                self.tape.nodes.push(TapeNode::StartObject {
                    end: node + 2,
                    count: 0,
                });
                self.tape.nodes.push(TapeNode::EndObject { start: node });
            }
            ContainerKind::Array => {
                self.tape.nodes.push(TapeNode::StartArray {
                    end: node + 2,
                    count: 0,
                });
                self.tape.nodes.push(TapeNode::EndArray { start: node });
            }
        }
    }

    fn write_string(&mut self, value: &[u8]) -> Result<()> {
        let raw = atoms::string_span(value);
        let offset = self.tape.strings.len() as u32;
        atoms::unescape_into(raw, &mut self.tape.strings)?;
        let len = self.tape.strings.len() as u32 - offset;
        self.tape.nodes.push(TapeNode::String { offset, len });
        Ok(())
    }

    fn write_scalar(&mut self, value: &[u8]) -> Result<()> {
        match value[0] {
            b'"' => return self.write_string(value),
            b't' => {
                if !atoms::is_true_atom(value) {
                    return Err(Error::Tape("invalid JSON literal"));
                }
                self.tape.nodes.push(TapeNode::Bool(true));
            }
            b'f' => {
                if !atoms::is_false_atom(value) {
                    return Err(Error::Tape("invalid JSON literal"));
                }
                self.tape.nodes.push(TapeNode::Bool(false));
            }
            b'n' => {
                if !atoms::is_null_atom(value) {
                    return Err(Error::Tape("invalid JSON literal"));
                }
                self.tape.nodes.push(TapeNode::Null);
            }
            b'-' | b'0'..=b'9' => {
                let node = match atoms::parse_number(value)? {
                    atoms::Number::Int(v) => TapeNode::Int(v),
                    atoms::Number::UInt(v) => TapeNode::UInt(v),
                    atoms::Number::Double(v) => TapeNode::Double(v),
                };
                self.tape.nodes.push(node);
            }
            _ => return Err(Error::Tape("non-value found when value was expected")),
        }
        Ok(())
    }
}

impl<'a> Builder<'a> for TapeBuilder {
    fn start_document(&mut self, _parser: &StructuralParser<'a>) -> Result<()> {
        self.tape.clear();
        self.stack.clear();
        Ok(())
    }

    fn end_document(&mut self, _parser: &StructuralParser<'a>) -> Result<()> {
        Ok(())
    }

    fn root_primitive(&mut self, _parser: &StructuralParser<'a>, value: &'a [u8]) -> Result<()> {
        self.write_scalar(value)
    }

    fn primitive(&mut self, _parser: &StructuralParser<'a>, value: &'a [u8]) -> Result<()> {
        self.bump();
        self.write_scalar(value)
    }

    fn primitive_field(
        &mut self,
        _parser: &StructuralParser<'a>,
        key: &'a [u8],
        value: &'a [u8],
    ) -> Result<()> {
        self.bump();
        self.write_string(key)?;
        self.write_scalar(value)
    }

    fn start_object(&mut self, _parser: &StructuralParser<'a>) -> Result<()> {
        self.bump();
        self.open(ContainerKind::Object)
    }

    fn end_object(&mut self, _parser: &StructuralParser<'a>) -> Result<()> {
        self.close(ContainerKind::Object)
    }

    fn empty_object(&mut self, _parser: &StructuralParser<'a>) -> Result<()> {
        self.bump();
        self.write_empty(ContainerKind::Object);
        Ok(())
    }

    fn start_object_field(&mut self, _parser: &StructuralParser<'a>, key: &'a [u8]) -> Result<()> {
        self.bump();
        self.write_string(key)?;
        self.open(ContainerKind::Object)
    }

    fn empty_object_field(&mut self, _parser: &StructuralParser<'a>, key: &'a [u8]) -> Result<()> {
        self.bump();
        self.write_string(key)?;
        self.write_empty(ContainerKind::Object);
        Ok(())
    }

    fn start_array(&mut self, _parser: &StructuralParser<'a>) -> Result<()> {
        self.bump();
        self.open(ContainerKind::Array)
    }

    fn end_array(&mut self, _parser: &StructuralParser<'a>) -> Result<()> {
        self.close(ContainerKind::Array)
    }

    fn empty_array(&mut self, _parser: &StructuralParser<'a>) -> Result<()> {
        self.bump();
        self.write_empty(ContainerKind::Array);
        Ok(())
    }

    fn start_array_field(&mut self, _parser: &StructuralParser<'a>, key: &'a [u8]) -> Result<()> {
        self.bump();
        self.write_string(key)?;
        self.open(ContainerKind::Array)
    }

    fn empty_array_field(&mut self, _parser: &StructuralParser<'a>, key: &'a [u8]) -> Result<()> {
        self.bump();
        self.write_string(key)?;
        self.write_empty(ContainerKind::Array);
        Ok(())
    }

    fn try_resume_object(&mut self, _parser: &StructuralParser<'a>) -> Result<()> {
        match self.stack.last() {
            Some(frame) if frame.kind == ContainerKind::Object => Ok(()),
            _ => Err(Error::Tape("object continuation outside an object")),
        }
    }

    fn try_resume_array(
        &mut self,
        _parser: &StructuralParser<'a>,
        value: Option<&'a [u8]>,
    ) -> Result<()> {
        match self.stack.last() {
            Some(frame) if frame.kind == ContainerKind::Array => {}
            _ => return Err(Error::Tape("array continuation outside an array")),
        }
        if let Some(value) = value {
            self.bump();
            self.write_scalar(value)?;
        }
        Ok(())
    }

    fn try_end_object(&mut self, parser: &StructuralParser<'a>) -> Result<()> {
        self.end_object(parser)
    }

    fn try_end_array(&mut self, parser: &StructuralParser<'a>) -> Result<()> {
        self.end_array(parser)
    }
}
