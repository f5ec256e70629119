//! The callback surface the grammar driver feeds.

use alloc::vec::Vec;

use crate::{
    error::{Error, Result},
    stage2::StructuralParser,
};

/// Whether an open container is an object or an array.
///
/// The driver does not know the enclosing container's kind when it re-enters
/// a parent scope, so builders keep their own stack of these and answer the
/// `try_resume_*` / `try_end_*` events from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    Object,
    Array,
}

/// Consumer of grammar events, one lifecycle per parse call.
///
/// The driver invokes these in strict document order; any error
/// short-circuits the parse. `key` and `value` arguments are suffix slices
/// of the padded input buffer, starting at the token's first byte and valid
/// for the buffer borrow `'a`; builders must copy anything they keep beyond
/// the parse call.
pub trait Builder<'a> {
    fn start_document(&mut self, parser: &StructuralParser<'a>) -> Result<()>;
    fn end_document(&mut self, parser: &StructuralParser<'a>) -> Result<()>;

    /// The document's single top-level scalar.
    fn root_primitive(&mut self, parser: &StructuralParser<'a>, value: &'a [u8]) -> Result<()>;
    /// A scalar array element.
    fn primitive(&mut self, parser: &StructuralParser<'a>, value: &'a [u8]) -> Result<()>;
    /// An object field with a scalar value.
    fn primitive_field(
        &mut self,
        parser: &StructuralParser<'a>,
        key: &'a [u8],
        value: &'a [u8],
    ) -> Result<()>;

    fn start_object(&mut self, parser: &StructuralParser<'a>) -> Result<()>;
    fn end_object(&mut self, parser: &StructuralParser<'a>) -> Result<()>;
    fn empty_object(&mut self, parser: &StructuralParser<'a>) -> Result<()>;
    /// An object field whose value is a non-empty object; `key` is the
    /// field's key, and `start_object` is implied.
    fn start_object_field(&mut self, parser: &StructuralParser<'a>, key: &'a [u8]) -> Result<()>;
    fn empty_object_field(&mut self, parser: &StructuralParser<'a>, key: &'a [u8]) -> Result<()>;

    fn start_array(&mut self, parser: &StructuralParser<'a>) -> Result<()>;
    fn end_array(&mut self, parser: &StructuralParser<'a>) -> Result<()>;
    fn empty_array(&mut self, parser: &StructuralParser<'a>) -> Result<()>;
    fn start_array_field(&mut self, parser: &StructuralParser<'a>, key: &'a [u8]) -> Result<()>;
    fn empty_array_field(&mut self, parser: &StructuralParser<'a>, key: &'a [u8]) -> Result<()>;

    /// The driver is about to parse another field of a container it cannot
    /// see the kind of; the builder must confirm its stack top is an object.
    fn try_resume_object(&mut self, parser: &StructuralParser<'a>) -> Result<()>;
    /// Like `try_resume_object` for arrays. When `value` is present it is a
    /// string element discovered retroactively, and the builder emits it
    /// after the check.
    fn try_resume_array(
        &mut self,
        parser: &StructuralParser<'a>,
        value: Option<&'a [u8]>,
    ) -> Result<()>;
    /// A `}` whose container kind the driver cannot see; the builder pops
    /// its stack, checks, and closes the object.
    fn try_end_object(&mut self, parser: &StructuralParser<'a>) -> Result<()>;
    fn try_end_array(&mut self, parser: &StructuralParser<'a>) -> Result<()>;
}

/// Grammar-only builder for the on-demand path: materializes nothing and
/// leaves scalar contents to the deferred leaf decoders, but keeps the
/// container-kind stack so nesting, `try_*` dispatch and the depth limit are
/// still enforced.
#[derive(Debug)]
pub struct NoopBuilder {
    stack: Vec<ContainerKind>,
    max_depth: usize,
}

impl NoopBuilder {
    #[must_use]
    pub fn new(max_depth: usize) -> Self {
        Self {
            stack: Vec::new(),
            max_depth,
        }
    }

    fn open(&mut self, kind: ContainerKind) -> Result<()> {
        if self.stack.len() >= self.max_depth {
            return Err(Error::Depth);
        }
        self.stack.push(kind);
        Ok(())
    }

    fn close(&mut self, kind: ContainerKind) -> Result<()> {
        match self.stack.pop() {
            Some(open) if open == kind => Ok(()),
            _ => Err(Error::Tape("mismatched container close")),
        }
    }

    fn check_scalar(value: &[u8]) -> Result<()> {
        // A structural byte where a value was expected is a grammar error
        // even though scalar contents themselves are not decoded here.
        if matches!(value[0], b'{' | b'}' | b'[' | b']' | b',' | b':' | 0) {
            return Err(Error::Tape("non-value found when value was expected"));
        }
        Ok(())
    }
}

impl<'a> Builder<'a> for NoopBuilder {
    fn start_document(&mut self, _parser: &StructuralParser<'a>) -> Result<()> {
        self.stack.clear();
        Ok(())
    }

    fn end_document(&mut self, _parser: &StructuralParser<'a>) -> Result<()> {
        Ok(())
    }

    fn root_primitive(&mut self, _parser: &StructuralParser<'a>, value: &'a [u8]) -> Result<()> {
        Self::check_scalar(value)
    }

    fn primitive(&mut self, _parser: &StructuralParser<'a>, value: &'a [u8]) -> Result<()> {
        Self::check_scalar(value)
    }

    fn primitive_field(
        &mut self,
        _parser: &StructuralParser<'a>,
        _key: &'a [u8],
        value: &'a [u8],
    ) -> Result<()> {
        Self::check_scalar(value)
    }

    fn start_object(&mut self, _parser: &StructuralParser<'a>) -> Result<()> {
        self.open(ContainerKind::Object)
    }

    fn end_object(&mut self, _parser: &StructuralParser<'a>) -> Result<()> {
        self.close(ContainerKind::Object)
    }

    fn empty_object(&mut self, _parser: &StructuralParser<'a>) -> Result<()> {
        Ok(())
    }

    fn start_object_field(&mut self, _parser: &StructuralParser<'a>, _key: &'a [u8]) -> Result<()> {
        self.open(ContainerKind::Object)
    }

    fn empty_object_field(&mut self, _parser: &StructuralParser<'a>, _key: &'a [u8]) -> Result<()> {
        Ok(())
    }

    fn start_array(&mut self, _parser: &StructuralParser<'a>) -> Result<()> {
        self.open(ContainerKind::Array)
    }

    fn end_array(&mut self, _parser: &StructuralParser<'a>) -> Result<()> {
        self.close(ContainerKind::Array)
    }

    fn empty_array(&mut self, _parser: &StructuralParser<'a>) -> Result<()> {
        Ok(())
    }

    fn start_array_field(&mut self, _parser: &StructuralParser<'a>, _key: &'a [u8]) -> Result<()> {
        self.open(ContainerKind::Array)
    }

    fn empty_array_field(&mut self, _parser: &StructuralParser<'a>, _key: &'a [u8]) -> Result<()> {
        Ok(())
    }

    fn try_resume_object(&mut self, _parser: &StructuralParser<'a>) -> Result<()> {
        match self.stack.last() {
            Some(ContainerKind::Object) => Ok(()),
            _ => Err(Error::Tape("object continuation outside an object")),
        }
    }

    fn try_resume_array(
        &mut self,
        _parser: &StructuralParser<'a>,
        value: Option<&'a [u8]>,
    ) -> Result<()> {
        match self.stack.last() {
            Some(ContainerKind::Array) => match value {
                Some(value) => Self::check_scalar(value),
                None => Ok(()),
            },
            _ => Err(Error::Tape("array continuation outside an array")),
        }
    }

    fn try_end_object(&mut self, parser: &StructuralParser<'a>) -> Result<()> {
        self.end_object(parser)
    }

    fn try_end_array(&mut self, parser: &StructuralParser<'a>) -> Result<()> {
        self.end_array(parser)
    }
}
