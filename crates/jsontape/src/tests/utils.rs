use alloc::{format, string::String, vec::Vec};

use crate::{
    atoms,
    stage2::{Builder, ContainerKind, StructuralParser},
    Error, PaddedBytes, Parser, ParserOptions, Result, Tape,
};

pub(crate) fn pad(text: &str) -> PaddedBytes {
    PaddedBytes::from(text)
}

/// One-shot tape parse with default options.
pub(crate) fn parse(text: &str) -> Result<Tape> {
    Parser::new(ParserOptions::default()).parse(&pad(text))
}

/// One-shot grammar validation with default options.
pub(crate) fn validate(text: &str) -> Result<()> {
    Parser::new(ParserOptions::default()).validate(&pad(text))
}

/// Renders the raw token a key/value slice points at, for event traces.
pub(crate) fn token_text(value: &[u8]) -> String {
    if value[0] == b'"' {
        format!(
            "\"{}\"",
            String::from_utf8_lossy(atoms::string_span(value))
        )
    } else {
        let mut end = 0;
        while end < value.len()
            && !atoms::is_structural_or_whitespace(value[end])
            && value[end] != b'"'
        {
            end += 1;
        }
        String::from_utf8_lossy(&value[..end]).into_owned()
    }
}

/// Builder that records the logical event stream as strings. The `try_*`
/// events are recorded as the events they resolve to, mirroring how the
/// tape builder delegates them after checking its kind stack.
#[derive(Default)]
pub(crate) struct RecordingBuilder {
    pub(crate) events: Vec<String>,
    stack: Vec<ContainerKind>,
}

impl RecordingBuilder {
    fn resume(&mut self, kind: ContainerKind, what: &'static str) -> Result<()> {
        match self.stack.last() {
            Some(&open) if open == kind => Ok(()),
            _ => Err(Error::Tape(what)),
        }
    }

    fn close(&mut self, kind: ContainerKind) -> Result<()> {
        match self.stack.pop() {
            Some(open) if open == kind => Ok(()),
            _ => Err(Error::Tape("mismatched container close")),
        }
    }
}

impl<'a> Builder<'a> for RecordingBuilder {
    fn start_document(&mut self, _parser: &StructuralParser<'a>) -> Result<()> {
        self.events.push("start_document".into());
        Ok(())
    }

    fn end_document(&mut self, _parser: &StructuralParser<'a>) -> Result<()> {
        self.events.push("end_document".into());
        Ok(())
    }

    fn root_primitive(&mut self, _parser: &StructuralParser<'a>, value: &'a [u8]) -> Result<()> {
        self.events.push(format!("root_primitive {}", token_text(value)));
        Ok(())
    }

    fn primitive(&mut self, _parser: &StructuralParser<'a>, value: &'a [u8]) -> Result<()> {
        self.events.push(format!("primitive {}", token_text(value)));
        Ok(())
    }

    fn primitive_field(
        &mut self,
        _parser: &StructuralParser<'a>,
        key: &'a [u8],
        value: &'a [u8],
    ) -> Result<()> {
        self.events.push(format!(
            "primitive_field {} {}",
            token_text(key),
            token_text(value)
        ));
        Ok(())
    }

    fn start_object(&mut self, _parser: &StructuralParser<'a>) -> Result<()> {
        self.events.push("start_object".into());
        self.stack.push(ContainerKind::Object);
        Ok(())
    }

    fn end_object(&mut self, _parser: &StructuralParser<'a>) -> Result<()> {
        self.events.push("end_object".into());
        self.close(ContainerKind::Object)
    }

    fn empty_object(&mut self, _parser: &StructuralParser<'a>) -> Result<()> {
        self.events.push("empty_object".into());
        Ok(())
    }

    fn start_object_field(&mut self, _parser: &StructuralParser<'a>, key: &'a [u8]) -> Result<()> {
        self.events
            .push(format!("start_object_field {}", token_text(key)));
        self.stack.push(ContainerKind::Object);
        Ok(())
    }

    fn empty_object_field(&mut self, _parser: &StructuralParser<'a>, key: &'a [u8]) -> Result<()> {
        self.events
            .push(format!("empty_object_field {}", token_text(key)));
        Ok(())
    }

    fn start_array(&mut self, _parser: &StructuralParser<'a>) -> Result<()> {
        self.events.push("start_array".into());
        self.stack.push(ContainerKind::Array);
        Ok(())
    }

    fn end_array(&mut self, _parser: &StructuralParser<'a>) -> Result<()> {
        self.events.push("end_array".into());
        self.close(ContainerKind::Array)
    }

    fn empty_array(&mut self, _parser: &StructuralParser<'a>) -> Result<()> {
        self.events.push("empty_array".into());
        Ok(())
    }

    fn start_array_field(&mut self, _parser: &StructuralParser<'a>, key: &'a [u8]) -> Result<()> {
        self.events
            .push(format!("start_array_field {}", token_text(key)));
        self.stack.push(ContainerKind::Array);
        Ok(())
    }

    fn empty_array_field(&mut self, _parser: &StructuralParser<'a>, key: &'a [u8]) -> Result<()> {
        self.events
            .push(format!("empty_array_field {}", token_text(key)));
        Ok(())
    }

    fn try_resume_object(&mut self, _parser: &StructuralParser<'a>) -> Result<()> {
        self.resume(ContainerKind::Object, "object continuation outside an object")
    }

    fn try_resume_array(
        &mut self,
        parser: &StructuralParser<'a>,
        value: Option<&'a [u8]>,
    ) -> Result<()> {
        self.resume(ContainerKind::Array, "array continuation outside an array")?;
        if let Some(value) = value {
            self.primitive(parser, value)?;
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

/// Runs a non-streaming parse with a [`RecordingBuilder`], returning the
/// events recorded up to the outcome.
pub(crate) fn events(text: &str) -> (Vec<String>, Result<()>) {
    let buf = pad(text);
    let indexes = match crate::index(&buf) {
        Ok(indexes) => indexes,
        Err(err) => return (Vec::new(), Err(err)),
    };
    let mut builder = RecordingBuilder::default();
    let mut driver = StructuralParser::new(&buf, &indexes, 0);
    let result = driver.parse(&mut builder, false);
    (builder.events, result)
}
