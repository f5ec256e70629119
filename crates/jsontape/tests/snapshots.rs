//! Snapshot tests over the public surface: a caller-implemented [`Builder`],
//! tape re-serialization, and error rendering.

use insta::assert_snapshot;
use jsontape::{
    Builder, ContainerKind, Error, PaddedBytes, Parser, ParserOptions, Result, StructuralParser,
    TapeBuilder,
};

/// Minimal external builder: records each event as a token, proving the
/// callback contract is implementable outside the crate.
#[derive(Default)]
struct Trace {
    events: Vec<String>,
    stack: Vec<ContainerKind>,
}

impl Trace {
    fn token(value: &[u8]) -> String {
        let end = value
            .iter()
            .position(|&b| matches!(b, b'{' | b'}' | b'[' | b']' | b',' | b':' | b' ' | 0))
            .unwrap_or(value.len());
        String::from_utf8_lossy(&value[..end]).into_owned()
    }

    fn push(&mut self, event: String) {
        self.events.push(event);
    }

    fn close(&mut self, kind: ContainerKind) -> Result<()> {
        match self.stack.pop() {
            Some(open) if open == kind => Ok(()),
            _ => Err(Error::Tape("mismatched container close")),
        }
    }
}

impl<'a> Builder<'a> for Trace {
    fn start_document(&mut self, _p: &StructuralParser<'a>) -> Result<()> {
        self.push("+doc".into());
        Ok(())
    }

    fn end_document(&mut self, _p: &StructuralParser<'a>) -> Result<()> {
        self.push("-doc".into());
        Ok(())
    }

    fn root_primitive(&mut self, _p: &StructuralParser<'a>, value: &'a [u8]) -> Result<()> {
        self.push(format!("root={}", Self::token(value)));
        Ok(())
    }

    fn primitive(&mut self, _p: &StructuralParser<'a>, value: &'a [u8]) -> Result<()> {
        self.push(Self::token(value));
        Ok(())
    }

    fn primitive_field(
        &mut self,
        _p: &StructuralParser<'a>,
        key: &'a [u8],
        value: &'a [u8],
    ) -> Result<()> {
        self.push(format!("{}={}", Self::token(key), Self::token(value)));
        Ok(())
    }

    fn start_object(&mut self, _p: &StructuralParser<'a>) -> Result<()> {
        self.push("{".into());
        self.stack.push(ContainerKind::Object);
        Ok(())
    }

    fn end_object(&mut self, _p: &StructuralParser<'a>) -> Result<()> {
        self.push("}".into());
        self.close(ContainerKind::Object)
    }

    fn empty_object(&mut self, _p: &StructuralParser<'a>) -> Result<()> {
        self.push("{}".into());
        Ok(())
    }

    fn start_object_field(&mut self, _p: &StructuralParser<'a>, key: &'a [u8]) -> Result<()> {
        self.push(format!("{}={{", Self::token(key)));
        self.stack.push(ContainerKind::Object);
        Ok(())
    }

    fn empty_object_field(&mut self, _p: &StructuralParser<'a>, key: &'a [u8]) -> Result<()> {
        self.push(format!("{}={{}}", Self::token(key)));
        Ok(())
    }

    fn start_array(&mut self, _p: &StructuralParser<'a>) -> Result<()> {
        self.push("[".into());
        self.stack.push(ContainerKind::Array);
        Ok(())
    }

    fn end_array(&mut self, _p: &StructuralParser<'a>) -> Result<()> {
        self.push("]".into());
        self.close(ContainerKind::Array)
    }

    fn empty_array(&mut self, _p: &StructuralParser<'a>) -> Result<()> {
        self.push("[]".into());
        Ok(())
    }

    fn start_array_field(&mut self, _p: &StructuralParser<'a>, key: &'a [u8]) -> Result<()> {
        self.push(format!("{}=[", Self::token(key)));
        self.stack.push(ContainerKind::Array);
        Ok(())
    }

    fn empty_array_field(&mut self, _p: &StructuralParser<'a>, key: &'a [u8]) -> Result<()> {
        self.push(format!("{}=[]", Self::token(key)));
        Ok(())
    }

    fn try_resume_object(&mut self, _p: &StructuralParser<'a>) -> Result<()> {
        match self.stack.last() {
            Some(ContainerKind::Object) => Ok(()),
            _ => Err(Error::Tape("object continuation outside an object")),
        }
    }

    fn try_resume_array(
        &mut self,
        p: &StructuralParser<'a>,
        value: Option<&'a [u8]>,
    ) -> Result<()> {
        match self.stack.last() {
            Some(ContainerKind::Array) => match value {
                Some(value) => self.primitive(p, value),
                None => Ok(()),
            },
            _ => Err(Error::Tape("array continuation outside an array")),
        }
    }

    fn try_end_object(&mut self, p: &StructuralParser<'a>) -> Result<()> {
        self.end_object(p)
    }

    fn try_end_array(&mut self, p: &StructuralParser<'a>) -> Result<()> {
        self.end_array(p)
    }
}

fn trace(text: &str) -> String {
    let buf = PaddedBytes::from(text);
    let indexes = jsontape::index(&buf).unwrap();
    let mut builder = Trace::default();
    let mut driver = StructuralParser::new(&buf, &indexes, 0);
    driver.parse(&mut builder, false).unwrap();
    builder.events.join(" ")
}

#[test]
fn event_trace_snapshots() {
    assert_snapshot!(
        trace(r#"{"a":1,"b":[true,null]}"#),
        @r#"+doc { "a"=1 "b"=[ true null ] } -doc"#
    );
    assert_snapshot!(
        trace(r#"[[1],"v",2]"#),
        @r#"+doc [ [ 1 ] "v" 2 ] -doc"#
    );
    assert_snapshot!(trace("{}"), @"+doc {} -doc");
}

#[test]
fn reserialization_snapshot() {
    let buf = PaddedBytes::from(
        r#"{"name":"Grace Hopper","bits":[1,2.5,-3],"ok":true,"extra":null}"#,
    );
    let mut parser = Parser::new(ParserOptions::default());
    let tape = parser.parse(&buf).unwrap();
    assert_snapshot!(
        tape.to_json(),
        @r#"{"name":"Grace Hopper","bits":[1,2.5,-3],"ok":true,"extra":null}"#
    );
}

#[test]
fn error_rendering() {
    let mut parser = Parser::new(ParserOptions::default());
    let err = parser.parse(&PaddedBytes::from("[1 2]")).unwrap_err();
    assert_snapshot!(err, @"missing comma between array elements");

    let err = parser.parse(&PaddedBytes::from("")).unwrap_err();
    assert_snapshot!(err, @"no JSON found in the input");

    let err = parser
        .parse(&PaddedBytes::from("99999999999999999999x"))
        .unwrap_err();
    assert_snapshot!(err, @"malformed or out-of-range number literal");
}

#[test]
fn a_noop_style_builder_still_validates() {
    // Depth bookkeeping flows through a caller-supplied builder too.
    let buf = PaddedBytes::from(r#"{"a":[{"b":[]}]}"#);
    let indexes = jsontape::index(&buf).unwrap();
    let mut builder = Trace::default();
    let mut driver = StructuralParser::new(&buf, &indexes, 0);
    driver.parse(&mut builder, false).unwrap();
    assert!(builder.stack.is_empty());

    let mut tape_builder = TapeBuilder::new(16);
    let mut driver = StructuralParser::new(&buf, &indexes, 0);
    driver.parse(&mut tape_builder, false).unwrap();
    assert_eq!(tape_builder.into_tape().to_json(), r#"{"a":[{"b":[]}]}"#);
}
