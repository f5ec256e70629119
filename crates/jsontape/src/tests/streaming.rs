use alloc::vec::Vec;

use super::utils::pad;
use crate::{Error, Parser, ParserOptions, Result, TapeNode};

#[test]
fn concatenated_roots_parse_one_per_call() {
    let buf = pad("1 2 3");
    let mut parser = Parser::new(ParserOptions::default());
    let mut stream = parser.parse_many(&buf).unwrap();

    for expected in [1, 2, 3] {
        let tape = stream.next().unwrap().unwrap();
        assert_eq!(tape.nodes(), &[TapeNode::Int(expected)]);
    }
    // The structural stream is exhausted; repeated polls stay exhausted.
    assert!(stream.next().is_none());
    assert!(stream.next().is_none());
}

#[test]
fn concatenated_containers() {
    let buf = pad(r#"{} [1] {"a":2}"#);
    let mut parser = Parser::new(ParserOptions::default());
    let rendered: Vec<_> = parser
        .parse_many(&buf)
        .unwrap()
        .map(|tape| tape.map(|t| t.to_json()))
        .collect::<Result<_>>()
        .unwrap();
    assert_eq!(rendered, ["{}", "[1]", r#"{"a":2}"#]);
}

#[test]
fn streaming_accepts_what_single_shot_rejects_as_trailing() {
    let buf = pad("{} {}");
    let mut parser = Parser::new(ParserOptions::default());
    assert_eq!(
        parser.parse(&buf).unwrap_err(),
        Error::Tape("more than one JSON value at the root of the document")
    );
    assert_eq!(parser.parse_many(&buf).unwrap().count(), 2);
}

#[test]
fn an_error_ends_the_stream() {
    let buf = pad("1 [2");
    let mut parser = Parser::new(ParserOptions::default());
    let mut stream = parser.parse_many(&buf).unwrap();

    assert_eq!(
        stream.next().unwrap().unwrap().nodes(),
        &[TapeNode::Int(1)]
    );
    assert!(stream.next().unwrap().is_err());
    assert!(stream.next().is_none());
}

#[test]
fn empty_stream_yields_nothing() {
    let buf = pad("  \n ");
    let mut parser = Parser::new(ParserOptions::default());
    assert!(parser.parse_many(&buf).unwrap().next().is_none());
}

#[test]
fn unclosed_root_array_is_allowed_to_start_when_streaming() {
    // The single-shot pre-check on the final structural does not apply in
    // streaming mode; the error surfaces when the stream runs out instead.
    let buf = pad("[1, 2");
    let mut parser = Parser::new(ParserOptions::default());
    let mut stream = parser.parse_many(&buf).unwrap();
    assert!(stream.next().unwrap().is_err());
}
