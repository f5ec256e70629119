#![no_main]
use jsontape::{PaddedBytes, Parser, ParserOptions};
use libfuzzer_sys::fuzz_target;

// Depth shallow enough that everything we accept fits inside the reference
// implementation's recursion limit.
const MAX_DEPTH: usize = 64;

fuzz_target!(|data: &[u8]| {
    let buf = PaddedBytes::from_slice(data);
    let mut parser = Parser::new(ParserOptions {
        max_depth: MAX_DEPTH,
    });

    let tape = parser.parse(&buf);

    // Anything the tape accepts, grammar validation accepts.
    if tape.is_ok() {
        assert!(parser.validate(&buf).is_ok());
    }

    // Anything we re-serialize, the reference implementation accepts, and a
    // second pass over our own output agrees with the first.
    if let Ok(tape) = &tape {
        let rendered = tape.to_json();
        assert!(serde_json::from_str::<serde_json::Value>(&rendered).is_ok());
        let reparsed = parser.parse(&PaddedBytes::from(rendered)).unwrap();
        assert_eq!(tape, &reparsed);
    }

    // The on-demand cursor terminates on arbitrary input.
    if let Ok(mut doc) = parser.iterate(&buf) {
        let _ = doc.skip();
    }

    // Streaming terminates on arbitrary input.
    if let Ok(stream) = parser.parse_many(&buf) {
        for tape in stream {
            let _ = tape;
        }
    }
});
