//! Structured grammar-event logging.
//!
//! Compiled in only with the `logging` feature; each event carries the byte
//! position and current depth as fields. Logging is a side channel and never
//! affects grammar decisions.

macro_rules! log_line {
    ($parser:expr, $($arg:tt)*) => {{
        #[cfg(feature = "logging")]
        tracing::trace!(
            target: "jsontape::stage2",
            position = $parser.position(),
            depth = $parser.depth(),
            "{}",
            format_args!($($arg)*)
        );
        #[cfg(not(feature = "logging"))]
        {
            let _ = &$parser;
        }
    }};
}

pub(crate) use log_line;
