//! Build-output parser chain
//!
//! A chain-of-responsibility over [`LineParser`] variants. For each output
//! line the parsers are tried in registration order; the first one whose
//! pattern matches claims the line, may consume a follow-up line from the
//! reader, and appends diagnostics. Lines no parser claims are ordinary
//! build chatter and pass through silently.
//!
//! Registration order is part of the contract: more specific patterns are
//! registered ahead of the general ones that would otherwise shadow them.

mod patterns;

pub use patterns::LineParser;

use crate::Result;
use crate::message::Message;
use crate::reader::LineReader;

/// Ordered chain of output-line parsers.
pub struct ParserChain {
    parsers: Vec<LineParser>,
}

impl ParserChain {
    /// Chain with the standard aapt parsers in their required order
    pub fn new() -> Self {
        Self {
            parsers: vec![
                LineParser::SkippingEntry,
                LineParser::XmlValidation,
                LineParser::FileLineDiagnostic,
                LineParser::BareDiagnostic,
            ],
        }
    }

    /// Chain with a caller-supplied parser order
    pub fn with_parsers(parsers: Vec<LineParser>) -> Self {
        Self { parsers }
    }

    /// Drain the reader, appending diagnostics to `messages`.
    ///
    /// Aborts on the first structural mismatch inside a committed
    /// multi-line parse ([`Error::ParseFailed`]); no partial diagnostic is
    /// emitted for the failed construct.
    pub fn parse(&self, reader: &mut LineReader, messages: &mut Vec<Message>) -> Result<()> {
        while let Some(line) = reader.next_line() {
            self.dispatch(&line, reader, messages)?;
        }
        Ok(())
    }

    /// Drain the reader, logging each structural mismatch and resuming at
    /// the following line. Returns the number of failed constructs.
    pub fn parse_lenient(&self, reader: &mut LineReader, messages: &mut Vec<Message>) -> usize {
        let mut failures = 0;
        while let Some(line) = reader.next_line() {
            if let Err(e) = self.dispatch(&line, reader, messages) {
                tracing::warn!("skipping malformed construct: {}", e);
                failures += 1;
            }
        }
        failures
    }

    /// Parse raw tool output in one call
    pub fn parse_all(&self, output: &str) -> Result<Vec<Message>> {
        let mut reader = LineReader::from_output(output);
        let mut messages = Vec::new();
        self.parse(&mut reader, &mut messages)?;
        Ok(messages)
    }

    /// Offer `line` to each parser in order; at most one claims it.
    fn dispatch(
        &self,
        line: &str,
        reader: &mut LineReader,
        messages: &mut Vec<Message>,
    ) -> Result<bool> {
        for parser in &self.parsers {
            if parser.try_parse(line, reader, messages)? {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

impl Default for ParserChain {
    fn default() -> Self {
        Self::new()
    }
}
