//! Line reader with single-line lookahead
//!
//! Some aapt diagnostics span two physical lines (a header naming the file,
//! then a continuation carrying the message and line number), so the parser
//! chain reads through a cursor that can peek at the next line before
//! committing to consume it.

/// Cursor over an ordered sequence of output lines.
///
/// Not thread-safe; each parse pass owns its reader.
#[derive(Debug)]
pub struct LineReader {
    lines: Vec<String>,
    pos: usize,
}

impl LineReader {
    /// Build a reader from raw tool output, splitting on newlines.
    /// Trailing `\r` from CRLF output is stripped per line.
    pub fn from_output(output: &str) -> Self {
        let lines = output
            .lines()
            .map(|l| l.trim_end_matches('\r').to_string())
            .collect();
        Self { lines, pos: 0 }
    }

    /// Build a reader from already-split lines
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            pos: 0,
        }
    }

    /// Look at the next line without consuming it
    pub fn peek(&self) -> Option<&str> {
        self.lines.get(self.pos).map(String::as_str)
    }

    /// Consume and return the next line
    pub fn next_line(&mut self) -> Option<String> {
        let line = self.lines.get(self.pos).cloned();
        if line.is_some() {
            self.pos += 1;
        }
        line
    }

    /// 1-indexed position of the line `peek` would return.
    /// At end of input this is one past the last line.
    pub fn position(&self) -> usize {
        self.pos + 1
    }

    /// True once every line has been consumed
    pub fn is_at_end(&self) -> bool {
        self.pos >= self.lines.len()
    }
}
