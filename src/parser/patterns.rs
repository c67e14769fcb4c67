//! Individual aapt output-line parsers
//!
//! Each parser is one variant of [`LineParser`]: a primary pattern plus the
//! follow-up reads it performs once the pattern matches. Keeping them in a
//! single tagged enum means at most one multi-line parse can be in flight
//! at a time.

use crate::message::{Message, MessageKind};
use crate::reader::LineReader;
use crate::{Error, Result};
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

fn skipping_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*\(skipping (\S+) '(.+)' due to ANDROID_AAPT_IGNORE pattern '(.+)'\)$")
            .unwrap()
    })
}

fn xml_header_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^Error parsing XML file (.+)$").unwrap())
}

fn xml_continuation_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(.+) at line (\d+)$").unwrap())
}

fn file_line_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(.+?):(\d+): (error|warning): (.+)$").unwrap())
}

fn bare_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(?i)(error|warning):\s+(.+)$").unwrap())
}

/// One link of the parser chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineParser {
    /// `(skipping file '<path>' due to ANDROID_AAPT_IGNORE pattern '<pat>')`
    SkippingEntry,
    /// `Error parsing XML file <path>` plus a `<message> at line <n>` line
    XmlValidation,
    /// `<path>:<line>: error|warning: <message>`
    FileLineDiagnostic,
    /// `error|warning: <message>` with no source location
    BareDiagnostic,
}

impl LineParser {
    /// Try to claim `line`. Returns `Ok(true)` if this parser matched and
    /// handled it (appending any diagnostics), `Ok(false)` if the line is
    /// not this parser's to claim. A committed multi-line parse whose
    /// continuation is missing or malformed fails with
    /// [`Error::ParseFailed`].
    pub fn try_parse(
        &self,
        line: &str,
        reader: &mut LineReader,
        messages: &mut Vec<Message>,
    ) -> Result<bool> {
        match self {
            LineParser::SkippingEntry => Self::parse_skipping(line, messages),
            LineParser::XmlValidation => Self::parse_xml_validation(line, reader, messages),
            LineParser::FileLineDiagnostic => {
                Self::parse_file_line(line, reader.position().saturating_sub(1), messages)
            }
            LineParser::BareDiagnostic => Self::parse_bare(line, messages),
        }
    }

    fn parse_skipping(line: &str, messages: &mut Vec<Message>) -> Result<bool> {
        let Some(caps) = skipping_re().captures(line) else {
            return Ok(false);
        };
        let path = &caps[2];
        if !is_ignorable_entry(path) {
            messages.push(Message::new(MessageKind::Warning, line));
        }
        Ok(true)
    }

    fn parse_xml_validation(
        line: &str,
        reader: &mut LineReader,
        messages: &mut Vec<Message>,
    ) -> Result<bool> {
        let Some(caps) = xml_header_re().captures(line) else {
            return Ok(false);
        };
        let path = caps[1].to_string();
        // Header matched; the continuation line is now mandatory.
        let header_line = reader.position() - 1;
        let Some(next) = reader.next_line() else {
            return Err(Error::ParseFailed {
                line_number: header_line,
                reason: format!("XML error header for '{}' has no continuation line", path),
            });
        };
        let Some(cont) = xml_continuation_re().captures(&next) else {
            return Err(Error::ParseFailed {
                line_number: header_line,
                reason: format!("expected '<message> at line <n>' after XML error header, got '{}'", next),
            });
        };
        let text = cont[1].to_string();
        let line_number = parse_line_number(&cont[2], header_line)?;
        messages.push(Message::with_location(MessageKind::Error, text, path, line_number));
        Ok(true)
    }

    fn parse_file_line(line: &str, at: usize, messages: &mut Vec<Message>) -> Result<bool> {
        let Some(caps) = file_line_re().captures(line) else {
            return Ok(false);
        };
        let kind = severity(&caps[3]);
        let line_number = parse_line_number(&caps[2], at)?;
        messages.push(Message::with_location(
            kind,
            caps[4].to_string(),
            caps[1].to_string(),
            line_number,
        ));
        Ok(true)
    }

    fn parse_bare(line: &str, messages: &mut Vec<Message>) -> Result<bool> {
        let Some(caps) = bare_re().captures(line) else {
            return Ok(false);
        };
        let kind = severity(&caps[1]);
        messages.push(Message::new(kind, caps[2].to_string()));
        Ok(true)
    }
}

/// Aapt warns about every skipped entry, but hidden files (`.foo`) and
/// editor backups (`foo~`) are routine noise and get no diagnostic.
fn is_ignorable_entry(path: &str) -> bool {
    let name = Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string());
    name.starts_with('.') || name.ends_with('~')
}

fn severity(word: &str) -> MessageKind {
    if word.eq_ignore_ascii_case("warning") {
        MessageKind::Warning
    } else {
        MessageKind::Error
    }
}

/// The regex group restricts the capture to digits; overflow of a u32 is
/// the only way this can fail.
fn parse_line_number(digits: &str, header_line: usize) -> Result<u32> {
    digits.parse::<u32>().map_err(|_| Error::ParseFailed {
        line_number: header_line,
        reason: format!("line number '{}' out of range", digits),
    })
}
