//! Diagnostic message types
//!
//! Every classified line (or line pair) of tool output becomes one
//! [`Message`]: a kind, the human-readable text, and an optional source
//! location. Messages are immutable once built and are collected in
//! tool-output order.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Severity of a diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    /// Build-breaking problem reported by the tool
    Error,
    /// Non-fatal problem worth surfacing
    Warning,
    /// Informational chatter promoted to a diagnostic
    Info,
}

impl MessageKind {
    /// Get the string representation of the message kind
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageKind::Error => "error",
            MessageKind::Warning => "warning",
            MessageKind::Info => "info",
        }
    }

    /// Get all message kinds
    pub fn all() -> &'static [MessageKind] {
        &[MessageKind::Error, MessageKind::Warning, MessageKind::Info]
    }
}

impl FromStr for MessageKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "error" | "err" | "e" => Ok(MessageKind::Error),
            "warning" | "warn" | "w" => Ok(MessageKind::Warning),
            "info" | "information" | "i" => Ok(MessageKind::Info),
            _ => Err(Error::InvalidValue(format!("Unknown message kind: {}", s))),
        }
    }
}

impl std::fmt::Display for MessageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single structured diagnostic extracted from tool output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Severity of the diagnostic
    pub kind: MessageKind,
    /// Message text, stripped of any location prefix the tool printed
    pub text: String,
    /// Source file the tool attributed the problem to, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_path: Option<String>,
    /// 1-indexed line number within `source_path`, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_number: Option<u32>,
}

impl Message {
    /// Create a message with no source location
    pub fn new(kind: MessageKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            source_path: None,
            line_number: None,
        }
    }

    /// Create a message attributed to a file and line
    pub fn with_location(
        kind: MessageKind,
        text: impl Into<String>,
        source_path: impl Into<String>,
        line_number: u32,
    ) -> Self {
        Self {
            kind,
            text: text.into(),
            source_path: Some(source_path.into()),
            line_number: Some(line_number),
        }
    }
}

impl std::fmt::Display for Message {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.source_path, self.line_number) {
            (Some(path), Some(line)) => {
                write!(f, "{}:{}: {}: {}", path, line, self.kind, self.text)
            }
            (Some(path), None) => write!(f, "{}: {}: {}", path, self.kind, self.text),
            _ => write!(f, "{}: {}", self.kind, self.text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_roundtrip() {
        for kind in MessageKind::all() {
            let parsed: MessageKind = kind.as_str().parse().unwrap();
            assert_eq!(parsed, *kind);
        }
    }

    #[test]
    fn test_kind_aliases() {
        assert_eq!("WARN".parse::<MessageKind>().unwrap(), MessageKind::Warning);
        assert_eq!("e".parse::<MessageKind>().unwrap(), MessageKind::Error);
        assert!("fatal".parse::<MessageKind>().is_err());
    }

    #[test]
    fn test_display_with_location() {
        let msg = Message::with_location(MessageKind::Error, "unexpected tag", "res/layout/a.xml", 12);
        assert_eq!(msg.to_string(), "res/layout/a.xml:12: error: unexpected tag");
    }

    #[test]
    fn test_json_shape_omits_missing_location() {
        let msg = Message::new(MessageKind::Warning, "deprecated attribute");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["kind"], "warning");
        assert!(json.get("source_path").is_none());
        assert!(json.get("line_number").is_none());
    }
}
