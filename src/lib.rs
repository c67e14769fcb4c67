//! # Buildlens - Build-output diagnostics and Gradle task planning
//!
//! Buildlens turns the noisy textual output of the Android resource
//! compiler (`aapt`) into structured diagnostics, and computes the ordered
//! Gradle task list to invoke for a requested build mode.
//!
//! Buildlens provides:
//! - A chain-of-responsibility output parser classifying tool-output lines
//!   into error/warning/info messages with source locations
//! - A single-line-lookahead reader for diagnostics spanning two lines
//! - A pure task selector mapping (modules, build mode, test scope) to
//!   fully qualified Gradle task names
//! - A TOML project descriptor standing in for the real build model

pub mod message;
pub mod reader;
pub mod parser;
pub mod tasks;
pub mod config;
pub mod output;
pub mod ui;

// Re-exports for convenient access
pub use message::{Message, MessageKind};
pub use parser::ParserChain;
pub use reader::LineReader;
pub use tasks::{BuildMode, ModuleDescriptor, ModuleKind, TestCompileType, select_tasks};

/// Result type alias for Buildlens operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Buildlens operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A committed multi-line parse found no usable continuation line.
    #[error("parsing failed at line {line_number}: {reason}")]
    ParseFailed { line_number: usize, reason: String },

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid value: {0}")]
    InvalidValue(String),
}
