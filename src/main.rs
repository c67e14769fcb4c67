//! Buildlens CLI - Build-output diagnostics and Gradle task planning

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "buildlens")]
#[command(version)]
#[command(about = "Build-output diagnostics parser and Gradle task planner for Android builds")]
#[command(long_about = r#"
Buildlens understands the textual output of Android resource tooling and
the shape of a Gradle project:
  • Classify aapt output into structured errors and warnings
  • Resolve the ordered Gradle task list for a build mode
  • Keep a TOML project descriptor in place of a full IDE sync

Example usage:
  buildlens init
  buildlens parse build-output.log
  gradle assembleDebug 2>&1 | buildlens parse --lenient
  buildlens tasks --mode rebuild --tests unit
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (human, json)
    #[arg(short, long, global = true, default_value = "human")]
    format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse aapt build output into structured diagnostics
    Parse {
        /// Log file to parse (reads stdin when omitted)
        log: Option<PathBuf>,

        /// Skip malformed multi-line constructs instead of aborting
        #[arg(short, long)]
        lenient: bool,
    },

    /// Resolve the Gradle task list for a build mode
    Tasks {
        /// Build mode (clean, assemble, rebuild, compile-java, source-gen, assemble-translate)
        #[arg(short, long)]
        mode: String,

        /// Test sources to compile alongside (none, unit, instrumentation)
        #[arg(short, long)]
        tests: Option<String>,

        /// Path to the project descriptor
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Write a starter project descriptor
    Init {
        /// Where to write the descriptor (defaults to buildlens.toml)
        path: Option<PathBuf>,

        /// Overwrite an existing descriptor
        #[arg(long)]
        force: bool,
    },

    /// Show the buildlens version
    Version,
}

/// How command results are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

impl OutputMode {
    pub fn is_human(&self) -> bool {
        matches!(self, OutputMode::Human)
    }

    fn from_flag(format: &str) -> anyhow::Result<Self> {
        match format {
            "human" | "text" => Ok(OutputMode::Human),
            "json" => Ok(OutputMode::Json),
            other => anyhow::bail!("unknown output format '{}' (expected human or json)", other),
        }
    }
}

/// Print a machine-readable success envelope for one command.
pub fn emit_success(command: &str, data: serde_json::Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(&success_envelope(command, data))?);
    Ok(())
}

fn success_envelope(command: &str, data: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "ok": true,
        "command": command,
        "data": data,
    })
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let output_mode = OutputMode::from_flag(&cli.format)?;

    match cli.command {
        Commands::Parse { log, lenient } => {
            commands::run_parse(log.as_deref(), lenient, output_mode)
        }
        Commands::Tasks { mode, tests, config } => {
            commands::run_tasks(config, &mode, tests.as_deref(), output_mode)
        }
        Commands::Init { path, force } => commands::run_init(path, force, output_mode),
        Commands::Version => commands::run_version(output_mode),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope_shape() {
        let envelope = success_envelope("tasks", serde_json::json!({ "tasks": [":app:assembleDebug"] }));
        assert_eq!(envelope["ok"], true);
        assert_eq!(envelope["command"], "tasks");
        assert_eq!(envelope["data"]["tasks"][0], ":app:assembleDebug");
    }
}
