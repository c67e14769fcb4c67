use crate::{OutputMode, emit_success};
use anyhow::Context;
use buildlens::config::{self, BuildlensConfig};
use buildlens::tasks::{BuildMode, TestCompileType, select_tasks};
use buildlens::ui::{diagnostics_table, info, stats_table, success, warn};
use buildlens::{Error, MessageKind, ParserChain};
use owo_colors::OwoColorize;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Parse an aapt output log (file or stdin) into structured diagnostics.
pub fn run_parse(log: Option<&Path>, lenient: bool, output_mode: OutputMode) -> anyhow::Result<()> {
    let output = match log {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read log file {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let chain = ParserChain::new();
    let mut reader = buildlens::LineReader::from_output(&output);
    let mut messages = Vec::new();
    let mut failures = 0;
    if lenient {
        failures = chain.parse_lenient(&mut reader, &mut messages);
    } else {
        match chain.parse(&mut reader, &mut messages) {
            Ok(()) => {}
            Err(e @ Error::ParseFailed { .. }) => {
                anyhow::bail!("{} (rerun with --lenient to skip malformed constructs)", e);
            }
            Err(e) => return Err(e.into()),
        }
    }

    let errors = messages.iter().filter(|m| m.kind == MessageKind::Error).count();
    let warnings = messages.iter().filter(|m| m.kind == MessageKind::Warning).count();

    if output_mode.is_human() {
        if messages.is_empty() {
            success("No diagnostics found in build output");
        } else {
            println!("{}", diagnostics_table(&messages));
            if !buildlens::output::is_quiet() {
                let summary = stats_table(&[
                    ("Errors", &errors.to_string()),
                    ("Warnings", &warnings.to_string()),
                    ("Total lines", &output.lines().count().to_string()),
                ]);
                println!("{}", summary);
            }
        }
        if failures > 0 {
            warn(&format!("{} malformed construct(s) skipped", failures));
        }
    } else {
        let data = serde_json::json!({
            "diagnostics": messages,
            "errors": errors,
            "warnings": warnings,
            "skipped_constructs": failures,
        });
        emit_success("parse", data)?;
    }
    Ok(())
}

/// Resolve the Gradle task list for a build mode from the project descriptor.
pub fn run_tasks(
    config_path: Option<PathBuf>,
    mode: &str,
    tests: Option<&str>,
    output_mode: OutputMode,
) -> anyhow::Result<()> {
    let mode: BuildMode = mode.parse()?;
    let test_compile: TestCompileType = match tests {
        Some(t) => t.parse()?,
        None => TestCompileType::None,
    };

    let config: BuildlensConfig = config::load_config(config_path.as_deref())?
        .context("no project descriptor found (run `buildlens init` first)")?;

    let tasks = select_tasks(
        &config.modules,
        mode,
        test_compile,
        config.project.last_sync_failed,
    );

    if output_mode.is_human() {
        if tasks.is_empty() {
            warn(&format!("no tasks resolved for mode '{}'", mode));
        } else {
            info("Mode", &mode.to_string());
            for task in &tasks {
                println!("  {}", task.bold());
            }
        }
    } else {
        let data = serde_json::json!({
            "mode": mode.as_str(),
            "tasks": tasks,
        });
        emit_success("tasks", data)?;
    }
    Ok(())
}

/// Write a starter project descriptor.
pub fn run_init(path: Option<PathBuf>, force: bool, output_mode: OutputMode) -> anyhow::Result<()> {
    let path = path.unwrap_or_else(config::default_config_path);
    config::write_config(&path, &config::sample_config(), force)?;

    if output_mode.is_human() {
        success(&format!("Wrote project descriptor to {}", path.display()));
    } else {
        let data = serde_json::json!({ "path": path.display().to_string() });
        emit_success("init", data)?;
    }
    Ok(())
}

pub fn run_version(output_mode: OutputMode) -> anyhow::Result<()> {
    if output_mode.is_human() {
        println!("buildlens {}", env!("CARGO_PKG_VERSION").bold());
    } else {
        let data = serde_json::json!({
            "version": env!("CARGO_PKG_VERSION"),
        });
        emit_success("version", data)?;
    }
    Ok(())
}
