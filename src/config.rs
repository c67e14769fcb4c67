use crate::tasks::{ModuleDescriptor, ModuleKind, ModuleTasks};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Project descriptor loaded from `buildlens.toml`. Stands in for the
/// build model an IDE would derive from the real project files.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BuildlensConfig {
    #[serde(default)]
    pub project: ProjectState,
    #[serde(default)]
    pub modules: Vec<ModuleDescriptor>,
}

/// Project-level state that outlives any single build invocation.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProjectState {
    /// True when the last project sync failed; without a successful sync
    /// the per-module task model cannot be trusted.
    #[serde(default)]
    pub last_sync_failed: bool,
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("buildlens.toml")
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<BuildlensConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: BuildlensConfig = toml::from_str(&contents)?;
    Ok(Some(config))
}

pub fn write_config(path: &Path, config: &BuildlensConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("config already exists at {} (use --force to overwrite)", path.display());
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}

/// Starter descriptor written by `buildlens init`: one Android app module
/// plus a plain JVM library.
pub fn sample_config() -> BuildlensConfig {
    BuildlensConfig {
        project: ProjectState { last_sync_failed: false },
        modules: vec![
            ModuleDescriptor {
                name: "app".to_string(),
                gradle_path: ":app".to_string(),
                kind: ModuleKind::Android,
                tasks: ModuleTasks {
                    source_gen: Some("generateDebugSources".to_string()),
                    assemble: Some("assembleDebug".to_string()),
                    compile_java: Some("compileDebugSources".to_string()),
                    assemble_android_tests: Some("assembleDebugAndroidTest".to_string()),
                },
            },
            ModuleDescriptor {
                name: "core".to_string(),
                gradle_path: ":core".to_string(),
                kind: ModuleKind::Plain,
                tasks: ModuleTasks {
                    assemble: Some("assemble".to_string()),
                    compile_java: Some("compileJava".to_string()),
                    ..Default::default()
                },
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("buildlens.toml");

        let config = sample_config();
        write_config(&path, &config, false).unwrap();

        let loaded = load_config(Some(&path)).unwrap().unwrap();
        assert_eq!(loaded.modules.len(), 2);
        assert_eq!(loaded.modules[0].name, "app");
        assert_eq!(loaded.modules[0].kind, ModuleKind::Android);
        assert!(!loaded.project.last_sync_failed);
    }

    #[test]
    fn test_write_refuses_overwrite_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("buildlens.toml");

        write_config(&path, &sample_config(), false).unwrap();
        assert!(write_config(&path, &sample_config(), false).is_err());
        assert!(write_config(&path, &sample_config(), true).is_ok());
    }

    #[test]
    fn test_missing_config_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");
        assert!(load_config(Some(&path)).unwrap().is_none());
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let toml_src = r#"
[[modules]]
name = "app"
gradle_path = ":app"
kind = "swift"
"#;
        assert!(toml::from_str::<BuildlensConfig>(toml_src).is_err());
    }

    #[test]
    fn test_minimal_module_defaults() {
        let toml_src = r#"
[[modules]]
name = "docs"
gradle_path = ":docs"
kind = "none"
"#;
        let config: BuildlensConfig = toml::from_str(toml_src).unwrap();
        assert_eq!(config.modules[0].kind, ModuleKind::None);
        assert!(config.modules[0].tasks.compile_java.is_none());
    }
}
