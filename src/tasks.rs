//! Gradle task selection
//!
//! Maps a set of module descriptors plus a requested build mode to the
//! ordered list of fully qualified Gradle task names to invoke. Pure and
//! synchronous: no I/O, no retries, same inputs always give the same list.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Task prepended when a rebuild is requested
pub const CLEAN_TASK: &str = "clean";

/// Fallback top-level task used when no per-module model is available
pub const DEFAULT_ASSEMBLE_TASK: &str = "assemble";

/// Fixed task name compiling a plain module's unit tests
pub const TEST_CLASSES_TASK: &str = "testClasses";

/// Gradle handles the build logic module itself; it never gets tasks
pub const BUILD_SRC_NAME: &str = "buildSrc";

const GRADLE_PATH_SEPARATOR: &str = ":";

/// Category of work the caller wants the build to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BuildMode {
    Clean,
    Assemble,
    Rebuild,
    CompileJava,
    SourceGen,
    AssembleTranslate,
}

impl BuildMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildMode::Clean => "clean",
            BuildMode::Assemble => "assemble",
            BuildMode::Rebuild => "rebuild",
            BuildMode::CompileJava => "compile-java",
            BuildMode::SourceGen => "source-gen",
            BuildMode::AssembleTranslate => "assemble-translate",
        }
    }

    fn is_assemble(&self) -> bool {
        matches!(self, BuildMode::Assemble | BuildMode::AssembleTranslate)
    }
}

impl FromStr for BuildMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "clean" => Ok(BuildMode::Clean),
            "assemble" => Ok(BuildMode::Assemble),
            "rebuild" => Ok(BuildMode::Rebuild),
            "compile-java" | "compile" => Ok(BuildMode::CompileJava),
            "source-gen" | "sources" => Ok(BuildMode::SourceGen),
            "assemble-translate" => Ok(BuildMode::AssembleTranslate),
            _ => Err(Error::InvalidValue(format!("Unknown build mode: {}", s))),
        }
    }
}

impl std::fmt::Display for BuildMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which test sources, if any, should be compiled alongside the build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TestCompileType {
    #[default]
    None,
    UnitTests,
    InstrumentationTests,
}

impl FromStr for TestCompileType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "none" => Ok(TestCompileType::None),
            "unit-tests" | "unit" => Ok(TestCompileType::UnitTests),
            "instrumentation-tests" | "instrumentation" => Ok(TestCompileType::InstrumentationTests),
            _ => Err(Error::InvalidValue(format!("Unknown test compile type: {}", s))),
        }
    }
}

/// What kind of build model a module carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleKind {
    /// Android application or library module
    Android,
    /// Plain JVM module
    Plain,
    /// Module with no buildable model; contributes no tasks
    None,
}

/// Simple (unqualified) task names a module's build model declares.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleTasks {
    /// Source/code generation task (Android)
    pub source_gen: Option<String>,
    /// Assemble task producing the module's artifact
    pub assemble: Option<String>,
    /// Java compilation task
    pub compile_java: Option<String>,
    /// Instrumentation-test assembly task (Android)
    pub assemble_android_tests: Option<String>,
}

/// Minimal static view of a build module: just enough to resolve task
/// names, decoupled from any real project model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleDescriptor {
    pub name: String,
    /// Gradle project path, e.g. `:app` or `:` for the root project
    pub gradle_path: String,
    pub kind: ModuleKind,
    #[serde(default)]
    pub tasks: ModuleTasks,
}

/// Compute the ordered Gradle task list for one build invocation.
///
/// `last_sync_failed` reflects project-level state: without a successful
/// sync there is no per-module task model to consult, so an `Assemble`
/// request falls back to the top-level default assemble task.
pub fn select_tasks(
    modules: &[ModuleDescriptor],
    mode: BuildMode,
    test_compile: TestCompileType,
    last_sync_failed: bool,
) -> Vec<String> {
    if mode == BuildMode::Assemble && last_sync_failed {
        tracing::debug!("last sync failed; falling back to default assemble task");
        return vec![DEFAULT_ASSEMBLE_TASK.to_string()];
    }

    let mut tasks = Vec::new();
    for module in modules {
        if module.name == BUILD_SRC_NAME {
            // buildSrc is always built by Gradle itself
            continue;
        }
        match module.kind {
            ModuleKind::Android => push_android_tasks(module, mode, test_compile, &mut tasks),
            ModuleKind::Plain => push_plain_tasks(module, mode, test_compile, &mut tasks),
            ModuleKind::None => {}
        }
    }

    if mode == BuildMode::Rebuild && !tasks.is_empty() {
        tasks.insert(0, CLEAN_TASK.to_string());
    }

    if tasks.is_empty() {
        tracing::warn!(
            "no build tasks found for mode '{}' across {} module(s); check the project descriptor",
            mode,
            modules.len()
        );
    }
    tasks
}

fn push_android_tasks(
    module: &ModuleDescriptor,
    mode: BuildMode,
    test_compile: TestCompileType,
    tasks: &mut Vec<String>,
) {
    let simple = match mode {
        BuildMode::SourceGen => module.tasks.source_gen.as_deref(),
        m if m.is_assemble() => module.tasks.assemble.as_deref(),
        _ => module.tasks.compile_java.as_deref(),
    };
    if let Some(simple) = simple {
        tasks.push(qualify(&module.gradle_path, simple));
    }
    if test_compile == TestCompileType::InstrumentationTests {
        if let Some(test_task) = module.tasks.assemble_android_tests.as_deref() {
            tasks.push(qualify(&module.gradle_path, test_task));
        }
    }
}

fn push_plain_tasks(
    module: &ModuleDescriptor,
    mode: BuildMode,
    test_compile: TestCompileType,
    tasks: &mut Vec<String>,
) {
    let simple = if mode.is_assemble() {
        module.tasks.assemble.as_deref()
    } else {
        module.tasks.compile_java.as_deref()
    };
    if let Some(simple) = simple {
        tasks.push(qualify(&module.gradle_path, simple));
    }
    if test_compile == TestCompileType::UnitTests {
        tasks.push(qualify(&module.gradle_path, TEST_CLASSES_TASK));
    }
}

/// Join a Gradle project path and a simple task name. The root project's
/// path is the bare separator, which must not be doubled.
fn qualify(gradle_path: &str, task: &str) -> String {
    if gradle_path == GRADLE_PATH_SEPARATOR {
        format!("{}{}", GRADLE_PATH_SEPARATOR, task)
    } else {
        format!("{}{}{}", gradle_path, GRADLE_PATH_SEPARATOR, task)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn android_module(name: &str, path: &str) -> ModuleDescriptor {
        ModuleDescriptor {
            name: name.to_string(),
            gradle_path: path.to_string(),
            kind: ModuleKind::Android,
            tasks: ModuleTasks {
                source_gen: Some("generateDebugSources".to_string()),
                assemble: Some("assembleDebug".to_string()),
                compile_java: Some("compileDebugSources".to_string()),
                assemble_android_tests: Some("assembleDebugAndroidTest".to_string()),
            },
        }
    }

    fn plain_module(name: &str, path: &str) -> ModuleDescriptor {
        ModuleDescriptor {
            name: name.to_string(),
            gradle_path: path.to_string(),
            kind: ModuleKind::Plain,
            tasks: ModuleTasks {
                assemble: Some("assemble".to_string()),
                compile_java: Some("compileJava".to_string()),
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_assemble_android_modules() {
        let modules = vec![android_module("app", ":app"), android_module("lib", ":lib")];
        let tasks = select_tasks(&modules, BuildMode::Assemble, TestCompileType::None, false);
        assert_eq!(tasks, vec![":app:assembleDebug", ":lib:assembleDebug"]);
    }

    #[test]
    fn test_source_gen_resolves_generate_task() {
        let modules = vec![android_module("app", ":app")];
        let tasks = select_tasks(&modules, BuildMode::SourceGen, TestCompileType::None, false);
        assert_eq!(tasks, vec![":app:generateDebugSources"]);
    }

    #[test]
    fn test_other_modes_fall_back_to_compile_java() {
        let modules = vec![android_module("app", ":app")];
        let tasks = select_tasks(&modules, BuildMode::CompileJava, TestCompileType::None, false);
        assert_eq!(tasks, vec![":app:compileDebugSources"]);
    }

    #[test]
    fn test_rebuild_prepends_clean() {
        let modules = vec![
            android_module("app", ":app"),
            android_module("wear", ":wear"),
            android_module("tv", ":tv"),
        ];
        let tasks = select_tasks(&modules, BuildMode::Rebuild, TestCompileType::None, false);
        assert_eq!(tasks.first().map(String::as_str), Some(CLEAN_TASK));
        assert_eq!(tasks.len(), 4);
    }

    #[test]
    fn test_rebuild_with_no_tasks_has_no_clean() {
        let modules = vec![ModuleDescriptor {
            name: "docs".to_string(),
            gradle_path: ":docs".to_string(),
            kind: ModuleKind::None,
            tasks: ModuleTasks::default(),
        }];
        let tasks = select_tasks(&modules, BuildMode::Rebuild, TestCompileType::None, false);
        assert!(tasks.is_empty());
    }

    #[test]
    fn test_failed_sync_assemble_short_circuits() {
        let modules = vec![android_module("app", ":app"), plain_module("core", ":core")];
        let tasks = select_tasks(&modules, BuildMode::Assemble, TestCompileType::None, true);
        assert_eq!(tasks, vec![DEFAULT_ASSEMBLE_TASK]);
    }

    #[test]
    fn test_failed_sync_does_not_affect_other_modes() {
        let modules = vec![android_module("app", ":app")];
        let tasks = select_tasks(&modules, BuildMode::CompileJava, TestCompileType::None, true);
        assert_eq!(tasks, vec![":app:compileDebugSources"]);
    }

    #[test]
    fn test_build_src_never_contributes() {
        for mode in [
            BuildMode::Clean,
            BuildMode::Assemble,
            BuildMode::Rebuild,
            BuildMode::CompileJava,
            BuildMode::SourceGen,
            BuildMode::AssembleTranslate,
        ] {
            let modules = vec![android_module(BUILD_SRC_NAME, ":buildSrc")];
            let tasks = select_tasks(&modules, mode, TestCompileType::None, false);
            assert!(tasks.is_empty(), "buildSrc contributed tasks in mode {}", mode);
        }
    }

    #[test]
    fn test_instrumentation_tests_append_android_test_task() {
        let modules = vec![android_module("app", ":app")];
        let tasks = select_tasks(
            &modules,
            BuildMode::Assemble,
            TestCompileType::InstrumentationTests,
            false,
        );
        assert_eq!(tasks, vec![":app:assembleDebug", ":app:assembleDebugAndroidTest"]);
    }

    #[test]
    fn test_instrumentation_tests_skip_module_without_test_task() {
        let mut module = android_module("app", ":app");
        module.tasks.assemble_android_tests = None;
        let tasks = select_tasks(
            &[module],
            BuildMode::Assemble,
            TestCompileType::InstrumentationTests,
            false,
        );
        assert_eq!(tasks, vec![":app:assembleDebug"]);
    }

    #[test]
    fn test_unit_tests_append_test_classes_for_plain_modules() {
        let modules = vec![plain_module("core", ":core")];
        let tasks = select_tasks(&modules, BuildMode::CompileJava, TestCompileType::UnitTests, false);
        assert_eq!(tasks, vec![":core:compileJava", ":core:testClasses"]);
    }

    #[test]
    fn test_root_path_not_doubled() {
        let modules = vec![plain_module("root", ":")];
        let tasks = select_tasks(&modules, BuildMode::Assemble, TestCompileType::None, false);
        assert_eq!(tasks, vec![":assemble"]);
    }

    #[test]
    fn test_module_without_entry_contributes_nothing() {
        let mut module = android_module("app", ":app");
        module.tasks.source_gen = None;
        let tasks = select_tasks(&[module], BuildMode::SourceGen, TestCompileType::None, false);
        assert!(tasks.is_empty());
    }

    #[test]
    fn test_selection_is_idempotent() {
        let modules = vec![
            android_module("app", ":app"),
            plain_module("core", ":core"),
            android_module("wear", ":wear"),
        ];
        let first = select_tasks(&modules, BuildMode::Rebuild, TestCompileType::UnitTests, false);
        let second = select_tasks(&modules, BuildMode::Rebuild, TestCompileType::UnitTests, false);
        assert_eq!(first, second);
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("REBUILD".parse::<BuildMode>().unwrap(), BuildMode::Rebuild);
        assert_eq!("compile".parse::<BuildMode>().unwrap(), BuildMode::CompileJava);
        assert!("deploy".parse::<BuildMode>().is_err());
        assert_eq!(
            "instrumentation".parse::<TestCompileType>().unwrap(),
            TestCompileType::InstrumentationTests
        );
    }
}
