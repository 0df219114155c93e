use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::figma::FigmaError;

/// Where the actual spec of a screen comes from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActualSource {
    /// Scan the screen's source file found under `source_root`
    Static { source_root: PathBuf },

    /// Run a widget test that writes `<output_dir>/<screen>.json`
    FlutterTest { test_path: PathBuf, command: String },
}

/// Configuration for one check run
#[derive(Debug, Clone)]
pub struct CheckConfig {
    /// Screen identifier (e.g., "LoginPage")
    pub screen: String,

    /// Figma file key
    pub figma_file: String,

    /// Figma node id of the screen frame
    pub figma_node: String,

    /// Producer of the actual spec
    pub actual: ActualSource,

    /// Directory for test output and diagnostics
    pub output_dir: PathBuf,

    /// Directory relative paths are resolved against
    pub working_dir: PathBuf,

    /// Also write the expected and actual specs next to the diff
    pub dump_specs: bool,
}

impl CheckConfig {
    pub fn new(
        screen: impl Into<String>,
        figma_file: impl Into<String>,
        figma_node: impl Into<String>,
        actual: ActualSource,
    ) -> Self {
        Self {
            screen: screen.into(),
            figma_file: figma_file.into(),
            figma_node: figma_node.into(),
            actual,
            output_dir: PathBuf::from(crate::config::DEFAULT_OUTPUT_DIR),
            working_dir: PathBuf::from("."),
            dump_specs: false,
        }
    }

    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = dir.into();
        self
    }

    pub fn dump_specs(mut self, dump: bool) -> Self {
        self.dump_specs = dump;
        self
    }

    /// Resolve `path` against the working directory unless it is absolute
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.working_dir.join(path)
        }
    }

    /// Output directory resolved against the working directory
    pub fn resolved_output_dir(&self) -> PathBuf {
        self.resolve(&self.output_dir)
    }
}

/// Result type for harness operations
pub type HarnessResult<T> = Result<T, HarnessError>;

/// Error types for harness operations
#[derive(Error, Debug)]
pub enum HarnessError {
    /// Fetching the design document failed
    #[error("{0}")]
    Figma(#[from] FigmaError),

    /// No source file matches the screen
    #[error("No source file found for screen {screen} (looking for {target} under {})", .root.display())]
    SourceNotFound {
        screen: String,
        target: String,
        root: PathBuf,
    },

    /// More than one source file matches the screen
    #[error("Multiple source files found for screen {screen}: {}", join_paths(.candidates))]
    AmbiguousSource {
        screen: String,
        candidates: Vec<PathBuf>,
    },

    /// The external test command failed
    #[error("{command} exited with {}", exit_label(.code))]
    ExternalProcess { command: String, code: Option<i32> },

    /// A CI trigger could not be read
    #[error("Trigger error: {0}")]
    Trigger(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A spec file could not be (de)serialized
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl HarnessError {
    /// Name of the stage that failed, for user-facing messages
    pub fn stage(&self) -> &'static str {
        match self {
            HarnessError::Figma(_) => "figma",
            HarnessError::SourceNotFound { .. } | HarnessError::AmbiguousSource { .. } => "source",
            HarnessError::ExternalProcess { .. } => "test-runner",
            HarnessError::Trigger(_) => "trigger",
            HarnessError::Io(_) | HarnessError::Json(_) => "io",
        }
    }
}

fn join_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("code {}", code),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_relative_and_absolute() {
        let config = CheckConfig::new("S", "F", "1:2", ActualSource::Static { source_root: "lib".into() })
            .working_dir("/work/app");

        assert_eq!(config.resolve(Path::new("lib")), PathBuf::from("/work/app/lib"));
        assert_eq!(config.resolve(Path::new("/abs")), PathBuf::from("/abs"));
        assert_eq!(
            config.resolved_output_dir(),
            PathBuf::from("/work/app").join(crate::config::DEFAULT_OUTPUT_DIR)
        );
    }

    #[test]
    fn test_error_messages_and_stages() {
        let err = HarnessError::AmbiguousSource {
            screen: "Home".to_string(),
            candidates: vec![PathBuf::from("a/home.dart"), PathBuf::from("b/home.dart")],
        };
        assert_eq!(err.to_string(), "Multiple source files found for screen Home: a/home.dart, b/home.dart");
        assert_eq!(err.stage(), "source");

        let err = HarnessError::ExternalProcess { command: "flutter test".to_string(), code: Some(1) };
        assert_eq!(err.to_string(), "flutter test exited with code 1");
        assert_eq!(err.stage(), "test-runner");

        let err = HarnessError::from(FigmaError::NodeNotFound("1:2".to_string()));
        assert_eq!(err.to_string(), "Node 1:2 not found in Figma response");
        assert_eq!(err.stage(), "figma");
    }
}
