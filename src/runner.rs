//! Types for check run results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::spec::{ComparisonResult, ScreenSpec};

/// How the actual spec was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckMode {
    /// Scanned from the screen's source file
    Static,
    /// Written by a widget test
    FlutterTest,
}

/// Result of a complete check run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckReport {
    /// Screen that was checked
    pub screen: String,

    /// Producer of the actual spec
    pub mode: CheckMode,

    /// When the comparison ran
    pub checked_at: DateTime<Utc>,

    /// Spec extracted from the design
    pub expected: ScreenSpec,

    /// Spec extracted from the app
    pub actual: ScreenSpec,

    /// Comparison outcome
    pub result: ComparisonResult,

    /// Findings file, written only on mismatch
    pub diff_path: Option<PathBuf>,
}

impl CheckReport {
    pub fn matches(&self) -> bool {
        self.result.matches
    }
}
