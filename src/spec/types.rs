//! Core types shared by the extractors and the comparator.

use serde::{Deserialize, Serialize};

/// Structural description of one screen.
///
/// Each sequence keeps the order in which its entries were encountered in the
/// source. Comparison aligns entries by index, so that order is significant and
/// is never normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenSpec {
    /// Identifier of the screen (e.g., "LoginPage")
    pub screen_name: String,

    /// Text elements in encounter order
    #[serde(default)]
    pub texts: Vec<TextSpec>,

    /// Paddings in encounter order
    #[serde(default)]
    pub paddings: Vec<PaddingSpec>,

    /// Spacers / item spacing in encounter order
    #[serde(default)]
    pub gaps: Vec<GapSpec>,
}

impl ScreenSpec {
    /// Create an empty spec for a screen
    pub fn new(screen_name: impl Into<String>) -> Self {
        Self {
            screen_name: screen_name.into(),
            texts: Vec::new(),
            paddings: Vec::new(),
            gaps: Vec::new(),
        }
    }
}

/// A text element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextSpec {
    /// Literal content
    #[serde(default)]
    pub text: Option<String>,

    /// Declared font size
    #[serde(default)]
    pub font_size: Option<f64>,
}

impl TextSpec {
    pub fn new(text: impl Into<String>, font_size: Option<f64>) -> Self {
        Self {
            text: Some(text.into()),
            font_size,
        }
    }
}

/// Insets on the four edges. Unspecified edges are 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PaddingSpec {
    #[serde(default)]
    pub left: f64,
    #[serde(default)]
    pub top: f64,
    #[serde(default)]
    pub right: f64,
    #[serde(default)]
    pub bottom: f64,
}

impl PaddingSpec {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Edges in comparison order, labelled
    pub(crate) fn edges(&self) -> [(&'static str, f64); 4] {
        [
            ("left", self.left),
            ("top", self.top),
            ("right", self.right),
            ("bottom", self.bottom),
        ]
    }
}

/// A spacer between elements
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GapSpec {
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub width: Option<f64>,
}

impl GapSpec {
    pub fn vertical(height: f64) -> Self {
        Self {
            height: Some(height),
            width: None,
        }
    }

    pub fn horizontal(width: f64) -> Self {
        Self {
            height: None,
            width: Some(width),
        }
    }
}

/// One field-level mismatch or missing entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffFinding {
    pub message: String,
}

impl DiffFinding {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for DiffFinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Outcome of comparing an expected spec against an actual one
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    /// True when no findings were produced
    pub matches: bool,

    /// Findings in field-group order
    pub diffs: Vec<DiffFinding>,
}

impl ComparisonResult {
    pub fn from_diffs(diffs: Vec<DiffFinding>) -> Self {
        Self {
            matches: diffs.is_empty(),
            diffs,
        }
    }
}
