//! Extraction of a [`ScreenSpec`] from a Figma document tree.

use serde::{Deserialize, Serialize};

use super::types::{GapSpec, PaddingSpec, ScreenSpec, TextSpec};

/// Screen name used when neither an override nor a root name is available
pub const FALLBACK_SCREEN_NAME: &str = "Unknown";

/// Type tag of text nodes
pub const TEXT_NODE_TYPE: &str = "TEXT";

/// A node of a design document.
///
/// Every node kind shares this one record; attributes that do not apply to a
/// kind are simply absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignNode {
    #[serde(default)]
    pub id: String,

    /// Node kind, e.g. "FRAME", "TEXT"
    #[serde(rename = "type")]
    pub node_type: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub children: Vec<DesignNode>,

    /// Text content (text nodes)
    #[serde(default)]
    pub characters: Option<String>,

    #[serde(default)]
    pub style: Option<TypeStyle>,

    #[serde(default)]
    pub padding_left: Option<f64>,
    #[serde(default)]
    pub padding_top: Option<f64>,
    #[serde(default)]
    pub padding_right: Option<f64>,
    #[serde(default)]
    pub padding_bottom: Option<f64>,

    /// Spacing between children of an auto-layout frame
    #[serde(default)]
    pub item_spacing: Option<f64>,
}

/// Typography attributes of a text node
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeStyle {
    #[serde(default)]
    pub font_size: Option<f64>,
}

impl DesignNode {
    fn is_text(&self) -> bool {
        self.node_type == TEXT_NODE_TYPE
    }

    fn padding(&self) -> Option<PaddingSpec> {
        let edges = [
            self.padding_left,
            self.padding_top,
            self.padding_right,
            self.padding_bottom,
        ];
        if edges.iter().all(Option::is_none) {
            return None;
        }
        Some(PaddingSpec::new(
            self.padding_left.unwrap_or(0.0),
            self.padding_top.unwrap_or(0.0),
            self.padding_right.unwrap_or(0.0),
            self.padding_bottom.unwrap_or(0.0),
        ))
    }
}

/// Build a [`ScreenSpec`] from the subtree rooted at `root`.
///
/// Nodes are visited depth-first, parent before children, children in document
/// order. The screen name is `screen_name` if given, otherwise the root's name,
/// otherwise [`FALLBACK_SCREEN_NAME`].
pub fn extract_from_document(root: &DesignNode, screen_name: Option<&str>) -> ScreenSpec {
    let name = screen_name
        .map(str::to_string)
        .or_else(|| root.name.clone())
        .unwrap_or_else(|| FALLBACK_SCREEN_NAME.to_string());

    let mut spec = ScreenSpec::new(name);
    visit(root, &mut spec);
    spec
}

fn visit(node: &DesignNode, spec: &mut ScreenSpec) {
    if node.is_text() {
        spec.texts.push(TextSpec {
            text: node.characters.clone(),
            font_size: node.style.as_ref().and_then(|s| s.font_size),
        });
    }

    if let Some(padding) = node.padding() {
        spec.paddings.push(padding);
    }

    // Figma models spacing along the layout axis only
    if let Some(spacing) = node.item_spacing {
        spec.gaps.push(GapSpec::vertical(spacing));
    }

    for child in &node.children {
        visit(child, spec);
    }
}
