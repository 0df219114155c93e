//! CI comment triggers.
//!
//! A pull request comment such as
//!
//! ```text
//! figma-spec: LoginPage https://www.figma.com/file/AbC123/App?node-id=12-34
//! ```
//!
//! requests a check of `LoginPage` against node `12:34` of file `AbC123`.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::harness::types::{HarnessError, HarnessResult};

static TRIGGER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)figma-spec:\s*(?P<screen>[\w-]+)\s+https://www\.figma\.com/(?:file|design)/(?P<file_key>\w+)[^?\s]*\?node-id=(?P<node_id>[\w:-]+)",
    )
    .expect("trigger pattern is valid")
});

/// A check requested from a comment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecTrigger {
    pub screen: String,
    pub file_key: String,
    /// Node id in API form (`12:34`)
    pub node_id: String,
}

/// Find the first `figma-spec:` line in a comment body
pub fn parse_trigger(body: &str) -> Option<SpecTrigger> {
    let caps = TRIGGER_RE.captures(body)?;
    Some(SpecTrigger {
        screen: caps.name("screen")?.as_str().to_string(),
        file_key: caps.name("file_key")?.as_str().to_string(),
        node_id: normalize_node_id(caps.name("node_id")?.as_str()),
    })
}

/// Convert a URL node id (`12-34`) to the API form (`12:34`)
pub fn normalize_node_id(node_id: &str) -> String {
    if node_id.contains(':') {
        node_id.to_string()
    } else {
        node_id.replacen('-', ":", 1)
    }
}

#[derive(Debug, Deserialize)]
struct Event {
    #[serde(default)]
    comment: Option<Comment>,
}

#[derive(Debug, Deserialize)]
struct Comment {
    #[serde(default)]
    body: Option<String>,
}

/// Read the comment body from a CI event payload, if the event has one
pub fn read_event_comment(event_path: &Path) -> HarnessResult<Option<String>> {
    let content = std::fs::read_to_string(event_path).map_err(|e| {
        HarnessError::Trigger(format!("cannot read event {}: {}", event_path.display(), e))
    })?;
    let event: Event = serde_json::from_str(&content)?;
    Ok(event.comment.and_then(|c| c.body).filter(|b| !b.trim().is_empty()))
}
