//! Heuristic extraction of a [`ScreenSpec`] from Flutter source text.
//!
//! This is a lexical scanner, not a Dart parser. Three constructs are
//! recognized, each by its own global pattern search over the raw text:
//!
//! | Construct | Produces |
//! |-----------|----------|
//! | `Text('literal', ...)` | [`TextSpec`], with a `fontSize:` found shortly after |
//! | `EdgeInsets.fromLTRB(l, t, r, b)` | [`PaddingSpec`] |
//! | `SizedBox(height: h, width: w)` | [`GapSpec`] when either is present |
//!
//! Anything that does not match is skipped. Numbers that fail to parse become
//! absent values (or 0 for padding edges) instead of errors.

use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

use super::types::{GapSpec, PaddingSpec, ScreenSpec, TextSpec};

/// Characters after the start of a `Text(` match searched for its `fontSize`
pub const FONT_SIZE_WINDOW: usize = 400;

static TEXT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"Text\s*\(\s*(?:'(?P<single>[^'"]*?)'|"(?P<double>[^'"]*?)")[\s,)]"#)
        .expect("text pattern is valid")
});

static FONT_SIZE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"fontSize\s*:\s*(?P<size>[0-9.]+)").expect("font size pattern is valid"));

static PADDING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"EdgeInsets\.fromLTRB\s*\(\s*(?P<l>[0-9.]+)\s*,\s*(?P<t>[0-9.]+)\s*,\s*(?P<r>[0-9.]+)\s*,\s*(?P<b>[0-9.]+)\s*\)",
    )
    .expect("padding pattern is valid")
});

static GAP_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"SizedBox\s*\(\s*(?:height\s*:\s*(?P<h>[0-9.]+))?\s*,?\s*(?:width\s*:\s*(?P<w>[0-9.]+))?")
        .expect("gap pattern is valid")
});

/// Parse a captured number. Missing, blank or non-finite input is `None`.
pub fn number_from(input: Option<&str>) -> Option<f64> {
    let trimmed = input?.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Extract a [`ScreenSpec`] from Flutter source text
pub fn extract_from_source(source: &str, screen_name: &str) -> ScreenSpec {
    ScreenSpec {
        screen_name: screen_name.to_string(),
        texts: extract_texts(source),
        paddings: extract_paddings(source),
        gaps: extract_gaps(source),
    }
}

/// Read a source file and extract its [`ScreenSpec`]
pub fn load_source_spec(path: &Path, screen_name: &str) -> std::io::Result<ScreenSpec> {
    let content = std::fs::read_to_string(path)?;
    Ok(extract_from_source(&content, screen_name))
}

fn extract_texts(source: &str) -> Vec<TextSpec> {
    TEXT_RE
        .captures_iter(source)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let text = caps
                .name("single")
                .or_else(|| caps.name("double"))
                .map(|m| m.as_str().to_string());
            let window = font_size_window(source, whole.start());
            let font_size = FONT_SIZE_RE
                .captures(window)
                .and_then(|c| number_from(c.name("size").map(|m| m.as_str())));
            Some(TextSpec { text, font_size })
        })
        .collect()
}

fn font_size_window(source: &str, start: usize) -> &str {
    let rest = &source[start..];
    let end = rest
        .char_indices()
        .nth(FONT_SIZE_WINDOW)
        .map_or(rest.len(), |(i, _)| i);
    &rest[..end]
}

fn extract_paddings(source: &str) -> Vec<PaddingSpec> {
    PADDING_RE
        .captures_iter(source)
        .map(|caps| {
            let edge = |name: &str| number_from(caps.name(name).map(|m| m.as_str())).unwrap_or(0.0);
            PaddingSpec::new(edge("l"), edge("t"), edge("r"), edge("b"))
        })
        .collect()
}

fn extract_gaps(source: &str) -> Vec<GapSpec> {
    GAP_RE
        .captures_iter(source)
        .filter_map(|caps| {
            let height = number_from(caps.name("h").map(|m| m.as_str()));
            let width = number_from(caps.name("w").map(|m| m.as_str()));
            if height.is_none() && width.is_none() {
                return None;
            }
            Some(GapSpec { height, width })
        })
        .collect()
}
