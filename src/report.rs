//! Diagnostics written next to a check run.
//!
//! Findings go to `<output_dir>/<screen>.diff.json`; with `--dump-specs` both
//! compared specs are written alongside as `<screen>.expected.json` and
//! `<screen>.actual.json`.

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::spec::{DiffFinding, ScreenSpec};

/// Sanitize a name for use in filenames
pub fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '_' => c,
            _ => '_',
        })
        .collect()
}

/// Path of the findings file for a screen
pub fn diff_path(output_dir: &Path, screen: &str) -> PathBuf {
    output_dir.join(format!("{}.diff.json", sanitize_name(screen)))
}

/// Path of a dumped spec (`kind` is "expected" or "actual")
pub fn spec_dump_path(output_dir: &Path, screen: &str, kind: &str) -> PathBuf {
    output_dir.join(format!("{}.{}.json", sanitize_name(screen), kind))
}

/// Write the findings of a failed comparison as pretty JSON
pub fn write_diff_report(path: &Path, diffs: &[DiffFinding]) -> std::io::Result<()> {
    write_json(path, diffs)
}

/// Write a spec as pretty JSON
pub fn write_spec(path: &Path, spec: &ScreenSpec) -> std::io::Result<()> {
    write_json(path, spec)
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)
}
