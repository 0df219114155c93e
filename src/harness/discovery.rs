//! Locating the source file of a screen.
//!
//! A screen named `LoginPage` lives in exactly one `login_page.dart` somewhere
//! under the source root. Zero or several candidates are errors; ambiguity is
//! never resolved by picking one.

use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::SOURCE_FILE_SUFFIX;
use crate::harness::types::{HarnessError, HarnessResult};

static CAMEL_BOUNDARY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([a-z0-9])([A-Z])").expect("camel boundary pattern is valid"));

static SEPARATOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[-\s]+").expect("separator pattern is valid"));

/// Convert a screen identifier to snake case (`LoginPage` -> `login_page`)
pub fn to_snake(name: &str) -> String {
    let split = CAMEL_BOUNDARY_RE.replace_all(name, "${1}_${2}");
    SEPARATOR_RE.replace_all(&split, "_").to_lowercase()
}

/// File name a screen's source is expected under
pub fn source_file_name(screen: &str) -> String {
    format!("{}{}", to_snake(screen), SOURCE_FILE_SUFFIX)
}

/// Finds and reads screen source files.
///
/// Implementations decide where sources live; the harness only needs a path
/// for messages and the text to scan.
pub trait SourceLocator: Send + Sync {
    /// Locate the single source file for `screen`
    fn locate(&self, screen: &str) -> HarnessResult<PathBuf>;

    /// Read a located source file
    fn read(&self, path: &Path) -> HarnessResult<String>;
}

/// Locator walking a directory tree on disk
#[derive(Debug, Clone)]
pub struct FsSourceLocator {
    root: PathBuf,
}

impl FsSourceLocator {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl SourceLocator for FsSourceLocator {
    fn locate(&self, screen: &str) -> HarnessResult<PathBuf> {
        let target = source_file_name(screen);
        let mut matches = Vec::new();

        for entry in walkdir::WalkDir::new(&self.root).follow_links(false) {
            let entry = entry.map_err(std::io::Error::from)?;
            if entry.file_type().is_file() && entry.file_name() == target.as_str() {
                matches.push(entry.into_path());
            }
        }
        matches.sort();
        debug!("{} candidate(s) for {} under {}", matches.len(), target, self.root.display());

        match matches.len() {
            0 => Err(HarnessError::SourceNotFound {
                screen: screen.to_string(),
                target,
                root: self.root.clone(),
            }),
            1 => Ok(matches.remove(0)),
            _ => Err(HarnessError::AmbiguousSource {
                screen: screen.to_string(),
                candidates: matches,
            }),
        }
    }

    fn read(&self, path: &Path) -> HarnessResult<String> {
        Ok(std::fs::read_to_string(path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_to_snake() {
        assert_eq!(to_snake("LoginPage"), "login_page");
        assert_eq!(to_snake("loginPage"), "login_page");
        assert_eq!(to_snake("Home2Screen"), "home2_screen");
        assert_eq!(to_snake("sign-up  form"), "sign_up_form");
        assert_eq!(to_snake("settings"), "settings");
    }

    #[test]
    fn test_source_file_name() {
        assert_eq!(source_file_name("LoginPage"), "login_page.dart");
    }

    #[test]
    fn test_locate_single_match() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("features/auth");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("login_page.dart"), "Text('Hi')").unwrap();
        fs::write(dir.path().join("login_page.g.dart"), "").unwrap();

        let locator = FsSourceLocator::new(dir.path());
        let path = locator.locate("LoginPage").unwrap();
        assert_eq!(path, nested.join("login_page.dart"));
        assert_eq!(locator.read(&path).unwrap(), "Text('Hi')");
    }

    #[test]
    fn test_locate_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = FsSourceLocator::new(dir.path()).locate("LoginPage").unwrap_err();
        assert!(matches!(err, HarnessError::SourceNotFound { ref target, .. } if target == "login_page.dart"));
    }

    #[test]
    fn test_locate_ambiguous() {
        let dir = tempfile::tempdir().unwrap();
        for sub in ["a", "b"] {
            let d = dir.path().join(sub);
            fs::create_dir_all(&d).unwrap();
            fs::write(d.join("home.dart"), "").unwrap();
        }

        let err = FsSourceLocator::new(dir.path()).locate("Home").unwrap_err();
        match err {
            HarnessError::AmbiguousSource { candidates, .. } => {
                assert_eq!(candidates, vec![dir.path().join("a/home.dart"), dir.path().join("b/home.dart")]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_locate_missing_root_is_io_error() {
        let err = FsSourceLocator::new("/nonexistent/specsentinel/lib").locate("Home").unwrap_err();
        assert!(matches!(err, HarnessError::Io(_)));
    }
}
