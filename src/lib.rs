//! SpecSentinel - check Flutter screens against their Figma design.
//!
//! This crate provides:
//! - Extraction of a [`ScreenSpec`] (texts, paddings, gaps) from a Figma node tree
//! - Heuristic extraction of the same from Flutter source text
//! - A positional, field-by-field comparison producing readable findings
//! - A Figma API client, source discovery and a widget test runner to feed it
//!
//! # Example
//!
//! ```rust
//! use specsentinel::spec::{compare_screen_spec, extract_from_source};
//!
//! let expected = extract_from_source("SizedBox(height: 12)", "LoginPage");
//! let actual = extract_from_source("SizedBox(height: 16)", "LoginPage");
//!
//! let result = compare_screen_spec(&expected, &actual);
//! assert!(!result.matches);
//! assert_eq!(result.diffs[0].message, "Gap #0: height expected=12 actual=16");
//! ```

pub mod config;
pub mod figma;
pub mod harness;
pub mod report;
pub mod runner;
pub mod spec;

// Re-export result types
pub use runner::{CheckMode, CheckReport};

// Re-export spec types and operations
pub use spec::{
    ComparisonResult, DesignNode, DiffFinding, GapSpec, PaddingSpec, ScreenSpec, TextSpec,
    compare_screen_spec, extract_from_document, extract_from_source,
};

// Re-export Figma client
pub use figma::{FigmaClient, FigmaConfig, FigmaError, FigmaResult};

// Re-export harness types
pub use harness::{
    ActualSource, CheckConfig, FsSourceLocator, HarnessError, HarnessResult, SourceLocator,
    run_check,
};
