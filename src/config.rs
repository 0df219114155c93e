//! Configuration management with environment variable support.
//!
//! This module provides centralized configuration for SpecSentinel, supporting:
//! - Environment variables for all configurable values
//! - Sensible defaults for a standard Flutter project layout
//! - Builder pattern for programmatic configuration (see [`crate::figma::FigmaConfig`])
//!
//! # Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `FIGMA_TOKEN` | Figma access token | (none) |
//! | `SPECSENTINEL_FIGMA_API` | Figma REST API base URL | `https://api.figma.com` |
//! | `SPECSENTINEL_FIGMA_OAUTH` | Send the token as `Authorization: Bearer` | `false` |
//! | `SPECSENTINEL_FIGMA_TIMEOUT` | Figma request timeout in seconds | `30` |
//! | `SPECSENTINEL_OUTPUT_DIR` | Directory for test output and diagnostics | `build/specsentinel` |
//! | `SPECSENTINEL_SOURCE_ROOT` | Root searched for screen source files | `lib` |
//! | `SPECSENTINEL_TEST_COMMAND` | Command used to run widget tests | `flutter` |
//!
//! # Example
//!
//! ```bash
//! export FIGMA_TOKEN="figd_..."
//! export SPECSENTINEL_SOURCE_ROOT="app/lib"
//! specsentinel check --screen LoginPage --figma-file AbC123 --figma-node 12:34
//! ```

use std::env;
use std::sync::OnceLock;

// ============================================================================
// Default Values
// ============================================================================

/// Default Figma REST API base URL
pub const DEFAULT_FIGMA_API_BASE: &str = "https://api.figma.com";

/// Default Figma request timeout (seconds)
pub const DEFAULT_FIGMA_TIMEOUT: u64 = 30;

/// Default directory for test output and diagnostics
pub const DEFAULT_OUTPUT_DIR: &str = "build/specsentinel";

/// Default root for source discovery
pub const DEFAULT_SOURCE_ROOT: &str = "lib";

/// Default command used to run widget tests
pub const DEFAULT_TEST_COMMAND: &str = "flutter";

/// Suffix of screen source files
pub const SOURCE_FILE_SUFFIX: &str = ".dart";

// ============================================================================
// Environment Variable Names
// ============================================================================

/// Environment variable for the Figma token
pub const ENV_FIGMA_TOKEN: &str = "FIGMA_TOKEN";

/// Environment variable for the Figma API base URL
pub const ENV_FIGMA_API_BASE: &str = "SPECSENTINEL_FIGMA_API";

/// Environment variable selecting bearer authentication
pub const ENV_FIGMA_OAUTH: &str = "SPECSENTINEL_FIGMA_OAUTH";

/// Environment variable for the Figma request timeout
pub const ENV_FIGMA_TIMEOUT: &str = "SPECSENTINEL_FIGMA_TIMEOUT";

/// Environment variable for the output directory
pub const ENV_OUTPUT_DIR: &str = "SPECSENTINEL_OUTPUT_DIR";

/// Environment variable for the source root
pub const ENV_SOURCE_ROOT: &str = "SPECSENTINEL_SOURCE_ROOT";

/// Environment variable for the test command
pub const ENV_TEST_COMMAND: &str = "SPECSENTINEL_TEST_COMMAND";

/// Environment variable set by CI pointing at the triggering event payload
pub const ENV_EVENT_PATH: &str = "GITHUB_EVENT_PATH";

// ============================================================================
// Configuration Getters (with caching)
// ============================================================================

static CONFIG: OnceLock<Config> = OnceLock::new();

/// Get the global configuration (initialized from environment on first access)
pub fn get() -> &'static Config {
    CONFIG.get_or_init(Config::from_env)
}

/// Centralized configuration for SpecSentinel
#[derive(Debug, Clone)]
pub struct Config {
    /// Figma API settings
    pub figma: FigmaSettings,
    /// Project path settings
    pub paths: PathSettings,
}

/// Figma-related settings
#[derive(Clone)]
pub struct FigmaSettings {
    /// Access token, if configured
    pub token: Option<String>,
    /// API base URL
    pub api_base: String,
    /// Send the token as a bearer token instead of `X-Figma-Token`
    pub oauth: bool,
    /// Request timeout (seconds)
    pub timeout: u64,
}

// Keep the token out of debug output
impl std::fmt::Debug for FigmaSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FigmaSettings")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("api_base", &self.api_base)
            .field("oauth", &self.oauth)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Project layout settings
#[derive(Debug, Clone)]
pub struct PathSettings {
    /// Directory for test output and diagnostics
    pub output_dir: String,
    /// Root searched for screen source files
    pub source_root: String,
    /// Command used to run widget tests
    pub test_command: String,
}

impl Config {
    /// Create configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        Self {
            figma: FigmaSettings::from_env(),
            paths: PathSettings::from_env(),
        }
    }

    /// Create configuration with all defaults (ignoring environment)
    pub fn defaults() -> Self {
        Self {
            figma: FigmaSettings::defaults(),
            paths: PathSettings::defaults(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

impl FigmaSettings {
    /// Create Figma settings from environment variables
    pub fn from_env() -> Self {
        Self {
            token: env::var(ENV_FIGMA_TOKEN).ok().filter(|t| !t.trim().is_empty()),
            api_base: env::var(ENV_FIGMA_API_BASE)
                .unwrap_or_else(|_| DEFAULT_FIGMA_API_BASE.to_string()),
            oauth: env::var(ENV_FIGMA_OAUTH)
                .ok()
                .map(|v| parse_flag(&v))
                .unwrap_or(false),
            timeout: env::var(ENV_FIGMA_TIMEOUT)
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_FIGMA_TIMEOUT),
        }
    }

    /// Create Figma settings with defaults
    pub fn defaults() -> Self {
        Self {
            token: None,
            api_base: DEFAULT_FIGMA_API_BASE.to_string(),
            oauth: false,
            timeout: DEFAULT_FIGMA_TIMEOUT,
        }
    }
}

impl PathSettings {
    /// Create path settings from environment variables
    pub fn from_env() -> Self {
        Self {
            output_dir: env::var(ENV_OUTPUT_DIR).unwrap_or_else(|_| DEFAULT_OUTPUT_DIR.to_string()),
            source_root: env::var(ENV_SOURCE_ROOT)
                .unwrap_or_else(|_| DEFAULT_SOURCE_ROOT.to_string()),
            test_command: env::var(ENV_TEST_COMMAND)
                .unwrap_or_else(|_| DEFAULT_TEST_COMMAND.to_string()),
        }
    }

    /// Create path settings with defaults
    pub fn defaults() -> Self {
        Self {
            output_dir: DEFAULT_OUTPUT_DIR.to_string(),
            source_root: DEFAULT_SOURCE_ROOT.to_string(),
            test_command: DEFAULT_TEST_COMMAND.to_string(),
        }
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Interpret a boolean-ish environment value ("1", "true", "yes", "on")
fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Get the default output directory (convenience function)
pub fn output_dir() -> String {
    get().paths.output_dir.clone()
}

/// Get the default source root (convenience function)
pub fn source_root() -> String {
    get().paths.source_root.clone()
}
