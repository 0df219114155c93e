//! One check run: obtain the actual spec, fetch the expected one from Figma,
//! compare them and write diagnostics.

use chrono::Utc;
use tracing::{info, warn};

use crate::figma::FigmaClient;
use crate::harness::discovery::{FsSourceLocator, SourceLocator};
use crate::harness::flutter::{FlutterTestOptions, run_flutter_test_and_read_spec};
use crate::harness::types::{ActualSource, CheckConfig, HarnessResult};
use crate::report;
use crate::runner::{CheckMode, CheckReport};
use crate::spec::{ScreenSpec, compare_screen_spec, extract_from_source};

/// Extract the actual spec of `screen` from its source file
pub fn static_spec(screen: &str, locator: &dyn SourceLocator) -> HarnessResult<ScreenSpec> {
    let path = locator.locate(screen)?;
    info!("Scanning {}", path.display());
    let content = locator.read(&path)?;
    Ok(extract_from_source(&content, screen))
}

/// Runs one check: actual spec, then expected spec, then comparison.
///
/// On mismatch the findings are written to `<output_dir>/<screen>.diff.json`.
/// The returned report carries the outcome; only hard failures are errors.
pub async fn run_check(config: &CheckConfig, figma: &FigmaClient) -> HarnessResult<CheckReport> {
    run_check_with(config, figma, None).await
}

/// Like [`run_check`], with the source locator supplied by the caller.
///
/// `locator` is only consulted in static mode; when it is `None` there, one
/// rooted at the configured source root is used.
pub async fn run_check_with(
    config: &CheckConfig,
    figma: &FigmaClient,
    locator: Option<&dyn SourceLocator>,
) -> HarnessResult<CheckReport> {
    let output_dir = config.resolved_output_dir();

    let (mode, actual) = match &config.actual {
        ActualSource::Static { source_root } => {
            let fallback;
            let locator = match locator {
                Some(locator) => locator,
                None => {
                    fallback = FsSourceLocator::new(config.resolve(source_root));
                    &fallback as &dyn SourceLocator
                }
            };
            (CheckMode::Static, static_spec(&config.screen, locator)?)
        }
        ActualSource::FlutterTest { test_path, command } => {
            let options = FlutterTestOptions {
                command: command.clone(),
                test_path: test_path.clone(),
                screen: config.screen.clone(),
                output_dir: output_dir.clone(),
                working_dir: config.working_dir.clone(),
            };
            (CheckMode::FlutterTest, run_flutter_test_and_read_spec(&options).await?)
        }
    };

    info!(
        "Fetching Figma spec: file={} node={}",
        config.figma_file, config.figma_node
    );
    let expected = figma
        .fetch_screen_spec(&config.figma_file, &config.figma_node, Some(&config.screen))
        .await?;

    info!("Comparing specs...");
    let result = compare_screen_spec(&expected, &actual);

    if config.dump_specs {
        report::write_spec(&report::spec_dump_path(&output_dir, &config.screen, "expected"), &expected)?;
        report::write_spec(&report::spec_dump_path(&output_dir, &config.screen, "actual"), &actual)?;
    }

    let diff_path = if result.matches {
        None
    } else {
        let path = report::diff_path(&output_dir, &config.screen);
        warn!("{} difference(s), writing {}", result.diffs.len(), path.display());
        report::write_diff_report(&path, &result.diffs)?;
        Some(path)
    };

    Ok(CheckReport {
        screen: config.screen.clone(),
        mode,
        checked_at: Utc::now(),
        expected,
        actual,
        result,
        diff_path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::harness::types::HarnessError;
    use std::collections::HashMap;
    use std::path::{Path, PathBuf};

    struct MemoryLocator {
        files: HashMap<String, String>,
    }

    impl SourceLocator for MemoryLocator {
        fn locate(&self, screen: &str) -> HarnessResult<PathBuf> {
            let name = crate::harness::discovery::source_file_name(screen);
            if self.files.contains_key(&name) {
                Ok(PathBuf::from(name))
            } else {
                Err(HarnessError::SourceNotFound {
                    screen: screen.to_string(),
                    target: name,
                    root: PathBuf::from("memory"),
                })
            }
        }

        fn read(&self, path: &Path) -> HarnessResult<String> {
            Ok(self.files[&*path.to_string_lossy()].clone())
        }
    }

    #[test]
    fn test_static_spec_uses_locator() {
        let locator = MemoryLocator {
            files: HashMap::from([(
                "login_page.dart".to_string(),
                "Text('Welcome', style: TextStyle(fontSize: 24)) SizedBox(height: 12)".to_string(),
            )]),
        };

        let spec = static_spec("LoginPage", &locator).unwrap();
        assert_eq!(spec.screen_name, "LoginPage");
        assert_eq!(spec.texts.len(), 1);
        assert_eq!(spec.gaps.len(), 1);

        assert!(matches!(
            static_spec("Home", &locator),
            Err(HarnessError::SourceNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_run_check_with_injected_locator() {
        use crate::figma::FigmaConfig;
        use httpmock::prelude::*;

        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/v1/files/AbC123/nodes").query_param("ids", "1:2");
                then.status(200).json_body(serde_json::json!({
                    "nodes": { "1:2": { "document": {
                        "id": "1:2",
                        "type": "FRAME",
                        "name": "Login",
                        "itemSpacing": 16,
                        "children": [
                            { "id": "1:3", "type": "TEXT", "characters": "Welcome", "style": { "fontSize": 24 } }
                        ]
                    } } }
                }));
            })
            .await;
        let figma = FigmaClient::new(FigmaConfig::new("tok").api_base(server.base_url())).unwrap();

        let locator = MemoryLocator {
            files: HashMap::from([(
                "login_page.dart".to_string(),
                "Text('Welcome', style: TextStyle(fontSize: 24)) SizedBox(height: 12)".to_string(),
            )]),
        };
        let out = tempfile::tempdir().unwrap();
        let config = CheckConfig::new(
            "LoginPage",
            "AbC123",
            "1:2",
            ActualSource::Static {
                source_root: PathBuf::from("/nonexistent/specsentinel-source-root"),
            },
        )
        .output_dir(out.path());

        let report = run_check_with(&config, &figma, Some(&locator)).await.unwrap();

        assert_eq!(report.mode, CheckMode::Static);
        assert_eq!(report.actual.texts.len(), 1);
        assert_eq!(
            report.result.diffs[0].message,
            "Gap #0: height expected=16 actual=12"
        );
        assert_eq!(report.diff_path, Some(out.path().join("LoginPage.diff.json")));
        assert!(out.path().join("LoginPage.diff.json").exists());
    }
}
