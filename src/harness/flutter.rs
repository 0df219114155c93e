//! Running a widget test that dumps the rendered screen's spec.
//!
//! The test is expected to write `<output_dir>/<screen>.json` in the
//! [`ScreenSpec`] JSON format before exiting successfully.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::info;

use crate::harness::types::{HarnessError, HarnessResult};
use crate::spec::ScreenSpec;

/// Options for one widget test run
#[derive(Debug, Clone)]
pub struct FlutterTestOptions {
    /// Test command, `flutter` unless overridden
    pub command: String,
    /// Test file passed to `<command> test`
    pub test_path: PathBuf,
    /// Screen whose spec file is read back
    pub screen: String,
    /// Directory the test writes its spec into
    pub output_dir: PathBuf,
    /// Directory the command runs in
    pub working_dir: PathBuf,
}

/// Path of the spec file the test writes for `screen`
pub fn spec_output_path(output_dir: &Path, screen: &str) -> PathBuf {
    output_dir.join(format!("{}.json", screen))
}

/// Run the test and read back the spec it wrote
pub async fn run_flutter_test_and_read_spec(options: &FlutterTestOptions) -> HarnessResult<ScreenSpec> {
    let output_path = spec_output_path(&options.output_dir, &options.screen);
    if let Some(parent) = output_path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    info!("Running {} test {}", options.command, options.test_path.display());
    let status = Command::new(&options.command)
        .arg("test")
        .arg(&options.test_path)
        .current_dir(&options.working_dir)
        .stdin(Stdio::null())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .await?;

    if !status.success() {
        return Err(HarnessError::ExternalProcess {
            command: format!("{} test", options.command),
            code: status.code(),
        });
    }

    let content = tokio::fs::read_to_string(&output_path).await?;
    Ok(serde_json::from_str(&content)?)
}
