//! End-to-end checks against a temporary Flutter project and a mock Figma API

use httpmock::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::fs;
use std::path::Path;

use specsentinel::figma::{FigmaClient, FigmaConfig};
use specsentinel::harness::{ActualSource, CheckConfig, HarnessError, run_check};
use specsentinel::runner::CheckMode;
use specsentinel::spec::DiffFinding;

const LOGIN_PAGE_SOURCE: &str = r#"
class LoginPage extends StatelessWidget {
  @override
  Widget build(BuildContext context) {
    return Padding(
      padding: EdgeInsets.fromLTRB(16, 8, 16, 8),
      child: Column(children: [
        Text('Welcome', style: TextStyle(fontSize: 24)),
        SizedBox(height: 12),
        Text("Sign in", style: TextStyle(fontSize: 14)),
      ]),
    );
  }
}
"#;

fn figma_document(bottom_padding: u32) -> serde_json::Value {
    json!({
        "nodes": {
            "12:34": {
                "document": {
                    "id": "12:34",
                    "type": "FRAME",
                    "name": "Login",
                    "paddingLeft": 16, "paddingTop": 8, "paddingRight": 16, "paddingBottom": bottom_padding,
                    "itemSpacing": 12,
                    "children": [
                        { "id": "12:35", "type": "TEXT", "characters": "Welcome", "style": { "fontSize": 24 } },
                        { "id": "12:36", "type": "TEXT", "characters": "Sign in", "style": { "fontSize": 14 } }
                    ]
                }
            }
        }
    })
}

fn write_project(root: &Path) {
    let screens = root.join("lib/features/auth");
    fs::create_dir_all(&screens).expect("Failed to create project dirs");
    fs::write(screens.join("login_page.dart"), LOGIN_PAGE_SOURCE).expect("Failed to write source");
}

async fn mock_figma(server: &MockServer, document: serde_json::Value) {
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/files/AbC123/nodes").query_param("ids", "12:34");
            then.status(200).json_body(document);
        })
        .await;
}

fn figma_client(server: &MockServer) -> FigmaClient {
    FigmaClient::new(FigmaConfig::new("test-token").api_base(server.base_url())).expect("client builds")
}

fn static_config(project: &Path) -> CheckConfig {
    CheckConfig::new(
        "LoginPage",
        "AbC123",
        "12:34",
        ActualSource::Static {
            source_root: "lib".into(),
        },
    )
    .working_dir(project)
    .output_dir("build/specsentinel")
}

#[tokio::test]
async fn test_static_check_matches() {
    let project = tempfile::tempdir().unwrap();
    write_project(project.path());
    let server = MockServer::start_async().await;
    mock_figma(&server, figma_document(8)).await;

    let report = run_check(&static_config(project.path()), &figma_client(&server))
        .await
        .expect("check runs");

    assert!(report.matches(), "unexpected findings: {:?}", report.result.diffs);
    assert_eq!(report.mode, CheckMode::Static);
    assert_eq!(report.expected.screen_name, "LoginPage");
    assert!(report.diff_path.is_none());
    assert!(!project.path().join("build/specsentinel/LoginPage.diff.json").exists());
}

#[tokio::test]
async fn test_static_check_mismatch_writes_diff() {
    let project = tempfile::tempdir().unwrap();
    write_project(project.path());
    let server = MockServer::start_async().await;
    mock_figma(&server, figma_document(24)).await;

    let config = static_config(project.path()).dump_specs(true);
    let report = run_check(&config, &figma_client(&server)).await.expect("check runs");

    assert!(!report.matches());
    let expected_diffs = vec![DiffFinding::new("Padding #0: bottom expected=24 actual=8")];
    assert_eq!(report.result.diffs, expected_diffs);

    let diff_path = project.path().join("build/specsentinel/LoginPage.diff.json");
    assert_eq!(report.diff_path.as_deref(), Some(diff_path.as_path()));
    let written: Vec<DiffFinding> =
        serde_json::from_str(&fs::read_to_string(&diff_path).unwrap()).unwrap();
    assert_eq!(written, expected_diffs);

    assert!(project.path().join("build/specsentinel/LoginPage.expected.json").exists());
    assert!(project.path().join("build/specsentinel/LoginPage.actual.json").exists());
}

#[tokio::test]
async fn test_missing_source_fails_before_fetch() {
    let project = tempfile::tempdir().unwrap();
    fs::create_dir_all(project.path().join("lib")).unwrap();
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET);
            then.status(500);
        })
        .await;

    let err = run_check(&static_config(project.path()), &figma_client(&server))
        .await
        .unwrap_err();

    assert!(matches!(err, HarnessError::SourceNotFound { .. }));
    assert_eq!(err.stage(), "source");
    mock.assert_calls_async(0).await;
}

#[cfg(unix)]
#[tokio::test]
async fn test_flutter_mode_reads_test_output() {
    let project = tempfile::tempdir().unwrap();
    let out = project.path().join("build/specsentinel");
    fs::create_dir_all(&out).unwrap();
    fs::write(
        out.join("LoginPage.json"),
        json!({
            "screenName": "LoginPage",
            "texts": [
                { "text": "Welcome", "fontSize": 24 },
                { "text": "Sign in", "fontSize": 14 }
            ],
            "paddings": [ { "left": 16, "top": 8, "right": 16, "bottom": 8 } ],
            "gaps": [ { "height": 12, "width": null } ]
        })
        .to_string(),
    )
    .unwrap();

    let server = MockServer::start_async().await;
    mock_figma(&server, figma_document(8)).await;

    let config = CheckConfig::new(
        "LoginPage",
        "AbC123",
        "12:34",
        ActualSource::FlutterTest {
            test_path: "test/spec/login_page_spec.dart".into(),
            command: "true".to_string(),
        },
    )
    .working_dir(project.path())
    .output_dir("build/specsentinel");

    let report = run_check(&config, &figma_client(&server)).await.expect("check runs");
    assert_eq!(report.mode, CheckMode::FlutterTest);
    assert!(report.matches(), "unexpected findings: {:?}", report.result.diffs);
}
