//! Figma REST API client.
//!
//! Fetches a node subtree from a Figma file and turns it into the expected
//! [`ScreenSpec`]. One request per call: a failed request is reported, never
//! retried.
//!
//! # Configuration
//!
//! Figma settings can be configured via environment variables:
//! - `FIGMA_TOKEN`: Access token
//! - `SPECSENTINEL_FIGMA_API`: API base URL
//! - `SPECSENTINEL_FIGMA_OAUTH`: Send the token as a bearer token
//! - `SPECSENTINEL_FIGMA_TIMEOUT`: Request timeout (seconds)

use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config;
use crate::spec::{DesignNode, ScreenSpec, extract_from_document};

/// Header carrying personal access tokens
pub const TOKEN_HEADER: &str = "X-Figma-Token";

/// Result type for Figma operations
pub type FigmaResult<T> = Result<T, FigmaError>;

/// Errors that can occur while fetching a design document
#[derive(Error, Debug)]
pub enum FigmaError {
    /// The API answered with a non-success status
    #[error("Figma API error {status}: {body}")]
    RemoteFetch { status: u16, body: String },

    /// The requested node is absent from the response
    #[error("Node {0} not found in Figma response")]
    NodeNotFound(String),

    /// No access token configured
    #[error("FIGMA_TOKEN env var is required")]
    MissingToken,

    /// Transport-level failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body is not a node document
    #[error("Invalid response: {0}")]
    InvalidResponse(#[from] serde_json::Error),
}

/// Configuration for the Figma client
#[derive(Clone)]
pub struct FigmaConfig {
    /// Access token
    pub token: String,
    /// API base URL (without trailing `/v1`)
    pub api_base: String,
    /// Send the token as `Authorization: Bearer` instead of `X-Figma-Token`
    pub oauth: bool,
    /// Request timeout (seconds)
    pub timeout: u64,
}

impl std::fmt::Debug for FigmaConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FigmaConfig")
            .field("api_base", &self.api_base)
            .field("oauth", &self.oauth)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl FigmaConfig {
    pub fn new(token: impl Into<String>) -> Self {
        let cfg = config::get();
        Self {
            token: token.into(),
            api_base: cfg.figma.api_base.clone(),
            oauth: cfg.figma.oauth,
            timeout: cfg.figma.timeout,
        }
    }

    /// Build from the environment; fails if no token is configured
    pub fn from_env() -> FigmaResult<Self> {
        let token = config::get()
            .figma
            .token
            .clone()
            .ok_or(FigmaError::MissingToken)?;
        Ok(Self::new(token))
    }

    pub fn api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    pub fn oauth(mut self, oauth: bool) -> Self {
        self.oauth = oauth;
        self
    }

    pub fn timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }
}

#[derive(Debug, Deserialize)]
struct NodesResponse {
    #[serde(default)]
    nodes: HashMap<String, Option<NodeEntry>>,
}

#[derive(Debug, Deserialize)]
struct NodeEntry {
    document: DesignNode,
}

/// Client for the Figma file nodes endpoint
#[derive(Debug, Clone)]
pub struct FigmaClient {
    config: FigmaConfig,
    http: reqwest::Client,
}

impl FigmaClient {
    pub fn new(config: FigmaConfig) -> FigmaResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;
        Ok(Self { config, http })
    }

    /// URL of the nodes endpoint for a file
    pub fn nodes_url(&self, file_key: &str) -> String {
        format!(
            "{}/v1/files/{}/nodes",
            self.config.api_base.trim_end_matches('/'),
            file_key
        )
    }

    /// Fetch the document subtree rooted at `node_id`
    pub async fn fetch_node(&self, file_key: &str, node_id: &str) -> FigmaResult<DesignNode> {
        let url = self.nodes_url(file_key);
        debug!("GET {} ids={}", url, node_id);

        let request = self.http.get(&url).query(&[("ids", node_id)]);
        let request = if self.config.oauth {
            request.bearer_auth(&self.config.token)
        } else {
            request.header(TOKEN_HEADER, &self.config.token)
        };

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(err) => {
                    warn!("Failed to read Figma error body: {}", err);
                    format!("<unreadable body: {err}>")
                }
            };
            return Err(FigmaError::RemoteFetch {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        let mut data: NodesResponse = serde_json::from_slice(&bytes)?;
        data.nodes
            .remove(node_id)
            .flatten()
            .map(|entry| entry.document)
            .ok_or_else(|| FigmaError::NodeNotFound(node_id.to_string()))
    }

    /// Fetch a node and extract its [`ScreenSpec`]
    pub async fn fetch_screen_spec(
        &self,
        file_key: &str,
        node_id: &str,
        screen_name: Option<&str>,
    ) -> FigmaResult<ScreenSpec> {
        let root = self.fetch_node(file_key, node_id).await?;
        let spec = extract_from_document(&root, screen_name);
        debug!(
            "Figma spec {}: {} texts, {} paddings, {} gaps",
            spec.screen_name,
            spec.texts.len(),
            spec.paddings.len(),
            spec.gaps.len()
        );
        Ok(spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_figma_config_builder() {
        let config = FigmaConfig::new("tok")
            .api_base("http://localhost:9000/")
            .oauth(true)
            .timeout(5);

        assert_eq!(config.token, "tok");
        assert_eq!(config.api_base, "http://localhost:9000/");
        assert!(config.oauth);
        assert_eq!(config.timeout, 5);
        assert!(!format!("{:?}", config).contains("\"tok\""));
    }

    #[test]
    fn test_nodes_url_trims_trailing_slash() {
        let client = FigmaClient::new(FigmaConfig::new("tok").api_base("http://localhost:9000/")).unwrap();
        assert_eq!(client.nodes_url("AbC"), "http://localhost:9000/v1/files/AbC/nodes");
    }

    #[test]
    fn test_remote_fetch_error_message() {
        let err = FigmaError::RemoteFetch {
            status: 403,
            body: "Invalid token".to_string(),
        };
        assert_eq!(err.to_string(), "Figma API error 403: Invalid token");
    }
}
