//! # HTTP Client
//!
//! The [`CheckService`] trait is the seam between the UI and the remote
//! checking service. [`HttpCheckService`] is the production implementation;
//! tests substitute their own.
//!
//! | Operation | Endpoint | Body |
//! |-----------|----------|------|
//! | [`CheckService::fetch_rules`] | `GET /get_rules` | none |
//! | [`CheckService::check`] | `POST /check` | JSON `{ text, rules }` |
//! | [`CheckService::upload`] | `POST /upload` | multipart `file` + `rules`* |

use crate::checker::model::{CheckRequest, CheckResult, Rule, ServerError, UploadRequest};
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Default base URL of the checking service
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Operations offered by the remote checking service.
#[async_trait]
pub trait CheckService: Send + Sync {
    /// Fetch the full list of available rules.
    async fn fetch_rules(&self) -> Result<Vec<Rule>>;

    /// Check a piece of text against the given rules.
    async fn check(&self, request: &CheckRequest) -> Result<CheckResult>;

    /// Upload a file and check its contents. The response is returned as the
    /// service sent it; normalization happens in the dispatcher.
    async fn upload(&self, request: &UploadRequest) -> Result<CheckResult>;
}

/// [`CheckService`] backed by `reqwest`.
pub struct HttpCheckService {
    base_url: Url,
    http_client: reqwest::Client,
}

impl HttpCheckService {
    pub fn new(base_url: &str) -> Result<Self> {
        let mut base_url = Url::parse(base_url)
            .with_context(|| format!("Invalid server URL: {}", base_url))?;
        // Url::join replaces the last path segment unless the path ends in '/'
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let http_client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            base_url,
            http_client,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .with_context(|| format!("Failed to build URL for {}", path))
    }
}

#[async_trait]
impl CheckService for HttpCheckService {
    async fn fetch_rules(&self) -> Result<Vec<Rule>> {
        let url = self.endpoint("get_rules")?;
        tracing::debug!(%url, "fetching rules");

        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .context("Failed to send rules request")?;

        read_json(response, "rules").await
    }

    async fn check(&self, request: &CheckRequest) -> Result<CheckResult> {
        let url = self.endpoint("check")?;
        tracing::debug!(%url, rules = request.rules.len(), "checking text");

        let response = self
            .http_client
            .post(url)
            .json(request)
            .send()
            .await
            .context("Failed to send check request")?;

        read_json(response, "check").await
    }

    async fn upload(&self, request: &UploadRequest) -> Result<CheckResult> {
        let url = self.endpoint("upload")?;
        let bytes = tokio::fs::read(&request.path)
            .await
            .with_context(|| format!("Failed to read file: {}", request.path.display()))?;
        let file_name = request
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload.txt".to_string());
        tracing::debug!(%url, file = %file_name, size = bytes.len(), "uploading file");

        let mut form = Form::new().part("file", Part::bytes(bytes).file_name(file_name));
        for rule in &request.rules {
            form = form.text("rules", rule.clone());
        }

        let response = self
            .http_client
            .post(url)
            .multipart(form)
            .send()
            .await
            .context("Failed to send upload request")?;

        read_json(response, "upload").await
    }
}

async fn read_json<T: DeserializeOwned>(response: reqwest::Response, what: &str) -> Result<T> {
    let status = response.status();
    let body = response
        .text()
        .await
        .with_context(|| format!("Failed to read {} response", what))?;
    parse_response(status, &body, what)
}

/// Decode a response body, turning a `{ "error": ... }` body on a failed
/// status into an error carrying the service's message.
pub(crate) fn parse_response<T: DeserializeOwned>(
    status: StatusCode,
    body: &str,
    what: &str,
) -> Result<T> {
    if !status.is_success() {
        if let Ok(server_error) = serde_json::from_str::<ServerError>(body) {
            bail!("{}", server_error.error);
        }
        bail!("{} request failed with status {}", what, status);
    }

    serde_json::from_str(body).with_context(|| format!("Failed to parse {} response", what))
}
