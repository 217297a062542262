//! Cloudflare Pages deployment API client
//!
//! Direct upload talks to four endpoints, always in the same order: create a
//! deployment, PUT each file, mark the deployment complete, then fetch it
//! back for the public URL. Every response is the standard Cloudflare JSON
//! envelope (`success` / `errors` / `result`).

use std::io::Read;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::{PageliftError, Result};

pub const DEFAULT_API_BASE: &str = "https://api.cloudflare.com/client/v4";

/// Everything except unreserved characters and the path separator gets
/// percent-encoded in the upload destination.
const DESTINATION: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'/');

/// Required deploy credentials, read from the environment before any
/// network call is made.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub api_token: String,
    pub account_id: String,
}

impl Credentials {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            api_token: require_env("CLOUDFLARE_API_TOKEN")?,
            account_id: require_env("CLOUDFLARE_ACCOUNT_ID")?,
        })
    }
}

fn require_env(name: &str) -> Result<String> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(PageliftError::MissingCredential {
            name: name.to_string(),
        }),
    }
}

/// Cloudflare API JSON envelope.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    success: bool,
    #[serde(default)]
    errors: Vec<ApiMessage>,
    result: Option<T>,
}

#[derive(Debug, Deserialize)]
struct ApiMessage {
    #[serde(default)]
    code: i64,
    message: String,
}

/// Deployment record as returned by the API. Only the fields the CLI
/// consumes are modeled.
#[derive(Debug, Clone, Deserialize)]
pub struct Deployment {
    pub id: String,
    #[serde(default)]
    pub url: Option<String>,
}

/// Blocking client for the Pages deployment endpoints.
pub struct PagesClient {
    agent: ureq::Agent,
    base: String,
    token: String,
    account_id: String,
    project: String,
}

impl PagesClient {
    pub fn new(credentials: &Credentials, project: &str, api_base: Option<&str>) -> Self {
        Self {
            agent: ureq::agent(),
            base: api_base.unwrap_or(DEFAULT_API_BASE).trim_end_matches('/').to_string(),
            token: credentials.api_token.clone(),
            account_id: credentials.account_id.clone(),
            project: project.to_string(),
        }
    }

    fn deployments_url(&self) -> String {
        format!(
            "{}/accounts/{}/pages/projects/{}/deployments",
            self.base, self.account_id, self.project
        )
    }

    /// Create a new deployment record.
    pub fn create_deployment(&self, branch: &str) -> Result<Deployment> {
        let response = self
            .agent
            .post(&self.deployments_url())
            .set("Authorization", &format!("Bearer {}", self.token))
            .send_json(serde_json::json!({ "branch": branch }));
        parse_response("create deployment", response)
    }

    /// Upload a single file. `destination` is the forward-slash relative
    /// path the file will be served under.
    pub fn upload_file(
        &self,
        deployment_id: &str,
        destination: &str,
        content_type: &str,
        body: &[u8],
    ) -> Result<()> {
        let url = format!(
            "{}/{}/files/{}",
            self.deployments_url(),
            deployment_id,
            encode_destination(destination)
        );
        let response = self
            .agent
            .put(&url)
            .set("Authorization", &format!("Bearer {}", self.token))
            .set("Content-Type", content_type)
            .send_bytes(body);

        // Surface which file failed, not just the endpoint
        let _: serde_json::Value =
            parse_response("upload file", response).map_err(|e| match e {
                PageliftError::ApiRejected { status, detail, .. } => PageliftError::UploadFailed {
                    path: destination.to_string(),
                    reason: format!("HTTP {status}: {detail}"),
                },
                PageliftError::ApiRequestFailed { reason, .. } => PageliftError::UploadFailed {
                    path: destination.to_string(),
                    reason,
                },
                other => other,
            })?;
        Ok(())
    }

    /// Mark the deployment complete so Pages publishes it.
    pub fn complete_deployment(&self, deployment_id: &str) -> Result<Deployment> {
        let url = format!("{}/{}/complete", self.deployments_url(), deployment_id);
        let response = self
            .agent
            .post(&url)
            .set("Authorization", &format!("Bearer {}", self.token))
            .send_json(serde_json::json!({}));
        parse_response("complete deployment", response)
    }

    /// Fetch deployment metadata (the public URL in particular).
    pub fn get_deployment(&self, deployment_id: &str) -> Result<Deployment> {
        let url = format!("{}/{}", self.deployments_url(), deployment_id);
        let response = self
            .agent
            .get(&url)
            .set("Authorization", &format!("Bearer {}", self.token))
            .call();
        parse_response("get deployment", response)
    }
}

/// Percent-encode an upload destination, preserving `/` separators.
pub fn encode_destination(destination: &str) -> String {
    utf8_percent_encode(destination, DESTINATION).to_string()
}

fn parse_response<T: DeserializeOwned>(
    endpoint: &str,
    response: std::result::Result<ureq::Response, ureq::Error>,
) -> Result<T> {
    match response {
        Ok(response) => {
            let status = response.status();
            let body = read_body(endpoint, response)?;
            parse_envelope(endpoint, status, &body)
        }
        Err(ureq::Error::Status(status, response)) => {
            let detail = read_body(endpoint, response)
                .ok()
                .and_then(|body| envelope_errors(&body))
                .unwrap_or_else(|| "no error detail in response".to_string());
            Err(PageliftError::ApiRejected {
                endpoint: endpoint.to_string(),
                status,
                detail,
            })
        }
        Err(ureq::Error::Transport(transport)) => Err(PageliftError::ApiRequestFailed {
            endpoint: endpoint.to_string(),
            reason: transport.to_string(),
        }),
    }
}

fn read_body(endpoint: &str, response: ureq::Response) -> Result<String> {
    let mut body = String::new();
    response
        .into_reader()
        .read_to_string(&mut body)
        .map_err(|e| PageliftError::ApiRequestFailed {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        })?;
    Ok(body)
}

fn parse_envelope<T: DeserializeOwned>(endpoint: &str, status: u16, body: &str) -> Result<T> {
    let envelope: Envelope<T> = serde_json::from_str(body)?;
    if !envelope.success {
        return Err(PageliftError::ApiRejected {
            endpoint: endpoint.to_string(),
            status,
            detail: format_errors(&envelope.errors),
        });
    }
    envelope.result.ok_or_else(|| PageliftError::ApiInvalidResponse {
        reason: format!("{endpoint}: success response with no result payload"),
    })
}

fn envelope_errors(body: &str) -> Option<String> {
    let envelope: Envelope<serde_json::Value> = serde_json::from_str(body).ok()?;
    if envelope.errors.is_empty() {
        None
    } else {
        Some(format_errors(&envelope.errors))
    }
}

fn format_errors(errors: &[ApiMessage]) -> String {
    if errors.is_empty() {
        return "API reported failure without error detail".to_string();
    }
    errors
        .iter()
        .map(|e| {
            if e.code != 0 {
                format!("[{}] {}", e.code, e.message)
            } else {
                e.message.clone()
            }
        })
        .collect::<Vec<_>>()
        .join("; ")
}
