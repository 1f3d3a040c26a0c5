//! Language metrics gateway over the host analytics REST API.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use langboard_core::{LangboardError, ProjectLanguageAnalytics};
use reqwest::Client;

/// Default request timeout for analytics calls, in seconds.
///
/// The host API performs no retries and this gateway adds none; the timeout
/// bounds how long a hung remote call can block a load.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const API_VERSION: &str = "7.1-preview.1";

/// A resolved organization/project pair to fetch analytics for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectContext {
    /// Organization base URL without a trailing slash.
    pub org_url: String,
    /// Project name or identifier.
    pub project: String,
}

/// Resolve the project context from CLI/environment values.
///
/// Fails with an initialization error when either half is absent or blank,
/// before any network call is attempted.
pub fn resolve_project_context(
    org_url: Option<&str>,
    project: Option<&str>,
) -> Result<ProjectContext, LangboardError> {
    let org_url = org_url
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| {
            LangboardError::Initialization("no organization URL in context".to_string())
        })?;
    let project = project
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| LangboardError::Initialization("no project could be resolved".to_string()))?;

    Ok(ProjectContext {
        org_url: org_url.trim_end_matches('/').to_string(),
        project: project.to_string(),
    })
}

/// Remote analytics retrieval capability.
pub trait AnalyticsClient {
    /// Fetch the per-repository language analytics for a project.
    fn project_language_analytics<'a>(
        &'a self,
        project: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<ProjectLanguageAnalytics, LangboardError>> + 'a>>;
}

/// Reqwest-backed analytics client for the project analysis endpoint.
pub struct RestAnalyticsClient {
    client: Client,
    org_url: String,
    token: Option<String>,
}

impl RestAnalyticsClient {
    /// Build a client against an organization base URL.
    ///
    /// The optional personal access token is sent as basic auth on every
    /// request; the timeout applies per request.
    pub fn new(
        org_url: &str,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, LangboardError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|error| LangboardError::Initialization(error.to_string()))?;
        Ok(Self {
            client,
            org_url: org_url.trim_end_matches('/').to_string(),
            token,
        })
    }
}

impl AnalyticsClient for RestAnalyticsClient {
    fn project_language_analytics<'a>(
        &'a self,
        project: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<ProjectLanguageAnalytics, LangboardError>> + 'a>> {
        Box::pin(fetch_language_analytics(
            &self.client,
            &self.org_url,
            self.token.as_deref(),
            project,
        ))
    }
}

async fn fetch_language_analytics(
    client: &Client,
    org_url: &str,
    token: Option<&str>,
    project: &str,
) -> Result<ProjectLanguageAnalytics, LangboardError> {
    let url = format!(
        "{org_url}/{project}/_apis/projectanalysis/languagemetrics?api-version={API_VERSION}"
    );
    let mut request = client.get(&url);
    if let Some(token) = token {
        request = request.basic_auth("", Some(token));
    }

    let response = request
        .send()
        .await
        .map_err(|error| LangboardError::Fetch(error.to_string()))?;
    let status = response.status();
    if !status.is_success() {
        return Err(LangboardError::Fetch(format!(
            "analytics request returned status {status}"
        )));
    }

    response
        .json::<ProjectLanguageAnalytics>()
        .await
        .map_err(|error| LangboardError::Fetch(error.to_string()))
}
