//! Orchestrates one logical search: route resolution, request issue,
//! normalization, paging, fan-out, and supersession of in-flight searches.

use std::sync::Mutex;
use std::time::Duration;

use futures::future::join_all;
use reqwest::Client;
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::config::Config;
use crate::errors::SearchError;
use crate::models::filters::FilterDraft;
use crate::models::listing::Listing;
use crate::normalize::{self, ErrorBody};
use crate::query::{self, ResumeAttachment};
use crate::sources::{self, RoleSourceConfig};

const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Result of a search call. `Superseded` means a newer search cancelled
/// this one; the caller must discard it silently, never surface it.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Listings(Vec<Listing>),
    Superseded,
}

/// Client for the job-search backend. At most one search per client is ever
/// logically current: every `search` call cancels the previous in-flight
/// one before issuing requests, so a slow older query can never overwrite a
/// newer one's results.
pub struct AggregationClient {
    http: Client,
    base_url: String,
    /// Cancellation token of the current search. Owned instance state, not
    /// a module global; replaced (and the old one cancelled) on every call.
    current: Mutex<CancellationToken>,
}

impl AggregationClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_timeout(base_url, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn from_config(config: &Config) -> Self {
        Self::with_timeout(
            config.api_base_url.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Self {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .expect("failed to build HTTP client");
        AggregationClient {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            current: Mutex::new(CancellationToken::new()),
        }
    }

    /// Runs one logical search for the draft, optionally forwarding a
    /// resume attachment with every request.
    ///
    /// Cancels any still-pending search from a previous call first. Network
    /// and backend errors propagate; cancellation does not — a superseded
    /// search resolves as `SearchOutcome::Superseded` and its results are
    /// discarded.
    pub async fn search(
        &self,
        draft: &FilterDraft,
        resume: Option<ResumeAttachment>,
    ) -> Result<SearchOutcome, SearchError> {
        let token = self.supersede();
        let result = tokio::select! {
            // Biased so cancellation is observed before a response that
            // became ready in the same poll.
            biased;
            _ = token.cancelled() => return Ok(SearchOutcome::Superseded),
            result = self.run(draft, resume) => result,
        };
        // The response may have been buffered before the cancellation was
        // delivered; a superseded search's completion (success or failure)
        // is discarded either way.
        if token.is_cancelled() {
            return Ok(SearchOutcome::Superseded);
        }
        result.map(SearchOutcome::Listings)
    }

    /// Cancels the current search's token and installs a fresh one.
    fn supersede(&self) -> CancellationToken {
        let fresh = CancellationToken::new();
        let mut slot = self.current.lock().expect("supersession slot poisoned");
        let previous = std::mem::replace(&mut *slot, fresh.clone());
        previous.cancel();
        fresh
    }

    async fn run(
        &self,
        draft: &FilterDraft,
        resume: Option<ResumeAttachment>,
    ) -> Result<Vec<Listing>, SearchError> {
        let configs = sources::configs_for(draft.role_type)?;
        if let [config] = configs.as_slice() {
            return self.fetch_route(config, draft, resume.as_ref()).await;
        }

        // Fan-out: issue every route concurrently and wait for all to
        // settle. Lenient normalizer fallbacks contribute empty lists; any
        // hard error fails the whole call so partial results are never
        // presented as complete.
        let calls = configs
            .iter()
            .map(|config| self.fetch_route(config, draft, resume.as_ref()));
        let settled = join_all(calls).await;
        let mut merged = Vec::new();
        for result in settled {
            merged.extend(result?);
        }
        Ok(merged)
    }

    /// Fetches one route, paging when the effective limit exceeds what the
    /// route accepts per request.
    async fn fetch_route(
        &self,
        config: &RoleSourceConfig,
        draft: &FilterDraft,
        resume: Option<&ResumeAttachment>,
    ) -> Result<Vec<Listing>, SearchError> {
        let limit = draft.limit.unwrap_or(config.default_limit);

        if limit <= config.per_request_cap {
            let mut rows = self.fetch_page(config, draft, limit, None, resume).await?;
            // A backend may over-return; the displayed limit wins.
            rows.truncate(limit as usize);
            return Ok(rows);
        }

        let mut merged: Vec<Listing> = Vec::with_capacity(limit as usize);
        let mut offset = 0u32;
        while (merged.len() as u32) < limit && offset < limit {
            let page_limit = (limit - merged.len() as u32).min(config.per_request_cap);
            let rows = self
                .fetch_page(config, draft, page_limit, Some(offset), resume)
                .await?;
            // A short page means the source is exhausted; stop rather than
            // issue a wasted empty request.
            let exhausted = (rows.len() as u32) < config.per_request_cap;
            merged.extend(rows);
            if exhausted {
                break;
            }
            offset += config.page_step;
        }
        merged.truncate(limit as usize);
        Ok(merged)
    }

    async fn fetch_page(
        &self,
        config: &RoleSourceConfig,
        draft: &FilterDraft,
        page_limit: u32,
        offset: Option<u32>,
        resume: Option<&ResumeAttachment>,
    ) -> Result<Vec<Listing>, SearchError> {
        let url = format!("{}{}", self.base_url, config.route);
        let filters = query::serialize_filters(draft, page_limit, offset);
        debug!(route = config.route, limit = page_limit, ?offset, "issuing search request");

        let request = match resume {
            Some(attachment) => self
                .http
                .post(&url)
                .multipart(query::multipart_body(&filters, attachment)?),
            None => self.http.post(&url).json(&query::json_body(filters)),
        };

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            if let Ok(err) = serde_json::from_str::<ErrorBody>(&body) {
                return Err(SearchError::RemoteQuery(err.user_message()));
            }
            return Err(SearchError::Transport(format!("{url}: HTTP {status}")));
        }

        let value: Value = response.json().await?;
        normalize::normalize(value)
    }
}
