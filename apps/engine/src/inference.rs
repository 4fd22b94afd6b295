//! Client for the resume-parsing inference service.
//!
//! The service consumes a resume binary and returns suggested filters per
//! role category. Its payload shape is owned remotely; this engine only
//! ever consumes the keys in the reconciler's mapping table.

use reqwest::multipart::{Form, Part};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use crate::config::Config;
use crate::errors::SearchError;
use crate::models::inference::InferencePayload;
use crate::normalize::ErrorBody;
use crate::query::ResumeAttachment;

const DEFAULT_TIMEOUT_SECS: u64 = 120;

pub struct InferenceClient {
    http: Client,
    url: String,
}

impl InferenceClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_timeout(url, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn from_config(config: &Config) -> Self {
        Self::with_timeout(
            config.inference_url.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    fn with_timeout(url: impl Into<String>, timeout: Duration) -> Self {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .expect("failed to build HTTP client");
        InferenceClient {
            http,
            url: url.into(),
        }
    }

    /// Uploads the resume and returns the inferred per-role filter
    /// suggestions. The caller feeds the payload to the reconciler.
    pub async fn parse_resume(
        &self,
        attachment: &ResumeAttachment,
    ) -> Result<InferencePayload, SearchError> {
        let part = Part::bytes(attachment.bytes.to_vec())
            .file_name(attachment.file_name.clone())
            .mime_str("application/pdf")?;
        let form = Form::new().part("resume", part);

        debug!(file = %attachment.file_name, "uploading resume for parsing");
        let response = self.http.post(&self.url).multipart(form).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            if let Ok(err) = serde_json::from_str::<ErrorBody>(&body) {
                return Err(SearchError::RemoteQuery(err.user_message()));
            }
            return Err(SearchError::Transport(format!(
                "resume parsing failed: HTTP {status}"
            )));
        }

        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn attachment() -> ResumeAttachment {
        ResumeAttachment::new("resume.pdf", &b"%PDF-1.4 fake"[..])
    }

    #[tokio::test]
    async fn test_parse_resume_returns_payload() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/resume"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "jobs": {"title_filter": "data engineer"},
                "internships": {"title_filter": "data intern"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = InferenceClient::new(format!("{}/resume", server.uri()));
        let payload = client.parse_resume(&attachment()).await.unwrap();
        assert!(payload.jobs.is_some());
        assert!(payload.internships.is_some());
        assert!(payload.yc_jobs.is_none());
    }

    #[tokio::test]
    async fn test_structured_error_maps_to_remote_query() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/resume"))
            .respond_with(
                ResponseTemplate::new(422)
                    .set_body_json(json!({"code": "UNREADABLE", "message": "not a pdf"})),
            )
            .mount(&server)
            .await;

        let client = InferenceClient::new(format!("{}/resume", server.uri()));
        let err = client.parse_resume(&attachment()).await.unwrap_err();
        match err {
            SearchError::RemoteQuery(msg) => assert_eq!(msg, "not a pdf"),
            other => panic!("expected RemoteQuery, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unstructured_failure_maps_to_transport() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/resume"))
            .respond_with(ResponseTemplate::new(500).set_body_string("oops"))
            .mount(&server)
            .await;

        let client = InferenceClient::new(format!("{}/resume", server.uri()));
        let err = client.parse_resume(&attachment()).await.unwrap_err();
        assert!(matches!(err, SearchError::Transport(_)));
    }
}
