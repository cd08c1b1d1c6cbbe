//! HTTP client for the analysis backend

use crate::constants::{ANALYZE_PATH, HEALTH_PATH, UPLOAD_PATH};
use crate::error::{RequestFailure, RequestStage};
use crate::types::*;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

/// The two calls the workflow depends on, plus a reachability probe.
///
/// Carried as `Arc<dyn Backend>` so tests can script responses.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Returns the server-assigned resume id.
    async fn upload_resume(&self, doc: &SelectedDocument) -> Result<String, RequestFailure>;

    async fn analyze(
        &self,
        resume_id: &str,
        job_description: &str,
    ) -> Result<AnalysisResult, RequestFailure>;

    async fn health(&self) -> BackendHealth;
}

pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("resume-match/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|e| {
                warn!(error = %e, "Failed to build HTTP client, using defaults");
                reqwest::Client::new()
            });
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request and decode the body according to the status.
    async fn exchange<T: DeserializeOwned>(
        &self,
        stage: RequestStage,
        request: reqwest::RequestBuilder,
    ) -> Result<T, RequestFailure> {
        let response = request.send().await.map_err(|e| {
            warn!(error = %e, ?stage, "Request did not reach the server");
            RequestFailure::new(stage, None)
        })?;
        let status = response.status();
        let body = response.bytes().await.map_err(|e| {
            warn!(error = %e, ?stage, %status, "Failed to read response body");
            RequestFailure::new(stage, None)
        })?;
        debug!(?stage, %status, bytes = body.len(), "Response received");
        decode_response(stage, status, &body)
    }
}

fn content_type(extension: &str) -> &'static str {
    match extension {
        "pdf" => "application/pdf",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "doc" => "application/msword",
        "txt" => "text/plain",
        _ => "application/octet-stream",
    }
}

/// Map status + body to either the decoded payload or a failure carrying the
/// server's `error` field when there is one.
pub fn decode_response<T: DeserializeOwned>(
    stage: RequestStage,
    status: StatusCode,
    body: &[u8],
) -> Result<T, RequestFailure> {
    if status.is_success() {
        return serde_json::from_slice(body).map_err(|e| {
            warn!(error = %e, ?stage, "Malformed success body");
            RequestFailure::new(stage, None)
        });
    }
    let message = serde_json::from_slice::<ErrorBody>(body)
        .unwrap_or_default()
        .error;
    warn!(?stage, %status, message = message.as_deref().unwrap_or(""), "Backend returned an error");
    Err(RequestFailure::new(stage, message))
}

#[async_trait]
impl Backend for HttpBackend {
    async fn upload_resume(&self, doc: &SelectedDocument) -> Result<String, RequestFailure> {
        let stage = RequestStage::Upload;
        let part = Part::bytes(doc.payload.clone())
            .file_name(doc.name.clone())
            .mime_str(content_type(&doc.extension))
            .map_err(|e| {
                warn!(error = %e, "Invalid content type for upload");
                RequestFailure::new(stage, None)
            })?;
        let form = Form::new().part("file", part);
        let request = self.client.post(self.url(UPLOAD_PATH)).multipart(form);
        let body: UploadResponse = self.exchange(stage, request).await?;
        Ok(body.resume_id)
    }

    async fn analyze(
        &self,
        resume_id: &str,
        job_description: &str,
    ) -> Result<AnalysisResult, RequestFailure> {
        let payload = AnalyzeRequest {
            resume_id,
            job_description,
        };
        let request = self.client.post(self.url(ANALYZE_PATH)).json(&payload);
        let body: AnalyzeResponse = self.exchange(RequestStage::Analyze, request).await?;
        Ok(body.analysis)
    }

    async fn health(&self) -> BackendHealth {
        match self.client.get(self.url(HEALTH_PATH)).send().await {
            Ok(response) if response.status().is_success() => {
                let status = response
                    .json::<HealthResponse>()
                    .await
                    .map(|h| h.status)
                    .unwrap_or_default();
                debug!(status = %status, "Health probe succeeded");
                BackendHealth::Online
            }
            Ok(response) => {
                warn!(status = %response.status(), "Health probe failed");
                BackendHealth::Offline
            }
            Err(e) => {
                warn!(error = %e, "Backend unreachable");
                BackendHealth::Offline
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_success_yields_resume_id() {
        let body: UploadResponse =
            decode_response(RequestStage::Upload, StatusCode::OK, br#"{"resume_id":"abc"}"#).unwrap();
        assert_eq!(body.resume_id, "abc");
    }

    #[test]
    fn server_error_message_is_kept_verbatim() {
        let err = decode_response::<UploadResponse>(
            RequestStage::Upload,
            StatusCode::INTERNAL_SERVER_ERROR,
            br#"{"error":"disk full"}"#,
        )
        .unwrap_err();
        assert_eq!(err.user_message(), "disk full");
    }

    #[test]
    fn error_without_message_uses_fallback() {
        let err = decode_response::<AnalyzeResponse>(
            RequestStage::Analyze,
            StatusCode::BAD_REQUEST,
            b"<html>bad gateway</html>",
        )
        .unwrap_err();
        assert_eq!(err.user_message(), "Analysis failed");

        let err = decode_response::<UploadResponse>(RequestStage::Upload, StatusCode::BAD_REQUEST, b"{}")
            .unwrap_err();
        assert_eq!(err.user_message(), "Upload failed");
    }

    #[test]
    fn malformed_success_body_is_a_failure() {
        let err = decode_response::<AnalyzeResponse>(RequestStage::Analyze, StatusCode::OK, b"{\"analysis\":42}")
            .unwrap_err();
        assert_eq!(err.message, None);
        assert_eq!(err.stage, RequestStage::Analyze);
    }

    #[test]
    fn analyze_request_wire_shape() {
        let json = serde_json::to_value(AnalyzeRequest {
            resume_id: "abc",
            job_description: "Rust engineer",
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({"resume_id": "abc", "job_description": "Rust engineer"}));
    }

    #[test]
    fn base_url_is_normalised() {
        let backend = HttpBackend::new("http://localhost:5000/", Duration::from_secs(5));
        assert_eq!(backend.url(UPLOAD_PATH), "http://localhost:5000/api/upload-resume");
    }
}
