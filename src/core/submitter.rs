// src/core/submitter.rs

use crate::core::error::WorkflowError;
use crate::core::models::{AnalysisResult, PendingFile};
use reqwest::multipart::{Form, Part};
use tracing::{debug, error, info, warn};
use url::Url;

/// Name of the multipart field carrying the image.
pub const FILE_FIELD: &str = "file";

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Sends pending files to the analysis endpoint.
///
/// One `Submitter` is shared by every upload of a session; the underlying
/// `reqwest::Client` pools connections. No timeout is configured: a request
/// resolves, fails, or waits for as long as the transport lets it.
#[derive(Debug, Clone)]
pub struct Submitter {
    client: reqwest::Client,
    endpoint: Url,
}

impl Submitter {
    pub fn new(endpoint: Url) -> Result<Self, WorkflowError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| {
                error!(error = %e, "Failed to build HTTP client for uploads.");
                WorkflowError::NetworkFailure(e)
            })?;
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Uploads one file and parses the analysis.
    ///
    /// Transport errors map to `NetworkFailure`, non-2xx statuses to
    /// `ServerFailure`, and bodies that are not the expected JSON shape to
    /// `MalformedResponse`.
    pub async fn submit(&self, file: &PendingFile) -> Result<AnalysisResult, WorkflowError> {
        info!(name = %file.name, bytes = file.len(), endpoint = %self.endpoint, "Submitting file for analysis.");

        let part = Part::bytes(file.bytes.to_vec())
            .file_name(file.name.clone())
            .mime_str(&file.media_type)
            .map_err(WorkflowError::NetworkFailure)?;
        let form = Form::new().part(FILE_FIELD, part);

        let response = match self.client.post(self.endpoint.clone()).multipart(form).send().await {
            Ok(res) => res,
            Err(e) => {
                error!(endpoint = %self.endpoint, error = %e, "Upload request failed.");
                return Err(WorkflowError::NetworkFailure(e));
            }
        };

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "Analysis service rejected the upload.");
            return Err(WorkflowError::ServerFailure(status));
        }

        let body = response.bytes().await.map_err(|e| {
            error!(error = %e, "Failed to read analysis response body.");
            WorkflowError::NetworkFailure(e)
        })?;
        debug!(%status, body_len = body.len(), "Received analysis response.");

        match serde_json::from_slice::<AnalysisResult>(&body) {
            Ok(result) => {
                info!(product = %result.product, prices = result.prices.len(), "Analysis received.");
                Ok(result)
            }
            Err(e) => {
                warn!(error = %e, "Analysis response did not match the expected shape.");
                Err(WorkflowError::MalformedResponse(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    const SAMPLE_BODY: &str = r#"{
        "product": "Running Shoe",
        "prices": [
            {"site": "Amazon", "price": 29.99, "rating": 4.5},
            {"site": "Myntra", "price": 33.1, "rating": 4.1}
        ],
        "sentiment": {"score": 0.82, "reviews": ["Great quality!", "Perfect fit!"]}
    }"#;

    fn shoe() -> PendingFile {
        PendingFile::new("shoe.png", "image/png", b"PNG fake payload".to_vec())
    }

    fn submitter_for(server: &mockito::Server) -> Submitter {
        let endpoint = Url::parse(&format!("{}/upload", server.url())).unwrap();
        Submitter::new(endpoint).unwrap()
    }

    #[tokio::test]
    async fn posts_multipart_file_field_and_parses_result() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/upload")
            .match_header("content-type", Matcher::Regex("^multipart/form-data; boundary=".into()))
            .match_body(Matcher::AllOf(vec![
                Matcher::Regex(r#"name="file"; filename="shoe.png""#.into()),
                Matcher::Regex("(?i)content-type: image/png".into()),
                Matcher::Regex("fake payload".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(SAMPLE_BODY)
            .create_async()
            .await;

        let result = submitter_for(&server).submit(&shoe()).await.unwrap();

        mock.assert_async().await;
        assert_eq!(result.product, "Running Shoe");
        assert_eq!(result.prices.len(), 2);
        assert_eq!(result.prices[1].site, "Myntra");
        assert_eq!(result.sentiment.reviews, vec!["Great quality!", "Perfect fit!"]);
    }

    #[tokio::test]
    async fn non_success_status_is_a_server_failure() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/upload")
            .with_status(500)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error": "model unavailable"}"#)
            .create_async()
            .await;

        let outcome = submitter_for(&server).submit(&shoe()).await;
        assert!(matches!(outcome, Err(WorkflowError::ServerFailure(s)) if s.as_u16() == 500));
    }

    #[tokio::test]
    async fn wrong_shape_is_a_malformed_response() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/upload")
            .with_status(200)
            .with_body(r#"{"product": "Running Shoe"}"#)
            .create_async()
            .await;

        let outcome = submitter_for(&server).submit(&shoe()).await;
        assert!(matches!(outcome, Err(WorkflowError::MalformedResponse(_))));
    }

    #[tokio::test]
    async fn non_json_body_is_a_malformed_response() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/upload")
            .with_status(200)
            .with_body("<html>oops</html>")
            .create_async()
            .await;

        let outcome = submitter_for(&server).submit(&shoe()).await;
        assert!(matches!(outcome, Err(WorkflowError::MalformedResponse(_))));
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_a_network_failure() {
        // Port 9 (discard) on loopback is closed in test environments.
        let submitter = Submitter::new(Url::parse("http://127.0.0.1:9/upload").unwrap()).unwrap();
        let outcome = submitter.submit(&shoe()).await;
        assert!(matches!(outcome, Err(WorkflowError::NetworkFailure(_))));
    }
}
