//! Answer service reached over HTTP.
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument};
use url::Url;

use crate::config::ServiceConfig;
use crate::service::{AnswerService, AskError, AskRequest, AskResponse};

/// Longest error body kept in an [`AskError::Status`], in characters.
const MAX_ERROR_BODY_CHARS: usize = 300;

/// Cuts `body` to [`MAX_ERROR_BODY_CHARS`] on a char boundary, marking the
/// cut with an ellipsis.
fn truncate_body(mut body: String) -> String {
    if let Some((end, _)) = body.char_indices().nth(MAX_ERROR_BODY_CHARS) {
        body.truncate(end);
        body.push('…');
    }
    body
}

/// Posts questions as JSON to `<endpoint>/ask`.
#[derive(Debug, Clone)]
pub struct HttpAnswerService {
    ask_url: Url,
    client: Client,
}

impl HttpAnswerService {
    pub fn from_config(config: &ServiceConfig) -> Result<Self> {
        let ask_url = config.ask_url()?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to build HTTP client")?;

        Ok(Self { ask_url, client })
    }

    pub fn ask_url(&self) -> &Url {
        &self.ask_url
    }
}

#[async_trait]
impl AnswerService for HttpAnswerService {
    #[instrument(skip_all)]
    async fn ask(&self, query: &str) -> Result<String, AskError> {
        debug!(url = %self.ask_url, query_len = query.len(), "Sending question");

        // `json` sets `Content-Type: application/json`
        let response = self
            .client
            .post(self.ask_url.clone())
            .json(&AskRequest { query })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        debug!(status = status.as_u16(), body_len = body.len(), "Received reply");

        if !status.is_success() {
            return Err(AskError::Status {
                status: status.as_u16(),
                body: truncate_body(body),
            });
        }

        let reply: AskResponse = serde_json::from_str(&body)?;
        reply.into_answer()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn service_for(server: &MockServer) -> HttpAnswerService {
        HttpAnswerService::from_config(&ServiceConfig::new(server.uri())).unwrap()
    }

    #[test]
    fn test_from_config() {
        let service =
            HttpAnswerService::from_config(&ServiceConfig::new("https://example.com")).unwrap();
        assert_eq!(service.ask_url().as_str(), "https://example.com/ask");
    }

    #[test]
    fn test_from_invalid_config() {
        let service = HttpAnswerService::from_config(&ServiceConfig::new("mailto:me@example.com"));
        assert!(service.is_err());
        assert!(
            service
                .unwrap_err()
                .to_string()
                .contains("must use http or https")
        );
    }

    #[tokio::test]
    async fn test_ask_success() {
        // Arrange
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/ask"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({ "query": "capital of France?" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "answer": "Paris" })))
            .expect(1)
            .mount(&server)
            .await;
        let service = service_for(&server).await;

        // Act
        let answer = service.ask("capital of France?").await.unwrap();

        // Assert
        assert_eq!(answer, "Paris");
    }

    #[tokio::test]
    async fn test_ask_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/ask"))
            .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
            .mount(&server)
            .await;
        let service = service_for(&server).await;

        let err = service.ask("anything").await.unwrap_err();

        assert!(matches!(err, AskError::Status { status: 500, .. }));
        assert!(err.to_string().contains("Internal Server Error"));
    }

    #[tokio::test]
    async fn test_ask_status_error_truncates_long_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/ask"))
            .respond_with(ResponseTemplate::new(502).set_body_string("x".repeat(200_000)))
            .mount(&server)
            .await;
        let service = service_for(&server).await;

        let err = service.ask("anything").await.unwrap_err();

        match &err {
            AskError::Status { status, body } => {
                assert_eq!(*status, 502);
                assert_eq!(body.chars().count(), MAX_ERROR_BODY_CHARS + 1);
                assert!(body.ends_with('…'));
            }
            other => panic!("Expected status error, got {other:?}"),
        }
        assert!(err.to_string().len() < 1_000);
    }

    #[test]
    fn test_truncate_body_respects_char_boundaries() {
        let short = "Bad Gateway".to_string();
        assert_eq!(truncate_body(short.clone()), short);

        let exact = "é".repeat(MAX_ERROR_BODY_CHARS);
        assert_eq!(truncate_body(exact.clone()), exact);

        let long = "é".repeat(MAX_ERROR_BODY_CHARS + 5);
        let cut = truncate_body(long);
        assert_eq!(cut, format!("{}…", "é".repeat(MAX_ERROR_BODY_CHARS)));
    }

    #[tokio::test]
    async fn test_ask_non_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/ask"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;
        let service = service_for(&server).await;

        let err = service.ask("anything").await.unwrap_err();

        assert!(matches!(err, AskError::Decode(_)));
    }

    #[tokio::test]
    async fn test_ask_missing_answer() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/ask"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "result": "Paris" })))
            .mount(&server)
            .await;
        let service = service_for(&server).await;

        let err = service.ask("anything").await.unwrap_err();

        assert!(matches!(err, AskError::MissingAnswer));
    }

    #[tokio::test]
    async fn test_ask_connection_refused() {
        // Bind then drop a listener to get a port nothing listens on
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let service =
            HttpAnswerService::from_config(&ServiceConfig::new(format!("http://{addr}"))).unwrap();

        let err = service.ask("anything").await.unwrap_err();

        assert!(matches!(err, AskError::Transport(_)));
        assert!(err.to_string().contains("error sending request"));
    }
}
