//! reqwest-backed [`SubmissionTransport`]
//!
//! POSTs the payload as JSON. By default the response is treated as opaque:
//! any request that completes counts as delivered, whatever the status code.
//! Set `require_success_status` to treat non-2xx responses as failures.

use async_trait::async_trait;
use survey_application::{SubmissionTransport, TransportError};
use survey_domain::SubmissionPayload;
use tokio_util::sync::CancellationToken;
use tracing::debug;

const USER_AGENT: &str = concat!("survey-relay/", env!("CARGO_PKG_VERSION"));

/// HTTP(S) transport for survey submissions
pub struct HttpSubmissionTransport {
    client: reqwest::Client,
    require_success_status: bool,
}

impl HttpSubmissionTransport {
    pub fn new() -> Self {
        Self::with_client(reqwest::Client::new())
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self {
            client,
            require_success_status: false,
        }
    }

    pub fn require_success_status(mut self, require: bool) -> Self {
        self.require_success_status = require;
        self
    }

    fn classify(error: &reqwest::Error) -> TransportError {
        if error.is_connect() || error.is_request() || error.is_timeout() {
            TransportError::Network(error.to_string())
        } else {
            TransportError::Other(error.to_string())
        }
    }
}

impl Default for HttpSubmissionTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SubmissionTransport for HttpSubmissionTransport {
    async fn send(
        &self,
        endpoint: &str,
        payload: &SubmissionPayload,
        cancel: CancellationToken,
    ) -> Result<(), TransportError> {
        let request = self
            .client
            .post(endpoint)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .json(payload)
            .send();

        let response = tokio::select! {
            _ = cancel.cancelled() => return Err(TransportError::Cancelled),
            result = request => result.map_err(|e| Self::classify(&e))?,
        };

        let status = response.status();
        debug!("Endpoint answered {}", status);

        if self.require_success_status && !status.is_success() {
            return Err(TransportError::Other(format!(
                "HTTP {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::time::Duration;
    use survey_domain::{Question, Questionnaire, RankAssignmentStore, RankLabel, normalize};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};

    fn payload() -> SubmissionPayload {
        let questionnaire =
            Questionnaire::new(vec![Question::new("q1", "Pick", vec!["A".into(), "B".into()])])
                .unwrap();
        let store = RankAssignmentStore::new(&questionnaire).assign("q1", 1, RankLabel::One);
        normalize(&questionnaire, &store, BTreeMap::new(), "thanks".to_string())
    }

    /// Read one HTTP request (headers plus Content-Length body).
    async fn read_request(stream: &mut TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = stream.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
            let text = String::from_utf8_lossy(&buf).to_string();
            if let Some(header_end) = text.find("\r\n\r\n") {
                let content_length = text[..header_end]
                    .lines()
                    .find_map(|line| {
                        let lower = line.to_ascii_lowercase();
                        lower
                            .strip_prefix("content-length:")
                            .map(|v| v.trim().parse::<usize>().unwrap())
                    })
                    .unwrap_or(0);
                if buf.len() >= header_end + 4 + content_length {
                    return text;
                }
            }
        }
        String::from_utf8_lossy(&buf).to_string()
    }

    async fn serve_once(status_line: &'static str) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/submit", listener.local_addr().unwrap());
        let server = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let request = read_request(&mut stream).await;
            let response = format!("{status_line}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n");
            stream.write_all(response.as_bytes()).await.unwrap();
            request
        });
        (url, server)
    }

    #[tokio::test]
    async fn test_posts_json_payload() {
        let (url, server) = serve_once("HTTP/1.1 200 OK").await;
        let transport = HttpSubmissionTransport::new();

        transport
            .send(&url, &payload(), CancellationToken::new())
            .await
            .unwrap();

        let request = server.await.unwrap();
        let lower = request.to_ascii_lowercase();
        assert!(request.starts_with("POST /submit"));
        assert!(lower.contains("content-type: application/json"));
        assert!(request.contains("\"finalComment\":\"thanks\""));
        assert!(request.contains("\"q1\":{\"0\":\"No\",\"1\":\"1\"}"));
    }

    #[tokio::test]
    async fn test_error_status_is_opaque_by_default() {
        let (url, _server) = serve_once("HTTP/1.1 500 Internal Server Error").await;
        let transport = HttpSubmissionTransport::new();

        assert!(
            transport
                .send(&url, &payload(), CancellationToken::new())
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_error_status_fails_when_required() {
        let (url, _server) = serve_once("HTTP/1.1 500 Internal Server Error").await;
        let transport = HttpSubmissionTransport::new().require_success_status(true);

        let err = transport
            .send(&url, &payload(), CancellationToken::new())
            .await
            .unwrap_err();
        assert_eq!(
            err,
            TransportError::Other("HTTP 500 Internal Server Error".to_string())
        );
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/submit", listener.local_addr().unwrap());
        drop(listener);

        let err = HttpSubmissionTransport::new()
            .send(&url, &payload(), CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, TransportError::Network(_)));
    }

    #[tokio::test]
    async fn test_refused_connection_reaches_user_as_network_message() {
        use std::sync::Arc;
        use survey_application::{
            DeliveryPipeline, DeliveryPolicy, SubmitSurveyInput, SubmitSurveyUseCase,
        };
        use survey_domain::submission::classifier::NETWORK_MESSAGE;

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/submit", listener.local_addr().unwrap());
        drop(listener);

        let questionnaire = Arc::new(
            Questionnaire::new(vec![Question::new("q1", "Pick", vec!["A".into()])]).unwrap(),
        );
        let store = RankAssignmentStore::new(&questionnaire).assign("q1", 0, RankLabel::No);
        let pipeline = DeliveryPipeline::new(Arc::new(HttpSubmissionTransport::new())).with_policy(
            DeliveryPolicy::default()
                .with_max_retries(2)
                .with_initial_retry_delay(Duration::from_millis(10)),
        );
        let use_case = SubmitSurveyUseCase::new(questionnaire, pipeline, Some(url));

        let err = use_case
            .execute(SubmitSurveyInput::new(store, "thanks"))
            .await
            .unwrap_err();

        assert_eq!(err.user_message(), NETWORK_MESSAGE);
    }

    #[tokio::test]
    async fn test_cancellation_aborts_stalled_request() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/submit", listener.local_addr().unwrap());
        let _server = tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            // never answer
            tokio::time::sleep(Duration::from_secs(30)).await;
            drop(stream);
        });

        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            trigger.cancel();
        });

        let err = HttpSubmissionTransport::new()
            .send(&url, &payload(), cancel)
            .await
            .unwrap_err();
        assert_eq!(err, TransportError::Cancelled);
    }
}
