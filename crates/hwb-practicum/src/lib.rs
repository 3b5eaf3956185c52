//! Yandex Practicum adapter (homework review statuses).
//!
//! Implements the `hwb-core` ReviewApi port over the `homework_statuses` endpoint.

use std::time::Duration;

use async_trait::async_trait;

use hwb_core::{domain::Cursor, errors::Error, ports::ReviewApi, Result};

#[derive(Clone)]
pub struct PracticumClient {
    endpoint: String,
    token: String,
    http: reqwest::Client,
}

impl PracticumClient {
    pub fn new(
        endpoint: impl Into<String>,
        token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Config(format!("http client build failed: {e}")))?;
        Ok(Self {
            endpoint: endpoint.into(),
            token: token.into(),
            http,
        })
    }
}

#[async_trait]
impl ReviewApi for PracticumClient {
    async fn fetch(&self, from_date: Cursor) -> Result<serde_json::Value> {
        let resp = self
            .http
            .get(&self.endpoint)
            .header(reqwest::header::AUTHORIZATION, format!("OAuth {}", self.token))
            .query(&[("from_date", from_date.0)])
            .send()
            .await
            .map_err(|e| Error::Transport(format!("request to {} failed: {e}", self.endpoint)))?;

        // The body of an error response is not part of the contract; don't read it.
        if !resp.status().is_success() {
            return Err(Error::Access {
                status: resp.status().as_u16(),
                endpoint: self.endpoint.clone(),
            });
        }

        let body = resp
            .bytes()
            .await
            .map_err(|e| Error::Transport(format!("reading response body failed: {e}")))?;

        tracing::debug!(bytes = body.len(), %from_date, "review API answered");

        serde_json::from_slice(&body).map_err(|e| Error::MalformedPayload(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::TcpListener,
        task::JoinHandle,
    };

    /// Serve exactly one canned HTTP response; the join handle yields the raw request.
    async fn serve_once(status_line: &str, body: &str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let response = format!(
            "HTTP/1.1 {status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );

        let handle = tokio::spawn(async move {
            let (mut sock, _) = listener.accept().await.unwrap();
            let mut buf = Vec::new();
            let mut chunk = [0u8; 1024];
            while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = sock.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
            }
            sock.write_all(response.as_bytes()).await.ok();
            sock.shutdown().await.ok();
            String::from_utf8_lossy(&buf).into_owned()
        });

        (format!("http://{addr}/api/user_api/homework_statuses/"), handle)
    }

    fn client(endpoint: &str) -> PracticumClient {
        PracticumClient::new(endpoint, "secret-token", Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn sends_oauth_header_and_from_date() {
        let (endpoint, server) =
            serve_once("200 OK", r#"{"homeworks": [], "current_date": 1000}"#).await;

        let body = client(&endpoint).fetch(Cursor(1_700_000_000)).await.unwrap();
        assert_eq!(body["current_date"], 1000);

        let request = server.await.unwrap();
        assert!(request.starts_with(
            "GET /api/user_api/homework_statuses/?from_date=1700000000 HTTP/1.1"
        ));
        assert!(request
            .to_lowercase()
            .contains("authorization: oauth secret-token"));
    }

    #[tokio::test]
    async fn non_success_status_is_access_error() {
        let (endpoint, server) = serve_once("503 Service Unavailable", "not json at all").await;

        match client(&endpoint).fetch(Cursor(0)).await {
            Err(Error::Access { status, endpoint: e }) => {
                assert_eq!(status, 503);
                assert_eq!(e, endpoint);
            }
            other => panic!("unexpected: {other:?}"),
        }
        server.await.unwrap();
    }

    #[tokio::test]
    async fn invalid_json_is_malformed_payload() {
        let (endpoint, server) = serve_once("200 OK", "<html>maintenance</html>").await;

        let err = client(&endpoint).fetch(Cursor(0)).await.unwrap_err();
        assert!(matches!(err, Error::MalformedPayload(_)));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn unreachable_host_is_transport_error() {
        // Bind then drop to get a port nobody listens on.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client(&format!("http://{addr}/"))
            .fetch(Cursor(0))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Transport(_)));
    }
}
