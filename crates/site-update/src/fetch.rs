//! Network retrieval of version strings and release archives
//!
//! Both operations are single-shot: no retry, no backoff. Callers decide
//! what to do with a failure. The text fetch carries a bounded timeout that
//! aborts the in-flight request; the binary fetch deliberately does not
//! (large archives over slow links would trip any fixed bound).

use std::time::Duration;

use bytes::BytesMut;
use futures_util::StreamExt;
use tracing::debug;

use crate::error::{Result, UpdateError};

/// Timeout applied to version feed requests
pub const TEXT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

const USER_AGENT: &str = concat!("site-update/", env!("CARGO_PKG_VERSION"));

/// A successful fetch: the decoded body plus the status code it came with
#[derive(Debug)]
pub struct TextResponse {
    pub status: u16,
    pub body: String,
}

/// HTTP client for the release host
pub struct UpdateClient {
    client: reqwest::Client,
    text_timeout: Duration,
}

impl UpdateClient {
    /// Create a client with the default feed timeout
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| UpdateError::Transport {
                url: String::new(),
                detail: format!("failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            text_timeout: TEXT_FETCH_TIMEOUT,
        })
    }

    /// Override the feed timeout (used by tests)
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.text_timeout = timeout;
        self
    }

    /// Fetch a plain-text resource (version feeds)
    ///
    /// Fails with `UnexpectedStatus` on anything other than 200, and with a
    /// classified transport error otherwise. A request exceeding the
    /// timeout is aborted, not left in flight.
    pub async fn fetch_text(&self, url: &str) -> Result<TextResponse> {
        debug!("GET {} (timeout {:?})", url, self.text_timeout);

        let response = self
            .client
            .get(url)
            .timeout(self.text_timeout)
            .send()
            .await
            .map_err(|e| classify(url, e))?;

        let status = response.status().as_u16();
        if status != 200 {
            return Err(UpdateError::UnexpectedStatus {
                code: status,
                url: url.to_string(),
            });
        }

        let body = response.text().await.map_err(|e| classify(url, e))?;
        Ok(TextResponse { status, body })
    }

    /// Fetch a binary resource (release archives), accumulated in memory
    pub async fn fetch_binary(&self, url: &str) -> Result<Vec<u8>> {
        debug!("GET {} (binary)", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| classify(url, e))?;

        let status = response.status().as_u16();
        if status != 200 {
            return Err(UpdateError::UnexpectedStatus {
                code: status,
                url: url.to_string(),
            });
        }

        let mut body = BytesMut::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| classify(url, e))?;
            body.extend_from_slice(&chunk);
        }

        debug!("fetched {} bytes from {}", body.len(), url);
        Ok(body.to_vec())
    }
}

/// Map a reqwest error onto the transport error taxonomy
///
/// Connection-level causes hide behind hyper in the error source chain, so
/// walk it looking for an `io::Error` with a recognizable kind.
fn classify(url: &str, err: reqwest::Error) -> UpdateError {
    if err.is_timeout() {
        return UpdateError::Timeout {
            url: url.to_string(),
        };
    }

    let mut source = std::error::Error::source(&err);
    while let Some(cause) = source {
        if let Some(io) = cause.downcast_ref::<std::io::Error>() {
            match io.kind() {
                std::io::ErrorKind::ConnectionReset => {
                    return UpdateError::ConnectionReset {
                        url: url.to_string(),
                    }
                }
                std::io::ErrorKind::ConnectionRefused => {
                    return UpdateError::ConnectionRefused {
                        url: url.to_string(),
                    }
                }
                _ => {}
            }
        }
        source = cause.source();
    }

    UpdateError::Transport {
        url: url.to_string(),
        detail: err.to_string(),
    }
}
