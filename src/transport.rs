// Copyright (c) 2024-2026, Daily
//
// SPDX-License-Identifier: BSD-2-Clause

//! HTTP transport collaborator.
//!
//! The client never talks to the network directly; it hands every signed
//! request to a [`Transport`]. The default implementation is backed by
//! `reqwest` with connection pooling, so repeated requests to the same host
//! reuse a live connection. Timeouts live here, not in the client -- the core
//! imposes no network policy of its own and propagates transport failures
//! unchanged.

use async_trait::async_trait;

use crate::error::{IvonaError, Result};

/// What the transport got back from the service.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body.
    pub body: Vec<u8>,
}

/// A collaborator able to deliver one authenticated POST request.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send `body` to `url` with the given headers and return the response.
    ///
    /// A non-2xx status is not an error at this layer; delivery failures
    /// (connect, TLS, read) are [`IvonaError::Transport`].
    async fn post(
        &self,
        url: &str,
        headers: &[(String, String)],
        body: Vec<u8>,
    ) -> Result<TransportResponse>;
}

/// Default transport backed by a pooled `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Request timeout.
    pub const TIMEOUT: std::time::Duration = std::time::Duration::from_secs(30);
    /// Connect timeout.
    pub const CONNECT_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(10);

    /// Create a transport with the default timeouts.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(Self::TIMEOUT)
                .connect_timeout(Self::CONNECT_TIMEOUT)
                .build()
                .expect("failed to build HTTP client"),
        }
    }

    /// Use a caller-supplied `reqwest::Client` (custom proxy, TLS, timeouts).
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn post(
        &self,
        url: &str,
        headers: &[(String, String)],
        body: Vec<u8>,
    ) -> Result<TransportResponse> {
        let mut request = self.client.post(url);
        for (name, value) in headers {
            request = request.header(name.as_str(), value.as_str());
        }
        let response = request
            .body(body)
            .send()
            .await
            .map_err(|e| IvonaError::Transport(Box::new(e)))?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| IvonaError::Transport(Box::new(e)))?;
        Ok(TransportResponse {
            status,
            body: body.to_vec(),
        })
    }
}
