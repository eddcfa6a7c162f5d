use std::num::NonZeroU32;

use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use reqwest::header;
use serde_json::Value;
use tracing::{debug, trace, warn};

use crate::config::NodeConfig;
use crate::error::{CoreError, RpcError};
use crate::rpc::{RawReply, ResponseMode, Transport};

use super::protocol::{reply_from_response, JsonRpcRequest};

/// Nodes of this family only accept `text/plain` bodies on the RPC port.
const CONTENT_TYPE: &str = "text/plain;";

type DirectRateLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// JSON-RPC client for a single node over HTTP(S) with basic auth.
///
/// Every outcome, including connection failures, is folded into a
/// [`RawReply`]; nothing is retried.
pub struct HttpTransport {
    client: reqwest::Client,
    url: String,
    auth: Option<(String, String)>,
    request_id: String,
    name: String,
    limiter: Option<DirectRateLimiter>,
}

impl HttpTransport {
    /// Build a transport from a validated configuration.
    ///
    /// If `requests_per_second` is set, each outbound HTTP request waits for
    /// a permit from an in-process limiter. Timeouts apply only when set in
    /// the config.
    pub fn new(config: &NodeConfig) -> Result<Self, CoreError> {
        let url = config.endpoint()?;
        let auth = config.resolve_auth()?;

        let mut builder = reqwest::Client::builder().tcp_nodelay(true);
        if let Some(timeout) = config.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| CoreError::Config(format!("build HTTP client: {e}")))?;

        let limiter = match config.requests_per_second {
            None => None,
            Some(limit) => {
                let limit = NonZeroU32::new(limit).ok_or_else(|| {
                    CoreError::Config("requests_per_second must be at least 1".to_owned())
                })?;
                Some(RateLimiter::direct(Quota::per_second(limit)))
            }
        };

        Ok(Self {
            client,
            url,
            auth,
            request_id: config.request_id(),
            name: config.name.clone(),
            limiter,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn wait_for_rate_limit(&self) {
        if let Some(limiter) = &self.limiter {
            limiter.until_ready().await;
        }
    }

    async fn send(
        &self,
        method: &str,
        params: &[Value],
        mode: ResponseMode,
    ) -> Result<RawReply, RpcError> {
        self.wait_for_rate_limit().await;
        let req = JsonRpcRequest {
            jsonrpc: "2.0",
            id: &self.request_id,
            method,
            params,
        };

        let mut builder = self
            .client
            .post(&self.url)
            .header(header::CONTENT_TYPE, CONTENT_TYPE)
            .json(&req);
        if let Some((ref user, ref pass)) = self.auth {
            builder = builder.basic_auth(user, Some(pass));
        }

        let response = builder
            .send()
            .await
            .map_err(|e| RpcError::Transport(e.to_string()))?;
        let status = response.status();

        let body = response
            .bytes()
            .await
            .map_err(|e| RpcError::Transport(format!("read response body: {e}")))?;
        debug!(rpc.method = method, %status, body_len = body.len(), "rpc response");
        trace!(rpc.method = method, body = %String::from_utf8_lossy(&body), "rpc response body");

        Ok(reply_from_response(status.as_u16(), body.to_vec(), mode))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn raw_call(&self, method: &str, params: Vec<Value>, mode: ResponseMode) -> RawReply {
        let binary = mode == ResponseMode::Binary;
        debug!(
            node = %self.name,
            rpc.method = method,
            rpc.params = ?params,
            rpc.binary = binary,
            "rpc call"
        );

        match self.send(method, &params, mode).await {
            Ok(reply) => reply,
            Err(err) => {
                warn!(node = %self.name, rpc.method = method, error = %err, "rpc transport failure");
                RawReply::failure(err)
            }
        }
    }
}
