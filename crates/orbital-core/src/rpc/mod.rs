//! Node RPC abstraction layer.
//!
//! Defines the [`Transport`] trait, the raw reply envelope every call
//! produces, and [`process_result`], which turns that envelope into a
//! `Result`. [`HttpTransport`] is the JSON-RPC over HTTP implementation;
//! `mock::MockTransport` scripts replies for tests.

mod http_adapter;
#[cfg(test)]
pub mod mock;
pub(crate) mod parsing;
pub mod types;

pub use http_adapter::HttpTransport;
pub use types::{ChainInfo, NetworkInfo, WalletInfo};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{CoreError, RpcError};

// ==============================================================================
// Reply Envelope
// ==============================================================================

/// How the body of a successful response should be handed back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseMode {
    /// Decode the JSON-RPC envelope and return its `result`.
    #[default]
    Json,
    /// Return the raw response body untouched.
    Binary,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Json(Value),
    Binary(Vec<u8>),
}

impl Payload {
    /// A JSON `null` carries nothing; a binary body always counts.
    fn is_present(&self) -> bool {
        match self {
            Self::Json(value) => !value.is_null(),
            Self::Binary(_) => true,
        }
    }

    pub fn into_json(self) -> Value {
        match self {
            Self::Json(value) => value,
            Self::Binary(bytes) => Value::String(String::from_utf8_lossy(&bytes).into_owned()),
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Self::Json(Value::String(s)) => s.into_bytes(),
            Self::Json(value) => value.to_string().into_bytes(),
            Self::Binary(bytes) => bytes,
        }
    }
}

/// Outcome of one transport call before normalization.
///
/// Transport failures never escape as `Err`: they land in `error` with
/// `result` left empty. A node-side error may still come with a `result`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawReply {
    pub result: Option<Payload>,
    pub error: Option<RpcError>,
    /// HTTP status of the node's answer; `None` when no response arrived.
    pub status: Option<u16>,
}

impl RawReply {
    /// A 200 answer carrying `payload`.
    pub fn success(payload: Payload) -> Self {
        Self {
            result: Some(payload),
            error: None,
            status: Some(200),
        }
    }

    pub fn json(value: Value) -> Self {
        Self::success(Payload::Json(value))
    }

    /// No usable answer. The status stays unset; add one with
    /// [`RawReply::with_status`] when the node did respond.
    pub fn failure(error: RpcError) -> Self {
        Self {
            result: None,
            error: Some(error),
            status: None,
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Whether the node answered with HTTP 200, whatever the body said.
    pub fn http_ok(&self) -> bool {
        self.status == Some(200)
    }
}

/// Normalize a raw reply.
///
/// A present, non-null `result` wins. Otherwise the reply's error is
/// returned, falling back to [`RpcError::EmptyResult`] when the node sent
/// neither.
pub fn process_result(reply: RawReply) -> Result<Payload, CoreError> {
    match reply.result {
        Some(payload) if payload.is_present() => Ok(payload),
        _ => Err(reply.error.unwrap_or(RpcError::EmptyResult).into()),
    }
}

// ==============================================================================
// Transport
// ==============================================================================

/// A single JSON-RPC round trip to a node.
///
/// Implementations handle endpoint, authentication and body decoding
/// internally and must fold every failure into the returned [`RawReply`].
#[async_trait]
pub trait Transport: Send + Sync {
    async fn raw_call(&self, method: &str, params: Vec<Value>, mode: ResponseMode) -> RawReply;
}

/// Call `method` and return its JSON result.
pub async fn call<T>(rpc: &T, method: &str, params: Vec<Value>) -> Result<Value, CoreError>
where
    T: Transport + ?Sized,
{
    let reply = rpc.raw_call(method, params, ResponseMode::Json).await;
    process_result(reply).map(Payload::into_json)
}

/// Call `method` and decode its result into `D`.
pub async fn call_as<D, T>(rpc: &T, method: &str, params: Vec<Value>) -> Result<D, CoreError>
where
    D: DeserializeOwned,
    T: Transport + ?Sized,
{
    let value = call(rpc, method, params).await?;
    decode_result(method, value)
}

/// Call `method` and return the raw response body.
pub async fn call_binary<T>(
    rpc: &T,
    method: &str,
    params: Vec<Value>,
) -> Result<Vec<u8>, CoreError>
where
    T: Transport + ?Sized,
{
    let reply = rpc.raw_call(method, params, ResponseMode::Binary).await;
    process_result(reply).map(Payload::into_bytes)
}

pub(crate) fn decode_result<D: DeserializeOwned>(method: &str, value: Value) -> Result<D, CoreError> {
    serde_json::from_value(value).map_err(|e| {
        RpcError::InvalidResponse(format!("invalid {method} result: {e}")).into()
    })
}
