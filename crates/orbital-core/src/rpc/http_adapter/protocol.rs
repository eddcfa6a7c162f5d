use serde_json::Value;

use crate::error::RpcError;
use crate::rpc::{Payload, RawReply, ResponseMode};

#[derive(serde::Serialize)]
pub(super) struct JsonRpcRequest<'a> {
    pub(super) jsonrpc: &'static str,
    pub(super) id: &'a str,
    pub(super) method: &'a str,
    pub(super) params: &'a [Value],
}

#[derive(serde::Deserialize)]
pub(super) struct JsonRpcResponse {
    #[serde(default)]
    pub(super) result: Option<Value>,
    #[serde(default)]
    pub(super) error: Option<Value>,
}

/// Turn an HTTP status and body into a [`RawReply`] stamped with `status`.
///
/// - 200 in binary mode hands back the body as-is.
/// - 200 in JSON mode returns the envelope's `result`.
/// - Any other status keeps whatever `result` the envelope carries and
///   surfaces its `error`. A non-JSON body (e.g. the empty 401 a node sends
///   on bad credentials) becomes [`RpcError::Http`].
pub(super) fn reply_from_response(status: u16, body: Vec<u8>, mode: ResponseMode) -> RawReply {
    decode_reply(status, body, mode).with_status(status)
}

fn decode_reply(status: u16, body: Vec<u8>, mode: ResponseMode) -> RawReply {
    if status == 200 && mode == ResponseMode::Binary {
        return RawReply::success(Payload::Binary(body));
    }

    let decoded: JsonRpcResponse = match serde_json::from_slice(&body) {
        Ok(decoded) => decoded,
        Err(_) if status != 200 => return RawReply::failure(RpcError::Http { status }),
        Err(e) => {
            return RawReply::failure(RpcError::InvalidResponse(format!(
                "decode JSON-RPC response: {e}; body={}",
                String::from_utf8_lossy(&body)
            )));
        }
    };

    let error = match decoded.error {
        Some(err) if !err.is_null() => Some(parse_jsonrpc_error(err)),
        _ if status != 200 => Some(RpcError::Http { status }),
        _ => None,
    };

    RawReply {
        result: Some(Payload::Json(decoded.result.unwrap_or(Value::Null))),
        error,
        status: None,
    }
}

/// Parse a JSON-RPC error value into a structured `RpcError`.
///
/// JSON-RPC 2.0 defines errors as `{"code": <int>, "message": <string>}`.
/// If the error value matches that shape, we produce a `ServerError`;
/// otherwise we fall back to `InvalidResponse` with the raw JSON.
pub(super) fn parse_jsonrpc_error(err: Value) -> RpcError {
    #[derive(serde::Deserialize)]
    struct JsonRpcError {
        code: i64,
        message: String,
    }

    match serde_json::from_value::<JsonRpcError>(err.clone()) {
        Ok(parsed) => RpcError::ServerError {
            code: parsed.code,
            message: parsed.message,
        },
        Err(_) => RpcError::InvalidResponse(format!("non-standard JSON-RPC error: {err}")),
    }
}
