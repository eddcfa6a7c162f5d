use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::RpcError;

use super::{RawReply, ResponseMode, Transport};

/// One call observed by [`MockTransport`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub method: String,
    pub params: Vec<Value>,
    pub mode: ResponseMode,
}

/// A scripted transport for testing. Replies are queued per method via the
/// builder and handed out in order; every call is recorded. A call with no
/// reply left gets a transport failure.
pub struct MockTransport {
    replies: Mutex<HashMap<String, VecDeque<RawReply>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockTransport {
    pub fn builder() -> MockTransportBuilder {
        MockTransportBuilder {
            replies: HashMap::new(),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().expect("mock call log poisoned").clone()
    }

    pub fn methods(&self) -> Vec<String> {
        self.calls().into_iter().map(|call| call.method).collect()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().expect("mock call log poisoned").len()
    }
}

pub struct MockTransportBuilder {
    replies: HashMap<String, VecDeque<RawReply>>,
}

impl MockTransportBuilder {
    pub fn with_reply(mut self, method: &str, reply: RawReply) -> Self {
        self.replies
            .entry(method.to_owned())
            .or_default()
            .push_back(reply);
        self
    }

    pub fn with_result(self, method: &str, result: Value) -> Self {
        self.with_reply(method, RawReply::json(result))
    }

    pub fn with_error(self, method: &str, error: RpcError) -> Self {
        self.with_reply(method, RawReply::failure(error))
    }

    pub fn build(self) -> MockTransport {
        MockTransport {
            replies: Mutex::new(self.replies),
            calls: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn raw_call(&self, method: &str, params: Vec<Value>, mode: ResponseMode) -> RawReply {
        self.calls
            .lock()
            .expect("mock call log poisoned")
            .push(RecordedCall {
                method: method.to_owned(),
                params,
                mode,
            });

        self.replies
            .lock()
            .expect("mock replies poisoned")
            .get_mut(method)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| {
                RawReply::failure(RpcError::Transport(format!(
                    "no scripted reply for `{method}`"
                )))
            })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn replies_are_served_in_order_then_exhausted() {
        let rpc = MockTransport::builder()
            .with_result("getblockcount", json!(1))
            .with_result("getblockcount", json!(2))
            .build();

        let first = rpc.raw_call("getblockcount", Vec::new(), ResponseMode::Json).await;
        let second = rpc.raw_call("getblockcount", Vec::new(), ResponseMode::Json).await;
        let third = rpc.raw_call("getblockcount", Vec::new(), ResponseMode::Json).await;

        assert_eq!(first, RawReply::json(json!(1)));
        assert_eq!(second, RawReply::json(json!(2)));
        assert!(matches!(third.error, Some(RpcError::Transport(_))));
        assert_eq!(rpc.call_count(), 3);
    }

    #[tokio::test]
    async fn records_params_and_mode() {
        let rpc = MockTransport::builder().build();
        rpc.raw_call("masternode", vec![json!("list-conf")], ResponseMode::Binary)
            .await;

        assert_eq!(
            rpc.calls(),
            vec![RecordedCall {
                method: "masternode".to_owned(),
                params: vec![json!("list-conf")],
                mode: ResponseMode::Binary,
            }]
        );
    }
}
