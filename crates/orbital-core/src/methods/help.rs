use serde_json::json;

use crate::error::CoreError;
use crate::rpc::{call_as, Transport};

/// Usage text for `method`, or the full command list when `method` is empty.
pub async fn help<T: Transport + ?Sized>(rpc: &T, method: &str) -> Result<String, CoreError> {
    call_as(rpc, "help", vec![json!(method)]).await
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::rpc::mock::MockTransport;

    #[tokio::test]
    async fn help_returns_usage_text() {
        let rpc = MockTransport::builder()
            .with_result("help", json!("getblockcount\n\nReturns the number of blocks"))
            .build();
        let text = help(&rpc, "getblockcount").await.expect("help text");
        assert!(text.starts_with("getblockcount"));
        assert_eq!(rpc.calls()[0].params, vec![json!("getblockcount")]);
    }
}
