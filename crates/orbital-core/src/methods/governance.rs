//! Governance objects (budget proposals, triggers, watchdogs).

use serde_json::{json, Value};

use crate::error::CoreError;
use crate::rpc::{call, Transport};

option_set! {
    /// Vote signal filter for `gobject list`.
    #[derive(Default)]
    GobjectListSignal {
        #[default]
        All => "all",
        Valid => "valid",
        Funding => "funding",
        Delete => "delete",
        Endorsed => "endorsed",
    }
}

option_set! {
    /// Object type filter for `gobject list`.
    #[derive(Default)]
    GobjectListType {
        #[default]
        All => "all",
        Proposals => "proposals",
        Triggers => "triggers",
        Watchdogs => "watchdogs",
    }
}

pub async fn get_governance_info<T: Transport + ?Sized>(rpc: &T) -> Result<Value, CoreError> {
    call(rpc, "getgovernanceinfo", Vec::new()).await
}

async fn gobject<T: Transport + ?Sized>(rpc: &T, params: Vec<Value>) -> Result<Value, CoreError> {
    call(rpc, "gobject", params).await
}

pub async fn get<T: Transport + ?Sized>(rpc: &T, hash: &str) -> Result<Value, CoreError> {
    gobject(rpc, vec![json!("get"), json!(hash)]).await
}

pub async fn get_votes<T: Transport + ?Sized>(rpc: &T, hash: &str) -> Result<Value, CoreError> {
    gobject(rpc, vec![json!("getvotes"), json!(hash)]).await
}

/// Decode a hex-serialized governance object into JSON.
pub async fn deserialize<T: Transport + ?Sized>(
    rpc: &T,
    hex_string: &str,
) -> Result<Value, CoreError> {
    gobject(rpc, vec![json!("deserialize"), json!(hex_string)]).await
}

pub async fn count<T: Transport + ?Sized>(rpc: &T) -> Result<Value, CoreError> {
    gobject(rpc, vec![json!("count")]).await
}

pub async fn list<T: Transport + ?Sized>(
    rpc: &T,
    signal: GobjectListSignal,
    object_type: GobjectListType,
) -> Result<Value, CoreError> {
    gobject(
        rpc,
        vec![json!("list"), json!(signal.as_str()), json!(object_type.as_str())],
    )
    .await
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::rpc::mock::MockTransport;

    #[tokio::test]
    async fn list_sends_signal_then_type() {
        let rpc = MockTransport::builder()
            .with_result("gobject", json!({}))
            .build();
        list(&rpc, GobjectListSignal::Funding, GobjectListType::Proposals)
            .await
            .expect("list");
        assert_eq!(
            rpc.calls()[0].params,
            vec![json!("list"), json!("funding"), json!("proposals")]
        );
    }

    #[tokio::test]
    async fn get_and_votes_pass_hash() {
        let rpc = MockTransport::builder()
            .with_result("gobject", json!({"Hash": "ab"}))
            .with_result("gobject", json!({}))
            .build();
        get(&rpc, "ab").await.expect("object");
        get_votes(&rpc, "ab").await.expect("votes");
        let calls = rpc.calls();
        assert_eq!(calls[0].params, vec![json!("get"), json!("ab")]);
        assert_eq!(calls[1].params, vec![json!("getvotes"), json!("ab")]);
    }

    #[test]
    fn list_filters_parse_from_strings() {
        assert_eq!("endorsed".parse::<GobjectListSignal>(), Ok(GobjectListSignal::Endorsed));
        assert_eq!("watchdogs".parse::<GobjectListType>(), Ok(GobjectListType::Watchdogs));
        assert!("proposal".parse::<GobjectListType>().is_err());
    }

    #[tokio::test]
    async fn default_filters_list_everything() {
        let rpc = MockTransport::builder()
            .with_result("gobject", json!({}))
            .build();
        list(&rpc, GobjectListSignal::default(), GobjectListType::default())
            .await
            .expect("list");
        assert_eq!(
            rpc.calls()[0].params,
            vec![json!("list"), json!("all"), json!("all")]
        );
    }
}
