use serde_json::{json, Value};

use crate::error::CoreError;
use crate::rpc::{call, call_as, Transport};

/// Detailed information about an in-wallet transaction.
pub async fn get_transaction<T: Transport + ?Sized>(
    rpc: &T,
    txid: &str,
) -> Result<Value, CoreError> {
    call(rpc, "gettransaction", vec![json!(txid)]).await
}

/// Window over the wallet's transaction history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListTransactionsQuery {
    /// `"*"` for every account.
    pub account: String,
    pub count: u32,
    /// Number of most recent transactions to skip.
    pub skip: u32,
    pub include_watch_only: bool,
}

impl Default for ListTransactionsQuery {
    fn default() -> Self {
        Self {
            account: "*".to_owned(),
            count: 10,
            skip: 0,
            include_watch_only: false,
        }
    }
}

pub async fn list_transactions<T: Transport + ?Sized>(
    rpc: &T,
    query: &ListTransactionsQuery,
) -> Result<Vec<Value>, CoreError> {
    call_as(
        rpc,
        "listtransactions",
        vec![
            json!(query.account),
            json!(query.count),
            json!(query.skip),
            json!(query.include_watch_only),
        ],
    )
    .await
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::rpc::mock::MockTransport;

    #[tokio::test]
    async fn list_transactions_uses_defaults() {
        let rpc = MockTransport::builder()
            .with_result("listtransactions", json!([{"txid": "aa"}, {"txid": "bb"}]))
            .build();

        let txs = list_transactions(&rpc, &ListTransactionsQuery::default())
            .await
            .expect("list must decode");

        assert_eq!(txs.len(), 2);
        assert_eq!(
            rpc.calls()[0].params,
            vec![json!("*"), json!(10), json!(0), json!(false)]
        );
    }

    #[tokio::test]
    async fn get_transaction_sends_txid() {
        let rpc = MockTransport::builder()
            .with_result("gettransaction", json!({"amount": 1.0}))
            .build();
        get_transaction(&rpc, "abcd").await.expect("tx");
        assert_eq!(rpc.calls()[0].params, vec![json!("abcd")]);
    }
}
