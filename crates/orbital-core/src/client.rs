use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::NodeConfig;
use crate::error::CoreError;
use crate::methods::{blockchain, network, wallet};
use crate::rpc::{ChainInfo, HttpTransport, NetworkInfo, RawReply, ResponseMode, Transport, WalletInfo};

/// A client bound to one node.
///
/// Owns the configuration, the transport and the connectivity flag. The flag
/// tracks whether the node answered the most recent call with HTTP 200,
/// even if that answer carried an RPC error; it is only written by
/// [`Transport::raw_call`] and [`Node::is_online`].
///
/// `Node` is itself a [`Transport`], so every function in
/// [`crate::methods`] and [`crate::funding`] accepts it directly.
pub struct Node<T = HttpTransport> {
    config: NodeConfig,
    transport: T,
    valid_node: AtomicBool,
}

/// Snapshot returned by [`Node::all_node_info`]. Each part fails on its own.
#[derive(Debug)]
pub struct NodeInfo {
    pub blockchain: Result<ChainInfo, CoreError>,
    pub network: Result<NetworkInfo, CoreError>,
    pub wallet: Result<WalletInfo, CoreError>,
}

impl Node<HttpTransport> {
    pub fn new(config: NodeConfig) -> Result<Self, CoreError> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self::with_transport(config, transport))
    }

    /// Build the client and probe the node once. An unreachable node is
    /// logged, not treated as an error; check [`Node::is_valid_node`].
    pub async fn connect(config: NodeConfig) -> Result<Self, CoreError> {
        let node = Self::new(config)?;
        debug!(node = %node.config.name, version = node.api_version(), "connecting node");
        if node.is_online().await {
            info!(node = %node.config.name, ticker = %node.config.ticker, "node is online");
        } else {
            warn!(node = %node.config.name, "node did not answer getblockcount");
        }
        Ok(node)
    }
}

impl<T: Transport> Node<T> {
    pub fn with_transport(config: NodeConfig, transport: T) -> Self {
        Self {
            config,
            transport,
            valid_node: AtomicBool::new(false),
        }
    }

    pub fn config(&self) -> &NodeConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Connectivity as of the last call, without contacting the node.
    pub fn is_valid_node(&self) -> bool {
        self.valid_node.load(Ordering::Relaxed)
    }

    /// Probe the node with `getblockcount`. Any failure, including an empty
    /// result, counts as offline.
    pub async fn is_online(&self) -> bool {
        let online = blockchain::get_block_count(self).await.is_ok();
        self.valid_node.store(online, Ordering::Relaxed);
        online
    }

    pub async fn all_node_info(&self) -> NodeInfo {
        NodeInfo {
            blockchain: blockchain::get_blockchain_info(self).await,
            network: network::get_network_info(self).await,
            wallet: wallet::get_wallet_info(self).await,
        }
    }

    pub fn api_version(&self) -> &'static str {
        env!("CARGO_PKG_VERSION")
    }
}

#[async_trait]
impl<T: Transport> Transport for Node<T> {
    async fn raw_call(&self, method: &str, params: Vec<Value>, mode: ResponseMode) -> RawReply {
        let reply = self.transport.raw_call(method, params, mode).await;
        self.valid_node.store(reply.http_ok(), Ordering::Relaxed);
        reply
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::error::RpcError;
    use crate::rpc::mock::MockTransport;
    use crate::test_util::{closed_port, FakeNode};

    fn node_with(transport: MockTransport) -> Node<MockTransport> {
        Node::with_transport(NodeConfig::default(), transport)
    }

    #[tokio::test]
    async fn is_online_true_when_block_count_returned() {
        let node = node_with(
            MockTransport::builder()
                .with_result("getblockcount", json!(1_050_203))
                .build(),
        );
        assert!(!node.is_valid_node());
        assert!(node.is_online().await);
        assert!(node.is_valid_node());
    }

    #[tokio::test]
    async fn is_online_false_on_empty_result() {
        let node = node_with(
            MockTransport::builder()
                .with_result("getblockcount", Value::Null)
                .build(),
        );
        assert!(!node.is_online().await);
        assert!(!node.is_valid_node());
    }

    #[tokio::test]
    async fn is_online_false_on_transport_failure() {
        let node = node_with(
            MockTransport::builder()
                .with_error("getblockcount", RpcError::Transport("connection refused".into()))
                .build(),
        );
        assert!(!node.is_online().await);
    }

    #[tokio::test]
    async fn flag_follows_the_latest_reply() {
        let node = node_with(
            MockTransport::builder()
                .with_result("getdifficulty", json!(1.0))
                .with_error("getdifficulty", RpcError::Http { status: 401 })
                .build(),
        );

        blockchain::get_difficulty(&node).await.expect("first call succeeds");
        assert!(node.is_valid_node());

        blockchain::get_difficulty(&node)
            .await
            .expect_err("second call fails");
        assert!(!node.is_valid_node());
    }

    #[tokio::test]
    async fn all_node_info_reports_each_part() {
        let node = node_with(
            MockTransport::builder()
                .with_result(
                    "getblockchaininfo",
                    json!({
                        "chain": "main",
                        "blocks": 10,
                        "headers": 10,
                        "bestblockhash": "00",
                        "difficulty": 1.0,
                        "verificationprogress": 1.0
                    }),
                )
                .with_error("getnetworkinfo", RpcError::EmptyResult)
                .with_error(
                    "getwalletinfo",
                    RpcError::ServerError {
                        code: -18,
                        message: "wallet disabled".into(),
                    },
                )
                .build(),
        );

        let info = node.all_node_info().await;
        assert_eq!(info.blockchain.expect("chain info").blocks, 10);
        assert!(info.network.is_err());
        assert_eq!(info.wallet.expect_err("wallet disabled").server_code(), Some(-18));
    }

    #[tokio::test]
    async fn connect_marks_reachable_node_valid() {
        let fake = FakeNode::start(200, r#"{"result":1050203,"error":null}"#).await;
        let node = Node::connect(fake.config()).await.expect("config is valid");
        assert!(node.is_valid_node());
        assert_eq!(node.api_version(), env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn rpc_error_over_http_200_keeps_node_valid() {
        let fake = FakeNode::start(
            200,
            r#"{"result":null,"error":{"code":-1,"message":"masternode not found"}}"#,
        )
        .await;
        let node = Node::new(fake.config()).expect("config is valid");

        let err = crate::rpc::call(&node, "masternode", vec![serde_json::json!("status")])
            .await
            .expect_err("node reported an error");
        assert_eq!(err.server_code(), Some(-1));
        assert!(node.is_valid_node());
    }

    #[tokio::test]
    async fn non_200_answer_clears_flag() {
        let fake = FakeNode::start(
            500,
            r#"{"result":null,"error":{"code":-8,"message":"Block height out of range"}}"#,
        )
        .await;
        let node = Node::new(fake.config()).expect("config is valid");

        crate::rpc::call(&node, "getblockhash", vec![serde_json::json!(99_999_999)])
            .await
            .expect_err("node reported an error");
        assert!(!node.is_valid_node());
    }

    #[tokio::test]
    async fn connect_to_closed_port_is_not_an_error() {
        let config = NodeConfig {
            port: closed_port().await,
            ..NodeConfig::default()
        };
        let node = Node::connect(config).await.expect("config is valid");
        assert!(!node.is_valid_node());
    }

    #[test]
    fn new_rejects_partial_credentials() {
        let config = NodeConfig {
            user: Some("alice".into()),
            ..NodeConfig::default()
        };
        assert!(matches!(Node::new(config), Err(CoreError::Config(_))));
    }
}
