//! Typed results for the RPC methods whose shape is stable across node
//! versions. Fields the node adds beyond these are kept in `extra`.

use bitcoin::Amount;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::parsing::{deserialize_btc_amount, serialize_btc_amount};

// ==============================================================================
// Chain Info
// ==============================================================================

/// Basic chain information from `getblockchaininfo`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainInfo {
    pub chain: String,
    pub blocks: u64,
    pub headers: u64,
    #[serde(rename = "bestblockhash")]
    pub best_block_hash: String,
    pub difficulty: f64,
    #[serde(rename = "verificationprogress")]
    pub verification_progress: f64,
    #[serde(default)]
    pub pruned: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ==============================================================================
// Network Info
// ==============================================================================

/// Peer-to-peer state from `getnetworkinfo`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkInfo {
    pub version: i64,
    pub subversion: String,
    #[serde(rename = "protocolversion")]
    pub protocol_version: i64,
    pub connections: u32,
    #[serde(
        rename = "relayfee",
        serialize_with = "serialize_btc_amount",
        deserialize_with = "deserialize_btc_amount"
    )]
    pub relay_fee: Amount,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ==============================================================================
// Wallet Info
// ==============================================================================

/// Wallet state from `getwalletinfo`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletInfo {
    #[serde(rename = "walletversion")]
    pub wallet_version: i64,
    #[serde(
        serialize_with = "serialize_btc_amount",
        deserialize_with = "deserialize_btc_amount"
    )]
    pub balance: Amount,
    #[serde(
        serialize_with = "serialize_btc_amount",
        deserialize_with = "deserialize_btc_amount"
    )]
    pub unconfirmed_balance: Amount,
    #[serde(
        serialize_with = "serialize_btc_amount",
        deserialize_with = "deserialize_btc_amount"
    )]
    pub immature_balance: Amount,
    #[serde(rename = "txcount")]
    pub tx_count: u64,
    #[serde(rename = "keypoolsize")]
    pub keypool_size: u64,
    /// Seconds since epoch until which the wallet stays unlocked; `0` when
    /// locked, absent for unencrypted wallets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unlocked_until: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
