//! `masternode`, `masternodelist` and `mnsync` sub-commands.

use serde_json::{json, Value};

use crate::error::CoreError;
use crate::rpc::{call, call_as, call_binary, Transport};

option_set! {
    /// Filters accepted by `masternode count`.
    MasternodeCountOption {
        All => "all",
        Ps => "ps",
        Enabled => "enabled",
        Qualify => "qualify",
    }
}

option_set! {
    /// Which configured masternodes `masternode start-<mode>` starts.
    #[derive(Default)]
    MasternodeStartMode {
        #[default]
        All => "all",
        Missing => "missing",
        Disabled => "disabled",
    }
}

option_set! {
    /// Column selected by `masternodelist`.
    #[derive(Default)]
    MasternodeListMode {
        ActiveSeconds => "activeseconds",
        Addr => "addr",
        Full => "full",
        Info => "info",
        LastPaidBlock => "lastpaidblock",
        LastPaidTime => "lastpaidtime",
        LastSeen => "lastseen",
        Payee => "payee",
        Protocol => "protocol",
        PubKey => "pubkey",
        Rank => "rank",
        #[default]
        Status => "status",
    }
}

async fn masternode<T: Transport + ?Sized>(rpc: &T, params: Vec<Value>) -> Result<Value, CoreError> {
    call(rpc, "masternode", params).await
}

/// Number of known masternodes, optionally narrowed by `option`.
pub async fn count<T: Transport + ?Sized>(
    rpc: &T,
    option: Option<MasternodeCountOption>,
) -> Result<Value, CoreError> {
    let mut params = vec![json!("count")];
    if let Some(option) = option {
        params.push(json!(option.as_str()));
    }
    masternode(rpc, params).await
}

/// The masternode expected to be paid in the next block.
pub async fn current<T: Transport + ?Sized>(rpc: &T) -> Result<Value, CoreError> {
    masternode(rpc, vec![json!("current")]).await
}

/// Wallet outputs usable as masternode collateral.
pub async fn outputs<T: Transport + ?Sized>(rpc: &T) -> Result<Value, CoreError> {
    masternode(rpc, vec![json!("outputs")]).await
}

pub async fn status<T: Transport + ?Sized>(rpc: &T) -> Result<Value, CoreError> {
    masternode(rpc, vec![json!("status")]).await
}

/// A new masternode private key.
pub async fn genkey<T: Transport + ?Sized>(rpc: &T) -> Result<String, CoreError> {
    call_as(rpc, "masternode", vec![json!("genkey")]).await
}

pub async fn winner<T: Transport + ?Sized>(rpc: &T) -> Result<Value, CoreError> {
    masternode(rpc, vec![json!("winner")]).await
}

pub async fn winners<T: Transport + ?Sized>(rpc: &T) -> Result<Value, CoreError> {
    masternode(rpc, vec![json!("winners")]).await
}

/// The node's masternode configuration, returned as the raw response body.
pub async fn list_conf<T: Transport + ?Sized>(rpc: &T) -> Result<Vec<u8>, CoreError> {
    call_binary(rpc, "masternode", vec![json!("list-conf")]).await
}

pub async fn start_alias<T: Transport + ?Sized>(rpc: &T, alias: &str) -> Result<Value, CoreError> {
    masternode(rpc, vec![json!("start-alias"), json!(alias)]).await
}

pub async fn start<T: Transport + ?Sized>(
    rpc: &T,
    mode: MasternodeStartMode,
) -> Result<Value, CoreError> {
    masternode(rpc, vec![json!(format!("start-{mode}"))]).await
}

/// One column of the masternode list, optionally filtered by `filter`.
pub async fn list<T: Transport + ?Sized>(
    rpc: &T,
    mode: MasternodeListMode,
    filter: &str,
) -> Result<Value, CoreError> {
    call(rpc, "masternodelist", vec![json!(mode.as_str()), json!(filter)]).await
}

pub async fn mnsync_status<T: Transport + ?Sized>(rpc: &T) -> Result<Value, CoreError> {
    call(rpc, "mnsync", vec![json!("status")]).await
}

pub async fn mnsync_next<T: Transport + ?Sized>(rpc: &T) -> Result<Value, CoreError> {
    call(rpc, "mnsync", vec![json!("next")]).await
}

pub async fn mnsync_reset<T: Transport + ?Sized>(rpc: &T) -> Result<Value, CoreError> {
    call(rpc, "mnsync", vec![json!("reset")]).await
}
