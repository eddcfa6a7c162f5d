use serde_json::{json, Value};

use crate::error::CoreError;
use crate::rpc::{call, call_as, Transport};

/// General node state (`getinfo`).
pub async fn get_info<T: Transport + ?Sized>(rpc: &T) -> Result<Value, CoreError> {
    call(rpc, "getinfo", Vec::new()).await
}

/// Information about an address; `isvalid` is always present.
pub async fn validate_address<T: Transport + ?Sized>(
    rpc: &T,
    address: &str,
) -> Result<Value, CoreError> {
    call(rpc, "validateaddress", vec![json!(address)]).await
}

/// Hash of the best-chain block at `index`.
///
/// Index `0` is sent without parameters, which the node rejects with its
/// usage text rather than returning the genesis hash.
pub async fn get_block_hash<T: Transport + ?Sized>(
    rpc: &T,
    index: u64,
) -> Result<String, CoreError> {
    let params = if index == 0 {
        Vec::new()
    } else {
        vec![json!(index)]
    };
    call_as(rpc, "getblockhash", params).await
}

/// A block as a JSON object (`verbose`) or as serialized hex.
///
/// An empty `hash` is sent without parameters.
pub async fn get_block<T: Transport + ?Sized>(
    rpc: &T,
    hash: &str,
    verbose: bool,
) -> Result<Value, CoreError> {
    let params = if hash.is_empty() {
        Vec::new()
    } else {
        vec![json!(hash), json!(verbose)]
    };
    call(rpc, "getblock", params).await
}
