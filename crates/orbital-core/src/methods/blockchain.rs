use crate::error::CoreError;
use crate::rpc::{call_as, ChainInfo, Transport};

/// Height of the most-work fully validated chain.
pub async fn get_block_count<T: Transport + ?Sized>(rpc: &T) -> Result<u64, CoreError> {
    call_as(rpc, "getblockcount", Vec::new()).await
}

pub async fn get_blockchain_info<T: Transport + ?Sized>(rpc: &T) -> Result<ChainInfo, CoreError> {
    call_as(rpc, "getblockchaininfo", Vec::new()).await
}

/// Proof-of-work difficulty as a multiple of the minimum difficulty.
pub async fn get_difficulty<T: Transport + ?Sized>(rpc: &T) -> Result<f64, CoreError> {
    call_as(rpc, "getdifficulty", Vec::new()).await
}
