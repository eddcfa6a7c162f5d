//! Client for the JSON-RPC interface of Bolivarcoin/Bolicoin nodes.
//!
//! [`Node`] owns the connection; the RPC catalogue lives in [`methods`] as
//! free functions over any [`rpc::Transport`], and [`funding`] chains raw
//! transaction calls into a single send.

pub mod client;
pub mod config;
pub mod error;
pub mod funding;
pub mod methods;
pub mod rpc;
#[cfg(test)]
mod test_util;

pub use client::{Node, NodeInfo};
pub use config::NodeConfig;
pub use error::{CoreError, RpcError};
pub use funding::{fund_raw_transaction, FundedTransaction, Recipients};
