//! Native JSON-RPC client for Bolivarcoin-compatible node endpoints.
//!
//! Implements [`Transport`](super::Transport) over HTTP using `reqwest`,
//! with basic auth and optional request pacing.

mod client;
mod protocol;

pub use client::HttpTransport;
