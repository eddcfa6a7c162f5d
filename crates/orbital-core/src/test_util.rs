//! Shared test helpers for `orbital-core` unit tests.
//!
//! [`FakeNode`] is a throwaway JSON-RPC endpoint served by `axum` on an
//! ephemeral port. It answers every request with one canned status and body
//! and records what it received, so transport and client tests can check
//! the exact wire format.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::routing::post;
use axum::Router;

use crate::config::NodeConfig;

#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub content_type: Option<String>,
    pub authorization: Option<String>,
    pub body: String,
}

struct FakeNodeState {
    status: StatusCode,
    body: String,
    requests: Mutex<Vec<CapturedRequest>>,
}

pub struct FakeNode {
    addr: SocketAddr,
    state: Arc<FakeNodeState>,
}

impl FakeNode {
    pub async fn start(status: u16, body: &str) -> Self {
        let state = Arc::new(FakeNodeState {
            status: StatusCode::from_u16(status).expect("fake node status must be valid"),
            body: body.to_owned(),
            requests: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/", post(handle_rpc))
            .with_state(Arc::clone(&state));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("fake node must bind an ephemeral port");
        let addr = listener
            .local_addr()
            .expect("fake node listener must have an address");
        tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("fake node must keep serving");
        });

        Self { addr, state }
    }

    /// Configuration pointing at this node with `alice:secret` credentials.
    pub fn config(&self) -> NodeConfig {
        NodeConfig {
            host: self.addr.ip().to_string(),
            port: self.addr.port(),
            user: Some("alice".to_owned()),
            password: Some("secret".to_owned()),
            name: "fake".to_owned(),
            ..NodeConfig::default()
        }
    }

    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.state
            .requests
            .lock()
            .expect("fake node request log must not be poisoned")
            .clone()
    }
}

async fn handle_rpc(
    State(state): State<Arc<FakeNodeState>>,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, String) {
    let header_str = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned)
    };
    let captured = CapturedRequest {
        content_type: header_str(header::CONTENT_TYPE),
        authorization: header_str(header::AUTHORIZATION),
        body,
    };
    state
        .requests
        .lock()
        .expect("fake node request log must not be poisoned")
        .push(captured);

    (state.status, state.body.clone())
}

/// A localhost port with nothing listening on it.
pub async fn closed_port() -> u16 {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("ephemeral port must bind");
    let port = listener
        .local_addr()
        .expect("listener must have an address")
        .port();
    drop(listener);
    port
}

/// A localhost port that accepts connections and never answers.
pub async fn silent_port() -> u16 {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("ephemeral port must bind");
    let port = listener
        .local_addr()
        .expect("listener must have an address")
        .port();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });
    port
}
