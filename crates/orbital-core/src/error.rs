#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RpcError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("invalid RPC response: {0}")]
    InvalidResponse(String),

    #[error("RPC server error {code}: {message}")]
    ServerError { code: i64, message: String },

    #[error("HTTP status {status} without a JSON-RPC error object")]
    Http { status: u16 },

    #[error("node returned an empty result")]
    EmptyResult,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    #[error("RPC communication failure: {0}")]
    Rpc(#[from] RpcError),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl CoreError {
    /// The node-side error code, when the node itself rejected the call.
    pub fn server_code(&self) -> Option<i64> {
        match self {
            Self::Rpc(RpcError::ServerError { code, .. }) => Some(*code),
            _ => None,
        }
    }
}
