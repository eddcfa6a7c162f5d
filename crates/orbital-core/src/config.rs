//! Connection settings for a single node.
//!
//! A [`NodeConfig`] is built once and handed to [`crate::Node`], which keeps it
//! immutable for the lifetime of the client.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::Url;

use crate::error::CoreError;

/// Default RPC port of a Bolivarcoin node.
pub const DEFAULT_RPC_PORT: u16 = 3563;

/// Prefix applied to the application id to form the JSON-RPC request id.
pub const REQUEST_ID_PREFIX: &str = "Orbital_";

#[derive(Clone)]
pub struct NodeConfig {
    pub host: String,
    pub port: u16,
    /// `http` or `https`.
    pub scheme: String,
    pub user: Option<String>,
    pub password: Option<String>,
    /// `username:password` file written by the node when no explicit
    /// credentials are configured. Ignored when `user`/`password` are set.
    pub cookie_file: Option<PathBuf>,
    pub core_type: u8,
    /// Display name used in log lines.
    pub name: String,
    pub ticker: String,
    pub is_masternode: bool,
    pub app_id: String,
    /// Outbound request pacing. `None` disables throttling.
    pub requests_per_second: Option<u32>,
    /// TCP connect limit. `None` leaves it to the OS.
    pub connect_timeout: Option<Duration>,
    /// Limit on a whole request, response body included. `None` waits for
    /// the node however long it takes.
    pub request_timeout: Option<Duration>,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: DEFAULT_RPC_PORT,
            scheme: "http".to_owned(),
            user: None,
            password: None,
            cookie_file: None,
            core_type: 1,
            name: String::new(),
            ticker: "BOLI".to_owned(),
            is_masternode: false,
            app_id: "standard".to_owned(),
            requests_per_second: None,
            connect_timeout: None,
            request_timeout: None,
        }
    }
}

impl fmt::Debug for NodeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("scheme", &self.scheme)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("cookie_file", &self.cookie_file)
            .field("core_type", &self.core_type)
            .field("name", &self.name)
            .field("ticker", &self.ticker)
            .field("is_masternode", &self.is_masternode)
            .field("app_id", &self.app_id)
            .field("requests_per_second", &self.requests_per_second)
            .field("connect_timeout", &self.connect_timeout)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl NodeConfig {
    /// JSON-RPC `id` sent with every request.
    pub fn request_id(&self) -> String {
        format!("{REQUEST_ID_PREFIX}{}", self.app_id)
    }

    /// Validated `<scheme>://<host>:<port>/` endpoint.
    pub fn endpoint(&self) -> Result<String, CoreError> {
        match self.scheme.as_str() {
            "http" | "https" => {}
            other => {
                return Err(CoreError::Config(format!(
                    "unsupported scheme `{other}`; expected http or https"
                )));
            }
        }

        let endpoint = format!("{}://{}:{}/", self.scheme, self.host, self.port);
        Url::parse(&endpoint).map_err(|e| {
            CoreError::Config(format!("invalid node endpoint `{endpoint}`: {e}"))
        })?;
        Ok(endpoint)
    }

    /// Basic-auth credentials: explicit `user`/`password` first, then the
    /// cookie file, else none.
    pub fn resolve_auth(&self) -> Result<Option<(String, String)>, CoreError> {
        match (&self.user, &self.password) {
            (Some(user), Some(password)) => Ok(Some((user.clone(), password.clone()))),
            (None, None) => self.cookie_file.as_deref().map(read_cookie).transpose(),
            _ => Err(CoreError::Config(
                "user and password must be set together".to_owned(),
            )),
        }
    }
}

fn read_cookie(path: &Path) -> Result<(String, String), CoreError> {
    let content = fs::read_to_string(path).map_err(|e| {
        CoreError::Config(format!("cannot read cookie file {}: {e}", path.display()))
    })?;
    parse_cookie(&content).ok_or_else(|| {
        CoreError::Config(format!(
            "cookie file {} does not hold `user:password`",
            path.display()
        ))
    })
}

/// First line of a node cookie, `user:password` with both halves non-empty.
fn parse_cookie(content: &str) -> Option<(String, String)> {
    let (user, password) = content.lines().next()?.trim().split_once(':')?;
    if user.is_empty() || password.is_empty() {
        return None;
    }
    Some((user.to_owned(), password.to_owned()))
}
