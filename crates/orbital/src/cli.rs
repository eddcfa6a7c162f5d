use std::path::PathBuf;

use bitcoin::{Amount, Denomination, SignedAmount};
use clap::{Parser, Subcommand};

use orbital_core::config::DEFAULT_RPC_PORT;
use orbital_core::methods::MasternodeCountOption;
use orbital_core::CoreError;

/// Command-line client for Bolivarcoin node RPC.
#[derive(Parser)]
#[command(version, about, disable_help_subcommand = true)]
pub struct Cli {
    /// Node RPC host.
    #[arg(long, default_value = "127.0.0.1", env = "ORBITAL_RPC_HOST")]
    pub rpc_host: String,

    /// Node RPC port.
    #[arg(long, default_value_t = DEFAULT_RPC_PORT, env = "ORBITAL_RPC_PORT")]
    pub rpc_port: u16,

    /// `http` or `https`.
    #[arg(long, default_value = "http", env = "ORBITAL_RPC_SCHEME")]
    pub rpc_scheme: String,

    /// RPC username.
    #[arg(long, env = "ORBITAL_RPC_USER")]
    pub rpc_user: Option<String>,

    /// RPC password.
    #[arg(long, env = "ORBITAL_RPC_PASS")]
    pub rpc_pass: Option<String>,

    /// Node cookie file, used when no user/password is given.
    #[arg(long, env = "ORBITAL_RPC_COOKIE_FILE")]
    pub rpc_cookie_file: Option<PathBuf>,

    /// Application id sent as the JSON-RPC request id (prefixed `Orbital_`).
    #[arg(long, default_value = "standard", env = "ORBITAL_APP_ID")]
    pub app_id: String,

    /// Display name used in logs.
    #[arg(long, default_value = "")]
    pub name: String,

    #[arg(long, default_value = "BOLI")]
    pub ticker: String,

    /// Cap on outbound RPC requests per second.
    #[arg(long)]
    pub requests_per_second: Option<u32>,

    /// Give up connecting after this many seconds. Unset waits as long as
    /// the OS does.
    #[arg(long, value_name = "SECS")]
    pub connect_timeout: Option<u64>,

    /// Give up on a whole request after this many seconds. Unset never
    /// times out, so slow calls like `masternode start-all` can finish.
    #[arg(long, value_name = "SECS")]
    pub request_timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Check whether the node answers.
    Status,
    /// Blockchain, network and wallet summary.
    Info,
    /// Run any RPC method. Parameters are parsed as JSON, falling back to
    /// plain strings.
    Call {
        method: String,
        params: Vec<String>,
    },
    BlockCount,
    BlockHash {
        height: u64,
    },
    Block {
        hash: String,
        /// Print serialized hex instead of the decoded block.
        #[arg(long)]
        raw: bool,
    },
    Balance,
    /// Send coins to one address.
    Send {
        address: String,
        #[arg(allow_negative_numbers = true, value_parser = parse_signed_amount)]
        amount: SignedAmount,
        #[arg(long, default_value = "")]
        comment: String,
        #[arg(long, default_value = "")]
        comment_to: String,
        #[arg(long)]
        subtract_fee: bool,
    },
    /// Pay several recipients in one node-funded raw transaction.
    Fund {
        /// `address=amount` pairs.
        #[arg(required = true, value_parser = parse_recipient)]
        recipients: Vec<(String, Amount)>,
    },
    MasternodeCount {
        #[arg(value_parser = parse_count_option)]
        option: Option<MasternodeCountOption>,
    },
    /// Print the node's masternode configuration file.
    MasternodeListConf,
    /// The node's own `help` text, for all methods or one.
    Help {
        method: Option<String>,
    },
}

fn parse_signed_amount(s: &str) -> Result<SignedAmount, String> {
    SignedAmount::from_str_in(s, Denomination::Bitcoin).map_err(|e| format!("invalid amount `{s}`: {e}"))
}

fn parse_recipient(s: &str) -> Result<(String, Amount), String> {
    let (address, amount) = s
        .split_once('=')
        .ok_or_else(|| format!("expected `address=amount`, got `{s}`"))?;
    if address.is_empty() {
        return Err(format!("missing address in `{s}`"));
    }
    let amount = Amount::from_str_in(amount, Denomination::Bitcoin)
        .map_err(|e| format!("invalid amount in `{s}`: {e}"))?;
    Ok((address.to_owned(), amount))
}

fn parse_count_option(s: &str) -> Result<MasternodeCountOption, CoreError> {
    s.parse()
}
