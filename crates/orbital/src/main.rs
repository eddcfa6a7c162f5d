mod cli;

use std::io::Write;
use std::time::Duration;

use clap::Parser;
use eyre::{bail, WrapErr};
use serde::Serialize;
use serde_json::{json, Value};

use orbital_core::methods::{blockchain, help, masternode, utils, wallet, SendOptions};
use orbital_core::rpc::call;
use orbital_core::{fund_raw_transaction, Node, NodeConfig, Recipients};

use cli::{Cli, Command};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let args = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_file(true)
        .with_line_number(true)
        .with_level(true)
        .init();

    let node = Node::connect(node_config(&args))
        .await
        .wrap_err("invalid node configuration")?;

    match args.command {
        Command::Status => print_json(&json!({
            "name": node.config().name,
            "ticker": node.config().ticker,
            "online": node.is_valid_node(),
            "api_version": node.api_version(),
        })),
        Command::Info => {
            let info = node.all_node_info().await;
            print_json(&json!({
                "blockchain": part(info.blockchain)?,
                "network": part(info.network)?,
                "wallet": part(info.wallet)?,
            }))
        }
        Command::Call { method, params } => {
            let params: Vec<Value> = params.iter().map(|p| parse_param(p)).collect();
            tracing::debug!(rpc.method = %method, params = params.len(), "raw call");
            print_json(&call(&node, &method, params).await?)
        }
        Command::BlockCount => print_json(&blockchain::get_block_count(&node).await?),
        Command::BlockHash { height } => print_json(&utils::get_block_hash(&node, height).await?),
        Command::Block { hash, raw } => print_json(&utils::get_block(&node, &hash, !raw).await?),
        Command::Balance => print_json(&wallet::get_balance(&node).await?.to_btc()),
        Command::Send {
            address,
            amount,
            comment,
            comment_to,
            subtract_fee,
        } => {
            let options = SendOptions {
                comment,
                comment_to,
                subtract_fee_from_amount: subtract_fee,
            };
            let txid = wallet::send_to_address(&node, &address, amount, &options).await?;
            print_json(&txid)
        }
        Command::Fund { recipients } => {
            let mut outputs = Recipients::new();
            for (address, amount) in recipients {
                if outputs.insert(address.clone(), amount).is_some() {
                    bail!("recipient `{address}` given more than once");
                }
            }
            let sent = fund_raw_transaction(&node, &outputs).await?;
            print_json(&json!({
                "txid": sent.txid,
                "fee": sent.fee.to_btc(),
                "changepos": sent.change_position,
            }))
        }
        Command::MasternodeCount { option } => print_json(&masternode::count(&node, option).await?),
        Command::MasternodeListConf => {
            let conf = masternode::list_conf(&node).await?;
            std::io::stdout()
                .write_all(&conf)
                .wrap_err("write masternode configuration")
        }
        Command::Help { method } => {
            let text = help::help(&node, method.as_deref().unwrap_or_default()).await?;
            println!("{text}");
            Ok(())
        }
    }
}

fn node_config(args: &Cli) -> NodeConfig {
    NodeConfig {
        host: args.rpc_host.clone(),
        port: args.rpc_port,
        scheme: args.rpc_scheme.clone(),
        user: args.rpc_user.clone(),
        password: args.rpc_pass.clone(),
        cookie_file: args.rpc_cookie_file.clone(),
        name: args.name.clone(),
        ticker: args.ticker.clone(),
        app_id: args.app_id.clone(),
        requests_per_second: args.requests_per_second,
        connect_timeout: args.connect_timeout.map(Duration::from_secs),
        request_timeout: args.request_timeout.map(Duration::from_secs),
        ..NodeConfig::default()
    }
}

/// Render one part of the node summary, keeping failures visible next to
/// the parts that succeeded.
fn part<S: Serialize, E: std::fmt::Display>(result: Result<S, E>) -> eyre::Result<Value> {
    match result {
        Ok(value) => serde_json::to_value(value).wrap_err("serialize node info"),
        Err(err) => Ok(json!({ "error": err.to_string() })),
    }
}

/// Command-line parameters are JSON when they parse as JSON, plain strings
/// otherwise, so `getblock <hash> false` needs no quoting.
fn parse_param(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_owned()))
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> eyre::Result<()> {
    let rendered = serde_json::to_string_pretty(value).wrap_err("serialize output")?;
    println!("{rendered}");
    Ok(())
}
