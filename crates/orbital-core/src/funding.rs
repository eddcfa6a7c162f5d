//! Raw transaction pipeline: build, fund, decode, sign, broadcast.
//!
//! Sends to several recipients in one transaction while letting the node
//! pick inputs and change. Steps run strictly in order, each consuming the
//! previous step's output. The first failing step ends the run and its
//! error is returned unchanged. Nothing before broadcast has a durable
//! effect on the node, so there is nothing to roll back.

use std::collections::BTreeMap;
use std::fmt;

use bitcoin::Amount;
use serde_json::{json, Map, Value};
use tracing::{debug, error, info};

use crate::error::{CoreError, RpcError};
use crate::rpc::parsing::{parse_btc_amount, required_field, required_str};
use crate::rpc::{call, Transport};

/// Recipient address to amount. Ordered so the request body is stable.
pub type Recipients = BTreeMap<String, Amount>;

/// A broadcast transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FundedTransaction {
    /// As returned by the node, unparsed: once broadcast, the id is reported
    /// even if it looks unusual.
    pub txid: String,
    pub fee: Amount,
    /// Output index of the change, `-1` when the node added none.
    pub change_position: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FundingStep {
    Build,
    Fund,
    Decode,
    Sign,
    Broadcast,
}

impl FundingStep {
    pub fn method(self) -> &'static str {
        match self {
            Self::Build => "createrawtransaction",
            Self::Fund => "fundrawtransaction",
            Self::Decode => "decoderawtransaction",
            Self::Sign => "signrawtransaction",
            Self::Broadcast => "sendrawtransaction",
        }
    }
}

impl fmt::Display for FundingStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Build => "build",
            Self::Fund => "fund",
            Self::Decode => "decode",
            Self::Sign => "sign",
            Self::Broadcast => "broadcast",
        };
        f.write_str(name)
    }
}

struct Funded {
    hex: String,
    change_position: i64,
    fee: Amount,
}

/// Pay every recipient in one node-funded transaction and broadcast it.
///
/// Amounts are not checked locally; the node validates them in the build
/// step.
pub async fn fund_raw_transaction<T: Transport + ?Sized>(
    rpc: &T,
    recipients: &Recipients,
) -> Result<FundedTransaction, CoreError> {
    let outputs: Map<String, Value> = recipients
        .iter()
        .map(|(address, amount)| (address.clone(), json!(amount.to_btc())))
        .collect();

    let unsigned_hex = run_step(
        rpc,
        FundingStep::Build,
        vec![json!([]), Value::Object(outputs)],
        |result| hex_result(FundingStep::Build, result),
    )
    .await?;

    let funded = run_step(rpc, FundingStep::Fund, vec![json!(unsigned_hex)], |result| {
        let method = FundingStep::Fund.method();
        let change_position = required_field(&result, method, "changepos")?
            .as_i64()
            .ok_or_else(|| {
                RpcError::InvalidResponse(format!("{method} `changepos` is not an integer"))
            })?;
        Ok(Funded {
            hex: required_str(&result, method, "hex")?.to_owned(),
            change_position,
            fee: parse_btc_amount(required_field(&result, method, "fee")?)?,
        })
    })
    .await?;

    run_step(rpc, FundingStep::Decode, vec![json!(funded.hex)], |_| Ok(())).await?;

    let signed_hex = run_step(rpc, FundingStep::Sign, vec![json!(funded.hex)], |result| {
        required_str(&result, FundingStep::Sign.method(), "hex").map(str::to_owned)
    })
    .await?;

    let txid = run_step(rpc, FundingStep::Broadcast, vec![json!(signed_hex)], |result| {
        hex_result(FundingStep::Broadcast, result)
    })
    .await?;

    info!(%txid, fee = %funded.fee, recipients = recipients.len(), "raw transaction broadcast");
    Ok(FundedTransaction {
        txid,
        fee: funded.fee,
        change_position: funded.change_position,
    })
}

async fn run_step<T, R, F>(
    rpc: &T,
    step: FundingStep,
    params: Vec<Value>,
    extract: F,
) -> Result<R, CoreError>
where
    T: Transport + ?Sized,
    F: FnOnce(Value) -> Result<R, CoreError>,
{
    debug!(%step, rpc.method = step.method(), "funding step");
    call(rpc, step.method(), params)
        .await
        .and_then(extract)
        .inspect_err(|err| error!(%step, error = %err, "funding step failed"))
}

fn hex_result(step: FundingStep, result: Value) -> Result<String, CoreError> {
    match result {
        Value::String(s) => Ok(s),
        other => Err(RpcError::InvalidResponse(format!(
            "{} returned non-string result: {other}",
            step.method()
        ))
        .into()),
    }
}
