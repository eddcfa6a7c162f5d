use bitcoin::{Amount, SignedAmount};
use serde_json::json;

use crate::error::CoreError;
use crate::rpc::parsing::parse_btc_amount;
use crate::rpc::{call, call_as, Transport, WalletInfo};

/// Wallet state: balances, key pool, lock status.
pub async fn get_wallet_info<T: Transport + ?Sized>(rpc: &T) -> Result<WalletInfo, CoreError> {
    call_as(rpc, "getwalletinfo", Vec::new()).await
}

/// Total available balance of the wallet.
pub async fn get_balance<T: Transport + ?Sized>(rpc: &T) -> Result<Amount, CoreError> {
    let value = call(rpc, "getbalance", Vec::new()).await?;
    parse_btc_amount(&value)
}

/// A fresh receiving address, filed under `label` in the address book.
pub async fn get_new_address<T: Transport + ?Sized>(
    rpc: &T,
    label: &str,
) -> Result<String, CoreError> {
    call_as(rpc, "getnewaddress", vec![json!(label)]).await
}

/// Addresses filed under `label` (deprecated account API).
pub async fn get_addresses_by_account<T: Transport + ?Sized>(
    rpc: &T,
    label: &str,
) -> Result<Vec<String>, CoreError> {
    call_as(rpc, "getaddressesbyaccount", vec![json!(label)]).await
}

/// Optional arguments of `sendtoaddress`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SendOptions {
    /// Wallet-local note about what the payment is for.
    pub comment: String,
    /// Wallet-local note naming the recipient.
    pub comment_to: String,
    /// Deduct the fee from the sent amount instead of adding it on top.
    pub subtract_fee_from_amount: bool,
}

/// Send `amount` to `address` and return the transaction id.
///
/// A non-positive amount is rejected before anything is sent to the node.
pub async fn send_to_address<T: Transport + ?Sized>(
    rpc: &T,
    address: &str,
    amount: SignedAmount,
    options: &SendOptions,
) -> Result<String, CoreError> {
    if !amount.is_positive() {
        return Err(CoreError::InvalidArgument("amount <= 0".to_owned()));
    }

    call_as(
        rpc,
        "sendtoaddress",
        vec![
            json!(address),
            json!(amount.to_btc()),
            json!(options.comment),
            json!(options.comment_to),
            json!(options.subtract_fee_from_amount),
        ],
    )
    .await
}
