use bitcoin::Amount;
use serde::{Deserialize, Deserializer, Serializer};
use serde_json::Value;

use crate::error::{CoreError, RpcError};

/// Parse a coin amount from a JSON value.
///
/// Number values are parsed via `Amount::from_float_in` to support scientific
/// notation, while string values are parsed via `Amount::from_str_in`.
pub(crate) fn parse_btc_amount(value: &Value) -> Result<Amount, CoreError> {
    match value {
        Value::Number(n) => {
            let parsed = n
                .as_f64()
                .ok_or_else(|| invalid(format!("invalid amount `{value}`")))?;
            Amount::from_float_in(parsed, bitcoin::Denomination::Bitcoin)
                .map_err(|e| invalid(format!("invalid amount `{value}`: {e}")))
        }
        Value::String(s) => Amount::from_str_in(s, bitcoin::Denomination::Bitcoin)
            .map_err(|e| invalid(format!("invalid amount `{s}`: {e}"))),
        _ => Err(invalid(format!("expected numeric amount, got: {value}"))),
    }
}

/// `deserialize_with` adapter for coin-denominated amount fields.
pub(crate) fn deserialize_btc_amount<'de, D>(deserializer: D) -> Result<Amount, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    parse_btc_amount(&value).map_err(serde::de::Error::custom)
}

/// `serialize_with` counterpart of [`deserialize_btc_amount`].
pub(crate) fn serialize_btc_amount<S>(amount: &Amount, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_f64(amount.to_btc())
}

/// Fetch `field` from a JSON object result, failing with a message that
/// names the RPC method it came from.
pub(crate) fn required_field<'a>(
    value: &'a Value,
    method: &str,
    field: &str,
) -> Result<&'a Value, CoreError> {
    value
        .get(field)
        .filter(|v| !v.is_null())
        .ok_or_else(|| invalid(format!("{method} result is missing `{field}`")))
}

pub(crate) fn required_str<'a>(
    value: &'a Value,
    method: &str,
    field: &str,
) -> Result<&'a str, CoreError> {
    required_field(value, method, field)?
        .as_str()
        .ok_or_else(|| invalid(format!("{method} result field `{field}` is not a string")))
}

fn invalid(message: String) -> CoreError {
    RpcError::InvalidResponse(message).into()
}
