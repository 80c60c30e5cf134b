use momo_core::error::StatementError;
use serde::Serialize;

pub fn to_string<T: Serialize>(value: &T) -> Result<String, StatementError> {
    Ok(serde_json::to_string_pretty(value)?)
}
