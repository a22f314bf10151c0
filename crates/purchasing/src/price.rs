//! Price extraction from directory row descriptions.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NumberFormatError {
    #[error("not an integer: {raw:?}")]
    InvalidFormat { raw: String },
}

/// Parses `raw` as a whole integer.
///
/// Surrounding whitespace is ignored; anything else that is not part of the
/// number (units, currency signs, decimals) rejects the value.
pub fn parse_integer(raw: &str) -> Result<i64, NumberFormatError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| NumberFormatError::InvalidFormat {
            raw: raw.to_string(),
        })
}
