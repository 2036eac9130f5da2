//! Row normalizer: converts a [`RawRow`] extracted by a source adapter into a
//! [`CanonicalRecord`], or a typed parse failure the caller logs and drops.

use chrono::NaiveDate;
use thiserror::Error;

use crate::record::{CanonicalRecord, Direction, Port, RawRow, DEFAULT_WEIGHT_UNIT, ETA_FORMAT};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("eta cell is empty")]
    EmptyEta,

    #[error("eta '{0}' is not a DD/MM/YYYY date")]
    BadEta(String),

    #[error("weight cell is empty")]
    EmptyWeight,

    #[error("weight '{0}' is not a non-negative integer")]
    BadWeight(String),
}

/// Normalize one raw row under the given port and direction.
///
/// ETA is the first whitespace-separated token of the cell (both sites append
/// a time component on some rows) and must parse as exactly `DD/MM/YYYY`.
///
/// Weight text has all `,` and `.` stripped before the leading token is parsed
/// as an integer. The sites format weights with thousands grouping and a `,00`
/// decimal tail, so `"1.234,00"` becomes `123400`; a true decimal point would
/// be conflated the same way. The second token, when present, is the unit
/// label; sources that omit it get [`DEFAULT_WEIGHT_UNIT`].
pub fn normalize_row(
    raw: &RawRow,
    port: Port,
    direction: Direction,
) -> Result<CanonicalRecord, NormalizeError> {
    let eta_token = raw
        .eta
        .split_whitespace()
        .next()
        .ok_or(NormalizeError::EmptyEta)?;
    let eta = NaiveDate::parse_from_str(eta_token, ETA_FORMAT)
        .map_err(|_| NormalizeError::BadEta(eta_token.to_string()))?;

    let stripped = raw.weight.replace([',', '.'], "");
    let mut weight_tokens = stripped.split_whitespace();
    let weight_token = weight_tokens.next().ok_or(NormalizeError::EmptyWeight)?;
    let weight = weight_token
        .parse::<u64>()
        .map_err(|_| NormalizeError::BadWeight(weight_token.to_string()))?;
    let weight_unit = weight_tokens
        .next()
        .map(str::to_string)
        .unwrap_or_else(|| DEFAULT_WEIGHT_UNIT.to_string());

    Ok(CanonicalRecord {
        port,
        direction,
        commodity: raw.commodity.clone(),
        eta,
        weight,
        weight_unit,
    })
}
