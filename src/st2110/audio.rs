//! The audio media specialization: the SMPTE 2110-30 channel-order
//! grammar.

use crate::errors::{Error, Result};

const GROUPING_SYMBOLS: &[&str] = &["M", "DM", "ST", "LtRt", "51", "71", "222", "SGRP"];

fn is_valid_symbol(token: &str) -> bool {
    if GROUPING_SYMBOLS.contains(&token) {
        return true;
    }
    // U01..U64
    if let Some(digits) = token.strip_prefix('U') {
        if digits.len() == 2 {
            if let Ok(n) = digits.parse::<u32>() {
                return (1..=64).contains(&n);
            }
        }
    }
    false
}

/// `channel-order=SMPTE2110.(<csv>)`. Validates every comma-separated
/// grouping symbol against the closed set and returns the raw captured
/// group.
pub fn parse_channel_order(raw: &str) -> Result<String> {
    let raw = raw.trim();
    let inner = raw
        .strip_prefix("SMPTE2110.(")
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(|| Error::malformed_compound("channel-order", raw))?;
    for token in inner.split(',') {
        if !is_valid_symbol(token) {
            return Err(Error::unknown_enum("channel-order", token));
        }
    }
    Ok(inner.to_string())
}
