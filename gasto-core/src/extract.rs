//! Amount/description extraction from raw message text.
//!
//! Expected shape: `90 almoço no shopping` — a numeric token with an
//! optional comma or dot decimal separator, then free text. The first
//! numeric token in the message wins, wherever it appears.

use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

/// Successful split of a message into amount and residual description.
#[derive(Debug, Clone, PartialEq)]
pub struct Extracted {
    pub amount: f64,
    /// Text after the amount token, trimmed; may be empty.
    pub description: String,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ExtractError {
    /// No numeric token anywhere in the input.
    #[error("no amount found in message")]
    NoAmountFound,
}

// Digits with at most one comma/dot separator, then the rest of the line.
// A sign character is never part of the token.
fn amount_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?P<amount>\d+[,.]?\d*)\s*(?P<desc>.*)").expect("valid amount pattern")
    })
}

/// Split `text` into an amount and a description.
///
/// The comma is accepted as a decimal separator (`12,50` parses as 12.5).
/// Everything after the numeric token becomes the description, which may
/// legitimately be empty.
pub fn extract(text: &str) -> Result<Extracted, ExtractError> {
    let caps = amount_re()
        .captures(text.trim())
        .ok_or(ExtractError::NoAmountFound)?;

    let amount: f64 = caps["amount"]
        .replace(',', ".")
        .parse()
        .map_err(|_| ExtractError::NoAmountFound)?;

    Ok(Extracted {
        amount,
        description: caps["desc"].trim().to_string(),
    })
}
