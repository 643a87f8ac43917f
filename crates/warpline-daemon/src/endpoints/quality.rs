//! Parsing of the string-encoded endpoint metrics.
//!
//! The catalog stores metrics with their units attached (`"3.5%"`,
//! `"120ms"`) and addresses as `host:port`.

use thiserror::Error;

const LOSS_UNIT: &str = "%";
const DELAY_UNIT: &str = "ms";

/// Why an endpoint field could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QualityParseError {
    #[error("address has no ':' port separator")]
    MissingPortSeparator,

    #[error("address has an empty host")]
    EmptyHost,

    #[error("invalid port {0:?}")]
    InvalidPort(String),

    #[error("invalid loss {0:?}")]
    InvalidLoss(String),

    #[error("invalid delay {0:?}")]
    InvalidDelay(String),
}

/// Split `host:port` on the first `:`.
pub fn parse_address(address: &str) -> Result<(&str, u16), QualityParseError> {
    let (host, port) = address
        .trim()
        .split_once(':')
        .ok_or(QualityParseError::MissingPortSeparator)?;
    if host.is_empty() {
        return Err(QualityParseError::EmptyHost);
    }
    let port = port
        .parse::<u16>()
        .map_err(|_| QualityParseError::InvalidPort(port.to_string()))?;
    Ok((host, port))
}

/// Parse a loss percentage such as `"3.5%"`. A bare number is accepted.
pub fn parse_loss(loss: &str) -> Result<f64, QualityParseError> {
    let trimmed = loss.trim();
    let number = trimmed.strip_suffix(LOSS_UNIT).unwrap_or(trimmed).trim_end();
    number
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| QualityParseError::InvalidLoss(loss.to_string()))
}

/// Parse a delay such as `"120ms"`. A bare integer is accepted.
pub fn parse_delay(delay: &str) -> Result<i64, QualityParseError> {
    let trimmed = delay.trim();
    let number = trimmed.strip_suffix(DELAY_UNIT).unwrap_or(trimmed).trim_end();
    number
        .parse::<i64>()
        .map_err(|_| QualityParseError::InvalidDelay(delay.to_string()))
}

pub fn format_loss(loss: f64) -> String {
    format!("{loss}{LOSS_UNIT}")
}

pub fn format_delay(delay: i64) -> String {
    format!("{delay}{DELAY_UNIT}")
}
