use ceiling_protocol::SaleError;
use thiserror::Error;

pub type SdkResult<T> = Result<T, SdkError>;

#[derive(Error, Debug)]
pub enum SdkError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid hex string: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    #[error("Invalid identity '{0}': expected a base58 public key")]
    InvalidIdentity(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid schedule: {0}")]
    InvalidSchedule(String),

    #[error("Invalid percentage: {0}% (must be 0-100 with at most two decimal places)")]
    InvalidPercentage(rust_decimal::Decimal),

    #[error("Invalid shares: {0}")]
    InvalidShares(String),

    #[error("Reveal step {index} does not match commitment {index}")]
    CommitmentMismatch { index: usize },

    #[error("Sale error: {0}")]
    Sale(#[from] SaleError),
}
