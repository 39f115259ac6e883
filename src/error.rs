//! Error types for fee calculation and fee schedule loading.
//!
//! Malformed monetary input is never an error: it is normalized to zero
//! (see [`crate::models::money`]). The variants below cover caller and
//! configuration bugs only.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, FeeError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeeError {
    /// A membership tier string outside the closed set
    /// (`visitor`, `free`, `pro`/`basic`, `enterprise`, `admin`).
    #[error("unknown membership tier: {0:?}")]
    UnknownTier(String),

    /// A fee rate that does not parse or falls outside `[0, 1]`.
    #[error("fee rate {name} must be a number between 0 and 1, got {value:?}")]
    InvalidRate { name: &'static str, value: String },

    /// A booking limit that does not parse or is negative.
    #[error("limit {name} must be a non-negative number, got {value:?}")]
    InvalidLimit { name: &'static str, value: String },

    #[error("successful jobs ({successful}) cannot exceed total jobs ({total})")]
    InvalidJobCounts { total: u64, successful: u64 },

    #[error("projected amount for {jobs} jobs overflows")]
    AmountOverflow { jobs: u64 },
}
