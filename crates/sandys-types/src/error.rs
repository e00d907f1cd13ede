// ─────────────────────────────────────────────────────────────────────
// Sandy's Law Engine — Error Hierarchy
// ─────────────────────────────────────────────────────────────────────

use thiserror::Error;

/// Root error type for all Sandy's Law engine failures.
///
/// The model itself is total over finite reals; the only recoverable
/// conditions are rejected inputs and malformed configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SandysError {
    /// A run or evaluation parameter is outside its admissible domain.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Configuration error (validation or JSON parse).
    #[error("config error: {0}")]
    Config(String),
}

pub type SandysResult<T> = Result<T, SandysError>;
