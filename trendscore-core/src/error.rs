//! Engine error types.
//!
//! Only whole-engine failures are errors. A reading that cannot be produced
//! for a single date (warm-up window, missing history) is a gap in the output
//! series, never an `Err`.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("{engine} needs at least {required} bars, got {available}")]
    InsufficientData {
        engine: &'static str,
        required: usize,
        available: usize,
    },

    #[error("{engine} produced a non-finite fit")]
    NonFiniteInput { engine: &'static str },

    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}
