// In: src/error.rs

//! This module defines the single, unified error type for the entire kaoscipher
//! library. It uses the `thiserror` crate to provide ergonomic, context-aware
//! error handling.
//!
//! Every failure in this crate is deterministic: a `KaosError` always marks a
//! configuration or programming defect, never a transient condition, so there
//! are no retry paths anywhere.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum KaosError {
    // =========================================================================
    // === Configuration Errors (rejected at construction time)
    // =========================================================================
    #[error("chaotic map needs {expected} initial value(s), but {got} provided")]
    ArityMismatch { expected: usize, got: usize },

    #[error("invalid cipher configuration: {0}")]
    InvalidConfig(String),

    // =========================================================================
    // === Shape Errors (fail fast before any sequence value is consumed)
    // =========================================================================
    #[error("image shape mismatch: expected {expected:?}, got {got:?}")]
    ShapeMismatch {
        expected: (usize, usize, usize),
        got: (usize, usize, usize),
    },

    #[error("operation requires a non-empty image, got shape {0:?}")]
    EmptyImage((usize, usize, usize)),

    #[error("Arnold permutation only accepts square images, got {rows}x{cols}")]
    NonSquareImage { rows: usize, cols: usize },

    // =========================================================================
    // === Pipeline Errors
    // =========================================================================
    /// A replay cursor was pulled past its end. Reverse cursors are sized from
    /// the exact forward cost, so hitting this is a cost-accounting bug.
    #[error("replay sequence exhausted after {0} values (cost accounting bug)")]
    SequenceExhausted(usize),

    #[error("Internal logic error (this is a bug): {0}")]
    InternalError(String),

    // =========================================================================
    // === External Error Wrappers (Using #[from] for automatic conversion)
    // =========================================================================
    /// An error from the Serde JSON library, typically during config parsing.
    #[error("Serde JSON error: {0}")]
    SerdeJson(#[from] serde_json::Error),
}
