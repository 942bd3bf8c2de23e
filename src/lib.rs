//! This file is the root of the `kaoscipher` Rust crate.
//!
//! Its responsibilities are strictly limited to:
//! 1.  Declaring all the top-level modules of our library (`chaos`,
//!     `sequence`, `ops`, etc.) so the Rust compiler knows they exist.
//! 2.  Re-exporting the handful of types that make up the public surface.

//==================================================================================
// 0. Constants
//==================================================================================
/// The crate version, automatically set from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The image buffer: unsigned 8-bit samples on (row, column, channel) axes.
/// Shape is invariant across every operation in this crate.
pub type Image = ndarray::Array3<u8>;

//==================================================================================
// 1. Module Declarations
//==================================================================================

pub mod attack;
pub mod chaos;
pub mod config;
pub mod encryptor;
pub mod metrics;
pub mod ops;
pub mod sequence;

mod error;
mod utils;


//==================================================================================
// 2. Public Surface
//==================================================================================

pub use chaos::{ChaosMap, MapState};
pub use config::CipherConfig;
pub use encryptor::{ArnoldEncryptor, Encryptor};
pub use error::KaosError;
pub use ops::{CipherOp, TransformStage};
pub use sequence::{SequenceCursor, SequenceGenerator};

/// Turns on verbose logging for cipher pass timing and cost diagnostics.
///
/// Safe to call more than once; later calls are no-ops.
pub fn enable_verbose_logging() {
    let _ = env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Debug)
        .try_init();
}
