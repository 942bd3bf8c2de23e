// In: src/ops/transform.rs

//! The plugin seam for frequency-domain pre/post stages.
//!
//! Concrete transforms (discrete cosine, Fourier) live outside this crate.
//! The core only requires that a stage expose a forward/backward pair that is
//! the identity when composed, consume no sequence values, and preserve the
//! image shape. Shape preservation is enforced by the caller
//! (`CipherOp::apply`) after every invocation, so a misbehaving plugin fails
//! fast instead of silently corrupting reverse cost accounting.

use std::fmt;

use crate::error::KaosError;
use crate::Image;

/// A shape-preserving, exactly-invertible image transform stage.
pub trait TransformStage: fmt::Debug {
    /// Forward transform, applied during encryption.
    fn forward(&self, image: &Image) -> Result<Image, KaosError>;

    /// Backward transform, applied during decryption. Must invert `forward`.
    fn backward(&self, image: &Image) -> Result<Image, KaosError>;
}
