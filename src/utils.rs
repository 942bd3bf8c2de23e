// In: src/utils.rs

//! Shared helpers: discretization of sequence scalars and image shape guards.

use crate::error::KaosError;
use crate::Image;

/// Maps a sequence scalar into an unsigned integer in [0, 256).
///
/// Computes `floor(65536 * v) mod 256`. Both permutation indices and diffusion
/// deltas derive from this, so it MUST be bit-identical between the encrypt
/// and decrypt paths. Euclidean remainder keeps the result in range for the
/// negative values some chaotic maps produce.
pub(crate) fn discretize(v: f64) -> u8 {
    ((65536.0 * v).floor() as i64).rem_euclid(256) as u8
}

/// Rejects zero-sized images before any sequence value is consumed.
pub(crate) fn ensure_non_empty(image: &Image) -> Result<(), KaosError> {
    let (h, w, c) = image.dim();
    if h == 0 || w == 0 || c == 0 {
        return Err(KaosError::EmptyImage((h, w, c)));
    }
    Ok(())
}

/// Rejects image pairs of differing shape.
pub(crate) fn ensure_same_shape(a: &Image, b: &Image) -> Result<(), KaosError> {
    if a.dim() != b.dim() {
        return Err(KaosError::ShapeMismatch {
            expected: a.dim(),
            got: b.dim(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array3;

    #[test]
    fn test_discretize_unit_interval() {
        // floor(65536 * 0.6) = 39321; 39321 % 256 = 153
        assert_eq!(discretize(0.6), 153);
        assert_eq!(discretize(0.0), 0);
        // k / 65536 discretizes to k for small k
        assert_eq!(discretize(1.0 / 65536.0), 1);
        assert_eq!(discretize(255.0 / 65536.0), 255);
        assert_eq!(discretize(256.0 / 65536.0), 0);
    }

    #[test]
    fn test_discretize_negative_stays_in_range() {
        // floor(65536 * -0.3) = -19661; Euclidean mod: -19661 mod 256 = 179
        assert_eq!(discretize(-0.3), 179);
    }

    #[test]
    fn test_ensure_non_empty_rejects_zero_dims() {
        let empty: Image = Array3::zeros((0, 4, 3));
        assert!(matches!(
            ensure_non_empty(&empty),
            Err(KaosError::EmptyImage((0, 4, 3)))
        ));
        let ok: Image = Array3::zeros((1, 1, 1));
        assert!(ensure_non_empty(&ok).is_ok());
    }

    #[test]
    fn test_ensure_same_shape() {
        let a: Image = Array3::zeros((2, 3, 1));
        let b: Image = Array3::zeros((3, 2, 1));
        assert!(ensure_same_shape(&a, &a).is_ok());
        assert!(ensure_same_shape(&a, &b).is_err());
    }
}
