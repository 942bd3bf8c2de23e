// In: src/ops/diffusion.rs

//! The diffusion kernel: chains every pixel onto its predecessor so a
//! one-pixel change in the input avalanches across all later positions.
//!
//! The image is flattened to logical (row, column, channel) order, diffused,
//! and restored to its original 3-D shape before returning. All arithmetic is
//! wrapping `u8` addition/subtraction, i.e. mod 256.

use crate::error::KaosError;
use crate::sequence::SequenceCursor;
use crate::utils::discretize;
use crate::Image;

/// Runs `times` diffusion passes over the flattened pixel stream.
///
/// Forward walks positions ascending: `flat[i] = flat[i-1] + flat[i] + d_i`,
/// where each new value folds in the *already-diffused* predecessor.
///
/// Reverse walks positions descending: `flat[i] = flat[i] - flat[i-1] - d_i`.
/// Descending order is load-bearing: position `i-1` still holds its
/// forward-diffused value at the moment `i` is reversed, and the delta pulls
/// line up with the mirrored sequence the replay cursor supplies.
pub(crate) fn diffuse(
    mut image: Image,
    cursor: &mut SequenceCursor,
    times: usize,
    reverse: bool,
) -> Result<Image, KaosError> {
    let mut flat: Vec<u8> = image.iter().copied().collect();
    for _ in 0..times {
        if !reverse {
            for i in 0..flat.len() {
                let d = discretize(cursor.pull()?);
                flat[i] = if i == 0 {
                    flat[0].wrapping_add(d)
                } else {
                    flat[i - 1].wrapping_add(flat[i]).wrapping_add(d)
                };
            }
        } else {
            for i in (0..flat.len()).rev() {
                let d = discretize(cursor.pull()?);
                flat[i] = if i == 0 {
                    flat[0].wrapping_sub(d)
                } else {
                    flat[i].wrapping_sub(flat[i - 1]).wrapping_sub(d)
                };
            }
        }
    }
    for (dst, src) in image.iter_mut().zip(flat) {
        *dst = src;
    }
    Ok(image)
}
