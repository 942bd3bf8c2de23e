// In: src/ops/shuffle.rs

//! Permutation kernels: sequence-driven row and column swaps.
//!
//! A swap is its own inverse, so decryption replays the *same* index pairs a
//! second time. Correctness therefore hinges entirely on pull order: per
//! repetition the channels are walked forward on encrypt and backward on
//! decrypt, which lines each pair of pulls up with its mirror position in the
//! reversed sequence. The swap itself is identical in both directions.

use crate::error::KaosError;
use crate::sequence::SequenceCursor;
use crate::utils::discretize;
use crate::Image;

/// Swaps two sequence-selected rows within each channel, `times` repetitions.
pub(crate) fn shuffle_rows(
    mut image: Image,
    cursor: &mut SequenceCursor,
    times: usize,
    reverse: bool,
) -> Result<Image, KaosError> {
    let (h, w, c) = image.dim();
    for _ in 0..times {
        for step in 0..c {
            // Channel traversal flips under reverse to mirror pull order.
            let dim = if reverse { c - 1 - step } else { step };
            let x1 = discretize(cursor.pull()?) as usize % h;
            let x2 = discretize(cursor.pull()?) as usize % h;
            for j in 0..w {
                image.swap([x1, j, dim], [x2, j, dim]);
            }
        }
    }
    Ok(image)
}

/// Swaps two sequence-selected columns within each channel, `times` repetitions.
pub(crate) fn shuffle_columns(
    mut image: Image,
    cursor: &mut SequenceCursor,
    times: usize,
    reverse: bool,
) -> Result<Image, KaosError> {
    let (h, w, c) = image.dim();
    for _ in 0..times {
        for step in 0..c {
            let dim = if reverse { c - 1 - step } else { step };
            let y1 = discretize(cursor.pull()?) as usize % w;
            let y2 = discretize(cursor.pull()?) as usize % w;
            for i in 0..h {
                image.swap([i, y1, dim], [i, y2, dim]);
            }
        }
    }
    Ok(image)
}
