// In: src/attack.rs

//! Attack simulators: controlled corruption of cipher images for robustness
//! evaluation.
//!
//! Each attack returns a corrupted copy of identical shape. The cipher makes
//! no correctness guarantee once cipher data has been altered; decryption of
//! an attacked image is expected to produce visibly degraded, not-crash
//! output. Randomness comes from a caller-supplied rng, so evaluations stay
//! reproducible per seed.

use rand::Rng;

use crate::Image;

/// The closed set of corruption attacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attack {
    /// Replace `times` random pixels with random values.
    PointReplace { times: usize },
    /// Zero out `times` random rows.
    RowErase { times: usize },
    /// Zero out `times` random columns.
    ColumnErase { times: usize },
}

impl Attack {
    /// Applies the attack to a copy of `image`.
    pub fn corrupt<R: Rng>(&self, image: &Image, rng: &mut R) -> Image {
        let mut attacked = image.clone();
        let (h, w, c) = image.dim();
        if h == 0 || w == 0 || c == 0 {
            return attacked;
        }
        match *self {
            Attack::PointReplace { times } => {
                for _ in 0..times {
                    let x = rng.random_range(0..h);
                    let y = rng.random_range(0..w);
                    let z = rng.random_range(0..c);
                    attacked[[x, y, z]] = rng.random_range(0..=255u8);
                }
            }
            Attack::RowErase { times } => {
                for _ in 0..times {
                    let x = rng.random_range(0..h);
                    for y in 0..w {
                        for z in 0..c {
                            attacked[[x, y, z]] = 0;
                        }
                    }
                }
            }
            Attack::ColumnErase { times } => {
                for _ in 0..times {
                    let y = rng.random_range(0..w);
                    for x in 0..h {
                        for z in 0..c {
                            attacked[[x, y, z]] = 0;
                        }
                    }
                }
            }
        }
        attacked
    }
}
