// In: src/ops/mod.rs

//! The closed set of reversible cipher operations and their dispatcher.
//!
//! Every operation consumes a deterministic number of sequence values per
//! call (its *cost*) and reports that count as a pure function of image
//! shape and configuration, independent of the scalar values themselves. That
//! invariant is what lets decryption size one reverse replay sequence up
//! front and then run the operation list backward against it.

use crate::error::KaosError;
use crate::sequence::SequenceCursor;
use crate::utils::ensure_non_empty;
use crate::Image;

//==================================================================================
// 1. Module Declarations
//==================================================================================

/// Permutation kernels (row/column swap).
pub mod shuffle;

/// Diffusion kernel (predecessor-chained pixel avalanche).
pub mod diffusion;

/// Plugin seam for external frequency-domain stages.
pub mod transform;

pub use transform::TransformStage;

//==================================================================================
// 2. The Operation Enum
//==================================================================================

/// A unit of reversible image transformation.
///
/// `apply` with `reverse = false` is the encryption direction; with
/// `reverse = true` it undoes the forward pass, provided the cursor yields the
/// exact mirror of the forward pull stream.
#[derive(Debug)]
pub enum CipherOp {
    /// Swap two sequence-selected rows per channel, `times` repetitions.
    RowShuffle { times: usize },
    /// Swap two sequence-selected columns per channel, `times` repetitions.
    ColumnShuffle { times: usize },
    /// Predecessor-chained diffusion over the flattened pixel stream.
    Diffusion { times: usize },
    /// An ordered operation list, repeated `times` times.
    ///
    /// Reverse runs the inner list backward but keeps the outer repetition
    /// order. That is only sound while every sub-operation's cost is
    /// repetition-invariant, so each repetition consumes an identical-length
    /// slice of the sequence in either direction; all variants here qualify.
    Compositional { ops: Vec<CipherOp>, times: usize },
    /// An external shape-preserving transform stage; consumes no sequence values.
    Transform(Box<dyn TransformStage>),
}

impl CipherOp {
    /// Applies the operation, pulling `self.cost(image.dim())` values from the
    /// cursor.
    pub fn apply(
        &self,
        image: Image,
        cursor: &mut SequenceCursor,
        reverse: bool,
    ) -> Result<Image, KaosError> {
        ensure_non_empty(&image)?;
        match self {
            CipherOp::RowShuffle { times } => shuffle::shuffle_rows(image, cursor, *times, reverse),
            CipherOp::ColumnShuffle { times } => {
                shuffle::shuffle_columns(image, cursor, *times, reverse)
            }
            CipherOp::Diffusion { times } => diffusion::diffuse(image, cursor, *times, reverse),
            CipherOp::Compositional { ops, times } => {
                let mut image = image;
                for _ in 0..*times {
                    if !reverse {
                        for op in ops {
                            image = op.apply(image, cursor, reverse)?;
                        }
                    } else {
                        for op in ops.iter().rev() {
                            image = op.apply(image, cursor, reverse)?;
                        }
                    }
                }
                Ok(image)
            }
            CipherOp::Transform(stage) => {
                let shape = image.dim();
                let out = if reverse {
                    stage.backward(&image)?
                } else {
                    stage.forward(&image)?
                };
                // A stage that changes shape would silently desynchronize
                // reverse cost accounting; reject it here.
                if out.dim() != shape {
                    return Err(KaosError::ShapeMismatch {
                        expected: shape,
                        got: out.dim(),
                    });
                }
                Ok(out)
            }
        }
    }

    /// Number of sequence values one `apply` call consumes for the given
    /// image shape. Deterministic in shape and configuration only.
    pub fn cost(&self, shape: (usize, usize, usize)) -> usize {
        let (h, w, c) = shape;
        match self {
            CipherOp::RowShuffle { times } | CipherOp::ColumnShuffle { times } => 2 * c * times,
            CipherOp::Diffusion { times } => h * w * c * times,
            CipherOp::Compositional { ops, times } => {
                ops.iter().map(|op| op.cost(shape)).sum::<usize>() * times
            }
            CipherOp::Transform(_) => 0,
        }
    }
}

//==================================================================================
// 3. Unit Tests
//==================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array3;

    #[test]
    fn test_cost_formulas() {
        let shape = (16, 8, 3);
        assert_eq!(CipherOp::RowShuffle { times: 5 }.cost(shape), 2 * 3 * 5);
        assert_eq!(CipherOp::ColumnShuffle { times: 3 }.cost(shape), 2 * 3 * 3);
        assert_eq!(CipherOp::Diffusion { times: 2 }.cost(shape), 16 * 8 * 3 * 2);
        let composite = CipherOp::Compositional {
            ops: vec![
                CipherOp::RowShuffle { times: 5 },
                CipherOp::ColumnShuffle { times: 3 },
                CipherOp::Diffusion { times: 1 },
            ],
            times: 2,
        };
        assert_eq!(composite.cost(shape), (30 + 18 + 384) * 2);
    }

    #[test]
    fn test_cost_is_deterministic_across_calls() {
        let op = CipherOp::Compositional {
            ops: vec![
                CipherOp::RowShuffle { times: 2 },
                CipherOp::Diffusion { times: 1 },
            ],
            times: 3,
        };
        let shape = (7, 5, 3);
        let first = op.cost(shape);
        for _ in 0..10 {
            assert_eq!(op.cost(shape), first);
        }
    }

    #[test]
    fn test_empty_image_is_rejected() {
        let op = CipherOp::Diffusion { times: 1 };
        let image: Image = Array3::zeros((0, 3, 1));
        let mut cursor = SequenceCursor::Replay {
            values: vec![],
            pos: 0,
        };
        assert!(matches!(
            op.apply(image, &mut cursor, false),
            Err(KaosError::EmptyImage(_))
        ));
    }

    #[derive(Debug)]
    struct GrowByOneRow;

    impl TransformStage for GrowByOneRow {
        fn forward(&self, image: &Image) -> Result<Image, KaosError> {
            let (h, w, c) = image.dim();
            Ok(Array3::zeros((h + 1, w, c)))
        }

        fn backward(&self, image: &Image) -> Result<Image, KaosError> {
            Ok(image.clone())
        }
    }

    #[test]
    fn test_shape_changing_transform_fails_fast() {
        let op = CipherOp::Transform(Box::new(GrowByOneRow));
        assert_eq!(op.cost((4, 4, 1)), 0);
        let image: Image = Array3::zeros((4, 4, 1));
        let mut cursor = SequenceCursor::Replay {
            values: vec![],
            pos: 0,
        };
        let err = op.apply(image, &mut cursor, false).unwrap_err();
        assert!(matches!(
            err,
            KaosError::ShapeMismatch {
                expected: (4, 4, 1),
                got: (5, 4, 1)
            }
        ));
    }
}
