// In: src/metrics.rs

//! Image quality metrics used to evaluate cipher output and attack damage.
//!
//! These are evaluation-only collaborators: the cipher itself never consults
//! them. Each takes two images of identical shape and returns one scalar.

use crate::error::KaosError;
use crate::utils::ensure_same_shape;
use crate::Image;

const MAX_PIXEL: f64 = 255.0;

/// Mean squared error between two images.
pub fn mse(a: &Image, b: &Image) -> Result<f64, KaosError> {
    ensure_same_shape(a, b)?;
    let sum: f64 = a
        .iter()
        .zip(b.iter())
        .map(|(&x, &y)| {
            let d = x as f64 - y as f64;
            d * d
        })
        .sum();
    Ok(sum / a.len() as f64)
}

/// Peak signal-to-noise ratio in dB. Identical images yield `f64::INFINITY`.
pub fn psnr(a: &Image, b: &Image) -> Result<f64, KaosError> {
    let mse = mse(a, b)?;
    if mse == 0.0 {
        return Ok(f64::INFINITY);
    }
    Ok(20.0 * (MAX_PIXEL / mse.sqrt()).log10())
}

/// Structural similarity index, global-statistics form.
///
/// Computed per channel from whole-channel means, variances and covariance,
/// then averaged across channels. Returns a value in [-1, 1]; 1 means
/// structurally identical.
pub fn ssim(a: &Image, b: &Image) -> Result<f64, KaosError> {
    ensure_same_shape(a, b)?;
    let (_, _, c) = a.dim();
    let c1 = (0.01 * MAX_PIXEL) * (0.01 * MAX_PIXEL);
    let c2 = (0.03 * MAX_PIXEL) * (0.03 * MAX_PIXEL);

    let mut total = 0.0;
    for ch in 0..c {
        let xs = a.index_axis(ndarray::Axis(2), ch);
        let ys = b.index_axis(ndarray::Axis(2), ch);
        let n = xs.len() as f64;

        let mean_x: f64 = xs.iter().map(|&v| v as f64).sum::<f64>() / n;
        let mean_y: f64 = ys.iter().map(|&v| v as f64).sum::<f64>() / n;
        let var_x: f64 = xs
            .iter()
            .map(|&v| (v as f64 - mean_x) * (v as f64 - mean_x))
            .sum::<f64>()
            / n;
        let var_y: f64 = ys
            .iter()
            .map(|&v| (v as f64 - mean_y) * (v as f64 - mean_y))
            .sum::<f64>()
            / n;
        let cov: f64 = xs
            .iter()
            .zip(ys.iter())
            .map(|(&x, &y)| (x as f64 - mean_x) * (y as f64 - mean_y))
            .sum::<f64>()
            / n;

        total += ((2.0 * mean_x * mean_y + c1) * (2.0 * cov + c2))
            / ((mean_x * mean_x + mean_y * mean_y + c1) * (var_x + var_y + c2));
    }
    Ok(total / c as f64)
}
