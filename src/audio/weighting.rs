use super::spectrum::Spectrum;
use crate::error::{KeyError, Result};

/// `2^(1 - i/(n-1)) - 1`: falls from 1.0 at the first bin to 0.0 at the last.
///
/// Tilts the restricted spectrum towards its low end so overtones count for
/// less than the fundamentals that produced them.
pub fn weighting_curve(n: usize) -> Result<Vec<f32>> {
    if n < 2 {
        return Err(KeyError::InsufficientData { bins: n });
    }
    let last = (n - 1) as f64;
    Ok((0..n)
        .map(|i| (2f64.powf(1.0 - i as f64 / last) - 1.0) as f32)
        .collect())
}

pub fn apply_weighting(spectrum: &mut Spectrum) -> Result<()> {
    let curve = weighting_curve(spectrum.len())?;
    for (mag, w) in spectrum.magnitudes.iter_mut().zip(&curve) {
        *mag *= w;
    }
    Ok(())
}
