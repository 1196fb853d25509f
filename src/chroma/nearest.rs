use super::ChromaStrategy;
use crate::audio::spectrum::Spectrum;

/// Reads the magnitude of the closest bin to each reference frequency.
///
/// References below or above the spectrum land on its first or last bin, so
/// octaves outside the analysis range still contribute the edge bin.
#[derive(Debug, Clone, Copy, Default)]
pub struct NearestBin;

impl ChromaStrategy for NearestBin {
    fn strength_at(&self, spectrum: &Spectrum, reference_hz: f32) -> f32 {
        spectrum
            .nearest_bin(reference_hz)
            .map_or(0.0, |i| spectrum.magnitudes[i])
    }
}
