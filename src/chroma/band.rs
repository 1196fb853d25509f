use super::ChromaStrategy;
use crate::audio::spectrum::Spectrum;

/// Reads the loudest bin within `cents` of each reference frequency.
///
/// Tolerates instruments tuned slightly away from A4 = 440 Hz. A band that
/// contains no bin (too narrow for the resolution, or outside the spectrum)
/// falls back to the nearest bin.
#[derive(Debug, Clone, Copy)]
pub struct ToleranceBand {
    ratio: f32,
}

impl ToleranceBand {
    pub fn new(cents: f32) -> Self {
        Self {
            ratio: 2f32.powf(cents.abs() / 1200.0),
        }
    }
}

impl ChromaStrategy for ToleranceBand {
    fn strength_at(&self, spectrum: &Spectrum, reference_hz: f32) -> f32 {
        let low = reference_hz / self.ratio;
        let high = reference_hz * self.ratio;
        let start = spectrum.freqs_hz.partition_point(|&f| f < low);
        let end = spectrum.freqs_hz.partition_point(|&f| f <= high);

        if start < end {
            spectrum.magnitudes[start..end]
                .iter()
                .copied()
                .fold(0.0, f32::max)
        } else {
            spectrum
                .nearest_bin(reference_hz)
                .map_or(0.0, |i| spectrum.magnitudes[i])
        }
    }
}
