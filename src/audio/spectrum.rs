use rustfft::{num_complex::Complex, FftPlanner};
use serde::Serialize;

use crate::error::{KeyError, Result};

/// Scale applied to `floor(bound / freq_step)` when clipping to the analysis range.
///
/// Carried over from the packed real-FFT layout the range bounds were first
/// tuned against, where bin `k` sat at index `2k`. On a plain one-sided spectrum
/// it places both bounds at twice their nominal frequency (60-4200 Hz keeps
/// roughly 120-8400 Hz). Left as-is until reference recordings are re-profiled.
pub const RANGE_INDEX_SCALE: usize = 2;

/// Magnitude spectrum with its frequency axis. Both vectors always have the same length.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Spectrum {
    pub freqs_hz: Vec<f32>,
    pub magnitudes: Vec<f32>,
}

impl Spectrum {
    pub fn len(&self) -> usize {
        self.magnitudes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.magnitudes.is_empty()
    }

    /// Spacing of the frequency axis, `None` with fewer than two bins.
    pub fn freq_step(&self) -> Option<f32> {
        match self.freqs_hz.as_slice() {
            [first, second, ..] => Some(second - first),
            _ => None,
        }
    }

    /// Index of the bin whose frequency is closest to `hz`. Ties go to the lower index.
    pub fn nearest_bin(&self, hz: f32) -> Option<usize> {
        if self.is_empty() {
            return None;
        }
        let upper = self.freqs_hz.partition_point(|&f| f < hz);
        if upper == 0 {
            return Some(0);
        }
        if upper == self.len() {
            return Some(self.len() - 1);
        }
        let below = hz - self.freqs_hz[upper - 1];
        let above = self.freqs_hz[upper] - hz;
        Some(if above < below { upper } else { upper - 1 })
    }
}

/// One-sided magnitude spectrum of a real signal: `n / 2 + 1` bins at `k * sample_rate / n` Hz.
pub fn one_sided(signal: &[f32], sample_rate: u32) -> Result<Spectrum> {
    let n = signal.len();
    if n == 0 {
        return Err(KeyError::EmptySignal);
    }

    let mut planner = FftPlanner::<f32>::new();
    let fft = planner.plan_fft_forward(n);

    let mut buffer: Vec<Complex<f32>> = signal.iter().map(|&s| Complex::new(s, 0.0)).collect();
    fft.process(&mut buffer);

    let bins = n / 2 + 1;
    let bin_hz = sample_rate as f32 / n as f32;
    let magnitudes: Vec<f32> = buffer[..bins].iter().map(|c| c.norm()).collect();
    let freqs_hz: Vec<f32> = (0..bins).map(|k| k as f32 * bin_hz).collect();

    log::debug!("FFT: {} samples -> {} bins, {:.4}Hz/bin", n, bins, bin_hz);

    Ok(Spectrum {
        freqs_hz,
        magnitudes,
    })
}

/// Clips a spectrum to `[bottom, top)` where each bound is `floor(hz / step) * RANGE_INDEX_SCALE`.
///
/// The top index is clamped to the spectrum length. Fewer than two remaining
/// bins is an error since nothing downstream can weight a single point.
pub fn restrict(spectrum: &Spectrum, bottom_hz: f32, top_hz: f32) -> Result<Spectrum> {
    let step = spectrum
        .freq_step()
        .filter(|s| *s > 0.0)
        .ok_or(KeyError::InsufficientData {
            bins: spectrum.len(),
        })?;

    // `as usize` saturates; the scale must too, so huge bounds land on the clamp below
    let bottom = ((bottom_hz / step).floor() as usize).saturating_mul(RANGE_INDEX_SCALE);
    let mut top = ((top_hz / step).floor() as usize).saturating_mul(RANGE_INDEX_SCALE);
    if top > spectrum.len() {
        log::warn!(
            "Range top index {} past spectrum end {}, clamping ({:.1}Hz available)",
            top,
            spectrum.len(),
            spectrum.freqs_hz[spectrum.len() - 1]
        );
        top = spectrum.len();
    }

    let bins = top.saturating_sub(bottom);
    if bins < 2 {
        return Err(KeyError::InsufficientData { bins });
    }

    log::debug!(
        "Range: bins {}..{} ({:.1}Hz-{:.1}Hz)",
        bottom,
        top,
        spectrum.freqs_hz[bottom],
        spectrum.freqs_hz[top - 1]
    );

    Ok(Spectrum {
        freqs_hz: spectrum.freqs_hz[bottom..top].to_vec(),
        magnitudes: spectrum.magnitudes[bottom..top].to_vec(),
    })
}
