use serde::Serialize;

use crate::audio::decode::SampleMatrix;
use crate::audio::mix::mix_down;
use crate::audio::spectrum::{one_sided, restrict, Spectrum};
use crate::audio::weighting::apply_weighting;
use crate::chroma::ChromaVector;
use crate::config::AnalysisConfig;
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChromaAnalysis {
    pub sample_rate: u32,
    pub frames: usize,
    /// Restricted and weighted spectrum the chroma was read from.
    pub spectrum: Spectrum,
    pub chroma: ChromaVector,
}

/// Runs the whole pipeline on one decoded clip: mix down, transform, clip to
/// the analysis range, weight, then fold into pitch classes.
///
/// Pure function of its inputs; no I/O.
pub fn analyze(samples: &SampleMatrix, config: &AnalysisConfig) -> Result<ChromaAnalysis> {
    config.validate()?;

    let mixed = mix_down(samples, config.mix)?;
    let full = one_sided(&mixed, samples.sample_rate)?;
    let mut spectrum = restrict(&full, config.range_bottom_hz, config.range_top_hz)?;
    apply_weighting(&mut spectrum)?;

    let strategy = config.strategy.build(config.band_cents);
    let chroma = strategy.aggregate(&spectrum);

    log::debug!(
        "Chroma over {} bins ({:?}, {:?} mix): {}",
        spectrum.len(),
        config.strategy,
        config.mix,
        chroma
    );

    Ok(ChromaAnalysis {
        sample_rate: samples.sample_rate,
        frames: samples.frames(),
        spectrum,
        chroma,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::KeyError;

    fn tone(freq: f32, sample_rate: u32, secs: f32) -> SampleMatrix {
        let len = (sample_rate as f32 * secs) as usize;
        let wave: Vec<f32> = (0..len)
            .map(|i| {
                let t = i as f64 / sample_rate as f64;
                (2.0 * std::f64::consts::PI * freq as f64 * t).sin() as f32
            })
            .collect();
        SampleMatrix::from_channels(sample_rate, &[wave.clone(), wave]).unwrap()
    }

    #[test]
    fn a440_peaks_at_a() {
        let result = analyze(&tone(440.0, 44100, 1.0), &AnalysisConfig::default()).unwrap();
        assert_eq!(result.chroma.as_slice().len(), 12);
        assert!(result.chroma.as_slice().iter().all(|&v| v >= 0.0));
        assert_eq!(result.chroma.dominant().map(|p| p.index()), Some(9));
    }

    #[test]
    fn silence_gives_zero_chroma() {
        let silent = SampleMatrix::from_channels(44100, &[vec![0.0; 44100], vec![0.0; 44100]])
            .unwrap();
        let result = analyze(&silent, &AnalysisConfig::default()).unwrap();
        assert!(result.chroma.as_slice().iter().all(|&v| v == 0.0));
        assert_eq!(result.chroma.dominant(), None);
    }

    #[test]
    fn deterministic() {
        let clip = tone(261.63, 22050, 0.5);
        let config = AnalysisConfig::default();
        let a = analyze(&clip, &config).unwrap();
        let b = analyze(&clip, &config).unwrap();
        let bits = |c: &ChromaVector| c.0.map(f32::to_bits);
        assert_eq!(bits(&a.chroma), bits(&b.chroma));
    }

    #[test]
    fn spectrum_bounds_follow_index_formula() {
        let result = analyze(&tone(440.0, 44100, 1.0), &AnalysisConfig::default()).unwrap();
        let freqs = &result.spectrum.freqs_hz;
        // 1 Hz bins: floor(60/1)*2 .. floor(4200/1)*2
        assert_eq!(freqs[0], 120.0);
        assert_eq!(*freqs.last().unwrap(), 8399.0);
        assert_eq!(result.spectrum.magnitudes.len(), freqs.len());
        assert!(result.spectrum.magnitudes.last().unwrap().abs() < 1e-3);
    }

    #[test]
    fn mono_input_rejected() {
        let mono = SampleMatrix::from_channels(44100, &[vec![0.1; 100]]).unwrap();
        let err = analyze(&mono, &AnalysisConfig::default()).unwrap_err();
        assert!(matches!(err, KeyError::InvalidAudio(_)));
    }

    #[test]
    fn empty_input_rejected() {
        let empty = SampleMatrix::from_channels(44100, &[vec![], vec![]]).unwrap();
        let err = analyze(&empty, &AnalysisConfig::default()).unwrap_err();
        assert!(matches!(err, KeyError::EmptySignal));
    }

    #[test]
    fn out_of_range_top_bounds() {
        let clip = tone(440.0, 8000, 1.0);
        let huge = AnalysisConfig {
            range_top_hz: 1.0e19,
            ..Default::default()
        };
        let result = analyze(&clip, &huge).unwrap();
        assert_eq!(*result.spectrum.freqs_hz.last().unwrap(), 4000.0);

        let infinite = AnalysisConfig {
            range_top_hz: f32::INFINITY,
            ..Default::default()
        };
        let err = analyze(&clip, &infinite).unwrap_err();
        assert!(matches!(err, KeyError::InvalidConfig(_)));
    }

    #[test]
    fn too_short_for_range() {
        // 10 frames at 44.1 kHz leave bins every 4410 Hz; the range keeps none of them
        let short = SampleMatrix::from_channels(44100, &[vec![0.5; 10], vec![0.5; 10]]).unwrap();
        let err = analyze(&short, &AnalysisConfig::default()).unwrap_err();
        assert!(matches!(err, KeyError::InsufficientData { .. }));
    }
}
