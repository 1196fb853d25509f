use serde::{Deserialize, Serialize};

use super::decode::SampleMatrix;
use crate::error::{KeyError, Result};

/// Gain applied to the second channel by `MixMode::Legacy`.
///
/// The legacy mix is `ch0 + ch1 / 2`, not an average. Existing reference
/// recordings were profiled with it, so it stays the default until they are
/// re-checked against `MixMode::Average`.
pub const LEGACY_SECOND_CHANNEL_GAIN: f32 = 0.5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum MixMode {
    /// `ch0 + ch1 / 2`
    #[default]
    Legacy,
    /// `(ch0 + ch1) / 2`
    Average,
}

/// Folds the first two channels into one signal. Channels past the second are ignored.
pub fn mix_down(samples: &SampleMatrix, mode: MixMode) -> Result<Vec<f32>> {
    if samples.channels < 2 {
        return Err(KeyError::InvalidAudio(format!(
            "expected at least 2 channels, found {}",
            samples.channels
        )));
    }
    if samples.frames() == 0 {
        return Err(KeyError::EmptySignal);
    }
    if samples.channels > 2 {
        log::debug!("Ignoring {} channel(s) past the first two", samples.channels - 2);
    }

    let mixed = samples
        .data
        .chunks_exact(samples.channels)
        .map(|frame| match mode {
            MixMode::Legacy => frame[0] + frame[1] * LEGACY_SECOND_CHANNEL_GAIN,
            MixMode::Average => (frame[0] + frame[1]) * 0.5,
        })
        .collect();

    Ok(mixed)
}
