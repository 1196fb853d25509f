//! Folding a weighted spectrum into twelve pitch-class strengths.
//!
//! Every strategy visits the reference frequency of each pitch class in each
//! octave of [`NOTE_FREQUENCIES_HZ`](crate::music::NOTE_FREQUENCIES_HZ) and sums
//! what it reads from the spectrum there. They differ only in how a single
//! reference frequency is read.

mod band;
mod nearest;

pub use band::ToleranceBand;
pub use nearest::NearestBin;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::audio::spectrum::Spectrum;
use crate::music::notes::{PitchClass, PITCH_CLASSES};

/// Summed spectral strength per pitch class, index 0 = C through 11 = B.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ChromaVector(pub [f32; PITCH_CLASSES]);

impl ChromaVector {
    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    pub fn get(&self, pitch: PitchClass) -> f32 {
        self.0[pitch.index()]
    }

    /// Strongest pitch class, lowest index on ties. `None` when every entry is zero.
    pub fn dominant(&self) -> Option<PitchClass> {
        let mut best: Option<(usize, f32)> = None;
        for (i, &v) in self.0.iter().enumerate() {
            if v > best.map_or(0.0, |(_, b)| b) {
                best = Some((i, v));
            }
        }
        best.map(|(i, _)| PitchClass::new(i))
    }
}

impl fmt::Display for ChromaVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{:.8e}", v)?;
        }
        write!(f, "]")
    }
}

pub trait ChromaStrategy: Send + Sync {
    /// Strength read from `spectrum` for a single reference frequency.
    fn strength_at(&self, spectrum: &Spectrum, reference_hz: f32) -> f32;

    fn aggregate(&self, spectrum: &Spectrum) -> ChromaVector {
        let mut chroma = ChromaVector::default();
        for pc in PitchClass::all() {
            chroma.0[pc.index()] = pc
                .octave_frequencies()
                .map(|hz| self.strength_at(spectrum, hz))
                .sum();
        }
        chroma
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyKind {
    /// Single closest bin per reference frequency
    #[default]
    NearestBin,
    /// Loudest bin within a +/- cents window per reference frequency
    ToleranceBand,
}

impl StrategyKind {
    pub fn build(self, band_cents: f32) -> Box<dyn ChromaStrategy> {
        match self {
            StrategyKind::NearestBin => Box::new(NearestBin),
            StrategyKind::ToleranceBand => Box::new(ToleranceBand::new(band_cents)),
        }
    }
}
