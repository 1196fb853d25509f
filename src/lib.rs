//! Pitch-class (chroma) profiling of short recordings.
//!
//! [`analysis::analyze`] turns a decoded clip into a 12-entry strength vector:
//! mix the first two channels, take one magnitude spectrum of the whole clip,
//! clip it to the musical range, tilt it towards the low end, and sum the bins
//! sitting on each pitch class's reference frequencies.

pub mod analysis;
pub mod audio;
pub mod chroma;
pub mod config;
pub mod error;
pub mod music;
pub mod report;

pub use analysis::{analyze, ChromaAnalysis};
pub use audio::decode::{decode_file, SampleMatrix};
pub use chroma::{ChromaStrategy, ChromaVector, StrategyKind};
pub use config::AnalysisConfig;
pub use error::{KeyError, Result};
