use serde::Serialize;
use std::fmt::Write as _;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use crate::analysis::ChromaAnalysis;
use crate::audio::spectrum::Spectrum;
use crate::chroma::ChromaVector;
use crate::error::{KeyError, Result};
use crate::music::notes::PitchClass;

#[derive(Debug, Serialize)]
pub struct ChromaReport<'a> {
    pub file: String,
    pub sample_rate: u32,
    pub frames: usize,
    pub chroma: &'a ChromaVector,
    pub dominant: Option<&'static str>,
}

impl<'a> ChromaReport<'a> {
    pub fn new(file: &Path, analysis: &'a ChromaAnalysis) -> Self {
        Self {
            file: file.display().to_string(),
            sample_rate: analysis.sample_rate,
            frames: analysis.frames,
            chroma: &analysis.chroma,
            dominant: analysis.chroma.dominant().map(PitchClass::name),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Raw vector on the first line, then one line per pitch class with a bar scaled to the peak.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.file);
        let _ = writeln!(out, "{}", self.chroma);

        let peak = self.chroma.as_slice().iter().copied().fold(0.0f32, f32::max);
        for pc in PitchClass::all() {
            let value = self.chroma.get(pc);
            let width = if peak > 0.0 {
                (value / peak * 40.0).round() as usize
            } else {
                0
            };
            let _ = writeln!(out, "  {:<2} {:>14.4} {}", pc.name(), value, "#".repeat(width));
        }
        out
    }
}

/// Writes the weighted spectrum as `<dir>/<stem>.spectrum.json` and returns that path.
pub fn write_spectrum(dir: &Path, input: &Path, spectrum: &Spectrum) -> Result<PathBuf> {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "input".to_string());
    let path = dir.join(format!("{}.spectrum.json", stem));

    let to_io_err = |source: std::io::Error| KeyError::FileAccess {
        path: path.clone(),
        source,
    };

    std::fs::create_dir_all(dir).map_err(&to_io_err)?;
    let file = std::fs::File::create(&path).map_err(&to_io_err)?;
    let mut writer = std::io::BufWriter::new(file);
    serde_json::to_writer(&mut writer, spectrum).map_err(|e| to_io_err(e.into()))?;
    writer.flush().map_err(&to_io_err)?;

    log::info!("Wrote spectrum ({} bins) to {}", spectrum.len(), path.display());
    Ok(path)
}
