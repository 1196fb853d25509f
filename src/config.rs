use serde::Deserialize;
use std::path::Path;

use crate::audio::mix::MixMode;
use crate::chroma::StrategyKind;
use crate::error::{KeyError, Result};

pub const DEFAULT_RANGE_BOTTOM_HZ: f32 = 60.0;
pub const DEFAULT_RANGE_TOP_HZ: f32 = 4200.0;
pub const DEFAULT_BAND_CENTS: f32 = 50.0;

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Tunables for a single pipeline run.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default = "default_range_bottom_hz")]
    pub range_bottom_hz: f32,
    #[serde(default = "default_range_top_hz")]
    pub range_top_hz: f32,
    #[serde(default)]
    pub mix: MixMode,
    #[serde(default)]
    pub strategy: StrategyKind,
    /// Half-width of the tolerance band, only read by `StrategyKind::ToleranceBand`.
    #[serde(default = "default_band_cents")]
    pub band_cents: f32,
}

#[derive(Debug, Default, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub json: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            range_bottom_hz: default_range_bottom_hz(),
            range_top_hz: default_range_top_hz(),
            mix: MixMode::default(),
            strategy: StrategyKind::default(),
            band_cents: default_band_cents(),
        }
    }
}

impl AnalysisConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.range_bottom_hz.is_finite() || self.range_bottom_hz < 0.0 {
            return Err(KeyError::InvalidConfig(format!(
                "range_bottom_hz must be >= 0, got {}",
                self.range_bottom_hz
            )));
        }
        if !self.range_top_hz.is_finite() {
            return Err(KeyError::InvalidConfig(format!(
                "range_top_hz must be finite, got {}",
                self.range_top_hz
            )));
        }
        if self.range_top_hz <= self.range_bottom_hz {
            return Err(KeyError::InvalidConfig(format!(
                "range_top_hz ({}) must be above range_bottom_hz ({})",
                self.range_top_hz, self.range_bottom_hz
            )));
        }
        if !self.band_cents.is_finite() || self.band_cents <= 0.0 {
            return Err(KeyError::InvalidConfig(format!(
                "band_cents must be > 0, got {}",
                self.band_cents
            )));
        }
        Ok(())
    }
}

fn default_range_bottom_hz() -> f32 { DEFAULT_RANGE_BOTTOM_HZ }
fn default_range_top_hz() -> f32 { DEFAULT_RANGE_TOP_HZ }
fn default_band_cents() -> f32 { DEFAULT_BAND_CENTS }

pub fn load_config(path: &Path) -> Option<Config> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str(&content) {
        Ok(cfg) => Some(cfg),
        Err(err) => {
            log::warn!("Config parse error in {}: {}", path.display(), err);
            None
        }
    }
}

/// Explicit path first, then `./keychroma.toml`, then the per-user config locations.
pub fn find_config(explicit: Option<&Path>) -> Option<std::path::PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    let local = std::path::PathBuf::from("keychroma.toml");
    if local.exists() {
        return Some(local);
    }
    if let Some(home) = dirs::home_dir() {
        let xdg = home.join(".config").join("keychroma").join("config.toml");
        if xdg.exists() {
            return Some(xdg);
        }
    }
    if let Some(config_dir) = dirs::config_dir() {
        let platform = config_dir.join("keychroma").join("config.toml");
        if platform.exists() {
            return Some(platform);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let cfg: Config = toml::from_str("").unwrap();
        assert_eq!(cfg.analysis, AnalysisConfig::default());
        assert!(!cfg.output.json);
    }

    #[test]
    fn partial_analysis_table() {
        let cfg: Config = toml::from_str(
            r#"
            [analysis]
            range_top_hz = 2000.0
            mix = "average"
            strategy = "tolerance-band"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.analysis.range_bottom_hz, DEFAULT_RANGE_BOTTOM_HZ);
        assert_eq!(cfg.analysis.range_top_hz, 2000.0);
        assert_eq!(cfg.analysis.mix, MixMode::Average);
        assert_eq!(cfg.analysis.strategy, StrategyKind::ToleranceBand);
    }

    #[test]
    fn rejects_inverted_range() {
        let cfg = AnalysisConfig {
            range_bottom_hz: 500.0,
            range_top_hz: 100.0,
            ..Default::default()
        };
        assert!(matches!(cfg.validate(), Err(KeyError::InvalidConfig(_))));
    }

    #[test]
    fn rejects_nan_band() {
        let cfg = AnalysisConfig {
            band_cents: f32::NAN,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
        assert!(AnalysisConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_non_finite_bounds() {
        for top in [f32::INFINITY, f32::NAN] {
            let cfg = AnalysisConfig {
                range_top_hz: top,
                ..Default::default()
            };
            assert!(matches!(cfg.validate(), Err(KeyError::InvalidConfig(_))), "{}", top);
        }
        let cfg = AnalysisConfig {
            range_bottom_hz: f32::INFINITY,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn malformed_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keychroma.toml");
        std::fs::write(&path, "[analysis]\nrange_top_hz = \"high\"\n").unwrap();
        assert!(load_config(&path).is_none());
    }

    #[test]
    fn missing_file_is_none() {
        assert!(load_config(Path::new("/nonexistent/keychroma.toml")).is_none());
    }
}
