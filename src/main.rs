mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use rayon::prelude::*;
use std::path::{Path, PathBuf};

use cli::Cli;
use keychroma::audio::mix::MixMode;
use keychroma::config::{
    self, AnalysisConfig, DEFAULT_BAND_CENTS, DEFAULT_RANGE_BOTTOM_HZ, DEFAULT_RANGE_TOP_HZ,
};
use keychroma::music::KEY_SIGNATURES;
use keychroma::report::{self, ChromaReport};
use keychroma::{ChromaAnalysis, StrategyKind};

fn main() -> Result<()> {
    let mut cli = Cli::parse();

    let default_filter = if cli.quiet { "warn" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp_millis()
        .init();

    if let Some(path) = config::find_config(cli.config.as_deref()) {
        if let Some(cfg) = config::load_config(&path) {
            log::info!("Loaded config from {}", path.display());
            // Config values apply only when the CLI flag is at its default
            if cli.range_bottom == DEFAULT_RANGE_BOTTOM_HZ {
                cli.range_bottom = cfg.analysis.range_bottom_hz;
            }
            if cli.range_top == DEFAULT_RANGE_TOP_HZ {
                cli.range_top = cfg.analysis.range_top_hz;
            }
            if cli.mix == MixMode::Legacy {
                cli.mix = cfg.analysis.mix;
            }
            if cli.strategy == StrategyKind::NearestBin {
                cli.strategy = cfg.analysis.strategy;
            }
            if cli.band_cents == DEFAULT_BAND_CENTS {
                cli.band_cents = cfg.analysis.band_cents;
            }
            if !cli.json {
                cli.json = cfg.output.json;
            }
        } else {
            log::warn!("Failed to load config from {}", path.display());
        }
    }

    if cli.list_keys {
        println!("Key signatures:");
        for key in &KEY_SIGNATURES {
            println!("  {}", key);
        }
        return Ok(());
    }

    let analysis_config = AnalysisConfig {
        range_bottom_hz: cli.range_bottom,
        range_top_hz: cli.range_top,
        mix: cli.mix,
        strategy: cli.strategy,
        band_cents: cli.band_cents,
    };
    analysis_config.validate().context("Rejected analysis settings")?;

    let inputs = cli.inputs();
    log::info!(
        "Analyzing {} file(s): {:.0}-{:.0}Hz, {:?} mix, {:?}",
        inputs.len(),
        analysis_config.range_bottom_hz,
        analysis_config.range_top_hz,
        analysis_config.mix,
        analysis_config.strategy
    );

    // Each clip is an independent pipeline run; output stays in input order.
    let results: Vec<(PathBuf, keychroma::Result<ChromaAnalysis>)> = inputs
        .into_par_iter()
        .map(|path| {
            let result = run_one(&path, &analysis_config);
            (path, result)
        })
        .collect();

    let mut failures = 0usize;
    for (path, result) in &results {
        match result {
            Ok(analysis) => {
                let report = ChromaReport::new(path, analysis);
                if cli.json {
                    println!("{}", report.to_json().context("Failed to serialize chroma")?);
                } else {
                    print!("{}", report.to_text());
                }
                if let Some(ref dir) = cli.spectrum_out {
                    if let Err(err) = report::write_spectrum(dir, path, &analysis.spectrum) {
                        log::error!("{}", err);
                        failures += 1;
                    }
                }
            }
            Err(err) => {
                println!("Error: {}. Please try again with the name of a wav file", err);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        log::warn!("{} of {} file(s) failed", failures, results.len());
        std::process::exit(1);
    }
    Ok(())
}

fn run_one(path: &Path, config: &AnalysisConfig) -> keychroma::Result<ChromaAnalysis> {
    let samples = keychroma::decode_file(path)?;
    let analysis = keychroma::analyze(&samples, config)?;
    log::info!(
        "{}: {} frames @ {}Hz, strongest pitch class {}",
        path.display(),
        analysis.frames,
        analysis.sample_rate,
        analysis.chroma.dominant().map_or("-", |p| p.name())
    );
    Ok(analysis)
}
