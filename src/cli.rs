use clap::Parser;
use std::path::PathBuf;

use keychroma::audio::mix::MixMode;
use keychroma::config::{DEFAULT_BAND_CENTS, DEFAULT_RANGE_BOTTOM_HZ, DEFAULT_RANGE_TOP_HZ};
use keychroma::StrategyKind;

pub const DEFAULT_INPUT: &str = "i_iv_v_keyA.wav";

#[derive(Parser, Debug)]
#[command(name = "keychroma", about = "Pitch-class strength profile of a recorded clip")]
pub struct Cli {
    /// Input audio files (WAV, MP3, FLAC, OGG); defaults to i_iv_v_keyA.wav
    pub inputs: Vec<PathBuf>,

    /// Config file (TOML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Lower analysis bound in Hz
    #[arg(long, default_value_t = DEFAULT_RANGE_BOTTOM_HZ)]
    pub range_bottom: f32,

    /// Upper analysis bound in Hz
    #[arg(long, default_value_t = DEFAULT_RANGE_TOP_HZ)]
    pub range_top: f32,

    /// How the first two channels are folded to mono
    #[arg(long, value_enum, default_value_t = MixMode::Legacy)]
    pub mix: MixMode,

    /// How each reference pitch is read from the spectrum
    #[arg(short, long, value_enum, default_value_t = StrategyKind::NearestBin)]
    pub strategy: StrategyKind,

    /// Half-width of the tolerance band in cents
    #[arg(long, default_value_t = DEFAULT_BAND_CENTS)]
    pub band_cents: f32,

    /// Print one JSON object per file instead of the text table
    #[arg(long)]
    pub json: bool,

    /// Write each weighted spectrum as JSON into this directory
    #[arg(long)]
    pub spectrum_out: Option<PathBuf>,

    /// List the major key signatures and exit
    #[arg(long)]
    pub list_keys: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    pub fn inputs(&self) -> Vec<PathBuf> {
        if self.inputs.is_empty() {
            vec![PathBuf::from(DEFAULT_INPUT)]
        } else {
            self.inputs.clone()
        }
    }
}
