use std::path::PathBuf;

/// Failures of the chroma pipeline and its input boundary.
#[derive(Debug, thiserror::Error)]
pub enum KeyError {
    #[error("could not open {}: {source}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not decode audio: {0}")]
    Decode(String),

    #[error("invalid audio: {0}")]
    InvalidAudio(String),

    #[error("audio contains no samples")]
    EmptySignal,

    #[error("restricted spectrum has {bins} bin(s), need at least 2")]
    InsufficientData { bins: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, KeyError>;
