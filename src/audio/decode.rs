use std::path::Path;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::error::{KeyError, Result};

/// Decoded audio kept as an interleaved `frames x channels` matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleMatrix {
    pub sample_rate: u32,
    pub channels: usize,
    /// Interleaved samples, `frames * channels` long.
    pub data: Vec<f32>,
}

impl SampleMatrix {
    /// Builds a matrix from one `Vec` per channel. All channels must have the same length.
    pub fn from_channels(sample_rate: u32, channels: &[Vec<f32>]) -> Result<Self> {
        let frames = channels.first().map_or(0, Vec::len);
        if let Some(bad) = channels.iter().position(|c| c.len() != frames) {
            return Err(KeyError::InvalidAudio(format!(
                "channel {} has {} samples, expected {}",
                bad,
                channels[bad].len(),
                frames
            )));
        }

        let mut data = Vec::with_capacity(frames * channels.len());
        for i in 0..frames {
            data.extend(channels.iter().map(|c| c[i]));
        }

        Ok(Self {
            sample_rate,
            channels: channels.len(),
            data,
        })
    }

    pub fn frames(&self) -> usize {
        if self.channels == 0 {
            0
        } else {
            self.data.len() / self.channels
        }
    }

    /// Samples of one channel, in frame order.
    pub fn channel(&self, index: usize) -> impl Iterator<Item = f32> + '_ {
        self.data
            .iter()
            .skip(index)
            .step_by(self.channels.max(1))
            .copied()
            .take(if index < self.channels { self.frames() } else { 0 })
    }
}

pub fn decode_file(path: &Path) -> Result<SampleMatrix> {
    let file = std::fs::File::open(path).map_err(|source| KeyError::FileAccess {
        path: path.to_path_buf(),
        source,
    })?;

    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(&hint, mss, &FormatOptions::default(), &MetadataOptions::default())
        .map_err(|e| KeyError::Decode(format!("unrecognised container ({})", e)))?;

    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != symphonia::core::codecs::CODEC_TYPE_NULL)
        .ok_or_else(|| KeyError::Decode("no audio tracks found".into()))?;

    let track_id = track.id;
    let mut channels = track.codec_params.channels.map_or(0, |c| c.count());
    let sample_rate = track
        .codec_params
        .sample_rate
        .ok_or_else(|| KeyError::Decode("unknown sample rate".into()))?;

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|e| KeyError::Decode(format!("unsupported codec ({})", e)))?;

    let mut data: Vec<f32> = Vec::new();

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(ref e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break;
            }
            Err(e) => return Err(KeyError::Decode(e.to_string())),
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(d) => d,
            Err(SymphoniaError::DecodeError(msg)) => {
                log::warn!("Skipping corrupt packet in {}: {}", path.display(), msg);
                continue;
            }
            Err(e) => return Err(KeyError::Decode(e.to_string())),
        };

        let spec = *decoded.spec();
        channels = spec.channels.count();

        let mut sample_buf = SampleBuffer::<f32>::new(decoded.frames() as u64, spec);
        sample_buf.copy_interleaved_ref(decoded);
        data.extend_from_slice(sample_buf.samples());
    }

    let matrix = SampleMatrix {
        sample_rate,
        channels,
        data,
    };

    log::debug!(
        "Decoded {}: {} frames x {} channels, {}Hz, {:.2}s",
        path.display(),
        matrix.frames(),
        matrix.channels,
        sample_rate,
        matrix.frames() as f32 / sample_rate as f32
    );

    Ok(matrix)
}
