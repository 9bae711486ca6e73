//! 16-bit PCM WAV container I/O.
//!
//! `hound` encodes and decodes samples as little-endian on every host, so the persisted byte
//! order never depends on the machine running the conversion.

mod error;
mod reader;
mod writer;

pub use error::WavError;
pub use reader::read_pcm16;
pub use writer::write_pcm16;

/// The only sample width, in bytes, the container layer accepts.
pub const SUPPORTED_SAMPLE_WIDTH: u16 = 2;

/// Recording parameters copied verbatim from input to output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordingParams {
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Number of interleaved channels.
    pub channels: u16,
    /// Bytes per sample.
    pub sample_width: u16,
    /// Frames in the recording (samples per channel).
    pub frame_count: u32,
}

impl RecordingParams {
    /// Parameters for a 16-bit stream of `sample_count` interleaved samples.
    pub fn pcm16(sample_rate: u32, channels: u16, sample_count: usize) -> Self {
        Self {
            sample_rate,
            channels,
            sample_width: SUPPORTED_SAMPLE_WIDTH,
            frame_count: (sample_count / channels.max(1) as usize) as u32,
        }
    }

    /// Recording length in seconds.
    pub fn duration_seconds(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        f64::from(self.frame_count) / f64::from(self.sample_rate)
    }

    pub(crate) fn wav_spec(&self) -> hound::WavSpec {
        hound::WavSpec {
            channels: self.channels,
            sample_rate: self.sample_rate,
            bits_per_sample: self.sample_width * 8,
            sample_format: hound::SampleFormat::Int,
        }
    }
}

/// A decoded recording: parameters plus interleaved samples.
#[derive(Debug, Clone, PartialEq)]
pub struct Recording {
    pub params: RecordingParams,
    pub samples: Vec<i16>,
}
