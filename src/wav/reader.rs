use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use hound::SampleFormat;
use tracing::debug;

use super::{Recording, RecordingParams, SUPPORTED_SAMPLE_WIDTH, WavError};

/// Read a 16-bit PCM WAV file into interleaved samples.
///
/// Rejects every other sample width and float data before any sample is decoded.
pub fn read_pcm16(path: &Path) -> Result<Recording, WavError> {
    let file = File::open(path).map_err(|source| WavError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let buf_reader = BufReader::with_capacity(1024 * 1024, file);
    let mut reader = hound::WavReader::new(buf_reader).map_err(|source| WavError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    let spec = reader.spec();
    if spec.sample_format != SampleFormat::Int
        || spec.bits_per_sample != SUPPORTED_SAMPLE_WIDTH * 8
    {
        return Err(WavError::UnsupportedFormat {
            path: path.to_path_buf(),
            bits_per_sample: spec.bits_per_sample,
            format: match spec.sample_format {
                SampleFormat::Int => "integer",
                SampleFormat::Float => "float",
            },
        });
    }
    let frame_count = reader.duration();
    let samples = reader
        .samples::<i16>()
        .map(|s| {
            s.map_err(|source| WavError::Decode {
                path: path.to_path_buf(),
                source,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    debug!(
        path = %path.display(),
        samples = samples.len(),
        sample_rate = spec.sample_rate,
        channels = spec.channels,
        "Read wav"
    );
    Ok(Recording {
        params: RecordingParams {
            sample_rate: spec.sample_rate,
            channels: spec.channels,
            sample_width: SUPPORTED_SAMPLE_WIDTH,
            frame_count,
        },
        samples,
    })
}
