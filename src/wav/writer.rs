use std::io::{self, BufWriter};
use std::path::Path;

use tempfile::{Builder, NamedTempFile};
use tracing::{debug, warn};

use super::{RecordingParams, SUPPORTED_SAMPLE_WIDTH, WavError};

/// Write 16-bit PCM samples to `path`, replacing any existing file.
///
/// Samples go to a temporary file in the destination directory that is renamed over `path`
/// only after the container is finalized, so a failure never leaves a truncated file behind.
pub fn write_pcm16(path: &Path, params: &RecordingParams, samples: &[i16]) -> Result<(), WavError> {
    if params.sample_width != SUPPORTED_SAMPLE_WIDTH {
        return Err(WavError::UnsupportedFormat {
            path: path.to_path_buf(),
            bits_per_sample: params.sample_width * 8,
            format: "integer",
        });
    }
    let dir = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let temp = create_temp_in(dir).map_err(|source| WavError::CreateTemp {
        path: path.to_path_buf(),
        source,
    })?;
    if let Ok(metadata) = std::fs::metadata(path)
        && let Err(err) = temp.as_file().set_permissions(metadata.permissions())
    {
        warn!("Could not carry permissions over to {}: {err}", path.display());
    }

    let encode_error = |source| WavError::Encode {
        path: path.to_path_buf(),
        source,
    };
    let buf_writer = BufWriter::with_capacity(1024 * 1024, temp.as_file());
    let mut writer = hound::WavWriter::new(buf_writer, params.wav_spec()).map_err(encode_error)?;
    for &sample in samples {
        writer.write_sample(sample).map_err(encode_error)?;
    }
    writer.finalize().map_err(encode_error)?;

    temp.persist(path).map_err(|err| WavError::Persist {
        path: path.to_path_buf(),
        source: err.error,
    })?;
    debug!(path = %path.display(), samples = samples.len(), "Wrote wav");
    Ok(())
}

/// Temp file that ends up with the same mode a plain `File::create` would give it.
fn create_temp_in(dir: &Path) -> io::Result<NamedTempFile> {
    #[cfg_attr(not(unix), allow(unused_mut))]
    let mut builder = Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        // The umask still applies on open.
        builder.permissions(std::fs::Permissions::from_mode(0o666));
    }
    builder.tempfile_in(dir)
}
