//! Library exports for the `squarewave` converter, its tests and benchmarks.
/// Command-line parsing and output path resolution.
pub mod cli;
/// TOML settings.
pub mod config;
/// Inspection views of the threshold pipeline.
pub mod inspect;
/// Tracing setup.
pub mod logging;
/// End-to-end conversion runs.
pub mod pipeline;
/// Before/after stream statistics.
pub mod stats;
/// Square-wave transforms.
pub mod transform;
/// 16-bit PCM WAV container I/O.
pub mod wav;
