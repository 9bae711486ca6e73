//! Diagnostic views of the threshold pipeline.
//!
//! The normalizer hands its three intermediate signals to an [`InspectionSink`]. Sinks only
//! observe; whatever they do cannot change the samples written to disk.

mod error;
mod render;

pub use error::InspectError;
pub use render::{PngInspectionRenderer, tick_interval_seconds};

/// Three aligned series from one threshold pass, sharing a time axis.
#[derive(Debug, Clone, Copy)]
pub struct InspectionView<'a> {
    /// Input samples in the working domain, original scale.
    pub original: &'a [f64],
    /// Samples rescaled into `[0, 1]`.
    pub normalized: &'a [f64],
    /// Two-level result in the normalized working domain.
    pub squared: &'a [f64],
    /// Decision threshold drawn over the normalized series.
    pub threshold: f64,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Interleaved channel count.
    pub channels: u16,
}

impl InspectionView<'_> {
    /// Number of frames represented by each series.
    pub fn frame_count(&self) -> usize {
        self.original.len() / self.channels.max(1) as usize
    }

    /// Duration covered by the series, in seconds.
    pub fn duration_seconds(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.frame_count() as f64 / f64::from(self.sample_rate)
    }
}

/// Receives inspection views from the threshold normalizer.
pub trait InspectionSink {
    /// Render or otherwise consume one view.
    fn inspect(&mut self, view: &InspectionView<'_>) -> Result<(), InspectError>;
}
