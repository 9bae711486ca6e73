//! Normalize-and-threshold square wave with fixed output levels.

use ndarray::Array1;
use tracing::{debug, warn};

use super::Inspection;
use super::sample::PcmSample;
use crate::inspect::InspectionView;

/// LOW output level in the normalized domain.
pub const LOW_LEVEL: f64 = 0.0;
/// HIGH output level in the normalized domain.
pub const HIGH_LEVEL: f64 = 0.5;
/// Decision threshold used when none is configured.
pub const DEFAULT_THRESHOLD: f64 = 0.1;

/// Rescales a stream into `[0, 1]` and snaps each sample to [`LOW_LEVEL`] or [`HIGH_LEVEL`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdNormalizer {
    threshold: f64,
}

impl Default for ThresholdNormalizer {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}

impl ThresholdNormalizer {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// Apply the transform, optionally reporting the intermediate signals to an inspector.
    ///
    /// A flat stream (max == min) is returned as its own value with no thresholding, and the
    /// inspector is not called. The inclusive boundary maps `normalized == threshold` to HIGH.
    pub fn apply<S: PcmSample>(&self, samples: &[S], inspection: Option<Inspection<'_>>) -> Vec<S> {
        if samples.is_empty() {
            return Vec::new();
        }
        let working: Array1<f64> = samples.iter().map(|s| s.to_working()).collect();
        let Some((min_val, max_val)) = working_range(&working) else {
            debug!("No comparable samples; passing stream through");
            return samples.to_vec();
        };
        let range = max_val - min_val;
        if range == 0.0 {
            debug!(value = min_val, "Flat input; emitting it unchanged");
            return vec![S::from_working(min_val); samples.len()];
        }

        let threshold = self.threshold;
        let normalized = working.mapv(|v| (v - min_val) / range);
        let squared = normalized.mapv(|v| if v >= threshold { HIGH_LEVEL } else { LOW_LEVEL });
        debug!(min_val, max_val, threshold, "Thresholded normalized stream");

        if let Some(inspection) = inspection {
            let view = InspectionView {
                original: working.as_slice().unwrap_or(&[]),
                normalized: normalized.as_slice().unwrap_or(&[]),
                squared: squared.as_slice().unwrap_or(&[]),
                threshold,
                sample_rate: inspection.sample_rate,
                channels: inspection.channels,
            };
            if let Err(err) = inspection.sink.inspect(&view) {
                warn!("Inspection failed: {err}");
            }
        }

        squared.iter().map(|&level| S::from_unit_level(level)).collect()
    }
}

fn working_range(working: &Array1<f64>) -> Option<(f64, f64)> {
    working.fold(None, |acc, &v| {
        if v.is_nan() {
            return acc;
        }
        Some(match acc {
            None => (v, v),
            Some((min, max)) => (f64::min(min, v), f64::max(max, v)),
        })
    })
}
