//! Before/after statistics for a sample stream.

use std::fmt;

use ndarray::ArrayView1;

use crate::transform::{PcmSample, min_max};
use crate::wav::RecordingParams;

/// Mean and median of a stream, reported for the threshold pipeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Distribution {
    pub mean: f64,
    pub median: f64,
}

/// Read-only summary of one stream.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalStats<S> {
    pub label: String,
    pub sample_rate: u32,
    pub channels: u16,
    pub duration_seconds: f64,
    pub sample_width: u16,
    pub sample_type: &'static str,
    pub max: Option<S>,
    pub min: Option<S>,
    pub distribution: Option<Distribution>,
}

impl<S: PcmSample> SignalStats<S> {
    /// Summarize `samples` under `label`. Mean and median are only computed when requested.
    pub fn collect(
        label: impl Into<String>,
        params: &RecordingParams,
        samples: &[S],
        with_distribution: bool,
    ) -> Self {
        let extremes = min_max(samples);
        let distribution = if with_distribution {
            let working: Vec<f64> = samples.iter().map(|s| s.to_working()).collect();
            distribution(&working)
        } else {
            None
        };
        Self {
            label: label.into(),
            sample_rate: params.sample_rate,
            channels: params.channels,
            duration_seconds: params.duration_seconds(),
            sample_width: params.sample_width,
            sample_type: S::TYPE_NAME,
            max: extremes.map(|(_, max)| max),
            min: extremes.map(|(min, _)| min),
            distribution,
        }
    }
}

fn distribution(working: &[f64]) -> Option<Distribution> {
    let view = ArrayView1::from(working);
    let mean = view.mean()?;
    let mut sorted = view.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    let median = if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    };
    Some(Distribution { mean, median })
}

fn fmt_extreme<S: fmt::Display>(value: &Option<S>) -> String {
    value
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_else(|| "n/a".to_string())
}

impl<S: PcmSample> fmt::Display for SignalStats<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Stats for {}:", self.label)?;
        writeln!(f, "  Sample rate  : {} Hz", self.sample_rate)?;
        writeln!(f, "  Channels     : {}", self.channels)?;
        writeln!(f, "  Duration     : {:.2} seconds", self.duration_seconds)?;
        writeln!(
            f,
            "  Sample width : {} bytes ({})",
            self.sample_width, self.sample_type
        )?;
        writeln!(f, "  Max amplitude: {}", fmt_extreme(&self.max))?;
        write!(f, "  Min amplitude: {}", fmt_extreme(&self.min))?;
        if let Some(distribution) = &self.distribution {
            writeln!(f)?;
            writeln!(f, "  Mean         : {:.4}", distribution.mean)?;
            write!(f, "  Median       : {:.4}", distribution.median)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(count: usize) -> RecordingParams {
        RecordingParams::pcm16(4, 1, count)
    }

    #[test]
    fn collects_extremes_and_duration() {
        let stats = SignalStats::collect("Input", &params(6), &[3_i16, -7, 0, 12, 1, -2], false);
        assert_eq!(stats.max, Some(12));
        assert_eq!(stats.min, Some(-7));
        assert!((stats.duration_seconds - 1.5).abs() < 1e-12);
        assert_eq!(stats.sample_type, "int16");
        assert!(stats.distribution.is_none());
    }

    #[test]
    fn median_of_even_stream_averages_middle_pair() {
        let stats = SignalStats::collect("Input", &params(4), &[4_i16, 1, 3, 2], true);
        let distribution = stats.distribution.unwrap();
        assert!((distribution.mean - 2.5).abs() < 1e-12);
        assert!((distribution.median - 2.5).abs() < 1e-12);
    }

    #[test]
    fn median_of_odd_stream_is_middle_value() {
        let stats = SignalStats::collect("Input", &params(5), &[9_i16, -4, 0, 100, 2], true);
        assert_eq!(stats.distribution.unwrap().median, 2.0);
    }

    #[test]
    fn report_uses_fixed_precision() {
        let stats = SignalStats::collect("Output", &params(3), &[0_i16, 16_384, 16_384], true);
        let text = stats.to_string();
        assert!(text.starts_with("Stats for Output:"));
        assert!(text.contains("Duration     : 0.75 seconds"));
        assert!(text.contains("Sample width : 2 bytes (int16)"));
        assert!(text.contains("Max amplitude: 16384"));
        assert!(text.contains("Min amplitude: 0"));
        assert!(text.contains("Mean         : 10922.6667"));
        assert!(text.contains("Median       : 16384.0000"));
    }

    #[test]
    fn empty_stream_reports_not_available() {
        let stats = SignalStats::<i16>::collect("Input", &params(0), &[], true);
        assert!(stats.distribution.is_none());
        let text = stats.to_string();
        assert!(text.contains("Max amplitude: n/a"));
        assert!(!text.contains("Mean"));
    }
}
