//! Square-wave transforms.
//!
//! [`SquareWave`] is the single entry point. It dispatches on a [`DecisionRule`]:
//! the zero-crossing rule maps samples onto the recording's own peaks, the threshold rule
//! normalizes the stream and emits fixed LOW/HIGH levels.

mod extremes;
mod sample;
mod threshold;

pub use extremes::{extremize, min_max};
pub use sample::{PCM16_FULL_SCALE, PcmSample, quantize_pcm16};
pub use threshold::{DEFAULT_THRESHOLD, HIGH_LEVEL, LOW_LEVEL, ThresholdNormalizer};

use crate::inspect::InspectionSink;

/// How each sample is classified as HIGH or LOW.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DecisionRule {
    /// `sample >= 0` is HIGH; outputs are the stream's global max/min.
    ZeroCrossing,
    /// Normalized sample `>= threshold` is HIGH; outputs are fixed levels.
    Threshold(f64),
}

impl Default for DecisionRule {
    fn default() -> Self {
        DecisionRule::Threshold(DEFAULT_THRESHOLD)
    }
}

impl DecisionRule {
    /// Whether this rule produces inspection views and distribution statistics.
    pub fn is_threshold(&self) -> bool {
        matches!(self, DecisionRule::Threshold(_))
    }
}

/// Read-only settings for one run of the transform.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TransformConfig {
    pub rule: DecisionRule,
    /// Hand intermediate signals to an inspection sink (threshold rule only).
    pub inspect: bool,
}

/// Where and how to report intermediate signals.
pub struct Inspection<'s> {
    pub sink: &'s mut dyn InspectionSink,
    pub sample_rate: u32,
    pub channels: u16,
}

/// The transform, configured once and applied to a complete stream.
#[derive(Debug, Clone, Copy)]
pub struct SquareWave {
    config: TransformConfig,
}

impl SquareWave {
    pub fn new(config: TransformConfig) -> Self {
        Self { config }
    }

    /// Turn `samples` into a two-level stream of the same length and type.
    ///
    /// The inspection hook is consulted only when the rule is [`DecisionRule::Threshold`] and
    /// inspection is enabled in the config.
    pub fn apply<S: PcmSample>(&self, samples: &[S], inspection: Option<Inspection<'_>>) -> Vec<S> {
        match self.config.rule {
            DecisionRule::ZeroCrossing => extremize(samples),
            DecisionRule::Threshold(threshold) => {
                let inspection = inspection.filter(|_| self.config.inspect);
                ThresholdNormalizer::new(threshold).apply(samples, inspection)
            }
        }
    }
}
