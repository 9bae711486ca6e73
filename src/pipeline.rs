//! One conversion run: read, report, transform, write, report.

use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

use crate::cli::{CliError, CliOptions};
use crate::config::{ConfigError, Settings};
use crate::inspect::{InspectionSink, PngInspectionRenderer};
use crate::stats::SignalStats;
use crate::transform::{DecisionRule, Inspection, SquareWave, TransformConfig};
use crate::wav::{RecordingParams, WavError, read_pcm16, write_pcm16};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Cli(#[from] CliError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Wav(#[from] WavError),
    #[error("Failed to write report: {0}")]
    Report(#[source] std::io::Error),
}

impl PipelineError {
    /// Process exit status for this failure: 2 for usage errors, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        match self {
            PipelineError::Cli(_) => 2,
            _ => 1,
        }
    }
}

/// Where and how to render the inspection image.
#[derive(Debug, Clone, PartialEq)]
pub struct InspectionTarget {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub show: bool,
}

/// Everything a run needs, resolved from arguments and config.
#[derive(Debug, Clone, PartialEq)]
pub struct RunPlan {
    pub input: PathBuf,
    pub output: PathBuf,
    pub transform: TransformConfig,
    pub inspection: Option<InspectionTarget>,
}

impl RunPlan {
    /// Merge command-line options over file settings.
    pub fn new(options: &CliOptions, settings: &Settings) -> Self {
        let output = options.output_path();
        let mut rule = settings.transform.decision_rule();
        if options.extremes {
            rule = DecisionRule::ZeroCrossing;
        }
        match rule {
            DecisionRule::ZeroCrossing => {
                if options.threshold.is_some() || options.debug {
                    warn!("--threshold and --debug only apply to the threshold transform");
                }
            }
            DecisionRule::Threshold(file_threshold) => {
                let threshold = options.threshold.unwrap_or(file_threshold);
                if !(0.0..=1.0).contains(&threshold) {
                    warn!(threshold, "Threshold outside [0, 1]; output will be a single level");
                }
                rule = DecisionRule::Threshold(threshold);
            }
        }
        let inspect = options.debug && rule.is_threshold();
        let inspection = inspect.then(|| InspectionTarget {
            path: debug_image_path(&output),
            width: settings.inspect.width,
            height: settings.inspect.height,
            show: settings.inspect.show && !options.no_show,
        });
        Self {
            input: options.input.clone(),
            output,
            transform: TransformConfig { rule, inspect },
            inspection,
        }
    }
}

/// `<output_stem>_debug.png` beside the output file.
pub fn debug_image_path(output: &Path) -> PathBuf {
    let stem = output
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    output.with_file_name(format!("{stem}_debug.png"))
}

/// Outcome of a successful conversion.
#[derive(Debug, Clone)]
pub struct ConversionReport {
    pub output: PathBuf,
    pub params: RecordingParams,
    pub before: SignalStats<i16>,
    pub after: SignalStats<i16>,
    pub samples: Vec<i16>,
}

/// Execute `plan`, writing the statistics report to `out`.
pub fn run(plan: &RunPlan, out: &mut dyn Write) -> Result<ConversionReport, PipelineError> {
    let mut renderer = plan.inspection.as_ref().map(|target| {
        PngInspectionRenderer::new(&target.path, target.width, target.height)
            .with_show(target.show)
    });
    let sink = renderer
        .as_mut()
        .map(|renderer| renderer as &mut dyn InspectionSink);
    convert(&plan.input, &plan.output, plan.transform, sink, out)
}

/// Convert `input` into a square wave at `output`.
///
/// Input statistics are reported before the transform runs; nothing is written to `output`
/// unless the whole container encodes successfully.
pub fn convert(
    input: &Path,
    output: &Path,
    config: TransformConfig,
    sink: Option<&mut dyn InspectionSink>,
    out: &mut dyn Write,
) -> Result<ConversionReport, PipelineError> {
    let recording = read_pcm16(input)?;
    let params = recording.params;
    let with_distribution = config.rule.is_threshold();
    let before = SignalStats::collect("Input", &params, &recording.samples, with_distribution);
    writeln!(out, "\n{before}").map_err(PipelineError::Report)?;

    let transform = SquareWave::new(config);
    let inspection = sink.map(|sink| Inspection {
        sink,
        sample_rate: params.sample_rate,
        channels: params.channels,
    });
    let samples = transform.apply(&recording.samples, inspection);
    write_pcm16(output, &params, &samples)?;
    info!(input = %input.display(), output = %output.display(), rule = ?config.rule, "Converted");

    writeln!(out, "\nOutput written to: {}", output.display()).map_err(PipelineError::Report)?;
    let after = SignalStats::collect("Output", &params, &samples, with_distribution);
    writeln!(out, "\n{after}").map_err(PipelineError::Report)?;

    Ok(ConversionReport {
        output: output.to_path_buf(),
        params,
        before,
        after,
        samples,
    })
}
