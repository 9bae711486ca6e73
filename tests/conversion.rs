//! End-to-end conversions through the library pipeline.

mod support;

use std::io::sink;
use std::path::PathBuf;

use squarewave::cli::CliOptions;
use squarewave::config::Settings;
use squarewave::inspect::{InspectError, InspectionSink, InspectionView};
use squarewave::pipeline::{PipelineError, RunPlan, convert, run};
use squarewave::transform::{DecisionRule, SquareWave, TransformConfig};
use squarewave::wav::{WavError, read_pcm16};
use support::wav::{rf_capture, write_float_wav, write_test_wav};
use tempfile::tempdir;

fn threshold_config(threshold: f64) -> TransformConfig {
    TransformConfig {
        rule: DecisionRule::Threshold(threshold),
        inspect: false,
    }
}

#[test]
fn threshold_output_round_trips_through_the_container() {
    let dir = tempdir().expect("tempdir");
    let input = dir.path().join("capture.wav");
    let output = dir.path().join("capture_square.wav");
    let samples = rf_capture(6, 40);
    write_test_wav(&input, 8_000, 1, &samples);

    let mut report_text: Vec<u8> = Vec::new();
    let report = convert(&input, &output, threshold_config(0.1), None, &mut report_text)
        .expect("convert");

    let written = read_pcm16(&output).expect("read output");
    let original = read_pcm16(&input).expect("read input");
    assert_eq!(written.params, original.params);
    assert_eq!(written.samples, report.samples);
    assert_eq!(written.samples.len(), samples.len());

    let expected = SquareWave::new(threshold_config(0.1)).apply(&samples, None);
    assert_eq!(written.samples, expected);
    assert_eq!(&written.samples[..40], &[16_384; 40][..]);
    assert_eq!(&written.samples[40..80], &[0; 40][..]);

    let text = String::from_utf8(report_text).expect("utf8 report");
    assert!(text.contains("Stats for Input:"));
    assert!(text.contains("Stats for Output:"));
    assert!(text.contains(&format!("Output written to: {}", output.display())));
    assert!(text.contains("Median"));
}

#[test]
fn extremes_output_uses_recording_peaks() {
    let dir = tempdir().expect("tempdir");
    let input = dir.path().join("stereo.wav");
    let output = dir.path().join("stereo_out.wav");
    let samples = [120_i16, -40, 0, 3_000, -2_500, 7, -1, 2];
    write_test_wav(&input, 44_100, 2, &samples);

    let config = TransformConfig {
        rule: DecisionRule::ZeroCrossing,
        inspect: false,
    };
    let mut report_text: Vec<u8> = Vec::new();
    let report = convert(&input, &output, config, None, &mut report_text).expect("convert");

    let written = read_pcm16(&output).expect("read output");
    assert_eq!(written.params.channels, 2);
    assert_eq!(written.params.frame_count, 4);
    assert_eq!(
        written.samples,
        vec![3_000, -2_500, 3_000, 3_000, -2_500, 3_000, -2_500, 3_000]
    );
    assert_eq!(report.after.max, Some(3_000));
    assert_eq!(report.after.min, Some(-2_500));
    assert!(report.before.distribution.is_none());
    assert!(!String::from_utf8(report_text).expect("utf8").contains("Median"));
}

#[test]
fn flat_recording_is_written_unchanged() {
    let dir = tempdir().expect("tempdir");
    let input = dir.path().join("silence.wav");
    let output = dir.path().join("silence_square.wav");
    write_test_wav(&input, 8_000, 1, &[5, 5, 5, 5]);

    convert(&input, &output, threshold_config(0.1), None, &mut sink()).expect("convert");
    assert_eq!(read_pcm16(&output).expect("read").samples, vec![5, 5, 5, 5]);
}

#[test]
fn converting_twice_is_stable() {
    let dir = tempdir().expect("tempdir");
    let input = dir.path().join("a.wav");
    let once = dir.path().join("b.wav");
    let twice = dir.path().join("c.wav");
    write_test_wav(&input, 8_000, 1, &rf_capture(3, 25));

    convert(&input, &once, threshold_config(0.4), None, &mut sink()).expect("first");
    convert(&once, &twice, threshold_config(0.4), None, &mut sink()).expect("second");
    assert_eq!(
        read_pcm16(&once).expect("once").samples,
        read_pcm16(&twice).expect("twice").samples
    );
}

#[test]
fn unsupported_width_fails_before_writing() {
    let dir = tempdir().expect("tempdir");
    let input = dir.path().join("float.wav");
    let output = dir.path().join("float_square.wav");
    write_float_wav(&input, &[0.5, -0.5, 0.25]);

    let mut report_text: Vec<u8> = Vec::new();
    let err = convert(&input, &output, threshold_config(0.1), None, &mut report_text)
        .expect_err("float input must fail");
    assert!(matches!(
        err,
        PipelineError::Wav(WavError::UnsupportedFormat { .. })
    ));
    assert!(!output.exists());
    assert!(report_text.is_empty());
}

#[test]
fn inplace_plan_overwrites_exactly_the_input() {
    let dir = tempdir().expect("tempdir");
    let input = dir.path().join("take.wav");
    write_test_wav(&input, 8_000, 1, &rf_capture(2, 10));
    let options = CliOptions {
        input: input.clone(),
        output: Some(dir.path().join("ignored.wav")),
        inplace: true,
        ..CliOptions::default()
    };

    let plan = RunPlan::new(&options, &Settings::default());
    let report = run(&plan, &mut sink()).expect("run");
    assert_eq!(report.output, input);
    assert_eq!(read_pcm16(&input).expect("read").samples, report.samples);
    let entries: Vec<PathBuf> = std::fs::read_dir(dir.path())
        .expect("read dir")
        .map(|entry| entry.expect("entry").path())
        .collect();
    assert_eq!(entries, vec![input]);
}

#[test]
fn debug_run_renders_image_without_changing_output() {
    let dir = tempdir().expect("tempdir");
    let input = dir.path().join("probe.wav");
    let samples = rf_capture(4, 50);
    write_test_wav(&input, 8_000, 1, &samples);
    let options = CliOptions {
        input: input.clone(),
        debug: true,
        no_show: true,
        ..CliOptions::default()
    };

    let plan = RunPlan::new(&options, &Settings::default());
    let report = run(&plan, &mut sink()).expect("run");
    assert!(dir.path().join("probe_square_debug.png").exists());
    let plain = SquareWave::new(threshold_config(0.1)).apply(&samples, None);
    assert_eq!(report.samples, plain);
}

struct CapturingSink {
    sample_rate: u32,
    lengths: (usize, usize, usize),
}

impl InspectionSink for CapturingSink {
    fn inspect(&mut self, view: &InspectionView<'_>) -> Result<(), InspectError> {
        self.sample_rate = view.sample_rate;
        self.lengths = (view.original.len(), view.normalized.len(), view.squared.len());
        Ok(())
    }
}

#[test]
fn inspection_sink_sees_recording_time_base() {
    let dir = tempdir().expect("tempdir");
    let input = dir.path().join("probe.wav");
    let output = dir.path().join("probe_out.wav");
    write_test_wav(&input, 16_000, 2, &rf_capture(2, 20));

    let mut capture = CapturingSink {
        sample_rate: 0,
        lengths: (0, 0, 0),
    };
    let config = TransformConfig {
        rule: DecisionRule::Threshold(0.1),
        inspect: true,
    };
    let inspector: &mut dyn InspectionSink = &mut capture;
    convert(&input, &output, config, Some(inspector), &mut sink()).expect("convert");
    assert_eq!(capture.sample_rate, 16_000);
    assert_eq!(capture.lengths, (80, 80, 80));
}
