//! Command-line surface of the `squarewave` binary.

use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum CliError {
    #[error("{flag} requires a value")]
    MissingValue { flag: String },
    #[error("--threshold expects a finite number, got {value:?}")]
    InvalidThreshold { value: String },
    #[error("Unknown argument: {arg}\n\n{help}")]
    UnknownArgument { arg: String, help: String },
    #[error("{flag} does not take a value")]
    UnexpectedValue { flag: String },
    #[error("Unexpected extra argument: {arg}")]
    ExtraPositional { arg: String },
    #[error("An input WAV path is required\n\n{help}")]
    MissingInput { help: String },
}

/// Parsed invocation arguments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliOptions {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    /// Overwrite the input; wins over an explicit output path.
    pub inplace: bool,
    pub threshold: Option<f64>,
    /// Use the zero-crossing extremes transform instead of the threshold normalizer.
    pub extremes: bool,
    /// Render the inspection image.
    pub debug: bool,
    /// Render the inspection image without opening it.
    pub no_show: bool,
    pub config: Option<PathBuf>,
    pub verbose: bool,
}

impl CliOptions {
    /// Where the converted recording goes.
    ///
    /// `--inplace` targets the input itself; otherwise the explicit output, otherwise
    /// `<input_stem>_square.<ext>` next to the input.
    pub fn output_path(&self) -> PathBuf {
        if self.inplace {
            return self.input.clone();
        }
        self.output
            .clone()
            .unwrap_or_else(|| default_output_path(&self.input))
    }
}

/// `<stem>_square.<ext>` beside `input`; `.wav` when the input has no extension.
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = input
        .extension()
        .map(|ext| ext.to_string_lossy().into_owned())
        .unwrap_or_else(|| "wav".to_string());
    input.with_file_name(format!("{stem}_square.{extension}"))
}

/// Parse arguments (without the program name). Returns `Ok(None)` after printing help.
pub fn parse_args(args: Vec<String>) -> Result<Option<CliOptions>, CliError> {
    let mut options = CliOptions::default();
    let mut positionals = Vec::new();
    let mut idx = 0usize;
    while idx < args.len() {
        let arg = args[idx].as_str();
        let (flag, inline_value) = match arg.split_once('=') {
            Some((flag, value)) if flag.starts_with("--") => (flag, Some(value.to_string())),
            _ => (arg, None),
        };
        let take_value = |idx: &mut usize| -> Result<String, CliError> {
            if let Some(value) = inline_value.clone() {
                return Ok(value);
            }
            *idx += 1;
            args.get(*idx).cloned().ok_or_else(|| CliError::MissingValue {
                flag: flag.to_string(),
            })
        };
        match flag {
            "--help" | "--inplace" | "--extremes" | "--debug" | "--no-show" | "--verbose"
                if inline_value.is_some() =>
            {
                return Err(CliError::UnexpectedValue {
                    flag: flag.to_string(),
                });
            }
            "-h" | "--help" => {
                println!("{}", help_text());
                return Ok(None);
            }
            "--inplace" => options.inplace = true,
            "--extremes" => options.extremes = true,
            "--debug" => options.debug = true,
            "--no-show" => options.no_show = true,
            "-v" | "--verbose" => options.verbose = true,
            "--threshold" => {
                let value = take_value(&mut idx)?;
                options.threshold = Some(parse_threshold(&value)?);
            }
            "--config" => {
                options.config = Some(PathBuf::from(take_value(&mut idx)?));
            }
            "--" => {
                positionals.extend(args[idx + 1..].iter().cloned());
                break;
            }
            unknown if unknown.starts_with('-') && unknown.len() > 1 => {
                return Err(CliError::UnknownArgument {
                    arg: unknown.to_string(),
                    help: help_text(),
                });
            }
            _ => positionals.push(arg.to_string()),
        }
        idx += 1;
    }

    let mut positionals = positionals.into_iter();
    let input = positionals
        .next()
        .ok_or_else(|| CliError::MissingInput { help: help_text() })?;
    options.input = PathBuf::from(input);
    options.output = positionals.next().map(PathBuf::from);
    if let Some(extra) = positionals.next() {
        return Err(CliError::ExtraPositional { arg: extra });
    }
    Ok(Some(options))
}

fn parse_threshold(value: &str) -> Result<f64, CliError> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|threshold| threshold.is_finite())
        .ok_or_else(|| CliError::InvalidThreshold {
            value: value.to_string(),
        })
}

pub fn help_text() -> String {
    [
        "squarewave",
        "",
        "Turns a recorded 16-bit PCM WAV signal into a clean two-level square wave.",
        "",
        "Usage:",
        "  squarewave <input.wav> [output.wav] [options]",
        "",
        "Options:",
        "  --inplace            Overwrite the input file (wins over an output path).",
        "  --threshold <value>  Normalized decision threshold (default 0.1).",
        "  --extremes           Map samples to the recording's own max/min by sign.",
        "  --debug              Render original/normalized/squared views to <output>_debug.png.",
        "  --no-show            With --debug, write the image without opening it.",
        "  --config <path>      TOML settings file (or set SQUAREWAVE_CONFIG).",
        "  -v, --verbose        Log debug details to stderr (RUST_LOG overrides).",
        "  -h, --help           Show this help.",
        "",
        "Without an output path the result is written to <input>_square.<ext>.",
    ]
    .join("\n")
}
