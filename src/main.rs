//! Entry point for the `squarewave` command-line converter.

use squarewave::pipeline::{self, PipelineError, RunPlan};
use squarewave::{cli, config, logging};

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(err.exit_code());
    }
}

fn run() -> Result<(), PipelineError> {
    let Some(options) = cli::parse_args(std::env::args().skip(1).collect())? else {
        return Ok(());
    };
    if let Err(err) = logging::init(options.verbose) {
        eprintln!("Logging disabled: {err}");
    }
    let settings = config::load_or_default(options.config.as_deref())?;
    let plan = RunPlan::new(&options, &settings);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    pipeline::run(&plan, &mut out)?;
    Ok(())
}
