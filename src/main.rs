//! parcelcost - Entry Point

use clap::{ArgGroup, Parser};
use serde_json::Value;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

use parcelcost::config::{self, OutputFormat, ResolvedConfig};
use parcelcost::model::{AppError, RawDelivery};
use parcelcost::{pipeline, prompt, report, source};

/// parcelcost - price urban deliveries by zone, weight, volume and time window
#[derive(Parser, Debug)]
#[command(name = "parcelcost")]
#[command(version)]
#[command(about = "Validate and price urban deliveries from JSON Lines, flags or a prompt")]
#[command(group(ArgGroup::new("single").multiple(true).args(["zone", "weight", "volume"])))]
pub struct Args {
    /// Path to JSON Lines records (reads from stdin if not provided)
    pub file: Option<PathBuf>,

    /// Destination zone of a single delivery (zona1..zona4)
    #[arg(long, conflicts_with_all = ["file", "demo", "verify", "interactive"])]
    pub zone: Option<String>,

    /// Weight of a single delivery, in kg
    #[arg(long, allow_negative_numbers = true, conflicts_with_all = ["file", "demo", "verify", "interactive"])]
    pub weight: Option<f64>,

    /// Volume of a single delivery, in m³
    #[arg(long, allow_negative_numbers = true, conflicts_with_all = ["file", "demo", "verify", "interactive"])]
    pub volume: Option<f64>,

    /// The single delivery has a critical time window
    #[arg(long, requires = "single", conflicts_with_all = ["file", "demo", "verify", "interactive"])]
    pub critical: bool,

    /// Prompt for one delivery on the terminal
    #[arg(short, long, conflicts_with_all = ["file", "demo", "verify"])]
    pub interactive: bool,

    /// Price the built-in sample batch
    #[arg(long, conflicts_with_all = ["file", "verify"])]
    pub demo: bool,

    /// Input lines are priced results: re-check that components sum to the total
    #[arg(long)]
    pub verify: bool,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Exit non-zero when any record is rejected, malformed or inconsistent
    #[arg(long)]
    pub strict: bool,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// What this invocation prices.
#[derive(Debug, Clone, PartialEq)]
enum Mode {
    Batch(Option<PathBuf>),
    Single(RawDelivery),
    Interactive,
    Demo,
    Verify(Option<PathBuf>),
}

impl Args {
    fn mode(&self, stdin_is_tty: bool) -> Mode {
        if self.demo {
            return Mode::Demo;
        }
        if self.zone.is_some() || self.weight.is_some() || self.volume.is_some() {
            return Mode::Single(RawDelivery {
                zone: self.zone.as_deref().map(Value::from),
                weight: self.weight.map(Value::from),
                volume: self.volume.map(Value::from),
                critical_window: Some(Value::Bool(self.critical)),
            });
        }
        if self.verify {
            return Mode::Verify(self.file.clone());
        }
        if self.interactive || (self.file.is_none() && stdin_is_tty) {
            return Mode::Interactive;
        }
        Mode::Batch(self.file.clone())
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("parcelcost: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), AppError> {
    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = config::load_config_with_precedence(args.config.clone())?;
        let merged = config::merge_config(config_file);
        let with_env = config::apply_env_overrides(merged);
        let strict_override = args.strict.then_some(true);
        config::apply_cli_overrides(with_env, args.format, strict_override)
    };

    parcelcost::logging::init(&config.log_file_path)?;

    info!(config = ?config, "Configuration loaded and resolved");

    let mode = args.mode(source::stdin_is_tty());
    info!(mode = ?mode, "Starting");

    let mut stdout = io::stdout().lock();
    let failed = match mode {
        Mode::Verify(file) => {
            let outcome = pipeline::verify_lines(&read_source(file)?);
            let text = match config.format {
                OutputFormat::Text => report::render_verification(&outcome),
                OutputFormat::Json => to_json(&outcome)?,
            };
            writeln!(stdout, "{text}")?;
            outcome.failed_count()
        }
        Mode::Demo => emit(&mut stdout, &config, &pipeline::price_records(&pipeline::sample_batch()))?,
        Mode::Single(raw) => emit(&mut stdout, &config, &pipeline::price_records(&[raw]))?,
        Mode::Interactive => {
            let raw = prompt::read_delivery(&mut io::stdin().lock(), &mut stdout)?;
            writeln!(stdout)?;
            emit(&mut stdout, &config, &pipeline::price_records(&[raw]))?
        }
        Mode::Batch(file) => emit(&mut stdout, &config, &pipeline::price_lines(&read_source(file)?))?,
    };

    if config.strict && failed > 0 {
        return Err(AppError::StrictFailure { failed });
    }
    Ok(())
}

fn read_source(file: Option<PathBuf>) -> Result<Vec<source::SourceLine>, AppError> {
    let mut input = source::detect_input_source(file)?;
    let lines = input.read_lines()?;
    info!(source = %input.describe(), lines = lines.len(), "Input read");
    Ok(lines)
}

/// Write a pricing outcome and return how many records failed.
fn emit(
    out: &mut impl Write,
    config: &ResolvedConfig,
    outcome: &pipeline::BatchOutcome,
) -> Result<usize, AppError> {
    let text = match config.format {
        OutputFormat::Text => report::render_batch(outcome),
        OutputFormat::Json => to_json(outcome)?,
    };
    writeln!(out, "{text}")?;
    Ok(outcome.failed_count())
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, AppError> {
    report::to_json(value).map_err(|err| AppError::Output(err.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use serde_json::json;

    #[test]
    fn test_help_does_not_error() {
        let result = Args::try_parse_from(["parcelcost", "--help"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_version_does_not_error() {
        let result = Args::try_parse_from(["parcelcost", "--version"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_no_args_defaults() {
        let args = Args::parse_from(["parcelcost"]);
        assert_eq!(args.file, None);
        assert_eq!(args.zone, None);
        assert!(!args.critical);
        assert!(!args.interactive);
        assert!(!args.demo);
        assert!(!args.verify);
        assert_eq!(args.format, None);
        assert!(!args.strict);
        assert_eq!(args.config, None);
    }

    #[test]
    fn test_no_args_on_terminal_is_interactive() {
        let args = Args::parse_from(["parcelcost"]);
        assert_eq!(args.mode(true), Mode::Interactive);
        assert_eq!(args.mode(false), Mode::Batch(None));
    }

    #[test]
    fn test_file_path_is_batch_mode() {
        let args = Args::parse_from(["parcelcost", "deliveries.jsonl"]);
        assert_eq!(
            args.mode(true),
            Mode::Batch(Some(PathBuf::from("deliveries.jsonl")))
        );
    }

    #[test]
    fn test_single_record_flags() {
        let args = Args::parse_from([
            "parcelcost",
            "--zone",
            "zona2",
            "--weight",
            "15",
            "--volume",
            "0.8",
            "--critical",
        ]);
        assert_eq!(
            args.mode(true),
            Mode::Single(RawDelivery::new("zona2", 15.0, 0.8, true))
        );
    }

    #[test]
    fn test_single_record_missing_flags_stay_absent() {
        let args = Args::parse_from(["parcelcost", "--zone", "zona1"]);
        match args.mode(false) {
            Mode::Single(raw) => {
                assert_eq!(raw.zone, Some(json!("zona1")));
                assert_eq!(raw.weight, None);
                assert_eq!(raw.critical_window, Some(json!(false)));
            }
            other => panic!("Expected single mode, got {other:?}"),
        }
    }

    #[test]
    fn test_negative_weight_reaches_validation() {
        let args = Args::parse_from(["parcelcost", "--zone", "zona1", "--weight", "-3"]);
        assert_eq!(args.weight, Some(-3.0));
    }

    #[test]
    fn test_non_numeric_weight_is_rejected_by_clap() {
        let result = Args::try_parse_from(["parcelcost", "--weight", "heavy"]);
        assert_eq!(
            result.unwrap_err().kind(),
            clap::error::ErrorKind::ValueValidation
        );
    }

    #[test]
    fn test_zone_conflicts_with_file() {
        let result = Args::try_parse_from(["parcelcost", "--zone", "zona1", "input.jsonl"]);
        assert_eq!(
            result.unwrap_err().kind(),
            clap::error::ErrorKind::ArgumentConflict
        );
    }

    #[test]
    fn test_demo_conflicts_with_verify() {
        let result = Args::try_parse_from(["parcelcost", "--demo", "--verify"]);
        assert_eq!(
            result.unwrap_err().kind(),
            clap::error::ErrorKind::ArgumentConflict
        );
    }

    #[test]
    fn test_critical_alone_is_rejected() {
        let result = Args::try_parse_from(["parcelcost", "--critical"]);
        assert_eq!(
            result.unwrap_err().kind(),
            clap::error::ErrorKind::MissingRequiredArgument
        );
    }

    #[test]
    fn test_critical_with_weight_only_is_single_mode() {
        let args = Args::parse_from(["parcelcost", "--weight", "3", "--critical"]);
        match args.mode(true) {
            Mode::Single(raw) => assert_eq!(raw.critical_window, Some(json!(true))),
            other => panic!("Expected single mode, got {other:?}"),
        }
    }

    #[test]
    fn test_demo_mode() {
        let args = Args::parse_from(["parcelcost", "--demo"]);
        assert_eq!(args.mode(false), Mode::Demo);
    }

    #[test]
    fn test_verify_mode_with_file() {
        let args = Args::parse_from(["parcelcost", "--verify", "priced.jsonl"]);
        assert_eq!(
            args.mode(true),
            Mode::Verify(Some(PathBuf::from("priced.jsonl")))
        );
    }

    #[test]
    fn test_format_values() {
        let args = Args::parse_from(["parcelcost", "--format", "json"]);
        assert_eq!(args.format, Some(OutputFormat::Json));

        let result = Args::try_parse_from(["parcelcost", "--format", "yaml"]);
        assert_eq!(
            result.unwrap_err().kind(),
            clap::error::ErrorKind::InvalidValue
        );
    }

    #[test]
    fn test_config_flag() {
        let args = Args::parse_from(["parcelcost", "--config", "/tmp/parcelcost.toml"]);
        assert_eq!(args.config, Some(PathBuf::from("/tmp/parcelcost.toml")));
    }
}
