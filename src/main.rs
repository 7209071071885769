// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::Result;
use log::{debug, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::path::PathBuf;
use std::io::Write;
use clap::{Args, Parser, ValueEnum, CommandFactory, Subcommand};
use clap::error::ErrorKind;
use clap_complete::{generate, Shell};

use vttmerge::app_config::{self, Config};
use vttmerge::{AppError, Controller};

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Merge the segments of a directory into one file (default command)
    Merge(MergeArgs),

    /// Generate shell completions for vttmerge
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug)]
struct MergeArgs {
    /// Directory containing the WebVTT segments
    #[arg(value_name = "INPUT_DIR")]
    input_dir: PathBuf,

    /// Merged WebVTT file to write
    #[arg(value_name = "OUTPUT_FILE")]
    output_file: PathBuf,
}

/// vttmerge - merge segmented WebVTT subtitles
///
/// Reads every `<name>.vtt` segment in a directory, applies each segment's
/// X-TIMESTAMP-MAP offset and writes all cues, sorted by start time, to a
/// single WebVTT file.
#[derive(Parser, Debug)]
#[command(name = "vttmerge")]
#[command(version)]
#[command(about = "Merge segmented WebVTT subtitles into one file")]
#[command(long_about = "vttmerge stitches HLS/DASH WebVTT segments back into one subtitle track.

EXAMPLES:
    vttmerge subs/ merged.vtt                   # Merge all segments in subs/
    vttmerge -l debug subs/ merged.vtt          # Merge with debug logging
    vttmerge -j 4 subs/ merged.vtt              # Read at most 4 files at a time
    vttmerge completions bash > vttmerge.bash   # Generate bash completions

CONFIGURATION:
    An optional JSON config file can be given with --config-path:
        { \"log_level\": \"info\", \"read_concurrency\": 16 }
    Command line flags take precedence over the file.

NOTE:
    An input directory literally named `merge` or `completions` is read as a
    subcommand. Write it as a path instead, e.g. `vttmerge ./merge out.vtt`.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Directory containing the WebVTT segments
    #[arg(value_name = "INPUT_DIR")]
    input_dir: Option<PathBuf>,

    /// Merged WebVTT file to write
    #[arg(value_name = "OUTPUT_FILE")]
    output_file: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config_path: Option<PathBuf>,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,

    /// Maximum number of segment files read in parallel
    #[arg(short, long, global = true)]
    jobs: Option<usize>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI colour code and tag for level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("1;31", "ERROR"),
            Level::Warn => ("1;33", "WARN "),
            Level::Info => ("1;32", "INFO "),
            Level::Debug => ("1;36", "DEBUG"),
            Level::Trace => ("1;35", "TRACE"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (colour, tag) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {} {}\x1B[0m",
                colour, now, tag, record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // The logger accepts everything; the effective level is set through log::set_max_level
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = match CommandLineOptions::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => return Err(AppError::Usage(e.to_string().trim_end().to_string()).into()),
    };

    let (input_dir, output_file) = match &cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(*shell, &mut cmd, "vttmerge", &mut std::io::stdout());
            return Ok(());
        }
        Some(Commands::Merge(args)) => (args.input_dir.clone(), args.output_file.clone()),
        None => match (cli.input_dir.clone(), cli.output_file.clone()) {
            (Some(input_dir), Some(output_file)) => (input_dir, output_file),
            _ => {
                return Err(AppError::Usage(
                    "expected <INPUT_DIR> <OUTPUT_FILE>, see --help".to_string()
                ).into());
            }
        },
    };

    let config = load_config(&cli)?;
    let controller = Controller::with_config(config)?;
    controller.run(&input_dir, &output_file).await?;

    Ok(())
}

/// Build the effective configuration: config file first, then CLI overrides
fn load_config(cli: &CommandLineOptions) -> Result<Config> {
    let mut config = match &cli.config_path {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    if let Some(log_level) = &cli.log_level {
        config.log_level = log_level.clone().into();
    }

    if let Some(jobs) = cli.jobs {
        config.read_concurrency = jobs;
    }

    log::set_max_level(config.log_level.into());
    debug!("Effective configuration: {:?}", config);

    Ok(config)
}
