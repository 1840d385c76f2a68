use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::{Path, PathBuf};

use subhook::app_config::{self, Config};
use subhook::video_records;
use subhook::Controller;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
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
    /// Extract hooks from caption files (default command)
    Extract(ExtractArgs),

    /// Keep videos above the median view count and score their engagement
    Engagement {
        /// JSON file holding an array of video records
        #[arg(value_name = "RECORDS_JSON")]
        input: PathBuf,

        /// Output file (defaults to <input>_updated.json)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Attach hook texts to the video records with matching titles
    Merge {
        /// JSON file holding an array of video records, updated in place
        #[arg(value_name = "RECORDS_JSON")]
        records: PathBuf,

        /// Folder containing the hook .txt files
        #[arg(value_name = "HOOKS_DIR")]
        hooks_dir: PathBuf,

        /// Configuration file path (language suffixes)
        #[arg(short, long, default_value = "conf.json")]
        config_path: PathBuf,
    },

    /// Generate shell completions for subhook
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(clap::Args, Debug)]
struct ExtractArgs {
    /// Folder walked for caption files (default: youtube_subs next to the executable)
    #[arg(value_name = "SUBTITLES_DIR")]
    subtitles_dir: Option<PathBuf>,

    /// Folder receiving the hook files (default: hooks next to the executable)
    #[arg(value_name = "HOOKS_DIR")]
    hooks_dir: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: PathBuf,

    /// Leave existing hook files untouched
    #[arg(long)]
    skip_existing: bool,
}

/// subhook - opening hooks from caption tracks
///
/// Cleans WebVTT caption files, removes repeated cues and writes the
/// remaining narration of each video to a plain text file.
#[derive(Parser, Debug)]
#[command(name = "subhook")]
#[command(version)]
#[command(about = "Extract opening hook text from WebVTT caption tracks")]
#[command(args_conflicts_with_subcommands = true)]
#[command(long_about = "subhook turns WebVTT caption files into plain hook texts.

EXAMPLES:
    subhook                                     # youtube_subs/ -> hooks/ next to the binary
    subhook subs/ out/                          # Explicit folders
    subhook --skip-existing subs/ out/          # Keep hooks already written
    subhook engagement videos.json              # Writes videos_updated.json
    subhook merge videos.json hooks/            # Fill the Text Content column
    subhook completions bash > subhook.bash     # Generate bash completions

CONFIGURATION:
    Settings are read from conf.json when present. Relative folders in the
    file resolve against the executable's folder; folders given on the
    command line take precedence.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    extract: ExtractArgs,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation, filtered by the global max level
struct CustomLogger;

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI colour and tag for level
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
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (colour, tag) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "\x1B[{}m{} {} {}\x1B[0m", colour, now, tag, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // Info until the configuration says otherwise
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    if let Some(level) = cli.log_level {
        let level: app_config::LogLevel = level.into();
        log::set_max_level(level.into());
    }

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "subhook", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Engagement { input, output }) => run_engagement(&input, output),
        Some(Commands::Merge { records, hooks_dir, config_path }) => {
            run_merge(&records, &hooks_dir, &config_path)
        }
        Some(Commands::Extract(args)) => run_extract(args, cli.log_level),
        None => run_extract(cli.extract, cli.log_level),
    }
}

/// Folder holding the executable; default folders live next to it
fn base_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

fn run_extract(options: ExtractArgs, cli_log_level: Option<CliLogLevel>) -> Result<()> {
    let mut config = Config::load_or_default(&options.config_path)?;
    config.resolve_dirs(&base_dir());

    if let Some(dir) = options.subtitles_dir {
        config.subtitles_dir = dir;
    }
    if let Some(dir) = options.hooks_dir {
        config.hooks_dir = dir;
    }
    if options.skip_existing {
        config.skip_existing = true;
    }

    match cli_log_level {
        Some(level) => config.log_level = level.into(),
        None => log::set_max_level(config.log_level.into()),
    }

    let controller = Controller::with_config(config)
        .context("Configuration validation failed")?;
    let summary = controller.run()?;

    if summary.written.is_empty() && summary.total() > 0 {
        warn!("No hook files were written");
    }

    Ok(())
}

fn run_engagement(input: &Path, output: Option<PathBuf>) -> Result<()> {
    let records = video_records::load_records(input)?;
    let scored = video_records::filter_above_median(&records);

    let output = output.unwrap_or_else(|| video_records::updated_path(input));
    video_records::save_records(&output, &scored)?;

    info!("Updated file saved as {} ({} of {} videos)", output.display(), scored.len(), records.len());
    Ok(())
}

fn run_merge(records_path: &Path, hooks_dir: &Path, config_path: &Path) -> Result<()> {
    let config = Config::load_or_default(config_path)?;
    let mut records = video_records::load_records(records_path)?;

    video_records::merge_hooks(&mut records, hooks_dir, config.language_suffixes.as_slice())?;
    video_records::save_records(records_path, &records)?;

    info!("Record file '{}' updated successfully with text contents.", records_path.display());
    Ok(())
}
