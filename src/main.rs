// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow, Context};
use log::{info, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::collections::HashMap;
use std::io::Write;
use std::path::PathBuf;
use clap::{Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};
use indicatif::{ProgressBar, ProgressStyle};

use ytcaptions::app_config::{self, Config, DownloadOverrides};
use ytcaptions::{CaptionRetriever, YtDlpDownloader};

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
    /// Generate shell completions for ytcaptions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// ytcaptions - automatic caption text for online videos
///
/// Downloads the auto-generated captions of one or more videos and prints
/// them as plain text with the scrolling repeats removed.
#[derive(Parser, Debug)]
#[command(name = "ytcaptions")]
#[command(version)]
#[command(about = "Fetch auto-generated captions as plain text")]
#[command(long_about = "ytcaptions downloads auto-generated captions with yt-dlp and reduces them to one line of text.

EXAMPLES:
    ytcaptions dQw4w9WgXcQ                      # Print English captions
    ytcaptions -l de dQw4w9WgXcQ                # Print German captions
    ytcaptions id1 id2 id3                      # Batch mode, JSON mapping of successes
    ytcaptions --json dQw4w9WgXcQ               # Single video as JSON
    ytcaptions completions bash > ytcaptions.bash

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Video ids to fetch captions for
    #[arg(value_name = "VIDEO_ID")]
    video_ids: Vec<String>,

    /// Caption language code (e.g., 'en', 'es', 'fr')
    #[arg(short, long)]
    language: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Directory for temporary subtitle files
    #[arg(short = 'd', long)]
    output_dir: Option<PathBuf>,

    /// Path to the yt-dlp executable
    #[arg(long = "yt-dlp", value_name = "PATH")]
    yt_dlp: Option<String>,

    /// Print results as a JSON object keyed by video id
    #[arg(long)]
    json: bool,

    /// Set logging level
    #[arg(long, value_enum)]
    log_level: Option<CliLogLevel>,
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

    // @returns: ANSI color for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
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
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {:<5} {}\x1B[0m",
                Self::color_for_level(record.level()),
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // Logger starts at trace so the config can lower it via set_max_level
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Some(Commands::Completions { shell }) = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "ytcaptions", &mut std::io::stdout());
        return Ok(());
    }

    if cli.video_ids.is_empty() {
        return Err(anyhow!("At least one VIDEO_ID is required"));
    }

    run(cli)
}

fn run(options: CommandLineOptions) -> Result<()> {
    if let Some(cmd_log_level) = &options.log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let mut config = Config::load_or_create(&options.config_path)
        .with_context(|| format!("Failed to load config file: {}", options.config_path))?;

    if let Some(language) = &options.language {
        config.language = language.clone();
    }
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    config.validate().context("Configuration validation failed")?;
    log::set_max_level(config.log_level.to_level_filter());

    let overrides = DownloadOverrides {
        executable: options.yt_dlp.clone(),
        output_dir: options.output_dir.clone(),
        ..DownloadOverrides::default()
    };
    let retriever = CaptionRetriever::with_overrides(YtDlpDownloader::new(), &config.download, &overrides);
    let language = Some(config.language.as_str());

    if options.video_ids.len() == 1 && !options.json {
        let captions = retriever
            .get_captions(&options.video_ids[0], language)
            .map_err(ytcaptions::AppError::from)?;
        println!("{}", captions);
        return Ok(());
    }

    let progress = ProgressBar::new(options.video_ids.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .context("Invalid progress bar template")?
            .progress_chars("=> "),
    );

    // Failures are logged once, by collect_successes
    let results = retriever.retrieve_all_with(&options.video_ids, language, |id, _| {
        progress.set_message(id.to_string());
        progress.inc(1);
    });
    progress.finish_and_clear();

    let captions: HashMap<String, String> = ytcaptions::retrieval::collect_successes(results);
    info!("Retrieved captions for {}/{} videos", captions.len(), options.video_ids.len());

    let json = serde_json::to_string_pretty(&captions).context("Failed to serialize results")?;
    println!("{}", json);

    Ok(())
}
