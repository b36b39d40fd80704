// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, Context};
use log::{warn, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::path::{Path, PathBuf};
use std::io::Write;
use std::fs::File;
use std::io::BufReader;
use clap::{Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use crate::app_config::Config;
use app_controller::Controller;

mod app_config;
mod app_controller;
mod errors;
mod file_utils;
mod operation_poller;
mod request_builder;
mod result_decoder;
mod service;

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

fn level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate a single local document synchronously
    Translate(TranslateArgs),

    /// Submit a batch translation over storage patterns and poll it to completion
    Batch(BatchArgs),

    /// Generate shell completions for doctrans
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct TranslateArgs {
    /// Input document to translate
    #[arg(value_name = "INPUT_FILE")]
    input_file: PathBuf,

    /// Output path for the translated document
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Cloud project identifier
    #[arg(short, long)]
    project: Option<String>,

    /// Source language code (e.g. 'en'), omit to auto-detect
    #[arg(short, long)]
    source_language: Option<String>,

    /// Target language code (e.g. 'zh-CN')
    #[arg(short, long)]
    target_language: Option<String>,

    /// MIME type of the input document (e.g. 'application/pdf')
    #[arg(short, long)]
    mime_type: Option<String>,

    /// OAuth access token presented to the service
    #[arg(long, env = "DOCTRANS_ACCESS_TOKEN", hide_env_values = true)]
    access_token: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

#[derive(Parser, Debug)]
struct BatchArgs {
    /// Storage pattern addressing the input documents (e.g. 'gs://bucket/docs/*')
    #[arg(short, long)]
    input_pattern: Option<String>,

    /// Storage prefix the results are written under (e.g. 'gs://bucket/results/')
    #[arg(short, long)]
    output_prefix: Option<String>,

    /// Cloud project identifier
    #[arg(short, long)]
    project: Option<String>,

    /// Source language code (e.g. 'en'), omit to auto-detect
    #[arg(short, long)]
    source_language: Option<String>,

    /// Target language code, repeat the flag for multiple targets
    #[arg(short, long)]
    target_language: Vec<String>,

    /// OAuth access token presented to the service
    #[arg(long, env = "DOCTRANS_ACCESS_TOKEN", hide_env_values = true)]
    access_token: Option<String>,

    /// Seconds between operation status checks
    #[arg(long)]
    poll_interval: Option<u64>,

    /// Consecutive transport failures tolerated while polling
    #[arg(long)]
    transport_retries: Option<u32>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// doctrans - Document Translation via Cloud Translation
///
/// Translates local documents synchronously or whole document sets in
/// object storage as a polled batch operation.
#[derive(Parser, Debug)]
#[command(name = "doctrans")]
#[command(version = "1.0.0")]
#[command(about = "Document translation tool for Cloud Translation")]
#[command(long_about = "doctrans translates documents with a Cloud Translation-style service.

EXAMPLES:
    doctrans translate report.pdf -t zh-CN             # Translate one document
    doctrans translate report.pdf -o out.pdf -s en     # Explicit source and output
    doctrans batch -i 'gs://bucket/docs/*' -o gs://bucket/results/ -t zh-CN
    doctrans batch --poll-interval 10                  # Slower status checks
    doctrans completions bash > doctrans.bash          # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default
    one will be created automatically. The access token can also be supplied
    via the DOCTRANS_ACCESS_TOKEN environment variable.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,
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

    // @returns: Emoji for log level
    fn get_emoji_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "❌ ",
            Level::Warn => "🚧 ",
            Level::Info => " ",
            Level::Debug => "🔍 ",
            Level::Trace => "📋 ",
        }
    }

    // @returns: ANSI color code for log level
    fn get_color_for_level(level: Level) -> &'static str {
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
            let now = chrono::Local::now().format("%H:%M:%S%.3f");
            let emoji = Self::get_emoji_for_level(record.level());
            let color = Self::get_color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {} {}\x1B[0m",
                color, now, emoji, record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "doctrans", &mut std::io::stdout());
            Ok(())
        }
        Commands::Translate(args) => run_translate(args).await,
        Commands::Batch(args) => run_batch(args).await,
    }
}

/// Load the configuration file, creating a default one when missing
fn load_config(config_path: &str, log_level: Option<&CliLogLevel>) -> Result<Config> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level_filter(&config_log_level));
    }

    let mut config = if Path::new(config_path).exists() {
        // Load existing configuration
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;

        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?
    } else {
        // Create default configuration if not exists
        warn!("Config file not found at '{}', creating default config.", config_path);

        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;

        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;

        config
    };

    if let Some(cmd_log_level) = log_level {
        config.log_level = cmd_log_level.clone().into();
    }
    log::set_max_level(level_filter(&config.log_level));

    Ok(config)
}

async fn run_translate(options: TranslateArgs) -> Result<()> {
    let mut config = load_config(&options.config_path, options.log_level.as_ref())?;

    // Override config with CLI options if provided
    if let Some(project) = &options.project {
        config.project_id = project.clone();
    }
    if let Some(source_lang) = &options.source_language {
        config.source_language = source_lang.clone();
    }
    if let Some(target_lang) = &options.target_language {
        config.target_languages = vec![target_lang.clone()];
    }
    if let Some(mime_type) = &options.mime_type {
        config.mime_type = mime_type.clone();
    }
    if let Some(token) = &options.access_token {
        config.service.access_token = token.clone();
    }
    // The sync path never reads from storage; clear any configured batch
    // pattern so a stale config entry cannot clash with the inline input.
    config.gcs_input_pattern = String::new();

    let controller = Controller::with_config(config)?;
    controller.run_sync(options.input_file, options.output).await
}

async fn run_batch(options: BatchArgs) -> Result<()> {
    let mut config = load_config(&options.config_path, options.log_level.as_ref())?;

    // Override config with CLI options if provided
    if let Some(pattern) = &options.input_pattern {
        config.gcs_input_pattern = pattern.clone();
    }
    if let Some(prefix) = &options.output_prefix {
        config.gcs_output_prefix = prefix.clone();
    }
    if let Some(project) = &options.project {
        config.project_id = project.clone();
    }
    if let Some(source_lang) = &options.source_language {
        config.source_language = source_lang.clone();
    }
    if !options.target_language.is_empty() {
        config.target_languages = options.target_language.clone();
    }
    if let Some(token) = &options.access_token {
        config.service.access_token = token.clone();
    }
    if let Some(interval) = options.poll_interval {
        config.polling.interval_secs = interval;
    }
    if let Some(retries) = options.transport_retries {
        config.polling.transport_retries = retries;
    }

    let controller = Controller::with_config(config)?;
    controller.run_batch().await
}
