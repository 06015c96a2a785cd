// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use crate::app_config::{Config, DisplayMode, QualityMode};
use crate::file_utils::FileManager;
use crate::pipeline::TranslationPipeline;
use crate::providers::GeminiClient;

mod app_config;
mod errors;
mod file_utils;
mod language_utils;
mod pipeline;
mod providers;
mod subtitle;
mod translation;

/// CLI Wrapper for DisplayMode to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliDisplayMode {
    OnlyTranslated,
    OriginalAboveTranslated,
    TranslatedAboveOriginal,
}

impl From<CliDisplayMode> for DisplayMode {
    fn from(cli_mode: CliDisplayMode) -> Self {
        match cli_mode {
            CliDisplayMode::OnlyTranslated => DisplayMode::OnlyTranslated,
            CliDisplayMode::OriginalAboveTranslated => DisplayMode::OriginalAboveTranslated,
            CliDisplayMode::TranslatedAboveOriginal => DisplayMode::TranslatedAboveOriginal,
        }
    }
}

/// CLI Wrapper for QualityMode to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliQualityMode {
    Fast,
    Standard,
    High,
}

impl From<CliQualityMode> for QualityMode {
    fn from(cli_quality: CliQualityMode) -> Self {
        match cli_quality {
            CliQualityMode::Fast => QualityMode::Fast,
            CliQualityMode::Standard => QualityMode::Standard,
            CliQualityMode::High => QualityMode::High,
        }
    }
}

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

fn level_filter_for(level: &app_config::LogLevel) -> LevelFilter {
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
    /// Translate SRT subtitle files (default command)
    #[command(alias = "translate")]
    Translate(TranslateArgs),

    /// Generate shell completions for srtran
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct TranslateArgs {
    /// Input .srt file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Model name to use for translation
    #[arg(short, long)]
    model: Option<String>,

    /// Target language code or name (e.g., 'zh', 'fr', 'Japanese')
    #[arg(short, long)]
    target_language: Option<String>,

    /// Translation quality mode
    #[arg(short, long, value_enum)]
    quality: Option<CliQualityMode>,

    /// Subtitle display mode for the output
    #[arg(short, long, value_enum)]
    display_mode: Option<CliDisplayMode>,

    /// Output directory (defaults to the input file's directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Split long slow entries into shorter timed blocks
    #[arg(long)]
    split: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// srtran - SRT Subtitle Translator
///
/// Translates SRT subtitle files with an LLM completion API while preserving
/// timing and inline formatting tags.
#[derive(Parser, Debug)]
#[command(name = "srtran")]
#[command(version = "0.1.0")]
#[command(about = "LLM-powered SRT subtitle translation tool")]
#[command(long_about = "srtran translates SRT subtitle files using an LLM completion API.

EXAMPLES:
    srtran movie.srt                          # Translate using default config
    srtran -f movie.srt                       # Force overwrite existing files
    srtran -t fr movie.srt                    # Translate to French
    srtran -q high -d original_above_translated movie.srt
    srtran --split movie.srt                  # Re-split long slow entries
    srtran --log-level debug /subs/           # Process a directory with debug logging
    srtran completions bash > srtran.bash     # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a
    different file with --config-path. When the file does not exist, built-in
    defaults are used. The API key comes from translation.api_key in the
    config file or the GEMINI_API_KEY environment variable.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input .srt file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Model name to use for translation
    #[arg(short, long)]
    model: Option<String>,

    /// Target language code or name (e.g., 'zh', 'fr', 'Japanese')
    #[arg(short, long)]
    target_language: Option<String>,

    /// Translation quality mode
    #[arg(short, long, value_enum)]
    quality: Option<CliQualityMode>,

    /// Subtitle display mode for the output
    #[arg(short, long, value_enum)]
    display_mode: Option<CliDisplayMode>,

    /// Output directory (defaults to the input file's directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Split long slow entries into shorter timed blocks
    #[arg(long)]
    split: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
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

    // @returns: ANSI color prefix for log level
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
            let color = Self::color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {}\x1B[0m", color, now, record.args());
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

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "srtran", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Translate(args)) => run_translate(args).await,
        None => {
            // Default behavior - use top-level args for backwards compatibility
            let input_path = cli
                .input_path
                .ok_or_else(|| anyhow!("INPUT_PATH is required when no subcommand is specified"))?;

            let translate_args = TranslateArgs {
                input_path,
                force_overwrite: cli.force_overwrite,
                model: cli.model,
                target_language: cli.target_language,
                quality: cli.quality,
                display_mode: cli.display_mode,
                output_dir: cli.output_dir,
                split: cli.split,
                config_path: cli.config_path,
                log_level: cli.log_level,
            };
            run_translate(translate_args).await
        }
    }
}

async fn run_translate(options: TranslateArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level_filter_for(&config_log_level));
    }

    let mut config = Config::load_or_default(&options.config_path)
        .with_context(|| format!("Failed to load config: {}", options.config_path))?;

    // Override config with CLI options if provided
    if let Some(model) = &options.model {
        config.translation.model = model.clone();
    }
    if let Some(target_lang) = &options.target_language {
        config.target_language = target_lang.clone();
    }
    if let Some(quality) = &options.quality {
        config.quality = quality.clone().into();
    }
    if let Some(display_mode) = &options.display_mode {
        config.display_mode = display_mode.clone().into();
    }
    if options.split {
        config.split.enabled = true;
    }
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    config.validate().context("Configuration validation failed")?;

    // If log level was not set via command line, update it from config now
    if options.log_level.is_none() {
        log::set_max_level(level_filter_for(&config.log_level));
    }

    let input_files = collect_input_files(&options.input_path)?;
    if input_files.is_empty() {
        return Err(anyhow!(
            "No .srt files found at: {}",
            options.input_path.display()
        ));
    }

    let service = GeminiClient::new(
        config.translation.get_api_key(),
        config.translation.endpoint.clone(),
        config.translation.timeout_secs,
    )?;
    let target_language = config.target_language.clone();
    let pipeline = TranslationPipeline::new(Arc::new(service), config)?;

    info!(
        "Translating {} file(s) to {}",
        input_files.len(),
        pipeline.target_language()
    );

    let mut translated = 0usize;
    let mut skipped = 0usize;

    for input_file in &input_files {
        if FileManager::is_translated_for(input_file, &target_language) {
            debug!(
                "Skipping {} (already carries the target language suffix)",
                input_file.display()
            );
            skipped += 1;
            continue;
        }

        let output_dir = options
            .output_dir
            .clone()
            .or_else(|| input_file.parent().map(|p| p.to_path_buf()))
            .unwrap_or_else(|| PathBuf::from("."));
        let output_file = FileManager::output_path_for(input_file, &output_dir, &target_language);

        if FileManager::file_exists(&output_file) && !options.force_overwrite {
            warn!(
                "Skipping {} (output exists, use -f to overwrite)",
                input_file.display()
            );
            skipped += 1;
            continue;
        }

        info!("Translating {}", input_file.display());
        let content = FileManager::read_subtitle_file(input_file)?;

        let progress_bar = ProgressBar::new(0);
        progress_bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} batches ({percent}%) {msg}")
                .expect("Invalid progress bar template")
                .progress_chars("█▓▒░"),
        );
        progress_bar.set_message(
            input_file
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default(),
        );

        let pb = progress_bar.clone();
        let mut output = String::new();
        let summary = pipeline
            .translate(
                &content,
                |chunk| output.push_str(chunk),
                move |done, total| {
                    pb.set_length(total as u64);
                    pb.set_position(done as u64);
                },
            )
            .await
            .with_context(|| format!("Failed to translate: {}", input_file.display()))?;
        progress_bar.finish_and_clear();

        FileManager::write_subtitle_file(&output_file, &output)?;
        info!(
            "Wrote {} ({} entries, {} batches, {} blocks)",
            output_file.display(),
            summary.entry_count,
            summary.batch_count,
            summary.output_blocks
        );
        translated += 1;
    }

    info!("Done: {} translated, {} skipped", translated, skipped);
    Ok(())
}

fn collect_input_files(input_path: &PathBuf) -> Result<Vec<PathBuf>> {
    if input_path.is_dir() {
        FileManager::find_srt_files(input_path)
    } else if input_path.is_file() {
        Ok(vec![input_path.clone()])
    } else {
        Err(anyhow!("Input path not found: {}", input_path.display()))
    }
}
