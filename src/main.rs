// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use std::io::Write;
use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{info, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

use doctrans::app_config::{Config, LogLevel, RequestOverrides};
use doctrans::app_controller::Controller;
use doctrans::language;

/// CLI wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

fn level_filter(level: LogLevel) -> LevelFilter {
    match level {
        LogLevel::Error => LevelFilter::Error,
        LogLevel::Warn => LevelFilter::Warn,
        LogLevel::Info => LevelFilter::Info,
        LogLevel::Debug => LevelFilter::Debug,
        LogLevel::Trace => LevelFilter::Trace,
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate an office document (default command)
    #[command(alias = "translate")]
    Translate(TranslateArgs),

    /// Generate shell completions for doctrans
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct TranslateArgs {
    /// Input document (.doc, .docx, .xls, .xlsx, .ppt, .pptx)
    #[arg(value_name = "INPUT_FILE")]
    input_file: PathBuf,

    /// Source language code (e.g. 'en')
    #[arg(short, long)]
    source_language: String,

    /// Target language code (e.g. 'zh')
    #[arg(short, long)]
    target_language: String,

    /// Output directory for the translated document
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Force overwrite of an existing output file
    #[arg(short, long)]
    force_overwrite: bool,

    /// Model name to use for translation
    #[arg(short, long)]
    model: Option<String>,

    /// API endpoint of the OpenAI-compatible backend
    #[arg(short, long)]
    endpoint: Option<String>,

    /// API key for the backend
    #[arg(short, long, env = "OPENAI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// doctrans - Office Document Translation
///
/// Translates office documents between languages with an LLM backend
/// while preserving the original formatting and layout.
#[derive(Parser, Debug)]
#[command(name = "doctrans")]
#[command(version = "1.0.0")]
#[command(about = "AI-powered office document translation tool")]
#[command(long_about = "doctrans translates .docx, .xlsx and .pptx documents between a fixed set of
languages using an OpenAI-compatible completion backend, preserving fonts,
sizes, emphasis and colors. Legacy .doc/.xls/.ppt uploads produce a
conversion notice instead of a translation.

EXAMPLES:
    doctrans report.docx -s en -t zh            # English to Chinese
    doctrans -s zh -t ja -o out budget.xlsx     # write into ./out
    doctrans -m my-model -s en -t th deck.pptx  # pick the model
    doctrans completions bash > doctrans.bash   # generate completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a
    different file with --config-path. If the config file doesn't exist,
    a default one will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input document (.doc, .docx, .xls, .xlsx, .ppt, .pptx)
    #[arg(value_name = "INPUT_FILE")]
    input_file: Option<PathBuf>,

    /// Source language code (e.g. 'en')
    #[arg(short, long)]
    source_language: Option<String>,

    /// Target language code (e.g. 'zh')
    #[arg(short, long)]
    target_language: Option<String>,

    /// Output directory for the translated document
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Force overwrite of an existing output file
    #[arg(short, long)]
    force_overwrite: bool,

    /// Model name to use for translation
    #[arg(short, long)]
    model: Option<String>,

    /// API endpoint of the OpenAI-compatible backend
    #[arg(short, long)]
    endpoint: Option<String>,

    /// API key for the backend
    #[arg(short, long, env = "OPENAI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

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

    // @returns: ANSI color code for log level
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
            let now = chrono::Local::now().format("%H:%M:%S%.3f");
            let color = Self::color_for_level(record.level());
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {:5} {}\x1B[0m",
                color,
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

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default.
    // The level is updated after the CLI and config are read.
    CustomLogger::init(LevelFilter::Info)
        .map_err(|e| anyhow!("Failed to initialize logger: {}", e))?;

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "doctrans", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Translate(args)) => run_translate(args).await,
        None => {
            // Default behavior - use top-level args for backwards compatibility
            let input_file = cli
                .input_file
                .ok_or_else(|| anyhow!("INPUT_FILE is required when no subcommand is specified"))?;
            let source_language = cli
                .source_language
                .ok_or_else(|| anyhow!("--source-language is required"))?;
            let target_language = cli
                .target_language
                .ok_or_else(|| anyhow!("--target-language is required"))?;

            let args = TranslateArgs {
                input_file,
                source_language,
                target_language,
                output_dir: cli.output_dir,
                force_overwrite: cli.force_overwrite,
                model: cli.model,
                endpoint: cli.endpoint,
                api_key: cli.api_key,
                config_path: cli.config_path,
                log_level: cli.log_level,
            };
            run_translate(args).await
        }
    }
}

async fn run_translate(options: TranslateArgs) -> Result<()> {
    let config = Config::load_or_create(&options.config_path)?;

    // Command-line log level wins over the configured one
    let log_level = options
        .log_level
        .map(LogLevel::from)
        .unwrap_or(config.log_level);
    log::set_max_level(level_filter(log_level));

    for code in [&options.source_language, &options.target_language] {
        if !language::is_supported(code) {
            let supported: Vec<String> = language::SUPPORTED_LANGUAGES
                .iter()
                .map(|lang| format!("{} ({})", lang.code, lang.name))
                .collect();
            return Err(anyhow!(
                "Unsupported language code '{}'. Supported: {}",
                code,
                supported.join(", ")
            ));
        }
    }

    let overrides = RequestOverrides {
        model: options.model,
        endpoint: options.endpoint,
        api_key: options.api_key,
        ..Default::default()
    };

    info!(
        "Translating {} from {} to {}",
        options.input_file.display(),
        language::display_name(&options.source_language),
        language::display_name(&options.target_language)
    );

    let controller = Controller::with_config(config);
    let output_path = controller
        .translate_file(
            &options.input_file,
            &options.output_dir,
            &options.source_language,
            &options.target_language,
            &overrides,
            options.force_overwrite,
        )
        .await
        .map_err(|e| anyhow!("{}", e))?;

    info!("Output written to {}", output_path.display());
    Ok(())
}
