// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]
// Add other lints specific to this module that you want to allow but not auto-fix

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, debug};
use std::io::Write;

use kisanroute::app_config::{self, Config};
use kisanroute::Controller;

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
    /// Route a single question and print the answer
    Ask(AskArgs),

    /// Answer questions interactively from standard input
    Repl {
        /// Free-text location passed to handlers
        #[arg(long)]
        location: Option<String>,
    },

    /// Generate shell completions for kisanroute
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct AskArgs {
    /// The question, in any supported language
    #[arg(value_name = "QUERY", required = true, num_args = 1..)]
    query: Vec<String>,

    /// Free-text location passed to handlers
    #[arg(long)]
    location: Option<String>,

    /// Print the full result as JSON
    #[arg(long)]
    json: bool,
}

/// KisanRoute - Multilingual agriculture query router
///
/// Detects the language of a farmer's question, translates it, routes it to
/// the right domain handler and answers in the original language.
#[derive(Parser, Debug)]
#[command(name = "kisanroute")]
#[command(version = "0.1.0")]
#[command(about = "Multilingual agriculture query router")]
#[command(long_about = "KisanRoute answers farming questions written in English or Indian languages.

EXAMPLES:
    kisanroute ask \"wheat price today\"              # Route one question
    kisanroute ask \"आज गेहूं का दाम\" --json           # Hindi question, JSON output
    kisanroute ask --location Punjab \"when to irrigate wheat\"
    kisanroute repl                                  # Interactive mode
    kisanroute --log-level debug ask \"pest on cotton\"
    kisanroute completions bash > kisanroute.bash    # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically. Thresholds and the handler timeout can also be
    set with MIN_DISPATCH_CONFIDENCE, MIN_REPORT_CONFIDENCE and HANDLER_TIMEOUT_SECS.

SUPPORTED LANGUAGES:
    Detection: English, Hindi, Bengali, Telugu, Tamil, Malayalam, Kannada,
    Gujarati, Punjabi. Translation tables: Hindi, Bengali, Tamil, Telugu.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json", global = true)]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,

    /// Minimum classification score for dispatch (0.0 - 1.0)
    #[arg(long, env = "MIN_DISPATCH_CONFIDENCE", global = true)]
    min_dispatch_confidence: Option<f64>,

    /// Minimum confidence for an answer to be reported (0.0 - 1.0)
    #[arg(long, env = "MIN_REPORT_CONFIDENCE", global = true)]
    min_report_confidence: Option<f64>,

    /// Time budget per handler call, in seconds
    #[arg(long, env = "HANDLER_TIMEOUT_SECS", global = true)]
    handler_timeout_secs: Option<u64>,
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

    // @returns: ANSI color for log level
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
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let level = record.level();

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {} {}\x1B[0m",
                Self::get_color_for_level(level),
                now,
                Self::get_emoji_for_level(level),
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
    // Trace is the ceiling; the effective level is set once the config is loaded
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "kisanroute", &mut std::io::stdout());
        return Ok(());
    }

    let config = load_config(&cli)?;
    log::set_max_level(config.log_level.to_level_filter());
    debug!("Effective configuration: {:?}", config);

    let controller = Controller::with_config(config)?;

    match cli.command {
        Commands::Ask(args) => {
            let query = args.query.join(" ");
            let result = controller.ask(&query, args.location.as_deref()).await;
            if args.json {
                let json = serde_json::to_string_pretty(&result).context("Failed to serialize result to JSON")?;
                println!("{}", json);
            } else {
                println!("{}", result.render());
            }
        }
        Commands::Repl { location } => {
            let stdin = std::io::stdin();
            controller
                .run_repl(stdin.lock(), std::io::stdout(), location.as_deref())
                .await?;
        }
        Commands::Completions { .. } => {}
    }

    Ok(())
}

/// Load or create the config file, then apply command line overrides
fn load_config(cli: &CommandLineOptions) -> Result<Config> {
    let mut config = Config::load_or_create(&cli.config_path)?;

    if let Some(value) = cli.min_dispatch_confidence {
        config.min_dispatch_confidence = value;
    }
    if let Some(value) = cli.min_report_confidence {
        config.min_report_confidence = value;
    }
    if let Some(value) = cli.handler_timeout_secs {
        config.handler_timeout_secs = value;
    }
    if let Some(log_level) = &cli.log_level {
        config.log_level = log_level.clone().into();
    }

    config.validate().context("Configuration validation failed")?;
    Ok(config)
}
