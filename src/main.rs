// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, warn};
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

use tradoc::Controller;
use tradoc::app_config::{Config, LogLevel};

/// CLI Wrapper for LogLevel to implement ValueEnum
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

fn level_filter(level: &LogLevel) -> LevelFilter {
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
    /// Translate every matching document in the input directory once
    Scan,

    /// Scan once, then keep watching the input directory for changes
    Watch,

    /// Translate a single string and print the sanitized result
    TranslateText {
        /// Text to translate
        text: String,
    },

    /// Show cached translation history
    History {
        /// Document name to show history for; omit for all documents
        name: Option<String>,
    },

    /// Generate shell completions for tradoc
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// tradoc - Translate Documents with AI
///
/// Watches a directory for plain-text documents and translates them through
/// a local Ollama backend, skipping documents that have not changed.
#[derive(Parser, Debug)]
#[command(name = "tradoc")]
#[command(version = "0.1.0")]
#[command(about = "AI-powered document translation watcher")]
#[command(long_about = "tradoc translates plain-text documents through a local LLM backend.

EXAMPLES:
    tradoc scan                          # Translate the input directory once
    tradoc watch                         # Scan, then translate on file changes
    tradoc translate-text \"สวัสดี\"      # Ad-hoc one-string translation
    tradoc history a.txt                 # Cached history for one document
    tradoc --log-level debug watch       # Watch with debug logging
    tradoc completions bash > tradoc.bash

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a
    different config file with --config. If the config file doesn't exist,
    a default one will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

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
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S%.3f");

            let color = match record.level() {
                Level::Error => "\x1B[1;31m",
                Level::Warn => "\x1B[1;33m",
                Level::Info => "\x1B[1;32m",
                Level::Debug => "\x1B[1;36m",
                Level::Trace => "\x1B[1;35m",
            };

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {} {}\x1B[0m",
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
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "tradoc", &mut std::io::stdout());
        return Ok(());
    }

    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &cli.log_level {
        let config_log_level: LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level_filter(&config_log_level));
    }

    let config = load_or_create_config(&cli.config_path, cli.log_level.as_ref())?;

    config
        .validate()
        .context("Configuration validation failed")?;

    // If log level was not set via command line, update it from config now
    if cli.log_level.is_none() {
        log::set_max_level(level_filter(&config.log_level));
    }

    let controller = Controller::with_config(config)?;

    match cli.command {
        Commands::Scan => controller.run_scan().await,
        Commands::Watch => controller.run_watch().await,
        Commands::TranslateText { text } => {
            let translated = controller.translate_text(&text).await?;
            println!("{}", translated);
            Ok(())
        }
        Commands::History { name } => {
            print_history(&controller, name.as_deref());
            Ok(())
        }
        Commands::Completions { .. } => unreachable!("handled above"),
    }
}

/// Load the configuration, creating a default file when none exists
fn load_or_create_config(config_path: &str, log_level: Option<&CliLogLevel>) -> Result<Config> {
    if Path::new(config_path).exists() {
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;

        let reader = BufReader::new(file);
        let mut config: Config = serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?;

        if let Some(log_level) = log_level {
            config.log_level = log_level.clone().into();
        }

        Ok(config)
    } else {
        warn!(
            "Config file not found at '{}', creating default config.",
            config_path
        );

        let mut config = Config::default();

        if let Some(log_level) = log_level {
            config.log_level = log_level.clone().into();
        }

        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;

        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;

        Ok(config)
    }
}

/// Print cached translation history to stdout
fn print_history(controller: &Controller, name: Option<&str>) {
    match name {
        Some(name) => {
            let records = controller.cache().history(name);
            if records.is_empty() {
                println!("No cached translations for '{}'", name);
                return;
            }
            for record in records {
                println!("[{}]", record.timestamp.format("%Y-%m-%d %H:%M:%S"));
                println!("  source: {}", record.source);
                println!("  target: {}", record.target);
            }
        }
        None => {
            let all = controller.cache().all_history();
            if all.is_empty() {
                println!("Translation cache is empty");
                return;
            }
            for (document, records) in all {
                println!("{} ({} records)", document, records.len());
                if let Some(latest) = records.first() {
                    println!(
                        "  latest: [{}] {}",
                        latest.timestamp.format("%Y-%m-%d %H:%M:%S"),
                        latest.target
                    );
                }
            }
        }
    }
}
