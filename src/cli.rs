use std::path::PathBuf;
use clap::{Parser, ValueEnum};

#[derive(Parser)]
#[command(name = "pollwatch")]
#[command(author = "xicv")]
#[command(version = "0.2.0")]
#[command(about = "A polling file watcher that reports created, modified, and deleted files")]
#[command(long_about = "pollwatch periodically snapshots a directory tree, hashes file contents, and prints which files were created, modified, or deleted since the previous poll. Path patterns restrict watching to matching files.")]
pub struct Cli {
    /// Directory to watch for changes
    #[arg(value_name = "PATH", help = "Path to watch (defaults to current directory)")]
    pub path: Option<PathBuf>,

    /// Regex patterns selecting which paths to watch
    #[arg(
        short,
        long = "pattern",
        value_name = "REGEX",
        help = "Only watch paths matching this regex (repeatable; default: all files)"
    )]
    pub patterns: Vec<String>,

    /// Polling interval in milliseconds
    #[arg(long, value_name = "MS", help = "Polling interval in ms (overrides config)")]
    pub interval: Option<u64>,

    /// Output format for event lines
    #[arg(long, default_value = "text", help = "Output format")]
    pub output: OutputFormat,

    /// Optional configuration file
    #[arg(long, value_name = "FILE", help = "Load settings from a TOML config file")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    /// Disable colors in output
    #[arg(long, help = "Disable colored output")]
    pub no_color: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// One line per event: `<kind>: <relative_path>`
    Text,
    /// JSON object per event for scripting
    Json,
    /// Compact single-letter format
    Compact,
}

impl Cli {
    pub fn get_watch_path(&self) -> PathBuf {
        self.path
            .clone()
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
    }

    pub fn setup_logging(&self) {
        let level = if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        };

        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_target(false)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .init();
    }

    pub fn validate(&self) -> Result<(), String> {
        let path = self.get_watch_path();

        if !path.exists() {
            return Err(format!("Path does not exist: {}", path.display()));
        }

        if !path.is_dir() {
            return Err(format!("Path is not a directory: {}", path.display()));
        }

        if self.interval == Some(0) {
            return Err("Poll interval must be greater than 0".to_string());
        }

        Ok(())
    }
}
