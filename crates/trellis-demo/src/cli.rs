use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::filter::LevelFilter;

/// Log level options for CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    Off,
    /// Error messages only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational messages
    Info,
    /// Debug messages, including a summary of every render pass
    Debug,
    /// Trace-level messages, including every reconcile decision
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::OFF,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "trellis")]
#[command(about = "trellis - live lot listing rendered through the trellis reconciler")]
#[command(version)]
pub struct Cli {
    /// Config file path (TOML, YAML or JSON)
    #[arg(short = 'C', long)]
    pub config: Option<PathBuf>,

    /// Set log level; overrides the config file
    #[arg(short = 'l', long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Enable verbose logging (shortcut for --log-level=debug)
    #[arg(short, long)]
    pub verbose: bool,

    /// Stop after this many render passes (0 = run until interrupted)
    #[arg(short = 'n', long, default_value = "0")]
    pub renders: usize,

    /// Print the live tree as HTML after every render pass
    #[arg(long)]
    pub print_html: bool,
}

impl Cli {
    /// Effective log filter: explicit level, then --verbose, then the config value.
    pub fn level_filter(&self, configured: &str) -> LevelFilter {
        if let Some(level) = self.log_level {
            return level.into();
        }
        if self.verbose {
            return LevelFilter::DEBUG;
        }
        configured.parse().unwrap_or(LevelFilter::INFO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_level_wins() {
        let cli = Cli::parse_from(["trellis", "--log-level", "trace", "--verbose"]);
        assert_eq!(cli.level_filter("warn"), LevelFilter::TRACE);
    }

    #[test]
    fn verbose_beats_config() {
        let cli = Cli::parse_from(["trellis", "-v"]);
        assert_eq!(cli.level_filter("warn"), LevelFilter::DEBUG);
    }

    #[test]
    fn config_level_is_the_fallback() {
        let cli = Cli::parse_from(["trellis", "-n", "3", "--print-html"]);
        assert_eq!(cli.level_filter("warn"), LevelFilter::WARN);
        assert_eq!(cli.renders, 3);
        assert!(cli.print_html);
    }
}
