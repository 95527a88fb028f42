use crate::strategy::BatchConfig;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Replay a script of banking intents against the demo bank
#[derive(Parser, Debug)]
#[command(name = "bank-app")]
#[command(about = "Replay a script of banking intents against the demo bank", long_about = None)]
pub struct CliArgs {
    /// Script CSV file path containing intents
    #[arg(value_name = "SCRIPT", help = "Path to the intent script CSV file")]
    pub script_file: PathBuf,

    /// Script reading strategy
    #[arg(
        long = "strategy",
        value_name = "STRATEGY",
        default_value = "sync",
        help = "Reading strategy: 'sync' for streaming or 'async' for batched"
    )]
    pub strategy: StrategyType,

    /// Number of script rows per batch (async mode only)
    #[arg(
        long = "batch-size",
        value_name = "SIZE",
        help = "Number of script rows per batch (default: 64)"
    )]
    pub batch_size: Option<usize>,

    /// Roster CSV replacing the built-in demo accounts
    #[arg(long = "roster", value_name = "ROSTER")]
    pub roster_file: Option<PathBuf>,

    /// Output format
    #[arg(
        long = "format",
        value_name = "FORMAT",
        default_value = "transcript",
        help = "Output: 'transcript' renders every intent, 'csv' writes final account summaries"
    )]
    pub format: OutputFormat,

    /// Redraw unchanged state on rejected intents without announcing them
    #[arg(long = "silent")]
    pub silent: bool,
}

/// Available script reading strategies
#[derive(Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrategyType {
    Sync,
    Async,
}

/// Available output formats
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Transcript,
    Csv,
}

impl CliArgs {
    /// Create a BatchConfig from CLI arguments, defaults when not given
    pub fn to_batch_config(&self) -> BatchConfig {
        match self.batch_size {
            Some(batch_size) => BatchConfig::new(batch_size),
            None => BatchConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::default_strategy(&["program", "script.csv"], StrategyType::Sync)]
    #[case::explicit_sync(&["program", "--strategy", "sync", "script.csv"], StrategyType::Sync)]
    #[case::explicit_async(&["program", "--strategy", "async", "script.csv"], StrategyType::Async)]
    fn test_strategy_parsing(#[case] args: &[&str], #[case] expected: StrategyType) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.strategy, expected);
    }

    #[rstest]
    #[case::default_format(&["program", "script.csv"], OutputFormat::Transcript)]
    #[case::csv(&["program", "--format", "csv", "script.csv"], OutputFormat::Csv)]
    fn test_format_parsing(#[case] args: &[&str], #[case] expected: OutputFormat) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.format, expected);
    }

    #[test]
    fn test_all_options() {
        let parsed = CliArgs::try_parse_from([
            "program",
            "--strategy",
            "async",
            "--batch-size",
            "16",
            "--roster",
            "roster.csv",
            "--format",
            "csv",
            "--silent",
            "script.csv",
        ])
        .unwrap();

        assert_eq!(parsed.script_file, PathBuf::from("script.csv"));
        assert_eq!(parsed.batch_size, Some(16));
        assert_eq!(parsed.roster_file, Some(PathBuf::from("roster.csv")));
        assert!(parsed.silent);
    }

    #[rstest]
    #[case::defaults(&["program", "script.csv"], 64)]
    #[case::custom(&["program", "--batch-size", "8", "script.csv"], 8)]
    #[case::zero_falls_back(&["program", "--batch-size", "0", "script.csv"], 64)]
    fn test_batch_config_conversion(#[case] args: &[&str], #[case] expected: usize) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.to_batch_config().batch_size, expected);
    }

    #[rstest]
    #[case::missing_script(&["program"])]
    #[case::invalid_strategy(&["program", "--strategy", "invalid", "script.csv"])]
    #[case::invalid_format(&["program", "--format", "html", "script.csv"])]
    fn test_parsing_errors(#[case] args: &[&str]) {
        assert!(CliArgs::try_parse_from(args).is_err());
    }
}
