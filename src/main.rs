use std::io;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use pulsefit::app::App;
use pulsefit::config::AppConfig;
use pulsefit::logging::{init_logging, LogConfig, LogFormat};
use pulsefit::simple::{run_plain, PlainOptions};
use pulsefit::Result;
use tracing::{error, info};

/// Guided workouts, a fitness questionnaire and a meal plan in the terminal
#[derive(Debug, Parser)]
#[command(name = "pulsefit", version, about)]
struct Cli {
    /// Line-oriented mode without the full-screen UI
    #[arg(long)]
    plain: bool,

    /// Print finished sessions as JSON (plain mode)
    #[arg(long, requires = "plain")]
    json: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Log output format
    #[arg(long, value_enum, default_value = "compact")]
    log_format: LogFormatArg,

    /// Log file path; defaults to the data directory in TUI mode
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // The TUI owns the terminal, so it always logs to a file
    let log_file = match (&cli.log_file, cli.plain) {
        (Some(path), _) => Some(path.clone()),
        (None, false) => Some(LogConfig::default_log_file()?),
        (None, true) => None,
    };
    let log_config = LogConfig::from_verbosity(cli.verbose)
        .with_format(cli.log_format.into())
        .with_log_file(log_file);
    init_logging(&log_config)?;

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "falling back to default configuration");
            AppConfig::default()
        }
    };
    info!(plain = cli.plain, "starting pulsefit");

    if cli.plain {
        let options = PlainOptions::from_config(&config, cli.json);
        let stdin = io::stdin();
        let mut input = stdin.lock();
        let mut output = io::stdout();
        return run_plain(&config, &options, &mut input, &mut output).await;
    }

    let mut app = App::new(config);
    if let Err(e) = app.run().await {
        eprintln!("Application error: {}", e);
        std::process::exit(1);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_flag() {
        let cli = Cli::try_parse_from(["pulsefit", "--log-format", "json"]).unwrap();
        assert_eq!(LogFormat::from(cli.log_format), LogFormat::Json);

        let cli = Cli::try_parse_from(["pulsefit", "--plain", "--log-format", "pretty"]).unwrap();
        assert_eq!(LogFormat::from(cli.log_format), LogFormat::Pretty);

        let cli = Cli::try_parse_from(["pulsefit"]).unwrap();
        assert_eq!(LogFormat::from(cli.log_format), LogFormat::Compact);

        assert!(Cli::try_parse_from(["pulsefit", "--log-format", "xml"]).is_err());
    }

    #[test]
    fn test_json_requires_plain() {
        assert!(Cli::try_parse_from(["pulsefit", "--json"]).is_err());
        let cli = Cli::try_parse_from(["pulsefit", "--plain", "--json", "-vv"]).unwrap();
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
    }
}
