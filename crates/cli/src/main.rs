// ordermatch - reconcile an official order ledger against a customer-service ledger

mod exit_codes;
mod inspect;
mod logging;
mod recon;
mod render;
mod util;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};

use exit_codes::{EXIT_IO, EXIT_SUCCESS, EXIT_USAGE};

#[derive(Parser)]
#[command(name = "ordermatch")]
#[command(about = "Reconcile an official order ledger against a customer-service ledger")]
#[command(version)]
struct Cli {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Join both ledgers by order number and report missing orders and profit
    #[command(after_help = "\
Examples:
  ordermatch run 官方.xlsx 客服.xlsx
  ordermatch run 官方.xlsx 客服.csv --default-cost 12.5 -o 订单比对结果.xlsx
  ordermatch run official.csv service.csv --json --strict
  ordermatch run official.xlsx service.xlsx -c shop.toml -o out.xlsx -o out.json")]
    Run {
        /// Official platform export (xlsx, xls, xlsb, ods, csv, tsv)
        official: PathBuf,

        /// Customer-service export (xlsx, xls, xlsb, ods, csv, tsv)
        service: PathBuf,

        /// TOML config with aliases, status keywords and default cost
        #[arg(long, short = 'c', env = "ORDERMATCH_CONFIG")]
        config: Option<PathBuf>,

        /// Cost for ledgers without a cost column (overrides the config)
        #[arg(long, value_name = "AMOUNT", allow_negative_numbers = true)]
        default_cost: Option<f64>,

        /// Write the report; format from extension (xlsx, csv, json). Repeatable.
        #[arg(long, short = 'o', value_name = "FILE")]
        output: Vec<PathBuf>,

        /// Print the full report as JSON instead of the console summary
        #[arg(long)]
        json: bool,

        /// Print only the summary, not the row table
        #[arg(long, short = 'q')]
        quiet: bool,

        /// Exit 1 when any order is missing from one ledger
        #[arg(long)]
        strict: bool,
    },

    /// Show headers and the resolved columns of one ledger file
    #[command(after_help = "\
Examples:
  ordermatch inspect 客服.xlsx
  ordermatch inspect 客服.csv -c shop.toml --json")]
    Inspect {
        /// Ledger file to inspect
        file: PathBuf,

        /// TOML config with aliases
        #[arg(long, short = 'c', env = "ORDERMATCH_CONFIG")]
        config: Option<PathBuf>,

        /// Output JSON
        #[arg(long)]
        json: bool,
    },

    /// Parse and validate a config file without running
    Validate {
        /// Path to the TOML config file
        config: PathBuf,
    },

    /// Print the built-in default config as TOML
    Config,
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn args(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self { code: EXIT_IO, message: msg.into(), hint: None }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_logging(&logging::LogConfig::from_verbosity(cli.verbose));

    let result = match cli.command {
        Commands::Run {
            official,
            service,
            config,
            default_cost,
            output,
            json,
            quiet,
            strict,
        } => recon::cmd_run(recon::RunArgs {
            official,
            service,
            config,
            default_cost,
            output,
            json,
            quiet,
            strict,
        }),
        Commands::Inspect { file, config, json } => inspect::cmd_inspect(file, config, json),
        Commands::Validate { config } => recon::cmd_validate(config),
        Commands::Config => recon::cmd_config(),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}
