//! `ordermatch run`, `validate`, `config`.

use std::path::{Path, PathBuf};

use ordermatch_recon::ReconConfig;

use crate::exit_codes::{recon_exit_code, EXIT_DISCREPANCIES, EXIT_INVALID_CONFIG, EXIT_IO};
use crate::render::{render_rows, render_summary};
use crate::CliError;

pub struct RunArgs {
    pub official: PathBuf,
    pub service: PathBuf,
    pub config: Option<PathBuf>,
    pub default_cost: Option<f64>,
    pub output: Vec<PathBuf>,
    pub json: bool,
    pub quiet: bool,
    pub strict: bool,
}

fn recon_err(code: u8, msg: impl Into<String>) -> CliError {
    CliError { code, message: msg.into(), hint: None }
}

/// Built-in defaults, or the given TOML file parsed and validated.
pub(crate) fn load_config(path: Option<&Path>) -> Result<ReconConfig, CliError> {
    let Some(path) = path else {
        return Ok(ReconConfig::default());
    };
    let text = std::fs::read_to_string(path).map_err(|e| {
        recon_err(EXIT_IO, format!("cannot read config {}: {e}", path.display()))
    })?;
    let config = ReconConfig::from_toml(&text).map_err(|e| {
        recon_err(EXIT_INVALID_CONFIG, format!("{}: {e}", path.display()))
            .with_hint("run `ordermatch config` to see every key with its default")
    })?;
    log::debug!("loaded config from {}", path.display());
    Ok(config)
}

/// Decode one ledger file. Unsupported extensions and missing files are
/// usage errors; decode failures are io errors.
pub(crate) fn load_ledger(path: &Path) -> Result<ordermatch_recon::RawTable, CliError> {
    ordermatch_io::InputFormat::from_path(path).map_err(CliError::args)?;
    if !path.exists() {
        return Err(CliError::args(format!("file not found: {}", path.display())));
    }
    ordermatch_io::load_table(path).map_err(CliError::io)
}

pub fn cmd_run(args: RunArgs) -> Result<(), CliError> {
    // Reject unsupported output paths before doing any work.
    for path in &args.output {
        ordermatch_io::ReportFormat::from_path(path).map_err(CliError::args)?;
    }

    let mut config = load_config(args.config.as_deref())?;
    if let Some(cost) = args.default_cost {
        if !cost.is_finite() {
            return Err(CliError::args(format!(
                "--default-cost must be a finite number, got {cost}"
            )));
        }
        config.default_cost = cost;
    }

    let official = load_ledger(&args.official)?;
    let service = load_ledger(&args.service)?;

    let report = ordermatch_recon::run(&config, &official, &service).map_err(|e| {
        let err = recon_err(recon_exit_code(&e), e.to_string());
        match e {
            ordermatch_recon::ReconError::MissingIdentifierColumn { .. } => err.with_hint(
                "run `ordermatch inspect <FILE>` to see the headers, or add the column name to [aliases] order_no",
            ),
            _ => err,
        }
    })?;

    for path in &args.output {
        ordermatch_io::export_report(&report, path).map_err(|e| recon_err(EXIT_IO, e))?;
        if !args.json {
            eprintln!("wrote {}", path.display());
        }
    }

    if args.json {
        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| recon_err(EXIT_IO, format!("JSON serialization error: {e}")))?;
        println!("{json}");
    } else {
        if !args.quiet && !report.rows.is_empty() {
            print!("{}", render_rows(&report));
            println!();
        }
        print!("{}", render_summary(&report));
    }

    if args.strict && report.has_discrepancies() {
        return Err(recon_err(
            EXIT_DISCREPANCIES,
            format!("{} order(s) missing from one ledger", report.summary.missing),
        ));
    }

    Ok(())
}

pub fn cmd_validate(path: PathBuf) -> Result<(), CliError> {
    let config = load_config(Some(&path))?;
    println!(
        "{}: ok ({} status keyword(s), {} order number alias(es))",
        path.display(),
        config.status_keywords.len(),
        config.aliases.order_no.len()
    );
    Ok(())
}

pub fn cmd_config() -> Result<(), CliError> {
    let toml = ReconConfig::default()
        .to_toml()
        .map_err(|e| recon_err(EXIT_INVALID_CONFIG, e.to_string()))?;
    print!("{toml}");
    Ok(())
}
