//! `ordermatch inspect` - show how a ledger file's headers resolve.

use std::path::PathBuf;

use serde::Serialize;

use ordermatch_recon::engine::inspect_headers;
use ordermatch_recon::model::ColumnMapping;

use crate::exit_codes::EXIT_MISSING_ID_COLUMN;
use crate::recon::{load_config, load_ledger};
use crate::render::render_mapping;
use crate::CliError;

#[derive(Debug, Serialize)]
struct InspectOutput {
    file: String,
    rows: usize,
    headers: Vec<String>,
    mapping: ColumnMapping,
}

pub fn cmd_inspect(file: PathBuf, config: Option<PathBuf>, json: bool) -> Result<(), CliError> {
    let config = load_config(config.as_deref())?;
    let table = load_ledger(&file)?;
    let mapping = inspect_headers(&config, &table.headers);

    if json {
        let output = InspectOutput {
            file: file.display().to_string(),
            rows: table.row_count(),
            headers: table.headers.clone(),
            mapping: mapping.clone(),
        };
        let text = serde_json::to_string_pretty(&output).map_err(|e| CliError::io(e.to_string()))?;
        println!("{text}");
    } else {
        println!("{}: {} data rows", file.display(), table.row_count());
        println!("headers: {}", table.headers.join(", "));
        println!("resolved columns:");
        print!("{}", render_mapping(&mapping));
        if !mapping.has_status() {
            println!("no status column: every row would be used without status filtering");
        }
    }

    if mapping.order_no.is_none() {
        return Err(CliError {
            code: EXIT_MISSING_ID_COLUMN,
            message: format!("{}: cannot identify the order number column", file.display()),
            hint: Some("add the header to [aliases] order_no in a config file".to_string()),
        });
    }
    Ok(())
}
