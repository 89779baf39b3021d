// File I/O operations: ledger decoding and report export

pub mod csv;
pub mod json;
pub mod table;
pub mod xlsx;

use std::path::Path;

use ordermatch_recon::model::{RawTable, ReconReport};

/// Export header, in the fixed column order of every tabular report.
pub const REPORT_HEADERS: [&str; 9] = [
    "类序号", "订单号", "来源", "状态", "产品名称", "销售额", "成本", "利润", "匹配情况",
];

/// File name used when no output path is given.
pub const DEFAULT_REPORT_FILE_NAME: &str = "订单比对结果.xlsx";

/// Input formats, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Excel,
    Csv,
    Tsv,
}

/// Report formats, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Xlsx,
    Csv,
    Json,
}

fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default()
}

impl InputFormat {
    pub fn from_path(path: &Path) -> Result<Self, String> {
        match extension(path).as_str() {
            "xlsx" | "xlsm" | "xls" | "xlsb" | "ods" => Ok(Self::Excel),
            "csv" | "txt" => Ok(Self::Csv),
            "tsv" => Ok(Self::Tsv),
            other => Err(format!(
                "Unsupported input format '{}' for {} (expected xlsx, xls, xlsb, ods, csv, tsv or txt)",
                other,
                path.display()
            )),
        }
    }
}

impl ReportFormat {
    pub fn from_path(path: &Path) -> Result<Self, String> {
        match extension(path).as_str() {
            "xlsx" => Ok(Self::Xlsx),
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(format!(
                "Unsupported output format '{}' for {} (expected xlsx, csv or json)",
                other,
                path.display()
            )),
        }
    }
}

/// Decode the first sheet of a ledger file.
pub fn load_table(path: &Path) -> Result<RawTable, String> {
    let table = match InputFormat::from_path(path)? {
        InputFormat::Excel => xlsx::import_first_sheet(path)?,
        InputFormat::Csv => csv::import(path)?,
        InputFormat::Tsv => csv::import_with_delimiter(path, b'\t')?,
    };
    log::debug!(
        "{}: {} columns, {} data rows",
        path.display(),
        table.headers.len(),
        table.row_count()
    );
    Ok(table)
}

/// Write a report in the format implied by the path's extension.
pub fn export_report(report: &ReconReport, path: &Path) -> Result<(), String> {
    match ReportFormat::from_path(path)? {
        ReportFormat::Xlsx => {
            let result = xlsx::export_report(report, path)?;
            log::debug!(
                "{}: {} rows written, {} highlighted",
                path.display(),
                result.rows_exported,
                result.loss_rows_highlighted
            );
        }
        ReportFormat::Csv => csv::export_report(report, path)?,
        ReportFormat::Json => json::export_report(report, path)?,
    }
    Ok(())
}
