// Excel import (calamine) + styled report export (rust_xlsxwriter)

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader, Sheets};
use rust_xlsxwriter::{Color, Format, Workbook, Worksheet};

use ordermatch_recon::model::{CellValue, RawTable, ReconReport, ReconciledRow};

use crate::table::table_from_grid;
use crate::REPORT_HEADERS;

/// Sheet name of the exported report.
pub const REPORT_SHEET_NAME: &str = "订单比对";

/// Column widths of the exported report, in Excel character units.
pub const REPORT_COLUMN_WIDTHS: [f64; 9] = [8.0, 22.0, 12.0, 12.0, 36.0, 12.0, 12.0, 12.0, 12.0];

const LOSS_FONT_COLOR: u32 = 0x9C0006;
const LOSS_FILL_COLOR: u32 = 0xFFC7CE;

/// Statistics from a report export
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportResult {
    pub rows_exported: usize,
    pub loss_rows_highlighted: usize,
}

// ---------------------------------------------------------------------------
// Import
// ---------------------------------------------------------------------------

/// Import the first sheet of an Excel workbook (xlsx, xlsm, xls, xlsb, ods).
pub fn import_first_sheet(path: &Path) -> Result<RawTable, String> {
    let mut workbook: Sheets<_> = open_workbook_auto(path)
        .map_err(|e| format!("Failed to open Excel file: {}", e))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| "Excel file contains no sheets".to_string())?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| format!("Failed to read sheet '{}': {}", sheet_name, e))?;

    log::debug!(
        "{}: reading sheet '{}' ({} x {})",
        path.display(),
        sheet_name,
        range.height(),
        range.width()
    );

    let grid: Vec<Vec<CellValue>> = range
        .rows()
        .map(|row| row.iter().map(cell_from_data).collect())
        .collect();

    Ok(table_from_grid(grid))
}

fn cell_from_data(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::empty(),
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(n) => CellValue::Number(*n),
        Data::Int(n) => CellValue::Number(*n as f64),
        Data::Bool(b) => CellValue::from(if *b { "TRUE" } else { "FALSE" }),
        Data::Error(e) => CellValue::Text(format!("#{:?}", e)),
        // Date cells keep their serial value, as the sheet stores them.
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
    }
}

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

/// Write the reconciled rows to a single-sheet workbook. Loss rows are
/// highlighted across every column.
pub fn export_report(report: &ReconReport, path: &Path) -> Result<ExportResult, String> {
    let mut workbook = Workbook::new();
    let worksheet = workbook
        .add_worksheet()
        .set_name(REPORT_SHEET_NAME)
        .map_err(|e| format!("Failed to create sheet '{}': {}", REPORT_SHEET_NAME, e))?;

    let header_format = Format::new().set_bold();
    for (col, header) in REPORT_HEADERS.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, *header, &header_format)
            .map_err(|e| format!("Failed to write header: {}", e))?;
    }

    let plain = Format::new();
    let loss = Format::new()
        .set_font_color(Color::RGB(LOSS_FONT_COLOR))
        .set_background_color(Color::RGB(LOSS_FILL_COLOR));

    let mut result = ExportResult::default();
    for (idx, row) in report.rows.iter().enumerate() {
        let format = if row.is_loss { &loss } else { &plain };
        write_row(worksheet, idx as u32 + 1, row, format)?;
        result.rows_exported += 1;
        if row.is_loss {
            result.loss_rows_highlighted += 1;
        }
    }

    for (col, width) in REPORT_COLUMN_WIDTHS.iter().enumerate() {
        worksheet
            .set_column_width(col as u16, *width)
            .map_err(|e| format!("Failed to set column {} width: {}", col, e))?;
    }

    workbook
        .save(path)
        .map_err(|e| format!("Failed to save XLSX file: {}", e))?;

    Ok(result)
}

fn write_row(
    worksheet: &mut Worksheet,
    row_idx: u32,
    row: &ReconciledRow,
    format: &Format,
) -> Result<(), String> {
    let err = |e: rust_xlsxwriter::XlsxError| format!("Failed to write row {}: {}", row_idx, e);

    worksheet
        .write_number_with_format(row_idx, 0, row.serial as f64, format)
        .map_err(err)?;
    for (col, text) in [
        (1u16, row.order_no.as_str()),
        (2, row.source.label()),
        (3, row.status.as_str()),
        (4, row.product_name.as_str()),
    ] {
        worksheet
            .write_string_with_format(row_idx, col, text, format)
            .map_err(err)?;
    }
    for (col, n) in [(5u16, row.revenue), (6, row.cost), (7, row.profit)] {
        worksheet
            .write_number_with_format(row_idx, col, n, format)
            .map_err(err)?;
    }
    worksheet
        .write_string_with_format(row_idx, 8, row.matched.label(), format)
        .map_err(err)?;
    Ok(())
}
