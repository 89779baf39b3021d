// CSV/TSV import + report export

use std::io::Read;
use std::path::Path;

use ordermatch_recon::model::{CellValue, RawTable, ReconReport};

use crate::table::table_from_grid;
use crate::REPORT_HEADERS;

pub fn import(path: &Path) -> Result<RawTable, String> {
    let content = read_file_as_utf8(path)?;
    let delimiter = sniff_delimiter(&content);
    import_from_string(&content, delimiter)
}

pub fn import_with_delimiter(path: &Path, delimiter: u8) -> Result<RawTable, String> {
    let content = read_file_as_utf8(path)?;
    import_from_string(&content, delimiter)
}

const DELIMITER_CANDIDATES: [u8; 4] = [b',', b'\t', b';', b'|'];
const SNIFF_LINES: usize = 10;

/// Pick the delimiter that splits the header line into more than one field
/// and whose header width is repeated by the most sample rows. Blank lines
/// are ignored; ties go to the earlier candidate, and comma is the fallback.
fn sniff_delimiter(content: &str) -> u8 {
    let sample: Vec<&str> = content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .take(SNIFF_LINES)
        .collect();

    let mut best = (b',', 0usize);
    for delimiter in DELIMITER_CANDIDATES {
        let mut widths = sample.iter().map(|line| field_count(line, delimiter));
        let Some(header_width) = widths.next().filter(|&w| w > 1) else {
            continue;
        };
        let agreeing_rows = 1 + widths.filter(|&w| w == header_width).count();
        let score = agreeing_rows * header_width;
        if score > best.1 {
            best = (delimiter, score);
        }
    }
    best.0
}

/// Fields in a single line, honouring quotes.
fn field_count(line: &str, delimiter: u8) -> usize {
    csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(line.as_bytes())
        .records()
        .next()
        .and_then(Result::ok)
        .map_or(1, |record| record.len())
}

/// Read file and convert to UTF-8. A UTF-8 BOM is stripped; anything that is
/// not valid UTF-8 is decoded as GB18030 (superset of GBK, the usual encoding
/// of CSV exported by Chinese-locale Excel).
pub fn read_file_as_utf8(path: &Path) -> Result<String, String> {
    let mut file = std::fs::File::open(path)
        .map_err(|e| format!("Failed to open {}: {}", path.display(), e))?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    Ok(decode_bytes(bytes))
}

fn decode_bytes(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(s) => match s.strip_prefix('\u{feff}') {
            Some(stripped) => stripped.to_string(),
            None => s,
        },
        Err(e) => {
            let bytes = e.into_bytes();
            log::debug!("input is not UTF-8, decoding as GB18030");
            let (decoded, _, _) = encoding_rs::GB18030.decode(&bytes);
            decoded.into_owned()
        }
    }
}

fn import_from_string(content: &str, delimiter: u8) -> Result<RawTable, String> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut grid: Vec<Vec<CellValue>> = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| format!("Failed to parse CSV: {}", e))?;
        grid.push(record.iter().map(CellValue::from).collect());
    }

    Ok(table_from_grid(grid))
}

/// Write the reconciled rows with the fixed report header.
pub fn export_report(report: &ReconReport, path: &Path) -> Result<(), String> {
    let mut writer = csv::WriterBuilder::new()
        .from_path(path)
        .map_err(|e| format!("Failed to create {}: {}", path.display(), e))?;

    writer.write_record(REPORT_HEADERS).map_err(|e| e.to_string())?;

    for row in &report.rows {
        writer
            .write_record([
                row.serial.to_string(),
                row.order_no.clone(),
                row.source.label().to_string(),
                row.status.clone(),
                row.product_name.clone(),
                row.revenue.to_string(),
                row.cost.to_string(),
                row.profit.to_string(),
                row.matched.label().to_string(),
            ])
            .map_err(|e| e.to_string())?;
    }

    writer.flush().map_err(|e| e.to_string())?;
    Ok(())
}
