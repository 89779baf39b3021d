// Grid → RawTable conversion shared by the CSV and Excel readers

use std::collections::{HashMap, HashSet};

use ordermatch_recon::model::{CellValue, RawTable};

const EMPTY_HEADER: &str = "__EMPTY";

/// Build a keyed table from a positional grid.
///
/// The first non-blank row supplies the headers. Blank header cells become
/// `__EMPTY`, `__EMPTY_1`, ...; repeated headers get `_1`, `_2`, ... so every
/// key is unique. Blank data rows are skipped. The header row is widened to
/// the widest data row.
pub fn table_from_grid(grid: Vec<Vec<CellValue>>) -> RawTable {
    let mut rows = grid.into_iter().skip_while(|r| is_blank_row(r));

    let Some(header_cells) = rows.next() else {
        return RawTable::default();
    };

    let body: Vec<Vec<CellValue>> = rows.filter(|r| !is_blank_row(r)).collect();
    let width = body
        .iter()
        .map(Vec::len)
        .chain(std::iter::once(header_cells.len()))
        .max()
        .unwrap_or(0);

    let mut raw_headers: Vec<String> = header_cells.iter().map(CellValue::to_text).collect();
    raw_headers.resize(width, String::new());

    let mut table = RawTable::new(unique_headers(raw_headers));
    for cells in body {
        table.push_positional(cells);
    }
    table
}

fn is_blank_row(row: &[CellValue]) -> bool {
    row.iter().all(CellValue::is_blank)
}

/// Make header names unique, naming blank ones.
pub fn unique_headers(raw: Vec<String>) -> Vec<String> {
    let mut used: HashSet<String> = HashSet::new();
    let mut counters: HashMap<String, usize> = HashMap::new();

    raw.into_iter()
        .map(|h| {
            let base = if h.trim().is_empty() { EMPTY_HEADER.to_string() } else { h };
            let mut name = base.clone();
            if used.contains(&name) {
                let counter = counters.entry(base.clone()).or_insert(0);
                loop {
                    *counter += 1;
                    name = format!("{base}_{counter}");
                    if !used.contains(&name) {
                        break;
                    }
                }
            }
            used.insert(name.clone());
            name
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> CellValue {
        CellValue::from(s)
    }

    #[test]
    fn blank_and_repeated_headers_are_named() {
        let headers = unique_headers(vec![
            "订单号".into(),
            "".into(),
            "订单号".into(),
            " ".into(),
            "订单号".into(),
        ]);
        assert_eq!(headers, vec!["订单号", "__EMPTY", "订单号_1", "__EMPTY_1", "订单号_2"]);
    }

    #[test]
    fn suffix_skips_names_already_taken() {
        let headers = unique_headers(vec!["a_1".into(), "a".into(), "a".into()]);
        assert_eq!(headers, vec!["a_1", "a", "a_2"]);
    }

    #[test]
    fn leading_and_inner_blank_rows_are_skipped() {
        let grid = vec![
            vec![text(""), text("")],
            vec![text("订单号"), text("金额")],
            vec![text("A1"), CellValue::Number(10.0)],
            vec![text(" "), text("")],
            vec![text("B2"), CellValue::Number(20.0)],
        ];
        let table = table_from_grid(grid);
        assert_eq!(table.headers, vec!["订单号", "金额"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.rows[1]["订单号"], text("B2"));
    }

    #[test]
    fn header_widens_to_longest_row() {
        let grid = vec![
            vec![text("订单号")],
            vec![text("A1"), CellValue::Number(5.0)],
        ];
        let table = table_from_grid(grid);
        assert_eq!(table.headers, vec!["订单号", "__EMPTY"]);
        assert_eq!(table.rows[0]["__EMPTY"], CellValue::Number(5.0));
    }

    #[test]
    fn numeric_headers_are_stringified() {
        let grid = vec![vec![CellValue::Number(2024.0), text("订单号")]];
        let table = table_from_grid(grid);
        assert_eq!(table.headers, vec!["2024", "订单号"]);
        assert_eq!(table.row_count(), 0);
    }

    #[test]
    fn empty_grid_yields_empty_table() {
        let table = table_from_grid(Vec::new());
        assert!(table.headers.is_empty());
        assert_eq!(table.row_count(), 0);
    }
}
