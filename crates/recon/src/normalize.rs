//! Projection of raw rows onto canonical order records.

use crate::error::ReconError;
use crate::model::{CellValue, ColumnMapping, NormalizedRecord, RawRow};

// ---------------------------------------------------------------------------
// Numeric coercion
// ---------------------------------------------------------------------------

/// Characters removed from text before numeric parsing.
fn is_noise(c: char) -> bool {
    matches!(c, '¥' | '￥' | '$' | '€' | '£' | ',' | '，') || c.is_whitespace()
}

/// Coerce any cell to a number. Never fails: anything that does not parse to
/// a finite value becomes 0.
pub fn coerce_number(cell: &CellValue) -> f64 {
    match cell {
        CellValue::Number(n) => *n,
        CellValue::Text(s) => parse_amount(s),
    }
}

/// Parse an amount string such as `"¥1,234.50"`. Empty and unparseable input
/// yield 0.
pub fn parse_amount(raw: &str) -> f64 {
    let cleaned: String = raw.chars().filter(|c| !is_noise(*c)).collect();
    if cleaned.is_empty() {
        return 0.0;
    }
    match cleaned.parse::<f64>() {
        Ok(n) if n.is_finite() => n,
        _ => 0.0,
    }
}

fn cell_at<'a>(row: &'a RawRow, column: Option<&str>) -> Option<&'a CellValue> {
    column.and_then(|c| row.get(c))
}

fn text_at(row: &RawRow, column: Option<&str>) -> String {
    cell_at(row, column)
        .map(|cell| cell.to_text().trim().to_string())
        .unwrap_or_default()
}

fn number_at(row: &RawRow, column: Option<&str>) -> f64 {
    cell_at(row, column).map(coerce_number).unwrap_or(0.0)
}

// ---------------------------------------------------------------------------
// Row normalization
// ---------------------------------------------------------------------------

/// Normalize one ledger's rows, preserving source order.
///
/// An empty ledger normalizes to nothing without consulting the mapping.
/// Otherwise an unresolved order number column is fatal for the ledger, and
/// rows whose order number is blank are dropped.
pub fn normalize_rows(
    rows: &[RawRow],
    mapping: &ColumnMapping,
    default_cost: f64,
    ledger: &str,
) -> Result<Vec<NormalizedRecord>, ReconError> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let order_col = mapping.order_no.as_deref().ok_or_else(|| {
        ReconError::MissingIdentifierColumn { ledger: ledger.to_string() }
    })?;

    let records: Vec<NormalizedRecord> = rows
        .iter()
        .filter_map(|row| {
            let order_no = text_at(row, Some(order_col));
            if order_no.is_empty() {
                return None;
            }
            let cost = match mapping.cost.as_deref() {
                Some(col) => number_at(row, Some(col)),
                None => default_cost,
            };
            Some(NormalizedRecord {
                order_no,
                status: text_at(row, mapping.status.as_deref()),
                product_name: text_at(row, mapping.product_name.as_deref()),
                revenue: number_at(row, mapping.revenue.as_deref()),
                cost,
            })
        })
        .collect();

    log::debug!(
        "{ledger}: {} of {} rows carry an order number",
        records.len(),
        rows.len()
    );

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RawTable;

    fn mapping(order: &str, status: Option<&str>, cost: Option<&str>) -> ColumnMapping {
        ColumnMapping {
            order_no: Some(order.into()),
            status: status.map(Into::into),
            product_name: Some("商品名称".into()),
            revenue: Some("金额".into()),
            cost: cost.map(Into::into),
        }
    }

    #[test]
    fn parse_amount_strips_currency_and_separators() {
        assert_eq!(parse_amount("¥1,234.50"), 1234.5);
        assert_eq!(parse_amount("￥ 99"), 99.0);
        assert_eq!(parse_amount("$1,000"), 1000.0);
        assert_eq!(parse_amount(" -12.5 "), -12.5);
        assert_eq!(parse_amount("1，200"), 1200.0);
    }

    #[test]
    fn parse_amount_never_fails() {
        assert_eq!(parse_amount("abc"), 0.0);
        assert_eq!(parse_amount(""), 0.0);
        assert_eq!(parse_amount("   "), 0.0);
        assert_eq!(parse_amount("12abc"), 0.0);
        assert_eq!(parse_amount("inf"), 0.0);
        assert_eq!(parse_amount("NaN"), 0.0);
        assert_eq!(parse_amount("1e400"), 0.0);
    }

    #[test]
    fn coerce_number_passes_numbers_through() {
        assert_eq!(coerce_number(&CellValue::Number(-7.25)), -7.25);
        assert_eq!(coerce_number(&CellValue::from("8")), 8.0);
    }

    #[test]
    fn normalizes_and_trims() {
        let table = RawTable::from_rows(
            &["订单号", "状态", "商品名称", "金额", "成本"],
            vec![vec![
                " A1 ".into(),
                " 交易成功 ".into(),
                " 杯子 ".into(),
                "¥100".into(),
                40.0.into(),
            ]],
        );
        let records =
            normalize_rows(&table.rows, &mapping("订单号", Some("状态"), Some("成本")), 5.0, "官方表")
                .unwrap();
        assert_eq!(
            records,
            vec![NormalizedRecord {
                order_no: "A1".into(),
                status: "交易成功".into(),
                product_name: "杯子".into(),
                revenue: 100.0,
                cost: 40.0,
            }]
        );
    }

    #[test]
    fn numeric_order_numbers_are_stringified() {
        let table = RawTable::from_rows(&["订单号", "金额"], vec![vec![20240101.0.into(), 1.0.into()]]);
        let records = normalize_rows(&table.rows, &mapping("订单号", None, None), 0.0, "官方表").unwrap();
        assert_eq!(records[0].order_no, "20240101");
    }

    #[test]
    fn blank_order_numbers_are_dropped() {
        let table = RawTable::from_rows(
            &["订单号", "金额"],
            vec![
                vec!["A1".into(), 1.0.into()],
                vec!["   ".into(), 2.0.into()],
                vec!["".into(), 3.0.into()],
                vec!["B2".into(), 4.0.into()],
            ],
        );
        let records = normalize_rows(&table.rows, &mapping("订单号", None, None), 0.0, "客服表").unwrap();
        let ids: Vec<&str> = records.iter().map(|r| r.order_no.as_str()).collect();
        assert_eq!(ids, vec!["A1", "B2"]);
    }

    #[test]
    fn missing_cost_column_uses_default_cost() {
        let table = RawTable::from_rows(&["订单号", "金额"], vec![vec!["A1".into(), "50".into()]]);
        let records =
            normalize_rows(&table.rows, &mapping("订单号", None, None), 12.5, "客服表").unwrap();
        assert_eq!(records[0].cost, 12.5);
        assert_eq!(records[0].status, "");
    }

    #[test]
    fn unparseable_cost_coerces_to_zero_not_default() {
        let table = RawTable::from_rows(
            &["订单号", "金额", "成本"],
            vec![vec!["A1".into(), "50".into(), "n/a".into()]],
        );
        let records =
            normalize_rows(&table.rows, &mapping("订单号", None, Some("成本")), 12.5, "客服表").unwrap();
        assert_eq!(records[0].cost, 0.0);
    }

    #[test]
    fn unresolved_revenue_and_product_default_to_empty() {
        let table = RawTable::from_rows(&["订单号"], vec![vec!["A1".into()]]);
        let m = ColumnMapping { order_no: Some("订单号".into()), ..Default::default() };
        let records = normalize_rows(&table.rows, &m, 3.0, "官方表").unwrap();
        assert_eq!(records[0].revenue, 0.0);
        assert_eq!(records[0].product_name, "");
        assert_eq!(records[0].cost, 3.0);
    }

    #[test]
    fn unresolved_order_column_is_fatal() {
        let table = RawTable::from_rows(&["客户"], vec![vec!["x".into()]]);
        let err = normalize_rows(&table.rows, &ColumnMapping::default(), 0.0, "官方表").unwrap_err();
        match err {
            ReconError::MissingIdentifierColumn { ledger } => assert_eq!(ledger, "官方表"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_ledger_is_not_fatal() {
        let records = normalize_rows(&[], &ColumnMapping::default(), 0.0, "官方表").unwrap();
        assert!(records.is_empty());
    }
}
