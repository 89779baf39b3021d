//! Console rendering of a reconciliation report.

use std::fmt::Write as _;

use ordermatch_recon::model::{CanonicalField, ColumnMapping, LedgerStats, ReconReport};

use crate::util::{money, pad_left, pad_right};

/// Column widths of the console row table, in display columns.
const TABLE_WIDTHS: [usize; 9] = [4, 22, 10, 10, 28, 11, 11, 11, 8];
const TABLE_HEADERS: [&str; 9] = [
    "序号", "订单号", "来源", "状态", "产品名称", "销售额", "成本", "利润", "匹配",
];

/// Totals block plus one line per ledger and per advisory.
pub fn render_summary(report: &ReconReport) -> String {
    let s = &report.summary;
    let mut out = String::new();

    for stats in [&report.ledgers.official, &report.ledgers.service] {
        let _ = writeln!(out, "{}", ledger_line(stats));
    }
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "对比订单: {}  已匹配: {}  漏单: {}  亏损订单: {}",
        s.compared, s.matched, s.missing, s.loss_orders
    );
    let _ = writeln!(
        out,
        "销售额: {}  成本: {}  利润: {}",
        money(s.total_revenue),
        money(s.total_cost),
        money(s.total_profit)
    );
    if s.figure_mismatches > 0 {
        let _ = writeln!(
            out,
            "金额不一致: {} (两表都有但销售额或成本不同, 以官方表为准)",
            s.figure_mismatches
        );
    }
    for advisory in &report.advisories {
        let _ = writeln!(out, "提示: {}", advisory);
    }
    out
}

fn ledger_line(stats: &LedgerStats) -> String {
    let mut line = format!(
        "{}: {} 行, 有效 {} 行, 订单 {} 个",
        stats.label, stats.raw_rows, stats.filtered_rows, stats.unique_orders
    );
    if stats.duplicates_dropped > 0 {
        let _ = write!(line, ", 重复订单号 {} 个 (保留首行)", stats.duplicates_dropped);
    }
    if !stats.status_filtered {
        line.push_str(", 未按状态筛选");
    }
    line
}

/// Fixed-width table of every reconciled row. Loss rows are flagged with `!`.
pub fn render_rows(report: &ReconReport) -> String {
    let mut out = String::new();
    let header: Vec<String> = TABLE_HEADERS
        .iter()
        .zip(TABLE_WIDTHS)
        .map(|(h, w)| pad_right(h, w))
        .collect();
    let _ = writeln!(out, "  {}", header.join(" ").trim_end());

    for row in &report.rows {
        let cells = [
            pad_left(&row.serial.to_string(), TABLE_WIDTHS[0]),
            pad_right(&row.order_no, TABLE_WIDTHS[1]),
            pad_right(row.source.label(), TABLE_WIDTHS[2]),
            pad_right(&row.status, TABLE_WIDTHS[3]),
            pad_right(&row.product_name, TABLE_WIDTHS[4]),
            pad_left(&money(row.revenue), TABLE_WIDTHS[5]),
            pad_left(&money(row.cost), TABLE_WIDTHS[6]),
            pad_left(&money(row.profit), TABLE_WIDTHS[7]),
            pad_right(row.matched.label(), TABLE_WIDTHS[8]),
        ];
        let marker = if row.is_loss { '!' } else { ' ' };
        let _ = writeln!(out, "{} {}", marker, cells.join(" ").trim_end());
    }
    out
}

/// Resolved column per canonical field, `-` when unresolved.
pub fn render_mapping(mapping: &ColumnMapping) -> String {
    let mut out = String::new();
    for field in CanonicalField::ALL {
        let column = mapping.get(field).unwrap_or("-");
        let _ = writeln!(out, "  {} -> {}", pad_right(field.as_str(), 12), column);
    }
    out
}
