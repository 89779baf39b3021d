use crate::model::{MatchState, ReconciledRow, Summary};

/// Round an amount to whole cents. Coerced amounts are always finite.
pub fn to_cents(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

fn from_cents(cents: i64) -> f64 {
    cents as f64 / 100.0
}

/// Compute summary statistics from reconciled rows. Always a full pass.
///
/// Totals are summed in integer cents so they do not drift with row count,
/// and `total_profit` is `total_revenue - total_cost` exactly.
pub fn compute_summary(rows: &[ReconciledRow]) -> Summary {
    let mut summary = Summary {
        compared: rows.len(),
        ..Summary::default()
    };
    let mut revenue_cents: i64 = 0;
    let mut cost_cents: i64 = 0;

    for r in rows {
        if r.matched == MatchState::Matched {
            summary.matched += 1;
        }
        if r.is_missing {
            summary.missing += 1;
        }
        if r.is_loss {
            summary.loss_orders += 1;
        }
        if r.figure_mismatch {
            summary.figure_mismatches += 1;
        }
        revenue_cents = revenue_cents.saturating_add(to_cents(r.revenue));
        cost_cents = cost_cents.saturating_add(to_cents(r.cost));
    }

    summary.total_revenue = from_cents(revenue_cents);
    summary.total_cost = from_cents(cost_cents);
    summary.total_profit = summary.total_revenue - summary.total_cost;
    summary
}
