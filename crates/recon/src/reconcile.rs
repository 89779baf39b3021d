use std::collections::HashSet;

use crate::ledger::LedgerTable;
use crate::model::{MatchState, NormalizedRecord, ReconciledRow, Source};

pub const PRODUCT_NAME_SEPARATOR: &str = " / ";

/// Outer-join both ledgers by order number.
///
/// Every order number seen on either side yields exactly one row. Iteration
/// follows first appearance: official order numbers first, then service-only
/// ones. Financial figures come from the official record when present.
pub fn reconcile(official: &LedgerTable, service: &LedgerTable) -> Vec<ReconciledRow> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(official.len() + service.len());
    let union: Vec<&str> = official
        .order_numbers()
        .chain(service.order_numbers())
        .filter(|key| seen.insert(*key))
        .collect();

    union
        .into_iter()
        .enumerate()
        .map(|(idx, order_no)| {
            reconcile_one(idx + 1, order_no, official.get(order_no), service.get(order_no))
        })
        .collect()
}

fn reconcile_one(
    serial: usize,
    order_no: &str,
    official: Option<&NormalizedRecord>,
    service: Option<&NormalizedRecord>,
) -> ReconciledRow {
    let (source, primary) = match (official, service) {
        (Some(o), Some(_)) => (Source::Both, o),
        (Some(o), None) => (Source::OfficialOnly, o),
        (None, Some(s)) => (Source::ServiceOnly, s),
        (None, None) => unreachable!("order number {order_no} came from neither ledger"),
    };

    let status = official
        .map(|o| o.status.as_str())
        .filter(|s| !s.is_empty())
        .or_else(|| service.map(|s| s.status.as_str()))
        .unwrap_or_default()
        .to_string();

    let product_name = merge_product_name(
        official.map(|o| o.product_name.as_str()).unwrap_or_default(),
        service.map(|s| s.product_name.as_str()).unwrap_or_default(),
    );

    let revenue = primary.revenue;
    let cost = primary.cost;
    let profit = revenue - cost;
    let matched = if source == Source::Both {
        MatchState::Matched
    } else {
        MatchState::Discrepancy
    };
    let figure_mismatch = match (official, service) {
        (Some(o), Some(s)) => {
            figures_differ(o.revenue, s.revenue) || figures_differ(o.cost, s.cost)
        }
        _ => false,
    };

    ReconciledRow {
        serial,
        order_no: order_no.to_string(),
        source,
        status,
        product_name,
        revenue,
        cost,
        profit,
        matched,
        is_loss: profit < 0.0,
        is_missing: matched != MatchState::Matched,
        figure_mismatch,
    }
}

/// Combine product names: distinct non-empty names are joined, otherwise the
/// non-empty one wins.
pub fn merge_product_name(official: &str, service: &str) -> String {
    match (official.is_empty(), service.is_empty()) {
        (false, false) if official != service => {
            format!("{official}{PRODUCT_NAME_SEPARATOR}{service}")
        }
        (false, _) => official.to_string(),
        (true, _) => service.to_string(),
    }
}

/// Epsilon-scaled comparison so values that differ only by float
/// representation are not reported.
fn figures_differ(a: f64, b: f64) -> bool {
    let delta = (a - b).abs();
    let scale = 1.0_f64.max(a.abs()).max(b.abs());
    delta > f64::EPSILON * 16.0 * scale
}
