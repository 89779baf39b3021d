use crate::config::ReconConfig;
use crate::error::ReconError;
use crate::filter::filter_by_status;
use crate::header::resolve_columns;
use crate::ledger::LedgerTable;
use crate::model::{
    Advisory, ColumnMapping, Ledger, LedgerStats, LedgerStatsPair, RawTable, ReconMeta,
    ReconReport,
};
use crate::normalize::normalize_rows;
use crate::reconcile::reconcile;
use crate::summary::compute_summary;

/// One ledger after header resolution, normalization and status filtering.
#[derive(Debug)]
pub struct PreparedLedger {
    pub table: LedgerTable,
    pub stats: LedgerStats,
    pub advisory: Option<Advisory>,
}

/// Resolve the canonical columns of a ledger's headers.
pub fn inspect_headers(config: &ReconConfig, headers: &[String]) -> ColumnMapping {
    resolve_columns(headers, &config.aliases)
}

/// Run one ledger through the resolver, normalizer and status filter.
pub fn prepare_ledger(
    config: &ReconConfig,
    ledger: Ledger,
    raw: &RawTable,
) -> Result<PreparedLedger, ReconError> {
    let label = config.ledgers.label(ledger);
    let mapping = resolve_columns(&raw.headers, &config.aliases);
    log::debug!("{label}: resolved columns {mapping:?}");

    let records = normalize_rows(&raw.rows, &mapping, config.default_cost, label)?;
    let normalized_rows = records.len();

    // An empty ledger is treated as having no status column.
    let has_status_column = !raw.rows.is_empty() && mapping.has_status();
    let outcome = filter_by_status(records, has_status_column, &config.status_keywords, label);
    let filtered_rows = outcome.records.len();

    let table = LedgerTable::from_records(outcome.records);
    if table.duplicates_dropped() > 0 {
        log::debug!(
            "{label}: {} repeated order number(s) ignored, first occurrence kept",
            table.duplicates_dropped()
        );
    }

    let stats = LedgerStats {
        label: label.to_string(),
        raw_rows: raw.row_count(),
        normalized_rows,
        filtered_rows,
        unique_orders: table.len(),
        duplicates_dropped: table.duplicates_dropped(),
        status_filtered: has_status_column,
        mapping,
    };

    Ok(PreparedLedger { table, stats, advisory: outcome.advisory })
}

/// Run the full pipeline over both ledgers. Either ledger lacking an order
/// number column aborts the run before any row is produced.
pub fn run(
    config: &ReconConfig,
    official: &RawTable,
    service: &RawTable,
) -> Result<ReconReport, ReconError> {
    let official = prepare_ledger(config, Ledger::Official, official)?;
    let service = prepare_ledger(config, Ledger::Service, service)?;

    let rows = reconcile(&official.table, &service.table);
    let summary = compute_summary(&rows);

    log::info!(
        "compared {} orders: {} matched, {} missing, {} loss",
        summary.compared,
        summary.matched,
        summary.missing,
        summary.loss_orders,
    );

    let advisories: Vec<Advisory> = [official.advisory, service.advisory]
        .into_iter()
        .flatten()
        .collect();

    Ok(ReconReport {
        meta: ReconMeta {
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
            official_label: config.ledgers.label(Ledger::Official).to_string(),
            service_label: config.ledgers.label(Ledger::Service).to_string(),
            default_cost: config.default_cost,
        },
        summary,
        ledgers: LedgerStatsPair {
            official: official.stats,
            service: service.stats,
        },
        advisories,
        rows,
    })
}
