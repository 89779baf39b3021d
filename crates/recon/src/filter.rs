use crate::model::{Advisory, NormalizedRecord};

/// Rows carried forward by the status filter, plus any advisory it raised.
#[derive(Debug)]
pub struct FilterOutcome {
    pub records: Vec<NormalizedRecord>,
    pub advisory: Option<Advisory>,
}

/// Keep rows whose status contains any accepted keyword.
///
/// Matching is substring containment, so `"部分已发货已签收"` is accepted by
/// `"已发货"`. A ledger without a status column passes through unchanged and
/// yields a `StatusColumnMissing` advisory instead.
pub fn filter_by_status(
    records: Vec<NormalizedRecord>,
    has_status_column: bool,
    keywords: &[String],
    ledger: &str,
) -> FilterOutcome {
    if !has_status_column {
        let advisory = Advisory::StatusColumnMissing { ledger: ledger.to_string() };
        log::warn!("{advisory}");
        return FilterOutcome { records, advisory: Some(advisory) };
    }

    let before = records.len();
    let records: Vec<NormalizedRecord> = records
        .into_iter()
        .filter(|r| status_accepted(&r.status, keywords))
        .collect();

    log::debug!("{ledger}: status filter kept {} of {before} rows", records.len());

    FilterOutcome { records, advisory: None }
}

pub fn status_accepted(status: &str, keywords: &[String]) -> bool {
    keywords.iter().any(|k| status.contains(k.as_str()))
}
