use std::collections::HashMap;

use crate::model::NormalizedRecord;

/// Order number → first-seen record for one ledger.
///
/// Keys keep the order of their first occurrence. Later rows repeating an
/// order number are discarded and only counted.
#[derive(Debug, Clone, Default)]
pub struct LedgerTable {
    order: Vec<String>,
    records: HashMap<String, NormalizedRecord>,
    duplicates_dropped: usize,
}

impl LedgerTable {
    pub fn from_records(records: Vec<NormalizedRecord>) -> Self {
        let mut table = Self::default();
        for record in records {
            table.insert(record);
        }
        table
    }

    /// Insert unless the order number is already present; a repeat is only
    /// counted.
    pub fn insert(&mut self, record: NormalizedRecord) {
        if self.records.contains_key(&record.order_no) {
            self.duplicates_dropped += 1;
            return;
        }
        self.order.push(record.order_no.clone());
        self.records.insert(record.order_no.clone(), record);
    }

    pub fn get(&self, order_no: &str) -> Option<&NormalizedRecord> {
        self.records.get(order_no)
    }

    /// Order numbers in first-occurrence order.
    pub fn order_numbers(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn duplicates_dropped(&self) -> usize {
        self.duplicates_dropped
    }
}
