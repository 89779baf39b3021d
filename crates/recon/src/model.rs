use std::collections::HashMap;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// A single decoded spreadsheet cell.
///
/// Missing cells are represented as empty text, never as a separate variant,
/// so every lookup through a resolved column yields something coercible.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Text(String),
    Number(f64),
}

impl CellValue {
    pub fn empty() -> Self {
        Self::Text(String::new())
    }

    /// Stringify the cell. Integral numbers print without a fractional part.
    pub fn to_text(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Number(n) => format_number(*n),
        }
    }

    pub fn is_blank(&self) -> bool {
        match self {
            Self::Text(s) => s.trim().is_empty(),
            Self::Number(_) => false,
        }
    }
}

impl Default for CellValue {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

pub(crate) fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

/// One physical spreadsheet row keyed by header name.
pub type RawRow = HashMap<String, CellValue>;

/// First sheet of one ledger file, as decoded by the IO layer.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

impl RawTable {
    pub fn new(headers: Vec<String>) -> Self {
        Self { headers, rows: Vec::new() }
    }

    /// Build a table from positional rows. Cells beyond the header count are
    /// ignored; short rows are padded with empty text.
    pub fn from_rows<H, R>(headers: &[H], rows: R) -> Self
    where
        H: AsRef<str>,
        R: IntoIterator<Item = Vec<CellValue>>,
    {
        let headers: Vec<String> = headers.iter().map(|h| h.as_ref().to_string()).collect();
        let mut table = Self::new(headers);
        for cells in rows {
            table.push_positional(cells);
        }
        table
    }

    pub fn push_positional(&mut self, cells: Vec<CellValue>) {
        let mut cells = cells.into_iter();
        let row: RawRow = self
            .headers
            .iter()
            .map(|h| (h.clone(), cells.next().unwrap_or_default()))
            .collect();
        self.rows.push(row);
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

// ---------------------------------------------------------------------------
// Ledgers + canonical fields
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Ledger {
    Official,
    Service,
}

impl std::fmt::Display for Ledger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Official => write!(f, "official"),
            Self::Service => write!(f, "service"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CanonicalField {
    OrderNo,
    Status,
    ProductName,
    Revenue,
    Cost,
}

impl CanonicalField {
    pub const ALL: [CanonicalField; 5] = [
        Self::OrderNo,
        Self::Status,
        Self::ProductName,
        Self::Revenue,
        Self::Cost,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OrderNo => "order_no",
            Self::Status => "status",
            Self::ProductName => "product_name",
            Self::Revenue => "revenue",
            Self::Cost => "cost",
        }
    }
}

impl std::fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical field → raw header, per ledger. `None` means unresolved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ColumnMapping {
    pub order_no: Option<String>,
    pub status: Option<String>,
    pub product_name: Option<String>,
    pub revenue: Option<String>,
    pub cost: Option<String>,
}

impl ColumnMapping {
    pub fn get(&self, field: CanonicalField) -> Option<&str> {
        let slot = match field {
            CanonicalField::OrderNo => &self.order_no,
            CanonicalField::Status => &self.status,
            CanonicalField::ProductName => &self.product_name,
            CanonicalField::Revenue => &self.revenue,
            CanonicalField::Cost => &self.cost,
        };
        slot.as_deref()
    }

    pub fn set(&mut self, field: CanonicalField, column: Option<String>) {
        let slot = match field {
            CanonicalField::OrderNo => &mut self.order_no,
            CanonicalField::Status => &mut self.status,
            CanonicalField::ProductName => &mut self.product_name,
            CanonicalField::Revenue => &mut self.revenue,
            CanonicalField::Cost => &mut self.cost,
        };
        *slot = column;
    }

    pub fn has_status(&self) -> bool {
        self.status.is_some()
    }
}

// ---------------------------------------------------------------------------
// Normalized records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedRecord {
    pub order_no: String,
    pub status: String,
    pub product_name: String,
    pub revenue: f64,
    pub cost: f64,
}

// ---------------------------------------------------------------------------
// Reconciled output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    Both,
    OfficialOnly,
    ServiceOnly,
}

impl Source {
    /// Report label used in exports and console output.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Both => "官方+客服",
            Self::OfficialOnly => "官方缺客服",
            Self::ServiceOnly => "客服缺官方",
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Both => write!(f, "both"),
            Self::OfficialOnly => write!(f, "official_only"),
            Self::ServiceOnly => write!(f, "service_only"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchState {
    Matched,
    Discrepancy,
}

impl MatchState {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Matched => "已匹配",
            Self::Discrepancy => "有漏单",
        }
    }
}

impl std::fmt::Display for MatchState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Matched => write!(f, "matched"),
            Self::Discrepancy => write!(f, "discrepancy"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReconciledRow {
    pub serial: usize,
    pub order_no: String,
    pub source: Source,
    pub status: String,
    pub product_name: String,
    pub revenue: f64,
    pub cost: f64,
    pub profit: f64,
    pub matched: MatchState,
    pub is_loss: bool,
    pub is_missing: bool,
    /// Both ledgers carry the order but report different revenue or cost.
    /// The official figures are used either way.
    pub figure_mismatch: bool,
}

// ---------------------------------------------------------------------------
// Summary + Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Summary {
    pub compared: usize,
    pub matched: usize,
    pub missing: usize,
    pub total_revenue: f64,
    pub total_cost: f64,
    pub total_profit: f64,
    pub loss_orders: usize,
    pub figure_mismatches: usize,
}

/// Non-fatal conditions surfaced alongside the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Advisory {
    /// No status column was detected, so every row of the ledger was used.
    StatusColumnMissing { ledger: String },
}

impl std::fmt::Display for Advisory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StatusColumnMissing { ledger } => write!(
                f,
                "{ledger}: no status column detected, all orders are used without status filtering"
            ),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct LedgerStats {
    pub label: String,
    pub raw_rows: usize,
    pub normalized_rows: usize,
    pub filtered_rows: usize,
    pub unique_orders: usize,
    pub duplicates_dropped: usize,
    pub status_filtered: bool,
    pub mapping: ColumnMapping,
}

#[derive(Debug, Clone, Serialize)]
pub struct LedgerStatsPair {
    pub official: LedgerStats,
    pub service: LedgerStats,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconMeta {
    pub engine_version: String,
    pub run_at: String,
    pub official_label: String,
    pub service_label: String,
    pub default_cost: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconReport {
    pub meta: ReconMeta,
    pub summary: Summary,
    pub ledgers: LedgerStatsPair,
    pub advisories: Vec<Advisory>,
    pub rows: Vec<ReconciledRow>,
}

impl ReconReport {
    pub fn has_discrepancies(&self) -> bool {
        self.summary.missing > 0
    }
}
