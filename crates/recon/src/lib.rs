//! `ordermatch-recon`: order ledger reconciliation engine.
//!
//! Pure engine crate: receives decoded ledger tables, returns the reconciled
//! report. No CLI or file IO dependencies.

pub mod config;
pub mod engine;
pub mod error;
pub mod filter;
pub mod header;
pub mod ledger;
pub mod model;
pub mod normalize;
pub mod reconcile;
pub mod summary;

pub use config::ReconConfig;
pub use engine::run;
pub use error::ReconError;
pub use model::{CellValue, RawRow, RawTable, ReconReport, ReconciledRow, Summary};
