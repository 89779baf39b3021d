// JSON export

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use ordermatch_recon::model::ReconReport;

/// Export the full report (meta, summary, ledger stats, advisories, rows).
pub fn export_report(report: &ReconReport, path: &Path) -> Result<(), String> {
    let file = File::create(path)
        .map_err(|e| format!("Failed to create {}: {}", path.display(), e))?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, report).map_err(|e| e.to_string())?;

    Ok(())
}
