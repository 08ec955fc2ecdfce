//! JSON export of interpretation reports.

use std::io::Write;
use std::path::Path;

use anyhow::Result;
use chrono::Local;
use serde::Serialize;

use crate::report::AbgReport;

/// Export format version
pub const EXPORT_VERSION: &str = "1.0.0";

/// Full report export structure
#[derive(Debug, Clone, Serialize)]
pub struct ReportExport<'a> {
    /// Export timestamp
    pub exported_at: String,
    /// Export version for compatibility
    pub version: &'static str,
    /// Interpretation snapshot
    pub report: &'a AbgReport,
}

impl<'a> ReportExport<'a> {
    pub fn now(report: &'a AbgReport) -> Self {
        Self {
            exported_at: Local::now().to_rfc3339(),
            version: EXPORT_VERSION,
            report,
        }
    }
}

/// Write a timestamped report as pretty JSON
pub fn write_report_json<W: Write>(report: &AbgReport, writer: W) -> Result<()> {
    serde_json::to_writer_pretty(writer, &ReportExport::now(report))?;
    Ok(())
}

/// Export a report to a specific file
pub fn export_report_json_to<P: AsRef<Path>>(report: &AbgReport, path: P) -> Result<()> {
    let path = path.as_ref();
    let file = std::fs::File::create(path)?;
    write_report_json(report, file)?;

    log::info!("JSON report exported: {}", path.display());
    Ok(())
}
