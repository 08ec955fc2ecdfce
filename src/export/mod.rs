//! Export functionality for interpretation results.
//!
//! Provides JSON report export and CSV export of diagram geometry.

mod csv_export;
mod json_export;

pub use csv_export::{diagram_records, export_diagram_csv_to, write_diagram_csv, DiagramRecord};
pub use json_export::{export_report_json_to, write_report_json, ReportExport, EXPORT_VERSION};
