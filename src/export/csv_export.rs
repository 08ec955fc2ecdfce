//! CSV export of Davenport diagram geometry.
//!
//! One row per vertex, grouped by series, so an external plotting tool can
//! draw the diagram without knowing anything about acid-base physiology.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use crate::diagram::DiagramModel;

/// Vertices used to approximate the normal-zone ellipse
pub const ELLIPSE_SEGMENTS: usize = 72;

/// Record for CSV diagram export
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagramRecord {
    /// Series type: "zone", "isobar" or "point"
    pub series: &'static str,
    /// Series index within its type
    pub index: usize,
    /// Series label
    pub label: String,
    /// pH (x axis)
    pub ph: f64,
    /// HCO₃⁻ (mEq/L, y axis)
    pub hco3_mEq_L: f64,
}

/// Flatten a diagram into CSV records
pub fn diagram_records(diagram: &DiagramModel) -> Vec<DiagramRecord> {
    let mut records = Vec::new();

    for (index, zone) in diagram.zones.iter().enumerate() {
        for vertex in zone.shape.outline(ELLIPSE_SEGMENTS) {
            records.push(DiagramRecord {
                series: "zone",
                index,
                label: zone.label.clone(),
                ph: vertex.x,
                hco3_mEq_L: vertex.y,
            });
        }
    }

    for (index, curve) in diagram.isobars.iter().enumerate() {
        for point in &curve.points {
            records.push(DiagramRecord {
                series: "isobar",
                index,
                label: curve.label.clone(),
                ph: point.x,
                hco3_mEq_L: point.y,
            });
        }
    }

    for (index, point) in [&diagram.control, &diagram.patient].into_iter().enumerate() {
        records.push(DiagramRecord {
            series: "point",
            index,
            label: point.label.clone(),
            ph: point.position.x,
            hco3_mEq_L: point.position.y,
        });
    }

    records
}

/// Write diagram records as CSV with a header row
pub fn write_diagram_csv<W: Write>(diagram: &DiagramModel, writer: W) -> Result<usize> {
    let mut writer = csv::Writer::from_writer(writer);
    let records = diagram_records(diagram);
    for record in &records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(records.len())
}

/// Export diagram geometry to a specific file
pub fn export_diagram_csv_to<P: AsRef<Path>>(diagram: &DiagramModel, path: P) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    let rows = write_diagram_csv(diagram, file)?;

    log::info!("CSV diagram exported: {} ({} rows)", path.display(), rows);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReferenceConstants;

    #[test]
    fn test_record_counts() {
        let diagram = DiagramModel::build(&ReferenceConstants::default(), 7.3, 18.0);
        let records = diagram_records(&diagram);

        let zone_rows = records.iter().filter(|r| r.series == "zone").count();
        // Ellipse plus six four-cornered shapes
        assert_eq!(zone_rows, ELLIPSE_SEGMENTS + 6 * 4);

        let isobar_rows = records.iter().filter(|r| r.series == "isobar").count();
        assert_eq!(isobar_rows, 3 * 200);

        let points: Vec<&DiagramRecord> = records.iter().filter(|r| r.series == "point").collect();
        assert_eq!(points.len(), 2);
        assert_eq!(points[1].label, "B");
        assert!((points[1].ph - 7.3).abs() < 1e-12);
    }

    #[test]
    fn test_csv_has_header() {
        let diagram = DiagramModel::build(&ReferenceConstants::default(), 7.4, 24.0);
        let mut buffer = Vec::new();
        let rows = write_diagram_csv(&diagram, &mut buffer).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("series,index,label,ph,hco3_mEq_L"));
        assert_eq!(lines.count(), rows);
    }
}
