//! Assembled diagram: axes, zones, isobars and the two labelled points.

use glam::DVec2;
use serde::Serialize;

use super::isobars::{IsobarCurve, DEFAULT_ISOBARS_MMHG, ISOBAR_SAMPLES};
use super::zones::{clinical_zones, DiagramZone, ZoneKind};
use crate::acid_base::PhEstimator;
use crate::config::ReferenceConstants;

/// Which reading a point represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PointRole {
    Control,
    Patient,
}

/// Labelled point in pH × HCO₃⁻ space
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagramPoint {
    pub role: PointRole,
    pub label: String,
    /// (pH, HCO₃⁻ mEq/L)
    pub position: DVec2,
}

impl DiagramPoint {
    pub fn control(ph: f64, hco3_mEq_L: f64) -> Self {
        Self {
            role: PointRole::Control,
            label: "C".to_string(),
            position: DVec2::new(ph, hco3_mEq_L),
        }
    }

    pub fn patient(ph: f64, hco3_mEq_L: f64) -> Self {
        Self {
            role: PointRole::Patient,
            label: "B".to_string(),
            position: DVec2::new(ph, hco3_mEq_L),
        }
    }
}

/// Everything a renderer needs to draw the Davenport diagram
///
/// # Example
/// ```
/// use abg_interpreter::config::ReferenceConstants;
/// use abg_interpreter::diagram::{DiagramModel, ZoneKind};
///
/// let diagram = DiagramModel::build(&ReferenceConstants::default(), 7.40, 24.0);
/// assert_eq!(diagram.isobars.len(), 3);
/// assert!(diagram.patient_zones().contains(&ZoneKind::Normal));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagramModel {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// pH axis limits
    pub ph_range: (f64, f64),
    /// HCO₃⁻ axis limits (mEq/L)
    pub hco3_range: (f64, f64),
    pub zones: Vec<DiagramZone>,
    pub isobars: Vec<IsobarCurve>,
    pub control: DiagramPoint,
    pub patient: DiagramPoint,
}

impl DiagramModel {
    pub const PH_RANGE: (f64, f64) = (7.0, 7.7);
    pub const HCO3_RANGE: (f64, f64) = (0.0, 48.0);

    /// Build the diagram for a patient point
    pub fn build(reference: &ReferenceConstants, patient_ph: f64, patient_hco3_mEq_L: f64) -> Self {
        let estimator = PhEstimator::from_reference(reference);
        let control = DiagramPoint::control(reference.control_ph, reference.control_hco3_mEq_L);

        let isobars = DEFAULT_ISOBARS_MMHG
            .iter()
            .map(|&paCO2| IsobarCurve::sweep(&estimator, paCO2, Self::PH_RANGE, ISOBAR_SAMPLES))
            .collect();

        Self {
            title: "Davenport Diagram with Clinical Zones".to_string(),
            x_label: "pH".to_string(),
            y_label: "[HCO₃⁻] (mEq/L)".to_string(),
            ph_range: Self::PH_RANGE,
            hco3_range: Self::HCO3_RANGE,
            zones: clinical_zones(control.position),
            isobars,
            control,
            patient: DiagramPoint::patient(patient_ph, patient_hco3_mEq_L),
        }
    }

    /// Arrow from the control point to the patient point
    pub fn arrow(&self) -> (DVec2, DVec2) {
        (self.control.position, self.patient.position)
    }

    /// Kinds of every zone containing a point, in zone order, without repeats
    pub fn zones_containing(&self, point: DVec2) -> Vec<ZoneKind> {
        let mut kinds = Vec::new();
        for zone in self.zones.iter().filter(|z| z.contains(point)) {
            if !kinds.contains(&zone.kind) {
                kinds.push(zone.kind);
            }
        }
        kinds
    }

    /// Zones the patient point falls in
    pub fn patient_zones(&self) -> Vec<ZoneKind> {
        self.zones_containing(self.patient.position)
    }

    /// Whether the patient point lies inside the plotted axes
    pub fn patient_in_view(&self) -> bool {
        let p = self.patient.position;
        p.x >= self.ph_range.0
            && p.x <= self.ph_range.1
            && p.y >= self.hco3_range.0
            && p.y <= self.hco3_range.1
    }
}
