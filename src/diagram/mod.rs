//! Davenport diagram data for a rendering collaborator.
//!
//! Contains the clinical zones, the iso-PaCO₂ curves and the control and
//! patient points in pH × HCO₃⁻ space. Nothing here draws; a renderer
//! consumes `DiagramModel` as plain geometry.

mod isobars;
mod model;
mod zones;

pub use isobars::{linspace, IsobarCurve, DEFAULT_ISOBARS_MMHG, ISOBAR_SAMPLES};
pub use model::{DiagramModel, DiagramPoint, PointRole};
pub use zones::{clinical_zones, DiagramZone, ZoneKind, ZoneShape};
