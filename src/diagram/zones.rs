//! Labelled clinical zones of the Davenport diagram.
//!
//! Coordinates are (pH, HCO₃⁻ in mEq/L). Rectangles are given by their
//! lower-left corner, width in pH units and height in mEq/L.

use std::fmt;

use glam::DVec2;
use serde::Serialize;

/// Clinical meaning of a zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ZoneKind {
    Normal,
    MetabolicAcidosis,
    MetabolicAlkalosis,
    RespiratoryAcidosis,
    RespiratoryAlkalosis,
    MixedDisorder,
}

impl ZoneKind {
    pub fn label(&self) -> &'static str {
        match self {
            ZoneKind::Normal => "Normal",
            ZoneKind::MetabolicAcidosis => "Metabolic Acidosis",
            ZoneKind::MetabolicAlkalosis => "Metabolic Alkalosis",
            ZoneKind::RespiratoryAcidosis => "Respiratory Acidosis",
            ZoneKind::RespiratoryAlkalosis => "Respiratory Alkalosis",
            ZoneKind::MixedDisorder => "Mixed Disorder",
        }
    }
}

impl fmt::Display for ZoneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Closed region in pH × HCO₃⁻ space
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum ZoneShape {
    /// Axis-aligned ellipse; `width` and `height` are full diameters
    Ellipse { center: DVec2, width: f64, height: f64 },
    /// Axis-aligned rectangle anchored at its lower-left corner
    Rectangle { origin: DVec2, width: f64, height: f64 },
    /// Closed polygon; the last vertex connects back to the first
    Polygon { vertices: Vec<DVec2> },
}

impl ZoneShape {
    /// Whether a point lies inside or on the boundary
    pub fn contains(&self, point: DVec2) -> bool {
        match self {
            ZoneShape::Ellipse { center, width, height } => {
                let d = (point - *center) / DVec2::new(width / 2.0, height / 2.0);
                d.length_squared() <= 1.0
            }
            ZoneShape::Rectangle { origin, width, height } => {
                let max = *origin + DVec2::new(*width, *height);
                point.x >= origin.x && point.x <= max.x && point.y >= origin.y && point.y <= max.y
            }
            ZoneShape::Polygon { vertices } => polygon_contains(vertices, point),
        }
    }

    /// Closed outline as a vertex list
    ///
    /// Ellipses are approximated with `segments` vertices (at least 3);
    /// rectangles and polygons return their corners.
    pub fn outline(&self, segments: usize) -> Vec<DVec2> {
        match self {
            ZoneShape::Ellipse { center, width, height } => {
                let n = segments.max(3);
                (0..n)
                    .map(|i| {
                        let theta = std::f64::consts::TAU * i as f64 / n as f64;
                        *center + DVec2::new(width / 2.0 * theta.cos(), height / 2.0 * theta.sin())
                    })
                    .collect()
            }
            ZoneShape::Rectangle { origin, width, height } => vec![
                *origin,
                *origin + DVec2::new(*width, 0.0),
                *origin + DVec2::new(*width, *height),
                *origin + DVec2::new(0.0, *height),
            ],
            ZoneShape::Polygon { vertices } => vertices.clone(),
        }
    }
}

/// Even-odd ray cast, with points on an edge counted as inside
fn polygon_contains(vertices: &[DVec2], point: DVec2) -> bool {
    if vertices.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = vertices.len() - 1;
    for i in 0..vertices.len() {
        let (a, b) = (vertices[i], vertices[j]);
        if on_segment(a, b, point) {
            return true;
        }
        if (a.y > point.y) != (b.y > point.y) {
            let x_cross = a.x + (point.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if point.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

fn on_segment(a: DVec2, b: DVec2, p: DVec2) -> bool {
    let ab = b - a;
    let ap = p - a;
    let cross = ab.perp_dot(ap);
    let scale = ab.length().max(1e-12);
    if (cross / scale).abs() > 1e-9 {
        return false;
    }
    let t = ap.dot(ab);
    t >= 0.0 && t <= ab.length_squared()
}

/// One labelled zone
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagramZone {
    pub kind: ZoneKind,
    pub label: String,
    pub shape: ZoneShape,
}

impl DiagramZone {
    pub fn new(kind: ZoneKind, shape: ZoneShape) -> Self {
        Self {
            kind,
            label: kind.label().to_string(),
            shape,
        }
    }

    pub fn contains(&self, point: DVec2) -> bool {
        self.shape.contains(point)
    }
}

fn rectangle(kind: ZoneKind, ph: f64, hco3: f64, width: f64, height: f64) -> DiagramZone {
    DiagramZone::new(
        kind,
        ZoneShape::Rectangle {
            origin: DVec2::new(ph, hco3),
            width,
            height,
        },
    )
}

fn polygon(kind: ZoneKind, corners: [(f64, f64); 4]) -> DiagramZone {
    DiagramZone::new(
        kind,
        ZoneShape::Polygon {
            vertices: corners.iter().map(|&(x, y)| DVec2::new(x, y)).collect(),
        },
    )
}

/// The fixed set of clinical zones, with the normal ellipse centred on
/// the control point
pub fn clinical_zones(control: DVec2) -> Vec<DiagramZone> {
    vec![
        DiagramZone::new(
            ZoneKind::Normal,
            ZoneShape::Ellipse {
                center: control,
                width: 0.1,
                height: 7.0,
            },
        ),
        rectangle(ZoneKind::MetabolicAcidosis, 7.05, 4.0, 0.33, 12.0),
        rectangle(ZoneKind::MetabolicAlkalosis, 7.37, 27.0, 0.26, 16.0),
        rectangle(ZoneKind::RespiratoryAcidosis, 7.0, 24.0, 0.37, 22.0),
        rectangle(ZoneKind::RespiratoryAlkalosis, 7.37, 4.0, 0.33, 20.0),
        polygon(
            ZoneKind::MixedDisorder,
            [(7.0, 4.0), (7.2, 4.0), (7.2, 10.0), (7.0, 10.0)],
        ),
        polygon(
            ZoneKind::MixedDisorder,
            [(7.55, 40.0), (7.7, 40.0), (7.7, 48.0), (7.55, 48.0)],
        ),
    ]
}
