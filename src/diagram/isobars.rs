//! Iso-PaCO₂ curves.
//!
//! Holding PaCO₂ fixed, Henderson-Hasselbalch gives HCO₃⁻ as a function of
//! pH: [HCO₃⁻] = 10^(pH − pKa) · s · PaCO₂. Each curve is that function
//! sampled at evenly spaced pH values.

use glam::DVec2;
use serde::Serialize;

use crate::acid_base::PhEstimator;

/// PaCO₂ values (mmHg) drawn on the diagram
pub const DEFAULT_ISOBARS_MMHG: [f64; 3] = [20.0, 40.0, 60.0];

/// Samples per curve
pub const ISOBAR_SAMPLES: usize = 200;

/// `count` evenly spaced values from `start` to `end`, both included
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (count - 1) as f64;
            (0..count)
                .map(|i| if i == count - 1 { end } else { start + step * i as f64 })
                .collect()
        }
    }
}

/// One iso-PaCO₂ curve
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IsobarCurve {
    pub paCO2_mmHg: f64,
    pub label: String,
    /// (pH, HCO₃⁻) samples in increasing pH order
    pub points: Vec<DVec2>,
}

impl IsobarCurve {
    /// Sample the isobar over a pH range
    pub fn sweep(
        estimator: &PhEstimator,
        paCO2_mmHg: f64,
        ph_range: (f64, f64),
        samples: usize,
    ) -> Self {
        let points = linspace(ph_range.0, ph_range.1, samples)
            .into_iter()
            .map(|ph| DVec2::new(ph, estimator.hco3_on_isobar(ph, paCO2_mmHg)))
            .collect();

        Self {
            paCO2_mmHg,
            label: format!("PaCO₂ = {}", paCO2_mmHg),
            points,
        }
    }
}
