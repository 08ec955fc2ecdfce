//! Parameter structures with citation metadata.
//!
//! Every clinical constant used by the estimator, classifier, anion gap
//! analyzer and diagram lives here, so a recalibration touches one place.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level parameters container
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameters {
    /// Reference constants for acid-base calculations
    pub reference: ReferenceConstants,
    /// Entry ranges enforced by the input layer
    pub inputs: InputRanges,
}

impl Parameters {
    /// Load parameters from JSON files, or use defaults if files don't exist
    pub fn load_or_default() -> Self {
        Self::load_from_dir("data/parameters")
    }

    /// Load parameters from specific directory
    pub fn load_from_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        let reference = ReferenceConstants::load_or_default(dir.join("reference.json"));
        let inputs = InputRanges::load_or_default(dir.join("inputs.json"));

        Self { reference, inputs }
    }
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            reference: ReferenceConstants::default(),
            inputs: InputRanges::default(),
        }
    }
}

/// Read a JSON parameter file, falling back to defaults when the file is
/// missing or malformed.
fn load_json_or_default<T, P>(path: P, what: &str) -> T
where
    T: for<'de> Deserialize<'de> + Default,
    P: AsRef<Path>,
{
    match std::fs::read_to_string(path.as_ref()) {
        Ok(contents) => match serde_json::from_str(&contents) {
            Ok(params) => {
                log::info!("Loaded {} parameters from {:?}", what, path.as_ref());
                params
            }
            Err(e) => {
                log::warn!("Failed to parse {} parameters: {}, using defaults", what, e);
                T::default()
            }
        },
        Err(_) => {
            log::info!("{} parameters file not found, using defaults", what);
            T::default()
        }
    }
}

/// Reference constants for acid-base interpretation
///
/// Henderson-Hasselbalch constants for the plasma bicarbonate buffer,
/// the normal control point of the Davenport diagram, and the
/// normal ranges used to flag each measured value.
///
/// References:
/// - Henderson LJ. Am J Physiol. 1908;21:173-179
/// - Hasselbalch KA. Biochem Z. 1917;78:112-144
/// - Davenport HW. The ABC of Acid-Base Chemistry. 1974
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceConstants {
    /// Apparent pKa of the carbonic acid/bicarbonate system at 37°C
    pub pKa: f64,

    /// CO2 solubility coefficient (mmol/L per mmHg)
    pub co2_solubility_mM_per_mmHg: f64,

    /// Control (normal) arterial pH
    pub control_ph: f64,

    /// Control (normal) HCO3⁻ (mEq/L)
    pub control_hco3_mEq_L: f64,

    /// Control (normal) PaCO2 (mmHg)
    pub control_paCO2_mmHg: f64,

    /// Expected anion gap without unmeasured acid (mEq/L)
    /// Reference: Oh MS, Carroll HJ. N Engl J Med. 1977;297:814-817
    pub normal_anion_gap_mEq_L: f64,

    /// Normal HCO3⁻ used for the delta ratio and the ambiguous-HCO3⁻ window
    pub normal_hco3_mEq_L: f64,

    /// Classification thresholds
    pub thresholds: ClassificationThresholds,
}

impl ReferenceConstants {
    /// Load from JSON file or return defaults
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        load_json_or_default(path, "reference")
    }
}

impl Default for ReferenceConstants {
    fn default() -> Self {
        Self {
            pKa: 6.1,
            co2_solubility_mM_per_mmHg: 0.03,

            control_ph: 7.4,
            control_hco3_mEq_L: 24.0,
            control_paCO2_mmHg: 40.0,

            normal_anion_gap_mEq_L: 12.0,
            normal_hco3_mEq_L: 24.0,

            thresholds: ClassificationThresholds::default(),
        }
    }
}

/// Normal-range limits for the acid-base flags
///
/// All bounds are exclusive: a value equal to a limit counts as normal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationThresholds {
    /// pH below this is acidemia
    pub ph_low: f64,
    /// pH above this is alkalemia
    pub ph_high: f64,
    /// PaCO2 below this is hypocapnia (mmHg)
    pub paCO2_low_mmHg: f64,
    /// PaCO2 above this is hypercapnia (mmHg)
    pub paCO2_high_mmHg: f64,
    /// HCO3⁻ below this is low (mEq/L)
    pub hco3_low_mEq_L: f64,
    /// HCO3⁻ above this is high (mEq/L)
    pub hco3_high_mEq_L: f64,
    /// Half-width of the near-normal HCO3⁻ window for the mixed metabolic rule
    pub ambiguous_hco3_window_mEq_L: f64,
    /// Delta ratio below this suggests a concurrent non-gap acidosis
    pub delta_ratio_low: f64,
    /// Delta ratio above this suggests a concurrent metabolic alkalosis
    pub delta_ratio_high: f64,
}

impl Default for ClassificationThresholds {
    fn default() -> Self {
        Self {
            ph_low: 7.35,
            ph_high: 7.45,
            paCO2_low_mmHg: 36.0,
            paCO2_high_mmHg: 44.0,
            hco3_low_mEq_L: 22.0,
            hco3_high_mEq_L: 26.0,
            ambiguous_hco3_window_mEq_L: 2.0,
            delta_ratio_low: 1.0,
            delta_ratio_high: 2.0,
        }
    }
}

/// Bounded numeric entry field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputField {
    /// Display label including unit
    pub label: String,
    /// Inclusive lower bound
    pub min: f64,
    /// Inclusive upper bound
    pub max: f64,
    /// Value used when nothing is entered
    pub default: f64,
    /// Entry increment
    pub step: f64,
}

impl InputField {
    fn new(label: &str, min: f64, max: f64, default: f64, step: f64) -> Self {
        Self {
            label: label.to_string(),
            min,
            max,
            default,
            step,
        }
    }

    /// Whether a value is finite and inside the inclusive bounds
    pub fn accepts(&self, value: f64) -> bool {
        value.is_finite() && value >= self.min && value <= self.max
    }
}

/// Entry ranges for the four measured values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputRanges {
    pub paCO2: InputField,
    pub hco3: InputField,
    pub na: InputField,
    pub cl: InputField,
}

impl InputRanges {
    /// Load from JSON file or return defaults
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        load_json_or_default(path, "input range")
    }
}

impl Default for InputRanges {
    fn default() -> Self {
        Self {
            paCO2: InputField::new("PaCO₂ (mmHg)", 10.0, 120.0, 40.0, 0.1),
            hco3: InputField::new("HCO₃⁻ (mEq/L)", 5.0, 50.0, 24.0, 0.1),
            na: InputField::new("Na⁺ (mEq/L)", 100.0, 180.0, 140.0, 0.1),
            cl: InputField::new("Cl⁻ (mEq/L)", 50.0, 150.0, 104.0, 0.1),
        }
    }
}
