//! Acid-base interpretation of arterial blood gas values.
//!
//! This module implements the decision logic of the interpreter:
//! - pH estimation from HCO₃⁻ and PaCO₂ (Henderson-Hasselbalch)
//! - Disorder classification (single, mixed, compensated or normal)
//! - Anion gap and delta ratio analysis for metabolic acidosis
//!
//! Every operation is a pure function of its arguments and an injected
//! `ReferenceConstants`, so calls can run in parallel without coordination.
//!
//! References:
//! - Narins RG, Emmett M. Medicine. 1980;59:161-187 (simple and mixed disorders)
//! - Berend K, de Vries AP, Gans RO. N Engl J Med. 2014;371:1434-1445
//! - Rastegar A. J Am Soc Nephrol. 2007;18:2429-2431 (delta ratio)

pub mod anion_gap;
pub mod classifier;
pub mod ph_estimator;

pub use anion_gap::{AnionGapAnalyzer, AnionGapResult, DeltaRatio, DeltaRatioInterpretation};
pub use classifier::{AcidBaseFlags, DisorderClassification, DisorderClassifier, DisorderKind};
pub use ph_estimator::{PhEstimate, PhEstimator};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::InputRanges;

/// Errors raised by acid-base calculations and the input layer
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AcidBaseError {
    /// Henderson-Hasselbalch is undefined for non-positive or non-finite arguments
    #[error(
        "pH is undefined for HCO₃⁻ = {hco3_mEq_L} mEq/L and PaCO₂ = {paCO2_mmHg} mmHg \
         (both must be positive and finite)"
    )]
    Domain { hco3_mEq_L: f64, paCO2_mmHg: f64 },

    /// Entered value outside its bounded entry range
    #[error("{field} = {value} is outside the entry range {min}..={max}")]
    OutOfRange {
        field: String,
        value: f64,
        min: f64,
        max: f64,
    },
}

/// One set of arterial blood gas and electrolyte measurements
///
/// Field names carry their units, following the project convention.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AbgReading {
    /// Arterial partial pressure of CO₂ (mmHg)
    pub paCO2_mmHg: f64,
    /// Bicarbonate (mEq/L)
    pub hco3_mEq_L: f64,
    /// Sodium (mEq/L)
    pub na_mEq_L: f64,
    /// Chloride (mEq/L)
    pub cl_mEq_L: f64,
}

impl AbgReading {
    pub fn new(paCO2_mmHg: f64, hco3_mEq_L: f64, na_mEq_L: f64, cl_mEq_L: f64) -> Self {
        Self {
            paCO2_mmHg,
            hco3_mEq_L,
            na_mEq_L,
            cl_mEq_L,
        }
    }

    /// Reading built from the default value of every entry field
    pub fn from_defaults(ranges: &InputRanges) -> Self {
        Self::new(
            ranges.paCO2.default,
            ranges.hco3.default,
            ranges.na.default,
            ranges.cl.default,
        )
    }

    /// Check every value against its entry range
    ///
    /// This belongs to the input layer; the calculations themselves accept
    /// any real value and only pH estimation rejects non-positive arguments.
    pub fn validate(&self, ranges: &InputRanges) -> Result<(), AcidBaseError> {
        let fields = [
            (&ranges.paCO2, self.paCO2_mmHg),
            (&ranges.hco3, self.hco3_mEq_L),
            (&ranges.na, self.na_mEq_L),
            (&ranges.cl, self.cl_mEq_L),
        ];

        for (field, value) in fields {
            if !field.accepts(value) {
                return Err(AcidBaseError::OutOfRange {
                    field: field.label.clone(),
                    value,
                    min: field.min,
                    max: field.max,
                });
            }
        }
        Ok(())
    }
}

impl Default for AbgReading {
    fn default() -> Self {
        Self::from_defaults(&InputRanges::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_reading_matches_entry_defaults() {
        let reading = AbgReading::default();
        assert_eq!(reading, AbgReading::new(40.0, 24.0, 140.0, 104.0));
        assert!(reading.validate(&InputRanges::default()).is_ok());
    }

    #[test]
    fn test_validate_reports_first_out_of_range_field() {
        let reading = AbgReading::new(40.0, 4.9, 140.0, 200.0);
        match reading.validate(&InputRanges::default()) {
            Err(AcidBaseError::OutOfRange { field, value, min, max }) => {
                assert!(field.starts_with("HCO₃⁻"), "unexpected field {}", field);
                assert!((value - 4.9).abs() < 1e-12);
                assert!((min - 5.0).abs() < 1e-12);
                assert!((max - 50.0).abs() < 1e-12);
            }
            other => panic!("expected OutOfRange, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_accepts_range_edges() {
        let ranges = InputRanges::default();
        assert!(AbgReading::new(10.0, 5.0, 100.0, 50.0).validate(&ranges).is_ok());
        assert!(AbgReading::new(120.0, 50.0, 180.0, 150.0).validate(&ranges).is_ok());
    }
}
