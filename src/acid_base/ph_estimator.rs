//! Henderson-Hasselbalch pH estimation for the plasma bicarbonate buffer.
//!
//! pH = pKa + log₁₀([HCO₃⁻] / (s · PaCO₂))
//!
//! With pKa = 6.1 and s = 0.03 mmol/L/mmHg, a normal HCO₃⁻ of 24 mEq/L
//! and PaCO₂ of 40 mmHg give a ratio of 20:1 and pH 7.40.
//!
//! References:
//! - Henderson LJ. Am J Physiol. 1908;21:173-179
//! - Hasselbalch KA. Biochem Z. 1917;78:112-144

use serde::{Deserialize, Serialize};

use super::{AbgReading, AcidBaseError};
use crate::config::ReferenceConstants;

/// Patient pH derived from one reading
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhEstimate {
    pub ph: f64,
}

/// pH estimator for the carbonic acid/bicarbonate system
///
/// # Example
/// ```
/// use abg_interpreter::acid_base::PhEstimator;
///
/// let estimator = PhEstimator::default();
///
/// // 24 mEq/L over 0.03 × 40 mmHg is a 20:1 ratio
/// let ph = estimator.estimate_ph(24.0, 40.0).unwrap();
/// assert!((ph - 7.401).abs() < 0.001);
///
/// // Zero PaCO₂ has no defined pH
/// assert!(estimator.estimate_ph(24.0, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhEstimator {
    /// Apparent pKa of carbonic acid
    pub pKa: f64,
    /// CO₂ solubility coefficient (mmol/L per mmHg)
    pub co2_solubility_mM_per_mmHg: f64,
}

impl Default for PhEstimator {
    fn default() -> Self {
        Self::from_reference(&ReferenceConstants::default())
    }
}

impl PhEstimator {
    /// Create from reference constants
    pub fn from_reference(reference: &ReferenceConstants) -> Self {
        Self {
            pKa: reference.pKa,
            co2_solubility_mM_per_mmHg: reference.co2_solubility_mM_per_mmHg,
        }
    }

    /// Dissolved CO₂ (mmol/L) for a given PaCO₂
    pub fn dissolved_co2_mM(&self, paCO2_mmHg: f64) -> f64 {
        self.co2_solubility_mM_per_mmHg * paCO2_mmHg
    }

    /// Calculate pH from HCO₃⁻ and PaCO₂
    ///
    /// # Arguments
    /// * `hco3_mEq_L` - Bicarbonate (mEq/L), must be positive
    /// * `paCO2_mmHg` - Arterial PaCO₂ (mmHg), must be positive
    ///
    /// # Errors
    /// `AcidBaseError::Domain` when either argument is zero, negative or not
    /// finite, since the logarithm is then undefined.
    pub fn estimate_ph(&self, hco3_mEq_L: f64, paCO2_mmHg: f64) -> Result<f64, AcidBaseError> {
        let domain_error = || AcidBaseError::Domain {
            hco3_mEq_L,
            paCO2_mmHg,
        };

        if !(hco3_mEq_L.is_finite() && hco3_mEq_L > 0.0) {
            return Err(domain_error());
        }
        if !(paCO2_mmHg.is_finite() && paCO2_mmHg > 0.0) {
            return Err(domain_error());
        }

        let ratio = hco3_mEq_L / self.dissolved_co2_mM(paCO2_mmHg);
        let ph = self.pKa + ratio.log10();

        // Extreme ratios can still overflow or underflow to ±inf
        if !ph.is_finite() {
            return Err(domain_error());
        }

        log::debug!(
            "Estimated pH {:.3} from HCO₃⁻ {} mEq/L, PaCO₂ {} mmHg",
            ph,
            hco3_mEq_L,
            paCO2_mmHg
        );
        Ok(ph)
    }

    /// Estimate pH for a full reading
    pub fn estimate(&self, reading: &AbgReading) -> Result<PhEstimate, AcidBaseError> {
        let ph = self.estimate_ph(reading.hco3_mEq_L, reading.paCO2_mmHg)?;
        Ok(PhEstimate { ph })
    }

    /// HCO₃⁻ (mEq/L) lying on the PaCO₂ isobar at a given pH
    ///
    /// Inverse of `estimate_ph` with PaCO₂ held fixed:
    /// [HCO₃⁻] = 10^(pH − pKa) · s · PaCO₂
    pub fn hco3_on_isobar(&self, ph: f64, paCO2_mmHg: f64) -> f64 {
        10f64.powf(ph - self.pKa) * self.dissolved_co2_mM(paCO2_mmHg)
    }
}
