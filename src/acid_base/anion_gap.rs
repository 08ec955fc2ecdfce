//! Anion gap and delta ratio analysis.
//!
//! AG = Na⁺ − (Cl⁻ + HCO₃⁻)
//! Δ ratio = (AG − 12) / (24 − HCO₃⁻)
//!
//! In a pure anion-gap acidosis each unmeasured anion added consumes one
//! HCO₃⁻, giving a ratio between 1 and 2. A lower ratio means HCO₃⁻ fell
//! further than the gap explains (concurrent non-gap acidosis); a higher
//! one means HCO₃⁻ is higher than expected (concurrent metabolic alkalosis).
//!
//! References:
//! - Oh MS, Carroll HJ. N Engl J Med. 1977;297:814-817
//! - Rastegar A. J Am Soc Nephrol. 2007;18:2429-2431

use std::fmt;

use serde::Serialize;

use crate::config::ReferenceConstants;

/// Delta ratio, or the explicit absence of one when ΔHCO₃⁻ is zero
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeltaRatio {
    Defined(f64),
    NotApplicable,
}

impl DeltaRatio {
    pub fn value(&self) -> Option<f64> {
        match self {
            DeltaRatio::Defined(ratio) => Some(*ratio),
            DeltaRatio::NotApplicable => None,
        }
    }

    pub fn is_defined(&self) -> bool {
        matches!(self, DeltaRatio::Defined(_))
    }
}

/// Clinical reading of the delta ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeltaRatioInterpretation {
    /// Ratio below 1
    ConcurrentNonAnionGapAcidosis,
    /// Ratio above 2
    ConcurrentMetabolicAlkalosis,
    /// Ratio between 1 and 2 inclusive
    PureAnionGapAcidosis,
    /// Ratio undefined, or HCO₃⁻ at or above normal
    NotApplicable,
}

impl DeltaRatioInterpretation {
    pub fn text(&self) -> &'static str {
        match self {
            DeltaRatioInterpretation::ConcurrentNonAnionGapAcidosis => {
                "ΔAG/Δ[HCO₃⁻] < 1: Concurrent non-anion gap metabolic acidosis"
            }
            DeltaRatioInterpretation::ConcurrentMetabolicAlkalosis => {
                "ΔAG/Δ[HCO₃⁻] > 2: Concurrent metabolic alkalosis"
            }
            DeltaRatioInterpretation::PureAnionGapAcidosis => {
                "ΔAG/Δ[HCO₃⁻] 1–2: Pure anion gap metabolic acidosis"
            }
            DeltaRatioInterpretation::NotApplicable => "ΔAG/Δ[HCO₃⁻] not applicable",
        }
    }
}

impl fmt::Display for DeltaRatioInterpretation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text())
    }
}

/// Anion gap analysis for one set of electrolytes
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnionGapResult {
    /// Anion gap (mEq/L)
    pub anion_gap_mEq_L: f64,
    /// Gap above normal (mEq/L)
    pub delta_ag_mEq_L: f64,
    /// HCO₃⁻ below normal (mEq/L)
    pub delta_hco3_mEq_L: f64,
    pub delta_ratio: DeltaRatio,
    pub interpretation: DeltaRatioInterpretation,
}

/// Anion gap analyzer
///
/// Performs no gating of its own: any input gives a result. Callers use
/// `should_analyze` to apply the low-HCO₃⁻ policy.
///
/// # Example
/// ```
/// use abg_interpreter::acid_base::{AnionGapAnalyzer, DeltaRatioInterpretation};
///
/// let analyzer = AnionGapAnalyzer::default();
/// let result = analyzer.analyze(140.0, 100.0, 10.0);
///
/// assert!((result.anion_gap_mEq_L - 30.0).abs() < 1e-9);
/// assert_eq!(result.interpretation, DeltaRatioInterpretation::PureAnionGapAcidosis);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnionGapAnalyzer {
    /// Expected anion gap (mEq/L)
    pub normal_anion_gap_mEq_L: f64,
    /// Expected HCO₃⁻ (mEq/L)
    pub normal_hco3_mEq_L: f64,
    /// HCO₃⁻ below which the analysis is worth running (mEq/L)
    pub gating_hco3_mEq_L: f64,
    pub ratio_low: f64,
    pub ratio_high: f64,
}

impl Default for AnionGapAnalyzer {
    fn default() -> Self {
        Self::from_reference(&ReferenceConstants::default())
    }
}

impl AnionGapAnalyzer {
    /// Create from reference constants
    pub fn from_reference(reference: &ReferenceConstants) -> Self {
        Self {
            normal_anion_gap_mEq_L: reference.normal_anion_gap_mEq_L,
            normal_hco3_mEq_L: reference.normal_hco3_mEq_L,
            gating_hco3_mEq_L: reference.thresholds.hco3_low_mEq_L,
            ratio_low: reference.thresholds.delta_ratio_low,
            ratio_high: reference.thresholds.delta_ratio_high,
        }
    }

    /// Whether metabolic acidosis is plausible enough to analyze the gap
    pub fn should_analyze(&self, hco3_mEq_L: f64) -> bool {
        hco3_mEq_L < self.gating_hco3_mEq_L
    }

    /// Compute anion gap, delta ratio and its interpretation
    pub fn analyze(&self, na_mEq_L: f64, cl_mEq_L: f64, hco3_mEq_L: f64) -> AnionGapResult {
        let anion_gap_mEq_L = na_mEq_L - (cl_mEq_L + hco3_mEq_L);
        let delta_ag_mEq_L = anion_gap_mEq_L - self.normal_anion_gap_mEq_L;
        let delta_hco3_mEq_L = self.normal_hco3_mEq_L - hco3_mEq_L;

        let delta_ratio = if delta_hco3_mEq_L != 0.0 {
            DeltaRatio::Defined(delta_ag_mEq_L / delta_hco3_mEq_L)
        } else {
            DeltaRatio::NotApplicable
        };

        let interpretation = match delta_ratio {
            DeltaRatio::Defined(ratio) if delta_hco3_mEq_L > 0.0 => {
                if ratio < self.ratio_low {
                    DeltaRatioInterpretation::ConcurrentNonAnionGapAcidosis
                } else if ratio > self.ratio_high {
                    DeltaRatioInterpretation::ConcurrentMetabolicAlkalosis
                } else {
                    DeltaRatioInterpretation::PureAnionGapAcidosis
                }
            }
            _ => DeltaRatioInterpretation::NotApplicable,
        };

        log::debug!(
            "Anion gap {:.1} mEq/L, delta ratio {:?}: {}",
            anion_gap_mEq_L,
            delta_ratio,
            interpretation
        );

        AnionGapResult {
            anion_gap_mEq_L,
            delta_ag_mEq_L,
            delta_hco3_mEq_L,
            delta_ratio,
            interpretation,
        }
    }
}
