//! Acid-base disorder classification.
//!
//! Six flags compare pH, PaCO₂ and HCO₃⁻ against their normal ranges. An
//! ordered rule table maps the flags to a disorder; the first rule that
//! matches wins. Several rules overlap (a low pH with high PaCO₂ and low
//! HCO₃⁻ satisfies parts of rules 1, 3 and 5), so the order of `RULES`
//! decides the label in those cases and must not be rearranged.
//!
//! | rule | condition                                  | outcome                          |
//! |------|--------------------------------------------|----------------------------------|
//! | 1    | pH↓, HCO₃⁻↓, PaCO₂ not ↑                   | Metabolic Acidosis               |
//! | 2    | pH↑, HCO₃⁻↑, PaCO₂ not ↓                   | Metabolic Alkalosis              |
//! | 3    | pH↓, PaCO₂↑, HCO₃⁻ not ↓                   | Respiratory Acidosis             |
//! | 4    | pH↑, PaCO₂↓, HCO₃⁻ not ↑                   | Respiratory Alkalosis            |
//! | 5    | pH↓, PaCO₂↑, HCO₃⁻↓                        | Resp. Acidosis + Met. Acidosis   |
//! | 6    | pH↑, PaCO₂↓, HCO₃⁻↑                        | Resp. Alkalosis + Met. Alkalosis |
//! | 7    | pH normal, PaCO₂↑, HCO₃⁻↑                  | Resp. Acidosis + Met. Alkalosis  |
//! | 8    | pH normal, PaCO₂↓, HCO₃⁻↓                  | Resp. Alkalosis + Met. Acidosis  |
//! | 9    | pH normal, HCO₃⁻ within 2 of normal        | Met. Acidosis + Met. Alkalosis   |
//! | 10a  | pH normal, nothing flagged                 | Normal                           |
//! | 10b-e| pH normal, one of HCO₃⁻↑, HCO₃⁻↓, PaCO₂↑, PaCO₂↓ | compensated single disorder |
//! | 11   | anything else                              | Complex or unclassified          |

use std::fmt;

use serde::Serialize;

use crate::config::ReferenceConstants;

/// Deviation flags for one (pH, PaCO₂, HCO₃⁻) triple
///
/// All comparisons are strict, so a value sitting on a limit is normal.
/// NaN compares false everywhere and therefore raises no flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct AcidBaseFlags {
    pub ph_low: bool,
    pub ph_high: bool,
    pub pco2_low: bool,
    pub pco2_high: bool,
    pub hco3_low: bool,
    pub hco3_high: bool,
    /// HCO₃⁻ strictly within the ambiguous window around normal
    pub hco3_near_normal: bool,
}

impl AcidBaseFlags {
    /// Evaluate the flags against the reference thresholds
    pub fn evaluate(ph: f64, paCO2_mmHg: f64, hco3_mEq_L: f64, reference: &ReferenceConstants) -> Self {
        let t = &reference.thresholds;
        Self {
            ph_low: ph < t.ph_low,
            ph_high: ph > t.ph_high,
            pco2_low: paCO2_mmHg < t.paCO2_low_mmHg,
            pco2_high: paCO2_mmHg > t.paCO2_high_mmHg,
            hco3_low: hco3_mEq_L < t.hco3_low_mEq_L,
            hco3_high: hco3_mEq_L > t.hco3_high_mEq_L,
            hco3_near_normal: (hco3_mEq_L - reference.normal_hco3_mEq_L).abs()
                < t.ambiguous_hco3_window_mEq_L,
        }
    }

    /// Neither acidemia nor alkalemia
    pub fn ph_normal(&self) -> bool {
        !self.ph_low && !self.ph_high
    }

    /// No PaCO₂ or HCO₃⁻ flag raised
    pub fn components_normal(&self) -> bool {
        !self.pco2_low && !self.pco2_high && !self.hco3_low && !self.hco3_high
    }
}

/// Closed set of disorder outcomes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DisorderKind {
    MetabolicAcidosis,
    MetabolicAlkalosis,
    RespiratoryAcidosis,
    RespiratoryAlkalosis,
    RespiratoryAcidosisWithMetabolicAcidosis,
    RespiratoryAlkalosisWithMetabolicAlkalosis,
    RespiratoryAcidosisWithMetabolicAlkalosis,
    RespiratoryAlkalosisWithMetabolicAcidosis,
    MetabolicAcidosisWithMetabolicAlkalosis,
    Normal,
    CompensatedMetabolicAlkalosis,
    CompensatedMetabolicAcidosis,
    CompensatedRespiratoryAcidosis,
    CompensatedRespiratoryAlkalosis,
    Unclassified,
}

impl DisorderKind {
    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            DisorderKind::MetabolicAcidosis => "Metabolic Acidosis",
            DisorderKind::MetabolicAlkalosis => "Metabolic Alkalosis",
            DisorderKind::RespiratoryAcidosis => "Respiratory Acidosis",
            DisorderKind::RespiratoryAlkalosis => "Respiratory Alkalosis",
            DisorderKind::RespiratoryAcidosisWithMetabolicAcidosis => {
                "Respiratory Acidosis with Metabolic Acidosis"
            }
            DisorderKind::RespiratoryAlkalosisWithMetabolicAlkalosis => {
                "Respiratory Alkalosis with Metabolic Alkalosis"
            }
            DisorderKind::RespiratoryAcidosisWithMetabolicAlkalosis => {
                "Respiratory Acidosis with Metabolic Alkalosis"
            }
            DisorderKind::RespiratoryAlkalosisWithMetabolicAcidosis => {
                "Respiratory Alkalosis with Metabolic Acidosis"
            }
            DisorderKind::MetabolicAcidosisWithMetabolicAlkalosis => {
                "Metabolic Acidosis with Metabolic Alkalosis"
            }
            DisorderKind::Normal => "Normal acid-base status",
            DisorderKind::CompensatedMetabolicAlkalosis => "Metabolic Alkalosis (compensated)",
            DisorderKind::CompensatedMetabolicAcidosis => "Metabolic Acidosis (compensated)",
            DisorderKind::CompensatedRespiratoryAcidosis => "Respiratory Acidosis (compensated)",
            DisorderKind::CompensatedRespiratoryAlkalosis => "Respiratory Alkalosis (compensated)",
            DisorderKind::Unclassified => "Complex or unclassified",
        }
    }

    /// Two concurrent primary processes
    pub fn is_mixed(&self) -> bool {
        matches!(
            self,
            DisorderKind::RespiratoryAcidosisWithMetabolicAcidosis
                | DisorderKind::RespiratoryAlkalosisWithMetabolicAlkalosis
                | DisorderKind::RespiratoryAcidosisWithMetabolicAlkalosis
                | DisorderKind::RespiratoryAlkalosisWithMetabolicAcidosis
                | DisorderKind::MetabolicAcidosisWithMetabolicAlkalosis
        )
    }

    /// Single disorder with pH brought back into the normal range
    pub fn is_compensated(&self) -> bool {
        matches!(
            self,
            DisorderKind::CompensatedMetabolicAlkalosis
                | DisorderKind::CompensatedMetabolicAcidosis
                | DisorderKind::CompensatedRespiratoryAcidosis
                | DisorderKind::CompensatedRespiratoryAlkalosis
        )
    }

    /// Field values reported for this outcome:
    /// (primary, compensation, concurrent, notes)
    fn details(
        &self,
    ) -> (
        &'static str,
        Option<&'static str>,
        Option<&'static str>,
        Option<&'static str>,
    ) {
        use DisorderKind::*;
        match self {
            MetabolicAcidosis | CompensatedMetabolicAcidosis => {
                ("↓ HCO₃⁻", Some("↓ PaCO₂"), None, None)
            }
            MetabolicAlkalosis | CompensatedMetabolicAlkalosis => {
                ("↑ HCO₃⁻", Some("↑ PaCO₂"), None, None)
            }
            RespiratoryAcidosis | CompensatedRespiratoryAcidosis => {
                ("↑ PaCO₂", Some("↑ HCO₃⁻"), None, None)
            }
            RespiratoryAlkalosis | CompensatedRespiratoryAlkalosis => {
                ("↓ PaCO₂", Some("↓ HCO₃⁻"), None, None)
            }
            RespiratoryAcidosisWithMetabolicAcidosis => (
                "↑ PaCO₂ (Respiratory Acidosis)",
                None,
                Some("↓ HCO₃⁻ (Metabolic Acidosis)"),
                Some("Both drive ↓ pH"),
            ),
            RespiratoryAlkalosisWithMetabolicAlkalosis => (
                "↓ PaCO₂ (Respiratory Alkalosis)",
                None,
                Some("↑ HCO₃⁻ (Metabolic Alkalosis)"),
                Some("Both drive ↑ pH"),
            ),
            RespiratoryAcidosisWithMetabolicAlkalosis => (
                "↑ PaCO₂ (Respiratory Acidosis)",
                None,
                Some("↑ HCO₃⁻ (Metabolic Alkalosis)"),
                Some("pH near normal: opposing effects"),
            ),
            RespiratoryAlkalosisWithMetabolicAcidosis => (
                "↓ PaCO₂ (Respiratory Alkalosis)",
                None,
                Some("↓ HCO₃⁻ (Metabolic Acidosis)"),
                Some("pH near normal: opposing effects"),
            ),
            MetabolicAcidosisWithMetabolicAlkalosis => (
                "HCO₃⁻ ~ normal",
                None,
                None,
                Some("Both metabolic processes oppose; check clinical context"),
            ),
            Normal => ("None", None, None, Some("All parameters within normal range")),
            Unclassified => (
                "Undetermined",
                None,
                None,
                Some("Check input values and clinical context"),
            ),
        }
    }
}

impl fmt::Display for DisorderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Result of one classification call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisorderClassification {
    /// Identifier of the rule that matched ("1" to "11", "10a" to "10e")
    pub rule: &'static str,
    pub kind: DisorderKind,
    pub label: String,
    /// Primary driver
    pub primary: String,
    /// Expected compensatory change, single disorders only
    pub compensation: Option<String>,
    /// Second process, mixed disorders only
    pub concurrent: Option<String>,
    /// Free-text remarks for mixed, normal, ambiguous and fallback outcomes
    pub notes: Option<String>,
}

impl DisorderClassification {
    fn from_rule(rule: &'static str, kind: DisorderKind) -> Self {
        let (primary, compensation, concurrent, notes) = kind.details();
        Self {
            rule,
            kind,
            label: kind.label().to_string(),
            primary: primary.to_string(),
            compensation: compensation.map(str::to_string),
            concurrent: concurrent.map(str::to_string),
            notes: notes.map(str::to_string),
        }
    }
}

impl fmt::Display for DisorderClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Type: {}", self.label)?;
        writeln!(f, "Primary: {}", self.primary)?;
        if let Some(compensation) = &self.compensation {
            writeln!(f, "Compensation: {}", compensation)?;
        }
        if let Some(concurrent) = &self.concurrent {
            writeln!(f, "Concurrent: {}", concurrent)?;
        }
        if let Some(notes) = &self.notes {
            writeln!(f, "{}", notes)?;
        }
        Ok(())
    }
}

/// One entry of the priority-ordered rule table
struct Rule {
    id: &'static str,
    applies: fn(&AcidBaseFlags) -> bool,
    outcome: DisorderKind,
}

/// Rule table in evaluation order (first match wins)
const RULES: [Rule; 14] = [
    Rule {
        id: "1",
        applies: |f| f.ph_low && f.hco3_low && !f.pco2_high,
        outcome: DisorderKind::MetabolicAcidosis,
    },
    Rule {
        id: "2",
        applies: |f| f.ph_high && f.hco3_high && !f.pco2_low,
        outcome: DisorderKind::MetabolicAlkalosis,
    },
    Rule {
        id: "3",
        applies: |f| f.ph_low && f.pco2_high && !f.hco3_low,
        outcome: DisorderKind::RespiratoryAcidosis,
    },
    Rule {
        id: "4",
        applies: |f| f.ph_high && f.pco2_low && !f.hco3_high,
        outcome: DisorderKind::RespiratoryAlkalosis,
    },
    Rule {
        id: "5",
        applies: |f| f.ph_low && f.pco2_high && f.hco3_low,
        outcome: DisorderKind::RespiratoryAcidosisWithMetabolicAcidosis,
    },
    Rule {
        id: "6",
        applies: |f| f.ph_high && f.pco2_low && f.hco3_high,
        outcome: DisorderKind::RespiratoryAlkalosisWithMetabolicAlkalosis,
    },
    Rule {
        id: "7",
        applies: |f| f.ph_normal() && f.pco2_high && f.hco3_high,
        outcome: DisorderKind::RespiratoryAcidosisWithMetabolicAlkalosis,
    },
    Rule {
        id: "8",
        applies: |f| f.ph_normal() && f.pco2_low && f.hco3_low,
        outcome: DisorderKind::RespiratoryAlkalosisWithMetabolicAcidosis,
    },
    Rule {
        id: "9",
        applies: |f| f.ph_normal() && f.hco3_near_normal,
        outcome: DisorderKind::MetabolicAcidosisWithMetabolicAlkalosis,
    },
    Rule {
        id: "10a",
        applies: |f| f.ph_normal() && f.components_normal(),
        outcome: DisorderKind::Normal,
    },
    Rule {
        id: "10b",
        applies: |f| f.ph_normal() && f.hco3_high,
        outcome: DisorderKind::CompensatedMetabolicAlkalosis,
    },
    Rule {
        id: "10c",
        applies: |f| f.ph_normal() && f.hco3_low,
        outcome: DisorderKind::CompensatedMetabolicAcidosis,
    },
    Rule {
        id: "10d",
        applies: |f| f.ph_normal() && f.pco2_high,
        outcome: DisorderKind::CompensatedRespiratoryAcidosis,
    },
    Rule {
        id: "10e",
        applies: |f| f.ph_normal() && f.pco2_low,
        outcome: DisorderKind::CompensatedRespiratoryAlkalosis,
    },
];

const FALLBACK_RULE: &str = "11";

/// Rule-based acid-base disorder classifier
///
/// # Example
/// ```
/// use abg_interpreter::acid_base::{DisorderClassifier, DisorderKind};
///
/// let classifier = DisorderClassifier::default();
///
/// // Both PaCO₂ and HCO₃⁻ raised with a normal pH
/// let result = classifier.classify(7.40, 50.0, 30.0);
/// assert_eq!(result.kind, DisorderKind::RespiratoryAcidosisWithMetabolicAlkalosis);
/// assert_eq!(result.rule, "7");
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DisorderClassifier {
    reference: ReferenceConstants,
}

impl DisorderClassifier {
    /// Create from reference constants
    pub fn new(reference: &ReferenceConstants) -> Self {
        Self {
            reference: reference.clone(),
        }
    }

    /// Flags for a triple under this classifier's thresholds
    pub fn flags(&self, ph: f64, paCO2_mmHg: f64, hco3_mEq_L: f64) -> AcidBaseFlags {
        AcidBaseFlags::evaluate(ph, paCO2_mmHg, hco3_mEq_L, &self.reference)
    }

    /// Classify a (pH, PaCO₂, HCO₃⁻) triple
    ///
    /// Total over all f64 inputs: when no rule applies the result is
    /// `DisorderKind::Unclassified`.
    pub fn classify(&self, ph: f64, paCO2_mmHg: f64, hco3_mEq_L: f64) -> DisorderClassification {
        let flags = self.flags(ph, paCO2_mmHg, hco3_mEq_L);

        match RULES.iter().find(|rule| (rule.applies)(&flags)) {
            Some(rule) => {
                log::debug!("Rule {} matched: {}", rule.id, rule.outcome);
                DisorderClassification::from_rule(rule.id, rule.outcome)
            }
            None => {
                log::debug!(
                    "No rule matched pH {}, PaCO₂ {}, HCO₃⁻ {}; unclassified",
                    ph,
                    paCO2_mmHg,
                    hco3_mEq_L
                );
                DisorderClassification::from_rule(FALLBACK_RULE, DisorderKind::Unclassified)
            }
        }
    }

    /// Identifiers of every rule whose condition holds, in table order
    ///
    /// The first entry is the rule `classify` reports. Useful for seeing
    /// which overlapping rules were shadowed by an earlier one.
    pub fn matching_rules(&self, ph: f64, paCO2_mmHg: f64, hco3_mEq_L: f64) -> Vec<&'static str> {
        let flags = self.flags(ph, paCO2_mmHg, hco3_mEq_L);
        let matched: Vec<&'static str> = RULES
            .iter()
            .filter(|rule| (rule.applies)(&flags))
            .map(|rule| rule.id)
            .collect();

        if matched.is_empty() {
            vec![FALLBACK_RULE]
        } else {
            matched
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(ph: f64, paco2: f64, hco3: f64) -> DisorderClassification {
        DisorderClassifier::default().classify(ph, paco2, hco3)
    }

    #[test]
    fn test_flag_boundaries_are_normal() {
        let flags = AcidBaseFlags::evaluate(7.35, 36.0, 22.0, &ReferenceConstants::default());
        assert!(!flags.ph_low);
        assert!(!flags.pco2_low);
        assert!(!flags.hco3_low);

        let flags = AcidBaseFlags::evaluate(7.45, 44.0, 26.0, &ReferenceConstants::default());
        assert!(!flags.ph_high);
        assert!(!flags.pco2_high);
        assert!(!flags.hco3_high);
        assert!(flags.ph_normal());
        assert!(flags.components_normal());
    }

    #[test]
    fn test_single_disorders() {
        assert_eq!(classify(7.25, 30.0, 14.0).kind, DisorderKind::MetabolicAcidosis);
        assert_eq!(classify(7.55, 48.0, 36.0).kind, DisorderKind::MetabolicAlkalosis);
        assert_eq!(classify(7.22, 60.0, 24.0).kind, DisorderKind::RespiratoryAcidosis);
        assert_eq!(classify(7.60, 25.0, 24.0).kind, DisorderKind::RespiratoryAlkalosis);
    }

    #[test]
    fn test_single_disorder_fields() {
        let result = classify(7.25, 30.0, 14.0);
        assert_eq!(result.rule, "1");
        assert_eq!(result.label, "Metabolic Acidosis");
        assert_eq!(result.primary, "↓ HCO₃⁻");
        assert_eq!(result.compensation.as_deref(), Some("↓ PaCO₂"));
        assert_eq!(result.concurrent, None);
        assert_eq!(result.notes, None);
    }

    #[test]
    fn test_rule_five_wins_over_partial_overlaps() {
        let result = classify(7.2, 50.0, 18.0);
        assert_eq!(result.rule, "5");
        assert_eq!(result.kind, DisorderKind::RespiratoryAcidosisWithMetabolicAcidosis);
        assert_eq!(result.concurrent.as_deref(), Some("↓ HCO₃⁻ (Metabolic Acidosis)"));
        assert_eq!(result.notes.as_deref(), Some("Both drive ↓ pH"));
        assert_eq!(result.compensation, None);
    }

    #[test]
    fn test_rule_six() {
        let result = classify(7.6, 30.0, 30.0);
        assert_eq!(result.rule, "6");
        assert!(result.kind.is_mixed());
    }

    #[test]
    fn test_rule_eight() {
        let result = classify(7.40, 30.0, 18.0);
        assert_eq!(result.rule, "8");
        assert_eq!(result.kind, DisorderKind::RespiratoryAlkalosisWithMetabolicAcidosis);
    }

    #[test]
    fn test_rule_nine_shadows_normal() {
        // Fully normal values sit inside the ambiguous HCO₃⁻ window
        let result = classify(7.40, 40.0, 24.0);
        assert_eq!(result.rule, "9");
        assert_eq!(
            DisorderClassifier::default().matching_rules(7.40, 40.0, 24.0),
            vec!["9", "10a"]
        );
    }

    #[test]
    fn test_normal_when_hco3_outside_window() {
        // 22 ≤ HCO₃⁻ ≤ 26 but |HCO₃⁻ − 24| ≥ 2
        let result = classify(7.40, 40.0, 26.0);
        assert_eq!(result.rule, "10a");
        assert_eq!(result.kind, DisorderKind::Normal);
        assert_eq!(result.notes.as_deref(), Some("All parameters within normal range"));
    }

    #[test]
    fn test_compensated_branches() {
        assert_eq!(classify(7.40, 40.0, 28.0).rule, "10b");
        assert_eq!(classify(7.40, 40.0, 20.0).rule, "10c");
        assert_eq!(classify(7.40, 50.0, 26.0).rule, "10d");
        assert_eq!(classify(7.40, 30.0, 22.0).rule, "10e");
        assert!(classify(7.40, 30.0, 22.0).kind.is_compensated());
    }

    #[test]
    fn test_fallback_is_unclassified() {
        // Acidemia with every component normal matches nothing
        let result = classify(7.30, 40.0, 24.0);
        assert_eq!(result.rule, "11");
        assert_eq!(result.kind, DisorderKind::Unclassified);
        assert_eq!(result.notes.as_deref(), Some("Check input values and clinical context"));
    }

    #[test]
    fn test_display_lists_present_fields() {
        let text = classify(7.2, 50.0, 18.0).to_string();
        assert_eq!(
            text,
            "Type: Respiratory Acidosis with Metabolic Acidosis\n\
             Primary: ↑ PaCO₂ (Respiratory Acidosis)\n\
             Concurrent: ↓ HCO₃⁻ (Metabolic Acidosis)\n\
             Both drive ↓ pH\n"
        );
    }
}
