//! Full interpretation of one ABG reading.
//!
//! `AbgReport::interpret` runs the pipeline: estimate pH, classify, run the
//! anion gap analysis when HCO₃⁻ is low, and assemble the diagram data. The
//! report renders as the text block shown to the user and serializes to JSON.

use std::fmt;

use serde::Serialize;

use crate::acid_base::{
    AbgReading, AcidBaseError, AnionGapAnalyzer, AnionGapResult, DisorderClassification,
    DisorderClassifier, PhEstimator,
};
use crate::config::ReferenceConstants;
use crate::diagram::DiagramModel;

/// Interpretation of one reading
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AbgReport {
    pub reading: AbgReading,
    /// Calculated patient pH
    pub ph: f64,
    pub classification: DisorderClassification,
    /// Present only when HCO₃⁻ is below the low threshold
    pub anion_gap: Option<AnionGapResult>,
    pub diagram: DiagramModel,
}

impl AbgReport {
    /// Interpret a reading against the reference constants
    ///
    /// # Errors
    /// `AcidBaseError::Domain` when HCO₃⁻ or PaCO₂ is not positive.
    pub fn interpret(reading: &AbgReading, reference: &ReferenceConstants) -> Result<Self, AcidBaseError> {
        let estimate = PhEstimator::from_reference(reference).estimate(reading)?;
        let ph = estimate.ph;

        let classification = DisorderClassifier::new(reference).classify(
            ph,
            reading.paCO2_mmHg,
            reading.hco3_mEq_L,
        );

        let analyzer = AnionGapAnalyzer::from_reference(reference);
        let anion_gap = if analyzer.should_analyze(reading.hco3_mEq_L) {
            Some(analyzer.analyze(reading.na_mEq_L, reading.cl_mEq_L, reading.hco3_mEq_L))
        } else {
            None
        };

        let diagram = DiagramModel::build(reference, ph, reading.hco3_mEq_L);

        log::info!(
            "Interpreted PaCO₂ {} mmHg, HCO₃⁻ {} mEq/L: pH {:.2}, {} (rule {})",
            reading.paCO2_mmHg,
            reading.hco3_mEq_L,
            ph,
            classification.label,
            classification.rule
        );

        Ok(Self {
            reading: *reading,
            ph,
            classification,
            anion_gap,
            diagram,
        })
    }
}

impl fmt::Display for AbgReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Calculated Patient pH: {:.2}", self.ph)?;
        writeln!(f)?;
        writeln!(f, "Acid-base Interpretation:")?;
        write!(f, "{}", self.classification)?;

        if let Some(gap) = &self.anion_gap {
            writeln!(f)?;
            writeln!(f, "Anion gap: {:.1} (normal ≈12)", gap.anion_gap_mEq_L)?;
            writeln!(f, "ΔAG/Δ[HCO₃⁻]: {}", gap.interpretation)?;
        }

        writeln!(f)?;
        writeln!(f, "{}:", self.diagram.title)?;
        let control = self.diagram.control.position;
        let patient = self.diagram.patient.position;
        writeln!(
            f,
            "  {} (control): pH {:.2}, HCO₃⁻ {:.1}",
            self.diagram.control.label, control.x, control.y
        )?;
        writeln!(
            f,
            "  {} (patient): pH {:.2}, HCO₃⁻ {:.1}",
            self.diagram.patient.label, patient.x, patient.y
        )?;

        let zones = self.diagram.patient_zones();
        if zones.is_empty() {
            write!(f, "  Patient point lies outside the labelled zones")?;
        } else {
            let labels: Vec<&str> = zones.iter().map(|z| z.label()).collect();
            write!(f, "  Patient point zones: {}", labels.join(", "))?;
        }
        if !self.diagram.patient_in_view() {
            write!(f, " (outside plotted axes)")?;
        }
        writeln!(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::acid_base::DisorderKind;

    #[test]
    fn test_normal_reading_skips_anion_gap() {
        let report = AbgReport::interpret(&AbgReading::default(), &ReferenceConstants::default()).unwrap();
        assert!((report.ph - 7.40).abs() < 0.005);
        assert!(report.anion_gap.is_none());
        assert!(!report.to_string().contains("Anion gap"));
    }

    #[test]
    fn test_low_hco3_includes_anion_gap() {
        let reading = AbgReading::new(25.0, 10.0, 140.0, 100.0);
        let report = AbgReport::interpret(&reading, &ReferenceConstants::default()).unwrap();
        let gap = report.anion_gap.expect("anion gap should run for HCO₃⁻ 10");
        assert!((gap.anion_gap_mEq_L - 30.0).abs() < 1e-9);

        let text = report.to_string();
        assert!(text.contains("Anion gap: 30.0 (normal ≈12)"), "{}", text);
        assert!(text.contains("Pure anion gap metabolic acidosis"), "{}", text);
    }

    #[test]
    fn test_text_block_order() {
        let reading = AbgReading::new(60.0, 24.0, 140.0, 104.0);
        let report = AbgReport::interpret(&reading, &ReferenceConstants::default()).unwrap();
        assert_eq!(report.classification.kind, DisorderKind::RespiratoryAcidosis);

        let text = report.to_string();
        let ph_at = text.find("Calculated Patient pH: 7.22").unwrap();
        let type_at = text.find("Type: Respiratory Acidosis").unwrap();
        let diagram_at = text.find("Davenport Diagram").unwrap();
        assert!(ph_at < type_at && type_at < diagram_at);
    }

    #[test]
    fn test_non_positive_paco2_fails() {
        let reading = AbgReading::new(0.0, 24.0, 140.0, 104.0);
        assert!(matches!(
            AbgReport::interpret(&reading, &ReferenceConstants::default()),
            Err(AcidBaseError::Domain { .. })
        ));
    }
}
