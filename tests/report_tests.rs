//! Integration tests for the full interpretation pipeline
//!
//! Tests verify that:
//! - The anion gap runs only when HCO₃⁻ is below 22 mEq/L
//! - Delta ratio edge cases surface as "not applicable", never as numbers
//! - The text block carries the fields in the documented order
//! - Diagram data reflects the patient's estimated pH and HCO₃⁻

use abg_interpreter::{
    config::{InputRanges, Parameters},
    diagram::ZoneKind,
    export::{diagram_records, write_report_json},
    AbgReading, AbgReport, AcidBaseError, AnionGapAnalyzer, DeltaRatio,
    DeltaRatioInterpretation, DisorderKind, ReferenceConstants,
};

fn interpret(paco2: f64, hco3: f64, na: f64, cl: f64) -> AbgReport {
    AbgReport::interpret(
        &AbgReading::new(paco2, hco3, na, cl),
        &ReferenceConstants::default(),
    )
    .unwrap()
}

// ============================================================================
// Anion gap
// ============================================================================

#[test]
fn test_anion_gap_scenario_pure_gap_acidosis() {
    let report = interpret(25.0, 10.0, 140.0, 100.0);
    let gap = report.anion_gap.expect("HCO₃⁻ 10 should trigger the anion gap");

    assert!((gap.anion_gap_mEq_L - 30.0).abs() < 1e-9);
    assert!((gap.delta_ag_mEq_L - 18.0).abs() < 1e-9);
    assert!((gap.delta_hco3_mEq_L - 14.0).abs() < 1e-9);
    match gap.delta_ratio {
        DeltaRatio::Defined(ratio) => assert!((ratio - 1.2857).abs() < 1e-3, "ratio {}", ratio),
        DeltaRatio::NotApplicable => panic!("ratio should be defined"),
    }
    assert_eq!(gap.interpretation, DeltaRatioInterpretation::PureAnionGapAcidosis);
}

#[test]
fn test_anion_gap_skipped_at_threshold() {
    let report = interpret(40.0, 22.0, 140.0, 104.0);
    assert!(report.anion_gap.is_none());
}

#[test]
fn test_analyzer_handles_zero_delta_directly() {
    let gap = AnionGapAnalyzer::default().analyze(140.0, 104.0, 24.0);
    assert!((gap.anion_gap_mEq_L - 12.0).abs() < 1e-12);
    assert_eq!(gap.delta_ratio, DeltaRatio::NotApplicable);
    assert_eq!(gap.interpretation.text(), "ΔAG/Δ[HCO₃⁻] not applicable");
}

// ============================================================================
// Text block
// ============================================================================

#[test]
fn test_text_block_for_metabolic_acidosis() {
    let text = interpret(25.0, 10.0, 140.0, 100.0).to_string();
    let expected_order = [
        "Calculated Patient pH: 7.22",
        "Type: Metabolic Acidosis",
        "Primary: ↓ HCO₃⁻",
        "Compensation: ↓ PaCO₂",
        "Anion gap: 30.0 (normal ≈12)",
        "ΔAG/Δ[HCO₃⁻]: ΔAG/Δ[HCO₃⁻] 1–2: Pure anion gap metabolic acidosis",
        "Davenport Diagram with Clinical Zones",
    ];

    let mut cursor = 0;
    for line in expected_order {
        let found = text[cursor..]
            .find(line)
            .unwrap_or_else(|| panic!("missing or out of order: {:?}\n{}", line, text));
        cursor += found + line.len();
    }
}

#[test]
fn test_text_block_reports_patient_zone() {
    let text = interpret(40.0, 26.0, 140.0, 104.0).to_string();
    assert!(text.contains("Type: Normal acid-base status"), "{}", text);
    assert!(text.contains("Patient point zones: Normal"), "{}", text);
}

// ============================================================================
// Diagram
// ============================================================================

#[test]
fn test_diagram_patient_point_matches_estimate() {
    let report = interpret(60.0, 24.0, 140.0, 104.0);
    assert_eq!(report.classification.kind, DisorderKind::RespiratoryAcidosis);
    assert_eq!(report.diagram.patient.position.x, report.ph);
    assert_eq!(report.diagram.patient.position.y, 24.0);
    assert!(report
        .diagram
        .patient_zones()
        .contains(&ZoneKind::RespiratoryAcidosis));
}

#[test]
fn test_diagram_records_end_with_points() {
    let report = interpret(40.0, 24.0, 140.0, 104.0);
    let records = diagram_records(&report.diagram);
    let last_two: Vec<&str> = records[records.len() - 2..]
        .iter()
        .map(|r| r.label.as_str())
        .collect();
    assert_eq!(last_two, vec!["C", "B"]);
}

// ============================================================================
// Input layer and errors
// ============================================================================

#[test]
fn test_validation_is_separate_from_interpretation() {
    // Out of entry range, but the core still interprets it
    let reading = AbgReading::new(130.0, 24.0, 140.0, 104.0);
    assert!(matches!(
        reading.validate(&InputRanges::default()),
        Err(AcidBaseError::OutOfRange { .. })
    ));
    assert!(AbgReport::interpret(&reading, &ReferenceConstants::default()).is_ok());
}

#[test]
fn test_negative_bicarbonate_is_domain_error() {
    let result = AbgReport::interpret(
        &AbgReading::new(40.0, -1.0, 140.0, 104.0),
        &ReferenceConstants::default(),
    );
    assert!(matches!(result, Err(AcidBaseError::Domain { .. })));
}

#[test]
fn test_default_parameters_drive_default_reading() {
    let params = Parameters::default();
    let reading = AbgReading::from_defaults(&params.inputs);
    let report = AbgReport::interpret(&reading, &params.reference).unwrap();
    assert!((report.ph - 7.40).abs() < 0.005);
}

#[test]
fn test_json_report_is_parseable() {
    let report = interpret(60.0, 24.0, 140.0, 104.0);
    let mut buffer = Vec::new();
    write_report_json(&report, &mut buffer).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
    assert_eq!(value["report"]["classification"]["rule"], "3");
    assert!(value["report"]["anion_gap"].is_null());
}
