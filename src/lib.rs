//! ABG Interpreter - arterial blood gas acid-base interpretation
//!
//! This library estimates pH from HCO₃⁻ and PaCO₂, classifies the
//! acid-base disorder, analyzes the anion gap, and produces the data
//! for a Davenport diagram.

// Allow non-snake-case for unit suffixes in field names (mEq_L, mmHg, pKa, etc.)
// This follows the project convention of including units in names.
#![allow(non_snake_case)]

pub mod acid_base;
pub mod config;
pub mod diagram;
pub mod export;
pub mod report;

pub use acid_base::{
    AbgReading, AcidBaseError, AcidBaseFlags, AnionGapAnalyzer, AnionGapResult, DeltaRatio,
    DeltaRatioInterpretation, DisorderClassification, DisorderClassifier, DisorderKind,
    PhEstimate, PhEstimator,
};
pub use config::{Parameters, ReferenceConstants};
pub use diagram::{DiagramModel, DiagramPoint, DiagramZone, IsobarCurve, ZoneKind};
pub use report::AbgReport;
