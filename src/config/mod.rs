//! Configuration module for loading reference constants and input ranges.
//!
//! All clinical parameters include citations to their source publications.

mod parameters;

pub use parameters::{
    ClassificationThresholds, InputField, InputRanges, Parameters, ReferenceConstants,
};
