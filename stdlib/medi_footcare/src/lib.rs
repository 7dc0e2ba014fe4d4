//! Diabetic foot wound risk assessment
//!
//! Seven measurements (monofilament sensitivity, wound area, spread of the red
//! channel, secretion, erythema, days since onset and HbA1c) are mapped
//! through a Mamdani fuzzy rule base to a risk score between 1 and 3, then
//! bucketed into Low / Moderate / High.
//!
//! ```
//! use medi_footcare::{evaluate_risk, stratify_risk, RiskStratum};
//!
//! let score = evaluate_risk(0.0, 4.0, 0.5, 0.0, 0.0, 2.0, 6.0);
//! assert_eq!(stratify_risk(score), RiskStratum::High);
//! ```

#![warn(missing_debug_implementations)]

pub mod assessment;
pub mod error;
pub mod evolution;
pub mod inputs;
pub mod model;
pub mod risk;

pub use assessment::Assessment;
pub use error::{Result, RiskError};
pub use evolution::{Delta, Evolution};
pub use inputs::{ClinicalFindings, RiskInputs};
pub use model::{
    clinical_variables, risk_variable, ClinicalVariable, RiskModel, RISK_UNIVERSE, STANDARD_RULES,
};
pub use risk::{
    assess_risk, evaluate_risk, stratify_risk, RiskScore, RiskSource, RiskStratum, TrafficLight,
    FALLBACK_RISK, HIGH_THRESHOLD, MODERATE_THRESHOLD,
};
