//! Mamdani fuzzy inference
//!
//! Linguistic variables with piecewise-linear membership functions, rule
//! tables in coded or textual form, and a validated [`FuzzySystem`] that maps
//! crisp inputs to a crisp output through min/max composition and centroid
//! defuzzification.

#![warn(missing_debug_implementations)]

pub mod error;
pub mod membership;
pub mod rule;
pub mod system;
pub mod variable;

pub use error::{FuzzyError, Result};
pub use membership::{MembershipFunction, MembershipShape};
pub use rule::{Antecedent, CodedRule, Rule, RuleTable};
pub use system::{centroid, FuzzySystem, Inference, SystemDefinition, DEFAULT_RESOLUTION};
pub use variable::{LinguisticVariable, Universe};
