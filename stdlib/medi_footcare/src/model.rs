//! The clinical fuzzy model: seven input variables, the Risk output and the
//! reference rule table.

use std::fmt;
use std::path::Path;
use std::sync::OnceLock;

use log::debug;
use medi_fuzzy::{FuzzySystem, LinguisticVariable, MembershipShape, RuleTable, Universe};

use crate::error::{Result, RiskError};

/// Reference rule base.
///
/// Column order follows [`ClinicalVariable::ALL`]; the last code selects the
/// Risk term (1 = Low, 2 = Moderate, 3 = High).
pub const STANDARD_RULES: &str = "\
# Sens Area StdR Secr Erit Days Gluc, Risk
3 3 0 0 0 0 0, 3   # absent sensitivity with a large wound
0 0 0 2 2 0 0, 3   # secretion and erythema
0 0 3 0 0 0 3, 3   # heterogeneous redness, poor glycemic control
0 3 0 0 0 3 0, 3   # large wound of prolonged evolution
2 2 0 0 0 0 0, 2
2 0 2 0 0 0 0, 2
1 1 0 1 0 0 0, 1
1 0 1 0 1 0 0, 1
0 1 0 0 0 1 0, 1
1 0 0 0 0 0 0, 1
";

type TermTable = &'static [(&'static str, MembershipShape)];

const SENSITIVITY_TERMS: TermTable = &[
    ("Normal", MembershipShape::Trapezoid([4.0, 5.0, 6.0, 6.0])),
    ("Reduced", MembershipShape::Trapezoid([1.0, 2.0, 4.0, 5.0])),
    ("Absent", MembershipShape::Trapezoid([0.0, 0.0, 1.0, 2.0])),
];

const AREA_TERMS: TermTable = &[
    ("Small", MembershipShape::Trapezoid([0.0, 0.0, 0.3, 0.7])),
    ("Medium", MembershipShape::Trapezoid([0.5, 1.0, 1.5, 2.0])),
    ("Large", MembershipShape::Trapezoid([1.8, 2.5, 4.0, 4.0])),
];

const STD_DEV_R_TERMS: TermTable = &[
    ("Low", MembershipShape::Trapezoid([0.0, 0.0, 1.0, 1.5])),
    ("Medium", MembershipShape::Trapezoid([1.2, 1.5, 2.5, 2.8])),
    ("High", MembershipShape::Trapezoid([2.3, 2.5, 4.0, 4.0])),
];

const FLAG_TERMS: TermTable = &[
    ("No", MembershipShape::Trapezoid([0.0, 0.0, 0.4, 0.6])),
    ("Yes", MembershipShape::Trapezoid([0.4, 0.6, 1.0, 1.0])),
];

const ELAPSED_DAYS_TERMS: TermTable = &[
    ("Recent", MembershipShape::Trapezoid([0.0, 0.0, 5.0, 7.0])),
    ("Intermediate", MembershipShape::Trapezoid([6.0, 8.0, 20.0, 22.0])),
    ("Prolonged", MembershipShape::Trapezoid([20.0, 22.0, 35.0, 35.0])),
];

const GLYCEMIC_TERMS: TermTable = &[
    ("Good", MembershipShape::Trapezoid([5.0, 5.0, 6.5, 7.0])),
    ("Fair", MembershipShape::Trapezoid([6.8, 7.0, 8.5, 8.7])),
    ("Poor", MembershipShape::Trapezoid([8.5, 9.0, 12.0, 12.0])),
];

const RISK_TERMS: TermTable = &[
    ("Low", MembershipShape::Triangle([1.0, 1.3, 2.0])),
    ("Moderate", MembershipShape::Triangle([1.6, 2.0, 2.4])),
    ("High", MembershipShape::Triangle([2.1, 2.5, 3.0])),
];

/// Domain of the Risk output.
pub const RISK_UNIVERSE: Universe = Universe::new(1.0, 3.0);

/// Name of the output variable.
pub const RISK_VARIABLE: &str = "Risk";

/// The seven clinical inputs, in rule-table column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClinicalVariable {
    Sensitivity,
    Area,
    StdDevR,
    Secretion,
    Erythema,
    ElapsedDays,
    GlycemicControl,
}

impl ClinicalVariable {
    pub const ALL: [ClinicalVariable; 7] = [
        ClinicalVariable::Sensitivity,
        ClinicalVariable::Area,
        ClinicalVariable::StdDevR,
        ClinicalVariable::Secretion,
        ClinicalVariable::Erythema,
        ClinicalVariable::ElapsedDays,
        ClinicalVariable::GlycemicControl,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ClinicalVariable::Sensitivity => "Sensitivity",
            ClinicalVariable::Area => "Area",
            ClinicalVariable::StdDevR => "StdDevR",
            ClinicalVariable::Secretion => "Secretion",
            ClinicalVariable::Erythema => "Erythema",
            ClinicalVariable::ElapsedDays => "ElapsedDays",
            ClinicalVariable::GlycemicControl => "GlycemicControl",
        }
    }

    pub fn universe(self) -> Universe {
        match self {
            ClinicalVariable::Sensitivity => Universe::new(0.0, 6.0),
            ClinicalVariable::Area | ClinicalVariable::StdDevR => Universe::new(0.0, 4.0),
            ClinicalVariable::Secretion | ClinicalVariable::Erythema => Universe::new(0.0, 1.0),
            ClinicalVariable::ElapsedDays => Universe::new(0.0, 35.0),
            ClinicalVariable::GlycemicControl => Universe::new(5.0, 12.0),
        }
    }

    /// Ordered terms; rule codes index this list starting at 1.
    pub fn terms(self) -> &'static [(&'static str, MembershipShape)] {
        match self {
            ClinicalVariable::Sensitivity => SENSITIVITY_TERMS,
            ClinicalVariable::Area => AREA_TERMS,
            ClinicalVariable::StdDevR => STD_DEV_R_TERMS,
            ClinicalVariable::Secretion | ClinicalVariable::Erythema => FLAG_TERMS,
            ClinicalVariable::ElapsedDays => ELAPSED_DAYS_TERMS,
            ClinicalVariable::GlycemicControl => GLYCEMIC_TERMS,
        }
    }

    /// Boolean findings captured as floats and snapped at 0.5.
    pub fn is_flag(self) -> bool {
        matches!(self, ClinicalVariable::Secretion | ClinicalVariable::Erythema)
    }

    /// Clamps to the universe, then binarizes flags. NaN passes through so
    /// inference can reject it.
    pub fn normalize(self, value: f64) -> f64 {
        if value.is_nan() {
            value
        } else if self.is_flag() {
            if value >= 0.5 {
                1.0
            } else {
                0.0
            }
        } else {
            self.universe().clamp(value)
        }
    }

    pub fn linguistic_variable(self) -> LinguisticVariable {
        build_variable(self.name(), self.universe(), self.terms())
    }
}

impl fmt::Display for ClinicalVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn build_variable(name: &str, universe: Universe, terms: TermTable) -> LinguisticVariable {
    terms
        .iter()
        .fold(LinguisticVariable::new(name, universe), |var, (term, shape)| {
            var.with_term(*term, *shape)
        })
}

pub fn clinical_variables() -> Vec<LinguisticVariable> {
    ClinicalVariable::ALL
        .iter()
        .map(|v| v.linguistic_variable())
        .collect()
}

pub fn risk_variable() -> LinguisticVariable {
    build_variable(RISK_VARIABLE, RISK_UNIVERSE, RISK_TERMS)
}

/// An immutable, validated clinical fuzzy system.
///
/// Build one with [`RiskModel::standard`] (or an alternate rule table) and
/// pass it by reference to every evaluation. [`RiskModel::shared`] exposes a
/// process-wide instance of the standard model, built on first use.
#[derive(Debug, Clone, PartialEq)]
pub struct RiskModel {
    system: FuzzySystem,
}

static SHARED: OnceLock<std::result::Result<RiskModel, String>> = OnceLock::new();

impl RiskModel {
    pub fn standard() -> Result<Self> {
        let rules = RuleTable::parse(STANDARD_RULES)?;
        Self::with_rules(&rules)
    }

    /// Clinical variables with an alternate rule table.
    pub fn with_rules(rules: &RuleTable) -> Result<Self> {
        let system = FuzzySystem::from_table(clinical_variables(), risk_variable(), rules)?;
        debug!("risk model built with {} rules", system.rules().len());
        Ok(Self { system })
    }

    /// Wraps an arbitrary system whose inputs are the clinical variables, in order.
    pub fn from_system(system: FuzzySystem) -> Result<Self> {
        let names: Vec<&str> = system.inputs().iter().map(|v| v.name.as_str()).collect();
        let expected: Vec<&str> = ClinicalVariable::ALL.iter().map(|v| v.name()).collect();
        if names != expected {
            return Err(RiskError::IncompatibleSystem(format!(
                "inputs {names:?}, expected {expected:?}"
            )));
        }
        Ok(Self { system })
    }

    /// Loads a rule table from JSON (an array of `{ "codes", "output" }` rows).
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(medi_fuzzy::FuzzyError::from)?;
        let rules: RuleTable =
            serde_json::from_str(&text).map_err(medi_fuzzy::FuzzyError::from)?;
        Self::with_rules(&rules)
    }

    /// The standard model, built exactly once per process.
    pub fn shared() -> Result<&'static RiskModel> {
        SHARED
            .get_or_init(|| Self::standard().map_err(|e| e.to_string()))
            .as_ref()
            .map_err(|e| RiskError::InferenceFailure(e.clone()))
    }

    pub fn system(&self) -> &FuzzySystem {
        &self.system
    }

    /// Value reported when inference cannot produce a result.
    pub fn fallback_value(&self) -> f64 {
        self.system.output().universe.midpoint()
    }
}
