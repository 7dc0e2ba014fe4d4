//! Validated fuzzy systems and Mamdani inference.

use std::path::Path;

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::error::{FuzzyError, Result};
use crate::rule::{Rule, RuleTable};
use crate::variable::LinguisticVariable;

/// Number of output samples used for centroid defuzzification.
pub const DEFAULT_RESOLUTION: usize = 101;

fn default_resolution() -> usize {
    DEFAULT_RESOLUTION
}

/// Serializable description of a complete system, rules in coded form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemDefinition {
    pub inputs: Vec<LinguisticVariable>,
    pub output: LinguisticVariable,
    pub rules: RuleTable,
    #[serde(default = "default_resolution")]
    pub resolution: usize,
}

/// Result of one inference pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Inference {
    /// Input values after clamping to each universe.
    pub inputs: Vec<f64>,
    /// Firing strength of each rule, in rule order.
    pub firing_strengths: Vec<f64>,
    /// Output universe samples paired with the aggregated membership.
    pub aggregate: Vec<(f64, f64)>,
    /// Centroid of the aggregate, `None` when no rule fired.
    pub crisp: Option<f64>,
}

impl Inference {
    pub fn any_rule_fired(&self) -> bool {
        self.firing_strengths.iter().any(|&s| s > 0.0)
    }
}

/// Immutable Mamdani system: min for AND, clip for implication, max for
/// aggregation, centroid for defuzzification.
///
/// Every variable, term reference and rule is checked once in [`FuzzySystem::new`]
/// so inference only fails on bad input values.
#[derive(Debug, Clone, PartialEq)]
pub struct FuzzySystem {
    inputs: Vec<LinguisticVariable>,
    output: LinguisticVariable,
    rules: Vec<Rule>,
    resolution: usize,
    output_samples: Vec<f64>,
}

impl FuzzySystem {
    pub fn new(
        inputs: Vec<LinguisticVariable>,
        output: LinguisticVariable,
        rules: Vec<Rule>,
    ) -> Result<Self> {
        Self::with_resolution(inputs, output, rules, DEFAULT_RESOLUTION)
    }

    pub fn with_resolution(
        inputs: Vec<LinguisticVariable>,
        output: LinguisticVariable,
        rules: Vec<Rule>,
        resolution: usize,
    ) -> Result<Self> {
        if resolution < 2 {
            return Err(FuzzyError::InvalidResolution(resolution));
        }
        for (i, var) in inputs.iter().enumerate() {
            var.validate()?;
            if inputs[..i].iter().any(|v| v.name == var.name) || var.name == output.name {
                return Err(FuzzyError::DuplicateVariable(var.name.clone()));
            }
        }
        output.validate()?;

        for (r, rule) in rules.iter().enumerate() {
            if rule.antecedents.is_empty() {
                return Err(FuzzyError::EmptyAntecedent(r));
            }
            if !(0.0..=1.0).contains(&rule.weight) {
                return Err(FuzzyError::InvalidWeight {
                    rule: r,
                    weight: rule.weight,
                });
            }
            for a in &rule.antecedents {
                let var = inputs
                    .get(a.variable)
                    .ok_or_else(|| FuzzyError::UnknownVariable(format!("#{}", a.variable)))?;
                if a.term >= var.terms.len() {
                    return Err(FuzzyError::TermIndexOutOfRange {
                        variable: var.name.clone(),
                        code: a.term + 1,
                        available: var.terms.len(),
                    });
                }
            }
            if rule.consequent >= output.terms.len() {
                return Err(FuzzyError::TermIndexOutOfRange {
                    variable: output.name.clone(),
                    code: rule.consequent + 1,
                    available: output.terms.len(),
                });
            }
        }

        let output_samples = output.universe.samples(resolution);
        debug!(
            "built fuzzy system: {} inputs, {} rules, output '{}' sampled at {} points",
            inputs.len(),
            rules.len(),
            output.name,
            resolution
        );
        Ok(Self {
            inputs,
            output,
            rules,
            resolution,
            output_samples,
        })
    }

    pub fn from_table(
        inputs: Vec<LinguisticVariable>,
        output: LinguisticVariable,
        table: &RuleTable,
    ) -> Result<Self> {
        let rules = table.resolve(&inputs, &output)?;
        Self::new(inputs, output, rules)
    }

    pub fn from_definition(def: SystemDefinition) -> Result<Self> {
        let rules = def.rules.resolve(&def.inputs, &def.output)?;
        Self::with_resolution(def.inputs, def.output, rules, def.resolution)
    }

    /// Loads a JSON [`SystemDefinition`] from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let def: SystemDefinition = serde_json::from_str(&text)?;
        Self::from_definition(def)
    }

    pub fn inputs(&self) -> &[LinguisticVariable] {
        &self.inputs
    }

    pub fn output(&self) -> &LinguisticVariable {
        &self.output
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Runs fuzzification, rule activation, aggregation and defuzzification.
    ///
    /// `values` holds one crisp value per input variable, in declaration
    /// order. Values are clamped to their universe; non-finite values are
    /// rejected.
    pub fn infer(&self, values: &[f64]) -> Result<Inference> {
        if values.len() != self.inputs.len() {
            return Err(FuzzyError::InputArity {
                expected: self.inputs.len(),
                found: values.len(),
            });
        }

        let mut clamped = Vec::with_capacity(values.len());
        let mut degrees = Vec::with_capacity(values.len());
        for (var, &x) in self.inputs.iter().zip(values) {
            if !x.is_finite() {
                return Err(FuzzyError::NonFiniteInput(var.name.clone()));
            }
            let x = var.universe.clamp(x);
            degrees.push(var.fuzzify(x));
            clamped.push(x);
        }

        let firing_strengths: Vec<f64> = self
            .rules
            .iter()
            .map(|rule| rule.firing_strength(&degrees))
            .collect();
        trace!("firing strengths: {firing_strengths:?}");

        // Strongest activation per output term; clipping each rule and taking
        // the max is the same as clipping once at the max.
        let mut activation = vec![0.0_f64; self.output.terms.len()];
        for (rule, &strength) in self.rules.iter().zip(&firing_strengths) {
            let slot = &mut activation[rule.consequent];
            *slot = slot.max(strength);
        }

        let aggregate: Vec<(f64, f64)> = self
            .output_samples
            .iter()
            .map(|&u| {
                let mu = self
                    .output
                    .terms
                    .iter()
                    .zip(&activation)
                    .filter(|(_, h)| **h > 0.0)
                    .map(|(term, &h)| term.degree(u).min(h))
                    .fold(0.0_f64, f64::max);
                (u, mu)
            })
            .collect();

        let crisp = centroid(&aggregate);
        Ok(Inference {
            inputs: clamped,
            firing_strengths,
            aggregate,
            crisp,
        })
    }
}

/// Discrete centre of mass of `(x, mu)` samples; `None` for an all-zero curve.
pub fn centroid(curve: &[(f64, f64)]) -> Option<f64> {
    let (num, den) = curve
        .iter()
        .fold((0.0, 0.0), |(num, den), &(x, mu)| (num + x * mu, den + mu));
    if den > 0.0 {
        Some(num / den)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centroid_of_symmetric_curve_is_its_center() {
        let curve = [(1.0, 0.5), (2.0, 1.0), (3.0, 0.5)];
        assert_eq!(centroid(&curve), Some(2.0));
    }

    #[test]
    fn centroid_of_empty_curve_is_undefined() {
        assert_eq!(centroid(&[(1.0, 0.0), (2.0, 0.0)]), None);
        assert_eq!(centroid(&[]), None);
    }
}
