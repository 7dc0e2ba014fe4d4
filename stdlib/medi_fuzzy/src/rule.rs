//! Rules and coded rule tables.
//!
//! A coded rule table row lists one term code per input variable followed by
//! the output term code:
//!
//! ```text
//! 3 3 0 0 0 0 0, 3
//! ```
//!
//! Code `0` means the variable does not take part in the rule, any other code
//! is a 1-based index into that variable's ordered term list.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{FuzzyError, Result};
use crate::variable::LinguisticVariable;

fn default_weight() -> f64 {
    1.0
}

/// One `(variable, term)` condition of a rule, by position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Antecedent {
    pub variable: usize,
    pub term: usize,
}

/// Conjunction of antecedents implying one output term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub antecedents: Vec<Antecedent>,
    pub consequent: usize,
    #[serde(default = "default_weight")]
    pub weight: f64,
}

impl Rule {
    pub fn new(antecedents: Vec<Antecedent>, consequent: usize) -> Self {
        Self {
            antecedents,
            consequent,
            weight: 1.0,
        }
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// Builds a rule from variable and term names.
    pub fn from_names(
        inputs: &[LinguisticVariable],
        output: &LinguisticVariable,
        conditions: &[(&str, &str)],
        consequent: &str,
    ) -> Result<Self> {
        let mut antecedents = Vec::with_capacity(conditions.len());
        for (variable, term) in conditions {
            let index = inputs
                .iter()
                .position(|v| v.name == *variable)
                .ok_or_else(|| FuzzyError::UnknownVariable(variable.to_string()))?;
            antecedents.push(Antecedent {
                variable: index,
                term: inputs[index].term_index(term)?,
            });
        }
        Ok(Rule::new(antecedents, output.term_index(consequent)?))
    }

    /// Firing strength: weighted minimum of the antecedent degrees.
    ///
    /// `degrees[v][t]` is the membership of input `v` in its term `t`.
    pub fn firing_strength(&self, degrees: &[Vec<f64>]) -> f64 {
        let strength = self
            .antecedents
            .iter()
            .map(|a| degrees[a.variable][a.term])
            .fold(1.0_f64, f64::min);
        strength * self.weight
    }
}

/// A rule table row in coded form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodedRule {
    pub codes: Vec<usize>,
    pub output: usize,
    #[serde(default = "default_weight")]
    pub weight: f64,
}

/// Ordered list of coded rules.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleTable {
    pub rows: Vec<CodedRule>,
}

impl RuleTable {
    pub fn new(rows: Vec<CodedRule>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Parses the textual form. Blank lines and `#` comments are skipped.
    pub fn parse(text: &str) -> Result<Self> {
        let mut rows = Vec::new();
        for (i, raw) in text.lines().enumerate() {
            let line = raw.split('#').next().unwrap_or("").trim();
            if line.is_empty() {
                continue;
            }
            let malformed = |reason: String| FuzzyError::MalformedRule { line: i + 1, reason };

            let (conditions, output) = line
                .split_once(',')
                .ok_or_else(|| malformed("missing ', <output>' part".to_string()))?;
            let codes = conditions
                .split_whitespace()
                .map(|c| {
                    c.parse::<usize>()
                        .map_err(|_| malformed(format!("invalid term code '{c}'")))
                })
                .collect::<Result<Vec<_>>>()?;
            let output = output.trim();
            let output = output
                .parse::<usize>()
                .map_err(|_| malformed(format!("invalid output code '{output}'")))?;
            if codes.is_empty() {
                return Err(malformed("no term codes".to_string()));
            }
            rows.push(CodedRule {
                codes,
                output,
                weight: 1.0,
            });
        }
        Ok(Self { rows })
    }

    /// Resolves every row against the variables, failing on the first bad row.
    pub fn resolve(
        &self,
        inputs: &[LinguisticVariable],
        output: &LinguisticVariable,
    ) -> Result<Vec<Rule>> {
        self.rows
            .iter()
            .enumerate()
            .map(|(r, row)| {
                if row.codes.len() != inputs.len() {
                    return Err(FuzzyError::MalformedRule {
                        line: r + 1,
                        reason: format!(
                            "expected {} term codes, found {}",
                            inputs.len(),
                            row.codes.len()
                        ),
                    });
                }
                let mut antecedents = Vec::new();
                for (v, (&code, var)) in row.codes.iter().zip(inputs).enumerate() {
                    if code == 0 {
                        continue;
                    }
                    if code > var.terms.len() {
                        return Err(FuzzyError::TermIndexOutOfRange {
                            variable: var.name.clone(),
                            code,
                            available: var.terms.len(),
                        });
                    }
                    antecedents.push(Antecedent {
                        variable: v,
                        term: code - 1,
                    });
                }
                if antecedents.is_empty() {
                    return Err(FuzzyError::EmptyAntecedent(r));
                }
                if row.output == 0 || row.output > output.terms.len() {
                    return Err(FuzzyError::TermIndexOutOfRange {
                        variable: output.name.clone(),
                        code: row.output,
                        available: output.terms.len(),
                    });
                }
                Ok(Rule::new(antecedents, row.output - 1).with_weight(row.weight))
            })
            .collect()
    }
}

impl FromStr for RuleTable {
    type Err = FuzzyError;

    fn from_str(s: &str) -> Result<Self> {
        RuleTable::parse(s)
    }
}
