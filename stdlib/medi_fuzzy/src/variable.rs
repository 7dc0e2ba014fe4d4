//! Linguistic variables and their universes of discourse.

use serde::{Deserialize, Serialize};

use crate::error::{FuzzyError, Result};
use crate::membership::{MembershipFunction, MembershipShape};

/// Bounded numeric domain of a linguistic variable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Universe {
    pub min: f64,
    pub max: f64,
}

impl Universe {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn is_empty(&self) -> bool {
        !(self.min.is_finite() && self.max.is_finite() && self.min < self.max)
    }

    pub fn clamp(&self, x: f64) -> f64 {
        x.clamp(self.min, self.max)
    }

    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    /// `points` evenly spaced samples from `min` to `max` inclusive.
    pub fn samples(&self, points: usize) -> Vec<f64> {
        match points {
            0 => Vec::new(),
            1 => vec![self.min],
            n => {
                let step = (self.max - self.min) / (n - 1) as f64;
                (0..n).map(|i| self.min + i as f64 * step).collect()
            }
        }
    }
}

/// A named axis with an ordered list of membership functions.
///
/// Term order is significant: rule tables refer to terms by 1-based position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinguisticVariable {
    pub name: String,
    pub universe: Universe,
    pub terms: Vec<MembershipFunction>,
}

impl LinguisticVariable {
    pub fn new(name: impl Into<String>, universe: Universe) -> Self {
        Self {
            name: name.into(),
            universe,
            terms: Vec::new(),
        }
    }

    pub fn with_term(mut self, name: impl Into<String>, shape: MembershipShape) -> Self {
        self.terms.push(MembershipFunction::new(name, shape));
        self
    }

    pub fn term_index(&self, name: &str) -> Result<usize> {
        self.terms
            .iter()
            .position(|t| t.name == name)
            .ok_or_else(|| FuzzyError::UnknownTerm {
                variable: self.name.clone(),
                term: name.to_string(),
            })
    }

    /// Degree of `x` in every term, in term order.
    pub fn fuzzify(&self, x: f64) -> Vec<f64> {
        self.terms.iter().map(|t| t.degree(x)).collect()
    }

    /// Checks the universe and every term's breakpoints.
    pub fn validate(&self) -> Result<()> {
        if self.universe.is_empty() {
            return Err(FuzzyError::EmptyUniverse {
                variable: self.name.clone(),
                min: self.universe.min,
                max: self.universe.max,
            });
        }
        if self.terms.is_empty() {
            return Err(FuzzyError::InvalidMembership {
                variable: self.name.clone(),
                term: String::new(),
                reason: "variable declares no membership functions".to_string(),
            });
        }
        for (i, term) in self.terms.iter().enumerate() {
            if let Some(reason) = term.shape.defect() {
                return Err(FuzzyError::InvalidMembership {
                    variable: self.name.clone(),
                    term: term.name.clone(),
                    reason,
                });
            }
            if self.terms[..i].iter().any(|t| t.name == term.name) {
                return Err(FuzzyError::InvalidMembership {
                    variable: self.name.clone(),
                    term: term.name.clone(),
                    reason: "duplicate term name".to_string(),
                });
            }
        }
        Ok(())
    }
}
