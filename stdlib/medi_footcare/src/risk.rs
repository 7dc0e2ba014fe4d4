use std::fmt;

use log::{debug, error, warn};
use serde::{Deserialize, Serialize};

use crate::error::RiskError;
use crate::inputs::RiskInputs;
use crate::model::RiskModel;

/// Midpoint of the Risk universe, reported when inference yields nothing.
pub const FALLBACK_RISK: f64 = 2.0;

/// Scores at or above this are Moderate.
pub const MODERATE_THRESHOLD: f64 = 1.6;
/// Scores at or above this are High.
pub const HIGH_THRESHOLD: f64 = 2.1;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum RiskStratum {
    Low,
    Moderate,
    High,
}

impl RiskStratum {
    pub fn label(self) -> &'static str {
        match self {
            RiskStratum::Low => "LOW",
            RiskStratum::Moderate => "MODERATE",
            RiskStratum::High => "HIGH",
        }
    }

    pub fn traffic_light(self) -> TrafficLight {
        match self {
            RiskStratum::Low => TrafficLight::Green,
            RiskStratum::Moderate => TrafficLight::Yellow,
            RiskStratum::High => TrafficLight::Red,
        }
    }
}

impl fmt::Display for RiskStratum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Colour signal shown next to the score.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TrafficLight {
    Green,
    Yellow,
    Red,
}

impl TrafficLight {
    pub fn label(self) -> &'static str {
        match self {
            TrafficLight::Green => "green",
            TrafficLight::Yellow => "yellow",
            TrafficLight::Red => "red",
        }
    }
}

/// How a [`RiskScore`] was obtained.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum RiskSource {
    /// Centroid of the aggregated output.
    Inferred,
    /// Every rule had zero firing strength; the value is the output midpoint.
    NoRuleFired,
    /// Inference failed; the value is the output midpoint.
    Fallback,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RiskScore {
    /// Score on the 1 to 3 scale.
    pub value: f64,
    pub source: RiskSource,
}

impl RiskScore {
    pub fn stratum(&self) -> RiskStratum {
        stratify_risk(self.value)
    }

    pub fn traffic_light(&self) -> TrafficLight {
        self.stratum().traffic_light()
    }

    pub fn is_inferred(&self) -> bool {
        self.source == RiskSource::Inferred
    }
}

pub fn stratify_risk(score: f64) -> RiskStratum {
    if score >= HIGH_THRESHOLD {
        RiskStratum::High
    } else if score >= MODERATE_THRESHOLD {
        RiskStratum::Moderate
    } else {
        RiskStratum::Low
    }
}

impl RiskModel {
    /// Evaluates the model, never failing.
    ///
    /// Inputs are clamped and flags binarized first. If no rule fires the
    /// output midpoint is returned as [`RiskSource::NoRuleFired`]; if
    /// inference fails it is returned as [`RiskSource::Fallback`].
    pub fn evaluate(&self, inputs: &RiskInputs) -> RiskScore {
        match self.try_evaluate(inputs) {
            Ok(Some(value)) => RiskScore {
                value,
                source: RiskSource::Inferred,
            },
            Ok(None) => {
                warn!(
                    "no rule fired for inputs {:?}; reporting midpoint {}",
                    inputs.normalized().to_array(),
                    self.fallback_value()
                );
                RiskScore {
                    value: self.fallback_value(),
                    source: RiskSource::NoRuleFired,
                }
            }
            Err(e) => {
                error!(
                    "risk inference failed: {e}; reporting fallback {}",
                    self.fallback_value()
                );
                RiskScore {
                    value: self.fallback_value(),
                    source: RiskSource::Fallback,
                }
            }
        }
    }

    /// Crisp risk clamped to the output universe, `None` when no rule fires.
    pub fn try_evaluate(&self, inputs: &RiskInputs) -> Result<Option<f64>, RiskError> {
        let normalized = inputs.normalized().to_array();
        debug!("evaluating risk for {normalized:?}");
        let inference = self.system().infer(&normalized)?;
        let universe = self.system().output().universe;
        Ok(inference.crisp.map(|x| universe.clamp(x)))
    }
}

/// Scores `inputs` with the shared standard model.
pub fn assess_risk(inputs: &RiskInputs) -> RiskScore {
    match RiskModel::shared() {
        Ok(model) => model.evaluate(inputs),
        Err(e) => {
            error!("standard risk model unavailable: {e}; reporting fallback {FALLBACK_RISK}");
            RiskScore {
                value: FALLBACK_RISK,
                source: RiskSource::Fallback,
            }
        }
    }
}

/// Risk score in [1, 3] for the seven clinical values, using the shared
/// standard model.
#[allow(clippy::too_many_arguments)]
pub fn evaluate_risk(
    sensitivity: f64,
    area: f64,
    std_dev_r: f64,
    secretion: f64,
    erythema: f64,
    elapsed_days: f64,
    glycemic_control: f64,
) -> f64 {
    let inputs = RiskInputs::from_array([
        sensitivity,
        area,
        std_dev_r,
        secretion,
        erythema,
        elapsed_days,
        glycemic_control,
    ]);
    assess_risk(&inputs).value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stratum_boundaries() {
        assert_eq!(stratify_risk(1.0), RiskStratum::Low);
        assert_eq!(stratify_risk(1.5999), RiskStratum::Low);
        assert_eq!(stratify_risk(1.6), RiskStratum::Moderate);
        assert_eq!(stratify_risk(2.0999), RiskStratum::Moderate);
        assert_eq!(stratify_risk(2.1), RiskStratum::High);
        assert_eq!(stratify_risk(3.0), RiskStratum::High);
    }

    #[test]
    fn labels_and_lights() {
        assert_eq!(RiskStratum::Moderate.to_string(), "MODERATE");
        assert_eq!(RiskStratum::Low.traffic_light(), TrafficLight::Green);
        assert_eq!(RiskStratum::Moderate.traffic_light(), TrafficLight::Yellow);
        assert_eq!(RiskStratum::High.traffic_light().label(), "red");
    }

    #[test]
    fn fallback_is_distinguishable() {
        let model = RiskModel::standard().unwrap();
        let inputs = RiskInputs::from_array([f64::NAN, 0.0, 0.0, 0.0, 0.0, 0.0, 5.0]);
        let score = model.evaluate(&inputs);
        assert_eq!(score.value, FALLBACK_RISK);
        assert_eq!(score.source, RiskSource::Fallback);
        assert!(!score.is_inferred());
        assert!(model.try_evaluate(&inputs).is_err());
    }
}
