use medi_imaging::{Channel, RegionStatistics};
use serde::{Deserialize, Serialize};

use crate::model::ClinicalVariable;

/// Findings entered by the clinician alongside the wound image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClinicalFindings {
    /// Monofilament sensitivity score, 0 (absent) to 6 (normal).
    pub sensitivity: f64,
    pub secretion: f64,
    pub erythema: f64,
    pub elapsed_days: f64,
    /// HbA1c percentage.
    pub glycemic_control: f64,
}

/// The seven crisp values fed to the risk model, in rule-table order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskInputs {
    pub sensitivity: f64,
    pub area_cm2: f64,
    pub red_std_dev: f64,
    pub secretion: f64,
    pub erythema: f64,
    pub elapsed_days: f64,
    pub glycemic_control: f64,
}

impl RiskInputs {
    pub fn from_array(values: [f64; 7]) -> Self {
        let [sensitivity, area_cm2, red_std_dev, secretion, erythema, elapsed_days, glycemic_control] =
            values;
        Self {
            sensitivity,
            area_cm2,
            red_std_dev,
            secretion,
            erythema,
            elapsed_days,
            glycemic_control,
        }
    }

    /// Combines region statistics with the clinician's findings. The red
    /// channel spread becomes StdDevR and the region area becomes Area.
    pub fn from_region(stats: &RegionStatistics, findings: &ClinicalFindings) -> Self {
        Self {
            sensitivity: findings.sensitivity,
            area_cm2: stats.area_cm2,
            red_std_dev: stats.std_dev_of(Channel::Red),
            secretion: findings.secretion,
            erythema: findings.erythema,
            elapsed_days: findings.elapsed_days,
            glycemic_control: findings.glycemic_control,
        }
    }

    pub fn to_array(&self) -> [f64; 7] {
        [
            self.sensitivity,
            self.area_cm2,
            self.red_std_dev,
            self.secretion,
            self.erythema,
            self.elapsed_days,
            self.glycemic_control,
        ]
    }

    /// Every value clamped to its domain, flags snapped to 0 or 1.
    pub fn normalized(&self) -> Self {
        let mut values = self.to_array();
        for (value, var) in values.iter_mut().zip(ClinicalVariable::ALL) {
            *value = var.normalize(*value);
        }
        Self::from_array(values)
    }
}
