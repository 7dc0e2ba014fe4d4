use std::path::Path;

use log::info;
use medi_imaging::{analyze_path, PixelScale, Region, RegionStatistics};
use serde::{Deserialize, Serialize};

use crate::error::{Result, RiskError};
use crate::evolution::Evolution;
use crate::inputs::{ClinicalFindings, RiskInputs};
use crate::model::RiskModel;
use crate::risk::{RiskScore, RiskStratum, TrafficLight};

/// One evaluation of a wound: measurements, findings, score and follow-up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    /// Statistics of the image that drove the evaluation.
    pub region: RegionStatistics,
    pub findings: ClinicalFindings,
    /// Inputs after clamping and flag binarization.
    pub inputs: RiskInputs,
    pub risk: RiskScore,
    pub stratum: RiskStratum,
    pub traffic_light: TrafficLight,
    pub evolution: Option<Evolution>,
}

impl Assessment {
    pub fn new(model: &RiskModel, region: RegionStatistics, findings: ClinicalFindings) -> Self {
        let inputs = RiskInputs::from_region(&region, &findings);
        let risk = model.evaluate(&inputs);
        let stratum = risk.stratum();
        info!(
            "risk {:.2} ({}) for area {:.2} cm², red std {:.2}",
            risk.value, stratum, region.area_cm2, region.std_dev[0]
        );
        Self {
            region,
            findings,
            inputs: inputs.normalized(),
            risk,
            stratum,
            traffic_light: stratum.traffic_light(),
            evolution: None,
        }
    }

    /// Assessment over several images of the same wound; the last one is used.
    pub fn from_images(
        model: &RiskModel,
        images: &[RegionStatistics],
        findings: ClinicalFindings,
    ) -> Result<Self> {
        let last = images.last().ok_or(RiskError::NoImages)?;
        Ok(Self::new(model, *last, findings))
    }

    /// Loads an image, analyses `region` and assesses it. Imaging errors are
    /// returned unchanged.
    pub fn from_image_path(
        model: &RiskModel,
        path: impl AsRef<Path>,
        region: Region,
        scale: PixelScale,
        findings: ClinicalFindings,
    ) -> Result<Self> {
        let stats = analyze_path(path, region, scale)?;
        Ok(Self::new(model, stats, findings))
    }

    /// Records the change since `previous`.
    pub fn with_previous(mut self, previous: &Assessment) -> Self {
        self.evolution = Some(Evolution::between(&previous.region, &self.region));
        self
    }
}
