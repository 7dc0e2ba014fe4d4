use medi_fuzzy::FuzzyError;
use medi_imaging::ImagingError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RiskError {
    #[error("fuzzy model error: {0}")]
    Fuzzy(#[from] FuzzyError),
    #[error("image analysis failed: {0}")]
    Imaging(#[from] ImagingError),
    #[error("inference failed: {0}")]
    InferenceFailure(String),
    #[error("fuzzy system does not match the clinical variables: {0}")]
    IncompatibleSystem(String),
    #[error("no image statistics supplied for the assessment")]
    NoImages,
}

pub type Result<T> = std::result::Result<T, RiskError>;
