use image::{Rgb, RgbImage};
use medi_footcare::{
    Assessment, ClinicalFindings, RiskError, RiskModel, RiskSource, RiskStratum, TrafficLight,
};
use medi_imaging::{analyze, ImagingError, PixelScale, Region};
use pretty_assertions::assert_eq;

fn init_test_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

/// Skin-toned background with a wound whose red channel alternates 147/153.
fn wound_photo() -> RgbImage {
    RgbImage::from_fn(600, 300, |x, y| {
        if (100..500).contains(&x) && (100..200).contains(&y) {
            if (x + y) % 2 == 0 {
                Rgb([147, 60, 55])
            } else {
                Rgb([153, 60, 55])
            }
        } else {
            Rgb([225, 190, 170])
        }
    })
}

fn findings(sensitivity: f64, elapsed_days: f64, glycemic_control: f64) -> ClinicalFindings {
    ClinicalFindings {
        sensitivity,
        secretion: 0.0,
        erythema: 0.0,
        elapsed_days,
        glycemic_control,
    }
}

#[test]
fn large_insensate_wound_is_high_risk() {
    init_test_logger();
    let model = RiskModel::standard().unwrap();
    let stats = analyze(&wound_photo(), Region::new(100, 100, 400, 100)).unwrap();
    assert_eq!(stats.mean, [150.0, 60.0, 55.0]);
    assert_eq!(stats.std_dev, [3.0, 0.0, 0.0]);
    assert_eq!(stats.area_cm2, 4.0);

    let assessment = Assessment::new(&model, stats, findings(0.0, 3.0, 6.0));
    assert_eq!(assessment.inputs.red_std_dev, 3.0);
    assert_eq!(assessment.stratum, RiskStratum::High);
    assert_eq!(assessment.traffic_light, TrafficLight::Red);
    assert_close(assessment.risk.value, 2.533333333333333);
}

#[test]
fn small_uniform_lesion_with_normal_sensitivity_is_low_risk() {
    let model = RiskModel::standard().unwrap();
    let img = RgbImage::from_pixel(50, 50, Rgb([200, 120, 110]));
    let stats = analyze(&img, Region::new(10, 10, 30, 30)).unwrap();
    assert_close(stats.area_cm2, 0.09);

    let assessment = Assessment::new(&model, stats, findings(6.0, 2.0, 6.0));
    assert_eq!(assessment.stratum, RiskStratum::Low);
    assert_eq!(assessment.traffic_light, TrafficLight::Green);
    assert_close(assessment.risk.value, 1.433333333333334);
}

#[test]
fn medium_wound_with_reduced_sensitivity_is_moderate() {
    let model = RiskModel::standard().unwrap();
    let img = RgbImage::from_pixel(200, 200, Rgb([180, 90, 80]));
    let stats = analyze(&img, Region::new(0, 0, 125, 100)).unwrap();
    assert_eq!(stats.area_cm2, 1.25);

    let assessment = Assessment::new(&model, stats, findings(3.0, 14.0, 7.75));
    assert_eq!(assessment.stratum, RiskStratum::Moderate);
    assert_eq!(assessment.risk.source, RiskSource::Inferred);
    assert_close(assessment.risk.value, 2.0);
}

#[test]
fn saved_photo_is_assessed_from_disk() {
    init_test_logger();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("visit.png");
    wound_photo().save(&path).unwrap();

    let assessment = Assessment::from_image_path(
        RiskModel::shared().unwrap(),
        &path,
        Region::new(100, 100, 400, 100),
        PixelScale::default(),
        findings(0.0, 3.0, 6.0),
    )
    .unwrap();
    assert_eq!(assessment.region.std_dev[0], 3.0);
    assert_eq!(assessment.stratum, RiskStratum::High);
}

#[test]
fn imaging_failures_reach_the_caller() {
    let model = RiskModel::standard().unwrap();
    let dir = tempfile::tempdir().unwrap();

    let missing = Assessment::from_image_path(
        &model,
        dir.path().join("absent.png"),
        Region::new(0, 0, 10, 10),
        PixelScale::default(),
        findings(6.0, 2.0, 6.0),
    );
    assert!(matches!(
        missing,
        Err(RiskError::Imaging(ImagingError::ImageNotFound { .. }))
    ));

    let path = dir.path().join("tiny.png");
    RgbImage::from_pixel(20, 20, Rgb([1, 2, 3])).save(&path).unwrap();
    let outside = Assessment::from_image_path(
        &model,
        &path,
        Region::new(40, 40, 10, 10),
        PixelScale::default(),
        findings(6.0, 2.0, 6.0),
    );
    assert!(matches!(
        outside,
        Err(RiskError::Imaging(ImagingError::EmptyRegion { .. }))
    ));
}
