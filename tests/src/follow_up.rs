use image::{Rgb, RgbImage};
use medi_footcare::{Assessment, ClinicalFindings, Delta, RiskModel, RiskStratum};
use medi_imaging::{analyze, Region, RegionStatistics};
use pretty_assertions::assert_eq;

fn findings() -> ClinicalFindings {
    ClinicalFindings {
        sensitivity: 0.0,
        secretion: 0.0,
        erythema: 0.0,
        elapsed_days: 10.0,
        glycemic_control: 6.0,
    }
}

fn region_of(width: u32, height: u32) -> RegionStatistics {
    let img = RgbImage::from_pixel(500, 500, Rgb([170, 80, 70]));
    analyze(&img, Region::new(0, 0, width, height)).unwrap()
}

#[test]
fn healing_wound_shows_shrinking_area() {
    let model = RiskModel::standard().unwrap();

    let first = Assessment::new(&model, region_of(400, 100), findings());
    assert_eq!(first.stratum, RiskStratum::High);

    let second = Assessment::new(&model, region_of(200, 100), findings()).with_previous(&first);
    let evolution = second.evolution.unwrap();
    assert_eq!(evolution.area_delta, Some(Delta(-2.0)));
    assert_eq!(evolution.area_note(), " (-2.00)");
    // Uniform images have no red spread, so there is nothing to compare.
    assert_eq!(evolution.red_std_dev_delta, None);
    assert_eq!(evolution.red_std_dev_note(), "");
}

#[test]
fn several_images_use_the_last_one() {
    let model = RiskModel::standard().unwrap();
    let images = [region_of(400, 100), region_of(20, 20)];
    let assessment = Assessment::from_images(&model, &images, findings()).unwrap();
    assert_eq!(assessment.inputs.area_cm2, 0.04);
    assert_eq!(assessment.region.pixel_count, 400);
}
