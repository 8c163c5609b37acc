use assert_cmd::Command;
use otsu_binarize::io::{BinarizeConfig, BinarizeReport};
use predicates::prelude::*;

fn write_gray_png(path: &std::path::Path, width: u32, height: u32, data: Vec<u8>) {
    image::GrayImage::from_raw(width, height, data)
        .expect("gray buffer")
        .save(path)
        .expect("save png");
}

#[test]
fn binarizes_input_to_default_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("scan.png");
    write_gray_png(&input, 2, 1, vec![10, 200]);

    Command::cargo_bin("otsu-binarize")
        .unwrap()
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("threshold 11"));

    let out = image::open(dir.path().join("Result_scan.png"))
        .unwrap()
        .to_luma8();
    assert_eq!(out.into_raw(), vec![0, 255]);
}

#[test]
fn runs_from_json_config() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("black.png");
    write_gray_png(&input, 2, 2, vec![0; 4]);

    let mut config = BinarizeConfig::for_image(input.to_string_lossy());
    config.output_path = Some(dir.path().join("out.png").to_string_lossy().into_owned());
    let config_path = dir.path().join("config.json");
    config.write_json(&config_path).unwrap();
    let report_path = dir.path().join("report.json");

    Command::cargo_bin("otsu-binarize")
        .unwrap()
        .arg("--config")
        .arg(&config_path)
        .arg("--report")
        .arg(&report_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("threshold 1 ->"));

    let report = BinarizeReport::load_json(&report_path).unwrap();
    assert_eq!(report.threshold, 1);
    assert_eq!(report.histogram[0], 4);

    let out = image::open(dir.path().join("out.png")).unwrap().to_luma8();
    assert_eq!(out.into_raw(), vec![0; 4]);
}

#[test]
fn unsupported_image_fails() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("rgba.png");
    image::RgbaImage::from_raw(1, 1, vec![1, 2, 3, 4])
        .unwrap()
        .save(&input)
        .unwrap();

    Command::cargo_bin("otsu-binarize")
        .unwrap()
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("UnsupportedChannelCount { channels: 4 }"));
}

#[test]
fn requires_input_or_config() {
    Command::cargo_bin("otsu-binarize")
        .unwrap()
        .assert()
        .failure();
}

#[test]
fn rejects_out_of_range_quality() {
    Command::cargo_bin("otsu-binarize")
        .unwrap()
        .args(["in.jpg", "--quality", "0"])
        .assert()
        .failure();
}
