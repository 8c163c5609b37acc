use otsu_binarize::codec::{binarize_file, read_image, write_image, CodecError};
use otsu_binarize::core::BinarizeError;
use otsu_binarize::io::{BinarizeConfig, BinarizeReport};
use otsu_binarize::PixelBuffer;
use std::path::Path;

fn write_gray_png(path: &Path, width: u32, height: u32, data: Vec<u8>) {
    image::GrayImage::from_raw(width, height, data)
        .expect("gray buffer")
        .save(path)
        .expect("save png");
}

#[test]
fn png_round_trip_preserves_samples() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rgb.png");
    let buf = PixelBuffer::rgb(2, 2, (0..12).map(|i| i * 20).collect()).unwrap();
    write_image(&buf, &path, 100).unwrap();
    assert_eq!(read_image(&path).unwrap(), buf);
}

#[test]
fn binarizes_png_file_and_writes_report() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("two.png");
    write_gray_png(&input, 2, 1, vec![10, 200]);

    let mut config = BinarizeConfig::for_image(input.to_string_lossy());
    config.report_path = Some(dir.path().join("report.json").to_string_lossy().into_owned());

    let report = binarize_file(&config).unwrap();
    assert_eq!(report.threshold, 11);

    let output = dir.path().join("Result_two.png");
    assert_eq!(Path::new(&report.output_path), output);
    let out = read_image(&output).unwrap();
    assert_eq!(out.data, vec![0, 255]);

    let saved = BinarizeReport::load_json(dir.path().join("report.json")).unwrap();
    assert_eq!(saved, report);
}

#[test]
fn jpeg_output_keeps_shape_and_color_type() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("halves.png");
    let (w, h) = (32u32, 16u32);
    let data: Vec<u8> = (0..w * h)
        .map(|i| if i % w < w / 2 { 30 } else { 220 })
        .collect();
    write_gray_png(&input, w, h, data);

    let mut config = BinarizeConfig::for_image(input.to_string_lossy());
    config.output_path = Some(dir.path().join("out.jpg").to_string_lossy().into_owned());
    let report = binarize_file(&config).unwrap();
    assert_eq!(report.threshold, 31);

    let out = read_image(dir.path().join("out.jpg")).unwrap();
    assert_eq!((out.width, out.height, out.channels), (32, 16, 1));
}

#[test]
fn rgba_input_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("rgba.png");
    image::RgbaImage::from_raw(1, 1, vec![1, 2, 3, 4])
        .unwrap()
        .save(&input)
        .unwrap();

    let err = binarize_file(&BinarizeConfig::for_image(input.to_string_lossy())).unwrap_err();
    assert!(matches!(
        err,
        CodecError::Binarize(BinarizeError::UnsupportedChannelCount { channels: 4 })
    ));
    assert!(!dir.path().join("Result_rgba.png").exists());
}

#[test]
fn sixteen_bit_png_is_rejected_by_color_type() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("deep.png");
    image::ImageBuffer::<image::Luma<u16>, _>::from_raw(2, 1, vec![1000u16, 50000])
        .unwrap()
        .save(&input)
        .unwrap();

    let err = read_image(&input).unwrap_err();
    assert!(matches!(
        err,
        CodecError::UnsupportedColorType(image::ColorType::L16)
    ));
}
