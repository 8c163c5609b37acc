use otsu_binarize::codec::{read_image, write_image};
use otsu_binarize::io::{default_output_path, DEFAULT_JPEG_QUALITY};
use otsu_binarize::{threshold_and_binarize, BinarizeParams};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    otsu_binarize::core::init_from_env(log::LevelFilter::Info)?;

    let Some(path) = std::env::args().nth(1) else {
        eprintln!("Usage: binarize_jpeg <image_path>");
        return Ok(());
    };

    let buffer = read_image(&path)?;
    let res = threshold_and_binarize(buffer, &BinarizeParams::default())?;

    let out = default_output_path(&path);
    write_image(&res.buffer, &out, DEFAULT_JPEG_QUALITY)?;
    println!(
        "threshold {} (variance {:.1}) -> {}",
        res.outcome.threshold.get(),
        res.outcome.between_class_variance,
        out.display()
    );
    Ok(())
}
