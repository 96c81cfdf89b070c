//! Command-line driver: `poisson_image <config.json>` or
//! `poisson_image <input image> <output.png>`.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use log::info;
use poisson_image::{RunConfig, load_config, reconstruct};

fn parse_args() -> Result<RunConfig> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.as_slice() {
        [config] => load_config(&PathBuf::from(config)),
        [input, output] => Ok(RunConfig::from_paths(
            PathBuf::from(input),
            PathBuf::from(output),
        )),
        _ => bail!("usage: poisson_image <config.json> | <input image> <output.png>"),
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let config = parse_args()?;
    let params = config.solver.params();

    let source = image::open(&config.input_path)
        .with_context(|| format!("failed to open {}", config.input_path.display()))?
        .into_luma8();
    info!(
        "solving {}x{} pixels with {} walks, epsilon {}, max steps {}",
        source.width(),
        source.height(),
        params.walks,
        params.budget.epsilon,
        params.budget.max_steps
    );

    let started = Instant::now();
    let result = reconstruct(&source, params, config.solver.seed)?;
    let elapsed = started.elapsed();

    result
        .image
        .save(&config.output_path)
        .with_context(|| format!("failed to save {}", config.output_path.display()))?;

    println!(
        "output written to {} ({} pixels, {} failed, {}/{} walks truncated, {:.2}s)",
        config.output_path.display(),
        result.image.width() as u64 * result.image.height() as u64,
        result.failed_pixels,
        result.truncated_walks,
        result.total_walks,
        elapsed.as_secs_f64()
    );
    Ok(())
}
