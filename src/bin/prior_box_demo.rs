use prior_box::config::{load_config, RuntimeConfig};
use prior_box::{GridExtent, ImageExtent, PriorBoxGenerator};

use std::env;
use std::fs;
use std::path::Path;

#[derive(serde::Serialize)]
struct DemoReport {
    grid: GridExtent,
    image: ImageExtent,
    priors_per_cell: usize,
    plane_len: usize,
    values_written: usize,
    mean: Vec<f32>,
    variance: Vec<f32>,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let cfg: RuntimeConfig = load_config(Path::new(&config_path))?;

    let generator =
        PriorBoxGenerator::new(cfg.prior_box).map_err(|e| format!("Invalid prior-box config: {e}"))?;
    let mut buffer = generator.alloc_buffer(cfg.grid);
    let written = generator
        .generate(cfg.grid, cfg.image, &mut buffer)
        .map_err(|e| format!("Generation failed: {e}"))?;

    let report = DemoReport {
        grid: cfg.grid,
        image: cfg.image,
        priors_per_cell: generator.params().priors_per_cell(),
        plane_len: buffer.capacity(),
        values_written: written,
        mean: buffer.mean().to_vec(),
        variance: buffer.variance().to_vec(),
    };

    if let Some(path) = cfg.output.json_out.as_ref() {
        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| format!("Failed to serialize report: {e}"))?;
        fs::write(path, json)
            .map_err(|e| format!("Failed to write report {}: {e}", path.display()))?;
        println!("Saved prior-box report to {}", path.display());
    }
    println!(
        "boxes={} values={} plane_len={}",
        written / 4,
        written,
        report.plane_len
    );
    Ok(())
}

fn usage() -> String {
    "Usage: prior_box_demo <config.json>".to_string()
}
