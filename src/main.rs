use prior_box::prelude::*;

fn main() {
    // Demo stub: generates priors for a single 64-pixel scale over a
    // 256x256 image and prints the first box.
    let generator = PriorBoxGenerator::new(PriorBoxConfig {
        scales: vec![64],
        ..Default::default()
    })
    .expect("valid config");

    let grid = GridExtent { w: 8, h: 8 };
    let image = ImageExtent { w: 256, h: 256 };
    let mut buffer = generator.alloc_buffer(grid);

    match generator.generate(grid, image, &mut buffer) {
        Ok(written) => println!(
            "boxes={} first={:?}",
            written / 4,
            &buffer.mean()[..4]
        ),
        Err(e) => eprintln!("Error: {e}"),
    }
}
