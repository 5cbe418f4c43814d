//! Render annotation records to an SVG overlay on stdout.
//!
//! Usage: `render_svg [annotations.json] [config.json]`
//!
//! Without arguments a built-in sample is rendered. Selection is simulated
//! by selecting the first annotation and hovering the last one.

#[cfg(not(target_arch = "wasm32"))]
const SAMPLE: &str = r#"[
    {"id": 7, "bbox": [10, 20, 30, 40], "score": 0.93,
     "polygon": {"has_segmentation": true, "polygons": [[[10, 20], [40, 20], [40, 60], [10, 60]]]}},
    {"id": 8, "bbox": [50, 10, 40, 30],
     "polygon": {"has_segmentation": true, "polygons": [[[50, 10], [90, 10], [70, 40]]]}},
    {"id": 9, "bbox": [20, 70, 60, 20]}
]"#;

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    use segview::{OverlayConfig, SelectionContext, Size, Viewport, parse_records};

    let mut args = std::env::args().skip(1);
    let records = match args.next() {
        Some(path) => std::fs::read_to_string(path)?,
        None => SAMPLE.to_string(),
    };
    let config = match args.next() {
        Some(path) => OverlayConfig::load(path)?,
        None => OverlayConfig::new(),
    };

    env_logger::Builder::new()
        .filter_level(config.log_level.to_level_filter())
        .parse_default_env()
        .init();

    let annotations = parse_records(&records)?;
    let renderer = config.renderer()?;
    let viewport = Viewport::fit_width(Size::new(100.0, 100.0), 400.0);

    let selection = SelectionContext::new()
        .with_selected(annotations.first().map(|a| a.id))
        .with_hovered(annotations.last().map(|a| a.id));

    let mut options = config.display;
    options.show_bounding_boxes = true;
    options.show_labels = true;
    options.show_scores = true;

    let list = renderer.render(&annotations, &viewport, &selection, &options);
    log::info!("Rendered {} draw items", list.len());
    println!("{}", list.to_svg());
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {}
