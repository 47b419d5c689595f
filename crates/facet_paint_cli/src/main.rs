#![forbid(unsafe_code)]
//! `facet-paint`: render one frame and write it as PNG.
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use facet_paint::prelude::*;
use image::ImageFormat;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

/// Generate a still image of polygonal regions flooded with lit shapes.
#[derive(Debug, Parser)]
#[command(name = "facet-paint", version, about)]
struct Args {
    /// Output PNG path.
    #[arg(short, long, default_value = "facet-paint.png")]
    output: PathBuf,

    /// Canvas width in pixels.
    #[arg(long, default_value_t = 2048)]
    width: u32,

    /// Canvas height in pixels.
    #[arg(long, default_value_t = 2048)]
    height: u32,

    /// Generator seed; random when omitted.
    #[arg(short, long)]
    seed: Option<u64>,

    /// Composition name; random when omitted.
    #[arg(short, long)]
    composition: Option<String>,

    /// JSON file with compositions to use instead of the bundled set.
    #[arg(long)]
    compositions: Option<PathBuf>,

    /// Shape kind for the whole image ("triangle" or "circle"); random when omitted.
    #[arg(long)]
    shape: Option<ShapeKind>,

    /// Comma-separated hex colors used in order instead of a random palette.
    #[arg(long, value_delimiter = ',')]
    palette: Option<Vec<String>>,

    /// List the available compositions and exit.
    #[arg(long)]
    list: bool,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn load_compositions(path: Option<&PathBuf>) -> anyhow::Result<CompositionSet> {
    match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            CompositionSet::from_json(&json)
                .with_context(|| format!("parsing compositions from {}", path.display()))
        }
        None => Ok(CompositionSet::bundled()?),
    }
}

fn options_from_args(args: &Args, compositions: CompositionSet) -> PaintOptions {
    let mut options = PaintOptions::new()
        .with_dimensions(args.width, args.height)
        .with_compositions(compositions);
    if let Some(seed) = args.seed {
        options = options.with_seed(seed);
    }
    if let Some(name) = &args.composition {
        options = options.with_composition(name.clone());
    }
    if let Some(kind) = args.shape {
        options = options.with_shape_kind(kind);
    }
    if let Some(colors) = &args.palette {
        options = options.with_palette(colors.clone());
    }
    options
}

fn log_event(event: PaintEvent) {
    match event {
        PaintEvent::RegionPainted { index, name } => debug!("Painted region {index} '{name}'."),
        PaintEvent::Warning { context, message } => warn!("{context}: {message}"),
        _ => {}
    }
}

/// Paint one frame as described by `args` and write it to `args.output`.
fn render(args: &Args, compositions: CompositionSet) -> anyhow::Result<PaintReport> {
    let options = options_from_args(args, compositions);
    let mut sink = FnSink::new(log_event);
    let (image, report) = paint_to_image(&options, &mut sink).context("painting frame")?;

    image
        .save_with_format(&args.output, ImageFormat::Png)
        .with_context(|| format!("writing {}", args.output.display()))?;

    Ok(report)
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();

    let compositions = load_compositions(args.compositions.as_ref())?;
    if args.list {
        for name in compositions.names() {
            println!("{name}");
        }
        return Ok(());
    }

    let report = render(&args, compositions)?;
    info!(
        "Wrote {} ({} shapes, composition '{}', seed {}).",
        args.output.display(),
        report.total_shapes(),
        report.composition,
        report.seed
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_map_onto_paint_options() {
        let args = Args::try_parse_from([
            "facet-paint",
            "--width",
            "320",
            "--height",
            "200",
            "--seed",
            "9",
            "--composition",
            "towers",
            "--shape",
            "circle",
            "--palette",
            "#000000,#ffffff",
        ])
        .unwrap();

        let options = options_from_args(&args, CompositionSet::bundled().unwrap());
        assert_eq!(options.dimensions, (320, 200));
        assert_eq!(options.seed, Some(9));
        assert_eq!(options.composition.as_deref(), Some("towers"));
        assert_eq!(options.shape_kind, Some(ShapeKind::Circle));
        assert_eq!(
            options.palette,
            Some(vec!["#000000".to_string(), "#ffffff".to_string()])
        );
    }

    #[test]
    fn defaults_leave_choices_random() {
        let args = Args::try_parse_from(["facet-paint"]).unwrap();
        assert_eq!(args.output, PathBuf::from("facet-paint.png"));

        let options = options_from_args(&args, CompositionSet::bundled().unwrap());
        assert_eq!(options.dimensions, (2048, 2048));
        assert!(options.seed.is_none());
        assert!(options.shape_kind.is_none());
    }

    #[test]
    fn render_writes_a_png_of_the_requested_size() {
        let output = std::env::temp_dir().join(format!("facet-paint-{}.png", std::process::id()));
        let args = Args::try_parse_from([
            "facet-paint",
            "--width",
            "40",
            "--height",
            "24",
            "--seed",
            "3",
            "--output",
            output.to_str().unwrap(),
        ])
        .unwrap();

        let report = render(&args, CompositionSet::bundled().unwrap()).unwrap();
        assert_eq!(report.dimensions, (40, 24));

        let written = image::open(&output).unwrap();
        assert_eq!((written.width(), written.height()), (40, 24));
        std::fs::remove_file(&output).unwrap();
    }

    #[test]
    fn unknown_shape_is_rejected() {
        assert!(Args::try_parse_from(["facet-paint", "--shape", "hexagon"]).is_err());
    }
}
