use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use ab_glyph::{FontRef, PxScale};
use clap::Parser;
use image::{DynamicImage, Rgb};
use imageproc::drawing::{draw_hollow_rect_mut, draw_text_mut};
use imageproc::rect::Rect;
use tracing::info;

use visionmatrix_core::consts::DEFAULT_PROB_THRESHOLD;
use visionmatrix_core::{ClassCatalog, Detection, Detector, Yolov8Config};

#[derive(Parser)]
#[command(name = "detect")]
#[command(about = "YOLOv8 object detection demo")]
struct Args {
    #[arg(help = "ONNX model file path")]
    model: PathBuf,

    #[arg(help = "Input image path")]
    image: PathBuf,

    #[arg(
        short,
        long,
        default_value_t = DEFAULT_PROB_THRESHOLD,
        help = "Confidence threshold"
    )]
    threshold: f32,

    #[arg(short, long, help = "Only report detections of this class")]
    class: Option<String>,

    #[arg(
        long,
        help = "JSON array of class names replacing the built-in COCO catalog"
    )]
    catalog: Option<PathBuf>,

    #[arg(short, long, help = "Write an annotated copy of the input image here")]
    output: Option<PathBuf>,

    #[arg(long, help = "TrueType font used to label boxes in the annotated copy")]
    font: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let catalog = match &args.catalog {
        Some(path) => ClassCatalog::from_json_slice(&fs::read(path)?)?,
        None => ClassCatalog::coco(),
    };
    info!(classes = catalog.len(), "class catalog ready");

    let mut detector = Detector::new(Yolov8Config::default(), catalog);
    detector.load_from_file(&args.model)?;
    info!("model loaded from {}", args.model.display());

    let image = image::open(&args.image)?;

    let start = std::time::Instant::now();
    let detections = match &args.class {
        Some(name) => detector.detect_class(&image, args.threshold, name)?,
        None => detector.detect(&image, args.threshold)?,
    };
    info!(
        count = detections.len(),
        elapsed_ms = start.elapsed().as_millis(),
        "detection finished"
    );

    println!("{}", serde_json::to_string_pretty(&detections)?);

    if let Some(output) = &args.output {
        draw_detections(&image, &detections, output, args.font.as_deref())?;
        info!("annotated image saved to {}", output.display());
    }

    Ok(())
}

/// Cycling palette for box outlines, one color per class index.
const PALETTE: [[u8; 3]; 6] = [
    [255, 0, 0],
    [0, 200, 0],
    [0, 96, 255],
    [255, 160, 0],
    [200, 0, 200],
    [0, 200, 200],
];

fn draw_detections(
    image: &DynamicImage,
    detections: &[Detection],
    output: &Path,
    font_path: Option<&Path>,
) -> Result<(), Box<dyn Error>> {
    let mut canvas = image.to_rgb8();

    let font_data = font_path.map(fs::read).transpose()?;
    let font = font_data
        .as_deref()
        .map(FontRef::try_from_slice)
        .transpose()?;

    for detection in detections {
        let x = detection.x as i32;
        let y = detection.y as i32;
        let width = detection.width as u32;
        let height = detection.height as u32;
        if width == 0 || height == 0 {
            continue;
        }

        let color = Rgb(PALETTE[detection.label % PALETTE.len()]);

        // Draw multiple rectangles to create thicker lines
        for offset in 0..3 {
            let rect = Rect::at(x - offset, y - offset)
                .of_size(width + (offset * 2) as u32, height + (offset * 2) as u32);
            draw_hollow_rect_mut(&mut canvas, rect, color);
        }

        if let Some(font) = &font {
            let label = format!("{} {:.2}", detection.class_name, detection.confidence);
            draw_text_mut(
                &mut canvas,
                color,
                x.max(5),
                y.max(0),
                PxScale::from(16.0),
                font,
                &label,
            );
        }
    }

    canvas.save(output)?;
    Ok(())
}
