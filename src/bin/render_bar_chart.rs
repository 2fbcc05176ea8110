use std::fs;
use std::path::PathBuf;
use std::rc::Rc;

use barchart_rs::core::BoxSize;
use barchart_rs::render::SvgRenderer;
use barchart_rs::sizing::ContainerElement;
use barchart_rs::{BarChart, BarChartConfig};

const DEFAULT_WIDTH: u32 = 800;
const DEFAULT_HEIGHT: u32 = 600;

struct FixedContainer(BoxSize);

impl ContainerElement for FixedContainer {
    fn bounding_box(&self) -> Option<BoxSize> {
        Some(self.0)
    }
}

struct CliArgs {
    config_path: PathBuf,
    output_path: PathBuf,
    width: u32,
    height: u32,
}

fn main() {
    let _ = barchart_rs::telemetry::init_default_tracing();
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = parse_args()?;
    let raw = fs::read_to_string(&args.config_path).map_err(|err| {
        format!(
            "failed to read config `{}`: {err}",
            args.config_path.display()
        )
    })?;
    let config = BarChartConfig::from_json_str(&raw).map_err(|err| err.to_string())?;

    let container: Rc<dyn ContainerElement> = Rc::new(FixedContainer(BoxSize::new(
        f64::from(args.width),
        f64::from(args.height),
    )));
    let mut chart = BarChart::new(config, Some(container)).map_err(|err| err.to_string())?;
    chart.recompute();

    let is_png = args
        .output_path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
    if is_png {
        write_png(&mut chart, &args)?;
    } else {
        let mut renderer = SvgRenderer::new();
        chart
            .render(&mut renderer)
            .map_err(|err| format!("render failed: {err}"))?;
        fs::write(&args.output_path, renderer.into_document()).map_err(|err| {
            format!(
                "failed to write svg `{}`: {err}",
                args.output_path.display()
            )
        })?;
    }

    println!(
        "rendered {} bar(s) -> {}",
        chart.data().len(),
        args.output_path.display()
    );
    Ok(())
}

#[cfg(feature = "cairo-backend")]
fn write_png(chart: &mut BarChart, args: &CliArgs) -> Result<(), String> {
    use barchart_rs::render::{CairoRenderer, Color};

    let width = i32::try_from(args.width).map_err(|_| "width overflows i32".to_owned())?;
    let height = i32::try_from(args.height).map_err(|_| "height overflows i32".to_owned())?;
    let mut renderer =
        CairoRenderer::new(width, height).map_err(|err| format!("renderer init failed: {err}"))?;
    renderer
        .set_background(Color::rgb(1.0, 1.0, 1.0))
        .map_err(|err| err.to_string())?;
    chart
        .render(&mut renderer)
        .map_err(|err| format!("render failed: {err}"))?;
    renderer
        .write_png(&args.output_path)
        .map_err(|err| err.to_string())
}

#[cfg(not(feature = "cairo-backend"))]
fn write_png(_chart: &mut BarChart, _args: &CliArgs) -> Result<(), String> {
    Err("png output requires feature `cairo-backend`".to_owned())
}

fn parse_args() -> Result<CliArgs, String> {
    let mut config_path: Option<PathBuf> = None;
    let mut output_path: Option<PathBuf> = None;
    let mut width = DEFAULT_WIDTH;
    let mut height = DEFAULT_HEIGHT;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --config".to_owned())?;
                config_path = Some(PathBuf::from(value));
            }
            "--output" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --output".to_owned())?;
                output_path = Some(PathBuf::from(value));
            }
            "--width" => width = parse_pixels(args.next(), "--width")?,
            "--height" => height = parse_pixels(args.next(), "--height")?,
            "--help" | "-h" => {
                println!("{}", usage_message());
                std::process::exit(0);
            }
            _ => {
                return Err(format!("unknown argument `{arg}`\n\n{}", usage_message()));
            }
        }
    }

    Ok(CliArgs {
        config_path: config_path
            .ok_or_else(|| format!("--config is required\n\n{}", usage_message()))?,
        output_path: output_path
            .ok_or_else(|| format!("--output is required\n\n{}", usage_message()))?,
        width,
        height,
    })
}

fn parse_pixels(value: Option<String>, flag: &str) -> Result<u32, String> {
    let value = value.ok_or_else(|| format!("missing value for {flag}"))?;
    value
        .parse()
        .map_err(|_| format!("{flag} expects a positive integer, got `{value}`"))
}

fn usage_message() -> String {
    format!(
        "Usage: cargo run --bin render_bar_chart -- --config <path> --output <path> [options]\n\nOptions:\n  --config <path>   Bar chart config JSON (camelCase keys)\n  --output <path>   Output file; `.png` needs feature `cairo-backend`, anything else is SVG\n  --width <px>      Container width (default: {DEFAULT_WIDTH})\n  --height <px>     Container height (default: {DEFAULT_HEIGHT})\n  -h, --help        Show this message"
    )
}
