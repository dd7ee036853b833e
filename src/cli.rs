use crate::config::{Config, Offset, PlacementConfig, load_config};
use crate::ir::sample_requests;
use crate::parser::parse_points;
use crate::placement::place_labels_with_outcomes;
use crate::placement_dump::{format_report, write_placement_dump};
use crate::render::{render_svg, write_output_png, write_output_svg};
use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "lplace",
    version,
    about = "Greedy non-overlapping label placement for 2D points"
)]
pub struct Args {
    /// Point file (lines of 'x y label' or a JSON array) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file. Defaults to stdout for text, JSON and SVG.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "text")]
    pub output_format: OutputFormat,

    /// Config JSON file
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Label box width (world units)
    #[arg(long = "labelWidth")]
    pub label_width: Option<f64>,

    /// Label box height (world units)
    #[arg(long = "labelHeight")]
    pub label_height: Option<f64>,

    /// Gap between a point and its label; rebuilds the four corner offsets
    #[arg(long = "margin")]
    pub margin: Option<f64>,

    /// Image pixels per world unit (SVG/PNG)
    #[arg(long = "scale")]
    pub scale: Option<f64>,

    /// Use the built-in sample points instead of reading input
    #[arg(long = "sample", conflicts_with = "input")]
    pub sample: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Svg,
    Png,
}

pub fn run() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let (requests, mut config) = if args.sample {
        let base = match args.config.as_deref() {
            Some(path) => load_config(Some(path))?,
            None => Config::sample(),
        };
        (sample_requests(), base)
    } else {
        let input = read_input(args.input.as_deref())?;
        (parse_points(&input)?, load_config(args.config.as_deref())?)
    };
    apply_overrides(&mut config, &args);

    let (result, outcomes) = place_labels_with_outcomes(&requests, &config.placement)?;

    match args.output_format {
        OutputFormat::Text => {
            let report = format_report(&requests, &outcomes);
            write_text(&report, args.output.as_deref())?;
        }
        OutputFormat::Json => {
            write_placement_dump(
                args.output.as_deref(),
                &requests,
                &outcomes,
                &config.placement,
            )?;
        }
        OutputFormat::Svg => {
            let svg = render_svg(&requests, &result, &config.theme, &config.render);
            write_output_svg(&svg, args.output.as_deref())?;
        }
        OutputFormat::Png => {
            let output = ensure_output(&args.output, "png")?;
            let svg = render_svg(&requests, &result, &config.theme, &config.render);
            write_output_png(&svg, &output, &config.render)?;
        }
    }

    Ok(())
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("point_labeler=info"));
    // Already installed is fine.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn apply_overrides(config: &mut Config, args: &Args) {
    if args.label_width.is_some() || args.label_height.is_some() || args.margin.is_some() {
        let width = args.label_width.unwrap_or(config.placement.label_width);
        let height = args.label_height.unwrap_or(config.placement.label_height);
        config.placement = match args.margin {
            Some(margin) => PlacementConfig::four_corner(width, height, margin),
            None => resize_offsets(&config.placement, width, height),
        };
    }
    if let Some(scale) = args.scale {
        config.render.scale = scale;
    }
}

/// Keep each offset's side of the anchor when the label size changes.
///
/// Offsets that pushed the box to the left/below by the old size are shifted
/// by the size difference, so the gap to the anchor stays the same.
fn resize_offsets(placement: &PlacementConfig, width: f64, height: f64) -> PlacementConfig {
    let dw = width - placement.label_width;
    let dh = height - placement.label_height;
    let offsets = placement
        .offsets
        .iter()
        .map(|o| {
            let dx = if o.dx < 0.0 { o.dx - dw } else { o.dx };
            let dy = if o.dy < 0.0 { o.dy - dh } else { o.dy };
            Offset::new(dx, dy)
        })
        .collect();
    PlacementConfig {
        label_width: width,
        label_height: height,
        offsets,
    }
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path {
        if path != Path::new("-") {
            return Ok(std::fs::read_to_string(path)?);
        }
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

fn write_text(text: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => std::fs::write(path, text)?,
        None => print!("{text}"),
    }
    Ok(())
}

fn ensure_output(output: &Option<PathBuf>, ext: &str) -> Result<PathBuf> {
    if let Some(path) = output {
        return Ok(path.clone());
    }
    Err(anyhow::anyhow!("Output path required for {} output", ext))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["lplace"];
        argv.extend_from_slice(extra);
        Args::parse_from(argv)
    }

    #[test]
    fn parses_flags() {
        let args = args(&["-i", "pts.txt", "-e", "svg", "--scale", "40"]);
        assert_eq!(args.input, Some(PathBuf::from("pts.txt")));
        assert_eq!(args.output_format, OutputFormat::Svg);
        assert_eq!(args.scale, Some(40.0));
        assert_eq!(args.label_width, None);
    }

    #[test]
    fn sample_conflicts_with_input() {
        let parsed = Args::try_parse_from(["lplace", "--sample", "-i", "pts.txt"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn margin_override_rebuilds_four_corners() {
        let mut config = Config::default();
        let args = args(&["--labelWidth", "2", "--margin", "0.5"]);
        apply_overrides(&mut config, &args);
        assert_eq!(config.placement, PlacementConfig::four_corner(2.0, 2.0, 0.5));
    }

    #[test]
    fn size_override_keeps_margin() {
        let mut config = Config::default();
        let args = args(&["--labelWidth", "2", "--labelHeight", "1"]);
        apply_overrides(&mut config, &args);
        assert_eq!(config.placement, PlacementConfig::four_corner(2.0, 1.0, 1.0));
    }

    #[test]
    fn no_override_leaves_custom_offsets_alone() {
        let mut config = Config::default();
        config.placement.offsets = vec![Offset::new(-3.0, 2.0)];
        apply_overrides(&mut config, &args(&[]));
        assert_eq!(config.placement.offsets, vec![Offset::new(-3.0, 2.0)]);
    }
}
