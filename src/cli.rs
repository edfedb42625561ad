use crate::config::load_config;
use crate::layout::WordCloud;
use crate::parser::parse_words;
use crate::render::{render_svg, write_output_json, write_output_png, write_output_svg};
use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "wclr", version, about = "Word cloud layout engine in Rust")]
pub struct Args {
    /// Input word list (lines of `text,weight` or a JSON array), '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file (svg/png/json). Defaults to stdout for SVG/JSON if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config JSON file
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Container width
    #[arg(short = 'w', long = "width", default_value_t = 800.0)]
    pub width: f32,

    /// Container height
    #[arg(short = 'H', long = "height", default_value_t = 600.0)]
    pub height: f32,

    /// Seed for rotation and color choices
    #[arg(long = "seed")]
    pub seed: Option<u32>,

    /// Run occupancy tracking and the placement search on a worker thread
    #[arg(long = "offload")]
    pub offload: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormat {
    Svg,
    Png,
    Json,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    let mut config = load_config(args.config.as_deref())?;
    config.cloud.width = args.width;
    config.cloud.height = args.height;
    if let Some(seed) = args.seed {
        config.cloud.seed = seed;
    }

    let input = read_input(args.input.as_deref())?;
    let words = parse_words(&input)?;

    let render_config = config.render;
    let (container_width, container_height) = (config.cloud.width, config.cloud.height);
    let cloud = WordCloud::new(config.cloud)?;
    let placed = if args.offload {
        cloud.run_offloaded(&words)?
    } else {
        cloud.run(&words)?
    };

    match args.output_format {
        OutputFormat::Svg => {
            let svg = render_svg(&placed, container_width, container_height, &render_config);
            write_output_svg(&svg, args.output.as_deref())?;
        }
        OutputFormat::Png => {
            let svg = render_svg(&placed, container_width, container_height, &render_config);
            let output = ensure_output(&args.output, "png")?;
            write_output_png(&svg, &output, container_width, container_height)?;
        }
        OutputFormat::Json => {
            write_output_json(&placed, args.output.as_deref())?;
        }
    }

    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path {
        if path == Path::new("-") {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            return Ok(buf);
        }
        return Ok(std::fs::read_to_string(path)?);
    }

    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

fn ensure_output(output: &Option<PathBuf>, ext: &str) -> Result<PathBuf> {
    if let Some(path) = output {
        return Ok(path.clone());
    }
    Err(anyhow::anyhow!("Output path required for {} output", ext))
}
