use crate::config::load_config;
use crate::ir::{PathStyle, Scene};
use crate::render::{render_svg, write_output_png, write_output_svg};
use crate::route_dump::{RouteDump, write_route_dump};
use crate::routing::RouteOptions;
use crate::scene::route_scene_as;
use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "edger", version, about = "Route canvas edges as SVG paths")]
pub struct Args {
    /// Scene file (.json) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file. Defaults to stdout for SVG and JSON if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "output-format", alias = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config file (JSON or JSON5)
    #[arg(short = 'c', long = "config-file", alias = "configFile")]
    pub config: Option<PathBuf>,

    /// Edge style for every edge: straight, bezier, step or step-smart
    #[arg(short = 'p', long = "path-type", alias = "pathType")]
    pub path_type: Option<String>,

    /// Routing grid cell size for step-smart
    #[arg(short = 'g', long = "grid-size", alias = "gridSize")]
    pub grid_size: Option<f64>,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormat {
    Svg,
    Png,
    Json,
}

pub fn run() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let mut config = load_config(args.config.as_deref())?;
    if let Some(style) = args.path_type.as_deref() {
        config.path_type = Some(PathStyle::from(style));
    }
    if let Some(size) = args.grid_size {
        config.router.grid_size = size;
    }

    let input = read_input(args.input.as_deref())?;
    let scene = Scene::from_json(&input)?;
    let style = config.path_type.unwrap_or(scene.path_type);
    log::info!(
        "routing {} edges across {} nodes as {}",
        scene.edges.len(),
        scene.nodes.len(),
        style.as_str()
    );
    let routes = route_scene_as(&scene, style, RouteOptions::default(), &config.router)?;

    match args.output_format {
        OutputFormat::Svg => {
            let svg = render_svg(&scene, &routes, &config);
            write_output_svg(&svg, args.output.as_deref())?;
        }
        OutputFormat::Png => {
            let output = ensure_output(&args.output, "png")?;
            let svg = render_svg(&scene, &routes, &config);
            write_output_png(&svg, &output, &config.render)?;
        }
        OutputFormat::Json => match args.output.as_deref() {
            Some(path) => write_route_dump(path, &scene, &routes)?,
            None => println!("{}", RouteDump::from_routes(&scene, &routes).to_json()?),
        },
    }

    Ok(())
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

fn ensure_output(output: &Option<PathBuf>, ext: &str) -> Result<PathBuf> {
    if let Some(path) = output {
        return Ok(path.clone());
    }
    Err(anyhow::anyhow!(
        "Output path required for {} output",
        ext
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_short_flags() {
        let args = Args::try_parse_from([
            "edger", "-i", "scene.json", "-e", "json", "-p", "step-smart", "-g", "10",
        ])
        .expect("args parse");
        assert_eq!(args.input, Some(PathBuf::from("scene.json")));
        assert!(matches!(args.output_format, OutputFormat::Json));
        assert_eq!(args.path_type.as_deref(), Some("step-smart"));
        assert_eq!(args.grid_size, Some(10.0));
    }

    #[test]
    fn long_flags_accept_both_spellings() {
        let kebab = Args::try_parse_from([
            "edger",
            "--output-format",
            "png",
            "--config-file",
            "edger.json5",
            "--path-type",
            "step",
            "--grid-size",
            "15",
        ])
        .expect("args parse");
        let camel = Args::try_parse_from([
            "edger",
            "--outputFormat",
            "png",
            "--configFile",
            "edger.json5",
            "--pathType",
            "step",
            "--gridSize",
            "15",
        ])
        .expect("args parse");
        for args in [kebab, camel] {
            assert!(matches!(args.output_format, OutputFormat::Png));
            assert_eq!(args.config, Some(PathBuf::from("edger.json5")));
            assert_eq!(args.path_type.as_deref(), Some("step"));
            assert_eq!(args.grid_size, Some(15.0));
        }
    }

    #[test]
    fn png_needs_an_output_path() {
        assert!(ensure_output(&None, "png").is_err());
        let out = Some(PathBuf::from("out.png"));
        assert_eq!(ensure_output(&out, "png").expect("path"), PathBuf::from("out.png"));
    }
}
