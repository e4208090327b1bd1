use std::path::PathBuf;

use clap::{Parser, Subcommand};
use sketchconfig::{AntialiasSetting, WindowSize};

#[derive(Parser, Debug)]
#[command(
    name = "raysketch",
    author,
    version,
    about = "Interactive raymarched sphere sketch",
    arg_required_else_help = false
)]
pub struct Cli {
    /// Sketch configuration file (TOML). Defaults to `<config dir>/sketch.toml`.
    #[arg(long, global = true, env = "RAYSKETCH_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,
    #[command(flatten)]
    pub run: RunArgs,
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Window size in physical pixels (e.g. `1280x720`).
    #[arg(long, value_name = "WIDTHxHEIGHT", value_parser = parse_size)]
    pub size: Option<WindowSize>,

    /// Optional FPS cap (0=uncapped).
    #[arg(long, value_name = "FPS", value_parser = parse_fps)]
    pub fps: Option<f32>,

    /// Anti-aliasing policy: `auto`, `off`, or an explicit MSAA sample count (e.g. `4`).
    #[arg(long, value_name = "MODE", value_parser = parse_antialias)]
    pub antialias: Option<AntialiasSetting>,

    /// GLSL fragment body defining `vec4 shade(vec2 uv)` to use instead of the bundled raymarcher.
    #[arg(long, value_name = "FILE")]
    pub shader: Option<PathBuf>,

    /// How long the pointer must be held before the content advances.
    #[arg(long = "hold-ms", value_name = "MILLISECONDS", value_parser = parse_hold_ms)]
    pub hold_ms: Option<u64>,

    /// Start with the render loop stopped; press Space to resume.
    #[arg(long)]
    pub paused: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Inspect the content list the sketch cycles through.
    Content(ContentCommand),
    /// Inspect configuration locations.
    Config(ConfigCommand),
}

#[derive(Parser, Debug)]
pub struct ContentCommand {
    #[command(subcommand)]
    pub action: ContentAction,
}

#[derive(Subcommand, Debug)]
pub enum ContentAction {
    /// Print the titles, subtitles, and colors in presentation order.
    List {
        /// Emit JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
}

#[derive(Parser, Debug)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the config file that would be loaded and whether it exists.
    Where,
}

pub fn parse() -> Cli {
    Cli::parse()
}

pub fn parse_size(value: &str) -> Result<WindowSize, String> {
    value.parse()
}

pub fn parse_antialias(value: &str) -> Result<AntialiasSetting, String> {
    if value.trim().is_empty() {
        return Err("anti-alias mode must not be empty".to_string());
    }
    value.parse::<AntialiasSetting>().map_err(|_| {
        format!(
            "invalid anti-alias mode '{}'; use auto/off or 2/4/8/16",
            value.trim()
        )
    })
}

pub fn parse_fps(value: &str) -> Result<f32, String> {
    let fps: f32 = value
        .trim()
        .parse()
        .map_err(|_| format!("invalid fps '{}'", value.trim()))?;
    if !fps.is_finite() || fps < 0.0 {
        return Err("fps must be a non-negative number".to_string());
    }
    Ok(fps)
}

pub fn parse_hold_ms(value: &str) -> Result<u64, String> {
    let millis: u64 = value
        .trim()
        .parse()
        .map_err(|_| format!("invalid hold duration '{}'", value.trim()))?;
    if millis == 0 {
        return Err("hold duration must be greater than zero".to_string());
    }
    Ok(millis)
}
