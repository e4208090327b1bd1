mod cli;
mod paths;
mod run;

use std::path::Path;

use anyhow::{Context, Result};
use cli::{Command, ConfigAction, ContentAction};
use paths::{ConfigLocation, ConfigOrigin};

fn main() -> Result<()> {
    let cli = cli::parse();
    run::initialise_tracing();

    let config_path = cli.config.as_deref();
    match cli.command {
        Some(Command::Content(content)) => match content.action {
            ContentAction::List { json } => run_content_list(config_path, json),
        },
        Some(Command::Config(config)) => match config.action {
            ConfigAction::Where => run_config_where(config_path),
        },
        None => run::run(config_path, cli.run),
    }
}

fn run_content_list(config_path: Option<&Path>, json: bool) -> Result<()> {
    let config = run::load_config(config_path)?;
    let entries = config.content_entries();

    if json {
        let rendered =
            serde_json::to_string_pretty(&entries).context("failed to serialise content list")?;
        println!("{rendered}");
        return Ok(());
    }

    println!("Content ({} items):", entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let [r, g, b] = entry.color;
        println!(
            "  {index:>2}  {:<16} {:<36} color=({r:.2}, {g:.2}, {b:.2})",
            entry.title, entry.subtitle
        );
    }
    Ok(())
}

fn run_config_where(config_path: Option<&Path>) -> Result<()> {
    let location = ConfigLocation::resolve(config_path)?;
    let origin = match location.origin {
        ConfigOrigin::Explicit => "explicit",
        ConfigOrigin::Default => "default",
    };
    let status = if location.path.exists() {
        "present"
    } else {
        "missing"
    };
    println!("Configuration file:");
    println!("  path:   {}", location.path.display());
    println!("  source: {origin}");
    println!("  status: {status}");
    Ok(())
}
