use std::path::{Path, PathBuf};
use std::process;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde_json::json;
use tessel::common::config::{Config, config_file};
use tessel::common::log;
use tessel::layout_engine::LayoutEngine;
use tessel::model::Scene;
use tessel::sys::desktop::{MonitorId, WindowId, WorkspaceId};
use tessel::sys::geometry::Rect;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "tessel")]
#[command(about = "Pack windows into rows and report what does not fit")]
struct Cli {
    /// Config file to use instead of ~/.tessel.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a layout pass over a workspace of a scene file
    Tile {
        scene: PathBuf,
        #[arg(long, default_value_t = 0)]
        workspace: u32,
        /// Window whose change triggered the pass; evicted on overflow
        #[arg(long)]
        reference: Option<u32>,
    },
    /// Test whether a window of the given size fits a workspace
    Fit {
        scene: PathBuf,
        #[arg(long, default_value_t = 0)]
        workspace: u32,
        #[arg(long, default_value_t = 0)]
        monitor: u32,
        #[arg(long)]
        width: i32,
        #[arg(long)]
        height: i32,
    },
    /// Validate a config file
    CheckConfig {
        path: Option<PathBuf>,
        /// Write back the file with invalid values reset
        #[arg(long)]
        fix: bool,
    },
}

fn main() {
    let cli: Cli = Parser::parse();
    log::init_logging();

    if let Err(err) = run(cli) {
        eprintln!("error: {err:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Tile { scene, workspace, reference } => {
            let config = load_config(cli.config.as_deref())?;
            let mut scene = read_scene(&scene)?;
            let mut engine = LayoutEngine::new(&config.settings, scene.workspace_count());
            let reports = engine.arrange(
                &mut scene,
                WorkspaceId::new(workspace),
                reference.map(WindowId::new),
            )?;
            print_json(&json!({ "reports": reports, "events": scene.events() }))
        }
        Commands::Fit {
            scene,
            workspace,
            monitor,
            width,
            height,
        } => {
            let config = load_config(cli.config.as_deref())?;
            let scene = read_scene(&scene)?;
            let engine = LayoutEngine::new(&config.settings, scene.workspace_count());
            let fits = engine.test_window_fit(
                &scene,
                Rect::new(0, 0, width, height),
                WorkspaceId::new(workspace),
                MonitorId::new(monitor),
            );
            print_json(&json!({ "fits": fits }))
        }
        Commands::CheckConfig { path, fix } => {
            let path = match path.or(cli.config) {
                Some(path) => path,
                None => config_file().context("could not determine the home directory")?,
            };
            let mut config = Config::read(&path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            let issues = config.validate();
            for issue in &issues {
                warn!("{issue}");
            }
            if fix && !issues.is_empty() {
                let fixes = config.auto_fix_values();
                config.save(&path)?;
                info!(fixes, path = %path.display(), "config rewritten");
            }
            print_json(&json!({ "path": path, "issues": issues }))
        }
    }
}

fn load_config(explicit: Option<&Path>) -> anyhow::Result<Config> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match config_file() {
            Some(path) if path.exists() => path,
            _ => return Ok(Config::default()),
        },
    };
    let mut config = Config::read(&path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    for issue in config.validate() {
        warn!(path = %path.display(), "{issue}");
    }
    let fixes = config.auto_fix_values();
    if fixes > 0 {
        warn!(fixes, "reset invalid config values to defaults");
    }
    Ok(config)
}

fn read_scene(path: &Path) -> anyhow::Result<Scene> {
    Scene::read(path).with_context(|| format!("failed to read scene {}", path.display()))
}

fn print_json(value: &serde_json::Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
