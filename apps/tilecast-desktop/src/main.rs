mod platform;
mod splash;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tilecast_engine::{App, ControlConfig};
use tilecast_render::{RaycastRenderer, RenderConfig};
use tilecast_world::{Scene, SceneFile};
use tracing_subscriber::EnvFilter;

use crate::platform::WinitWindow;

#[derive(Parser)]
#[command(name = "tilecast-desktop", about = "Tile-map raycaster")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Frame width in pixels
    #[arg(long, default_value = "640")]
    width: u32,

    /// Frame height in pixels
    #[arg(long, default_value = "480")]
    height: u32,

    /// Window title
    #[arg(long, default_value = "tilecast")]
    title: String,

    /// Scene file (.yaml, .yml or .json); the built-in demo scene otherwise
    #[arg(long)]
    scene: Option<PathBuf>,

    /// Control tuning file (YAML)
    #[arg(long)]
    controls: Option<PathBuf>,

    /// Skip the intro splash images
    #[arg(long)]
    no_splash: bool,
}

fn load_scene(path: Option<&PathBuf>) -> Result<Scene> {
    let scene = match path {
        Some(path) => SceneFile::load(path)?.into_scene()?,
        None => tilecast_world::demo::demo_scene()?,
    };
    Ok(scene)
}

fn load_controls(path: Option<&PathBuf>) -> Result<ControlConfig> {
    let Some(path) = path else {
        return Ok(ControlConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading controls from {}", path.display()))?;
    Ok(serde_yaml::from_str(&text)?)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("tilecast-desktop starting");

    let mut scene = load_scene(cli.scene.as_ref())?;
    if cli.no_splash {
        scene.splash_images.clear();
    }
    let controls = load_controls(cli.controls.as_ref())?;

    let renderer = RaycastRenderer::new(RenderConfig::with_size(cli.width, cli.height))?;
    let window = WinitWindow::new(&cli.title, cli.width, cli.height)?;

    let mut app = App::new(cli.title.clone(), window, renderer, scene).with_controls(controls);
    let status = app.run();
    if status != 0 {
        anyhow::bail!("{} exited with status {status}", cli.title);
    }
    Ok(())
}
