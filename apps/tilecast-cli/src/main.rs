mod script;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tilecast_engine::{App, HeadlessWindow, ManualClock};
use tilecast_input::ScriptedInput;
use tilecast_render::{RaycastRenderer, RenderConfig, Renderer, cast_ray, column_angle};
use tilecast_world::{Scene, SceneFile};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tilecast-cli", about = "Headless tooling for the tilecast raycaster")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct SceneArg {
    /// Scene file (.yaml, .yml or .json); the built-in demo scene otherwise
    #[arg(long)]
    scene: Option<PathBuf>,
}

impl SceneArg {
    fn load(&self) -> anyhow::Result<Scene> {
        let scene = match &self.scene {
            Some(path) => SceneFile::load(path)?.into_scene()?,
            None => tilecast_world::demo::demo_scene()?,
        };
        Ok(scene)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info, plus a summary of the scene
    Info {
        #[command(flatten)]
        scene: SceneArg,
    },
    /// Render one frame of a scene to a PNG file
    Render {
        #[command(flatten)]
        scene: SceneArg,
        /// Output image path
        #[arg(short, long, default_value = "frame.png")]
        out: PathBuf,
        #[arg(long, default_value = "640")]
        width: u32,
        #[arg(long, default_value = "480")]
        height: u32,
    },
    /// Report the ray hit for evenly spaced screen columns
    Cast {
        #[command(flatten)]
        scene: SceneArg,
        /// Screen width the columns are taken from
        #[arg(long, default_value = "640")]
        width: u32,
        /// Number of columns to report
        #[arg(short, long, default_value = "9")]
        columns: u32,
    },
    /// Run the game loop headless against a scripted input sequence
    Simulate {
        #[command(flatten)]
        scene: SceneArg,
        /// Comma-separated frames, e.g. "w,w,a+m10,quit"
        #[arg(long, default_value = "quit")]
        script: String,
        /// Stop after this many frames even without a quit
        #[arg(long, default_value = "1000")]
        max_frames: u64,
        #[arg(long, default_value = "160")]
        width: u32,
        #[arg(long, default_value = "120")]
        height: u32,
        /// Skip the splash images; each splash otherwise consumes one script frame
        #[arg(long)]
        no_splash: bool,
    },
}

fn info(scene: &Scene) {
    println!("tilecast-cli v{}", env!("CARGO_PKG_VERSION"));
    println!("common: {}", tilecast_common::crate_info());
    println!("world: {}", tilecast_world::crate_info());
    println!("render: {}", tilecast_render::crate_info());
    println!("input: {}", tilecast_input::crate_info());
    println!("engine: {}", tilecast_engine::crate_info());
    println!(
        "map: {}x{} cells, cell size {}, {} walls",
        scene.map.width(),
        scene.map.height(),
        scene.map.cell_size(),
        scene.map.wall_count()
    );
    let p = &scene.player;
    println!(
        "player: ({:.3}, {:.3}) angle {:.3} fov {:.3}{}",
        p.x,
        p.y,
        p.angle,
        p.fov,
        if scene.player_in_open_cell() { "" } else { " (inside a wall)" }
    );
    println!("entities: {}", scene.entities.len());
    for splash in &scene.splash_images {
        println!("splash: {} for {} ms", splash.img_path, splash.display_ms);
    }
}

fn render(scene: &Scene, out: &PathBuf, width: u32, height: u32) -> anyhow::Result<()> {
    let mut renderer = RaycastRenderer::new(RenderConfig::with_size(width, height))?;
    renderer.init()?;
    let frame = renderer.render(scene);
    image::save_buffer(
        out,
        frame.as_bytes(),
        frame.width(),
        frame.height(),
        image::ExtendedColorType::Rgba8,
    )
    .with_context(|| format!("writing {}", out.display()))?;
    renderer.cleanup();
    println!("wrote {}x{} frame to {}", width, height, out.display());
    Ok(())
}

fn cast(scene: &Scene, width: u32, columns: u32) {
    let player = &scene.player;
    let origin = scene.map.to_cell_space(player.position());
    let max_len = RenderConfig::default().max_ray_length;
    let columns = columns.clamp(1, width.max(1));
    println!("column  angle    distance  perp      wall  cell");
    for i in 0..columns {
        let c = if columns == 1 {
            width / 2
        } else {
            i * (width - 1) / (columns - 1)
        };
        let angle = column_angle(player.angle, player.fov, c, width);
        let hit = cast_ray(&scene.map, origin, angle, player.angle, max_len);
        let wall = hit.wall.map_or_else(|| "-".to_string(), |w| w.to_string());
        println!(
            "{c:>6}  {angle:>7.4}  {:>8.4}  {:>8.4}  {wall:>4}  ({}, {})",
            hit.distance, hit.perpendicular, hit.cell.0, hit.cell.1
        );
    }
}

fn simulate(
    scene: Scene,
    script: &str,
    max_frames: u64,
    width: u32,
    height: u32,
) -> anyhow::Result<()> {
    let mut input = ScriptedInput::new();
    for frame in script::parse_script(script)? {
        input.push_frame(frame);
    }
    let window = HeadlessWindow::new(width, height, input);
    let renderer = RaycastRenderer::new(RenderConfig::with_size(width, height))?;
    let mut app = App::new("tilecast-sim", window, renderer, scene)
        .with_clock(ManualClock::new())
        .with_frame_limit(max_frames);

    let status = app.run();
    if status != 0 {
        anyhow::bail!("simulation failed to start (status {status})");
    }

    let controller = app.controller();
    let p = controller.scene().player;
    println!("frames: {}", app.frame_count());
    println!("presented: {}", app.window().presented());
    println!("splashes: {}", app.window().splashes().len());
    println!("player: ({:.4}, {:.4}) angle {:.4}", p.x, p.y, p.angle);
    println!("running: {}", controller.is_running());
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info { scene } => info(&scene.load()?),
        Commands::Render {
            scene,
            out,
            width,
            height,
        } => render(&scene.load()?, &out, width, height)?,
        Commands::Cast {
            scene,
            width,
            columns,
        } => cast(&scene.load()?, width, columns),
        Commands::Simulate {
            scene,
            script,
            max_frames,
            width,
            height,
            no_splash,
        } => {
            let mut scene = scene.load()?;
            if no_splash {
                scene.splash_images.clear();
            }
            simulate(scene, &script, max_frames, width, height)?
        }
    }

    Ok(())
}
