mod backend;
mod scene;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use xfce_rs_placement::{Desktop, PlacementConfig, PlacementState, Rect, WindowManager};

use crate::backend::{DeadlineTimer, ReplayManager, TracingPresenter};
use crate::scene::{Names, Scene};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Placement config (defaults to ~/.config/xfce-rs/placement.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a recorded scene and print where every window ended up
    Replay {
        scene: PathBuf,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the effective placement configuration
    Config,
}

#[derive(Debug, Serialize)]
struct ViewReport {
    name: String,
    geometry: Rect,
    placement: String,
    focused: bool,
}

#[derive(Debug, Serialize)]
struct Report {
    mode: String,
    views: Vec<ViewReport>,
    aborted_operations: u64,
}

fn placement_label(wm: &ReplayManager, placement: PlacementState) -> String {
    match placement {
        PlacementState::Floating => "floating".to_string(),
        PlacementState::Tiled { edges } => format!("tiled({:?})", edges),
        PlacementState::Region { region } => match wm.regions().get(region) {
            Some(r) => format!("region({})", r.name),
            None => "region(?)".to_string(),
        },
        PlacementState::Maximized { axes } => format!("maximized({:?})", axes),
        PlacementState::Fullscreen => "fullscreen".to_string(),
    }
}

fn report(wm: &ReplayManager, names: &Names) -> Report {
    let mut views: Vec<ViewReport> = wm
        .desktop
        .views()
        .map(|(id, view)| ViewReport {
            name: names.view_name(id).unwrap_or(view.title.as_str()).to_string(),
            geometry: view.current,
            placement: placement_label(wm, view.placement),
            focused: wm.seat.keyboard_focus == Some(id),
        })
        .collect();
    views.sort_by(|a, b| a.name.cmp(&b.name));

    let health = wm.error_tracker.health_check();
    Report {
        mode: format!("{:?}", wm.mode()),
        views,
        aborted_operations: health.precondition_violations + health.unavailable_resources + health.stale_references,
    }
}

fn print_report(report: &Report, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }
    println!("mode: {}", report.mode);
    for view in &report.views {
        let g = view.geometry;
        println!(
            "{}{:<16} {:>5},{:<5} {:>5}x{:<5} {}",
            if view.focused { "*" } else { " " },
            view.name,
            g.x,
            g.y,
            g.width,
            g.height,
            view.placement
        );
    }
    if report.aborted_operations > 0 {
        println!("aborted operations: {}", report.aborted_operations);
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config_path = args.config.unwrap_or_else(PlacementConfig::default_path);
    let config = PlacementConfig::load(&config_path)
        .with_context(|| format!("Failed to load placement config {}", config_path.display()))?;

    match args.command {
        Command::Config => {
            print!("{}", config.to_toml()?);
        }
        Command::Replay { scene, json } => {
            let scene = Scene::load(&scene)?;
            let mut wm = WindowManager::new(config, Desktop::new(), TracingPresenter::default(), DeadlineTimer::new());
            let (names, steps) = scene.populate(&mut wm)?;
            info!("Replaying {} steps", steps.len());

            backend::replay(&mut wm, steps).await;
            print_report(&report(&wm, &names), json)?;
        }
    }

    Ok(())
}
