use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use glam::Vec3;
use image::{Rgba, RgbaImage};
use log::info;
use trek::numeric::index_to_f32;
use trek::{
    init_logging, Body, MovementIntent, NavNode, NavNodeKind, Path, PathPolicy, Stage,
    StageConfig,
};

/// Headless terrain-following navigation run
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
    /// Number of ticks to simulate
    #[arg(long, default_value_t = 600)]
    ticks: u64,
    /// Waypoint file for the path follower, one `X Z` pair per line
    #[arg(long)]
    path: Option<PathBuf>,
    /// What the follower does at the end of its path
    #[arg(long, default_value_t = PathPolicy::Reverse)]
    policy: PathPolicy,
    /// JSON stage configuration
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed for the wanderers
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Log the inspector every N ticks
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u64).range(1..))]
    report_every: u64,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = match &args.config {
        Some(file) => StageConfig::load(file)?,
        None => StageConfig::default(),
    };
    let (height, color) = rolling_hills(&config)?;
    let mut stage = Stage::from_images(config, &height, &color)?;
    populate(&mut stage, &args)?;
    info!(
        "stage ready: {} bodies, {} agents",
        stage.registry().len(),
        stage.agents().len()
    );

    for _ in 0..args.ticks {
        stage.tick(MovementIntent::default());
        if stage.ticks() % args.report_every == 0 {
            report(&stage);
        }
    }

    for agent in stage.agents() {
        if let Some(body) = stage.body(agent.body()) {
            info!("{} finished at {}", agent.name(), body.translation());
        }
    }
    Ok(())
}

/// Procedural height and color images sized to the configured range.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "Channel values are clamped to the u8 range before casting."
)]
fn rolling_hills(config: &StageConfig) -> Result<(RgbaImage, RgbaImage)> {
    let side = u32::try_from(config.range).context("terrain range exceeds image limits")?;
    let height = RgbaImage::from_fn(side, side, |x, z| {
        let (fx, fz) = (f64::from(x) / 40.0, f64::from(z) / 55.0);
        let level = (fx.sin() * fz.cos()).mul_add(0.5, 0.5) * 255.0;
        let red = level.clamp(0.0, 255.0) as u8;
        Rgba([red, red, red, 255])
    });
    let color = RgbaImage::from_fn(side, side, |x, z| {
        let red = height.get_pixel(x, z).0[0];
        Rgba([red / 3, 96 + red / 2, 40, 255])
    });
    Ok((height, color))
}

fn populate(stage: &mut Stage, args: &Args) -> Result<()> {
    let spacing = stage.terrain().spacing();
    let range = index_to_f32(stage.terrain().size());
    let world = |gx: f32, gz: f32| Vec3::new(gx * spacing, 0.0, gz * spacing);
    let center = range / 2.0;

    let path = match &args.path {
        Some(file) => Path::load_on(file, args.policy, stage.terrain())
            .with_context(|| format!("loading path {}", file.display()))?,
        None => square_route(stage, range, args.policy),
    };
    info!("follower path has {} waypoints ({})", path.len(), path.policy());

    stage.spawn_player(Body::new(
        "Chaser",
        world(center + 10.0, center + 7.0),
        Vec3::Y,
        0.8,
        10.0,
    ));
    stage.spawn_follower(
        Body::new("Evader", world(center, center), Vec3::Y, 0.0, 10.0),
        path,
    );
    for (offset, name, stream) in [(-20.0, "Dog", 0), (20.0, "Cat", 1)] {
        let seed = args.seed.wrapping_add(stream);
        stage.spawn_wanderer(
            Body::new(name, world(center + offset, center - 5.0), Vec3::Y, 0.0, 10.0),
            seed,
        );
    }
    for (index, (gx, gz)) in [(0.4, 0.4), (0.6, 0.45), (0.5, 0.6)].into_iter().enumerate() {
        let position = world(range * gx, range * gz);
        stage.add_obstacle(&format!("rock{index}"), position.x, position.z, 40.0);
    }
    Ok(())
}

fn square_route(stage: &Stage, range: f32, policy: PathPolicy) -> Path {
    let spacing = stage.terrain().spacing();
    let (low, high) = (range * 0.25, range * 0.75);
    let nodes = [(low, low), (high, low), (high, high), (low, high)]
        .into_iter()
        .map(|(gx, gz)| {
            let (x, z) = (gx * spacing, gz * spacing);
            let position = Vec3::new(x, stage.surface_height(x, z), z);
            NavNode::with_kind(position, NavNodeKind::Waypoint)
        })
        .collect();
    Path::new(nodes, policy)
}

fn report(stage: &Stage) {
    for (slot, line) in stage.inspector().lines() {
        info!("[{slot:02}] {line}");
    }
}
