use anyhow::Result;
use clap::Parser;

use city_sim::simulation::{SimConfig, SimWorld};

#[derive(Parser)]
#[command(name = "city_sim")]
#[command(about = "Grid-city traffic and pedestrian micro-simulation")]
struct Cli {
    /// Number of simulation ticks to run
    #[arg(long, default_value = "600")]
    ticks: u32,

    /// Time delta per tick in seconds
    #[arg(long, default_value = "0.1")]
    delta: f32,

    /// Seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Traffic density multiplier
    #[arg(long, default_value = "1.0")]
    density: f32,

    /// Side length of the square city
    #[arg(long, default_value = "300.0")]
    city_size: f32,

    /// Side length of a city block
    #[arg(long, default_value = "40.0")]
    block_size: f32,

    /// Width of every road
    #[arg(long, default_value = "12.0")]
    road_width: f32,

    /// Draw the character map with each summary
    #[arg(long)]
    map: bool,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let config = SimConfig {
        city_size: cli.city_size,
        block_size: cli.block_size,
        road_width: cli.road_width,
        traffic_density: cli.density,
        ..SimConfig::default()
    };

    let mut world = match cli.seed {
        Some(seed) => SimWorld::new_with_seed(config, seed)?,
        None => SimWorld::new(config)?,
    };

    world.spawn_initial();

    println!(
        "Running city simulation: {} ticks at {:.3}s per tick",
        cli.ticks, cli.delta
    );
    println!("Initial state:");
    world.print_summary();
    if cli.map {
        world.draw_map();
    }
    println!();

    // Print a summary after each simulated second
    let ticks_per_second = (1.0 / cli.delta).ceil().max(1.0) as u32;
    let mut tick = 0;
    while tick < cli.ticks {
        let ticks_to_run = ticks_per_second.min(cli.ticks - tick);
        for _ in 0..ticks_to_run {
            tick += 1;
            world.tick(cli.delta);
        }

        println!(
            "--- After tick {} ({:.1}s simulated time) ---",
            tick,
            f64::from(tick) * f64::from(cli.delta)
        );
        world.print_summary();
        if cli.map {
            world.draw_map();
        }
        println!();
    }

    println!("=== Final State ===");
    world.print_summary();
    println!("SIMULATION COMPLETE");

    Ok(())
}
