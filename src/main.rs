//! VELDT - CLI entry point
//!
//! Agent-based natural-selection simulator.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;
use veldt::{Config, Simulation};

#[derive(Parser)]
#[command(name = "veldt")]
#[command(version)]
#[command(about = "Natural-selection simulator: foraging agents, heritable traits, predators")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulation
    Run {
        /// Configuration file (YAML)
        #[arg(short, long, default_value = "config.yaml")]
        config: PathBuf,

        /// Number of generations (overrides config)
        #[arg(short, long)]
        generations: Option<u32>,

        /// Random seed for reproducibility
        #[arg(long)]
        seed: Option<u64>,

        /// Output path for the trait-history JSON
        #[arg(short, long, default_value = "trait_history.json")]
        output: PathBuf,

        /// Quiet mode (minimal output)
        #[arg(short, long)]
        quiet: bool,
    },

    /// Generate default configuration file
    Init {
        /// Output path
        #[arg(short, long, default_value = "config.yaml")]
        output: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            generations,
            seed,
            output,
            quiet,
        } => run_simulation(config, generations, seed, output, quiet),

        Commands::Init { output } => generate_config(output),
    }
}

fn run_simulation(
    config_path: PathBuf,
    generations: Option<u32>,
    seed: Option<u64>,
    output: PathBuf,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    // Load or create config
    let mut config = if config_path.exists() {
        println!("Loading config from: {:?}", config_path);
        Config::from_file(&config_path)?
    } else {
        println!("Using default configuration");
        Config::default()
    };

    if let Some(g) = generations {
        config.simulation.generations = g;
    }
    config.validate()?;

    // Create simulation
    let mut sim = if let Some(s) = seed {
        println!("Using seed: {}", s);
        Simulation::new_with_seed(config.clone(), s)
    } else {
        Simulation::new(config.clone())
    };

    println!("Starting simulation");
    println!("  Agents: {}", config.simulation.initial_agents);
    println!("  Adversaries: {}", config.simulation.initial_adversaries);
    println!("  Food per generation: {}", config.simulation.food_per_generation);
    println!(
        "  Arena: {}x{}",
        config.world.width, config.world.height
    );
    println!("  Generations: {}", config.simulation.generations);
    println!();

    let start = Instant::now();

    sim.run_with_callback(|_, summary| {
        if !quiet {
            println!("{}", summary.summary());
        }
    });

    let elapsed = start.elapsed();

    println!();
    println!("=== Simulation Complete ===");
    println!("Time: {:.2}s", elapsed.as_secs_f64());
    println!("Generations run: {}", sim.history.snapshots.len());
    if let Some(last) = sim.history.latest() {
        println!("Final population: {}", last.population);
        println!(
            "Final mean traits: size {:.2}, speed {:.2}, vision {:.2}, strength {:.2}",
            last.size_mean, last.speed_mean, last.vision_mean, last.strength_mean
        );
    }
    println!("Seed: {}", sim.seed());

    // Save trait history for plotting collaborators
    if let Some(path) = output.to_str() {
        sim.history.save(path)?;
        println!("Trait history: {:?}", output);
    }

    Ok(())
}

fn generate_config(output: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::default();
    config.save(&output)?;
    println!("Configuration saved to: {:?}", output);
    Ok(())
}
