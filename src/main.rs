//! Terminal runner for the Game of Life simulation engine

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use game_of_life_sim::{
    config::{CliOverrides, DisplayFormat, Settings},
    game_of_life::{parse_grid, GameOfLifeRules},
    simulation::Simulation,
    utils::{GridFormatter, Tone},
    TerminalAdapter,
};
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "game_of_life_sim")]
#[command(about = "Conway's Game of Life simulator")]
#[command(version = "0.1.0")]
struct Cli {
    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the timed simulation loop in the terminal
    Run {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Board width (overrides config)
        #[arg(long)]
        width: Option<usize>,

        /// Board height (overrides config)
        #[arg(long)]
        height: Option<usize>,

        /// Generations per second (overrides config)
        #[arg(short, long)]
        tps: Option<i64>,

        /// Generations to run before stopping (overrides config)
        #[arg(short, long)]
        generations: Option<u64>,

        /// Initial pattern, rows separated by '/' e.g. "010/010/010" (overrides config)
        #[arg(short, long)]
        pattern: Option<String>,

        /// Output format (overrides config)
        #[arg(short, long, value_enum)]
        format: Option<DisplayFormat>,
    },

    /// Create a default configuration file
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },

    /// Print a pattern's evolution without waiting between generations
    Step {
        /// Pattern, rows separated by '/'
        #[arg(short, long)]
        pattern: String,

        /// Number of generations
        #[arg(short, long, default_value_t = 1)]
        generations: usize,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Run {
            config,
            width,
            height,
            tps,
            generations,
            pattern,
            format,
        } => {
            let overrides = CliOverrides {
                width,
                height,
                ticks_per_second: tps,
                generations,
                pattern: pattern.map(|p| pattern_rows(&p)),
                format,
            };
            run_command(config, overrides).await
        }
        Commands::Setup { directory, force } => setup_command(directory, force),
        Commands::Step { pattern, generations } => step_command(&pattern, generations),
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "game_of_life_sim=debug"
    } else {
        "game_of_life_sim=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Command line patterns use '/' between rows
fn pattern_rows(pattern: &str) -> String {
    pattern.replace('/', "\n")
}

fn load_settings(config_path: &PathBuf) -> Result<Settings> {
    if config_path.exists() {
        Settings::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))
    } else {
        eprintln!(
            "{}",
            Tone::Notice.paint(&format!(
                "Config file {} not found, using defaults",
                config_path.display()
            ))
        );
        Ok(Settings::default())
    }
}

async fn run_command(config_path: PathBuf, overrides: CliOverrides) -> Result<()> {
    let mut settings = load_settings(&config_path)?;
    settings.merge_with_cli(&overrides);
    settings.validate().context("Configuration validation failed")?;

    let config = settings.simulation_config()?;
    let grid = settings.initial_grid()?;
    let target = settings.run.generations;

    let (adapter, mut progress) = TerminalAdapter::new(
        std::io::stdout(),
        settings.display.format,
        settings.display.clear_screen,
    );
    let (handle, task) = Simulation::with_grid(grid, config.tick_rate(), adapter).spawn();

    let start_time = Instant::now();
    handle.toggle_run().await?;
    progress
        .wait_for(|generation| *generation >= target)
        .await
        .context("Simulation loop ended before reaching the target generation")?;
    handle.toggle_run().await?;
    handle.shutdown()?;

    let sim = task.await.context("Simulation task failed")?;
    eprintln!(
        "{}",
        Tone::Done.paint(&format!(
            "{} in {:.3}s",
            GridFormatter::format_summary(sim.generation(), sim.current()),
            start_time.elapsed().as_secs_f64()
        ))
    );

    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    let config_path = directory.join("config/default.yaml");
    if !config_path.exists() || force {
        Settings::default()
            .to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("{}", Tone::Done.paint(&format!("Created: {}", config_path.display())));
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }
    Ok(())
}

fn step_command(pattern: &str, generations: usize) -> Result<()> {
    let mut grid = parse_grid(&pattern_rows(pattern)).context("Invalid pattern")?;

    println!("{}", Tone::Heading.paint("Generation 0:"));
    println!("{}", GridFormatter::format_grid_with_coords(&grid));
    for generation in 1..=generations {
        grid = GameOfLifeRules::evolve(&grid);
        println!("{}", Tone::Heading.paint(&format!("Generation {}:", generation)));
        println!("{}", GridFormatter::format_grid_with_coords(&grid));
    }

    Ok(())
}
