//! Command line front end for the Game of Life engine

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use game_of_life_engine::{
    config::{CliOverrides, Settings},
    driver::SimulationDriver,
    game_of_life::{load_grid_from_file, save_grid_to_file, GridEngine},
    utils::{ColorOutput, GridFormatter, CLEAR_SCREEN},
};
use log::{debug, info};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "game_of_life_engine")]
#[command(about = "Conway's Game of Life on a fixed-size board")]
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
    /// Run the simulation on a timer, drawing every generation
    Run {
        #[command(flatten)]
        board: BoardArgs,

        /// Milliseconds between generations, 50 to 1000 in steps of 50 (overrides config)
        #[arg(short, long)]
        speed: Option<u64>,

        /// Generations to run before stopping (overrides config)
        #[arg(short, long)]
        generations: Option<u64>,
    },

    /// Advance a fixed number of generations immediately and print the result
    Step {
        #[command(flatten)]
        board: BoardArgs,

        /// Number of generations to advance
        #[arg(short, long, default_value_t = 1)]
        generations: u64,

        /// Print every intermediate generation
        #[arg(long)]
        show_each: bool,

        /// Write the final board to this file (.json or text)
        #[arg(long)]
        save: Option<PathBuf>,
    },

    /// Write a default configuration file
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },
}

/// Options shared by every command that builds a board
#[derive(Args)]
struct BoardArgs {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.yaml")]
    config: PathBuf,

    /// Board rows (overrides config)
    #[arg(long)]
    rows: Option<usize>,

    /// Board columns (overrides config)
    #[arg(long)]
    columns: Option<usize>,

    /// Probability that a cell starts alive (overrides config)
    #[arg(short, long)]
    probability: Option<f64>,

    /// RNG seed for a reproducible board (overrides config)
    #[arg(long)]
    seed: Option<u64>,

    /// Start from a saved board instead of a random one
    #[arg(short, long)]
    load: Option<PathBuf>,

    /// Flip a cell before starting, as ROW,COL; may be repeated
    #[arg(short, long = "toggle", value_parser = parse_cell, allow_hyphen_values = true)]
    toggles: Vec<(isize, isize)>,
}

fn parse_cell(value: &str) -> Result<(isize, isize), String> {
    let (row, col) = value
        .split_once(',')
        .ok_or_else(|| format!("expected ROW,COL but got '{}'", value))?;
    let row = row.trim().parse::<isize>().map_err(|e| format!("invalid row '{}': {}", row, e))?;
    let col = col.trim().parse::<isize>().map_err(|e| format!("invalid column '{}': {}", col, e))?;
    Ok((row, col))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    match cli.command {
        Commands::Run { board, speed, generations } => run_command(board, speed, generations),
        Commands::Step { board, generations, show_each, save } => {
            step_command(board, generations, show_each, save)
        }
        Commands::Setup { directory, force } => setup_command(directory, force),
    }
}

fn load_settings(config_path: &Path, overrides: &CliOverrides) -> Result<Settings> {
    let mut settings = if config_path.exists() {
        info!("Loading configuration from {}", config_path.display());
        Settings::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))?
    } else {
        println!(
            "{}",
            ColorOutput::warning(&format!(
                "Config file {} not found, using defaults",
                config_path.display()
            ))
        );
        Settings::default()
    };

    settings.merge_with_cli(overrides);
    settings.validate().context("Configuration validation failed")?;
    Ok(settings)
}

fn build_engine(settings: &Settings, board: &BoardArgs) -> Result<GridEngine> {
    let mut engine = match &board.load {
        Some(path) => {
            let grid = load_grid_from_file(path)
                .with_context(|| format!("Failed to load board from {}", path.display()))?;
            GridEngine::from_grid(grid, settings.board.alive_probability)
        }
        None => GridEngine::from_config(&settings.board).context("Failed to create board")?,
    };

    for &(row, col) in &board.toggles {
        engine
            .toggle(row, col)
            .with_context(|| format!("Failed to toggle cell {},{}", row, col))?;
    }

    let (rows, columns) = engine.dimensions();
    debug!("Board ready: {}x{}, {} living cells", rows, columns, engine.living_count());
    Ok(engine)
}

fn board_overrides(board: &BoardArgs) -> CliOverrides {
    CliOverrides {
        rows: board.rows,
        columns: board.columns,
        alive_probability: board.probability,
        seed: board.seed,
        ..Default::default()
    }
}

fn run_command(board: BoardArgs, speed: Option<u64>, generations: Option<u64>) -> Result<()> {
    let overrides = CliOverrides {
        speed_ms: speed,
        generations,
        ..board_overrides(&board)
    };
    let settings = load_settings(&board.config, &overrides)?;
    let engine = build_engine(&settings, &board)?;

    let mut driver = SimulationDriver::new(engine, settings.speed()?)
        .with_generation_limit(settings.driver.generations);

    let mut last_drawn = draw_frame(&driver, &settings)?;
    driver.start();

    // Poll at half the tick period so no generation is skipped on screen
    let poll = Duration::from_millis(driver.speed().as_millis() / 2);
    loop {
        thread::sleep(poll);
        // Read the flag first so the final generation is always drawn
        let running = driver.is_running();
        if driver.generation()? != last_drawn {
            last_drawn = draw_frame(&driver, &settings)?;
        }
        if !running {
            break;
        }
    }
    driver.stop();

    println!(
        "{}",
        ColorOutput::success(&format!("✅ Finished after {} generations", last_drawn))
    );
    Ok(())
}

/// Draw the current board and return the generation that was drawn
fn draw_frame(driver: &SimulationDriver, settings: &Settings) -> Result<u64> {
    let speed = driver.speed();
    let (generation, frame) = driver.with_engine(|engine| {
        let grid = engine.grid();
        let frame = format!(
            "{}{}",
            GridFormatter::format_grid(grid, settings.output.style),
            ColorOutput::status(&GridFormatter::format_status(
                engine.generation(),
                grid,
                Some(speed)
            ))
        );
        (engine.generation(), frame)
    })?;

    if settings.output.clear_screen {
        print!("{}", CLEAR_SCREEN);
    }
    println!("{}", frame);
    Ok(generation)
}

fn step_command(
    board: BoardArgs,
    generations: u64,
    show_each: bool,
    save: Option<PathBuf>,
) -> Result<()> {
    let settings = load_settings(&board.config, &board_overrides(&board))?;
    let mut engine = build_engine(&settings, &board)?;

    for _ in 0..generations {
        engine.advance();
        if show_each {
            println!("{}", ColorOutput::info(&format!("Generation {}:", engine.generation())));
            println!("{}", GridFormatter::format_grid(engine.grid(), settings.output.style));
        }
    }

    if !show_each {
        println!("{}", GridFormatter::format_grid(engine.grid(), settings.output.style));
    }
    println!(
        "{}",
        ColorOutput::status(&GridFormatter::format_status(engine.generation(), engine.grid(), None))
    );

    if let Some(path) = save {
        save_grid_to_file(engine.grid(), &path)
            .with_context(|| format!("Failed to save board to {}", path.display()))?;
        println!("{}", ColorOutput::success(&format!("Board saved to {}", path.display())));
    }

    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("🛠️  Setting up configuration..."));

    let config_dir = directory.join("config");
    std::fs::create_dir_all(&config_dir)
        .with_context(|| format!("Failed to create directory {}", config_dir.display()))?;

    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        Settings::default()
            .to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    println!("\n{}", ColorOutput::success("✅ Setup complete!"));
    println!("\nNext steps:");
    println!("1. Edit {}", config_path.display());
    println!("2. Run: cargo run -- run --config {}", config_path.display());

    Ok(())
}
