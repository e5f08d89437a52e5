//! Maze Evolver CLI - Evolve a maze solution from JSON configuration.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use maze_evolver::{
    compute::{evolution::EvolutionController, format_moves, shortest_path},
    schema::{EvolutionConfig, MazeConfig, PhaseResult},
};

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <maze.json> [generations]", args[0]);
        eprintln!();
        eprintln!("Evolve move sequences through a maze from JSON configuration.");
        eprintln!();
        eprintln!("Arguments:");
        eprintln!("  maze.json    Path to maze file (grid, start, end)");
        eprintln!("  generations  Maximum number of generations (default: 100)");
        eprintln!();
        eprintln!("Example configuration is generated with --example flag.");
        std::process::exit(1);
    }

    if args[1] == "--example" {
        print_example_config();
        return;
    }

    let maze_path = PathBuf::from(&args[1]);
    let max_generations: u64 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(100);

    // Load maze
    let maze_str = fs::read_to_string(&maze_path).unwrap_or_else(|e| {
        eprintln!("Error reading maze file: {}", e);
        std::process::exit(1);
    });

    let maze: MazeConfig = serde_json::from_str(&maze_str).unwrap_or_else(|e| {
        eprintln!("Error parsing maze: {}", e);
        std::process::exit(1);
    });

    // Load or default evolution settings
    let config_path = maze_path.with_extension("evolution.json");
    let config: EvolutionConfig = if config_path.exists() {
        let config_str = fs::read_to_string(&config_path).unwrap_or_else(|e| {
            eprintln!("Error reading evolution config: {}", e);
            std::process::exit(1);
        });
        serde_json::from_str(&config_str).unwrap_or_else(|e| {
            eprintln!("Error parsing evolution config: {}", e);
            std::process::exit(1);
        })
    } else {
        EvolutionConfig::default()
    };

    let mut controller =
        EvolutionController::initialize(&maze, headless(config)).unwrap_or_else(|e| {
            eprintln!("Error starting run: {}", e);
            std::process::exit(1);
        });

    let snapshot = controller.snapshot();
    println!("Maze Evolver");
    println!("============");
    println!(
        "Maze: {}x{}, start {}, end {}",
        snapshot.grid.width(),
        snapshot.grid.height(),
        snapshot.start,
        snapshot.end
    );
    println!("Candidate length: {}", snapshot.candidate_length);
    println!(
        "Population: {} ({} elites), mutation rate {}",
        controller.config().population.size,
        controller.config().population.elite_count,
        controller.config().mutation_rate
    );
    if let Some(path) = shortest_path(&snapshot.grid, snapshot.start, snapshot.end) {
        let cells: Vec<String> = path.iter().map(ToString::to_string).collect();
        println!("Reference path: {}", cells.join(" -> "));
    }
    println!();

    let start = Instant::now();

    while controller.generation() <= max_generations {
        for _ in 0..3 {
            match controller.advance() {
                PhaseResult::Elected { elites, starved } => {
                    let best = elites
                        .first()
                        .and_then(|c| c.score)
                        .map_or_else(|| "-".to_string(), |s| s.to_string());
                    println!(
                        "  Generation {}: {} elites{}, best steps away {}",
                        controller.generation(),
                        elites.len(),
                        if starved { " (starved)" } else { "" },
                        best
                    );
                }
                PhaseResult::Demonstrated {
                    best: Some(best), ..
                } => {
                    println!("    Best: {}", format_moves(&best.moves));
                }
                _ => {}
            }
        }

        controller.play_replay(|_| {});
        if controller.reached_goal() {
            break;
        }
        controller.advance();
    }

    let elapsed = start.elapsed();

    println!();
    if controller.reached_goal() {
        println!("Goal reached in generation {}", controller.generation());
        if let Some(best) = controller.best() {
            println!("Solution: {}", format_moves(&best.moves));
        }
    } else {
        println!(
            "Goal not reached after {} generations",
            controller.generation() - 1
        );
    }
    println!("Time: {:.2}s", elapsed.as_secs_f32());
}

/// Replays are not drawn here, so they run without pauses.
fn headless(mut config: EvolutionConfig) -> EvolutionConfig {
    if config.animation.frame_interval_ms > 0 {
        log::debug!(
            "Ignoring {} ms frame interval in headless run",
            config.animation.frame_interval_ms
        );
    }
    config.animation.frame_interval_ms = 0;
    config
}

fn print_example_config() {
    let maze = MazeConfig::default();
    let config = EvolutionConfig::default();

    println!("Example maze (maze.json):");
    println!("{}", serde_json::to_string_pretty(&maze).unwrap());
    println!();
    println!("Example evolution settings (maze.evolution.json):");
    println!("{}", serde_json::to_string_pretty(&config).unwrap());
}
