//! TSP Solver - Command Line Interface
//!
//! Reads a point list, builds a Nearest-Neighbor tour, refines it with
//! 2-opt and writes the final visiting order as CSV.

use clap::{Parser, Subcommand};
use serde::Serialize;
use tsp_solver::graph::Graph;
use tsp_solver::io::{load_points, reindex_points, write_route_csv};
use tsp_solver::solver;
use tsp_solver::timing;
use tsp_solver::tour::Tour;

use std::io::Write;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tsp-solver")]
#[command(version = "1.0")]
#[command(about = "A heuristic solver for the symmetric Euclidean TSP")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve an instance with Nearest-Neighbor + 2-opt
    Solve {
        /// Path to the instance file (optional count line, then `id x y` rows)
        #[arg(short, long)]
        instance: PathBuf,

        /// Start node index for Nearest-Neighbor construction
        #[arg(short, long, default_value = "0")]
        start: usize,

        /// Skip the 2-opt refinement stage
        #[arg(long)]
        construction_only: bool,

        /// Write the route CSV to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write a JSON solve report
        #[arg(long)]
        json: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Print statistics and quick solution estimates for an instance
    Analyze {
        /// Path to the instance file
        #[arg(short, long)]
        instance: PathBuf,
    },

    /// Generate a uniform random instance file
    Generate {
        /// Number of points
        #[arg(short, long)]
        count: usize,

        /// Random seed
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Coordinates are drawn uniformly from [0, extent)
        #[arg(long, default_value = "100.0")]
        extent: f64,

        /// Output file
        #[arg(short, long)]
        output: PathBuf,
    },
}

/// Summary of a solve run, serialized with --json
#[derive(Serialize)]
struct SolveReport {
    instance: String,
    nodes: usize,
    start: usize,
    construction_length: f64,
    refined_length: f64,
    /// Final visiting order as external point IDs
    route: Vec<usize>,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Solve {
            instance,
            start,
            construction_only,
            output,
            json,
            verbose,
        } => solve_instance(&instance, start, construction_only, output, json, verbose),

        Commands::Analyze { instance } => analyze_instance(&instance),

        Commands::Generate {
            count,
            seed,
            extent,
            output,
        } => generate_instance(count, seed, extent, &output),
    }
}

fn load_graph(path: &PathBuf) -> Graph {
    let points = match load_points(path) {
        Ok(points) => points,
        Err(e) => {
            eprintln!("Error loading instance: {}", e);
            std::process::exit(1);
        }
    };

    if points.is_empty() {
        eprintln!("Error: no points loaded from {:?}", path);
        std::process::exit(1);
    }

    let points = match reindex_points(points) {
        Ok(points) => points,
        Err(e) => {
            eprintln!("Error re-indexing instance: {}", e);
            std::process::exit(1);
        }
    };

    let _t = timing::logged("Distance matrix construction");
    Graph::new(points)
}

fn solve_instance(
    path: &PathBuf,
    start: usize,
    construction_only: bool,
    output: Option<PathBuf>,
    json: Option<PathBuf>,
    verbose: bool,
) {
    let graph = load_graph(path);
    let n = graph.size();

    if start >= n {
        eprintln!("Error: start node {} out of range 0..{}", start, n);
        std::process::exit(1);
    }

    let nn_tour = {
        let _t = timing::logged("Nearest-Neighbor");
        solver::nearest_neighbor(&graph, start)
    };
    let nn_length = nn_tour.length(&graph);
    println!("NN tour length: {:.4}", nn_length);

    let final_tour = if construction_only {
        nn_tour
    } else {
        let tour = {
            let _t = timing::logged("2-Opt improvement");
            solver::two_opt(&graph, &nn_tour)
        };
        println!("2-Opt tour length: {:.4}", tour.length(&graph));
        tour
    };

    if verbose {
        println!("Route: {:?}", final_tour.route());
    }

    write_route(&graph, &final_tour, output);

    if let Some(json_path) = json {
        let report = SolveReport {
            instance: path.display().to_string(),
            nodes: n,
            start,
            construction_length: nn_length,
            refined_length: final_tour.length(&graph),
            route: final_tour
                .route()
                .iter()
                .map(|&idx| graph.point(idx).id)
                .collect(),
        };
        let text = serde_json::to_string_pretty(&report).expect("report serialization failed");
        if let Err(e) = std::fs::write(&json_path, text) {
            eprintln!("Error writing report: {}", e);
            std::process::exit(1);
        }
        println!("Report saved to {:?}", json_path);
    }
}

fn write_route(graph: &Graph, tour: &Tour, output: Option<PathBuf>) {
    let result = match output {
        Some(path) => {
            let file = match std::fs::File::create(&path) {
                Ok(file) => file,
                Err(e) => {
                    eprintln!("Error creating {:?}: {}", path, e);
                    std::process::exit(1);
                }
            };
            let result = write_route_csv(file, graph, tour);
            if result.is_ok() {
                println!("Route saved to {:?}", path);
            }
            result
        }
        None => write_route_csv(std::io::stdout(), graph, tour),
    };

    if let Err(e) = result {
        eprintln!("Error writing route: {}", e);
        std::process::exit(1);
    }
}

fn analyze_instance(path: &PathBuf) {
    let graph = load_graph(path);
    let n = graph.size();

    println!("========== Instance Analysis ==========\n");
    println!("Instance: {:?}", path);
    println!("Nodes: {}", n);

    let xs: Vec<f64> = graph.points().iter().map(|p| p.x).collect();
    let ys: Vec<f64> = graph.points().iter().map(|p| p.y).collect();
    let min_x = xs.iter().cloned().fold(f64::INFINITY, f64::min);
    let max_x = xs.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let min_y = ys.iter().cloned().fold(f64::INFINITY, f64::min);
    let max_y = ys.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    println!(
        "Bounding box: [{:.2}, {:.2}] x [{:.2}, {:.2}]",
        min_x, max_x, min_y, max_y
    );

    if n >= 2 {
        let mut distances: Vec<f64> = Vec::new();
        for i in 0..n {
            for j in i + 1..n {
                distances.push(graph.distance(i, j));
            }
        }
        let avg = distances.iter().sum::<f64>() / distances.len() as f64;
        let min = distances.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = distances.iter().cloned().fold(0.0, f64::max);

        println!("\nDistance Statistics:");
        println!("  Average: {:.2}", avg);
        println!("  Min: {:.2}", min);
        println!("  Max: {:.2}", max);
    }

    let nn_tour = solver::nearest_neighbor(&graph, 0);
    let opt_tour = solver::two_opt(&graph, &nn_tour);

    println!("\nQuick Solution Estimates:");
    println!("  Nearest Neighbor: {:.2}", nn_tour.length(&graph));
    println!("  NN + 2-Opt: {:.2}", opt_tour.length(&graph));
}

fn generate_instance(count: usize, seed: u64, extent: f64, output: &PathBuf) {
    use rand::prelude::*;
    use rand_chacha::ChaCha8Rng;

    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let mut text = String::new();
    text.push_str(&format!("{}\n", count));
    for id in 0..count {
        let x: f64 = rng.gen_range(0.0..extent);
        let y: f64 = rng.gen_range(0.0..extent);
        text.push_str(&format!("{} {} {}\n", id, x, y));
    }

    let file = std::fs::File::create(output);
    let result = file.and_then(|mut f| f.write_all(text.as_bytes()));
    match result {
        Ok(()) => println!("Generated {} points in {:?} (seed {})", count, output, seed),
        Err(e) => {
            eprintln!("Error writing {:?}: {}", output, e);
            std::process::exit(1);
        }
    }
}
