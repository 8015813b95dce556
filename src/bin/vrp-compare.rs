//! Compares nearest neighbor with the solver on a generated instance.

use std::time::Duration;

use anyhow::{bail, Context};
use clap::Parser;
use serde::Serialize;
use tracing::{info, warn};

use fleet_routing::cost::{CostBreakdown, CostComparison, CostModel};
use fleet_routing::evaluation::SolutionMetrics;
use fleet_routing::models::{FleetConstraints, RoutingProblem, Solution};
use fleet_routing::sample::{generate, SampleConfig};
use fleet_routing::solver::{FirstSolutionStrategy, Metaheuristic, SolverConfig};
use fleet_routing::{Algorithm, RoutingAlgorithm};

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Locations including the depot
    #[arg(short = 'n', long, default_value_t = 15)]
    locations: usize,

    #[arg(short, long, default_value_t = 3)]
    vehicles: usize,

    /// Vehicle capacity; enables random demands
    #[arg(short, long)]
    capacity: Option<i32>,

    /// Maximum route length in meters
    #[arg(long)]
    max_distance: Option<f64>,

    #[arg(long, default_value_t = 50.0)]
    radius_km: f64,

    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Solver time limit per run, in seconds
    #[arg(short, long, default_value_t = 5.0)]
    time_limit: f64,

    /// Caps metaheuristic iterations per run
    #[arg(short, long)]
    iterations: Option<usize>,

    /// e.g. GUIDED_LOCAL_SEARCH, TABU_SEARCH
    #[arg(short, long, value_parser = parse_metaheuristic, default_value = "GUIDED_LOCAL_SEARCH")]
    metaheuristic: Metaheuristic,

    /// Print the full report as JSON
    #[arg(long)]
    json: bool,

    #[arg(short, long)]
    debug: bool,
}

fn parse_metaheuristic(s: &str) -> Result<Metaheuristic, String> {
    serde_json::from_value(serde_json::Value::String(s.to_uppercase())).map_err(|e| e.to_string())
}

#[derive(Serialize)]
struct RunReport {
    algorithm: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    solution: Option<Solution>,
    #[serde(skip_serializing_if = "Option::is_none")]
    metrics: Option<SolutionMetrics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cost: Option<CostBreakdown>,
    #[serde(skip_serializing_if = "Option::is_none")]
    savings_vs_baseline: Option<CostComparison>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    if cli.locations < 2 {
        bail!("need at least 2 locations, got {}", cli.locations);
    }
    let time_limit = Duration::try_from_secs_f64(cli.time_limit).context("invalid --time-limit")?;

    let sample = SampleConfig::default()
        .with_num_locations(cli.locations)
        .with_radius_km(cli.radius_km)
        .with_demands(cli.capacity.is_some())
        .with_seed(cli.seed);
    let mut fleet = FleetConstraints::new(cli.vehicles);
    if let Some(capacity) = cli.capacity {
        fleet = fleet.with_capacity(capacity);
    }
    if let Some(max_distance) = cli.max_distance {
        fleet = fleet.with_max_route_distance(max_distance);
    }
    let problem = RoutingProblem::new(generate(&sample), fleet).context("invalid instance")?;
    info!(
        locations = problem.num_locations(),
        vehicles = problem.num_vehicles(),
        total_demand = problem.total_demand(),
        "instance generated"
    );

    let mut algorithms = vec![Algorithm::default()];
    for strategy in FirstSolutionStrategy::ALL {
        let mut config = SolverConfig::default()
            .with_first_solution(strategy)
            .with_metaheuristic(cli.metaheuristic)
            .with_time_limit(time_limit)
            .with_seed(cli.seed);
        if let Some(limit) = cli.iterations {
            config = config.with_iteration_limit(limit);
        }
        algorithms.push(Algorithm::Solver(config));
    }

    let cost_model = CostModel::default();
    let mut baseline: Option<CostBreakdown> = None;
    let mut reports = Vec::with_capacity(algorithms.len());

    for algorithm in &algorithms {
        let name = algorithm.name();
        match algorithm.solve(&problem) {
            Ok(solution) => {
                let metrics = SolutionMetrics::compute(&solution, &problem);
                let cost = cost_model.compute(&solution, problem.distances());
                let savings = baseline.as_ref().map(|b| CostComparison::between(b, &cost));
                baseline.get_or_insert(cost);

                info!(
                    algorithm = %name,
                    distance_km = %format!("{:.2}", metrics.total_distance / 1000.0),
                    longest_route_km = %format!("{:.2}", metrics.max_route_distance / 1000.0),
                    vehicles_used = metrics.vehicles_used,
                    time = ?solution.execution_time(),
                    cost = %format!("{:.2}", cost.total_cost),
                    "run finished"
                );
                if let Some(s) = &savings {
                    info!(
                        algorithm = %name,
                        cost_reduction_percent = %format!("{:.1}", s.cost_reduction_percent),
                        "compared with baseline"
                    );
                }

                reports.push(RunReport {
                    algorithm: name,
                    solution: Some(solution),
                    metrics: Some(metrics),
                    cost: Some(cost),
                    savings_vs_baseline: savings,
                    error: None,
                });
            }
            Err(err) => {
                warn!(algorithm = %name, error = %err, "run failed");
                reports.push(RunReport {
                    algorithm: name,
                    solution: None,
                    metrics: None,
                    cost: None,
                    savings_vs_baseline: None,
                    error: Some(err.to_string()),
                });
            }
        }
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    }

    Ok(())
}
