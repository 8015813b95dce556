//! Combinatorial solver seam and the bundled local-search engine.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use super::config::FirstSolutionStrategy;
use super::formulation::RoutingModel;
use super::metaheuristic::{self, Metaheuristic, SearchBudget};
use crate::constructive::{
    cheapest_insertion, clarke_wright_savings, nearest_neighbor, sweep, Construction,
    ConstructionContext,
};
use crate::local_search::RouteState;
use crate::models::DEPOT;

/// Search controls handed to a [`CombinatorialSolver`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchParameters {
    pub first_solution: FirstSolutionStrategy,
    pub metaheuristic: Metaheuristic,
    pub time_limit: Duration,
    pub iteration_limit: Option<usize>,
    pub seed: u64,
}

/// What a search produced.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// One customer sequence per vehicle (depot excluded). `objective_value`
    /// is [`Objective::distance_value`](super::Objective::distance_value) of
    /// the routes, in arc-cost units.
    Solved {
        routes: Vec<Vec<usize>>,
        objective_value: f64,
        iterations: usize,
        /// The time limit cut the metaheuristic short.
        timed_out: bool,
    },
    /// No feasible assignment was found.
    NoSolution { timed_out: bool, iterations: usize },
}

/// An engine that searches a [`RoutingModel`] for a feasible, low-cost
/// assignment of nodes to vehicles.
///
/// Implementations must return, on success, exactly
/// [`RoutingModel::num_vehicles`] sequences that together visit every
/// non-depot node once and respect every dimension limit.
pub trait CombinatorialSolver {
    /// Engine name, used in the solution's algorithm name.
    fn name(&self) -> &str;

    fn search(&self, model: &RoutingModel, params: &SearchParameters) -> SearchOutcome;
}

/// First-solution construction followed by a local-search metaheuristic.
///
/// If the chosen first-solution strategy strands customers, they are placed
/// by cheapest insertion; if that still fails the remaining strategies are
/// tried in turn. The metaheuristic then runs on a seeded [`StdRng`] until
/// it finishes or the time or iteration budget runs out, and the best
/// solution seen is returned.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use fleet_routing::models::{FleetConstraints, Location, RoutingProblem};
/// use fleet_routing::solver::{
///     CombinatorialSolver, LocalSearchSolver, Objective, RoutingModel, SearchOutcome,
///     SolverConfig,
/// };
///
/// let locations = vec![
///     Location::depot(0.0, 0.0),
///     Location::new(1, "A", 0.0, 0.01).with_demand(10),
///     Location::new(2, "B", 0.01, 0.0).with_demand(10),
/// ];
/// let fleet = FleetConstraints::new(2).with_capacity(10);
/// let problem = RoutingProblem::new(locations, fleet).unwrap();
/// let model = RoutingModel::from_problem(&problem, Objective::TotalDistance);
/// let params = SolverConfig::default()
///     .with_time_limit(Duration::from_secs(1))
///     .with_iteration_limit(20)
///     .search_parameters();
///
/// match LocalSearchSolver.search(&model, &params) {
///     SearchOutcome::Solved { routes, .. } => assert_eq!(routes, vec![vec![1], vec![2]]),
///     SearchOutcome::NoSolution { .. } => unreachable!(),
/// }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalSearchSolver;

impl CombinatorialSolver for LocalSearchSolver {
    fn name(&self) -> &str {
        "LocalSearchSolver"
    }

    fn search(&self, model: &RoutingModel, params: &SearchParameters) -> SearchOutcome {
        let budget = SearchBudget::start(params.time_limit, params.iteration_limit);
        let ctx = model.construction_context();

        let Some(initial) = first_solution(&ctx, params.first_solution) else {
            return SearchOutcome::NoSolution {
                timed_out: budget.timed_out(),
                iterations: 0,
            };
        };

        let mut rng = StdRng::seed_from_u64(params.seed);
        let state = RouteState::new(&ctx, initial);
        let outcome = metaheuristic::run(
            params.metaheuristic,
            state,
            model.objective(),
            &budget,
            &mut rng,
        );

        let lengths: Vec<f64> = outcome
            .routes
            .iter()
            .map(|r| ctx.distances.tour_length(DEPOT, r))
            .collect();
        SearchOutcome::Solved {
            objective_value: model.objective().distance_value(&lengths),
            routes: outcome.routes,
            iterations: outcome.iterations,
            timed_out: outcome.timed_out,
        }
    }
}

/// Builds a complete feasible start, trying `preferred` first.
fn first_solution(
    ctx: &ConstructionContext,
    preferred: FirstSolutionStrategy,
) -> Option<Vec<Vec<usize>>> {
    let fallbacks = FirstSolutionStrategy::ALL
        .into_iter()
        .filter(|&s| s != preferred);

    for strategy in std::iter::once(preferred).chain(fallbacks) {
        let mut construction = construct(ctx, strategy);
        if !construction.is_complete() {
            construction = cheapest_insertion(ctx, construction);
        }
        if construction.is_complete() {
            debug!(%strategy, "first solution built");
            return Some(construction.routes);
        }
        debug!(
            %strategy,
            unassigned = construction.unassigned.len(),
            "first solution incomplete"
        );
    }
    None
}

fn construct(ctx: &ConstructionContext, strategy: FirstSolutionStrategy) -> Construction {
    match strategy {
        FirstSolutionStrategy::PathCheapestArc => nearest_neighbor(ctx, None),
        FirstSolutionStrategy::Sweep => sweep(ctx),
        FirstSolutionStrategy::Savings => clarke_wright_savings(ctx),
    }
}
