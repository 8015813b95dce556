//! Simulated annealing over [`u_metaheur::sa`].
//!
//! # Algorithm
//!
//! [`RoutingAnnealing`] implements [`SaProblem`]: a neighbor is one random
//! feasible move applied to a copy of the routes, and the cost is the
//! objective's primary value. [`SaRunner`] owns acceptance and geometric
//! cooling. Each run cools from T₀ to `T₀ · 10⁻³`; while budget remains the
//! next run restarts from the best routes found so far.
//!
//! T₀ is 5% of the starting objective per customer, which makes an average
//! arc's worth of deterioration likely to be accepted early on.
//!
//! # Reference
//!
//! Kirkpatrick, S., Gelatt, C.D. & Vecchi, M.P. (1983). "Optimization by
//! Simulated Annealing", *Science* 220(4598), 671-680.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rand::Rng;
use u_metaheur::sa::{CoolingSchedule, SaConfig, SaProblem, SaRunner};

use super::{Incumbent, SearchBudget};
use crate::local_search::{neighborhood, sample_move, RouteState};
use crate::solver::formulation::Objective;

const INITIAL_TEMPERATURE_RATIO: f64 = 0.05;
const COOLING_RATE: f64 = 0.995;
const REHEAT_THRESHOLD: f64 = 1e-3;
/// Infeasible samples tolerated before a neighbor falls back to the current routes.
const SAMPLE_ATTEMPTS: usize = 8;

/// Annealing problem starting from a feasible [`RouteState`].
///
/// Raises `cancel` once the deadline passes so the runner stops at its next
/// temperature step.
pub(super) struct RoutingAnnealing<'c, 'a> {
    start: RouteState<'c, 'a>,
    objective: Objective,
    budget: SearchBudget,
    cancel: Arc<AtomicBool>,
}

impl<'c, 'a> SaProblem for RoutingAnnealing<'c, 'a> {
    type Solution = RouteState<'c, 'a>;

    fn initial_solution<R: Rng>(&self, _rng: &mut R) -> RouteState<'c, 'a> {
        self.start.clone()
    }

    fn cost(&self, state: &RouteState<'c, 'a>) -> f64 {
        self.objective.score(state.lengths()).primary
    }

    fn neighbor<R: Rng>(&self, state: &RouteState<'c, 'a>, rng: &mut R) -> RouteState<'c, 'a> {
        let mut next = state.clone();
        if self.budget.timed_out() {
            self.cancel.store(true, Ordering::Relaxed);
            return next;
        }
        for _ in 0..SAMPLE_ATTEMPTS {
            let Some(mv) = sample_move(state.routes(), rng) else {
                break;
            };
            if let Some(change) = state.evaluate(&mv) {
                next.apply(change);
                break;
            }
        }
        next
    }
}

pub(super) fn search<'c, 'a, R: Rng>(
    state: &mut RouteState<'c, 'a>,
    objective: Objective,
    budget: &SearchBudget,
    incumbent: &mut Incumbent,
    iterations: &mut usize,
    rng: &mut R,
) {
    if neighborhood(state.routes()).is_empty() {
        return;
    }

    let customers: usize = state.routes().iter().map(Vec::len).sum();
    let start = objective.score(state.lengths()).primary;
    let t0 = if start > 0.0 {
        INITIAL_TEMPERATURE_RATIO * start / customers.max(1) as f64
    } else {
        1.0
    };
    let cancel = Arc::new(AtomicBool::new(false));

    while !budget.exhausted(*iterations) {
        let remaining = budget.remaining(*iterations).unwrap_or(0);
        let config = SaConfig::default()
            .with_initial_temperature(t0)
            .with_min_temperature(t0 * REHEAT_THRESHOLD)
            .with_cooling(CoolingSchedule::Geometric { alpha: COOLING_RATE })
            .with_iterations_per_temperature(1)
            .with_max_iterations(remaining)
            .with_seed(rng.random());
        let problem = RoutingAnnealing {
            start: state.clone(),
            objective,
            budget: *budget,
            cancel: Arc::clone(&cancel),
        };

        let result = SaRunner::run_with_cancel(&problem, &config, Some(Arc::clone(&cancel)));
        *iterations += result.iterations;
        incumbent.offer(&result.best, *iterations);
        *state = result.best;
        if result.cancelled {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{interleaved, two_clusters};
    use super::*;
    use crate::constructive::ConstructionContext;
    use crate::models::FleetConstraints;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::time::Duration;

    fn anneal(seed: u64, limit: usize) -> (Vec<Vec<usize>>, f64, usize) {
        let p = two_clusters(FleetConstraints::new(2).with_capacity(40));
        let ctx = ConstructionContext::from_problem(&p);
        let mut state = RouteState::new(&ctx, interleaved());
        let mut incumbent = Incumbent::new(&state, Objective::TotalDistance);
        let budget = SearchBudget::start(Duration::from_secs(10), Some(limit));
        let mut iterations = 0;
        let mut rng = StdRng::seed_from_u64(seed);
        search(
            &mut state,
            Objective::TotalDistance,
            &budget,
            &mut incumbent,
            &mut iterations,
            &mut rng,
        );
        (incumbent.routes, incumbent.score.primary, iterations)
    }

    #[test]
    fn test_annealing_same_seed_same_result() {
        assert_eq!(anneal(7, 500), anneal(7, 500));
    }

    #[test]
    fn test_annealing_improves() {
        let p = two_clusters(FleetConstraints::new(2).with_capacity(40));
        let ctx = ConstructionContext::from_problem(&p);
        let initial = RouteState::new(&ctx, interleaved()).total_length();
        let (_, best, _) = anneal(42, 500);
        assert!(best < initial);
    }

    #[test]
    fn test_annealing_restarts_until_iteration_limit() {
        // one cooling run is about 1400 iterations
        let (_, _, iterations) = anneal(3, 4000);
        assert_eq!(iterations, 4000);
    }

    #[test]
    fn test_neighbor_stays_feasible() {
        let p = two_clusters(FleetConstraints::new(2).with_capacity(40));
        let ctx = ConstructionContext::from_problem(&p);
        let problem = RoutingAnnealing {
            start: RouteState::new(&ctx, interleaved()),
            objective: Objective::TotalDistance,
            budget: SearchBudget::start(Duration::from_secs(10), None),
            cancel: Arc::new(AtomicBool::new(false)),
        };
        let mut rng = StdRng::seed_from_u64(5);
        let mut state = problem.initial_solution(&mut rng);
        for _ in 0..200 {
            state = problem.neighbor(&state, &mut rng);
            for route in state.routes() {
                let load: i64 = route.iter().map(|&c| ctx.demands[c]).sum();
                assert!(load <= 40);
            }
        }
        let mut all: Vec<usize> = state.routes().iter().flatten().copied().collect();
        all.sort_unstable();
        assert_eq!(all, (1..=8).collect::<Vec<_>>());
    }

    #[test]
    fn test_neighbor_cancels_after_deadline() {
        let p = two_clusters(FleetConstraints::new(2).with_capacity(40));
        let ctx = ConstructionContext::from_problem(&p);
        let problem = RoutingAnnealing {
            start: RouteState::new(&ctx, interleaved()),
            objective: Objective::TotalDistance,
            budget: SearchBudget::start(Duration::ZERO, None),
            cancel: Arc::new(AtomicBool::new(false)),
        };
        let mut rng = StdRng::seed_from_u64(5);
        let next = problem.neighbor(&problem.start, &mut rng);
        assert_eq!(next.routes(), interleaved().as_slice());
        assert!(problem.cancel.load(Ordering::Relaxed));
    }

    #[test]
    fn test_annealing_without_moves() {
        let p = two_clusters(FleetConstraints::new(2));
        let ctx = ConstructionContext::from_problem(&p);
        let mut state = RouteState::new(&ctx, vec![vec![], vec![]]);
        let mut incumbent = Incumbent::new(&state, Objective::TotalDistance);
        let budget = SearchBudget::start(Duration::from_secs(10), None);
        let mut iterations = 0;
        let mut rng = StdRng::seed_from_u64(1);
        search(
            &mut state,
            Objective::TotalDistance,
            &budget,
            &mut incumbent,
            &mut iterations,
            &mut rng,
        );
        assert_eq!(iterations, 0);
    }
}
