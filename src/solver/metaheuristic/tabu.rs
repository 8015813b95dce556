//! Tabu search over [`u_metaheur::tabu`].
//!
//! # Algorithm
//!
//! [`RoutingTabu`] implements [`TabuProblem`]: the neighborhood is every
//! feasible move, sampled down to [`MAX_NEIGHBORS`] on large instances, and
//! a move's key names the customers it repositions. [`TabuRunner`] takes the
//! best admissible move each iteration, even a worsening one, keeps taken
//! keys tabu for `tenure` iterations and lets a tabu move through when it
//! beats the best solution seen (aspiration).
//!
//! Without an iteration limit the runner is driven in rounds of
//! [`ROUND_ITERATIONS`], each resuming from the best routes, until the
//! search stagnates or the deadline passes.
//!
//! # Reference
//!
//! Glover, F. (1986). "Future Paths for Integer Programming and Links to
//! Artificial Intelligence", *Computers & Operations Research* 13(5), 533-549.

use rand::seq::SliceRandom;
use rand::Rng;
use u_metaheur::tabu::{TabuConfig, TabuMove, TabuProblem, TabuRunner};

use super::{Incumbent, SearchBudget};
use crate::local_search::{neighborhood, RouteState};
use crate::solver::formulation::Objective;

const MIN_TENURE: usize = 3;
const MAX_TENURE: usize = 15;
const MAX_NO_IMPROVE: usize = 200;
const ROUND_ITERATIONS: usize = 1000;
/// Neighborhoods larger than this are randomly sampled.
const MAX_NEIGHBORS: usize = 512;

/// Tabu problem starting from a feasible [`RouteState`].
///
/// Returns an empty neighborhood once the deadline passes, which ends the
/// runner.
pub(super) struct RoutingTabu<'c, 'a> {
    start: RouteState<'c, 'a>,
    objective: Objective,
    budget: SearchBudget,
}

/// Tabu key of a move: the customers it repositions, in ascending order.
fn move_key(mut customers: Vec<usize>) -> String {
    customers.sort_unstable();
    customers
        .iter()
        .map(usize::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

impl<'c, 'a> TabuProblem for RoutingTabu<'c, 'a> {
    type Solution = RouteState<'c, 'a>;

    fn initial_solution<R: Rng>(&self, _rng: &mut R) -> RouteState<'c, 'a> {
        self.start.clone()
    }

    fn cost(&self, state: &RouteState<'c, 'a>) -> f64 {
        self.objective.score(state.lengths()).primary
    }

    fn neighbors<R: Rng>(
        &self,
        state: &RouteState<'c, 'a>,
        rng: &mut R,
    ) -> Vec<TabuMove<RouteState<'c, 'a>>> {
        if self.budget.timed_out() {
            return Vec::new();
        }
        let mut moves = neighborhood(state.routes());
        if moves.len() > MAX_NEIGHBORS {
            moves.shuffle(rng);
            moves.truncate(MAX_NEIGHBORS);
        }

        moves
            .into_iter()
            .filter_map(|mv| {
                let change = state.evaluate(&mv)?;
                let cost = self.objective.score(&state.lengths_after(&change)).primary;
                let key = move_key(mv.attributes(state.routes()));
                let mut solution = state.clone();
                solution.apply(change);
                Some(TabuMove {
                    solution,
                    key,
                    cost,
                })
            })
            .collect()
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
    let n = state.context().num_locations();
    let tenure = (n / 4).clamp(MIN_TENURE, MAX_TENURE);

    while !budget.exhausted(*iterations) {
        let round = budget
            .remaining(*iterations)
            .map_or(ROUND_ITERATIONS, |r| r.min(ROUND_ITERATIONS));
        let config = TabuConfig::default()
            .with_max_iterations(round)
            .with_tabu_tenure(tenure)
            .with_aspiration(true)
            .with_max_no_improve(MAX_NO_IMPROVE)
            .with_seed(rng.random());
        let problem = RoutingTabu {
            start: state.clone(),
            objective,
            budget: *budget,
        };

        let result = TabuRunner::run(&problem, &config);
        *iterations += result.iterations;
        incumbent.offer(&result.best, *iterations);
        *state = result.best;
        // stagnation, an empty neighborhood or the deadline
        if result.iterations < round {
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

    #[test]
    fn test_tabu_improves_and_keeps_going() {
        let p = two_clusters(FleetConstraints::new(2).with_capacity(40));
        let ctx = ConstructionContext::from_problem(&p);
        let mut state = RouteState::new(&ctx, interleaved());
        let initial = state.total_length();
        let mut incumbent = Incumbent::new(&state, Objective::TotalDistance);
        let budget = SearchBudget::start(Duration::from_secs(10), Some(100));
        let mut iterations = 0;
        let mut rng = StdRng::seed_from_u64(42);

        search(
            &mut state,
            Objective::TotalDistance,
            &budget,
            &mut incumbent,
            &mut iterations,
            &mut rng,
        );

        // runs past the first local optimum until the iteration cap
        assert_eq!(iterations, 100);
        assert!(incumbent.score().primary < initial);
    }

    #[test]
    fn test_tabu_single_customer_stops() {
        let p = two_clusters(FleetConstraints::new(1));
        let ctx = ConstructionContext::from_problem(&p);
        let mut state = RouteState::new(&ctx, vec![vec![1]]);
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
        assert_eq!(iterations, 1);
    }

    #[test]
    fn test_neighbors_are_feasible_and_keyed() {
        let p = two_clusters(FleetConstraints::new(2).with_capacity(40));
        let ctx = ConstructionContext::from_problem(&p);
        let problem = RoutingTabu {
            start: RouteState::new(&ctx, interleaved()),
            objective: Objective::TotalDistance,
            budget: SearchBudget::start(Duration::from_secs(10), None),
        };
        let mut rng = StdRng::seed_from_u64(3);
        let moves = problem.neighbors(&problem.start, &mut rng);
        assert!(!moves.is_empty());
        for mv in &moves {
            assert!((mv.cost - mv.solution.total_length()).abs() < 1e-9);
            assert!(!mv.key.is_empty());
            for route in mv.solution.routes() {
                assert!(route.len() <= 4, "capacity 40 holds four customers");
            }
        }
    }

    #[test]
    fn test_neighbors_empty_after_deadline() {
        let p = two_clusters(FleetConstraints::new(2).with_capacity(40));
        let ctx = ConstructionContext::from_problem(&p);
        let problem = RoutingTabu {
            start: RouteState::new(&ctx, interleaved()),
            objective: Objective::TotalDistance,
            budget: SearchBudget::start(Duration::ZERO, None),
        };
        let mut rng = StdRng::seed_from_u64(3);
        assert!(problem.neighbors(&problem.start, &mut rng).is_empty());
    }

    #[test]
    fn test_move_key_is_order_free() {
        assert_eq!(move_key(vec![7, 2]), "2,7");
        assert_eq!(move_key(vec![2, 7]), "2,7");
    }
}
