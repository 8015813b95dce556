//! Metaheuristics that steer local search out of local optima.
//!
//! - [`Metaheuristic::GreedyDescent`]: best-improvement descent, stops at the
//!   first local optimum
//! - [`Metaheuristic::GuidedLocalSearch`]: arc penalties reshape the landscape
//!   (Voudouris & Tsang, 1999)
//! - [`Metaheuristic::SimulatedAnnealing`]: [`u_metaheur::sa`] driven by random
//!   feasible moves (Kirkpatrick et al., 1983)
//! - [`Metaheuristic::TabuSearch`]: [`u_metaheur::tabu`] over the full move
//!   neighborhood (Glover, 1986)
//!
//! All four work on a [`RouteState`] that only ever holds feasible routes and
//! report the best solution seen. All but greedy descent run until the
//! [`SearchBudget`] is spent.

mod annealing;
mod descent;
mod guided;
mod tabu;

use std::fmt;
use std::time::{Duration, Instant};

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::formulation::{Objective, Score};
use crate::local_search::{neighborhood, Change, Move, RouteState};

/// Deadline checks inside a neighborhood scan happen every this many moves.
const DEADLINE_CHECK_INTERVAL: usize = 128;
/// Longer time limits are cut to this (one year).
const MAX_TIME_LIMIT: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// Local search metaheuristic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Metaheuristic {
    GreedyDescent,
    #[default]
    GuidedLocalSearch,
    SimulatedAnnealing,
    TabuSearch,
}

impl fmt::Display for Metaheuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Metaheuristic::GreedyDescent => "GREEDY_DESCENT",
            Metaheuristic::GuidedLocalSearch => "GUIDED_LOCAL_SEARCH",
            Metaheuristic::SimulatedAnnealing => "SIMULATED_ANNEALING",
            Metaheuristic::TabuSearch => "TABU_SEARCH",
        })
    }
}

/// Wall-clock deadline plus an optional iteration cap.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SearchBudget {
    deadline: Instant,
    iteration_limit: Option<usize>,
}

impl SearchBudget {
    /// Starts the clock now. Time limits above [`MAX_TIME_LIMIT`] are clamped,
    /// so every budget has a deadline.
    pub(crate) fn start(time_limit: Duration, iteration_limit: Option<usize>) -> Self {
        let now = Instant::now();
        let time_limit = time_limit.min(MAX_TIME_LIMIT);
        Self {
            deadline: now.checked_add(time_limit).unwrap_or(now),
            iteration_limit,
        }
    }

    pub(crate) fn timed_out(&self) -> bool {
        Instant::now() >= self.deadline
    }

    pub(crate) fn exhausted(&self, iterations: usize) -> bool {
        self.iteration_limit.is_some_and(|limit| iterations >= limit) || self.timed_out()
    }

    /// Iterations left under the limit, `None` without one.
    pub(crate) fn remaining(&self, iterations: usize) -> Option<usize> {
        self.iteration_limit.map(|limit| limit.saturating_sub(iterations))
    }
}

/// Result of a metaheuristic run.
#[derive(Debug, Clone)]
pub(crate) struct Outcome {
    pub routes: Vec<Vec<usize>>,
    pub score: Score,
    pub iterations: usize,
    pub timed_out: bool,
}

/// Runs `kind` from `state` and returns the best solution seen.
pub(crate) fn run<R: Rng>(
    kind: Metaheuristic,
    mut state: RouteState,
    objective: Objective,
    budget: &SearchBudget,
    rng: &mut R,
) -> Outcome {
    let mut incumbent = Incumbent::new(&state, objective);
    let initial = incumbent.score;
    let mut iterations = 0;

    match kind {
        Metaheuristic::GreedyDescent => {
            descent::search(&mut state, objective, budget, &mut incumbent, &mut iterations)
        }
        Metaheuristic::GuidedLocalSearch => {
            guided::search(&mut state, objective, budget, &mut incumbent, &mut iterations)
        }
        Metaheuristic::SimulatedAnnealing => {
            annealing::search(&mut state, objective, budget, &mut incumbent, &mut iterations, rng)
        }
        Metaheuristic::TabuSearch => {
            tabu::search(&mut state, objective, budget, &mut incumbent, &mut iterations, rng)
        }
    }

    let timed_out = budget.timed_out();
    debug!(
        metaheuristic = %kind,
        iterations,
        timed_out,
        initial = initial.primary,
        best = incumbent.score.primary,
        "metaheuristic finished"
    );

    Outcome {
        routes: incumbent.routes,
        score: incumbent.score,
        iterations,
        timed_out,
    }
}

/// Best solution seen so far.
pub(crate) struct Incumbent {
    routes: Vec<Vec<usize>>,
    score: Score,
    objective: Objective,
}

impl Incumbent {
    fn new(state: &RouteState, objective: Objective) -> Self {
        Self {
            routes: state.routes().to_vec(),
            score: objective.score(state.lengths()),
            objective,
        }
    }

    pub(crate) fn score(&self) -> Score {
        self.score
    }

    /// Records `state` if it beats the incumbent.
    fn offer(&mut self, state: &RouteState, iteration: usize) -> bool {
        let score = self.objective.score(state.lengths());
        if !score.improves_on(&self.score) {
            return false;
        }
        trace!(iteration, objective = score.primary, "new incumbent");
        self.routes = state.routes().to_vec();
        self.score = score;
        true
    }
}

/// Result of scanning the full neighborhood.
enum Scan {
    /// The best-scoring feasible move.
    Best { mv: Move, change: Change, score: Score },
    /// No feasible move passed the filter.
    Empty,
    /// The deadline passed mid-scan.
    Interrupted,
}

/// Evaluates every feasible move and keeps the one with the best score.
///
/// `score` may reject a move by returning `None`. Ties keep the move found
/// first, which makes the scan deterministic.
fn scan<F>(state: &RouteState, budget: &SearchBudget, mut score: F) -> Scan
where
    F: FnMut(&Move, &Change) -> Option<Score>,
{
    let mut best: Option<(Move, Change, Score)> = None;

    for (k, mv) in neighborhood(state.routes()).into_iter().enumerate() {
        if k % DEADLINE_CHECK_INTERVAL == DEADLINE_CHECK_INTERVAL - 1 && budget.timed_out() {
            return Scan::Interrupted;
        }
        let Some(change) = state.evaluate(&mv) else {
            continue;
        };
        let Some(s) = score(&mv, &change) else {
            continue;
        };
        if best.as_ref().map_or(true, |(_, _, b)| s.improves_on(b)) {
            best = Some((mv, change, s));
        }
    }

    match best {
        Some((mv, change, score)) => Scan::Best { mv, change, score },
        None => Scan::Empty,
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::{interleaved, two_clusters};
    use super::*;
    use crate::constructive::ConstructionContext;
    use crate::models::FleetConstraints;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn run_kind(kind: Metaheuristic) -> (Outcome, f64) {
        let p = two_clusters(FleetConstraints::new(2).with_capacity(40));
        let ctx = ConstructionContext::from_problem(&p);
        let state = RouteState::new(&ctx, interleaved());
        let initial = Objective::TotalDistance.score(state.lengths()).primary;
        let budget = SearchBudget::start(Duration::from_secs(10), Some(300));
        let mut rng = StdRng::seed_from_u64(42);
        (run(kind, state, Objective::TotalDistance, &budget, &mut rng), initial)
    }

    #[test]
    fn test_every_metaheuristic_improves() {
        for kind in [
            Metaheuristic::GreedyDescent,
            Metaheuristic::GuidedLocalSearch,
            Metaheuristic::SimulatedAnnealing,
            Metaheuristic::TabuSearch,
        ] {
            let (outcome, initial) = run_kind(kind);
            assert!(outcome.score.primary < initial - 1.0, "{kind}");
            let mut all: Vec<usize> = outcome.routes.iter().flatten().copied().collect();
            all.sort_unstable();
            assert_eq!(all, (1..=8).collect::<Vec<_>>(), "{kind}");
        }
    }

    #[test]
    fn test_iteration_limit_respected() {
        let (outcome, _) = run_kind(Metaheuristic::TabuSearch);
        assert!(outcome.iterations <= 300);
        assert!(!outcome.timed_out);
    }

    #[test]
    fn test_zero_time_limit_returns_start() {
        let p = two_clusters(FleetConstraints::new(2).with_capacity(40));
        let ctx = ConstructionContext::from_problem(&p);
        let state = RouteState::new(&ctx, interleaved());
        let budget = SearchBudget::start(Duration::ZERO, None);
        let mut rng = StdRng::seed_from_u64(1);
        let outcome = run(
            Metaheuristic::GuidedLocalSearch,
            state,
            Objective::TotalDistance,
            &budget,
            &mut rng,
        );
        assert_eq!(outcome.routes, interleaved());
        assert_eq!(outcome.iterations, 0);
        assert!(outcome.timed_out);
    }

    #[test]
    fn test_budget() {
        let b = SearchBudget::start(Duration::from_secs(60), Some(5));
        assert!(!b.exhausted(4));
        assert!(b.exhausted(5));
        assert!(!b.timed_out());
        assert_eq!(b.remaining(3), Some(2));
        assert_eq!(b.remaining(9), Some(0));
        assert_eq!(SearchBudget::start(Duration::ZERO, None).remaining(3), None);
    }

    #[test]
    fn test_huge_time_limit_still_has_deadline() {
        let before = Instant::now();
        let b = SearchBudget::start(Duration::MAX, None);
        assert!(!b.exhausted(usize::MAX));
        assert!(b.deadline > before);
        assert!(b.deadline <= Instant::now() + MAX_TIME_LIMIT);
    }

    #[test]
    fn test_metaheuristic_serde_names() {
        let m: Metaheuristic = serde_json::from_str(r#""SIMULATED_ANNEALING""#).expect("parse");
        assert_eq!(m, Metaheuristic::SimulatedAnnealing);
        assert_eq!(Metaheuristic::GuidedLocalSearch.to_string(), "GUIDED_LOCAL_SEARCH");
    }
}
