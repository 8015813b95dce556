//! Best-improvement descent.

use super::{scan, Incumbent, Scan, SearchBudget};
use crate::local_search::RouteState;
use crate::solver::formulation::Objective;

/// Applies the best improving move until none is left or the budget runs out.
pub(super) fn search(
    state: &mut RouteState,
    objective: Objective,
    budget: &SearchBudget,
    incumbent: &mut Incumbent,
    iterations: &mut usize,
) {
    while !budget.exhausted(*iterations) {
        *iterations += 1;
        let current = objective.score(state.lengths());

        let result = scan(state, budget, |_, change| {
            Some(objective.score(&state.lengths_after(change)))
        });
        match result {
            Scan::Best { change, score, .. } if score.improves_on(&current) => {
                state.apply(change);
                incumbent.offer(state, *iterations);
            }
            _ => break,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{interleaved, two_clusters};
    use super::*;
    use crate::constructive::ConstructionContext;
    use crate::models::FleetConstraints;
    use std::time::Duration;

    #[test]
    fn test_descent_improves_and_tracks_incumbent() {
        let p = two_clusters(FleetConstraints::new(2).with_capacity(40));
        let ctx = ConstructionContext::from_problem(&p);
        let mut state = RouteState::new(&ctx, interleaved());
        let initial = state.total_length();
        let mut incumbent = Incumbent::new(&state, Objective::TotalDistance);
        let budget = SearchBudget::start(Duration::from_secs(10), None);
        let mut iterations = 0;

        search(&mut state, Objective::TotalDistance, &budget, &mut incumbent, &mut iterations);

        assert!(state.total_length() < initial);
        assert_eq!(incumbent.routes, state.routes());
        assert!((incumbent.score().primary - state.total_length()).abs() < 1e-9);
    }

    #[test]
    fn test_descent_stops_at_local_optimum() {
        let p = two_clusters(FleetConstraints::new(2).with_capacity(40));
        let ctx = ConstructionContext::from_problem(&p);
        let mut state = RouteState::new(&ctx, interleaved());
        let mut incumbent = Incumbent::new(&state, Objective::TotalDistance);
        let budget = SearchBudget::start(Duration::from_secs(10), None);
        let mut iterations = 0;
        search(&mut state, Objective::TotalDistance, &budget, &mut incumbent, &mut iterations);
        let first = iterations;

        search(&mut state, Objective::TotalDistance, &budget, &mut incumbent, &mut iterations);
        assert_eq!(iterations, first + 1);
    }
}
