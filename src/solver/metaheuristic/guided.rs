//! Guided local search.
//!
//! # Algorithm
//!
//! Descends on an augmented objective `g = f + λ · Σ p(a, b)` over the arcs
//! in use. At each local optimum of `g`, the arcs with the highest utility
//! `d(a, b) / (1 + p(a, b))` get their penalty raised, pushing the search
//! away from long arcs it keeps returning to. λ is set once, at the first
//! local optimum, to `α · f / arcs`.
//!
//! # Reference
//!
//! Voudouris, C. & Tsang, E. (1999). "Guided local search and its
//! application to the traveling salesman problem", *European Journal of
//! Operational Research* 113(2), 469-499.

use super::{scan, Incumbent, Scan, SearchBudget};
use crate::distance::DistanceMatrix;
use crate::local_search::RouteState;
use crate::models::DEPOT;
use crate::solver::formulation::{Objective, Score};

const ALPHA: f64 = 0.1;
const UTILITY_EPSILON: f64 = 1e-9;

/// Arc penalty counts, kept symmetric.
struct Penalties {
    n: usize,
    counts: Vec<u32>,
}

impl Penalties {
    fn new(n: usize) -> Self {
        Self {
            n,
            counts: vec![0; n * n],
        }
    }

    fn get(&self, a: usize, b: usize) -> u32 {
        self.counts[a * self.n + b]
    }

    fn bump(&mut self, a: usize, b: usize) {
        self.counts[a * self.n + b] += 1;
        if a != b {
            self.counts[b * self.n + a] += 1;
        }
    }

    /// Sum of penalties over a closed route.
    fn route(&self, customers: &[usize]) -> u64 {
        arcs(customers).map(|(a, b)| self.get(a, b) as u64).sum()
    }
}

/// Arcs of the closed tour `depot → customers → depot`; nothing for an empty route.
fn arcs(customers: &[usize]) -> impl Iterator<Item = (usize, usize)> + '_ {
    let depot_legs = customers
        .first()
        .map(|&first| (DEPOT, first))
        .into_iter()
        .chain(customers.last().map(|&last| (last, DEPOT)));
    customers
        .windows(2)
        .map(|w| (w[0], w[1]))
        .chain(depot_legs)
}

pub(super) fn search(
    state: &mut RouteState,
    objective: Objective,
    budget: &SearchBudget,
    incumbent: &mut Incumbent,
    iterations: &mut usize,
) {
    let distances = state.context().distances;
    let mut penalties = Penalties::new(distances.size());
    let mut route_penalty: Vec<u64> = vec![0; state.routes().len()];
    let mut lambda: Option<f64> = None;

    while !budget.exhausted(*iterations) {
        *iterations += 1;
        let lam = lambda.unwrap_or(0.0);
        let penalty_total: u64 = route_penalty.iter().sum();
        let current = augmented(objective.score(state.lengths()), lam, penalty_total as f64);

        let result = scan(state, budget, |_, change| {
            let mut penalty = penalty_total as f64;
            for rc in &change.routes {
                penalty += penalties.route(&rc.customers) as f64 - route_penalty[rc.index] as f64;
            }
            Some(augmented(
                objective.score(&state.lengths_after(change)),
                lam,
                penalty,
            ))
        });

        match result {
            Scan::Interrupted | Scan::Empty => break,
            Scan::Best { change, score, .. } if score.improves_on(&current) => {
                for rc in &change.routes {
                    route_penalty[rc.index] = penalties.route(&rc.customers);
                }
                state.apply(change);
                incumbent.offer(state, *iterations);
            }
            Scan::Best { .. } => {
                let lam = *lambda.get_or_insert_with(|| initial_lambda(state, objective));
                if lam <= 0.0 || !penalize(state.routes(), distances, &mut penalties) {
                    break;
                }
                for (r, customers) in state.routes().iter().enumerate() {
                    route_penalty[r] = penalties.route(customers);
                }
            }
        }
    }
}

fn augmented(real: Score, lambda: f64, penalty: f64) -> Score {
    Score {
        primary: real.primary + lambda * penalty,
        secondary: real.secondary,
    }
}

fn initial_lambda(state: &RouteState, objective: Objective) -> f64 {
    let arcs_used: usize = state
        .routes()
        .iter()
        .filter(|r| !r.is_empty())
        .map(|r| r.len() + 1)
        .sum();
    ALPHA * objective.score(state.lengths()).primary / arcs_used.max(1) as f64
}

/// Raises the penalty of every maximum-utility arc. Returns `false` if the
/// solution uses no arcs.
fn penalize(routes: &[Vec<usize>], distances: &DistanceMatrix, penalties: &mut Penalties) -> bool {
    let utility =
        |a: usize, b: usize, p: &Penalties| distances.get(a, b) / (1.0 + p.get(a, b) as f64);

    let used: Vec<(usize, usize)> = routes.iter().flat_map(|r| arcs(r)).collect();
    let Some(max) = used
        .iter()
        .map(|&(a, b)| utility(a, b, penalties))
        .max_by(f64::total_cmp)
    else {
        return false;
    };

    let targets: Vec<(usize, usize)> = used
        .into_iter()
        .filter(|&(a, b)| utility(a, b, penalties) >= max - UTILITY_EPSILON)
        .collect();
    for (a, b) in targets {
        penalties.bump(a, b);
    }
    true
}
