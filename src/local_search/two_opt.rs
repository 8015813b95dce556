//! Intra-route 2-opt.
//!
//! # Algorithm
//!
//! For each pair of positions i < j in a route, reverse the segment
//! `r[i..=j]`. On a symmetric matrix the change in distance is
//!
//! ```text
//! delta = d(r[i-1], r[j]) + d(r[i], r[j+1]) - d(r[i-1], r[i]) - d(r[j], r[j+1])
//! ```
//!
//! Reversal also flips every arc inside the segment, so the rewritten route
//! is re-measured in full and asymmetric matrices are handled exactly.
//!
//! # Complexity
//!
//! O(n²) moves per route.
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

use rand::Rng;

use super::{used_routes, Move};

pub(super) fn moves(routes: &[Vec<usize>], out: &mut Vec<Move>) {
    for route in used_routes(routes) {
        let n = routes[route].len();
        for i in 0..n {
            for j in (i + 1)..n {
                out.push(Move::TwoOpt { route, i, j });
            }
        }
    }
}

pub(super) fn sample<R: Rng>(routes: &[Vec<usize>], rng: &mut R) -> Option<Move> {
    let candidates: Vec<usize> = used_routes(routes)
        .into_iter()
        .filter(|&r| routes[r].len() >= 2)
        .collect();
    if candidates.is_empty() {
        return None;
    }
    let route = candidates[rng.random_range(0..candidates.len())];
    let n = routes[route].len();
    let i = rng.random_range(0..n - 1);
    let j = rng.random_range(i + 1..n);
    Some(Move::TwoOpt { route, i, j })
}

pub(super) fn rewrite(
    routes: &[Vec<usize>],
    route: usize,
    i: usize,
    j: usize,
) -> Vec<(usize, Vec<usize>)> {
    let mut seq = routes[route].clone();
    seq[i..=j].reverse();
    vec![(route, seq)]
}
