//! Inter-route exchange operators.
//!
//! # Algorithm
//!
//! Two operators work across route pairs:
//!
//! - **Swap**: customers `aᵢ` and `bⱼ` trade places.
//! - **Cross-exchange (2-opt\*)** swaps tail segments. Given routes
//!   R1 = [a₁, ..., aᵢ, aᵢ₊₁, ..., aₙ] and R2 = [b₁, ..., bⱼ, bⱼ₊₁, ..., bₘ],
//!   produce:
//!
//! ```text
//! R1' = [a₁, ..., aᵢ, bⱼ₊₁, ..., bₘ]
//! R2' = [b₁, ..., bⱼ, aᵢ₊₁, ..., aₙ]
//! ```
//!
//! With an empty R2 the cross-exchange splits R1 in two.
//!
//! # Complexity
//!
//! O(n²) moves per neighborhood for either operator, n = number of customers.
//!
//! # Reference
//!
//! Potvin, J.-Y. & Rousseau, J.-M. (1995). "An Exchange Heuristic for
//! Routeing Problems with Time Windows", *Journal of the Operational Research
//! Society* 46(12), 1433-1446.

use rand::Rng;

use super::{insertion_targets, used_routes, Move};

pub(super) fn moves(routes: &[Vec<usize>], out: &mut Vec<Move>) {
    let used = used_routes(routes);
    for (k, &route_a) in used.iter().enumerate() {
        for &route_b in &used[k + 1..] {
            for pos_a in 0..routes[route_a].len() {
                for pos_b in 0..routes[route_b].len() {
                    out.push(Move::Exchange {
                        route_a,
                        pos_a,
                        route_b,
                        pos_b,
                    });
                }
            }
        }
    }
}

pub(super) fn sample<R: Rng>(routes: &[Vec<usize>], rng: &mut R) -> Option<Move> {
    let used = used_routes(routes);
    if used.len() < 2 {
        return None;
    }
    let (route_a, route_b) = distinct_pair(&used, rng);
    Some(Move::Exchange {
        route_a,
        pos_a: rng.random_range(0..routes[route_a].len()),
        route_b,
        pos_b: rng.random_range(0..routes[route_b].len()),
    })
}

pub(super) fn rewrite(
    routes: &[Vec<usize>],
    route_a: usize,
    pos_a: usize,
    route_b: usize,
    pos_b: usize,
) -> Vec<(usize, Vec<usize>)> {
    let mut a = routes[route_a].clone();
    let mut b = routes[route_b].clone();
    std::mem::swap(&mut a[pos_a], &mut b[pos_b]);
    vec![(route_a, a), (route_b, b)]
}

pub(super) fn star_moves(routes: &[Vec<usize>], out: &mut Vec<Move>) {
    let targets = insertion_targets(routes);
    for (k, &route_a) in targets.iter().enumerate() {
        for &route_b in &targets[k + 1..] {
            let (len_a, len_b) = (routes[route_a].len(), routes[route_b].len());
            for cut_a in 0..=len_a {
                for cut_b in 0..=len_b {
                    if is_trivial_cut(cut_a, len_a, cut_b, len_b) {
                        continue;
                    }
                    out.push(Move::TwoOptStar {
                        route_a,
                        cut_a,
                        route_b,
                        cut_b,
                    });
                }
            }
        }
    }
}

pub(super) fn sample_star<R: Rng>(routes: &[Vec<usize>], rng: &mut R) -> Option<Move> {
    let targets = insertion_targets(routes);
    if targets.len() < 2 {
        return None;
    }
    let (route_a, route_b) = distinct_pair(&targets, rng);
    let (len_a, len_b) = (routes[route_a].len(), routes[route_b].len());
    let cut_a = rng.random_range(0..=len_a);
    let cut_b = rng.random_range(0..=len_b);
    if is_trivial_cut(cut_a, len_a, cut_b, len_b) {
        return None;
    }
    Some(Move::TwoOptStar {
        route_a,
        cut_a,
        route_b,
        cut_b,
    })
}

pub(super) fn rewrite_star(
    routes: &[Vec<usize>],
    route_a: usize,
    cut_a: usize,
    route_b: usize,
    cut_b: usize,
) -> Vec<(usize, Vec<usize>)> {
    let (a, b) = (&routes[route_a], &routes[route_b]);
    let new_a = a[..cut_a].iter().chain(&b[cut_b..]).copied().collect();
    let new_b = b[..cut_b].iter().chain(&a[cut_a..]).copied().collect();
    vec![(route_a, new_a), (route_b, new_b)]
}

/// Cuts at both ends leave the routes unchanged; cuts at both starts only
/// swap vehicles.
fn is_trivial_cut(cut_a: usize, len_a: usize, cut_b: usize, len_b: usize) -> bool {
    (cut_a == len_a && cut_b == len_b) || (cut_a == 0 && cut_b == 0)
}

/// Two distinct entries of `pool` in ascending order.
fn distinct_pair<R: Rng>(pool: &[usize], rng: &mut R) -> (usize, usize) {
    let i = rng.random_range(0..pool.len());
    let mut j = rng.random_range(0..pool.len() - 1);
    if j >= i {
        j += 1;
    }
    (pool[i.min(j)], pool[i.max(j)])
}
