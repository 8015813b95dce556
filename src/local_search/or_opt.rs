//! Or-opt segment relocation.
//!
//! # Algorithm
//!
//! Moves a segment of 2 or 3 consecutive customers to another position in
//! the same route or to another route, keeping the segment's order.
//! Single-customer moves are covered by [`Move::Relocate`].
//!
//! # Complexity
//!
//! O(n²) moves per neighborhood, n = number of customers.
//!
//! # Reference
//!
//! Or, I. (1976). "Traveling Salesman-Type Combinatorial Problems and Their
//! Relation to the Logistics of Blood Banking". PhD thesis.

use rand::Rng;

use super::{used_routes, Move};

const SEGMENT_LENGTHS: [usize; 2] = [2, 3];

pub(super) fn moves(routes: &[Vec<usize>], targets: &[usize], out: &mut Vec<Move>) {
    for route in used_routes(routes) {
        let route_len = routes[route].len();
        for len in SEGMENT_LENGTHS.into_iter().filter(|&l| l <= route_len) {
            for start in 0..=route_len - len {
                for &to_route in targets {
                    if to_route == route {
                        out.extend(
                            (0..=route_len - len)
                                .filter(|&p| p != start)
                                .map(|to_pos| Move::OrOpt {
                                    route,
                                    start,
                                    len,
                                    to_route,
                                    to_pos,
                                }),
                        );
                    } else if !(routes[to_route].is_empty() && route_len == len) {
                        out.extend((0..=routes[to_route].len()).map(|to_pos| Move::OrOpt {
                            route,
                            start,
                            len,
                            to_route,
                            to_pos,
                        }));
                    }
                }
            }
        }
    }
}

pub(super) fn sample<R: Rng>(
    routes: &[Vec<usize>],
    targets: &[usize],
    rng: &mut R,
) -> Option<Move> {
    let candidates: Vec<usize> = used_routes(routes)
        .into_iter()
        .filter(|&r| routes[r].len() >= SEGMENT_LENGTHS[0])
        .collect();
    if candidates.is_empty() {
        return None;
    }
    let route = candidates[rng.random_range(0..candidates.len())];
    let route_len = routes[route].len();
    let len = SEGMENT_LENGTHS[rng.random_range(0..SEGMENT_LENGTHS.len())].min(route_len);
    let start = rng.random_range(0..=route_len - len);
    let to_route = targets[rng.random_range(0..targets.len())];

    let to_pos = if to_route == route {
        let positions = route_len - len + 1;
        if positions < 2 {
            return None;
        }
        let p = rng.random_range(0..positions - 1);
        if p >= start {
            p + 1
        } else {
            p
        }
    } else {
        if routes[to_route].is_empty() && route_len == len {
            return None;
        }
        rng.random_range(0..=routes[to_route].len())
    };

    Some(Move::OrOpt {
        route,
        start,
        len,
        to_route,
        to_pos,
    })
}

pub(super) fn rewrite(
    routes: &[Vec<usize>],
    route: usize,
    start: usize,
    len: usize,
    to_route: usize,
    to_pos: usize,
) -> Vec<(usize, Vec<usize>)> {
    let mut source = routes[route].clone();
    let segment: Vec<usize> = source.drain(start..start + len).collect();

    if to_route == route {
        source.splice(to_pos..to_pos, segment);
        vec![(route, source)]
    } else {
        let mut target = routes[to_route].clone();
        target.splice(to_pos..to_pos, segment);
        vec![(route, source), (to_route, target)]
    }
}
