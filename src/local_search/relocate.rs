//! Customer relocation operator.
//!
//! # Algorithm
//!
//! Removes one customer from its route and reinserts it at another position,
//! either later or earlier in the same route or anywhere in another route.
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

pub(super) fn moves(routes: &[Vec<usize>], targets: &[usize], out: &mut Vec<Move>) {
    for from_route in used_routes(routes) {
        let len = routes[from_route].len();
        for from_pos in 0..len {
            for &to_route in targets {
                if to_route == from_route {
                    out.extend((0..len).filter(|&p| p != from_pos).map(|to_pos| Move::Relocate {
                        from_route,
                        from_pos,
                        to_route,
                        to_pos,
                    }));
                } else if !(routes[to_route].is_empty() && len == 1) {
                    out.extend((0..=routes[to_route].len()).map(|to_pos| Move::Relocate {
                        from_route,
                        from_pos,
                        to_route,
                        to_pos,
                    }));
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
    let used = used_routes(routes);
    if used.is_empty() {
        return None;
    }
    let from_route = used[rng.random_range(0..used.len())];
    let len = routes[from_route].len();
    let from_pos = rng.random_range(0..len);
    let to_route = targets[rng.random_range(0..targets.len())];

    let to_pos = if to_route == from_route {
        if len < 2 {
            return None;
        }
        let p = rng.random_range(0..len - 1);
        if p >= from_pos {
            p + 1
        } else {
            p
        }
    } else {
        if routes[to_route].is_empty() && len == 1 {
            return None;
        }
        rng.random_range(0..=routes[to_route].len())
    };

    Some(Move::Relocate {
        from_route,
        from_pos,
        to_route,
        to_pos,
    })
}

pub(super) fn rewrite(
    routes: &[Vec<usize>],
    from_route: usize,
    from_pos: usize,
    to_route: usize,
    to_pos: usize,
) -> Vec<(usize, Vec<usize>)> {
    let mut source = routes[from_route].clone();
    let customer = source.remove(from_pos);

    if from_route == to_route {
        source.insert(to_pos, customer);
        vec![(from_route, source)]
    } else {
        let mut target = routes[to_route].clone();
        target.insert(to_pos, customer);
        vec![(from_route, source), (to_route, target)]
    }
}
