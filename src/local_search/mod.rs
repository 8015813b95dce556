//! Local search neighborhoods for improving VRP solutions.
//!
//! - [`Move::Relocate`]: Move one customer to another position or route
//! - [`Move::Exchange`]: Swap two customers on different routes
//! - [`Move::OrOpt`]: Move a segment of 2–3 consecutive customers
//! - [`Move::TwoOpt`]: Intra-route segment reversal
//! - [`Move::TwoOptStar`]: Inter-route tail swap
//!
//! Moves are plain descriptions over customer sequences (depot excluded).
//! [`RouteState`] evaluates them against capacity and distance limits and
//! applies the feasible ones; the metaheuristics in
//! [`crate::solver`] decide which to take.
//!
//! Every move is evaluated by rebuilding the affected routes, so arc costs
//! need not be symmetric nor satisfy the triangle inequality.

mod exchange;
mod or_opt;
mod relocate;
mod state;
mod two_opt;

pub use state::{Change, RouteChange, RouteState};

use rand::Rng;

/// A neighborhood move over per-vehicle customer sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    /// Removes `routes[from_route][from_pos]` and inserts it at `to_pos` of
    /// `to_route`. For an intra-route move `to_pos` indexes the route after
    /// removal.
    Relocate {
        from_route: usize,
        from_pos: usize,
        to_route: usize,
        to_pos: usize,
    },
    /// Swaps `routes[route_a][pos_a]` with `routes[route_b][pos_b]`.
    Exchange {
        route_a: usize,
        pos_a: usize,
        route_b: usize,
        pos_b: usize,
    },
    /// Moves `len` customers starting at `start` to `to_pos` of `to_route`,
    /// preserving their order.
    OrOpt {
        route: usize,
        start: usize,
        len: usize,
        to_route: usize,
        to_pos: usize,
    },
    /// Reverses customers `i..=j` of a route.
    TwoOpt { route: usize, i: usize, j: usize },
    /// Cuts both routes and swaps their tails: `a[..cut_a] + b[cut_b..]` and
    /// `b[..cut_b] + a[cut_a..]`.
    TwoOptStar {
        route_a: usize,
        cut_a: usize,
        route_b: usize,
        cut_b: usize,
    },
}

impl Move {
    /// Rebuilds the routes this move touches. Returns `(route index, new
    /// customer sequence)` pairs.
    pub fn rewrite(&self, routes: &[Vec<usize>]) -> Vec<(usize, Vec<usize>)> {
        match *self {
            Move::Relocate {
                from_route,
                from_pos,
                to_route,
                to_pos,
            } => relocate::rewrite(routes, from_route, from_pos, to_route, to_pos),
            Move::Exchange {
                route_a,
                pos_a,
                route_b,
                pos_b,
            } => exchange::rewrite(routes, route_a, pos_a, route_b, pos_b),
            Move::OrOpt {
                route,
                start,
                len,
                to_route,
                to_pos,
            } => or_opt::rewrite(routes, route, start, len, to_route, to_pos),
            Move::TwoOpt { route, i, j } => two_opt::rewrite(routes, route, i, j),
            Move::TwoOptStar {
                route_a,
                cut_a,
                route_b,
                cut_b,
            } => exchange::rewrite_star(routes, route_a, cut_a, route_b, cut_b),
        }
    }

    /// Customers whose placement this move changes; tabu search forbids
    /// moving them again for a while.
    pub fn attributes(&self, routes: &[Vec<usize>]) -> Vec<usize> {
        match *self {
            Move::Relocate {
                from_route,
                from_pos,
                ..
            } => vec![routes[from_route][from_pos]],
            Move::Exchange {
                route_a,
                pos_a,
                route_b,
                pos_b,
            } => vec![routes[route_a][pos_a], routes[route_b][pos_b]],
            Move::OrOpt {
                route, start, len, ..
            } => routes[route][start..start + len].to_vec(),
            Move::TwoOpt { route, i, j } => vec![routes[route][i], routes[route][j]],
            Move::TwoOptStar {
                route_a,
                cut_a,
                route_b,
                cut_b,
            } => routes[route_a]
                .get(cut_a)
                .into_iter()
                .chain(routes[route_b].get(cut_b))
                .copied()
                .collect(),
        }
    }
}

/// Lists every move in the neighborhood of `routes`.
///
/// Among empty routes only the first is used as a target; with a homogeneous
/// fleet the others are interchangeable.
///
/// # Examples
///
/// ```
/// use fleet_routing::local_search::{neighborhood, Move};
///
/// let routes = vec![vec![1, 2], vec![]];
/// let moves = neighborhood(&routes);
/// assert!(moves.contains(&Move::TwoOpt { route: 0, i: 0, j: 1 }));
/// assert!(moves.contains(&Move::Relocate { from_route: 0, from_pos: 1, to_route: 1, to_pos: 0 }));
/// ```
pub fn neighborhood(routes: &[Vec<usize>]) -> Vec<Move> {
    let targets = insertion_targets(routes);
    let mut moves = Vec::new();
    relocate::moves(routes, &targets, &mut moves);
    exchange::moves(routes, &mut moves);
    or_opt::moves(routes, &targets, &mut moves);
    two_opt::moves(routes, &mut moves);
    exchange::star_moves(routes, &mut moves);
    moves
}

/// Draws one random move, or `None` if the neighborhood is empty.
///
/// Tries each operator in a random order and returns the first that can be
/// sampled.
pub fn sample_move<R: Rng>(routes: &[Vec<usize>], rng: &mut R) -> Option<Move> {
    let targets = insertion_targets(routes);
    let start = rng.random_range(0..5);
    (0..5).find_map(|k| match (start + k) % 5 {
        0 => relocate::sample(routes, &targets, rng),
        1 => exchange::sample(routes, rng),
        2 => or_opt::sample(routes, &targets, rng),
        3 => two_opt::sample(routes, rng),
        _ => exchange::sample_star(routes, rng),
    })
}

/// Route indices worth inserting into: every non-empty route plus the first
/// empty one.
fn insertion_targets(routes: &[Vec<usize>]) -> Vec<usize> {
    let mut targets: Vec<usize> = (0..routes.len()).filter(|&r| !routes[r].is_empty()).collect();
    if let Some(empty) = routes.iter().position(|r| r.is_empty()) {
        targets.push(empty);
        targets.sort_unstable();
    }
    targets
}

/// Non-empty route indices.
fn used_routes(routes: &[Vec<usize>]) -> Vec<usize> {
    (0..routes.len()).filter(|&r| !routes[r].is_empty()).collect()
}
