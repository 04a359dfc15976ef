//! 2-opt local search.
//!
//! Starts from a tour (a shuffled ordering or a Nearest-Neighbor tour) with
//! a fixed start city and repeatedly reverses a segment whenever doing so
//! shortens the tour, until no reversal helps. The result is a 2-optimal
//! tour; it is never worse than the starting one and never better than the
//! Held-Karp optimum.
//!
//! Missing edges are never introduced: a reversal that would use an
//! infinite edge is skipped, and a starting tour that already uses one is
//! rejected.
//!
//! # References
//!
//! - Croes, G.A. (1958). "A method for solving traveling salesman problems",
//!   *Operations Research* 6(6), 791-812.
//! - Lin, S. & Kernighan, B.W. (1973). "An Effective Heuristic Algorithm for
//!   the Traveling-Salesman Problem", *Operations Research* 21(2), 498-516.

mod config;
mod runner;

pub use config::{InitialTour, TwoOptConfig};
pub use runner::{TwoOptResult, TwoOptRunner};
