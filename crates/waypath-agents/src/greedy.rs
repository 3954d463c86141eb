use waypath_core::Point;

use crate::frontier::FrontierKind;
use crate::strategy::{Endpoints, Strategy};

/// Greedy best-first search: always expands the waiting state closest to the
/// goal in a straight line.
///
/// Accumulated cost plays no part in the ordering, so the path returned can
/// be much longer than necessary. Because the heuristic depends on the state
/// alone, a rediscovered waiting state never has a strictly better priority
/// and is always dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GreedyBestFirst;

impl Strategy for GreedyBestFirst {
    fn label(&self) -> &'static str {
        "Greedy Best First Search"
    }

    fn frontier_kind(&self) -> FrontierKind {
        FrontierKind::Priority
    }

    fn priority(&self, ends: &Endpoints, state: Point, _cost: i32) -> f64 {
        state.distance(ends.goal)
    }
}
