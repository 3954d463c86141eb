use waypath_core::Point;

use crate::frontier::FrontierKind;
use crate::strategy::{Endpoints, Strategy};

/// Uninformed breadth-first search.
///
/// FIFO frontier, uniform step cost. States are closed as soon as they are
/// discovered (the start state included), so every state enters the tree at
/// most once and the first path found has the fewest moves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BreadthFirst;

impl Strategy for BreadthFirst {
    fn label(&self) -> &'static str {
        "Breadth First Search"
    }

    fn frontier_kind(&self) -> FrontierKind {
        FrontierKind::Fifo
    }

    fn closes_on_discovery(&self) -> bool {
        true
    }

    fn priority(&self, _ends: &Endpoints, _state: Point, cost: i32) -> f64 {
        f64::from(cost)
    }
}
