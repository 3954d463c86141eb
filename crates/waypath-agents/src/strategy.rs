use std::fmt;
use std::str::FromStr;

use waypath_core::Point;

use crate::astar::AStar;
use crate::bfs::BreadthFirst;
use crate::frontier::FrontierKind;
use crate::greedy::GreedyBestFirst;

/// Start and goal of the current search, handed to priority functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoints {
    pub start: Point,
    pub goal: Point,
}

/// What distinguishes one search strategy from another.
///
/// The shared driver in [`search`](crate::search()) does everything else:
/// goal testing on pop, closed-set bookkeeping, duplicate handling and tree
/// building.
pub trait Strategy {
    /// Human-readable name shown next to results.
    fn label(&self) -> &'static str;

    /// Ordering used by the frontier.
    fn frontier_kind(&self) -> FrontierKind;

    /// Whether states enter the closed set when discovered rather than when
    /// expanded.
    fn closes_on_discovery(&self) -> bool {
        false
    }

    /// Ordering value of a node for `state` reached after `cost` moves.
    /// Smaller is better.
    fn priority(&self, ends: &Endpoints, state: Point, cost: i32) -> f64;
}

impl<S: Strategy + ?Sized> Strategy for &S {
    fn label(&self) -> &'static str {
        (**self).label()
    }

    fn frontier_kind(&self) -> FrontierKind {
        (**self).frontier_kind()
    }

    fn closes_on_discovery(&self) -> bool {
        (**self).closes_on_discovery()
    }

    fn priority(&self, ends: &Endpoints, state: Point, cost: i32) -> f64 {
        (**self).priority(ends, state, cost)
    }
}

/// Runtime choice between the built-in strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StrategyKind {
    #[default]
    BreadthFirst,
    GreedyBestFirst,
    AStar,
}

impl StrategyKind {
    /// Every built-in strategy.
    pub const ALL: [StrategyKind; 3] = [
        StrategyKind::BreadthFirst,
        StrategyKind::GreedyBestFirst,
        StrategyKind::AStar,
    ];

    fn inner(self) -> &'static dyn Strategy {
        match self {
            StrategyKind::BreadthFirst => &BreadthFirst,
            StrategyKind::GreedyBestFirst => &GreedyBestFirst,
            StrategyKind::AStar => &AStar,
        }
    }
}

impl Strategy for StrategyKind {
    fn label(&self) -> &'static str {
        self.inner().label()
    }

    fn frontier_kind(&self) -> FrontierKind {
        self.inner().frontier_kind()
    }

    fn closes_on_discovery(&self) -> bool {
        self.inner().closes_on_discovery()
    }

    fn priority(&self, ends: &Endpoints, state: Point, cost: i32) -> f64 {
        self.inner().priority(ends, state, cost)
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for StrategyKind {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bfs" | "breadth-first" | "breadth_first" => Ok(StrategyKind::BreadthFirst),
            "greedy" | "gbfs" | "greedy-best-first" | "greedy_best_first" => {
                Ok(StrategyKind::GreedyBestFirst)
            }
            "astar" | "a*" | "a-star" => Ok(StrategyKind::AStar),
            _ => Err(UnknownStrategy(s.to_string())),
        }
    }
}

/// Returned when parsing a [`StrategyKind`] from an unrecognised name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStrategy(pub String);

impl fmt::Display for UnknownStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown strategy \u{201c}{}\u{201d} (expected bfs, greedy or astar)", self.0)
    }
}

impl std::error::Error for UnknownStrategy {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_names() {
        assert_eq!("bfs".parse::<StrategyKind>(), Ok(StrategyKind::BreadthFirst));
        assert_eq!("Greedy".parse::<StrategyKind>(), Ok(StrategyKind::GreedyBestFirst));
        assert_eq!("A*".parse::<StrategyKind>(), Ok(StrategyKind::AStar));
        assert_eq!(
            "dijkstra".parse::<StrategyKind>(),
            Err(UnknownStrategy("dijkstra".into()))
        );
    }

    #[test]
    fn labels() {
        assert_eq!(StrategyKind::BreadthFirst.to_string(), "Breadth First Search");
        assert_eq!(StrategyKind::GreedyBestFirst.to_string(), "Greedy Best First Search");
        assert_eq!(StrategyKind::AStar.to_string(), "Astar Agent");
    }

    #[test]
    fn kinds_delegate() {
        let ends = Endpoints {
            start: Point::new(0, 0),
            goal: Point::new(30, 40),
        };
        let p = Point::new(30, 0);
        for k in StrategyKind::ALL {
            assert_eq!(k.priority(&ends, p, 3), k.inner().priority(&ends, p, 3));
            assert_eq!(k.frontier_kind(), k.inner().frontier_kind());
        }
        assert!(StrategyKind::BreadthFirst.closes_on_discovery());
        assert!(!StrategyKind::AStar.closes_on_discovery());
    }
}
