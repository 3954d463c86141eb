//! Pluggable grid search agents.
//!
//! Given a start and goal on a uniform grid, an agent finds a path using one
//! of three interchangeable strategies and keeps the full search tree so
//! the explored region can be inspected afterwards:
//!
//! - **Breadth-first** ([`BreadthFirst`]): FIFO frontier, fewest moves.
//! - **Greedy best-first** ([`GreedyBestFirst`]): ordered by straight-line
//!   distance to the goal only.
//! - **A\*** ([`AStar`]): ordered by moves taken plus straight-line distance
//!   to both the start and the goal.
//!
//! All strategies run through the same driver ([`search()`]) and differ only
//! in their [`Strategy`] implementation.
//!
//! ```
//! use waypath_agents::{AstarAgent, Connectivity, Plan};
//! use waypath_core::{Point, TileLevel};
//!
//! let level = TileLevel::parse("S...\n.##.\n...G", 10).unwrap();
//! let mut agent = AstarAgent::with_level(&level);
//! agent.configure(Point::new(0, 0), Point::new(30, 20), Connectivity::Four);
//! assert!(matches!(agent.plan(), Plan::Found(p) if p.len() == 6));
//! assert_eq!(agent.tree_depth(), agent.tree_height());
//! ```

mod action;
mod agent;
mod astar;
mod bfs;
mod frontier;
mod greedy;
mod search;
mod strategy;
mod tree;

pub use action::{Action, ActionModel, Connectivity};
pub use agent::{
    AgentConfig, AnyAgent, AstarAgent, BreadthFirstAgent, DEFAULT_STEP, GreedyBestFirstAgent,
    PathAgent, Plan, PlanError,
};
pub use astar::AStar;
pub use bfs::BreadthFirst;
pub use frontier::{Frontier, FrontierKind, Slot};
pub use greedy::GreedyBestFirst;
pub use search::{SearchOutcome, SearchStats, search};
pub use strategy::{Endpoints, Strategy, StrategyKind, UnknownStrategy};
pub use tree::{Bfs, NodeId, SearchNode, SearchTree};
