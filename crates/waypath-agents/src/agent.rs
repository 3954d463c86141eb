//! The agent contract shared by every strategy.
//!
//! A [`PathAgent`] is configured with a start, a goal and a connectivity
//! mode, then asked to [`plan`](PathAgent::plan). It keeps the resulting
//! search tree and path until [`clear`](PathAgent::clear) is called or the
//! next plan replaces them, so callers can inspect how much of the level
//! was explored.

use std::fmt;

use log::debug;
use waypath_core::{Level, Point};

use crate::action::{ActionModel, Connectivity};
use crate::astar::AStar;
use crate::bfs::BreadthFirst;
use crate::greedy::GreedyBestFirst;
use crate::search::{SearchStats, search};
use crate::strategy::{Strategy, StrategyKind};
use crate::tree::{NodeId, SearchTree};

/// Coordinate units covered by one move unless configured otherwise.
pub const DEFAULT_STEP: i32 = 10;

/// Everything an agent needs to know before planning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AgentConfig {
    pub start: Option<Point>,
    pub goal: Option<Point>,
    pub connectivity: Connectivity,
    /// Displacement of a single move along each axis it touches.
    pub step: i32,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            start: None,
            goal: None,
            connectivity: Connectivity::Four,
            step: DEFAULT_STEP,
        }
    }
}

/// Outcome of a planning invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Plan {
    /// States from start to goal, both included.
    Found(Vec<Point>),
    /// The frontier ran dry without reaching the goal.
    NoPath,
}

impl Plan {
    /// The path, if one was found.
    pub fn path(&self) -> Option<&[Point]> {
        match self {
            Plan::Found(p) => Some(p),
            Plan::NoPath => None,
        }
    }

    /// Whether a path was found.
    pub fn is_found(&self) -> bool {
        matches!(self, Plan::Found(_))
    }
}

/// Why an agent refused to plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanError {
    MissingStart,
    MissingGoal,
    /// Moves must displace the state by a positive amount.
    InvalidStep(i32),
}

impl fmt::Display for PlanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingStart => write!(f, "agent: start must be set before planning"),
            Self::MissingGoal => write!(f, "agent: goal must be set before planning"),
            Self::InvalidStep(s) => write!(f, "agent: step must be positive, got {s}"),
        }
    }
}

impl std::error::Error for PlanError {}

/// A search agent over level `L` using strategy `S`.
#[derive(Debug, Clone)]
pub struct PathAgent<L, S> {
    level: L,
    strategy: S,
    config: AgentConfig,
    tree: Option<SearchTree>,
    plan: Option<Plan>,
    stats: Option<SearchStats>,
}

/// Breadth-first agent.
pub type BreadthFirstAgent<L> = PathAgent<L, BreadthFirst>;
/// Greedy best-first agent.
pub type GreedyBestFirstAgent<L> = PathAgent<L, GreedyBestFirst>;
/// A* agent.
pub type AstarAgent<L> = PathAgent<L, AStar>;
/// Agent whose strategy is picked at runtime.
pub type AnyAgent<L> = PathAgent<L, StrategyKind>;

impl<L: Level, S: Strategy + Default> PathAgent<L, S> {
    /// Create an agent with the strategy's default value.
    pub fn with_level(level: L) -> Self {
        Self::new(level, S::default())
    }
}

impl<L: Level, S: Strategy> PathAgent<L, S> {
    /// Create an unconfigured agent.
    pub fn new(level: L, strategy: S) -> Self {
        Self::with_config(level, strategy, AgentConfig::default())
    }

    /// Create an agent with a ready-made configuration.
    pub fn with_config(level: L, strategy: S, config: AgentConfig) -> Self {
        Self {
            level,
            strategy,
            config,
            tree: None,
            plan: None,
            stats: None,
        }
    }

    /// The level being searched.
    pub fn level(&self) -> &L {
        &self.level
    }

    /// Swap the level. A retained tree and path are kept until cleared.
    pub fn set_level(&mut self, level: L) {
        self.level = level;
    }

    /// The strategy in use.
    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    /// Display label of the strategy.
    pub fn label(&self) -> &'static str {
        self.strategy.label()
    }

    /// Current configuration.
    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// Set start, goal and connectivity in one go.
    pub fn configure(&mut self, start: Point, goal: Point, connectivity: Connectivity) {
        self.config.start = Some(start);
        self.config.goal = Some(goal);
        self.config.connectivity = connectivity;
    }

    pub fn start(&self) -> Option<Point> {
        self.config.start
    }

    pub fn set_start(&mut self, start: Point) {
        self.config.start = Some(start);
    }

    pub fn goal(&self) -> Option<Point> {
        self.config.goal
    }

    pub fn set_goal(&mut self, goal: Point) {
        self.config.goal = Some(goal);
    }

    pub fn connectivity(&self) -> Connectivity {
        self.config.connectivity
    }

    pub fn set_connectivity(&mut self, connectivity: Connectivity) {
        self.config.connectivity = connectivity;
    }

    pub fn step(&self) -> i32 {
        self.config.step
    }

    pub fn set_step(&mut self, step: i32) {
        self.config.step = step;
    }

    /// Plan a path, replacing any retained tree and path.
    ///
    /// # Panics
    ///
    /// Panics if the start or goal is unset, or the step is not positive.
    /// Use [`try_plan`](Self::try_plan) to get a [`PlanError`] instead.
    pub fn plan(&mut self) -> &Plan {
        match self.try_plan() {
            Ok(plan) => plan,
            Err(e) => panic!("{e}"),
        }
    }

    /// Plan a path, replacing any retained tree and path.
    ///
    /// On error the previous tree and path are left untouched.
    pub fn try_plan(&mut self) -> Result<&Plan, PlanError> {
        let start = self.config.start.ok_or(PlanError::MissingStart)?;
        let goal = self.config.goal.ok_or(PlanError::MissingGoal)?;
        if self.config.step <= 0 {
            return Err(PlanError::InvalidStep(self.config.step));
        }

        let model = ActionModel::new(self.config.connectivity, self.config.step);
        let outcome = search(&self.strategy, &model, &self.level, start, goal);
        let plan = match outcome.path() {
            Some(path) => Plan::Found(path),
            None => Plan::NoPath,
        };

        self.tree = Some(outcome.tree);
        self.stats = Some(outcome.stats);
        Ok(self.plan.insert(plan))
    }

    /// Result of the last plan, or `None` if nothing has been planned since
    /// construction or the last [`clear`](Self::clear).
    pub fn plan_result(&self) -> Option<&Plan> {
        self.plan.as_ref()
    }

    /// The last path found, if any.
    pub fn path(&self) -> Option<&[Point]> {
        self.plan.as_ref().and_then(Plan::path)
    }

    /// Forget the retained tree and path.
    pub fn clear(&mut self) {
        debug!("{}: cleared", self.label());
        self.tree = None;
        self.plan = None;
        self.stats = None;
    }

    /// The retained search tree.
    pub fn tree(&self) -> Option<&SearchTree> {
        self.tree.as_ref()
    }

    /// State of the tree's root (the start of the last plan).
    pub fn root_state(&self) -> Option<Point> {
        self.tree.as_ref().map(|t| t.node(t.root()).state)
    }

    /// States from the root down to `node` in the retained tree.
    pub fn path_from_node(&self, node: NodeId) -> Option<Vec<Point>> {
        self.tree.as_ref().map(|t| t.path_from(node))
    }

    /// Counters from the last plan.
    pub fn stats(&self) -> Option<SearchStats> {
        self.stats
    }

    /// Longest root-to-leaf edge count, or -1 without a tree.
    pub fn tree_depth(&self) -> i32 {
        self.tree.as_ref().map_or(-1, SearchTree::depth)
    }

    /// Same measure as [`tree_depth`](Self::tree_depth), computed bottom-up.
    pub fn tree_height(&self) -> i32 {
        self.tree.as_ref().map_or(-1, SearchTree::height)
    }

    /// One state per tree node in breadth-first order, or `None` without a
    /// tree.
    pub fn reachable_states(&self) -> Option<Vec<Point>> {
        self.tree.as_ref().map(SearchTree::states)
    }
}

impl<L, S: Strategy> fmt::Display for PathAgent<L, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.strategy.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use waypath_core::{FnLevel, TileLevel, level_fn};

    type Field = FnLevel<fn(Point) -> bool>;

    fn field() -> Field {
        fn inside(p: Point) -> bool {
            p.x.abs() <= 200 && p.y.abs() <= 200
        }
        level_fn(inside as fn(Point) -> bool)
    }

    const ESCAPE: &str = "\
S#...
#....
..G..";

    #[test]
    fn unplanned_agent_has_no_tree() {
        let agent = AstarAgent::with_level(field());
        assert_eq!(agent.plan_result(), None);
        assert_eq!(agent.path(), None);
        assert_eq!(agent.tree_depth(), -1);
        assert_eq!(agent.tree_height(), -1);
        assert_eq!(agent.reachable_states(), None);
        assert_eq!(agent.root_state(), None);
        assert_eq!(agent.stats(), None);
        assert_eq!(agent.step(), DEFAULT_STEP);
    }

    #[test]
    fn straight_line_plans() {
        let expected = vec![
            Point::new(0, 0),
            Point::new(10, 0),
            Point::new(20, 0),
            Point::new(30, 0),
        ];

        let mut bfs = BreadthFirstAgent::with_level(field());
        bfs.configure(Point::new(0, 0), Point::new(30, 0), Connectivity::Four);
        assert_eq!(bfs.plan(), &Plan::Found(expected.clone()));
        assert_eq!(bfs.tree_depth(), 4);
        assert_eq!(bfs.reachable_states().map(|s| s.len()), Some(40));

        let mut astar = AstarAgent::with_level(field());
        astar.configure(Point::new(0, 0), Point::new(30, 0), Connectivity::Four);
        assert_eq!(astar.plan(), &Plan::Found(expected));
        assert_eq!(astar.tree_depth(), 3);
        assert_eq!(astar.reachable_states().map(|s| s.len()), Some(11));
    }

    #[test]
    fn start_equals_goal() {
        for kind in StrategyKind::ALL {
            let mut agent = AnyAgent::new(field(), kind);
            let p = Point::new(20, 20);
            agent.configure(p, p, Connectivity::Eight);
            assert_eq!(agent.plan(), &Plan::Found(vec![p]));
            assert_eq!(agent.tree_depth(), 0);
            assert_eq!(agent.tree_height(), 0);
            assert_eq!(agent.reachable_states(), Some(vec![p]));
        }
    }

    #[test]
    fn connectivity_decides_reachability() {
        let lvl = TileLevel::parse(ESCAPE, 10).unwrap();
        for kind in StrategyKind::ALL {
            let mut agent = AnyAgent::new(&lvl, kind);
            agent.configure(lvl.start().unwrap(), lvl.goal().unwrap(), Connectivity::Four);
            assert_eq!(agent.plan(), &Plan::NoPath, "{kind}");
            // "No path" is distinct from "not planned".
            assert!(agent.plan_result().is_some());
            assert_eq!(agent.tree_depth(), 0);

            agent.set_connectivity(Connectivity::Eight);
            let path = agent.plan().path().unwrap().to_vec();
            assert_eq!(path, vec![Point::new(0, 0), Point::new(10, 10), Point::new(20, 20)]);
        }
    }

    #[test]
    fn path_endpoints_and_length() {
        let lvl = TileLevel::parse(
            "\
S....#....
.###.#.##.
...#...#G.",
            10,
        )
        .unwrap();
        for kind in StrategyKind::ALL {
            for conn in [Connectivity::Four, Connectivity::Eight] {
                let mut agent = AnyAgent::new(&lvl, kind);
                agent.configure(lvl.start().unwrap(), lvl.goal().unwrap(), conn);
                let path = agent.plan().path().unwrap().to_vec();
                assert_eq!(path.first(), lvl.start().as_ref());
                assert_eq!(path.last(), lvl.goal().as_ref());
                for w in path.windows(2) {
                    let d = w[1] - w[0];
                    assert!(d.x.abs() <= 10 && d.y.abs() <= 10 && d != Point::ZERO);
                    assert!(lvl.is_valid(w[1]));
                }
                assert_eq!(agent.tree_depth(), agent.tree_height());
            }
        }
    }

    #[test]
    fn clear_resets_and_replan_replaces() {
        let mut agent = BreadthFirstAgent::with_level(field());
        agent.configure(Point::new(0, 0), Point::new(0, 20), Connectivity::Four);
        agent.plan();
        assert_eq!(agent.path().map(<[Point]>::len), Some(3));
        assert_eq!(agent.root_state(), Some(Point::new(0, 0)));

        agent.configure(Point::new(50, 50), Point::new(50, 60), Connectivity::Four);
        agent.plan();
        assert_eq!(agent.root_state(), Some(Point::new(50, 50)));
        assert_eq!(agent.path().map(<[Point]>::len), Some(2));

        agent.clear();
        assert_eq!(agent.plan_result(), None);
        assert_eq!(agent.tree(), None);
        assert_eq!(agent.tree_depth(), -1);
        assert_eq!(agent.reachable_states(), None);
        // Configuration survives a clear.
        assert_eq!(agent.start(), Some(Point::new(50, 50)));
    }

    #[test]
    fn missing_endpoints_are_reported() {
        let mut agent = GreedyBestFirstAgent::with_level(field());
        assert_eq!(agent.try_plan(), Err(PlanError::MissingStart));
        agent.set_start(Point::ZERO);
        assert_eq!(agent.try_plan(), Err(PlanError::MissingGoal));
        agent.set_goal(Point::new(10, 0));
        agent.set_step(0);
        assert_eq!(agent.try_plan(), Err(PlanError::InvalidStep(0)));
        assert_eq!(agent.plan_result(), None);
    }

    #[test]
    fn plans_at_the_edge_of_the_coordinate_space() {
        let start = Point::new(i32::MAX - 5, 0);
        let goal = Point::new(i32::MAX - 5, 10);
        let mut agent = AstarAgent::with_level(level_fn(|_| true));
        agent.configure(start, goal, Connectivity::Four);
        assert_eq!(agent.try_plan(), Ok(&Plan::Found(vec![start, goal])));

        let mut agent = BreadthFirstAgent::with_level(field());
        agent.configure(Point::new(10, 0), Point::new(20, 0), Connectivity::Eight);
        agent.set_step(i32::MAX);
        assert_eq!(agent.try_plan(), Ok(&Plan::NoPath));
        assert_eq!(agent.reachable_states(), Some(vec![Point::new(10, 0)]));
    }

    #[test]
    #[should_panic(expected = "start must be set")]
    fn plan_without_start_panics() {
        let mut agent = AstarAgent::with_level(field());
        agent.set_goal(Point::new(10, 10));
        agent.plan();
    }

    #[test]
    #[should_panic(expected = "goal must be set")]
    fn plan_without_goal_panics() {
        let mut agent = BreadthFirstAgent::with_level(field());
        agent.set_start(Point::new(10, 10));
        agent.plan();
    }

    #[test]
    fn path_from_node_walks_retained_tree() {
        let mut agent = AstarAgent::with_level(field());
        assert_eq!(agent.path_from_node(NodeId::ROOT), None);
        agent.configure(Point::new(0, 0), Point::new(20, 0), Connectivity::Four);
        agent.plan();
        let tree = agent.tree().unwrap();
        let leaf = tree.iter_bfs().last().unwrap();
        let path = agent.path_from_node(leaf).unwrap();
        assert_eq!(path.first(), Some(&Point::new(0, 0)));
        assert_eq!(path.len() as i32, tree.node(leaf).cost + 1);
    }

    #[test]
    fn labels() {
        assert_eq!(BreadthFirstAgent::with_level(field()).to_string(), "Breadth First Search");
        assert_eq!(GreedyBestFirstAgent::with_level(field()).label(), "Greedy Best First Search");
        assert_eq!(AstarAgent::with_level(field()).to_string(), "Astar Agent");
    }

    #[test]
    fn stats_follow_the_plan() {
        let mut agent = AstarAgent::with_level(field());
        agent.configure(Point::new(0, 0), Point::new(30, 0), Connectivity::Four);
        agent.plan();
        let stats = agent.stats().unwrap();
        assert_eq!(stats.expanded, 3);
        assert_eq!(stats.generated, 12);
        assert!(stats.frontier_high_water >= 1);
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn config_reads_partial_json() {
        let cfg: AgentConfig =
            serde_json::from_str(r#"{"start":{"x":0,"y":0},"connectivity":"Eight"}"#).unwrap();
        assert_eq!(cfg.start, Some(Point::ZERO));
        assert_eq!(cfg.goal, None);
        assert_eq!(cfg.connectivity, Connectivity::Eight);
        assert_eq!(cfg.step, DEFAULT_STEP);
    }

    #[test]
    fn plan_json_shape() {
        let json = serde_json::to_string(&Plan::NoPath).unwrap();
        assert_eq!(json, r#""no_path""#);
        let found = Plan::Found(vec![Point::new(1, 2)]);
        let json = serde_json::to_string(&found).unwrap();
        assert_eq!(json, r#"{"found":[{"x":1,"y":2}]}"#);
    }
}
