use std::collections::HashSet;

use log::{debug, trace};
use waypath_core::{Level, Point};

use crate::action::ActionModel;
use crate::frontier::Frontier;
use crate::strategy::{Endpoints, Strategy};
use crate::tree::{NodeId, SearchTree};

/// Counters collected during one search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchStats {
    /// Nodes popped and expanded (the goal pop is not counted).
    pub expanded: usize,
    /// Successor states produced by the action model.
    pub generated: usize,
    /// Frontier entries superseded by a strictly better node.
    pub replaced: usize,
    /// Successors discarded because their state was closed or already
    /// waiting with an equal or better priority.
    pub dropped: usize,
    /// Largest number of states waiting in the frontier at once.
    pub frontier_high_water: usize,
}

/// Result of [`search`].
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub tree: SearchTree,
    /// The node whose state equals the goal, if one was popped.
    pub goal: Option<NodeId>,
    pub stats: SearchStats,
}

impl SearchOutcome {
    /// States from start to goal, or `None` if the goal was not reached.
    pub fn path(&self) -> Option<Vec<Point>> {
        self.goal.map(|g| self.tree.path_from(g))
    }
}

/// Search from `start` to `goal`, building the tree of everything explored.
///
/// Every strategy shares the same loop:
///
/// 1. pop the best waiting node; stop if its state is the goal;
/// 2. close its state and ask the action model for successors;
/// 3. drop successors whose state is closed (closed states are never
///    reopened, even along a cheaper path);
/// 4. if the state is already waiting, replace that entry only when the new
///    priority is strictly smaller, otherwise drop the successor;
/// 5. otherwise attach the successor under the expanded node and enqueue it.
///
/// Identity is the state alone: two nodes for the same point are the same
/// node as far as the frontier and closed set are concerned.
pub fn search<S, L>(
    strategy: &S,
    model: &ActionModel,
    level: &L,
    start: Point,
    goal: Point,
) -> SearchOutcome
where
    S: Strategy + ?Sized,
    L: Level + ?Sized,
{
    let ends = Endpoints { start, goal };
    let discovery = strategy.closes_on_discovery();

    let mut tree = SearchTree::with_root(start, strategy.priority(&ends, start, 0));
    let mut frontier = Frontier::new(strategy.frontier_kind());
    let mut closed: HashSet<Point> = HashSet::new();
    let mut stats = SearchStats::default();

    frontier.push(start, tree.root(), tree.node(tree.root()).priority);
    if discovery {
        closed.insert(start);
    }

    debug!("{}: searching {} -> {}", strategy.label(), start, goal);

    let mut actions = Vec::with_capacity(8);
    let mut found = None;

    while let Some((state, id)) = frontier.pop() {
        if state == goal {
            found = Some(id);
            break;
        }

        closed.insert(state);
        stats.expanded += 1;
        trace!("expand {} (cost {})", state, tree.node(id).cost);

        let cost = tree.node(id).cost + 1;
        actions.clear();
        model.actions_into(level, state, &mut actions);

        for &action in actions.iter() {
            let Some(next) = model.next_state(state, action) else {
                continue;
            };
            stats.generated += 1;

            if closed.contains(&next) {
                stats.dropped += 1;
                continue;
            }

            let priority = strategy.priority(&ends, next, cost);
            match frontier.get(next) {
                Some(slot) if priority < slot.priority => {
                    trace!("replace {} ({} -> {})", next, slot.priority, priority);
                    tree.detach(slot.node);
                    let child = tree.add_child(id, next, action, cost, priority);
                    frontier.push(next, child, priority);
                    stats.replaced += 1;
                }
                Some(_) => {
                    stats.dropped += 1;
                }
                None => {
                    let child = tree.add_child(id, next, action, cost, priority);
                    frontier.push(next, child, priority);
                    if discovery {
                        closed.insert(next);
                    }
                }
            }
        }
    }

    stats.frontier_high_water = frontier.high_water();

    match found {
        Some(g) => debug!(
            "{}: reached {} in {} moves ({} expanded, {} generated)",
            strategy.label(),
            goal,
            tree.node(g).cost,
            stats.expanded,
            stats.generated
        ),
        None => debug!(
            "{}: no path {} -> {} ({} expanded, {} generated)",
            strategy.label(),
            start,
            goal,
            stats.expanded,
            stats.generated
        ),
    }

    SearchOutcome {
        tree,
        goal: found,
        stats,
    }
}
