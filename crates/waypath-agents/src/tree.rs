//! Arena-backed search tree.
//!
//! Nodes live in a flat `Vec` and refer to each other by [`NodeId`]. A node
//! owns its ordered child list; the parent link is a plain index used only
//! for walking back to the root. Nodes are only ever appended, so a child's
//! id is always greater than its parent's.

use std::collections::VecDeque;

use waypath_core::Point;

use crate::action::Action;

/// Index of a node inside a [`SearchTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// The root of every tree.
    pub const ROOT: NodeId = NodeId(0);

    /// Position of the node in the arena.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A node of the search tree.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchNode {
    pub state: Point,
    /// `None` only for the root.
    pub parent: Option<NodeId>,
    /// The move that produced `state` from the parent's state.
    pub action: Option<Action>,
    /// Number of moves from the root.
    pub cost: i32,
    /// Strategy-specific frontier ordering value.
    pub priority: f64,
    pub children: Vec<NodeId>,
}

/// The tree built by one planning invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchTree {
    nodes: Vec<SearchNode>,
}

impl SearchTree {
    /// Create a tree holding only the root.
    pub fn with_root(state: Point, priority: f64) -> Self {
        Self {
            nodes: vec![SearchNode {
                state,
                parent: None,
                action: None,
                cost: 0,
                priority,
                children: Vec::new(),
            }],
        }
    }

    /// The root id.
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Access a node.
    #[inline]
    pub fn node(&self, id: NodeId) -> &SearchNode {
        &self.nodes[id.0]
    }

    /// Append a new node under `parent`.
    pub fn add_child(
        &mut self,
        parent: NodeId,
        state: Point,
        action: Action,
        cost: i32,
        priority: f64,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(SearchNode {
            state,
            parent: Some(parent),
            action: Some(action),
            cost,
            priority,
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Unlink `id` from its parent's child list.
    ///
    /// The node stays in the arena but is no longer reachable from the root.
    /// Its own parent link is kept so that paths already handed out remain
    /// valid.
    pub fn detach(&mut self, id: NodeId) {
        if let Some(p) = self.nodes[id.0].parent {
            self.nodes[p.0].children.retain(|&c| c != id);
        }
    }

    /// Number of nodes reachable from the root.
    pub fn len(&self) -> usize {
        self.iter_bfs().count()
    }

    /// Trees always contain at least the root.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Number of nodes ever allocated, including detached ones.
    pub fn allocated(&self) -> usize {
        self.nodes.len()
    }

    /// States from the root down to `id`, inclusive.
    pub fn path_from(&self, id: NodeId) -> Vec<Point> {
        let mut path = Vec::new();
        let mut cur = Some(id);
        while let Some(c) = cur {
            let n = &self.nodes[c.0];
            path.push(n.state);
            cur = n.parent;
        }
        path.reverse();
        path
    }

    /// Actions from the root down to `id`.
    pub fn actions_to(&self, id: NodeId) -> Vec<Action> {
        let mut actions = Vec::new();
        let mut cur = id;
        while let (Some(p), Some(a)) = (self.nodes[cur.0].parent, self.nodes[cur.0].action) {
            actions.push(a);
            cur = p;
        }
        actions.reverse();
        actions
    }

    /// Maximum number of edges from the root to any leaf.
    ///
    /// Measured top-down with an explicit stack so that long corridors do
    /// not exhaust the call stack.
    pub fn depth(&self) -> i32 {
        let mut max = 0;
        let mut stack = vec![(NodeId::ROOT, 0)];
        while let Some((id, d)) = stack.pop() {
            let children = &self.nodes[id.0].children;
            if children.is_empty() {
                max = max.max(d);
            }
            stack.extend(children.iter().map(|&c| (c, d + 1)));
        }
        max
    }

    /// Height of the root: leaves are 0, every other node is one more than
    /// its tallest child.
    ///
    /// Children always sit after their parent in the arena, so one reverse
    /// sweep settles every node before its parent is visited. Always equal
    /// to [`depth`](Self::depth).
    pub fn height(&self) -> i32 {
        let mut heights = vec![0i32; self.nodes.len()];
        for (i, n) in self.nodes.iter().enumerate().rev() {
            let h = n.children.iter().map(|c| heights[c.0] + 1).max();
            heights[i] = h.unwrap_or(0);
        }
        heights[0]
    }

    /// Breadth-first traversal from the root.
    pub fn iter_bfs(&self) -> Bfs<'_> {
        Bfs {
            tree: self,
            queue: VecDeque::from([NodeId::ROOT]),
        }
    }

    /// One state per reachable node in breadth-first order. States reached
    /// by several nodes appear once per node.
    pub fn states(&self) -> Vec<Point> {
        self.iter_bfs().map(|id| self.nodes[id.0].state).collect()
    }
}

/// Breadth-first iterator over the reachable nodes of a [`SearchTree`].
pub struct Bfs<'a> {
    tree: &'a SearchTree,
    queue: VecDeque<NodeId>,
}

impl Iterator for Bfs<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.queue.pop_front()?;
        self.queue.extend(self.tree.nodes[id.0].children.iter().copied());
        Some(id)
    }
}
