use std::fmt;

use waypath_core::{Level, Point};

/// One of the eight compass moves.
///
/// North is negative Y (screen coordinates).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    N,
    S,
    W,
    E,
    NW,
    SE,
    NE,
    SW,
}

impl Action {
    /// Cardinal moves in canonical enumeration order.
    pub const CARDINAL: [Action; 4] = [Action::N, Action::S, Action::W, Action::E];

    /// All moves in canonical enumeration order: cardinals first, then
    /// diagonals.
    pub const ALL: [Action; 8] = [
        Action::N,
        Action::S,
        Action::W,
        Action::E,
        Action::NW,
        Action::SE,
        Action::NE,
        Action::SW,
    ];

    /// Unit direction of the move. Each component is -1, 0 or 1.
    #[inline]
    pub const fn delta(self) -> Point {
        match self {
            Action::N => Point::new(0, -1),
            Action::S => Point::new(0, 1),
            Action::W => Point::new(-1, 0),
            Action::E => Point::new(1, 0),
            Action::NW => Point::new(-1, -1),
            Action::SE => Point::new(1, 1),
            Action::NE => Point::new(1, -1),
            Action::SW => Point::new(-1, 1),
        }
    }

    /// Whether the move changes both coordinates.
    #[inline]
    pub const fn is_diagonal(self) -> bool {
        matches!(self, Action::NW | Action::SE | Action::NE | Action::SW)
    }

    /// The action with unit direction `dir`, if any.
    pub fn from_delta(dir: Point) -> Option<Action> {
        Action::ALL.into_iter().find(|a| a.delta() == dir)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Action::N => "N",
            Action::S => "S",
            Action::W => "W",
            Action::E => "E",
            Action::NW => "NW",
            Action::SE => "SE",
            Action::NE => "NE",
            Action::SW => "SW",
        };
        f.write_str(s)
    }
}

/// 4- or 8-directional movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Connectivity {
    #[default]
    Four,
    Eight,
}

impl Connectivity {
    /// The candidate moves for this mode, in canonical order.
    #[inline]
    pub fn actions(self) -> &'static [Action] {
        match self {
            Connectivity::Four => &Action::CARDINAL,
            Connectivity::Eight => &Action::ALL,
        }
    }
}

/// Enumerates legal moves and applies them.
///
/// Every move displaces the state by exactly `step` units along each axis it
/// touches, so a diagonal move covers `step` on x *and* `step` on y. Diagonal
/// moves are not scaled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionModel {
    pub connectivity: Connectivity,
    pub step: i32,
}

impl ActionModel {
    /// Create a new model.
    pub const fn new(connectivity: Connectivity, step: i32) -> Self {
        Self { connectivity, step }
    }

    /// The state reached by taking `action` from `state`, or `None` when the
    /// move would leave the `i32` coordinate space.
    #[inline]
    pub fn next_state(&self, state: Point, action: Action) -> Option<Point> {
        let d = action.delta();
        state.checked_shift(d.x.checked_mul(self.step)?, d.y.checked_mul(self.step)?)
    }

    /// Append the actions available from `state` into `buf`, in canonical
    /// order. The caller clears `buf` before calling.
    ///
    /// The level is queried exactly once per candidate move. Moves that
    /// overflow the coordinate space are rejected without asking the level.
    pub fn actions_into<L: Level + ?Sized>(&self, level: &L, state: Point, buf: &mut Vec<Action>) {
        for &a in self.connectivity.actions() {
            if self.next_state(state, a).is_some_and(|next| level.is_valid(next)) {
                buf.push(a);
            }
        }
    }

    /// The actions available from `state`, in canonical order.
    pub fn possible_actions<L: Level + ?Sized>(&self, level: &L, state: Point) -> Vec<Action> {
        let mut buf = Vec::with_capacity(8);
        self.actions_into(level, state, &mut buf);
        buf
    }
}
