use waypath_core::Point;

use crate::frontier::FrontierKind;
use crate::strategy::{Endpoints, Strategy};

/// A* search ordered by `f = g + h`.
///
/// `g` is the number of moves taken so far. `h` is the straight-line distance
/// back to the start *plus* the straight-line distance to the goal. The
/// start term makes `h` inadmissible, and closed states are never reopened,
/// so the path returned is not guaranteed to be the shortest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AStar;

impl AStar {
    /// The heuristic term `h` for `state`.
    pub fn heuristic(ends: &Endpoints, state: Point) -> f64 {
        state.distance(ends.start) + state.distance(ends.goal)
    }
}

impl Strategy for AStar {
    fn label(&self) -> &'static str {
        "Astar Agent"
    }

    fn frontier_kind(&self) -> FrontierKind {
        FrontierKind::Priority
    }

    fn priority(&self, ends: &Endpoints, state: Point, cost: i32) -> f64 {
        f64::from(cost) + Self::heuristic(ends, state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{ActionModel, Connectivity};
    use crate::bfs::BreadthFirst;
    use crate::search::search;
    use waypath_core::{Level, TileLevel, level_fn};

    fn open_field() -> impl Level {
        level_fn(|p: Point| (0..200).contains(&p.x) && (0..200).contains(&p.y))
    }

    #[test]
    fn f_includes_distance_back_to_start() {
        let ends = Endpoints {
            start: Point::new(0, 0),
            goal: Point::new(60, 80),
        };
        assert_eq!(AStar.priority(&ends, ends.start, 0), 100.0);
        assert_eq!(AStar.priority(&ends, Point::new(30, 40), 5), 5.0 + 50.0 + 50.0);
        assert_eq!(AStar.priority(&ends, Point::new(0, 80), 8), 8.0 + 80.0 + 60.0);
    }

    #[test]
    fn straight_corridor() {
        let m = ActionModel::new(Connectivity::Four, 10);
        let out = search(&AStar, &m, &open_field(), Point::new(0, 0), Point::new(30, 0));
        assert_eq!(
            out.path(),
            Some(vec![
                Point::new(0, 0),
                Point::new(10, 0),
                Point::new(20, 0),
                Point::new(30, 0)
            ])
        );
        assert_eq!(out.stats.expanded, 3);
    }

    #[test]
    fn four_way_paths_have_manhattan_length_on_open_ground() {
        let m = ActionModel::new(Connectivity::Four, 10);
        let start = Point::new(0, 0);
        for goal in [
            Point::new(50, 0),
            Point::new(0, 40),
            Point::new(150, 0),
            Point::new(0, 190),
            Point::new(30, 30),
            Point::new(70, 20),
            Point::new(190, 190),
        ] {
            let path = search(&AStar, &m, &open_field(), start, goal).path().unwrap();
            assert_eq!((path.len() - 1) as i32 * 10, goal.x + goal.y, "goal {goal}");
        }
    }

    #[test]
    fn diagonal_only_escape() {
        let lvl = TileLevel::parse(
            "\
S#...
#....
..G..",
            10,
        )
        .unwrap();
        let m = ActionModel::new(Connectivity::Eight, 10);
        let out = search(&AStar, &m, &lvl, lvl.start().unwrap(), lvl.goal().unwrap());
        let path = out.path().unwrap();
        assert_eq!(path, vec![Point::new(0, 0), Point::new(10, 10), Point::new(20, 20)]);
        for w in path.windows(2) {
            let d = w[1] - w[0];
            assert_eq!((d.x.abs(), d.y.abs()), (10, 10));
        }
    }

    #[test]
    fn inadmissible_heuristic_can_miss_the_shortest_path() {
        let lvl = TileLevel::parse(
            "\
.#...#
S.#...
.##...
...#.G",
            10,
        )
        .unwrap();
        let (start, goal) = (lvl.start().unwrap(), lvl.goal().unwrap());
        let m = ActionModel::new(Connectivity::Eight, 10);

        let astar = search(&AStar, &m, &lvl, start, goal).path().unwrap();
        let bfs = search(&BreadthFirst, &m, &lvl, start, goal).path().unwrap();
        assert_eq!(astar.len() - 1, 6);
        assert_eq!(bfs.len() - 1, 5);
    }

    #[test]
    fn better_waiting_entries_are_replaced() {
        let lvl = TileLevel::parse(
            "\
...........
....####...
.......#...
.S.....#.G.
.......#...
....####...
...........",
            10,
        )
        .unwrap();
        let m = ActionModel::new(Connectivity::Eight, 10);
        let out = search(&AStar, &m, &lvl, lvl.start().unwrap(), lvl.goal().unwrap());
        assert!(out.stats.replaced > 0);
        // Replaced nodes are detached, so every state still appears once.
        let states = out.tree.states();
        let unique: std::collections::HashSet<_> = states.iter().collect();
        assert_eq!(states.len(), unique.len());
        assert!(out.tree.allocated() > out.tree.len());
    }

    #[test]
    fn unreachable_goal_exhausts_frontier() {
        let lvl = TileLevel::parse(
            "\
S.#..
..#.G
..#..",
            1,
        )
        .unwrap();
        let m = ActionModel::new(Connectivity::Eight, 1);
        let out = search(&AStar, &m, &lvl, lvl.start().unwrap(), lvl.goal().unwrap());
        assert_eq!(out.path(), None);
        assert_eq!(out.stats.expanded, 6);
        assert_eq!(out.tree.len(), 6);
    }

    #[test]
    fn repeated_runs_are_identical() {
        let lvl = TileLevel::parse(
            "\
...........
....####...
.......#...
.S.....#.G.
.......#...
....####...
...........",
            10,
        )
        .unwrap();
        let m = ActionModel::new(Connectivity::Eight, 10);
        let run = || search(&AStar, &m, &lvl, lvl.start().unwrap(), lvl.goal().unwrap());
        let first = run();
        for _ in 0..5 {
            let again = run();
            assert_eq!(again.path(), first.path());
            assert_eq!(again.tree.states(), first.tree.states());
            assert_eq!(again.stats, first.stats);
        }
    }
}
