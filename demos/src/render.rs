//! ASCII rendering of a level with an agent's results laid over it.

use std::collections::HashSet;

use waypath_core::{Point, Tile, TileLevel};

/// Draw `level` with explored tiles as `o`, path tiles as `*`, and the
/// path's endpoints as `S` and `G`.
pub fn overlay(level: &TileLevel, explored: &[Point], path: Option<&[Point]>) -> String {
    let explored: HashSet<Point> = explored.iter().map(|&p| level.cell_of(p)).collect();
    let on_path: HashSet<Point> = path
        .unwrap_or_default()
        .iter()
        .map(|&p| level.cell_of(p))
        .collect();
    let start = path.and_then(|p| p.first()).map(|&p| level.cell_of(p));
    let goal = path.and_then(|p| p.last()).map(|&p| level.cell_of(p));

    let mut out = String::new();
    for y in 0..level.height() {
        for x in 0..level.width() {
            let tp = Point::new(x, y);
            let ch = if Some(tp) == start {
                'S'
            } else if Some(tp) == goal {
                'G'
            } else if on_path.contains(&tp) {
                '*'
            } else if level.tile_at(tp) == Some(Tile::Wall) {
                '#'
            } else if explored.contains(&tp) {
                'o'
            } else {
                '.'
            };
            out.push(ch);
        }
        out.push('\n');
    }
    out
}
