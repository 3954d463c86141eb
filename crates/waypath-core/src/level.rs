//! The grid validity oracle and a tile-based level implementing it.
//!
//! Search agents only ever ask one question of the world: "may I stand at
//! this point?". [`Level`] captures that question. [`TileLevel`] answers it
//! for a rectangular map of floor and wall tiles, where every tile covers a
//! square of `tile_size` coordinate units.

use std::fmt;

use crate::geom::{Point, Range};

/// Answers whether a state is traversable.
///
/// Implementations must be deterministic for a fixed map: search agents
/// query each candidate neighbour once per expansion and rely on getting
/// the same answer every time.
pub trait Level {
    /// Whether `p` can be occupied.
    fn is_valid(&self, p: Point) -> bool;
}

impl<L: Level + ?Sized> Level for &L {
    #[inline]
    fn is_valid(&self, p: Point) -> bool {
        (**self).is_valid(p)
    }
}

/// A [`Level`] backed by a closure. Created with [`level_fn`].
#[derive(Clone, Copy)]
pub struct FnLevel<F>(F);

impl<F: Fn(Point) -> bool> Level for FnLevel<F> {
    #[inline]
    fn is_valid(&self, p: Point) -> bool {
        (self.0)(p)
    }
}

impl<F> fmt::Debug for FnLevel<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnLevel")
    }
}

/// Wrap a predicate as a [`Level`].
///
/// ```
/// use waypath_core::{Level, Point, level_fn};
///
/// let lvl = level_fn(|p: Point| p.x >= 0 && p.y >= 0);
/// assert!(lvl.is_valid(Point::new(3, 4)));
/// assert!(!lvl.is_valid(Point::new(-1, 0)));
/// ```
pub fn level_fn<F: Fn(Point) -> bool>(f: F) -> FnLevel<F> {
    FnLevel(f)
}

// ---------------------------------------------------------------------------
// Tile
// ---------------------------------------------------------------------------

/// Terrain of a single tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Tile {
    #[default]
    Floor,
    Wall,
}

impl Tile {
    /// The ASCII character used for this tile by [`TileLevel::parse`].
    pub const fn glyph(self) -> char {
        match self {
            Tile::Floor => '.',
            Tile::Wall => '#',
        }
    }
}

// ---------------------------------------------------------------------------
// TileLevel
// ---------------------------------------------------------------------------

/// A rectangular level of [`Tile`]s.
///
/// Tile `(tx, ty)` covers coordinates `[tx * tile_size, (tx + 1) * tile_size)`
/// on the x axis (and likewise for y). Agents moving with a step equal to
/// `tile_size` therefore visit the top-left corner of each tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileLevel {
    tiles: Vec<Tile>,
    width: i32,
    height: i32,
    tile_size: i32,
    start: Option<Point>,
    goal: Option<Point>,
}

impl TileLevel {
    /// Create an all-floor level of `width` × `height` tiles.
    pub fn open(width: i32, height: i32, tile_size: i32) -> Result<Self, LevelError> {
        if tile_size <= 0 {
            return Err(LevelError::BadTileSize(tile_size));
        }
        if width <= 0 || height <= 0 {
            return Err(LevelError::Empty);
        }
        // Tile count and the scaled extent must both fit in an i32.
        let len = width
            .checked_mul(height)
            .filter(|_| width.checked_mul(tile_size).is_some())
            .filter(|_| height.checked_mul(tile_size).is_some())
            .ok_or(LevelError::TooLarge { width, height })?;
        Ok(Self {
            tiles: vec![Tile::Floor; len as usize],
            width,
            height,
            tile_size,
            start: None,
            goal: None,
        })
    }

    /// Parse a level from ASCII art.
    ///
    /// `.` is floor and `#` is wall. `S` and `G` are floor tiles that also
    /// record the suggested start and goal (see [`start`](Self::start) and
    /// [`goal`](Self::goal)). Leading and trailing blank lines are ignored;
    /// every remaining line must have the same width.
    pub fn parse(text: &str, tile_size: i32) -> Result<Self, LevelError> {
        if tile_size <= 0 {
            return Err(LevelError::BadTileSize(tile_size));
        }
        let lines: Vec<&str> = text.trim_matches('\n').lines().map(str::trim_end).collect();
        let width = lines.first().map_or(0, |l| l.chars().count());
        if width == 0 {
            return Err(LevelError::Empty);
        }
        if lines.iter().any(|l| l.chars().count() != width) {
            return Err(LevelError::InconsistentSize {
                expected: width,
                content: text.to_string(),
            });
        }

        let mut lvl = Self::open(width as i32, lines.len() as i32, tile_size)?;
        for (y, line) in lines.iter().enumerate() {
            for (x, ch) in line.chars().enumerate() {
                let tp = Point::new(x as i32, y as i32);
                let tile = match ch {
                    '.' => Tile::Floor,
                    '#' => Tile::Wall,
                    'S' => {
                        lvl.start = Some(lvl.origin_of(tp));
                        Tile::Floor
                    }
                    'G' => {
                        lvl.goal = Some(lvl.origin_of(tp));
                        Tile::Floor
                    }
                    _ => return Err(LevelError::InvalidRune { ch, pos: tp }),
                };
                lvl.set(tp, tile);
            }
        }
        Ok(lvl)
    }

    /// Width in tiles.
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Height in tiles.
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Coordinate units covered by one tile.
    pub fn tile_size(&self) -> i32 {
        self.tile_size
    }

    /// The range of tile positions.
    pub fn bounds(&self) -> Range {
        Range::new(0, 0, self.width, self.height)
    }

    /// The range of valid coordinates (tile bounds scaled by `tile_size`).
    pub fn extent(&self) -> Range {
        Range::new(0, 0, self.width * self.tile_size, self.height * self.tile_size)
    }

    /// Start marker (`S`) from the parsed map, in coordinates.
    pub fn start(&self) -> Option<Point> {
        self.start
    }

    /// Goal marker (`G`) from the parsed map, in coordinates.
    pub fn goal(&self) -> Option<Point> {
        self.goal
    }

    /// The tile position containing coordinate `p`.
    #[inline]
    pub fn cell_of(&self, p: Point) -> Point {
        Point::new(p.x.div_euclid(self.tile_size), p.y.div_euclid(self.tile_size))
    }

    /// The top-left coordinate of tile `tp`.
    #[inline]
    pub fn origin_of(&self, tp: Point) -> Point {
        tp * self.tile_size
    }

    /// Tile at tile position `tp`, or `None` if out of bounds.
    pub fn tile_at(&self, tp: Point) -> Option<Tile> {
        self.index(tp).map(|i| self.tiles[i])
    }

    /// Set the tile at tile position `tp`. Does nothing if out of bounds.
    pub fn set(&mut self, tp: Point, tile: Tile) {
        if let Some(i) = self.index(tp) {
            self.tiles[i] = tile;
        }
    }

    /// Fill every tile using a function of its tile position.
    pub fn fill_fn(&mut self, mut f: impl FnMut(Point) -> Tile) {
        for tp in self.bounds() {
            self.set(tp, f(tp));
        }
    }

    /// Number of wall tiles.
    pub fn wall_count(&self) -> usize {
        self.tiles.iter().filter(|&&t| t == Tile::Wall).count()
    }

    fn index(&self, tp: Point) -> Option<usize> {
        if !self.bounds().contains(tp) {
            return None;
        }
        Some((tp.y * self.width + tp.x) as usize)
    }
}

impl Level for TileLevel {
    fn is_valid(&self, p: Point) -> bool {
        p.in_range(&self.extent()) && self.tile_at(self.cell_of(p)) == Some(Tile::Floor)
    }
}

impl fmt::Display for TileLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            if y > 0 {
                writeln!(f)?;
            }
            for x in 0..self.width {
                let tp = Point::new(x, y);
                let origin = self.origin_of(tp);
                let ch = if self.start == Some(origin) {
                    'S'
                } else if self.goal == Some(origin) {
                    'G'
                } else {
                    self.tiles[(y * self.width + x) as usize].glyph()
                };
                write!(f, "{ch}")?;
            }
        }
        Ok(())
    }
}

/// Errors that can occur when building a [`TileLevel`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LevelError {
    /// The map has no tiles.
    Empty,
    /// Tile size must be strictly positive.
    BadTileSize(i32),
    /// Lines have inconsistent widths.
    InconsistentSize { expected: usize, content: String },
    /// A character other than `.`, `#`, `S` or `G` was found.
    InvalidRune { ch: char, pos: Point },
    /// The level does not fit the coordinate space at this tile size.
    TooLarge { width: i32, height: i32 },
}

impl fmt::Display for LevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "level: no tiles"),
            Self::BadTileSize(n) => write!(f, "level: tile size must be positive, got {n}"),
            Self::InconsistentSize { expected, content } => {
                write!(f, "level: inconsistent line width (expected {expected}):\n{content}")
            }
            Self::InvalidRune { ch, pos } => {
                write!(f, "level contains invalid rune \u{201c}{ch}\u{201d} at {pos}")
            }
            Self::TooLarge { width, height } => {
                write!(f, "level: {width}x{height} tiles is too large")
            }
        }
    }
}

impl std::error::Error for LevelError {}
