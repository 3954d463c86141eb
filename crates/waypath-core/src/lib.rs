//! **waypath-core**: grid geometry and the level validity oracle.
//!
//! This crate provides the types shared by every *waypath* search agent:
//! integer [`Point`]s used as search states, half-open [`Range`]s, the
//! [`Level`] trait that decides which points are traversable, and a
//! ready-made [`TileLevel`] built from ASCII art.

pub mod geom;
pub mod level;

pub use geom::{Point, Range};
pub use level::{FnLevel, Level, LevelError, Tile, TileLevel, level_fn};
