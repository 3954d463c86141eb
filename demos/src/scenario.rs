//! Scenario loading and random level generation.

use std::fmt;
use std::path::Path;

use rand::{RngExt, SeedableRng};
use serde::{Deserialize, Serialize};
use waypath_agents::{AgentConfig, StrategyKind};
use waypath_core::{LevelError, Point, Tile, TileLevel};

pub const RANDOM_WIDTH: i32 = 40;
pub const RANDOM_HEIGHT: i32 = 16;
const WALL_CHANCE: f64 = 0.28;

/// A level plus the agent settings to run on it, as stored on disk.
///
/// ```json
/// {
///   "map": "S..#\n...#\n.#.G",
///   "tile_size": 10,
///   "config": { "connectivity": "Eight" },
///   "strategies": ["a_star"]
/// }
/// ```
///
/// Start and goal default to the `S` and `G` markers of the map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub map: String,
    #[serde(default = "default_tile_size")]
    pub tile_size: i32,
    #[serde(default)]
    pub config: AgentConfig,
    #[serde(default)]
    pub strategies: Vec<StrategyKind>,
}

fn default_tile_size() -> i32 {
    waypath_agents::DEFAULT_STEP
}

impl Scenario {
    /// Read a scenario from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ScenarioError> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Build the level and fill in start and goal from its markers where the
    /// configuration leaves them unset.
    pub fn build(&self) -> Result<(TileLevel, AgentConfig), ScenarioError> {
        let level = TileLevel::parse(&self.map, self.tile_size)?;
        let mut config = self.config;
        config.start = config.start.or(level.start());
        config.goal = config.goal.or(level.goal());
        Ok((level, config))
    }
}

/// Scatter walls over an open level, keeping the top-left and bottom-right
/// tiles (the start and goal) clear.
pub fn random_level(seed: u64, tile_size: i32) -> Result<(TileLevel, Point, Point), LevelError> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let mut level = TileLevel::open(RANDOM_WIDTH, RANDOM_HEIGHT, tile_size)?;
    let start_tile = Point::new(0, 0);
    let goal_tile = Point::new(RANDOM_WIDTH - 1, RANDOM_HEIGHT - 1);
    level.fill_fn(|tp| {
        if tp != start_tile && tp != goal_tile && rng.random_bool(WALL_CHANCE) {
            Tile::Wall
        } else {
            Tile::Floor
        }
    });
    let (start, goal) = (level.origin_of(start_tile), level.origin_of(goal_tile));
    Ok((level, start, goal))
}

/// Errors raised while preparing a scenario.
#[derive(Debug)]
pub enum ScenarioError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Level(LevelError),
}

impl fmt::Display for ScenarioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "scenario: {e}"),
            Self::Json(e) => write!(f, "scenario: invalid JSON: {e}"),
            Self::Level(e) => write!(f, "scenario: {e}"),
        }
    }
}

impl std::error::Error for ScenarioError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::Level(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ScenarioError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for ScenarioError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl From<LevelError> for ScenarioError {
    fn from(e: LevelError) -> Self {
        Self::Level(e)
    }
}
