//! Domain types for Dots and Boxes.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::engine::models::PlayerId;

pub const MIN_GRID_SIZE: usize = 1;
pub const MAX_GRID_SIZE: usize = 8;
/// Board sizes offered by the settings screen.
pub const GRID_SIZE_PRESETS: [usize; 6] = [3, 4, 5, 6, 7, 8];
pub const MIN_PLAYERS: u8 = 2;
pub const MAX_PLAYERS: u8 = 4;
pub const DEFAULT_GRID_SIZE: usize = 5;
pub const DEFAULT_PLAYERS: u8 = 2;

/// Board dimensions and seat count. Fixed for the lifetime of one game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameConfig {
    grid_size: usize,
    player_count: u8,
}

impl GameConfig {
    pub fn new(grid_size: usize, player_count: u8) -> Result<Self, ConfigError> {
        if !(MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&grid_size) {
            return Err(ConfigError::GridSizeOutOfBounds { grid_size });
        }
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&player_count) {
            return Err(ConfigError::PlayerCountOutOfBounds { player_count });
        }
        Ok(Self {
            grid_size,
            player_count,
        })
    }

    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    pub fn player_count(&self) -> u8 {
        self.player_count
    }

    pub fn total_cells(&self) -> usize {
        self.grid_size * self.grid_size
    }

    pub fn players(&self) -> impl Iterator<Item = PlayerId> {
        1..=self.player_count
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            player_count: DEFAULT_PLAYERS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    pub fn letter(self) -> char {
        match self {
            Orientation::Horizontal => 'H',
            Orientation::Vertical => 'V',
        }
    }
}

/// A unit line between two adjacent dots.
///
/// Horizontal edges live at `row ∈ [0, N]`, `col ∈ [0, N-1]`; vertical edges at
/// `row ∈ [0, N-1]`, `col ∈ [0, N]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Edge {
    pub row: usize,
    pub col: usize,
    pub orientation: Orientation,
}

impl Edge {
    pub fn horizontal(row: usize, col: usize) -> Self {
        Self {
            row,
            col,
            orientation: Orientation::Horizontal,
        }
    }

    pub fn vertical(row: usize, col: usize) -> Self {
        Self {
            row,
            col,
            orientation: Orientation::Vertical,
        }
    }

    /// Whether this edge exists on an N×N board.
    pub fn in_bounds(&self, grid_size: usize) -> bool {
        match self.orientation {
            Orientation::Horizontal => self.row <= grid_size && self.col < grid_size,
            Orientation::Vertical => self.row < grid_size && self.col <= grid_size,
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({},{})", self.orientation.letter(), self.row, self.col)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum ParseEdgeError {
    #[display("empty move")]
    Empty,
    #[display("unknown orientation '{_0}', expected 'h' or 'v'")]
    BadOrientation(char),
    #[display("expected two coordinates in '{_0}'")]
    BadCoordinates(String),
}

impl std::error::Error for ParseEdgeError {}

/// Parses `h 0 1`, `V(2,3)`, `v 1,0` and similar.
impl FromStr for Edge {
    type Err = ParseEdgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut chars = s.chars();
        let orientation = match chars.next() {
            None => return Err(ParseEdgeError::Empty),
            Some('h' | 'H') => Orientation::Horizontal,
            Some('v' | 'V') => Orientation::Vertical,
            Some(c) => return Err(ParseEdgeError::BadOrientation(c)),
        };

        let rest = chars.as_str();
        let coords: Vec<&str> = rest
            .split(|c: char| c.is_whitespace() || matches!(c, ',' | '(' | ')'))
            .filter(|part| !part.is_empty())
            .collect();
        let [row, col] = coords.as_slice() else {
            return Err(ParseEdgeError::BadCoordinates(s.to_string()));
        };
        match (row.parse(), col.parse()) {
            (Ok(row), Ok(col)) => Ok(Edge {
                row,
                col,
                orientation,
            }),
            _ => Err(ParseEdgeError::BadCoordinates(s.to_string())),
        }
    }
}

/// A closed cell and the player who closed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimedCell {
    pub row: usize,
    pub col: usize,
    pub owner: PlayerId,
}

/// Placed edges and claimed cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub grid_size: usize,
    pub horizontal: BTreeSet<(usize, usize)>,
    pub vertical: BTreeSet<(usize, usize)>,
    /// In claim order; at most one entry per (row, col).
    pub claimed: Vec<ClaimedCell>,
}

impl Board {
    pub fn new(grid_size: usize) -> Self {
        Self {
            grid_size,
            horizontal: BTreeSet::new(),
            vertical: BTreeSet::new(),
            claimed: Vec::new(),
        }
    }

    pub fn edges_placed(&self) -> usize {
        self.horizontal.len() + self.vertical.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    InProgress,
    Finished,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum Outcome {
    InProgress,
    Finished { winners: Vec<PlayerId> },
}

/// Why a move was refused. Checked in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum MoveRejection {
    #[display("game is already finished")]
    GameAlreadyFinished,
    #[display("edge {edge} is outside a {grid_size}x{grid_size} board")]
    OutOfRange { edge: Edge, grid_size: usize },
    #[display("edge {edge} is already placed")]
    EdgeAlreadyPlaced { edge: Edge },
}

impl MoveRejection {
    /// Stable snake_case identifier for traces and tooling.
    pub fn code(&self) -> &'static str {
        match self {
            MoveRejection::GameAlreadyFinished => "game_already_finished",
            MoveRejection::OutOfRange { .. } => "out_of_range",
            MoveRejection::EdgeAlreadyPlaced { .. } => "edge_already_placed",
        }
    }
}

impl std::error::Error for MoveRejection {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum ConfigError {
    #[display("grid size {grid_size} is outside {}..={}", MIN_GRID_SIZE, MAX_GRID_SIZE)]
    GridSizeOutOfBounds { grid_size: usize },
    #[display("player count {player_count} is outside {}..={}", MIN_PLAYERS, MAX_PLAYERS)]
    PlayerCountOutOfBounds { player_count: u8 },
}

impl std::error::Error for ConfigError {}

/// Immutable snapshot of a game. New snapshots come only from
/// [`super::initialize`] and [`super::apply_move`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    pub(crate) config: GameConfig,
    pub(crate) board: Board,
    pub(crate) current_player: PlayerId,
    pub(crate) scores: BTreeMap<PlayerId, u32>,
    pub(crate) status: GameStatus,
    pub(crate) moves_played: usize,
}

impl GameState {
    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn grid_size(&self) -> usize {
        self.config.grid_size
    }

    pub fn player_count(&self) -> u8 {
        self.config.player_count
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn horizontal_edges(&self) -> &BTreeSet<(usize, usize)> {
        &self.board.horizontal
    }

    pub fn vertical_edges(&self) -> &BTreeSet<(usize, usize)> {
        &self.board.vertical
    }

    pub fn claimed_cells(&self) -> &[ClaimedCell] {
        &self.board.claimed
    }

    pub fn current_player(&self) -> PlayerId {
        self.current_player
    }

    pub fn scores(&self) -> &BTreeMap<PlayerId, u32> {
        &self.scores
    }

    pub fn score_of(&self, player: PlayerId) -> u32 {
        self.scores.get(&player).copied().unwrap_or(0)
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status == GameStatus::Finished
    }

    /// Number of accepted moves so far.
    pub fn moves_played(&self) -> usize {
        self.moves_played
    }
}
