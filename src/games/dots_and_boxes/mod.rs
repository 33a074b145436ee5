//! Dots and Boxes rules engine.
//!
//! Every operation takes a [`GameState`] by reference and hands back a new one;
//! callers own the current snapshot and must submit moves one at a time.
//!
//! ```
//! use dots_boxes_engine::games::dots_and_boxes::{apply_move, initialize, Edge};
//!
//! let state = initialize(3, 2).unwrap();
//! let result = apply_move(&state, Edge::horizontal(0, 0));
//! assert!(result.is_accepted());
//! assert_eq!(result.state.current_player(), 2);
//! ```

pub mod board;
pub mod plugin;
pub mod scoring;
pub mod types;

use crate::engine::models::{PlayerId, TransitionResult};
use crate::engine::plugin::GamePlugin;

pub use board::{all_edges, edge_count};
pub use plugin::DotsAndBoxesPlugin;
pub use scoring::{format_winners, outcome_message};
pub use types::*;

/// Start a new game. Fails without touching any existing game if the
/// configuration is out of bounds.
pub fn initialize(grid_size: usize, player_count: u8) -> Result<GameState, ConfigError> {
    let config = GameConfig::new(grid_size, player_count)?;
    Ok(DotsAndBoxesPlugin.create_initial_state(&config).0)
}

/// Validate and apply one move. A rejected move returns the input state unchanged
/// together with the reason.
pub fn apply_move(state: &GameState, edge: Edge) -> TransitionResult<GameState, MoveRejection> {
    DotsAndBoxesPlugin.apply_action(state, &edge)
}

/// Fresh game with the same configuration.
pub fn reset(state: &GameState) -> GameState {
    plugin::new_game(state.config())
}

/// Changing the board size always starts over.
pub fn with_grid_size(state: &GameState, grid_size: usize) -> Result<GameState, ConfigError> {
    initialize(grid_size, state.player_count())
}

/// Changing the number of players always starts over.
pub fn with_player_count(state: &GameState, player_count: u8) -> Result<GameState, ConfigError> {
    initialize(state.grid_size(), player_count)
}

/// Legal moves in `state`; empty once finished.
pub fn valid_moves(state: &GameState) -> Vec<Edge> {
    DotsAndBoxesPlugin.get_valid_actions(state)
}

impl GameState {
    pub fn has_edge(&self, edge: &Edge) -> bool {
        board::has_edge(&self.board, edge)
    }

    pub fn is_cell_claimed(&self, row: usize, col: usize) -> bool {
        board::is_cell_claimed(&self.board, row, col)
    }

    pub fn cell_owner(&self, row: usize, col: usize) -> Option<PlayerId> {
        board::cell_owner(&self.board, row, col)
    }

    pub fn remaining_edges(&self) -> Vec<Edge> {
        board::remaining_edges(&self.board)
    }

    pub fn outcome(&self) -> Outcome {
        match self.status {
            GameStatus::InProgress => Outcome::InProgress,
            GameStatus::Finished => Outcome::Finished {
                winners: scoring::top_scorers(&self.scores, &self.config),
            },
        }
    }

    /// Empty while the game is running.
    pub fn winners(&self) -> Vec<PlayerId> {
        match self.outcome() {
            Outcome::InProgress => vec![],
            Outcome::Finished { winners } => winners,
        }
    }
}
