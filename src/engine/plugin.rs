//! GamePlugin trait — the interface every game must implement.

use std::collections::BTreeMap;

use crate::engine::models::*;

/// Trait that every game must implement.
///
/// Games are pure state machines: every method takes a state by reference and
/// any transition hands back a new state value, leaving the input untouched.
pub trait GamePlugin {
    type Config;
    type State: Clone;
    type Move: Copy + std::fmt::Debug;
    type Rejection: std::error::Error + Clone;

    fn game_id(&self) -> &str;
    fn display_name(&self) -> &str;
    fn min_players(&self) -> u8;
    fn max_players(&self) -> u8;
    fn description(&self) -> &str;

    /// Create initial game state from an already validated config.
    fn create_initial_state(&self, config: &Self::Config) -> (Self::State, Vec<Event>);

    /// Return all legal moves in the current state.
    fn get_valid_actions(&self, state: &Self::State) -> Vec<Self::Move>;

    /// Validate a move without applying it.
    fn validate_action(&self, state: &Self::State, mv: &Self::Move) -> Result<(), Self::Rejection>;

    /// Validate and apply a move, returning new state + events.
    fn apply_action(
        &self,
        state: &Self::State,
        mv: &Self::Move,
    ) -> TransitionResult<Self::State, Self::Rejection>;

    fn get_scores(&self, state: &Self::State) -> BTreeMap<PlayerId, u32>;

    /// Player expected to move next (frozen once the game is over).
    fn current_player(&self, state: &Self::State) -> PlayerId;

    /// Final result, or None while the game is still running.
    fn game_result(&self, state: &Self::State) -> Option<GameResult>;

    /// Serialize a snapshot for renderers and tooling.
    fn encode_state(&self, state: &Self::State) -> serde_json::Value;
}
