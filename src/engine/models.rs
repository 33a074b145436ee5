//! Core engine data types shared by every game module.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Seat number of a player, 1-based.
pub type PlayerId = u8;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub event_type: String,
    #[serde(default)]
    pub player_id: Option<PlayerId>,
    #[serde(default)]
    pub payload: serde_json::Value,
}

impl Event {
    pub fn new(event_type: &str, player_id: Option<PlayerId>, payload: serde_json::Value) -> Self {
        Self {
            event_type: event_type.into(),
            player_id,
            payload,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameResult {
    /// Players sharing the top score, ascending.
    pub winners: Vec<PlayerId>,
    pub final_scores: BTreeMap<PlayerId, u32>,
    #[serde(default = "default_reason")]
    pub reason: String,
}

fn default_reason() -> String {
    "normal".to_string()
}

impl GameResult {
    pub fn is_tie(&self) -> bool {
        self.winners.len() > 1
    }
}

/// Outcome of feeding one move to a game.
///
/// On a rejected move `state` is the unchanged input state, `rejection` is set
/// and `events` is empty.
#[derive(Debug, Clone)]
pub struct TransitionResult<S, R> {
    pub state: S,
    pub events: Vec<Event>,
    pub rejection: Option<R>,
    /// Number of cells (or equivalent scoring units) completed by this move.
    pub completed_count: usize,
    pub scores: BTreeMap<PlayerId, u32>,
    pub game_over: Option<GameResult>,
}

impl<S, R> TransitionResult<S, R> {
    pub fn is_accepted(&self) -> bool {
        self.rejection.is_none()
    }
}
