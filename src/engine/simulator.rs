//! Synchronous game simulator — threads a state value through a sequence of moves.
//! Used by the CLI, fixture generation, benches and property tests.

use std::collections::BTreeMap;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::engine::models::*;
use crate::engine::plugin::GamePlugin;

/// Running game plus everything observed while playing it.
#[derive(Debug, Clone)]
pub struct SimulationState<S, M> {
    pub state: S,
    /// Accepted moves, in order.
    pub history: Vec<M>,
    pub events: Vec<Event>,
    pub rejected: usize,
    pub scores: BTreeMap<PlayerId, u32>,
    pub game_over: Option<GameResult>,
}

impl<S: Clone, M: Copy> SimulationState<S, M> {
    pub fn new<P>(plugin: &P, config: &P::Config) -> Self
    where
        P: GamePlugin<State = S, Move = M>,
    {
        let (state, events) = plugin.create_initial_state(config);
        let scores = plugin.get_scores(&state);
        Self {
            state,
            history: Vec::new(),
            events,
            rejected: 0,
            scores,
            game_over: None,
        }
    }
}

/// Apply a move and fold its result into `sim`.
/// Returns the rejection if the move was refused; `sim.state` is then unchanged.
pub fn apply_action_and_record<P: GamePlugin>(
    plugin: &P,
    sim: &mut SimulationState<P::State, P::Move>,
    mv: P::Move,
) -> Option<P::Rejection> {
    let result = plugin.apply_action(&sim.state, &mv);
    if let Some(rejection) = result.rejection {
        sim.rejected += 1;
        tracing::debug!(game = plugin.game_id(), ?mv, %rejection, "move rejected");
        return Some(rejection);
    }

    sim.state = result.state;
    sim.history.push(mv);
    sim.events.extend(result.events);
    sim.scores = result.scores;
    sim.game_over = result.game_over;
    None
}

/// Feed every move in order; rejected moves are skipped. Returns the rejection count.
pub fn play_moves<P, I>(plugin: &P, sim: &mut SimulationState<P::State, P::Move>, moves: I) -> usize
where
    P: GamePlugin,
    I: IntoIterator<Item = P::Move>,
{
    let mut rejected = 0;
    for mv in moves {
        if apply_action_and_record(plugin, sim, mv).is_some() {
            rejected += 1;
        }
    }
    rejected
}

/// Play uniformly random legal moves until the game ends or `max_moves` accepted
/// moves have been made.
pub fn random_playout<P, R>(
    plugin: &P,
    sim: &mut SimulationState<P::State, P::Move>,
    rng: &mut R,
    max_moves: Option<usize>,
) where
    P: GamePlugin,
    R: Rng + ?Sized,
{
    let mut played = 0;
    while sim.game_over.is_none() && max_moves.map_or(true, |max| played < max) {
        let valid = plugin.get_valid_actions(&sim.state);
        let Some(&mv) = valid.choose(rng) else {
            break;
        };
        if apply_action_and_record(plugin, sim, mv).is_some() {
            break;
        }
        played += 1;
    }
}
