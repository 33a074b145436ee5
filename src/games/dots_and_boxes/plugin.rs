//! DotsAndBoxesPlugin — implements the GamePlugin trait.

use std::collections::BTreeMap;

use crate::engine::models::*;
use crate::engine::plugin::GamePlugin;

use super::board::{detect_completions, place_edge, remaining_edges, validate_move};
use super::scoring::{count_scores, evaluate_outcome, outcome_message};
use super::types::*;

/// Next player to move: the mover again if they closed anything, otherwise the
/// next seat, wrapping P back to 1. Closing two cells still earns one extra turn.
pub fn advance_turn(current: PlayerId, player_count: u8, completed_count: usize) -> PlayerId {
    if completed_count > 0 {
        current
    } else {
        current % player_count + 1
    }
}

/// Fresh snapshot: empty board, player 1 to move, all scores zero.
pub fn new_game(config: GameConfig) -> GameState {
    let board = Board::new(config.grid_size());
    let scores = count_scores(&board, &config);
    GameState {
        config,
        board,
        current_player: 1,
        scores,
        status: GameStatus::InProgress,
        moves_played: 0,
    }
}

fn edge_payload(edge: &Edge) -> serde_json::Value {
    serde_json::json!({
        "row": edge.row,
        "col": edge.col,
        "orientation": edge.orientation,
    })
}

pub struct DotsAndBoxesPlugin;

impl GamePlugin for DotsAndBoxesPlugin {
    type Config = GameConfig;
    type State = GameState;
    type Move = Edge;
    type Rejection = MoveRejection;

    fn game_id(&self) -> &str {
        "dots_and_boxes"
    }
    fn display_name(&self) -> &str {
        "Dots and Boxes"
    }
    fn min_players(&self) -> u8 {
        MIN_PLAYERS
    }
    fn max_players(&self) -> u8 {
        MAX_PLAYERS
    }
    fn description(&self) -> &str {
        "Take turns joining adjacent dots. Close the fourth side of a box to claim it \
         and move again. Most boxes wins."
    }

    fn create_initial_state(&self, config: &GameConfig) -> (GameState, Vec<Event>) {
        tracing::info!(
            grid_size = config.grid_size(),
            player_count = config.player_count(),
            "new dots and boxes game"
        );
        let events = vec![Event::new(
            "game_started",
            None,
            serde_json::json!({
                "grid_size": config.grid_size(),
                "player_count": config.player_count(),
            }),
        )];
        (new_game(*config), events)
    }

    fn get_valid_actions(&self, state: &GameState) -> Vec<Edge> {
        if state.is_finished() {
            return vec![];
        }
        remaining_edges(&state.board)
    }

    fn validate_action(&self, state: &GameState, mv: &Edge) -> Result<(), MoveRejection> {
        validate_move(&state.board, state.status, mv)
    }

    fn apply_action(&self, state: &GameState, mv: &Edge) -> TransitionResult<GameState, MoveRejection> {
        if let Err(rejection) = self.validate_action(state, mv) {
            tracing::debug!(edge = %mv, %rejection, "move rejected");
            return TransitionResult {
                state: state.clone(),
                events: vec![],
                rejection: Some(rejection),
                completed_count: 0,
                scores: state.scores.clone(),
                game_over: self.game_result(state),
            };
        }

        let mover = state.current_player;
        let mut next = state.clone();
        let mut events = Vec::new();

        place_edge(&mut next.board, mv);
        next.moves_played += 1;
        events.push(Event::new("edge_placed", Some(mover), edge_payload(mv)));

        let completed = detect_completions(&mut next.board, mover);
        for &(row, col) in &completed {
            events.push(Event::new(
                "cell_claimed",
                Some(mover),
                serde_json::json!({"row": row, "col": col}),
            ));
        }
        tracing::debug!(
            player = mover,
            edge = %mv,
            completed = completed.len(),
            "edge placed"
        );

        next.scores = count_scores(&next.board, &next.config);
        debug_assert_eq!(
            next.scores.values().sum::<u32>() as usize,
            next.board.claimed.len()
        );

        let mut game_over = None;
        match evaluate_outcome(&next.scores, &next.config) {
            Outcome::Finished { winners } => {
                next.status = GameStatus::Finished;
                let message = outcome_message(&winners);
                tracing::info!(?winners, scores = ?next.scores, moves = next.moves_played, "{message}");
                events.push(Event::new(
                    "game_over",
                    None,
                    serde_json::json!({
                        "winners": winners,
                        "final_scores": next.scores,
                        "message": message,
                    }),
                ));
                game_over = self.game_result(&next);
            }
            Outcome::InProgress => {
                next.current_player = advance_turn(mover, next.config.player_count(), completed.len());
                if completed.is_empty() {
                    events.push(Event::new(
                        "turn_passed",
                        Some(mover),
                        serde_json::json!({"next_player": next.current_player}),
                    ));
                } else {
                    events.push(Event::new("extra_turn", Some(mover), serde_json::json!({})));
                }
            }
        }

        TransitionResult {
            scores: next.scores.clone(),
            state: next,
            events,
            rejection: None,
            completed_count: completed.len(),
            game_over,
        }
    }

    fn get_scores(&self, state: &GameState) -> BTreeMap<PlayerId, u32> {
        state.scores.clone()
    }

    fn current_player(&self, state: &GameState) -> PlayerId {
        state.current_player
    }

    fn game_result(&self, state: &GameState) -> Option<GameResult> {
        match state.outcome() {
            Outcome::InProgress => None,
            Outcome::Finished { winners } => Some(GameResult {
                reason: if winners.len() > 1 { "tie" } else { "normal" }.into(),
                winners,
                final_scores: state.scores.clone(),
            }),
        }
    }

    fn encode_state(&self, state: &GameState) -> serde_json::Value {
        serde_json::json!({
            "grid_size": state.grid_size(),
            "player_count": state.player_count(),
            "horizontal_edges": state.board.horizontal,
            "vertical_edges": state.board.vertical,
            "claimed_cells": state.board.claimed,
            "current_player": state.current_player,
            "scores": state.scores,
            "status": state.status,
            "winners": state.winners(),
            "moves_played": state.moves_played,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start(grid_size: usize, player_count: u8) -> GameState {
        let config = GameConfig::new(grid_size, player_count).unwrap();
        DotsAndBoxesPlugin.create_initial_state(&config).0
    }

    fn play(state: &GameState, edge: Edge) -> TransitionResult<GameState, MoveRejection> {
        DotsAndBoxesPlugin.apply_action(state, &edge)
    }

    fn event_types(events: &[Event]) -> Vec<&str> {
        events.iter().map(|e| e.event_type.as_str()).collect()
    }

    #[test]
    fn test_advance_turn_cycles() {
        assert_eq!(advance_turn(1, 2, 0), 2);
        assert_eq!(advance_turn(2, 2, 0), 1);
        assert_eq!(advance_turn(3, 4, 0), 4);
        assert_eq!(advance_turn(4, 4, 0), 1);
        assert_eq!(advance_turn(3, 3, 0), 1);
    }

    #[test]
    fn test_advance_turn_extra_turn() {
        assert_eq!(advance_turn(2, 3, 1), 2);
        assert_eq!(advance_turn(2, 3, 2), 2);
    }

    #[test]
    fn test_initial_state() {
        let config = GameConfig::new(4, 3).unwrap();
        let (state, events) = DotsAndBoxesPlugin.create_initial_state(&config);
        assert_eq!(state.current_player(), 1);
        assert_eq!(state.status(), GameStatus::InProgress);
        assert_eq!(state.scores(), &BTreeMap::from([(1, 0), (2, 0), (3, 0)]));
        assert!(state.horizontal_edges().is_empty());
        assert!(state.vertical_edges().is_empty());
        assert!(state.claimed_cells().is_empty());
        assert_eq!(DotsAndBoxesPlugin.get_valid_actions(&state).len(), 40);
        assert_eq!(event_types(&events), vec!["game_started"]);
        assert_eq!(events[0].payload["grid_size"], 4);
    }

    #[test]
    fn test_first_box_gives_extra_turn() {
        let mut state = start(2, 2);
        let moves = [
            Edge::vertical(0, 0),
            Edge::vertical(0, 1),
            Edge::horizontal(0, 0),
        ];
        let mut movers = vec![];
        for edge in moves {
            movers.push(state.current_player());
            let result = play(&state, edge);
            assert_eq!(result.completed_count, 0);
            state = result.state;
        }
        assert_eq!(movers, vec![1, 2, 1]);
        assert_eq!(state.current_player(), 2);

        let result = play(&state, Edge::horizontal(1, 0));
        assert!(result.is_accepted());
        assert_eq!(result.completed_count, 1);
        assert_eq!(result.state.scores(), &BTreeMap::from([(1, 0), (2, 1)]));
        assert_eq!(result.state.status(), GameStatus::InProgress);
        assert_eq!(result.state.current_player(), 2);
        assert_eq!(result.state.cell_owner(0, 0), Some(2));
        assert!(result.game_over.is_none());
        assert_eq!(
            event_types(&result.events),
            vec!["edge_placed", "cell_claimed", "extra_turn"]
        );
    }

    #[test]
    fn test_single_cell_game() {
        let mut state = start(1, 2);
        for edge in [Edge::horizontal(0, 0), Edge::horizontal(1, 0), Edge::vertical(0, 0)] {
            state = play(&state, edge).state;
        }
        assert_eq!(state.current_player(), 2);

        let result = play(&state, Edge::vertical(0, 1));
        assert_eq!(result.state.status(), GameStatus::Finished);
        assert_eq!(result.state.winners(), vec![2]);
        assert_eq!(result.state.current_player(), 2);
        let game_over = result.game_over.unwrap();
        assert_eq!(game_over.winners, vec![2]);
        assert_eq!(game_over.reason, "normal");
        assert_eq!(
            event_types(&result.events),
            vec!["edge_placed", "cell_claimed", "game_over"]
        );
        assert_eq!(result.events[2].payload["message"], "Player 2 wins!");
    }

    #[test]
    fn test_four_player_tie() {
        let moves = [
            Edge::horizontal(0, 0), // p1
            Edge::horizontal(0, 1), // p2
            Edge::horizontal(2, 1), // p3
            Edge::vertical(0, 0),   // p4
            Edge::vertical(0, 2),   // p1
            Edge::vertical(1, 0),   // p2
            Edge::vertical(1, 2),   // p3
            Edge::horizontal(1, 0), // p4
            Edge::horizontal(1, 1), // p1
            Edge::vertical(0, 1),   // p2 closes (0,0) and (0,1)
            Edge::horizontal(2, 0), // p2 again, closes nothing
            Edge::vertical(1, 1),   // p3 closes (1,0) and (1,1)
        ];
        let mut state = start(2, 4);
        let mut last = None;
        for edge in moves {
            let result = play(&state, edge);
            assert!(result.is_accepted(), "{edge} rejected");
            state = result.state.clone();
            last = Some(result);
        }
        let last = last.unwrap();
        assert_eq!(last.completed_count, 2);
        assert_eq!(state.status(), GameStatus::Finished);
        assert_eq!(state.scores(), &BTreeMap::from([(1, 0), (2, 2), (3, 2), (4, 0)]));
        assert_eq!(state.winners(), vec![2, 3]);
        assert_eq!(state.current_player(), 3);
        let game_over = last.game_over.unwrap();
        assert!(game_over.is_tie());
        assert_eq!(game_over.reason, "tie");
        assert_eq!(state.cell_owner(0, 1), Some(2));
        assert_eq!(state.cell_owner(1, 0), Some(3));
    }

    #[test]
    fn test_rejected_move_leaves_state() {
        let state = play(&start(3, 2), Edge::horizontal(0, 0)).state;

        let dup = play(&state, Edge::horizontal(0, 0));
        assert_eq!(dup.rejection, Some(MoveRejection::EdgeAlreadyPlaced { edge: Edge::horizontal(0, 0) }));
        assert_eq!(dup.state, state);
        assert!(dup.events.is_empty());

        let out = play(&state, Edge::vertical(3, 0));
        assert!(matches!(out.rejection, Some(MoveRejection::OutOfRange { .. })));
        assert_eq!(out.state, state);
    }

    #[test]
    fn test_finished_game_rejects_everything() {
        let mut state = start(1, 3);
        for edge in DotsAndBoxesPlugin.get_valid_actions(&state) {
            state = play(&state, edge).state;
        }
        assert!(state.is_finished());
        assert!(DotsAndBoxesPlugin.get_valid_actions(&state).is_empty());

        let result = play(&state, Edge::horizontal(0, 0));
        assert_eq!(result.rejection, Some(MoveRejection::GameAlreadyFinished));
        assert_eq!(result.state, state);
        assert!(result.game_over.is_some());
    }

    #[test]
    fn test_encode_state_view() {
        let state = play(&start(2, 2), Edge::vertical(1, 2)).state;
        let view = DotsAndBoxesPlugin.encode_state(&state);
        assert_eq!(view["grid_size"], 2);
        assert_eq!(view["vertical_edges"], serde_json::json!([[1, 2]]));
        assert_eq!(view["horizontal_edges"], serde_json::json!([]));
        assert_eq!(view["current_player"], 2);
        assert_eq!(view["scores"]["1"], 0);
        assert_eq!(view["status"], "in_progress");
        assert_eq!(view["winners"], serde_json::json!([]));
        assert_eq!(view["moves_played"], 1);
    }
}
