//! Scoring for Dots and Boxes — one point per claimed cell.

use std::collections::BTreeMap;

use crate::engine::models::PlayerId;

use super::types::{Board, GameConfig, Outcome};

/// Count claimed cells per player. Every seated player has an entry, zero included.
pub fn count_scores(board: &Board, config: &GameConfig) -> BTreeMap<PlayerId, u32> {
    let mut counts: BTreeMap<PlayerId, u32> = config.players().map(|p| (p, 0)).collect();
    for cell in &board.claimed {
        *counts.entry(cell.owner).or_insert(0) += 1;
    }
    counts
}

/// Players sharing the highest score among seats 1..=P, ascending.
pub fn top_scorers(scores: &BTreeMap<PlayerId, u32>, config: &GameConfig) -> Vec<PlayerId> {
    let score = |p: PlayerId| scores.get(&p).copied().unwrap_or(0);
    let Some(best) = config.players().map(score).max() else {
        return vec![];
    };
    config.players().filter(|&p| score(p) == best).collect()
}

/// The game ends only when every cell is claimed. The sum runs over all seated
/// players, so 3- and 4-player games finish too.
pub fn evaluate_outcome(scores: &BTreeMap<PlayerId, u32>, config: &GameConfig) -> Outcome {
    let claimed: u32 = config
        .players()
        .map(|p| scores.get(&p).copied().unwrap_or(0))
        .sum();
    if claimed as usize == config.total_cells() {
        Outcome::Finished {
            winners: top_scorers(scores, config),
        }
    } else {
        Outcome::InProgress
    }
}

/// "Player 2", "Players 1 & 3", or "Nobody".
pub fn format_winners(winners: &[PlayerId]) -> String {
    match winners {
        [] => "Nobody".to_string(),
        [single] => format!("Player {single}"),
        many => {
            let names: Vec<String> = many.iter().map(|p| p.to_string()).collect();
            format!("Players {}", names.join(" & "))
        }
    }
}

/// End-of-game announcement.
pub fn outcome_message(winners: &[PlayerId]) -> String {
    if winners.len() > 1 {
        format!("It's a tie between {}!", format_winners(winners))
    } else {
        format!("{} wins!", format_winners(winners))
    }
}
