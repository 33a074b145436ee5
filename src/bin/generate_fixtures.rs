//! Fixture generator for replay tests.
//!
//! Plays seeded random games to completion and records every turn. Run with:
//!
//!     cargo run --bin generate_fixtures

use std::fs;
use std::path::PathBuf;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

use dots_boxes_engine::engine::plugin::GamePlugin;
use dots_boxes_engine::games::dots_and_boxes::{DotsAndBoxesPlugin, GameConfig};

const SEEDS: [u64; 3] = [42, 123, 999];
const CONFIGS: [(usize, u8); 3] = [(3, 2), (4, 3), (5, 4)];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("warn".parse()?))
        .init();

    let fixtures_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures");
    fs::create_dir_all(&fixtures_dir)?;

    let plugin = DotsAndBoxesPlugin;
    let mut total_generated = 0;

    for &seed in &SEEDS {
        for &(grid_size, player_count) in &CONFIGS {
            let config = GameConfig::new(grid_size, player_count)?;
            let mut rng = StdRng::seed_from_u64(seed);
            let (mut state, _) = plugin.create_initial_state(&config);
            let mut turns = Vec::new();

            loop {
                let valid = plugin.get_valid_actions(&state);
                let Some(&edge) = valid.choose(&mut rng) else {
                    break;
                };
                let mover = plugin.current_player(&state);
                let result = plugin.apply_action(&state, &edge);
                state = result.state;
                turns.push(serde_json::json!({
                    "turn": turns.len() + 1,
                    "player": mover,
                    "edge": edge.to_string(),
                    "accepted": true,
                    "completed": result.completed_count,
                    "next_player": plugin.current_player(&state),
                    "scores": result.scores,
                    "status": state.status(),
                }));
            }

            let fixture = serde_json::json!({
                "seed": seed,
                "grid_size": grid_size,
                "player_count": player_count,
                "turns": turns,
                "final": {
                    "winners": state.winners(),
                    "scores": state.scores(),
                },
            });

            let filename = format!("trace_{}_n{}_p{}.json", seed, grid_size, player_count);
            let path = fixtures_dir.join(&filename);
            fs::write(&path, serde_json::to_string_pretty(&fixture)?)?;
            total_generated += 1;
            eprintln!(
                "  Generated {} (moves={}, winners={:?})",
                filename,
                state.moves_played(),
                state.winners(),
            );
        }
    }

    eprintln!("\nGenerated {} fixture files in {:?}", total_generated, fixtures_dir);
    Ok(())
}
