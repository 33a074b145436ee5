use std::io::Read;
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use dots_boxes_engine::engine::plugin::GamePlugin;
use dots_boxes_engine::engine::simulator::{apply_action_and_record, SimulationState};
use dots_boxes_engine::games::dots_and_boxes::{outcome_message, DotsAndBoxesPlugin};
use dots_boxes_engine::settings::{load_default_settings, load_settings, parse_script};

#[derive(Parser)]
#[command(
    name = "dots-boxes",
    about = "Play a scripted Dots and Boxes game and print the resulting board as JSON"
)]
struct Cli {
    /// Cells per side
    #[arg(short, long, env = "DOTS_GRID_SIZE")]
    grid_size: Option<usize>,

    /// Number of players (2-4)
    #[arg(short, long, env = "DOTS_PLAYERS")]
    players: Option<u8>,

    /// Path to dots_boxes.toml (default: auto-discover)
    #[arg(long, env = "DOTS_CONFIG")]
    config: Option<PathBuf>,

    /// File with one move per line, e.g. "h 0 1". Reads stdin when absent
    /// and the settings file has no moves.
    #[arg(long)]
    script: Option<PathBuf>,

    /// Print every game event as a JSON line before the board
    #[arg(long)]
    events: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let cli = Cli::parse();

    let settings = match cli.config {
        Some(ref path) => load_settings(path)?,
        None => load_default_settings(),
    };
    let mut game = settings.game;
    if let Some(grid_size) = cli.grid_size {
        game.grid_size = grid_size;
    }
    if let Some(players) = cli.players {
        game.player_count = players;
    }
    let config = game.to_config()?;

    let moves = if let Some(ref path) = cli.script {
        parse_script(&std::fs::read_to_string(path)?)?
    } else if !game.moves.is_empty() {
        game.script()?
    } else {
        let mut input = String::new();
        std::io::stdin().read_to_string(&mut input)?;
        parse_script(&input)?
    };

    let plugin = DotsAndBoxesPlugin;
    let mut sim = SimulationState::new(&plugin, &config);
    for mv in moves {
        if let Some(rejection) = apply_action_and_record(&plugin, &mut sim, mv) {
            tracing::warn!(edge = %mv, %rejection, "ignoring move");
        }
    }

    if cli.events {
        for event in &sim.events {
            println!("{}", serde_json::to_string(event)?);
        }
    }
    println!("{}", serde_json::to_string_pretty(&plugin.encode_state(&sim.state))?);

    match sim.game_over {
        Some(ref result) => tracing::info!("{}", outcome_message(&result.winners)),
        None => tracing::info!(
            to_move = plugin.current_player(&sim.state),
            remaining = sim.state.remaining_edges().len(),
            scores = ?sim.scores,
            "game still in progress"
        ),
    }

    Ok(())
}
