//! Replay SAN movetext and print the renderer payload for every ply.
//!
//! Run with:
//! `cargo run --bin replay_san -- 1. e4 e5 2. Nf3 Nc6`
//! `cargo run --bin replay_san -- --fen "4k3/P7/8/8/8/8/8/4K3 w - - 0 1" a8=Q+`
//! `cat game.txt | cargo run --bin replay_san -- --verify`
//!
//! Set `RUST_LOG=debug` to trace each applied ply on stderr.

use std::io::Read;

use chess_replay::replay::game_replay::GameReplay;
use chess_replay::replay::replay_config::ReplayConfig;
use chess_replay::utils::render_game_state::render_game_state;
use serde_json::json;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), String> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let mut config = ReplayConfig::from_env();
    let mut show_board = false;
    let mut movetext_parts = Vec::<String>::new();

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--fen" => {
                let fen = args.next().ok_or("--fen requires a FEN argument")?;
                config.start_fen = Some(fen);
            }
            "--verify" => config.verify_check_markers = true,
            "--no-null" => config.allow_null_moves = false,
            "--board" => show_board = true,
            _ => movetext_parts.push(arg),
        }
    }

    let movetext = if movetext_parts.is_empty() {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| format!("failed to read movetext from stdin: {e}"))?;
        buffer
    } else {
        movetext_parts.join(" ")
    };

    let replay = GameReplay::from_movetext(&movetext, config).map_err(|e| e.to_string())?;

    for (index, ply) in replay.plies().iter().enumerate() {
        let line = json!({
            "ply": index + 1,
            "san": ply.san,
            "delta": ply.coordinate_move,
        });
        println!("{line}");
    }

    if show_board {
        println!("{}", render_game_state(&replay.state().position));
    }
    println!("fen: {}", replay.state().get_fen());
    println!("status: {:?}", replay.status());
    Ok(())
}
