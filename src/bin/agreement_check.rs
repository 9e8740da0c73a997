//! Random-walk agreement check between the coordinate validator and SAN replay.
//!
//! Run with:
//! `cargo run --release --bin agreement_check`
//! `cargo run --release --bin agreement_check -- --games 200 --plies 300 --seed 42`
//! `cargo run --release --bin agreement_check -- --fen "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1"`

use chess_replay::utils::agreement_harness::{run_agreement_series, AgreementConfig};
use tracing_subscriber::EnvFilter;

fn parse_number<T: std::str::FromStr>(flag: &str, value: Option<String>) -> Result<T, String> {
    let value = value.ok_or_else(|| format!("{flag} requires a value"))?;
    value
        .parse::<T>()
        .map_err(|_| format!("invalid value for {flag}: {value}"))
}

fn main() -> Result<(), String> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let mut config = AgreementConfig::default();
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--games" => config.games = parse_number("--games", args.next())?,
            "--plies" => config.max_plies = parse_number("--plies", args.next())?,
            "--seed" => config.base_seed = parse_number("--seed", args.next())?,
            "--fen" => config.start_fen = Some(args.next().ok_or("--fen requires a FEN argument")?),
            other => return Err(format!("unknown argument: {other}")),
        }
    }

    let stats = run_agreement_series(&config).map_err(|e| e.to_string())?;
    println!("{}", stats.report());

    for disagreement in &stats.disagreements {
        println!(
            "seed={} ply={} san={} fen=\"{}\" detail={}",
            disagreement.seed, disagreement.ply, disagreement.san, disagreement.fen, disagreement.detail
        );
    }

    if stats.disagreements.is_empty() {
        Ok(())
    } else {
        Err(format!("{} disagreement(s) found", stats.disagreements.len()))
    }
}
