use battleship_rl::{init_logging, AiConfig, TrainingSession, BOARD_SIZE, SHIPS};
use log::LevelFilter;
use serde_json::json;

fn main() -> anyhow::Result<()> {
    init_logging(LevelFilter::Warn);
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: {} <fleet-seed> <ai-seed>", args[0]);
        std::process::exit(1);
    }
    let fleet_seed: u64 = args[1].parse()?;
    let ai_seed: u64 = args[2].parse()?;

    // in-memory only: a smoke run must not touch a saved model
    let config = AiConfig::default().with_seed(ai_seed);
    let mut session = TrainingSession::new(BOARD_SIZE, &SHIPS, config, fleet_seed);
    let report = session.play_game()?;

    let result = json!({
        "won": report.won,
        "turns": report.turns,
        "hits": report.hits,
        "misses": report.misses,
        "value_entries": session.ai().value_store().len(),
    });
    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
