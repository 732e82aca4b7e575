use std::path::PathBuf;

use battleship_rl::{
    heuristic, init_logging, ui, AiConfig, BoardView, GuessResult, LoadOutcome, TrainingSession,
    ValueStore, BOARD_SIZE, DEFAULT_MODEL_PATH, SHIPS,
};
use clap::{Args, Parser, Subcommand};
use log::LevelFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Learning parameters shared by every subcommand that runs the AI.
#[derive(Args, Clone, Debug)]
struct AiArgs {
    #[arg(long, default_value = DEFAULT_MODEL_PATH)]
    model: PathBuf,
    #[arg(long, default_value_t = 0.1)]
    learning_rate: f64,
    #[arg(long, default_value_t = 0.9)]
    discount_factor: f64,
    #[arg(long, default_value_t = 0.2)]
    exploration_rate: f64,
    #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
    seed: Option<u64>,
}

impl AiArgs {
    fn config(&self) -> AiConfig {
        let config = AiConfig::new(self.learning_rate, self.discount_factor, self.exploration_rate)
            .with_model_path(&self.model);
        match self.seed {
            Some(s) => config.with_seed(s),
            None => config,
        }
    }

    fn fleet_seed(&self) -> u64 {
        self.seed.map_or_else(rand::random, |s| s.wrapping_add(1))
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Play AI self-play games against random fleets and save what was learned.
    Train {
        #[command(flatten)]
        ai: AiArgs,
        #[arg(long, default_value_t = 1000)]
        episodes: usize,
        #[arg(long, help = "Drop non-positive entries when saving")]
        prune: bool,
        #[arg(long, help = "Merge with the model already on disk before saving")]
        merge: bool,
        #[arg(long, help = "Do not write the model back")]
        dry_run: bool,
    },
    /// Watch a single game turn by turn.
    Watch {
        #[command(flatten)]
        ai: AiArgs,
        #[arg(long, help = "Print the heuristic heatmap before every search move")]
        heatmap: bool,
    },
    /// Summarise a saved model.
    Inspect {
        #[arg(long, default_value = DEFAULT_MODEL_PATH)]
        model: PathBuf,
        #[arg(long, default_value_t = 10)]
        top: usize,
    },
}

fn main() -> anyhow::Result<()> {
    init_logging(LevelFilter::Info);
    let cli = Cli::parse();

    match cli.command {
        Commands::Train {
            ai,
            episodes,
            prune,
            merge,
            dry_run,
        } => {
            let config = ai.config().with_prune_on_save(prune).with_merge_on_save(merge);
            let mut session = TrainingSession::new(BOARD_SIZE, &SHIPS, config, ai.fleet_seed());
            session.ai_mut().load();
            println!("Training for {} episodes...", episodes);
            let summary = session.train(episodes)?;
            println!(
                "games: {}  wins: {}  average turns: {:.1}  best: {}  worst: {}  entries: {}",
                summary.games,
                summary.wins,
                summary.average_turns,
                summary.best_turns.unwrap_or(0),
                summary.worst_turns.unwrap_or(0),
                summary.value_entries,
            );
            if !dry_run {
                session.ai_mut().save();
            }
        }
        Commands::Watch { ai, heatmap } => {
            let mut session = TrainingSession::new(BOARD_SIZE, &SHIPS, ai.config(), ai.fleet_seed());
            session.ai_mut().load();
            session.setup()?;
            session.ai_mut().reset_for_new_game();
            let mut turns = 0;
            loop {
                if heatmap && !session.ai().targeting().is_hunting() {
                    let board = session.board().borrow();
                    let scores = heuristic::heatmap(&*board, session.ai().config().hunt_length_cap());
                    println!("{}", ui::render_heatmap(board.size(), &scores));
                }
                let Some(result) = session.step()? else {
                    println!("No moves left.");
                    break;
                };
                turns += 1;
                let (target, source) = session
                    .ai()
                    .last_decision()
                    .ok_or_else(|| anyhow::anyhow!("decision missing after a step"))?;
                let outcome = match result {
                    GuessResult::Hit => "hit".to_string(),
                    GuessResult::Miss => "miss".to_string(),
                    GuessResult::Sink(name) => format!("sunk the {}", name),
                };
                println!("Turn {}: {} ({:?}) -> {}", turns, ui::coord_to_string(target), source, outcome);
                println!("{}", ui::render_view(&*session.board().borrow(), None));
                if session.board().borrow().all_sunk() {
                    println!("Fleet destroyed in {} turns.", turns);
                    break;
                }
            }
            let won = session.board().borrow().all_sunk();
            session.ai_mut().finish_game(won);
        }
        Commands::Inspect { model, top } => match ValueStore::load_from(&model) {
            LoadOutcome::Loaded(store) => {
                println!(
                    "{}: {} entries over {} board states",
                    model.display(),
                    store.len(),
                    store.state_count()
                );
                let mut entries: Vec<_> = store.iter().collect();
                entries.sort_by(|a, b| b.2.total_cmp(&a.2));
                for (state, action, value) in entries.into_iter().take(top) {
                    let attacked = state.size() * state.size() - state.unknown_cells().count();
                    println!(
                        "  {:>4} after {:>3} attacks: {:.4}",
                        ui::coord_to_string(action),
                        attacked,
                        value
                    );
                }
            }
            LoadOutcome::Missing => println!("{}: no saved model", model.display()),
            LoadOutcome::Corrupt(e) => anyhow::bail!("{}: {}", model.display(), e),
        },
    }
    Ok(())
}
