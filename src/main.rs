//! Duel - command-line match runner
//!
//! Plays AI-vs-AI matches with the greedy policy and prints each match
//! history. Set `RUST_LOG=duel_engine=debug` to follow the engine.

use std::path::PathBuf;

use clap::Parser;
use duel_engine::{
    ai_controllers, CardCatalog, GameBuilder, GameConfig, GameResult, Result,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "duel")]
#[command(about = "Two-player card duel engine - AI vs AI runner", long_about = None)]
struct Cli {
    /// Seed of the first match (later matches use seed + n)
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Number of matches to play
    #[arg(long, short = 'n', default_value_t = 1)]
    games: u32,

    /// Stop a match after this many turns and call it a draw
    #[arg(long, default_value_t = 500)]
    max_turns: u32,

    /// JSON card catalog (default: built-in cards)
    #[arg(long, value_name = "FILE")]
    cards: Option<PathBuf>,

    /// JSON match configuration (missing fields take defaults)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// First player name
    #[arg(long, default_value = "Player")]
    p1_name: String,

    /// Second player name
    #[arg(long, default_value = "Machine")]
    p2_name: String,

    /// Only print the final tally
    #[arg(long, short = 'q')]
    quiet: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();

    let catalog = match &cli.cards {
        Some(path) => CardCatalog::load(path)?,
        None => CardCatalog::standard(),
    };
    let config = match &cli.config {
        Some(path) => GameConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => GameConfig::default(),
    };

    let names = [cli.p1_name.as_str(), cli.p2_name.as_str()];
    let mut wins = [0u32; 2];
    let mut draws = 0u32;

    for n in 0..cli.games {
        let seed = cli.seed.wrapping_add(u64::from(n));
        let mut game = GameBuilder::new()
            .with_config(config.clone().with_seed(seed))
            .with_catalog(catalog.clone())
            .player(names[0], false)
            .player(names[1], false)
            .build()?;

        let mut controllers = ai_controllers(game.players());

        let result = game.run(&mut controllers, cli.max_turns)?.unwrap_or(GameResult::Draw);
        info!(game = n, seed, turns = game.turn(), ?result, "match finished");

        if !cli.quiet {
            println!("=== Match {} (seed {seed}) ===", n + 1);
            for line in game.history().iter() {
                println!("{line}");
            }
        }

        match result {
            GameResult::Winner(id) => {
                wins[id.index()] += 1;
                if !cli.quiet {
                    println!("Winner: {} after {} turns\n", names[id.index()], game.turn());
                }
            }
            GameResult::Draw => {
                draws += 1;
                if !cli.quiet {
                    println!("Draw after {} turns\n", game.turn());
                }
            }
        }
    }

    println!(
        "{}: {} wins, {}: {} wins, draws: {draws}",
        names[0], wins[0], names[1], wins[1]
    );
    Ok(())
}
