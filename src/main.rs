//! Push Fight command-line driver.
//!
//! ## Usage
//!
//! - `pushfight` - Plan one move from the start position
//! - `pushfight demo [--packed HEX]` - Plan one move and show the result
//! - `pushfight selfplay` - Let the planner play both sides to the end

use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use pushfight_rust::codec;
use pushfight_rust::constants::DEFAULT_BUDGET_MS;
use pushfight_rust::mcts::{self, TreeNode};
use pushfight_rust::position::Position;

/// Push Fight MCTS move planner
#[derive(Parser)]
#[command(name = "pushfight")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Plan a single move and print the chosen successor
    Demo {
        /// Planning budget in milliseconds
        #[arg(long, default_value_t = DEFAULT_BUDGET_MS)]
        budget_ms: u64,
        /// Hex-packed position to plan from instead of the start position
        #[arg(long)]
        packed: Option<String>,
    },
    /// Let the planner play both sides until the game ends
    Selfplay {
        /// Planning budget per move in milliseconds
        #[arg(long, default_value_t = DEFAULT_BUDGET_MS)]
        budget_ms: u64,
        /// Give up after this many turns
        #[arg(long, default_value_t = 200)]
        max_turns: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Demo { budget_ms, packed }) => run_demo(budget_ms, packed)?,
        Some(Commands::Selfplay { budget_ms, max_turns }) => run_selfplay(budget_ms, max_turns),
        None => run_demo(DEFAULT_BUDGET_MS, None)?,
    }
    Ok(())
}

fn parse_packed(hex: &str) -> Result<codec::Packed> {
    let digits = hex.trim_start_matches("0x");
    codec::Packed::from_str_radix(digits, 16)
        .with_context(|| format!("not a hex-packed position: {hex:?}"))
}

fn run_demo(budget_ms: u64, packed: Option<String>) -> Result<()> {
    let pos = match packed {
        Some(hex) => codec::decode(parse_packed(&hex)?)?,
        None => Position::start(),
    };
    println!("{pos}");
    println!("Planning for {budget_ms} ms...");

    let mut root = TreeNode::new(pos);
    let best = mcts::tree_search(
        &mut root,
        Duration::from_millis(budget_ms),
        &mut fastrand::Rng::new(),
    );
    if let Some(children) = &root.children {
        let chosen = &children[best];
        println!(
            "Chosen move after {} rollouts (win rate {:.1}%):",
            root.visits,
            chosen.winrate() * 100.0
        );
        println!("{}", chosen.pos);
        if let Some(winner) = chosen.pos.winner() {
            println!("{winner:?} wins");
        } else {
            println!("Packed: {:#x}", codec::encode(&chosen.pos));
        }
    }
    Ok(())
}

fn run_selfplay(budget_ms: u64, max_turns: usize) {
    let budget = Duration::from_millis(budget_ms);
    let mut pos = Position::start();
    println!("{pos}");

    for turn in 1..=max_turns {
        pos = mcts::plan(&pos, budget);
        println!("turn {turn}:");
        println!("{pos}");
        if let Some(winner) = pos.winner() {
            println!("{winner:?} wins after {turn} turns");
            return;
        }
    }
    println!("No winner within {max_turns} turns");
}
