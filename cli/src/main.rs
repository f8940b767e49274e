// SPDX-License-Identifier: MIT OR Apache-2.0

//! Blokus CLI - headless driver for the rules engine
//!
//! Lists the piece catalog and replays scripted games through an in-memory
//! lobby, printing the final game state as JSON.

mod render;
mod script;

use anyhow::Result;
use blokus_core::defaults::piece_set;
use blokus_core::GameOptions;
use blokus_lobby::{InMemoryGameStore, Lobby};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(name = "blokus-cli", about = "Blokus rules engine command-line interface", version)]
struct Args {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the piece catalog, one JSON object per line
    Pieces {
        /// Piece set to list
        #[arg(long, default_value = "")]
        piece_set: String,
    },
    /// Replay a JSON game script and print the resulting state
    Play {
        /// Path to the script
        script: PathBuf,

        /// Length of one edge of the board
        #[arg(long, default_value_t = blokus_core::DEFAULT_BOARD_SIZE)]
        board_size: usize,

        /// Piece set to play with
        #[arg(long, default_value = "")]
        piece_set: String,

        /// Also draw the final board on stderr
        #[arg(long)]
        ascii: bool,
    },
}

/// Main entry point
#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging; RUST_LOG overrides the default level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if args.verbose { "debug" } else { "info" })
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match args.command {
        Command::Pieces { piece_set: name } => {
            for (index, piece) in piece_set(&name)?.iter().enumerate() {
                let line = serde_json::json!({
                    "index": index,
                    "size": piece.size(),
                    "blocks": piece.blocks(),
                });
                println!("{}", line);
            }
        }
        Command::Play {
            script,
            board_size,
            piece_set,
            ascii,
        } => {
            let loaded = script::Script::load(&script)?;
            let lobby = Lobby::new(Arc::new(InMemoryGameStore::new()));
            let opts = GameOptions {
                board_size,
                piece_set,
            };

            let outcome = script::replay(&lobby, &loaded, opts).await?;
            info!(
                game_id = %outcome.game_id,
                moves = outcome.moves_applied,
                "Script finished"
            );
            if let Some(rejected) = &outcome.rejected {
                eprintln!(
                    "move {} by {} rejected: {}",
                    rejected.index, rejected.player, rejected.reason
                );
            }
            if ascii {
                eprint!("{}", render::render_board(&outcome.state));
            }
            println!("{}", serde_json::to_string_pretty(&outcome.state)?);
        }
    }

    Ok(())
}
