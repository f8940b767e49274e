// SPDX-License-Identifier: MIT OR Apache-2.0

//! Quick Blokus Demo - four greedy players fill a board
//! Each player drops its largest piece that fits anywhere, or passes.

use anyhow::Result;
use blokus_core::scoring::winners;
use blokus_core::{Coord, Corner, Game, GameOptions, Orientation, PlayerOptions};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut game = GameOptions::default().new_game()?;
    for (name, corner) in [
        ("blue", Corner::TopLeft),
        ("yellow", Corner::TopRight),
        ("red", Corner::BottomRight),
        ("green", Corner::BottomLeft),
    ] {
        let opts = PlayerOptions {
            color: None,
            corner: Some(corner),
        };
        let start = opts.start_position(&game);
        game.add_player(name, opts.color(), start)?;
    }

    while !game.is_game_end() {
        let Some(name) = game.current_player().map(|p| p.name.clone()) else {
            break;
        };
        match find_move(&game, &name) {
            Some((piece, orientation, location)) => {
                game.place_piece(&name, piece, orientation, location)?
            }
            None => game.pass_turn(&name)?,
        }
        game.advance_turn()?;
    }

    println!("{}", render(&game));
    let scores = game.scores();
    for s in &scores {
        println!("{:>7} {:>4} ({} squares left)", s.player, s.points, s.remaining_squares);
    }
    println!("Winner(s): {}", winners(&scores).join(", "));
    info!(moves = game.moves().len(), "Demo finished");
    Ok(())
}

/// Largest unplaced piece with a legal placement, scanning the board in order
fn find_move(game: &Game, name: &str) -> Option<(usize, Orientation, Coord)> {
    let player = game.player(name)?;
    let mut candidates: Vec<usize> = player.remaining_pieces().collect();
    candidates.sort_by_key(|&i| std::cmp::Reverse(game.pieces()[i].size()));

    let size = game.board().height() as i32;
    for piece in candidates {
        for orientation in Orientation::all() {
            for x in 0..size {
                for y in 0..size {
                    let location = Coord::new(x, y);
                    if game
                        .check_piece_placement(name, piece, orientation, location)
                        .is_ok()
                    {
                        return Some((piece, orientation, location));
                    }
                }
            }
        }
    }
    None
}

fn render(game: &Game) -> String {
    let board = game.board();
    let mut out = String::new();
    for x in 0..board.height() as i32 {
        for y in 0..board.width() as i32 {
            out.push(board.cell(Coord::new(x, y)).symbol());
        }
        out.push('\n');
    }
    out
}
