// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scripted games: a JSON list of players and moves replayed through a lobby

use anyhow::{bail, Context, Result};
use blokus_core::{Color, Coord, Corner, GameOptions, GameSnapshot, Orientation, PlayerOptions, Rotation};
use blokus_lobby::Lobby;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

/// A game script
#[derive(Debug, Clone, Deserialize)]
pub struct Script {
    pub players: Vec<ScriptPlayer>,
    /// Player taking the first turn, the first listed player when absent
    #[serde(default)]
    pub first: Option<String>,
    #[serde(default)]
    pub moves: Vec<ScriptMove>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScriptPlayer {
    pub name: String,
    #[serde(default)]
    pub color: Option<Color>,
    #[serde(default)]
    pub corner: Option<Corner>,
}

/// One turn. A move without a piece is a pass.
#[derive(Debug, Clone, Deserialize)]
pub struct ScriptMove {
    pub player: String,
    #[serde(default)]
    pub piece: Option<usize>,
    #[serde(default)]
    pub rotation: Rotation,
    #[serde(default)]
    pub flip: bool,
    #[serde(default)]
    pub x: i32,
    #[serde(default)]
    pub y: i32,
}

/// A move the game refused
#[derive(Debug, Clone, Serialize)]
pub struct RejectedMove {
    /// Position in the script's move list
    pub index: usize,
    pub player: String,
    pub reason: String,
}

/// Result of replaying a script
#[derive(Debug, Clone, Serialize)]
pub struct Outcome {
    pub game_id: String,
    pub moves_applied: usize,
    pub rejected: Option<RejectedMove>,
    pub state: GameSnapshot,
}

impl Script {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading script {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing script {}", path.display()))
    }
}

/// Replay `script` as a new game in `lobby`, stopping at the first rejected move
pub async fn replay(lobby: &Lobby, script: &Script, opts: GameOptions) -> Result<Outcome> {
    let Some(first_listed) = script.players.first() else {
        bail!("script has no players");
    };

    let game_id = lobby.create_game("cli", "scripted game", opts).await?;
    for p in &script.players {
        let color = lobby
            .add_player(
                &game_id,
                &p.name,
                PlayerOptions {
                    color: p.color,
                    corner: p.corner,
                },
            )
            .await?;
        info!(player = %p.name, %color, "Seated player");
    }
    let first = script.first.as_deref().unwrap_or(&first_listed.name);
    lobby.start_game(&game_id, first).await?;

    let mut rejected = None;
    let mut moves_applied = 0;
    for (index, mv) in script.moves.iter().enumerate() {
        let result = match mv.piece {
            Some(piece) => {
                lobby
                    .place_piece(
                        &game_id,
                        &mv.player,
                        piece,
                        Orientation::new(mv.rotation, mv.flip),
                        Coord::new(mv.x, mv.y),
                    )
                    .await
            }
            None => lobby.pass_turn(&game_id, &mv.player).await,
        };
        if let Err(e) = result {
            warn!(index, player = %mv.player, error = %e, "Move rejected");
            rejected = Some(RejectedMove {
                index,
                player: mv.player.clone(),
                reason: e.to_string(),
            });
            break;
        }
        moves_applied += 1;
    }

    let state = lobby.game_state(&game_id).await?;
    Ok(Outcome {
        game_id,
        moves_applied,
        rejected,
        state,
    })
}
