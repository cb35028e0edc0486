// Welcome to
// __________         __    __  .__                               __
// \______   \_____ _/  |__/  |_|  |   ____   ______ ____ _____  |  | __ ____
//  |    |  _/\__  \\   __\   __\  | _/ __ \ /  ___//    \\__  \ |  |/ // __ \
//  |    |   \ / __ \|  |  |  | |  |_\  ___/ \___ \|   |  \/ __ \|    <\  ___/
//  |________/(______/__|  |__| |____/\_____>______>___|__(______/__|__\\_____>
//
// This file binds the Battlesnake API endpoints to the pathfinding engine.
// For more info see docs.battlesnake.com

use log::{error, info};
use serde_json::{json, Value};
use std::time::Instant;

use crate::config::Config;
use crate::debug_logger::DebugLogger;
use crate::policy::{self, MoveDecision};
use crate::types::{Battlesnake, Board, Game};

/// Battlesnake Bot with OOP-style API
/// Takes static configuration dependencies and exposes methods corresponding to API endpoints
pub struct Bot {
    config: Config,
    debug_logger: DebugLogger,
}

impl Bot {
    /// Creates a new Bot instance with debug logging disabled
    ///
    /// # Arguments
    /// * `config` - Static configuration that does not change during the bot's lifetime
    pub fn new(config: Config) -> Self {
        Bot {
            config,
            debug_logger: DebugLogger::disabled(),
        }
    }

    /// Creates a Bot that records every move decision to `debug_logger`
    pub fn with_debug_logger(config: Config, debug_logger: DebugLogger) -> Self {
        Bot {
            config,
            debug_logger,
        }
    }

    /// Returns bot metadata and appearance
    /// Corresponds to GET / endpoint
    pub fn info(&self) -> Value {
        info!("INFO");

        let appearance = &self.config.appearance;
        json!({
            "apiversion": appearance.apiversion,
            "author": appearance.author,
            "color": appearance.color,
            "head": appearance.head,
            "tail": appearance.tail,
            "version": appearance.version,
        })
    }

    /// Called when a game starts
    /// Corresponds to POST /start endpoint
    pub fn start(&self, game: &Game, _turn: &i32, _board: &Board, you: &Battlesnake) {
        info!("GAME START {} as {}", game.id, you.id);
    }

    /// Called when a game ends
    /// Corresponds to POST /end endpoint
    pub fn end(&self, game: &Game, turn: &i32, _board: &Board, you: &Battlesnake) {
        info!(
            "GAME OVER {} at turn {} (health {}, length {})",
            game.id, turn, you.health, you.length
        );
    }

    /// Computes and returns the next move
    /// Corresponds to POST /move endpoint
    ///
    /// The engine is synchronous; it runs on tokio's blocking pool so that a
    /// slow turn never stalls other games served by the same runtime.
    ///
    /// # Returns
    /// * `Value` - JSON response containing the chosen move direction
    pub async fn get_move(
        &self,
        _game: &Game,
        turn: &i32,
        board: &Board,
        you: &Battlesnake,
    ) -> Value {
        let start_time = Instant::now();

        info!("Turn {}: Computing move", turn);

        let board_clone = board.clone();
        let you_clone = you.clone();
        let config = self.config.clone();

        let outcome = tokio::task::spawn_blocking(move || {
            Bot::compute_move(&board_clone, &you_clone, &config)
        })
        .await;

        let chosen = match outcome {
            Ok(chosen) => chosen,
            Err(e) => {
                error!("Turn {}: move computation failed: {}", turn, e);
                MoveDecision::random(&mut rand::rng())
            }
        };

        info!(
            "Turn {}: Chose {} via {} (time: {}ms)",
            turn,
            chosen.direction.as_str(),
            chosen.decision.kind(),
            start_time.elapsed().as_millis()
        );

        self.debug_logger
            .log_move(*turn, you.id.clone(), board.clone(), chosen);

        json!({ "move": chosen.direction.as_str() })
    }

    /// Runs the engine for one turn with a fresh thread-local random source
    pub fn compute_move(board: &Board, you: &Battlesnake, config: &Config) -> MoveDecision {
        let mut rng = rand::rng();
        policy::choose_move(board, you, config, &mut rng)
    }
}
