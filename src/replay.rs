// Replay module for re-running the engine on logged turns
//
// This module provides functionality to:
// 1. Parse JSONL debug logs
// 2. Replay the engine on historical states
// 3. Compare logged vs replayed moves
// 4. Generate a summary report
//
// Turns that were decided at random cannot be reproduced and are reported
// separately instead of as mismatches.

use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;

use crate::config::Config;
use crate::policy::{self, Decision, MoveDecision};
use crate::types::{Board, Direction};

/// Represents a single log entry from the debug JSONL file
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LogEntry {
    pub turn: i32,
    pub you_id: String,
    pub chosen_move: String,
    pub decision: Decision,
    pub board: Board,
    pub timestamp: String,
}

/// Result of replaying a single turn
#[derive(Debug, Clone)]
pub struct ReplayResult {
    pub turn: i32,
    pub original_move: Direction,
    pub original_decision: Decision,
    pub replayed: MoveDecision,
    /// False when the logged move came from the random fallback
    pub deterministic: bool,
    pub matches: bool,
    pub computation_time_us: u128,
}

/// Statistics for a complete replay session
#[derive(Debug, Default, PartialEq)]
pub struct ReplayStats {
    pub total_turns: usize,
    pub random_turns: usize,
    pub matches: usize,
    pub mismatches: usize,
    pub match_rate: f64,
}

/// Replay engine for analyzing debug logs
pub struct ReplayEngine {
    config: Config,
    verbose: bool,
}

impl ReplayEngine {
    /// Creates a new replay engine with the given configuration
    pub fn new(config: Config, verbose: bool) -> Self {
        ReplayEngine { config, verbose }
    }

    /// Loads all log entries from a JSONL file
    pub fn load_log_file<P: AsRef<Path>>(&self, log_path: P) -> Result<Vec<LogEntry>, String> {
        let file =
            File::open(log_path.as_ref()).map_err(|e| format!("Failed to open log file: {}", e))?;

        let reader = BufReader::new(file);
        let mut entries = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| format!("Failed to read line {}: {}", line_num + 1, e))?;

            if line.trim().is_empty() {
                continue;
            }

            let entry: LogEntry = serde_json::from_str(&line)
                .map_err(|e| format!("Failed to parse JSON on line {}: {}", line_num + 1, e))?;

            entries.push(entry);
        }

        info!("Loaded {} log entries", entries.len());
        Ok(entries)
    }

    /// Replays the engine on a single board state
    ///
    /// The random source is seeded from the turn number so repeated replays agree.
    pub fn replay_turn(
        &self,
        board: &Board,
        turn: i32,
        our_snake_id: &str,
    ) -> Result<(MoveDecision, u128), String> {
        let our_snake = board
            .snakes
            .iter()
            .find(|s| s.id == our_snake_id)
            .ok_or_else(|| format!("Snake with id '{}' not found in board state", our_snake_id))?;

        let start_time = Instant::now();
        let mut rng = StdRng::seed_from_u64(turn as u64);
        let chosen = policy::choose_move(board, our_snake, &self.config, &mut rng);

        Ok((chosen, start_time.elapsed().as_micros()))
    }

    /// Replays a single log entry and compares the result
    pub fn replay_entry(&self, entry: &LogEntry) -> Result<ReplayResult, String> {
        let original_move = Direction::parse(&entry.chosen_move)?;
        let (replayed, computation_time_us) =
            self.replay_turn(&entry.board, entry.turn, &entry.you_id)?;

        let deterministic = entry.decision != Decision::Random;
        let matches = deterministic
            && original_move == replayed.direction
            && entry.decision == replayed.decision;

        if self.verbose {
            if !deterministic {
                info!(
                    "Turn {}: ~ RANDOM - Original: {}, Replayed: {} via {}",
                    entry.turn,
                    original_move.as_str(),
                    replayed.direction.as_str(),
                    replayed.decision.kind()
                );
            } else if matches {
                info!(
                    "Turn {}: ✓ MATCH - {} via {} ({}us)",
                    entry.turn,
                    replayed.direction.as_str(),
                    replayed.decision.kind(),
                    computation_time_us
                );
            } else {
                warn!(
                    "Turn {}: ✗ MISMATCH - Original: {} via {}, Replayed: {} via {}",
                    entry.turn,
                    original_move.as_str(),
                    entry.decision.kind(),
                    replayed.direction.as_str(),
                    replayed.decision.kind()
                );
            }
        }

        Ok(ReplayResult {
            turn: entry.turn,
            original_move,
            original_decision: entry.decision,
            replayed,
            deterministic,
            matches,
            computation_time_us,
        })
    }

    /// Replays all entries in a log file
    pub fn replay_all(&self, entries: &[LogEntry]) -> Vec<ReplayResult> {
        let mut results = Vec::new();

        for entry in entries {
            match self.replay_entry(entry) {
                Ok(result) => results.push(result),
                Err(e) => {
                    warn!("Failed to replay turn {}: {}", entry.turn, e);
                }
            }
        }

        results
    }

    /// Replays specific turns from a log file
    pub fn replay_turns(
        &self,
        entries: &[LogEntry],
        turn_numbers: &[i32],
    ) -> Result<Vec<ReplayResult>, String> {
        let mut results = Vec::new();

        for turn_num in turn_numbers {
            let entry = entries
                .iter()
                .find(|e| e.turn == *turn_num)
                .ok_or_else(|| format!("Turn {} not found in log file", turn_num))?;

            results.push(self.replay_entry(entry)?);
        }

        Ok(results)
    }

    /// Generates statistics from replay results
    pub fn generate_stats(&self, results: &[ReplayResult]) -> ReplayStats {
        let total_turns = results.len();
        let random_turns = results.iter().filter(|r| !r.deterministic).count();
        let matches = results.iter().filter(|r| r.matches).count();
        let mismatches = total_turns - random_turns - matches;
        let compared = total_turns - random_turns;
        let match_rate = if compared > 0 {
            (matches as f64 / compared as f64) * 100.0
        } else {
            0.0
        };

        ReplayStats {
            total_turns,
            random_turns,
            matches,
            mismatches,
            match_rate,
        }
    }

    /// Prints a detailed report of replay results
    pub fn print_report(&self, results: &[ReplayResult]) {
        let stats = self.generate_stats(results);

        println!("\n═══════════════════════════════════════════════════════════");
        println!("                    REPLAY REPORT");
        println!("═══════════════════════════════════════════════════════════");
        println!("Total Turns:    {}", stats.total_turns);
        println!("Random Turns:   {}", stats.random_turns);
        println!("Matches:        {} ({:.1}%)", stats.matches, stats.match_rate);
        println!("Mismatches:     {}", stats.mismatches);
        println!("═══════════════════════════════════════════════════════════\n");

        if !results.is_empty() {
            let avg_time: f64 = results
                .iter()
                .map(|r| r.computation_time_us as f64)
                .sum::<f64>()
                / results.len() as f64;

            println!("Average Computation Time:   {:.1}us\n", avg_time);
        }

        let mismatches: Vec<_> = results
            .iter()
            .filter(|r| r.deterministic && !r.matches)
            .collect();
        if !mismatches.is_empty() {
            println!("═══════════════════════════════════════════════════════════");
            println!("                  DETAILED MISMATCHES");
            println!("═══════════════════════════════════════════════════════════");

            for result in mismatches {
                println!(
                    "Turn {}: {} via {} → {} via {}",
                    result.turn,
                    result.original_move.as_str(),
                    result.original_decision.kind(),
                    result.replayed.direction.as_str(),
                    result.replayed.decision.kind()
                );
            }
            println!();
        }
    }

    /// Validates that specific expected moves were made
    pub fn validate_expected_moves(
        &self,
        entries: &[LogEntry],
        expected_moves: &[(i32, Vec<Direction>)], // (turn, acceptable_moves)
    ) -> Result<(), String> {
        for (turn, acceptable) in expected_moves {
            let entry = entries
                .iter()
                .find(|e| e.turn == *turn)
                .ok_or_else(|| format!("Turn {} not found in log", turn))?;

            let actual_move = Direction::parse(&entry.chosen_move)?;

            if !acceptable.contains(&actual_move) {
                return Err(format!(
                    "Turn {}: Expected one of {:?}, but got {}",
                    turn,
                    acceptable.iter().map(|d| d.as_str()).collect::<Vec<_>>(),
                    actual_move.as_str()
                ));
            }
        }

        Ok(())
    }
}
