// Per-turn decision journal
//
// Every answered move is appended to a JSON Lines file as one record. Writes
// happen on a spawned task so the /move response never waits on disk; the
// replay tool reads the same records back.

use log::{error, info};
use serde::Serialize;
use std::sync::Arc;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::policy::{Decision, MoveDecision};
use crate::types::Board;

/// One line of the journal, field-compatible with `replay::LogEntry`
#[derive(Debug, Serialize)]
struct TurnRecord {
    turn: i32,
    you_id: String,
    chosen_move: String,
    decision: Decision,
    board: Board,
    timestamp: String,
}

impl TurnRecord {
    fn new(turn: i32, you_id: String, board: Board, chosen: MoveDecision) -> Self {
        TurnRecord {
            turn,
            you_id,
            chosen_move: chosen.direction.as_str().to_string(),
            decision: chosen.decision,
            board,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    fn to_line(&self) -> Result<String, String> {
        serde_json::to_string(self)
            .map(|json| json + "\n")
            .map_err(|e| format!("Failed to serialize turn {}: {}", self.turn, e))
    }
}

/// Handle to the journal file, cheap to clone into request handlers
///
/// A logger without a sink ignores every record.
#[derive(Clone)]
pub struct DebugLogger {
    sink: Option<Arc<Mutex<File>>>,
}

impl DebugLogger {
    /// Opens the journal at `log_file_path` when `enabled`
    ///
    /// An unopenable path is reported and yields a disabled logger, so a bad
    /// debug setting never stops the server from starting.
    pub async fn new(enabled: bool, log_file_path: &str) -> Self {
        if !enabled {
            return Self::disabled();
        }

        match Self::open(log_file_path).await {
            Ok(logger) => {
                info!("Debug logging enabled: {}", log_file_path);
                logger
            }
            Err(e) => {
                error!("{}", e);
                Self::disabled()
            }
        }
    }

    /// Truncates or creates the journal file
    pub async fn open(log_file_path: &str) -> Result<Self, String> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(log_file_path)
            .await
            .map_err(|e| format!("Failed to create debug log file '{}': {}", log_file_path, e))?;

        Ok(DebugLogger {
            sink: Some(Arc::new(Mutex::new(file))),
        })
    }

    pub fn disabled() -> Self {
        DebugLogger { sink: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.sink.is_some()
    }

    /// Queues the turn's decision for writing and returns immediately
    pub fn log_move(&self, turn: i32, you_id: String, board: Board, chosen: MoveDecision) {
        let Some(sink) = self.sink.clone() else {
            return;
        };

        let record = TurnRecord::new(turn, you_id, board, chosen);
        tokio::spawn(async move {
            if let Err(e) = Self::append(&sink, &record).await {
                error!("{}", e);
            }
        });
    }

    // Whole lines only: the record is serialized before the lock is taken
    // and flushed before it is released.
    async fn append(sink: &Mutex<File>, record: &TurnRecord) -> Result<(), String> {
        let line = record.to_line()?;
        let mut file = sink.lock().await;
        file.write_all(line.as_bytes())
            .await
            .map_err(|e| format!("Failed to write turn {}: {}", record.turn, e))?;
        file.flush()
            .await
            .map_err(|e| format!("Failed to flush debug log: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Coord, Direction};

    fn empty_board() -> Board {
        Board {
            height: 3,
            width: 3,
            food: vec![],
            snakes: vec![],
            hazards: vec![],
        }
    }

    #[tokio::test]
    async fn test_disabled_setting_opens_nothing() {
        let logger = DebugLogger::new(false, "/nonexistent/dir/viper.jsonl").await;
        assert!(!logger.is_enabled());
    }

    #[tokio::test]
    async fn test_unopenable_path_falls_back_to_disabled() {
        let logger = DebugLogger::new(true, "/nonexistent/dir/viper.jsonl").await;
        assert!(!logger.is_enabled());
        assert!(DebugLogger::open("/nonexistent/dir/viper.jsonl").await.is_err());
    }

    #[test]
    fn test_record_is_a_single_json_line() {
        let chosen = MoveDecision {
            direction: Direction::Left,
            decision: Decision::Food(Coord::new(0, 1)),
        };
        let line = TurnRecord::new(4, "me".to_string(), empty_board(), chosen)
            .to_line()
            .unwrap();

        assert!(line.ends_with('\n'));
        assert_eq!(line.matches('\n').count(), 1);
        let value: serde_json::Value = serde_json::from_str(line.trim_end()).unwrap();
        assert_eq!(value["turn"], 4);
        assert_eq!(value["you_id"], "me");
        assert_eq!(value["chosen_move"], "left");
        assert_eq!(value["decision"]["kind"], "food");
    }
}
