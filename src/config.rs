// Configuration module for reading Snake.toml
// Every tunable constant of the pathfinding engine lives here

use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Main configuration structure containing all tunable parameters
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    pub costs: CostsConfig,
    pub tunnels: TunnelConfig,
    pub sentinels: SentinelConfig,
    pub policy: PolicyConfig,
    pub appearance: AppearanceConfig,
    pub debug: DebugConfig,
}

/// Traversal cost charged when entering a cell
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CostsConfig {
    pub default: u32,
    pub hazard: u32,
    pub tunnel: u32,
    /// Cells a larger-or-equal opponent's head can reach next turn
    pub head_threat: u32,
    pub target: u32,
}

/// Tunnel detection constants
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct TunnelConfig {
    /// Non-food cells with fewer present neighbours than this are tunnels
    pub min_open_neighbors: usize,
}

/// Price sentinels used by the search
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SentinelConfig {
    pub unreached_price: u32,
    pub target_price: u32,
    /// Cells priced below this count as reachable for the fallback explorer
    pub reachable_threshold: u32,
}

/// Decision policy constants
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct PolicyConfig {
    /// Targets are hunted only when health is strictly above this
    pub aggression_health_threshold: i32,
}

/// Registration metadata returned by GET /
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppearanceConfig {
    pub apiversion: String,
    pub author: String,
    pub color: String,
    pub head: String,
    pub tail: String,
    pub version: String,
}

/// Debug configuration
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct DebugConfig {
    pub enabled: bool,
    pub log_file_path: String,
}

impl Config {
    /// Loads configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the Snake.toml configuration file
    ///
    /// # Returns
    /// * `Result<Config, String>` - Parsed configuration or error message
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let contents = fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        Self::from_toml_str(&contents)
    }

    /// Parses configuration from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self, String> {
        toml::from_str(contents).map_err(|e| format!("Failed to parse config file: {}", e))
    }

    /// Loads default configuration from Snake.toml in the project root
    pub fn load_default() -> Result<Self, String> {
        Self::from_file("Snake.toml")
    }

    /// Creates a configuration with hardcoded default values as fallback
    /// This should match the constants defined in Snake.toml
    pub fn default_hardcoded() -> Self {
        Config {
            costs: CostsConfig {
                default: 1,
                hazard: 15,
                tunnel: 40,
                head_threat: 99_999,
                target: 1,
            },
            tunnels: TunnelConfig {
                min_open_neighbors: 3,
            },
            sentinels: SentinelConfig {
                unreached_price: 99_999_999,
                target_price: 99_999,
                reachable_threshold: 10_000,
            },
            policy: PolicyConfig {
                aggression_health_threshold: 50,
            },
            appearance: AppearanceConfig {
                apiversion: "1".to_string(),
                author: "SociableSteve".to_string(),
                color: "#00711c".to_string(),
                head: "viper".to_string(),
                tail: "rattle".to_string(),
                version: "0.0.1-beta".to_string(),
            },
            debug: DebugConfig {
                enabled: false,
                log_file_path: "viper_debug.jsonl".to_string(),
            },
        }
    }

    /// Attempts to load from file, falls back to hardcoded defaults on error
    pub fn load_or_default() -> Self {
        Self::load_default().unwrap_or_else(|e| {
            log::warn!(
                "Could not load Snake.toml ({}), using hardcoded defaults",
                e
            );
            Self::default_hardcoded()
        })
    }
}
