// Library exports for the viper Battlesnake
// The server binary and the replay tool both drive the engine through these modules

pub mod bot;
pub mod builder;
pub mod config;
pub mod debug_logger;
pub mod explorer;
pub mod grid;
pub mod pathfinding;
pub mod policy;
pub mod replay;
pub mod types;
