//! Term Snake - a terminal Snake game
//!
//! This library provides:
//! - Core game logic and the lock-free state engine (game module)
//! - Fixed-cadence tick driver and the interactive mode (modes module)
//! - TUI rendering (render module) and keyboard mapping (input module)
//! - Session metrics (metrics module) and high score persistence (storage module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod storage;
