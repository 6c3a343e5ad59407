//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The [`StateEngine`] is owned by whichever actor drives ticks; input and render
//! actors talk to it through an [`EngineHandle`], submitting direction intents and
//! reading immutable [`GameSnapshot`]s.

pub mod action;
pub mod config;
pub mod engine;
pub mod error;
pub mod intent;
pub mod snapshot;
pub mod state;

// Re-export commonly used types
pub use action::Direction;
pub use config::{GameConfig, TimingConfig};
pub use engine::{EngineHandle, Layout, StateEngine, TickOutcome};
pub use error::SetupError;
pub use intent::DirectionIntent;
pub use snapshot::{GameSnapshot, SnapshotPublisher};
pub use state::{Board, Cell, CollisionKind, EngineStatus, GameOverReason, Position, Snake};
