//! Fixed-cadence tick driver
//!
//! The driver task is the only owner of the [`StateEngine`]. Everyone else
//! holds an [`EngineHandle`]: input submits direction intents through it and the
//! renderer reads snapshots from it, so neither ever waits on a tick.

use anyhow::{Context, Result};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::debug;

use crate::game::{EngineHandle, GameConfig, StateEngine};

/// Control messages for the driver task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverCommand {
    /// Begin (or resume) ticking
    Start,
    /// Start a fresh game from the driver's configuration, paused
    Restart,
}

pub struct TickDriver {
    handle: EngineHandle,
    commands: mpsc::UnboundedSender<DriverCommand>,
    task: JoinHandle<Result<()>>,
}

impl TickDriver {
    /// Move `engine` onto its own task, ticking every `tick_interval` once started
    pub fn spawn(engine: StateEngine, config: GameConfig, tick_interval: Duration) -> Self {
        let handle = engine.handle();
        let (commands, receiver) = mpsc::unbounded_channel();
        let task = tokio::spawn(drive(engine, config, tick_interval, receiver));

        Self {
            handle,
            commands,
            task,
        }
    }

    pub fn handle(&self) -> &EngineHandle {
        &self.handle
    }

    pub fn send(&self, command: DriverCommand) -> Result<()> {
        self.commands
            .send(command)
            .context("Tick driver has stopped")
    }

    /// Stop the driver and wait for its task to finish
    pub async fn shutdown(self) -> Result<()> {
        drop(self.commands);
        self.task.await.context("Tick driver panicked")?
    }
}

async fn drive(
    mut engine: StateEngine,
    config: GameConfig,
    tick_interval: Duration,
    mut commands: mpsc::UnboundedReceiver<DriverCommand>,
) -> Result<()> {
    let mut ticker = interval(tick_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut running = false;

    loop {
        tokio::select! {
            command = commands.recv() => {
                let Some(command) = command else {
                    break;
                };
                debug!(?command, "tick driver command");
                match command {
                    DriverCommand::Start => {
                        running = true;
                        // First tick lands one full interval after starting
                        ticker.reset();
                    }
                    DriverCommand::Restart => {
                        engine
                            .initialize(&config)
                            .context("Failed to start a new game")?;
                        running = false;
                    }
                }
            }

            _ = ticker.tick(), if running => {
                let outcome = engine.step();
                if !outcome.is_running() {
                    debug!(?outcome, "game stopped ticking");
                    running = false;
                }
            }
        }
    }

    Ok(())
}
