//! Timed stepping loop and the handle adapters use to talk to it
//!
//! The loop is a single task. It suspends only while waiting out a tick
//! interval, and handles requests from [`SimulationHandle`] in between, so
//! edits and ticks never run concurrently.

use super::config::Reconfigure;
use super::state::{RunState, Simulation};
use crate::adapter::DisplayAdapter;
use crate::error::{LifeError, Result};
use crate::game_of_life::CellState;
use std::future::Future;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time;
use tracing::{debug, info};

pub(crate) enum Command {
    Edit {
        row: usize,
        col: usize,
        reply: oneshot::Sender<Result<CellState>>,
    },
    Toggle {
        reply: oneshot::Sender<RunState>,
    },
    Reconfigure {
        request: Reconfigure,
        reply: oneshot::Sender<Result<()>>,
    },
    Shutdown,
}

/// Cloneable sender side of a running simulation loop
#[derive(Debug, Clone)]
pub struct SimulationHandle {
    commands: mpsc::UnboundedSender<Command>,
}

impl SimulationHandle {
    /// Toggle one cell; see [`Simulation::request_edit`]
    pub async fn request_edit(&self, row: usize, col: usize) -> Result<CellState> {
        let (reply, response) = oneshot::channel();
        self.send(Command::Edit { row, col, reply })?;
        response.await.map_err(|_| LifeError::Closed)?
    }

    /// Flip between running and stopped, returning the new state
    pub async fn toggle_run(&self) -> Result<RunState> {
        let (reply, response) = oneshot::channel();
        self.send(Command::Toggle { reply })?;
        response.await.map_err(|_| LifeError::Closed)
    }

    /// Reconfigure the stopped simulation; see [`Simulation::reconfigure`]
    pub async fn reconfigure(&self, request: Reconfigure) -> Result<()> {
        let (reply, response) = oneshot::channel();
        self.send(Command::Reconfigure { request, reply })?;
        response.await.map_err(|_| LifeError::Closed)?
    }

    /// Ask the loop to exit. A tick in flight still commits first.
    pub fn shutdown(&self) -> Result<()> {
        self.send(Command::Shutdown)
    }

    fn send(&self, command: Command) -> Result<()> {
        self.commands.send(command).map_err(|_| LifeError::Closed)
    }
}

impl<A: DisplayAdapter> Simulation<A> {
    /// Turn the simulation into a loop future and the handle that drives it.
    ///
    /// The future resolves to the simulation once the handle asks it to shut
    /// down or every handle is dropped. It has no `Send` requirement, so it
    /// can run on a `LocalSet` with an adapter bound to the current thread.
    pub fn start(self) -> (SimulationHandle, impl Future<Output = Simulation<A>>) {
        let (commands, receiver) = mpsc::unbounded_channel();
        (SimulationHandle { commands }, self.run(receiver))
    }

    async fn run(mut self, mut commands: mpsc::UnboundedReceiver<Command>) -> Self {
        info!(
            width = self.current().width(),
            height = self.current().height(),
            ticks_per_second = self.tick_rate().ticks_per_second(),
            "Simulation loop started"
        );

        loop {
            if self.begin_tick() {
                let wait = time::sleep(self.tick_interval());
                tokio::pin!(wait);
                let mut open = true;

                loop {
                    tokio::select! {
                        biased;
                        command = commands.recv(), if open => {
                            open = command.is_some_and(|command| self.handle(command));
                        }
                        _ = &mut wait => break,
                    }
                }

                self.commit_tick();
                if !open {
                    break;
                }
            } else {
                let Some(command) = commands.recv().await else {
                    break;
                };
                if !self.handle(command) {
                    break;
                }
            }
        }

        info!(generation = self.generation(), "Simulation loop stopped");
        self
    }

    /// Apply one request. Returns `false` once the loop should exit.
    fn handle(&mut self, command: Command) -> bool {
        // A dropped reply receiver only means the caller stopped waiting
        match command {
            Command::Edit { row, col, reply } => {
                let _ = reply.send(self.request_edit(row, col));
            }
            Command::Toggle { reply } => {
                let _ = reply.send(self.toggle());
            }
            Command::Reconfigure { request, reply } => {
                let _ = reply.send(self.reconfigure(request));
            }
            Command::Shutdown => {
                debug!(generation = self.generation(), "Shutdown requested");
                return false;
            }
        }
        true
    }
}

impl<A: DisplayAdapter + Send + 'static> Simulation<A> {
    /// Spawn the loop on the current tokio runtime
    pub fn spawn(self) -> (SimulationHandle, JoinHandle<Simulation<A>>) {
        let (handle, run) = self.start();
        (handle, tokio::spawn(run))
    }
}
