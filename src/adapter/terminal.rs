//! Adapter that renders each generation to a text stream

use super::DisplayAdapter;
use crate::config::DisplayFormat;
use crate::game_of_life::{CellAddress, Grid};
use crate::utils::GridFormatter;
use serde::Serialize;
use std::io::Write;
use tokio::sync::watch;
use tracing::warn;

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// JSON form of one committed generation
#[derive(Debug, Clone, Serialize)]
pub struct GridSnapshot {
    pub generation: u64,
    pub width: usize,
    pub height: usize,
    pub living: Vec<CellAddress>,
}

impl GridSnapshot {
    pub fn new(generation: u64, grid: &Grid) -> Self {
        Self {
            generation,
            width: grid.width(),
            height: grid.height(),
            living: grid.living_cells(),
        }
    }
}

/// Writes every generation to `writer` and publishes the latest generation
/// number on a watch channel so a driver can wait for progress.
pub struct TerminalAdapter<W> {
    writer: W,
    format: DisplayFormat,
    clear_screen: bool,
    progress: watch::Sender<u64>,
}

impl<W: Write> TerminalAdapter<W> {
    pub fn new(
        writer: W,
        format: DisplayFormat,
        clear_screen: bool,
    ) -> (Self, watch::Receiver<u64>) {
        let (progress, receiver) = watch::channel(0);
        let adapter = Self {
            writer,
            format,
            clear_screen,
            progress,
        };
        (adapter, receiver)
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn render(&self, generation: u64, grid: &Grid) -> String {
        match self.format {
            DisplayFormat::Compact => format!(
                "Generation {} (living: {})\n{}",
                generation,
                grid.living_count(),
                GridFormatter::format_grid_compact(grid)
            ),
            DisplayFormat::Coords => format!(
                "Generation {} (living: {})\n{}",
                generation,
                grid.living_count(),
                GridFormatter::format_grid_with_coords(grid)
            ),
            DisplayFormat::Json => {
                let snapshot = GridSnapshot::new(generation, grid);
                match serde_json::to_string(&snapshot) {
                    Ok(line) => line + "\n",
                    Err(e) => {
                        warn!(generation, error = %e, "Failed to serialize snapshot");
                        String::new()
                    }
                }
            }
        }
    }

    fn emit(&mut self, text: &str) {
        let prefix = if self.clear_screen && self.format != DisplayFormat::Json {
            CLEAR_SCREEN
        } else {
            ""
        };
        let result = write!(self.writer, "{}{}", prefix, text).and_then(|_| self.writer.flush());
        if let Err(e) = result {
            warn!(error = %e, "Failed to write to terminal");
        }
    }
}

impl<W: Write> DisplayAdapter for TerminalAdapter<W> {
    fn on_generation(&mut self, generation: u64, grid: &Grid) {
        let text = self.render(generation, grid);
        self.emit(&text);
        self.progress.send_replace(generation);
    }

    fn on_reset(&mut self, width: usize, height: usize) {
        self.emit(&format!("Board reset to {}x{}\n", width, height));
        self.progress.send_replace(0);
    }
}
