//! Display and output formatting utilities

use crate::game_of_life::Grid;

/// Text renderings of a grid
pub struct GridFormatter;

impl GridFormatter {
    /// Format a grid in compact form
    pub fn format_grid_compact(grid: &Grid) -> String {
        let mut output = String::with_capacity(grid.height() * (grid.width() * 3 + 1));
        for row in grid.rows() {
            for cell in row {
                output.push(if cell.is_alive() { '█' } else { '·' });
            }
            output.push('\n');
        }
        output
    }

    /// Format a grid with coordinates
    pub fn format_grid_with_coords(grid: &Grid) -> String {
        let mut output = String::new();

        // Header with column numbers
        output.push_str("   ");
        for x in 0..grid.width() {
            output.push_str(&format!("{:2}", x % 10));
        }
        output.push('\n');

        // Rows with row numbers
        for (y, row) in grid.rows().enumerate() {
            output.push_str(&format!("{:2} ", y));
            for cell in row {
                output.push_str(if cell.is_alive() { "██" } else { "··" });
            }
            output.push('\n');
        }

        output
    }

    /// One-line summary of a grid's population
    pub fn format_summary(generation: u64, grid: &Grid) -> String {
        let total = grid.width() * grid.height();
        let living = grid.living_count();
        format!(
            "Generation {}: {} living of {} cells ({:.1}%)",
            generation,
            living,
            total,
            living as f64 / total as f64 * 100.0
        )
    }
}

/// How a runner message is highlighted on the terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Completed work and summaries
    Done,
    /// Fallbacks the user should know about
    Notice,
    /// Section headers such as generation labels
    Heading,
}

impl Tone {
    fn ansi_code(self) -> u8 {
        match self {
            Tone::Done => 32,
            Tone::Notice => 33,
            Tone::Heading => 34,
        }
    }

    /// Wrap `text` in this tone's escape codes unless `NO_COLOR` is set or
    /// the terminal is dumb
    pub fn paint(self, text: &str) -> String {
        if color_enabled() {
            format!("\x1b[{}m{}\x1b[0m", self.ansi_code(), text)
        } else {
            text.to_string()
        }
    }
}

fn color_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none()
        && std::env::var("TERM").map_or(true, |term| term != "dumb")
}
