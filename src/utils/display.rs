//! Display and output formatting utilities

use crate::config::OutputStyle;
use crate::driver::Speed;
use crate::game_of_life::Grid;
use itertools::Itertools;

/// ANSI sequence that clears the terminal and homes the cursor
pub const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Format boards and status lines for the terminal
pub struct GridFormatter;

impl GridFormatter {
    /// Format a grid in the configured style
    pub fn format_grid(grid: &Grid, style: OutputStyle) -> String {
        match style {
            OutputStyle::Compact => Self::format_grid_compact(grid),
            OutputStyle::Coordinates => Self::format_grid_with_coords(grid),
        }
    }

    /// Format a grid in compact form
    pub fn format_grid_compact(grid: &Grid) -> String {
        grid.iter_rows()
            .map(|row| {
                row.iter()
                    .map(|&cell| if cell { '█' } else { '·' })
                    .collect::<String>()
            })
            .map(|line| line + "\n")
            .collect()
    }

    /// Format a grid with coordinates
    pub fn format_grid_with_coords(grid: &Grid) -> String {
        let mut output = String::new();

        // Header with column numbers
        output.push_str("   ");
        output.push_str(&(0..grid.columns()).map(|x| format!("{:2}", x % 10)).join(""));
        output.push('\n');

        for (y, row) in grid.iter_rows().enumerate() {
            output.push_str(&format!("{:2} ", y % 100));
            for &cell in row {
                output.push_str(if cell { "██" } else { "··" });
            }
            output.push('\n');
        }

        output
    }

    /// One-line summary shown under each frame
    pub fn format_status(generation: u64, grid: &Grid, speed: Option<Speed>) -> String {
        let mut parts = vec![
            format!("Generation: {}", generation),
            format!("Living: {}", grid.living_count()),
            format!("Density: {:.1}%", grid.density() * 100.0),
        ];
        if let Some(speed) = speed {
            parts.push(format!("Speed: {}", speed));
        }
        parts.join(" | ")
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    /// Check if terminal supports color
    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err()
            && (std::env::var("TERM").unwrap_or_default() != "dumb")
    }

    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    pub fn error(text: &str) -> String {
        Self::colored(text, Color::Red)
    }

    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }

    /// Format a status line
    pub fn status(text: &str) -> String {
        Self::colored(text, Color::Cyan)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
    Cyan,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
            Color::Cyan => 36,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker() -> Grid {
        Grid::from_cells(vec![
            vec![true, false, true],
            vec![false, true, false],
            vec![true, false, true],
        ])
        .unwrap()
    }

    #[test]
    fn test_grid_formatting() {
        let grid = checker();

        let compact = GridFormatter::format_grid_compact(&grid);
        assert_eq!(compact, "█·█\n·█·\n█·█\n");

        let with_coords = GridFormatter::format_grid_with_coords(&grid);
        assert!(with_coords.contains(" 0 1 2"));
        assert_eq!(with_coords.lines().count(), 4);

        assert_eq!(GridFormatter::format_grid(&grid, OutputStyle::Compact), compact);
        assert_eq!(GridFormatter::format_grid(&grid, OutputStyle::Coordinates), with_coords);
    }

    #[test]
    fn test_status_line() {
        let grid = checker();
        let status = GridFormatter::format_status(7, &grid, Some(Speed::default()));
        assert_eq!(status, "Generation: 7 | Living: 5 | Density: 55.6% | Speed: 500ms");

        let status = GridFormatter::format_status(0, &grid, None);
        assert!(!status.contains("Speed"));
    }

    #[test]
    fn test_color_output() {
        let colored = ColorOutput::colored("test", Color::Red);
        // Should either be colored or plain text
        assert!(colored.contains("test"));

        let success = ColorOutput::success("OK");
        assert!(success.contains("OK"));
    }
}
