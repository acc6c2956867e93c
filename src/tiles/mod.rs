//! Console tile layout: fixed-size boxes flowing left to right into rows.
//!
//! Independent of the prompt engine; the grid shares only the [`Console`]
//! trait and the text utilities. Useful for dashboards printed above a
//! live prompt.

mod grid;

pub use grid::TileGrid;

use crate::console::Console;
use std::io;

/// Height and width defaults match a small status card.
const DEFAULT_TILE_WIDTH: u16 = 40;
const DEFAULT_TILE_HEIGHT: u16 = 5;

/// Callback drawing a tile directly, given the console and the tile's left
/// column.
pub type DrawFn = Box<dyn FnOnce(&mut dyn Console, u16) -> io::Result<()> + Send>;

/// One tile's content.
pub enum Tile {
    /// Plain text, word-wrapped into the tile box.
    Text(String),
    /// Preformatted text: lines are written as-is, truncated to the box.
    Styled(String),
    /// A callback that draws directly, given the console and the tile's
    /// left column.
    Draw(DrawFn),
}

impl Tile {
    /// A word-wrapped text tile.
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text(content.into())
    }

    /// A preformatted tile.
    pub fn styled(content: impl Into<String>) -> Self {
        Self::Styled(content.into())
    }

    /// A tile drawn by a callback.
    pub fn draw(draw: impl FnOnce(&mut dyn Console, u16) -> io::Result<()> + Send + 'static) -> Self {
        Self::Draw(Box::new(draw))
    }
}

/// Fluent configuration for a [`TileGrid`].
#[derive(Debug, Clone, Copy)]
pub struct TileGridConfig {
    pub(crate) tile_width: u16,
    pub(crate) tile_height: u16,
    pub(crate) columns: u16,
    pub(crate) max_height: u16,
    pub(crate) max_width: u16,
}

impl Default for TileGridConfig {
    fn default() -> Self {
        Self::fixed()
    }
}

impl TileGridConfig {
    /// A fixed-size configuration independent of the real terminal. Two
    /// columns in an 80x120 window.
    pub const fn fixed() -> Self {
        Self {
            tile_width: DEFAULT_TILE_WIDTH,
            tile_height: DEFAULT_TILE_HEIGHT,
            columns: 2,
            max_height: 120,
            max_width: 80,
        }
    }

    /// Size the grid from the current terminal, falling back to
    /// [`fixed`](Self::fixed) when the size cannot be read.
    pub fn detect() -> Self {
        crossterm::terminal::size().map_or_else(
            |_| Self::fixed(),
            |(width, height)| Self {
                tile_width: DEFAULT_TILE_WIDTH,
                tile_height: DEFAULT_TILE_HEIGHT,
                columns: (width / DEFAULT_TILE_WIDTH).max(1),
                max_height: height,
                max_width: width,
            },
        )
    }

    /// Set the tile box width in columns.
    #[must_use]
    pub const fn tile_width(mut self, width: u16) -> Self {
        self.tile_width = width;
        self
    }

    /// Set the tile box height in rows.
    #[must_use]
    pub const fn tile_height(mut self, height: u16) -> Self {
        self.tile_height = height;
        self
    }

    /// Set how many tiles flow into a row.
    #[must_use]
    pub const fn columns(mut self, columns: u16) -> Self {
        self.columns = columns;
        self
    }

    /// Set the window height budget used by
    /// [`TileGrid::visible_rows`].
    #[must_use]
    pub const fn max_height(mut self, height: u16) -> Self {
        self.max_height = height;
        self
    }

    /// Set the window width budget.
    #[must_use]
    pub const fn max_width(mut self, width: u16) -> Self {
        self.max_width = width;
        self
    }

    /// Build a grid drawing on `console`.
    pub fn build(self, console: impl Console + 'static) -> TileGrid {
        TileGrid::new(self, Box::new(console))
    }

    /// Build a grid drawing on standard output.
    pub fn build_stdout(self) -> TileGrid {
        TileGrid::new(self, Box::new(crate::console::StdoutConsole::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_config_defaults() {
        let config = TileGridConfig::fixed();
        assert_eq!(config.tile_width, 40);
        assert_eq!(config.tile_height, 5);
        assert_eq!(config.columns, 2);
    }

    #[test]
    fn test_config_chaining() {
        let config = TileGridConfig::fixed()
            .tile_width(10)
            .tile_height(2)
            .columns(3)
            .max_height(20)
            .max_width(30);
        assert_eq!(config.tile_width, 10);
        assert_eq!(config.tile_height, 2);
        assert_eq!(config.columns, 3);
        assert_eq!(config.max_height, 20);
        assert_eq!(config.max_width, 30);
    }
}
