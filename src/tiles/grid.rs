//! The tile grid itself.

use super::{Tile, TileGridConfig};
use crate::console::Console;
use crate::error::PromptError;
use crate::text::{pad_to_width, truncate_to_width, wrap_to_width};
use std::fmt::Write as _;
use std::sync::{Mutex, PoisonError};

struct GridState {
    console: Box<dyn Console>,
    /// Column index for the next tile within the current row.
    next_column: u16,
    /// Heights of all rows, newest last.
    row_heights: Vec<u16>,
}

/// Places tiles left to right into rows on a console.
///
/// Every tile occupies a `tile_width` x `tile_height` box. The cursor rests
/// just below the current row between calls, so tiles can interleave with
/// other output. The grid serializes its own writers; shareable behind an
/// `Arc`.
pub struct TileGrid {
    config: TileGridConfig,
    state: Mutex<GridState>,
}

impl TileGrid {
    pub(super) fn new(config: TileGridConfig, console: Box<dyn Console>) -> Self {
        Self {
            config,
            state: Mutex::new(GridState {
                console,
                next_column: 0,
                row_heights: Vec::new(),
            }),
        }
    }

    /// The grid's configuration.
    pub const fn config(&self) -> &TileGridConfig {
        &self.config
    }

    /// Draw `tile` at the next position, flowing into a new row after the
    /// configured number of columns.
    pub fn add(&self, tile: Tile) -> Result<(), PromptError> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let column = state.next_column;
        let left = column * self.config.tile_width;
        let height = self.config.tile_height;

        if column == 0 {
            state.row_heights.push(height);
        } else {
            // Back up to the top of the row started by column zero.
            state.console.write(&format!("\u{1b}[{height}A"))?;
        }

        match tile {
            Tile::Text(content) => {
                let lines = wrap_to_width(
                    &content,
                    self.config.tile_width as usize,
                    height as usize,
                );
                self.draw_lines(&mut state, left, &lines, true)?;
            }
            Tile::Styled(content) => {
                let lines: Vec<String> = content
                    .lines()
                    .take(height as usize)
                    .map(String::from)
                    .collect();
                self.draw_lines(&mut state, left, &lines, false)?;
            }
            Tile::Draw(draw) => {
                draw(state.console.as_mut(), left)?;
            }
        }

        state.next_column = (column + 1) % self.config.columns.max(1);
        Ok(())
    }

    /// Write `lines` into the tile box at `left`, padding the box out to
    /// the full tile height so columns stay aligned. The cursor ends just
    /// below the row.
    fn draw_lines(
        &self,
        state: &mut GridState,
        left: u16,
        lines: &[String],
        pad: bool,
    ) -> Result<(), PromptError> {
        let width = self.config.tile_width as usize;
        let mut frame = String::new();
        for row in 0..self.config.tile_height {
            let _ = write!(frame, "\u{1b}[{}G", u32::from(left) + 1);
            match lines.get(row as usize) {
                Some(line) => {
                    let clipped = truncate_to_width(line, width);
                    if pad {
                        frame.push_str(&pad_to_width(clipped, width));
                    } else {
                        frame.push_str(clipped);
                    }
                }
                None if pad => frame.push_str(&" ".repeat(width)),
                None => {}
            }
            frame.push_str("\r\n");
        }
        state.console.write(&frame)?;
        Ok(())
    }

    /// How many of the newest rows fit the configured window height.
    pub fn visible_rows(&self) -> usize {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let mut used = 0u16;
        let mut rows = 0;
        for height in state.row_heights.iter().rev() {
            if used + height > self.config.max_height {
                break;
            }
            used += height;
            rows += 1;
        }
        rows
    }

    /// Total rows laid out so far.
    pub fn rows(&self) -> usize {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .row_heights
            .len()
    }
}
