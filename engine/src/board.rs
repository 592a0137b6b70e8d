//! Composite board state

use serde::{Deserialize, Serialize};
use shardmine_codec::Tile;

/// Width of the assembled 2×2 board.
pub const BOARD_WIDTH: usize = 40;
/// Height of the assembled 2×2 board.
pub const BOARD_HEIGHT: usize = 28;

/// A tile grid with the player and exit cells.
///
/// Boards are created per evaluation and never shared; the simulator owns
/// and mutates its board for the duration of one run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    width: u8,
    height: u8,
    tiles: Vec<Tile>,
    pub player: (u8, u8),
    pub exit: (u8, u8),
}

impl Board {
    /// Board with every cell set to `fill`, player and exit at (0, 0).
    pub fn filled(width: u8, height: u8, fill: Tile) -> Self {
        Self {
            width,
            height,
            tiles: vec![fill; width as usize * height as usize],
            player: (0, 0),
            exit: (0, 0),
        }
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Tile at (x, y), or `None` when the coordinates fall off the board.
    pub fn tile(&self, x: u8, y: u8) -> Option<Tile> {
        if x < self.width && y < self.height {
            Some(self.tiles[y as usize * self.width as usize + x as usize])
        } else {
            None
        }
    }

    /// Overwrite the tile at (x, y). Callers check bounds first.
    pub fn set_tile(&mut self, x: u8, y: u8, tile: Tile) {
        debug_assert!(x < self.width && y < self.height);
        self.tiles[y as usize * self.width as usize + x as usize] = tile;
    }
}
