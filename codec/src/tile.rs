//! Tile vocabulary for puzzle grids

use serde::{Deserialize, Serialize};

/// One cell of a puzzle grid.
///
/// Values 0–5 are storable as descriptor digits. [`Tile::Crystal`] is an
/// overlay written after decoding and never appears among the grid digits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Tile {
    /// Empty cell
    #[default]
    None = 0,
    /// Minable block; supports the player
    SoftBlock = 1,
    /// Indestructible block; blocks entry but does not support the player
    HardBlock = 2,
    /// Climbable ladder; suspends the player and halts falls
    SoftLadder = 3,
    /// Inert ladder; neither climbable nor standable
    HardLadder = 4,
    /// Pickaxe pickup
    Pick = 5,
    /// Crystal pickup (overlay value)
    Crystal = 10,
}

impl Tile {
    /// Parse a descriptor digit. Unassigned digits decode as empty cells so
    /// the descriptor decoder stays total on arbitrary input.
    pub fn from_digit(digit: u8) -> Self {
        match digit {
            1 => Tile::SoftBlock,
            2 => Tile::HardBlock,
            3 => Tile::SoftLadder,
            4 => Tile::HardLadder,
            5 => Tile::Pick,
            _ => Tile::None,
        }
    }

    /// Wire digit for the tile grid.
    ///
    /// Crystals are carried as a separate object, never as a grid digit.
    pub fn digit(self) -> u8 {
        debug_assert!(
            self != Tile::Crystal,
            "crystals are overlays, not grid digits"
        );
        self as u8
    }

    /// Blocks horizontal and diagonal entry by the player.
    pub fn is_solid(self) -> bool {
        matches!(self, Tile::SoftBlock | Tile::HardBlock)
    }

    /// Halts a falling player when directly below them.
    pub fn is_standable(self) -> bool {
        matches!(self, Tile::SoftBlock | Tile::SoftLadder)
    }

    /// Picked up (and cleared) when the player enters or falls through.
    pub fn is_collectible(self) -> bool {
        matches!(self, Tile::Pick | Tile::Crystal)
    }
}
