//! Error types for board composition and simulation

use alloy_primitives::U256;
use shardmine_codec::{CodecError, Tile};
use thiserror::Error;

/// Reasons a simulation run fails.
///
/// Each run fails with exactly one tagged reason; the boolean verification
/// surface collapses them all to `false`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    #[error("cannot move up from ({x}, {y}): not on a ladder")]
    CannotMoveUp { x: u8, y: u8 },

    #[error("no picks left to mine toward ({x}, {y})")]
    NoPicks { x: u8, y: u8 },

    #[error("nothing to mine at ({x}, {y})")]
    NothingToMine { x: u8, y: u8 },

    #[error("no {tile:?} in inventory to place at ({x}, {y})")]
    NoTileToPlace { tile: Tile, x: u8, y: u8 },

    #[error("cannot place {tile:?} at ({x}, {y}): cell is not empty")]
    CannotPlace { tile: Tile, x: u8, y: u8 },

    #[error("moved into a solid tile at ({x}, {y})")]
    MovedIntoSolid { x: u8, y: u8 },

    #[error("stepped off the board to ({x}, {y})")]
    MovedOutOfBounds { x: u8, y: u8 },

    #[error("finished at ({x}, {y}), not at the exit")]
    NotAtExit { x: u8, y: u8 },

    #[error("collected {have} crystals, {need} required")]
    NotEnoughCrystals { have: u8, need: u8 },
}

/// Errors from the full evaluation pipeline.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("puzzle {0} is not minted")]
    PuzzleNotFound(U256),

    #[error("payload decode failed: {0}")]
    Codec(#[from] CodecError),

    #[error("simulation failed: {0}")]
    Sim(#[from] SimError),
}
