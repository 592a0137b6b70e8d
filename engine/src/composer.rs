//! Board composition from four descriptors
//!
//! A competition board is a 2×2 arrangement of single 20×14 puzzles. The
//! 16-bit setup value picks which quadrant hosts the player start, which
//! hosts the exit, and how many crystals a winning run must collect.

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};
use shardmine_codec::{decode_descriptor, Tile, PUZZLE_HEIGHT, PUZZLE_WIDTH};
use tracing::debug;

use crate::board::{Board, BOARD_HEIGHT, BOARD_WIDTH};
use crate::errors::EngineError;
use crate::store::DescriptorStore;

/// Quadrants composing the 2×2 board.
pub const QUADRANTS: usize = 4;

/// Parsed 16-bit setup data: three decimal digits, least-significant first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetupData {
    pub start_quadrant: u8,
    pub exit_quadrant: u8,
    pub target_crystals: u8,
}

impl SetupData {
    /// Parse the raw wire value. Quadrant digits are taken mod 4.
    pub fn from_raw(raw: u16) -> Self {
        Self {
            start_quadrant: (raw % 10 % 4) as u8,
            exit_quadrant: (raw / 10 % 10 % 4) as u8,
            target_crystals: (raw / 100 % 10) as u8,
        }
    }
}

/// Assemble the composite board for a competition.
///
/// Quadrant `k` maps to the 20×14 subframe at `(k % 2 · 20, k / 2 · 14)`.
/// Every quadrant contributes its crystal; the start and exit quadrants
/// contribute the player and exit cells, offset into the composite frame.
pub fn compose<S: DescriptorStore + ?Sized>(
    store: &S,
    puzzle_ids: &[U256; QUADRANTS],
    setup_data: u16,
) -> Result<(Board, u8), EngineError> {
    let setup = SetupData::from_raw(setup_data);
    let mut board = Board::filled(BOARD_WIDTH as u8, BOARD_HEIGHT as u8, Tile::None);

    for (k, id) in puzzle_ids.iter().enumerate() {
        let words = store.get_puzzle(*id)?;
        let use_start = k as u8 == setup.start_quadrant;
        let use_exit = k as u8 == setup.exit_quadrant;
        let puzzle = decode_descriptor(&words, use_start, use_exit)?;

        let x0 = (k % 2 * PUZZLE_WIDTH) as u8;
        let y0 = (k / 2 * PUZZLE_HEIGHT) as u8;
        for y in 0..PUZZLE_HEIGHT as u8 {
            for x in 0..PUZZLE_WIDTH as u8 {
                board.set_tile(x0 + x, y0 + y, puzzle.tile(x, y));
            }
        }

        let (cx, cy) = puzzle.crystal;
        board.set_tile(x0 + cx, y0 + cy, Tile::Crystal);
        if let Some((sx, sy)) = puzzle.start {
            board.player = (x0 + sx, y0 + sy);
        }
        if let Some((ex, ey)) = puzzle.exit {
            board.exit = (x0 + ex, y0 + ey);
        }
    }

    debug!(
        player = ?board.player,
        exit = ?board.exit,
        target_crystals = setup.target_crystals,
        "composed board"
    );
    Ok((board, setup.target_crystals))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use shardmine_codec::{encode_descriptor, Puzzle};

    fn mint_four(store: &mut MemoryStore) -> [U256; QUADRANTS] {
        let mut ids = [U256::ZERO; QUADRANTS];
        for (k, id) in ids.iter_mut().enumerate() {
            let mut puzzle = Puzzle::filled(Tile::SoftBlock);
            // Mark each quadrant with a distinct tile so blitting is visible.
            puzzle.set_tile(0, 0, Tile::from_digit(1 + k as u8));
            puzzle.crystal = (2 + k as u8, 3);
            puzzle.start = Some((1, 1));
            puzzle.exit = Some((5, 5));
            *id = store.mint(encode_descriptor(&puzzle));
        }
        ids
    }

    #[test]
    fn setup_digits_parse_lsd_first() {
        let setup = SetupData::from_raw(321);
        assert_eq!(setup.start_quadrant, 1);
        assert_eq!(setup.exit_quadrant, 2);
        assert_eq!(setup.target_crystals, 3);
    }

    #[test]
    fn setup_quadrants_wrap_mod_four() {
        let setup = SetupData::from_raw(98);
        assert_eq!(setup.start_quadrant, 0); // 8 mod 4
        assert_eq!(setup.exit_quadrant, 1); // 9 mod 4
        assert_eq!(setup.target_crystals, 0);
    }

    #[test]
    fn quadrants_land_at_their_offsets() {
        let mut store = MemoryStore::new();
        let ids = mint_four(&mut store);
        let (board, _) = compose(&store, &ids, 0).unwrap();

        assert_eq!(board.tile(0, 0), Some(Tile::SoftBlock));
        assert_eq!(board.tile(20, 0), Some(Tile::HardBlock));
        assert_eq!(board.tile(0, 14), Some(Tile::SoftLadder));
        assert_eq!(board.tile(20, 14), Some(Tile::HardLadder));
    }

    #[test]
    fn each_quadrant_contributes_a_crystal() {
        let mut store = MemoryStore::new();
        let ids = mint_four(&mut store);
        let (board, _) = compose(&store, &ids, 0).unwrap();

        assert_eq!(board.tile(2, 3), Some(Tile::Crystal));
        assert_eq!(board.tile(23, 3), Some(Tile::Crystal));
        assert_eq!(board.tile(4, 17), Some(Tile::Crystal));
        assert_eq!(board.tile(25, 17), Some(Tile::Crystal));
    }

    #[test]
    fn start_and_exit_come_from_selected_quadrants() {
        let mut store = MemoryStore::new();
        let ids = mint_four(&mut store);

        // Start in quadrant 3, exit in quadrant 1, two crystals required.
        let (board, target) = compose(&store, &ids, 213).unwrap();
        assert_eq!(board.player, (21, 15));
        assert_eq!(board.exit, (25, 5));
        assert_eq!(target, 2);
    }

    #[test]
    fn start_and_exit_may_share_a_quadrant() {
        let mut store = MemoryStore::new();
        let ids = mint_four(&mut store);

        let (board, _) = compose(&store, &ids, 0).unwrap();
        assert_eq!(board.player, (1, 1));
        assert_eq!(board.exit, (5, 5));
    }

    #[test]
    fn missing_puzzle_fails_composition() {
        let store = MemoryStore::new();
        let ids = [U256::ZERO; QUADRANTS];
        assert!(matches!(
            compose(&store, &ids, 0),
            Err(EngineError::PuzzleNotFound(_))
        ));
    }
}
