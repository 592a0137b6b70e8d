//! Descriptor wire codec
//!
//! A descriptor is four 256-bit words carrying, least-significant digit
//! first: 280 tile digits (20×14, row-major), then three 3-digit objects
//! (crystal, player start, exit). The start and exit objects are placeholders
//! (three skipped digit positions) in descriptors where the composer does
//! not assign that role, so later digits stay aligned either way.

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

use crate::errors::CodecResult;
use crate::stream::{DigitStream, DigitWriter};
use crate::tile::Tile;

/// Width of a single puzzle grid.
pub const PUZZLE_WIDTH: usize = 20;
/// Height of a single puzzle grid.
pub const PUZZLE_HEIGHT: usize = 14;
/// Words in an encoded descriptor.
pub const DESCRIPTOR_WORDS: usize = 4;

/// A decoded 20×14 puzzle descriptor.
///
/// `tiles` is row-major and never contains [`Tile::Crystal`]; the crystal is
/// a separate overlay cell, as are the optional start and exit cells.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Puzzle {
    pub tiles: Vec<Tile>,
    pub crystal: (u8, u8),
    pub start: Option<(u8, u8)>,
    pub exit: Option<(u8, u8)>,
}

impl Puzzle {
    /// Puzzle with every cell set to `fill` and the crystal at (0, 0).
    pub fn filled(fill: Tile) -> Self {
        Self {
            tiles: vec![fill; PUZZLE_WIDTH * PUZZLE_HEIGHT],
            crystal: (0, 0),
            start: None,
            exit: None,
        }
    }

    /// Tile at local coordinates.
    pub fn tile(&self, x: u8, y: u8) -> Tile {
        debug_assert!((x as usize) < PUZZLE_WIDTH && (y as usize) < PUZZLE_HEIGHT);
        self.tiles[y as usize * PUZZLE_WIDTH + x as usize]
    }

    /// Overwrite the tile at local coordinates.
    pub fn set_tile(&mut self, x: u8, y: u8, tile: Tile) {
        debug_assert!((x as usize) < PUZZLE_WIDTH && (y as usize) < PUZZLE_HEIGHT);
        self.tiles[y as usize * PUZZLE_WIDTH + x as usize] = tile;
    }
}

/// Decode four descriptor words into a puzzle.
///
/// Total on any input: tile digits outside the wire range decode as empty
/// cells and object coordinates are taken as encoded. `use_start` and
/// `use_exit` select whether the start and exit objects are read or skipped.
pub fn decode_descriptor(
    words: &[U256; DESCRIPTOR_WORDS],
    use_start: bool,
    use_exit: bool,
) -> CodecResult<Puzzle> {
    let mut stream = DigitStream::new(words.as_slice());

    let mut tiles = Vec::with_capacity(PUZZLE_WIDTH * PUZZLE_HEIGHT);
    for _ in 0..PUZZLE_HEIGHT {
        for _ in 0..PUZZLE_WIDTH {
            tiles.push(Tile::from_digit(stream.next_digit()?));
        }
    }

    let crystal = read_object(&mut stream)?;
    let start = if use_start {
        Some(read_object(&mut stream)?)
    } else {
        skip_object(&mut stream)?;
        None
    };
    let exit = if use_exit {
        Some(read_object(&mut stream)?)
    } else {
        skip_object(&mut stream)?;
        None
    };

    Ok(Puzzle {
        tiles,
        crystal,
        start,
        exit,
    })
}

/// Encode a puzzle into four descriptor words.
///
/// Inverse of [`decode_descriptor`]; absent start/exit objects encode as
/// three zero placeholder digits.
pub fn encode_descriptor(puzzle: &Puzzle) -> [U256; DESCRIPTOR_WORDS] {
    let mut writer = DigitWriter::new();
    for tile in &puzzle.tiles {
        writer.push_digit(tile.digit());
    }
    write_object(&mut writer, puzzle.crystal);
    for object in [puzzle.start, puzzle.exit] {
        match object {
            Some(cell) => write_object(&mut writer, cell),
            None => write_placeholder(&mut writer),
        }
    }

    let words = writer.finish();
    let mut out = [U256::ZERO; DESCRIPTOR_WORDS];
    for (slot, word) in out.iter_mut().zip(words) {
        *slot = word;
    }
    out
}

/// Read one 3-digit object: digits `(quadrant, y, x)`, least-significant
/// first. The quadrant digit widens the short coordinates back to the full
/// 20×14 window: quadrants 3 and 4 are the bottom rows (`y < 4` means
/// `y + 10`), even quadrants are the right half (`x + 10`).
fn read_object(stream: &mut DigitStream<'_>) -> CodecResult<(u8, u8)> {
    let quadrant = stream.next_digit()?;
    let mut y = stream.next_digit()?;
    let mut x = stream.next_digit()?;
    if quadrant > 2 && y < 4 {
        y += 10;
    }
    if quadrant % 2 == 0 {
        x += 10;
    }
    Ok((x, y))
}

fn skip_object(stream: &mut DigitStream<'_>) -> CodecResult<()> {
    for _ in 0..3 {
        stream.skip_digit()?;
    }
    Ok(())
}

fn write_object(writer: &mut DigitWriter, (x, y): (u8, u8)) {
    let mut quadrant = 1u8;
    let (mut x, mut y) = (x, y);
    if x >= 10 {
        x -= 10;
        quadrant += 1;
    }
    if y >= 10 {
        y -= 10;
        quadrant += 2;
    }
    writer.push_digit(quadrant);
    writer.push_digit(y);
    writer.push_digit(x);
}

fn write_placeholder(writer: &mut DigitWriter) {
    for _ in 0..3 {
        writer.push_digit(0);
    }
}
