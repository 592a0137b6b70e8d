//! SHARDMINE wire formats
//!
//! Bit-exact codecs for the two on-chain payloads of the puzzle game:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                  Payload Layout                     │
//! ├─────────────────────────────────────────────────────┤
//! │  Descriptor: 4 × 256-bit words                      │
//! │      280 tile digits (20×14, row-major)             │
//! │      + crystal / start / exit objects (3 digits)    │
//! │                                                     │
//! │  Solution: N × 256-bit words                        │
//! │      3-digit move counter                           │
//! │      + (kind, direction) digit pairs                │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! Both payloads stream decimal digits least-significant first across their
//! words, 77 digits per word ([`stream::mod_limit`]). Decoders are total:
//! any 4-word descriptor decodes to a puzzle, and solution decoding fails
//! only with a tagged [`CodecError`].

pub mod descriptor;
pub mod errors;
pub mod moves;
pub mod solution;
pub mod stream;
pub mod tile;

// Re-export main types
pub use descriptor::{
    decode_descriptor, encode_descriptor, Puzzle, DESCRIPTOR_WORDS, PUZZLE_HEIGHT, PUZZLE_WIDTH,
};
pub use errors::{CodecError, CodecResult};
pub use moves::{Direction, Move, MoveKind};
pub use solution::{decode_solution, encode_solution, MAX_MOVES};
pub use stream::{mod_limit, DigitStream, DigitWriter, DIGITS_PER_WORD};
pub use tile::Tile;
