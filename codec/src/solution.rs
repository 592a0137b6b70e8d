//! Solution wire codec
//!
//! A solution is a sequence of 256-bit words. Word zero's low three decimal
//! digits declare the move count; every following digit pair is one
//! `(kind, direction)` move, streamed least-significant digit first with the
//! same 77-digit word rollover as descriptors. Exactly the declared number
//! of pairs is consumed; trailing digits are padding.

use alloy_primitives::U256;

use crate::errors::{CodecError, CodecResult};
use crate::moves::{Direction, Move, MoveKind};
use crate::stream::{DigitStream, DigitWriter};

/// Decimal digits reserved for the move counter in word zero.
const COUNTER_DIGITS: u32 = 3;

/// Most moves a solution may declare.
pub const MAX_MOVES: u16 = 255;

/// Decode an encoded solution into its move stream.
pub fn decode_solution(words: &[U256]) -> CodecResult<Vec<Move>> {
    let first = *words.first().ok_or(CodecError::EmptySolution)?;
    let num_moves = (first % U256::from(1000u64)).to::<u16>();
    if num_moves > MAX_MOVES {
        return Err(CodecError::TooManyMoves {
            declared: num_moves,
            limit: MAX_MOVES,
        });
    }

    let mut stream = DigitStream::with_digit_offset(words, COUNTER_DIGITS);
    let mut moves = Vec::with_capacity(num_moves as usize);
    for _ in 0..num_moves {
        let kind = MoveKind::from_digit(stream.next_digit()?)?;
        let direction = Direction::from_digit(stream.next_digit()?)?;
        moves.push(Move::new(kind, direction));
    }
    Ok(moves)
}

/// Encode a move stream (inverse of [`decode_solution`]; reveal and test
/// tooling).
pub fn encode_solution(moves: &[Move]) -> Vec<U256> {
    debug_assert!(moves.len() <= MAX_MOVES as usize);
    let mut writer = DigitWriter::with_digit_offset(COUNTER_DIGITS);
    for mv in moves {
        writer.push_digit(mv.kind as u8);
        writer.push_digit(mv.direction as u8);
    }
    let mut words = writer.finish();
    words[0] += U256::from(moves.len() as u64);
    words
}
