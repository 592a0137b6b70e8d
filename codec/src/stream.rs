//! Radix-10 digit streaming across 256-bit words
//!
//! Descriptors and solutions pack decimal digits into 256-bit unsigned
//! integers, least-significant digit first. Extraction keeps two running
//! markers (`modulus` and `prev`) so each digit costs one modulo and one
//! division; both markers advance one power of ten per digit and reset when
//! a word has yielded all 77 safe digits. The marker pair mirrors the
//! on-chain encoder exactly, which keeps the format bit-compatible.

use alloy_primitives::U256;

use crate::errors::{CodecError, CodecResult};

/// Decimal digits carried by one 256-bit word.
pub const DIGITS_PER_WORD: u32 = 77;

/// Largest safe power-of-ten marker: `10^77 − 1`.
///
/// A 256-bit word holds 77 full decimal digits; past this marker the next
/// digit may be truncated, so the stream rolls over to the next word.
pub fn mod_limit() -> U256 {
    pow10(DIGITS_PER_WORD) - U256::ONE
}

fn pow10(exp: u32) -> U256 {
    U256::from(10u64).pow(U256::from(exp))
}

/// Reader cursor over a slice of 256-bit words.
#[derive(Debug, Clone)]
pub struct DigitStream<'a> {
    words: &'a [U256],
    word: usize,
    modulus: U256,
    prev: U256,
    limit: U256,
}

impl<'a> DigitStream<'a> {
    /// Stream positioned at the first digit of the first word.
    pub fn new(words: &'a [U256]) -> Self {
        Self {
            words,
            word: 0,
            modulus: U256::ONE,
            prev: U256::ONE,
            limit: mod_limit(),
        }
    }

    /// Stream with the markers pre-advanced past `offset` digits of the
    /// first word. Solutions reserve the low three digits for the counter.
    pub fn with_digit_offset(words: &'a [U256], offset: u32) -> Self {
        let start = pow10(offset);
        Self {
            words,
            word: 0,
            modulus: start,
            prev: start,
            limit: mod_limit(),
        }
    }

    /// Extract the next digit.
    pub fn next_digit(&mut self) -> CodecResult<u8> {
        let word = self
            .words
            .get(self.word)
            .copied()
            .ok_or(CodecError::StreamExhausted {
                words: self.words.len(),
            })?;
        let digit = (word % (self.modulus * U256::from(10u64))) / self.prev;
        self.advance();
        Ok(digit.to::<u8>())
    }

    /// Consume one digit position without extracting a value.
    ///
    /// Placeholder objects in descriptors occupy digit positions that are
    /// skipped rather than read, so later digits stay aligned.
    pub fn skip_digit(&mut self) -> CodecResult<()> {
        if self.word >= self.words.len() {
            return Err(CodecError::StreamExhausted {
                words: self.words.len(),
            });
        }
        self.advance();
        Ok(())
    }

    fn advance(&mut self) {
        let next = self.modulus * U256::from(10u64);
        if next > self.limit {
            self.word += 1;
            self.modulus = U256::ONE;
            self.prev = U256::ONE;
        } else {
            self.modulus = next;
            self.prev = next;
        }
    }
}

/// Writer mirror of [`DigitStream`], appending digits LSD first.
#[derive(Debug)]
pub struct DigitWriter {
    done: Vec<U256>,
    current: U256,
    place: U256,
    limit: U256,
}

impl DigitWriter {
    /// Writer positioned at the first digit of the first word.
    pub fn new() -> Self {
        Self {
            done: Vec::new(),
            current: U256::ZERO,
            place: U256::ONE,
            limit: mod_limit(),
        }
    }

    /// Writer with the place pre-advanced past `offset` digits of the first
    /// word (the solution counter occupies the low three digits).
    pub fn with_digit_offset(offset: u32) -> Self {
        Self {
            done: Vec::new(),
            current: U256::ZERO,
            place: pow10(offset),
            limit: mod_limit(),
        }
    }

    /// Append one digit at the current place value.
    pub fn push_digit(&mut self, digit: u8) {
        debug_assert!(digit < 10, "digit {digit} out of radix");
        self.current += U256::from(digit) * self.place;
        let next = self.place * U256::from(10u64);
        if next > self.limit {
            self.done.push(self.current);
            self.current = U256::ZERO;
            self.place = U256::ONE;
        } else {
            self.place = next;
        }
    }

    /// Finish writing and return the packed words.
    pub fn finish(mut self) -> Vec<U256> {
        if self.place > U256::ONE || self.done.is_empty() {
            self.done.push(self.current);
        }
        self.done
    }
}

impl Default for DigitWriter {
    fn default() -> Self {
        Self::new()
    }
}
