//! Read-only descriptor store collaborator

use alloy_primitives::U256;
use shardmine_codec::DESCRIPTOR_WORDS;

use crate::errors::EngineError;

/// Read-only access to minted puzzle descriptors.
///
/// The production store lives on the chain side; the simulator only ever
/// reads through this interface.
pub trait DescriptorStore {
    /// Fetch the 4-word descriptor for a puzzle id.
    fn get_puzzle(&self, id: U256) -> Result<[U256; DESCRIPTOR_WORDS], EngineError>;

    /// Number of descriptors minted so far; ids run `0..total`.
    fn total_minted(&self) -> U256;
}

/// In-memory descriptor store.
///
/// Reference implementation for tests and off-chain evaluation.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    puzzles: Vec<[U256; DESCRIPTOR_WORDS]>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a descriptor; returns the id it was minted under.
    pub fn mint(&mut self, words: [U256; DESCRIPTOR_WORDS]) -> U256 {
        self.puzzles.push(words);
        U256::from(self.puzzles.len() as u64 - 1)
    }
}

impl DescriptorStore for MemoryStore {
    fn get_puzzle(&self, id: U256) -> Result<[U256; DESCRIPTOR_WORDS], EngineError> {
        if id >= U256::from(self.puzzles.len() as u64) {
            return Err(EngineError::PuzzleNotFound(id));
        }
        Ok(self.puzzles[id.to::<usize>()])
    }

    fn total_minted(&self) -> U256 {
        U256::from(self.puzzles.len() as u64)
    }
}
