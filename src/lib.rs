//! SHARDMINE: On-Chain-Verifiable Gravity Puzzles
//!
//! This is the root crate that re-exports all shardmine components for
//! integration testing and provides unified access to the game primitives.
//!
//! ## Architecture Overview
//!
//! Players mint immutable 20×14 puzzle descriptors; a competition composes
//! four of them into one 40×28 board and puts a prize on it. Solving is
//! cheap and off-chain: the on-chain side only needs commit-reveal plus an
//! optimistic verification window in which anyone may replay the revealed
//! move stream through the deterministic simulator:
//!
//! - **Bit-exact codecs**: radix-10 digit packing into 256-bit words
//! - **Total simulation**: gravity, mining and placement in bounded time
//! - **Optimistic verification**: invalid submitters lose their bond to
//!   whoever replays them
//!
//! ## Crate Organization
//!
//! - `shardmine-codec`: descriptor and solution wire formats
//! - `shardmine-engine`: board composition and the gravity simulator
//! - `shardmine-arena`: the commit-reveal-challenge protocol

// Re-export all crates for integration testing
pub use shardmine_arena as arena;
pub use shardmine_codec as codec;
pub use shardmine_engine as engine;

/// SHARDMINE protocol version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Protocol configuration defaults
pub mod config {
    pub use shardmine_arena::{DEFAULT_COMP_DURATION, DEFAULT_TEST_DURATION};
    pub use shardmine_codec::{MAX_MOVES, PUZZLE_HEIGHT, PUZZLE_WIDTH};
    pub use shardmine_engine::{BOARD_HEIGHT, BOARD_WIDTH, QUADRANTS};
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use shardmine_arena::{
        solution_hash, AccountId, Arena, ArenaConfig, ArenaError, BondLedger, Clock, ManualClock,
        MemoryLedger, SystemClock,
    };
    pub use shardmine_codec::{
        decode_descriptor, decode_solution, encode_descriptor, encode_solution, Direction, Move,
        MoveKind, Puzzle, Tile,
    };
    pub use shardmine_engine::{
        compose, evaluate, is_valid_solution, Board, DescriptorStore, EngineError, Inventory,
        MemoryStore, SetupData, SimError, Simulation,
    };
}
