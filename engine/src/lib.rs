//! SHARDMINE board composition and simulation
//!
//! The deterministic core of the puzzle game:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                 Evaluation Flow                     │
//! ├─────────────────────────────────────────────────────┤
//! │  puzzle ids ──▶ DescriptorStore (read-only)         │
//! │      ↓                                              │
//! │  compose: 4 × 20×14 descriptors → 40×28 Board       │
//! │      ↓                                              │
//! │  Simulation: gravity + move dispatch + pickups      │
//! │      ↓                                              │
//! │  Ok(inventory) | SimError (one tagged reason)       │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! Every evaluation is a pure function of the store snapshot, the puzzle
//! ids, the setup value and the encoded solution: the board is owned per
//! call and no state escapes. [`is_valid_solution`] is the boolean surface
//! the challenge protocol invokes; it never propagates a failure.

pub mod board;
pub mod composer;
pub mod errors;
pub mod simulator;
pub mod store;

// Re-export main types
pub use board::{Board, BOARD_HEIGHT, BOARD_WIDTH};
pub use composer::{compose, SetupData, QUADRANTS};
pub use errors::{EngineError, SimError};
pub use simulator::{evaluate, is_valid_solution, Inventory, Simulation};
pub use store::{DescriptorStore, MemoryStore};
