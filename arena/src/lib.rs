//! SHARDMINE challenge protocol
//!
//! The economic shell around the deterministic simulator:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │               Competition Lifecycle                 │
//! ├─────────────────────────────────────────────────────┤
//! │  start ──▶ commit(hash) ──▶ reveal(preimage)        │
//! │                │                  │                 │
//! │   test window: │  take_player_bond (slash invalid)  │
//! │                ▼                  ▼                 │
//! │   after window: unlock_bond_award_prize             │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! Evaluation is cheap off-chain and only run on-demand by challengers, so
//! honest submitters pay nothing beyond the commit and reveal calls. Time is
//! injected through [`Clock`], funds move only through [`BondLedger`], and
//! descriptors are read through the engine's store trait.

pub mod clock;
pub mod errors;
pub mod ledger;
pub mod protocol;

// Re-export main types
pub use clock::{Clock, ManualClock, SystemClock};
pub use errors::{ArenaError, LedgerError};
pub use ledger::{AccountId, BalanceRecord, BondLedger, MemoryLedger};
pub use protocol::{
    solution_hash, Arena, ArenaConfig, Competition, CurrentSolution, DEFAULT_COMP_DURATION,
    DEFAULT_TEST_DURATION,
};
