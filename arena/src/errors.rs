//! Error types for the challenge protocol

use alloy_primitives::U256;
use thiserror::Error;

/// Failures surfaced by protocol entry points.
///
/// Every failure precedes every state mutation: a returned error means
/// nothing changed in the arena or the ledger.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArenaError {
    #[error("available bond below the required amount")]
    BondNotEnough,

    #[error("revealed solution does not hash to the committed value")]
    SolutionNotEqualHash,

    #[error("competition submission window has closed")]
    CompetitionAlreadyFinished,

    #[error("outside the verification window")]
    OutsideTestTimeWindow,

    #[error("a solution hash is already committed")]
    HashAlreadySet,

    #[error("no committed solution owner")]
    NoSolutionOwner,

    #[error("the revealed solution is valid")]
    SolutionIsValid,

    #[error("the competition is still running")]
    CompetitionStillRunning,

    #[error("an unclaimed prize is outstanding")]
    UnclaimedPrize,

    #[error("caller lacks the admin capability")]
    Unauthorized,

    #[error("puzzle {0} is not minted")]
    UnknownPuzzle(U256),

    #[error("ledger operation failed: {0}")]
    Ledger(#[from] LedgerError),
}

/// Failures from a bond ledger implementation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("insufficient available bond: required {required}, available {available}")]
    InsufficientAvailable { required: U256, available: U256 },

    #[error("insufficient locked bond: required {required}, locked {locked}")]
    InsufficientLocked { required: U256, locked: U256 },
}
