//! Move vocabulary for encoded solutions

use serde::{Deserialize, Serialize};

use crate::errors::CodecError;

/// What a solution step does.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum MoveKind {
    /// Step the player one cell
    Move = 0,
    /// Swing a pick at an adjacent cell
    Mine = 1,
    /// Place a soft block on an empty cell
    PlaceBlock = 2,
    /// Place a soft ladder on an empty cell
    PlaceLadder = 3,
}

impl MoveKind {
    /// Parse a solution digit.
    pub fn from_digit(digit: u8) -> Result<Self, CodecError> {
        match digit {
            0 => Ok(MoveKind::Move),
            1 => Ok(MoveKind::Mine),
            2 => Ok(MoveKind::PlaceBlock),
            3 => Ok(MoveKind::PlaceLadder),
            other => Err(CodecError::InvalidMoveKind(other)),
        }
    }
}

/// Where a solution step points.
///
/// `Move` honours only the four cardinal directions; `Mine` and the place
/// kinds accept all eight compass directions. `Wait` is reserved: it
/// resolves to the player's own cell and steps nowhere.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Direction {
    Right = 1,
    Left = 2,
    Up = 3,
    Down = 4,
    RightUp = 5,
    RightDown = 6,
    LeftUp = 7,
    LeftDown = 8,
    Wait = 9,
}

impl Direction {
    /// Parse a solution digit.
    pub fn from_digit(digit: u8) -> Result<Self, CodecError> {
        match digit {
            1 => Ok(Direction::Right),
            2 => Ok(Direction::Left),
            3 => Ok(Direction::Up),
            4 => Ok(Direction::Down),
            5 => Ok(Direction::RightUp),
            6 => Ok(Direction::RightDown),
            7 => Ok(Direction::LeftUp),
            8 => Ok(Direction::LeftDown),
            9 => Ok(Direction::Wait),
            other => Err(CodecError::InvalidDirection(other)),
        }
    }
}

/// A decoded solution step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub kind: MoveKind,
    pub direction: Direction,
}

impl Move {
    /// Create a move.
    pub fn new(kind: MoveKind, direction: Direction) -> Self {
        Self { kind, direction }
    }
}
