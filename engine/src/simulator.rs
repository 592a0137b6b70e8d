//! Gravity-driven puzzle simulation
//!
//! Executes a decoded move stream against a composed board and decides in
//! bounded time whether the run ends on the exit cell with enough crystals.
//! Gravity runs once before the first move and again after every move, so
//! total work is linear in the move count and the board height. Each failing
//! run carries exactly one tagged [`SimError`]; the boolean entry point
//! absorbs them all for optimistic verification.

use alloy_primitives::U256;
use shardmine_codec::{decode_solution, Direction, Move, MoveKind, Tile};
use tracing::{debug, trace};

use crate::board::Board;
use crate::composer::{compose, QUADRANTS};
use crate::errors::{EngineError, SimError};
use crate::store::DescriptorStore;

/// Player inventory.
///
/// Counters are bounded by the board contents and the move cap, so eight
/// bits suffice; pickups saturate rather than wrap.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Inventory {
    pub picks: u8,
    pub soft_tiles: u8,
    pub ladders: u8,
    pub crystals: u8,
}

/// One simulation run over a freshly owned board.
#[derive(Debug)]
pub struct Simulation {
    board: Board,
    inventory: Inventory,
}

impl Simulation {
    /// Start a simulation on an owned board.
    pub fn new(board: Board) -> Self {
        Self {
            board,
            inventory: Inventory::default(),
        }
    }

    /// Execute the move stream and check the winning conditions.
    ///
    /// Returns the final inventory of a winning run, or the first tagged
    /// failure.
    pub fn run(&mut self, moves: &[Move], target_crystals: u8) -> Result<Inventory, SimError> {
        self.fall_and_pickup()?;
        for (step, mv) in moves.iter().enumerate() {
            trace!(step, ?mv, at = ?self.board.player, "applying move");
            self.apply(*mv)?;
        }

        let (x, y) = self.board.player;
        if (x, y) != self.board.exit {
            return Err(SimError::NotAtExit { x, y });
        }
        if self.inventory.crystals < target_crystals {
            return Err(SimError::NotEnoughCrystals {
                have: self.inventory.crystals,
                need: target_crystals,
            });
        }
        Ok(self.inventory)
    }

    /// Inventory snapshot.
    pub fn inventory(&self) -> Inventory {
        self.inventory
    }

    /// Board snapshot.
    pub fn board(&self) -> &Board {
        &self.board
    }

    fn apply(&mut self, mv: Move) -> Result<(), SimError> {
        match mv.kind {
            MoveKind::Move => self.step(mv.direction)?,
            MoveKind::Mine => self.mine(mv.direction)?,
            MoveKind::PlaceBlock => self.place(mv.direction, Tile::SoftBlock)?,
            MoveKind::PlaceLadder => self.place(mv.direction, Tile::SoftLadder)?,
        }

        let (x, y) = self.board.player;
        let here = self
            .board
            .tile(x, y)
            .ok_or(SimError::MovedOutOfBounds { x, y })?;
        if here.is_solid() {
            return Err(SimError::MovedIntoSolid { x, y });
        }
        self.fall_and_pickup()
    }

    /// Step the player. Only the four cardinal directions move; climbing
    /// requires a soft ladder underfoot. The reserved directions leave the
    /// coordinates untouched (post-move checks and gravity still run).
    fn step(&mut self, direction: Direction) -> Result<(), SimError> {
        let (x, y) = self.board.player;
        self.board.player = match direction {
            Direction::Right => (x.wrapping_add(1), y),
            Direction::Left => (x.wrapping_sub(1), y),
            Direction::Up => {
                if self.board.tile(x, y) != Some(Tile::SoftLadder) {
                    return Err(SimError::CannotMoveUp { x, y });
                }
                (x, y.wrapping_sub(1))
            }
            Direction::Down => (x, y.wrapping_add(1)),
            _ => (x, y),
        };
        Ok(())
    }

    fn mine(&mut self, direction: Direction) -> Result<(), SimError> {
        let (x, y) = target_of(self.board.player, direction);
        if self.inventory.picks == 0 {
            return Err(SimError::NoPicks { x, y });
        }
        match self.board.tile(x, y) {
            Some(Tile::SoftBlock) => {
                self.inventory.soft_tiles = self.inventory.soft_tiles.saturating_add(1)
            }
            Some(Tile::SoftLadder) => {
                self.inventory.ladders = self.inventory.ladders.saturating_add(1)
            }
            Some(_) => return Err(SimError::NothingToMine { x, y }),
            None => return Err(SimError::MovedOutOfBounds { x, y }),
        }
        self.inventory.picks -= 1;
        self.board.set_tile(x, y, Tile::None);
        Ok(())
    }

    fn place(&mut self, direction: Direction, tile: Tile) -> Result<(), SimError> {
        let (x, y) = target_of(self.board.player, direction);
        let available = match tile {
            Tile::SoftBlock => &mut self.inventory.soft_tiles,
            _ => &mut self.inventory.ladders,
        };
        if *available == 0 {
            return Err(SimError::NoTileToPlace { tile, x, y });
        }
        match self.board.tile(x, y) {
            Some(Tile::None) => {}
            Some(_) => return Err(SimError::CannotPlace { tile, x, y }),
            None => return Err(SimError::MovedOutOfBounds { x, y }),
        }
        *available -= 1;
        self.board.set_tile(x, y, tile);
        Ok(())
    }

    /// Gravity with pickup: a soft ladder underfoot suspends the player;
    /// otherwise the current cell is collected, then the player falls until
    /// the cell below is standable or the floor row is reached, collecting
    /// everything fallen through. Hard tiles are not standable, so the
    /// player falls past them.
    fn fall_and_pickup(&mut self) -> Result<(), SimError> {
        let (x, mut y) = self.board.player;
        let here = self
            .board
            .tile(x, y)
            .ok_or(SimError::MovedOutOfBounds { x, y })?;
        if here == Tile::SoftLadder {
            return Ok(());
        }
        if here.is_collectible() {
            self.collect(here);
            self.board.set_tile(x, y, Tile::None);
        }

        while y < self.board.height() - 1 {
            let below = self
                .board
                .tile(x, y + 1)
                .ok_or(SimError::MovedOutOfBounds { x, y: y + 1 })?;
            if below.is_standable() {
                break;
            }
            if below.is_collectible() {
                self.collect(below);
                self.board.set_tile(x, y + 1, Tile::None);
            }
            y += 1;
        }
        self.board.player = (x, y);
        Ok(())
    }

    fn collect(&mut self, tile: Tile) {
        match tile {
            Tile::Pick => self.inventory.picks = self.inventory.picks.saturating_add(1),
            Tile::Crystal => self.inventory.crystals = self.inventory.crystals.saturating_add(1),
            _ => {}
        }
    }
}

/// Resolve a direction to its target cell with wrapping 8-bit arithmetic.
/// `Wait` resolves to the player's own cell.
fn target_of((x, y): (u8, u8), direction: Direction) -> (u8, u8) {
    match direction {
        Direction::Right => (x.wrapping_add(1), y),
        Direction::Left => (x.wrapping_sub(1), y),
        Direction::Up => (x, y.wrapping_sub(1)),
        Direction::Down => (x, y.wrapping_add(1)),
        Direction::RightUp => (x.wrapping_add(1), y.wrapping_sub(1)),
        Direction::RightDown => (x.wrapping_add(1), y.wrapping_add(1)),
        Direction::LeftUp => (x.wrapping_sub(1), y.wrapping_sub(1)),
        Direction::LeftDown => (x.wrapping_sub(1), y.wrapping_add(1)),
        Direction::Wait => (x, y),
    }
}

/// Compose the board, decode the solution and run it: the strict surface.
pub fn evaluate<S: DescriptorStore + ?Sized>(
    store: &S,
    puzzle_ids: &[U256; QUADRANTS],
    setup_data: u16,
    solution: &[U256],
) -> Result<Inventory, EngineError> {
    let (board, target_crystals) = compose(store, puzzle_ids, setup_data)?;
    let moves = decode_solution(solution)?;
    let inventory = Simulation::new(board).run(&moves, target_crystals)?;
    Ok(inventory)
}

/// Boolean surface for optimistic verification: any failure is `false`.
pub fn is_valid_solution<S: DescriptorStore + ?Sized>(
    store: &S,
    puzzle_ids: &[U256; QUADRANTS],
    setup_data: u16,
    solution: &[U256],
) -> bool {
    match evaluate(store, puzzle_ids, setup_data, solution) {
        Ok(_) => true,
        Err(err) => {
            debug!(%err, "solution rejected");
            false
        }
    }
}
