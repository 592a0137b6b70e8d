//! Commit-reveal-challenge protocol
//!
//! A competition runs in two windows. During the submission window a solver
//! commits the keccak hash of their encoded solution (locking a bond) and
//! then reveals the preimage. During the verification window anyone may run
//! the simulator against the reveal: an invalid submitter loses the bond to
//! the challenger, a valid one costs the challenger nothing but the call.
//! After an unchallenged verification window the submitter collects the
//! prize. Hashes commit first because a plain-text submission could be
//! front-run by a bot copying the preimage.
//!
//! Every entry point performs all of its reverting checks before touching
//! the ledger, so a returned error implies no state change.

use alloy_primitives::{keccak256, B256, U256};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use shardmine_engine::{is_valid_solution, DescriptorStore, QUADRANTS};

use crate::clock::Clock;
use crate::errors::ArenaError;
use crate::ledger::{AccountId, BondLedger};

/// Default submission window: one hour.
pub const DEFAULT_COMP_DURATION: u64 = 3_600;
/// Default verification window: fifteen minutes.
pub const DEFAULT_TEST_DURATION: u64 = 900;

/// Protocol configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArenaConfig {
    /// Submission window in seconds.
    pub comp_duration: u64,
    /// Verification window in seconds.
    pub test_duration: u64,
    /// Bond a submitter must lock to commit.
    pub required_bond: U256,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            comp_duration: DEFAULT_COMP_DURATION,
            test_duration: DEFAULT_TEST_DURATION,
            required_bond: U256::ZERO,
        }
    }
}

impl ArenaConfig {
    /// Set the required bond.
    pub fn with_required_bond(mut self, amount: U256) -> Self {
        self.required_bond = amount;
        self
    }

    /// Set both windows.
    pub fn with_durations(mut self, comp_duration: u64, test_duration: u64) -> Self {
        self.comp_duration = comp_duration;
        self.test_duration = test_duration;
        self
    }
}

/// The active competition.
///
/// A zero start timestamp means none has run yet; on a live clock that
/// competition's windows are long past, which is exactly the idle state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Competition {
    pub puzzle_ids: [U256; QUADRANTS],
    pub setup_data: u16,
    pub start_ts: u64,
    pub prize: U256,
}

/// The outstanding submission, keyed by its submitter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentSolution {
    pub submitter: AccountId,
    pub hash: B256,
    pub revealed: Option<Vec<U256>>,
}

/// Hash an encoded solution for commit-reveal: keccak256 over the
/// big-endian concatenation of its words.
pub fn solution_hash(words: &[U256]) -> B256 {
    let mut preimage = Vec::with_capacity(words.len() * 32);
    for word in words {
        preimage.extend_from_slice(&word.to_be_bytes::<32>());
    }
    keccak256(&preimage)
}

/// The challenge protocol around the simulator.
///
/// Owns the competition singletons, reads descriptors through the store and
/// moves funds only through the narrow [`BondLedger`] interface.
#[derive(Debug)]
pub struct Arena<S, L, C> {
    store: S,
    ledger: L,
    clock: C,
    config: ArenaConfig,
    admin: AccountId,
    competition: Competition,
    current: Option<CurrentSolution>,
}

impl<S: DescriptorStore, L: BondLedger, C: Clock> Arena<S, L, C> {
    /// Create an arena around its collaborators.
    pub fn new(store: S, ledger: L, clock: C, config: ArenaConfig, admin: AccountId) -> Self {
        Self {
            store,
            ledger,
            clock,
            config,
            admin,
            competition: Competition::default(),
            current: None,
        }
    }

    pub fn competition(&self) -> &Competition {
        &self.competition
    }

    pub fn current_solution(&self) -> Option<&CurrentSolution> {
        self.current.as_ref()
    }

    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// The ledger is an external collaborator; deposits and withdrawals
    /// outside the protocol go through the host.
    pub fn ledger_mut(&mut self) -> &mut L {
        &mut self.ledger
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Update the bond requirement. Admin only, between competitions.
    pub fn set_required_bond(&mut self, caller: &AccountId, amount: U256) -> Result<(), ArenaError> {
        self.require_admin(caller)?;
        self.require_idle()?;
        self.config.required_bond = amount;
        Ok(())
    }

    /// Update both windows. Admin only, between competitions.
    pub fn set_durations(
        &mut self,
        caller: &AccountId,
        comp_duration: u64,
        test_duration: u64,
    ) -> Result<(), ArenaError> {
        self.require_admin(caller)?;
        self.require_idle()?;
        self.config.comp_duration = comp_duration;
        self.config.test_duration = test_duration;
        Ok(())
    }

    /// Open a new competition over four minted puzzles, allocating the prize
    /// up front. Admin only, between competitions.
    pub fn start_competition(
        &mut self,
        caller: &AccountId,
        puzzle_ids: [U256; QUADRANTS],
        setup_data: u16,
        prize: U256,
    ) -> Result<(), ArenaError> {
        self.require_admin(caller)?;
        self.require_idle()?;
        let minted = self.store.total_minted();
        for id in &puzzle_ids {
            if *id >= minted {
                return Err(ArenaError::UnknownPuzzle(*id));
            }
        }

        let start_ts = self.clock.now();
        self.competition = Competition {
            puzzle_ids,
            setup_data,
            start_ts,
            prize,
        };
        self.ledger.allocate_prize(prize);
        info!(start_ts, %prize, setup_data, "competition started");
        Ok(())
    }

    /// Commit a solution hash during the submission window, locking the
    /// required bond. First committer wins the slot.
    pub fn commit(&mut self, submitter: &AccountId, hash: B256) -> Result<(), ArenaError> {
        if self.clock.now() > self.competition_end() {
            return Err(ArenaError::CompetitionAlreadyFinished);
        }
        if self.current.is_some() {
            return Err(ArenaError::HashAlreadySet);
        }
        if self.ledger.available_bond(submitter) < self.config.required_bond {
            return Err(ArenaError::BondNotEnough);
        }

        self.ledger.lock_bond(submitter, self.config.required_bond)?;
        self.current = Some(CurrentSolution {
            submitter: *submitter,
            hash,
            revealed: None,
        });
        debug!(submitter = %hex::encode(submitter), "solution hash committed");
        Ok(())
    }

    /// Reveal the committed preimage during the submission window.
    ///
    /// Only the hash binds: whoever presents the exact preimage reveals on
    /// behalf of the committed submitter. Revealing stores the moves; it
    /// does not yet award anything.
    pub fn reveal(&mut self, solution: Vec<U256>) -> Result<(), ArenaError> {
        if self.clock.now() > self.competition_end() {
            return Err(ArenaError::CompetitionAlreadyFinished);
        }
        let current = self.current.as_mut().ok_or(ArenaError::NoSolutionOwner)?;
        if solution_hash(&solution) != current.hash {
            return Err(ArenaError::SolutionNotEqualHash);
        }
        current.revealed = Some(solution);
        debug!(submitter = %hex::encode(current.submitter), "solution revealed");
        Ok(())
    }

    /// Challenge the outstanding submission during the verification window.
    ///
    /// Runs the simulator over the reveal (an unrevealed commit counts as an
    /// empty, invalid solution). An invalid submitter loses the locked bond
    /// to the challenger and the slot is cleared; a valid solution fails the
    /// challenge with [`ArenaError::SolutionIsValid`] and changes nothing.
    pub fn take_player_bond(&mut self, challenger: &AccountId) -> Result<(), ArenaError> {
        let now = self.clock.now();
        if now <= self.competition_end() || now > self.test_end() {
            return Err(ArenaError::OutsideTestTimeWindow);
        }
        let current = self.current.as_ref().ok_or(ArenaError::NoSolutionOwner)?;

        let revealed = current.revealed.as_deref().unwrap_or(&[]);
        if is_valid_solution(
            &self.store,
            &self.competition.puzzle_ids,
            self.competition.setup_data,
            revealed,
        ) {
            return Err(ArenaError::SolutionIsValid);
        }

        let submitter = current.submitter;
        self.ledger
            .pay_bond_to(challenger, &submitter, self.config.required_bond)?;
        self.current = None;
        info!(
            submitter = %hex::encode(submitter),
            challenger = %hex::encode(challenger),
            "invalid submission slashed"
        );
        Ok(())
    }

    /// Release the submitter's bond and pay out the prize once the
    /// verification window has passed unchallenged.
    pub fn unlock_bond_award_prize(&mut self) -> Result<(), ArenaError> {
        if self.clock.now() <= self.test_end() {
            return Err(ArenaError::CompetitionStillRunning);
        }
        let current = self.current.as_ref().ok_or(ArenaError::NoSolutionOwner)?;

        let submitter = current.submitter;
        self.ledger
            .unlock_bond(&submitter, self.config.required_bond)?;
        self.ledger.reward_prize_to(&submitter)?;
        self.current = None;
        info!(submitter = %hex::encode(submitter), "bond unlocked, prize awarded");
        Ok(())
    }

    fn competition_end(&self) -> u64 {
        self.competition.start_ts + self.config.comp_duration
    }

    fn test_end(&self) -> u64 {
        self.competition_end() + self.config.test_duration
    }

    fn require_admin(&self, caller: &AccountId) -> Result<(), ArenaError> {
        if caller != &self.admin {
            return Err(ArenaError::Unauthorized);
        }
        Ok(())
    }

    fn require_idle(&self) -> Result<(), ArenaError> {
        if self.clock.now() <= self.test_end() {
            return Err(ArenaError::CompetitionStillRunning);
        }
        if self.current.is_some() {
            return Err(ArenaError::UnclaimedPrize);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::ledger::MemoryLedger;
    use shardmine_codec::{
        encode_descriptor, encode_solution, Direction, Move, MoveKind, Puzzle, Tile,
    };
    use shardmine_engine::MemoryStore;
    use std::sync::Arc;

    const ADMIN: AccountId = [0xAAu8; 32];
    const SOLVER: AccountId = [1u8; 32];
    const CHALLENGER: AccountId = [2u8; 32];

    const BOND: u64 = 500;
    const PRIZE: u64 = 10_000;

    /// Soft-block quadrant with a two-cell gallery: start (1, 1), exit
    /// (2, 1). `[Move Right]` wins with zero target crystals.
    fn minted_store() -> (MemoryStore, [U256; QUADRANTS]) {
        let mut puzzle = Puzzle::filled(Tile::SoftBlock);
        puzzle.set_tile(1, 1, Tile::None);
        puzzle.set_tile(2, 1, Tile::None);
        puzzle.crystal = (10, 10);
        puzzle.start = Some((1, 1));
        puzzle.exit = Some((2, 1));
        let words = encode_descriptor(&puzzle);

        let mut store = MemoryStore::new();
        let ids = [
            store.mint(words),
            store.mint(words),
            store.mint(words),
            store.mint(words),
        ];
        (store, ids)
    }

    fn valid_solution() -> Vec<U256> {
        encode_solution(&[Move::new(MoveKind::Move, Direction::Right)])
    }

    fn invalid_solution() -> Vec<U256> {
        encode_solution(&[Move::new(MoveKind::Move, Direction::Up)])
    }

    type TestArena = Arena<MemoryStore, MemoryLedger, Arc<ManualClock>>;

    /// Arena with a running competition (started at t = 10_000), a funded
    /// solver and a default one-hour / fifteen-minute window pair.
    fn running_arena() -> (TestArena, Arc<ManualClock>) {
        let (store, ids) = minted_store();
        let mut ledger = MemoryLedger::new();
        ledger.deposit(&SOLVER, U256::from(BOND));

        let clock = Arc::new(ManualClock::new(10_000));
        let config = ArenaConfig::default().with_required_bond(U256::from(BOND));
        let mut arena = Arena::new(store, ledger, clock.clone(), config, ADMIN);
        arena
            .start_competition(&ADMIN, ids, 0, U256::from(PRIZE))
            .unwrap();
        (arena, clock)
    }

    fn into_test_window(clock: &ManualClock) {
        clock.set(10_000 + DEFAULT_COMP_DURATION + 1);
    }

    fn past_test_window(clock: &ManualClock) {
        clock.set(10_000 + DEFAULT_COMP_DURATION + DEFAULT_TEST_DURATION + 1);
    }

    #[test]
    fn commit_locks_the_bond() {
        let (mut arena, _clock) = running_arena();
        arena.commit(&SOLVER, solution_hash(&valid_solution())).unwrap();

        assert_eq!(arena.ledger().balance(&SOLVER).locked, U256::from(BOND));
        assert_eq!(arena.ledger().balance(&SOLVER).available, U256::ZERO);
        assert_eq!(arena.current_solution().unwrap().submitter, SOLVER);
    }

    #[test]
    fn commit_requires_the_bond() {
        let (mut arena, _clock) = running_arena();
        let outcome = arena.commit(&CHALLENGER, solution_hash(&valid_solution()));
        assert_eq!(outcome, Err(ArenaError::BondNotEnough));
        assert!(arena.current_solution().is_none());
        assert_eq!(arena.ledger().balance(&CHALLENGER).locked, U256::ZERO);
    }

    #[test]
    fn second_commit_loses_the_race() {
        let (mut arena, _clock) = running_arena();
        arena.ledger_mut().deposit(&CHALLENGER, U256::from(BOND));

        arena.commit(&SOLVER, solution_hash(&valid_solution())).unwrap();
        let outcome = arena.commit(&CHALLENGER, solution_hash(&invalid_solution()));
        assert_eq!(outcome, Err(ArenaError::HashAlreadySet));
    }

    #[test]
    fn commit_after_the_window_fails() {
        let (mut arena, clock) = running_arena();
        into_test_window(&clock);
        let outcome = arena.commit(&SOLVER, solution_hash(&valid_solution()));
        assert_eq!(outcome, Err(ArenaError::CompetitionAlreadyFinished));
    }

    #[test]
    fn reveal_checks_the_preimage() {
        let (mut arena, _clock) = running_arena();
        arena.commit(&SOLVER, solution_hash(&valid_solution())).unwrap();

        let outcome = arena.reveal(invalid_solution());
        assert_eq!(outcome, Err(ArenaError::SolutionNotEqualHash));
        assert!(arena.current_solution().unwrap().revealed.is_none());

        arena.reveal(valid_solution()).unwrap();
        assert!(arena.current_solution().unwrap().revealed.is_some());
    }

    #[test]
    fn reveal_without_commit_fails() {
        let (mut arena, _clock) = running_arena();
        assert_eq!(
            arena.reveal(valid_solution()),
            Err(ArenaError::NoSolutionOwner)
        );
    }

    #[test]
    fn challenging_a_valid_reveal_fails() {
        let (mut arena, clock) = running_arena();
        arena.commit(&SOLVER, solution_hash(&valid_solution())).unwrap();
        arena.reveal(valid_solution()).unwrap();

        into_test_window(&clock);
        let outcome = arena.take_player_bond(&CHALLENGER);
        assert_eq!(outcome, Err(ArenaError::SolutionIsValid));
        // Submitter unaffected, slot still outstanding.
        assert_eq!(arena.ledger().balance(&SOLVER).locked, U256::from(BOND));
        assert!(arena.current_solution().is_some());
    }

    #[test]
    fn challenging_an_invalid_reveal_slashes() {
        let (mut arena, clock) = running_arena();
        arena
            .commit(&SOLVER, solution_hash(&invalid_solution()))
            .unwrap();
        arena.reveal(invalid_solution()).unwrap();

        into_test_window(&clock);
        arena.take_player_bond(&CHALLENGER).unwrap();
        assert_eq!(
            arena.ledger().balance(&CHALLENGER).available,
            U256::from(BOND)
        );
        assert_eq!(arena.ledger().balance(&SOLVER).locked, U256::ZERO);
        assert!(arena.current_solution().is_none());

        // The race is over for everyone else.
        assert_eq!(
            arena.take_player_bond(&CHALLENGER),
            Err(ArenaError::NoSolutionOwner)
        );
    }

    #[test]
    fn an_unrevealed_commit_is_slashable() {
        let (mut arena, clock) = running_arena();
        arena.commit(&SOLVER, solution_hash(&valid_solution())).unwrap();

        into_test_window(&clock);
        arena.take_player_bond(&CHALLENGER).unwrap();
        assert_eq!(
            arena.ledger().balance(&CHALLENGER).available,
            U256::from(BOND)
        );
    }

    #[test]
    fn challenge_respects_the_window() {
        let (mut arena, clock) = running_arena();
        arena
            .commit(&SOLVER, solution_hash(&invalid_solution()))
            .unwrap();

        // Submission window still open.
        assert_eq!(
            arena.take_player_bond(&CHALLENGER),
            Err(ArenaError::OutsideTestTimeWindow)
        );

        past_test_window(&clock);
        assert_eq!(
            arena.take_player_bond(&CHALLENGER),
            Err(ArenaError::OutsideTestTimeWindow)
        );
    }

    #[test]
    fn award_waits_for_the_test_window() {
        let (mut arena, clock) = running_arena();
        arena.commit(&SOLVER, solution_hash(&valid_solution())).unwrap();
        arena.reveal(valid_solution()).unwrap();

        into_test_window(&clock);
        assert_eq!(
            arena.unlock_bond_award_prize(),
            Err(ArenaError::CompetitionStillRunning)
        );
    }

    #[test]
    fn award_pays_prize_and_unlocks_bond() {
        let (mut arena, clock) = running_arena();
        arena.commit(&SOLVER, solution_hash(&valid_solution())).unwrap();
        arena.reveal(valid_solution()).unwrap();

        past_test_window(&clock);
        arena.unlock_bond_award_prize().unwrap();
        assert_eq!(
            arena.ledger().balance(&SOLVER).available,
            U256::from(BOND + PRIZE)
        );
        assert_eq!(arena.ledger().balance(&SOLVER).locked, U256::ZERO);
        assert!(arena.current_solution().is_none());

        assert_eq!(
            arena.unlock_bond_award_prize(),
            Err(ArenaError::NoSolutionOwner)
        );
    }

    #[test]
    fn admin_ops_require_the_capability() {
        let (mut arena, clock) = running_arena();
        past_test_window(&clock);
        assert_eq!(
            arena.set_required_bond(&SOLVER, U256::ZERO),
            Err(ArenaError::Unauthorized)
        );
        assert_eq!(
            arena.set_durations(&SOLVER, 60, 60),
            Err(ArenaError::Unauthorized)
        );
    }

    #[test]
    fn admin_ops_wait_for_idle() {
        let (mut arena, clock) = running_arena();
        assert_eq!(
            arena.set_required_bond(&ADMIN, U256::ZERO),
            Err(ArenaError::CompetitionStillRunning)
        );

        // A committed-but-unclaimed solution still blocks the next round.
        arena.commit(&SOLVER, solution_hash(&valid_solution())).unwrap();
        past_test_window(&clock);
        let ids = arena.competition().puzzle_ids;
        assert_eq!(
            arena.start_competition(&ADMIN, ids, 0, U256::ZERO),
            Err(ArenaError::UnclaimedPrize)
        );

        arena.unlock_bond_award_prize().unwrap();
        arena.set_required_bond(&ADMIN, U256::from(1u64)).unwrap();
        arena.set_durations(&ADMIN, 120, 30).unwrap();
        assert_eq!(arena.config().comp_duration, 120);
    }

    #[test]
    fn start_competition_checks_minted_ids() {
        let (store, ids) = minted_store();
        let clock = Arc::new(ManualClock::new(10_000));
        let mut arena = Arena::new(
            store,
            MemoryLedger::new(),
            clock,
            ArenaConfig::default(),
            ADMIN,
        );

        let mut bad = ids;
        bad[3] = U256::from(99u64);
        assert_eq!(
            arena.start_competition(&ADMIN, bad, 0, U256::ZERO),
            Err(ArenaError::UnknownPuzzle(U256::from(99u64)))
        );
    }

    #[test]
    fn solution_hash_is_preimage_sensitive() {
        let a = valid_solution();
        let b = invalid_solution();
        assert_eq!(solution_hash(&a), solution_hash(&a));
        assert_ne!(solution_hash(&a), solution_hash(&b));
        assert_ne!(solution_hash(&a), solution_hash(&[]));
    }
}
