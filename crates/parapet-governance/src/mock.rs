//! # In-Memory Collaborators
//!
//! Deterministic collaborator doubles: balances in a map, covers in a
//! set, pause and roles behind setters, a clock that only moves when
//! told to. The crate's own suites drive every engine precondition from
//! these, and embedding hosts can reuse them for their tests.
//!
//! All doubles use interior mutability so they satisfy the `&self`
//! collaborator traits while tests hold shared handles to them.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};

use parking_lot::Mutex;

use parapet_core::{ActorId, CoverKey, IncidentDate, Role, StakeAmount, Timestamp};

use crate::resolution::Outcome;
use crate::traits::{
    AccessControl, Arbitration, Clock, CoverRegistry, PauseSwitch, TokenTransfer, TransferError,
};

// ── Token custody ───────────────────────────────────────────────────────────

#[derive(Debug, Default)]
struct TokenState {
    balances: HashMap<ActorId, u128>,
    custody: u128,
    fail_pulls: bool,
    fail_pushes: bool,
}

/// Token double: a balance map, a custody counter, and failure switches
/// for exercising transfer/settlement error paths.
#[derive(Debug, Default)]
pub struct MockToken {
    state: Mutex<TokenState>,
}

impl MockToken {
    /// Empty token ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit `amount` to `account`.
    pub fn mint(&self, account: &ActorId, amount: u128) {
        let mut state = self.state.lock();
        *state.balances.entry(*account).or_insert(0) += amount;
    }

    /// Current balance of `account`.
    pub fn balance_of(&self, account: &ActorId) -> u128 {
        self.state.lock().balances.get(account).copied().unwrap_or(0)
    }

    /// Value currently held in engine custody.
    pub fn custody(&self) -> u128 {
        self.state.lock().custody
    }

    /// Make subsequent pulls fail (or succeed again).
    pub fn set_fail_pulls(&self, fail: bool) {
        self.state.lock().fail_pulls = fail;
    }

    /// Make subsequent pushes fail (or succeed again).
    pub fn set_fail_pushes(&self, fail: bool) {
        self.state.lock().fail_pushes = fail;
    }
}

impl TokenTransfer for MockToken {
    fn pull(&self, from: &ActorId, amount: StakeAmount) -> Result<(), TransferError> {
        let mut state = self.state.lock();
        if state.fail_pulls {
            return Err(TransferError("pulls disabled".to_string()));
        }
        let balance = state.balances.entry(*from).or_insert(0);
        if *balance < amount.raw() {
            return Err(TransferError(format!(
                "balance {balance} below requested {amount}"
            )));
        }
        *balance -= amount.raw();
        state.custody += amount.raw();
        Ok(())
    }

    fn push(&self, to: &ActorId, amount: StakeAmount) -> Result<(), TransferError> {
        let mut state = self.state.lock();
        if state.fail_pushes {
            return Err(TransferError("pushes disabled".to_string()));
        }
        if state.custody < amount.raw() {
            return Err(TransferError(format!(
                "custody {} below requested {amount}",
                state.custody
            )));
        }
        state.custody -= amount.raw();
        *state.balances.entry(*to).or_insert(0) += amount.raw();
        Ok(())
    }
}

// ── Cover registry ──────────────────────────────────────────────────────────

/// Cover registry double: a set of known keys.
#[derive(Debug, Default)]
pub struct MockCovers {
    known: Mutex<HashSet<CoverKey>>,
}

impl MockCovers {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a cover key.
    pub fn add(&self, cover_key: CoverKey) {
        self.known.lock().insert(cover_key);
    }

    /// Delist a cover key.
    pub fn remove(&self, cover_key: &CoverKey) {
        self.known.lock().remove(cover_key);
    }
}

impl CoverRegistry for MockCovers {
    fn exists(&self, cover_key: &CoverKey) -> bool {
        self.known.lock().contains(cover_key)
    }
}

// ── Pause flag and roles ────────────────────────────────────────────────────

/// Protocol control double: one pause flag plus a role grant table.
/// Implements both `PauseSwitch` and `AccessControl`, mirroring hosts
/// where a single protocol contract serves both.
#[derive(Debug, Default)]
pub struct MockProtocol {
    paused: AtomicBool,
    grants: Mutex<HashSet<(Role, ActorId)>>,
}

impl MockProtocol {
    /// Unpaused, no grants.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set or clear the pause flag.
    pub fn set_paused(&self, paused: bool) {
        self.paused.store(paused, Ordering::SeqCst);
    }

    /// Grant `role` to `actor`.
    pub fn grant(&self, role: Role, actor: &ActorId) {
        self.grants.lock().insert((role, *actor));
    }

    /// Revoke `role` from `actor`.
    pub fn revoke(&self, role: Role, actor: &ActorId) {
        self.grants.lock().remove(&(role, *actor));
    }
}

impl PauseSwitch for MockProtocol {
    fn is_paused(&self) -> bool {
        self.paused.load(Ordering::SeqCst)
    }
}

impl AccessControl for MockProtocol {
    fn has_role(&self, role: Role, actor: &ActorId) -> bool {
        self.grants.lock().contains(&(role, *actor))
    }
}

// ── Arbitration ─────────────────────────────────────────────────────────────

/// Arbitration double that returns a preset verdict and counts how many
/// times it was consulted.
#[derive(Debug)]
pub struct FixedArbitration {
    verdict: Mutex<Outcome>,
    consultations: AtomicI64,
}

impl FixedArbitration {
    /// Always answer `verdict`.
    pub fn new(verdict: Outcome) -> Self {
        Self {
            verdict: Mutex::new(verdict),
            consultations: AtomicI64::new(0),
        }
    }

    /// Change the preset verdict.
    pub fn set_verdict(&self, verdict: Outcome) {
        *self.verdict.lock() = verdict;
    }

    /// How many times `decide` has been called.
    pub fn consultations(&self) -> i64 {
        self.consultations.load(Ordering::SeqCst)
    }
}

impl Arbitration for FixedArbitration {
    fn decide(&self, _cover_key: &CoverKey, _incident_date: IncidentDate) -> Outcome {
        self.consultations.fetch_add(1, Ordering::SeqCst);
        *self.verdict.lock()
    }
}

// ── Clock ───────────────────────────────────────────────────────────────────

/// Clock double holding an explicit instant; time moves only when a
/// test advances it.
#[derive(Debug)]
pub struct ManualClock {
    epoch_secs: AtomicI64,
}

impl ManualClock {
    /// Start the clock at `start`.
    pub fn new(start: Timestamp) -> Self {
        Self {
            epoch_secs: AtomicI64::new(start.epoch_secs()),
        }
    }

    /// Jump to an explicit instant.
    pub fn set(&self, now: Timestamp) {
        self.epoch_secs.store(now.epoch_secs(), Ordering::SeqCst);
    }

    /// Advance the clock by `secs` seconds.
    pub fn advance_secs(&self, secs: i64) {
        self.epoch_secs.fetch_add(secs, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        // The stored value always came from a valid Timestamp plus
        // small test increments, so re-wrapping cannot fail in practice;
        // fall back to the epoch rather than panic if it somehow does.
        Timestamp::from_epoch_secs(self.epoch_secs.load(Ordering::SeqCst))
            .unwrap_or_else(|_| Timestamp::from_utc(chrono::DateTime::UNIX_EPOCH))
    }
}
