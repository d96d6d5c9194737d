//! Admission rules for incident reports.
//!
//! A report must name a registered cover, carry a non-zero stake the
//! token collaborator will actually release, and find no other cycle
//! open for the cover. Every refused report must leave the engine
//! exactly as it found it.

use std::sync::Arc;

use parapet_core::{ActorId, CoverKey, ProofRef, Role, StakeAmount, Timestamp};
use parapet_governance::mock::{FixedArbitration, ManualClock, MockCovers, MockProtocol, MockToken};
use parapet_governance::{
    Collaborators, GovernanceConfig, GovernanceEngine, Outcome, DEFAULT_COOLDOWN_SECS,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

struct Deployment {
    engine: GovernanceEngine,
    token: Arc<MockToken>,
    protocol: Arc<MockProtocol>,
    reporter: ActorId,
}

fn deploy(cover_slugs: &[&str]) -> Deployment {
    let token = Arc::new(MockToken::new());
    let covers = Arc::new(MockCovers::new());
    let protocol = Arc::new(MockProtocol::new());
    let clock = Arc::new(ManualClock::new(
        Timestamp::parse("2026-01-15T09:30:00Z").unwrap(),
    ));

    let reporter = ActorId::new();
    token.mint(&reporter, 100_000);
    for slug in cover_slugs {
        covers.add(CoverKey::from_slug(slug).unwrap());
    }

    let engine = GovernanceEngine::new(
        GovernanceConfig::new(DEFAULT_COOLDOWN_SECS, StakeAmount::new(1), ActorId::new()),
        Collaborators {
            token: token.clone(),
            covers,
            access: protocol.clone(),
            pause: protocol.clone(),
            arbitration: Arc::new(FixedArbitration::new(Outcome::Confirmed)),
            clock,
        },
    );

    Deployment {
        engine,
        token,
        protocol,
        reporter,
    }
}

fn proof(evidence: &[u8]) -> ProofRef {
    ProofRef::from_evidence(evidence)
}

// ---------------------------------------------------------------------------
// One open cycle per cover
// ---------------------------------------------------------------------------

#[test]
fn double_report_is_refused() {
    let mut d = deploy(&["foo-bar"]);
    let cover = CoverKey::from_slug("foo-bar").unwrap();

    d.engine
        .report_incident(d.reporter, cover, proof(b"first"), StakeAmount::new(10_000))
        .unwrap();

    let err = d
        .engine
        .report_incident(d.reporter, cover, proof(b"second"), StakeAmount::new(10_000))
        .unwrap_err();
    assert_eq!(err.to_string(), "Already reporting");

    // Only the first stake went into custody.
    assert_eq!(d.engine.total_locked(), StakeAmount::new(10_000));
    assert_eq!(d.token.balance_of(&d.reporter), 90_000);
}

#[test]
fn independent_covers_hold_independent_cycles() {
    let mut d = deploy(&["foo-bar", "baz"]);
    let foo = CoverKey::from_slug("foo-bar").unwrap();
    let baz = CoverKey::from_slug("baz").unwrap();

    d.engine
        .report_incident(d.reporter, foo, proof(b"a"), StakeAmount::new(10))
        .unwrap();
    // A cycle on one cover never blocks another cover.
    d.engine
        .report_incident(d.reporter, baz, proof(b"b"), StakeAmount::new(10))
        .unwrap();

    assert_eq!(d.engine.total_locked(), StakeAmount::new(20));
}

// ---------------------------------------------------------------------------
// Validation failures leave no trace
// ---------------------------------------------------------------------------

#[test]
fn unknown_cover_is_refused() {
    let mut d = deploy(&["foo-bar"]);
    let ghost = CoverKey::from_slug("ghost").unwrap();

    let err = d
        .engine
        .report_incident(d.reporter, ghost, proof(b"x"), StakeAmount::new(10))
        .unwrap_err();
    assert_eq!(err.to_string(), "Cover does not exist");
    assert_eq!(d.engine.total_locked(), StakeAmount::ZERO);
    assert_eq!(d.token.balance_of(&d.reporter), 100_000);
}

#[test]
fn zero_stake_is_refused() {
    let mut d = deploy(&["foo-bar"]);
    let cover = CoverKey::from_slug("foo-bar").unwrap();

    let err = d
        .engine
        .report_incident(d.reporter, cover, proof(b"x"), StakeAmount::ZERO)
        .unwrap_err();
    assert_eq!(err.to_string(), "Insufficient stake");
    assert!(d.engine.active_report(&cover).is_none());
}

#[test]
fn paused_protocol_refuses_reports() {
    let mut d = deploy(&["foo-bar"]);
    let cover = CoverKey::from_slug("foo-bar").unwrap();

    d.protocol.set_paused(true);
    let err = d
        .engine
        .report_incident(d.reporter, cover, proof(b"x"), StakeAmount::new(10))
        .unwrap_err();
    assert_eq!(err.to_string(), "Protocol is paused");
    assert_eq!(d.token.balance_of(&d.reporter), 100_000);

    d.protocol.set_paused(false);
    d.engine
        .report_incident(d.reporter, cover, proof(b"x"), StakeAmount::new(10))
        .unwrap();
}

#[test]
fn failed_stake_pull_leaves_no_cycle() {
    let mut d = deploy(&["foo-bar"]);
    let cover = CoverKey::from_slug("foo-bar").unwrap();

    d.token.set_fail_pulls(true);
    let err = d
        .engine
        .report_incident(d.reporter, cover, proof(b"x"), StakeAmount::new(10))
        .unwrap_err();
    assert!(err.to_string().starts_with("Transfer failed"));
    assert!(d.engine.active_report(&cover).is_none());
    assert_eq!(d.engine.total_locked(), StakeAmount::ZERO);

    // Resubmitting the identical report is safe and succeeds.
    d.token.set_fail_pulls(false);
    d.engine
        .report_incident(d.reporter, cover, proof(b"x"), StakeAmount::new(10))
        .unwrap();
}

#[test]
fn an_overdrawn_reporter_cannot_stake() {
    let mut d = deploy(&["foo-bar"]);
    let cover = CoverKey::from_slug("foo-bar").unwrap();
    let pauper = ActorId::new();

    let err = d
        .engine
        .report_incident(pauper, cover, proof(b"x"), StakeAmount::new(10))
        .unwrap_err();
    assert!(err.to_string().starts_with("Transfer failed"));
    assert!(d.engine.active_report(&cover).is_none());
}
