//! Resolution gating, records, and the read-only query surface.
//!
//! Queries about unknown cycles answer with `None`, never an error.
//! Resolution is restricted to governance agents, refuses unknown and
//! already-finalized cycles, and a settlement failure leaves the exact
//! same call retryable. Finalized records outlive their cycle and
//! serialize for transport.

use std::sync::Arc;

use parapet_core::{ActorId, CoverKey, IncidentDate, ProofRef, Role, StakeAmount, Timestamp};
use parapet_governance::mock::{FixedArbitration, ManualClock, MockCovers, MockProtocol, MockToken};
use parapet_governance::{
    Collaborators, GovernanceConfig, GovernanceEngine, Outcome, ResolutionRecord,
    DEFAULT_COOLDOWN_SECS,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

struct Deployment {
    engine: GovernanceEngine,
    token: Arc<MockToken>,
    clock: Arc<ManualClock>,
    reporter: ActorId,
    agent: ActorId,
}

fn deploy() -> Deployment {
    let token = Arc::new(MockToken::new());
    let covers = Arc::new(MockCovers::new());
    let protocol = Arc::new(MockProtocol::new());
    let clock = Arc::new(ManualClock::new(
        Timestamp::parse("2026-01-15T09:30:00Z").unwrap(),
    ));

    let reporter = ActorId::new();
    let agent = ActorId::new();
    token.mint(&reporter, 100_000);
    covers.add(CoverKey::from_slug("test").unwrap());
    protocol.grant(Role::GovernanceAgent, &agent);

    let engine = GovernanceEngine::new(
        GovernanceConfig::new(DEFAULT_COOLDOWN_SECS, StakeAmount::new(1), ActorId::new()),
        Collaborators {
            token: token.clone(),
            covers,
            access: protocol.clone(),
            pause: protocol,
            arbitration: Arc::new(FixedArbitration::new(Outcome::Confirmed)),
            clock: clock.clone(),
        },
    );

    Deployment {
        engine,
        token,
        clock,
        reporter,
        agent,
    }
}

fn proof(evidence: &[u8]) -> ProofRef {
    ProofRef::from_evidence(evidence)
}

// ---------------------------------------------------------------------------
// Sentinel queries
// ---------------------------------------------------------------------------

#[test]
fn queries_about_unknown_cycles_answer_none() {
    let d = deploy();
    let cover = CoverKey::from_slug("test").unwrap();
    let never = CoverKey::from_slug("never-reported").unwrap();
    let date = IncidentDate::parse("2026-01-15").unwrap();

    // No prior report: every query is a clean miss, not an error.
    assert!(d.engine.resolution_at(&cover, date).is_none());
    assert!(d.engine.resolution_at(&never, date).is_none());
    assert!(d.engine.report_at(&cover, date).is_none());
    assert!(d.engine.dispute_at(&cover, date).is_none());
    assert!(d.engine.active_report(&cover).is_none());
}

#[test]
fn resolution_appears_only_after_finalization() {
    let mut d = deploy();
    let cover = CoverKey::from_slug("test").unwrap();

    let date = d
        .engine
        .report_incident(d.reporter, cover, proof(b"claim"), StakeAmount::new(5))
        .unwrap();
    assert!(d.engine.resolution_at(&cover, date).is_none());

    d.clock.advance_secs(DEFAULT_COOLDOWN_SECS as i64);
    d.engine.resolve_incident(d.agent, cover, date).unwrap();

    let record = d.engine.resolution_at(&cover, date).unwrap();
    assert_eq!(record.outcome, Outcome::Confirmed);
    assert_eq!(record.incident_date, date);
}

// ---------------------------------------------------------------------------
// Gates on resolution
// ---------------------------------------------------------------------------

#[test]
fn resolution_is_agent_only() {
    let mut d = deploy();
    let cover = CoverKey::from_slug("test").unwrap();

    let date = d
        .engine
        .report_incident(d.reporter, cover, proof(b"claim"), StakeAmount::new(5))
        .unwrap();
    d.clock.advance_secs(DEFAULT_COOLDOWN_SECS as i64);

    let outsider = ActorId::new();
    let err = d.engine.resolve_incident(outsider, cover, date).unwrap_err();
    assert_eq!(err.to_string(), "Access is denied");
    assert!(d.engine.resolution_at(&cover, date).is_none());

    d.engine.resolve_incident(d.agent, cover, date).unwrap();
}

#[test]
fn resolving_nothing_is_refused() {
    let mut d = deploy();
    let cover = CoverKey::from_slug("test").unwrap();
    let date = IncidentDate::parse("2026-01-15").unwrap();

    let err = d.engine.resolve_incident(d.agent, cover, date).unwrap_err();
    assert_eq!(err.to_string(), "No active cycle");
}

#[test]
fn a_finalized_cycle_stays_finalized() {
    let mut d = deploy();
    let cover = CoverKey::from_slug("test").unwrap();

    let date = d
        .engine
        .report_incident(d.reporter, cover, proof(b"claim"), StakeAmount::new(5))
        .unwrap();
    d.clock.advance_secs(DEFAULT_COOLDOWN_SECS as i64);
    let first = d.engine.resolve_incident(d.agent, cover, date).unwrap();

    let err = d.engine.resolve_incident(d.agent, cover, date).unwrap_err();
    assert_eq!(err.to_string(), "Already resolved");

    // The stored record is untouched by the refused second attempt.
    assert_eq!(d.engine.resolution_at(&cover, date), Some(&first));
}

// ---------------------------------------------------------------------------
// Settlement failure and retry
// ---------------------------------------------------------------------------

#[test]
fn failed_settlement_is_retryable_in_place() {
    let mut d = deploy();
    let cover = CoverKey::from_slug("test").unwrap();

    let date = d
        .engine
        .report_incident(d.reporter, cover, proof(b"claim"), StakeAmount::new(300))
        .unwrap();
    d.clock.advance_secs(DEFAULT_COOLDOWN_SECS as i64);

    d.token.set_fail_pushes(true);
    let err = d.engine.resolve_incident(d.agent, cover, date).unwrap_err();
    assert!(err.to_string().starts_with("Settlement failed"));

    // Custody and cycle state are exactly as before the attempt.
    assert_eq!(d.engine.total_locked(), StakeAmount::new(300));
    assert!(d.engine.active_report(&cover).is_some());
    assert!(d.engine.resolution_at(&cover, date).is_none());

    d.token.set_fail_pushes(false);
    let record = d.engine.resolve_incident(d.agent, cover, date).unwrap();
    assert_eq!(record.total_stake_settled, StakeAmount::new(300));
    assert_eq!(d.token.balance_of(&d.reporter), 100_000);
}

// ---------------------------------------------------------------------------
// Records in transport
// ---------------------------------------------------------------------------

#[test]
fn resolution_records_serialize_for_transport() {
    let mut d = deploy();
    let cover = CoverKey::from_slug("test").unwrap();

    let date = d
        .engine
        .report_incident(d.reporter, cover, proof(b"claim"), StakeAmount::new(7))
        .unwrap();
    d.clock.advance_secs(DEFAULT_COOLDOWN_SECS as i64);
    let record = d.engine.resolve_incident(d.agent, cover, date).unwrap();

    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(json["outcome"], "CONFIRMED");
    assert_eq!(json["incident_date"], "2026-01-15T00:00:00Z");
    assert_eq!(json["total_stake_settled"], 7);

    let parsed: ResolutionRecord = serde_json::from_value(json).unwrap();
    assert_eq!(parsed, record);
}
