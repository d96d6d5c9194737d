//! # Actor Identity and Roles
//!
//! Newtype wrapper for the accounts that interact with the governance
//! engine — reporters, disputers, resolvers, and the forfeiture sink —
//! plus the role taxonomy used by access control. You cannot pass a
//! `CoverKey` where an `ActorId` is expected, and vice versa.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a protocol participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ActorId(Uuid);

impl ActorId {
    /// Generate a new random actor identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID as an actor identifier.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// The all-zero actor, used as a placeholder before a composition
    /// root assigns a real account (e.g. the default forfeiture sink).
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    /// Access the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ActorId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ActorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "actor:{}", self.0)
    }
}

/// Protocol roles recognized by access control.
///
/// The engine itself checks only `GovernanceAgent` (resolution);
/// `GovernanceAdmin` is carried for hosts that gate configuration
/// changes on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// May change protocol configuration.
    GovernanceAdmin,
    /// May resolve reported incidents.
    GovernanceAgent,
}

impl Role {
    /// Stable string form, matching the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::GovernanceAdmin => "GOVERNANCE_ADMIN",
            Role::GovernanceAgent => "GOVERNANCE_AGENT",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
