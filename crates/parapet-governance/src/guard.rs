//! # Protocol Guard
//!
//! The single place authorization meets the lifecycle code. Every
//! mutating operation leads with the pause check; resolution adds a
//! role check. Both answers come from external collaborators — the
//! guard owns no policy, it only phrases the checks as `Result`s so
//! operations can lead with `?` and stay free of authorization logic.

use std::sync::Arc;

use parapet_core::{ActorId, Role};

use crate::error::GovernanceError;
use crate::traits::{AccessControl, PauseSwitch};

/// Pause and role preconditions shared by every engine operation.
#[derive(Clone)]
pub struct ProtocolGuard {
    pause: Arc<dyn PauseSwitch>,
    access: Arc<dyn AccessControl>,
}

impl ProtocolGuard {
    /// Build a guard over the injected pause and access collaborators.
    pub fn new(pause: Arc<dyn PauseSwitch>, access: Arc<dyn AccessControl>) -> Self {
        Self { pause, access }
    }

    /// Refuse with `ProtocolPaused` while the pause flag is set.
    pub fn require_not_paused(&self) -> Result<(), GovernanceError> {
        if self.pause.is_paused() {
            return Err(GovernanceError::ProtocolPaused);
        }
        Ok(())
    }

    /// Refuse with `Unauthorized` unless `actor` holds `role`.
    pub fn require_role(&self, role: Role, actor: &ActorId) -> Result<(), GovernanceError> {
        if !self.access.has_role(role, actor) {
            return Err(GovernanceError::Unauthorized);
        }
        Ok(())
    }
}

impl std::fmt::Debug for ProtocolGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProtocolGuard").finish_non_exhaustive()
    }
}
