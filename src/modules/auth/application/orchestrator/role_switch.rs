use std::sync::Arc;

use tracing::info;

use crate::auth::application::domain::entities::{AuthUser, UserId, UserRole};
use crate::auth::application::use_cases::switch_role::{ISwitchRoleUseCase, SwitchRoleError};
use crate::profile::application::services::user_profile_context::{
    UserProfileContext, UserProfiles,
};

// ============================================================================
// Role Switch Output
// ============================================================================
#[derive(Debug, Clone, PartialEq)]
pub struct RoleSwitchOutput {
    pub user: AuthUser,
    pub profiles: UserProfiles,
}

// ============================================================================
// Role Switch Errors
// ============================================================================

#[derive(Debug, thiserror::Error, Clone, PartialEq)]
pub enum RoleSwitchError {
    #[error("{0}")]
    SwitchFailed(#[from] SwitchRoleError),
}

// ============================================================================
// Role Switch Orchestrator
// ============================================================================

/// Changes the user's role, then refreshes the cached profiles so the
/// avatar matches the new role.
#[derive(Clone)]
pub struct RoleSwitchOrchestrator {
    switch_role_use_case: Arc<dyn ISwitchRoleUseCase>,
    profiles: UserProfileContext,
}

impl RoleSwitchOrchestrator {
    pub fn new(
        switch_role_use_case: Arc<dyn ISwitchRoleUseCase>,
        profiles: UserProfileContext,
    ) -> Self {
        Self {
            switch_role_use_case,
            profiles,
        }
    }

    pub async fn switch_role(
        &self,
        user_id: UserId,
        role: UserRole,
    ) -> Result<RoleSwitchOutput, RoleSwitchError> {
        let user = self.switch_role_use_case.execute(user_id, role).await?;

        // Backend may omit the role; fall back to the requested one.
        let effective = user.role.unwrap_or(role);
        let profiles = self.profiles.reload(user_id, Some(effective)).await;

        info!(user_id = %user_id, role = %effective, "Profiles refreshed after role switch");
        Ok(RoleSwitchOutput { user, profiles })
    }
}
