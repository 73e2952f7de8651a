use std::sync::{Arc, RwLock};

use tracing::{info, warn};

use crate::auth::application::domain::entities::{UserId, UserRole};
use crate::profile::application::domain::entities::{ProfileKind, ProfileLookup, ProfileRecord};
use crate::profile::application::ports::outgoing::profile_api::{ProfileApi, ProfileApiError};

/// Both profiles of the signed-in user plus the avatar for the current role.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserProfiles {
    pub customer: Option<ProfileRecord>,
    pub vendor: Option<ProfileRecord>,
    pub active_image: Option<String>,
}

/// Shared, read-mostly profile cache consumed by several views.
#[derive(Clone)]
pub struct UserProfileContext {
    api: Arc<dyn ProfileApi>,
    state: Arc<RwLock<UserProfiles>>,
}

impl UserProfileContext {
    pub fn new(api: Arc<dyn ProfileApi>) -> Self {
        Self {
            api,
            state: Arc::new(RwLock::new(UserProfiles::default())),
        }
    }

    fn existing(
        kind: ProfileKind,
        result: Result<ProfileLookup, ProfileApiError>,
    ) -> Option<ProfileRecord> {
        match result {
            Ok(lookup) => lookup.existing().cloned(),
            Err(e) => {
                warn!(kind = %kind, error = %e, "Profile reload failed");
                None
            }
        }
    }

    /// Fetch both profiles concurrently and pick the avatar for `role`.
    /// A failed fetch leaves that profile empty.
    pub async fn reload(&self, user_id: UserId, role: Option<UserRole>) -> UserProfiles {
        let (customer, vendor) = futures::join!(
            self.api.fetch(ProfileKind::Customer, user_id),
            self.api.fetch(ProfileKind::Vendor, user_id),
        );

        let customer = Self::existing(ProfileKind::Customer, customer);
        let vendor = Self::existing(ProfileKind::Vendor, vendor);

        let active = match role {
            Some(UserRole::Vendor) => vendor.as_ref(),
            _ => customer.as_ref(),
        };
        let active_image = active
            .and_then(|p| p.profile_image.clone())
            .filter(|url| !url.trim().is_empty());

        let profiles = UserProfiles {
            customer,
            vendor,
            active_image,
        };

        info!(
            user_id = %user_id,
            has_customer = profiles.customer.is_some(),
            has_vendor = profiles.vendor.is_some(),
            "User profiles reloaded"
        );

        *self
            .state
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = profiles.clone();
        profiles
    }

    pub fn snapshot(&self) -> UserProfiles {
        self.state
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn active_image(&self) -> Option<String> {
        self.snapshot().active_image
    }

    /// Forget everything, e.g. after sign-out.
    pub fn clear(&self) {
        *self
            .state
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = UserProfiles::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::support::fixtures::{customer_lookup, vendor_lookup};
    use crate::tests::support::stubs::StubProfileApi;

    #[tokio::test]
    async fn test_vendor_role_uses_vendor_image() {
        let api = StubProfileApi::new()
            .with_lookup(ProfileKind::Customer, customer_lookup())
            .with_lookup(ProfileKind::Vendor, vendor_lookup());
        let ctx = UserProfileContext::new(Arc::new(api));

        let profiles = ctx.reload(UserId::from(21), Some(UserRole::Vendor)).await;

        assert_eq!(profiles.active_image.as_deref(), Some("https://cdn.example.com/vendors/12/logo.png"));
        assert_eq!(ctx.snapshot(), profiles);
    }

    #[tokio::test]
    async fn test_customer_role_uses_customer_image() {
        let api = StubProfileApi::new()
            .with_lookup(ProfileKind::Customer, customer_lookup())
            .with_lookup(ProfileKind::Vendor, vendor_lookup());
        let ctx = UserProfileContext::new(Arc::new(api));

        ctx.reload(UserId::from(21), Some(UserRole::Customer)).await;

        assert_eq!(
            ctx.active_image().as_deref(),
            Some("https://cdn.example.com/customers/21/avatar.jpg")
        );
    }

    #[tokio::test]
    async fn test_failed_fetch_leaves_profile_empty() {
        let api = StubProfileApi::new()
            .with_lookup(ProfileKind::Vendor, vendor_lookup())
            .failing(ProfileKind::Customer);
        let ctx = UserProfileContext::new(Arc::new(api));

        let profiles = ctx.reload(UserId::from(21), None).await;

        assert!(profiles.customer.is_none());
        assert!(profiles.vendor.is_some());
        assert_eq!(profiles.active_image, None);
    }

    #[tokio::test]
    async fn test_clear_forgets_profiles() {
        let api = StubProfileApi::new().with_lookup(ProfileKind::Vendor, vendor_lookup());
        let ctx = UserProfileContext::new(Arc::new(api));
        ctx.reload(UserId::from(21), Some(UserRole::Vendor)).await;

        ctx.clear();

        assert_eq!(ctx.snapshot(), UserProfiles::default());
    }
}
