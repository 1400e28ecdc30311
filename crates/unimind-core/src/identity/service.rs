//! Identity service used to restore the signed-in user.

use super::model::{AuthSession, UserProfile};
use crate::error::{Result, UnimindError};

/// Operations the core consumes from the identity/profile backend.
///
/// Authentication itself and profile editing belong to the backend; the
/// core only reads the current session and profile.
#[async_trait::async_trait]
pub trait IdentityService: Send + Sync {
    /// Returns the current session, or `None` when nobody is signed in.
    async fn current_session(&self) -> Result<Option<AuthSession>>;

    /// Fetches the profile for a user. A missing profile is `Ok(None)`.
    async fn get_profile(&self, user_id: &str) -> Result<Option<UserProfile>>;

    /// Updates profile fields on the backend.
    async fn update_profile(&self, profile: &UserProfile) -> Result<()>;
}

pub const GUEST_USER_ID: &str = "guest";

/// Single-user implementation that always reports a guest session.
///
/// Suitable for the terminal front end and development; it has no backend
/// and therefore refuses profile updates.
///
/// # Example
///
/// ```
/// use unimind_core::identity::{GuestIdentityService, UserProfile};
///
/// let service = GuestIdentityService::default();
/// assert_eq!(service.profile().full_name, "Guest Student");
/// ```
#[derive(Debug, Clone)]
pub struct GuestIdentityService {
    profile: UserProfile,
}

impl Default for GuestIdentityService {
    fn default() -> Self {
        Self {
            profile: UserProfile {
                id: GUEST_USER_ID.to_string(),
                full_name: "Guest Student".to_string(),
                email: String::new(),
                university: String::new(),
                degree: String::new(),
                semester: String::new(),
            },
        }
    }
}

impl GuestIdentityService {
    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }
}

#[async_trait::async_trait]
impl IdentityService for GuestIdentityService {
    async fn current_session(&self) -> Result<Option<AuthSession>> {
        Ok(Some(AuthSession {
            user_id: self.profile.id.clone(),
            email: self.profile.email.clone(),
        }))
    }

    async fn get_profile(&self, user_id: &str) -> Result<Option<UserProfile>> {
        Ok((user_id == self.profile.id).then(|| self.profile.clone()))
    }

    async fn update_profile(&self, _profile: &UserProfile) -> Result<()> {
        Err(UnimindError::Security(
            "Guest profiles cannot be updated".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_guest_session_resolves_profile() {
        let service = GuestIdentityService::default();
        let session = service.current_session().await.unwrap().unwrap();
        let profile = service.get_profile(&session.user_id).await.unwrap();
        assert_eq!(profile.unwrap().id, GUEST_USER_ID);
        assert!(service.get_profile("someone-else").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_guest_profile_update_is_rejected() {
        let service = GuestIdentityService::default();
        let err = service
            .update_profile(service.profile())
            .await
            .unwrap_err();
        assert!(matches!(err, UnimindError::Security(_)));
    }
}
