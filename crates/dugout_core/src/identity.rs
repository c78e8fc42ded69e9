//! Identity provider boundary.
//!
//! # Responsibility
//! - Define the capability that answers "who is the current user".
//! - Provide a fixed-identity implementation for hosts that resolve sign-in
//!   outside core (and for tests).
//!
//! # Invariants
//! - Core never reads ambient/global sign-in state; the provider is passed in
//!   explicitly.
//! - `None` means unauthenticated and is a precondition failure for callers.

use crate::model::career::UserId;

/// Source of the currently signed-in user.
pub trait IdentityProvider {
    /// Returns the signed-in user id, or `None` when unauthenticated.
    fn current_user_id(&self) -> Option<UserId>;
}

impl<T: IdentityProvider + ?Sized> IdentityProvider for &T {
    fn current_user_id(&self) -> Option<UserId> {
        (**self).current_user_id()
    }
}

/// Identity resolved once by the host and handed to core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FixedIdentity {
    user_id: Option<UserId>,
}

impl FixedIdentity {
    pub fn signed_in(user_id: UserId) -> Self {
        Self {
            user_id: Some(user_id),
        }
    }

    pub fn signed_out() -> Self {
        Self { user_id: None }
    }
}

impl IdentityProvider for FixedIdentity {
    fn current_user_id(&self) -> Option<UserId> {
        self.user_id
    }
}

#[cfg(test)]
mod tests {
    use super::{FixedIdentity, IdentityProvider};
    use crate::model::career::UserId;
    use uuid::Uuid;

    #[test]
    fn fixed_identity_reports_its_state() {
        let id = Uuid::new_v4();
        assert_eq!(FixedIdentity::signed_in(id).current_user_id(), Some(id));
        assert_eq!(FixedIdentity::signed_out().current_user_id(), None);
        assert_eq!(FixedIdentity::default().current_user_id(), None);
    }

    fn lookup<P: IdentityProvider>(provider: P) -> Option<UserId> {
        provider.current_user_id()
    }

    #[test]
    fn references_forward_to_the_provider() {
        let id = Uuid::new_v4();
        let identity = FixedIdentity::signed_in(id);
        assert_eq!(lookup(&identity), Some(id));
    }
}
