//! Authorization for privileged catalog operations.
//!
//! The identity provider owns the whole identity lifecycle; this module only
//! reads it. A workflow entry point passes the resolved [`Identity`] handle
//! (or none) to [`AuthorizationGate::require_admin`], which looks the
//! profile up fresh and either returns a short-lived [`AdminCapability`] or
//! says why not.

use std::collections::HashMap;
use std::future::Future;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use tavola_core::Role;

/// Handle to an authenticated identity, as resolved by the external
/// identity provider for the current request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Provider-assigned user identifier.
    pub user_id: String,
}

impl Identity {
    /// Convenience constructor.
    #[must_use]
    pub fn new(user_id: &str) -> Self {
        Self {
            user_id: user_id.to_owned(),
        }
    }
}

/// Profile document held by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub role: Role,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Error from the profile lookup itself (as opposed to its outcome).
#[derive(Debug, Clone, Error)]
pub enum ProfileError {
    #[error("identity provider unavailable: {0}")]
    Unavailable(String),
}

/// Profile lookup against the external identity store.
pub trait ProfileStore {
    /// Fetch the profile document for `user_id`, or `None` if the provider
    /// has no record of them.
    fn fetch_profile(
        &self,
        user_id: &str,
    ) -> impl Future<Output = Result<Option<Profile>, ProfileError>> + Send;
}

/// In-memory profile directory.
///
/// Stands in for a remote identity store in tests and local wiring; real
/// deployments implement [`ProfileStore`] against their provider.
#[derive(Debug, Clone, Default)]
pub struct StaticProfiles {
    profiles: HashMap<String, Profile>,
}

impl StaticProfiles {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a profile under `user_id`.
    #[must_use]
    pub fn with_profile(mut self, user_id: &str, role: Role) -> Self {
        self.profiles.insert(
            user_id.to_owned(),
            Profile {
                role,
                name: None,
                email: None,
            },
        );
        self
    }
}

impl ProfileStore for StaticProfiles {
    async fn fetch_profile(&self, user_id: &str) -> Result<Option<Profile>, ProfileError> {
        Ok(self.profiles.get(user_id).cloned())
    }
}

/// Where the caller should send the user after a failed check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectTarget {
    /// Sign-in page: there is no authenticated identity.
    Login,
    /// Storefront home: authenticated but not privileged.
    Home,
}

/// Why a privilege check failed.
#[derive(Debug, Error)]
pub enum AuthzError {
    /// No authenticated identity.
    #[error("not authenticated")]
    Unauthenticated,

    /// Authenticated, but the profile is missing or the role is not admin.
    #[error("admin privileges required")]
    Forbidden,

    /// The profile lookup itself failed.
    #[error(transparent)]
    Provider(#[from] ProfileError),
}

impl AuthzError {
    /// Navigation intent for the caller; the core never navigates itself.
    #[must_use]
    pub const fn redirect_target(&self) -> RedirectTarget {
        match self {
            Self::Unauthenticated => RedirectTarget::Login,
            Self::Forbidden | Self::Provider(_) => RedirectTarget::Home,
        }
    }

    /// Human-readable message distinguishing "sign in" from "not allowed".
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::Unauthenticated => "Please login first",
            Self::Forbidden => "Access denied. Admin privileges required.",
            Self::Provider(_) => "Error verifying admin status",
        }
    }
}

/// Proof that the current caller may perform catalog-mutating operations.
///
/// Valid for the duration of one workflow invocation: the type is neither
/// `Clone` nor `Copy` and can only be produced by the gate, so a stale
/// check cannot be reused across entry points.
#[derive(Debug)]
pub struct AdminCapability {
    _guard: (),
}

/// Decides whether the calling identity may mutate the catalog.
#[derive(Debug, Clone)]
pub struct AuthorizationGate<P> {
    profiles: P,
}

impl<P: ProfileStore> AuthorizationGate<P> {
    /// Create a gate over the given profile store.
    #[must_use]
    pub const fn new(profiles: P) -> Self {
        Self { profiles }
    }

    /// Check the caller's privilege, freshly, against the identity store.
    ///
    /// # Errors
    ///
    /// - `Unauthenticated` when no identity is present.
    /// - `Forbidden` when the profile is missing or the role is not admin.
    /// - `Provider` when the lookup itself fails.
    pub async fn require_admin(
        &self,
        identity: Option<&Identity>,
    ) -> Result<AdminCapability, AuthzError> {
        let identity = identity.ok_or(AuthzError::Unauthenticated)?;

        let profile = self.profiles.fetch_profile(&identity.user_id).await?;

        match profile {
            Some(profile) if profile.role.is_admin() => {
                tracing::debug!(user_id = %identity.user_id, "admin access granted");
                Ok(AdminCapability { _guard: () })
            }
            Some(profile) => {
                tracing::warn!(
                    user_id = %identity.user_id,
                    role = %profile.role,
                    "admin access denied"
                );
                Err(AuthzError::Forbidden)
            }
            None => {
                tracing::warn!(user_id = %identity.user_id, "no profile for identity");
                Err(AuthzError::Forbidden)
            }
        }
    }
}
