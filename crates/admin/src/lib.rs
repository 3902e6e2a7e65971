//! Tavola Admin - Privileged catalog-management workflows.
//!
//! Everything here runs on behalf of an identity resolved by the external
//! identity provider. The [`authz::AuthorizationGate`] re-checks the
//! caller's role at every workflow entry point; nothing is cached between
//! entries, since the role can change between page loads.
//!
//! # Modules
//!
//! - [`authz`] - Identity handle, profile lookup seam and the admin gate
//! - [`workflow`] - [`workflow::CatalogAdminWorkflow`] with the
//!   delete-confirmation state machine and list reconciliation
//! - [`notify`] - Fire-and-forget notification surface (toasts)

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod authz;
pub mod notify;
pub mod workflow;

pub use authz::{
    AdminCapability, AuthorizationGate, AuthzError, Identity, Profile, ProfileError, ProfileStore,
    RedirectTarget, StaticProfiles,
};
pub use notify::{Notifier, TracingNotifier};
pub use workflow::{
    CatalogAdminWorkflow, DashboardStats, DeleteConfirmation, DeleteOutcome, WorkflowError,
};
