//! Catalog administration workflows.
//!
//! [`CatalogAdminWorkflow`] orchestrates the privileged flows behind the
//! admin screens: dashboard stats, the manage-foods list, add-food
//! submission and delete-with-confirmation. Every entry point re-checks the
//! caller's privilege through the gate before touching the store.
//!
//! Deletion goes through an explicit confirmation state machine:
//!
//! ```text
//! Idle -> PendingConfirmation(id) -> Executing(id) -> Idle
//!                 |                                    ^
//!                 +---------- cancel ------------------+
//! ```
//!
//! No store mutation happens before the confirm transition fires, and the
//! machine returns to `Idle` on every outcome, including store failures.

use sqlx::SqlitePool;
use thiserror::Error;

use tavola_catalog::{CatalogError, Food, FoodRepository, InvalidFields, NewFood, validation};
use tavola_core::FoodId;

use crate::authz::{AuthorizationGate, AuthzError, Identity, ProfileStore, RedirectTarget};
use crate::notify::Notifier;

/// Errors surfaced by admin workflows.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// The caller may not perform the operation.
    #[error(transparent)]
    Authz(#[from] AuthzError),

    /// Input failed field validation before reaching the store.
    #[error("{0}")]
    Validation(InvalidFields),

    /// Confirm was requested with nothing awaiting confirmation.
    #[error("no deletion is awaiting confirmation")]
    NoPendingDeletion,

    /// The catalog store failed.
    #[error(transparent)]
    Catalog(CatalogError),
}

impl From<CatalogError> for WorkflowError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Validation(invalid) => Self::Validation(invalid),
            other => Self::Catalog(other),
        }
    }
}

impl WorkflowError {
    /// Navigation intent, present only for authorization failures.
    #[must_use]
    pub const fn redirect_target(&self) -> Option<RedirectTarget> {
        match self {
            Self::Authz(err) => Some(err.redirect_target()),
            _ => None,
        }
    }
}

/// Delete-confirmation state. Only one deletion may be pending or executing
/// at a time per workflow instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeleteConfirmation {
    #[default]
    Idle,
    PendingConfirmation(FoodId),
    Executing(FoodId),
}

/// Outcome of a confirmed deletion. Both leave the machine idle with the
/// list refreshed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The food existed and was removed.
    Deleted,
    /// The food was already gone; reported, not fatal.
    AlreadyGone,
}

/// Catalog stats for the dashboard view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardStats {
    pub total_foods: u64,
}

/// Orchestrates privileged catalog operations with UI-facing list
/// reconciliation.
pub struct CatalogAdminWorkflow<'a, P, N> {
    gate: AuthorizationGate<P>,
    pool: &'a SqlitePool,
    notifier: N,
    foods: Vec<Food>,
    delete_state: DeleteConfirmation,
}

impl<'a, P, N> CatalogAdminWorkflow<'a, P, N>
where
    P: ProfileStore,
    N: Notifier,
{
    /// Create a workflow over the catalog pool and profile store.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool, profiles: P, notifier: N) -> Self {
        Self {
            gate: AuthorizationGate::new(profiles),
            pool,
            notifier,
            foods: Vec::new(),
            delete_state: DeleteConfirmation::Idle,
        }
    }

    /// The list as currently presented to the admin UI.
    #[must_use]
    pub fn foods(&self) -> &[Food] {
        &self.foods
    }

    /// Current delete-confirmation state.
    #[must_use]
    pub const fn delete_state(&self) -> DeleteConfirmation {
        self.delete_state
    }

    /// Load dashboard stats.
    ///
    /// # Errors
    ///
    /// Authorization failures short-circuit before any store access.
    pub async fn load_dashboard(
        &self,
        identity: Option<&Identity>,
    ) -> Result<DashboardStats, WorkflowError> {
        self.check_admin(identity).await?;

        let total_foods = FoodRepository::new(self.pool).count().await?;
        Ok(DashboardStats { total_foods })
    }

    /// Load the manage-foods view.
    ///
    /// # Errors
    ///
    /// Authorization failures short-circuit before any store access and
    /// carry a redirect intent; no catalog data is emitted in that case.
    pub async fn load_manage_view(
        &mut self,
        identity: Option<&Identity>,
    ) -> Result<&[Food], WorkflowError> {
        self.check_admin(identity).await?;

        self.refresh_list().await?;
        Ok(&self.foods)
    }

    /// Validate and submit a new food.
    ///
    /// Field validation runs before the store call so the caller receives
    /// one coherent error; the input is taken by reference, so rejected form
    /// data stays with the caller.
    ///
    /// # Errors
    ///
    /// `Validation` with the violated field set, or an authorization error.
    pub async fn submit_new_food(
        &self,
        identity: Option<&Identity>,
        input: &NewFood,
    ) -> Result<Food, WorkflowError> {
        self.check_admin(identity).await?;

        if let Err(invalid) = validation::validate(input) {
            self.notifier.error("Please fill in all required fields");
            return Err(WorkflowError::Validation(invalid));
        }

        match FoodRepository::new(self.pool).create(input).await {
            Ok(food) => {
                self.notifier.success("Food item added successfully!");
                Ok(food)
            }
            Err(err) => {
                self.notifier.error("Error adding food item. Please try again.");
                Err(err.into())
            }
        }
    }

    /// Record that deleting `id` now awaits user confirmation.
    ///
    /// Does not touch the store. A second request while one is already
    /// pending replaces the pending ID rather than queueing a concurrent
    /// deletion.
    pub fn request_delete(&mut self, id: FoodId) {
        self.delete_state = DeleteConfirmation::PendingConfirmation(id);
    }

    /// Discard the pending deletion, with no side effects.
    pub fn cancel_delete(&mut self) {
        self.delete_state = DeleteConfirmation::Idle;
    }

    /// Execute the deletion that is awaiting confirmation.
    ///
    /// Whatever happens, the machine is back in `Idle` when this returns.
    ///
    /// # Errors
    ///
    /// `NoPendingDeletion` if nothing awaits confirmation; otherwise as
    /// [`Self::execute_delete`].
    pub async fn confirm_delete(
        &mut self,
        identity: Option<&Identity>,
    ) -> Result<DeleteOutcome, WorkflowError> {
        let DeleteConfirmation::PendingConfirmation(id) = self.delete_state else {
            return Err(WorkflowError::NoPendingDeletion);
        };

        self.delete_state = DeleteConfirmation::Executing(id);
        let result = self.execute_delete(identity, id).await;
        self.delete_state = DeleteConfirmation::Idle;
        result
    }

    /// Delete `id` and reconcile the presented list.
    ///
    /// Reconciliation is two-phase: the item is removed from the in-memory
    /// view optimistically, then the list is re-read from the store; the
    /// re-read is authoritative and overrides the optimistic step.
    ///
    /// # Errors
    ///
    /// Authorization failures short-circuit before the store call. A store
    /// failure is surfaced as `Catalog`. A missing ID is *not* an error:
    /// the list is refreshed anyway and [`DeleteOutcome::AlreadyGone`] is
    /// returned.
    pub async fn execute_delete(
        &mut self,
        identity: Option<&Identity>,
        id: FoodId,
    ) -> Result<DeleteOutcome, WorkflowError> {
        self.check_admin(identity).await?;

        match FoodRepository::new(self.pool).delete(id).await {
            Ok(()) => {
                // Optimistic removal, then authoritative resync.
                self.foods.retain(|food| food.id != id);
                if let Err(err) = self.refresh_list().await {
                    tracing::error!(error = %err, "list refresh after delete failed");
                    self.notifier.error("Failed to load foods");
                }
                self.notifier.success("Food item deleted successfully!");
                Ok(DeleteOutcome::Deleted)
            }
            Err(CatalogError::NotFound) => {
                // The item may already be gone; resync and report.
                if let Err(err) = self.refresh_list().await {
                    tracing::error!(error = %err, "list refresh after delete failed");
                }
                self.notifier.error("Food item not found");
                Ok(DeleteOutcome::AlreadyGone)
            }
            Err(err) => {
                self.notifier.error("Server error while deleting food item");
                Err(err.into())
            }
        }
    }

    /// Re-read the presented list from the authoritative store.
    async fn refresh_list(&mut self) -> Result<(), WorkflowError> {
        self.foods = FoodRepository::new(self.pool).list().await?;
        Ok(())
    }

    /// Fresh privilege check; notifies the user on failure.
    async fn check_admin(&self, identity: Option<&Identity>) -> Result<(), WorkflowError> {
        match self.gate.require_admin(identity).await {
            Ok(_capability) => Ok(()),
            Err(err) => {
                self.notifier.error(err.user_message());
                Err(err.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::authz::StaticProfiles;
    use tavola_core::Role;

    /// Records notifications for assertions.
    #[derive(Default)]
    struct RecordingNotifier {
        messages: Mutex<Vec<(bool, String)>>,
    }

    impl RecordingNotifier {
        fn errors(&self) -> Vec<String> {
            self.messages
                .lock()
                .expect("lock")
                .iter()
                .filter(|(ok, _)| !ok)
                .map(|(_, m)| m.clone())
                .collect()
        }
    }

    impl Notifier for &RecordingNotifier {
        fn success(&self, message: &str) {
            self.messages
                .lock()
                .expect("lock")
                .push((true, message.to_owned()));
        }

        fn error(&self, message: &str) {
            self.messages
                .lock()
                .expect("lock")
                .push((false, message.to_owned()));
        }
    }

    fn profiles() -> StaticProfiles {
        StaticProfiles::new()
            .with_profile("alice", Role::Admin)
            .with_profile("bob", Role::User)
    }

    fn admin() -> Identity {
        Identity::new("alice")
    }

    fn burger() -> NewFood {
        NewFood::new("Veg Burger", "5.5".parse().expect("decimal"), "Burger")
    }

    async fn temp_pool() -> (tempfile::TempDir, SqlitePool) {
        let dir = tempfile::tempdir().expect("tempdir");
        let pool = tavola_catalog::db::create_pool(&dir.path().join("catalog.db"))
            .await
            .expect("pool");
        (dir, pool)
    }

    #[tokio::test]
    async fn manage_view_requires_admin() {
        let (_dir, pool) = temp_pool().await;
        let notifier = RecordingNotifier::default();
        let mut workflow = CatalogAdminWorkflow::new(&pool, profiles(), &notifier);

        let err = workflow
            .load_manage_view(Some(&Identity::new("bob")))
            .await
            .expect_err("forbidden");
        assert!(matches!(err, WorkflowError::Authz(AuthzError::Forbidden)));
        assert_eq!(err.redirect_target(), Some(RedirectTarget::Home));
        assert!(workflow.foods().is_empty());
        assert_eq!(
            notifier.errors(),
            vec!["Access denied. Admin privileges required."]
        );
    }

    #[tokio::test]
    async fn manage_view_lists_catalog_for_admin() {
        let (_dir, pool) = temp_pool().await;
        FoodRepository::new(&pool)
            .create(&burger())
            .await
            .expect("seed");

        let notifier = RecordingNotifier::default();
        let mut workflow = CatalogAdminWorkflow::new(&pool, profiles(), &notifier);

        let foods = workflow
            .load_manage_view(Some(&admin()))
            .await
            .expect("manage view");
        assert_eq!(foods.len(), 1);
    }

    #[tokio::test]
    async fn submit_validates_before_the_store() {
        let (_dir, pool) = temp_pool().await;
        let notifier = RecordingNotifier::default();
        let workflow = CatalogAdminWorkflow::new(&pool, profiles(), &notifier);

        let input = NewFood::default();
        let err = workflow
            .submit_new_food(Some(&admin()), &input)
            .await
            .expect_err("invalid");
        match err {
            WorkflowError::Validation(invalid) => {
                assert_eq!(invalid.fields, vec!["name", "price", "category"]);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
        // The rejected input is still with the caller, untouched.
        assert_eq!(input, NewFood::default());
        assert!(
            FoodRepository::new(&pool)
                .list()
                .await
                .expect("list")
                .is_empty()
        );
    }

    #[tokio::test]
    async fn submit_persists_for_admin() {
        let (_dir, pool) = temp_pool().await;
        let notifier = RecordingNotifier::default();
        let workflow = CatalogAdminWorkflow::new(&pool, profiles(), &notifier);

        let food = workflow
            .submit_new_food(Some(&admin()), &burger())
            .await
            .expect("created");
        assert_eq!(food.name, "Veg Burger");
    }

    #[tokio::test]
    async fn cancel_leaves_catalog_untouched() {
        let (_dir, pool) = temp_pool().await;
        let food = FoodRepository::new(&pool)
            .create(&burger())
            .await
            .expect("seed");

        let notifier = RecordingNotifier::default();
        let mut workflow = CatalogAdminWorkflow::new(&pool, profiles(), &notifier);
        workflow
            .load_manage_view(Some(&admin()))
            .await
            .expect("manage view");

        workflow.request_delete(food.id);
        assert_eq!(
            workflow.delete_state(),
            DeleteConfirmation::PendingConfirmation(food.id)
        );

        workflow.cancel_delete();
        assert_eq!(workflow.delete_state(), DeleteConfirmation::Idle);

        let foods = FoodRepository::new(&pool).list().await.expect("list");
        assert_eq!(foods, vec![food]);
    }

    #[tokio::test]
    async fn confirm_deletes_and_reconciles() {
        let (_dir, pool) = temp_pool().await;
        let repo = FoodRepository::new(&pool);
        let keep = repo.create(&burger()).await.expect("seed");
        let doomed = repo
            .create(&NewFood::new(
                "Margherita",
                "12".parse().expect("decimal"),
                "Pizza",
            ))
            .await
            .expect("seed");

        let notifier = RecordingNotifier::default();
        let mut workflow = CatalogAdminWorkflow::new(&pool, profiles(), &notifier);
        workflow
            .load_manage_view(Some(&admin()))
            .await
            .expect("manage view");
        assert_eq!(workflow.foods().len(), 2);

        workflow.request_delete(doomed.id);
        let outcome = workflow
            .confirm_delete(Some(&admin()))
            .await
            .expect("confirmed");
        assert_eq!(outcome, DeleteOutcome::Deleted);
        assert_eq!(workflow.delete_state(), DeleteConfirmation::Idle);
        assert_eq!(workflow.foods(), &[keep]);
    }

    #[tokio::test]
    async fn confirm_without_pending_is_an_error() {
        let (_dir, pool) = temp_pool().await;
        let notifier = RecordingNotifier::default();
        let mut workflow = CatalogAdminWorkflow::new(&pool, profiles(), &notifier);

        let err = workflow
            .confirm_delete(Some(&admin()))
            .await
            .expect_err("nothing pending");
        assert!(matches!(err, WorkflowError::NoPendingDeletion));
    }

    #[tokio::test]
    async fn confirm_on_missing_id_reports_and_returns_to_idle() {
        let (_dir, pool) = temp_pool().await;
        let food = FoodRepository::new(&pool)
            .create(&burger())
            .await
            .expect("seed");

        let notifier = RecordingNotifier::default();
        let mut workflow = CatalogAdminWorkflow::new(&pool, profiles(), &notifier);
        workflow
            .load_manage_view(Some(&admin()))
            .await
            .expect("manage view");

        workflow.request_delete(FoodId::generate());
        let outcome = workflow
            .confirm_delete(Some(&admin()))
            .await
            .expect("recoverable");
        assert_eq!(outcome, DeleteOutcome::AlreadyGone);
        assert_eq!(workflow.delete_state(), DeleteConfirmation::Idle);
        assert_eq!(workflow.foods(), &[food]);
        assert!(notifier.errors().contains(&"Food item not found".to_owned()));
    }

    #[tokio::test]
    async fn second_request_replaces_pending_id() {
        let (_dir, pool) = temp_pool().await;
        let notifier = RecordingNotifier::default();
        let mut workflow = CatalogAdminWorkflow::new(&pool, profiles(), &notifier);

        let first = FoodId::generate();
        let second = FoodId::generate();
        workflow.request_delete(first);
        workflow.request_delete(second);
        assert_eq!(
            workflow.delete_state(),
            DeleteConfirmation::PendingConfirmation(second)
        );
    }

    #[tokio::test]
    async fn confirm_rechecks_privilege() {
        let (_dir, pool) = temp_pool().await;
        let food = FoodRepository::new(&pool)
            .create(&burger())
            .await
            .expect("seed");

        let notifier = RecordingNotifier::default();
        let mut workflow = CatalogAdminWorkflow::new(&pool, profiles(), &notifier);
        workflow.request_delete(food.id);

        // The role changed between page loads; the confirm re-check catches it.
        let err = workflow
            .confirm_delete(Some(&Identity::new("bob")))
            .await
            .expect_err("forbidden");
        assert!(matches!(err, WorkflowError::Authz(AuthzError::Forbidden)));
        assert_eq!(workflow.delete_state(), DeleteConfirmation::Idle);
        assert_eq!(
            FoodRepository::new(&pool).list().await.expect("list"),
            vec![food]
        );
    }

    #[tokio::test]
    async fn dashboard_counts_the_catalog() {
        let (_dir, pool) = temp_pool().await;
        FoodRepository::new(&pool)
            .create(&burger())
            .await
            .expect("seed");

        let notifier = RecordingNotifier::default();
        let workflow = CatalogAdminWorkflow::new(&pool, profiles(), &notifier);
        let stats = workflow
            .load_dashboard(Some(&admin()))
            .await
            .expect("stats");
        assert_eq!(stats, DashboardStats { total_foods: 1 });
    }
}
