//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::AdminConfig;
use crate::reconcile::Reconciler;
use crate::supabase::{AdminClient, SupabaseError};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// reconciliation service and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    reconciler: Reconciler,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the remote store client cannot be built.
    pub fn new(config: AdminConfig) -> Result<Self, SupabaseError> {
        let client = AdminClient::new(&config.supabase)?;
        let reconciler = Reconciler::new(client);

        Ok(Self {
            inner: Arc::new(AppStateInner { config, reconciler }),
        })
    }

    /// Get a reference to the admin configuration.
    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    /// Get a reference to the reconciliation service.
    #[must_use]
    pub fn reconciler(&self) -> &Reconciler {
        &self.inner.reconciler
    }
}
