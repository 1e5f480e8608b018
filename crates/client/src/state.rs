//! Client context constructed once at startup and passed to every consumer.

use std::sync::Arc;

use crate::api::{ApiClient, Endpoints};
use crate::config::ClientConfig;
use crate::dashboard::Dashboard;
use crate::error::ClientError;
use crate::gate::NavigationGate;
use crate::roster::Roster;
use crate::session::SessionStore;
use crate::storage::{FileStore, KeyValueStore};

/// Everything a front-end needs: configuration, session store and API client.
///
/// Cheap to clone; clones share one session.
#[derive(Debug, Clone)]
pub struct QueueMate {
    inner: Arc<QueueMateInner>,
}

#[derive(Debug)]
struct QueueMateInner {
    config: ClientConfig,
    session: SessionStore,
    api: ApiClient,
}

impl QueueMate {
    /// Build a context persisting the session to the configured state
    /// directory.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Http` if the HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let storage = Arc::new(FileStore::new(config.session_file()));
        Self::with_storage(config, storage)
    }

    /// Build a context on a specific storage backend.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Http` if the HTTP client cannot be built.
    pub fn with_storage(
        config: ClientConfig,
        storage: Arc<dyn KeyValueStore>,
    ) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(concat!("queuemate/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let session = SessionStore::new(storage, http, Endpoints::new(config.api_base_url.clone()));
        let api = ApiClient::new(session.clone());

        Ok(Self {
            inner: Arc::new(QueueMateInner {
                config,
                session,
                api,
            }),
        })
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn session(&self) -> &SessionStore {
        &self.inner.session
    }

    #[must_use]
    pub fn api(&self) -> &ApiClient {
        &self.inner.api
    }

    /// A gate observing this context's session.
    #[must_use]
    pub fn gate(&self) -> NavigationGate {
        NavigationGate::new(&self.inner.session)
    }

    /// Dashboard for the linked shop.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::NotAuthenticated` or `ClientError::NoShop` when
    /// the session has no linked shop.
    pub fn dashboard(&self) -> Result<Dashboard, ClientError> {
        Dashboard::new(self.inner.api.clone(), self.inner.config.public_link_host.clone())
    }

    #[must_use]
    pub fn roster(&self) -> Roster {
        Roster::new(self.inner.api.clone())
    }
}
