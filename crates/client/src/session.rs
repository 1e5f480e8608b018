//! Session store: the single authority for authentication state.
//!
//! A [`SessionStore`] is constructed once per running client and shared by
//! cloning. It owns the persisted credential and user record, the in-memory
//! [`Session`] and a `watch` channel that notifies observers (the
//! navigation gate, pollers) of every change.
//!
//! # Lifecycle
//!
//! ```text
//! initializing ──restore──► signed out ──login/signup──► authenticated
//!       │                        ▲                            │
//!       └─restore (valid)────────┼───────────────────────────►│
//!                                └──logout / 401 / expired────┘
//! ```
//!
//! `login` and `signup` are rejected with [`AuthError::InProgress`] while
//! another one is running. `logout` waits for the running operation and then
//! clears, so a login immediately followed by a logout always ends signed out.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Deserializer, Serialize};
use tokio::sync::{Mutex, watch};
use tracing::{debug, info, instrument, warn};

use queuemate_core::{Email, Password, ShopId, UserId};

use crate::api::auth::{AuthKind, authenticate};
use crate::api::endpoints::Endpoints;
use crate::error::AuthError;
use crate::storage::{KeyValueStore, StorageError, TOKEN_KEY, USER_KEY};
use crate::token::Credential;

// =============================================================================
// Session
// =============================================================================

/// In-memory authentication and shop-linkage state.
///
/// Fields are only reachable through constructors that keep the invariants:
/// a signed-out session carries no identity, and a shop id never exists
/// without a credential and principal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    token: Option<Credential>,
    user_id: Option<UserId>,
    shop_id: Option<ShopId>,
    user_email: Option<Email>,
    loading: bool,
}

impl Session {
    /// State at process start, before the persisted record was read.
    #[must_use]
    pub const fn initializing() -> Self {
        Self {
            token: None,
            user_id: None,
            shop_id: None,
            user_email: None,
            loading: true,
        }
    }

    /// The fully cleared state.
    #[must_use]
    pub const fn signed_out() -> Self {
        Self {
            token: None,
            user_id: None,
            shop_id: None,
            user_email: None,
            loading: false,
        }
    }

    /// An authenticated principal, with or without a linked shop.
    #[must_use]
    pub const fn authenticated(
        token: Credential,
        user_id: UserId,
        shop_id: Option<ShopId>,
        user_email: Option<Email>,
    ) -> Self {
        Self {
            token: Some(token),
            user_id: Some(user_id),
            shop_id,
            user_email,
            loading: false,
        }
    }

    #[must_use]
    pub const fn token(&self) -> Option<&Credential> {
        self.token.as_ref()
    }

    #[must_use]
    pub const fn user_id(&self) -> Option<&UserId> {
        self.user_id.as_ref()
    }

    #[must_use]
    pub const fn shop_id(&self) -> Option<&ShopId> {
        self.shop_id.as_ref()
    }

    #[must_use]
    pub const fn user_email(&self) -> Option<&Email> {
        self.user_email.as_ref()
    }

    /// True only until the persisted record has been read.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Whether a credential is present.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::initializing()
    }
}

// =============================================================================
// Persisted user record
// =============================================================================

/// JSON object stored in the [`USER_KEY`] slot.
///
/// Fields this client does not know about are carried through
/// read-modify-write cycles untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub user_id: UserId,
    #[serde(
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub shop_id: Option<ShopId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_email: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl UserRecord {
    #[must_use]
    pub fn new(user_id: UserId, shop_id: Option<ShopId>, user_email: Option<String>) -> Self {
        Self {
            user_id,
            shop_id,
            user_email,
            extra: serde_json::Map::new(),
        }
    }
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<ShopId>, D::Error>
where
    D: Deserializer<'de>,
{
    let id = Option::<ShopId>::deserialize(deserializer)?;
    Ok(id.filter(|id| !id.is_blank()))
}

// =============================================================================
// Store
// =============================================================================

/// Owner of the persisted and in-memory session.
///
/// Cheap to clone; all clones share the same state.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<SessionStoreInner>,
}

struct SessionStoreInner {
    storage: Arc<dyn KeyValueStore>,
    state: watch::Sender<Session>,
    /// Held for the duration of restore, login, signup and logout.
    in_flight: Mutex<()>,
    restored: AtomicBool,
    http: reqwest::Client,
    endpoints: Endpoints,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("session", &*self.inner.state.borrow())
            .field("base_url", &self.inner.endpoints.base().as_str())
            .finish_non_exhaustive()
    }
}

impl SessionStore {
    /// Create a store in the initializing state. Call [`Self::restore`] once
    /// before relying on the session.
    #[must_use]
    pub fn new(storage: Arc<dyn KeyValueStore>, http: reqwest::Client, endpoints: Endpoints) -> Self {
        let (state, _) = watch::channel(Session::initializing());
        Self {
            inner: Arc::new(SessionStoreInner {
                storage,
                state,
                in_flight: Mutex::new(()),
                restored: AtomicBool::new(false),
                http,
                endpoints,
            }),
        }
    }

    /// Snapshot of the current session.
    #[must_use]
    pub fn current(&self) -> Session {
        self.inner.state.borrow().clone()
    }

    /// Receiver notified after every session change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.inner.state.subscribe()
    }

    /// The credential to attach to outgoing requests, if any.
    #[must_use]
    pub fn credential(&self) -> Option<Credential> {
        self.inner.state.borrow().token.clone()
    }

    pub(crate) fn endpoints(&self) -> &Endpoints {
        &self.inner.endpoints
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.inner.http
    }

    /// Rebuild the session from the persisted record.
    ///
    /// Runs at most once per store; later calls return the current session.
    /// Never fails: unreadable, incomplete or expired records all end in the
    /// signed-out state.
    #[instrument(skip(self))]
    pub async fn restore(&self) -> Session {
        if self.inner.restored.swap(true, Ordering::SeqCst) {
            return self.current();
        }

        let _guard = self.inner.in_flight.lock().await;

        if !self.current().is_loading() {
            // A login or logout completed before restore got the lock.
            return self.current();
        }

        let session = match self.read_persisted().await {
            Ok(Some((token, _))) if token.is_expired() => {
                info!("Persisted credential has expired, signing out");
                self.clear().await;
                return self.current();
            }
            Ok(Some((token, record))) => {
                let user_email = record
                    .user_email
                    .as_deref()
                    .and_then(|email| Email::parse(email).ok());
                Session::authenticated(token, record.user_id, record.shop_id, user_email)
            }
            Ok(None) => Session::signed_out(),
            Err(e) => {
                warn!(error = %e, "Could not read persisted session");
                Session::signed_out()
            }
        };

        info!(
            authenticated = session.is_authenticated(),
            has_shop = session.shop_id().is_some(),
            "Session restored"
        );
        self.inner.state.send_replace(session.clone());
        session
    }

    async fn read_persisted(&self) -> Result<Option<(Credential, UserRecord)>, StorageError> {
        let storage = &self.inner.storage;
        let (Some(token), Some(user)) = (storage.get(TOKEN_KEY).await?, storage.get(USER_KEY).await?)
        else {
            return Ok(None);
        };

        if token.trim().is_empty() {
            return Ok(None);
        }

        let record: UserRecord = serde_json::from_str(&user)?;
        if record.user_id.is_blank() {
            return Ok(None);
        }

        Ok(Some((Credential::new(token), record)))
    }

    /// Sign in with existing credentials.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] when the server refuses, the request fails, the
    /// session cannot be persisted, or another sign-in is running. A failed
    /// persist ends any previous session; every other failure leaves it
    /// unchanged.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn login(&self, email: &Email, password: &Password) -> Result<Session, AuthError> {
        self.sign_in(AuthKind::Login, email, password).await
    }

    /// Register a new principal. The new session never has a shop.
    ///
    /// # Errors
    ///
    /// Same as [`Self::login`].
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn signup(&self, email: &Email, password: &Password) -> Result<Session, AuthError> {
        self.sign_in(AuthKind::Signup, email, password).await
    }

    async fn sign_in(
        &self,
        kind: AuthKind,
        email: &Email,
        password: &Password,
    ) -> Result<Session, AuthError> {
        let Ok(_guard) = self.inner.in_flight.try_lock() else {
            debug!("Sign-in already in flight");
            return Err(AuthError::InProgress);
        };

        let url = match kind {
            AuthKind::Login => self.inner.endpoints.login(),
            AuthKind::Signup => self.inner.endpoints.signup(),
        };

        let grant = authenticate(&self.inner.http, url, kind, email, password).await?;
        let shop_id = match kind {
            AuthKind::Login => grant.shop_id,
            AuthKind::Signup => None,
        };

        let record = UserRecord::new(
            grant.user_id.clone(),
            shop_id.clone(),
            Some(email.to_string()),
        );

        if let Err(e) = self.persist(&grant.token, &record).await {
            warn!(error = %e, "Could not persist session");
            // The half-written record may already have replaced the previous
            // session's, so the previous session ends too.
            self.clear().await;
            return Err(e.into());
        }

        let session =
            Session::authenticated(grant.token, grant.user_id, shop_id, Some(email.clone()));
        self.inner.state.send_replace(session.clone());

        info!(
            user_id = ?session.user_id(),
            has_shop = session.shop_id().is_some(),
            "Signed in"
        );

        Ok(session)
    }

    async fn persist(&self, token: &Credential, record: &UserRecord) -> Result<(), StorageError> {
        let user = serde_json::to_string(record)?;
        self.inner.storage.set(TOKEN_KEY, token.expose()).await?;
        self.inner.storage.set(USER_KEY, &user).await?;
        Ok(())
    }

    /// Clear the persisted record and the in-memory session.
    ///
    /// Idempotent. Waits for a running sign-in to finish first.
    #[instrument(skip(self))]
    pub async fn logout(&self) {
        let _guard = self.inner.in_flight.lock().await;
        self.clear().await;
    }

    /// Log out only if `credential` is still the current one.
    ///
    /// Used for server-side rejections: a 401 answering a request that was
    /// sent with a credential since replaced must not end the new session.
    pub(crate) async fn expire(&self, credential: &Credential) {
        let _guard = self.inner.in_flight.lock().await;
        if self.inner.state.borrow().token.as_ref() != Some(credential) {
            debug!("Rejected credential is no longer current");
            return;
        }
        warn!("Credential rejected by server, signing out");
        self.clear().await;
    }

    /// Caller must hold `in_flight`.
    async fn clear(&self) {
        if let Err(e) = self.inner.storage.clear().await {
            warn!(error = %e, "Could not clear session storage, removing slots");
            for key in [TOKEN_KEY, USER_KEY] {
                if let Err(e) = self.inner.storage.remove(key).await {
                    warn!(error = %e, key, "Could not remove session slot");
                }
            }
        }

        let changed = self.inner.state.send_if_modified(|session| {
            if *session == Session::signed_out() {
                return false;
            }
            *session = Session::signed_out();
            true
        });

        if changed {
            info!("Signed out");
        }
    }

    /// Link (or unlink, with `None`) a shop to the current principal.
    ///
    /// The in-memory session changes before this first yields; the persisted
    /// record is then rewritten with every other stored field preserved. A
    /// blank id counts as `None`. Ignored when signed out.
    #[instrument(skip(self), fields(shop_id = ?shop_id))]
    pub async fn set_shop_id_locally(&self, shop_id: Option<ShopId>) {
        let shop_id = shop_id.filter(|id| !id.is_blank());

        let applied = self.inner.state.send_if_modified(|session| {
            if session.token.is_none() || session.shop_id == shop_id {
                return false;
            }
            session.shop_id.clone_from(&shop_id);
            true
        });

        let session = self.current();
        if session.token.is_none() {
            debug!("Not signed in, shop id ignored");
            return;
        }

        if applied {
            info!(linked = shop_id.is_some(), "Shop link changed");
        }

        let _guard = self.inner.in_flight.lock().await;
        // A logout or another sign-in may have finished while waiting.
        if self.inner.state.borrow().token != session.token {
            debug!("Session changed before the shop id was saved");
            return;
        }

        if let Err(e) = self.merge_shop_id(&session, shop_id).await {
            warn!(error = %e, "Could not persist shop id");
        }
    }

    async fn merge_shop_id(
        &self,
        session: &Session,
        shop_id: Option<ShopId>,
    ) -> Result<(), StorageError> {
        let storage = &self.inner.storage;

        let stored = match storage.get(USER_KEY).await? {
            Some(user) => serde_json::from_str::<UserRecord>(&user)
                .inspect_err(|e| warn!(error = %e, "Stored user record is corrupt, rebuilding"))
                .ok(),
            None => None,
        };

        let Some(user_id) = session.user_id() else {
            return Ok(());
        };
        let mut record = match stored {
            Some(record) if &record.user_id == user_id => record,
            _ => UserRecord::new(
                user_id.clone(),
                None,
                session.user_email().map(ToString::to_string),
            ),
        };

        record.shop_id = shop_id;
        storage.set(USER_KEY, &serde_json::to_string(&record)?).await
    }
}
