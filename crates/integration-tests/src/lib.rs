//! Integration tests for the QueueMate client.
//!
//! Every test runs the real client stack (session store, file storage,
//! reqwest) against a [`wiremock`] server standing in for the backend.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p queuemate-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `session_lifecycle` - Login, signup, logout, restore and forced logout
//! - `shop_setup` - Existing-shop lookup and shop creation
//! - `dashboard` - Shop status, stale links and queue polling
//! - `team` - Roster changes and confirmed deletes

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::path::PathBuf;
use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde_json::{Value, json};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use queuemate_client::{ClientConfig, FileStore, KeyValueStore, QueueMate};

pub use queuemate_client::storage::{TOKEN_KEY, USER_KEY};

/// Owner id used by the fixtures.
pub const OWNER_ID: &str = "user-1";

/// Shop id used by the fixtures.
pub const SHOP_ID: &str = "shop-1";

/// A mock backend plus a client whose session lives in a temp directory.
pub struct TestContext {
    pub server: MockServer,
    pub app: QueueMate,
    state_dir: TempDir,
}

impl TestContext {
    /// Start a mock backend and a client with an empty session.
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        let state_dir = tempfile::tempdir().unwrap();
        let app = Self::client(&server, state_dir.path().to_path_buf());
        Self {
            server,
            app,
            state_dir,
        }
    }

    /// Start with a session already persisted, as after a previous run.
    pub async fn with_saved_session(token: &str, user: &Value) -> Self {
        let ctx = Self::new().await;
        let storage = ctx.storage();
        storage.set(TOKEN_KEY, token).await.unwrap();
        storage.set(USER_KEY, &user.to_string()).await.unwrap();
        ctx
    }

    /// A second client sharing this one's state directory, as after a
    /// restart.
    #[must_use]
    pub fn restart(&self) -> QueueMate {
        Self::client(&self.server, self.state_dir.path().to_path_buf())
    }

    /// Direct access to the session file.
    #[must_use]
    pub fn storage(&self) -> FileStore {
        FileStore::new(self.state_dir.path().join("session.json"))
    }

    /// A client on this backend backed by `storage` instead of the session
    /// file.
    #[must_use]
    pub fn client_with_storage(&self, storage: Arc<dyn KeyValueStore>) -> QueueMate {
        let base = url::Url::parse(&self.server.uri()).unwrap();
        let config = ClientConfig::new(base, self.state_dir.path().to_path_buf());
        QueueMate::with_storage(config, storage).unwrap()
    }

    fn client(server: &MockServer, state_dir: PathBuf) -> QueueMate {
        let base = url::Url::parse(&server.uri()).unwrap();
        let config = ClientConfig::new(base, state_dir);
        let storage = Arc::new(FileStore::new(config.session_file()));
        QueueMate::with_storage(config, storage).unwrap()
    }

    /// Answer login and signup with a fresh token for [`OWNER_ID`].
    pub async fn mount_auth(&self, shop_id: Option<&str>) {
        let mut body = json!({ "token": fresh_token(), "userId": OWNER_ID });
        if let Some(shop_id) = shop_id {
            body["shopId"] = json!(shop_id);
        }
        for route in ["/api/auth/login", "/api/auth/signup"] {
            Mock::given(method("POST"))
                .and(path(route))
                .respond_with(ResponseTemplate::new(200).set_body_json(&body))
                .mount(&self.server)
                .await;
        }
    }

    /// Sign in through the real login flow.
    pub async fn sign_in(&self, shop_id: Option<&str>) {
        self.mount_auth(shop_id).await;
        self.app.session().restore().await;
        self.app
            .session()
            .login(&email(), &password())
            .await
            .unwrap();
    }
}

/// Unsigned JWT-shaped token carrying `exp`.
#[must_use]
pub fn jwt_expiring_at(exp: i64) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(format!(r#"{{"sub":"{OWNER_ID}","exp":{exp}}}"#));
    format!("{header}.{payload}.signature")
}

/// Token valid for another hour.
#[must_use]
pub fn fresh_token() -> String {
    jwt_expiring_at(chrono::Utc::now().timestamp() + 3600)
}

/// Persisted user record.
#[must_use]
pub fn user_record(shop_id: Option<&str>) -> Value {
    let mut record = json!({ "userId": OWNER_ID, "userEmail": "owner@example.com" });
    if let Some(shop_id) = shop_id {
        record["shopId"] = json!(shop_id);
    }
    record
}

#[must_use]
pub fn email() -> queuemate_core::Email {
    queuemate_core::Email::parse("owner@example.com").unwrap()
}

#[must_use]
pub fn password() -> queuemate_core::Password {
    queuemate_core::Password::parse("hunter22").unwrap()
}

/// Shop document as the backend returns it.
#[must_use]
pub fn shop_json(id: &str, status: &str) -> Value {
    json!({
        "_id": id,
        "name": "Fade House",
        "slug": "fade-house",
        "phone": "555-0100",
        "location": "12 Main St",
        "hours": "09:00 AM - 07:00 PM",
        "status": status,
        "owner": OWNER_ID,
    })
}

/// Queue entry as the backend returns it.
#[must_use]
pub fn entry_json(id: &str, status: &str) -> Value {
    json!({
        "_id": id,
        "name": format!("Customer {id}"),
        "barber": { "name": "Sam" },
        "serviceName": "Skin fade",
        "serviceDuration": 45,
        "status": status,
        "createdAt": "2026-10-16T09:30:00Z",
    })
}

/// Barber document as the backend returns it.
#[must_use]
pub fn barber_json(id: &str, name: &str, status: &str) -> Value {
    json!({
        "_id": id,
        "name": name,
        "status": status,
        "services": [{ "_id": format!("{id}-svc"), "name": "Skin fade", "duration": 45 }],
        "avgDuration": 45,
        "accessCode": "123456",
        "isActive": true,
    })
}
