//! Integration tests for signing in, restoring and ending sessions.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value, json};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, ResponseTemplate};

use queuemate_client::{
    AuthError, ClientError, FileStore, KeyValueStore, Route, Session, StorageError,
};
use queuemate_integration_tests::{
    OWNER_ID, SHOP_ID, TOKEN_KEY, TestContext, USER_KEY, email, fresh_token, jwt_expiring_at,
    password, shop_json, user_record,
};

async fn stored_user(ctx: &TestContext) -> Option<Value> {
    ctx.storage()
        .get(USER_KEY)
        .await
        .unwrap()
        .map(|user| serde_json::from_str(&user).unwrap())
}

/// Session file whose user slot cannot be written.
struct ReadOnlyUserSlot(FileStore);

#[async_trait]
impl KeyValueStore for ReadOnlyUserSlot {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.0.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if key == USER_KEY {
            return Err(StorageError::Io(std::io::Error::other("disk full")));
        }
        self.0.set(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.0.remove(key).await
    }

    async fn clear(&self) -> Result<(), StorageError> {
        self.0.clear().await
    }
}

// ============================================================================
// Login & Signup
// ============================================================================

#[tokio::test]
async fn test_login_persists_session_across_restart() {
    let ctx = TestContext::new().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({ "email": "owner@example.com", "password": "hunter22" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": fresh_token(),
            "userId": OWNER_ID,
            "shopId": SHOP_ID,
        })))
        .expect(1)
        .mount(&ctx.server)
        .await;

    assert_eq!(ctx.app.session().restore().await, Session::signed_out());
    let session = ctx.app.session().login(&email(), &password()).await.unwrap();
    assert_eq!(Route::for_session(&session), Route::Authenticated);

    let user = stored_user(&ctx).await.unwrap();
    assert_eq!(user["userId"], OWNER_ID);
    assert_eq!(user["shopId"], SHOP_ID);
    assert_eq!(user["userEmail"], "owner@example.com");

    let restarted = ctx.restart();
    let restored = restarted.session().restore().await;
    assert_eq!(restored, session);
    assert_eq!(restarted.gate().route(), Route::Authenticated);
}

#[tokio::test]
async fn test_signup_never_links_a_shop() {
    let ctx = TestContext::new().await;
    ctx.mount_auth(Some("someone-elses-shop")).await;
    ctx.app.session().restore().await;

    let session = ctx.app.session().signup(&email(), &password()).await.unwrap();

    assert_eq!(session.shop_id(), None);
    assert_eq!(ctx.app.gate().route(), Route::AwaitingShopSetup);
    assert_eq!(stored_user(&ctx).await.unwrap().get("shopId"), None);
}

#[tokio::test]
async fn test_login_rejection_uses_server_message() {
    let ctx = TestContext::new().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "message": "Invalid credentials" })),
        )
        .mount(&ctx.server)
        .await;
    ctx.app.session().restore().await;

    let err = ctx.app.session().login(&email(), &password()).await.unwrap_err();

    assert_eq!(err.message(), "Invalid credentials");
    assert_eq!(ctx.app.session().current(), Session::signed_out());
    assert_eq!(ctx.storage().get(TOKEN_KEY).await.unwrap(), None);
}

#[tokio::test]
async fn test_signup_rejection_without_message_uses_fallback() {
    let ctx = TestContext::new().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/signup"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&ctx.server)
        .await;
    ctx.app.session().restore().await;

    let err = ctx.app.session().signup(&email(), &password()).await.unwrap_err();

    assert!(matches!(err, AuthError::Rejected { .. }));
    assert_eq!(err.message(), "Signup failed");
}

#[tokio::test]
async fn test_login_that_cannot_be_saved_ends_previous_session() {
    let ctx = TestContext::with_saved_session(&fresh_token(), &user_record(Some(SHOP_ID))).await;
    ctx.mount_auth(None).await;
    let app = ctx.client_with_storage(Arc::new(ReadOnlyUserSlot(ctx.storage())));
    assert!(app.session().restore().await.is_authenticated());

    let err = app.session().login(&email(), &password()).await.unwrap_err();

    assert!(matches!(err, AuthError::Storage(_)));
    assert_eq!(app.session().current(), Session::signed_out());
    assert_eq!(ctx.storage().get(TOKEN_KEY).await.unwrap(), None);
    assert_eq!(stored_user(&ctx).await, None);
    assert_eq!(
        ctx.restart().session().restore().await,
        Session::signed_out()
    );
}

#[tokio::test]
async fn test_concurrent_login_is_refused() {
    let ctx = TestContext::new().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "token": fresh_token(), "userId": OWNER_ID }))
                .set_delay(std::time::Duration::from_millis(200)),
        )
        .expect(1)
        .mount(&ctx.server)
        .await;
    ctx.app.session().restore().await;

    let (email, password) = (email(), password());
    let session = ctx.app.session();
    let (first, second) = tokio::join!(session.login(&email, &password), async {
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        session.login(&email, &password).await
    });

    assert!(first.is_ok());
    assert!(matches!(second, Err(AuthError::InProgress)));
}

// ============================================================================
// Restore
// ============================================================================

#[tokio::test]
async fn test_restore_expired_token_signs_out_and_clears_storage() {
    let expired = jwt_expiring_at(chrono::Utc::now().timestamp() - 60);
    let ctx = TestContext::with_saved_session(&expired, &user_record(Some(SHOP_ID))).await;

    assert_eq!(ctx.app.session().restore().await, Session::signed_out());
    assert_eq!(ctx.app.gate().route(), Route::Unauthenticated);
    assert_eq!(ctx.storage().get(TOKEN_KEY).await.unwrap(), None);
    assert_eq!(ctx.storage().get(USER_KEY).await.unwrap(), None);
}

#[tokio::test]
async fn test_restore_without_shop_awaits_setup() {
    let ctx = TestContext::with_saved_session(&fresh_token(), &user_record(None)).await;
    let mut gate = ctx.app.gate();
    assert_eq!(gate.route(), Route::Initializing);

    let restore = ctx.app.session().restore();
    let (session, route) = tokio::join!(restore, gate.ready());

    assert!(session.is_authenticated());
    assert_eq!(route, Some(Route::AwaitingShopSetup));
}

#[tokio::test]
async fn test_restore_corrupt_record_signs_out() {
    let ctx = TestContext::new().await;
    let storage = ctx.storage();
    storage.set(TOKEN_KEY, &fresh_token()).await.unwrap();
    storage.set(USER_KEY, "not json").await.unwrap();

    assert_eq!(ctx.app.session().restore().await, Session::signed_out());
}

// ============================================================================
// Logout & Forced Logout
// ============================================================================

#[tokio::test]
async fn test_logout_clears_storage_and_notifies_gate() {
    let ctx = TestContext::new().await;
    ctx.sign_in(Some(SHOP_ID)).await;
    let mut gate = ctx.app.gate();

    ctx.app.session().logout().await;

    assert_eq!(gate.changed().await, Some(Route::Unauthenticated));
    assert_eq!(ctx.storage().get(TOKEN_KEY).await.unwrap(), None);
    assert_eq!(ctx.restart().session().restore().await, Session::signed_out());

    // Idempotent.
    ctx.app.session().logout().await;
    assert_eq!(ctx.app.session().current(), Session::signed_out());
}

#[tokio::test]
async fn test_unauthorized_response_forces_logout() {
    let ctx = TestContext::new().await;
    ctx.sign_in(Some(SHOP_ID)).await;
    let token = ctx.app.session().credential().unwrap();
    let bearer = format!("Bearer {}", token.expose());
    Mock::given(method("GET"))
        .and(path(format!("/api/shops/{SHOP_ID}")))
        .and(header("authorization", bearer.as_str()))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "message": "jwt expired" })))
        .expect(1)
        .mount(&ctx.server)
        .await;
    let mut gate = ctx.app.gate();

    let err = ctx.app.api().get_shop(SHOP_ID).await.unwrap_err();

    assert!(matches!(err, ClientError::Unauthorized));
    assert_eq!(gate.changed().await, Some(Route::Unauthenticated));
    assert_eq!(ctx.storage().get(TOKEN_KEY).await.unwrap(), None);
}

#[tokio::test]
async fn test_forbidden_response_keeps_session() {
    let ctx = TestContext::new().await;
    ctx.sign_in(Some(SHOP_ID)).await;
    Mock::given(method("GET"))
        .and(path(format!("/api/shops/{SHOP_ID}")))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({ "message": "Not your shop" })))
        .mount(&ctx.server)
        .await;

    let err = ctx.app.api().get_shop(SHOP_ID).await.unwrap_err();

    assert!(matches!(err, ClientError::Forbidden(ref m) if m == "Not your shop"));
    assert!(ctx.app.session().current().is_authenticated());
}

#[tokio::test]
async fn test_requests_without_session_are_not_sent() {
    let ctx = TestContext::new().await;
    Mock::given(method("GET"))
        .and(path(format!("/api/shops/{SHOP_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(shop_json(SHOP_ID, "open")))
        .expect(0)
        .mount(&ctx.server)
        .await;
    ctx.app.session().restore().await;

    let err = ctx.app.api().get_shop(SHOP_ID).await.unwrap_err();
    assert!(matches!(err, ClientError::NotAuthenticated));
}
