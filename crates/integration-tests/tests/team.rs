//! Integration tests for the barber roster and confirmed deletes.

#![allow(clippy::unwrap_used)]

use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, ResponseTemplate};

use queuemate_client::{
    ClientError, ConfirmationRequest, Decision, Resolution, RosterFilter, StatusFilter, resolve,
};
use queuemate_core::{BarberId, BarberStatus, ServiceDraft};
use queuemate_integration_tests::{SHOP_ID, TestContext, barber_json};

async fn mount_roster(ctx: &TestContext) {
    Mock::given(method("GET"))
        .and(path("/api/barbers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            barber_json("b1", "Sam", "active"),
            barber_json("b2", "Alex", "On Break"),
            barber_json("b3", "Jordan", "Off Today"),
        ])))
        .mount(&ctx.server)
        .await;
}

#[tokio::test]
async fn test_roster_filters_and_counts() {
    let ctx = TestContext::new().await;
    ctx.sign_in(Some(SHOP_ID)).await;
    mount_roster(&ctx).await;

    let mut roster = ctx.app.roster();
    roster.reload().await.unwrap();

    let on_break = RosterFilter {
        status: StatusFilter::Only(BarberStatus::OnBreak),
        search: String::new(),
    };
    let names: Vec<_> = roster.filtered(&on_break).iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, ["Alex"]);

    let search = RosterFilter {
        status: StatusFilter::All,
        search: "  SKIN ".to_string(),
    };
    assert_eq!(roster.filtered(&search).len(), 3);

    let counts = roster.counts();
    assert!(counts.contains(&(StatusFilter::All, 3)));
    assert!(counts.contains(&(StatusFilter::Only(BarberStatus::Active), 1)));
}

#[tokio::test]
async fn test_add_barber_sends_cleaned_form_and_reloads() {
    let ctx = TestContext::new().await;
    ctx.sign_in(Some(SHOP_ID)).await;
    mount_roster(&ctx).await;
    Mock::given(method("POST"))
        .and(path("/api/barbers"))
        .and(body_json(json!({
            "name": "Riley",
            "services": [
                { "name": "Skin fade", "duration": 45 },
                { "name": "Beard trim", "duration": 30 },
            ],
            "status": "active",
            "avgDuration": 38,
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&ctx.server)
        .await;

    let mut roster = ctx.app.roster();
    roster
        .add(
            "  Riley ",
            vec![
                ServiceDraft::new("Skin fade", Some(45)),
                ServiceDraft::new("  ", Some(10)),
                ServiceDraft::new("Beard trim", None),
            ],
            BarberStatus::Active,
        )
        .await
        .unwrap();

    assert_eq!(roster.barbers().len(), 3);
}

#[tokio::test]
async fn test_incomplete_edit_is_not_sent() {
    let ctx = TestContext::new().await;
    ctx.sign_in(Some(SHOP_ID)).await;
    Mock::given(method("PATCH"))
        .and(path("/api/barbers/b1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&ctx.server)
        .await;

    let mut roster = ctx.app.roster();
    let err = roster
        .edit(&BarberId::new("b1"), "Sam", vec![], BarberStatus::Active)
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Validation(ref m) if m == "Please fill in all required fields"));
}

#[tokio::test]
async fn test_status_change_patches_only_status() {
    let ctx = TestContext::new().await;
    ctx.sign_in(Some(SHOP_ID)).await;
    mount_roster(&ctx).await;
    Mock::given(method("PATCH"))
        .and(path("/api/barbers/b1"))
        .and(body_json(json!({ "status": "On Break" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .expect(1)
        .mount(&ctx.server)
        .await;

    let mut roster = ctx.app.roster();
    roster
        .set_status(&BarberId::new("b1"), BarberStatus::OnBreak)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_cancelled_delete_sends_nothing() {
    let ctx = TestContext::new().await;
    ctx.sign_in(Some(SHOP_ID)).await;
    Mock::given(method("DELETE"))
        .and(path("/api/barbers/b2"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&ctx.server)
        .await;

    let request = ConfirmationRequest::delete_barber(BarberId::new("b2"));
    let resolution = resolve(request, Decision::Cancel, ctx.app.api()).await.unwrap();

    assert_eq!(resolution, Resolution::Cancelled);
}

#[tokio::test]
async fn test_confirmed_delete_removes_barber() {
    let ctx = TestContext::new().await;
    ctx.sign_in(Some(SHOP_ID)).await;
    Mock::given(method("DELETE"))
        .and(path("/api/barbers/b2"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&ctx.server)
        .await;

    let request = ConfirmationRequest::delete_barber(BarberId::new("b2"));
    assert!(request.destructive);
    let resolution = resolve(request, Decision::Confirm, ctx.app.api()).await.unwrap();

    assert_eq!(resolution, Resolution::BarberDeleted(BarberId::new("b2")));
}

#[tokio::test]
async fn test_confirmed_logout_ends_session() {
    let ctx = TestContext::new().await;
    ctx.sign_in(Some(SHOP_ID)).await;

    let resolution = resolve(ConfirmationRequest::logout(), Decision::from(true), ctx.app.api())
        .await
        .unwrap();

    assert_eq!(resolution, Resolution::LoggedOut);
    assert!(!ctx.app.session().current().is_authenticated());
}
