// Envelope payment flow
//
// Payments increment the paid counters atomically: concurrent payments all
// land, overpayment is accepted, and the general update never touches the
// counters.

#[path = "../helpers/mod.rs"]
mod helpers;

use std::str::FromStr;
use std::sync::Arc;

use actix_web::{http::StatusCode, test, App};
use fintrack::envelopes::models::{CreateEnvelopeRequest, PayInstallmentRequest};
use fintrack::envelopes::{Envelope, EnvelopeService};
use futures_util::future::join_all;
use helpers::{MemoryStore, TestContext, TestDataFactory};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{json, Value};

fn create_request() -> CreateEnvelopeRequest {
    serde_json::from_value(TestDataFactory::envelope_payload()).unwrap()
}

#[actix_web::test]
async fn test_concurrent_payments_are_all_counted() {
    let store = Arc::new(MemoryStore::<Envelope>::new());
    let service = Arc::new(EnvelopeService::new(store.clone()));
    let envelope = service.create("user-1", create_request()).await.unwrap();

    let payments = (0..2).map(|_| {
        let service = service.clone();
        let id = envelope.id.clone();
        actix_web::rt::spawn(async move {
            service
                .pay(&id, "user-1", PayInstallmentRequest { amount: dec!(50) })
                .await
        })
    });

    for result in join_all(payments).await {
        result.unwrap().unwrap();
    }

    let stored = store.all().pop().unwrap();
    assert_eq!(stored.amount_paid, dec!(100));
    assert_eq!(stored.installments_paid, 2);
}

#[actix_web::test]
async fn test_overpayment_is_accepted() {
    let store = Arc::new(MemoryStore::<Envelope>::new());
    let service = EnvelopeService::new(store.clone());

    let mut request = create_request();
    request.total_target = dec!(100);
    request.installment_count_total = 1;
    let envelope = service.create("user-1", request).await.unwrap();

    for _ in 0..3 {
        service
            .pay(&envelope.id, "user-1", PayInstallmentRequest { amount: dec!(60) })
            .await
            .unwrap();
    }

    let stored = store.all().pop().unwrap();
    assert_eq!(stored.amount_paid, dec!(180));
    assert_eq!(stored.installments_paid, 3);
}

#[actix_web::test]
async fn test_non_positive_payment_is_rejected() {
    let store = Arc::new(MemoryStore::<Envelope>::new());
    let service = EnvelopeService::new(store.clone());
    let envelope = service.create("user-1", create_request()).await.unwrap();

    for amount in [Decimal::ZERO, dec!(-10)] {
        let result = service
            .pay(&envelope.id, "user-1", PayInstallmentRequest { amount })
            .await;
        assert!(result.is_err());
    }

    assert_eq!(store.all()[0].installments_paid, 0);
}

#[actix_web::test]
async fn test_pay_endpoint_returns_receipt() {
    let ctx = TestContext::new();
    let app = test::init_service(App::new().configure(|cfg| ctx.services.configure(cfg))).await;

    let req = test::TestRequest::post()
        .uri("/api/envelopes")
        .insert_header(ctx.auth_header("user-1"))
        .set_json(TestDataFactory::envelope_payload())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;
    let id = created["id"].as_str().unwrap().to_string();

    for _ in 0..2 {
        let req = test::TestRequest::put()
            .uri(&format!("/api/envelopes/{}/pay", id))
            .insert_header(ctx.auth_header("user-1"))
            .set_json(json!({ "amount": "100.00" }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    }

    let req = test::TestRequest::put()
        .uri(&format!("/api/envelopes/{}/pay", id))
        .insert_header(ctx.auth_header("user-1"))
        .set_json(json!({ "amount": "50.50" }))
        .to_request();
    let receipt: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(receipt["id"], id.as_str());
    assert_eq!(
        Decimal::from_str(receipt["amount_paid"].as_str().unwrap()).unwrap(),
        dec!(250.50)
    );
    assert_eq!(receipt["installments_paid"], 3);
}

#[actix_web::test]
async fn test_payment_overflowing_amount_paid_is_rejected() {
    let ctx = TestContext::new();
    let app = test::init_service(App::new().configure(|cfg| ctx.services.configure(cfg))).await;

    let req = test::TestRequest::post()
        .uri("/api/envelopes")
        .insert_header(ctx.auth_header("user-1"))
        .set_json(TestDataFactory::envelope_payload())
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let id = created["id"].as_str().unwrap().to_string();

    let pay = |amount: &str| {
        test::TestRequest::put()
            .uri(&format!("/api/envelopes/{}/pay", id))
            .insert_header(ctx.auth_header("user-1"))
            .set_json(json!({ "amount": amount }))
            .to_request()
    };

    let resp = test::call_service(&app, pay("10000000000000.00")).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = test::call_service(&app, pay("9999999999999.00")).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = test::call_service(&app, pay("1.00")).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("amount_paid is out of the allowed range"));

    let stored = ctx.envelopes.all().pop().unwrap();
    assert_eq!(stored.amount_paid, dec!(9999999999999.00));
    assert_eq!(stored.installments_paid, 1);
}

#[actix_web::test]
async fn test_update_ignores_paid_counters() {
    let ctx = TestContext::new();
    let app = test::init_service(App::new().configure(|cfg| ctx.services.configure(cfg))).await;

    let req = test::TestRequest::post()
        .uri("/api/envelopes")
        .insert_header(ctx.auth_header("user-1"))
        .set_json(TestDataFactory::envelope_payload())
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let id = created["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::put()
        .uri(&format!("/api/envelopes/{}", id))
        .insert_header(ctx.auth_header("user-1"))
        .set_json(json!({
            "name": "Beach trip",
            "amount_paid": "999",
            "installments_paid": 7
        }))
        .to_request();
    let updated: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(updated["name"], "Beach trip");
    assert_eq!(updated["installments_paid"], 0);
    assert_eq!(
        Decimal::from_str(updated["amount_paid"].as_str().unwrap()).unwrap(),
        Decimal::ZERO
    );
}

#[actix_web::test]
async fn test_foreign_and_missing_envelopes_are_not_found() {
    let ctx = TestContext::new();
    let app = test::init_service(App::new().configure(|cfg| ctx.services.configure(cfg))).await;

    let req = test::TestRequest::post()
        .uri("/api/envelopes")
        .insert_header(ctx.auth_header("user-1"))
        .set_json(TestDataFactory::envelope_payload())
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let id = created["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::put()
        .uri(&format!("/api/envelopes/{}/pay", id))
        .insert_header(ctx.auth_header("user-2"))
        .set_json(json!({ "amount": 10 }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::delete()
        .uri("/api/envelopes/does-not-exist")
        .insert_header(ctx.auth_header("user-1"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/envelopes/{}", id))
        .insert_header(ctx.auth_header("user-1"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    assert_eq!(ctx.envelopes.len(), 0);
}
