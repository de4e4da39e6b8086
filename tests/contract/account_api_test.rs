// Contract tests for /api/accounts, including the balance projection

#[path = "../helpers/mod.rs"]
mod helpers;

use std::str::FromStr;

use actix_web::{http::StatusCode, test, App};
use helpers::{TestContext, TestDataFactory};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{json, Value};

fn decimal(value: &Value) -> Decimal {
    match value {
        Value::String(s) => Decimal::from_str(s).unwrap(),
        other => Decimal::from_str(&other.to_string()).unwrap(),
    }
}

#[actix_web::test]
async fn test_create_applies_defaults() {
    let ctx = TestContext::new();
    let app = test::init_service(App::new().configure(|cfg| ctx.services.configure(cfg))).await;

    let req = test::TestRequest::post()
        .uri("/api/accounts")
        .insert_header(ctx.auth_header("user-1"))
        .set_json(json!({ "name": "Wallet", "kind": "cash" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let account: Value = test::read_body_json(resp).await;
    assert_eq!(account["user_id"], "user-1");
    assert_eq!(account["kind"], "cash");
    assert_eq!(account["color"], "#3B82F6");
    assert_eq!(account["icon"], "CreditCard");
    assert_eq!(account["active"], true);
    assert_eq!(decimal(&account["credit_limit"]), Decimal::ZERO);
}

#[actix_web::test]
async fn test_invalid_kind_and_color_are_rejected() {
    let ctx = TestContext::new();
    let app = test::init_service(App::new().configure(|cfg| ctx.services.configure(cfg))).await;

    let payloads = [
        json!({ "name": "Card", "kind": "prepaid" }),
        json!({ "name": "Card", "kind": "cash", "color": "blue" }),
        json!({ "name": " ", "kind": "cash" }),
    ];

    for payload in payloads {
        let req = test::TestRequest::post()
            .uri("/api/accounts")
            .insert_header(ctx.auth_header("user-1"))
            .set_json(&payload)
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::BAD_REQUEST,
            "payload {}",
            payload
        );
    }
}

#[actix_web::test]
async fn test_credit_card_balance_counts_only_unpaid() {
    let ctx = TestContext::new();
    let app = test::init_service(App::new().configure(|cfg| ctx.services.configure(cfg))).await;

    let req = test::TestRequest::post()
        .uri("/api/accounts")
        .insert_header(ctx.auth_header("user-1"))
        .set_json(TestDataFactory::account_payload("credit_card"))
        .to_request();
    let account: Value = test::call_and_read_body_json(&app, req).await;
    let account_id = account["id"].as_str().unwrap().to_string();

    for (value, is_paid) in [("200.00", false), ("50.00", false), ("400.00", true)] {
        let mut payload = TestDataFactory::transaction_payload();
        payload["value"] = value.into();
        payload["is_paid"] = is_paid.into();
        payload["account_id"] = account_id.as_str().into();

        let req = test::TestRequest::post()
            .uri("/api/transactions")
            .insert_header(ctx.auth_header("user-1"))
            .set_json(&payload)
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);
    }

    let req = test::TestRequest::get()
        .uri(&format!("/api/accounts/{}/balance", account_id))
        .insert_header(ctx.auth_header("user-1"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let report: Value = test::read_body_json(resp).await;
    assert_eq!(report["account_id"], account_id.as_str());
    assert_eq!(report["kind"], "credit_card");
    assert_eq!(decimal(&report["total_unpaid"]), dec!(250));
    assert_eq!(decimal(&report["credit_limit"]), dec!(1000));
    assert_eq!(decimal(&report["available"]), dec!(750));
    assert_eq!(decimal(&report["utilization_percent"]), dec!(25.0));
    assert!(report.get("available_balance").is_none());
}

#[actix_web::test]
async fn test_checking_balance_reports_available_funds() {
    let ctx = TestContext::new();
    let app = test::init_service(App::new().configure(|cfg| ctx.services.configure(cfg))).await;

    let req = test::TestRequest::post()
        .uri("/api/accounts")
        .insert_header(ctx.auth_header("user-1"))
        .set_json(json!({ "name": "Checking", "kind": "checking", "current_balance": "100" }))
        .to_request();
    let account: Value = test::call_and_read_body_json(&app, req).await;
    let account_id = account["id"].as_str().unwrap().to_string();

    let mut payload = TestDataFactory::transaction_payload();
    payload["value"] = "30".into();
    payload["account_id"] = account_id.as_str().into();
    let req = test::TestRequest::post()
        .uri("/api/transactions")
        .insert_header(ctx.auth_header("user-1"))
        .set_json(&payload)
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    let req = test::TestRequest::get()
        .uri(&format!("/api/accounts/{}/balance", account_id))
        .insert_header(ctx.auth_header("user-1"))
        .to_request();
    let report: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(decimal(&report["available_balance"]), dec!(70));
    assert!(report.get("utilization_percent").is_none());
}

#[actix_web::test]
async fn test_balance_of_foreign_account_is_not_found() {
    let ctx = TestContext::new();
    let app = test::init_service(App::new().configure(|cfg| ctx.services.configure(cfg))).await;

    let req = test::TestRequest::post()
        .uri("/api/accounts")
        .insert_header(ctx.auth_header("user-1"))
        .set_json(TestDataFactory::account_payload("credit_card"))
        .to_request();
    let account: Value = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/accounts/{}/balance", account["id"].as_str().unwrap()))
        .insert_header(ctx.auth_header("user-2"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_delete_linked_account_is_conflict() {
    let ctx = TestContext::new();
    let app = test::init_service(App::new().configure(|cfg| ctx.services.configure(cfg))).await;

    let req = test::TestRequest::post()
        .uri("/api/accounts")
        .insert_header(ctx.auth_header("user-1"))
        .set_json(TestDataFactory::account_payload("debit_card"))
        .to_request();
    let account: Value = test::call_and_read_body_json(&app, req).await;
    let account_id = account["id"].as_str().unwrap().to_string();

    let mut payload = TestDataFactory::transaction_payload();
    payload["account_id"] = account_id.as_str().into();
    let req = test::TestRequest::post()
        .uri("/api/transactions")
        .insert_header(ctx.auth_header("user-1"))
        .set_json(&payload)
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::delete()
        .uri(&format!("/api/accounts/{}", account_id))
        .insert_header(ctx.auth_header("user-1"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("1 transaction"));

    // Unlink, then the delete goes through
    let req = test::TestRequest::put()
        .uri(&format!("/api/transactions/{}", created["id"].as_str().unwrap()))
        .insert_header(ctx.auth_header("user-1"))
        .set_json(json!({ "account_id": "" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/accounts/{}", account_id))
        .insert_header(ctx.auth_header("user-1"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    assert_eq!(ctx.accounts.len(), 0);
}

#[actix_web::test]
async fn test_update_and_list() {
    let ctx = TestContext::new();
    let app = test::init_service(App::new().configure(|cfg| ctx.services.configure(cfg))).await;

    let req = test::TestRequest::post()
        .uri("/api/accounts")
        .insert_header(ctx.auth_header("user-1"))
        .set_json(TestDataFactory::account_payload("credit_card"))
        .to_request();
    let account: Value = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::put()
        .uri(&format!("/api/accounts/{}", account["id"].as_str().unwrap()))
        .insert_header(ctx.auth_header("user-1"))
        .set_json(json!({ "name": "Travel card", "active": false }))
        .to_request();
    let updated: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(updated["name"], "Travel card");
    assert_eq!(updated["active"], false);
    assert_eq!(updated["kind"], "credit_card");

    let req = test::TestRequest::get()
        .uri("/api/accounts/user-1")
        .insert_header(ctx.auth_header("user-1"))
        .to_request();
    let list: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["name"], "Travel card");

    let req = test::TestRequest::get()
        .uri("/api/accounts/user-2")
        .insert_header(ctx.auth_header("user-1"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);
}
