// Installment batches end to end: planning, atomic persistence and group
// retrieval.

#[path = "../helpers/mod.rs"]
mod helpers;

use std::str::FromStr;

use actix_web::{http::StatusCode, test, App};
use fintrack::transactions::SplitPolicy;
use helpers::{TestContext, TestDataFactory};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::Value;

fn values(items: &Value) -> Vec<Decimal> {
    items
        .as_array()
        .unwrap()
        .iter()
        .map(|t| Decimal::from_str(t["value"].as_str().unwrap()).unwrap())
        .collect()
}

#[actix_web::test]
async fn test_group_lists_installments_in_order() {
    let ctx = TestContext::new();
    let app = test::init_service(App::new().configure(|cfg| ctx.services.configure(cfg))).await;

    let req = test::TestRequest::post()
        .uri("/api/transactions/installments")
        .insert_header(ctx.auth_header("user-1"))
        .set_json(TestDataFactory::installments_payload("100.00", 3))
        .to_request();
    let batch: Value = test::call_and_read_body_json(&app, req).await;
    let group_id = batch["group_id"].as_str().unwrap().to_string();

    let req = test::TestRequest::get()
        .uri(&format!("/api/transactions/group/{}", group_id))
        .insert_header(ctx.auth_header("user-1"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let group: Value = test::read_body_json(resp).await;

    let items = group.as_array().unwrap();
    assert_eq!(items.len(), 3);

    let dates: Vec<&str> = items.iter().map(|t| t["date"].as_str().unwrap()).collect();
    assert_eq!(dates, vec!["2025-01-31", "2025-02-28", "2025-03-31"]);

    for (offset, item) in items.iter().enumerate() {
        assert_eq!(item["installment_index"], offset as i64 + 1);
        assert_eq!(item["installment_count"], 3);
        assert_eq!(item["installment_group_id"], group_id.as_str());
        assert_eq!(item["is_paid"], false);
        assert_eq!(
            item["description"],
            format!("Notebook ({}/3)", offset + 1).as_str()
        );
    }

    assert_eq!(values(&group), vec![dec!(33.33); 3]);

    // Group ids are owner-scoped
    let req = test::TestRequest::get()
        .uri(&format!("/api/transactions/group/{}", group_id))
        .insert_header(ctx.auth_header("user-2"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_request_policy_overrides_default() {
    let ctx = TestContext::with_policy(SplitPolicy::Repeat);
    let app = test::init_service(App::new().configure(|cfg| ctx.services.configure(cfg))).await;

    let req = test::TestRequest::post()
        .uri("/api/transactions/installments")
        .insert_header(ctx.auth_header("user-1"))
        .set_json(TestDataFactory::installments_payload("100", 3))
        .to_request();
    let repeated: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(repeated["split_policy"], "repeat");

    let mut payload = TestDataFactory::installments_payload("100", 3);
    payload["split_policy"] = "divide_exact".into();
    let req = test::TestRequest::post()
        .uri("/api/transactions/installments")
        .insert_header(ctx.auth_header("user-1"))
        .set_json(&payload)
        .to_request();
    let exact: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(exact["split_policy"], "divide_exact");

    let req = test::TestRequest::get()
        .uri(&format!(
            "/api/transactions/group/{}",
            repeated["group_id"].as_str().unwrap()
        ))
        .insert_header(ctx.auth_header("user-1"))
        .to_request();
    let group: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(values(&group), vec![dec!(100); 3]);

    let req = test::TestRequest::get()
        .uri(&format!(
            "/api/transactions/group/{}",
            exact["group_id"].as_str().unwrap()
        ))
        .insert_header(ctx.auth_header("user-1"))
        .to_request();
    let group: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(values(&group), vec![dec!(33.33), dec!(33.33), dec!(33.34)]);
}

#[actix_web::test]
async fn test_single_installment_has_no_group() {
    let ctx = TestContext::new();
    let app = test::init_service(App::new().configure(|cfg| ctx.services.configure(cfg))).await;

    let req = test::TestRequest::post()
        .uri("/api/transactions/installments")
        .insert_header(ctx.auth_header("user-1"))
        .set_json(TestDataFactory::installments_payload("59.90", 1))
        .to_request();
    let batch: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(batch["count"], 1);
    assert!(batch["group_id"].is_null());

    let stored = ctx.transactions.all();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].value, dec!(59.90));
    assert_eq!(stored[0].description, "Notebook");
    assert!(stored[0].installment_group_id.is_none());
}

#[actix_web::test]
async fn test_storage_failure_persists_nothing() {
    let ctx = TestContext::new();
    let app = test::init_service(App::new().configure(|cfg| ctx.services.configure(cfg))).await;

    ctx.transactions.fail_writes(true);
    let req = test::TestRequest::post()
        .uri("/api/transactions/installments")
        .insert_header(ctx.auth_header("user-1"))
        .set_json(TestDataFactory::installments_payload("1200", 12))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    // Storage details stay in the logs
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["message"], "Internal server error");
    assert_eq!(ctx.transactions.len(), 0);

    ctx.transactions.fail_writes(false);
    let req = test::TestRequest::post()
        .uri("/api/transactions/installments")
        .insert_header(ctx.auth_header("user-1"))
        .set_json(TestDataFactory::installments_payload("1200", 12))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);
    assert_eq!(ctx.transactions.len(), 12);
}

#[actix_web::test]
async fn test_installments_link_to_account() {
    let ctx = TestContext::new();
    let app = test::init_service(App::new().configure(|cfg| ctx.services.configure(cfg))).await;

    let req = test::TestRequest::post()
        .uri("/api/accounts")
        .insert_header(ctx.auth_header("user-1"))
        .set_json(TestDataFactory::account_payload("credit_card"))
        .to_request();
    let account: Value = test::call_and_read_body_json(&app, req).await;
    let account_id = account["id"].as_str().unwrap().to_string();

    let mut payload = TestDataFactory::installments_payload("300", 3);
    payload["account_id"] = account_id.as_str().into();
    let req = test::TestRequest::post()
        .uri("/api/transactions/installments")
        .insert_header(ctx.auth_header("user-1"))
        .set_json(&payload)
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    // All three unpaid installments count against the limit
    let req = test::TestRequest::get()
        .uri(&format!("/api/accounts/{}/balance", account_id))
        .insert_header(ctx.auth_header("user-1"))
        .to_request();
    let report: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(
        Decimal::from_str(report["total_unpaid"].as_str().unwrap()).unwrap(),
        dec!(300)
    );

    payload["account_id"] = "missing".into();
    let req = test::TestRequest::post()
        .uri("/api/transactions/installments")
        .insert_header(ctx.auth_header("user-1"))
        .set_json(&payload)
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
    assert_eq!(ctx.transactions.len(), 3);
}
