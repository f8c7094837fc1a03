//! Order list filtering and order creation over HTTP.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use protein_admin_core::OrderStatus;
use protein_admin_integration_tests::{TestServer, location};
use reqwest::StatusCode;

#[tokio::test]
async fn test_status_filter_on_list() {
    let server = TestServer::start().await;
    server.login().await;

    let body = server
        .get("/orders?status=COMPLETED")
        .await
        .text()
        .await
        .unwrap();
    assert!(body.contains("ORD-001"));
    assert!(body.contains("ORD-002"));
    assert!(!body.contains("ORD-003"));
    assert!(!body.contains("ORD-006"));
}

#[tokio::test]
async fn test_search_without_hits_shows_empty_state() {
    let server = TestServer::start().await;
    server.login().await;

    let body = server.get("/orders?q=ORD-999").await.text().await.unwrap();
    assert!(body.contains("該当する注文が見つかりません"));
}

#[tokio::test]
async fn test_member_reload_lists_only_their_addresses() {
    let server = TestServer::start().await;
    server.login().await;

    let body = server
        .get("/orders/new?member_id=m1")
        .await
        .text()
        .await
        .unwrap();
    assert!(body.contains("value=\"a1\""));
    assert!(body.contains("value=\"a2\""));
    assert!(!body.contains("value=\"a3\""));
}

#[tokio::test]
async fn test_create_order_prepends_it() {
    let server = TestServer::start().await;
    server.login().await;

    let resp = server
        .post_form(
            "/orders/new",
            &[
                ("member_id", "m2"),
                ("address_id", "a3"),
                ("status", "IN_PROGRESS"),
                ("memo", "午前中指定"),
            ],
        )
        .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/orders");

    let orders = server.state.store().orders().await;
    assert_eq!(orders.len(), 7);
    let created = &orders[0];
    assert!(created.id.as_str().starts_with("ORD-"));
    assert_eq!(created.member_name, "佐藤 花子");
    assert_eq!(created.status, OrderStatus::InProgress);
    assert_eq!(created.memo.as_deref(), Some("午前中指定"));

    let body = server.get("/orders").await.text().await.unwrap();
    assert!(body.contains(created.id.as_str()));
}

#[tokio::test]
async fn test_create_without_selection_is_rejected() {
    let server = TestServer::start().await;
    server.login().await;

    let resp = server
        .post_form("/orders/new", &[("member_id", ""), ("status", "RECEIVED")])
        .await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(resp.text().await.unwrap().contains("会員と配送先を選択してください"));
    assert_eq!(server.state.store().orders().await.len(), 6);
}

#[tokio::test]
async fn test_create_with_foreign_address_is_rejected() {
    let server = TestServer::start().await;
    server.login().await;

    let resp = server
        .post_form("/orders/new", &[("member_id", "m2"), ("address_id", "a1")])
        .await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(server.state.store().orders().await.len(), 6);
}

#[tokio::test]
async fn test_default_order_for_first_member() {
    let server = TestServer::start().await;
    server.login().await;

    let body = server
        .get("/orders/new?member_id=m1")
        .await
        .text()
        .await
        .unwrap();
    assert!(body.contains("value=\"a1\" selected"));

    let resp = server
        .post_form(
            "/orders/new",
            &[("member_id", "m1"), ("address_id", "a1"), ("status", "RECEIVED"), ("memo", "")],
        )
        .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let orders = server.state.store().orders().await;
    assert_eq!(orders.len(), 7);
    assert_eq!(orders[0].member_id.as_str(), "m1");
    assert_eq!(orders[0].shipping_address_id.as_str(), "a1");
    assert_eq!(orders[0].status, OrderStatus::Received);
    assert_eq!(orders[0].memo, None);
    assert_eq!(orders[1].id.as_str(), "ORD-001");
}

#[tokio::test]
async fn test_create_with_unknown_status_is_rejected() {
    let server = TestServer::start().await;
    server.login().await;

    let resp = server
        .post_form(
            "/orders/new",
            &[("member_id", "m1"), ("address_id", "a1"), ("status", "BOGUS")],
        )
        .await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(resp.text().await.unwrap().contains("ステータスを選択し直してください"));
    assert_eq!(server.state.store().orders().await.len(), 6);
}
