//! Shipping address list and creation over HTTP.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use protein_admin_integration_tests::{TestServer, location};
use reqwest::StatusCode;

#[tokio::test]
async fn test_member_filter() {
    let server = TestServer::start().await;
    server.login().await;

    let body = server
        .get("/shipping?member_id=m1")
        .await
        .text()
        .await
        .unwrap();
    assert!(body.contains(">a1<"));
    assert!(body.contains(">a2<"));
    assert!(!body.contains(">a3<"));
    assert!(body.contains("/shipping/new?member_id=m1"));
}

#[tokio::test]
async fn test_create_address() {
    let server = TestServer::start().await;
    server.login().await;

    let resp = server
        .post_form(
            "/shipping/new",
            &[
                ("member_id", "m4"),
                ("label", "実家"),
                ("postal_code", "9800001"),
                ("address1", "宮城県仙台市青葉区"),
                ("address2", "中央1-1"),
                ("recipient_name", "高橋 優子"),
                ("is_active", "on"),
            ],
        )
        .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/shipping");

    let addresses = server.state.store().addresses().await;
    assert_eq!(addresses.len(), 6);
    let created = addresses.last().unwrap();
    assert_eq!(created.id.as_str(), "a6");
    assert_eq!(created.postal_code, "980-0001");

    let body = server
        .get("/orders/new?member_id=m4")
        .await
        .text()
        .await
        .unwrap();
    assert!(body.contains("value=\"a6\""));
}

#[tokio::test]
async fn test_create_address_missing_fields() {
    let server = TestServer::start().await;
    server.login().await;

    let resp = server
        .post_form("/shipping/new", &[("member_id", "m1"), ("label", "")])
        .await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(resp.text().await.unwrap().contains("ラベルを入力してください"));
    assert_eq!(server.state.store().addresses().await.len(), 5);
}
