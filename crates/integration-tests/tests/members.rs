//! Member list and member edit over HTTP.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use protein_admin_core::MemberId;
use protein_admin_integration_tests::{TestServer, location};
use reqwest::StatusCode;

#[tokio::test]
async fn test_search_filters_members() {
    let server = TestServer::start().await;
    server.login().await;

    let body = server.get("/members?q=sato").await.text().await.unwrap();
    assert!(body.contains("佐藤 花子"));
    assert!(!body.contains("田中 太郎"));
}

#[tokio::test]
async fn test_edit_unknown_member_is_not_found() {
    let server = TestServer::start().await;
    server.login().await;

    let resp = server.get("/members/m99/edit").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_member() {
    let server = TestServer::start().await;
    server.login().await;

    let body = server.get("/members/m3/edit").await.text().await.unwrap();
    assert!(body.contains("鈴木 一郎"));

    let resp = server
        .post_form(
            "/members/m3/edit",
            &[
                ("name", "鈴木 一朗"),
                ("email", "ichiro@example.com"),
                ("phone", "08011112222"),
            ],
        )
        .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/members");

    let member = server
        .state
        .store()
        .member(&MemberId::new("m3"))
        .await
        .unwrap();
    assert_eq!(member.name, "鈴木 一朗");
    assert_eq!(member.email.as_str(), "ichiro@example.com");
    assert_eq!(member.phone.as_deref(), Some("080-1111-2222"));
    assert!(!member.is_active);
}

#[tokio::test]
async fn test_invalid_update_rerenders_with_errors() {
    let server = TestServer::start().await;
    server.login().await;

    let resp = server
        .post_form("/members/m1/edit", &[("name", ""), ("email", "broken")])
        .await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = resp.text().await.unwrap();
    assert!(body.contains("氏名を入力してください"));
    assert!(body.contains("メールアドレスの形式が正しくありません"));

    let member = server
        .state
        .store()
        .member(&MemberId::new("m1"))
        .await
        .unwrap();
    assert_eq!(member.name, "田中 太郎");
}
