//! HTTP API integration tests.
//!
//! Tests for the participant, message and status endpoints against an
//! in-process server.

mod fixtures;

use std::time::Duration;

use fixtures::TestServer;
use roomchat_server::SweeperSettings;
use serde_json::{Value, json};

async fn register(client: &reqwest::Client, server: &TestServer, name: &str) -> u16 {
    client
        .post(format!("{}/participants", server.base_url()))
        .json(&json!({ "name": name }))
        .send()
        .await
        .expect("Failed to send request")
        .status()
        .as_u16()
}

async fn post_message(
    client: &reqwest::Client,
    server: &TestServer,
    user: &str,
    body: Value,
) -> u16 {
    client
        .post(format!("{}/messages", server.base_url()))
        .header("user", user)
        .json(&body)
        .send()
        .await
        .expect("Failed to send request")
        .status()
        .as_u16()
}

async fn list_messages(
    client: &reqwest::Client,
    server: &TestServer,
    user: &str,
    limit: Option<&str>,
) -> reqwest::Response {
    let mut url = format!("{}/messages", server.base_url());
    if let Some(limit) = limit {
        url.push_str(&format!("?limit={limit}"));
    }
    client
        .get(url)
        .header("user", user)
        .send()
        .await
        .expect("Failed to send request")
}

fn texts(body: &Value) -> Vec<String> {
    body.as_array()
        .expect("Response should be an array")
        .iter()
        .map(|m| m["text"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_health_endpoint() {
    // テスト項目: /health エンドポイントが正常に動作する
    // given (前提条件):
    let server = TestServer::start().await;
    let client = reqwest::Client::new();

    // when (操作):
    let response = client
        .get(format!("{}/health", server.base_url()))
        .send()
        .await
        .expect("Failed to send request");

    // then (期待する結果):
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_register_then_duplicate_conflicts() {
    // テスト項目: 同名の再登録は 409 になり、参加者一覧には 1 人だけ残る
    // given (前提条件):
    let server = TestServer::start().await;
    let client = reqwest::Client::new();

    // when (操作):
    let first = register(&client, &server, "Ana").await;
    let second = register(&client, &server, "Ana").await;

    // then (期待する結果):
    assert_eq!(first, 201);
    assert_eq!(second, 409);

    let response = client
        .get(format!("{}/participants", server.base_url()))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.expect("Failed to parse JSON");
    let participants = body.as_array().unwrap();
    assert_eq!(participants.len(), 1);
    assert_eq!(participants[0]["name"], "Ana");
    assert!(participants[0]["lastStatus"].is_i64());
}

#[tokio::test]
async fn test_register_validation_failures() {
    // テスト項目: 名前が空・欠落・予約語・JSON 不正の場合は 422
    // given (前提条件):
    let server = TestServer::start().await;
    let client = reqwest::Client::new();
    let url = format!("{}/participants", server.base_url());

    // when (操作) / then (期待する結果):
    assert_eq!(register(&client, &server, "").await, 422);
    assert_eq!(register(&client, &server, "Todos").await, 422);
    assert_eq!(register(&client, &server, " Ana ").await, 422);

    let missing = client.post(&url).json(&json!({})).send().await.unwrap();
    assert_eq!(missing.status(), 422);

    let malformed = client
        .post(&url)
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(malformed.status(), 422);
    let body: Value = malformed.json().await.unwrap();
    assert_eq!(body["code"], "UNPROCESSABLE");
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_public_message_visible_to_every_viewer() {
    // テスト項目: 公開メッセージは誰の一覧にも含まれる
    // given (前提条件):
    let server = TestServer::start().await;
    let client = reqwest::Client::new();
    register(&client, &server, "Ana").await;

    // when (操作):
    let status = post_message(
        &client,
        &server,
        "Ana",
        json!({ "to": "Todos", "text": "hi", "type": "message" }),
    )
    .await;

    // then (期待する結果):
    assert_eq!(status, 201);
    for viewer in ["Ana", "Bob", "Carol"] {
        let response = list_messages(&client, &server, viewer, None).await;
        assert_eq!(response.status(), 200);
        let body: Value = response.json().await.unwrap();
        assert_eq!(texts(&body), vec!["hi"], "viewer = {viewer}");
        let message = &body[0];
        assert_eq!(message["from"], "Ana");
        assert_eq!(message["to"], "Todos");
        assert_eq!(message["type"], "message");
        assert_eq!(message["time"].as_str().unwrap().len(), 8);
    }
}

#[tokio::test]
async fn test_private_message_visibility() {
    // テスト項目: 非公開メッセージは送信者と受信者にのみ見える
    // given (前提条件):
    let server = TestServer::start().await;
    let client = reqwest::Client::new();
    register(&client, &server, "Ana").await;

    // when (操作):
    let status = post_message(
        &client,
        &server,
        "Ana",
        json!({ "to": "Bob", "text": "secret", "type": "private_message" }),
    )
    .await;

    // then (期待する結果):
    assert_eq!(status, 201);
    let bob: Value = list_messages(&client, &server, "Bob", None)
        .await
        .json()
        .await
        .unwrap();
    let ana: Value = list_messages(&client, &server, "Ana", None)
        .await
        .json()
        .await
        .unwrap();
    let carol: Value = list_messages(&client, &server, "Carol", None)
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(texts(&bob), vec!["secret"]);
    assert_eq!(texts(&ana), vec!["secret"]);
    assert!(texts(&carol).is_empty());
}

#[tokio::test]
async fn test_message_from_unregistered_sender_is_rejected() {
    // テスト項目: 未登録の送信者のメッセージは 422 になり、ログに追加されない
    // given (前提条件):
    let server = TestServer::start().await;
    let client = reqwest::Client::new();

    // when (操作):
    let status = post_message(
        &client,
        &server,
        "Ghost",
        json!({ "to": "Todos", "text": "boo", "type": "message" }),
    )
    .await;

    // then (期待する結果):
    assert_eq!(status, 422);
    let state: Value = client
        .get(format!("{}/debug/state", server.base_url()))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(state["messages"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_message_validation_failures() {
    // テスト項目: to/text/type の欠落や不正な type は 422
    // given (前提条件):
    let server = TestServer::start().await;
    let client = reqwest::Client::new();
    register(&client, &server, "Ana").await;

    let invalid_bodies = [
        json!({ "text": "hi", "type": "message" }),
        json!({ "to": "Todos", "type": "message" }),
        json!({ "to": "Todos", "text": "", "type": "message" }),
        json!({ "to": "Todos", "text": "hi" }),
        json!({ "to": "Todos", "text": "hi", "type": "status" }),
        json!({ "to": "Todos", "text": "hi", "type": "shout" }),
    ];

    // when (操作) / then (期待する結果):
    for body in invalid_bodies {
        let status = post_message(&client, &server, "Ana", body.clone()).await;
        assert_eq!(status, 422, "body = {body}");
    }

    let missing_user = client
        .post(format!("{}/messages", server.base_url()))
        .json(&json!({ "to": "Todos", "text": "hi", "type": "message" }))
        .send()
        .await
        .unwrap();
    assert_eq!(missing_user.status(), 422);
}

#[tokio::test]
async fn test_list_messages_limit() {
    // テスト項目: limit 指定時は末尾 N 件、不正な limit は 422
    // given (前提条件):
    let server = TestServer::start().await;
    let client = reqwest::Client::new();
    register(&client, &server, "Ana").await;
    for text in ["one", "two", "three"] {
        post_message(
            &client,
            &server,
            "Ana",
            json!({ "to": "Todos", "text": text, "type": "message" }),
        )
        .await;
    }

    // when (操作):
    let limited: Value = list_messages(&client, &server, "Ana", Some("2"))
        .await
        .json()
        .await
        .unwrap();

    // then (期待する結果):
    assert_eq!(texts(&limited), vec!["two", "three"]);
    for invalid in ["0", "-1", "abc", "1&limit=2"] {
        let response = list_messages(&client, &server, "Ana", Some(invalid)).await;
        assert_eq!(response.status(), 422, "limit = {invalid}");
    }

    // usize に収まらない正の整数は全件扱い
    let huge = list_messages(&client, &server, "Ana", Some("99999999999999999999999")).await;
    assert_eq!(huge.status(), 200);
    let body: Value = huge.json().await.unwrap();
    assert_eq!(texts(&body), vec!["one", "two", "three"]);
}

#[tokio::test]
async fn test_registered_name_matches_user_header() {
    // テスト項目: 登録した名前でそのままハートビート・投稿できる
    // given (前提条件):
    let server = TestServer::start().await;
    let client = reqwest::Client::new();
    assert_eq!(register(&client, &server, "Ana Maria").await, 201);

    // when (操作):
    let heartbeat = client
        .post(format!("{}/status", server.base_url()))
        .header("user", "Ana Maria")
        .send()
        .await
        .unwrap();
    let posted = post_message(
        &client,
        &server,
        "Ana Maria",
        json!({ "to": "Todos", "text": "hola", "type": "message" }),
    )
    .await;

    // then (期待する結果):
    assert_eq!(heartbeat.status(), 200);
    assert_eq!(posted, 201);
}

#[tokio::test]
async fn test_heartbeat() {
    // テスト項目: 登録済みの参加者は 200、未登録・ヘッダー欠落は 404
    // given (前提条件):
    let server = TestServer::start().await;
    let client = reqwest::Client::new();
    register(&client, &server, "Ana").await;
    let url = format!("{}/status", server.base_url());

    // when (操作):
    let registered = client.post(&url).header("user", "Ana").send().await.unwrap();
    let unknown = client.post(&url).header("user", "Bob").send().await.unwrap();
    let missing = client.post(&url).send().await.unwrap();

    // then (期待する結果):
    assert_eq!(registered.status(), 200);
    assert_eq!(unknown.status(), 404);
    assert_eq!(missing.status(), 404);
}

#[tokio::test]
async fn test_stale_participant_is_swept_with_left_message() {
    // テスト項目: TTL を超えた参加者は掃除され、退室メッセージがログに残る
    // given (前提条件):
    let server = TestServer::start_with_sweeper(SweeperSettings {
        interval: Duration::from_millis(100),
        ttl: Duration::from_millis(200),
    })
    .await;
    let client = reqwest::Client::new();
    assert_eq!(register(&client, &server, "Ana").await, 201);

    // when (操作): ハートビートを送らずに待つ
    tokio::time::sleep(Duration::from_millis(1000)).await;

    // then (期待する結果):
    let state: Value = client
        .get(format!("{}/debug/state", server.base_url()))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(state["participants"].as_array().unwrap().is_empty());

    let log: Vec<(String, String, String)> = state["messages"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| {
            (
                m["from"].as_str().unwrap().to_string(),
                m["type"].as_str().unwrap().to_string(),
                m["text"].as_str().unwrap().to_string(),
            )
        })
        .collect();
    assert_eq!(
        log,
        vec![
            ("Ana".to_string(), "status".to_string(), "joined".to_string()),
            ("Ana".to_string(), "status".to_string(), "left".to_string()),
        ]
    );

    // 退室後はハートビートできない
    let heartbeat = client
        .post(format!("{}/status", server.base_url()))
        .header("user", "Ana")
        .send()
        .await
        .unwrap();
    assert_eq!(heartbeat.status(), 404);
}

#[tokio::test]
async fn test_heartbeat_keeps_participant_alive() {
    // テスト項目: ハートビートを送り続ける参加者は掃除されない
    // given (前提条件):
    let server = TestServer::start_with_sweeper(SweeperSettings {
        interval: Duration::from_millis(100),
        ttl: Duration::from_millis(1000),
    })
    .await;
    let client = reqwest::Client::new();
    register(&client, &server, "Ana").await;

    // when (操作):
    for _ in 0..6 {
        tokio::time::sleep(Duration::from_millis(200)).await;
        let response = client
            .post(format!("{}/status", server.base_url()))
            .header("user", "Ana")
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
    }

    // then (期待する結果):
    let participants: Value = client
        .get(format!("{}/participants", server.base_url()))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(participants.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_sqlite_store_serves_same_api() {
    // テスト項目: SQLite ストアでも登録・投稿・可視性・重複検知が同じように動作する
    // given (前提条件):
    let server = TestServer::start_sqlite().await;
    let client = reqwest::Client::new();
    assert_eq!(register(&client, &server, "Ana").await, 201);
    assert_eq!(register(&client, &server, "Ana").await, 409);

    // when (操作):
    post_message(
        &client,
        &server,
        "Ana",
        json!({ "to": "Todos", "text": "hi", "type": "message" }),
    )
    .await;
    post_message(
        &client,
        &server,
        "Ana",
        json!({ "to": "Bob", "text": "secret", "type": "private_message" }),
    )
    .await;

    // then (期待する結果):
    let bob: Value = list_messages(&client, &server, "Bob", None)
        .await
        .json()
        .await
        .unwrap();
    let carol: Value = list_messages(&client, &server, "Carol", None)
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(texts(&bob), vec!["hi", "secret"]);
    assert_eq!(texts(&carol), vec!["hi"]);

    let heartbeat = client
        .post(format!("{}/status", server.base_url()))
        .header("user", "Ana")
        .send()
        .await
        .unwrap();
    assert_eq!(heartbeat.status(), 200);
}
