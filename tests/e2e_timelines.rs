//! E2E tests for timeline endpoints

mod common;

use common::TestServer;
use murmur::api::StatusResponse;

async fn fetch(server: &TestServer, path: &str, actor: Option<&str>) -> (u16, Vec<i64>) {
    let mut request = server.client.get(server.url(path));
    if let Some(actor) = actor {
        let (name, value) = TestServer::auth(actor);
        request = request.header(name, value);
    }

    let response = request.send().await.unwrap();
    let status = response.status().as_u16();
    if status != 200 {
        return (status, Vec::new());
    }

    let statuses: Vec<StatusResponse> = response.json().await.unwrap();
    (status, statuses.iter().map(|s| s.id).collect())
}

/// Ten statuses with ids 1..=10
async fn seed(server: &TestServer) {
    server.create_account("alice").await;
    for n in 1..=10 {
        let status = server.post_status("alice", &format!("status {n}")).await;
        assert_eq!(status.id, n);
    }
}

#[tokio::test]
async fn test_public_timeline_empty() {
    let server = TestServer::new().await;

    let (status, ids) = fetch(&server, "/api/v1/timelines/public", None).await;
    assert_eq!(status, 200);
    assert!(ids.is_empty());
}

#[tokio::test]
async fn test_public_timeline_pagination() {
    let server = TestServer::new().await;
    seed(&server).await;

    let (_, ids) = fetch(&server, "/api/v1/timelines/public", None).await;
    assert_eq!(ids, (1..=10).rev().collect::<Vec<_>>());

    let (_, ids) = fetch(&server, "/api/v1/timelines/public?since_id=5", None).await;
    assert_eq!(ids, vec![10, 9, 8, 7, 6, 5]);

    let (_, ids) = fetch(&server, "/api/v1/timelines/public?max_id=5", None).await;
    assert_eq!(ids, vec![5, 4, 3, 2, 1]);

    let (_, ids) = fetch(
        &server,
        "/api/v1/timelines/public?since_id=5&max_id=8",
        None,
    )
    .await;
    assert_eq!(ids, vec![8, 7, 6, 5]);

    let (_, ids) = fetch(&server, "/api/v1/timelines/public?limit=5", None).await;
    assert_eq!(ids, vec![10, 9, 8, 7, 6]);

    let (_, ids) = fetch(&server, "/api/v1/timelines/public?limit=200", None).await;
    assert_eq!(ids.len(), 10);

    let (_, ids) = fetch(
        &server,
        "/api/v1/timelines/public?only_media=1&max_id=&limit=0",
        None,
    )
    .await;
    assert_eq!(ids.len(), 10);
}

#[tokio::test]
async fn test_public_timeline_rejects_malformed_cursor() {
    let server = TestServer::new().await;

    let (status, _) = fetch(&server, "/api/v1/timelines/public?max_id=abc", None).await;
    assert_eq!(status, 400);

    let (status, _) = fetch(&server, "/api/v1/timelines/public?limit=-5", None).await;
    assert_eq!(status, 400);
}

#[tokio::test]
async fn test_home_timeline_requires_authentication() {
    let server = TestServer::new().await;

    let (status, _) = fetch(&server, "/api/v1/timelines/home", None).await;
    assert_eq!(status, 401);
}

#[tokio::test]
async fn test_home_timeline_shows_followed_authors() {
    let server = TestServer::new().await;
    server.create_account("alice").await;
    server.create_account("bob").await;
    server.create_account("carol").await;

    let first = server.post_status("bob", "bob 1").await;
    server.post_status("carol", "carol 1").await;
    server.post_status("alice", "alice 1").await;
    let second = server.post_status("bob", "bob 2").await;

    let (status, ids) = fetch(&server, "/api/v1/timelines/home", Some("alice")).await;
    assert_eq!(status, 200);
    assert!(ids.is_empty());

    assert_eq!(server.follow("alice", "bob").await, 200);

    let (_, ids) = fetch(&server, "/api/v1/timelines/home", Some("alice")).await;
    assert_eq!(ids, vec![second.id, first.id]);

    let (_, ids) = fetch(
        &server,
        &format!("/api/v1/timelines/home?since_id={}", second.id),
        Some("alice"),
    )
    .await;
    assert_eq!(ids, vec![second.id]);

    assert_eq!(server.unfollow("alice", "bob").await, 200);
    let (_, ids) = fetch(&server, "/api/v1/timelines/home", Some("alice")).await;
    assert!(ids.is_empty());
}
