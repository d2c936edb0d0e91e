//! E2E tests for accounts and follow relationships

mod common;

use common::TestServer;
use murmur::api::{AccountResponse, RelationshipResponse};
use serde_json::Value;

#[tokio::test]
async fn test_create_and_get_account() {
    let server = TestServer::new().await;

    let created = server.create_account("alice").await;
    assert_eq!(created.username, "alice");
    assert_eq!(created.following_count, 0);
    assert_eq!(created.followers_count, 0);

    let fetched = server.get_account("alice").await;
    assert_eq!(fetched.id, created.id);
}

#[tokio::test]
async fn test_duplicate_username_conflicts() {
    let server = TestServer::new().await;
    server.create_account("alice").await;

    let response = server
        .client
        .post(server.url("/api/v1/accounts"))
        .json(&serde_json::json!({ "username": "alice" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 409);

    let body: Value = response.json().await.unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_malformed_account_body_is_rejected() {
    let server = TestServer::new().await;

    let response = server
        .client
        .post(server.url("/api/v1/accounts"))
        .json(&serde_json::json!({ "display_name": "no username" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn test_unknown_account_is_404() {
    let server = TestServer::new().await;

    let response = server
        .client
        .get(server.url("/api/v1/accounts/nobody"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_follow_requires_authentication() {
    let server = TestServer::new().await;
    server.create_account("bob").await;

    let response = server
        .client
        .post(server.url("/api/v1/accounts/bob/follow"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 401);

    let response = server
        .client
        .post(server.url("/api/v1/accounts/bob/follow"))
        .header("Authentication", "username ghost")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn test_follow_updates_both_counters() {
    let server = TestServer::new().await;
    let alice = server.create_account("alice").await;
    let bob = server.create_account("bob").await;

    let (name, value) = TestServer::auth("alice");
    let response = server
        .client
        .post(server.url("/api/v1/accounts/bob/follow"))
        .header(name, value)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let edge: RelationshipResponse = response.json().await.unwrap();
    assert_eq!(edge.following_id, alice.id);
    assert_eq!(edge.follower_id, bob.id);

    let alice = server.get_account("alice").await;
    let bob = server.get_account("bob").await;
    assert_eq!(alice.following_count, 1);
    assert_eq!(alice.followers_count, 0);
    assert_eq!(bob.following_count, 0);
    assert_eq!(bob.followers_count, 1);
}

#[tokio::test]
async fn test_duplicate_follow_conflicts_without_counter_change() {
    let server = TestServer::new().await;
    server.create_account("alice").await;
    server.create_account("bob").await;

    assert_eq!(server.follow("alice", "bob").await, 200);
    assert_eq!(server.follow("alice", "bob").await, 409);

    assert_eq!(server.get_account("alice").await.following_count, 1);
    assert_eq!(server.get_account("bob").await.followers_count, 1);
}

#[tokio::test]
async fn test_concurrent_follows_commit_once() {
    let server = TestServer::new().await;
    server.create_account("alice").await;
    server.create_account("bob").await;

    let (first, second) = tokio::join!(
        server.follow("alice", "bob"),
        server.follow("alice", "bob")
    );
    let mut codes = vec![first, second];
    codes.sort_unstable();
    assert_eq!(codes, vec![200, 409]);

    assert_eq!(server.get_account("alice").await.following_count, 1);
    assert_eq!(server.get_account("bob").await.followers_count, 1);
}

#[tokio::test]
async fn test_follow_self_and_unknown_target() {
    let server = TestServer::new().await;
    server.create_account("alice").await;

    assert_eq!(server.follow("alice", "alice").await, 400);
    assert_eq!(server.follow("alice", "nobody").await, 404);

    let alice = server.get_account("alice").await;
    assert_eq!(alice.following_count, 0);
    assert_eq!(alice.followers_count, 0);
}

#[tokio::test]
async fn test_unfollow_restores_counters() {
    let server = TestServer::new().await;
    server.create_account("alice").await;
    server.create_account("bob").await;

    assert_eq!(server.follow("alice", "bob").await, 200);
    assert_eq!(server.unfollow("alice", "bob").await, 200);

    assert_eq!(server.get_account("alice").await.following_count, 0);
    assert_eq!(server.get_account("bob").await.followers_count, 0);

    // Nothing left to remove
    assert_eq!(server.unfollow("alice", "bob").await, 404);
    assert_eq!(server.get_account("alice").await.following_count, 0);
}

#[tokio::test]
async fn test_relationships_lists_both_directions() {
    let server = TestServer::new().await;
    let alice = server.create_account("alice").await;
    let bob = server.create_account("bob").await;
    let carol = server.create_account("carol").await;

    assert_eq!(server.follow("alice", "bob").await, 200);
    assert_eq!(server.follow("carol", "alice").await, 200);
    assert_eq!(server.follow("bob", "carol").await, 200);

    let (name, value) = TestServer::auth("alice");
    let response = server
        .client
        .get(server.url("/api/v1/accounts/relationships"))
        .header(name, value)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let edges: Vec<RelationshipResponse> = response.json().await.unwrap();
    let pairs: Vec<_> = edges
        .iter()
        .map(|edge| (edge.following_id, edge.follower_id))
        .collect();
    assert_eq!(pairs, vec![(alice.id, bob.id), (carol.id, alice.id)]);
}

#[tokio::test]
async fn test_following_and_followers_listings() {
    let server = TestServer::new().await;
    server.create_account("alice").await;
    for name in ["bob", "carol", "dave"] {
        server.create_account(name).await;
        assert_eq!(server.follow("alice", name).await, 200);
        assert_eq!(server.follow(name, "alice").await, 200);
    }

    let following: Vec<AccountResponse> = server
        .client
        .get(server.url("/api/v1/accounts/alice/following?limit=2"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let names: Vec<_> = following.iter().map(|a| a.username.as_str()).collect();
    assert_eq!(names, vec!["dave", "carol"]);

    let followers: Vec<AccountResponse> = server
        .client
        .get(server.url("/api/v1/accounts/alice/followers"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let names: Vec<_> = followers.iter().map(|a| a.username.as_str()).collect();
    assert_eq!(names, vec!["dave", "carol", "bob"]);

    let carol_id = followers[1].id;
    let windowed: Vec<AccountResponse> = server
        .client
        .get(server.url(&format!(
            "/api/v1/accounts/alice/followers?max_id={carol_id}"
        )))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let names: Vec<_> = windowed.iter().map(|a| a.username.as_str()).collect();
    assert_eq!(names, vec!["carol", "bob"]);
}

#[tokio::test]
async fn test_listing_rejects_malformed_limit() {
    let server = TestServer::new().await;
    server.create_account("alice").await;

    let response = server
        .client
        .get(server.url("/api/v1/accounts/alice/followers?limit=abc"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);

    let response = server
        .client
        .get(server.url("/api/v1/accounts/alice/following?limit=-1"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
}
