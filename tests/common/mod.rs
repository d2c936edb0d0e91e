//! Common test utilities for E2E tests

#![allow(dead_code)]

use murmur::api::{AccountResponse, StatusResponse};
use murmur::auth::AUTHENTICATION_HEADER;
use murmur::{AppState, config};
use tempfile::TempDir;
use tokio::net::TcpListener;

/// Test server instance
pub struct TestServer {
    pub addr: String,
    pub state: AppState,
    pub _temp_dir: TempDir,
    pub client: reqwest::Client,
}

impl TestServer {
    /// Create a new test server instance
    pub async fn new() -> Self {
        // Create temporary directory for test database
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");

        // Create test configuration
        let config = config::AppConfig {
            server: config::ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0, // Let OS assign port
            },
            database: config::DatabaseConfig {
                path: db_path,
                max_connections: 4,
            },
            logging: config::LoggingConfig {
                level: "info".to_string(),
                format: "pretty".to_string(),
            },
        };

        murmur::metrics::init_metrics();

        // Initialize app state
        let state = AppState::new(config).await.unwrap();

        // Create HTTP client
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .unwrap();

        // Bind to random port
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let addr_str = format!("http://{}", addr);

        let app = murmur::build_router(state.clone());

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Wait a bit for server to start
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        Self {
            addr: addr_str,
            state,
            _temp_dir: temp_dir,
            client,
        }
    }

    /// Get base URL for API requests
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.addr, path)
    }

    /// Header value identifying `username` as the caller
    pub fn auth(username: &str) -> (&'static str, String) {
        (AUTHENTICATION_HEADER, format!("username {username}"))
    }

    /// Create an account through the API
    pub async fn create_account(&self, username: &str) -> AccountResponse {
        let response = self
            .client
            .post(self.url("/api/v1/accounts"))
            .json(&serde_json::json!({ "username": username }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
        response.json().await.unwrap()
    }

    /// Fetch an account through the API
    pub async fn get_account(&self, username: &str) -> AccountResponse {
        let response = self
            .client
            .get(self.url(&format!("/api/v1/accounts/{username}")))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
        response.json().await.unwrap()
    }

    /// POST a follow as `actor`, returning the HTTP status code
    pub async fn follow(&self, actor: &str, target: &str) -> u16 {
        let (name, value) = Self::auth(actor);
        self.client
            .post(self.url(&format!("/api/v1/accounts/{target}/follow")))
            .header(name, value)
            .send()
            .await
            .unwrap()
            .status()
            .as_u16()
    }

    /// POST an unfollow as `actor`, returning the HTTP status code
    pub async fn unfollow(&self, actor: &str, target: &str) -> u16 {
        let (name, value) = Self::auth(actor);
        self.client
            .post(self.url(&format!("/api/v1/accounts/{target}/unfollow")))
            .header(name, value)
            .send()
            .await
            .unwrap()
            .status()
            .as_u16()
    }

    /// Post a status as `author`
    pub async fn post_status(&self, author: &str, content: &str) -> StatusResponse {
        let (name, value) = Self::auth(author);
        let response = self
            .client
            .post(self.url("/api/v1/statuses"))
            .header(name, value)
            .json(&serde_json::json!({ "status": content }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
        response.json().await.unwrap()
    }
}
