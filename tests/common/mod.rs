#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::{json, Value};

use blog_creator_api::app::build_app;
use blog_creator_api::config::AppConfig;
use blog_creator_api::database::{MemoryBlogStore, MemoryUserStore};
use blog_creator_api::state::AppState;

pub const PASSWORD: &str = "testpass123";

/// An in-process server over in-memory stores, one per test
pub struct TestServer {
    pub base_url: String,
    pub blogs: MemoryBlogStore,
    pub users: MemoryUserStore,
    pub client: reqwest::Client,
}

impl TestServer {
    pub async fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .context("failed to bind test listener")?;

        let blogs = MemoryBlogStore::new();
        let users = MemoryUserStore::new();
        let state = AppState::new(AppConfig::development(), Arc::new(blogs.clone()), Arc::new(users.clone()));
        let app = build_app(state);

        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        let server = Self {
            base_url: format!("http://127.0.0.1:{}", port),
            blogs,
            users,
            client: reqwest::Client::new(),
        };
        server.wait_ready(Duration::from_secs(5)).await?;
        Ok(server)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = tokio::time::Instant::now() + timeout;
        while tokio::time::Instant::now() < deadline {
            if let Ok(resp) = self.client.get(self.url("/health")).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Registers `email` and returns a token for it
    pub async fn login(&self, email: &str) -> Result<String> {
        let res = self
            .client
            .post(self.url("/users"))
            .json(&json!({ "email": email, "password": PASSWORD, "name": "Test User" }))
            .send()
            .await?;
        anyhow::ensure!(res.status() == StatusCode::CREATED, "register failed: {}", res.status());

        let res = self
            .client
            .post(self.url("/users/token"))
            .json(&json!({ "email": email, "password": PASSWORD }))
            .send()
            .await?;
        anyhow::ensure!(res.status() == StatusCode::OK, "token failed: {}", res.status());

        let body: Value = res.json().await?;
        body["token"]
            .as_str()
            .map(str::to_string)
            .context("token missing from response")
    }

    /// Creates a blog as the given token and returns the response body
    pub async fn create_blog(&self, token: &str, title: &str) -> Result<Value> {
        let res = self
            .client
            .post(self.url("/blogs"))
            .bearer_auth(token)
            .json(&sample_blog(title))
            .send()
            .await?;
        anyhow::ensure!(res.status() == StatusCode::CREATED, "create failed: {}", res.status());
        Ok(res.json().await?)
    }
}

pub fn sample_blog(title: &str) -> Value {
    json!({
        "title": title,
        "caption": "Notes from the road",
        "url": "https://example.com/post",
        "time_minutes": 5
    })
}
