#![allow(dead_code)]

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::{json, Value};

use nawal_planner_api::{app, AppConfig, AppState};

pub const API_KEY: &str = "SUA_CHAVE_API_SECRETA";

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub client: reqwest::Client,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.client.get(self.url(path))
    }

    pub fn authed_get(&self, path: &str) -> reqwest::RequestBuilder {
        self.get(path).header("Authorization", API_KEY)
    }

    pub fn authed_post(&self, path: &str, body: &Value) -> reqwest::RequestBuilder {
        self.client
            .post(self.url(path))
            .header("Authorization", API_KEY)
            .json(body)
    }

    pub fn authed_delete(&self, path: &str) -> reqwest::RequestBuilder {
        self.client
            .delete(self.url(path))
            .header("Authorization", API_KEY)
    }

    /// POST a valid record and return the created body.
    pub async fn create(&self, collection: &str, name: &str) -> Result<Value> {
        let res = self
            .authed_post(
                &format!("/{}", collection),
                &json!({
                    "name": name,
                    "description": format!("{} description", name),
                    "dueDate": "2025-02-01"
                }),
            )
            .send()
            .await?;
        anyhow::ensure!(res.status() == StatusCode::CREATED, "create returned {}", res.status());
        Ok(res.json().await?)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            if let Ok(resp) = self.get("/health").send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }
}

fn test_config() -> AppConfig {
    let mut config = AppConfig::development();
    config.server.static_dir = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/public").to_string();
    config.api.enable_request_logging = false;
    config
}

/// Serve a fresh in-memory instance on a free port for the current test runtime.
pub async fn spawn_server_with_key(api_key: Option<&str>) -> Result<TestServer> {
    spawn_server_with_state(AppState::in_memory(api_key.map(str::to_string))).await
}

/// Serve the given state, e.g. with substitute repositories.
pub async fn spawn_server_with_state(state: AppState) -> Result<TestServer> {
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let base_url = format!("http://127.0.0.1:{}", port);

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
        .await
        .context("failed to bind test listener")?;
    let router = app(state, &test_config());

    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });

    let server = TestServer {
        port,
        base_url,
        client: reqwest::Client::new(),
    };
    server.wait_ready(Duration::from_secs(5)).await?;
    Ok(server)
}

pub async fn spawn_server() -> Result<TestServer> {
    spawn_server_with_key(Some(API_KEY)).await
}
