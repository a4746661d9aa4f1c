#![allow(dead_code)]

use carrier_service::config::{AuthConfig, Config, DatabaseConfig, FmcsaConfig, ServerConfig};
use carrier_service::Application;
use secrecy::Secret;
use std::time::Duration;

pub const TEST_API_KEY: &str = "test-api-key";
pub const TEST_WEBKEY: &str = "test-webkey";

/// Config pointing the registry client at a mock server, with a short
/// timeout so timeout-path tests stay fast.
pub fn test_config(fmcsa_base_url: &str) -> Config {
    Config {
        server: ServerConfig {
            port: 0,
            debug: false,
        },
        auth: AuthConfig {
            api_secret_key: Some(Secret::new(TEST_API_KEY.to_string())),
        },
        fmcsa: FmcsaConfig {
            base_url: fmcsa_base_url.to_string(),
            webkey: Some(Secret::new(TEST_WEBKEY.to_string())),
            timeout: Duration::from_secs(2),
        },
        database: DatabaseConfig::default(),
    }
}

pub struct TestApp {
    pub address: String,
    client: reqwest::Client,
}

impl TestApp {
    pub async fn spawn(fmcsa_base_url: &str) -> Self {
        Self::spawn_with(test_config(fmcsa_base_url)).await
    }

    pub async fn spawn_with(config: Config) -> Self {
        let app = Application::build(config)
            .await
            .expect("Failed to build test application");
        let address = format!("http://127.0.0.1:{}", app.port());

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        TestApp {
            address,
            client: reqwest::Client::new(),
        }
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(format!("{}{}", self.address, path))
            .header("X-API-Key", TEST_API_KEY)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get_without_key(&self, path: &str) -> reqwest::Response {
        self.client
            .get(format!("{}{}", self.address, path))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_json(&self, path: &str, body: serde_json::Value) -> reqwest::Response {
        self.client
            .post(format!("{}{}", self.address, path))
            .header("X-API-Key", TEST_API_KEY)
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_json_with_key(
        &self,
        path: &str,
        body: serde_json::Value,
        api_key: Option<&str>,
    ) -> reqwest::Response {
        let mut request = self.client.post(format!("{}{}", self.address, path));
        if let Some(key) = api_key {
            request = request.header("X-API-Key", key);
        }
        request
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request")
    }
}
