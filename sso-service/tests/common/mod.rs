use std::sync::Arc;
use std::time::Duration;

use sso_service::domain::identity::models::App;
use sso_service::domain::identity::models::AppId;
use sso_service::domain::identity::service::Authenticator;
use sso_service::inbound::http::router::create_router;
use sso_service::outbound::repositories::InMemoryStorage;

pub const APP_ID: i32 = 7;
pub const APP_SECRET: &str = "test-app-secret-for-jwt-signing";

/// Test application that spawns a real server backed by in-memory storage
pub struct TestApp {
    pub address: String,
    pub storage: Arc<InMemoryStorage>,
    pub api_client: reqwest::Client,
}

pub fn test_app_registration() -> App {
    App {
        id: AppId(APP_ID),
        name: "test-app".to_string(),
        secret: APP_SECRET.to_string(),
    }
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let storage = Arc::new(InMemoryStorage::with_apps(vec![test_app_registration()]));

        let authenticator = Arc::new(Authenticator::new(
            Arc::clone(&storage),
            Arc::clone(&storage),
            Arc::clone(&storage),
            chrono::Duration::hours(1),
        ));

        let router = create_router(authenticator, Duration::from_secs(10));

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            storage,
            api_client: reqwest::Client::new(),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(&format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(&format!("{}{}", self.address, path))
    }
}
