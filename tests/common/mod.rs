// tests/common/mod.rs

#![allow(dead_code)]

use stream_advisor::{config::Config, routes, seed::seed, state::AppState, store::MemoryStore};

pub const ADMIN_USERNAME: &str = "admin_root";
pub const ADMIN_PASSWORD: &str = "admin_password";

pub fn test_config() -> Config {
    Config {
        database_url: None,
        jwt_secret: "test_secret_for_integration_tests".to_string(),
        jwt_expiration: 600, // 10 minutes for tests
        rust_log: "error".to_string(),
        admin_username: Some(ADMIN_USERNAME.to_string()),
        admin_password: Some(ADMIN_PASSWORD.to_string()),
        port: 0,
        quiz_page_size: 10,
    }
}

/// Seeds `state`, spawns the app on a random port and returns the base URL
/// (e.g., "http://127.0.0.1:12345").
pub async fn spawn_with_state(state: AppState) -> String {
    seed(&state, &state.config.clone())
        .await
        .expect("Failed to seed test state");

    let app = routes::create_router(state);

    // Bind to port 0 to get a random available port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");

    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    address
}

pub async fn spawn_app() -> String {
    spawn_with_state(AppState::from_store(MemoryStore::new(), test_config())).await
}

pub fn unique_name() -> String {
    format!("u_{}", &uuid::Uuid::new_v4().to_string()[..8])
}

pub async fn login(client: &reqwest::Client, address: &str, username: &str, password: &str) -> String {
    let resp = client
        .post(format!("{}/api/auth/login", address))
        .json(&serde_json::json!({ "username": username, "password": password }))
        .send()
        .await
        .expect("Login failed")
        .json::<serde_json::Value>()
        .await
        .expect("Failed to parse login json");

    resp["token"].as_str().expect("Token not found").to_string()
}

/// Registers a fresh student and returns a bearer token for them.
pub async fn student_token(client: &reqwest::Client, address: &str) -> String {
    let username = unique_name();
    let password = "password123";

    let resp = client
        .post(format!("{}/api/auth/register", address))
        .json(&serde_json::json!({ "username": username, "password": password }))
        .send()
        .await
        .expect("Register failed");
    assert_eq!(resp.status().as_u16(), 201);

    login(client, address, &username, password).await
}

pub async fn admin_token(client: &reqwest::Client, address: &str) -> String {
    login(client, address, ADMIN_USERNAME, ADMIN_PASSWORD).await
}
