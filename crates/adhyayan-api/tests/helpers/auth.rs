use axum_test::TestServer;
use serde_json::json;
use uuid::Uuid;

use super::{api_path, ADMIN_EMAIL};

pub const TEST_PASSWORD: &str = "TestPassword123!";

/// Registered account plus its bearer token.
pub struct TestUser {
    pub email: String,
    pub user_id: Uuid,
    pub token: String,
}

impl TestUser {
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

/// Register a student account through the API.
pub async fn register_test_user(client: &TestServer, name: &str, email: &str) -> TestUser {
    register_with_branch(client, name, email, None).await
}

pub async fn register_with_branch(
    client: &TestServer,
    name: &str,
    email: &str,
    branch: Option<&str>,
) -> TestUser {
    let response = client
        .post(&api_path("/auth/register"))
        .json(&json!({
            "name": name,
            "email": email,
            "password": TEST_PASSWORD,
            "branch": branch,
        }))
        .await;

    assert_eq!(response.status_code(), 201, "registration should succeed");
    let data: serde_json::Value = response.json();
    TestUser {
        email: email.to_string(),
        user_id: data["user"]["id"]
            .as_str()
            .and_then(|id| Uuid::parse_str(id).ok())
            .expect("user id in auth response"),
        token: data["token"].as_str().expect("token in auth response").to_string(),
    }
}

/// Register the configured admin account.
pub async fn register_admin(client: &TestServer) -> TestUser {
    register_test_user(client, "Admin", ADMIN_EMAIL).await
}
