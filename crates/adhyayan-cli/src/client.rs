//! HTTP client for the Adhyayan API.
//!
//! Bearer-token auth, generic GET/POST helpers, and the review-queue calls the
//! CLI needs.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// API version prefix (e.g. "/api/v0"). Set ADHYAYAN_API_VERSION to match the server.
pub fn api_prefix() -> String {
    let version = std::env::var("ADHYAYAN_API_VERSION").unwrap_or_else(|_| "v0".to_string());
    format!("/api/{}", version)
}

/// A content record as returned by the admin endpoints. Only the fields the
/// CLI displays are kept.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentSummary {
    pub id: Uuid,
    pub title: String,
    #[serde(rename = "type")]
    pub content_type: String,
    pub branch: String,
    pub year: String,
    pub subject: String,
    pub status: String,
    pub uploader_id: Uuid,
    pub rejection_reason: Option<String>,
    pub canonical_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
struct LoginBody<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct RejectBody<'a> {
    reason: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: String, token: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    /// Create client from environment: ADHYAYAN_API_URL (or API_URL) and,
    /// optionally, ADHYAYAN_TOKEN.
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("ADHYAYAN_API_URL")
            .or_else(|_| std::env::var("API_URL"))
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let token = std::env::var("ADHYAYAN_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty());

        Self::new(base_url, token)
    }

    pub fn build_url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, api_prefix(), path)
    }

    fn apply_auth(&self, request: RequestBuilder) -> Result<RequestBuilder> {
        let token = self
            .token
            .as_deref()
            .context("Missing token. Run `adhyayan login` and set ADHYAYAN_TOKEN")?;
        Ok(request.header("Authorization", format!("Bearer {}", token)))
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(anyhow::anyhow!(
                "API request failed with status {}: {}",
                status,
                error_text
            ));
        }

        response
            .json()
            .await
            .context("Failed to parse response as JSON")
    }

    /// Authenticated GET with query parameters.
    pub async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        let mut request = self.apply_auth(self.client.get(self.build_url(path)))?;
        if !query.is_empty() {
            request = request.query(query);
        }
        let response = request.send().await.context("Failed to send request")?;
        Self::read_json(response).await
    }

    /// Authenticated POST with a JSON body.
    pub async fn post_json<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let request = self.apply_auth(self.client.post(self.build_url(path)).json(body))?;
        let response = request.send().await.context("Failed to send request")?;
        Self::read_json(response).await
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse> {
        let response = self
            .client
            .post(self.build_url("/auth/login"))
            .json(&LoginBody { email, password })
            .send()
            .await
            .context("Failed to send request")?;
        Self::read_json(response).await
    }

    pub async fn review_queue(&self, status: &str, limit: u32) -> Result<Vec<ContentSummary>> {
        self.get(
            "/admin/content",
            &[("status", status.to_string()), ("limit", limit.to_string())],
        )
        .await
    }

    pub async fn approve(&self, id: Uuid) -> Result<ContentSummary> {
        self.post_json(
            &format!("/admin/content/{}/approve", id),
            &serde_json::json!({}),
        )
        .await
    }

    pub async fn reject(&self, id: Uuid, reason: Option<&str>) -> Result<ContentSummary> {
        self.post_json(
            &format!("/admin/content/{}/reject", id),
            &RejectBody { reason },
        )
        .await
    }

    pub async fn stats(&self) -> Result<serde_json::Value> {
        self.get("/admin/stats", &[]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url_trims_trailing_slash() {
        let client = ApiClient::new("http://localhost:3000/".to_string(), None).unwrap();
        assert_eq!(
            client.build_url("/admin/stats"),
            format!("http://localhost:3000{}/admin/stats", api_prefix())
        );
    }

    #[test]
    fn test_requests_need_token() {
        let client = ApiClient::new(DEFAULT_BASE_URL.to_string(), None).unwrap();
        let request = client.client.get(client.build_url("/admin/stats"));
        assert!(client.apply_auth(request).is_err());
    }

    #[test]
    fn test_content_summary_ignores_extra_fields() {
        let raw = serde_json::json!({
            "id": "8f0c9a0e-4a51-4d39-9a53-0f8f6f0f3b61",
            "title": "Trees",
            "description": "notes",
            "type": "note",
            "department": "Engineering",
            "branch": "CSE",
            "year": "2nd Year",
            "subject": "DSA",
            "status": "pending",
            "uploader_id": "2b0f4f0e-1a51-4d39-9a53-0f8f6f0f3b62",
            "rejection_reason": null,
            "views": 0,
            "canonical_url": "/browse/engineering/cse/2nd-year/data-structures",
            "created_at": "2024-03-01T10:00:00Z"
        });
        let summary: ContentSummary = serde_json::from_value(raw).unwrap();
        assert_eq!(summary.content_type, "note");
        assert_eq!(summary.status, "pending");
    }
}
