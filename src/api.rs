//! REST client for the backend.
//!
//! Covers the public projects listing, the admin projects CRUD endpoints and
//! the admin auth endpoints. The backend owns the response schema; unknown
//! fields are kept in `extra` so nothing is lost on a round trip.

use crate::config::Config;
use crate::context::auth::AuthBackend;
use crate::error::ApiError;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

pub type ProjectId = i64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body of a create or update request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectInput {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub is_published: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminUser {
    pub username: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoginResponse {
    #[serde(alias = "access_token")]
    pub token: String,
    #[serde(default)]
    pub user: Option<AdminUser>,
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self::new(client, &config.api_base_url))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ==================== Projects ====================

    /// Published projects shown on the public site.
    pub async fn list_public_projects(&self) -> Result<Vec<Project>, ApiError> {
        let endpoint = "/projects";
        self.send_json(endpoint, self.client.get(self.url(endpoint))).await
    }

    /// Every project, including unpublished ones.
    pub async fn list_admin_projects(&self, token: &str) -> Result<Vec<Project>, ApiError> {
        let endpoint = "/admin/projects";
        let request = self.client.get(self.url(endpoint)).bearer_auth(token);
        self.send_json(endpoint, request).await
    }

    pub async fn get_project(&self, token: &str, id: ProjectId) -> Result<Project, ApiError> {
        let endpoint = format!("/admin/projects/{}", id);
        let request = self.client.get(self.url(&endpoint)).bearer_auth(token);
        self.send_json(&endpoint, request).await
    }

    pub async fn create_project(
        &self,
        token: &str,
        input: &ProjectInput,
    ) -> Result<Project, ApiError> {
        let endpoint = "/admin/projects";
        let request = self
            .client
            .post(self.url(endpoint))
            .bearer_auth(token)
            .json(input);
        self.send_json(endpoint, request).await
    }

    pub async fn update_project(
        &self,
        token: &str,
        id: ProjectId,
        input: &ProjectInput,
    ) -> Result<Project, ApiError> {
        let endpoint = format!("/admin/projects/{}", id);
        let request = self
            .client
            .put(self.url(&endpoint))
            .bearer_auth(token)
            .json(input);
        self.send_json(&endpoint, request).await
    }

    pub async fn delete_project(&self, token: &str, id: ProjectId) -> Result<(), ApiError> {
        let endpoint = format!("/admin/projects/{}", id);
        let request = self.client.delete(self.url(&endpoint)).bearer_auth(token);
        self.send(&endpoint, request).await.map(|_| ())
    }

    // ==================== Transport ====================

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// Send a request and return the body of a successful response.
    async fn send(&self, endpoint: &str, request: RequestBuilder) -> Result<String, ApiError> {
        let response = request.send().await.map_err(|e| ApiError::Transport {
            endpoint: endpoint.to_string(),
            message: e.to_string(),
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|e| format!("<failed to read body: {}>", e));

        if !status.is_success() {
            return Err(ApiError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        debug!("{} -> {}", endpoint, status);
        Ok(body)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        let body = self.send(endpoint, request).await?;
        serde_json::from_str(&body).map_err(|e| ApiError::Decode {
            endpoint: endpoint.to_string(),
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl AuthBackend for ApiClient {
    async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let endpoint = "/auth/login";
        let request = self
            .client
            .post(self.url(endpoint))
            .json(&LoginRequest { username, password });
        self.send_json(endpoint, request).await
    }

    async fn current_user(&self, token: &str) -> Result<AdminUser, ApiError> {
        let endpoint = "/auth/me";
        let request = self.client.get(self.url(endpoint)).bearer_auth(token);
        self.send_json(endpoint, request).await
    }
}
