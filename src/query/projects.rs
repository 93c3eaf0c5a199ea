//! Cached accessors for the projects resource.
//!
//! Reads go through the shared [`QueryCache`] under the project keys; every
//! successful mutation invalidates the whole `projects` family so the next
//! read of any list or detail goes back to the network.

use super::cache::QueryCache;
use super::key::project_keys;
use crate::api::{ApiClient, Project, ProjectId, ProjectInput};
use crate::config::Config;
use crate::context::AuthContext;
use crate::error::{ApiError, QueryError};
use crate::retry::{with_retry_if, RetryConfig};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

pub const PUBLIC_STALE_TIME: Duration = Duration::from_secs(5 * 60);
pub const ADMIN_STALE_TIME: Duration = Duration::from_secs(60);

/// What a view needs to render a query: the data if any, an error message
/// if the last attempt failed, and whether a refetch is running.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryState<T> {
    pub data: Option<T>,
    pub error: Option<String>,
    pub is_fetching: bool,
}

impl<T> QueryState<T> {
    pub fn from_result(result: Result<T, QueryError>, is_fetching: bool) -> Self {
        match result {
            Ok(data) => Self {
                data: Some(data),
                error: None,
                is_fetching,
            },
            Err(e) => Self {
                data: None,
                error: Some(e.to_string()),
                is_fetching,
            },
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

#[derive(Clone)]
pub struct ProjectQueries {
    api: ApiClient,
    cache: QueryCache,
    auth: Option<Arc<AuthContext>>,
    public_stale_time: Duration,
    admin_stale_time: Duration,
}

impl ProjectQueries {
    pub fn new(api: ApiClient, cache: QueryCache) -> Self {
        Self {
            api,
            cache,
            auth: None,
            public_stale_time: PUBLIC_STALE_TIME,
            admin_stale_time: ADMIN_STALE_TIME,
        }
    }

    pub fn from_config(config: &Config, api: ApiClient, cache: QueryCache) -> Self {
        Self::new(api, cache)
            .with_stale_times(config.public_stale_time(), config.admin_stale_time())
    }

    pub fn with_stale_times(mut self, public: Duration, admin: Duration) -> Self {
        self.public_stale_time = public;
        self.admin_stale_time = admin;
        self
    }

    /// Admin reads and mutations take their token from this session.
    pub fn with_auth(mut self, auth: Arc<AuthContext>) -> Self {
        self.auth = Some(auth);
        self
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    // ==================== Reads ====================

    pub async fn public_projects(&self) -> Result<Vec<Project>, QueryError> {
        let api = self.api.clone();
        let projects = self
            .cache
            .fetch(project_keys::public_list(), self.public_stale_time, move || {
                let api = api.clone();
                async move { api.list_public_projects().await }
            })
            .await?;
        Ok(projects)
    }

    pub async fn admin_projects(&self) -> Result<Vec<Project>, QueryError> {
        let token = self.token()?;
        let api = self.api.clone();
        let projects = self
            .cache
            .fetch(project_keys::admin_list(), self.admin_stale_time, move || {
                let api = api.clone();
                let token = token.clone();
                async move { api.list_admin_projects(&token).await }
            })
            .await?;
        Ok(projects)
    }

    pub async fn project(&self, id: ProjectId) -> Result<Project, QueryError> {
        let token = self.token()?;
        let api = self.api.clone();
        let project = self
            .cache
            .fetch(project_keys::detail(id), self.admin_stale_time, move || {
                let api = api.clone();
                let token = token.clone();
                async move { api.get_project(&token, id).await }
            })
            .await?;
        Ok(project)
    }

    pub async fn public_projects_state(&self) -> QueryState<Vec<Project>> {
        let result = self.public_projects().await;
        QueryState::from_result(result, self.cache.is_fetching(&project_keys::public_list()))
    }

    pub async fn admin_projects_state(&self) -> QueryState<Vec<Project>> {
        let result = self.admin_projects().await;
        QueryState::from_result(result, self.cache.is_fetching(&project_keys::admin_list()))
    }

    pub async fn project_state(&self, id: ProjectId) -> QueryState<Project> {
        let result = self.project(id).await;
        QueryState::from_result(result, self.cache.is_fetching(&project_keys::detail(id)))
    }

    // ==================== Mutations ====================

    pub async fn create_project(&self, input: &ProjectInput) -> Result<Project, QueryError> {
        let token = self.token()?;
        let project = self
            .mutate("create_project", || self.api.create_project(&token, input))
            .await?;
        info!("Created project {}", project.id);
        Ok(project)
    }

    pub async fn update_project(
        &self,
        id: ProjectId,
        input: &ProjectInput,
    ) -> Result<Project, QueryError> {
        let token = self.token()?;
        let project = self
            .mutate("update_project", || self.api.update_project(&token, id, input))
            .await?;
        info!("Updated project {}", id);
        Ok(project)
    }

    pub async fn delete_project(&self, id: ProjectId) -> Result<(), QueryError> {
        let token = self.token()?;
        self.mutate("delete_project", || self.api.delete_project(&token, id))
            .await?;
        info!("Deleted project {}", id);
        Ok(())
    }

    /// Run a mutation once and invalidate the projects family on success.
    async fn mutate<T, F, Fut>(&self, name: &str, operation: F) -> Result<T, ApiError>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = Result<T, ApiError>>,
    {
        let value = with_retry_if(
            &RetryConfig::mutation(),
            name,
            operation,
            ApiError::is_retryable,
        )
        .await?;
        self.cache.invalidate(&project_keys::all());
        Ok(value)
    }

    fn token(&self) -> Result<String, QueryError> {
        self.auth
            .as_ref()
            .and_then(|auth| auth.token())
            .ok_or(QueryError::Unauthenticated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::auth::testing::FakeBackend;
    use crate::context::TOKEN_STORAGE_KEY;
    use crate::storage::{KeyValueStore, MemoryStore};
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn project_json(id: i64, title: &str) -> serde_json::Value {
        json!({ "id": id, "title": title, "is_published": true })
    }

    async fn authenticated() -> Arc<AuthContext> {
        let store = Arc::new(MemoryStore::new());
        store.set(TOKEN_STORAGE_KEY, "tok").unwrap();
        let auth = Arc::new(AuthContext::new(store, Arc::new(FakeBackend::accepting("tok"))));
        auth.resolve().await;
        auth
    }

    fn queries(server: &MockServer) -> ProjectQueries {
        let api = ApiClient::new(reqwest::Client::new(), server.uri());
        ProjectQueries::new(api, QueryCache::new(RetryConfig::new(1, Duration::ZERO)))
    }

    #[tokio::test]
    async fn test_public_list_is_cached() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/projects"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([project_json(1, "Tower A")])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let queries = queries(&server);
        let first = queries.public_projects().await.unwrap();
        let second = queries.public_projects().await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first[0].title, "Tower A");
    }

    #[tokio::test]
    async fn test_admin_reads_require_session() {
        let server = MockServer::start().await;
        let queries = queries(&server);

        assert_eq!(queries.admin_projects().await.unwrap_err(), QueryError::Unauthenticated);
        assert_eq!(queries.project(1).await.unwrap_err(), QueryError::Unauthenticated);
        let state = queries.admin_projects_state().await;
        assert_eq!(state.error.as_deref(), Some("Not authenticated"));
        assert!(state.data.is_none());
    }

    #[tokio::test]
    async fn test_admin_reads_send_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/admin/projects/5"))
            .and(header("authorization", "Bearer tok"))
            .respond_with(ResponseTemplate::new(200).set_body_json(project_json(5, "Villa")))
            .expect(1)
            .mount(&server)
            .await;

        let queries = queries(&server).with_auth(authenticated().await);
        let state = queries.project_state(5).await;

        assert_eq!(state.data.unwrap().title, "Villa");
        assert!(!state.is_fetching);
    }

    #[tokio::test]
    async fn test_create_invalidates_cached_lists() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/admin/projects"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(2)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/admin/projects"))
            .respond_with(ResponseTemplate::new(201).set_body_json(project_json(9, "New")))
            .expect(1)
            .mount(&server)
            .await;

        let queries = queries(&server).with_auth(authenticated().await);
        queries.admin_projects().await.unwrap();

        let input = ProjectInput {
            title: "New".to_string(),
            ..Default::default()
        };
        assert_eq!(queries.create_project(&input).await.unwrap().id, 9);
        assert_eq!(queries.cache().len(), 0);

        queries.admin_projects().await.unwrap();
    }

    #[tokio::test]
    async fn test_failed_mutation_is_not_retried_and_keeps_cache() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/projects"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/admin/projects/3"))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&server)
            .await;

        let queries = queries(&server).with_auth(authenticated().await);
        queries.public_projects().await.unwrap();

        let err = queries.delete_project(3).await.unwrap_err();
        assert!(matches!(err, QueryError::Api(ApiError::Status { status: 503, .. })));
        assert_eq!(queries.cache().len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_error_surfaces_as_state() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/projects"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let state = queries(&server).public_projects_state().await;
        assert!(state.is_error());
        assert!(state.error.unwrap().contains("500"));
        assert!(state.data.is_none());
    }
}
