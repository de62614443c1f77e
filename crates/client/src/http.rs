//! REST implementation of the task store.
//!
//! This module provides [`TaskClient`], which maps the [`TaskStore`]
//! operations onto the task API:
//!
//! | Operation | Request |
//! |-----------|---------|
//! | `list`    | `GET {base}` |
//! | `create`  | `POST {base}` with every field but the id |
//! | `update`  | `PATCH {base}{id}` with the present fields |
//! | `delete`  | `DELETE {base}{id}` |
//!
//! Every request carries `Content-Type: application/json`. Any non-2xx status
//! is an error; successful mutation bodies are ignored.

use std::time::Duration;

use async_trait::async_trait;
use corkboard_protocol::{NewTask, RecordBatch, TaskId, TaskPatch, TaskRecord};
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, RequestBuilder, Response};
use tracing::{debug, instrument};

use crate::error::{ClientError, Result};
use crate::store::TaskStore;

/// HTTP client for the task API.
///
/// # Examples
///
/// ```no_run
/// use corkboard_client::{TaskClient, TaskStore};
///
/// # async fn example() -> corkboard_client::Result<()> {
/// let client = TaskClient::new("http://localhost:3000/api/tasks/", None)?;
/// let batch = client.list().await?;
/// println!("{} tasks", batch.records.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct TaskClient {
    http: Client,
    base: String,
}

impl TaskClient {
    /// Creates a client for the task collection at `base_url`.
    ///
    /// A trailing `/` is added when missing so that ids can be appended.
    /// Requests never time out unless `timeout` is set.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] if `base_url` does not parse, or
    /// [`ClientError::Transport`] if the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        url::Url::parse(base_url).map_err(|source| ClientError::InvalidUrl {
            url: base_url.to_string(),
            source,
        })?;

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        let mut base = base_url.to_string();
        if !base.ends_with('/') {
            base.push('/');
        }

        Ok(Self { http, base })
    }

    /// Returns the collection URL, always ending in `/`.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base
    }

    /// Returns the URL of a single task, with the id percent-encoded.
    ///
    /// # Examples
    ///
    /// ```
    /// use corkboard_client::TaskClient;
    /// use corkboard_protocol::TaskId;
    ///
    /// let client = TaskClient::new("http://localhost:3000/api/tasks", None).unwrap();
    /// assert_eq!(
    ///     client.task_url(&TaskId::from(1)),
    ///     "http://localhost:3000/api/tasks/1"
    /// );
    /// assert_eq!(
    ///     client.task_url(&TaskId::from("a/b")),
    ///     "http://localhost:3000/api/tasks/a%2Fb"
    /// );
    /// ```
    #[must_use]
    pub fn task_url(&self, id: &TaskId) -> String {
        let encoded = utf8_percent_encode(id.as_str(), NON_ALPHANUMERIC);
        format!("{}{encoded}", self.base)
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.http
            .request(method, url)
            .header(CONTENT_TYPE, "application/json")
    }

    async fn send(request: RequestBuilder) -> Result<Response> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        debug!(%status, "request rejected");
        Err(ClientError::Status { status, body })
    }
}

#[async_trait]
impl TaskStore for TaskClient {
    #[instrument(skip(self), fields(url = %self.base))]
    async fn list(&self) -> Result<RecordBatch> {
        debug!("fetching tasks");
        let response = Self::send(self.request(Method::GET, &self.base)).await?;
        let body = response.bytes().await?;
        let batch = TaskRecord::list_from_json(&body)?;
        debug!(
            count = batch.records.len(),
            malformed = batch.malformed.len(),
            "fetched tasks"
        );
        Ok(batch)
    }

    #[instrument(skip(self, fields), fields(title = %fields.title, status = %fields.status))]
    async fn create(&self, fields: &NewTask) -> Result<()> {
        debug!("creating task");
        Self::send(self.request(Method::POST, &self.base).json(fields)).await?;
        debug!("created task");
        Ok(())
    }

    #[instrument(skip(self, patch), fields(%id))]
    async fn update(&self, id: &TaskId, patch: &TaskPatch) -> Result<()> {
        debug!(status = ?patch.status, "updating task");
        let url = self.task_url(id);
        Self::send(self.request(Method::PATCH, &url).json(patch)).await?;
        debug!("updated task");
        Ok(())
    }

    #[instrument(skip(self), fields(%id))]
    async fn delete(&self, id: &TaskId) -> Result<()> {
        debug!("deleting task");
        let url = self.task_url(id);
        Self::send(self.request(Method::DELETE, &url)).await?;
        debug!("deleted task");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use corkboard_protocol::{Priority, Status};
    use mockito::Matcher;
    use serde_json::json;

    async fn client_for(server: &mockito::ServerGuard) -> TaskClient {
        TaskClient::new(&format!("{}/api/tasks/", server.url()), None).unwrap()
    }

    #[test]
    fn new_appends_trailing_slash() {
        let client = TaskClient::new("http://localhost:3000/api/tasks", None).unwrap();
        assert_eq!(client.base_url(), "http://localhost:3000/api/tasks/");
    }

    #[test]
    fn new_rejects_invalid_url() {
        assert!(matches!(
            TaskClient::new("localhost tasks", None),
            Err(ClientError::InvalidUrl { .. })
        ));
    }

    #[tokio::test]
    async fn list_decodes_records() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/tasks/")
            .match_header("content-type", "application/json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!([
                    {"id": 1, "title": "Fix bug", "description": "", "assignedTo": "Persona1",
                     "endDate": "2024-01-01", "status": "todo", "priority": "High"},
                    {"id": "x7", "title": "Old", "status": "archived", "priority": "Low"}
                ])
                .to_string(),
            )
            .create_async()
            .await;

        let records = client_for(&server).await.list().await.unwrap().records;

        mock.assert_async().await;
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, TaskId::from(1));
        assert_eq!(records[0].assigned_to, "Persona1");
        assert_eq!(records[1].status, "archived");
    }

    #[tokio::test]
    async fn list_with_a_null_status_keeps_the_other_records() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/tasks/")
            .with_status(200)
            .with_body(
                json!([
                    {"id": 1, "title": "Fix bug", "description": "", "assignedTo": "Persona1",
                     "endDate": "2024-01-01", "status": "todo", "priority": "High"},
                    {"id": 2, "title": "Odd", "status": null, "priority": "High"}
                ])
                .to_string(),
            )
            .create_async()
            .await;

        let batch = client_for(&server).await.list().await.unwrap();
        let fetched = crate::validate_records(batch);

        assert_eq!(fetched.tasks.len(), 1);
        assert_eq!(fetched.tasks[0].status, Status::Todo);
        assert_eq!(fetched.rejected, 1);
    }

    #[tokio::test]
    async fn list_non_success_is_status_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/tasks/")
            .with_status(503)
            .with_body("maintenance")
            .create_async()
            .await;

        let err = client_for(&server).await.list().await.unwrap_err();
        assert!(matches!(
            err,
            ClientError::Status { status, ref body }
                if status == reqwest::StatusCode::SERVICE_UNAVAILABLE && body == "maintenance"
        ));
    }

    #[tokio::test]
    async fn list_with_malformed_body_is_decode_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/tasks/")
            .with_status(200)
            .with_body(r#"{"tasks": []}"#)
            .create_async()
            .await;

        let err = client_for(&server).await.list().await.unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
    }

    #[tokio::test]
    async fn create_posts_all_fields_without_id() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/tasks/")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(json!({
                "title": "Write docs",
                "description": "",
                "assignedTo": "Persona2",
                "endDate": "",
                "status": "backlog",
                "priority": "Low"
            })))
            .with_status(201)
            .with_body(r#"{"id": 9}"#)
            .create_async()
            .await;

        let fields = NewTask {
            title: "Write docs".to_string(),
            assigned_to: "Persona2".to_string(),
            ..NewTask::default()
        };
        client_for(&server).await.create(&fields).await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn drag_scenario_patches_task_one() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PATCH", "/api/tasks/1")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(json!({
                "title": "Fix bug",
                "description": "",
                "assignedTo": "Persona1",
                "priority": "High",
                "endDate": "2024-01-01",
                "status": "done"
            })))
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let fields = NewTask {
            title: "Fix bug".to_string(),
            description: String::new(),
            assigned_to: "Persona1".to_string(),
            end_date: "2024-01-01".to_string(),
            status: Status::Todo,
            priority: Priority::High,
        };
        let patch = TaskPatch::from(fields).with_status(Status::Done);

        client_for(&server)
            .await
            .update(&TaskId::from(1), &patch)
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn update_sends_only_present_fields() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PATCH", "/api/tasks/abc%20def")
            .match_body(Matcher::Json(json!({"status": "blocked"})))
            .with_status(204)
            .create_async()
            .await;

        client_for(&server)
            .await
            .update(&TaskId::from("abc def"), &TaskPatch::status_only(Status::Blocked))
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn delete_ignores_empty_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("DELETE", "/api/tasks/42")
            .match_header("content-type", "application/json")
            .with_status(200)
            .create_async()
            .await;

        client_for(&server)
            .await
            .delete(&TaskId::from(42))
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn delete_missing_task_is_status_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("DELETE", "/api/tasks/42")
            .with_status(404)
            .create_async()
            .await;

        let err = client_for(&server)
            .await
            .delete(&TaskId::from(42))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Status { status, .. } if status.as_u16() == 404));
    }

    #[tokio::test]
    async fn unreachable_server_is_transport_error() {
        // Port 9 (discard) is not listening on loopback in test environments.
        let client = TaskClient::new("http://127.0.0.1:9/api/tasks/", None).unwrap();
        assert!(matches!(
            client.list().await,
            Err(ClientError::Transport(_))
        ));
    }
}
