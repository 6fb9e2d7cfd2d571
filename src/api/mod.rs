//! Typed gateway to the board REST API.
//!
//! [`ApiClient`] translates logical operations into HTTP requests and
//! normalizes error shapes. It holds no state beyond the base URL and the
//! underlying [`HttpClient`], so it can be shared freely between spawned
//! tasks.

use chrono::NaiveDate;
use serde_json::{json, Value};

use crate::error::{ApiError, BoardError, BoardResult};
use crate::models::{Answer, AuthStatus, DeletedItems, DeletedKind, Page, Question, Todo};
use crate::traits::{Headers, HttpClient, Method};

/// Client for the board API.
#[derive(Debug, Clone)]
pub struct ApiClient<C> {
    http: C,
    base_url: String,
}

impl<C: HttpClient> ApiClient<C> {
    /// Create a client rooted at `base_url` (e.g. `http://host:8000/api/v1`).
    pub fn new(http: C, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { http, base_url }
    }

    /// The configured base URL, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Perform one API call.
    ///
    /// Always attaches a JSON content-type header. A `204 No Content`
    /// response yields `Ok(None)`. Any non-2xx response is parsed as JSON
    /// and converted into an [`ApiError`]; transport failures pass through
    /// as the distinct transport variant.
    pub async fn call(
        &self,
        endpoint: &str,
        method: Method,
        body: Option<Value>,
    ) -> BoardResult<Option<Value>> {
        let url = format!("{}{}", self.base_url, endpoint);
        let mut headers = Headers::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());

        let serialized = body.map(|value| value.to_string());
        let response = self
            .http
            .request(method, &url, serialized.as_deref(), &headers)
            .await?;

        if response.status == 204 {
            return Ok(None);
        }

        let parsed: Result<Value, _> = response.json();
        if !response.is_success() {
            let err = match &parsed {
                Ok(body) => ApiError::from_body(response.status, body),
                Err(_) => ApiError::from_status(response.status),
            };
            return Err(err.into());
        }

        Ok(Some(parsed?))
    }

    /// Decode the payload of a call that must carry a body.
    fn decoded<T: serde::de::DeserializeOwned>(payload: Option<Value>) -> BoardResult<T> {
        let value = payload.ok_or_else(|| {
            BoardError::Decode("expected a response body, got 204 No Content".to_string())
        })?;
        Ok(serde_json::from_value(value)?)
    }

    // ------------------------------------------------------------------
    // Todos
    // ------------------------------------------------------------------

    /// List todos, paginated.
    pub async fn list_todos(&self, skip: u64, limit: u64) -> BoardResult<Page<Todo>> {
        let payload = self
            .call(&format!("/todo/?skip={skip}&limit={limit}"), Method::Get, None)
            .await?;
        Self::decoded(payload)
    }

    /// Create a todo. The password guards later edits and deletes.
    pub async fn create_todo(
        &self,
        task: &str,
        due_date: Option<NaiveDate>,
        password: &str,
    ) -> BoardResult<()> {
        self.call(
            "/todo/",
            Method::Post,
            Some(json!({ "task": task, "due_date": due_date, "password": password })),
        )
        .await?;
        Ok(())
    }

    /// Update a todo's task and due date.
    pub async fn update_todo(
        &self,
        id: &str,
        task: &str,
        due_date: Option<NaiveDate>,
        password: &str,
    ) -> BoardResult<()> {
        self.call(
            &format!("/todo/{id}"),
            Method::Put,
            Some(json!({ "task": task, "due_date": due_date, "password": password })),
        )
        .await?;
        Ok(())
    }

    /// Delete a todo.
    pub async fn delete_todo(&self, id: &str, password: &str) -> BoardResult<()> {
        self.call(
            &format!("/todo/{id}"),
            Method::Delete,
            Some(json!({ "password": password })),
        )
        .await?;
        Ok(())
    }

    /// Mark a todo complete or not complete.
    pub async fn set_todo_completed(
        &self,
        id: &str,
        completed: bool,
        password: &str,
    ) -> BoardResult<()> {
        let action = if completed { "complete" } else { "uncomplete" };
        self.call(
            &format!("/todo/{id}/{action}"),
            Method::Post,
            Some(json!({ "password": password })),
        )
        .await?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Questions
    // ------------------------------------------------------------------

    /// List questions, paginated.
    pub async fn list_questions(&self, skip: u64, limit: u64) -> BoardResult<Page<Question>> {
        let payload = self
            .call(
                &format!("/question/?skip={skip}&limit={limit}"),
                Method::Get,
                None,
            )
            .await?;
        Self::decoded(payload)
    }

    /// Fetch one question with up to two levels of embedded answers.
    pub async fn get_question(&self, id: &str) -> BoardResult<Question> {
        let payload = self
            .call(&format!("/question/{id}"), Method::Get, None)
            .await?;
        Self::decoded(payload)
    }

    /// Create a question.
    pub async fn create_question(
        &self,
        subject: &str,
        content: &str,
        password: &str,
    ) -> BoardResult<()> {
        self.call(
            "/question/",
            Method::Post,
            Some(json!({ "subject": subject, "content": content, "password": password })),
        )
        .await?;
        Ok(())
    }

    /// Update a question's subject and content.
    pub async fn update_question(
        &self,
        id: &str,
        subject: &str,
        content: &str,
        password: &str,
    ) -> BoardResult<()> {
        self.call(
            &format!("/question/{id}"),
            Method::Put,
            Some(json!({ "subject": subject, "content": content, "password": password })),
        )
        .await?;
        Ok(())
    }

    /// Delete a question.
    pub async fn delete_question(&self, id: &str, password: &str) -> BoardResult<()> {
        self.call(
            &format!("/question/{id}"),
            Method::Delete,
            Some(json!({ "password": password })),
        )
        .await?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Answers
    // ------------------------------------------------------------------

    /// Create an answer; `parent_id` nests it under another answer.
    pub async fn create_answer(
        &self,
        question_id: &str,
        parent_id: Option<&str>,
        content: &str,
        password: &str,
    ) -> BoardResult<()> {
        self.call(
            "/answer/",
            Method::Post,
            Some(json!({
                "question_id": question_id,
                "parent_id": parent_id,
                "content": content,
                "password": password
            })),
        )
        .await?;
        Ok(())
    }

    /// Update an answer's content.
    pub async fn update_answer(&self, id: &str, content: &str, password: &str) -> BoardResult<()> {
        self.call(
            &format!("/answer/{id}"),
            Method::Put,
            Some(json!({ "content": content, "password": password })),
        )
        .await?;
        Ok(())
    }

    /// Delete an answer.
    pub async fn delete_answer(&self, id: &str, password: &str) -> BoardResult<()> {
        self.call(
            &format!("/answer/{id}"),
            Method::Delete,
            Some(json!({ "password": password })),
        )
        .await?;
        Ok(())
    }

    /// Fetch one answer with its immediate children, freshly loaded.
    ///
    /// This is the lazy-expansion fetch: the returned `replies` replace
    /// whatever the caller rendered for that node.
    pub async fn get_answer(&self, id: &str) -> BoardResult<Answer> {
        let payload = self
            .call(&format!("/answer/{id}"), Method::Get, None)
            .await?;
        Self::decoded(payload)
    }

    // ------------------------------------------------------------------
    // Admin
    // ------------------------------------------------------------------

    /// List soft-deleted items in all three buckets.
    pub async fn deleted_items(&self, skip: u64, limit: u64) -> BoardResult<DeletedItems> {
        let payload = self
            .call(
                &format!("/admin/deleted-items?skip={skip}&limit={limit}"),
                Method::Get,
                None,
            )
            .await?;
        Self::decoded(payload)
    }

    /// Soft-delete any item as admin (IP-gated server-side).
    pub async fn admin_soft_delete(&self, kind: DeletedKind, id: &str) -> BoardResult<()> {
        self.call(
            &format!("/admin/soft-delete/{kind}/{id}"),
            Method::Delete,
            None,
        )
        .await?;
        Ok(())
    }

    /// Permanently delete a soft-deleted item.
    pub async fn admin_hard_delete(&self, kind: DeletedKind, id: &str) -> BoardResult<()> {
        self.call(
            &format!("/admin/hard-delete/{kind}/{id}"),
            Method::Delete,
            None,
        )
        .await?;
        Ok(())
    }

    /// Probe admin status. Callers treat any failure as "not admin".
    pub async fn auth_status(&self) -> BoardResult<AuthStatus> {
        let payload = self.call("/auth/status", Method::Get, None).await?;
        Self::decoded(payload)
    }
}
