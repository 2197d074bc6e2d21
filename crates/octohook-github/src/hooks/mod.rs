//! Repository hooks resource.
//!
//! [`HooksResource`] turns hook operations into single HTTP calls on the
//! shared [`HttpService`] and checks the status against the one code each
//! operation documents:
//!
//! | Operation  | Verb   | Path                                     | Expects |
//! |------------|--------|------------------------------------------|---------|
//! | `get_list` | GET    | `/repos/{owner}/{repo}/hooks`            | 200     |
//! | `get`      | GET    | `/repos/{owner}/{repo}/hooks/{id}`       | 200     |
//! | `create`   | POST   | `/repos/{owner}/{repo}/hooks`            | 201     |
//! | `edit`     | PATCH  | `/repos/{owner}/{repo}/hooks/{id}`       | 200     |
//! | `delete`   | DELETE | `/repos/{owner}/{repo}/hooks/{id}`       | 204     |
//! | `test`     | POST   | `/repos/{owner}/{repo}/hooks/{id}/test`  | 204     |
//! | `ping`     | POST   | `/repos/{owner}/{repo}/hooks/{id}/pings` | 204     |
//!
//! # Example
//!
//! ```rust,ignore
//! use octohook_github::hooks::{CreateHook, HooksResource};
//! use octohook_github::reqwest::{ReqwestClient, ReqwestConfig};
//! use octohook_github::GithubOptions;
//!
//! let options = GithubOptions::default().with_token(token);
//! let client = ReqwestClient::new(options.clone(), ReqwestConfig::default())?;
//! let hooks = HooksResource::new(options, client.into_service());
//!
//! let request = CreateHook::new("web")
//!     .with_config("url", "https://example.com/hook")
//!     .with_events(["push", "pull_request"]);
//! let hook = hooks.create("octocat", "hello-world", &request).await?;
//! ```

mod request;
mod response;

use std::sync::Arc;

pub use request::{CreateHook, EditHook};
pub use response::{ApiErrorBody, Hook, INVALID_RESPONSE_MESSAGE};
use serde_json::Value;

use crate::transport::{HttpResponse, HttpService, Method};
use crate::{Error, GithubOptions, Result};

/// Tracing target for hook operations.
pub const TRACING_TARGET: &str = "octohook_github::hooks";

/// Client for the repository hooks endpoints.
#[derive(Clone, Debug)]
pub struct HooksResource {
    options: Arc<GithubOptions>,
    http: HttpService,
}

impl HooksResource {
    /// Creates a resource on top of the given options and transport.
    pub fn new(options: GithubOptions, http: HttpService) -> Self {
        Self {
            options: Arc::new(options),
            http,
        }
    }

    /// Gets the API options.
    pub fn options(&self) -> &GithubOptions {
        &self.options
    }

    /// Lists the hooks of a repository.
    pub async fn get_list(&self, owner: &str, repo: &str) -> Result<Value> {
        let path = hooks_path(owner, repo);
        let response = self.http.get(&path).await?;
        let response = self.expect_status(Method::Get, &path, response, 200)?;
        decode(&response)
    }

    /// Gets a single hook.
    pub async fn get(&self, owner: &str, repo: &str, hook_id: u64) -> Result<Value> {
        let path = hook_path(owner, repo, hook_id);
        let response = self.http.get(&path).await?;
        let response = self.expect_status(Method::Get, &path, response, 200)?;
        decode(&response)
    }

    /// Creates a hook.
    ///
    /// Unknown event names fail with a validation error before anything is
    /// sent.
    pub async fn create(&self, owner: &str, repo: &str, hook: &CreateHook) -> Result<Value> {
        self.check(hook.validate(), owner, repo)?;

        let path = hooks_path(owner, repo);
        let body = serde_json::to_string(hook)?;
        let response = self.http.post(&path, Some(body)).await?;
        let response = self.expect_status(Method::Post, &path, response, 201)?;
        decode(&response)
    }

    /// Edits a hook.
    ///
    /// `events`, `add_events` and `remove_events` are each checked; any
    /// unknown name fails the call before anything is sent.
    pub async fn edit(
        &self,
        owner: &str,
        repo: &str,
        hook_id: u64,
        hook: &EditHook,
    ) -> Result<Value> {
        self.check(hook.validate(), owner, repo)?;

        let path = hook_path(owner, repo, hook_id);
        let body = serde_json::to_string(hook)?;
        let response = self.http.patch(&path, body).await?;
        let response = self.expect_status(Method::Patch, &path, response, 200)?;
        decode(&response)
    }

    /// Deletes a hook.
    ///
    /// Returns `None` when the server sends no body with its `204`.
    pub async fn delete(&self, owner: &str, repo: &str, hook_id: u64) -> Result<Option<Value>> {
        let path = hook_path(owner, repo, hook_id);
        let response = self.http.delete(&path).await?;
        let response = self.expect_status(Method::Delete, &path, response, 204)?;
        decode_optional(&response)
    }

    /// Triggers a test delivery for the latest push.
    pub async fn test(&self, owner: &str, repo: &str, hook_id: u64) -> Result<Option<Value>> {
        let path = format!("{}/test", hook_path(owner, repo, hook_id));
        let response = self.http.post(&path, None).await?;
        let response = self.expect_status(Method::Post, &path, response, 204)?;
        decode_optional(&response)
    }

    /// Sends a `ping` event to the hook.
    pub async fn ping(&self, owner: &str, repo: &str, hook_id: u64) -> Result<Option<Value>> {
        let path = format!("{}/pings", hook_path(owner, repo, hook_id));
        let response = self.http.post(&path, None).await?;
        let response = self.expect_status(Method::Post, &path, response, 204)?;
        decode_optional(&response)
    }

    fn check(&self, validation: Result<()>, owner: &str, repo: &str) -> Result<()> {
        if let Err(error) = &validation {
            tracing::warn!(
                target: TRACING_TARGET,
                owner,
                repo,
                field = error.context.as_deref().unwrap_or_default(),
                error = %error,
                "Rejected hook request"
            );
        }
        validation
    }

    fn expect_status(
        &self,
        method: Method,
        path: &str,
        response: HttpResponse,
        expected: u16,
    ) -> Result<HttpResponse> {
        tracing::debug!(
            target: TRACING_TARGET,
            api_url = %self.options.api_url,
            method = %method,
            path,
            status = response.status,
            expected,
            "Hook request completed"
        );

        if response.status == expected {
            return Ok(response);
        }

        let message = ApiErrorBody::message_from(&response.body);
        Err(Error::api(response.status)
            .with_message(message)
            .with_context(format!("{method} {path}")))
    }
}

fn hooks_path(owner: &str, repo: &str) -> String {
    format!(
        "/repos/{}/{}/hooks",
        urlencoding::encode(owner),
        urlencoding::encode(repo)
    )
}

fn hook_path(owner: &str, repo: &str, hook_id: u64) -> String {
    format!("{}/{hook_id}", hooks_path(owner, repo))
}

fn decode(response: &HttpResponse) -> Result<Value> {
    Ok(serde_json::from_str(&response.body)?)
}

fn decode_optional(response: &HttpResponse) -> Result<Option<Value>> {
    if response.is_empty() {
        return Ok(None);
    }
    decode(response).map(Some)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::ErrorKind;
    use crate::mock::MockTransport;

    const SAMPLE: &str = r#"{"id":1,"name":"acunote","active":true}"#;
    const ERROR: &str = r#"{"message":"Bad"}"#;

    fn resource(mock: &MockTransport) -> HooksResource {
        HooksResource::new(GithubOptions::default(), mock.service())
    }

    fn acunote() -> CreateHook {
        CreateHook::new("acunote")
            .with_config("token", "123456789")
            .with_events(["push", "public"])
    }

    #[tokio::test]
    async fn test_create() {
        let mock = MockTransport::responding(201, SAMPLE);
        let hooks = resource(&mock);

        let result = hooks
            .create("joomla", "joomla-platform", &acunote())
            .await
            .unwrap();
        assert_eq!(result, serde_json::from_str::<Value>(SAMPLE).unwrap());

        let calls = mock.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].method, Method::Post);
        assert_eq!(calls[0].path, "/repos/joomla/joomla-platform/hooks");
        assert_eq!(
            calls[0].body.as_deref(),
            Some(
                r#"{"name":"acunote","config":{"token":"123456789"},"events":["push","public"],"active":true}"#
            )
        );
    }

    #[tokio::test]
    async fn test_create_failure() {
        let mock = MockTransport::responding(500, ERROR);
        let hooks = resource(&mock);

        let error = hooks
            .create("joomla", "joomla-platform", &acunote())
            .await
            .unwrap_err();
        assert!(error.is_api());
        assert_eq!(error.status, Some(500));
        assert_eq!(error.message(), Some("Bad"));
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn test_create_expects_created() {
        let mock = MockTransport::responding(200, SAMPLE);
        let hooks = resource(&mock);

        let error = hooks
            .create("joomla", "joomla-platform", &acunote())
            .await
            .unwrap_err();
        assert_eq!(error.kind, ErrorKind::Api);
        assert_eq!(error.message(), Some(INVALID_RESPONSE_MESSAGE));
    }

    #[tokio::test]
    async fn test_create_unauthorised_event() {
        let mock = MockTransport::responding(201, SAMPLE);
        let hooks = resource(&mock);

        let request = acunote().with_events(["push", "faker"]);
        let error = hooks
            .create("joomla", "joomla-platform", &request)
            .await
            .unwrap_err();
        assert!(error.is_validation());
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_create_inactive() {
        let mock = MockTransport::responding(201, SAMPLE);
        let hooks = resource(&mock);

        let request = acunote().with_active(false);
        hooks.create("o", "r", &request).await.unwrap();
        assert_eq!(mock.last_call().unwrap().json().unwrap()["active"], json!(false));
    }

    #[tokio::test]
    async fn test_edit() {
        let mock = MockTransport::responding(200, SAMPLE);
        let hooks = resource(&mock);

        let request = EditHook::new("acunote")
            .with_config("token", "123456789")
            .with_events(["push", "public"])
            .with_add_events(["watch"])
            .with_remove_events(["watch"]);
        let result = hooks
            .edit("joomla", "joomla-platform", 42, &request)
            .await
            .unwrap();
        assert_eq!(result["id"], json!(1));

        let call = mock.last_call().unwrap();
        assert_eq!(call.method, Method::Patch);
        assert_eq!(call.path, "/repos/joomla/joomla-platform/hooks/42");
        assert_eq!(
            call.json().unwrap(),
            json!({
                "name": "acunote",
                "config": {"token": "123456789"},
                "events": ["push", "public"],
                "add_events": ["watch"],
                "remove_events": ["watch"],
                "active": true,
            })
        );
    }

    #[tokio::test]
    async fn test_edit_incremental_only() {
        let mock = MockTransport::responding(200, SAMPLE);
        let hooks = resource(&mock);

        let request = EditHook::new("acunote")
            .with_config("token", "123456789")
            .with_add_events(["watch"])
            .with_remove_events(["watch"]);
        hooks
            .edit("joomla", "joomla-platform", 42, &request)
            .await
            .unwrap();

        let body = mock.last_call().unwrap().json().unwrap();
        assert!(body.get("events").is_none());
        assert_eq!(body["add_events"], json!(["watch"]));
        assert_eq!(body["remove_events"], json!(["watch"]));
    }

    #[tokio::test]
    async fn test_edit_failure() {
        let mock = MockTransport::responding(500, ERROR);
        let hooks = resource(&mock);

        let request = EditHook::new("acunote").with_events(["push"]);
        let error = hooks.edit("joomla", "joomla-platform", 42, &request).await.unwrap_err();
        assert!(error.is_api());
        assert_eq!(error.message(), Some("Bad"));
    }

    #[tokio::test]
    async fn test_edit_unauthorised_events() {
        let mock = MockTransport::responding(200, SAMPLE);
        let hooks = resource(&mock);

        let requests = [
            EditHook::new("acunote").with_events(["invalid"]),
            EditHook::new("acunote")
                .with_events(["push"])
                .with_add_events(["invalid"]),
            EditHook::new("acunote")
                .with_events(["push"])
                .with_add_events(["push"])
                .with_remove_events(["invalid"]),
        ];

        for request in &requests {
            let error = hooks
                .edit("joomla", "joomla-platform", 42, request)
                .await
                .unwrap_err();
            assert!(error.is_validation());
        }
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_get() {
        let mock = MockTransport::responding(200, SAMPLE);
        let hooks = resource(&mock);

        let result = hooks.get("joomla", "joomla-platform", 42).await.unwrap();
        assert_eq!(result, serde_json::from_str::<Value>(SAMPLE).unwrap());

        let call = mock.last_call().unwrap();
        assert_eq!(call.method, Method::Get);
        assert_eq!(call.path, "/repos/joomla/joomla-platform/hooks/42");
        assert!(call.body.is_none());
    }

    #[tokio::test]
    async fn test_get_failure() {
        let mock = MockTransport::responding(500, ERROR);
        let hooks = resource(&mock);

        let error = hooks.get("joomla", "joomla-platform", 42).await.unwrap_err();
        assert!(error.is_api());
        assert_eq!(
            error.context.as_deref(),
            Some("GET /repos/joomla/joomla-platform/hooks/42")
        );
    }

    #[tokio::test]
    async fn test_get_list() {
        let body = format!("[{SAMPLE}]");
        let mock = MockTransport::responding(200, body.as_str());
        let hooks = resource(&mock);

        let result = hooks.get_list("joomla", "joomla-platform").await.unwrap();
        assert_eq!(result, serde_json::from_str::<Value>(&body).unwrap());
        assert_eq!(Hook::list_from_value(result).unwrap()[0].name, "acunote");
        assert_eq!(
            mock.last_call().unwrap().path,
            "/repos/joomla/joomla-platform/hooks"
        );
    }

    #[tokio::test]
    async fn test_get_list_failure() {
        let mock = MockTransport::responding(404, r#"{"message":"Not Found"}"#);
        let hooks = resource(&mock);

        let error = hooks.get_list("joomla", "joomla-platform").await.unwrap_err();
        assert_eq!(error.status, Some(404));
        assert_eq!(error.message(), Some("Not Found"));
    }

    #[tokio::test]
    async fn test_success_body_not_json() {
        let mock = MockTransport::responding(200, "<html></html>");
        let hooks = resource(&mock);

        let error = hooks.get("o", "r", 1).await.unwrap_err();
        assert_eq!(error.kind, ErrorKind::Serialization);
    }

    #[tokio::test]
    async fn test_delete() {
        let mock = MockTransport::responding(204, SAMPLE);
        let hooks = resource(&mock);

        let result = hooks.delete("joomla", "joomla-platform", 42).await.unwrap();
        assert_eq!(result, Some(serde_json::from_str::<Value>(SAMPLE).unwrap()));

        let call = mock.last_call().unwrap();
        assert_eq!(call.method, Method::Delete);
        assert_eq!(call.path, "/repos/joomla/joomla-platform/hooks/42");
    }

    #[tokio::test]
    async fn test_delete_empty_body() {
        let mock = MockTransport::responding(204, "");
        let hooks = resource(&mock);

        let result = hooks.delete("joomla", "joomla-platform", 42).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_delete_failure() {
        let mock = MockTransport::responding(500, ERROR);
        let hooks = resource(&mock);

        let error = hooks.delete("joomla", "joomla-platform", 42).await.unwrap_err();
        assert_eq!(error.message(), Some("Bad"));
    }

    #[tokio::test]
    async fn test_test() {
        let mock = MockTransport::responding(204, SAMPLE);
        let hooks = resource(&mock);

        let result = hooks.test("joomla", "joomla-platform", 42).await.unwrap();
        assert_eq!(result, Some(serde_json::from_str::<Value>(SAMPLE).unwrap()));

        let call = mock.last_call().unwrap();
        assert_eq!(call.method, Method::Post);
        assert_eq!(call.path, "/repos/joomla/joomla-platform/hooks/42/test");
        assert!(call.body.is_none());
    }

    #[tokio::test]
    async fn test_test_failure() {
        let mock = MockTransport::responding(500, ERROR);
        let hooks = resource(&mock);

        let error = hooks.test("joomla", "joomla-platform", 42).await.unwrap_err();
        assert!(error.is_api());
    }

    #[tokio::test]
    async fn test_ping() {
        let mock = MockTransport::responding(204, "");
        let hooks = resource(&mock);

        let result = hooks.ping("joomla", "joomla-platform", 42).await.unwrap();
        assert!(result.is_none());

        let call = mock.last_call().unwrap();
        assert_eq!(call.method, Method::Post);
        assert_eq!(call.path, "/repos/joomla/joomla-platform/hooks/42/pings");
    }

    #[tokio::test]
    async fn test_path_segments_are_escaped() {
        let mock = MockTransport::responding(200, "[]");
        let hooks = resource(&mock);

        hooks.get_list("some owner", "repo/name").await.unwrap();
        assert_eq!(
            mock.last_call().unwrap().path,
            "/repos/some%20owner/repo%2Fname/hooks"
        );
    }
}
