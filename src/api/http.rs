use async_trait::async_trait;
use reqwest::{Client as ReqwestClient, Method, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::UserApi;
use crate::error::{ApiError, ApiResult, ServerFieldError};
use crate::model::{User, UserId, UserPayload};

/// REST client for the `/users` resource.
pub struct HttpUserClient {
    pub base_url: String,
    client: ReqwestClient,
}

/// Success bodies come either wrapped as `{ "data": ... }` or bare.
#[derive(Deserialize)]
#[serde(untagged)]
enum Envelope<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> Envelope<T> {
    fn into_inner(self) -> T {
        match self {
            Envelope::Wrapped { data } | Envelope::Bare(data) => data,
        }
    }
}

#[derive(Debug, Default)]
struct ErrorBody {
    message: Option<String>,
    errors: Vec<ServerFieldError>,
}

impl ErrorBody {
    /// Read `message` and `errors` independently so one odd entry (or a
    /// `null` list) does not cost the rest of the body.
    fn from_text(text: &str) -> Self {
        let Ok(value) = serde_json::from_str::<serde_json::Value>(text) else {
            return Self::default();
        };
        let message = value
            .get("message")
            .and_then(serde_json::Value::as_str)
            .map(str::to_string);
        let errors = value
            .get("errors")
            .and_then(serde_json::Value::as_array)
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(|e| ServerFieldError::deserialize(e).ok())
                    .collect()
            })
            .unwrap_or_default();
        Self { message, errors }
    }
}

impl HttpUserClient {
    /// `base_url` is the API root, e.g. `http://localhost:5000/api`.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: ReqwestClient::new(),
        }
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client.request(method, url)
    }

    fn user_path(id: &UserId) -> String {
        format!("/users/{}", id)
    }

    /// Send and classify non-success statuses.
    async fn execute(&self, req: reqwest::RequestBuilder) -> ApiResult<Response> {
        let response = req.send().await.map_err(|e| {
            warn!(error = %e, "transport failure");
            ApiError::from(e)
        })?;
        let status = response.status();
        debug!(%status, url = %response.url(), "response received");
        if status.is_success() {
            return Ok(response);
        }

        // Error bodies are optional; an unreadable one just carries no message.
        let text = response.text().await.unwrap_or_default();
        let body = ErrorBody::from_text(&text);
        Err(classify_failure(status, body))
    }

    async fn parse<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
        let body = response.text().await?;
        serde_json::from_str::<Envelope<T>>(&body)
            .map(Envelope::into_inner)
            .map_err(|e| ApiError::request(format!("malformed response body: {e}")))
    }
}

fn classify_failure(status: StatusCode, body: ErrorBody) -> ApiError {
    if status == StatusCode::NOT_FOUND {
        return ApiError::NotFound {
            message: body.message,
        };
    }
    if status.is_client_error() && !body.errors.is_empty() {
        return ApiError::Validation {
            message: body.message,
            errors: body.errors,
        };
    }
    ApiError::Request {
        detail: format!("server responded with {status}"),
        message: body.message,
    }
}

#[async_trait]
impl UserApi for HttpUserClient {
    async fn list_users(&self) -> ApiResult<Vec<User>> {
        let response = self.execute(self.request(Method::GET, "/users")).await?;
        Self::parse(response).await
    }

    async fn get_user(&self, id: &UserId) -> ApiResult<User> {
        let response = self
            .execute(self.request(Method::GET, &Self::user_path(id)))
            .await?;
        Self::parse(response).await
    }

    async fn create_user(&self, payload: &UserPayload) -> ApiResult<User> {
        let req = self.request(Method::POST, "/users").json(payload);
        let response = self.execute(req).await?;
        Self::parse(response).await
    }

    async fn update_user(&self, id: &UserId, payload: &UserPayload) -> ApiResult<User> {
        let req = self.request(Method::PUT, &Self::user_path(id)).json(payload);
        let response = self.execute(req).await?;
        Self::parse(response).await
    }

    async fn delete_user(&self, id: &UserId) -> ApiResult<()> {
        self.execute(self.request(Method::DELETE, &Self::user_path(id)))
            .await?;
        Ok(())
    }
}
