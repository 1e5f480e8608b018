//! Authenticated REST client.
//!
//! Every request reads the credential from the [`SessionStore`] at call time
//! and attaches it as a bearer header; there is no default header to install
//! or remove. A 401 from any endpoint ends the session.

use std::sync::Arc;

use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::{debug, warn};
use url::Url;

use super::endpoints::Endpoints;
use crate::error::ClientError;
use crate::session::SessionStore;

/// REST client for shop, queue and barber resources.
///
/// Cheap to clone; clones share the HTTP connection pool and session.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    http: reqwest::Client,
    endpoints: Endpoints,
    session: SessionStore,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.endpoints.base().as_str())
            .finish_non_exhaustive()
    }
}

/// Error body sent by the backend.
#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl ApiClient {
    /// Create a client sharing the session store's HTTP client and endpoints.
    #[must_use]
    pub fn new(session: SessionStore) -> Self {
        Self {
            inner: Arc::new(ApiClientInner {
                http: session.http().clone(),
                endpoints: session.endpoints().clone(),
                session,
            }),
        }
    }

    /// The session store this client authenticates with.
    #[must_use]
    pub fn session(&self) -> &SessionStore {
        &self.inner.session
    }

    pub(crate) fn endpoints(&self) -> &Endpoints {
        &self.inner.endpoints
    }

    // =========================================================================
    // Request helpers
    // =========================================================================

    pub(crate) async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, ClientError> {
        let response = self.execute(self.inner.http.get(url)).await?;
        decode(response).await
    }

    pub(crate) async fn send_json<B, T>(
        &self,
        method: Method,
        url: Url,
        body: &B,
    ) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let response = self
            .execute(self.inner.http.request(method, url).json(body))
            .await?;
        decode(response).await
    }

    /// Send a JSON body and ignore whatever the server answers with.
    pub(crate) async fn send_json_discard<B>(
        &self,
        method: Method,
        url: Url,
        body: &B,
    ) -> Result<(), ClientError>
    where
        B: Serialize + ?Sized + Sync,
    {
        self.execute(self.inner.http.request(method, url).json(body))
            .await?;
        Ok(())
    }

    pub(crate) async fn delete(&self, url: Url) -> Result<(), ClientError> {
        self.execute(self.inner.http.delete(url)).await?;
        Ok(())
    }

    /// Attach the credential, send, and map failure statuses.
    async fn execute(&self, request: RequestBuilder) -> Result<Response, ClientError> {
        let credential = self
            .inner
            .session
            .credential()
            .ok_or(ClientError::NotAuthenticated)?;

        let response = request.bearer_auth(credential.expose()).send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::UNAUTHORIZED {
            warn!(url = %response.url(), "Request unauthorized");
            self.inner.session.expire(&credential).await;
            return Err(ClientError::Unauthorized);
        }

        let body = response.text().await.unwrap_or_default();
        let message = error_message(&body);
        debug!(status = %status, message = %message, "Request failed");

        Err(match status {
            StatusCode::FORBIDDEN => ClientError::Forbidden(message),
            StatusCode::NOT_FOUND => ClientError::NotFound(message),
            _ => ClientError::Api {
                status: status.as_u16(),
                message,
            },
        })
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let text = response.text().await?;
    Ok(serde_json::from_str(&text)?)
}

/// `message` (or `error`) from a JSON error body, else the raw body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message.or(b.error))
        .unwrap_or_else(|| body.trim().to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_prefers_json_message() {
        assert_eq!(error_message(r#"{"message":"Shop not found"}"#), "Shop not found");
        assert_eq!(error_message(r#"{"error":"Bad id"}"#), "Bad id");
    }

    #[test]
    fn test_error_message_falls_back_to_body() {
        assert_eq!(error_message(" Internal Server Error \n"), "Internal Server Error");
        assert_eq!(error_message(""), "");
        assert_eq!(error_message("{}"), "{}");
    }
}
