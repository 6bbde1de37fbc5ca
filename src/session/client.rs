//! Client for the remote account service. All calls share one HTTP client,
//! one request budget, and the cross-cutting session rules: the persisted
//! token rides along as a bearer credential, and any 401 clears the session
//! and requests a navigation to the login route before the error surfaces.

use crate::config::{join_url, AppConfig};
use crate::errors::{sanitize_body, ApiError};
use crate::router::{Navigator, LOGIN};
use crate::session::store::SessionStore;
use crate::session::types::{
    AuthenticateRequest, ProfileDetail, RegisterProfileRequest, ServerMeta, Session, TextureType,
};
use reqwest::{multipart, RequestBuilder, Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Total request budget; a timeout is surfaced as a generic transport failure.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

pub struct SessionClient {
    http: reqwest::Client,
    base_url: String,
    store: Arc<dyn SessionStore>,
    navigator: Arc<dyn Navigator>,
}

impl SessionClient {
    /// Builds a client around the given store and navigator.
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(
        config: &AppConfig,
        store: Arc<dyn SessionStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|err| ApiError::Config(format!("failed to build HTTP client: {err}")))?;

        Ok(Self {
            http,
            base_url: config.api_base_url.clone(),
            store,
            navigator,
        })
    }

    /// Authenticates and persists the resulting session.
    ///
    /// On success the stored session is replaced wholesale, so a response
    /// without `availableProfiles` also drops any previously persisted list.
    /// On any failure the stored session is cleared before the error
    /// propagates; no partial or stale session survives a failed attempt.
    ///
    /// # Errors
    /// Returns an error on transport failure, non-success status, or an
    /// undecodable response body.
    pub async fn login(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<Session, ApiError> {
        let url = join_url(&self.base_url, "/authserver/authenticate");
        debug!("POST {url}");

        let body = AuthenticateRequest {
            username,
            password: password.expose_secret(),
            request_user: true,
        };

        match self.authenticate(&url, &body).await {
            Ok(session) => {
                self.store.store(session.clone());
                Ok(session)
            }
            Err(err) => {
                self.store.clear();
                Err(err)
            }
        }
    }

    async fn authenticate(
        &self,
        url: &str,
        body: &AuthenticateRequest<'_>,
    ) -> Result<Session, ApiError> {
        let response = self.send(self.http.post(url).json(body)).await?;
        let response = error_for_status(response).await?;
        response
            .json::<Session>()
            .await
            .map_err(|err| ApiError::Parse(format!("failed to decode login response: {err}")))
    }

    /// Registers a new user, forwarding the caller-supplied fields verbatim.
    /// Local session state is not touched.
    ///
    /// # Errors
    /// Returns an error on transport failure or non-success status.
    pub async fn register<T: Serialize>(&self, user_data: &T) -> Result<Value, ApiError> {
        let url = join_url(&self.base_url, "/extern/register/user");
        debug!("POST {url}");

        let response = self.send(self.http.post(&url).json(user_data)).await?;
        let response = error_for_status(response).await?;
        decode_body(response).await
    }

    /// Registers a game profile, optionally bound with the account password.
    /// An absent or empty password omits the field from the payload entirely.
    ///
    /// # Errors
    /// Returns an error on transport failure or non-success status.
    pub async fn register_profile(
        &self,
        profile_name: &str,
        username: &str,
        password: Option<&str>,
    ) -> Result<Value, ApiError> {
        let url = join_url(&self.base_url, "/extern/register/profile");
        debug!("POST {url}");

        let body = RegisterProfileRequest {
            profile_name,
            username,
            password: password.filter(|password| !password.is_empty()),
        };

        let response = self.send(self.http.post(&url).json(&body)).await?;
        let response = error_for_status(response).await?;
        decode_body(response).await
    }

    /// Uploads a texture for a profile as a multipart payload. The `model`
    /// part is included only when non-empty.
    ///
    /// # Errors
    /// Returns an error on transport failure or non-success status.
    pub async fn upload_skin(
        &self,
        profile_id: &str,
        texture: TextureType,
        file_name: &str,
        bytes: Vec<u8>,
        model: Option<&str>,
    ) -> Result<(), ApiError> {
        let url = join_url(&self.base_url, &format!("/user/profile/{profile_id}/{texture}"));
        debug!("PUT {url}");

        let mut form = multipart::Form::new()
            .part("file", multipart::Part::bytes(bytes).file_name(file_name.to_string()));
        if let Some(model) = model.filter(|model| !model.is_empty()) {
            form = form.text("model", model.to_string());
        }

        let response = self.send(self.http.put(&url).multipart(form)).await?;
        error_for_status(response).await?;
        Ok(())
    }

    /// Fetches the full profile from the session server.
    ///
    /// # Errors
    /// Fails fast with `NotAuthenticated` when no token is stored; no request
    /// is issued in that case. Otherwise returns an error on transport
    /// failure, non-success status, or an undecodable body.
    pub async fn get_profile_details(&self, profile_id: &str) -> Result<ProfileDetail, ApiError> {
        if self.store.access_token().is_none() {
            return Err(ApiError::NotAuthenticated);
        }

        let url = join_url(
            &self.base_url,
            &format!("/sessionserver/session/minecraft/profile/{profile_id}"),
        );
        debug!("GET {url}");

        let response = self
            .send(self.http.get(&url).query(&[("unsigned", "true")]))
            .await?;
        let response = error_for_status(response).await?;
        response
            .json::<ProfileDetail>()
            .await
            .map_err(|err| ApiError::Parse(format!("failed to decode profile: {err}")))
    }

    /// Fetches advisory server metadata from the API root. Never fails:
    /// any error, including a forced logout on 401, yields `None`.
    pub async fn get_server_meta(&self) -> Option<ServerMeta> {
        let url = join_url(&self.base_url, "/");
        debug!("GET {url}");

        match self.fetch_meta(&url).await {
            Ok(meta) => Some(meta),
            Err(err) => {
                debug!("server metadata unavailable: {err}");
                None
            }
        }
    }

    async fn fetch_meta(&self, url: &str) -> Result<ServerMeta, ApiError> {
        let response = self.send(self.http.get(url)).await?;
        let response = error_for_status(response).await?;
        response
            .json::<ServerMeta>()
            .await
            .map_err(|err| ApiError::Parse(format!("failed to decode metadata: {err}")))
    }

    /// Destroys the persisted session.
    pub fn logout(&self) {
        if self.store.clear() {
            debug!("session cleared");
        }
    }

    /// Sends a request with the persisted token attached as a bearer
    /// credential when present, then applies the 401 rule to the response.
    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let request = match self.store.access_token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send().await.map_err(|err| transport_error(&err))?;

        if response.status() == StatusCode::UNAUTHORIZED {
            self.force_logout();
            return Err(ApiError::Unauthorized);
        }

        Ok(response)
    }

    /// Clears the session and requests a navigation to the login route.
    /// Navigation fires only when the clear removed a token, so concurrent
    /// 401 responses produce the side effect exactly once.
    fn force_logout(&self) {
        if self.store.clear() {
            warn!("unauthorized response, clearing session");
            self.navigator.navigate(LOGIN);
        }
    }
}

fn transport_error(err: &reqwest::Error) -> ApiError {
    if err.is_timeout() {
        ApiError::Timeout("request timed out".to_string())
    } else {
        ApiError::Network(format!("unable to reach the server: {err}"))
    }
}

async fn error_for_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(ApiError::Http {
        status: status.as_u16(),
        message: sanitize_body(body),
    })
}

/// Decodes a JSON body, mapping an empty body to `null` for endpoints whose
/// success responses carry no payload.
async fn decode_body(response: Response) -> Result<Value, ApiError> {
    let text = response
        .text()
        .await
        .map_err(|err| ApiError::Parse(format!("failed to read response: {err}")))?;

    if text.trim().is_empty() {
        return Ok(Value::Null);
    }

    serde_json::from_str(&text)
        .map_err(|err| ApiError::Parse(format!("failed to decode response: {err}")))
}
