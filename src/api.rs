// API client module: a blocking HTTP client for the vault-build server.
// Every authenticated call goes through `authorized`, which reads the
// session token from the injected `TokenStore` and attaches it as a bearer
// header. Nothing else in the crate reads the token for a request.

use crate::config::Config;
use crate::error::{CliError, Result};
use crate::models::{
    CompleteRegistration, EnableUser, LoginRequest, LoginResponse, NewPackage, NewUser, Package,
    RecordId, User,
};
use crate::token_store::TokenStore;
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;

pub struct ApiClient {
    client: Client,
    base_url: String,
    tokens: Box<dyn TokenStore>,
}

impl ApiClient {
    /// Build a client for the server described by `config`.
    pub fn new(config: &Config, tokens: Box<dyn TokenStore>) -> Result<Self> {
        Self::with_base_url(&config.base_url(), tokens)
    }

    pub fn with_base_url(base_url: &str, tokens: Box<dyn TokenStore>) -> Result<Self> {
        let client = Client::builder().build()?;
        Ok(ApiClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            tokens,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn tokens(&self) -> &dyn TokenStore {
        self.tokens.as_ref()
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%method, %url, "request");
        self.client.request(method, url)
    }

    /// Request carrying `Authorization: Bearer <token>`. Fails with
    /// `NotLoggedIn` when no token is stored.
    pub fn authorized(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let token = self.tokens.read()?;
        Ok(self.request(method, path).bearer_auth(token))
    }

    /// Send and turn any non-2xx status into `CliError::Api`.
    fn send(&self, req: RequestBuilder) -> Result<Response> {
        let res = req.send()?;
        let status = res.status();
        tracing::debug!(%status, url = %res.url(), "response");
        if !status.is_success() {
            let body = res.text().unwrap_or_default();
            return Err(CliError::Api { status, body });
        }
        Ok(res)
    }

    fn send_json<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T> {
        let res = self.send(req)?;
        Ok(res.json()?)
    }

    // ---- sessions ----

    /// `POST /sessions`. A 401/403 means the credentials were rejected.
    pub fn create_session(&self, req: &LoginRequest) -> Result<LoginResponse> {
        let builder = self.request(Method::POST, "/sessions").json(req);
        match self.send_json(builder) {
            Err(CliError::Api { status, body })
                if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN =>
            {
                let reason = if body.is_empty() {
                    status.to_string()
                } else {
                    body
                };
                Err(CliError::Authentication(reason))
            }
            other => other,
        }
    }

    /// `DELETE /sessions` with an explicit token. Logout clears the store
    /// before revoking, so it cannot go through `authorized`.
    pub fn revoke_session(&self, token: &str) -> Result<()> {
        let builder = self.request(Method::DELETE, "/sessions").bearer_auth(token);
        self.send(builder)?;
        Ok(())
    }

    // ---- users ----

    /// `GET /users`, optionally filtered by email.
    pub fn list_users(&self, email: Option<&str>) -> Result<Vec<User>> {
        let mut builder = self.authorized(Method::GET, "/users")?;
        if let Some(email) = email {
            builder = builder.query(&[("email", email)]);
        }
        self.send_json(builder)
    }

    pub fn create_user(&self, user: &NewUser<'_>) -> Result<User> {
        let builder = self.authorized(Method::POST, "/users")?.json(user);
        self.send_json(builder)
    }

    /// `PUT /users/register`. Unauthenticated: the one-time registration
    /// token travels in the body.
    pub fn complete_registration(&self, req: &CompleteRegistration<'_>) -> Result<User> {
        let builder = self.request(Method::PUT, "/users/register").json(req);
        self.send_json(builder)
    }

    pub fn set_user_enabled(&self, id: &RecordId, enabled: bool) -> Result<User> {
        let path = format!("/users/{}/enable", id);
        let builder = self
            .authorized(Method::PUT, &path)?
            .json(&EnableUser { enabled });
        self.send_json(builder)
    }

    pub fn delete_user(&self, id: &RecordId) -> Result<()> {
        let builder = self.authorized(Method::DELETE, &format!("/users/{}", id))?;
        self.send(builder)?;
        Ok(())
    }

    // ---- packages ----

    /// `GET /packages`, optionally filtered by application version.
    pub fn list_packages(&self, application_version: Option<&str>) -> Result<Vec<Package>> {
        let mut builder = self.authorized(Method::GET, "/packages")?;
        if let Some(version) = application_version {
            builder = builder.query(&[("applicationVersion", version)]);
        }
        self.send_json(builder)
    }

    pub fn create_package(&self, pkg: &NewPackage<'_>) -> Result<Package> {
        let builder = self.authorized(Method::POST, "/packages")?.json(pkg);
        self.send_json(builder)
    }

    pub fn delete_package(&self, id: &RecordId) -> Result<()> {
        let builder = self.authorized(Method::DELETE, &format!("/packages/{}", id))?;
        self.send(builder)?;
        Ok(())
    }

    /// Opens the artifact download. The caller streams the body; the
    /// status has already been checked.
    pub fn download_package(&self, id: &RecordId, application_version: &str) -> Result<Response> {
        let builder = self
            .authorized(Method::GET, &format!("/packages/{}/download", id))?
            .query(&[("applicationVersion", application_version)]);
        self.send(builder)
    }
}
