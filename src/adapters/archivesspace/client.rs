//! ArchivesSpace HTTP client
//!
//! Production implementation of [`ArchivesSpaceApi`] over `reqwest`. A client
//! is constructed by [`ArchivesSpaceClient::connect`], which performs the
//! session login; the resulting session token is sent on every subsequent
//! request as the `X-ArchivesSpace-Session` header.
//!
//! Every request carries the configured per-call timeout. Nothing here is
//! retried; callers decide whether a failure skips one record or aborts the
//! run.

use super::api::ArchivesSpaceApi;
use super::models::{LoginResponse, ResourceDetail, ResourceDto};
use crate::config::{ArchivesSpaceConfig, SecretString};
use crate::domain::{ArchivesSpaceError, Result};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, Response, StatusCode};
use secrecy::ExposeSecret;
use std::time::Duration;

/// Session header expected by the backend on authenticated requests
const SESSION_HEADER: &str = "X-ArchivesSpace-Session";

/// Authenticated HTTP client for one ArchivesSpace backend
///
/// # Example
///
/// ```no_run
/// use marcexport::adapters::archivesspace::{ArchivesSpaceApi, ArchivesSpaceClient};
/// use marcexport::config::ArchivesSpaceConfig;
///
/// # async fn example() -> marcexport::domain::Result<()> {
/// let config = ArchivesSpaceConfig::default();
/// let client = ArchivesSpaceClient::connect(&config).await?;
/// let detail = client.resource(2, 5).await?;
/// println!("{}", detail.identifiers);
/// # Ok(())
/// # }
/// ```
pub struct ArchivesSpaceClient {
    /// Base URL with any trailing slash removed
    base_url: String,

    /// HTTP client for making requests
    client: Client,

    /// Session token from the login endpoint
    session_token: String,
}

impl ArchivesSpaceClient {
    /// Connects to the backend and establishes a session
    ///
    /// Builds the HTTP client with the configured timeout and TLS settings,
    /// then logs in with the configured credentials. This is the single
    /// fatal failure point of both pipelines; everything after it degrades
    /// per record.
    ///
    /// # Errors
    ///
    /// Returns a connection error if the backend is unreachable or the
    /// client cannot be built, and an authentication error if the login is
    /// rejected.
    pub async fn connect(config: &ArchivesSpaceConfig) -> Result<Self> {
        let base_url = config.base_url.trim_end_matches('/').to_string();

        let mut client_builder = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(30));

        if !config.tls_verify {
            client_builder = client_builder.danger_accept_invalid_certs(true);
        }

        let client = client_builder
            .build()
            .map_err(|e| ArchivesSpaceError::ConnectionFailed(e.to_string()))?;

        let session_token = login(&client, &base_url, &config.username, &config.password).await?;

        tracing::info!(
            base_url = %base_url,
            username = %config.username,
            "ArchivesSpace session established"
        );

        Ok(Self {
            base_url,
            client,
            session_token,
        })
    }

    /// Issues an authenticated GET and maps non-success statuses to errors
    async fn get(&self, endpoint: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url, endpoint);
        tracing::debug!(url = %url, "GET");

        let resp = self
            .client
            .get(&url)
            .header(SESSION_HEADER, &self.session_token)
            .send()
            .await
            .map_err(map_send_error)?;

        check_status(resp, endpoint).await
    }
}

#[async_trait]
impl ArchivesSpaceApi for ArchivesSpaceClient {
    async fn resource_ids(&self, repository_id: u32) -> Result<Vec<u32>> {
        let endpoint = format!("/repositories/{repository_id}/resources?all_ids=true");
        let resp = self.get(&endpoint).await?;

        let ids = resp
            .json::<Vec<u32>>()
            .await
            .map_err(|e| ArchivesSpaceError::InvalidResponse(e.to_string()))?;

        tracing::debug!(repository_id, count = ids.len(), "Listed resource IDs");
        Ok(ids)
    }

    async fn resource(&self, repository_id: u32, resource_id: u32) -> Result<ResourceDetail> {
        let endpoint = format!("/repositories/{repository_id}/resources/{resource_id}");
        let resp = self.get(&endpoint).await?;

        let dto = resp
            .json::<ResourceDto>()
            .await
            .map_err(|e| ArchivesSpaceError::InvalidResponse(e.to_string()))?;

        Ok(dto.into_detail())
    }

    async fn raw_bytes(&self, endpoint: &str) -> Result<Vec<u8>> {
        let resp = self.get(endpoint).await?;

        let bytes = resp
            .bytes()
            .await
            .map_err(|e| ArchivesSpaceError::InvalidResponse(e.to_string()))?;

        Ok(bytes.to_vec())
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// Performs the session login and returns the token
async fn login(
    client: &Client,
    base_url: &str,
    username: &str,
    password: &SecretString,
) -> Result<String> {
    let url = format!("{base_url}/users/{username}/login");

    let resp = client
        .post(&url)
        .form(&[("password", password.expose_secret().as_ref())])
        .send()
        .await
        .map_err(map_send_error)?;

    match resp.status() {
        StatusCode::OK => {
            let body: LoginResponse = resp
                .json()
                .await
                .map_err(|e| ArchivesSpaceError::InvalidResponse(e.to_string()))?;
            Ok(body.session)
        }
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            Err(ArchivesSpaceError::AuthenticationFailed(format!(
                "login rejected for user '{username}'"
            ))
            .into())
        }
        status => {
            let body = resp.text().await.unwrap_or_default();
            Err(ArchivesSpaceError::InvalidResponse(format!(
                "login returned status {status}: {body}"
            ))
            .into())
        }
    }
}

/// Maps transport-level send failures onto domain errors
fn map_send_error(e: reqwest::Error) -> ArchivesSpaceError {
    if e.is_timeout() {
        ArchivesSpaceError::Timeout(e.to_string())
    } else {
        ArchivesSpaceError::ConnectionFailed(e.to_string())
    }
}

/// Maps non-success HTTP statuses onto domain errors
async fn check_status(resp: Response, context: &str) -> Result<Response> {
    let status = resp.status();

    if status.is_success() {
        return Ok(resp);
    }

    match status {
        StatusCode::NOT_FOUND => Err(ArchivesSpaceError::NotFound(context.to_string()).into()),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            Err(ArchivesSpaceError::AuthenticationFailed(context.to_string()).into())
        }
        StatusCode::PRECONDITION_FAILED => Err(ArchivesSpaceError::SessionExpired.into()),
        status if status.is_server_error() => {
            let body = resp.text().await.unwrap_or_default();
            Err(ArchivesSpaceError::ServerError {
                status: status.as_u16(),
                message: body,
            }
            .into())
        }
        status => {
            let body = resp.text().await.unwrap_or_default();
            Err(ArchivesSpaceError::ClientError {
                status: status.as_u16(),
                message: body,
            }
            .into())
        }
    }
}
