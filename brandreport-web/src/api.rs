use crate::{
    config::FrontendConfig,
    cookies::{CookieStore, DocumentCookieStore},
    session::TOKEN_COOKIE,
};
use once_cell::unsync::OnceCell;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use shared::models::{
    ApiErrorBody, CreateReportRequest, LoginRequest, LoginResponse, RegisterRequest, Report,
    ReportListResponse,
};
use std::rc::Rc;
use thiserror::Error;

thread_local! {
    static SHARED_CLIENT: OnceCell<ReportsClient> = const { OnceCell::new() };
}

/// Failure talking to the reports API.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Network(#[source] reqwest::Error),
    #[error("server responded with {status}")]
    Status {
        status: StatusCode,
        body: Option<ApiErrorBody>,
    },
    #[error("unexpected response body: {0}")]
    Decode(#[source] reqwest::Error),
}

impl ApiError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Network(_) | Self::Decode(_) => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED)
    }

    /// Message supplied by the server, preferring field-level details.
    pub fn server_message(&self) -> Option<String> {
        match self {
            Self::Status { body, .. } => body.as_ref().and_then(ApiErrorBody::summary),
            Self::Network(_) | Self::Decode(_) => None,
        }
    }

    /// Text to show the user, with `fallback` when the server said nothing useful.
    pub fn user_message(&self, fallback: &str) -> String {
        self.server_message()
            .unwrap_or_else(|| fallback.to_string())
    }
}

/// HTTP client for the reports API.
///
/// Authenticated calls read the bearer token from the cookie store at request
/// time, so a login or logout takes effect on the next call.
#[derive(Clone, Debug)]
pub struct ReportsClient {
    base_url: String,
    client: Client,
    tokens: Rc<dyn CookieStore>,
}

impl ReportsClient {
    /// Create a new API client with the provided base URL.
    pub fn new(base_url: &str, tokens: Rc<dyn CookieStore>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
            tokens,
        }
    }

    pub fn shared() -> Self {
        SHARED_CLIENT.with(|cell| {
            cell.get_or_init(|| {
                let config = FrontendConfig::new();
                Self::new(config.api_base_url(), Rc::new(DocumentCookieStore))
            })
            .clone()
        })
    }

    pub(crate) fn api_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub(crate) fn apply_bearer(&self, request: RequestBuilder) -> RequestBuilder {
        match self.tokens.get(TOKEN_COOKIE) {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request.send().await.map_err(ApiError::Network)?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::UNAUTHORIZED {
            // Only logged: the session stays until the user signs out.
            tracing::warn!(url = %response.url(), "unauthorized API response");
        }
        let body = response
            .text()
            .await
            .ok()
            .and_then(|text| parse_error_body(&text));
        Err(ApiError::Status { status, body })
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        response.json().await.map_err(ApiError::Decode)
    }

    /// Authenticate with email/password credentials.
    pub async fn login(&self, payload: &LoginRequest) -> Result<LoginResponse, ApiError> {
        let request = self.client.post(self.api_url("auth/login")).json(payload);
        Self::decode(Self::send(request).await?).await
    }

    /// Create an account. The created record is not needed by the client.
    pub async fn register(&self, payload: &RegisterRequest) -> Result<(), ApiError> {
        let request = self.client.post(self.api_url("auth/register")).json(payload);
        Self::send(request).await?;
        Ok(())
    }

    /// Submit a new weekly report.
    pub async fn create_report(
        &self,
        payload: &CreateReportRequest,
    ) -> Result<serde_json::Value, ApiError> {
        let request = self.apply_bearer(self.client.post(self.api_url("reports")).json(payload));
        Self::decode(Self::send(request).await?).await
    }

    /// Reports authored by the signed-in user.
    pub async fn my_reports(&self) -> Result<Vec<Report>, ApiError> {
        let request = self.apply_bearer(self.client.get(self.api_url("reports/my-reports")));
        let body: ReportListResponse = Self::decode(Self::send(request).await?).await?;
        Ok(body.into_reports())
    }
}

pub(crate) fn parse_error_body(text: &str) -> Option<ApiErrorBody> {
    serde_json::from_str(text).ok()
}
