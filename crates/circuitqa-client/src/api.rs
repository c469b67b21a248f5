//! Backend REST client.
//!
//! Every request carries `Content-Type: application/json`, the ambient cookie
//! string and, when the cookie holds one, the CSRF token in `X-CSRFToken`.
//! POST requests without a CSRF token fail locally before anything is sent.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url, header};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use circuitqa_core::api::{
    ASK_QUESTION_PATH, CIRCUITS_PATH, ErrorBody, circuit_parse_path, session_path,
};
use circuitqa_core::{
    AskQuestionRequest, CSRF_COOKIE_NAME, CSRF_HEADER_NAME, CircuitApi, CircuitSummary,
    CreateCircuitRequest, CreatedCircuit, ParsedCircuit, QuestionAnswerExchange, SessionDetail,
    UiResult, read_cookie_token,
};

use crate::error::{ClientError, ClientResult};

/// Backend used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend root, e.g. `https://circuits.example.org` or `https://host/tutor`.
    pub base_url: String,
    /// Cookie string sent with every request (`a=1; b=2`).
    pub cookies: String,
    /// Name of the cookie holding the CSRF token.
    pub csrf_cookie: String,
    /// Whole-request timeout.
    pub timeout: Duration,
    /// Connection timeout.
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            cookies: String::new(),
            csrf_cookie: CSRF_COOKIE_NAME.to_string(),
            timeout: Duration::from_secs(60),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_cookies(mut self, cookies: impl Into<String>) -> Self {
        self.cookies = cookies.into();
        self
    }

    pub fn with_csrf_cookie(mut self, name: impl Into<String>) -> Self {
        self.csrf_cookie = name.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// HTTP client for the Circuit Q&A backend.
pub struct ApiClient {
    client: Client,
    base_url: Url,
    cookies: String,
    csrf_cookie: String,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .field("cookies", &"[REDACTED]")
            .field("csrf_cookie", &self.csrf_cookie)
            .finish()
    }
}

impl ApiClient {
    /// Create a client from configuration.
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| ClientError::InvalidUrl {
            url: config.base_url.clone(),
            reason: e.to_string(),
        })?;

        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(ClientError::Http)?;

        Ok(Self {
            client,
            base_url,
            cookies: config.cookies,
            csrf_cookie: config.csrf_cookie,
        })
    }

    /// Create a client for `base_url` with default settings.
    pub fn with_base_url(base_url: impl Into<String>) -> ClientResult<Self> {
        Self::new(ClientConfig::new(base_url))
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// CSRF token from the configured cookie string, if present.
    pub fn csrf_token(&self) -> Option<String> {
        read_cookie_token(&self.cookies, &self.csrf_cookie)
    }

    /// Append `path` to the base URL, keeping any path prefix of the base.
    fn url(&self, path: &str) -> ClientResult<Url> {
        let url = format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        Url::parse(&url).map_err(|e| ClientError::InvalidUrl {
            url,
            reason: e.to_string(),
        })
    }

    fn request(&self, method: reqwest::Method, url: Url) -> reqwest::RequestBuilder {
        let mut builder = self
            .client
            .request(method, url)
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::ACCEPT, "application/json");
        if !self.cookies.is_empty() {
            builder = builder.header(header::COOKIE, &self.cookies);
        }
        if let Some(token) = self.csrf_token() {
            builder = builder.header(CSRF_HEADER_NAME, token);
        }
        builder
    }

    /// Perform a GET request, returning the deserialized JSON body.
    async fn get<T: for<'de> Deserialize<'de>>(&self, path: &str) -> ClientResult<T> {
        let url = self.url(path)?;
        debug!("GET {}", url);

        let resp = self.request(reqwest::Method::GET, url).send().await?;
        Self::handle_response(resp).await
    }

    /// Perform a POST request with a JSON body, returning the deserialized JSON body.
    async fn post<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> ClientResult<T> {
        if self.csrf_token().is_none() {
            return Err(ClientError::MissingCsrfToken(self.csrf_cookie.clone()));
        }
        let url = self.url(path)?;
        debug!("POST {}", url);

        let resp = self
            .request(reqwest::Method::POST, url)
            .body(serde_json::to_vec(body)?)
            .send()
            .await?;
        Self::handle_response(resp).await
    }

    /// Deserialize a 2xx body, or turn the `{error}` body into [`ClientError::Api`].
    async fn handle_response<T: for<'de> Deserialize<'de>>(
        response: reqwest::Response,
    ) -> ClientResult<T> {
        let status = response.status();

        if status.is_success() {
            let body = response.json().await?;
            Ok(body)
        } else {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&text)
                .ok()
                .and_then(|b| b.error);
            warn!(status = status.as_u16(), "backend returned an error");
            Err(ClientError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }

    // -----------------------------------------------------------------------
    // Public API methods
    // -----------------------------------------------------------------------

    /// Store a new circuit.
    #[instrument(skip(self, req), fields(title = %req.title))]
    pub async fn post_circuit(&self, req: &CreateCircuitRequest) -> ClientResult<CreatedCircuit> {
        self.post(CIRCUITS_PATH, req).await
    }

    /// List the user's circuits.
    #[instrument(skip(self))]
    pub async fn fetch_circuits(&self) -> ClientResult<Vec<CircuitSummary>> {
        self.get(CIRCUITS_PATH).await
    }

    /// Parse a stored circuit's code on the server. The request has no body.
    #[instrument(skip(self))]
    pub async fn post_parse(&self, id: i64) -> ClientResult<ParsedCircuit> {
        self.post(&circuit_parse_path(id), &serde_json::json!({})).await
    }

    /// Ask a question.
    #[instrument(skip(self, req), fields(circuit_id = ?req.circuit_id))]
    pub async fn post_question(
        &self,
        req: &AskQuestionRequest,
    ) -> ClientResult<QuestionAnswerExchange> {
        self.post(ASK_QUESTION_PATH, req).await
    }

    /// Fetch a stored Q&A session.
    #[instrument(skip(self))]
    pub async fn fetch_session(&self, id: i64) -> ClientResult<SessionDetail> {
        self.get(&session_path(id)).await
    }
}

#[async_trait]
impl CircuitApi for ApiClient {
    async fn create_circuit(&self, req: &CreateCircuitRequest) -> UiResult<CreatedCircuit> {
        Ok(self.post_circuit(req).await?)
    }

    async fn list_circuits(&self) -> UiResult<Vec<CircuitSummary>> {
        Ok(self.fetch_circuits().await?)
    }

    async fn parse_circuit(&self, id: i64) -> UiResult<ParsedCircuit> {
        Ok(self.post_parse(id).await?)
    }

    async fn ask_question(&self, req: &AskQuestionRequest) -> UiResult<QuestionAnswerExchange> {
        Ok(self.post_question(req).await?)
    }

    async fn get_session(&self, id: i64) -> UiResult<SessionDetail> {
        Ok(self.fetch_session(id).await?)
    }
}
