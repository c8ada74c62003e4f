//! JSON-over-HTTP implementation of [`Backend`].

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use std::sync::RwLock;
use std::time::Duration;

use super::{
    ApprovalDecision, Backend, BackendError, Credentials, ImportSummary, Record, RecordDraft, ResourceKind, Row,
    SessionInfo,
};
use crate::constants::{CODE_FORBIDDEN, CODE_INVALID_DATA, CODE_NOT_FOUND, CODE_UNAUTHORIZED};

/// Error body returned by the server on non-2xx responses
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct TaxonomyBody {
    #[serde(default)]
    types: Vec<String>,
}

pub struct HttpBackend {
    client: Client,
    base_url: String,
    api_key: RwLock<String>,
}

impl HttpBackend {
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self, BackendError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BackendError::unavailable(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: RwLock::new(api_key.to_string()),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self.client.request(method, url);
        let key = self.api_key.read().map(|key| key.clone()).unwrap_or_default();
        if key.is_empty() {
            builder
        } else {
            builder.bearer_auth(key)
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url, BackendError> {
        Url::parse(&self.url(path)).map_err(|e| BackendError::new(CODE_INVALID_DATA, format!("invalid URL: {e}")))
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, BackendError> {
        let response = builder.send().await.map_err(map_transport_error)?;
        if response.status().is_success() {
            Ok(response)
        } else {
            Err(read_error_response(response).await)
        }
    }

    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, BackendError> {
        let response = self.send(builder).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| BackendError::new(CODE_INVALID_DATA, format!("failed to decode response: {e}")))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, BackendError> {
        let url = self.endpoint(path)?;
        self.send_json(self.request(Method::GET, url)).await
    }
}

fn map_transport_error(error: reqwest::Error) -> BackendError {
    if error.is_timeout() {
        BackendError::timeout(format!("request timeout: {error}"))
    } else if error.is_connect() {
        BackendError::unavailable(format!("connection failed: {error}"))
    } else {
        BackendError::new("NETWORK", error.to_string())
    }
}

async fn read_error_response(response: Response) -> BackendError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let detail = serde_json::from_str::<ErrorBody>(&body).ok().map(|body| body.error);

    let fallback_code = match status {
        StatusCode::UNAUTHORIZED => CODE_UNAUTHORIZED.to_string(),
        StatusCode::FORBIDDEN => CODE_FORBIDDEN.to_string(),
        StatusCode::NOT_FOUND => CODE_NOT_FOUND.to_string(),
        other => format!("HTTP_{}", other.as_u16()),
    };

    match detail {
        Some(detail) => BackendError::new(
            if detail.code.is_empty() { fallback_code } else { detail.code },
            if detail.message.is_empty() { status.to_string() } else { detail.message },
        ),
        None => BackendError::new(fallback_code, if body.is_empty() { status.to_string() } else { body }),
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn health(&self) -> Result<(), BackendError> {
        let url = self.endpoint("/health")?;
        self.send(self.request(Method::GET, url)).await.map(|_| ())
    }

    async fn whoami(&self) -> Result<SessionInfo, BackendError> {
        self.get_json("/v1/session").await
    }

    async fn reauthenticate(&self, username: &str) -> Result<Credentials, BackendError> {
        let url = self.endpoint("/v1/session/refresh")?;
        self.send_json(self.request(Method::POST, url).json(&json!({ "username": username })))
            .await
    }

    fn set_api_key(&self, api_key: &str) {
        if let Ok(mut key) = self.api_key.write() {
            *key = api_key.to_string();
        }
    }

    async fn taxonomy(&self) -> Result<Vec<String>, BackendError> {
        let body: TaxonomyBody = self.get_json("/v1/taxonomy").await?;
        Ok(body.types)
    }

    async fn list(&self, kind: ResourceKind) -> Result<Vec<Record>, BackendError> {
        self.get_json(&format!("/v1/{}", kind.path())).await
    }

    async fn get(&self, kind: ResourceKind, id: &str) -> Result<Record, BackendError> {
        self.get_json(&format!("/v1/{}/{}", kind.path(), id)).await
    }

    async fn create(&self, kind: ResourceKind, draft: &RecordDraft) -> Result<Record, BackendError> {
        let url = self.endpoint(&format!("/v1/{}", kind.path()))?;
        self.send_json(self.request(Method::POST, url).json(draft)).await
    }

    async fn update(&self, kind: ResourceKind, id: &str, draft: &RecordDraft) -> Result<Record, BackendError> {
        let url = self.endpoint(&format!("/v1/{}/{}", kind.path(), id))?;
        self.send_json(self.request(Method::PATCH, url).json(draft)).await
    }

    async fn decide_approval(&self, id: &str, decision: ApprovalDecision) -> Result<Record, BackendError> {
        let url = self.endpoint(&format!("/v1/approvals/{}/{}", id, decision.verb()))?;
        self.send_json(self.request(Method::POST, url)).await
    }

    async fn bulk_import(&self, kind: ResourceKind, rows: &[Row]) -> Result<ImportSummary, BackendError> {
        let url = self.endpoint(&format!("/v1/{}/import", kind.path()))?;
        self.send_json(self.request(Method::POST, url).json(&json!({ "rows": rows })))
            .await
    }

    async fn export_rows(&self, kind: ResourceKind) -> Result<Vec<Row>, BackendError> {
        self.get_json(&format!("/v1/{}/export", kind.path())).await
    }

    async fn search(&self, kind: Option<ResourceKind>, query: &str, limit: usize) -> Result<Vec<Record>, BackendError> {
        let mut params = vec![("q", query.to_string()), ("limit", limit.to_string())];
        if let Some(kind) = kind {
            params.push(("kind", kind.path().to_string()));
        }
        let url = Url::parse_with_params(&self.url("/v1/search"), &params)
            .map_err(|e| BackendError::new(CODE_INVALID_DATA, format!("invalid URL: {e}")))?;
        self.send_json(self.request(Method::GET, url)).await
    }
}
