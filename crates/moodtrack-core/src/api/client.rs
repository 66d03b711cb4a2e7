use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::MoodApi;
use crate::config::MoodConfig;
use crate::error::{extract_server_message, MoodError, Result};
use crate::model::*;
use crate::session::SessionStore;

/// HTTP client for the mood-tracker backend.
///
/// Reads the bearer token from the session store on every request and hands
/// back only the `data` part of successful responses.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    recommendation_path: String,
    logout_on_unauthorized: bool,
    session: Arc<dyn SessionStore>,
}

/// Successful responses wrap their payload as `{ "data": ..., "message": ... }`.
#[derive(Deserialize)]
struct Envelope {
    #[serde(default)]
    data: Option<serde_json::Value>,
}

impl ApiClient {
    pub fn new(config: &MoodConfig, session: Arc<dyn SessionStore>) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.api.timeout_secs))
            .build()
            .map_err(|e| MoodError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            http,
            base_url: config.api.base_url.trim_end_matches('/').to_string(),
            recommendation_path: config.api.recommendation_path.clone(),
            logout_on_unauthorized: config.auth.logout_on_unauthorized,
            session,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Arc<dyn SessionStore> {
        &self.session
    }

    fn url(&self, path: &str, query: &[(&str, String)]) -> Result<reqwest::Url> {
        let mut url = reqwest::Url::parse(&format!("{}{}", self.base_url, path))
            .map_err(|e| MoodError::Config(format!("invalid API url {}{path}: {e}", self.base_url)))?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in query {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    /// Send one request and return the envelope's `data`, `Null` when absent.
    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> Result<serde_json::Value> {
        let url = self.url(path, query)?;
        self.send_url(method, url, path, body).await
    }

    /// `path` with `segment` appended as one escaped path segment.
    fn url_with_segment(&self, path: &str, segment: &str) -> Result<reqwest::Url> {
        let mut url = self.url(path, &[])?;
        url.path_segments_mut()
            .map_err(|()| MoodError::Config(format!("API url for {path} cannot take a path")))?
            .pop_if_empty()
            .push(segment);
        Ok(url)
    }

    async fn send_url<B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: reqwest::Url,
        path: &str,
        body: Option<&B>,
    ) -> Result<serde_json::Value> {
        tracing::debug!(%method, path, "api request");

        let mut req = self.http.request(method.clone(), url);
        if let Some(token) = self.session.token()? {
            req = req.bearer_auth(token);
        }
        if let Some(body) = body {
            req = req.json(body);
        }

        let resp = req.send().await.map_err(|e| {
            tracing::warn!(%method, path, error = %e, "api request failed");
            MoodError::from(e)
        })?;
        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            let message = extract_server_message(&text);
            tracing::warn!(%method, path, %status, message = ?message, "api error response");
            if status == StatusCode::UNAUTHORIZED {
                self.on_unauthorized();
                return Err(MoodError::Unauthorized { message });
            }
            return Err(MoodError::Api {
                status: status.as_u16(),
                message,
            });
        }

        if text.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }
        let envelope: Envelope = serde_json::from_str(&text)?;
        Ok(envelope.data.unwrap_or(serde_json::Value::Null))
    }

    /// Like `get_data`, but `null`, `{}` and `[]` all mean "nothing there".
    async fn get_optional<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Option<T>> {
        let data = self.send::<()>(Method::GET, path, query, None).await?;
        if is_empty_value(&data) {
            return Ok(None);
        }
        Ok(Some(serde_json::from_value(data)?))
    }

    async fn get_data<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let data = self.send::<()>(Method::GET, path, query, None).await?;
        Ok(serde_json::from_value(data)?)
    }

    async fn send_data<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let data = self.send(method, path, &[], Some(body)).await?;
        Ok(serde_json::from_value(data)?)
    }

    fn on_unauthorized(&self) {
        if !self.logout_on_unauthorized {
            return;
        }
        match self.session.clear() {
            Ok(()) => tracing::info!("server rejected the session token; stored session cleared"),
            Err(e) => tracing::warn!("failed to clear rejected session: {e}"),
        }
    }
}

fn is_empty_value(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => true,
        serde_json::Value::Object(map) => map.is_empty(),
        serde_json::Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

/// The write already succeeded; a body that is not a full record is not an error.
fn written_record(data: serde_json::Value) -> Option<MoodRecord> {
    if is_empty_value(&data) {
        return None;
    }
    serde_json::from_value(data)
        .map_err(|e| tracing::debug!("write response is not a mood record: {e}"))
        .ok()
}

fn period_query(period: Period) -> [(&'static str, String); 2] {
    [
        ("month", period.month.to_string()),
        ("year", period.year.to_string()),
    ]
}

impl MoodApi for ApiClient {
    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let resp: Option<LoginResponse> = self.send_data(Method::POST, "/login", &body).await?;
        resp.ok_or_else(|| MoodError::UnexpectedResponse("login response had no data".to_string()))
    }

    async fn register(&self, name: &str, email: &str, password: &str) -> Result<serde_json::Value> {
        let body = RegisterRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        self.send(Method::POST, "/register", &[], Some(&body)).await
    }

    async fn create_mood(&self, input: &MoodInput) -> Result<Option<MoodRecord>> {
        let data = self
            .send(Method::POST, "/mood/create", &[], Some(input))
            .await?;
        Ok(written_record(data))
    }

    async fn update_mood(&self, id: &str, input: &MoodInput) -> Result<Option<MoodRecord>> {
        let url = self.url_with_segment("/mood/update", id)?;
        let data = self
            .send_url(Method::PUT, url, "/mood/update", Some(input))
            .await?;
        Ok(written_record(data))
    }

    async fn today_mood(&self) -> Result<Option<MoodRecord>> {
        self.get_optional("/report/today", &[]).await
    }

    async fn weekly_moods(&self) -> Result<Vec<MoodRecord>> {
        let records: Option<Vec<MoodRecord>> = self.get_data("/report/weekly", &[]).await?;
        Ok(records.unwrap_or_default())
    }

    async fn monthly_moods(&self, period: Period) -> Result<Vec<MoodRecord>> {
        let records: Option<Vec<MoodRecord>> = self
            .get_data("/report/monthly", &period_query(period))
            .await?;
        Ok(records.unwrap_or_default())
    }

    async fn recommendation(&self, period: Period) -> Result<Option<Recommendation>> {
        self.get_optional(&self.recommendation_path, &period_query(period))
            .await
    }
}
