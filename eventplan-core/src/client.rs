//! HTTP client for the sessions REST backend.

use std::future::Future;
use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::config::EventPlanConfig;
use crate::error::{EventPlanError, EventPlanResult};
use crate::query::SessionQuery;
use crate::session::{Page, Session};

const JSON: &str = "application/json";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// The four operations the backend exposes for sessions.
///
/// View models are generic over this so they can be driven by something
/// other than the HTTP client.
pub trait SessionApi {
    fn list_sessions(
        &self,
        query: &SessionQuery,
    ) -> impl Future<Output = EventPlanResult<Page<Session>>> + Send;

    fn create_session(
        &self,
        session: &Session,
    ) -> impl Future<Output = EventPlanResult<Session>> + Send;

    fn update_session(
        &self,
        id: i64,
        session: &Session,
    ) -> impl Future<Output = EventPlanResult<Session>> + Send;

    fn delete_session(&self, id: i64) -> impl Future<Output = EventPlanResult<()>> + Send;
}

/// reqwest-backed [`SessionApi`].
#[derive(Clone)]
pub struct HttpSessionClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpSessionClient {
    /// `base_url` is the sessions collection, e.g.
    /// `http://localhost:8080/api/v1/events/sessions`.
    pub fn new(base_url: impl Into<String>) -> EventPlanResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| EventPlanError::Config(format!("Could not build HTTP client: {e}")))?;

        Ok(HttpSessionClient {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &EventPlanConfig) -> EventPlanResult<Self> {
        Self::new(config.sessions_url())
    }

    fn item_url(&self, id: i64) -> String {
        format!("{}/{}", self.base_url, id)
    }
}

impl SessionApi for HttpSessionClient {
    /// GET /events/sessions?...
    async fn list_sessions(&self, query: &SessionQuery) -> EventPlanResult<Page<Session>> {
        let url = format!("{}{}", self.base_url, query.to_query_string());
        tracing::debug!(%url, "listing sessions");

        let resp = send(self.http.get(&url).header(ACCEPT, JSON), "load sessions").await?;
        decode(resp, "load sessions").await
    }

    /// POST /events/sessions
    async fn create_session(&self, session: &Session) -> EventPlanResult<Session> {
        tracing::debug!(title = %session.title, "creating session");

        let request = self
            .http
            .post(&self.base_url)
            .header(ACCEPT, JSON)
            .header(CONTENT_TYPE, JSON)
            .json(&session.without_id());
        let resp = send(request, "create session").await?;
        decode(resp, "create session").await
    }

    /// PUT /events/sessions/:id
    async fn update_session(&self, id: i64, session: &Session) -> EventPlanResult<Session> {
        tracing::debug!(id, "updating session");

        let request = self
            .http
            .put(self.item_url(id))
            .header(ACCEPT, JSON)
            .header(CONTENT_TYPE, JSON)
            .json(session);
        let resp = send(request, "update session").await?;
        decode(resp, "update session").await
    }

    /// DELETE /events/sessions/:id
    async fn delete_session(&self, id: i64) -> EventPlanResult<()> {
        tracing::debug!(id, "deleting session");

        send(
            self.http.delete(self.item_url(id)).header(ACCEPT, JSON),
            "delete session",
        )
        .await?;
        Ok(())
    }
}

/// Send a request; transport failures and non-2xx statuses both become
/// errors. Error bodies are not read.
async fn send(request: RequestBuilder, operation: &str) -> EventPlanResult<Response> {
    let resp = request
        .send()
        .await
        .map_err(|e| EventPlanError::Transport {
            operation: operation.to_string(),
            message: e.to_string(),
        })?;

    let status = resp.status();
    if !status.is_success() {
        return Err(EventPlanError::Status {
            operation: operation.to_string(),
            status: status.as_u16(),
        });
    }

    Ok(resp)
}

async fn decode<T: DeserializeOwned>(resp: Response, operation: &str) -> EventPlanResult<T> {
    resp.json::<T>().await.map_err(|e| EventPlanError::Decode {
        operation: operation.to_string(),
        message: e.to_string(),
    })
}
