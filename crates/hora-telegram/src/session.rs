//! Bot session: HTTP plumbing and the `BotApi` implementation.

use crate::offset::OffsetStore;
use async_trait::async_trait;
use hora_core::{
    config::BotConfig,
    error::HoraError,
    message::{ApiResponse, Message, OutboundMessage, Update, User},
    traits::BotApi,
};
use reqwest::StatusCode;
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;
use tracing::{debug, info};

/// A Telegram bot session with long polling and a persisted update cursor.
pub struct BotSession {
    pub(crate) client: reqwest::Client,
    /// `<api_url>/bot<token>`. Never logged.
    pub(crate) base_url: String,
    pub(crate) poll_timeout: u64,
    /// Next update id to request.
    pub(crate) offset: i64,
    pub(crate) store: OffsetStore,
}

impl BotSession {
    /// Create a session starting from `offset`.
    pub fn new(config: &BotConfig, store: OffsetStore, offset: i64) -> Self {
        let base_url = format!(
            "{}/bot{}",
            config.api_url.trim_end_matches('/'),
            config.token
        );
        Self {
            client: reqwest::Client::new(),
            base_url,
            poll_timeout: config.poll_timeout_secs,
            offset: offset.max(0),
            store,
        }
    }

    /// Create a session resuming from the offset persisted in `store`.
    pub async fn open(config: &BotConfig, store: OffsetStore) -> Result<Self, HoraError> {
        let offset = store.load().await?;
        info!(
            "resuming from offset {offset} ({})",
            store.path().display()
        );
        Ok(Self::new(config, store, offset))
    }

    /// Next update id `getUpdates` will ask for.
    pub fn offset(&self) -> i64 {
        self.offset
    }

    /// Identity of the bot behind the token.
    pub async fn get_me(&self) -> Result<ApiResponse<User>, HoraError> {
        info!("get_me");
        self.get("getMe", &[], None).await
    }

    /// GET `<method>` with query parameters.
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        method: &str,
        query: &[(&str, i64)],
        timeout: Option<Duration>,
    ) -> Result<ApiResponse<T>, HoraError> {
        debug!("GET {method} params: {query:?}");
        let mut request = self
            .client
            .get(format!("{}/{method}", self.base_url))
            .query(query);
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }
        let resp = request
            .send()
            .await
            .map_err(|e| transport_error(method, e))?;
        decode(method, resp).await
    }

    /// POST `<method>` with a JSON body.
    pub(crate) async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: &str,
        body: &B,
    ) -> Result<ApiResponse<T>, HoraError> {
        debug!(
            "POST {method} data: {}",
            serde_json::to_string(body).unwrap_or_default()
        );
        let resp = self
            .client
            .post(format!("{}/{method}", self.base_url))
            .json(body)
            .send()
            .await
            .map_err(|e| transport_error(method, e))?;
        decode(method, resp).await
    }
}

/// Require exactly 200 and decode the envelope.
async fn decode<T: DeserializeOwned>(
    method: &str,
    resp: reqwest::Response,
) -> Result<ApiResponse<T>, HoraError> {
    let status = resp.status();
    let body = resp
        .text()
        .await
        .map_err(|e| transport_error(method, e))?;

    if status != StatusCode::OK {
        return Err(HoraError::Status {
            status: status.as_u16(),
            body,
        });
    }

    debug!("{method} response: {body}");
    serde_json::from_str(&body)
        .map_err(|e| HoraError::Decode(format!("telegram {method} response: {e}")))
}

/// Strip the URL from the error; it embeds the bot token.
fn transport_error(method: &str, e: reqwest::Error) -> HoraError {
    HoraError::Transport(format!("telegram {method} failed: {}", e.without_url()))
}

#[async_trait]
impl BotApi for BotSession {
    async fn get_me(&self) -> Result<ApiResponse<User>, HoraError> {
        BotSession::get_me(self).await
    }

    async fn fetch_updates(&self) -> Result<ApiResponse<Vec<Update>>, HoraError> {
        BotSession::fetch_updates(self).await
    }

    async fn commit_updates(
        &mut self,
        batch: &ApiResponse<Vec<Update>>,
    ) -> Result<(), HoraError> {
        BotSession::commit_updates(self, batch).await
    }

    async fn send_message(
        &self,
        message: &OutboundMessage,
    ) -> Result<ApiResponse<Message>, HoraError> {
        BotSession::send_message(self, message).await
    }
}
