use crate::{
    error::HoraError,
    message::{ApiResponse, Message, OutboundMessage, Update, User},
};
use async_trait::async_trait;

/// Bot API surface the poll loop drives.
///
/// The Telegram session implements this over HTTP; tests substitute an
/// in-memory fake.
#[async_trait]
pub trait BotApi: Send + Sync {
    /// Identity of the bot behind the token.
    async fn get_me(&self) -> Result<ApiResponse<User>, HoraError>;

    /// Long-poll for the next batch without moving the cursor.
    ///
    /// Safe to cancel: nothing is persisted until `commit_updates`.
    async fn fetch_updates(&self) -> Result<ApiResponse<Vec<Update>>, HoraError>;

    /// Advance the cursor past every update in `batch` and persist it.
    async fn commit_updates(&mut self, batch: &ApiResponse<Vec<Update>>)
        -> Result<(), HoraError>;

    /// Fetch the next batch and commit the cursor past it.
    async fn get_updates(&mut self) -> Result<ApiResponse<Vec<Update>>, HoraError> {
        let batch = self.fetch_updates().await?;
        self.commit_updates(&batch).await?;
        Ok(batch)
    }

    /// Send a text message.
    async fn send_message(
        &self,
        message: &OutboundMessage,
    ) -> Result<ApiResponse<Message>, HoraError>;
}
