//! Outgoing messages.

use crate::session::BotSession;
use hora_core::{
    error::HoraError,
    message::{ApiResponse, Message, OutboundMessage},
};
use tracing::info;

impl BotSession {
    /// Send a text message. `message_thread_id` is only included for thread ids above zero.
    pub async fn send_message(
        &self,
        message: &OutboundMessage,
    ) -> Result<ApiResponse<Message>, HoraError> {
        info!("send_message to chat {}", message.chat_id);
        self.post("sendMessage", message).await
    }
}
