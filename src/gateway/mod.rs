//! Gateway — the poll loop connecting the Bot API session to the `/hora` command.
//!
//! Startup sends an identity check and an optional announcement, then the loop
//! fetches updates and answers each `/hora` with the current UTC time. Fetch,
//! dispatch and replies run strictly in sequence; any failed call ends the loop.

mod commands;


use chrono::Utc;
use hora_core::{
    config::BotConfig,
    error::HoraError,
    message::{ApiResponse, OutboundMessage, Update},
    traits::BotApi,
};
use std::future::Future;
use tracing::{debug, info, warn};

/// The poll loop for a single configured chat.
pub struct Gateway<B> {
    bot: B,
    chat_id: i64,
    announce_startup: bool,
}

impl<B: BotApi> Gateway<B> {
    pub fn new(bot: B, config: &BotConfig) -> Self {
        Self {
            bot,
            chat_id: config.chat_id,
            announce_startup: config.announce_startup,
        }
    }

    /// Run until a remote call fails or `shutdown` resolves.
    ///
    /// Shutdown is only observed while waiting on `getUpdates`, so a batch
    /// already received is always committed and fully answered, and a
    /// cancelled fetch never moves the persisted offset.
    pub async fn run<S>(mut self, shutdown: S) -> anyhow::Result<()>
    where
        S: Future<Output = ()>,
    {
        self.initialize().await?;
        info!("Hora gateway polling | chat: {}", self.chat_id);

        tokio::pin!(shutdown);
        loop {
            // Only the round-trip races shutdown; once a batch is in hand it is
            // committed and answered before shutdown is looked at again.
            let batch = tokio::select! {
                batch = self.bot.fetch_updates() => batch?,
                _ = &mut shutdown => {
                    info!("Received shutdown signal");
                    return Ok(());
                }
            };
            self.bot.commit_updates(&batch).await?;
            self.dispatch(&batch).await?;
        }
    }

    async fn initialize(&self) -> Result<(), HoraError> {
        let me = self.bot.get_me().await?;
        match me.result {
            Some(user) if me.ok => info!(
                "bot identity: {} (@{}, id {})",
                user.first_name,
                user.username.as_deref().unwrap_or("-"),
                user.id
            ),
            _ => warn!(
                "telegram getMe not ok: {}",
                me.description.as_deref().unwrap_or_default()
            ),
        }

        if self.announce_startup {
            let announcement = OutboundMessage::new(self.chat_id, commands::timestamp(Utc::now()));
            let resp = self.bot.send_message(&announcement).await?;
            debug!("startup announcement sent: ok={}", resp.ok);
        }
        Ok(())
    }

    /// Answer every `/hora` in the batch. Returns how many replies were sent.
    async fn dispatch(&self, batch: &ApiResponse<Vec<Update>>) -> Result<usize, HoraError> {
        if !batch.ok {
            return Ok(0);
        }

        let mut replies = 0;
        for update in batch.items() {
            let Some(msg) = &update.message else {
                continue;
            };
            let Some(text) = msg.text.as_deref() else {
                continue;
            };
            if !commands::is_hora_command(text) {
                continue;
            }

            let name = commands::sender_name(msg.from.as_ref());
            let mut reply =
                OutboundMessage::new(self.chat_id, commands::hora_reply(name, Utc::now()));
            // Stay in the forum topic the command came from.
            if msg.chat.id == self.chat_id {
                reply = reply.in_thread(msg.message_thread_id.unwrap_or(0));
            }

            info!("update {}: /hora from {name}", update.update_id);
            let resp = self.bot.send_message(&reply).await?;
            if !resp.ok {
                warn!(
                    "telegram sendMessage not ok: {}",
                    resp.description.as_deref().unwrap_or_default()
                );
            }
            replies += 1;
        }
        Ok(replies)
    }
}
