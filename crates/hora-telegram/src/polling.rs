//! Long-poll fetch and cursor advance.

use crate::session::BotSession;
use hora_core::{
    error::HoraError,
    message::{ApiResponse, Update},
};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Slack on top of the server-side poll budget before the client gives up on
/// a silent connection.
const POLL_GRACE_SECS: u64 = 10;

impl BotSession {
    /// Fetch the next batch and commit the cursor past it.
    ///
    /// On a successful non-empty batch the cursor moves to the highest
    /// `update_id` plus one and is persisted before the batch is returned.
    /// A crash before the save means the batch is delivered again. Failed
    /// (`ok: false`) and empty batches leave the cursor alone.
    pub async fn get_updates(&mut self) -> Result<ApiResponse<Vec<Update>>, HoraError> {
        let batch = self.fetch_updates().await?;
        self.commit_updates(&batch).await?;
        Ok(batch)
    }

    /// The `getUpdates` round-trip only. Touches neither the cursor nor the
    /// offset file, so dropping it mid-flight is harmless.
    pub async fn fetch_updates(&self) -> Result<ApiResponse<Vec<Update>>, HoraError> {
        info!("get_updates");
        let (timeout, transport_timeout) = poll_params(self.poll_timeout);
        let query = [("offset", self.offset), ("timeout", timeout)];
        let response: ApiResponse<Vec<Update>> = self
            .get("getUpdates", &query, Some(transport_timeout))
            .await?;

        if !response.ok {
            warn!(
                "telegram getUpdates not ok: {}",
                response.description.as_deref().unwrap_or_default()
            );
        }
        Ok(response)
    }

    /// Advance and persist the cursor past `batch`. No-op for failed or empty batches.
    pub async fn commit_updates(
        &mut self,
        batch: &ApiResponse<Vec<Update>>,
    ) -> Result<(), HoraError> {
        if !batch.ok {
            return Ok(());
        }
        if let Some(next) = next_offset(self.offset, batch.items()) {
            self.store.save(next).await?;
            debug!("offset {} -> {next}", self.offset);
            self.offset = next;
        }
        Ok(())
    }
}

/// Query `timeout` and client transport timeout for a server-side poll budget.
pub(crate) fn poll_params(poll_timeout: u64) -> (i64, Duration) {
    let timeout = i64::try_from(poll_timeout).unwrap_or(i64::MAX);
    let transport = Duration::from_secs(poll_timeout.saturating_add(POLL_GRACE_SECS));
    (timeout, transport)
}

/// Cursor after consuming `updates`, or `None` when there is nothing to advance past.
///
/// Never moves backwards, even if the server replays ids below `current`.
pub(crate) fn next_offset(current: i64, updates: &[Update]) -> Option<i64> {
    let max_id = updates.iter().map(|u| u.update_id).max()?;
    Some(max_id.saturating_add(1).max(current))
}
