//! `/hora` command matching and reply text.

use chrono::{DateTime, Utc};
use hora_core::message::User;
use regex::Regex;
use std::sync::LazyLock;

static HORA_COMMAND: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/hora").expect("valid regex"));

/// Format shared by the startup announcement and command replies.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Whether `text` starts with the `/hora` command.
pub fn is_hora_command(text: &str) -> bool {
    HORA_COMMAND.is_match(text)
}

/// Name to address the sender by: username, then first name.
pub fn sender_name(from: Option<&User>) -> &str {
    match from {
        Some(user) => user.username.as_deref().unwrap_or(&user.first_name),
        None => "desconocido",
    }
}

pub fn timestamp(now: DateTime<Utc>) -> String {
    now.format(TIMESTAMP_FORMAT).to_string()
}

pub fn hora_reply(name: &str, now: DateTime<Utc>) -> String {
    format!("{name}, son las {}", timestamp(now))
}
