//! # hora-telegram
//!
//! Telegram Bot API client. Uses long polling via `getUpdates` and
//! `sendMessage` for replies, and keeps the update cursor on disk so a
//! restart resumes where the last batch left off.
//! Docs: <https://core.telegram.org/bots/api>

mod offset;
mod polling;
mod send;
mod session;


pub use offset::OffsetStore;
pub use session::BotSession;
