//! `guardias-telegram`: Telegram front-end for the guardias shift store.
//!
//! # Architecture
//!
//! ```text
//! BotClient      ← getUpdates / sendMessage over the Bot API (reqwest)
//!     │
//!     ▼
//! Bot            ← long-polling loop, one update at a time
//!     │
//!     ▼
//! Command        ← `/agregar`, `/guardias`, `/todas`, `/ayuda`, `/start`
//!     │
//!     ▼
//! Dispatcher     ← runs the command on the SharedStore, renders the reply
//! ```
//!
//! # Quick start
//!
//! ```rust,ignore
//! use guardias_core::{Backend, KeyStyle, ShiftStore};
//! use guardias_telegram::{Bot, BotClient, Dispatcher};
//!
//! let store = ShiftStore::load(Backend::File("guardias.json".into()), KeyStyle::Date);
//! let client = BotClient::new(&token)?;
//! Bot::new(client, Dispatcher::new(store.into_shared())).run().await?;
//! ```

pub mod bot;
pub mod client;
pub mod command;
pub mod error;
pub mod handlers;
pub mod types;

#[cfg(test)]
mod tests;

pub use bot::Bot;
pub use client::BotClient;
pub use command::{Command, Usage};
pub use error::TelegramError;
pub use handlers::Dispatcher;
pub use types::{ApiResponse, Chat, Message, Update, User};

/// Convenience `Result` alias for this crate.
pub type Result<T> = std::result::Result<T, TelegramError>;
