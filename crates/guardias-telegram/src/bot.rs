use std::time::Duration;

use crate::client::{BotClient, POLL_TIMEOUT_SECS};
use crate::command::Command;
use crate::handlers::Dispatcher;
use crate::types::Update;
use crate::Result;

/// Pause after a failed `getUpdates` before polling again.
const RETRY_DELAY: Duration = Duration::from_secs(5);

/// `sendMessage` text limit, in UTF-16 code units.
pub const MAX_MESSAGE_LEN: usize = 4096;

// ─── Bot ──────────────────────────────────────────────────────────────────

/// Long-polling loop: fetch updates, dispatch commands one at a time, reply
/// in the originating chat.
pub struct Bot {
    client: BotClient,
    dispatcher: Dispatcher,
    poll_timeout: u64,
}

impl Bot {
    pub fn new(client: BotClient, dispatcher: Dispatcher) -> Self {
        Self {
            client,
            dispatcher,
            poll_timeout: POLL_TIMEOUT_SECS,
        }
    }

    pub fn with_poll_timeout(mut self, secs: u64) -> Self {
        self.poll_timeout = secs;
        self
    }

    /// Poll forever. Returns only if the startup calls fail.
    pub async fn run(self) -> Result<()> {
        let me = self.client.get_me().await?;
        tracing::info!(
            username = me.username.as_deref().unwrap_or(&me.first_name),
            "bot connected"
        );

        let mut offset = self.drop_pending_updates().await?;
        loop {
            let updates = match self.client.get_updates(offset, self.poll_timeout).await {
                Ok(updates) => updates,
                Err(e) => {
                    tracing::warn!(error = %e, "getUpdates failed, retrying");
                    tokio::time::sleep(RETRY_DELAY).await;
                    continue;
                }
            };
            for update in updates {
                offset = Some(update.update_id + 1);
                if let Err(e) = self.process(update).await {
                    tracing::warn!(error = %e, "failed to answer update");
                }
            }
        }
    }

    /// Confirm everything queued while the bot was offline so old commands
    /// are not replayed. Returns the offset to continue from.
    async fn drop_pending_updates(&self) -> Result<Option<i64>> {
        let last = self.client.get_updates(Some(-1), 0).await?;
        let offset = last.last().map(|u| u.update_id + 1);
        if let Some(next) = offset {
            // Confirming with the next offset marks the backlog as read.
            self.client.get_updates(Some(next), 0).await?;
            tracing::info!(next_offset = next, "dropped pending updates");
        }
        Ok(offset)
    }

    /// Answer a single update. Non-message updates and plain text are ignored.
    pub async fn process(&self, update: Update) -> Result<()> {
        let Some(message) = update.message else {
            return Ok(());
        };
        let Some(cmd) = message.text.as_deref().and_then(Command::parse) else {
            return Ok(());
        };
        let Some(reply) = self.dispatcher.handle(cmd.clone()).await else {
            return Ok(());
        };

        let chunks = split_message(&reply, MAX_MESSAGE_LEN);
        for chunk in &chunks {
            self.client.send_message(message.chat.id, chunk).await?;
        }
        tracing::info!(
            chat_id = message.chat.id,
            command = ?cmd,
            messages = chunks.len(),
            "command answered"
        );
        Ok(())
    }
}

/// Split `text` into pieces of at most `limit` UTF-16 units, breaking after
/// the last newline that fits. Blank pieces are dropped.
fn split_message(text: &str, limit: usize) -> Vec<&str> {
    let mut chunks = Vec::new();
    let mut rest = text;
    while !rest.is_empty() {
        let mut units = 0;
        let mut cut = rest.len();
        let mut last_newline = None;
        for (i, c) in rest.char_indices() {
            units += c.len_utf16();
            if units > limit {
                cut = last_newline.unwrap_or(i);
                break;
            }
            if c == '\n' {
                last_newline = Some(i + 1);
            }
        }
        if cut == 0 {
            cut = rest.chars().next().map_or(rest.len(), char::len_utf8);
        }
        let (head, tail) = rest.split_at(cut);
        if !head.trim().is_empty() {
            chunks.push(head);
        }
        rest = tail;
    }
    chunks
}

// ─── Tests ────────────────────────────────────────────────────────────────
