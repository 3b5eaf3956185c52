//! The polling loop: fetch, validate, translate, notify, sleep, repeat.

use std::{sync::Arc, time::Duration};

use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

use crate::{
    domain::Cursor,
    messaging::notifier::{Delivery, Notifier},
    ports::ReviewApi,
    translator::{malfunction_message, translate},
    validator::validate,
    Result,
};

/// What a single polling cycle ended with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The API reported no homework changes since the cursor.
    NoChanges,
    /// The latest status was rendered and handed to the notifier.
    Notified(Delivery),
    /// The cycle failed; the error was logged and reported to the chat.
    Failed,
}

pub struct Poller {
    api: Arc<dyn ReviewApi>,
    notifier: Notifier,
    retry_time: Duration,
    cursor: Cursor,
}

impl Poller {
    pub fn new(
        api: Arc<dyn ReviewApi>,
        notifier: Notifier,
        retry_time: Duration,
        cursor: Cursor,
    ) -> Self {
        Self {
            api,
            notifier,
            retry_time,
            cursor,
        }
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Run one cycle. Errors never escape: they are logged and reported to the
    /// chat, and the cursor stays where it was.
    pub async fn poll_once(&mut self) -> CycleOutcome {
        match self.cycle().await {
            Ok(outcome) => outcome,
            Err(e) => {
                if e.is_contract_change() {
                    tracing::error!(cursor = %self.cursor, "review API contract changed: {e}");
                } else {
                    tracing::warn!(cursor = %self.cursor, "polling cycle failed: {e}");
                }
                self.notifier.notify(&malfunction_message(&e)).await;
                CycleOutcome::Failed
            }
        }
    }

    async fn cycle(&mut self) -> Result<CycleOutcome> {
        let envelope = self.api.fetch(self.cursor).await?;
        let update = validate(&envelope)?;

        let Some(latest) = update.latest() else {
            tracing::debug!(cursor = %self.cursor, "no homework status changes");
            self.cursor = update.current_date;
            return Ok(CycleOutcome::NoChanges);
        };

        tracing::debug!(
            homework = %latest.homework_name,
            status = %latest.status,
            lesson = latest.lesson_name.as_deref().unwrap_or("-"),
            "homework status changed"
        );
        let text = translate(latest)?;
        let delivery = self.notifier.notify(&text).await;
        self.cursor = update.current_date;
        Ok(CycleOutcome::Notified(delivery))
    }

    /// Poll until `shutdown` fires, sleeping `retry_time` after every cycle.
    pub async fn run(mut self, shutdown: CancellationToken) {
        tracing::info!(
            cursor = %self.cursor,
            chat_id = %self.notifier.chat_id(),
            "polling every {}s",
            self.retry_time.as_secs()
        );

        loop {
            self.poll_once().await;

            tokio::select! {
                biased;
                _ = shutdown.cancelled() => break,
                _ = sleep(self.retry_time) => {}
            }
        }

        tracing::info!(cursor = %self.cursor, "polling stopped");
    }
}
