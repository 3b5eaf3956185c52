use std::sync::Arc;

use crate::{domain::ChatId, messaging::port::MessagingPort};

/// Outcome of a best-effort notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Delivery {
    Sent,
    Failed,
}

/// Sends text to the single configured chat. Never fails the caller.
#[derive(Clone)]
pub struct Notifier {
    messenger: Arc<dyn MessagingPort>,
    chat_id: ChatId,
}

impl Notifier {
    pub fn new(messenger: Arc<dyn MessagingPort>, chat_id: ChatId) -> Self {
        Self { messenger, chat_id }
    }

    pub fn chat_id(&self) -> &ChatId {
        &self.chat_id
    }

    pub async fn notify(&self, text: &str) -> Delivery {
        match self.messenger.send_text(&self.chat_id, text).await {
            Ok(()) => {
                tracing::info!(chat_id = %self.chat_id, "message sent: {text}");
                Delivery::Sent
            }
            Err(e) => {
                tracing::error!(chat_id = %self.chat_id, "failed to send message: {e}");
                Delivery::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{errors::Error, Result};
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeMessenger {
        fail: bool,
        sends: Mutex<Vec<(ChatId, String)>>,
    }

    #[async_trait]
    impl MessagingPort for FakeMessenger {
        async fn send_text(&self, chat_id: &ChatId, text: &str) -> Result<()> {
            if self.fail {
                return Err(Error::Delivery("bot was blocked by the user".to_string()));
            }
            self.sends
                .lock()
                .unwrap()
                .push((chat_id.clone(), text.to_string()));
            Ok(())
        }
    }

    #[tokio::test]
    async fn sends_to_configured_chat() {
        let fake = Arc::new(FakeMessenger::default());
        let notifier = Notifier::new(fake.clone(), ChatId("42".to_string()));

        assert_eq!(notifier.notify("hello").await, Delivery::Sent);
        assert_eq!(
            fake.sends.lock().unwrap().clone(),
            vec![(ChatId("42".to_string()), "hello".to_string())]
        );
    }

    #[tokio::test]
    async fn delivery_failure_is_swallowed() {
        let fake = Arc::new(FakeMessenger {
            fail: true,
            ..Default::default()
        });
        let notifier = Notifier::new(fake, ChatId("42".to_string()));

        assert_eq!(notifier.notify("hello").await, Delivery::Failed);
    }
}
