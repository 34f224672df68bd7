//! Chat session: the submit / on-reply loop shared by every adaptor
//!
//! Each submitted message becomes its own task. Tasks never wait on each
//! other, so a quick lexicon hit can be shown before an earlier message that
//! is still waiting on the network. Nothing is cancelled.

use crate::config::ChatConfig;
use crate::resolver::Resolver;
use crate::types::{ChatEvent, PlaceholderId, Sender};
use crate::utils::Logger;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Receives rendering requests
pub trait ReplySink: Send + Sync {
    /// Render or remove a bubble
    fn on_event(&self, event: ChatEvent);
}

impl ReplySink for mpsc::UnboundedSender<ChatEvent> {
    fn on_event(&self, event: ChatEvent) {
        // receiver gone means the view closed; late replies are dropped
        let _ = self.send(event);
    }
}

/// Front door for user messages
#[derive(Clone)]
pub struct ChatSession {
    resolver: Arc<Resolver>,
    sink: Arc<dyn ReplySink>,
    config: ChatConfig,
    logger: Logger,
}

impl ChatSession {
    /// Session rendering into `sink`
    pub fn new(resolver: Arc<Resolver>, sink: Arc<dyn ReplySink>, config: ChatConfig) -> Self {
        Self {
            resolver,
            sink,
            config,
            logger: Logger::new("session"),
        }
    }

    /// Session plus the receiving end of its event channel
    pub fn with_channel(
        resolver: Arc<Resolver>,
        config: ChatConfig,
    ) -> (Self, mpsc::UnboundedReceiver<ChatEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(resolver, Arc::new(tx), config), rx)
    }

    /// Submit one message
    ///
    /// Blank input has no effect and returns `None`. Otherwise the user bubble
    /// is emitted before this returns and the reply follows from a spawned
    /// task whose handle is returned. Must be called inside a Tokio runtime.
    pub fn submit(&self, message: &str) -> Option<JoinHandle<()>> {
        let message = message.trim();
        if message.is_empty() {
            return None;
        }

        self.sink.on_event(ChatEvent::message(Sender::User, message));

        let session = self.clone();
        let message = message.to_string();
        Some(tokio::spawn(async move {
            session.reply_to(&message).await;
        }))
    }

    async fn reply_to(&self, message: &str) {
        let placeholder = self.config.typing_indicator.then(PlaceholderId::new);
        if let Some(id) = placeholder {
            self.sink.on_event(ChatEvent::typing(id));
        }

        let text = match self.resolver.resolve(message).await {
            Ok(reply) => {
                self.logger.debug(&format!("Resolved via {:?}", reply.source));
                reply.text
            }
            Err(e) => {
                // submit() already filtered blank input
                self.logger.warn(&format!("Resolution skipped: {}", e));
                if let Some(id) = placeholder {
                    self.sink.on_event(ChatEvent::Remove { placeholder: id });
                }
                return;
            }
        };

        if !self.config.reply_delay.is_zero() {
            tokio::time::sleep(self.config.reply_delay).await;
        }

        if let Some(id) = placeholder {
            self.sink.on_event(ChatEvent::Remove { placeholder: id });
        }
        self.sink.on_event(ChatEvent::message(Sender::Bot, text));
    }
}
