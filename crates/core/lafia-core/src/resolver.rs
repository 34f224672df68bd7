//! Reply resolution
//!
//! One message resolves in a fixed order and the first hit wins:
//!
//! 1. exact match of the whole trimmed, lower-cased message
//! 2. first trigger, in table order, contained in the message
//! 3. the remote responder, with the trimmed message as typed
//!
//! A failing remote call becomes [`FALLBACK_REPLY`], so any non-empty message
//! resolves to displayable text.

use crate::lexicon::{normalize, Lexicon};
use crate::security::redact_secrets;
use crate::types::{BotReply, ReplySource, Responder};
use crate::{LafiaError, Result};
use std::sync::Arc;
use tracing::{debug, error};

/// The only text users ever see for a remote failure
pub const FALLBACK_REPLY: &str = "Sorry, I'm having trouble responding. Please try again.";

/// Decides the reply for one user message
#[derive(Clone)]
pub struct Resolver {
    lexicon: Arc<Lexicon>,
    responder: Arc<dyn Responder>,
}

impl Resolver {
    /// Resolver over `lexicon` that falls back to `responder`
    pub fn new(lexicon: Arc<Lexicon>, responder: Arc<dyn Responder>) -> Self {
        Self { lexicon, responder }
    }

    /// Table consulted before the remote call
    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Resolve `message`
    ///
    /// Returns [`LafiaError::EmptyInput`] for blank input and never fails
    /// otherwise.
    pub async fn resolve(&self, message: &str) -> Result<BotReply> {
        let trimmed = message.trim();
        if trimmed.is_empty() {
            return Err(LafiaError::EmptyInput);
        }
        if let Some(reply) = self.resolve_local(trimmed) {
            return Ok(reply);
        }
        Ok(self.resolve_remote(trimmed).await)
    }

    /// Lexicon-only resolution; `None` means the remote path is needed
    pub fn resolve_local(&self, message: &str) -> Option<BotReply> {
        let lowered = normalize(message);
        if lowered.is_empty() {
            return None;
        }

        if let Some(text) = self.lexicon.lookup_exact(&lowered) {
            debug!(trigger = %lowered, "Exact lexicon match");
            return Some(BotReply::new(text, ReplySource::Exact { trigger: lowered }));
        }

        self.lexicon
            .find_substring(&lowered)
            .map(|(trigger, text)| {
                debug!(trigger, "Substring lexicon match");
                BotReply::new(
                    text,
                    ReplySource::Substring {
                        trigger: trigger.to_string(),
                    },
                )
            })
    }

    async fn resolve_remote(&self, message: &str) -> BotReply {
        debug!(responder = self.responder.name(), "No lexicon match, asking remote responder");
        match self.responder.respond(message).await {
            Ok(text) => BotReply::new(text, ReplySource::Remote),
            Err(e) => {
                error!(
                    responder = self.responder.name(),
                    kind = e.kind(),
                    "Remote responder failed: {}",
                    redact_secrets(&e.to_string())
                );
                BotReply::new(FALLBACK_REPLY, ReplySource::Fallback)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::{default_lexicon, local_date, Reply};
    use crate::types::MockResponder;

    fn offline() -> MockResponder {
        let mut mock = MockResponder::new();
        mock.expect_name().return_const("mock".to_string());
        mock.expect_respond().never();
        mock
    }

    #[tokio::test]
    async fn test_exact_match_skips_network() {
        let resolver = Resolver::new(default_lexicon(), Arc::new(offline()));

        let reply = resolver.resolve("Hello").await.unwrap();
        assert_eq!(reply.text, "Hi there! How can I help you?");
        assert_eq!(
            reply.source,
            ReplySource::Exact {
                trigger: "hello".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_exact_date_question() {
        let resolver = Resolver::new(default_lexicon(), Arc::new(offline()));

        let before = local_date();
        let reply = resolver.resolve("what is the date?").await.unwrap();
        let after = local_date();
        assert!(reply.text == before || reply.text == after);
        assert!(matches!(reply.source, ReplySource::Exact { .. }));
    }

    #[tokio::test]
    async fn test_substring_date_question() {
        let resolver = Resolver::new(default_lexicon(), Arc::new(offline()));

        let reply = resolver.resolve("can you tell me the date?").await.unwrap();
        assert_eq!(
            reply.source,
            ReplySource::Substring {
                trigger: "date".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_fulafia_admission_matches_earliest_entry() {
        let resolver = Resolver::new(default_lexicon(), Arc::new(offline()));

        let reply = resolver
            .resolve("tell me about fulafia admission")
            .await
            .unwrap();
        assert_eq!(
            reply.source,
            ReplySource::Substring {
                trigger: "about fulafia".to_string()
            }
        );
        assert!(reply.text.starts_with("The Federal University of Lafia"));
    }

    #[tokio::test]
    async fn test_earliest_trigger_beats_more_specific_one() {
        let resolver = Resolver::new(default_lexicon(), Arc::new(offline()));

        // "date" (inside "update") precedes "fulafia admission list" in the table
        let reply = resolver
            .resolve("any update on the fulafia admission list?")
            .await
            .unwrap();
        assert_eq!(
            reply.source,
            ReplySource::Substring {
                trigger: "date".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_miss_calls_responder_once_with_trimmed_message() {
        let mut mock = MockResponder::new();
        mock.expect_name().return_const("mock".to_string());
        mock.expect_respond()
            .withf(|m| m == "Quantum Entanglement explained")
            .times(1)
            .returning(|_| Ok("Spooky action at a distance.".to_string()));

        let resolver = Resolver::new(default_lexicon(), Arc::new(mock));
        let reply = resolver
            .resolve("  Quantum Entanglement explained ")
            .await
            .unwrap();
        assert_eq!(reply.text, "Spooky action at a distance.");
        assert_eq!(reply.source, ReplySource::Remote);
    }

    #[tokio::test]
    async fn test_network_failure_becomes_apology() {
        let mut mock = MockResponder::new();
        mock.expect_name().return_const("mock".to_string());
        mock.expect_respond()
            .times(1)
            .returning(|_| Err(LafiaError::network("connection refused")));

        let resolver = Resolver::new(default_lexicon(), Arc::new(mock));
        let reply = resolver.resolve("quantum entanglement explained").await.unwrap();
        assert_eq!(reply.text, FALLBACK_REPLY);
        assert_eq!(reply.source, ReplySource::Fallback);
    }

    #[tokio::test]
    async fn test_malformed_response_becomes_apology() {
        let mut mock = MockResponder::new();
        mock.expect_name().return_const("mock".to_string());
        mock.expect_respond()
            .times(1)
            .returning(|_| Err(LafiaError::malformed("no candidates")));

        let resolver = Resolver::new(default_lexicon(), Arc::new(mock));
        let reply = resolver.resolve("something unknown").await.unwrap();
        assert_eq!(reply.text, FALLBACK_REPLY);
    }

    #[tokio::test]
    async fn test_blank_input_rejected() {
        let resolver = Resolver::new(default_lexicon(), Arc::new(offline()));

        for input in ["", "   ", "\t\n"] {
            let err = resolver.resolve(input).await.unwrap_err();
            assert!(matches!(err, LafiaError::EmptyInput));
        }
    }

    #[tokio::test]
    async fn test_custom_lexicon() {
        let lexicon = Lexicon::new()
            .with("ping", Reply::text("pong"))
            .with("ping pong", Reply::text("never reached by substring"));
        let resolver = Resolver::new(Arc::new(lexicon), Arc::new(offline()));

        assert_eq!(resolver.resolve("PING PONG").await.unwrap().text, "never reached by substring");
        assert_eq!(resolver.resolve("ping pong please").await.unwrap().text, "pong");
    }
}
