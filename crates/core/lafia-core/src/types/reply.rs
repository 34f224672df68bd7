//! Resolution results

use serde::{Deserialize, Serialize};

/// Where a reply came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReplySource {
    /// Whole message equals a trigger
    Exact {
        /// Matched trigger
        trigger: String,
    },
    /// Message contains a trigger
    Substring {
        /// First trigger found in table order
        trigger: String,
    },
    /// Remote text-generation service answered
    Remote,
    /// Remote call failed; text is the fixed apology
    Fallback,
}

impl ReplySource {
    /// True when the reply never left the process
    pub fn is_local(&self) -> bool {
        matches!(self, ReplySource::Exact { .. } | ReplySource::Substring { .. })
    }
}

/// Displayable outcome of one resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotReply {
    /// Text to show the user
    pub text: String,
    /// How it was produced
    pub source: ReplySource,
}

impl BotReply {
    /// Build a reply
    pub fn new(text: impl Into<String>, source: ReplySource) -> Self {
        Self {
            text: text.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_serializes_tagged() {
        let reply = BotReply::new(
            "hi",
            ReplySource::Exact {
                trigger: "hello".to_string(),
            },
        );
        let json = serde_json::to_value(&reply).unwrap();
        assert_eq!(json["source"]["kind"], "exact");
        assert_eq!(json["source"]["trigger"], "hello");

        let json = serde_json::to_value(ReplySource::Fallback).unwrap();
        assert_eq!(json, serde_json::json!({ "kind": "fallback" }));
    }

    #[test]
    fn test_is_local() {
        assert!(ReplySource::Substring { trigger: "date".into() }.is_local());
        assert!(!ReplySource::Remote.is_local());
        assert!(!ReplySource::Fallback.is_local());
    }
}
