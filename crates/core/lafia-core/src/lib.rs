//! Lafia Chat Core
//!
//! This crate holds everything that decides what the assistant says:
//!
//! - [`Lexicon`]: the fixed, ordered table of trigger phrases and canned replies
//! - [`Resolver`]: exact match, then first substring match, then remote fallback
//! - [`Responder`]: the seam to a remote text-generation service
//! - [`ChatSession`]: the submit / on-reply loop shared by every adaptor
//!
//! Presentation lives in the adaptor crates and remote generation in the
//! provider crates.
//!
//! # Example
//!
//! ```no_run
//! use lafia_core::*;
//! use std::sync::Arc;
//!
//! # struct Offline;
//! # #[async_trait::async_trait]
//! # impl Responder for Offline {
//! #     fn name(&self) -> &str { "offline" }
//! #     async fn respond(&self, _m: &str) -> Result<String> { Err(LafiaError::config("offline")) }
//! # }
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let resolver = Resolver::new(default_lexicon(), Arc::new(Offline));
//!     let reply = resolver.resolve("hello").await?;
//!     assert_eq!(reply.text, "Hi there! How can I help you?");
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod lexicon;
pub mod resolver;
pub mod security;
pub mod session;
pub mod types;
pub mod utils;

pub use config::{
    get_env_bool, get_env_int, get_env_or, get_optional_env, load_env, load_env_from_path,
    ChatConfig,
};
pub use error::{LafiaError, Result};
pub use lexicon::{default_lexicon, format_long_date, local_date, Lexicon, LexiconEntry, Reply};
pub use resolver::{Resolver, FALLBACK_REPLY};
pub use security::redact_secrets;
pub use session::{ChatSession, ReplySink};
pub use types::*;
pub use utils::Logger;
