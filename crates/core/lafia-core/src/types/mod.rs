//! Core type definitions for Lafia Chat

pub mod chat;
pub mod reply;
pub mod responder;

// Re-export commonly used types
pub use chat::*;
pub use reply::*;
pub use responder::*;
