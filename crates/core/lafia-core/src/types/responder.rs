//! Remote responder seam

use crate::Result;
use async_trait::async_trait;

/// A remote text-generation backend
///
/// Implementations make a single attempt per call. Every failure is an `Err`;
/// turning it into user-facing text is the resolver's job.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Responder: Send + Sync {
    /// Short backend name for logs
    fn name(&self) -> &str;

    /// Produce a reply for `message`
    async fn respond(&self, message: &str) -> Result<String>;
}
