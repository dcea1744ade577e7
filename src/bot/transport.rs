//! Chat transport seam.
//!
//! The dispatcher talks to the chat service through this trait; the Telegram
//! implementation lives in `telegram.rs`. Keeping the seam here lets handler
//! logic run against a recording stub in tests.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

/// Chat conversation identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChatId(pub i64);

/// Handle to a message already delivered to a chat, for in-place edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageRef(pub i32);

#[derive(Error, Debug)]
#[error("chat transport error: {0}")]
pub struct TransportError(pub String);

/// Outbound side of the chat service.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Send a Markdown-formatted message, returning a handle for later edits.
    async fn send_markdown(&self, chat: ChatId, text: &str) -> Result<MessageRef, TransportError>;

    /// Send plain text, the fallback path when Markdown delivery fails.
    async fn send_plain(&self, chat: ChatId, text: &str) -> Result<MessageRef, TransportError>;

    /// Replace the content of a previously sent message.
    async fn edit_markdown(
        &self,
        chat: ChatId,
        message: MessageRef,
        text: &str,
    ) -> Result<(), TransportError>;
}

#[async_trait]
impl<T: ChatTransport + ?Sized> ChatTransport for Arc<T> {
    async fn send_markdown(&self, chat: ChatId, text: &str) -> Result<MessageRef, TransportError> {
        (**self).send_markdown(chat, text).await
    }

    async fn send_plain(&self, chat: ChatId, text: &str) -> Result<MessageRef, TransportError> {
        (**self).send_plain(chat, text).await
    }

    async fn edit_markdown(
        &self,
        chat: ChatId,
        message: MessageRef,
        text: &str,
    ) -> Result<(), TransportError> {
        (**self).edit_markdown(chat, message, text).await
    }
}
