use lafia_core::{ChatConfig, ChatEvent, ChatSession, Resolver, Result, Sender};
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;

/// Typed on its own line to leave the chat
pub const QUIT_COMMAND: &str = "/quit";

#[derive(Clone, Debug)]
pub struct TerminalConfig {
    pub chat: ChatConfig,
    pub banner: bool,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            chat: ChatConfig::default(),
            banner: true,
        }
    }
}

pub struct TerminalAdaptor {
    pub config: TerminalConfig,
    pub resolver: Arc<Resolver>,
}

/// Line printed for an event, if any; removals print nothing
pub fn render_event(event: &ChatEvent) -> Option<String> {
    match event {
        ChatEvent::Append {
            sender: Sender::User,
            text,
            ..
        } => Some(format!("you> {}", text)),
        ChatEvent::Append {
            sender: Sender::Bot,
            placeholder: Some(_),
            ..
        } => Some("bot is typing…".to_string()),
        ChatEvent::Append {
            sender: Sender::Bot,
            text,
            placeholder: None,
        } => Some(format!("bot> {}", text)),
        ChatEvent::Remove { .. } => None,
    }
}

impl TerminalAdaptor {
    pub fn new(config: TerminalConfig, resolver: Arc<Resolver>) -> Self {
        Self { config, resolver }
    }

    /// Chat over stdin/stdout until EOF or `/quit`
    pub async fn run(self) -> Result<()> {
        let stdin = BufReader::new(tokio::io::stdin());
        self.run_with(stdin, tokio::io::stdout()).await?;
        Ok(())
    }

    /// Chat over any line source and sink; returns the sink once every
    /// outstanding reply has been written
    pub async fn run_with<R, W>(self, input: R, mut out: W) -> Result<W>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        if self.config.banner {
            let banner = format!("Lafia Chat. Ask me anything, or type {} to leave.\n", QUIT_COMMAND);
            out.write_all(banner.as_bytes()).await?;
            out.flush().await?;
        }

        let (session, rx) = ChatSession::with_channel(self.resolver, self.config.chat);
        let printer = tokio::spawn(print_events(rx, out));

        let mut pending = Vec::new();
        let mut lines = input.lines();
        while let Some(line) = lines.next_line().await? {
            if line.trim() == QUIT_COMMAND {
                break;
            }
            if let Some(handle) = session.submit(&line) {
                pending.push(handle);
            }
        }

        for handle in pending {
            if let Err(e) = handle.await {
                tracing::warn!("Reply task failed: {}", e);
            }
        }
        // last sender gone, so the printer sees the channel close
        drop(session);

        printer
            .await
            .map_err(|e| lafia_core::LafiaError::Io(std::io::Error::other(e)))?
    }
}

async fn print_events<W>(mut rx: mpsc::UnboundedReceiver<ChatEvent>, mut out: W) -> Result<W>
where
    W: AsyncWrite + Unpin,
{
    while let Some(event) = rx.recv().await {
        if let Some(line) = render_event(&event) {
            out.write_all(format!("{}\n", line).as_bytes()).await?;
            out.flush().await?;
        }
    }
    Ok(out)
}
