//! Inbound command handling.
//!
//! Commands arrive one per line as JSON. Recognised commands get exactly
//! one result line back; unknown or malformed ones are logged and dropped.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, warn};

use crate::credentials::CredentialStore;
use crate::relay::Relay;
use crate::types::{ImprovementResult, InboundCommand};
use crate::Result;

pub struct Dispatcher<'a> {
    relay: &'a Relay,
    store: &'a dyn CredentialStore,
}

impl<'a> Dispatcher<'a> {
    pub fn new(relay: &'a Relay, store: &'a dyn CredentialStore) -> Self {
        Self { relay, store }
    }

    /// Handle one command. `None` means no response is sent.
    pub async fn handle(&self, command: InboundCommand) -> Option<ImprovementResult> {
        match command {
            InboundCommand::ImprovePrompt { prompt } => {
                debug!(store = self.store.name(), "improvePrompt received");
                Some(self.relay.improve_with_store(&prompt, self.store).await)
            }
            InboundCommand::Unknown { action } => {
                warn!(action = ?action, "ignoring unknown command");
                None
            }
        }
    }

    /// Handle one raw line.
    pub async fn handle_line(&self, line: &str) -> Option<ImprovementResult> {
        match InboundCommand::parse_line(line) {
            Ok(command) => self.handle(command).await,
            Err(e) => {
                warn!(error = %e, "ignoring malformed command");
                None
            }
        }
    }

    /// Serve commands from `reader` until EOF, one at a time.
    pub async fn serve_lines<R, W>(&self, mut reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf).await? == 0 {
                break;
            }
            // A bad line is dropped; the loop keeps serving.
            let line = match std::str::from_utf8(&buf) {
                Ok(line) => line,
                Err(e) => {
                    warn!(error = %e, "ignoring command that is not valid UTF-8");
                    continue;
                }
            };
            if line.trim().is_empty() {
                continue;
            }
            if let Some(result) = self.handle_line(line).await {
                let mut out = serde_json::to_vec(&result)?;
                out.push(b'\n');
                writer.write_all(&out).await?;
                writer.flush().await?;
            }
        }
        Ok(())
    }
}
