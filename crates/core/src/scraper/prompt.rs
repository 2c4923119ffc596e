//! Interactive continue/abort prompt.

use std::io::{BufRead, Write};

use async_trait::async_trait;
use tokio::sync::oneshot;

/// Answer to the "keep downloading?" question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptAnswer {
    Continue,
    Abort,
    /// Anything other than Y or N.
    Invalid,
}

impl PromptAnswer {
    pub fn parse(input: &str) -> Self {
        match input.trim().to_ascii_lowercase().as_str() {
            "y" => Self::Continue,
            "n" => Self::Abort,
            _ => Self::Invalid,
        }
    }
}

/// Source of answers for the existing-file prompt.
#[async_trait]
pub trait ContinuePrompt: Send + Sync {
    /// Print `question`. Called while the progress bar is suspended.
    fn show(&self, question: &str) -> std::io::Result<()>;

    /// Wait for the answer to the question last shown.
    async fn answer(&self) -> std::io::Result<PromptAnswer>;
}

/// Reads answers from the terminal.
///
/// The line is read on its own thread, so dropping the pending answer
/// (e.g. on Ctrl+C) never keeps the runtime from shutting down.
#[derive(Debug, Default)]
pub struct StdinPrompt;

#[async_trait]
impl ContinuePrompt for StdinPrompt {
    fn show(&self, question: &str) -> std::io::Result<()> {
        let mut stderr = std::io::stderr().lock();
        writeln!(stderr, "{}", question)?;
        stderr.flush()
    }

    async fn answer(&self) -> std::io::Result<PromptAnswer> {
        let (tx, rx) = oneshot::channel();
        std::thread::spawn(move || {
            let mut line = String::new();
            let read = std::io::stdin().lock().read_line(&mut line);
            let _ = tx.send(read.map(|n| (n, line)));
        });

        let (read, line) = rx.await.map_err(|_| {
            std::io::Error::new(std::io::ErrorKind::BrokenPipe, "stdin reader stopped")
        })??;
        if read == 0 {
            return Err(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "stdin closed while waiting for an answer",
            ));
        }

        Ok(PromptAnswer::parse(&line))
    }
}
