//! Prompt that replays canned answers.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::scraper::{ContinuePrompt, PromptAnswer};

/// Answers prompts from a fixed script and records the questions.
///
/// Asking more often than scripted fails with `UnexpectedEof`, the same
/// error a closed stdin produces.
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    answers: Mutex<VecDeque<PromptAnswer>>,
    questions: Mutex<Vec<String>>,
    asked: AtomicUsize,
}

impl ScriptedPrompt {
    pub fn new(answers: Vec<PromptAnswer>) -> Self {
        Self {
            answers: Mutex::new(answers.into()),
            questions: Mutex::new(Vec::new()),
            asked: AtomicUsize::new(0),
        }
    }

    /// Number of times the prompt was shown.
    pub fn asked(&self) -> usize {
        self.asked.load(Ordering::SeqCst)
    }

    pub fn questions(&self) -> Vec<String> {
        self.questions
            .lock()
            .map(|q| q.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ContinuePrompt for ScriptedPrompt {
    fn show(&self, question: &str) -> std::io::Result<()> {
        self.asked.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut questions) = self.questions.lock() {
            questions.push(question.to_string());
        }
        Ok(())
    }

    async fn answer(&self) -> std::io::Result<PromptAnswer> {
        let next = self
            .answers
            .lock()
            .ok()
            .and_then(|mut answers| answers.pop_front());

        next.ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "no scripted answer left",
            )
        })
    }
}
