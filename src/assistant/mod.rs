
pub mod openai;
mod prompt;

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
pub use prompt::{build_context, truncate_content};
use thiserror::Error;

const SEARCH_MAX_TOKENS: u32 = 500;
const SEARCH_TEMPERATURE: f32 = 0.7;
const SUMMARY_MAX_TOKENS: u32 = 150;
const SUMMARY_TEMPERATURE: f32 = 0.5;

#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Completion API returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Completion API returned no answer")]
    EmptyResponse,
}

pub type AssistantResult<T> = Result<T, AssistantError>;

/// A document with its extracted text, ready to be put into a prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentContent {
    pub name: String,
    pub content: String,
    pub link: String,
}

/// A single-turn chat completion request.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system: String,
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// A hosted chat completion model.
#[automock]
#[async_trait]
pub trait ChatCompletion: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> AssistantResult<String>;
}

/// Answers questions about documents.
#[automock]
#[async_trait]
pub trait QueryResponder: Send + Sync {
    /// Answers a question using only the given documents as context.
    async fn answer(&self, question: &str, documents: &[DocumentContent])
    -> AssistantResult<String>;

    /// Describes a document in two or three sentences.
    async fn summarize(&self, name: &str, content: &str) -> AssistantResult<String>;
}

/// [`QueryResponder`] backed by a chat completion model.
pub struct CompletionResponder {
    completion: Arc<dyn ChatCompletion>,
    content_budget: usize,
}

impl CompletionResponder {
    /// `content_budget` is the number of characters of each document that
    /// goes into a prompt.
    pub fn new(completion: Arc<dyn ChatCompletion>, content_budget: usize) -> Self {
        Self { completion, content_budget }
    }
}

#[async_trait]
impl QueryResponder for CompletionResponder {
    async fn answer(
        &self,
        question: &str,
        documents: &[DocumentContent],
    ) -> AssistantResult<String> {
        tracing::debug!("Answering question with {} documents", documents.len());
        let context = build_context(documents, self.content_budget);

        let answer = self
            .completion
            .complete(CompletionRequest {
                system: prompt::SEARCH_SYSTEM_MESSAGE.to_string(),
                prompt: prompt::search_prompt(&context, question),
                max_tokens: SEARCH_MAX_TOKENS,
                temperature: SEARCH_TEMPERATURE,
            })
            .await?;

        Ok(answer.trim().to_string())
    }

    async fn summarize(&self, name: &str, content: &str) -> AssistantResult<String> {
        let summary = self
            .completion
            .complete(CompletionRequest {
                system: prompt::SUMMARY_SYSTEM_MESSAGE.to_string(),
                prompt: prompt::summary_prompt(name, &truncate_content(content, self.content_budget)),
                max_tokens: SUMMARY_MAX_TOKENS,
                temperature: SUMMARY_TEMPERATURE,
            })
            .await?;

        Ok(summary.trim().to_string())
    }
}
