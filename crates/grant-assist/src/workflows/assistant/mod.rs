//! Question answering over the session's content, backed by an optional hosted model.

mod completion;
mod prompt;
pub mod router;
mod session;

#[cfg(test)]
mod tests;

pub use completion::{
    CompletionClient, CompletionError, CompletionRequest, OpenAiCompletionClient,
};
pub use prompt::{SAMPLE_QUESTIONS, SYSTEM_PROMPT};
pub use router::{assistant_router, AssistantState};
pub use session::{AssistantSession, ChatMessage, ChatRole};

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::config::AssistantConfig;
use crate::workflows::content::{search, SearchHit, SearchOptions};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssistantReply {
    pub answer: String,
    pub sources: Vec<String>,
    pub hits: Vec<SearchHit>,
}

/// Answers questions from keyword-matched snippets.
pub struct GrantAssistant {
    client: Option<Arc<dyn CompletionClient>>,
    options: SearchOptions,
}

impl GrantAssistant {
    pub fn new(client: Option<Arc<dyn CompletionClient>>, options: SearchOptions) -> Self {
        Self { client, options }
    }

    pub fn from_config(config: &AssistantConfig) -> Result<Self, CompletionError> {
        let client = OpenAiCompletionClient::from_config(config)?
            .map(|client| Arc::new(client) as Arc<dyn CompletionClient>);
        Ok(Self::new(
            client,
            SearchOptions::with_anchor(config.snippet_anchor),
        ))
    }

    pub fn model_configured(&self) -> bool {
        self.client.is_some()
    }

    pub fn search_options(&self) -> &SearchOptions {
        &self.options
    }

    /// Records the exchange in the session transcript. Model failures become
    /// the answer text rather than an error.
    pub async fn answer(&self, session: &AssistantSession, question: &str) -> AssistantReply {
        session.push(ChatRole::User, question);

        let blobs = session.content().blobs();
        let hits = search(question, &blobs, &self.options);
        let sources = prompt::unique_sources(&hits);

        let answer = match (&self.client, hits.is_empty()) {
            (Some(client), false) => {
                let request = CompletionRequest {
                    system_prompt: SYSTEM_PROMPT.to_string(),
                    user_prompt: prompt::user_prompt(&prompt::build_context(&hits), question),
                };
                match client.complete(&request).await {
                    Ok(text) => prompt::with_sources(&text, &sources),
                    Err(err) => {
                        warn!(error = %err, "completion failed");
                        format!("Error generating response: {err}")
                    }
                }
            }
            (Some(_), true) => prompt::NO_MATCH_REPLY.to_string(),
            (None, _) => prompt::search_digest(&hits),
        };

        info!(
            hits = hits.len(),
            sources = sources.len(),
            model = self.client.is_some(),
            "question answered"
        );
        session.push(ChatRole::Assistant, answer.clone());

        AssistantReply {
            answer,
            sources,
            hits,
        }
    }
}
