//! Email classifier: asks the completion service for a category label.
//!
//! Never fails: every error path degrades to `Classification::ClassificationError`.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::LlmError;
use crate::llm::provider::{ChatMessage, CompletionRequest, LlmProvider};
use crate::pipeline::types::Classification;

/// Max tokens for the classification call; the reply is a single word.
const CLASSIFY_MAX_TOKENS: u32 = 10;

/// Temperature for classification (near-deterministic).
const CLASSIFY_TEMPERATURE: f32 = 0.1;

const CLASSIFY_SYSTEM_PROMPT: &str = "Você é um assistente que classifica e-mails.";

/// Why a classification degraded to `ClassificationError`.
///
/// Both variants map to the same label; they are kept apart for logging.
#[derive(Debug, thiserror::Error)]
pub enum ClassificationFailure {
    #[error("completion request failed: {0}")]
    Request(#[from] LlmError),

    #[error("completion returned no content")]
    EmptyContent,
}

/// Classifies normalized email text as productive or unproductive.
pub struct EmailClassifier {
    llm: Arc<dyn LlmProvider>,
}

impl EmailClassifier {
    pub fn new(llm: Arc<dyn LlmProvider>) -> Self {
        Self { llm }
    }

    /// Classify normalized text. Failures become `ClassificationError`.
    pub async fn classify(&self, normalized: &str) -> Classification {
        match self.try_classify(normalized).await {
            Ok(classification) => {
                debug!(classification = classification.label(), "Email classified");
                classification
            }
            Err(failure @ ClassificationFailure::EmptyContent) => {
                warn!(error = %failure, model = self.llm.model_name(), "Classification reply was empty");
                Classification::ClassificationError
            }
            Err(failure) => {
                warn!(error = %failure, model = self.llm.model_name(), "Classification call failed");
                Classification::ClassificationError
            }
        }
    }

    async fn try_classify(&self, normalized: &str) -> Result<Classification, ClassificationFailure> {
        let request = CompletionRequest::new(vec![
            ChatMessage::system(CLASSIFY_SYSTEM_PROMPT),
            ChatMessage::user(build_classify_user_prompt(normalized)),
        ])
        .with_max_tokens(CLASSIFY_MAX_TOKENS)
        .with_temperature(CLASSIFY_TEMPERATURE);

        let response = self.llm.complete(request).await?;
        let reply = response.content.ok_or(ClassificationFailure::EmptyContent)?;
        Ok(Classification::from_reply(&reply))
    }
}

fn build_classify_user_prompt(normalized: &str) -> String {
    let labels: Vec<String> = Classification::CANONICAL
        .iter()
        .map(|c| format!("'{}'", c.label()))
        .collect();
    format!(
        "Classifique o seguinte e-mail em uma das categorias: {}.\n\
         Responda apenas com a categoria.\n\n\
         E-mail: {normalized}",
        labels.join(" ou ")
    )
}
