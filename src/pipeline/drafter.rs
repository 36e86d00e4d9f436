//! Response drafter: uses the completion service to write the automatic reply.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::llm::provider::{ChatMessage, CompletionRequest, LlmProvider};
use crate::pipeline::types::Classification;

/// Returned when drafting fails. Distinct from `ClassificationError`.
pub const DRAFT_ERROR: &str = "ResponseGenerationError";

/// Returned without calling the service for labels other than the two categories.
pub const UNSUPPORTED_CLASSIFICATION_REPLY: &str =
    "Cannot generate a response for this classification.";

const DRAFT_SYSTEM_PROMPT: &str =
    "Você é um assistente que redige respostas automáticas para e-mails.";

/// Configuration for reply drafting.
#[derive(Debug, Clone)]
pub struct DrafterConfig {
    /// Sender name/role used to sign every reply.
    pub signature: String,
    /// LLM temperature for reply generation.
    pub temperature: f32,
    /// Max tokens for the reply.
    pub max_tokens: u32,
}

impl Default for DrafterConfig {
    fn default() -> Self {
        Self {
            signature: "Equipe de Atendimento".to_string(),
            temperature: 0.7,
            max_tokens: 150,
        }
    }
}

/// Drafts an automatic reply for a classified email.
pub struct ResponseDrafter {
    llm: Arc<dyn LlmProvider>,
    config: DrafterConfig,
}

impl ResponseDrafter {
    pub fn new(llm: Arc<dyn LlmProvider>, config: DrafterConfig) -> Self {
        Self { llm, config }
    }

    /// Draft a reply for the ORIGINAL email text.
    ///
    /// Never fails: unsupported labels get `UNSUPPORTED_CLASSIFICATION_REPLY`,
    /// service failures get `DRAFT_ERROR`.
    pub async fn draft(&self, email_content: &str, classification: Classification) -> String {
        let Some(user_prompt) = build_draft_user_prompt(email_content, classification, &self.config)
        else {
            debug!(
                classification = classification.label(),
                "No reply template for classification"
            );
            return UNSUPPORTED_CLASSIFICATION_REPLY.to_string();
        };

        let request = CompletionRequest::new(vec![
            ChatMessage::system(DRAFT_SYSTEM_PROMPT),
            ChatMessage::user(user_prompt),
        ])
        .with_temperature(self.config.temperature)
        .with_max_tokens(self.config.max_tokens);

        match self.llm.complete(request).await {
            Ok(response) => match response.content {
                Some(text) => {
                    info!(
                        classification = classification.label(),
                        reply_len = text.len(),
                        "Drafted reply"
                    );
                    text.trim().to_string()
                }
                None => {
                    warn!(classification = classification.label(), "Draft reply was empty");
                    DRAFT_ERROR.to_string()
                }
            },
            Err(e) => {
                warn!(
                    error = %e,
                    classification = classification.label(),
                    "Draft call failed"
                );
                DRAFT_ERROR.to_string()
            }
        }
    }
}

/// Prompt for the two drafting templates, `None` for any other label.
fn build_draft_user_prompt(
    email_content: &str,
    classification: Classification,
    config: &DrafterConfig,
) -> Option<String> {
    let instructions = match classification {
        Classification::Productive => format!(
            "O e-mail abaixo foi classificado como {label}. Escreva uma resposta concisa e \
             profissional confirmando o recebimento, informando que a solicitação será \
             processada e que entraremos em contato em breve.",
            label = classification.label()
        ),
        Classification::Unproductive => format!(
            "O e-mail abaixo foi classificado como {label}. Escreva uma resposta breve e \
             cordial agradecendo a mensagem e informando que nenhuma ação adicional é necessária.",
            label = classification.label()
        ),
        Classification::Unknown | Classification::ClassificationError => return None,
    };

    Some(format!(
        "{instructions}\nAssine como: {signature}\n\nE-mail:\n{email_content}",
        signature = config.signature
    ))
}
