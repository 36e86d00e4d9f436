//! Email processor: sequences normalization, classification and drafting.
//!
//! Normalized text is used for classification only. The reply is drafted
//! from the original text so tone and formatting cues survive.

use async_trait::async_trait;
use tracing::{debug, info};

use crate::error::PipelineError;
use crate::nlp::Normalizer;
use crate::pipeline::classifier::EmailClassifier;
use crate::pipeline::drafter::ResponseDrafter;
use crate::pipeline::types::{EmailProcessing, ProcessingResult};

/// Runs one email through normalize → classify → draft.
pub struct EmailProcessor {
    normalizer: Normalizer,
    classifier: EmailClassifier,
    drafter: ResponseDrafter,
}

impl EmailProcessor {
    pub fn new(normalizer: Normalizer, classifier: EmailClassifier, drafter: ResponseDrafter) -> Self {
        Self {
            normalizer,
            classifier,
            drafter,
        }
    }
}

#[async_trait]
impl EmailProcessing for EmailProcessor {
    async fn process(&self, email_content: &str) -> Result<ProcessingResult, PipelineError> {
        let normalized = self.normalizer.normalize(email_content)?;
        debug!(
            content_len = email_content.len(),
            normalized_len = normalized.len(),
            "Normalized email"
        );

        let classification = self.classifier.classify(&normalized).await;
        let suggested_response = self.drafter.draft(email_content, classification).await;

        info!(classification = classification.label(), "Email processed");
        Ok(ProcessingResult::new(classification, suggested_response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use crate::error::NlpError;
    use crate::llm::LlmProvider;
    use crate::nlp::{PortuguesePipeline, TextPipeline, Token};
    use crate::pipeline::drafter::{DrafterConfig, UNSUPPORTED_CLASSIFICATION_REPLY};
    use crate::pipeline::test_support::ScriptedLlm;

    fn processor_with(pipeline: Arc<dyn TextPipeline>, llm: Arc<dyn LlmProvider>) -> EmailProcessor {
        EmailProcessor::new(
            Normalizer::new(pipeline),
            EmailClassifier::new(Arc::clone(&llm)),
            ResponseDrafter::new(llm, DrafterConfig::default()),
        )
    }

    #[tokio::test]
    async fn productive_email_end_to_end() {
        let llm = ScriptedLlm::replying(["Produtivo", "Resposta produtiva gerada."]);
        let processor = processor_with(Arc::new(PortuguesePipeline::default()), llm.clone());

        let email = "Preciso de ajuda com meu pedido.";
        let result = processor.process(email).await.unwrap();

        assert_eq!(
            result,
            ProcessingResult {
                classification: "Produtivo".into(),
                suggested_response: "Resposta produtiva gerada.".into(),
            }
        );

        let requests = llm.requests();
        assert_eq!(requests.len(), 2);
        // Classification sees the normalized text.
        assert!(requests[0].messages[1].content.ends_with("E-mail: precisar ajuda pedido"));
        // Drafting sees the original text.
        assert!(requests[1].messages[1].content.contains(email));
        assert!(requests[1].messages[1].content.contains("Produtivo"));
    }

    #[tokio::test]
    async fn unproductive_email_end_to_end() {
        let llm = ScriptedLlm::replying(["Improdutivo", "Resposta improdutiva gerada."]);
        let processor = processor_with(Arc::new(PortuguesePipeline::default()), llm.clone());

        let result = processor.process("Feliz Natal e um próspero Ano Novo!").await.unwrap();
        assert_eq!(result.classification, "Improdutivo");
        assert_eq!(result.suggested_response, "Resposta improdutiva gerada.");
        assert!(llm.requests()[1].messages[1].content.contains("Improdutivo"));
    }

    #[tokio::test]
    async fn classification_failure_still_completes() {
        let llm = ScriptedLlm::failing();
        let processor = processor_with(Arc::new(PortuguesePipeline::default()), llm.clone());

        let result = processor.process("Conteúdo do e-mail com erro.").await.unwrap();
        assert_eq!(result.classification, "ClassificationError");
        assert_eq!(result.suggested_response, UNSUPPORTED_CLASSIFICATION_REPLY);
        // Drafting skipped the service for the sentinel label.
        assert_eq!(llm.requests().len(), 1);
    }

    #[tokio::test]
    async fn unknown_classification_skips_drafting_call() {
        let llm = ScriptedLlm::replying(["Categoria indefinida"]);
        let processor = processor_with(Arc::new(PortuguesePipeline::default()), llm.clone());

        let result = processor.process("Algo estranho.").await.unwrap();
        assert_eq!(result.classification, "Unknown");
        assert_eq!(result.suggested_response, UNSUPPORTED_CLASSIFICATION_REPLY);
        assert_eq!(llm.requests().len(), 1);
    }

    struct BrokenPipeline;

    impl TextPipeline for BrokenPipeline {
        fn analyze(&self, _text: &str) -> Result<Vec<Token>, NlpError> {
            Err(NlpError::Tokenize("pipeline not loaded".into()))
        }
    }

    #[tokio::test]
    async fn normalizer_failure_propagates() {
        let llm = ScriptedLlm::replying(["Produtivo"]);
        let processor = processor_with(Arc::new(BrokenPipeline), llm.clone());

        let result = processor.process("Qualquer e-mail.").await;
        assert!(matches!(result, Err(PipelineError::Normalization(_))));
        assert!(llm.requests().is_empty());
    }
}
