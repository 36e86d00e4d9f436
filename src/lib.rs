//! Mail Triage: classifies emails and drafts automatic replies.

pub mod config;
pub mod error;
pub mod llm;
pub mod nlp;
pub mod pipeline;
pub mod server;

use std::sync::Arc;

use crate::config::AppConfig;
use crate::nlp::{LemmaDictionary, Normalizer, PortuguesePipeline};
use crate::pipeline::{EmailClassifier, EmailProcessor, ResponseDrafter};

/// Wire the NLP pipeline and completion provider into an `EmailProcessor`.
///
/// The lemma dictionary is loaded (or fetched and cached) here, once.
pub async fn build_processor(config: &AppConfig) -> error::Result<EmailProcessor> {
    let lemmas = LemmaDictionary::load_or_fetch(
        config.nlp.lemma_path.as_deref(),
        config.nlp.lemma_url.as_deref(),
    )
    .await?;
    let normalizer = Normalizer::new(Arc::new(PortuguesePipeline::new(lemmas)));

    let llm = llm::create_provider(&config.llm)?;

    Ok(EmailProcessor::new(
        normalizer,
        EmailClassifier::new(Arc::clone(&llm)),
        ResponseDrafter::new(llm, config.drafter.clone()),
    ))
}
