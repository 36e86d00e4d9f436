//! Text normalization for classification.
//!
//! A `TextPipeline` turns text into annotated tokens; the `Normalizer`
//! keeps the lemmas of content tokens and joins them with single spaces.
//! The pipeline is built once at startup and injected, so tests can swap
//! in a stub.

pub mod lemmas;
pub mod stopwords;
pub mod tokenizer;

pub use lemmas::LemmaDictionary;

use std::sync::Arc;

use crate::error::NlpError;
use tokenizer::TokenKind;

/// A token annotated by a `TextPipeline`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub lemma: String,
    pub is_punct: bool,
    pub is_space: bool,
    pub is_stop: bool,
}

/// Tokenizer + lemmatizer + stop-word tagger.
pub trait TextPipeline: Send + Sync {
    fn analyze(&self, text: &str) -> Result<Vec<Token>, NlpError>;
}

/// Portuguese pipeline: regex tokenizer, embedded stop-words, lemma dictionary.
pub struct PortuguesePipeline {
    lemmas: LemmaDictionary,
}

impl PortuguesePipeline {
    pub fn new(lemmas: LemmaDictionary) -> Self {
        Self { lemmas }
    }
}

impl Default for PortuguesePipeline {
    fn default() -> Self {
        Self::new(LemmaDictionary::builtin())
    }
}

impl TextPipeline for PortuguesePipeline {
    fn analyze(&self, text: &str) -> Result<Vec<Token>, NlpError> {
        let tokens = tokenizer::tokenize(text)
            .into_iter()
            .map(|raw| {
                let lower = raw.text.to_lowercase();
                let is_word = raw.kind == TokenKind::Word;
                Token {
                    is_punct: raw.kind == TokenKind::Punct,
                    is_space: raw.kind == TokenKind::Space,
                    is_stop: is_word && stopwords::is_stop_word(&lower),
                    lemma: if is_word {
                        self.lemmas.lemma(&lower).to_string()
                    } else {
                        lower.clone()
                    },
                    text: raw.text.to_string(),
                }
            })
            .collect();
        Ok(tokens)
    }
}

/// Reduces raw email text to space-joined content lemmas.
#[derive(Clone)]
pub struct Normalizer {
    pipeline: Arc<dyn TextPipeline>,
}

impl Normalizer {
    pub fn new(pipeline: Arc<dyn TextPipeline>) -> Self {
        Self { pipeline }
    }

    /// Lower-case, tokenize, drop punctuation/whitespace/stop-words, lemmatize.
    pub fn normalize(&self, text: &str) -> Result<String, NlpError> {
        let lowered = text.to_lowercase();
        let tokens = self.pipeline.analyze(&lowered)?;
        let lemmas: Vec<String> = tokens
            .into_iter()
            .filter(|t| !t.is_punct && !t.is_space && !t.is_stop)
            .map(|t| t.lemma.to_lowercase())
            .filter(|l| !l.trim().is_empty())
            .collect();
        Ok(lemmas.join(" "))
    }
}
