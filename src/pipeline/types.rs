//! Shared types for the email processing pipeline.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::PipelineError;

// ── Classification ──────────────────────────────────────────────────

/// Closed set of labels any completion reply is coerced into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    Productive,
    Unproductive,
    Unknown,
    ClassificationError,
}

impl Classification {
    /// Canonical labels in substring-match priority order.
    ///
    /// Tie-break: when a reply contains both, `Produtivo` wins because it is
    /// probed first.
    pub const CANONICAL: [Classification; 2] =
        [Classification::Productive, Classification::Unproductive];

    /// Wire label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Productive => "Produtivo",
            Self::Unproductive => "Improdutivo",
            Self::Unknown => "Unknown",
            Self::ClassificationError => "ClassificationError",
        }
    }

    /// Coerce a raw completion reply into a label.
    ///
    /// Exact match on the trimmed reply first, then case-sensitive substring
    /// probes in `CANONICAL` order, otherwise `Unknown`.
    pub fn from_reply(reply: &str) -> Self {
        let reply = reply.trim();
        if let Some(exact) = Self::CANONICAL.into_iter().find(|c| c.label() == reply) {
            return exact;
        }
        Self::CANONICAL
            .into_iter()
            .find(|c| reply.contains(c.label()))
            .unwrap_or(Self::Unknown)
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ── Result ──────────────────────────────────────────────────────────

/// Outcome of processing one email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingResult {
    pub classification: String,
    pub suggested_response: String,
}

impl ProcessingResult {
    pub fn new(classification: Classification, suggested_response: impl Into<String>) -> Self {
        Self {
            classification: classification.label().to_string(),
            suggested_response: suggested_response.into(),
        }
    }
}

// ── Processing seam ─────────────────────────────────────────────────

/// Anything that can turn email text into a `ProcessingResult`.
///
/// The HTTP layer depends on this trait, not on the concrete processor,
/// so handler tests can inject a stub.
#[async_trait]
pub trait EmailProcessing: Send + Sync {
    async fn process(&self, email_content: &str) -> Result<ProcessingResult, PipelineError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_labels() {
        assert_eq!(Classification::from_reply("Produtivo"), Classification::Productive);
        assert_eq!(Classification::from_reply("Improdutivo"), Classification::Unproductive);
    }

    #[test]
    fn exact_match_ignores_surrounding_whitespace() {
        assert_eq!(Classification::from_reply("  Improdutivo\n"), Classification::Unproductive);
    }

    #[test]
    fn substring_fallback() {
        assert_eq!(
            Classification::from_reply("A categoria é Produtivo."),
            Classification::Productive
        );
        assert_eq!(
            Classification::from_reply("Categoria: Improdutivo"),
            Classification::Unproductive
        );
    }

    #[test]
    fn improdutivo_does_not_match_productive_probe() {
        // Case-sensitive: "Improdutivo" contains "produtivo", not "Produtivo".
        assert_eq!(
            Classification::from_reply("Resposta: Improdutivo."),
            Classification::Unproductive
        );
    }

    #[test]
    fn both_labels_present_prefers_productive() {
        assert_eq!(
            Classification::from_reply("Improdutivo ou Produtivo?"),
            Classification::Productive
        );
    }

    #[test]
    fn unrecognized_reply_is_unknown() {
        assert_eq!(
            Classification::from_reply("Isso é uma categoria nova."),
            Classification::Unknown
        );
        assert_eq!(Classification::from_reply(""), Classification::Unknown);
        assert_eq!(Classification::from_reply("produtivo"), Classification::Unknown);
    }

    #[test]
    fn result_serializes_wire_labels() {
        let result = ProcessingResult::new(Classification::ClassificationError, "x");
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["classification"], "ClassificationError");
        assert_eq!(json["suggested_response"], "x");
    }
}
