//! Email processing pipeline.
//!
//! Every email flows through:
//! 1. `Normalizer::normalize()`: lower-case, drop noise tokens, lemmatize
//! 2. `EmailClassifier::classify()`: completion call on the normalized text
//! 3. `ResponseDrafter::draft()`: completion call on the ORIGINAL text
//!
//! Steps 2 and 3 never fail; they degrade to sentinel strings.

pub mod classifier;
pub mod drafter;
pub mod processor;
pub mod types;

pub use classifier::EmailClassifier;
pub use drafter::{DrafterConfig, ResponseDrafter};
pub use processor::EmailProcessor;
pub use types::{Classification, EmailProcessing, ProcessingResult};
