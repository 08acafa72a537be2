//! Intent classification and answer generation.

pub mod generator;
pub mod intent;

pub use generator::ResponseGenerator;
pub use intent::IntentClassifier;
