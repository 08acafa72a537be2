pub mod chat;
pub mod config;
pub mod error;
pub mod knowledge;
pub mod metrics;
pub mod rag;
pub mod search;
pub mod templates;
pub mod types;

// Re-export primary types for convenience
pub use chat::ConversationEngine;
pub use config::{AssistantConfig, Profile, StoreInfo};
pub use error::{AssistantError, Result};
pub use knowledge::{Catalog, KnowledgeStore};
pub use metrics::PerformanceMonitor;
pub use rag::{IntentClassifier, ResponseGenerator};
pub use search::{LexicalIndex, RetrievalCache};
pub use types::{
    ChatMessage, ConversationContext, Intent, KnowledgeItem, KnowledgeType, RagResponse, Role,
};

/// Storefront catalog bundled with the crate, used when no catalog file is given.
pub const BUNDLED_CATALOG: &str = include_str!("../data/catalog.json");
