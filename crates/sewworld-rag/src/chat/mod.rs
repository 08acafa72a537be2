pub mod engine;

pub use engine::ConversationEngine;
