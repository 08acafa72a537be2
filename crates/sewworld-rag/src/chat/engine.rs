use dashmap::DashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::config::AssistantConfig;
use crate::error::Result;
use crate::knowledge::{Catalog, KnowledgeStore};
use crate::metrics::PerformanceMonitor;
use crate::rag::ResponseGenerator;
use crate::types::{ChatMessage, ConversationContext, RagResponse, Role};

/// Per-session conversation front end. Sessions live in a sharded map, so
/// queries for different sessions run in parallel and never see each other's
/// history.
pub struct ConversationEngine {
    generator: ResponseGenerator,
    sessions: DashMap<String, ConversationContext>,
    metrics: Arc<PerformanceMonitor>,
}

impl ConversationEngine {
    pub fn new(store: KnowledgeStore, config: AssistantConfig) -> Result<Self> {
        config.validate()?;
        let metrics = Arc::new(PerformanceMonitor::new(
            config.debug.enable_performance_metrics,
        ));
        let generator = ResponseGenerator::new(Arc::new(store), config, metrics.clone());

        tracing::info!(
            items = generator.store().len(),
            vocabulary = generator.index().vocabulary_size(),
            max_history = generator.config().conversation.max_history,
            "Conversation engine ready"
        );

        Ok(Self {
            generator,
            sessions: DashMap::new(),
            metrics,
        })
    }

    pub fn from_catalog(catalog: &Catalog, config: AssistantConfig) -> Result<Self> {
        Self::new(KnowledgeStore::build(catalog), config)
    }

    /// Fresh identifier for adapters that do not manage their own sessions.
    pub fn new_session_id() -> String {
        format!("session-{}", Uuid::new_v4())
    }

    /// Answer `query` within `session_id`, creating the session on first use.
    /// Generation runs against a snapshot, so the session entry is not locked
    /// while the answer is built.
    pub fn process_query(&self, session_id: &str, query: &str) -> RagResponse {
        let _timer = self.metrics.start_timer("process_query");
        let snapshot = self.begin_turn(session_id, query);
        let response = self.generator.generate(query, &snapshot);
        self.finish_turn(session_id, &response);
        response
    }

    fn begin_turn(&self, session_id: &str, query: &str) -> ConversationContext {
        let mut context = self.sessions.entry(session_id.to_string()).or_default();
        context.messages.push_back(ChatMessage::new(Role::User, query));
        context.clone()
    }

    fn finish_turn(&self, session_id: &str, response: &RagResponse) {
        // a session cleared while the answer was built stays cleared
        let Some(mut context) = self.sessions.get_mut(session_id) else {
            tracing::debug!(session = session_id, "Session cleared mid-query; answer not recorded");
            return;
        };
        let max_history = self.generator.config().conversation.max_history;
        context
            .messages
            .push_back(ChatMessage::new(Role::Assistant, response.answer.clone()));
        context.retrieved_context = response.sources.clone();
        context.last_intent = Some(response.intent);
        while context.messages.len() > max_history {
            context.messages.pop_front();
        }

        tracing::debug!(
            session = session_id,
            intent = %response.intent,
            confidence = response.confidence,
            "Processed query"
        );
    }

    pub fn clear_conversation(&self, session_id: &str) {
        if self.sessions.remove(session_id).is_some() {
            tracing::debug!(session = session_id, "Conversation cleared");
        }
    }

    pub fn get_history(&self, session_id: &str) -> Option<ConversationContext> {
        self.sessions.get(session_id).map(|c| c.clone())
    }

    pub fn session_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.sessions.iter().map(|e| e.key().clone()).collect();
        ids.sort();
        ids
    }

    pub fn all_conversations(&self) -> Vec<(String, ConversationContext)> {
        let mut all: Vec<(String, ConversationContext)> = self
            .sessions
            .iter()
            .map(|e| (e.key().clone(), e.value().clone()))
            .collect();
        all.sort_by(|a, b| a.0.cmp(&b.0));
        all
    }

    pub fn generator(&self) -> &ResponseGenerator {
        &self.generator
    }

    pub fn metrics(&self) -> &PerformanceMonitor {
        &self.metrics
    }
}
