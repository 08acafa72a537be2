//! Retrieval plus templated answer assembly.

use std::sync::Arc;
use std::time::Duration;

use crate::config::AssistantConfig;
use crate::knowledge::KnowledgeStore;
use crate::metrics::PerformanceMonitor;
use crate::search::{KeywordFilter, LexicalIndex, RetrievalCache};
use crate::templates::{self, feature_label, format_inr, truncate_chars};
use crate::types::{ConversationContext, Intent, KnowledgeItem, KnowledgeType, RagResponse};

use super::intent::IntentClassifier;

const NO_SOURCE_CONFIDENCE: f32 = 0.3;
const BASE_CONFIDENCE: f32 = 0.8;
const INTENT_BONUS: f32 = 0.2;
const MAX_CONFIDENCE: f32 = 0.9;

pub struct ResponseGenerator {
    store: Arc<KnowledgeStore>,
    index: LexicalIndex,
    keywords: KeywordFilter,
    classifier: IntentClassifier,
    cache: RetrievalCache,
    config: AssistantConfig,
    metrics: Arc<PerformanceMonitor>,
}

impl ResponseGenerator {
    pub fn new(
        store: Arc<KnowledgeStore>,
        config: AssistantConfig,
        metrics: Arc<PerformanceMonitor>,
    ) -> Self {
        let index = LexicalIndex::build(&store);
        let keywords = KeywordFilter::build(&store);
        let cache = RetrievalCache::new(
            config.search.enable_caching,
            config.search.cache_capacity,
            Duration::from_secs(config.search.cache_expiry_secs),
        );
        Self {
            store,
            index,
            keywords,
            classifier: IntentClassifier::new(),
            cache,
            config,
            metrics,
        }
    }

    pub fn store(&self) -> &KnowledgeStore {
        &self.store
    }

    pub fn index(&self) -> &LexicalIndex {
        &self.index
    }

    pub fn classifier(&self) -> &IntentClassifier {
        &self.classifier
    }

    pub fn cache(&self) -> &RetrievalCache {
        &self.cache
    }

    pub fn config(&self) -> &AssistantConfig {
        &self.config
    }

    /// Keyword pre-filter followed by similarity re-ranking. Products named in
    /// the query are pinned to the front, in the order they are named, and
    /// always survive the cut.
    pub fn retrieve(&self, query: &str) -> Vec<KnowledgeItem> {
        let _timer = self.metrics.start_timer("retrieve");

        let indices = match self.cache.get(query) {
            Some(indices) => {
                tracing::debug!(sources = indices.len(), "Retrieval cache hit");
                indices
            }
            None => {
                let indices = self.rank(query);
                self.cache.insert(query, indices.clone());
                indices
            }
        };

        indices
            .into_iter()
            .filter_map(|index| self.store.get(index).cloned())
            .collect()
    }

    fn rank(&self, query: &str) -> Vec<usize> {
        let candidates = self.keywords.search(query, self.config.search.max_results);
        if candidates.is_empty() {
            return Vec::new();
        }

        let query_vector = self.index.embed(query);
        let pinned: Vec<&str> = self
            .store
            .products_mentioned_in(query)
            .into_iter()
            .map(|item| item.id.as_str())
            .collect();
        let pin_rank = |index: usize| {
            self.store
                .get(index)
                .and_then(|item| pinned.iter().position(|id| *id == item.id))
        };

        // a named product cut by the pre-filter limit still takes part
        let mut indices: Vec<usize> = candidates.iter().map(|c| c.index).collect();
        for id in &pinned {
            if let Some(index) = self.store.get_all().iter().position(|item| item.id == *id) {
                if !indices.contains(&index) {
                    indices.push(index);
                }
            }
        }

        let mut ranked: Vec<(usize, Option<usize>, f32)> = indices
            .into_iter()
            .map(|index| {
                let similarity = self
                    .index
                    .item_vector(index)
                    .map(|v| self.index.similarity(&query_vector, v))
                    .unwrap_or(0.0);
                (index, pin_rank(index), similarity)
            })
            .collect();

        // stable: equal similarity keeps pre-filter order
        ranked.sort_by(|a, b| match (a.1, b.1) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => b.2.total_cmp(&a.2),
        });

        let pinned_count = ranked.iter().filter(|r| r.1.is_some()).count();
        let keep = self.config.search.rerank_top_k.max(pinned_count);
        ranked
            .into_iter()
            .take(keep)
            .map(|(index, _, _)| index)
            .collect()
    }

    /// Answer one query. Never fails: every path ends in a non-empty answer.
    pub fn generate(&self, query: &str, context: &ConversationContext) -> RagResponse {
        let _timer = self.metrics.start_timer("generate");

        let intent = {
            let _timer = self.metrics.start_timer("classify");
            self.classifier.classify(query)
        };

        let greeting = intent == Intent::GeneralInquiry && templates::is_greeting(query);
        let sources = if greeting { Vec::new() } else { self.retrieve(query) };

        let mut answer = if greeting {
            templates::greeting(&self.config.store, context.user_turns().saturating_sub(1))
        } else {
            self.answer_for(intent, query, &sources)
        };
        if answer.trim().is_empty() {
            answer = templates::DEFAULT_CLARIFICATION.to_string();
        }

        let confidence = confidence(intent, &sources);

        let suggested_actions = if self.config.response.enable_suggested_actions {
            templates::suggested_actions(intent)
        } else {
            Vec::new()
        };

        if self.config.response.enable_source_citations && !sources.is_empty() {
            answer.push_str(&templates::citation_suffix(&sources));
        }

        tracing::debug!(
            intent = %intent,
            sources = sources.len(),
            confidence,
            "Generated response"
        );
        if confidence <= self.config.search.min_confidence_threshold {
            tracing::debug!(query_len = query.len(), "No knowledge matched the query");
        }

        RagResponse {
            answer,
            sources,
            confidence,
            suggested_actions,
            intent,
        }
    }

    fn answer_for(&self, intent: Intent, query: &str, sources: &[KnowledgeItem]) -> String {
        match intent {
            Intent::ProductInquiry => self.product_answer(query, sources),
            Intent::ServiceInquiry => service_answer(sources),
            Intent::TechnicalSupport => self.technical_answer(sources),
            Intent::WarrantyInquiry => self.warranty_answer(query, sources),
            Intent::Comparison => comparison_answer(sources),
            Intent::Location => templates::location(&self.config.store),
            Intent::Payment => payment_answer(sources),
            Intent::GeneralInquiry => self.default_answer(sources),
        }
    }

    fn product_answer(&self, query: &str, sources: &[KnowledgeItem]) -> String {
        let named = self
            .store
            .product_mentioned_in(query)
            .and_then(|named| sources.iter().find(|s| s.id == named.id));
        let Some(product) = named
            .or_else(|| sources.iter().find(|s| s.kind() == KnowledgeType::Product))
            .and_then(KnowledgeItem::as_product)
        else {
            return templates::PRODUCT_FALLBACK.to_string();
        };

        let mut answer = format!(
            "Great choice! The {} is one of our most popular machines. ",
            product.name
        );

        let price = (product.price > 0).then(|| {
            let mut clause = format!("priced at ₹{}", format_inr(product.price));
            if product.list_price > product.price {
                clause.push_str(&format!(" (MRP ₹{})", format_inr(product.list_price)));
            }
            clause
        });
        let labels: Vec<&str> = product
            .features
            .iter()
            .map(|f| feature_label(f))
            .filter(|f| !f.is_empty())
            .take(3)
            .collect();
        let features = (!labels.is_empty()).then(|| format!("features {}", join_natural(&labels)));

        match (price, features) {
            (Some(price), Some(features)) => {
                answer.push_str(&format!("It's {} and {}. ", price, features))
            }
            (Some(price), None) => answer.push_str(&format!("It's {}. ", price)),
            (None, Some(features)) => answer.push_str(&format!("It {}. ", features)),
            (None, None) => {}
        }

        answer.push_str(templates::PRODUCT_FOLLOW_UP);
        answer
    }

    fn technical_answer(&self, sources: &[KnowledgeItem]) -> String {
        let item = sources
            .iter()
            .find(|s| s.kind() == KnowledgeType::Faq)
            .or_else(|| {
                sources
                    .iter()
                    .find(|s| s.content.to_lowercase().contains("how to"))
            });
        match item {
            Some(item) => self.item_text(item),
            None => templates::TECHNICAL_FALLBACK.to_string(),
        }
    }

    fn warranty_answer(&self, query: &str, sources: &[KnowledgeItem]) -> String {
        // a FAQ asking about warranty beats one that only mentions it in passing
        let faqs: Vec<_> = sources.iter().filter_map(KnowledgeItem::as_faq).collect();
        let mut answer = faqs
            .iter()
            .find(|faq| faq.question.to_lowercase().contains("warranty"))
            .or_else(|| {
                faqs.iter()
                    .find(|faq| faq.answer.to_lowercase().contains("warranty"))
            })
            .map(|faq| faq.answer.clone())
            .unwrap_or_else(|| templates::WARRANTY_STANDARD.to_string());

        if let Some(product) = self
            .store
            .product_mentioned_in(query)
            .and_then(KnowledgeItem::as_product)
        {
            if !product.warranty.is_empty() {
                answer.push_str(&format!(
                    " For the {}: {}.",
                    product.name,
                    product.warranty.join(", ")
                ));
            }
        }
        answer
    }

    fn default_answer(&self, sources: &[KnowledgeItem]) -> String {
        match sources.first() {
            Some(item) => self.item_text(item),
            None => templates::DEFAULT_CLARIFICATION.to_string(),
        }
    }

    /// FAQ answer when the item is a FAQ, otherwise its capped content.
    fn item_text(&self, item: &KnowledgeItem) -> String {
        match item.as_faq() {
            Some(faq) => faq.answer.clone(),
            None => truncate_chars(&item.content, self.config.response.max_context_length),
        }
    }
}

fn confidence(intent: Intent, sources: &[KnowledgeItem]) -> f32 {
    if sources.is_empty() {
        return NO_SOURCE_CONFIDENCE;
    }
    let bonus = if intent != Intent::GeneralInquiry {
        INTENT_BONUS
    } else {
        0.0
    };
    (BASE_CONFIDENCE + bonus).min(MAX_CONFIDENCE)
}

fn service_answer(sources: &[KnowledgeItem]) -> String {
    let item = sources
        .iter()
        .find(|s| matches!(s.kind(), KnowledgeType::Service | KnowledgeType::Faq));
    match item {
        Some(item) => match item.as_faq() {
            Some(faq) => faq.answer.clone(),
            None => item.content.clone(),
        },
        None => templates::SERVICE_FALLBACK.to_string(),
    }
}

fn comparison_answer(sources: &[KnowledgeItem]) -> String {
    let products: Vec<_> = sources
        .iter()
        .filter_map(KnowledgeItem::as_product)
        .take(2)
        .collect();
    if products.len() < 2 {
        return templates::COMPARISON_FALLBACK.to_string();
    }

    let mut answer = String::from("Here's a comparison of our machines:\n\n");
    for product in products {
        let price = if product.price > 0 {
            format!("₹{}", format_inr(product.price))
        } else {
            "Contact for pricing".to_string()
        };
        let features: Vec<&str> = product
            .features
            .iter()
            .map(|f| feature_label(f))
            .filter(|f| !f.is_empty())
            .take(2)
            .collect();
        answer.push_str(&format!("**{}**: {}.", product.name, price));
        if !features.is_empty() {
            answer.push_str(&format!(" Key features: {}.", features.join(", ")));
        }
        answer.push_str("\n\n");
    }
    answer.push_str(templates::COMPARISON_CLOSING);
    answer
}

fn payment_answer(sources: &[KnowledgeItem]) -> String {
    sources
        .iter()
        .filter(|s| s.content.to_lowercase().contains("payment"))
        .find_map(|s| s.as_faq())
        .map(|faq| faq.answer.clone())
        .unwrap_or_else(|| templates::PAYMENT_FALLBACK.to_string())
}

/// "a", "a and b", "a, b and c".
fn join_natural(parts: &[&str]) -> String {
    match parts {
        [] => String::new(),
        [only] => only.to_string(),
        [head @ .., last] => format!("{} and {}", head.join(", "), last),
    }
}
