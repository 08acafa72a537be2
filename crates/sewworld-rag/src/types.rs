use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, VecDeque};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KnowledgeType {
    Product,
    Article,
    Faq,
    Service,
}

impl KnowledgeType {
    /// Phrase used in the "based on ..." citation suffix.
    pub fn source_label(&self) -> &'static str {
        match self {
            Self::Product => "product information",
            Self::Article => "our blog",
            Self::Faq => "frequently asked questions",
            Self::Service => "service information",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductMetadata {
    pub name: String,
    /// Selling price in whole rupees.
    pub price: u64,
    /// List price (MRP) in whole rupees; 0 when unknown.
    pub list_price: u64,
    pub features: Vec<String>,
    pub specifications: Vec<String>,
    pub accessories: Vec<String>,
    pub use_cases: Vec<String>,
    pub warranty: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArticleMetadata {
    pub title: String,
    pub excerpt: String,
    pub date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FaqMetadata {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceMetadata {
    pub name: String,
    pub features: Vec<String>,
}

/// Structured fields kept per item type for answer formatting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ItemMetadata {
    Product(ProductMetadata),
    Article(ArticleMetadata),
    Faq(FaqMetadata),
    Service(ServiceMetadata),
}

/// A normalized, searchable record. Built once when the store is assembled
/// and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeItem {
    pub id: String,
    pub content: String,
    pub category: String,
    pub tags: BTreeSet<String>,
    pub metadata: ItemMetadata,
}

impl KnowledgeItem {
    pub fn kind(&self) -> KnowledgeType {
        match self.metadata {
            ItemMetadata::Product(_) => KnowledgeType::Product,
            ItemMetadata::Article(_) => KnowledgeType::Article,
            ItemMetadata::Faq(_) => KnowledgeType::Faq,
            ItemMetadata::Service(_) => KnowledgeType::Service,
        }
    }

    /// Display name: product/service name, article title or FAQ question.
    pub fn title(&self) -> &str {
        match &self.metadata {
            ItemMetadata::Product(p) => &p.name,
            ItemMetadata::Article(a) => &a.title,
            ItemMetadata::Faq(f) => &f.question,
            ItemMetadata::Service(s) => &s.name,
        }
    }

    pub fn as_product(&self) -> Option<&ProductMetadata> {
        match &self.metadata {
            ItemMetadata::Product(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_faq(&self) -> Option<&FaqMetadata> {
        match &self.metadata {
            ItemMetadata::Faq(f) => Some(f),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    ProductInquiry,
    ServiceInquiry,
    TechnicalSupport,
    WarrantyInquiry,
    GeneralInquiry,
    Comparison,
    Location,
    Payment,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ProductInquiry => "product_inquiry",
            Self::ServiceInquiry => "service_inquiry",
            Self::TechnicalSupport => "technical_support",
            Self::WarrantyInquiry => "warranty_inquiry",
            Self::GeneralInquiry => "general_inquiry",
            Self::Comparison => "comparison",
            Self::Location => "location",
            Self::Payment => "payment",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Per-session memory: a bounded message window plus what the last answer used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversationContext {
    pub messages: VecDeque<ChatMessage>,
    pub retrieved_context: Vec<KnowledgeItem>,
    pub last_intent: Option<Intent>,
}

impl ConversationContext {
    /// Number of user turns still inside the window.
    pub fn user_turns(&self) -> usize {
        self.messages
            .iter()
            .filter(|m| m.role == Role::User)
            .count()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RagResponse {
    pub answer: String,
    pub sources: Vec<KnowledgeItem>,
    pub confidence: f32,
    pub suggested_actions: Vec<String>,
    pub intent: Intent,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_follows_metadata() {
        let item = KnowledgeItem {
            id: "faq-0".into(),
            content: "Q: x A: y".into(),
            category: "Warranty".into(),
            tags: BTreeSet::new(),
            metadata: ItemMetadata::Faq(FaqMetadata {
                question: "x".into(),
                answer: "y".into(),
            }),
        };
        assert_eq!(item.kind(), KnowledgeType::Faq);
        assert_eq!(item.title(), "x");
        assert!(item.as_product().is_none());
    }

    #[test]
    fn test_intent_serializes_snake_case() {
        let json = serde_json::to_string(&Intent::WarrantyInquiry).unwrap();
        assert_eq!(json, "\"warranty_inquiry\"");
        assert_eq!(Intent::ProductInquiry.to_string(), "product_inquiry");
    }

    #[test]
    fn test_metadata_tagged_by_type() {
        let meta = ItemMetadata::Service(ServiceMetadata {
            name: "AMC Packages".into(),
            features: vec![],
        });
        let value = serde_json::to_value(&meta).unwrap();
        assert_eq!(value["type"], "service");
    }
}
