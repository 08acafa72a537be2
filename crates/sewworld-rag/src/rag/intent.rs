//! Keyword-bucket intent classification.

use crate::types::Intent;

/// Keyword buckets in registration order. Earlier intents win ties.
const INTENT_KEYWORDS: &[(Intent, &[&str])] = &[
    (
        Intent::ProductInquiry,
        &["machine", "product", "jack", "industrial", "domestic", "price", "cost", "buy", "purchase"],
    ),
    (
        Intent::ServiceInquiry,
        &["service", "repair", "maintenance", "fix", "problem", "amc", "installation", "training"],
    ),
    (
        Intent::TechnicalSupport,
        &["how to", "troubleshoot", "issue", "problem", "not working", "error"],
    ),
    (
        Intent::WarrantyInquiry,
        &["warranty", "guarantee", "coverage", "return", "refund"],
    ),
    (
        Intent::GeneralInquiry,
        &["hello", "hi", "help", "information", "about", "contact"],
    ),
    (
        Intent::Comparison,
        &["compare", "difference", "vs", "versus", "better", "best"],
    ),
    (
        Intent::Location,
        &["where", "location", "address", "visit", "showroom"],
    ),
    (
        Intent::Payment,
        &["payment", "financing", "emi", "installment", "cash", "card"],
    ),
];

#[derive(Debug, Clone, Copy, Default)]
pub struct IntentClassifier;

impl IntentClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Number of bucket keywords found (case-insensitive substring) per intent,
    /// in registration order.
    pub fn scores(&self, query: &str) -> Vec<(Intent, usize)> {
        let query_lower = query.to_lowercase();
        INTENT_KEYWORDS
            .iter()
            .map(|(intent, keywords)| {
                let score = keywords
                    .iter()
                    .filter(|k| query_lower.contains(*k))
                    .count();
                (*intent, score)
            })
            .collect()
    }

    /// Intent with the strictly highest score; `GeneralInquiry` when nothing matches.
    pub fn classify(&self, query: &str) -> Intent {
        let mut best = Intent::GeneralInquiry;
        let mut best_score = 0;
        for (intent, score) in self.scores(query) {
            if score > best_score {
                best = intent;
                best_score = score;
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_inquiry() {
        let classifier = IntentClassifier::new();
        assert_eq!(classifier.classify("What does the JACK F5 cost?"), Intent::ProductInquiry);
    }

    #[test]
    fn test_warranty_inquiry() {
        let classifier = IntentClassifier::new();
        assert_eq!(classifier.classify("Do you offer a warranty?"), Intent::WarrantyInquiry);
    }

    #[test]
    fn test_greeting_and_empty_are_general() {
        let classifier = IntentClassifier::new();
        assert_eq!(classifier.classify("Hi"), Intent::GeneralInquiry);
        assert_eq!(classifier.classify(""), Intent::GeneralInquiry);
        assert_eq!(classifier.classify("🧵🧵"), Intent::GeneralInquiry);
    }

    #[test]
    fn test_other_buckets() {
        let classifier = IntentClassifier::new();
        assert_eq!(classifier.classify("Where is your showroom?"), Intent::Location);
        assert_eq!(classifier.classify("Can I pay by card or EMI?"), Intent::Payment);
        assert_eq!(classifier.classify("compare domestic vs industrial"), Intent::ProductInquiry);
        assert_eq!(classifier.classify("Compare A versus B, which is better"), Intent::Comparison);
        assert_eq!(classifier.classify("I need a repair for my machine"), Intent::ProductInquiry);
        assert_eq!(classifier.classify("book amc service and repair"), Intent::ServiceInquiry);
    }

    #[test]
    fn test_ties_go_to_earlier_intent() {
        let classifier = IntentClassifier::new();
        // one product keyword and one warranty keyword
        assert_eq!(classifier.classify("machine warranty"), Intent::ProductInquiry);
        // one service keyword and one payment keyword
        assert_eq!(classifier.classify("service payment"), Intent::ServiceInquiry);
    }

    #[test]
    fn test_deterministic() {
        let classifier = IntentClassifier::new();
        let query = "how to fix thread error";
        let first = classifier.classify(query);
        for _ in 0..10 {
            assert_eq!(classifier.classify(query), first);
        }
    }

    #[test]
    fn test_scores_cover_every_intent() {
        let scores = IntentClassifier::new().scores("warranty refund");
        assert_eq!(scores.len(), 8);
        assert!(scores.contains(&(Intent::WarrantyInquiry, 2)));
    }
}
