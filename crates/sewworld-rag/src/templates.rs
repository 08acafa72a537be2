//! Answer templates and formatting helpers for the shop assistant.

use crate::config::StoreInfo;
use crate::types::{Intent, KnowledgeItem};

pub const PRODUCT_FALLBACK: &str = "I'd be happy to help you find the perfect sewing machine! We have a wide range of domestic and industrial machines. Could you tell me more about your specific needs - are you looking for home use, commercial use, or industrial applications?";

pub const PRODUCT_FOLLOW_UP: &str =
    "Would you like to know more about its specific features, pricing, or see our other options?";

pub const SERVICE_FALLBACK: &str = "We provide comprehensive service solutions including expert repair & maintenance, AMC packages, professional installation & training, and 24/7 customer support. What specific service do you need help with?";

pub const TECHNICAL_FALLBACK: &str = "I can help you with technical issues and troubleshooting. Could you describe the specific problem you're experiencing with your sewing machine?";

pub const WARRANTY_STANDARD: &str = "We provide comprehensive warranties on all our machines: 1-year service warranty and 3-years board and PCB warranty. This covers parts, labor, and technical support to ensure your machine operates perfectly.";

pub const COMPARISON_FALLBACK: &str = "I'd be happy to help you compare our machines! We have various models for different needs. Could you tell me what you're looking to compare - perhaps domestic vs industrial, or different JACK models?";

pub const COMPARISON_CLOSING: &str =
    "Would you like more detailed specifications or help choosing the right one for your needs?";

pub const PAYMENT_FALLBACK: &str = "We accept various payment methods including cash, bank transfers, UPI payments, and card payments. We also offer financing options and EMI plans to make your purchase more affordable. Contact us for detailed payment terms.";

pub const DEFAULT_CLARIFICATION: &str = "That's a great question! I'm here to help you with anything related to sewing machines, services, or repairs. Could you tell me a bit more about what you're looking for?";

const GREETING_WORDS: &[&str] = &["hello", "hi", "hey", "hii", "hiya", "namaste", "greetings"];
const GREETING_PHRASES: &[&str] = &["good morning", "good afternoon", "good evening"];

/// Short salutations only; longer messages that happen to start with "hi"
/// are treated as real questions.
pub fn is_greeting(query: &str) -> bool {
    let lowered = query.to_lowercase();
    let words: Vec<&str> = lowered
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();
    if words.is_empty() || words.len() > 6 {
        return false;
    }
    words.iter().any(|w| GREETING_WORDS.contains(w))
        || GREETING_PHRASES.iter().any(|p| lowered.contains(p))
}

/// Greeting for the given turn; rotates through the set so repeated hellos vary.
pub fn greeting(store: &StoreInfo, turn: usize) -> String {
    let variants = [
        format!(
            "Hello! I'm your {} Assistant. I can help you with machine recommendations, service inquiries, repairs, and more. What can I help you with today? 😊",
            store.name
        ),
        format!(
            "Hi there! Welcome to {}. How can I make your sewing journey better today?",
            store.name
        ),
        "Hey! Great to see you here. I'm ready to help you find the perfect sewing solution. What's on your mind?".to_string(),
    ];
    variants[turn % variants.len()].clone()
}

pub fn location(store: &StoreInfo) -> String {
    let mut answer = String::from(
        "We'd love to welcome you to our showroom! You can see all our machines in action and get hands-on experience. Our experts will be there to guide you and answer all your questions.",
    );
    if !store.address.trim().is_empty() {
        answer.push_str(&format!(" You'll find us at {}.", store.address.trim()));
    }
    if !store.hours.trim().is_empty() {
        answer.push_str(&format!(" Business hours: {}.", store.hours.trim()));
    }
    if !store.phone.trim().is_empty() {
        answer.push_str(&format!(" Call us on {} to schedule a visit.", store.phone.trim()));
    }
    answer
}

pub fn suggested_actions(intent: Intent) -> Vec<String> {
    let actions: [&str; 3] = match intent {
        Intent::ProductInquiry => ["View product details", "Compare models", "Get pricing"],
        Intent::ServiceInquiry => ["Schedule service", "Get AMC quote", "Contact technician"],
        Intent::TechnicalSupport => ["Troubleshoot issue", "Schedule repair", "Get remote support"],
        _ => ["Browse products", "Contact support", "Schedule demo"],
    };
    actions.iter().map(|a| a.to_string()).collect()
}

/// `"\n\n*This information is based on X and Y.*"` from the types of the first
/// two sources. Empty when there are no sources.
pub fn citation_suffix(sources: &[KnowledgeItem]) -> String {
    let mut labels: Vec<&str> = Vec::new();
    for item in sources.iter().take(2) {
        let label = item.kind().source_label();
        if !labels.contains(&label) {
            labels.push(label);
        }
    }
    if labels.is_empty() {
        return String::new();
    }
    format!("\n\n*This information is based on {}.*", labels.join(" and "))
}

/// Rupee amount with Indian digit grouping: 22999 → "22,999", 150000 → "1,50,000".
pub fn format_inr(amount: u64) -> String {
    let digits = amount.to_string();
    if digits.len() <= 3 {
        return digits;
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 2 {
        groups.push(&head[end - 2..end]);
        end -= 2;
    }
    groups.push(&head[..end]);
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}

/// Short label for a feature line: the part before any ':' explanation.
pub fn feature_label(feature: &str) -> &str {
    feature.split(':').next().unwrap_or(feature).trim()
}

/// Cut `text` to at most `max_chars` characters, marking the cut with "…".
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    if max_chars == 0 || text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{}…", cut.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_inr() {
        assert_eq!(format_inr(0), "0");
        assert_eq!(format_inr(999), "999");
        assert_eq!(format_inr(1000), "1,000");
        assert_eq!(format_inr(22999), "22,999");
        assert_eq!(format_inr(150000), "1,50,000");
        assert_eq!(format_inr(12345678), "1,23,45,678");
    }

    #[test]
    fn test_is_greeting() {
        assert!(is_greeting("Hi"));
        assert!(is_greeting("hello there!"));
        assert!(is_greeting("Good morning"));
        assert!(!is_greeting("which machine is best"));
        assert!(!is_greeting("anything else?"));
        assert!(!is_greeting(""));
        assert!(!is_greeting("hi can you tell me every single detail about the jack f5"));
    }

    #[test]
    fn test_greeting_rotates() {
        let store = StoreInfo::default();
        assert_ne!(greeting(&store, 0), greeting(&store, 1));
        assert_eq!(greeting(&store, 0), greeting(&store, 3));
        assert!(greeting(&store, 0).contains("SR Sewing World"));
    }

    #[test]
    fn test_location_includes_store_details() {
        let answer = location(&StoreInfo::default());
        assert!(answer.contains("Bengaluru"));
        assert!(answer.contains("10:00 AM"));

        let bare = StoreInfo {
            name: String::new(),
            address: String::new(),
            phone: String::new(),
            hours: String::new(),
        };
        assert!(location(&bare).starts_with("We'd love to welcome you"));
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("short", 10), "short");
        assert_eq!(truncate_chars("₹₹₹₹", 2), "₹₹…");
        assert_eq!(truncate_chars("abc", 0), "abc");
    }

    #[test]
    fn test_feature_label() {
        assert_eq!(feature_label("LED lighting: Adjustable 3-level"), "LED lighting");
        assert_eq!(feature_label("Thread cutter"), "Thread cutter");
    }

    #[test]
    fn test_suggested_actions() {
        assert_eq!(
            suggested_actions(Intent::ProductInquiry),
            vec!["View product details", "Compare models", "Get pricing"]
        );
        assert_eq!(suggested_actions(Intent::Location).len(), 3);
    }
}
