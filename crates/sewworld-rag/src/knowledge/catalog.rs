//! Catalog records supplied by the storefront (products and blog articles).
//!
//! Records are read leniently: a missing or mistyped field becomes an empty
//! default instead of rejecting the whole catalog.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{AssistantError, Result};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: String,
    pub name: String,
    pub description: String,
    /// List price (MRP) in rupees.
    pub price: u64,
    pub sale_price: u64,
    pub features: Vec<String>,
    pub category: String,
    pub specifications: Vec<String>,
    pub accessories: Vec<String>,
    pub use_cases: Vec<String>,
    pub warranty: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArticleRecord {
    pub id: String,
    pub title: String,
    pub excerpt: String,
    /// Body text; may contain HTML markup.
    pub content: String,
    pub category: String,
    pub date: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    pub products: Vec<ProductRecord>,
    pub articles: Vec<ArticleRecord>,
}

impl Catalog {
    pub fn new(products: Vec<ProductRecord>, articles: Vec<ArticleRecord>) -> Self {
        Self { products, articles }
    }

    /// Parse `{ "products": [...], "articles": [...] }`. Either list may be
    /// absent. Entries that are not objects are skipped.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let root: Value = serde_json::from_str(json)?;
        let root = match root {
            Value::Object(map) => map,
            other => return Err(AssistantError::CatalogShape(json_kind(&other))),
        };

        let products = records(&root, "products")
            .filter_map(|(idx, v)| match v {
                Value::Object(obj) => Some(ProductRecord::from_object(obj)),
                other => {
                    tracing::warn!(index = idx, kind = json_kind(other), "Skipping product record that is not an object");
                    None
                }
            })
            .collect();

        let articles = records(&root, "articles")
            .filter_map(|(idx, v)| match v {
                Value::Object(obj) => Some(ArticleRecord::from_object(obj)),
                other => {
                    tracing::warn!(index = idx, kind = json_kind(other), "Skipping article record that is not an object");
                    None
                }
            })
            .collect();

        Ok(Self { products, articles })
    }
}

impl ProductRecord {
    pub fn from_object(obj: &Map<String, Value>) -> Self {
        Self {
            id: text(obj, &["id"]),
            name: text(obj, &["name"]),
            description: text(obj, &["description"]),
            price: amount(obj, &["price"]),
            sale_price: amount(obj, &["salePrice", "sale_price"]),
            features: list(obj, &["features"]),
            category: text(obj, &["category"]),
            specifications: list(obj, &["specifications"]),
            accessories: list(obj, &["accessories"]),
            use_cases: list(obj, &["useCases", "use_cases"]),
            warranty: list(obj, &["warranty"]),
        }
    }

    /// Price shown to shoppers: the sale price, or the list price when no sale is set.
    pub fn selling_price(&self) -> u64 {
        if self.sale_price > 0 {
            self.sale_price
        } else {
            self.price
        }
    }
}

impl ArticleRecord {
    pub fn from_object(obj: &Map<String, Value>) -> Self {
        Self {
            id: text(obj, &["id"]),
            title: text(obj, &["title"]),
            excerpt: text(obj, &["excerpt"]),
            content: text(obj, &["content"]),
            category: text(obj, &["category"]),
            date: text(obj, &["date"]),
        }
    }
}

fn records<'a>(root: &'a Map<String, Value>, key: &str) -> impl Iterator<Item = (usize, &'a Value)> {
    root.get(key)
        .and_then(Value::as_array)
        .map(|a| a.as_slice())
        .unwrap_or_default()
        .iter()
        .enumerate()
}

fn field<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|k| obj.get(*k)).filter(|v| !v.is_null())
}

fn text(obj: &Map<String, Value>, keys: &[&str]) -> String {
    match field(obj, keys) {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

fn amount(obj: &Map<String, Value>, keys: &[&str]) -> u64 {
    match field(obj, keys) {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite() && *f >= 0.0).map(|f| f.round() as u64))
            .unwrap_or(0),
        Some(Value::String(s)) => {
            let digits: String = s
                .chars()
                .filter(|c| c.is_ascii_digit() || *c == '.')
                .collect();
            digits
                .parse::<f64>()
                .ok()
                .filter(|f| f.is_finite())
                .map(|f| f.round() as u64)
                .unwrap_or(0)
        }
        _ => 0,
    }
}

fn list(obj: &Map<String, Value>, keys: &[&str]) -> Vec<String> {
    match field(obj, keys) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|v| v.as_str())
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        Some(Value::String(s)) if !s.trim().is_empty() => vec![s.trim().to_string()],
        _ => Vec::new(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_full_product() {
        let catalog = Catalog::from_json_str(
            r#"{ "products": [{
                "id": 1, "name": "JACK F5", "description": "Direct drive lockstitch",
                "price": 30000, "salePrice": 22999,
                "features": ["LED lighting", "Thread trimmer"],
                "category": "Industrial Machines",
                "warranty": ["1-year service warranty"]
            }] }"#,
        )
        .unwrap();

        assert_eq!(catalog.products.len(), 1);
        let p = &catalog.products[0];
        assert_eq!(p.id, "1");
        assert_eq!(p.sale_price, 22999);
        assert_eq!(p.selling_price(), 22999);
        assert_eq!(p.features.len(), 2);
        assert!(catalog.articles.is_empty());
    }

    #[test]
    fn test_malformed_fields_degrade_to_defaults() {
        let catalog = Catalog::from_json_str(
            r#"{ "products": [
                { "name": 42, "price": "₹31,800", "features": "single", "category": null },
                "not an object",
                {}
            ], "articles": [ { "title": "Care tips", "content": ["bad"] } ] }"#,
        )
        .unwrap();

        assert_eq!(catalog.products.len(), 2);
        let p = &catalog.products[0];
        assert_eq!(p.name, "42");
        assert_eq!(p.price, 31800);
        assert_eq!(p.sale_price, 0);
        assert_eq!(p.selling_price(), 31800);
        assert_eq!(p.features, vec!["single".to_string()]);
        assert_eq!(p.category, "");
        assert_eq!(catalog.products[1], ProductRecord::default());

        assert_eq!(catalog.articles[0].title, "Care tips");
        assert_eq!(catalog.articles[0].content, "");
    }

    #[test]
    fn test_rejects_non_object_document() {
        assert!(matches!(
            Catalog::from_json_str("[1, 2]"),
            Err(AssistantError::CatalogShape("array"))
        ));
        assert!(matches!(
            Catalog::from_json_str("not json"),
            Err(AssistantError::Json(_))
        ));
    }

    #[test]
    fn test_empty_document_is_empty_catalog() {
        let catalog = Catalog::from_json_str("{}").unwrap();
        assert!(catalog.products.is_empty());
        assert!(catalog.articles.is_empty());
    }
}
