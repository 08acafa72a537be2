//! Knowledge store: every catalog source flattened into one ordered list of
//! [`KnowledgeItem`]s.

pub mod builtin;
pub mod catalog;

use std::collections::{BTreeSet, HashSet};
use std::sync::LazyLock;

use crate::types::{
    ArticleMetadata, FaqMetadata, ItemMetadata, KnowledgeItem, ProductMetadata, ServiceMetadata,
};

pub use builtin::{FaqEntry, ServiceEntry, FAQS, SERVICES};
pub use catalog::{ArticleRecord, Catalog, ProductRecord};

static HTML_TAG_RE: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"<[^>]*>").expect("html tag regex is valid"));
static WHITESPACE_RE: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"\s+").expect("whitespace regex is valid"));

#[derive(Debug, Clone, Default)]
pub struct KnowledgeStore {
    items: Vec<KnowledgeItem>,
}

impl KnowledgeStore {
    /// Build the store from the storefront catalog plus the built-in FAQ and
    /// service tables. Order: products, articles, FAQs, services.
    pub fn build(catalog: &Catalog) -> Self {
        Self::build_with(catalog, FAQS, SERVICES)
    }

    pub fn build_with(catalog: &Catalog, faqs: &[FaqEntry], services: &[ServiceEntry]) -> Self {
        let mut seen = HashSet::new();
        let mut items = Vec::with_capacity(
            catalog.products.len() + catalog.articles.len() + faqs.len() + services.len(),
        );

        for (idx, product) in catalog.products.iter().enumerate() {
            let id = unique_id("product", &product.id, idx, &mut seen);
            items.push(product_item(id, product));
        }
        for (idx, article) in catalog.articles.iter().enumerate() {
            let id = unique_id("article", &article.id, idx, &mut seen);
            items.push(article_item(id, article));
        }
        for (idx, faq) in faqs.iter().enumerate() {
            let id = unique_id("faq", &idx.to_string(), idx, &mut seen);
            items.push(faq_item(id, faq));
        }
        for (idx, service) in services.iter().enumerate() {
            let id = unique_id("service", &idx.to_string(), idx, &mut seen);
            items.push(service_item(id, service));
        }

        tracing::info!(
            products = catalog.products.len(),
            articles = catalog.articles.len(),
            faqs = faqs.len(),
            services = services.len(),
            "Knowledge store built"
        );

        Self { items }
    }

    pub fn from_items(items: Vec<KnowledgeItem>) -> Self {
        Self { items }
    }

    pub fn get_all(&self) -> &[KnowledgeItem] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&KnowledgeItem> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// First product whose name contains `name` (case-insensitive).
    pub fn find_product_by_name(&self, name: &str) -> Option<&KnowledgeItem> {
        let needle = name.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }
        self.items.iter().find(|item| {
            item.as_product()
                .map(|p| p.name.to_lowercase().contains(&needle))
                .unwrap_or(false)
        })
    }

    /// First FAQ whose question or one of whose tags contains `keywords`.
    pub fn find_faq_by_keywords(&self, keywords: &str) -> Option<&KnowledgeItem> {
        let needle = keywords.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }
        self.items.iter().find(|item| {
            item.as_faq()
                .map(|f| {
                    f.question.to_lowercase().contains(&needle)
                        || item.tags.iter().any(|t| t.contains(&needle))
                })
                .unwrap_or(false)
        })
    }

    /// Product whose full name appears in `query`; the longest name wins so
    /// "Usha Wonder Stich Plus" beats "Usha Wonder Stich".
    pub fn product_mentioned_in(&self, query: &str) -> Option<&KnowledgeItem> {
        let query_lower = query.to_lowercase();
        let mut best: Option<(&KnowledgeItem, usize)> = None;
        for item in &self.items {
            let Some(product) = item.as_product() else {
                continue;
            };
            let name = product.name.to_lowercase();
            if name.is_empty() || !query_lower.contains(&name) {
                continue;
            }
            let len = name.chars().count();
            // strictly longer only, so the earliest item wins on equal length
            if best.map_or(true, |(_, best_len)| len > best_len) {
                best = Some((item, len));
            }
        }
        best.map(|(item, _)| item)
    }

    /// Every product named in `query`, in the order the names appear. A name
    /// nested inside a longer matched name is not counted separately.
    pub fn products_mentioned_in(&self, query: &str) -> Vec<&KnowledgeItem> {
        let query_lower = query.to_lowercase();
        let mut matches: Vec<(usize, usize, &KnowledgeItem)> = Vec::new();
        for item in &self.items {
            let Some(product) = item.as_product() else {
                continue;
            };
            let name = product.name.to_lowercase();
            if name.is_empty() {
                continue;
            }
            if let Some(start) = query_lower.find(&name) {
                matches.push((start, start + name.len(), item));
            }
        }

        // longest first so nested names lose to the name that contains them
        matches.sort_by(|a, b| (b.1 - b.0).cmp(&(a.1 - a.0)));
        let mut accepted: Vec<(usize, usize, &KnowledgeItem)> = Vec::new();
        for (start, end, item) in matches {
            if accepted.iter().all(|(s, e, _)| end <= *s || start >= *e) {
                accepted.push((start, end, item));
            }
        }
        accepted.sort_by_key(|(start, _, _)| *start);
        accepted.into_iter().map(|(_, _, item)| item).collect()
    }
}

fn unique_id(prefix: &str, raw: &str, index: usize, seen: &mut HashSet<String>) -> String {
    let base = if raw.trim().is_empty() {
        format!("{}-{}", prefix, index)
    } else {
        format!("{}-{}", prefix, raw.trim())
    };
    let id = if seen.contains(&base) {
        format!("{}-{}", base, index)
    } else {
        base
    };
    seen.insert(id.clone());
    id
}

fn lowercase_tags<I, S>(tags: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tags.into_iter()
        .map(|t| t.as_ref().trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}

fn sentence(text: &str) -> &str {
    text.trim().trim_end_matches('.')
}

fn product_item(id: String, product: &ProductRecord) -> KnowledgeItem {
    let price = product.selling_price();
    let content = format!(
        "{}: {}. Features: {}. Price: ₹{}. Category: {}.",
        product.name,
        sentence(&product.description),
        product.features.join(", "),
        price,
        product.category
    );

    let feature_heads: Vec<String> = product
        .features
        .iter()
        .map(|f| {
            f.to_lowercase()
                .split(' ')
                .take(3)
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect();
    let tags = lowercase_tags(
        [product.name.as_str(), product.category.as_str()]
            .into_iter()
            .map(str::to_string)
            .chain(feature_heads)
            .chain(["sewing machine", "industrial", "domestic"].map(str::to_string)),
    );

    KnowledgeItem {
        id,
        content,
        category: product.category.clone(),
        tags,
        metadata: ItemMetadata::Product(ProductMetadata {
            name: product.name.clone(),
            price,
            list_price: product.price,
            features: product.features.clone(),
            specifications: product.specifications.clone(),
            accessories: product.accessories.clone(),
            use_cases: product.use_cases.clone(),
            warranty: product.warranty.clone(),
        }),
    }
}

fn article_item(id: String, article: &ArticleRecord) -> KnowledgeItem {
    let body = HTML_TAG_RE.replace_all(&article.content, " ");
    let body = WHITESPACE_RE.replace_all(&body, " ");
    let content = format!("{}: {} {}", article.title, article.excerpt, body.trim())
        .trim()
        .to_string();

    KnowledgeItem {
        id,
        content,
        category: article.category.clone(),
        tags: lowercase_tags([
            article.category.as_str(),
            "blog",
            "guide",
            "tips",
            "information",
        ]),
        metadata: ItemMetadata::Article(ArticleMetadata {
            title: article.title.clone(),
            excerpt: article.excerpt.clone(),
            date: article.date.clone(),
        }),
    }
}

fn faq_item(id: String, faq: &FaqEntry) -> KnowledgeItem {
    KnowledgeItem {
        id,
        content: format!("Q: {} A: {}", faq.question, faq.answer),
        category: faq.category.to_string(),
        tags: lowercase_tags(faq.tags.iter()),
        metadata: ItemMetadata::Faq(FaqMetadata {
            question: faq.question.to_string(),
            answer: faq.answer.to_string(),
        }),
    }
}

fn service_item(id: String, service: &ServiceEntry) -> KnowledgeItem {
    let content = format!(
        "{}: {}. Features: {}.",
        service.name,
        sentence(service.description),
        service.features.join(", ")
    );
    let tags = lowercase_tags(
        [service.name, service.category]
            .iter()
            .chain(service.features.iter())
            .chain(["service", "support"].iter()),
    );

    KnowledgeItem {
        id,
        content,
        category: service.category.to_string(),
        tags,
        metadata: ItemMetadata::Service(ServiceMetadata {
            name: service.name.to_string(),
            features: service.features.iter().map(|f| f.to_string()).collect(),
        }),
    }
}
