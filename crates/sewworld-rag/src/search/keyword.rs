//! Cheap keyword/tag pre-filter run before similarity re-ranking.

use std::collections::HashMap;

use super::lexical::{term_counts, tokenize};
use crate::knowledge::KnowledgeStore;
use crate::types::ItemMetadata;

pub const EXACT_MATCH_WEIGHT: u32 = 10;
pub const TAG_WEIGHT: u32 = 5;
pub const CATEGORY_WEIGHT: u32 = 3;

const STOP_WORDS: &[&str] = &[
    "the", "and", "for", "are", "was", "were", "with", "from", "what", "where", "when", "which",
    "who", "why", "how", "you", "your", "can", "does", "did", "this", "that", "there", "their",
    "have", "has", "had", "about", "please", "could", "would", "should", "tell", "any", "some",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    /// Position in store order.
    pub index: usize,
    pub score: u32,
}

struct Entry {
    content: String,
    category: String,
    name: Option<String>,
    tags: Vec<String>,
    terms: HashMap<String, usize>,
}

pub struct KeywordFilter {
    entries: Vec<Entry>,
}

/// Informative query terms: tokenizer output minus stop words, de-duplicated
/// in first-seen order.
pub fn query_terms(query: &str) -> Vec<String> {
    let mut terms: Vec<String> = Vec::new();
    for token in tokenize(query) {
        if !STOP_WORDS.contains(&token.as_str()) && !terms.contains(&token) {
            terms.push(token);
        }
    }
    terms
}

impl KeywordFilter {
    pub fn build(store: &KnowledgeStore) -> Self {
        let entries = store
            .get_all()
            .iter()
            .map(|item| {
                let name = match &item.metadata {
                    ItemMetadata::Product(p) => Some(p.name.to_lowercase()),
                    ItemMetadata::Service(s) => Some(s.name.to_lowercase()),
                    _ => None,
                }
                .filter(|n| !n.is_empty());
                Entry {
                    content: item.content.to_lowercase(),
                    category: item.category.to_lowercase(),
                    name,
                    tags: item.tags.iter().cloned().collect(),
                    terms: term_counts(&item.content),
                }
            })
            .collect();
        Self { entries }
    }

    /// Score every item and return the best `limit` with a positive score,
    /// highest first; ties keep store order. Queries without informative
    /// terms match nothing.
    pub fn search(&self, query: &str, limit: usize) -> Vec<Candidate> {
        let terms = query_terms(query);
        if terms.is_empty() || limit == 0 {
            return Vec::new();
        }
        let phrase = query.trim().to_lowercase();

        let mut candidates: Vec<Candidate> = self
            .entries
            .iter()
            .enumerate()
            .map(|(index, entry)| Candidate {
                index,
                score: score_entry(entry, &phrase, &terms),
            })
            .filter(|c| c.score > 0)
            .collect();

        // sort_by is stable, so equal scores stay in store order
        candidates.sort_by(|a, b| b.score.cmp(&a.score));
        candidates.truncate(limit);
        candidates
    }
}

fn score_entry(entry: &Entry, phrase: &str, terms: &[String]) -> u32 {
    let mut score = 0u32;

    let name_mentioned = entry
        .name
        .as_deref()
        .map(|name| phrase.contains(name))
        .unwrap_or(false);
    if entry.content.contains(phrase) || name_mentioned {
        score += EXACT_MATCH_WEIGHT;
    }

    let tag_hits = entry
        .tags
        .iter()
        .filter(|tag| terms.iter().any(|t| tag.contains(t.as_str())))
        .count() as u32;
    score += tag_hits * TAG_WEIGHT;

    if terms.iter().any(|t| entry.category.contains(t.as_str())) {
        score += CATEGORY_WEIGHT;
    }

    let occurrences: usize = terms
        .iter()
        .map(|t| entry.terms.get(t).copied().unwrap_or(0))
        .sum();
    score.saturating_add(occurrences.min(u32::MAX as usize) as u32)
}
