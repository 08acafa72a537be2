//! TF-IDF term vectors and cosine similarity over the knowledge store.

use rayon::prelude::*;
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use crate::knowledge::KnowledgeStore;

static NON_WORD_RE: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"[^\w\s]").expect("non-word regex is valid"));

/// Sparse term → weight map. Absent terms weigh 0.
pub type SparseVector = HashMap<String, f32>;

/// Lowercase, replace punctuation with spaces, split on whitespace and keep
/// tokens longer than two characters.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    NON_WORD_RE
        .replace_all(&lowered, " ")
        .split_whitespace()
        .filter(|w| w.chars().count() > 2)
        .map(str::to_string)
        .collect()
}

/// Raw occurrence count per token.
pub fn term_counts(text: &str) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for token in tokenize(text) {
        *counts.entry(token).or_insert(0) += 1;
    }
    counts
}

pub struct LexicalIndex {
    idf: HashMap<String, f32>,
    item_vectors: Vec<SparseVector>,
}

impl LexicalIndex {
    /// Build vocabulary and IDF table over every item's content, then
    /// precompute each item's vector.
    pub fn build(store: &KnowledgeStore) -> Self {
        let items = store.get_all();
        let doc_terms: Vec<HashMap<String, usize>> = items
            .par_iter()
            .map(|item| term_counts(&item.content))
            .collect();

        let mut doc_freq: HashMap<&str, usize> = HashMap::new();
        for terms in &doc_terms {
            for term in terms.keys() {
                *doc_freq.entry(term.as_str()).or_insert(0) += 1;
            }
        }

        let total_docs = items.len() as f64;
        let idf: HashMap<String, f32> = doc_freq
            .into_iter()
            .map(|(term, df)| {
                // ln(N / (df + 1)) goes negative for a term present in every item;
                // clamp so all weights stay non-negative.
                let weight = (total_docs / (df as f64 + 1.0)).ln().max(0.0);
                (term.to_string(), weight as f32)
            })
            .collect();

        let item_vectors = doc_terms
            .par_iter()
            .map(|terms| weigh(terms, &idf))
            .collect();

        tracing::info!(
            items = items.len(),
            vocabulary = idf.len(),
            "Lexical index built"
        );

        Self { idf, item_vectors }
    }

    pub fn vocabulary_size(&self) -> usize {
        self.idf.len()
    }

    pub fn contains(&self, term: &str) -> bool {
        self.idf.contains_key(term)
    }

    /// IDF weight of a term; 0 for terms outside the vocabulary.
    pub fn idf(&self, term: &str) -> f32 {
        self.idf.get(term).copied().unwrap_or(0.0)
    }

    /// TF-IDF vector for arbitrary text. Out-of-vocabulary tokens are dropped.
    pub fn embed(&self, text: &str) -> SparseVector {
        weigh(&term_counts(text), &self.idf)
    }

    /// Precomputed vector of the item at `index` in store order.
    pub fn item_vector(&self, index: usize) -> Option<&SparseVector> {
        self.item_vectors.get(index)
    }

    pub fn similarity(&self, a: &SparseVector, b: &SparseVector) -> f32 {
        cosine_similarity(a, b)
    }
}

fn weigh(counts: &HashMap<String, usize>, idf: &HashMap<String, f32>) -> SparseVector {
    counts
        .iter()
        .filter_map(|(term, &tf)| {
            let weight = tf as f32 * idf.get(term).copied()?;
            (weight > 0.0).then(|| (term.clone(), weight))
        })
        .collect()
}

/// Cosine similarity clamped to [0, 1]. Returns 0 when either vector has zero norm.
pub fn cosine_similarity(a: &SparseVector, b: &SparseVector) -> f32 {
    let keys: HashSet<&String> = a.keys().chain(b.keys()).collect();

    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;
    for key in keys {
        let va = a.get(key).copied().unwrap_or(0.0) as f64;
        let vb = b.get(key).copied().unwrap_or(0.0) as f64;
        dot += va * vb;
        norm_a += va * va;
        norm_b += vb * vb;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    let sim = dot / (norm_a.sqrt() * norm_b.sqrt());
    if sim.is_finite() {
        sim.clamp(0.0, 1.0) as f32
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::Catalog;
    use crate::test_support::sample_store;

    #[test]
    fn test_tokenize_drops_short_and_punctuation() {
        assert_eq!(
            tokenize("What does the JACK F5 cost?"),
            vec!["what", "does", "the", "jack", "cost"]
        );
        assert!(tokenize("!!! ?? ...").is_empty());
        assert!(tokenize("").is_empty());
        assert_eq!(tokenize("₹22999 price"), vec!["22999", "price"]);
    }

    #[test]
    fn test_idf_formula() {
        let store = sample_store();
        let index = LexicalIndex::build(&store);
        let n = store.len() as f64;
        let df = store
            .get_all()
            .iter()
            .filter(|i| tokenize(&i.content).iter().any(|t| t == "warranty"))
            .count() as f64;
        let expected = (n / (df + 1.0)).ln().max(0.0) as f32;
        assert!((index.idf("warranty") - expected).abs() < 1e-5);
        assert_eq!(index.idf("zzzunknown"), 0.0);
    }

    #[test]
    fn test_similarity_bounds() {
        let store = sample_store();
        let index = LexicalIndex::build(&store);
        let texts = [
            "industrial lockstitch machine",
            "warranty coverage",
            "automatic needle threading buttonhole",
            "",
            "🙂🙂",
        ];
        for a in &texts {
            for b in &texts {
                let sim = index.similarity(&index.embed(a), &index.embed(b));
                assert!((0.0..=1.0).contains(&sim), "{} vs {} = {}", a, b, sim);
            }
        }
    }

    #[test]
    fn test_self_similarity_is_one() {
        let index = LexicalIndex::build(&sample_store());
        let v = index.embed("automatic thread trimmer");
        assert!(!v.is_empty());
        assert!((index.similarity(&v, &v) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_zero_vector_is_safe() {
        let index = LexicalIndex::build(&sample_store());
        let empty = index.embed("");
        assert!(empty.is_empty());
        let sim = index.similarity(&empty, &index.embed("anything at all"));
        assert_eq!(sim, 0.0);
        assert!(!sim.is_nan());
    }

    #[test]
    fn test_out_of_vocabulary_dropped() {
        let index = LexicalIndex::build(&sample_store());
        let v = index.embed("xylophone quux warranty");
        assert!(v.contains_key("warranty"));
        assert!(!v.contains_key("xylophone"));
    }

    #[test]
    fn test_item_vectors_precomputed() {
        let store = sample_store();
        let index = LexicalIndex::build(&store);
        for (i, item) in store.get_all().iter().enumerate() {
            assert_eq!(index.item_vector(i), Some(&index.embed(&item.content)));
        }
        assert!(index.item_vector(store.len()).is_none());
    }

    #[test]
    fn test_empty_store() {
        let store = KnowledgeStore::build_with(&Catalog::default(), &[], &[]);
        let index = LexicalIndex::build(&store);
        assert_eq!(index.vocabulary_size(), 0);
        assert!(index.embed("jack f5").is_empty());
    }
}
