pub mod cache;
pub mod keyword;
pub mod lexical;

pub use cache::{normalize_query, RetrievalCache};
pub use keyword::{query_terms, Candidate, KeywordFilter};
pub use lexical::{cosine_similarity, tokenize, LexicalIndex, SparseVector};
