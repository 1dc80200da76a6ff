//! lexsearch-text
//!
//! Linguistic preprocessing: tantivy-based tokenization, lemmatizers, the
//! stopword set and the `Preprocessor` that turns raw text into the lemma
//! stream the vectorizer indexes.

pub mod lemmatizer;
pub mod preprocess;
pub mod stopwords;
pub mod tantivy_utils;

pub use lemmatizer::{get_default_lemmatizer, IdentityLemmatizer, LexiconLemmatizer};
pub use preprocess::Preprocessor;
pub use stopwords::StopWords;
