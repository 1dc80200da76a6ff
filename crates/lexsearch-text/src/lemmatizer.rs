//! Lemmatizers backing the preprocessor.
//!
//! `LexiconLemmatizer` maps word forms to lemmas through a form->lemma table,
//! such as an export of the Sloleks morphological lexicon. `IdentityLemmatizer`
//! keeps every form as its own lemma; it is the fallback when no lexicon is
//! configured and a deterministic stand-in for tests.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tantivy::tokenizer::TextAnalyzer;

use lexsearch_core::config::Settings;
use lexsearch_core::error::Error;
use lexsearch_core::traits::Lemmatizer;
use lexsearch_core::types::{Sentence, Token};

use crate::tantivy_utils::{build_analyzer, tokenize_sentences};

pub struct IdentityLemmatizer {
    analyzer: TextAnalyzer,
}

impl IdentityLemmatizer {
    pub fn new() -> Self {
        Self { analyzer: build_analyzer() }
    }
}

impl Default for IdentityLemmatizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Lemmatizer for IdentityLemmatizer {
    fn id(&self) -> String {
        "identity".to_string()
    }

    fn analyze(&self, text: &str) -> Result<Vec<Sentence>> {
        Ok(tokenize_sentences(&self.analyzer, text)
            .into_iter()
            .map(|words| {
                words
                    .into_iter()
                    .map(|form| Token { lemma: form.clone(), form })
                    .collect()
            })
            .collect())
    }
}

pub struct LexiconLemmatizer {
    /// lowercased form -> lemma
    lemmas: HashMap<String, String>,
    digest: String,
    analyzer: TextAnalyzer,
}

impl LexiconLemmatizer {
    /// Load a tab-separated lexicon: `form<TAB>lemma[<TAB>anything...]` per
    /// line. Blank lines and lines starting with `#` are skipped. When a form
    /// is listed more than once the first lemma wins.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::io(path, e))
            .with_context(|| "failed to read lemma lexicon")?;
        let lemmatizer = Self::parse(&content)?;
        tracing::info!(path = %path.display(), forms = lemmatizer.len(), "loaded lemma lexicon");
        Ok(lemmatizer)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let mut entries = Vec::new();
        for (lineno, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') { continue; }
            let mut cols = line.split('\t');
            match (cols.next(), cols.next()) {
                (Some(form), Some(lemma)) if !form.trim().is_empty() && !lemma.trim().is_empty() => {
                    entries.push((form.trim().to_string(), lemma.trim().to_string()));
                }
                _ => {
                    return Err(Error::Lemmatizer(format!(
                        "lexicon line {}: expected form<TAB>lemma, got '{}'",
                        lineno + 1,
                        line
                    ))
                    .into())
                }
            }
        }
        Ok(Self::from_pairs(entries))
    }

    pub fn from_pairs<I, F, L>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (F, L)>,
        F: AsRef<str>,
        L: Into<String>,
    {
        let mut lemmas = HashMap::new();
        for (form, lemma) in pairs {
            lemmas.entry(form.as_ref().to_lowercase()).or_insert_with(|| lemma.into());
        }
        let digest = table_digest(&lemmas);
        Self { lemmas, digest, analyzer: build_analyzer() }
    }

    pub fn len(&self) -> usize {
        self.lemmas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lemmas.is_empty()
    }

    fn lemma_for(&self, form: &str) -> String {
        self.lemmas
            .get(&form.to_lowercase())
            .cloned()
            .unwrap_or_else(|| form.to_string())
    }
}

fn table_digest(lemmas: &HashMap<String, String>) -> String {
    let mut rows: Vec<(&String, &String)> = lemmas.iter().collect();
    rows.sort();
    let mut hasher = blake3::Hasher::new();
    for (form, lemma) in rows {
        hasher.update(form.as_bytes());
        hasher.update(b"\t");
        hasher.update(lemma.as_bytes());
        hasher.update(b"\n");
    }
    hasher.finalize().to_hex().to_string()
}

impl Lemmatizer for LexiconLemmatizer {
    fn id(&self) -> String {
        format!("lexicon:{}", &self.digest[..16])
    }

    fn analyze(&self, text: &str) -> Result<Vec<Sentence>> {
        Ok(tokenize_sentences(&self.analyzer, text)
            .into_iter()
            .map(|words| {
                words
                    .into_iter()
                    .map(|form| Token { lemma: self.lemma_for(&form), form })
                    .collect()
            })
            .collect())
    }
}

/// Pick the lemmatizer described by `settings`.
pub fn get_default_lemmatizer(settings: &Settings) -> Result<Arc<dyn Lemmatizer>> {
    match settings.lexicon_path() {
        Some(path) => Ok(Arc::new(LexiconLemmatizer::from_path(&path)?)),
        None => {
            tracing::warn!("no lemma lexicon configured, using word forms as lemmas");
            Ok(Arc::new(IdentityLemmatizer::new()))
        }
    }
}
