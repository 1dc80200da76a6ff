use anyhow::Result;
use std::collections::HashSet;
use std::path::Path;

use lexsearch_core::error::Error;

const SLOVENE: &str = include_str!("../data/stopwords_sl.txt");

/// Lowercased stopword set matched against lowercased lemmas.
#[derive(Debug, Clone)]
pub struct StopWords {
    words: HashSet<String>,
    digest: String,
}

impl StopWords {
    /// The bundled Slovene list.
    pub fn slovene() -> Self {
        Self::parse(SLOVENE)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let stopwords = Self::parse(&content);
        tracing::info!(path = %path.display(), words = stopwords.len(), "loaded stopwords");
        Ok(stopwords)
    }

    /// One word per line; blank lines and `#` comments are ignored.
    pub fn parse(content: &str) -> Self {
        Self::from_words(
            content
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty() && !l.starts_with('#')),
        )
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words: HashSet<String> = words.into_iter().map(|w| w.as_ref().to_lowercase()).collect();
        let mut sorted: Vec<&String> = words.iter().collect();
        sorted.sort();
        let mut hasher = blake3::Hasher::new();
        for w in sorted {
            hasher.update(w.as_bytes());
            hasher.update(b"\n");
        }
        let digest = hasher.finalize().to_hex().to_string();
        Self { words, digest }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn id(&self) -> String {
        format!("stopwords:{}", &self.digest[..16])
    }
}
