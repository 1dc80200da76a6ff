use anyhow::Result;
use std::sync::Arc;

use lexsearch_core::config::Settings;
use lexsearch_core::traits::Lemmatizer;

use crate::lemmatizer::get_default_lemmatizer;
use crate::stopwords::StopWords;

/// Turns free text into a space-joined stream of lowercase lemmas.
///
/// A lemma survives when it is entirely alphabetic or entirely numeric and
/// its lowercase form is not a stopword. Output order is sentence order, then
/// token order within each sentence. Text with no surviving lemma becomes the
/// empty string.
pub struct Preprocessor {
    lemmatizer: Arc<dyn Lemmatizer>,
    stopwords: StopWords,
}

impl Preprocessor {
    pub fn new(lemmatizer: Arc<dyn Lemmatizer>, stopwords: StopWords) -> Self {
        Self { lemmatizer, stopwords }
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let lemmatizer = get_default_lemmatizer(settings)?;
        let stopwords = match settings.stopwords_path() {
            Some(path) => StopWords::from_path(&path)?,
            None => StopWords::slovene(),
        };
        Ok(Self::new(lemmatizer, stopwords))
    }

    /// Identity of the whole pipeline; recorded with cached vector spaces.
    pub fn id(&self) -> String {
        format!("{}+{}", self.lemmatizer.id(), self.stopwords.id())
    }

    pub fn stopwords(&self) -> &StopWords {
        &self.stopwords
    }

    pub fn preprocess(&self, text: &str) -> Result<String> {
        if text.trim().is_empty() {
            return Ok(String::new());
        }
        let mut tokens = Vec::new();
        for sentence in self.lemmatizer.analyze(text)? {
            for token in sentence {
                if !is_indexable(&token.lemma) { continue; }
                let lemma = token.lemma.to_lowercase();
                if self.stopwords.contains(&lemma) { continue; }
                tokens.push(lemma);
            }
        }
        Ok(tokens.join(" "))
    }
}

/// A lemma is indexed when it is all letters or all digits.
///
/// Letter number characters (Roman numerals such as `Ⅻ`) count as neither,
/// and neither do vulgar fractions. Other numeric symbols (`²`, `①`) count as
/// digits.
pub fn is_indexable(lemma: &str) -> bool {
    !lemma.is_empty() && (lemma.chars().all(is_letter) || lemma.chars().all(is_digit))
}

fn is_letter(c: char) -> bool {
    c.is_alphabetic() && !c.is_numeric()
}

fn is_digit(c: char) -> bool {
    c.is_numeric() && !c.is_alphabetic() && !is_vulgar_fraction(c)
}

fn is_vulgar_fraction(c: char) -> bool {
    matches!(c, '\u{BC}'..='\u{BE}' | '\u{2150}'..='\u{215F}' | '\u{2189}')
}
