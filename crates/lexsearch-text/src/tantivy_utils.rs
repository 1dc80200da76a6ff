use tantivy::tokenizer::{SimpleTokenizer, TextAnalyzer, TokenStream};

/// Word analyzer shared by every lemmatizer.
///
/// `SimpleTokenizer` splits on anything that is not alphanumeric, so
/// punctuation never reaches the lemmatizer. Case is left untouched; the
/// preprocessor lowercases lemmas, not forms.
pub fn build_analyzer() -> TextAnalyzer {
	TextAnalyzer::builder(SimpleTokenizer::default()).build()
}

fn is_sentence_break(c: char) -> bool {
	matches!(c, '.' | '!' | '?' | '\n' | '\r')
}

/// Split `text` into sentences of word forms, in order. Sentences without
/// any word are dropped.
pub fn tokenize_sentences(analyzer: &TextAnalyzer, text: &str) -> Vec<Vec<String>> {
	let mut analyzer = analyzer.clone();
	let mut sentences = Vec::new();
	for chunk in text.split(is_sentence_break) {
		let mut words = Vec::new();
		let mut stream = analyzer.token_stream(chunk);
		while stream.advance() { words.push(stream.token().text.clone()); }
		if !words.is_empty() { sentences.push(words); }
	}
	sentences
}
