use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

use lexsearch_cli::get_relevant_results;
use lexsearch_core::config::Settings;
use lexsearch_text::{LexiconLemmatizer, Preprocessor, StopWords};

const CORPUS: &str = r#"
cleni:
  - id_elementa: clen_1
    poglavje:
      naslov: Splošne določbe
    naslov: Predmet urejanja
    vsebina: Ta uredba določa pravila za umetno inteligenco.
  - id_elementa: clen_2
    poglavje:
      naslov: Končne določbe
    naslov: Začetek veljavnosti in uporaba
    vsebina: Uredba začne veljati dvajseti dan po objavi.
tocke:
  - id_elementa: tocka_1
    vsebina: Pravica do zasebnosti je temeljna pravica.
"#;

fn fixture() -> (TempDir, Settings, Preprocessor) {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("ai_act.yaml"), CORPUS).unwrap();
    let settings = Settings::default().rebase(tmp.path());
    let lexicon = LexiconLemmatizer::from_pairs([
        ("umetno", "umeten"),
        ("umetna", "umeten"),
        ("inteligenco", "inteligenca"),
    ]);
    let pre = Preprocessor::new(Arc::new(lexicon), StopWords::slovene());
    (tmp, settings, pre)
}

fn run(settings: &Settings, pre: &Preprocessor, query: Option<&str>, top_n: Option<usize>) -> String {
    let mut out = Vec::new();
    get_relevant_results(settings, pre, query, top_n, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn default_query_lists_every_unit_with_entry_into_force_first() {
    let (_tmp, settings, pre) = fixture();
    let text = run(&settings, &pre, None, None);
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines[0], "Relevantne enote:");
    assert_eq!(lines.len(), 4);
    assert!(lines[1].starts_with("clen_2 s podobnostjo "), "{text}");
}

#[test]
fn explicit_query_and_top_n() {
    let (_tmp, settings, pre) = fixture();
    let text = run(&settings, &pre, Some("umetna inteligenca"), Some(1));
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[1].starts_with("clen_1 s podobnostjo "), "{text}");
}

#[test]
fn configured_top_n_applies_when_none_is_given() {
    let (_tmp, mut settings, pre) = fixture();
    settings.search.top_n = Some(2);
    assert_eq!(run(&settings, &pre, None, None).lines().count(), 3);
    assert_eq!(run(&settings, &pre, None, Some(0)).lines().count(), 1);
}

#[test]
fn unknown_terms_print_zero_scores_in_corpus_order() {
    let (_tmp, settings, pre) = fixture();
    let text = run(&settings, &pre, Some("popolnoma neznano"), None);
    assert_eq!(
        text,
        "Relevantne enote:\nclen_1 s podobnostjo 0.0\nclen_2 s podobnostjo 0.0\ntocka_1 s podobnostjo 0.0\n"
    );
}

#[test]
fn missing_corpus_is_an_error() {
    let tmp = TempDir::new().unwrap();
    let settings = Settings::default().rebase(tmp.path());
    let pre = Preprocessor::new(Arc::new(LexiconLemmatizer::from_pairs(Vec::<(&str, &str)>::new())), StopWords::slovene());
    let mut out = Vec::new();
    assert!(get_relevant_results(&settings, &pre, None, None, &mut out).is_err());
    assert!(out.is_empty());
}
