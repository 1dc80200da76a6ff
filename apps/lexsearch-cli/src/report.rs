use std::fmt::Write;

use lexsearch_core::types::SearchHit;

pub const HEADING: &str = "Relevantne enote:";

/// Render ranked hits as console text, best first.
///
/// Scores use the shortest representation that round-trips, so `0.0` stays
/// `0.0` rather than `0`.
pub fn format_results(hits: &[SearchHit]) -> String {
    let mut out = String::with_capacity(HEADING.len() + 1 + hits.len() * 48);
    out.push_str(HEADING);
    out.push('\n');
    for hit in hits {
        // Writing into a String cannot fail
        let _ = writeln!(out, "{} s podobnostjo {:?}", hit.id, hit.score);
    }
    out
}
