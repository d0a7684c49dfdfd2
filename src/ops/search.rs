use crate::model::item::Item;

/// Score awarded when the pattern appears verbatim inside the text
const SUBSTRING_SCORE: f64 = 0.8;
/// Weight applied to subsequence matches
const SUBSEQUENCE_WEIGHT: f64 = 0.6;
/// Added to any non-zero subsequence score
const SUBSEQUENCE_BONUS: f64 = 0.05;
/// Subsequence scores below this are discarded
const SCORE_FLOOR: f64 = 0.3;
/// Results must score strictly above this to be returned
const RESULT_THRESHOLD: f64 = 0.3;

/// A ranked search hit
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// Position of the item in the outline
    pub index: usize,
    pub score: f64,
}

/// Case-insensitive fuzzy similarity in `[0, 1]`.
///
/// Equal strings score 1.0 and a substring scores a flat 0.8. Otherwise the
/// pattern must appear in the text as an in-order subsequence, scored by how
/// much of the text it covers; weak matches below 0.3 are dropped to 0.
pub fn fuzzy_score(pattern: &str, text: &str) -> f64 {
    let pattern = pattern.to_lowercase();
    let text = text.to_lowercase();

    if pattern == text {
        return 1.0;
    }
    if pattern.is_empty() || text.is_empty() {
        return 0.0;
    }
    if text.contains(&pattern) {
        return SUBSTRING_SCORE;
    }

    let pattern_chars: Vec<char> = pattern.chars().collect();
    let mut matched = 0;
    for c in text.chars() {
        if pattern_chars.get(matched) == Some(&c) {
            matched += 1;
        }
    }
    if matched < pattern_chars.len() {
        return 0.0;
    }

    let pattern_len = pattern_chars.len() as f64;
    let text_len = text.chars().count() as f64;
    let mut score = (matched as f64 / pattern_len) * (pattern_len / text_len) * SUBSEQUENCE_WEIGHT;
    if score > 0.0 {
        score += SUBSEQUENCE_BONUS;
    }
    if score < SCORE_FLOOR { 0.0 } else { score }
}

/// Rank outline items against one or more query terms.
///
/// Each item is scored against all terms joined by a space, then against
/// each non-blank term alone; the best of those scores is kept. Results are
/// sorted by descending score, ties keeping outline order.
pub fn search(items: &[Item], queries: &[String]) -> Vec<SearchResult> {
    if queries.is_empty() {
        return Vec::new();
    }
    let combined = queries.join(" ");

    let mut results: Vec<SearchResult> = items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| {
            let text = item.text();
            let mut score = fuzzy_score(&combined, text);
            for query in queries.iter().filter(|q| !q.trim().is_empty()) {
                let term_score = fuzzy_score(query, text);
                if term_score > score {
                    score = term_score;
                }
            }
            (score > RESULT_THRESHOLD).then_some(SearchResult { index, score })
        })
        .collect();

    results.sort_by(|a, b| b.score.total_cmp(&a.score));
    log::debug!("search {:?}: {} hit(s)", combined, results.len());
    results
}
