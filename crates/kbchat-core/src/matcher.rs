//! Ranks knowledge-base entries against a free-text query.

use crate::knowledge::Entry;
use crate::similarity::similarity;
use crate::text::normalize;

/// Minimum combined score for a similarity match to be accepted.
pub const MATCH_THRESHOLD: f64 = 0.45;

const QUESTION_WEIGHT: f64 = 1.2;
const ANSWER_WEIGHT: f64 = 0.9;
const TAG_WEIGHT: f64 = 1.0;

/// How [`find_best_answer`] arrived at its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// Best combined score cleared [`MATCH_THRESHOLD`].
    Similarity,
    /// No score cleared the threshold, but a query token occurs in the entry's question.
    /// The score is reported as exactly `0.0`.
    KeywordFallback,
    /// Nothing qualified; the score is the best combined score seen.
    NoMatch,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BestAnswer<'a> {
    pub entry: Option<&'a Entry>,
    pub score: f64,
    pub kind: MatchKind,
}

/// Weighted score of one entry: `max(question * 1.2, answer * 0.9, best tag * 1.0)`.
///
/// Not clamped; an exact question match scores 1.2.
pub fn combined_score(normalized_query: &str, entry: &Entry) -> f64 {
    let s_q = similarity(normalized_query, &normalize(&entry.question));
    let s_a = similarity(normalized_query, &normalize(&entry.answer));
    let s_t = entry
        .tags
        .iter()
        .map(|tag| similarity(normalized_query, &normalize(tag)))
        .fold(0.0, f64::max);
    (s_q * QUESTION_WEIGHT)
        .max(s_a * ANSWER_WEIGHT)
        .max(s_t * TAG_WEIGHT)
}

/// Finds the entry that best answers `query`.
///
/// The highest combined score wins, earliest entry on ties. Below the threshold,
/// the first entry (in store order) whose normalized question contains any
/// query token is returned with score `0.0`.
pub fn find_best_answer<'a>(entries: &'a [Entry], query: &str) -> BestAnswer<'a> {
    let query = normalize(query);

    let mut best: Option<&Entry> = None;
    let mut best_score = 0.0;
    for entry in entries {
        let score = combined_score(&query, entry);
        if score > best_score {
            best_score = score;
            best = Some(entry);
        }
    }

    if best_score >= MATCH_THRESHOLD {
        return BestAnswer {
            entry: best,
            score: best_score,
            kind: MatchKind::Similarity,
        };
    }

    if let Some(entry) = keyword_fallback(entries, &query) {
        return BestAnswer {
            entry: Some(entry),
            score: 0.0,
            kind: MatchKind::KeywordFallback,
        };
    }

    BestAnswer {
        entry: None,
        score: best_score,
        kind: MatchKind::NoMatch,
    }
}

/// First entry whose normalized question contains one of the query's tokens.
fn keyword_fallback<'a>(entries: &'a [Entry], normalized_query: &str) -> Option<&'a Entry> {
    entries.iter().find(|entry| {
        let question = normalize(&entry.question);
        normalized_query
            .split_whitespace()
            .any(|token| question.contains(token))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::default_entries;

    #[test]
    fn exact_question_scores_question_weight() {
        let kb = default_entries();
        let best = find_best_answer(&kb, "What is Python used for?");
        assert_eq!(best.entry, Some(&kb[0]));
        assert_eq!(best.score, 1.2);
        assert_eq!(best.kind, MatchKind::Similarity);
    }

    #[test]
    fn tag_match_selects_docker() {
        let kb = default_entries();
        let best = find_best_answer(&kb, "docker");
        assert_eq!(best.entry.map(|e| e.question.as_str()), Some("What is Docker and why use it?"));
        assert_eq!(best.score, 1.0);
    }

    #[test]
    fn query_is_normalized_before_scoring() {
        let kb = default_entries();
        let best = find_best_answer(&kb, "   WHAT is   python USED for? ");
        assert_eq!(best.entry, Some(&kb[0]));
        assert_eq!(best.score, 1.2);
    }

    #[test]
    fn weak_but_passing_match() {
        let kb = default_entries();
        let best = find_best_answer(&kb, "git tips");
        assert_eq!(best.entry, Some(&kb[2]));
        assert!(best.score >= MATCH_THRESHOLD && best.score < 0.6);
    }

    #[test]
    fn empty_store_returns_nothing() {
        let best = find_best_answer(&[], "anything");
        assert_eq!(best.entry, None);
        assert_eq!(best.score, 0.0);
        assert_eq!(best.kind, MatchKind::NoMatch);
    }

    #[test]
    fn keyword_fallback_returns_first_containing_question_with_zero_score() {
        let kb = default_entries();
        // "on" occurs inside "python", which is the first question in store order
        let best = find_best_answer(&kb, "Tell me about the weather on Mars");
        assert_eq!(best.entry, Some(&kb[0]));
        assert_eq!(best.score, 0.0);
        assert_eq!(best.kind, MatchKind::KeywordFallback);
    }

    #[test]
    fn fallback_is_first_match_not_best_match() {
        let kb = vec![
            Entry::new("where is the office", "first"),
            Entry::new("office hours and office location", "second"),
        ];
        let best = find_best_answer(&kb, "xq office zzzzzzzzzzzzzzzzzz");
        assert_eq!(best.kind, MatchKind::KeywordFallback);
        assert_eq!(best.entry.map(|e| e.answer.as_str()), Some("first"));
    }

    #[test]
    fn no_match_reports_best_score_seen() {
        let kb = default_entries();
        let best = find_best_answer(&kb, "zzz qqq");
        assert_eq!(best.entry, None);
        assert_eq!(best.kind, MatchKind::NoMatch);
        assert!(best.score > 0.0 && best.score < MATCH_THRESHOLD);
    }

    #[test]
    fn empty_query_is_scored_without_error() {
        let kb = default_entries();
        let best = find_best_answer(&kb, "   ");
        assert_eq!(best.entry, None);
        assert_eq!(best.score, 0.0);
    }

    #[test]
    fn ties_keep_the_earliest_entry() {
        let kb = vec![
            Entry::new("same question", "one"),
            Entry::new("same question", "two"),
        ];
        let best = find_best_answer(&kb, "same question");
        assert_eq!(best.entry.map(|e| e.answer.as_str()), Some("one"));
    }

    #[test]
    fn answer_and_tag_weights() {
        let entry = Entry::new("unrelated", "kubernetes").with_tags(["helm"]);
        assert_eq!(combined_score("kubernetes", &entry), 0.9);
        assert_eq!(combined_score("helm", &entry), 1.0);
        assert_eq!(combined_score("helm", &Entry::new("q", "a")), 0.0);
    }
}
