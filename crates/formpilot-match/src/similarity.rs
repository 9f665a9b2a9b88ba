//! Text similarity — normalization and the matching ladder.
//!
//! Two entry points over the same ladder: [`text_similarity`] yields a
//! graded score in `[0, 1]`, [`similar`] is a boolean with looser
//! acceptance thresholds. Both are symmetric in their arguments.

use std::collections::BTreeSet;

/// Token-overlap ratio above which [`similar`] accepts.
pub const TOKEN_OVERLAP_THRESHOLD: f64 = 0.3;
/// Char-overlap ratio above which [`similar`] accepts.
pub const CHAR_OVERLAP_THRESHOLD: f64 = 0.7;
/// Char-overlap ratio a graded score must exceed to count at all.
pub const CHAR_OVERLAP_SCORE_GATE: f64 = 0.6;

/// Lowercase and strip everything outside `[a-z0-9]`.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect()
}

/// Lowercased tokens split on non-alphanumeric runs, deduplicated.
pub fn tokenize(text: &str) -> BTreeSet<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Graded similarity between two strings, in `[0, 1]`.
///
/// Ladder: exact normalized match, substring either direction, token
/// overlap, then character overlap (halved, and only above the 0.6
/// gate). Empty input on either side scores 0.
pub fn text_similarity(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let na = normalize(a);
    let nb = normalize(b);

    if na == nb {
        return 1.0;
    }
    if na.contains(&nb) || nb.contains(&na) {
        return 0.8;
    }

    if let Some(ratio) = token_overlap(a, b) {
        return ratio;
    }

    if let Some(ratio) = char_overlap(&na, &nb) {
        if ratio > CHAR_OVERLAP_SCORE_GATE {
            // Character evidence is weak; halve it.
            return ratio * 0.5;
        }
    }

    0.0
}

/// Loose boolean similarity: same ladder as [`text_similarity`] but
/// accepts token overlap above 0.3 and char overlap above 0.7.
pub fn similar(a: &str, b: &str) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }

    let na = normalize(a);
    let nb = normalize(b);

    if na == nb {
        return true;
    }
    if na.contains(&nb) || nb.contains(&na) {
        return true;
    }

    // A token-overlap verdict is final, matching the graded ladder:
    // shared tokens below the threshold do not fall through to chars.
    if let Some(ratio) = token_overlap(a, b) {
        return ratio > TOKEN_OVERLAP_THRESHOLD;
    }

    matches!(char_overlap(&na, &nb), Some(ratio) if ratio > CHAR_OVERLAP_THRESHOLD)
}

/// Shared-token ratio over the larger token set; `None` when the
/// strings share no tokens.
fn token_overlap(a: &str, b: &str) -> Option<f64> {
    let ta = tokenize(a);
    let tb = tokenize(b);
    let common = ta.intersection(&tb).count();
    if common == 0 {
        return None;
    }
    Some(common as f64 / ta.len().max(tb.len()) as f64)
}

/// Distinct-character intersection over the longer normalized string;
/// `None` when no character is shared.
fn char_overlap(na: &str, nb: &str) -> Option<f64> {
    let ca: BTreeSet<char> = na.chars().collect();
    let cb: BTreeSet<char> = nb.chars().collect();
    let common = ca.intersection(&cb).count();
    if common == 0 {
        return None;
    }
    Some(common as f64 / na.len().max(nb.len()) as f64)
}
