//! Match engine — scores template fields against detected fields and
//! selects a destination per template field.

use formpilot_detect::DetectedField;
use formpilot_protocol::TemplateField;
use tracing::debug;

use crate::compat::is_compatible;
use crate::similarity::{similar, text_similarity};

/// Minimum score the best candidate must exceed to win outright.
pub const SCORE_THRESHOLD: f64 = 0.3;

/// Name-similarity floor for the last-resort fallback.
pub const NAME_FALLBACK_THRESHOLD: f64 = 0.5;

/// Score one (template field, detected field) pair.
///
/// Weighted sum of loose similarity against each identifying attribute,
/// type compatibility, the field's intrinsic confidence, graded name
/// similarity, presence bonuses, and a penalty for anonymous fields.
/// Clamped to `[0, 1]`.
pub fn match_score(template: &TemplateField, field: &DetectedField) -> f64 {
    let mut score = 0.0;

    if similar(&template.name, &field.name) {
        score += 0.4;
    }
    if similar(&template.name, &field.id) {
        score += 0.3;
    }
    if similar(&template.name, &field.placeholder) {
        score += 0.2;
    }
    if similar(&template.name, &field.label) {
        score += 0.4;
    }

    if is_compatible(&template.field_type, &field.control_type) {
        score += 0.2;
    }

    score += field.confidence * 0.1;
    score += text_similarity(&template.name, &field.name) * 0.3;

    if !field.id.is_empty() {
        score += 0.1;
    }
    if !field.name.is_empty() {
        score += 0.1;
    }
    if field.label.chars().count() > 3 {
        score += 0.1;
    }
    if field.name.is_empty() && field.id.is_empty() {
        score -= 0.2;
    }

    score.clamp(0.0, 1.0)
}

/// Pick the destination field for one template field.
///
/// Three-tier fallback, first tier that yields a result wins:
/// 1. Highest-scoring candidate, provided its score exceeds
///    [`SCORE_THRESHOLD`]. First of equal scores wins.
/// 2. First type-compatible candidate; when no candidate is
///    compatible, every candidate counts as compatible, so this tier
///    always succeeds on a non-empty list.
/// 3. First candidate whose name resembles the template field's name
///    above [`NAME_FALLBACK_THRESHOLD`].
///
/// Returns `None` only when every tier comes up empty, which the
/// caller reports as an unmatched field rather than aborting the fill.
pub fn select_match<'a>(
    template: &TemplateField,
    fields: &'a [DetectedField],
) -> Option<&'a DetectedField> {
    let mut best: Option<(&DetectedField, f64)> = None;
    for field in fields {
        let score = match_score(template, field);
        debug!(
            template = %template.name,
            candidate = %field.display_name(),
            score,
            "scored candidate"
        );
        if score > SCORE_THRESHOLD && best.map_or(true, |(_, s)| score > s) {
            best = Some((field, score));
        }
    }
    if let Some((field, score)) = best {
        debug!(
            template = %template.name,
            winner = %field.display_name(),
            score,
            "matched by score"
        );
        return Some(field);
    }

    let compatible: Vec<&DetectedField> = fields
        .iter()
        .filter(|f| is_compatible(&template.field_type, &f.control_type))
        .collect();
    let pool: Vec<&DetectedField> = if compatible.is_empty() {
        fields.iter().collect()
    } else {
        compatible
    };
    if let Some(&field) = pool.first() {
        debug!(
            template = %template.name,
            winner = %field.display_name(),
            "matched by type compatibility fallback"
        );
        return Some(field);
    }

    fields.iter().find(|f| {
        !f.name.is_empty() && text_similarity(&template.name, &f.name) > NAME_FALLBACK_THRESHOLD
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use formpilot_protocol::TemplateField;

    fn field(name: &str, id: &str, label: &str, control_type: &str) -> DetectedField {
        let mut f = DetectedField {
            node: 0,
            tag: if control_type == "select" {
                "select".into()
            } else {
                "input".into()
            },
            control_type: control_type.into(),
            name: name.into(),
            id: id.into(),
            placeholder: String::new(),
            label: label.into(),
            current_value: String::new(),
            selector: if !id.is_empty() {
                format!("#{id}")
            } else if !name.is_empty() {
                format!("[name=\"{name}\"]")
            } else {
                "input".into()
            },
            confidence: 0.0,
        };
        f.confidence = formpilot_detect::field_confidence(&f);
        f
    }

    #[test]
    fn test_email_field_matched_by_id_only() {
        // An id and a type alone are enough to clear the score
        // threshold with no name, placeholder, or label.
        let template = TemplateField::new("E-mail", "email", "a@b.com");
        let candidate = field("", "email", "", "email");

        let score = match_score(&template, &candidate);
        assert!(score >= 0.3, "score {score} below threshold");

        let fields = vec![field("nome", "nome", "Nome", "text"), candidate.clone()];
        let selected = select_match(&template, &fields).unwrap();
        assert_eq!(selected.id, "email");
    }

    #[test]
    fn test_score_clamped_to_unit_range() {
        let strong = TemplateField::new("email", "email", "a@b.com");
        let perfect = field("email", "email", "E-mail", "email");
        let score = match_score(&strong, &perfect);
        assert!(score <= 1.0);

        let anonymous = field("", "", "", "text");
        let unrelated = TemplateField::new("zzz", "select", "x");
        let low = match_score(&unrelated, &anonymous);
        assert!((0.0..=1.0).contains(&low));
    }

    #[test]
    fn test_first_wins_on_equal_scores() {
        let template = TemplateField::new("email", "email", "a@b.com");
        let twin_a = field("email", "email1", "", "email");
        let twin_b = field("email", "email1", "", "email");
        let fields = vec![twin_a, twin_b];

        let selected = select_match(&template, &fields).unwrap();
        assert!(std::ptr::eq(selected, &fields[0]));
    }

    #[test]
    fn test_label_bonus_counts_chars_not_bytes() {
        // "Não" is three characters (four bytes in UTF-8): no length
        // bonus. A four-character label earns exactly 0.1 more.
        let template = TemplateField::new("zzz", "text", "x");
        let short = field("campo", "", "Não", "text");
        let long = field("campo", "", "Nome", "text");

        let diff = match_score(&template, &long) - match_score(&template, &short);
        assert!((diff - 0.1).abs() < 1e-9, "bonus delta was {diff}");
    }

    #[test]
    fn test_compatibility_fallback_when_scores_low() {
        // No name/id/label resemblance anywhere: tier 1 fails, tier 2
        // picks the first type-compatible candidate.
        let template = TemplateField::new("zzzz", "select", "opt");
        let fields = vec![
            field("qqqq", "", "", "text"),
            field("", "", "", "select"),
        ];

        let selected = select_match(&template, &fields).unwrap();
        assert_eq!(selected.control_type, "select");
    }

    #[test]
    fn test_no_compatible_candidate_accepts_first() {
        let template = TemplateField::new("zzzz", "radio", "x");
        let fields = vec![field("qqqq", "", "", "text")];

        // No radio on the page: compatibility is treated as satisfied
        // by all, so the first candidate still wins.
        let selected = select_match(&template, &fields).unwrap();
        assert_eq!(selected.name, "qqqq");
    }

    #[test]
    fn test_empty_candidate_list_matches_nothing() {
        let template = TemplateField::new("email", "email", "a@b.com");
        assert!(select_match(&template, &[]).is_none());
    }
}
