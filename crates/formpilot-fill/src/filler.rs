//! Filler — writes one value into one control, kind by kind.
//!
//! Every write follows the same envelope: focus the element, mutate its
//! state per control kind, dispatch input/change/blur so host-page
//! validation fires, then pause for the settle delay. Kind-specific
//! quirks (option lookup, boolean coercion, radio group walks, value
//! post-processing) live in private helpers below.

use std::time::Duration;

use chrono::NaiveDate;
use formpilot_core::{EngineConfig, Result};
use formpilot_detect::{resolve_label, DetectedField};
use formpilot_dom::{EventKind, NodeId, Page, SelectOption};
use tracing::debug;

/// Values coerced to a checked checkbox.
pub const TRUE_WORDS: &[&str] = &[
    "true",
    "1",
    "sim",
    "yes",
    "on",
    "verdadeiro",
    "check",
    "checked",
];

/// Values coerced to an unchecked checkbox.
pub const FALSE_WORDS: &[&str] = &[
    "false",
    "0",
    "não",
    "no",
    "off",
    "falso",
    "uncheck",
    "unchecked",
];

/// Date layouts accepted before reformatting to ISO `%Y-%m-%d`.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%m/%d/%Y", "%Y/%m/%d"];

/// Writes template values into page controls.
pub struct Filler {
    settle_delay_ms: u64,
}

impl Filler {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            settle_delay_ms: config.settle_delay_ms,
        }
    }

    /// Fill one detected field with `value`.
    ///
    /// Focuses the element, applies the kind-specific write, dispatches
    /// the bubbling input/change/blur triple on it, then waits out the
    /// settle delay so the host page can react before the next field.
    pub async fn fill(&self, page: &mut Page, field: &DetectedField, value: &str) -> Result<()> {
        debug!(
            field = %field.display_name(),
            kind = %field.control_type,
            value,
            "filling field"
        );
        page.focus(field.node);

        if field.tag == "select" {
            fill_select(page, field.node, value);
        } else if field.control_type == "checkbox" {
            fill_checkbox(page, field.node, value);
        } else if field.control_type == "radio" {
            fill_radio(page, field.node, value);
        } else {
            fill_input(page, field.node, value);
        }

        page.dispatch(field.node, EventKind::Input);
        page.dispatch(field.node, EventKind::Change);
        page.dispatch(field.node, EventKind::Blur);

        if self.settle_delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.settle_delay_ms)).await;
        }
        Ok(())
    }
}

// -------------------------------------------------------------------
// Select
// -------------------------------------------------------------------

fn fill_select(page: &mut Page, node: NodeId, value: &str) {
    let options = page.options(node).to_vec();

    let found = if value.contains(',') {
        // Ranked candidate list: first candidate with any match wins.
        value
            .split(',')
            .map(str::trim)
            .find_map(|candidate| find_option(&options, candidate))
    } else {
        // Exact match on value or trimmed text first, then substring.
        options
            .iter()
            .find(|o| o.value == value || o.text.trim() == value)
            .or_else(|| {
                let lower = value.to_lowercase();
                options.iter().find(|o| {
                    o.value.to_lowercase().contains(&lower)
                        || o.text.to_lowercase().contains(&lower)
                })
            })
    };

    if let Some(option) = found {
        let chosen = option.value.clone();
        page.set_select_value(node, &chosen);
        debug!(node, option = %chosen, "select option matched");
        page.dispatch(node, EventKind::Change);
        return;
    }

    // No match: take the raw value when it is itself a valid option.
    if page.set_select_value(node, value) {
        debug!(node, value, "select value assigned directly");
        return;
    }

    // One more substring pass against the raw value (matters for the
    // ranked-list path, where substrings were only tried per candidate).
    let lower = value.to_lowercase();
    let partial = options.iter().find(|o| {
        o.value.to_lowercase().contains(&lower) || o.text.to_lowercase().contains(&lower)
    });
    if let Some(option) = partial {
        let chosen = option.value.clone();
        page.set_select_value(node, &chosen);
        debug!(node, option = %chosen, "select partial match on raw value");
        return;
    }

    // Last resort: synthesize an option so the value sticks.
    page.add_option(node, value, value);
    page.set_select_value(node, value);
    debug!(node, value, "select option synthesized");
}

/// Case-insensitive option lookup: exact value, exact trimmed text,
/// then substring on either.
fn find_option<'a>(options: &'a [SelectOption], candidate: &str) -> Option<&'a SelectOption> {
    let lower = candidate.to_lowercase();
    options.iter().find(|o| {
        o.value.to_lowercase() == lower
            || o.text.trim().to_lowercase() == lower
            || o.value.to_lowercase().contains(&lower)
            || o.text.to_lowercase().contains(&lower)
    })
}

// -------------------------------------------------------------------
// Checkbox
// -------------------------------------------------------------------

fn fill_checkbox(page: &mut Page, node: NodeId, value: &str) {
    let checked = parse_boolean(value);
    page.set_checked(node, checked);
    debug!(node, checked, "checkbox written");
    page.dispatch(node, EventKind::Change);
}

/// Coerce a template value to a checkbox state.
///
/// Portuguese and English affirmatives check, negatives uncheck,
/// positive numbers check, everything else unchecks.
pub fn parse_boolean(value: &str) -> bool {
    let lower = value.trim().to_lowercase();
    if TRUE_WORDS.contains(&lower.as_str()) {
        return true;
    }
    if FALSE_WORDS.contains(&lower.as_str()) {
        return false;
    }
    if let Ok(num) = lower.parse::<f64>() {
        return num > 0.0;
    }
    false
}

// -------------------------------------------------------------------
// Radio
// -------------------------------------------------------------------

fn fill_radio(page: &mut Page, node: NodeId, value: &str) {
    let Some(name) = page.attr(node, "name").map(str::to_string) else {
        debug!(node, "radio without a name, cannot fill");
        return;
    };
    if name.is_empty() {
        debug!(node, "radio without a name, cannot fill");
        return;
    }

    let group = page.radio_group(&name);
    let candidates: Vec<String> = if value.contains(',') {
        value.split(',').map(|v| v.trim().to_string()).collect()
    } else {
        vec![value.to_string()]
    };

    // Ranked candidates against each radio's value and resolved label.
    for candidate in &candidates {
        let lower = candidate.to_lowercase();
        for &radio in &group {
            let radio_value = page.attr(radio, "value").unwrap_or("").to_string();
            let radio_text = resolve_label(page, radio);
            if radio_value == *candidate
                || radio_text.to_lowercase().contains(&lower)
                || (!radio_value.is_empty() && lower.contains(&radio_value.to_lowercase()))
            {
                check_radio(page, &group, radio);
                debug!(node = radio, candidate = %candidate, "radio selected");
                return;
            }
        }
    }

    // Nothing matched: fall back to the first radio in the group.
    if let Some(&first) = group.first() {
        check_radio(page, &group, first);
        debug!(node = first, "radio fallback to first in group");
    }
}

/// Check one radio and uncheck the rest of its group, mirroring native
/// mutual exclusion.
fn check_radio(page: &mut Page, group: &[NodeId], chosen: NodeId) {
    for &radio in group {
        page.set_checked(radio, radio == chosen);
    }
    page.dispatch(chosen, EventKind::Change);
}

// -------------------------------------------------------------------
// Generic inputs
// -------------------------------------------------------------------

fn fill_input(page: &mut Page, node: NodeId, value: &str) {
    let control_type = page.attr(node, "type").unwrap_or("").to_string();

    // Time inputs only accept HH:MM shaped values; anything else
    // leaves the field untouched.
    if control_type == "time" && !value.contains(':') {
        debug!(node, value, "time value without colon, skipping write");
        return;
    }

    page.set_value(node, "");

    let written = match control_type.as_str() {
        "date" => reformat_date(value),
        "number" => reformat_number(value),
        _ => None,
    };
    match written {
        Some(formatted) => page.set_value(node, &formatted),
        None => page.set_value(node, value),
    }
}

/// Reformat to ISO `%Y-%m-%d` when the value parses as a date.
fn reformat_date(value: &str) -> Option<String> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        .map(|date| date.format("%Y-%m-%d").to_string())
}

/// Normalize numeric text: integers lose their decimal point, anything
/// unparseable or non-finite is written as-is.
fn reformat_number(value: &str) -> Option<String> {
    let num: f64 = value.trim().parse().ok()?;
    if !num.is_finite() {
        return None;
    }
    if num.fract() == 0.0 && num.abs() < i64::MAX as f64 {
        Some(format!("{}", num as i64))
    } else {
        Some(num.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formpilot_dom::Element;

    fn filler() -> Filler {
        Filler::new(&EngineConfig::immediate())
    }

    fn detected(page: &Page, node: NodeId) -> DetectedField {
        formpilot_detect::analyze(page, node)
    }

    #[tokio::test]
    async fn test_select_matches_option_text() {
        let mut page = Page::new();
        let select = page.append_element(
            page.body(),
            Element::new("select")
                .attr("name", "pais")
                .option("BR", "Brasil")
                .option("US", "Estados Unidos"),
        );

        let field = detected(&page, select);
        filler().fill(&mut page, &field, "Brasil").await.unwrap();

        assert_eq!(page.value(select), "BR");
        assert!(page.events_for(select).contains(&EventKind::Change));
    }

    #[tokio::test]
    async fn test_select_ranked_candidates_first_match_wins() {
        let mut page = Page::new();
        let select = page.append_element(
            page.body(),
            Element::new("select")
                .attr("name", "plano")
                .option("mensal", "Mensal")
                .option("anual", "Anual"),
        );

        let field = detected(&page, select);
        filler()
            .fill(&mut page, &field, "anual, mensal")
            .await
            .unwrap();

        assert_eq!(page.value(select), "anual");
    }

    #[tokio::test]
    async fn test_select_synthesizes_missing_option() {
        let mut page = Page::new();
        let select = page.append_element(
            page.body(),
            Element::new("select").attr("name", "uf").option("SP", "São Paulo"),
        );

        let field = detected(&page, select);
        filler().fill(&mut page, &field, "ZZ").await.unwrap();

        assert_eq!(page.value(select), "ZZ");
        assert!(page.options(select).iter().any(|o| o.value == "ZZ"));
    }

    #[tokio::test]
    async fn test_checkbox_lexicon() {
        let mut page = Page::new();
        let cb = page.append_element(
            page.body(),
            Element::new("input").attr("type", "checkbox").attr("name", "aceite"),
        );
        let field = detected(&page, cb);
        let filler = filler();

        filler.fill(&mut page, &field, "sim").await.unwrap();
        assert!(page.checked(cb));

        filler.fill(&mut page, &field, "não").await.unwrap();
        assert!(!page.checked(cb));

        // Unrecognized words default to unchecked.
        filler.fill(&mut page, &field, "talvez").await.unwrap();
        assert!(!page.checked(cb));
    }

    #[test]
    fn test_parse_boolean_numbers() {
        assert!(parse_boolean("2"));
        assert!(parse_boolean("0.5"));
        assert!(!parse_boolean("0"));
        assert!(!parse_boolean("-3"));
        assert!(!parse_boolean(""));
    }

    #[tokio::test]
    async fn test_radio_ranked_candidates() {
        let mut page = Page::new();
        let mensal = page.append_element(
            page.body(),
            Element::new("input")
                .attr("type", "radio")
                .attr("name", "plano")
                .attr("value", "mensal"),
        );
        let anual = page.append_element(
            page.body(),
            Element::new("input")
                .attr("type", "radio")
                .attr("name", "plano")
                .attr("value", "anual"),
        );
        page.set_checked(mensal, true);

        let field = detected(&page, mensal);
        filler()
            .fill(&mut page, &field, "anual, mensal")
            .await
            .unwrap();

        assert!(page.checked(anual));
        assert!(!page.checked(mensal));
    }

    #[tokio::test]
    async fn test_radio_matches_by_label() {
        let mut page = Page::new();
        let label = page.append_element(page.body(), Element::new("label"));
        let radio = page.append_element(
            label,
            Element::new("input")
                .attr("type", "radio")
                .attr("name", "sexo")
                .attr("value", "f"),
        );
        page.append_text(label, "Feminino");

        let field = detected(&page, radio);
        filler().fill(&mut page, &field, "Feminino").await.unwrap();

        assert!(page.checked(radio));
    }

    #[tokio::test]
    async fn test_radio_falls_back_to_first() {
        let mut page = Page::new();
        let first = page.append_element(
            page.body(),
            Element::new("input")
                .attr("type", "radio")
                .attr("name", "opt")
                .attr("value", "a"),
        );
        page.append_element(
            page.body(),
            Element::new("input")
                .attr("type", "radio")
                .attr("name", "opt")
                .attr("value", "b"),
        );

        let field = detected(&page, first);
        filler().fill(&mut page, &field, "zzz").await.unwrap();

        assert!(page.checked(first));
    }

    #[tokio::test]
    async fn test_unnamed_radio_left_untouched() {
        let mut page = Page::new();
        let radio = page.append_element(
            page.body(),
            Element::new("input").attr("type", "radio").attr("value", "x"),
        );

        let field = detected(&page, radio);
        filler().fill(&mut page, &field, "x").await.unwrap();

        assert!(!page.checked(radio));
    }

    #[tokio::test]
    async fn test_input_event_envelope() {
        let mut page = Page::new();
        let input = page.append_element(
            page.body(),
            Element::new("input").attr("type", "text").attr("name", "nome"),
        );

        let field = detected(&page, input);
        filler().fill(&mut page, &field, "Ana").await.unwrap();

        assert_eq!(page.value(input), "Ana");
        assert_eq!(
            page.events_for(input),
            vec![
                EventKind::Focus,
                EventKind::Input,
                EventKind::Change,
                EventKind::Blur
            ]
        );
    }

    #[tokio::test]
    async fn test_date_reformatted_to_iso() {
        let mut page = Page::new();
        let input = page.append_element(
            page.body(),
            Element::new("input").attr("type", "date").attr("name", "nascimento"),
        );

        let field = detected(&page, input);
        let filler = filler();

        filler.fill(&mut page, &field, "15/03/1990").await.unwrap();
        assert_eq!(page.value(input), "1990-03-15");

        // Unparseable dates are written as-is.
        filler.fill(&mut page, &field, "amanhã").await.unwrap();
        assert_eq!(page.value(input), "amanhã");
    }

    #[tokio::test]
    async fn test_time_without_colon_leaves_field_unchanged() {
        let mut page = Page::new();
        let input = page.append_element(
            page.body(),
            Element::new("input")
                .attr("type", "time")
                .attr("name", "hora")
                .value("09:00"),
        );

        let field = detected(&page, input);
        let filler = filler();

        filler.fill(&mut page, &field, "1430").await.unwrap();
        assert_eq!(page.value(input), "09:00");

        filler.fill(&mut page, &field, "14:30").await.unwrap();
        assert_eq!(page.value(input), "14:30");
    }

    #[tokio::test]
    async fn test_number_formatting() {
        let mut page = Page::new();
        let input = page.append_element(
            page.body(),
            Element::new("input").attr("type", "number").attr("name", "idade"),
        );

        let field = detected(&page, input);
        let filler = filler();

        filler.fill(&mut page, &field, "42.0").await.unwrap();
        assert_eq!(page.value(input), "42");

        filler.fill(&mut page, &field, "3.5").await.unwrap();
        assert_eq!(page.value(input), "3.5");

        filler.fill(&mut page, &field, "muitos").await.unwrap();
        assert_eq!(page.value(input), "muitos");
    }
}
