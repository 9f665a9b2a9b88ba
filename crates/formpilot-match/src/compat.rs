//! Type compatibility between template field types and control types.

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Text-family types that cross-accept each other as a second chance.
pub const TEXT_FAMILY: &[&str] = &["text", "email", "url", "tel", "search"];

/// Control types each template type accepts directly.
static TYPE_MAP: Lazy<HashMap<&'static str, &'static [&'static str]>> = Lazy::new(|| {
    let mut map: HashMap<&'static str, &'static [&'static str]> = HashMap::new();
    map.insert("text", &["text", "email", "url", "tel", "search"]);
    map.insert("email", &["email", "text"]);
    map.insert("password", &["password"]);
    map.insert("number", &["number", "text"]);
    map.insert("tel", &["tel", "text"]);
    map.insert("url", &["url", "text"]);
    map.insert("textarea", &["textarea"]);
    map.insert("select", &["select"]);
    map.insert("checkbox", &["checkbox"]);
    map.insert("radio", &["radio"]);
    map.insert("date", &["date"]);
    map.insert("time", &["time"]);
    map.insert("datetime-local", &["datetime-local"]);
    map.insert("file", &["file"]);
    map.insert("color", &["color"]);
    map.insert("range", &["range"]);
    map
});

/// Whether a control of `field_type` may receive a template field of
/// `template_type`.
///
/// Unmapped template types accept anything (custom user types stay
/// usable), as does a missing control type. When the direct lookup
/// fails, text-family template types get a second chance against any
/// text-family control.
pub fn is_compatible(template_type: &str, field_type: &str) -> bool {
    let Some(accepted) = TYPE_MAP.get(template_type) else {
        return true;
    };
    if field_type.is_empty() {
        return true;
    }
    if accepted.contains(&field_type) {
        return true;
    }
    TEXT_FAMILY.contains(&template_type) && TEXT_FAMILY.contains(&field_type)
}
