use regex::Regex;
use std::sync::OnceLock;

static CONTROL_REGEX: OnceLock<Option<Regex>> = OnceLock::new();
static FORMULA_REGEX: OnceLock<Option<Regex>> = OnceLock::new();

fn get_control_regex() -> Option<&'static Regex> {
    CONTROL_REGEX
        .get_or_init(|| Regex::new(r"[\x00-\x08\x0b-\x0c\x0e-\x1f\x7f]").ok())
        .as_ref()
}

fn get_formula_regex() -> Option<&'static Regex> {
    FORMULA_REGEX
        .get_or_init(|| Regex::new(r"(?m)^=").ok())
        .as_ref()
}

/// Make extracted text safe to drop into a spreadsheet cell
///
/// Control characters are removed, non-ASCII characters become `?`, and a
/// line starting with `=` is quoted so it is not read as a formula. Only
/// printable ASCII plus `\n` and `\t` survive.
pub fn clean_text_for_excel(text: &str) -> String {
    let text = match get_control_regex() {
        Some(re) => re.replace_all(text, "").into_owned(),
        None => text.to_string(),
    };

    let text: String = text
        .chars()
        .map(|c| if c.is_ascii() { c } else { '?' })
        .collect();

    let text = match get_formula_regex() {
        Some(re) => re.replace_all(&text, "'=").into_owned(),
        None => text,
    };

    text.chars()
        .filter(|&c| c == '\n' || c == '\t' || (' '..='~').contains(&c))
        .collect()
}
