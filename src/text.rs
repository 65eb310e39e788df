use once_cell::sync::Lazy;
use regex::Regex;

/// Symbols that get spelled out during slug generation. Substitution runs
/// before whitespace collapsing so adjacent symbols never fuse words.
const SYMBOL_WORDS: &[(&str, &str)] = &[
    ("%", "Percent"),
    ("#", "Number"),
    ("@", "At"),
    ("&", "And"),
    ("+", "Plus"),
    ("*", "Asterisk"),
    ("<", "Less Than"),
    (">", "Greater Than"),
    ("=", "Equals"),
    ("!", "Exclamation"),
    ("?", "Question"),
    ("$", "Dollar"),
    ("€", "Euro"),
    ("£", "Pound"),
    ("¥", "Yen"),
];

static SEPARATOR_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s\-/]+").unwrap());
static DISALLOWED: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s'()]").unwrap());
static UNDERSCORE_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"_{2,}").unwrap());
static WHITESPACE_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Generate a Wikipedia-article-title style identifier from a display name:
/// title-cased, underscore-separated, symbols spelled out.
///
/// Deterministic and idempotent: re-applying to its own output is a no-op.
/// Empty input yields empty output.
pub fn slugify(name: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    // An input that is exactly one known symbol maps directly to its word
    if let Some((_, words)) = SYMBOL_WORDS.iter().find(|(sym, _)| *sym == trimmed) {
        return words.replace(' ', "_");
    }

    // Spell out every symbol occurrence, space-padded so neighbors stay split
    let mut text = trimmed.to_string();
    for (symbol, words) in SYMBOL_WORDS {
        if text.contains(symbol) {
            text = text.replace(symbol, &format!(" {} ", words));
        }
    }

    let text = SEPARATOR_RUNS.replace_all(&text, " ");
    let text = DISALLOWED.replace_all(&text, "");

    let slug = text
        .split_whitespace()
        .map(capitalize_word)
        .collect::<Vec<_>>()
        .join("_");

    let slug = UNDERSCORE_RUNS.replace_all(&slug, "_");
    slug.trim_matches('_').to_string()
}

/// Uppercase the first character of a word, leaving the rest intact.
/// Short all-caps words (acronyms like "IT", "FDA") pass through unchanged.
fn capitalize_word(word: &str) -> String {
    if word.len() <= 4 && word.chars().all(|c| c.is_uppercase()) {
        return word.to_string();
    }
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Collapse a possibly multi-line description into clean single-line text.
/// `None` and empty input both yield the empty string. Idempotent.
pub fn clean_description(description: Option<&str>) -> String {
    match description {
        Some(text) if !text.is_empty() => WHITESPACE_RUNS.replace_all(text, " ").trim().to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic_examples() {
        assert_eq!(slugify("chief executives"), "Chief_Executives");
        assert_eq!(slugify("software-developer"), "Software_Developer");
        assert_eq!(slugify("%"), "Percent");
        assert_eq!(slugify("IT Manager"), "IT_Manager");
    }

    #[test]
    fn test_slugify_symbol_substitution() {
        assert_eq!(slugify("R&D"), "R_And_D");
        assert_eq!(slugify("profit + loss"), "Profit_Plus_Loss");
        assert_eq!(slugify("<"), "Less_Than");
        assert_eq!(slugify("a<b"), "A_Less_Than_B");
    }

    #[test]
    fn test_slugify_separators_collapse() {
        assert_eq!(slugify("data/entry  keyer"), "Data_Entry_Keyer");
        assert_eq!(slugify("first--second"), "First_Second");
    }

    #[test]
    fn test_slugify_preserves_short_acronyms() {
        assert_eq!(slugify("FDA approval"), "FDA_Approval");
        assert_eq!(slugify("USPTO filings"), "USPTO_Filings");
    }

    #[test]
    fn test_slugify_empty() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("   "), "");
    }

    #[test]
    fn test_slugify_idempotent() {
        let inputs = [
            "chief executives",
            "software-developer",
            "%",
            "IT Manager",
            "R&D / Innovation",
            "Sales (Retail)",
            "  padded  input  ",
            "a<b>c",
        ];
        for input in inputs {
            let once = slugify(input);
            assert_eq!(slugify(&once), once, "not idempotent for {:?}", input);
        }
    }

    #[test]
    fn test_clean_description_collapses_whitespace() {
        assert_eq!(clean_description(Some("a\t\nb   c")), "a b c");
        assert_eq!(clean_description(Some("  trimmed  ")), "trimmed");
    }

    #[test]
    fn test_clean_description_empty_inputs() {
        assert_eq!(clean_description(None), "");
        assert_eq!(clean_description(Some("")), "");
    }

    #[test]
    fn test_clean_description_idempotent() {
        let cleaned = clean_description(Some("line one\r\nline two\ttab"));
        assert_eq!(clean_description(Some(&cleaned)), cleaned);
    }
}
