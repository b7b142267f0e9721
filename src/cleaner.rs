use std::sync::LazyLock;

use regex::Regex;

/// Cleaning substitutions, applied in order. Order matters: letter-dot-space
/// removal runs before comma removal, so a comma can shield a period from
/// pattern 7 on the first pass.
static CLEANING_PATTERNS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (r"[\n\u{00a0}]+", " "),    // newlines and non-breaking spaces
        (r#"[‘’'"]"#, ""),          // quotation marks
        (r"\(\d+\)", ""),           // numbers inside parentheses
        (r"\([a-z]\)", ""),         // lowercase letters inside parentheses
        (r";", ""),
        (r"\d+\.\s", ""),           // numbers followed by a dot and space
        (r"[a-z]\.\s", ""),         // lowercase letters followed by a dot and space
        (r"[A-Z]\.\s", ""),         // uppercase letters followed by a dot and space
        (r"[^\x00-\x7F]+", ""),     // non-ASCII
        (r",", ""),
        (r" +", " "),               // collapse runs of spaces
    ]
    .into_iter()
    .map(|(pattern, replacement)| (Regex::new(pattern).unwrap(), replacement))
    .collect()
});

/// Clean a batch of text entries, preserving length and order.
pub fn clean(texts: &[String]) -> Vec<String> {
    texts.iter().map(|t| clean_one(t)).collect()
}

/// Apply every cleaning pattern to one string, then trim.
pub fn clean_one(text: &str) -> String {
    let mut text = text.to_string();
    for (pattern, replacement) in CLEANING_PATTERNS.iter() {
        text = pattern.replace_all(&text, *replacement).into_owned();
    }
    text.trim().to_string()
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_length_and_order() {
        let input = vec![
            "first;".to_string(),
            String::new(),
            "third, entry".to_string(),
        ];
        let out = clean(&input);
        assert_eq!(out.len(), input.len());
        assert_eq!(out, vec!["first", "", "third entry"]);
    }

    #[test]
    fn empty_in_empty_out() {
        assert_eq!(clean_one(""), "");
        assert!(clean(&[]).is_empty());
    }

    #[test]
    fn strips_newlines_and_nbsp() {
        assert_eq!(clean_one("Hello,\nworld\u{00a0}again"), "Hello world again");
    }

    #[test]
    fn removes_enumeration_markers() {
        assert_eq!(
            clean_one("1. The provisions (2) apply; (a) fully"),
            "The provisions apply fully"
        );
    }

    #[test]
    fn removes_non_ascii() {
        assert_eq!(clean_one("ANNEX — rules"), "ANNEX rules");
    }

    #[test]
    fn second_pass_is_noop_for_representative_inputs() {
        let inputs = [
            "1. The provisions (2) apply; (a) fully",
            "OJ L 152, 11.6.2019, p. 45.",
            "Having regard to the Treaty,",
            "plain text without markers",
        ];
        for input in inputs {
            let once = clean_one(input);
            assert_eq!(clean_one(&once), once, "input: {input:?}");
        }
    }

    #[test]
    fn not_idempotent_when_patterns_interact() {
        // Comma removal (late) can expose a new letter-dot-space match that
        // pattern 7 (early) only sees on the next pass.
        let once = clean_one("abc,. def");
        assert_eq!(once, "abc. def");
        assert_eq!(clean_one(&once), "abdef");
        assert_ne!(clean_one(&once), once);
    }
}
