use std::sync::LazyLock;

use regex::Regex;

use crate::error::DelimiterNotFound;

// `(?s)` lets the lazy group run across newlines.
static HAIKU_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\$\((.*?)\)\$").expect("haiku delimiter pattern is valid")
});

/// Pulls the haiku out of the first `$( ... )$` pair in an LLM completion.
pub fn extract_haiku(llm_output: &str) -> Result<String, DelimiterNotFound> {
    HAIKU_PATTERN
        .captures(llm_output)
        .and_then(|captures| captures.get(1))
        .map(|inner| inner.as_str().trim().to_string())
        .ok_or(DelimiterNotFound)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_multiline_haiku() {
        let raw = "intro $(Soft rain falls\non thirsty soil today)$ outro";
        assert_eq!(
            extract_haiku(raw).unwrap(),
            "Soft rain falls\non thirsty soil today"
        );
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let raw = "$(\n  old pond\n  a frog jumps in\n  splash  \n)$";
        assert_eq!(
            extract_haiku(raw).unwrap(),
            "old pond\n  a frog jumps in\n  splash"
        );
    }

    #[test]
    fn takes_the_first_pair_only() {
        let raw = "<think>maybe $(draft)$</think> final: $(keeper)$";
        assert_eq!(extract_haiku(raw).unwrap(), "draft");
    }

    #[test]
    fn missing_delimiters_fail() {
        assert_eq!(extract_haiku("just a poem, no markers"), Err(DelimiterNotFound));
        assert_eq!(extract_haiku("$(never closed"), Err(DelimiterNotFound));
        assert_eq!(extract_haiku("closed only)$"), Err(DelimiterNotFound));
    }

    #[test]
    fn empty_pair_yields_empty_text() {
        assert_eq!(extract_haiku("$(   )$").unwrap(), "");
    }
}
