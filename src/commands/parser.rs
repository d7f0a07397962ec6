use regex::Regex;
use std::sync::OnceLock;

/// Splits a chat line on whitespace, keeping double-quoted spans together.
/// Quotes are stripped; there is no escaping of quotes inside a span.
pub fn parse_arguments(message: &str) -> Vec<String> {
    static TOKEN: OnceLock<Regex> = OnceLock::new();
    let token = TOKEN.get_or_init(|| Regex::new(r#"[^\s"]+|"([^"]*)""#).expect("valid regex"));
    token
        .captures_iter(message)
        .filter_map(|captures| match captures.get(1) {
            Some(quoted) => Some(quoted.as_str().to_owned()),
            None => captures.get(0).map(|token| token.as_str().to_owned()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoted_spans_stay_together() {
        assert_eq!(
            parse_arguments(r#"100 "multi-word string" string"#),
            vec!["100", "multi-word string", "string"]
        );
    }

    #[test]
    fn empty_input_has_no_tokens() {
        assert!(parse_arguments("").is_empty());
        assert!(parse_arguments("   \t ").is_empty());
    }

    #[test]
    fn inner_whitespace_is_kept_verbatim() {
        assert_eq!(
            parse_arguments(r#"!createpoll 30 "  Best   snack " "A" "B""#),
            vec!["!createpoll", "30", "  Best   snack ", "A", "B"]
        );
    }

    #[test]
    fn empty_quotes_yield_an_empty_token() {
        assert_eq!(parse_arguments(r#"a "" b"#), vec!["a", "", "b"]);
    }

    #[test]
    fn unterminated_quote_is_dropped() {
        assert_eq!(parse_arguments(r#"!vote "1"#), vec!["!vote", "1"]);
    }
}
