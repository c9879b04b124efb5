//! Rendering of IRIs, literals and regex patterns into SPARQL query text.

use crate::error::{CastchainError, Result};

/// Render `iri` as an IRI reference term, `<iri>`.
///
/// Rejects characters that cannot appear between angle brackets.
pub fn iri(iri: &str) -> Result<String> {
    if iri.is_empty() {
        return Err(CastchainError::InvalidInput("empty IRI".to_string()));
    }
    if let Some(bad) = iri
        .chars()
        .find(|c| c.is_whitespace() || c.is_control() || "<>\"{}|^`\\".contains(*c))
    {
        return Err(CastchainError::InvalidInput(format!(
            "IRI {:?} contains forbidden character {:?}",
            iri, bad
        )));
    }
    Ok(format!("<{}>", iri))
}

/// Escape `text` for use inside a quoted SPARQL string literal.
pub fn escape_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out
}

/// Render `text` as a language-tagged literal, `"text"@lang`.
pub fn lang_literal(text: &str, lang: &str) -> String {
    format!("\"{}\"@{}", escape_string(text), lang)
}

/// Render a single-quoted literal holding a regex that matches `token` verbatim.
pub fn literal_regex(token: &str) -> String {
    format!("'{}'", escape_string(&regex::escape(token)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iri_wraps_in_brackets() {
        assert_eq!(
            iri("http://dbpedia.org/resource/Orson_Welles").unwrap(),
            "<http://dbpedia.org/resource/Orson_Welles>"
        );
        // Parentheses and commas are common in resource names and are fine.
        assert_eq!(
            iri("http://dbpedia.org/resource/Touch_of_Evil_(film)").unwrap(),
            "<http://dbpedia.org/resource/Touch_of_Evil_(film)>"
        );
    }

    #[test]
    fn test_iri_rejects_forbidden_characters() {
        assert!(iri("").is_err());
        assert!(iri("http://x/a b").is_err());
        assert!(iri("http://x/a>b").is_err());
        assert!(iri("http://x/a\"b").is_err());
    }

    #[test]
    fn test_lang_literal_escapes_quotes() {
        assert_eq!(lang_literal("Orson Welles", "en"), "\"Orson Welles\"@en");
        assert_eq!(
            lang_literal("Dwayne \"The Rock\" Johnson", "en"),
            "\"Dwayne \\\"The Rock\\\" Johnson\"@en"
        );
        assert_eq!(lang_literal("a\\b\nc", "it"), "\"a\\\\b\\nc\"@it");
    }

    #[test]
    fn test_literal_regex_escapes_metacharacters() {
        assert_eq!(literal_regex("Orson"), "'Orson'");
        // regex escape yields `\.`; the string literal doubles the backslash.
        assert_eq!(literal_regex("J."), "'J\\\\.'");
        assert_eq!(literal_regex("O'To"), "'O\\'To'");
    }
}
