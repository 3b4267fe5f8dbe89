//! Multiline field normalization.
//!
//! Spreadsheet exports may contain raw newlines inside quoted fields. Before
//! line-by-line parsing, those embedded newlines are rewritten to the
//! two-character escape `\n` so every logical CSV row fits on one text line.

use once_cell::sync::Lazy;
use regex::Regex;

/// Matches one quoted span: a `"` through its closing `"`, where the body is
/// any non-quote character, a doubled quote, or a newline. A doubled quote is
/// consumed as a unit, so it never terminates the span.
static QUOTED_SPAN: Lazy<Regex> =
    Lazy::new(|| Regex::new("\"([^\"]|\"\"|\n)*\"").expect("quoted span pattern"));

/// Replace raw newlines inside quoted fields with the escape sequence `\n`.
///
/// All other characters, including the quotes themselves, pass through
/// unchanged. No validation happens here; malformed quoting is left for the
/// tokenizer's best-effort split.
pub fn normalize_multiline(csv: &str) -> String {
    QUOTED_SPAN
        .replace_all(csv, |caps: &regex::Captures| caps[0].replace('\n', "\\n"))
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_unchanged() {
        let csv = "a,b,c\n1,2,3";
        assert_eq!(normalize_multiline(csv), csv);
    }

    #[test]
    fn test_newline_inside_quotes_escaped() {
        let csv = "name,notes\nGoblin,\"line one\nline two\"";
        let fixed = normalize_multiline(csv);
        assert_eq!(fixed, "name,notes\nGoblin,\"line one\\nline two\"");
        // One physical line per logical row afterwards
        assert_eq!(fixed.lines().count(), 2);
    }

    #[test]
    fn test_newline_outside_quotes_untouched() {
        let csv = "\"a\",b\n\"c\",d";
        assert_eq!(normalize_multiline(csv), csv);
    }

    #[test]
    fn test_doubled_quote_does_not_close_span() {
        // The "" in the middle is an escaped quote, not span end + start,
        // so the newline after it still belongs to the quoted field.
        let csv = "\"he said \"\"hi\"\"\nbye\",x";
        let fixed = normalize_multiline(csv);
        assert_eq!(fixed, "\"he said \"\"hi\"\"\\nbye\",x");
    }

    #[test]
    fn test_multiple_newlines_in_one_field() {
        let csv = "\"a\nb\nc\"";
        assert_eq!(normalize_multiline(csv), "\"a\\nb\\nc\"");
    }

    #[test]
    fn test_adjacent_quoted_fields_stay_separate() {
        // The span must not greedily run from the first field into the second.
        let csv = "\"a\",\"b\nc\"";
        assert_eq!(normalize_multiline(csv), "\"a\",\"b\\nc\"");
    }
}
