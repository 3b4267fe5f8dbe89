//! Line tokenization.
//!
//! Splits one normalized CSV line into decoded fields: commas inside quoted
//! spans are field content, surrounding whitespace is trimmed, one enclosing
//! quote pair is stripped, and doubled quotes collapse to a single quote.
//!
//! The tokenizer never fails. Lexically odd input degrades to a best-effort
//! split; row-level correctness is enforced by the table builder through
//! length checks.

/// Split `line` into decoded fields, reusing `fields` as the output buffer.
///
/// The buffer is cleared first, so callers can hold one `Vec` across many
/// lines without cross-line leakage. Empty tokens are preserved as empty
/// fields to keep the column count stable.
pub(crate) fn split_into(line: &str, fields: &mut Vec<String>) {
    fields.clear();

    let mut raw = String::new();
    let mut in_quotes = false;
    for c in line.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                raw.push(c);
            }
            ',' if !in_quotes => {
                fields.push(decode_field(&raw));
                raw.clear();
            }
            _ => raw.push(c),
        }
    }
    fields.push(decode_field(&raw));
}

/// Decode one raw token: trim, strip one surrounding quote pair, collapse
/// doubled quotes.
fn decode_field(raw: &str) -> String {
    let mut part = raw.trim();
    if part.len() >= 2 && part.starts_with('"') && part.ends_with('"') {
        part = &part[1..part.len() - 1];
    }
    if part.contains("\"\"") {
        part.replace("\"\"", "\"")
    } else {
        part.to_string()
    }
}

/// Tokenize one line of normalized CSV text into an owned field vector.
pub fn tokenize_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    split_into(line, &mut fields);
    fields
}
