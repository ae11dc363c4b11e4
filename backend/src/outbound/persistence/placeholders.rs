//! Positional placeholder rewriting.

use std::borrow::Cow;

use super::Dialect;

/// Rewrite `?` markers into the placeholder syntax of `dialect`.
///
/// PostgreSQL receives `$1, $2, …` numbered left to right, one number per
/// occurrence. SQLite understands `?` natively and gets the text back
/// untouched. A `?` inside a single-quoted literal is text, not a marker.
///
/// # Examples
/// ```
/// use service_finder::outbound::persistence::{Dialect, translate_placeholders};
///
/// let sql = "UPDATE requests SET provider_id = ? WHERE id = ? AND title <> '?'";
/// assert_eq!(
///     translate_placeholders(sql, Dialect::Postgres),
///     "UPDATE requests SET provider_id = $1 WHERE id = $2 AND title <> '?'",
/// );
/// assert_eq!(translate_placeholders(sql, Dialect::Sqlite), sql);
/// ```
pub fn translate_placeholders(sql: &str, dialect: Dialect) -> Cow<'_, str> {
    if dialect == Dialect::Sqlite || !sql.contains('?') {
        return Cow::Borrowed(sql);
    }

    let mut out = String::with_capacity(sql.len() + 8);
    let mut next = 1_usize;
    let mut in_literal = false;
    for ch in sql.chars() {
        match ch {
            '\'' => {
                // A doubled quote closes and reopens, which leaves the state unchanged.
                in_literal = !in_literal;
                out.push(ch);
            }
            '?' if !in_literal => {
                out.push('$');
                out.push_str(&next.to_string());
                next += 1;
            }
            _ => out.push(ch),
        }
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("SELECT 1", "SELECT 1")]
    #[case("SELECT * FROM users WHERE email = ?", "SELECT * FROM users WHERE email = $1")]
    #[case(
        "INSERT INTO t (a, b, c) VALUES (?, ?, ?)",
        "INSERT INTO t (a, b, c) VALUES ($1, $2, $3)"
    )]
    #[case("SELECT '?', ?", "SELECT '?', $1")]
    #[case("SELECT 'it''s ?', ?", "SELECT 'it''s ?', $1")]
    #[case(
        "? ? ? ? ? ? ? ? ? ? ?",
        "$1 $2 $3 $4 $5 $6 $7 $8 $9 $10 $11"
    )]
    fn postgres_markers_are_numbered_in_order(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(translate_placeholders(input, Dialect::Postgres), expected);
    }

    #[rstest]
    fn sqlite_text_is_borrowed_unchanged() {
        let sql = "SELECT * FROM requests WHERE id = ?";
        assert!(matches!(
            translate_placeholders(sql, Dialect::Sqlite),
            Cow::Borrowed(text) if text == sql
        ));
    }
}
