use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Opening paren up to the first closing paren after it.
static PAREN_FRAGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\(.*?\)").expect("paren fragment pattern"));

/// Parenthesized fragments lifted out of a statement for the duration of one rewrite.
///
/// Each fragment is swapped for a `#prcN#` token (numbered from 1 in order of
/// appearance) so that keywords inside subqueries or function arguments are invisible
/// to the clause rewriting that follows. The table is never shared across calls.
#[derive(Debug, Default)]
pub struct FragmentTable {
    entries: Vec<(String, String)>,
}

impl FragmentTable {
    /// Replace every parenthesized fragment in `sql` with its token.
    ///
    /// Returns the shielded text together with the table needed to undo it.
    #[must_use]
    pub fn shield(sql: &str) -> (String, FragmentTable) {
        let mut table = FragmentTable::default();
        let shielded = PAREN_FRAGMENT
            .replace_all(sql, |caps: &Captures<'_>| {
                let token = format!("#prc{}#", table.entries.len() + 1);
                table.entries.push((token.clone(), caps[0].to_string()));
                token
            })
            .into_owned();
        (shielded, table)
    }

    /// Substitute every token in `text` back to the fragment it stands for.
    ///
    /// This is plain text substitution: a caller-supplied literal that happens to look
    /// like a token is replaced as well.
    #[must_use]
    pub fn unshield(&self, text: &str) -> String {
        self.entries
            .iter()
            .fold(text.to_string(), |acc, (token, fragment)| {
                acc.replace(token, fragment)
            })
    }

    /// Original fragment recorded for `token`.
    #[must_use]
    pub fn get(&self, token: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(t, _)| t == token)
            .map(|(_, fragment)| fragment.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_fragments_in_order_of_appearance() {
        let sql = "SELECT COALESCE(a, 0), MAX(b) FROM t WHERE c IN (1, 2)";
        let (shielded, table) = FragmentTable::shield(sql);
        assert_eq!(shielded, "SELECT COALESCE#prc1#, MAX#prc2# FROM t WHERE c IN #prc3#");
        assert_eq!(table.len(), 3);
        assert_eq!(table.get("#prc1#"), Some("(a, 0)"));
        assert_eq!(table.get("#prc3#"), Some("(1, 2)"));
        assert_eq!(table.unshield(&shielded), sql);
    }

    #[test]
    fn text_without_parens_is_untouched() {
        let (shielded, table) = FragmentTable::shield("SELECT a FROM t");
        assert_eq!(shielded, "SELECT a FROM t");
        assert!(table.is_empty());
    }

    #[test]
    fn double_digit_tokens_do_not_collide() {
        let sql = (1..=11)
            .map(|i| format!("f({i})"))
            .collect::<Vec<_>>()
            .join(", ");
        let (shielded, table) = FragmentTable::shield(&sql);
        assert!(shielded.ends_with("f#prc10#, f#prc11#"));
        assert_eq!(table.unshield(&shielded), sql);
    }

    #[test]
    fn fragment_may_span_lines() {
        let sql = "SELECT a FROM t WHERE b IN (\n  SELECT b FROM u\n)";
        let (shielded, table) = FragmentTable::shield(sql);
        assert_eq!(shielded, "SELECT a FROM t WHERE b IN #prc1#");
        assert_eq!(table.get("#prc1#"), Some("(\n  SELECT b FROM u\n)"));
    }
}
