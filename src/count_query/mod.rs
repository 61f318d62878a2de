use std::sync::LazyLock;

use regex::{NoExpand, Regex};

use crate::query::QueryAndParams;

mod fragments;

pub use fragments::FragmentTable;

/// Alias given to the derived table when a grouped query is wrapped.
pub const COUNT_ALIAS: &str = "tmp_count";

static TAIL_CLAUSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:ORDER\s+BY|LIMIT)\b").expect("tail clause pattern"));

static GROUP_BY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bGROUP\s+BY\b").expect("group by pattern"));

static SELECT_FROM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)\bSELECT\b.*?\bFROM\b").expect("select list pattern"));

/// Derive a query returning the number of rows `sql` would produce.
///
/// Ordering and limiting clauses are dropped. Grouped queries are wrapped in a derived
/// table, since every group is a row; otherwise the select list is swapped for
/// `COUNT(*)`:
/// ```rust
/// use sql_adapter::count_query::count_query;
///
/// assert_eq!(
///     count_query("SELECT id, name FROM users WHERE id=? ORDER BY name LIMIT 5"),
///     "SELECT COUNT(*) FROM users WHERE id=?"
/// );
/// assert_eq!(
///     count_query("SELECT dept, COUNT(*) FROM emp GROUP BY dept"),
///     "SELECT COUNT(*) FROM (SELECT dept, COUNT(*) FROM emp GROUP BY dept) AS tmp_count"
/// );
/// ```
///
/// Warning: this is a textual rewrite, not a parser. Parenthesized fragments are shielded
/// one level deep (from an opening paren to the first closing paren after it), so a
/// subquery that itself nests parens and carries `ORDER BY`/`LIMIT` can be cut short.
/// Keywords inside string literals are not recognised as literals either. Statements
/// must not contain text shaped like the `#prcN#` shield tokens.
#[must_use]
pub fn count_query(sql: &str) -> String {
    let (shielded, fragments) = FragmentTable::shield(sql);
    let body = strip_tail_clauses(&shielded);

    let rewritten = if GROUP_BY.is_match(body) {
        format!("SELECT COUNT(*) FROM ({body}) AS {COUNT_ALIAS}")
    } else {
        SELECT_FROM
            .replace(body, NoExpand("SELECT COUNT(*) FROM"))
            .into_owned()
    };

    let counted = fragments.unshield(&rewritten);
    tracing::trace!(
        target: "sql_adapter",
        fragments = fragments.len(),
        count_sql = %counted,
        "synthesized count query"
    );
    counted
}

/// [`count_query`] over a statement and its parameters; the parameters pass through
/// unchanged since only the text is rewritten.
#[must_use]
pub fn count_query_and_params(query: &QueryAndParams) -> QueryAndParams {
    QueryAndParams::new(count_query(&query.query), query.params.clone())
}

fn strip_tail_clauses(text: &str) -> &str {
    match TAIL_CLAUSE.find(text) {
        Some(m) => text[..m.start()].trim(),
        None => text.trim(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RowValues;

    #[test]
    fn ungrouped_select_list_becomes_count() {
        assert_eq!(
            count_query("SELECT id, name FROM users WHERE id=?"),
            "SELECT COUNT(*) FROM users WHERE id=?"
        );
    }

    #[test]
    fn grouped_query_is_wrapped() {
        assert_eq!(
            count_query("SELECT dept, COUNT(*) FROM emp GROUP BY dept"),
            "SELECT COUNT(*) FROM (SELECT dept, COUNT(*) FROM emp GROUP BY dept) AS tmp_count"
        );
    }

    #[test]
    fn tail_is_stripped_and_subquery_kept_verbatim() {
        assert_eq!(
            count_query("SELECT * FROM t WHERE id IN (SELECT id FROM u) ORDER BY id LIMIT 10"),
            "SELECT COUNT(*) FROM t WHERE id IN (SELECT id FROM u)"
        );
    }

    #[test]
    fn keywords_inside_parens_are_shielded() {
        let sql = "SELECT a FROM t WHERE b IN (SELECT b FROM u GROUP BY b ORDER BY b LIMIT 3)";
        assert_eq!(
            count_query(sql),
            "SELECT COUNT(*) FROM t WHERE b IN (SELECT b FROM u GROUP BY b ORDER BY b LIMIT 3)"
        );
    }

    #[test]
    fn grouped_query_drops_its_ordering() {
        assert_eq!(
            count_query("select dept from emp group by dept order by dept desc limit 5"),
            "SELECT COUNT(*) FROM (select dept from emp group by dept) AS tmp_count"
        );
    }

    #[test]
    fn keywords_match_case_insensitively_and_across_whitespace() {
        assert_eq!(
            count_query("select a,\n  b\nfrom t\nwhere a > 1\norder  by b"),
            "SELECT COUNT(*) FROM t\nwhere a > 1"
        );
    }

    #[test]
    fn function_arguments_survive() {
        assert_eq!(
            count_query("SELECT COALESCE(a, 0) AS a FROM t WHERE DATE(created) = ? LIMIT 1"),
            "SELECT COUNT(*) FROM t WHERE DATE(created) = ?"
        );
    }

    #[test]
    fn identifiers_containing_keywords_are_left_alone() {
        assert_eq!(
            count_query("SELECT id FROM t WHERE limit_value > 0 AND order_by_col = 1"),
            "SELECT COUNT(*) FROM t WHERE limit_value > 0 AND order_by_col = 1"
        );
    }

    #[test]
    fn params_pass_through() {
        let qp = QueryAndParams::new(
            "SELECT id FROM t WHERE a = ? ORDER BY id",
            vec![RowValues::Int(4)],
        );
        let counted = count_query_and_params(&qp);
        assert_eq!(counted.query, "SELECT COUNT(*) FROM t WHERE a = ?");
        assert_eq!(counted.params, qp.params);
    }
}
