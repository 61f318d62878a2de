use std::sync::LazyLock;

use regex::Regex;

use crate::query::QueryAndParams;
use crate::row::Row;
use crate::types::RowValues;

use super::{Target, duplicate_clause, quote_ident};

static LEADING_WHERE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^WHERE\b").expect("leading where pattern"));

pub(super) fn build(
    table: &str,
    row: &Row,
    target: &Target,
    on_duplicate: &[String],
) -> QueryAndParams {
    let mut params: Vec<RowValues> = Vec::with_capacity(row.len() + 1);
    let assignments = row
        .iter()
        .map(|(col, value)| {
            params.push(value.clone());
            format!("{}=?", quote_ident(col))
        })
        .collect::<Vec<_>>()
        .join(", ");

    let where_clause = match target {
        Target::ByIndex { key, value } => {
            params.push(value.clone());
            Some(format!("WHERE {}=?", quote_ident(key)))
        }
        Target::Where { clause, params: extra } if !clause.trim().is_empty() => {
            params.extend(extra.iter().cloned());
            Some(with_where_keyword(clause.trim()))
        }
        Target::Where { .. } | Target::Insert => None,
    };

    let mut query = format!(
        "{} {} SET {assignments}",
        if where_clause.is_some() { "UPDATE" } else { "INSERT" },
        quote_ident(table)
    );
    match where_clause {
        Some(clause) => {
            query.push(' ');
            query.push_str(&clause);
        }
        None => query.push_str(&duplicate_clause(on_duplicate)),
    }

    QueryAndParams::new(query, params)
}

fn with_where_keyword(clause: &str) -> String {
    if LEADING_WHERE.is_match(clause) {
        clause.to_string()
    } else {
        format!("WHERE {clause}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::write_query::{WriteSpec, build_write};

    fn ab_row() -> Row {
        Row::new().with("a", 1).with("b", "x")
    }

    #[test]
    fn insert_uses_set_syntax() {
        let qp = build_write(&WriteSpec::new("t", ab_row()));
        assert_eq!(qp.query, "INSERT `t` SET `a`=?, `b`=?");
        assert_eq!(
            qp.params,
            vec![RowValues::Int(1), RowValues::Text("x".into())]
        );
    }

    #[test]
    fn update_by_default_index() {
        let spec = WriteSpec::new("t", Row::new().with("a", 1)).target(Target::by_id(5));
        let qp = build_write(&spec);
        assert_eq!(qp.query, "UPDATE `t` SET `a`=? WHERE `id`=?");
        assert_eq!(qp.params, vec![RowValues::Int(1), RowValues::Int(5)]);
    }

    #[test]
    fn update_by_custom_index_key() {
        let spec = WriteSpec::new("users", Row::new().with("name", "bo"))
            .target(Target::by_index("uuid", "abc"));
        let qp = build_write(&spec);
        assert_eq!(qp.query, "UPDATE `users` SET `name`=? WHERE `uuid`=?");
        assert_eq!(
            qp.params,
            vec![RowValues::Text("bo".into()), RowValues::Text("abc".into())]
        );
    }

    #[test]
    fn update_with_manual_where_appends_its_params() {
        let spec = WriteSpec::new("t", ab_row()).target(Target::where_clause(
            "`c` = ? AND `d` > ?",
            vec![RowValues::Int(3), RowValues::Int(4)],
        ));
        let qp = build_write(&spec);
        assert_eq!(qp.query, "UPDATE `t` SET `a`=?, `b`=? WHERE `c` = ? AND `d` > ?");
        assert_eq!(
            qp.params,
            vec![
                RowValues::Int(1),
                RowValues::Text("x".into()),
                RowValues::Int(3),
                RowValues::Int(4)
            ]
        );
    }

    #[test]
    fn manual_where_keyword_is_not_doubled() {
        let spec = WriteSpec::new("t", Row::new().with("a", 1))
            .target(Target::where_clause("where `id` IN (1, 2)", Vec::new()));
        let qp = build_write(&spec);
        assert_eq!(qp.query, "UPDATE `t` SET `a`=? where `id` IN (1, 2)");
        assert_eq!(qp.params, vec![RowValues::Int(1)]);
    }

    #[test]
    fn manual_where_keyword_followed_by_newline_or_paren() {
        let spec = WriteSpec::new("t", Row::new().with("a", 1))
            .target(Target::where_clause("WHERE\n`id` = ?", vec![RowValues::Int(9)]));
        let qp = build_write(&spec);
        assert_eq!(qp.query, "UPDATE `t` SET `a`=? WHERE\n`id` = ?");
        assert_eq!(qp.params, vec![RowValues::Int(1), RowValues::Int(9)]);

        let spec = WriteSpec::new("t", Row::new().with("a", 1))
            .target(Target::where_clause("Where(`id` = 1)", Vec::new()));
        assert_eq!(build_write(&spec).query, "UPDATE `t` SET `a`=? Where(`id` = 1)");
    }

    #[test]
    fn clause_starting_with_a_where_like_column_gets_the_keyword() {
        let spec = WriteSpec::new("t", Row::new().with("a", 1))
            .target(Target::where_clause("whereabouts = ?", vec![RowValues::Int(2)]));
        assert_eq!(build_write(&spec).query, "UPDATE `t` SET `a`=? WHERE whereabouts = ?");
    }

    #[test]
    fn blank_where_falls_back_to_insert() {
        let spec = WriteSpec::new("t", Row::new().with("a", 1))
            .target(Target::where_clause("  ", vec![RowValues::Int(2)]));
        let qp = build_write(&spec);
        assert_eq!(qp.query, "INSERT `t` SET `a`=?");
        assert_eq!(qp.params, vec![RowValues::Int(1)]);
    }

    #[test]
    fn insert_with_duplicate_key_update() {
        let spec = WriteSpec::new("t", ab_row()).on_duplicate_key_update(["b"]);
        let qp = build_write(&spec);
        assert_eq!(
            qp.query,
            "INSERT `t` SET `a`=?, `b`=? ON DUPLICATE KEY UPDATE `b`=VALUES(`b`)"
        );
        assert_eq!(qp.params.len(), 2);
    }

    #[test]
    fn update_ignores_duplicate_key_columns() {
        let spec = WriteSpec::new("t", Row::new().with("a", 1))
            .target(Target::by_id(1))
            .on_duplicate_key_update(["a"]);
        let qp = build_write(&spec);
        assert_eq!(qp.query, "UPDATE `t` SET `a`=? WHERE `id`=?");
    }

    #[test]
    fn null_values_are_bound_in_write_assignments() {
        let qp = build_write(&WriteSpec::new("t", Row::new().with("a", RowValues::Null)));
        assert_eq!(qp.query, "INSERT `t` SET `a`=?");
        assert_eq!(qp.params, vec![RowValues::Null]);
    }
}
