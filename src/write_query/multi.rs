use crate::query::QueryAndParams;
use crate::row::Row;

use super::{duplicate_clause, quote_ident};

/// `INSERT INTO ... VALUES (...), (...)` with one group per row.
///
/// Columns and the group width come from the first row; later rows contribute their
/// values in their own order without being checked against it.
pub(super) fn build(table: &str, rows: &[Row], on_duplicate: &[String]) -> QueryAndParams {
    let Some(first) = rows.first() else {
        return QueryAndParams::noop();
    };

    let columns = first.keys().map(quote_ident).collect::<Vec<_>>().join(",");
    let group = format!("({})", vec!["?"; first.len()].join(","));
    let groups = vec![group.as_str(); rows.len()].join(", ");

    let params = rows
        .iter()
        .flat_map(|row| row.values().cloned())
        .collect::<Vec<_>>();

    let query = format!(
        "INSERT INTO {} ({columns}) VALUES {groups}{}",
        quote_ident(table),
        duplicate_clause(on_duplicate)
    );
    QueryAndParams::new(query, params)
}

#[cfg(test)]
mod tests {
    use crate::row::Row;
    use crate::types::RowValues;
    use crate::write_query::{WriteSpec, build_write};

    #[test]
    fn one_values_group_per_row() {
        let rows = vec![
            Row::new().with("a", 1).with("b", 2),
            Row::new().with("a", 3).with("b", 4),
        ];
        let qp = build_write(&WriteSpec::new("t", rows));
        assert_eq!(qp.query, "INSERT INTO `t` (`a`,`b`) VALUES (?,?), (?,?)");
        assert_eq!(
            qp.params,
            vec![
                RowValues::Int(1),
                RowValues::Int(2),
                RowValues::Int(3),
                RowValues::Int(4)
            ]
        );
    }

    #[test]
    fn duplicate_clause_applies_to_every_row() {
        let rows = vec![
            Row::new().with("id", 1).with("n", "a"),
            Row::new().with("id", 2).with("n", "b"),
            Row::new().with("id", 3).with("n", "c"),
        ];
        let spec = WriteSpec::new("items", rows).on_duplicate_key_update(["n"]);
        let qp = build_write(&spec);
        assert_eq!(
            qp.query,
            "INSERT INTO `items` (`id`,`n`) VALUES (?,?), (?,?), (?,?) ON DUPLICATE KEY UPDATE `n`=VALUES(`n`)"
        );
        assert_eq!(qp.params.len(), 6);
    }

    #[test]
    fn null_values_stay_bound() {
        let rows = vec![Row::new().with("a", RowValues::Null)];
        let qp = build_write(&WriteSpec::new("t", rows));
        assert_eq!(qp.query, "INSERT INTO `t` (`a`) VALUES (?)");
        assert_eq!(qp.params, vec![RowValues::Null]);
    }
}
