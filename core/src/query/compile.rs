//! Criteria to filter-expression compiler.
//!
//! Every field contributes zero or more clauses; clauses from all fields are
//! joined with ` and ` in field order. Lists compile to a parenthesized
//! ` or ` group that counts as a single clause. There is no other nesting.

use tracing::{debug, trace};

use super::criteria::{Criteria, FieldValue, Scalar};
use super::mapping::FieldNameStrategy;

/// Compile `criteria` into a filter expression for the `q` parameter.
///
/// Returns `None` when no clause is produced, i.e. for empty criteria or
/// when every field is unset. Operands are not escaped.
pub fn build_search_query(criteria: &Criteria, names: &impl FieldNameStrategy) -> Option<String> {
    let mut clauses = Vec::new();

    for (field, value) in criteria.iter() {
        let Some(value) = value else {
            trace!(field, "skipping unset criteria field");
            continue;
        };
        let server = names.server_name(field);
        push_clauses(&mut clauses, &server, value);
    }

    if clauses.is_empty() {
        return None;
    }
    let filter = clauses.join(" and ");
    debug!(%filter, "compiled search criteria");
    Some(filter)
}

fn push_clauses(clauses: &mut Vec<String>, field: &str, value: &FieldValue) {
    match value {
        FieldValue::Scalar(Scalar::Str(s)) => clauses.push(format!("{field} like '{s}*'")),
        FieldValue::Scalar(scalar) => clauses.push(format!("{field} eq {scalar}")),
        FieldValue::List(values) => clauses.push(any_of(field, values)),
        FieldValue::Operators(ops) => {
            for (op, operand) in ops.comparisons() {
                clauses.push(format!("{field} {op} {operand}"));
            }
            if let Some(values) = &ops.in_list {
                clauses.push(any_of(field, values));
            }
        }
    }
}

/// `(F eq a or F eq b ...)`. An empty list still yields its group, `()`.
fn any_of(field: &str, values: &[Scalar]) -> String {
    let alternatives: Vec<String> = values.iter().map(|v| format!("{field} eq {v}")).collect();
    format!("({})", alternatives.join(" or "))
}
