//! Evaluator for the `q` filter dialect accepted by the Logo Objects API.
//!
//! Supports what clients emit: clauses joined with ` and `, parenthesized
//! groups of ` or `-joined clauses, the operators `eq neq gt gte lt lte like`,
//! string literals in single quotes (no escapes), numbers and booleans.
//! `like` patterns use `*` as a wildcard.

use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Str(String),
    Num(f64),
    Bool(bool),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Eq,
    Neq,
    Gt,
    Gte,
    Lt,
    Lte,
    Like,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    Compare { field: String, op: Op, value: Literal },
    AnyOf(Vec<Clause>),
}

/// A parsed filter: every clause must hold.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    clauses: Vec<Clause>,
}

impl Filter {
    pub fn parse(input: &str) -> Result<Filter, String> {
        let input = input.trim();
        if input.is_empty() {
            return Ok(Filter { clauses: Vec::new() });
        }
        let clauses = split_top(input, " and ")
            .into_iter()
            .map(parse_clause)
            .collect::<Result<_, _>>()?;
        Ok(Filter { clauses })
    }

    pub fn matches(&self, record: &Map<String, Value>) -> bool {
        self.clauses.iter().all(|c| c.matches(record))
    }
}

impl Clause {
    fn matches(&self, record: &Map<String, Value>) -> bool {
        match self {
            Clause::AnyOf(alternatives) => alternatives.iter().any(|c| c.matches(record)),
            Clause::Compare { field, op, value } => match record.get(field) {
                Some(actual) => compare(actual, *op, value),
                None => *op == Op::Neq,
            },
        }
    }
}

fn parse_clause(raw: &str) -> Result<Clause, String> {
    let raw = raw.trim();
    if let Some(inner) = raw.strip_prefix('(').and_then(|r| r.strip_suffix(')')) {
        let alternatives = split_top(inner, " or ")
            .into_iter()
            .map(parse_clause)
            .collect::<Result<_, _>>()?;
        return Ok(Clause::AnyOf(alternatives));
    }

    let mut parts = raw.splitn(3, ' ');
    let (Some(field), Some(op), Some(literal)) = (parts.next(), parts.next(), parts.next()) else {
        return Err(format!("incomplete clause: {raw}"));
    };
    let op = match op {
        "eq" => Op::Eq,
        "neq" => Op::Neq,
        "gt" => Op::Gt,
        "gte" => Op::Gte,
        "lt" => Op::Lt,
        "lte" => Op::Lte,
        "like" => Op::Like,
        other => return Err(format!("unknown operator: {other}")),
    };
    Ok(Clause::Compare {
        field: field.to_string(),
        op,
        value: parse_literal(literal.trim())?,
    })
}

fn parse_literal(raw: &str) -> Result<Literal, String> {
    if raw.len() >= 2 && raw.starts_with('\'') && raw.ends_with('\'') {
        return Ok(Literal::Str(raw[1..raw.len() - 1].to_string()));
    }
    match raw {
        "true" => Ok(Literal::Bool(true)),
        "false" => Ok(Literal::Bool(false)),
        _ => raw
            .parse::<f64>()
            .map(Literal::Num)
            .map_err(|_| format!("invalid literal: {raw}")),
    }
}

/// Split on `sep` where it occurs outside quotes and parentheses.
fn split_top<'a>(input: &'a str, sep: &str) -> Vec<&'a str> {
    let bytes = input.as_bytes();
    let mut parts = Vec::new();
    let (mut depth, mut quoted, mut start, mut i) = (0usize, false, 0, 0);
    while i < bytes.len() {
        match bytes[i] {
            b'\'' => quoted = !quoted,
            b'(' if !quoted => depth += 1,
            b')' if !quoted => depth = depth.saturating_sub(1),
            _ if !quoted && depth == 0 && bytes[i..].starts_with(sep.as_bytes()) => {
                parts.push(&input[start..i]);
                i += sep.len();
                start = i;
                continue;
            }
            _ => {}
        }
        i += 1;
    }
    parts.push(&input[start..]);
    parts
}

fn compare(actual: &Value, op: Op, expected: &Literal) -> bool {
    use std::cmp::Ordering;

    let ordering = match (actual, expected) {
        (Value::String(a), Literal::Str(b)) => {
            if op == Op::Like {
                return wildcard_match(b, a);
            }
            Some(a.as_str().cmp(b.as_str()))
        }
        (Value::Number(a), Literal::Num(b)) => a.as_f64().and_then(|a| a.partial_cmp(b)),
        (Value::Bool(a), Literal::Bool(b)) => Some(a.cmp(b)),
        _ => None,
    };

    match (op, ordering) {
        (Op::Neq, None) => true,
        (_, None) | (Op::Like, _) => false,
        (Op::Eq, Some(o)) => o == Ordering::Equal,
        (Op::Neq, Some(o)) => o != Ordering::Equal,
        (Op::Gt, Some(o)) => o == Ordering::Greater,
        (Op::Gte, Some(o)) => o != Ordering::Less,
        (Op::Lt, Some(o)) => o == Ordering::Less,
        (Op::Lte, Some(o)) => o != Ordering::Greater,
    }
}

/// Match `text` against `pattern`, where `*` stands for any run of characters.
fn wildcard_match(pattern: &str, text: &str) -> bool {
    let pieces: Vec<&str> = pattern.split('*').collect();
    let (first, rest) = match pieces.split_first() {
        Some(split) => split,
        None => return text.is_empty(),
    };
    let Some(mut remaining) = text.strip_prefix(first) else {
        return false;
    };
    let Some((last, middle)) = rest.split_last() else {
        return remaining.is_empty();
    };
    for piece in middle {
        match remaining.find(piece) {
            Some(pos) => remaining = &remaining[pos + piece.len()..],
            None => return false,
        }
    }
    remaining.ends_with(last)
}
