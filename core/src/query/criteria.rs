//! Search criteria: the values a caller supplies per logical field.
//!
//! # Design
//! A criteria value is one of three shapes: a bare scalar, a list of scalars
//! (any-of), or a set of comparison operators. The shape is fixed when the
//! value is constructed, either explicitly through the `From` impls and the
//! `OperatorSet` builder, or once at the JSON boundary by
//! `FieldValue::classify`. The compiler never inspects runtime types.

use std::fmt;

use serde_json::Value;

/// A single literal operand.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl Scalar {
    /// Classify a JSON scalar. Arrays, objects and `null` are not scalars.
    pub fn from_json(value: &Value) -> Option<Scalar> {
        match value {
            Value::String(s) => Some(Scalar::Str(s.clone())),
            Value::Bool(b) => Some(Scalar::Bool(*b)),
            Value::Number(n) => n
                .as_i64()
                .map(Scalar::Int)
                .or_else(|| n.as_f64().map(Scalar::Float)),
            _ => None,
        }
    }
}

/// Renders the operand as a filter literal: strings are wrapped in single
/// quotes verbatim (embedded quotes are not escaped), everything else is bare.
impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Str(s) => write!(f, "'{s}'"),
            Scalar::Int(n) => write!(f, "{n}"),
            Scalar::Float(n) => write_float(f, *n),
            Scalar::Bool(b) => write!(f, "{b}"),
        }
    }
}

/// Number-to-string rules of the filter dialect's callers: plain decimal for
/// magnitudes in `[1e-6, 1e21)`, otherwise `<mantissa>e<sign><exp>`. Negative
/// zero prints as `0`.
fn write_float(f: &mut fmt::Formatter<'_>, n: f64) -> fmt::Result {
    if n.is_nan() {
        return f.write_str("NaN");
    }
    if n.is_infinite() {
        return f.write_str(if n > 0.0 { "Infinity" } else { "-Infinity" });
    }
    if n == 0.0 {
        return f.write_str("0");
    }
    let magnitude = n.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return write!(f, "{n}");
    }
    let exponential = format!("{n:e}");
    match exponential.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => write!(f, "{mantissa}e+{exp}"),
        _ => f.write_str(&exponential),
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Str(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Str(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Int(value)
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Scalar::Int(value.into())
    }
}

impl From<u32> for Scalar {
    fn from(value: u32) -> Self {
        Scalar::Int(value.into())
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Float(value)
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

/// Comparison operators applied to one field. Each present operator becomes
/// its own clause, always emitted in `eq, neq, gt, gte, lt, lte, like, in`
/// order regardless of the order they were set in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OperatorSet {
    pub eq: Option<Scalar>,
    pub neq: Option<Scalar>,
    pub gt: Option<Scalar>,
    pub gte: Option<Scalar>,
    pub lt: Option<Scalar>,
    pub lte: Option<Scalar>,
    pub like: Option<Scalar>,
    pub in_list: Option<Vec<Scalar>>,
}

impl OperatorSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq(mut self, value: impl Into<Scalar>) -> Self {
        self.eq = Some(value.into());
        self
    }

    pub fn neq(mut self, value: impl Into<Scalar>) -> Self {
        self.neq = Some(value.into());
        self
    }

    pub fn gt(mut self, value: impl Into<Scalar>) -> Self {
        self.gt = Some(value.into());
        self
    }

    pub fn gte(mut self, value: impl Into<Scalar>) -> Self {
        self.gte = Some(value.into());
        self
    }

    pub fn lt(mut self, value: impl Into<Scalar>) -> Self {
        self.lt = Some(value.into());
        self
    }

    pub fn lte(mut self, value: impl Into<Scalar>) -> Self {
        self.lte = Some(value.into());
        self
    }

    /// The pattern is sent as given; no wildcard is appended.
    pub fn like(mut self, pattern: impl Into<Scalar>) -> Self {
        self.like = Some(pattern.into());
        self
    }

    pub fn in_list<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Scalar>,
    {
        self.in_list = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Scalar operators that are set, paired with their wire name, in
    /// canonical order. `in` is handled separately since it carries a list.
    pub fn comparisons(&self) -> impl Iterator<Item = (&'static str, &Scalar)> {
        [
            ("eq", &self.eq),
            ("neq", &self.neq),
            ("gt", &self.gt),
            ("gte", &self.gte),
            ("lt", &self.lt),
            ("lte", &self.lte),
            ("like", &self.like),
        ]
        .into_iter()
        .filter_map(|(op, operand)| operand.as_ref().map(|v| (op, v)))
    }

    pub fn is_empty(&self) -> bool {
        self.comparisons().next().is_none() && self.in_list.is_none()
    }
}

/// The condition requested for one field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Strings match by prefix, other scalars by equality.
    Scalar(Scalar),
    /// Matches any of the listed values.
    List(Vec<Scalar>),
    Operators(OperatorSet),
}

impl FieldValue {
    /// Classify a JSON value into a criteria shape.
    ///
    /// Returns `None` for `null` and for objects that carry no recognized
    /// operator key, which the compiler treats as an absent field. Array
    /// elements (and `in` operands) that are not scalars are dropped.
    pub fn classify(value: &Value) -> Option<FieldValue> {
        match value {
            Value::Null => None,
            Value::Array(items) => Some(FieldValue::List(scalars(items))),
            Value::Object(map) => {
                let operand = |key: &str| map.get(key).and_then(Scalar::from_json);
                let ops = OperatorSet {
                    eq: operand("eq"),
                    neq: operand("neq"),
                    gt: operand("gt"),
                    gte: operand("gte"),
                    lt: operand("lt"),
                    lte: operand("lte"),
                    like: operand("like"),
                    in_list: map.get("in").and_then(Value::as_array).map(|a| scalars(a)),
                };
                if ops.is_empty() {
                    None
                } else {
                    Some(FieldValue::Operators(ops))
                }
            }
            other => Scalar::from_json(other).map(FieldValue::Scalar),
        }
    }
}

fn scalars(items: &[Value]) -> Vec<Scalar> {
    items.iter().filter_map(Scalar::from_json).collect()
}

macro_rules! scalar_field_value {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for FieldValue {
                fn from(value: $ty) -> Self {
                    FieldValue::Scalar(value.into())
                }
            }
        )*
    };
}

scalar_field_value!(Scalar, &str, String, i64, i32, u32, f64, bool);

impl<S: Into<Scalar>> From<Vec<S>> for FieldValue {
    fn from(values: Vec<S>) -> Self {
        FieldValue::List(values.into_iter().map(Into::into).collect())
    }
}

impl From<OperatorSet> for FieldValue {
    fn from(ops: OperatorSet) -> Self {
        FieldValue::Operators(ops)
    }
}

/// Field name to condition, kept in insertion order. Entries without a value
/// stand for fields the caller left unset and never produce a clause.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Criteria {
    entries: Vec<(String, Option<FieldValue>)>,
}

impl Criteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.entries.push((field.into(), Some(value.into())));
        self
    }

    /// Record a field that may be unset, like an optional search form input.
    pub fn with_opt<V: Into<FieldValue>>(mut self, field: impl Into<String>, value: Option<V>) -> Self {
        self.entries.push((field.into(), value.map(Into::into)));
        self
    }

    /// Build criteria from a JSON object, classifying every member in
    /// document order. Anything other than an object yields empty criteria.
    pub fn from_json(value: &Value) -> Self {
        let entries = value
            .as_object()
            .map(|map| {
                map.iter()
                    .map(|(field, v)| (field.clone(), FieldValue::classify(v)))
                    .collect()
            })
            .unwrap_or_default();
        Self { entries }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&FieldValue>)> {
        self.entries.iter().map(|(f, v)| (f.as_str(), v.as_ref()))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scalar_literals() {
        assert_eq!(Scalar::from("ABC").to_string(), "'ABC'");
        assert_eq!(Scalar::from(42).to_string(), "42");
        assert_eq!(Scalar::from(100.0).to_string(), "100");
        assert_eq!(Scalar::from(2.5).to_string(), "2.5");
        assert_eq!(Scalar::from(true).to_string(), "true");
    }

    #[test]
    fn string_literal_keeps_embedded_quote() {
        assert_eq!(Scalar::from("O'Neil").to_string(), "'O'Neil'");
    }

    #[test]
    fn float_rendering() {
        assert_eq!(Scalar::Float(100.0).to_string(), "100");
        assert_eq!(Scalar::Float(2.5).to_string(), "2.5");
        assert_eq!(Scalar::Float(0.000001).to_string(), "0.000001");
        assert_eq!(Scalar::Float(1e-7).to_string(), "1e-7");
        assert_eq!(Scalar::Float(-1.5e-9).to_string(), "-1.5e-9");
        assert_eq!(Scalar::Float(1e20).to_string(), "100000000000000000000");
        assert_eq!(Scalar::Float(1e21).to_string(), "1e+21");
        assert_eq!(Scalar::Float(-2.5e22).to_string(), "-2.5e+22");
        assert_eq!(Scalar::Float(-0.0).to_string(), "0");
        assert_eq!(Scalar::Float(f64::INFINITY).to_string(), "Infinity");
        assert_eq!(Scalar::Float(f64::NAN).to_string(), "NaN");
    }

    #[test]
    fn classify_null_is_absent() {
        assert_eq!(FieldValue::classify(&Value::Null), None);
    }

    #[test]
    fn classify_scalars() {
        assert_eq!(
            FieldValue::classify(&json!("ABC")),
            Some(FieldValue::Scalar(Scalar::Str("ABC".into())))
        );
        assert_eq!(FieldValue::classify(&json!(1)), Some(FieldValue::Scalar(Scalar::Int(1))));
        assert_eq!(
            FieldValue::classify(&json!(1.25)),
            Some(FieldValue::Scalar(Scalar::Float(1.25)))
        );
    }

    #[test]
    fn classify_array_drops_non_scalars() {
        assert_eq!(
            FieldValue::classify(&json!([1, {"x": 1}, "a", null])),
            Some(FieldValue::List(vec![Scalar::Int(1), Scalar::Str("a".into())]))
        );
    }

    #[test]
    fn classify_operator_object() {
        let value = FieldValue::classify(&json!({"lte": 500, "gte": 100, "other": 1})).unwrap();
        assert_eq!(value, FieldValue::Operators(OperatorSet::new().gte(100).lte(500)));
    }

    #[test]
    fn classify_unrecognized_object_is_absent() {
        assert_eq!(FieldValue::classify(&json!({"between": [1, 2]})), None);
        assert_eq!(FieldValue::classify(&json!({})), None);
    }

    #[test]
    fn comparisons_follow_canonical_order() {
        let ops = OperatorSet::new().like("A*").lt(3).eq(1);
        let names: Vec<&str> = ops.comparisons().map(|(op, _)| op).collect();
        assert_eq!(names, vec!["eq", "lt", "like"]);
    }

    #[test]
    fn criteria_from_json_keeps_document_order() {
        let criteria = Criteria::from_json(&json!({"zeta": 1, "alpha": null, "mid": "x"}));
        let fields: Vec<&str> = criteria.iter().map(|(f, _)| f).collect();
        assert_eq!(fields, vec!["zeta", "alpha", "mid"]);
        assert!(criteria.iter().nth(1).unwrap().1.is_none());
    }

    #[test]
    fn criteria_from_non_object_is_empty() {
        assert!(Criteria::from_json(&json!([1, 2])).is_empty());
    }
}
