//! Verify the query compiler and query-string builder against JSON test
//! vectors stored in `test-vectors/`.
//!
//! Each vector file lists inputs in the loosely-typed shape callers of the
//! HTTP API write them, plus the exact expected output string.

use logo_core::{
    build_query_string, build_search_query, Criteria, FieldMapping, LogoClient, QueryOptions, Resource, Sort,
    SortDirection, UpperCase,
};
use serde_json::Value;

fn direction(value: &Value) -> SortDirection {
    match value.as_str().unwrap() {
        "asc" => SortDirection::Asc,
        "desc" => SortDirection::Desc,
        other => panic!("unknown sort direction: {other}"),
    }
}

fn strings(value: &Value) -> Vec<String> {
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap().to_string())
        .collect()
}

/// Map the four vector shapes onto `Sort`.
fn sort(value: &Value) -> Sort {
    if let Some(field) = value.as_str() {
        return Sort::from(field);
    }
    let parts = value.as_array().unwrap();
    match (&parts[0], parts.get(1)) {
        (Value::String(field), Some(dir)) => Sort::from((field.as_str(), direction(dir))),
        (fields @ Value::Array(_), Some(dir)) => Sort::from((strings(fields), direction(dir))),
        (fields @ Value::Array(_), None) => Sort::from(strings(fields)),
        other => panic!("unsupported sort shape: {other:?}"),
    }
}

fn options(value: &Value) -> QueryOptions {
    let mut options = QueryOptions::new();
    if let Some(limit) = value.get("limit") {
        options = options.limit(limit.as_u64().unwrap() as u32);
    }
    if let Some(offset) = value.get("offset") {
        options = options.offset(offset.as_u64().unwrap() as u32);
    }
    if let Some(fields) = value.get("fields") {
        options = options.fields(strings(fields));
    }
    if let Some(s) = value.get("sort") {
        options = options.sort(sort(s));
    }
    if let Some(q) = value.get("q") {
        options = options.q(q.as_str().unwrap());
    }
    if let Some(count) = value.get("count") {
        options = options.count(count.as_bool().unwrap());
    }
    options
}

// ---------------------------------------------------------------------------
// Search criteria
// ---------------------------------------------------------------------------

#[test]
fn search_test_vectors() {
    let raw = include_str!("../../test-vectors/search.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let criteria = Criteria::from_json(&case["criteria"]);
        let expected = case["expected"].as_str();

        let mapping = case.get("mapping").and_then(Value::as_object).map(|table| {
            table.iter().fold(FieldMapping::new(), |m, (field, server)| {
                m.with(field.as_str(), server.as_str().unwrap())
            })
        });
        let compile = || match &mapping {
            Some(mapping) => build_search_query(&criteria, mapping),
            None => build_search_query(&criteria, &UpperCase),
        };

        let actual = compile();
        assert_eq!(actual.as_deref(), expected, "{name}: filter");
        assert_eq!(compile(), actual, "{name}: repeat compile");
    }
}

// ---------------------------------------------------------------------------
// Query string
// ---------------------------------------------------------------------------

#[test]
fn query_string_test_vectors() {
    let raw = include_str!("../../test-vectors/query_string.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    let client = LogoClient::new("http://localhost:32001").unwrap();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let expected = case["expected"].as_str().unwrap();
        let options = options(&case["options"]);

        assert_eq!(build_query_string(&options), expected, "{name}: query string");

        // The request URL carries the same string after `?`, or nothing.
        let req = client.build_get_all(&Resource::SALES_CATEGORIES, &options);
        let expected_url = if expected.is_empty() {
            "http://localhost:32001/api/v1/SalesCategories".to_string()
        } else {
            format!("http://localhost:32001/api/v1/SalesCategories?{expected}")
        };
        assert_eq!(req.url, expected_url, "{name}: url");
    }
}
