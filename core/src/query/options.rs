//! Collection query options and their URL query-string encoding.
//!
//! Parameters are emitted in a fixed order (`limit`, `offset`, `fields`,
//! `sort`, `q`, `count`) and only when set. Values are form-urlencoded.

use std::fmt;

use url::form_urlencoded;

/// Direction shared by every field in a `Sort`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => f.write_str("asc"),
            SortDirection::Desc => f.write_str("desc"),
        }
    }
}

/// One or more sort fields with an optional direction. Without a direction
/// the server sorts ascending.
///
/// Built from any of the accepted call shapes:
/// `"CODE"`, `("CODE", Desc)`, `(vec!["CODE", "NAME"], Desc)`, `vec!["CODE", "NAME"]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    pub fields: Vec<String>,
    pub direction: Option<SortDirection>,
}

impl Sort {
    pub fn new<I, S>(fields: I, direction: Option<SortDirection>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
            direction,
        }
    }

    /// `CODE,NAME` or `CODE,NAME desc`.
    fn encode(&self) -> String {
        let fields = self.fields.join(",");
        match self.direction {
            Some(direction) => format!("{fields} {direction}"),
            None => fields,
        }
    }
}

impl From<&str> for Sort {
    fn from(field: &str) -> Self {
        Sort::new([field], None)
    }
}

impl From<String> for Sort {
    fn from(field: String) -> Self {
        Sort::new([field], None)
    }
}

impl From<(&str, SortDirection)> for Sort {
    fn from((field, direction): (&str, SortDirection)) -> Self {
        Sort::new([field], Some(direction))
    }
}

impl<S: Into<String>> From<Vec<S>> for Sort {
    fn from(fields: Vec<S>) -> Self {
        Sort::new(fields, None)
    }
}

impl<S: Into<String>> From<(Vec<S>, SortDirection)> for Sort {
    fn from((fields, direction): (Vec<S>, SortDirection)) -> Self {
        Sort::new(fields, Some(direction))
    }
}

/// Pagination, projection, ordering and raw filter for a collection read.
/// The options are independent of each other; nothing is cross-checked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryOptions {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub fields: Vec<String>,
    pub sort: Option<Sort>,
    /// Raw filter expression, sent as-is.
    pub q: Option<String>,
    /// Ask the server for the total number of matching records.
    pub count: bool,
}

impl QueryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn sort(mut self, sort: impl Into<Sort>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    pub fn q(mut self, filter: impl Into<String>) -> Self {
        self.q = Some(filter.into());
        self
    }

    pub fn count(mut self, count: bool) -> Self {
        self.count = count;
        self
    }
}

/// Encode `options` as `key=value&...` without the leading `?`. Returns an
/// empty string when no option is set.
pub fn build_query_string(options: &QueryOptions) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());

    if let Some(limit) = options.limit {
        query.append_pair("limit", &limit.to_string());
    }
    if let Some(offset) = options.offset {
        query.append_pair("offset", &offset.to_string());
    }
    if !options.fields.is_empty() {
        query.append_pair("fields", &options.fields.join(","));
    }
    if let Some(sort) = options.sort.as_ref().filter(|s| !s.fields.is_empty()) {
        query.append_pair("sort", &sort.encode());
    }
    if let Some(q) = &options.q {
        query.append_pair("q", q);
    }
    if options.count {
        query.append_pair("count", "true");
    }

    query.finish()
}
