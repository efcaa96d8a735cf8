//! Translation from caller-facing field names to server column names.

use std::borrow::Cow;

/// Resolves the server-side name for a criteria field.
pub trait FieldNameStrategy {
    fn server_name<'a>(&'a self, field: &'a str) -> Cow<'a, str>;
}

/// Default strategy: upper-case the identifier as-is.
///
/// No word boundaries are inferred, so `arpCode` becomes `ARPCODE` while
/// `arp_code` becomes `ARP_CODE`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UpperCase;

impl FieldNameStrategy for UpperCase {
    fn server_name<'a>(&'a self, field: &'a str) -> Cow<'a, str> {
        Cow::Owned(field.to_uppercase())
    }
}

/// Explicit field table. Fields without an entry fall back to `UpperCase`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMapping {
    entries: Vec<(String, String)>,
}

impl FieldMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map `field` to `server`, replacing an earlier entry for the same field.
    pub fn insert(&mut self, field: impl Into<String>, server: impl Into<String>) {
        let field = field.into();
        let server = server.into();
        match self.entries.iter_mut().find(|(f, _)| *f == field) {
            Some(entry) => entry.1 = server,
            None => self.entries.push((field, server)),
        }
    }

    pub fn with(mut self, field: impl Into<String>, server: impl Into<String>) -> Self {
        self.insert(field, server);
        self
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(f, _)| f == field)
            .map(|(_, server)| server.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(f, s)| (f.as_str(), s.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FieldNameStrategy for FieldMapping {
    fn server_name<'a>(&'a self, field: &'a str) -> Cow<'a, str> {
        match self.get(field) {
            Some(server) => Cow::Borrowed(server),
            None => Cow::Owned(field.to_uppercase()),
        }
    }
}

impl<F: FieldNameStrategy + ?Sized> FieldNameStrategy for &F {
    fn server_name<'a>(&'a self, field: &'a str) -> Cow<'a, str> {
        (**self).server_name(field)
    }
}

/// Build a camelCase-keyed mapping for a list of server field names, keeping
/// the input order: `INTERNAL_REFERENCE` is reachable as `internalReference`.
pub fn create_field_mapping<I, S>(server_fields: I) -> FieldMapping
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut mapping = FieldMapping::new();
    for server in server_fields {
        let server = server.as_ref();
        mapping.insert(camel_case(server), server);
    }
    mapping
}

/// `UPPER_SNAKE` to `camelCase`: underscores are dropped, the character
/// after each dropped underscore is upper-cased, everything else lower-cased.
fn camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = false;
    for c in name.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.extend(c.to_lowercase());
        }
    }
    out
}
