//! Synchronous client core for the Logo Objects REST API.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). Transport, authentication
//! and retries belong to the host.
//!
//! # Design
//! - `LogoClient` is stateless; it holds only the API root URL.
//! - Each operation is split into `build_*` (produces request) and
//!   `parse_*` (consumes response), so the I/O boundary is explicit.
//! - `query` turns search criteria into the server's filter dialect and
//!   collection options into a query string. Both are pure functions.
//! - Records can be read as the typed DTOs in `types` or as
//!   `serde_json::Value`.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod query;
pub mod resource;
pub mod types;

pub use client::LogoClient;
pub use config::ClientConfig;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use query::{
    build_query_string, build_search_query, create_field_mapping, Criteria, FieldMapping, FieldNameStrategy,
    FieldValue, OperatorSet, QueryOptions, Scalar, Sort, SortDirection, UpperCase,
};
pub use resource::{endpoints, CustomEndpoint, Resource};
pub use types::{Page, StopCause, StopCausePatch, UnitSet};
