//! Search criteria compilation and collection query options.
//!
//! # Design
//! Everything here is pure string formatting over request-scoped values. The
//! filter compiler (`build_search_query`) and the query-string builder
//! (`build_query_string`) are independent; the former's output typically
//! lands in `QueryOptions::q`.

pub mod compile;
pub mod criteria;
pub mod mapping;
pub mod options;

pub use compile::build_search_query;
pub use criteria::{Criteria, FieldValue, OperatorSet, Scalar};
pub use mapping::{create_field_mapping, FieldMapping, FieldNameStrategy, UpperCase};
pub use options::{build_query_string, QueryOptions, Sort, SortDirection};
