//! Stateless HTTP request builder and response parser for Logo Objects.
//!
//! # Design
//! `LogoClient` holds only the API root URL and carries no mutable state
//! between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes the
//! `HttpResponse` the host got back. The same handful of methods serve every
//! collection; the collection is a `Resource` argument.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;
use url::Url;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::query::{build_query_string, build_search_query, Criteria, FieldNameStrategy, QueryOptions};
use crate::resource::{CustomEndpoint, Resource};
use crate::types::Page;

/// Synchronous, stateless client for the Logo Objects REST API.
#[derive(Debug, Clone)]
pub struct LogoClient {
    root: Url,
}

impl LogoClient {
    /// Client for `base_url` using the default API path.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Self::from_config(&ClientConfig::new(base_url))
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, ApiError> {
        let invalid = |reason: &str| ApiError::InvalidBaseUrl {
            url: config.base_url.clone(),
            reason: reason.to_string(),
        };

        let mut root = Url::parse(&config.base_url).map_err(|e| invalid(&e.to_string()))?;
        if !matches!(root.scheme(), "http" | "https") {
            return Err(invalid("scheme must be http or https"));
        }
        root.set_query(None);
        root.set_fragment(None);
        root.path_segments_mut()
            .map_err(|()| invalid("URL cannot be a base"))?
            .pop_if_empty()
            .extend(config.api_path.split('/').filter(|s| !s.is_empty()));

        Ok(Self { root })
    }

    /// Absolute URL of the API root, e.g. `http://erp:32001/api/v1`.
    pub fn root_url(&self) -> &str {
        self.root.as_str()
    }

    pub fn build_get_all(&self, resource: &Resource, options: &QueryOptions) -> HttpRequest {
        let url = self.url(resource, &[], &build_query_string(options));
        self.request(HttpMethod::Get, url, None)
    }

    pub fn build_get_by_id(&self, resource: &Resource, id: i64) -> HttpRequest {
        let url = self.url(resource, &[id.to_string()], "");
        self.request(HttpMethod::Get, url, None)
    }

    /// Collection read filtered by `criteria`. The compiled filter replaces
    /// `options.q`; when the criteria produce no filter, `options.q` is
    /// sent unchanged.
    pub fn build_search(
        &self,
        resource: &Resource,
        criteria: &Criteria,
        names: &impl FieldNameStrategy,
        mut options: QueryOptions,
    ) -> HttpRequest {
        if let Some(filter) = build_search_query(criteria, names) {
            options.q = Some(filter);
        }
        self.build_get_all(resource, &options)
    }

    pub fn build_create<B: Serialize + ?Sized>(
        &self,
        resource: &Resource,
        input: &B,
    ) -> Result<HttpRequest, ApiError> {
        let body = encode(input)?;
        let url = self.url(resource, &[], "");
        Ok(self.request(HttpMethod::Post, url, Some(body)))
    }

    /// Full replacement of a record.
    pub fn build_update<B: Serialize + ?Sized>(
        &self,
        resource: &Resource,
        id: i64,
        input: &B,
    ) -> Result<HttpRequest, ApiError> {
        let body = encode(input)?;
        let url = self.url(resource, &[id.to_string()], "");
        Ok(self.request(HttpMethod::Put, url, Some(body)))
    }

    /// Partial update; only the fields present in `input` change.
    pub fn build_patch<B: Serialize + ?Sized>(
        &self,
        resource: &Resource,
        id: i64,
        input: &B,
    ) -> Result<HttpRequest, ApiError> {
        let body = encode(input)?;
        let url = self.url(resource, &[id.to_string()], "");
        Ok(self.request(HttpMethod::Patch, url, Some(body)))
    }

    pub fn build_delete(&self, resource: &Resource, id: i64) -> HttpRequest {
        let url = self.url(resource, &[id.to_string()], "");
        self.request(HttpMethod::Delete, url, None)
    }

    /// Call a custom sub-resource endpoint without a body.
    pub fn build_custom(
        &self,
        resource: &Resource,
        endpoint: &CustomEndpoint,
        params: &[(&str, &str)],
    ) -> Result<HttpRequest, ApiError> {
        let segments = endpoint.segments(params)?;
        let url = self.url(resource, &segments, "");
        Ok(self.request(endpoint.method, url, None))
    }

    /// Call a custom sub-resource endpoint with a JSON body.
    pub fn build_custom_with_body<B: Serialize + ?Sized>(
        &self,
        resource: &Resource,
        endpoint: &CustomEndpoint,
        params: &[(&str, &str)],
        input: &B,
    ) -> Result<HttpRequest, ApiError> {
        let segments = endpoint.segments(params)?;
        let body = encode(input)?;
        let url = self.url(resource, &segments, "");
        Ok(self.request(endpoint.method, url, Some(body)))
    }

    pub fn parse_list<T: DeserializeOwned>(&self, response: HttpResponse) -> Result<Page<T>, ApiError> {
        check_status(&response, &[200])?;
        decode(&response.body)
    }

    /// Parse the record returned by a get, update or patch.
    pub fn parse_record<T: DeserializeOwned>(&self, response: HttpResponse) -> Result<T, ApiError> {
        check_status(&response, &[200])?;
        decode(&response.body)
    }

    pub fn parse_created<T: DeserializeOwned>(&self, response: HttpResponse) -> Result<T, ApiError> {
        check_status(&response, &[200, 201])?;
        decode(&response.body)
    }

    pub fn parse_deleted(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, &[200, 204])?;
        Ok(())
    }

    /// Any 2xx is accepted. An empty body parses to `None`.
    pub fn parse_custom<T: DeserializeOwned>(&self, response: HttpResponse) -> Result<Option<T>, ApiError> {
        if !(200..300).contains(&response.status) {
            return Err(status_error(&response));
        }
        if response.body.trim().is_empty() {
            return Ok(None);
        }
        decode(&response.body).map(Some)
    }

    fn url(&self, resource: &Resource, segments: &[String], query: &str) -> String {
        let mut url = self.root.clone();
        // `root` was checked to be a base URL on construction.
        if let Ok(mut path) = url.path_segments_mut() {
            path.push(resource.name());
            path.extend(segments);
        }
        if !query.is_empty() {
            url.set_query(Some(query));
        }
        url.into()
    }

    fn request(&self, method: HttpMethod, url: String, body: Option<String>) -> HttpRequest {
        debug!(%method, %url, has_body = body.is_some(), "built request");
        let headers = match body {
            Some(_) => vec![("content-type".to_string(), "application/json".to_string())],
            None => Vec::new(),
        };
        HttpRequest {
            method,
            url,
            headers,
            body,
        }
    }
}

fn encode<B: Serialize + ?Sized>(input: &B) -> Result<String, ApiError> {
    serde_json::to_string(input).map_err(|e| ApiError::SerializationError(e.to_string()))
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Map a status outside `accepted` to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, accepted: &[u16]) -> Result<(), ApiError> {
    if accepted.contains(&response.status) {
        return Ok(());
    }
    Err(status_error(response))
}

fn status_error(response: &HttpResponse) -> ApiError {
    if response.status == 404 {
        return ApiError::NotFound;
    }
    ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    }
}
