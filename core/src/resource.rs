//! Addressing for Logo Objects collections and their custom sub-resources.

use std::borrow::Cow;
use std::fmt;

use crate::error::ApiError;
use crate::http::HttpMethod;

/// Name of a Logo Objects collection, used verbatim as a URL path segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Resource(Cow<'static, str>);

impl Resource {
    pub const ARP_SHIPMENT_LOCATIONS: Resource = Resource::from_static("ArpShipmentLocations");
    pub const ITEM_SLIPS: Resource = Resource::from_static("ItemSlips");
    pub const UNIT_SETS: Resource = Resource::from_static("UnitSets");
    pub const SALES_CATEGORIES: Resource = Resource::from_static("SalesCategories");
    pub const STOP_CAUSES: Resource = Resource::from_static("StopCauses");

    pub const fn from_static(name: &'static str) -> Self {
        Resource(Cow::Borrowed(name))
    }

    /// Any collection not covered by the constants above.
    pub fn new(name: impl Into<String>) -> Self {
        Resource(Cow::Owned(name.into()))
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A vendor-defined operation below a record, such as
/// `POST ItemSlips/{id}/FormSeriLotLines/{lOMtd}`.
///
/// `template` is relative to the collection and uses `{name}` placeholders,
/// each of which must occupy a whole path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CustomEndpoint {
    pub method: HttpMethod,
    pub template: &'static str,
}

impl CustomEndpoint {
    pub const fn new(method: HttpMethod, template: &'static str) -> Self {
        Self { method, template }
    }

    /// Substitute placeholders from `params` and return the path segments.
    /// Literal segments are kept as written; segment encoding is left to
    /// the URL builder.
    pub fn segments(&self, params: &[(&str, &str)]) -> Result<Vec<String>, ApiError> {
        self.template
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(|segment| match placeholder(segment) {
                Some(name) => params
                    .iter()
                    .find(|(key, _)| *key == name)
                    .map(|(_, value)| value.to_string())
                    .ok_or_else(|| ApiError::MissingPathParameter(name.to_string())),
                None => Ok(segment.to_string()),
            })
            .collect()
    }
}

fn placeholder(segment: &str) -> Option<&str> {
    segment.strip_prefix('{')?.strip_suffix('}')
}

/// Sub-resource operations exposed by the Logo Objects API that the host
/// applications call today.
pub mod endpoints {
    use super::CustomEndpoint;
    use crate::http::HttpMethod;

    pub const ITEM_SLIP_FORM_SERI_LOT_LINES: CustomEndpoint =
        CustomEndpoint::new(HttpMethod::Post, "{id}/FormSeriLotLines/{lOMtd}");
    pub const ITEM_SLIP_CANCEL: CustomEndpoint = CustomEndpoint::new(HttpMethod::Post, "{id}/Cancel");
    pub const UNIT_SET_UNITS: CustomEndpoint = CustomEndpoint::new(HttpMethod::Get, "{id}/Units");
    pub const ARP_SHIPMENT_LOCATION_DEFAULT: CustomEndpoint =
        CustomEndpoint::new(HttpMethod::Patch, "{id}/Default");
}
