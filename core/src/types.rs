//! Response envelopes and a few typed Logo Objects records.
//!
//! # Design
//! Records are also usable untyped as `serde_json::Value`; every parse method
//! is generic over the target type. The typed records below mirror the
//! server's UPPER_SNAKE field names through `rename_all`, and publish those
//! names in `FIELDS` so a camelCase mapping can be derived with
//! `create_field_mapping`.

use serde::{Deserialize, Serialize};

/// Server field holding a record's numeric identifier.
pub const INTERNAL_REFERENCE: &str = "INTERNAL_REFERENCE";

/// One page of a collection read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    /// Number of items in this page, when the server reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
    /// Number of matching records overall; only present when requested.
    #[serde(rename = "totalCount", default, skip_serializing_if = "Option::is_none")]
    pub total_count: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct UnitSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal_reference: Option<i64>,
    pub code: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_set_type: Option<i32>,
}

impl UnitSet {
    pub const FIELDS: [&'static str; 4] = [INTERNAL_REFERENCE, "CODE", "NAME", "UNIT_SET_TYPE"];
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct StopCause {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal_reference: Option<i64>,
    pub code: String,
    #[serde(default)]
    pub name: String,
}

impl StopCause {
    pub const FIELDS: [&'static str; 3] = [INTERNAL_REFERENCE, "CODE", "NAME"];
}

/// Partial update payload for `StopCause`; omitted fields are left as is.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct StopCausePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_set_uses_server_field_names() {
        let unit_set = UnitSet {
            internal_reference: Some(5),
            code: "05".to_string(),
            name: "Pieces".to_string(),
            unit_set_type: None,
        };
        let json = serde_json::to_value(&unit_set).unwrap();
        assert_eq!(json["INTERNAL_REFERENCE"], 5);
        assert_eq!(json["CODE"], "05");
        assert!(json.get("UNIT_SET_TYPE").is_none());
    }

    #[test]
    fn page_tolerates_missing_counts() {
        let page: Page<StopCause> = serde_json::from_str(r#"{"items":[{"CODE":"A"}]}"#).unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].name, "");
        assert_eq!(page.count, None);
        assert_eq!(page.total_count, None);
    }

    #[test]
    fn page_reads_total_count() {
        let page: Page<serde_json::Value> =
            serde_json::from_str(r#"{"items":[],"count":0,"totalCount":12}"#).unwrap();
        assert_eq!(page.total_count, Some(12));
    }

    #[test]
    fn stop_cause_patch_omits_unset_fields() {
        let patch = StopCausePatch {
            name: Some("Breakdown".to_string()),
            ..Default::default()
        };
        assert_eq!(serde_json::to_string(&patch).unwrap(), r#"{"NAME":"Breakdown"}"#);
    }
}
