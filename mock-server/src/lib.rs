//! In-memory stand-in for a Logo Objects REST server.
//!
//! Records are untyped JSON objects stored per collection and identified by
//! `INTERNAL_REFERENCE`, which the server assigns on create. Collection reads
//! honor `q`, `sort`, `offset`, `limit`, `fields` and `count`.

pub mod filter;

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{Method, StatusCode},
    routing::{any, get},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::debug;

use crate::filter::Filter;

pub const INTERNAL_REFERENCE: &str = "INTERNAL_REFERENCE";

pub type Record = Map<String, Value>;

#[derive(Default)]
pub struct Store {
    next_id: i64,
    collections: HashMap<String, BTreeMap<i64, Record>>,
}

pub type Db = Arc<RwLock<Store>>;

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub q: Option<String>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
    pub fields: Option<String>,
    pub sort: Option<String>,
    #[serde(default)]
    pub count: bool,
}

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/api/v1/{resource}", get(list_records).post(create_record))
        .route(
            "/api/v1/{resource}/{id}",
            get(get_record)
                .put(replace_record)
                .patch(patch_record)
                .delete(delete_record),
        )
        .route("/api/v1/{resource}/{id}/{*operation}", any(custom_operation))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_records(
    State(db): State<Db>,
    Path(resource): Path<String>,
    Query(params): Query<ListParams>,
) -> Result<Json<Value>, (StatusCode, String)> {
    debug!(%resource, ?params, "list");
    let filter = Filter::parse(params.q.as_deref().unwrap_or_default())
        .map_err(|e| (StatusCode::BAD_REQUEST, e))?;

    let store = db.read().await;
    let mut matching: Vec<&Record> = store
        .collections
        .get(&resource)
        .map(|records| records.values().filter(|r| filter.matches(r)).collect())
        .unwrap_or_default();

    if let Some(sort) = params.sort.as_deref() {
        let (fields, descending) = parse_sort(sort);
        matching.sort_by(|a, b| {
            let ordering = fields
                .iter()
                .map(|f| compare_values(a.get(*f), b.get(*f)))
                .find(|o| *o != Ordering::Equal)
                .unwrap_or(Ordering::Equal);
            if descending {
                ordering.reverse()
            } else {
                ordering
            }
        });
    }

    let total = matching.len();
    let projection: Option<Vec<&str>> = params.fields.as_deref().map(|f| f.split(',').collect());
    let items: Vec<Value> = matching
        .into_iter()
        .skip(params.offset.unwrap_or(0))
        .take(params.limit.unwrap_or(usize::MAX))
        .map(|record| project(record, projection.as_deref()))
        .collect();

    let mut body = json!({ "count": items.len(), "items": items });
    if params.count {
        body["totalCount"] = json!(total);
    }
    Ok(Json(body))
}

async fn create_record(
    State(db): State<Db>,
    Path(resource): Path<String>,
    Json(mut record): Json<Record>,
) -> (StatusCode, Json<Record>) {
    let mut store = db.write().await;
    store.next_id += 1;
    let id = store.next_id;
    record.insert(INTERNAL_REFERENCE.to_string(), json!(id));
    debug!(%resource, id, "create");
    store
        .collections
        .entry(resource)
        .or_default()
        .insert(id, record.clone());
    (StatusCode::CREATED, Json(record))
}

async fn get_record(
    State(db): State<Db>,
    Path((resource, id)): Path<(String, i64)>,
) -> Result<Json<Record>, StatusCode> {
    let store = db.read().await;
    store
        .collections
        .get(&resource)
        .and_then(|records| records.get(&id))
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn replace_record(
    State(db): State<Db>,
    Path((resource, id)): Path<(String, i64)>,
    Json(mut input): Json<Record>,
) -> Result<Json<Record>, StatusCode> {
    let mut store = db.write().await;
    let record = find_mut(&mut store, &resource, id)?;
    input.insert(INTERNAL_REFERENCE.to_string(), json!(id));
    *record = input;
    Ok(Json(record.clone()))
}

async fn patch_record(
    State(db): State<Db>,
    Path((resource, id)): Path<(String, i64)>,
    Json(input): Json<Record>,
) -> Result<Json<Record>, StatusCode> {
    let mut store = db.write().await;
    let record = find_mut(&mut store, &resource, id)?;
    for (key, value) in input {
        if key != INTERNAL_REFERENCE {
            record.insert(key, value);
        }
    }
    Ok(Json(record.clone()))
}

async fn delete_record(
    State(db): State<Db>,
    Path((resource, id)): Path<(String, i64)>,
) -> Result<StatusCode, StatusCode> {
    let mut store = db.write().await;
    store
        .collections
        .get_mut(&resource)
        .and_then(|records| records.remove(&id))
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or(StatusCode::NOT_FOUND)
}

/// Vendor sub-resource operations are not modelled; the server only checks
/// that the record exists and echoes the invocation back.
async fn custom_operation(
    State(db): State<Db>,
    method: Method,
    Path((resource, id, operation)): Path<(String, i64, String)>,
    body: String,
) -> Result<Json<Value>, StatusCode> {
    let store = db.read().await;
    let exists = store
        .collections
        .get(&resource)
        .is_some_and(|records| records.contains_key(&id));
    if !exists {
        return Err(StatusCode::NOT_FOUND);
    }
    let body: Value = if body.trim().is_empty() {
        Value::Null
    } else {
        serde_json::from_str(&body).map_err(|_| StatusCode::BAD_REQUEST)?
    };
    Ok(Json(json!({
        "method": method.as_str(),
        "resource": resource,
        "id": id,
        "operation": operation,
        "body": body,
    })))
}

fn find_mut<'a>(store: &'a mut Store, resource: &str, id: i64) -> Result<&'a mut Record, StatusCode> {
    store
        .collections
        .get_mut(resource)
        .and_then(|records| records.get_mut(&id))
        .ok_or(StatusCode::NOT_FOUND)
}

/// `CODE,NAME desc` -> (["CODE", "NAME"], true).
fn parse_sort(sort: &str) -> (Vec<&str>, bool) {
    let (fields, descending) = match sort.rsplit_once(' ') {
        Some((fields, "desc")) => (fields, true),
        Some((fields, "asc")) => (fields, false),
        _ => (sort, false),
    };
    let fields = fields.split(',').map(str::trim).filter(|f| !f.is_empty()).collect();
    (fields, descending)
}

fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        _ => Ordering::Equal,
    }
}

fn project(record: &Record, fields: Option<&[&str]>) -> Value {
    match fields {
        Some(fields) => Value::Object(
            record
                .iter()
                .filter(|(key, _)| fields.contains(&key.as_str()))
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
        ),
        None => Value::Object(record.clone()),
    }
}
