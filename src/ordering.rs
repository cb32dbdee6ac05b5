//! # Ordering Module
//!
//! Deterministic ordering policies for groups, subgroups, endpoints and
//! arbitrary configured lists.
//!
//! ## Explicit order with wildcard
//!
//! Configured orders are lists of names with an optional `"*"` marker:
//!
//! ```yaml
//! order: [Sites, Environments, "*", Webhooks]
//! ```
//!
//! Listed names sort by their position. Every unlisted name collapses onto the
//! wildcard's position and is ordered case-insensitively among its peers; with
//! no wildcard, unlisted names go to the end. Only the first `"*"` counts.
//!
//! ```
//! use apidocs::ordering::sort_by_order;
//!
//! let order: Vec<String> = ["Sites", "Environments", "*", "Webhooks"]
//!     .iter()
//!     .map(|s| s.to_string())
//!     .collect();
//! let groups = vec!["Webhooks", "API Keys", "Sites", "Environments"];
//! let sorted = sort_by_order(groups, &order, |name| *name);
//! assert_eq!(sorted, vec!["Sites", "Environments", "API Keys", "Webhooks"]);
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::config::OrderedDataConfig;
use crate::model::{Endpoint, Subgroup};
use crate::slug::value_to_string;

/// Marker for "everything not listed goes here".
pub const WILDCARD: &str = "*";

static TRAILING_PARAM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/\{[^}]+\}$").expect("Failed to compile trailing param regex"));

/// Sort key for one item against an explicit order list.
fn order_key(key: &str, order: &[String], wildcard: Option<usize>) -> (usize, String) {
    if let Some(index) = order.iter().position(|name| name == key) {
        (index, String::new())
    } else if let Some(index) = wildcard {
        (index, key.to_lowercase())
    } else {
        (order.len(), key.to_lowercase())
    }
}

/// Order `items` by an explicit order list with an optional wildcard.
///
/// An empty `order` returns `items` untouched. The sort is stable, so items
/// with equal keys keep their incoming order.
#[must_use]
pub fn sort_by_order<T, F>(items: Vec<T>, order: &[String], key_fn: F) -> Vec<T>
where
    F: Fn(&T) -> &str,
{
    if order.is_empty() {
        return items;
    }
    let wildcard = order.iter().position(|name| name == WILDCARD);

    let mut keyed: Vec<((usize, String), T)> = items
        .into_iter()
        .map(|item| (order_key(key_fn(&item), order, wildcard), item))
        .collect();
    keyed.sort_by(|a, b| a.0.cmp(&b.0));
    keyed.into_iter().map(|(_, item)| item).collect()
}

/// Order the subgroups of one group.
///
/// With a configured order this is [`sort_by_order`] on the name. Without one,
/// the ungrouped (empty-name) subgroup comes first and the rest follow
/// case-insensitively by name.
#[must_use]
pub fn sort_subgroups(subgroups: Vec<Subgroup>, order: &[String]) -> Vec<Subgroup> {
    if !order.is_empty() {
        return sort_by_order(subgroups, order, |sg| sg.name.as_str());
    }
    let mut subgroups = subgroups;
    subgroups.sort_by_cached_key(|sg| (!sg.name.is_empty(), sg.name.to_lowercase()));
    subgroups
}

/// Rank of an HTTP method within a resource cluster.
#[must_use]
pub fn method_rank(method: &str) -> u8 {
    match method {
        "GET" => 0,
        "POST" => 1,
        "PUT" => 2,
        "PATCH" => 3,
        "DELETE" => 4,
        _ => 99,
    }
}

/// URI with one trailing `/{param}` segment removed, so `/x/{id}` and `/x`
/// share a cluster.
#[must_use]
pub fn cluster_uri(uri: &str) -> String {
    TRAILING_PARAM.replace(uri, "").into_owned()
}

/// Sort key for an endpoint inside its subgroup: resource cluster, then
/// collection routes before item routes, then method rank.
#[must_use]
pub fn endpoint_sort_key(uri: &str, method: &str) -> (String, bool, u8) {
    let cluster = cluster_uri(uri);
    let is_item_route = cluster.len() != uri.len();
    (cluster, is_item_route, method_rank(method))
}

/// Order endpoints within a subgroup (stable).
///
/// For `rate-limits` routes this yields list (`GET`), create (`POST`), then
/// the single-item `GET`, `PUT`, `PATCH`, `DELETE`.
#[must_use]
pub fn sort_endpoints(endpoints: Vec<Endpoint>) -> Vec<Endpoint> {
    let mut endpoints = endpoints;
    endpoints.sort_by_cached_key(|ep| endpoint_sort_key(&ep.uri, &ep.method));
    endpoints
}

/// Order an arbitrary data collection by a configured field.
///
/// `data` may be a mapping (each entry becomes a `[key, record]` pair) or a
/// list (items are used as-is; a pair's record is its second element).
/// Items whose record is not a mapping or lacks the key field are dropped.
///
/// Items listed before the wildcard come first in listed order, then every
/// unlisted item alphabetically (case-insensitive), then items listed after the
/// wildcard in listed order. Two items with the same listed name share a slot
/// and the later one wins.
#[must_use]
pub fn order_data(data: &Value, config: &OrderedDataConfig) -> Vec<Value> {
    let items: Vec<Value> = match data {
        Value::Object(map) => map
            .iter()
            .map(|(k, v)| Value::Array(vec![Value::String(k.clone()), v.clone()]))
            .collect(),
        Value::Array(items) => items.clone(),
        _ => return Vec::new(),
    };

    let key_field = config.key.as_str();
    let order = &config.order;
    let (before_wildcard, after_wildcard) = match order.iter().position(|o| o == WILDCARD) {
        Some(index) => (&order[..index], &order[index + 1..]),
        None => (order.as_slice(), &[][..]),
    };

    let mut before: Vec<Option<Value>> = vec![None; before_wildcard.len()];
    let mut after: Vec<Option<Value>> = vec![None; after_wildcard.len()];
    let mut middle: Vec<(String, Value)> = Vec::new();

    for item in items {
        let Some(item_key) = record_key(&item, key_field) else {
            continue;
        };
        if let Some(index) = before_wildcard.iter().position(|o| *o == item_key) {
            before[index] = Some(item);
        } else if let Some(index) = after_wildcard.iter().position(|o| *o == item_key) {
            after[index] = Some(item);
        } else {
            middle.push((item_key.to_lowercase(), item));
        }
    }

    middle.sort_by(|a, b| a.0.cmp(&b.0));

    before
        .into_iter()
        .flatten()
        .chain(middle.into_iter().map(|(_, item)| item))
        .chain(after.into_iter().flatten())
        .collect()
}

/// The key field of an item's record, if the item qualifies for ordering.
fn record_key(item: &Value, key_field: &str) -> Option<String> {
    let record = match item {
        Value::Array(pair) => pair.get(1)?,
        other => other,
    };
    match record.as_object()?.get(key_field)? {
        Value::Null | Value::Bool(false) => None,
        value => Some(value_to_string(value)),
    }
}
