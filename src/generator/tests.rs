#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use crate::config::{ApiDocsConfig, SnippetConfig};
use serde_json::{json, Value};

fn data(value: Value) -> EndpointData {
    value.as_object().cloned().unwrap()
}

fn normalizer() -> EndpointNormalizer {
    EndpointNormalizer::new(CodeExamples::new(&SnippetConfig::default()))
}

fn endpoint(uri: &str, method: &str, subgroup: &str) -> Value {
    json!({
        "uri": uri,
        "httpMethods": [method],
        "metadata": {"title": format!("{method} {uri}"), "subgroup": subgroup}
    })
}

#[test]
fn test_merge_description_rule() {
    let mut existing = String::new();
    assert!(merge_description(&mut existing, ""));
    assert_eq!(existing, "");
    assert!(merge_description(&mut existing, "A"));
    assert_eq!(existing, "A");
    assert!(merge_description(&mut existing, ""));
    assert!(merge_description(&mut existing, "A"));
    assert!(!merge_description(&mut existing, "B"));
    assert_eq!(existing, "A");
}

#[test]
fn test_build_groups_skips_invalid_files_and_records() {
    let input = data(json!({
        "a_list": [1, 2, 3],
        "b_no_name": {"endpoints": [endpoint("x", "GET", "")]},
        "c_no_endpoints": {"name": "Ghost"},
        "d_valid": {
            "name": "Sites",
            "endpoints": ["not a record", endpoint("api/v1/vector/sites", "GET", "")]
        }
    }));
    let groups = build_groups(&input, &ApiDocsConfig::default(), &mut normalizer()).unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].name, "Sites");
    assert_eq!(groups[0].slug, "sites");
    assert_eq!(groups[0].endpoint_count(), 1);
}

#[test]
fn test_build_groups_merges_files_in_key_order() {
    let input = data(json!({
        "zz_sites_extra": {
            "name": "Sites",
            "description": "",
            "endpoints": [endpoint("api/v1/vector/sites/{site}/logs", "GET", "")]
        },
        "b_webhooks": {"name": "Webhooks", "endpoints": [endpoint("api/v1/vector/webhooks", "GET", "")]},
        "a_sites": {
            "name": "Sites",
            "description": "Manage sites",
            "endpoints": [endpoint("api/v1/vector/sites", "GET", "")]
        }
    }));
    let groups = build_groups(&input, &ApiDocsConfig::default(), &mut normalizer()).unwrap();
    let names: Vec<_> = groups.iter().map(|g| g.name.as_str()).collect();
    assert_eq!(names, vec!["Sites", "Webhooks"]);
    assert_eq!(groups[0].description, "Manage sites");
    assert_eq!(groups[0].endpoint_count(), 2);
}

#[test]
fn test_build_groups_subgroup_conflict() {
    let input = data(json!({
        "sites": {
            "name": "Sites",
            "endpoints": [
                {"uri": "a", "metadata": {"subgroup": "WAF", "subgroupDescription": "Firewall"}},
                {"uri": "b", "metadata": {"subgroup": "WAF", "subgroupDescription": "Rules"}}
            ]
        }
    }));
    let err = build_groups(&input, &ApiDocsConfig::default(), &mut normalizer()).unwrap_err();
    assert_eq!(
        err,
        BuildError::ConflictingSubgroupDescription {
            group: "Sites".to_string(),
            subgroup: "WAF".to_string(),
            existing: "Firewall".to_string(),
            new: "Rules".to_string(),
        }
    );
}

#[test]
fn test_build_groups_subgroup_description_adopted() {
    let input = data(json!({
        "sites": {
            "name": "Sites",
            "endpoints": [
                {"uri": "a", "metadata": {"subgroup": "WAF"}},
                {"uri": "b", "metadata": {"subgroup": "WAF", "subgroupDescription": "Firewall"}}
            ]
        }
    }));
    let groups = build_groups(&input, &ApiDocsConfig::default(), &mut normalizer()).unwrap();
    let waf = &groups[0].subgroups[0];
    assert_eq!(waf.name, "WAF");
    assert_eq!(waf.slug, "waf");
    assert_eq!(waf.description, "Firewall");
    assert_eq!(waf.endpoints.len(), 2);
}

#[test]
fn test_build_groups_configured_subgroup_order() {
    let input = data(json!({
        "sites": {
            "name": "Sites",
            "endpoints": [
                endpoint("api/v1/vector/sites/{site}/db/export", "POST", "Database"),
                endpoint("api/v1/vector/sites", "GET", ""),
                endpoint("api/v1/vector/sites/{site}/waf/blocked-ips", "GET", "WAF"),
                endpoint("api/v1/vector/sites/{site}/ssh-keys", "GET", "SSH Keys")
            ]
        }
    }));
    let mut api_docs = ApiDocsConfig::default();
    api_docs
        .subgroups
        .insert("Sites".to_string(), vec!["WAF".to_string(), "*".to_string(), "".to_string()]);
    let groups = build_groups(&input, &api_docs, &mut normalizer()).unwrap();
    let names: Vec<_> = groups[0].subgroups.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["WAF", "Database", "SSH Keys", ""]);
}

#[test]
fn test_generate_applies_group_order() {
    let input = data(json!({
        "a": {"name": "Webhooks", "endpoints": [endpoint("api/v1/vector/webhooks", "GET", "")]},
        "b": {"name": "Sites", "endpoints": [endpoint("api/v1/vector/sites", "GET", "")]}
    }));
    let mut config = SiteConfig::default();
    let unordered = generate(&input, &config).unwrap();
    assert_eq!(unordered[0].name, "Webhooks");

    config.api_docs.order = vec!["Sites".to_string(), "*".to_string()];
    let ordered = generate(&input, &config).unwrap();
    assert_eq!(ordered[0].name, "Sites");
    assert_eq!(ordered[1].name, "Webhooks");
}
