#![allow(clippy::unwrap_used, clippy::expect_used)]

use apidocs::config::SiteConfig;
use apidocs::slug::{endpoint_id, slugify};
use apidocs::{generate, BuildError, EndpointData, Group};
use serde_json::{json, Value};

fn data(value: Value) -> EndpointData {
    value.as_object().cloned().unwrap()
}

fn group_file(name: &str, description: &str, endpoints: Value) -> Value {
    json!({"name": name, "description": description, "endpoints": endpoints})
}

fn simple_endpoint(uri: &str, method: &str) -> Value {
    json!({"uri": uri, "httpMethods": [method], "metadata": {"title": format!("{method} {uri}")}})
}

fn sample_data() -> EndpointData {
    data(json!({
        "webhooks": group_file("Webhooks", "Event delivery", json!([
            simple_endpoint("api/v1/vector/webhooks", "GET"),
            simple_endpoint("api/v1/vector/webhooks/{webhook}", "DELETE")
        ])),
        "api_keys": group_file("API Keys", "", json!([
            simple_endpoint("api/v1/vector/api-keys", "GET")
        ])),
        "sites": group_file("Sites", "Manage sites", json!([
            {
                "uri": "api/v1/vector/sites/{site}/waf/rate-limits/{rule}",
                "httpMethods": ["GET"],
                "metadata": {"title": "Get rule", "subgroup": "WAF", "subgroupDescription": "Firewall"},
                "cleanUrlParameters": {"site": "site-1", "rule": 3}
            },
            {
                "uri": "api/v1/vector/sites",
                "httpMethods": ["POST"],
                "metadata": {"title": "Create site"},
                "bodyParameters": {"name": {"type": "string", "required": true}},
                "cleanBodyParameters": {"name": "example"},
                "responses": [
                    {"status": 201, "description": "Created", "content": "{\"a\":1}"},
                    {"status": 422, "description": "Invalid", "content": "not json"}
                ]
            },
            {
                "uri": "api/v1/vector/sites/{site}/db/export",
                "httpMethods": ["POST"],
                "metadata": {"title": "Export", "subgroup": "Database"}
            }
        ])),
        "environments": group_file("Environments", "", json!([
            simple_endpoint("api/v1/vector/environments", "GET")
        ]))
    }))
}

fn names(groups: &[Group]) -> Vec<&str> {
    groups.iter().map(|g| g.name.as_str()).collect()
}

#[test]
fn test_build_is_idempotent() {
    let input = sample_data();
    let mut config = SiteConfig::default();
    config.api_docs.order = vec!["Sites".to_string(), "*".to_string()];

    let first = generate(&input, &config).unwrap();
    let second = generate(&input, &config).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_group_order_with_wildcard() {
    let mut config = SiteConfig::default();
    config.api_docs.order = ["Sites", "Environments", "*", "Webhooks"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let groups = generate(&sample_data(), &config).unwrap();
    assert_eq!(names(&groups), vec!["Sites", "Environments", "API Keys", "Webhooks"]);
}

#[test]
fn test_group_order_unconfigured_follows_file_keys() {
    let groups = generate(&sample_data(), &SiteConfig::default()).unwrap();
    // api_keys, environments, sites, webhooks
    assert_eq!(names(&groups), vec!["API Keys", "Environments", "Sites", "Webhooks"]);
}

#[test]
fn test_default_subgroup_order() {
    let groups = generate(&sample_data(), &SiteConfig::default()).unwrap();
    let sites = groups.iter().find(|g| g.name == "Sites").unwrap();
    let subgroups: Vec<_> = sites.subgroups.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(subgroups, vec!["", "Database", "WAF"]);
    assert_eq!(sites.subgroups[2].description, "Firewall");
}

#[test]
fn test_endpoint_clustering() {
    let input = data(json!({
        "sites": group_file("Sites", "", json!([
            simple_endpoint("sites/{site}/waf/rate-limits", "GET"),
            simple_endpoint("sites/{site}/waf/rate-limits/{rule}", "GET"),
            simple_endpoint("sites/{site}/waf/rate-limits/{rule}", "DELETE"),
            simple_endpoint("sites/{site}/waf/rate-limits", "POST")
        ]))
    }));
    let groups = generate(&input, &SiteConfig::default()).unwrap();
    let order: Vec<_> = groups[0].subgroups[0]
        .endpoints
        .iter()
        .map(|e| (e.method.as_str(), e.uri.as_str()))
        .collect();
    assert_eq!(
        order,
        vec![
            ("GET", "sites/{site}/waf/rate-limits"),
            ("POST", "sites/{site}/waf/rate-limits"),
            ("GET", "sites/{site}/waf/rate-limits/{rule}"),
            ("DELETE", "sites/{site}/waf/rate-limits/{rule}"),
        ]
    );
}

#[test]
fn test_group_description_conflict_is_fatal() {
    let input = data(json!({
        "a": group_file("Sites", "A", json!([simple_endpoint("sites", "GET")])),
        "b": group_file("Sites", "B", json!([simple_endpoint("sites/{site}", "GET")]))
    }));
    let err = generate(&input, &SiteConfig::default()).unwrap_err();
    assert!(matches!(err, BuildError::ConflictingGroupDescription { .. }));
    let message = err.to_string();
    assert!(message.contains("\"Sites\""));
    assert!(message.contains("Existing: \"A\""));
    assert!(message.contains("New:      \"B\""));
}

#[test]
fn test_group_description_blank_merges() {
    let input = data(json!({
        "a": group_file("Sites", "A", json!([simple_endpoint("sites", "GET")])),
        "b": group_file("Sites", "", json!([simple_endpoint("sites/{site}", "GET")]))
    }));
    let groups = generate(&input, &SiteConfig::default()).unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].description, "A");
    assert_eq!(groups[0].endpoint_count(), 2);

    let reversed = data(json!({
        "a": group_file("Sites", "", json!([simple_endpoint("sites", "GET")])),
        "b": group_file("Sites", "A", json!([simple_endpoint("sites/{site}", "GET")]))
    }));
    let groups = generate(&reversed, &SiteConfig::default()).unwrap();
    assert_eq!(groups[0].description, "A");
}

#[test]
fn test_slug_and_id_stability() {
    assert_eq!(slugify("Rate Limits / WAF!!"), "rate-limits-waf");
    assert_eq!(endpoint_id("Sites", "GET", "api/v1/vector/sites/{site}"), "sites-get-sites-site");
}

#[test]
fn test_curl_example_for_create() {
    let groups = generate(&sample_data(), &SiteConfig::default()).unwrap();
    let sites = groups.iter().find(|g| g.name == "Sites").unwrap();
    let create = &sites.subgroups[0].endpoints[0];
    let curl = &create.examples.curl;

    assert!(curl.contains("  -H \"Content-Type: application/json\" \\\n  -H \"Accept: application/json\" \\\n"));
    assert!(!curl.contains("-H \"Accept: application/json\"\n"));
    assert!(curl.ends_with("-d '{\"name\":\"example\"}'"));
}

#[test]
fn test_fallback_sdk_example_single_argument() {
    let groups = generate(&sample_data(), &SiteConfig::default()).unwrap();
    let sites = groups.iter().find(|g| g.name == "Sites").unwrap();
    let waf = sites.subgroups.iter().find(|s| s.name == "WAF").unwrap();
    let get_rule = &waf.endpoints[0];

    // no templates configured
    assert_eq!(
        get_rule.examples.php,
        "$response = $vectorPro\n    ->sites->waf->rateLimits\n    ->get('site-1', 3);"
    );

    let webhooks = groups.iter().find(|g| g.name == "Webhooks").unwrap();
    let delete = &webhooks.subgroups[0].endpoints[1];
    assert_eq!(delete.method, "DELETE");
    assert_eq!(
        delete.examples.js,
        "const response = await vectorPro\n    .webhooks\n    .delete();"
    );
}

#[test]
fn test_response_content_normalization() {
    let groups = generate(&sample_data(), &SiteConfig::default()).unwrap();
    let sites = groups.iter().find(|g| g.name == "Sites").unwrap();
    let responses = &sites.subgroups[0].endpoints[0].responses;
    assert_eq!(responses[0].content, "{\n  \"a\": 1\n}");
    assert_eq!(responses[0].slug, "201-created");
    assert_eq!(responses[1].content, "not json");
}

#[test]
fn test_serialized_shape() {
    let groups = generate(&sample_data(), &SiteConfig::default()).unwrap();
    let value = serde_json::to_value(&groups).unwrap();
    let sites = value
        .as_array()
        .unwrap()
        .iter()
        .find(|g| g["name"] == "Sites")
        .unwrap();
    let create = &sites["subgroups"][0]["endpoints"][0];
    assert_eq!(create["id"], "sites-post-sites");
    assert_eq!(create["uri_display"], "/api/v1/vector/sites");
    assert_eq!(create["body_parameters"][0]["type"], "string");
    assert_eq!(create["body_parameters"][0]["enum_values"], json!([]));
    assert_eq!(create["examples"]["php"].as_str().unwrap().lines().next(), Some("$response = $vectorPro"));
    assert_eq!(create["_raw"]["metadata"]["title"], "Create site");
    assert!(create["openapi_yaml"].as_str().unwrap().contains("requestBody"));
}
