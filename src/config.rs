//! # Configuration Module
//!
//! Site configuration for the docs pipeline, loaded from a YAML (or TOML) file
//! and optionally adjusted through environment variables.
//!
//! ## File format
//!
//! ```yaml
//! api_docs:
//!   order: [Sites, Environments, "*", Webhooks]
//!   subgroups:
//!     Sites: ["", WAF, "*"]
//! ordered_data:
//!   vector_pro_endpoints:
//!     key: name
//!     order: ["*"]
//! snippets:
//!   templates_dir: templates/snippets
//!   base_url: https://api.builtfast.com
//!   sdk_client: vectorPro
//! ```
//!
//! Every section and field is optional. Unknown keys are ignored.
//!
//! ## Environment Variables
//!
//! - `APIDOCS_TEMPLATES_DIR` - overrides `snippets.templates_dir`
//! - `APIDOCS_BASE_URL` - overrides `snippets.base_url`
//! - `APIDOCS_SDK_CLIENT` - overrides `snippets.sdk_client`

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};

use crate::ordering::WILDCARD;

/// Base URL used in curl examples when none is configured.
pub const DEFAULT_BASE_URL: &str = "https://api.builtfast.com";

/// SDK root identifier used in fallback examples when none is configured.
pub const DEFAULT_SDK_CLIENT: &str = "vectorPro";

/// Top-level site configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default)]
    pub api_docs: ApiDocsConfig,
    /// Named configurations for [`crate::ordering::order_data`]
    #[serde(default)]
    pub ordered_data: HashMap<String, OrderedDataConfig>,
    #[serde(default)]
    pub snippets: SnippetConfig,
}

/// Group and subgroup ordering for the API reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiDocsConfig {
    /// Explicit group order, optionally containing `"*"`
    #[serde(default)]
    pub order: Vec<String>,
    /// Group name → explicit subgroup order
    #[serde(default)]
    pub subgroups: HashMap<String, Vec<String>>,
}

impl ApiDocsConfig {
    /// Configured subgroup order for `group`, empty when there is none.
    #[must_use]
    pub fn subgroup_order(&self, group: &str) -> &[String] {
        self.subgroups.get(group).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Ordering of an arbitrary data collection by one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderedDataConfig {
    /// Field of each record used as the sort key
    #[serde(default = "default_key")]
    pub key: String,
    /// Explicit order, optionally containing `"*"`
    #[serde(default = "default_order")]
    pub order: Vec<String>,
}

fn default_key() -> String {
    "name".to_string()
}

fn default_order() -> Vec<String> {
    vec![WILDCARD.to_string()]
}

impl Default for OrderedDataConfig {
    fn default() -> Self {
        Self {
            key: default_key(),
            order: default_order(),
        }
    }
}

/// Code-example generation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnippetConfig {
    /// Root of the SDK example templates; `None` disables template lookup
    #[serde(default)]
    pub templates_dir: Option<PathBuf>,
    /// Base URL prefixed to every curl example
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Root identifier of the SDK client in fallback examples
    #[serde(default = "default_sdk_client")]
    pub sdk_client: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_sdk_client() -> String {
    DEFAULT_SDK_CLIENT.to_string()
}

impl Default for SnippetConfig {
    fn default() -> Self {
        Self {
            templates_dir: None,
            base_url: default_base_url(),
            sdk_client: default_sdk_client(),
        }
    }
}

impl SiteConfig {
    /// Parse a configuration document. `is_toml` selects the TOML parser,
    /// otherwise the text is read as YAML. An empty document is the default
    /// configuration.
    pub fn parse(contents: &str, is_toml: bool) -> anyhow::Result<Self> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        let config = if is_toml {
            toml::from_str(contents)?
        } else {
            serde_yaml::from_str(contents)?
        };
        Ok(config)
    }

    /// Apply `APIDOCS_*` environment overrides on top of the file settings.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| env::var(name).ok());
    }

    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup("APIDOCS_TEMPLATES_DIR").filter(|v| !v.is_empty()) {
            self.snippets.templates_dir = Some(PathBuf::from(dir));
        }
        if let Some(url) = lookup("APIDOCS_BASE_URL").filter(|v| !v.is_empty()) {
            self.snippets.base_url = url;
        }
        if let Some(client) = lookup("APIDOCS_SDK_CLIENT").filter(|v| !v.is_empty()) {
            self.snippets.sdk_client = client;
        }
    }

    /// Named `order_data` configuration, or the default one.
    #[must_use]
    pub fn ordered_data_config(&self, name: &str) -> OrderedDataConfig {
        self.ordered_data.get(name).cloned().unwrap_or_default()
    }
}

/// Load the site configuration from `path`.
///
/// Files ending in `.toml` are parsed as TOML, everything else as YAML.
/// A relative `snippets.templates_dir` is resolved against the directory
/// holding the config file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not parse.
pub fn load_config(path: &Path) -> anyhow::Result<SiteConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read site config: {}", path.display()))?;
    let is_toml = path
        .extension()
        .map(|e| e.eq_ignore_ascii_case("toml"))
        .unwrap_or(false);
    let mut config = SiteConfig::parse(&contents, is_toml)
        .with_context(|| format!("Failed to parse site config: {}", path.display()))?;

    if let (Some(dir), Some(base)) = (&config.snippets.templates_dir, path.parent()) {
        if dir.is_relative() {
            config.snippets.templates_dir = Some(base.join(dir));
        }
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = SiteConfig::default();
        assert!(config.api_docs.order.is_empty());
        assert_eq!(config.snippets.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.snippets.sdk_client, DEFAULT_SDK_CLIENT);
        assert_eq!(config.snippets.templates_dir, None);

        let ordered = config.ordered_data_config("missing");
        assert_eq!(ordered.key, "name");
        assert_eq!(ordered.order, vec!["*".to_string()]);
    }

    #[test]
    fn test_parse_yaml_partial() {
        let yaml = r#"
api_docs:
  order: [Sites, "*"]
  subgroups:
    Sites: ["", WAF]
ordered_data:
  endpoints:
    key: title
unknown_section: true
"#;
        let config = SiteConfig::parse(yaml, false).unwrap();
        assert_eq!(config.api_docs.order, vec!["Sites", "*"]);
        assert_eq!(config.api_docs.subgroup_order("Sites"), ["", "WAF"]);
        assert!(config.api_docs.subgroup_order("Webhooks").is_empty());

        let ordered = config.ordered_data_config("endpoints");
        assert_eq!(ordered.key, "title");
        assert_eq!(ordered.order, vec!["*"]);
        assert_eq!(config.snippets, SnippetConfig::default());
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
[api_docs]
order = ["Webhooks"]

[snippets]
sdk_client = "client"
"#;
        let config = SiteConfig::parse(toml, true).unwrap();
        assert_eq!(config.api_docs.order, vec!["Webhooks"]);
        assert_eq!(config.snippets.sdk_client, "client");
        assert_eq!(config.snippets.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_parse_empty_is_default() {
        assert_eq!(SiteConfig::parse("  \n", false).unwrap(), SiteConfig::default());
    }

    #[test]
    fn test_overrides() {
        let mut config = SiteConfig::default();
        config.apply_overrides(|name| match name {
            "APIDOCS_BASE_URL" => Some("http://localhost:8080".to_string()),
            "APIDOCS_SDK_CLIENT" => Some(String::new()),
            _ => None,
        });
        assert_eq!(config.snippets.base_url, "http://localhost:8080");
        // empty values are ignored
        assert_eq!(config.snippets.sdk_client, DEFAULT_SDK_CLIENT);
        assert_eq!(config.snippets.templates_dir, None);
    }

    #[test]
    fn test_load_config_resolves_templates_dir() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("site.yml");
        fs::write(&path, "snippets:\n  templates_dir: snippets\n").unwrap();
        let config = load_config(&path).unwrap();
        assert_eq!(config.snippets.templates_dir, Some(dir.path().join("snippets")));
    }

    #[test]
    fn test_load_config_missing_file() {
        let dir = tempdir().unwrap();
        let err = load_config(&dir.path().join("nope.yml")).unwrap_err();
        assert!(err.to_string().contains("nope.yml"));
    }

    #[test]
    fn test_load_config_invalid_yaml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.yml");
        fs::write(&path, "api_docs: [unclosed").unwrap();
        let err = load_config(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse site config"));
    }
}
