//! SDK example templates.
//!
//! Hand-written examples for well-known routes live on disk as minijinja
//! templates, one per language:
//!
//! ```text
//! <templates_dir>/php/sites.create.php.jinja
//! <templates_dir>/js/sites.create.js.jinja
//! ```
//!
//! A route only gets a template lookup if `(path, method)` is registered in
//! [`TEMPLATE_MAP`]. Lookups are cached per build, including misses.

use minijinja::value::{Value as TemplateValue, ValueKind};
use minijinja::{escape_formatter, Environment, Error, ErrorKind, Output, State};
use once_cell::sync::Lazy;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::literal::{js_object, php_array, single_quote};
use super::{SdkLanguage, SnippetRequest};
use crate::slug::{strip_api_prefix, value_to_string};

/// Route → template name, keyed by `"{METHOD} {path}"` with the path taken
/// after the API prefix.
pub static TEMPLATE_MAP: Lazy<HashMap<String, &'static str>> =
    Lazy::new(|| {
        [
            // account
            (("account", "GET"), "account.getSummary"),
            (("ssh-keys", "GET"), "account.sshKeys.list"),
            (("ssh-keys", "POST"), "account.sshKeys.create"),
            (("ssh-keys/{key}", "GET"), "account.sshKeys.get"),
            (("ssh-keys/{key}", "DELETE"), "account.sshKeys.delete"),
            (("api-keys", "GET"), "account.apiKeys.list"),
            (("api-keys", "POST"), "account.apiKeys.create"),
            (("api-keys/{token}", "DELETE"), "account.apiKeys.delete"),
            (("global-secrets", "GET"), "account.secrets.list"),
            (("global-secrets", "POST"), "account.secrets.create"),
            (("global-secrets/{secret}", "GET"), "account.secrets.get"),
            (("global-secrets/{secret}", "PUT"), "account.secrets.update"),
            (("global-secrets/{secret}", "DELETE"), "account.secrets.delete"),
            (("php-versions", "GET"), "phpVersions.list"),
            // sites
            (("sites", "GET"), "sites.list"),
            (("sites", "POST"), "sites.create"),
            (("sites/{site}", "GET"), "sites.get"),
            (("sites/{site}", "PUT"), "sites.update"),
            (("sites/{site}", "DELETE"), "sites.delete"),
            (("sites/{site}/clone", "POST"), "sites.clone"),
            (("sites/{site}/suspend", "POST"), "sites.suspend"),
            (("sites/{site}/unsuspend", "POST"), "sites.unsuspend"),
            (("sites/{site}/sftp/reset-password", "POST"), "sites.resetSftpPassword"),
            (("sites/{site}/database/reset-password", "POST"), "sites.db.resetPassword"),
            (("sites/{site}/logs", "GET"), "sites.getLogs"),
            (("sites/{site}/purge-cache", "POST"), "sites.purgeCache"),
            (("sites/{site}/ssh-keys", "GET"), "sites.sshKeys.list"),
            (("sites/{site}/ssh-keys", "POST"), "sites.sshKeys.add"),
            (("sites/{site}/ssh-keys/{key}", "DELETE"), "sites.sshKeys.remove"),
            (("sites/{site}/db/import", "POST"), "sites.db.import"),
            (("sites/{site}/db/imports", "POST"), "sites.db.createImportSession"),
            (("sites/{site}/db/imports/{import}", "GET"), "sites.db.getImportStatus"),
            (("sites/{site}/db/imports/{import}/run", "POST"), "sites.db.runImport"),
            (("sites/{site}/db/export", "POST"), "sites.db.createExport"),
            (("sites/{site}/db/exports/{export}", "GET"), "sites.db.getExportStatus"),
            // sites: waf
            (("sites/{site}/waf/allowed-referrers", "GET"), "sites.waf.listAllowedReferrers"),
            (("sites/{site}/waf/allowed-referrers", "POST"), "sites.waf.addAllowedReferrer"),
            (("sites/{site}/waf/allowed-referrers/{hostname}", "DELETE"), "sites.waf.removeAllowedReferrer"),
            (("sites/{site}/waf/blocked-referrers", "GET"), "sites.waf.listBlockedReferrers"),
            (("sites/{site}/waf/blocked-referrers", "POST"), "sites.waf.addBlockedReferrer"),
            (("sites/{site}/waf/blocked-referrers/{hostname}", "DELETE"), "sites.waf.removeBlockedReferrer"),
            (("sites/{site}/waf/blocked-ips", "GET"), "sites.waf.listBlockedIPs"),
            (("sites/{site}/waf/blocked-ips", "POST"), "sites.waf.addBlockedIP"),
            (("sites/{site}/waf/blocked-ips/{ip}", "DELETE"), "sites.waf.removeBlockedIP"),
            (("sites/{site}/waf/rate-limits", "GET"), "sites.waf.listRateLimits"),
            (("sites/{site}/waf/rate-limits", "POST"), "sites.waf.createRateLimit"),
            (("sites/{site}/waf/rate-limits/{rule}", "GET"), "sites.waf.getRateLimit"),
            (("sites/{site}/waf/rate-limits/{rule}", "PUT"), "sites.waf.updateRateLimit"),
            (("sites/{site}/waf/rate-limits/{rule}", "DELETE"), "sites.waf.deleteRateLimit"),
            // environments
            (("sites/{site}/environments", "GET"), "environments.list"),
            (("sites/{site}/environments", "POST"), "environments.create"),
            (("environments", "GET"), "environments.listAll"),
            (("environments/{env}", "GET"), "environments.get"),
            (("environments/{env}", "PUT"), "environments.update"),
            (("environments/{env}", "DELETE"), "environments.delete"),
            (("environments/{env}/database/reset-password", "POST"), "environments.resetDatabasePassword"),
            (("environments/{env}/ssl", "GET"), "sites.ssl.getStatus"),
            (("environments/{env}/ssl/nudge", "POST"), "sites.ssl.nudge"),
            (("environments/{env}/secrets", "GET"), "environments.secrets.list"),
            (("environments/{env}/secrets", "POST"), "environments.secrets.create"),
            (("secrets/{secret}", "GET"), "environments.secrets.get"),
            (("secrets/{secret}", "PUT"), "environments.secrets.update"),
            (("secrets/{secret}", "DELETE"), "environments.secrets.delete"),
            (("environments/{env}/deployments", "GET"), "environments.deployments.list"),
            (("environments/{env}/deployments", "POST"), "environments.deployments.create"),
            (("deployments/{deployment}", "GET"), "environments.deployments.get"),
            (("environments/{env}/rollback", "POST"), "environments.deployments.rollback"),
            // webhooks
            (("webhooks", "GET"), "webhooks.list"),
            (("webhooks", "POST"), "webhooks.create"),
            (("webhooks/{webhook}", "GET"), "webhooks.get"),
            (("webhooks/{webhook}", "PUT"), "webhooks.update"),
            (("webhooks/{webhook}", "DELETE"), "webhooks.delete"),
            (("webhooks/{webhook}/logs", "GET"), "webhooks.listLogs"),
            (("webhooks/{webhook}/rotate-secret", "POST"), "webhooks.rotateSecret"),
            // events
            (("events", "GET"), "events.list"),
        ]
        .into_iter()
        .map(|((path, method), name)| (template_key(path, method), name))
        .collect()
    });

fn template_key(path: &str, method: &str) -> String {
    format!("{method} {path}")
}

/// Registered template name for a route, by exact match on the path after
/// the API prefix.
#[must_use]
pub fn template_name_for(uri: &str, method: &str) -> Option<&'static str> {
    TEMPLATE_MAP
        .get(&template_key(strip_api_prefix(uri), method))
        .copied()
}

/// File holding template `name` for `lang` under `dir`.
#[must_use]
pub fn template_path(dir: &Path, lang: SdkLanguage, name: &str) -> PathBuf {
    dir.join(lang.as_str())
        .join(format!("{name}.{}.jinja", lang.as_str()))
}

/// Data exposed to a template.
#[derive(Debug, Serialize)]
struct TemplateContext<'a> {
    method: &'a str,
    uri: &'a str,
    url_params: &'a Map<String, Value>,
    query_params: &'a Map<String, Value>,
    body_params: &'a Map<String, Value>,
    first_url_param: Option<&'a Value>,
    has_body_params: bool,
    has_query_params: bool,
}

impl<'a> TemplateContext<'a> {
    fn new(request: &SnippetRequest<'a>) -> Self {
        Self {
            method: request.method,
            uri: request.uri,
            url_params: request.url_params,
            query_params: request.query_params,
            body_params: request.body_params,
            first_url_param: request.url_params.values().next(),
            has_body_params: !request.body_params.is_empty(),
            has_query_params: !request.query_params.is_empty(),
        }
    }
}

/// Read-through cache of template sources for one build.
#[derive(Debug, Default)]
pub struct TemplateStore {
    dir: Option<PathBuf>,
    cache: HashMap<(SdkLanguage, String), Option<String>>,
}

impl TemplateStore {
    /// Store rooted at `dir`. Without a directory every lookup misses.
    #[must_use]
    pub fn new(dir: Option<PathBuf>) -> Self {
        Self {
            dir,
            cache: HashMap::new(),
        }
    }

    /// Number of cached lookups, hits and misses together.
    #[must_use]
    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }

    /// Template source for `(lang, name)`, reading the file on first use.
    pub fn load(&mut self, lang: SdkLanguage, name: &str) -> Option<&str> {
        let dir = self.dir.as_deref();
        self.cache
            .entry((lang, name.to_string()))
            .or_insert_with(|| read_template(dir, lang, name))
            .as_deref()
    }

    /// Render the registered template for a request, if one exists and
    /// renders cleanly. Render failures are logged and reported as `None`.
    pub fn render(&mut self, lang: SdkLanguage, request: &SnippetRequest<'_>) -> Option<String> {
        let name = template_name_for(request.uri, request.method)?;
        let source = self.load(lang, name)?;
        match render_snippet(source, &TemplateContext::new(request)) {
            Ok(rendered) => Some(rendered),
            Err(err) => {
                warn!(
                    template = name,
                    lang = %lang,
                    error = %err,
                    "Snippet template failed to render; using generated example"
                );
                None
            }
        }
    }
}

fn read_template(dir: Option<&Path>, lang: SdkLanguage, name: &str) -> Option<String> {
    let path = template_path(dir?, lang, name);
    match fs::read_to_string(&path) {
        Ok(source) => {
            debug!(path = %path.display(), "Loaded snippet template");
            Some(source)
        }
        Err(_) => {
            debug!(path = %path.display(), "No snippet template");
            None
        }
    }
}

fn render_snippet(source: &str, ctx: &TemplateContext<'_>) -> Result<String, Error> {
    let mut env = snippet_environment();
    env.add_template("snippet", source)?;
    env.get_template("snippet")?.render(ctx)
}

fn snippet_environment<'source>() -> Environment<'source> {
    let mut env = Environment::new();
    env.set_keep_trailing_newline(true);
    env.set_formatter(format_scalar);
    env.add_function("quote", |value: TemplateValue| -> Result<String, Error> {
        Ok(single_quote(&value_to_string(&to_json(&value)?)))
    });
    env.add_function(
        "php_array",
        |map: TemplateValue, indent: Option<usize>| -> Result<String, Error> {
            Ok(php_array(&to_json_map(&map)?, indent.unwrap_or(0)))
        },
    );
    env.add_function(
        "js_object",
        |map: TemplateValue, indent: Option<usize>| -> Result<String, Error> {
            Ok(js_object(&to_json_map(&map)?, indent.unwrap_or(0)))
        },
    );
    env.add_function("params_if_any", |map: TemplateValue| -> Result<String, Error> {
        let map = to_json_map(&map)?;
        if map.is_empty() {
            Ok(String::new())
        } else {
            Ok(php_array(&map, 0))
        }
    });
    env
}

/// Prints booleans as `true`/`false` and `none`/undefined as nothing, so
/// interpolated values read as PHP and JavaScript source.
fn format_scalar(out: &mut Output<'_>, state: &State<'_, '_>, value: &TemplateValue) -> Result<(), Error> {
    match value.kind() {
        ValueKind::Undefined | ValueKind::None => Ok(()),
        ValueKind::Bool => {
            out.write_str(if value.is_true() { "true" } else { "false" })?;
            Ok(())
        }
        _ => escape_formatter(out, state, value),
    }
}

fn to_json(value: &TemplateValue) -> Result<Value, Error> {
    serde_json::to_value(value).map_err(|e| Error::new(ErrorKind::InvalidOperation, e.to_string()))
}

/// Template maps as JSON maps; `none`/undefined count as empty.
fn to_json_map(value: &TemplateValue) -> Result<Map<String, Value>, Error> {
    match to_json(value)? {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Map::new()),
        other => Err(Error::new(
            ErrorKind::InvalidOperation,
            format!("expected a map, got {other}"),
        )),
    }
}
