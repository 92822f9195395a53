//! Fail-open `{{dotted.path}}` template substitution.
//!
//! Tokens are resolved against a [`serde_json::Value`] context by sequential
//! property descent. Tokens that do not resolve are left in the output
//! verbatim, so a partially configured tenant still produces a usable prompt
//! instead of an error. Callers that want strictness run
//! [`validate_template`] first.

use regex::Regex;
use serde_json::Value;

const TOKEN_PATTERN: &str = r"\{\{\s*([A-Za-z0-9_]+(?:\.[A-Za-z0-9_]+)*)\s*\}\}";

/// Result of a template render: the resolved text plus every path that did
/// not resolve and was left in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateOutput {
    pub resolved: String,
    pub unresolved_paths: Vec<String>,
}

/// Result of a strict pre-flight check against a context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateValidation {
    pub valid: bool,
    pub missing: Vec<String>,
}

/// Resolve a dotted path against a context value.
///
/// Returns `None` on any missing intermediate key, on non-object descent,
/// and on an explicit JSON null.
fn resolve_path<'a>(context: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = context;
    for segment in path.split('.') {
        current = current.get(segment)?;
    }
    if current.is_null() {
        None
    } else {
        Some(current)
    }
}

/// Render a resolved value as substitution text. Strings substitute without
/// quotes, arrays join their elements with `", "` (these land in prose
/// prompts, not JSON), everything else uses its JSON form.
fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(value_to_text)
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}

/// Render a template against a context, reporting unresolved paths.
///
/// The token syntax is `{{dotted.path}}`; whitespace inside the braces is
/// tolerated. There is no compilation cache: the template is re-scanned on
/// every call, and the function holds no shared state.
pub fn render_template(template: &str, context: &Value) -> TemplateOutput {
    let token = Regex::new(TOKEN_PATTERN).expect("token pattern is valid");
    let mut unresolved_paths = Vec::new();

    let resolved = token
        .replace_all(template, |caps: &regex::Captures<'_>| {
            let path = &caps[1];
            match resolve_path(context, path) {
                Some(value) => value_to_text(value),
                None => {
                    unresolved_paths.push(path.to_string());
                    caps[0].to_string()
                }
            }
        })
        .into_owned();

    TemplateOutput {
        resolved,
        unresolved_paths,
    }
}

/// Lenient render that discards the unresolved-path report.
pub fn process_template(template: &str, context: &Value) -> String {
    render_template(template, context).resolved
}

/// Scan a template for `{{dotted.path}}` tokens, returning the raw paths in
/// order of appearance (duplicates included).
pub fn extract_template_variables(template: &str) -> Vec<String> {
    let token = Regex::new(TOKEN_PATTERN).expect("token pattern is valid");
    token
        .captures_iter(template)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// Cross-check a template's variables against a context, reporting the paths
/// that would not resolve.
pub fn validate_template(template: &str, context: &Value) -> TemplateValidation {
    let mut missing: Vec<String> = Vec::new();
    for path in extract_template_variables(template) {
        if resolve_path(context, &path).is_none() && !missing.contains(&path) {
            missing.push(path);
        }
    }

    TemplateValidation {
        valid: missing.is_empty(),
        missing,
    }
}
