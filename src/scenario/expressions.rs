//! Expression evaluation for ${{ }} placeholders in step templates
//!
//! Supports:
//! - ${{ credentials.email }} / ${{ credentials.password }}
//! - ${{ context.KEY }} - a value produced by an earlier step
//! - ${{ inputs.ALIAS }} - a resolved step requirement (fallbacks applied)

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use super::context::{Credentials, ScenarioContext};

static EXPRESSION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{\{\s*([^}]+)\s*\}\}").unwrap());

/// Errors that can occur during expression evaluation
#[derive(Debug, thiserror::Error)]
pub enum ExpressionError {
    #[error("Unknown variable: {0}")]
    UnknownVariable(String),

    #[error("Invalid expression syntax: {0}")]
    InvalidSyntax(String),
}

/// Everything a step template may reference.
pub struct RenderScope<'a> {
    pub credentials: &'a Credentials,
    pub context: &'a ScenarioContext,
    pub inputs: &'a HashMap<String, String>,
}

/// Evaluate all expressions in a string
pub fn evaluate(input: &str, scope: &RenderScope<'_>) -> Result<String, ExpressionError> {
    let mut result = input.to_string();

    for cap in EXPRESSION_REGEX.captures_iter(input) {
        let full_match = cap.get(0).unwrap().as_str();
        let expr = cap.get(1).unwrap().as_str().trim();

        let value = evaluate_single(expr, scope)?;
        result = result.replace(full_match, &value);
    }

    Ok(result)
}

/// Evaluate a single expression (without the ${{ }} wrapper)
fn evaluate_single(expr: &str, scope: &RenderScope<'_>) -> Result<String, ExpressionError> {
    let parts: Vec<&str> = expr.split('.').collect();

    if parts.len() != 2 {
        return Err(ExpressionError::InvalidSyntax(format!(
            "expressions must be NAMESPACE.NAME, got: {}",
            expr
        )));
    }

    match parts[0] {
        "credentials" => match parts[1] {
            "email" => Ok(scope.credentials.email.clone()),
            "password" => Ok(scope.credentials.password.clone()),
            other => Err(ExpressionError::UnknownVariable(format!(
                "credentials.{}",
                other
            ))),
        },

        "context" => scope
            .context
            .get(parts[1])
            .map(str::to_string)
            .ok_or_else(|| ExpressionError::UnknownVariable(format!("context.{}", parts[1]))),

        "inputs" => scope
            .inputs
            .get(parts[1])
            .cloned()
            .ok_or_else(|| ExpressionError::UnknownVariable(format!("inputs.{}", parts[1]))),

        _ => Err(ExpressionError::UnknownVariable(expr.to_string())),
    }
}

/// Check every expression in a string for well-formedness without needing a
/// runtime scope. Which variables exist is a runtime question; which shapes
/// are legal is not.
pub fn check_syntax(input: &str) -> Result<(), ExpressionError> {
    for cap in EXPRESSION_REGEX.captures_iter(input) {
        let expr = cap.get(1).unwrap().as_str().trim();
        let parts: Vec<&str> = expr.split('.').collect();

        if parts.len() != 2 {
            return Err(ExpressionError::InvalidSyntax(format!(
                "expressions must be NAMESPACE.NAME, got: {}",
                expr
            )));
        }

        match parts[0] {
            "credentials" => {
                if parts[1] != "email" && parts[1] != "password" {
                    return Err(ExpressionError::UnknownVariable(format!(
                        "credentials.{}",
                        parts[1]
                    )));
                }
            }
            "context" | "inputs" => {}
            other => {
                return Err(ExpressionError::UnknownVariable(format!(
                    "{}.{}",
                    other, parts[1]
                )));
            }
        }
    }

    Ok(())
}

/// Walk a YAML template checking every string leaf with [`check_syntax`].
pub fn check_template(template: &serde_yaml::Value) -> Result<(), ExpressionError> {
    match template {
        serde_yaml::Value::String(s) => check_syntax(s),
        serde_yaml::Value::Sequence(seq) => seq.iter().try_for_each(check_template),
        serde_yaml::Value::Mapping(map) => map.values().try_for_each(check_template),
        serde_yaml::Value::Tagged(tagged) => check_template(&tagged.value),
        _ => Ok(()),
    }
}

/// Render a YAML body template into a JSON value, evaluating any string
/// expressions and preserving structure.
pub fn render_body(
    template: &serde_yaml::Value,
    scope: &RenderScope<'_>,
) -> Result<serde_json::Value, ExpressionError> {
    match template {
        serde_yaml::Value::Null => Ok(serde_json::Value::Null),
        serde_yaml::Value::Bool(b) => Ok(serde_json::Value::Bool(*b)),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(serde_json::Value::Number(i.into()))
            } else if let Some(u) = n.as_u64() {
                Ok(serde_json::Value::Number(u.into()))
            } else if let Some(f) = n.as_f64() {
                Ok(serde_json::Number::from_f64(f)
                    .map(serde_json::Value::Number)
                    .unwrap_or(serde_json::Value::Null))
            } else {
                Ok(serde_json::Value::Null)
            }
        }
        serde_yaml::Value::String(s) => {
            let evaluated = evaluate(s, scope)?;
            Ok(serde_json::Value::String(evaluated))
        }
        serde_yaml::Value::Sequence(seq) => {
            let rendered: Result<Vec<_>, _> =
                seq.iter().map(|v| render_body(v, scope)).collect();
            Ok(serde_json::Value::Array(rendered?))
        }
        serde_yaml::Value::Mapping(map) => {
            let mut rendered = serde_json::Map::new();
            for (k, v) in map {
                let key = match k {
                    serde_yaml::Value::String(s) => s.clone(),
                    _ => serde_yaml::to_string(k).unwrap_or_default(),
                };
                rendered.insert(key, render_body(v, scope)?);
            }
            Ok(serde_json::Value::Object(rendered))
        }
        serde_yaml::Value::Tagged(tagged) => render_body(&tagged.value, scope),
    }
}
