//! Template rendering on top of minijinja.
//!
//! Inputs arrive as arbitrary JSON; they are converted into minijinja values
//! up front so the engine only ever sees maps, lists and scalars.

use minijinja::{Environment, ErrorKind, Value};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use thiserror::Error as ThisError;

use crate::error::PromptBuilderError;

#[derive(Debug, ThisError)]
pub enum RenderError {
    #[error("Template parsing error: {0}")]
    Syntax(String),

    #[error("{0}")]
    Render(String),
}

impl From<minijinja::Error> for RenderError {
    fn from(err: minijinja::Error) -> Self {
        if err.kind() == ErrorKind::SyntaxError {
            RenderError::Syntax(err.to_string())
        } else {
            RenderError::Render(err.to_string())
        }
    }
}

impl From<RenderError> for PromptBuilderError {
    fn from(err: RenderError) -> Self {
        PromptBuilderError::Render(err.to_string())
    }
}

pub struct TemplateRenderer {
    env: Environment<'static>,
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer {
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_keep_trailing_newline(true);
        // JSON nulls render as nothing rather than the literal `none`.
        env.set_formatter(|out, state, value| {
            if value.is_none() {
                Ok(())
            } else {
                minijinja::escape_formatter(out, state, value)
            }
        });
        Self { env }
    }

    /// Renders `template` with the members of `input` as top-level variables.
    /// A non-object `input` renders with no variables.
    pub fn render(&self, template: &str, input: &JsonValue) -> Result<String, RenderError> {
        let ctx = match input {
            JsonValue::Object(_) => json_to_value(input),
            _ => Value::from(BTreeMap::<String, Value>::new()),
        };
        Ok(self.env.render_str(template, ctx)?)
    }

    /// Wraps an already rendered prompt into `meta_prompt`, which refers to it
    /// as `{{ prompt }}`. An empty meta-prompt leaves the prompt untouched.
    pub fn wrap(&self, meta_prompt: &str, prompt: &str) -> Result<String, RenderError> {
        if meta_prompt.trim().is_empty() {
            return Ok(prompt.to_string());
        }
        let ctx = BTreeMap::from([("prompt".to_string(), Value::from(prompt))]);
        Ok(self.env.render_str(meta_prompt, Value::from(ctx))?)
    }
}

/// Converts JSON into the engine's generic value model. Integers take the
/// narrowest of i32/i64/u64 that fits; everything else numeric becomes f64.
pub fn json_to_value(json: &JsonValue) -> Value {
    match json {
        JsonValue::Null => Value::from(()),
        JsonValue::Bool(b) => Value::from(*b),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                match i32::try_from(i) {
                    Ok(small) => Value::from(small),
                    Err(_) => Value::from(i),
                }
            } else if let Some(u) = n.as_u64() {
                Value::from(u)
            } else {
                Value::from(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        JsonValue::String(s) => Value::from(s.as_str()),
        JsonValue::Array(items) => Value::from(items.iter().map(json_to_value).collect::<Vec<_>>()),
        JsonValue::Object(map) => Value::from(
            map.iter()
                .map(|(k, v)| (k.clone(), json_to_value(v)))
                .collect::<BTreeMap<String, Value>>(),
        ),
    }
}
