//! Request payload validation against operation key sets.

use crate::error::AppError;
use crate::model::{FieldRule, PayloadSchema};
use serde_json::{Map, Value};

pub struct RequestValidator;

impl RequestValidator {
    /// Create mode: every required key present and no key outside the schema.
    pub fn strict(body: Map<String, Value>, schema: &PayloadSchema) -> Result<Map<String, Value>, AppError> {
        let missing: Vec<&str> = schema
            .required
            .iter()
            .copied()
            .filter(|k| !body.contains_key(*k))
            .collect();
        if !missing.is_empty() {
            return Err(AppError::Validation(format!(
                "Missing required keys: {}. Required keys are {}",
                missing.join(", "),
                schema.required.join(", ")
            )));
        }
        let unexpected: Vec<&str> = body
            .keys()
            .map(String::as_str)
            .filter(|k| !schema.accepts(k))
            .collect();
        if !unexpected.is_empty() {
            return Err(AppError::Validation(format!("Unexpected keys: {}", unexpected.join(", "))));
        }
        check_rules(&body, schema)?;
        Ok(body)
    }

    /// Update mode: unknown keys are dropped; at least one known key must remain.
    pub fn partial(body: Map<String, Value>, schema: &PayloadSchema) -> Result<Map<String, Value>, AppError> {
        let body: Map<String, Value> = body.into_iter().filter(|(k, _)| schema.accepts(k)).collect();
        if body.is_empty() {
            return Err(AppError::Validation(format!(
                "At least one of the keys {} is required",
                schema.keys().collect::<Vec<_>>().join(", ")
            )));
        }
        check_rules(&body, schema)?;
        Ok(body)
    }
}

fn check_rules(body: &Map<String, Value>, schema: &PayloadSchema) -> Result<(), AppError> {
    for (key, rule) in schema.rules {
        let Some(v) = body.get(*key) else { continue };
        match rule {
            FieldRule::NotNull => {
                if v.is_null() {
                    return Err(AppError::Validation(format!("{} must not be null", key)));
                }
            }
            FieldRule::Integer => {
                if !v.is_null() && !v.is_i64() {
                    return Err(AppError::Validation(format!("{} must be an integer", key)));
                }
            }
            FieldRule::OneOf(allowed) => {
                let ok = v.as_str().is_some_and(|s| allowed.contains(&s));
                if !ok {
                    return Err(AppError::Validation(format!(
                        "{} must be one of: {}",
                        key,
                        allowed.join(", ")
                    )));
                }
            }
        }
    }
    Ok(())
}
