//! The template's `package.json`.
//!
//! Only the `name` field is ever changed. Everything else, including key
//! order, survives the rewrite untouched.

use serde_json::{Map, Value};

use crate::domain::error::DomainError;

#[derive(Debug, Clone, PartialEq)]
pub struct PackageManifest {
    fields: Map<String, Value>,
}

impl PackageManifest {
    pub fn parse(text: &str) -> Result<Self, DomainError> {
        let value: Value =
            serde_json::from_str(text).map_err(|e| DomainError::InvalidManifest {
                reason: e.to_string(),
            })?;

        match value {
            Value::Object(fields) => Ok(Self { fields }),
            _ => Err(DomainError::InvalidManifest {
                reason: "top-level value is not an object".into(),
            }),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.fields.get("name").and_then(Value::as_str)
    }

    pub fn set_name(&mut self, name: &str) {
        self.fields
            .insert("name".to_string(), Value::String(name.to_string()));
    }

    /// Two-space indented JSON with a trailing newline.
    pub fn to_pretty_string(&self) -> Result<String, DomainError> {
        let mut out = serde_json::to_string_pretty(&self.fields).map_err(|e| {
            DomainError::InvalidManifest {
                reason: e.to_string(),
            }
        })?;
        out.push('\n');
        Ok(out)
    }
}
