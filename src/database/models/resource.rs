use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sqlx::FromRow;
use uuid::Uuid;

/// Fields a client must supply when creating a task or goal, in wire spelling.
pub const REQUIRED_FIELDS: &[&str] = &["name", "description", "dueDate"];

/// The two managed collections. Both share the same record shape and contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Task,
    Goal,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 2] = [ResourceKind::Task, ResourceKind::Goal];

    /// Collection name; doubles as the table name and the route segment.
    pub fn collection(self) -> &'static str {
        match self {
            ResourceKind::Task => "tasks",
            ResourceKind::Goal => "goals",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ResourceKind::Task => "Task",
            ResourceKind::Goal => "Goal",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A persisted task or goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    /// Calendar date as sent by the client, never parsed.
    pub due_date: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated creation payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewResource {
    pub name: String,
    pub description: String,
    pub due_date: String,
}

/// Raw creation body. Only the keys in [`REQUIRED_FIELDS`] are ever read.
#[derive(Debug, Clone, Default)]
pub struct ResourceInput(Map<String, Value>);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Missing required fields: {}", missing_list(.field_errors))]
pub struct ValidationError {
    pub field_errors: BTreeMap<String, String>,
}

fn missing_list(field_errors: &BTreeMap<String, String>) -> String {
    REQUIRED_FIELDS
        .iter()
        .filter(|field| field_errors.contains_key(**field))
        .copied()
        .collect::<Vec<_>>()
        .join(", ")
}

impl ResourceInput {
    /// Non-object bodies are treated as empty, so they fail validation on every field.
    pub fn from_json(body: Value) -> Self {
        match body {
            Value::Object(map) => Self(map),
            _ => Self::default(),
        }
    }

    pub fn validate(&self) -> Result<NewResource, ValidationError> {
        let mut field_errors = BTreeMap::new();

        for field in REQUIRED_FIELDS {
            let problem = match self.0.get(*field) {
                Some(Value::String(s)) if !s.is_empty() => continue,
                Some(Value::String(_)) | Some(Value::Null) | None => "This field is required",
                Some(_) => "This field must be a string",
            };
            field_errors.insert(field.to_string(), problem.to_string());
        }

        if !field_errors.is_empty() {
            return Err(ValidationError { field_errors });
        }

        Ok(NewResource {
            name: self.text("name"),
            description: self.text("description"),
            due_date: self.text("dueDate"),
        })
    }

    fn text(&self, field: &str) -> String {
        self.0
            .get(field)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    }
}
