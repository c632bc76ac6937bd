//! Schema-free resource records.
//!
//! A [`Resource`] is an arbitrary JSON object whose only structural
//! requirement is an `id` field holding a comparable scalar (string,
//! number, or bool). The newtype exists so that every record entering
//! the store has passed that check exactly once, at construction.

use serde_json::{Map, Value};

use crate::error::StoreError;

/// Name of the mandatory identifier field.
pub const ID_FIELD: &str = "id";

static NULL: Value = Value::Null;

/// A schema-free record identified by a unique `id` field.
///
/// Constructed via [`Resource::from_value`], which enforces the `id`
/// requirement. Serializes transparently as the underlying JSON
/// object.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(transparent)]
pub struct Resource {
    fields: Map<String, Value>,
}

impl Resource {
    /// Validate a JSON value as a resource.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotAnObject`] when the value is not a JSON
    /// object, [`StoreError::MissingId`] when the `id` field is absent,
    /// and [`StoreError::NonScalarId`] when `id` is not a string,
    /// number, or bool.
    pub fn from_value(value: Value) -> Result<Self, StoreError> {
        let Value::Object(fields) = value else {
            return Err(StoreError::NotAnObject);
        };
        match fields.get(ID_FIELD) {
            None | Some(Value::Null) => Err(StoreError::MissingId),
            Some(Value::String(_) | Value::Number(_) | Value::Bool(_)) => Ok(Self { fields }),
            Some(Value::Array(_) | Value::Object(_)) => Err(StoreError::NonScalarId),
        }
    }

    /// The `id` value of this resource.
    ///
    /// Present by construction; a later shallow merge may have replaced
    /// it with any trusted body value, so the return type stays `Value`.
    pub fn id(&self) -> &Value {
        self.fields.get(ID_FIELD).unwrap_or(&NULL)
    }

    /// Whether this resource's `id` matches a path parameter.
    ///
    /// String ids compare directly; other scalars compare by their JSON
    /// rendering, so a resource with `"id": 7` matches the path segment
    /// `7`.
    pub fn matches_id(&self, key: &str) -> bool {
        match self.id() {
            Value::String(s) => s == key,
            Value::Number(n) => n.to_string() == key,
            Value::Bool(b) => b.to_string() == key,
            Value::Null | Value::Array(_) | Value::Object(_) => false,
        }
    }

    /// Shallow-merge a partial object into this resource.
    ///
    /// Incoming fields overwrite existing fields of the same name;
    /// all other fields are retained. The body is trusted: the merge
    /// may overwrite `id` itself.
    pub fn merge(&mut self, partial: Map<String, Value>) {
        for (key, value) in partial {
            self.fields.insert(key, value);
        }
    }

    /// Borrow the underlying field map.
    pub const fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Consume the resource into a plain JSON value.
    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }
}
