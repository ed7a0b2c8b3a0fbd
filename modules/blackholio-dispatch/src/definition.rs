//! Reducer definitions: a canonical name plus the shape of its argument record.

use serde::Serialize;

/// Structural description of one argument field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldShape {
    pub name: &'static str,
    pub ty: &'static str,
}

impl FieldShape {
    pub const fn new(name: &'static str, ty: &'static str) -> Self {
        Self { name, ty }
    }
}

/// Immutable once built. Exactly one per reducer name in a schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReducerDefinition {
    pub name: &'static str,
    pub fields: Vec<FieldShape>,
}

impl ReducerDefinition {
    pub fn new(name: &'static str, fields: Vec<FieldShape>) -> Self {
        Self { name, fields }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
