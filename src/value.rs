//! Typed values produced by decoding.
//!
//! Null and unknown values carry their type, and empty collections carry their
//! element type, so `Value::ty()` is well defined for every value.

use crate::types::Type;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Value {
    Null(Type),
    /// Placeholder for a value that is only known later (e.g. computed attributes).
    Unknown(Type),
    Bool(bool),
    Number(serde_json::Number),
    String(String),
    List { elem: Type, items: Vec<Value> },
    Set { elem: Type, items: Vec<Value> },
    Map { elem: Type, entries: BTreeMap<String, Value> },
    Object(BTreeMap<String, Value>),
    Tuple(Vec<Value>),
}

impl Value {
    pub fn null(ty: Type) -> Self {
        Value::Null(ty)
    }

    pub fn unknown(ty: Type) -> Self {
        Value::Unknown(ty)
    }

    pub fn string(s: impl Into<String>) -> Self {
        Value::String(s.into())
    }

    pub fn list(elem: Type, items: Vec<Value>) -> Self {
        Value::List { elem, items }
    }

    /// Build a set value; equal items collapse into one, first occurrence wins.
    pub fn set(elem: Type, items: Vec<Value>) -> Self {
        let mut unique: Vec<Value> = Vec::with_capacity(items.len());
        for item in items {
            if !unique.contains(&item) {
                unique.push(item);
            }
        }
        Value::Set {
            elem,
            items: unique,
        }
    }

    pub fn map(elem: Type, entries: BTreeMap<String, Value>) -> Self {
        Value::Map { elem, entries }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null(_))
    }

    /// Structural type of this value.
    pub fn ty(&self) -> Type {
        match self {
            Value::Null(ty) | Value::Unknown(ty) => ty.clone(),
            Value::Bool(_) => Type::Bool,
            Value::Number(_) => Type::Number,
            Value::String(_) => Type::String,
            Value::List { elem, .. } => Type::list(elem.clone()),
            Value::Set { elem, .. } => Type::set(elem.clone()),
            Value::Map { elem, .. } => Type::map(elem.clone()),
            Value::Object(attrs) => Type::Object(
                attrs
                    .iter()
                    .map(|(name, v)| (name.clone(), v.ty()))
                    .collect(),
            ),
            Value::Tuple(items) => Type::Tuple(items.iter().map(Value::ty).collect()),
        }
    }
}
