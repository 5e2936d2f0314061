//! Structural type descriptors.
//!
//! JSON shape (same convention provider schemas use):
//!   "string" | "number" | "bool" | "dynamic"
//!   ["list", T] | ["set", T] | ["map", T]
//!   ["object", { "name": T, ... }]
//!   ["tuple", [T, ...]]
//!
//! Display uses type-expression syntax, e.g. `list(object({enabled=bool}))`.

use anyhow::{anyhow, bail};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value as Json};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Json", into = "Json")]
pub enum Type {
    Bool,
    Number,
    String,
    /// Placeholder for "any type"; the concrete type is only known per value.
    Dynamic,
    List(Box<Type>),
    Set(Box<Type>),
    Map(Box<Type>),
    Object(BTreeMap<String, Type>),
    Tuple(Vec<Type>),
}

impl Type {
    pub fn list(elem: Type) -> Self {
        Type::List(Box::new(elem))
    }

    pub fn set(elem: Type) -> Self {
        Type::Set(Box::new(elem))
    }

    pub fn map(elem: Type) -> Self {
        Type::Map(Box::new(elem))
    }

    pub fn empty_object() -> Self {
        Type::Object(BTreeMap::new())
    }
}

impl TryFrom<Json> for Type {
    type Error = anyhow::Error;

    fn try_from(raw: Json) -> anyhow::Result<Self> {
        match raw {
            Json::String(name) => match name.as_str() {
                "bool" => Ok(Type::Bool),
                "number" => Ok(Type::Number),
                "string" => Ok(Type::String),
                "dynamic" => Ok(Type::Dynamic),
                other => bail!("unknown primitive type {:?}", other),
            },
            Json::Array(mut parts) => {
                if parts.len() != 2 {
                    bail!(
                        "composite type must be a [kind, argument] pair, got {} elements",
                        parts.len()
                    );
                }
                let arg = parts.pop().ok_or_else(|| anyhow!("missing type argument"))?;
                let kind = parts.pop().ok_or_else(|| anyhow!("missing type kind"))?;
                let kind = kind
                    .as_str()
                    .ok_or_else(|| anyhow!("composite type kind must be a string, got {}", kind))?
                    .to_string();

                match kind.as_str() {
                    "list" => Ok(Type::list(Type::try_from(arg)?)),
                    "set" => Ok(Type::set(Type::try_from(arg)?)),
                    "map" => Ok(Type::map(Type::try_from(arg)?)),
                    "object" => {
                        let Json::Object(fields) = arg else {
                            bail!("object type argument must be a JSON object");
                        };
                        let mut attrs = BTreeMap::new();
                        for (name, ty) in fields {
                            attrs.insert(name, Type::try_from(ty)?);
                        }
                        Ok(Type::Object(attrs))
                    }
                    "tuple" => {
                        let Json::Array(elems) = arg else {
                            bail!("tuple type argument must be a JSON array");
                        };
                        let elems = elems
                            .into_iter()
                            .map(Type::try_from)
                            .collect::<anyhow::Result<Vec<_>>>()?;
                        Ok(Type::Tuple(elems))
                    }
                    other => bail!("unknown composite type kind {:?}", other),
                }
            }
            other => bail!("invalid type expression: {}", other),
        }
    }
}

impl From<Type> for Json {
    fn from(ty: Type) -> Json {
        match ty {
            Type::Bool => json!("bool"),
            Type::Number => json!("number"),
            Type::String => json!("string"),
            Type::Dynamic => json!("dynamic"),
            Type::List(e) => json!(["list", Json::from(*e)]),
            Type::Set(e) => json!(["set", Json::from(*e)]),
            Type::Map(e) => json!(["map", Json::from(*e)]),
            Type::Object(attrs) => {
                let fields: serde_json::Map<String, Json> =
                    attrs.into_iter().map(|(k, v)| (k, Json::from(v))).collect();
                json!(["object", fields])
            }
            Type::Tuple(elems) => {
                let elems: Vec<Json> = elems.into_iter().map(Json::from).collect();
                json!(["tuple", elems])
            }
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Bool => write!(f, "bool"),
            Type::Number => write!(f, "number"),
            Type::String => write!(f, "string"),
            Type::Dynamic => write!(f, "any"),
            Type::List(e) => write!(f, "list({})", e),
            Type::Set(e) => write!(f, "set({})", e),
            Type::Map(e) => write!(f, "map({})", e),
            Type::Object(attrs) => {
                write!(f, "object({{")?;
                for (i, (name, ty)) in attrs.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}={}", name, ty)?;
                }
                write!(f, "}})")
            }
            Type::Tuple(elems) => {
                write!(f, "tuple([")?;
                for (i, ty) in elems.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", ty)?;
                }
                write!(f, "])")
            }
        }
    }
}
