//! Test-only reference decoding engine.
//!
//! Runs a `DecodeSpec` against an already parsed configuration body, the way
//! the external engine does: required attributes and blocks are enforced,
//! list/set bounds are checked, map keys come from block labels, and literal
//! specs yield their value regardless of the body.

#![allow(dead_code)]

use anyhow::{Context, bail};
use configschema::schema::{Block, NestingMode};
use configschema::spec::DecodeSpec;
use configschema::types::Type;
use configschema::value::Value;
use std::collections::BTreeMap;

/// Parsed configuration body: attributes plus nested blocks in source order.
#[derive(Debug, Clone, Default)]
pub struct Body {
    pub attributes: BTreeMap<String, Value>,
    pub blocks: Vec<BodyBlock>,
}

#[derive(Debug, Clone)]
pub struct BodyBlock {
    pub type_name: String,
    pub labels: Vec<String>,
    pub body: Body,
}

impl Body {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attr(mut self, name: &str, value: Value) -> Self {
        self.attributes.insert(name.to_string(), value);
        self
    }

    pub fn block(self, type_name: &str, body: Body) -> Self {
        self.labeled_block(type_name, &[], body)
    }

    pub fn labeled_block(mut self, type_name: &str, labels: &[&str], body: Body) -> Self {
        self.blocks.push(BodyBlock {
            type_name: type_name.to_string(),
            labels: labels.iter().map(|l| l.to_string()).collect(),
            body,
        });
        self
    }

    fn blocks_of<'a>(&'a self, type_name: &'a str) -> impl Iterator<Item = &'a BodyBlock> + 'a {
        self.blocks.iter().filter(move |b| b.type_name == type_name)
    }
}

pub fn decode(spec: &DecodeSpec, body: &Body) -> anyhow::Result<Value> {
    match spec {
        DecodeSpec::Object(obj) => {
            let mut attrs = BTreeMap::new();
            for (name, field) in &obj.fields {
                attrs.insert(name.clone(), decode(field, body)?);
            }
            Ok(Value::Object(attrs))
        }
        DecodeSpec::Attr(s) => match body.attributes.get(&s.name) {
            Some(v) => convert(v, &s.ty).with_context(|| format!("attribute {:?}", s.name)),
            None if s.required => bail!("missing required attribute {:?}", s.name),
            None => Ok(Value::null(s.ty.clone())),
        },
        DecodeSpec::Literal(s) => Ok(s.value.clone()),
        DecodeSpec::Block(s) => {
            let found: Vec<&BodyBlock> = body.blocks_of(&s.type_name).collect();
            match found.as_slice() {
                [] if s.required => bail!("missing required block {:?}", s.type_name),
                [] => Ok(Value::null(s.nested.implied_type())),
                [one] => decode_unlabeled(&s.nested, one),
                _ => bail!("duplicate {:?} block", s.type_name),
            }
        }
        DecodeSpec::BlockList(s) => {
            let items = decode_repeated(&s.type_name, &s.nested, body, s.min_items, s.max_items)?;
            Ok(Value::list(s.nested.implied_type(), items))
        }
        DecodeSpec::BlockSet(s) => {
            let items = decode_repeated(&s.type_name, &s.nested, body, s.min_items, s.max_items)?;
            Ok(Value::set(s.nested.implied_type(), items))
        }
        DecodeSpec::BlockMap(s) => {
            let mut entries = BTreeMap::new();
            for block in body.blocks_of(&s.type_name) {
                let [key] = block.labels.as_slice() else {
                    bail!(
                        "{:?} block needs exactly one label, got {}",
                        s.type_name,
                        block.labels.len()
                    );
                };
                let value = decode(&s.nested, &block.body)?;
                if entries.insert(key.clone(), value).is_some() {
                    bail!("duplicate {:?} block labeled {:?}", s.type_name, key);
                }
            }
            Ok(Value::map(s.nested.implied_type(), entries))
        }
    }
}

fn decode_unlabeled(nested: &DecodeSpec, block: &BodyBlock) -> anyhow::Result<Value> {
    if !block.labels.is_empty() {
        bail!("unexpected labels on {:?} block", block.type_name);
    }
    decode(nested, &block.body)
}

fn decode_repeated(
    type_name: &str,
    nested: &DecodeSpec,
    body: &Body,
    min_items: u64,
    max_items: u64,
) -> anyhow::Result<Vec<Value>> {
    let blocks: Vec<&BodyBlock> = body.blocks_of(type_name).collect();
    let count = blocks.len() as u64;
    if count < min_items {
        bail!("at least {} {:?} blocks are required, got {}", min_items, type_name, count);
    }
    if max_items > 0 && count > max_items {
        bail!("no more than {} {:?} blocks are allowed, got {}", max_items, type_name, count);
    }
    blocks
        .into_iter()
        .map(|b| decode_unlabeled(nested, b))
        .collect()
}

/// Convert an attribute value to the declared type.
pub fn convert(v: &Value, ty: &Type) -> anyhow::Result<Value> {
    if *ty == Type::Dynamic {
        return Ok(v.clone());
    }
    match (v, ty) {
        (Value::Null(_), _) => Ok(Value::null(ty.clone())),
        (Value::Unknown(_), _) => Ok(Value::unknown(ty.clone())),
        (Value::Bool(_), Type::Bool)
        | (Value::Number(_), Type::Number)
        | (Value::String(_), Type::String) => Ok(v.clone()),
        (Value::Number(n), Type::String) => Ok(Value::string(n.to_string())),
        (Value::Bool(b), Type::String) => Ok(Value::string(b.to_string())),
        (
            Value::List { items, .. } | Value::Set { items, .. } | Value::Tuple(items),
            Type::List(elem),
        ) => Ok(Value::list(elem.as_ref().clone(), convert_all(items, elem)?)),
        (
            Value::List { items, .. } | Value::Set { items, .. } | Value::Tuple(items),
            Type::Set(elem),
        ) => Ok(Value::set(elem.as_ref().clone(), convert_all(items, elem)?)),
        (Value::Map { entries, .. } | Value::Object(entries), Type::Map(elem)) => {
            let mut out = BTreeMap::new();
            for (k, item) in entries {
                out.insert(k.clone(), convert(item, elem)?);
            }
            Ok(Value::map(elem.as_ref().clone(), out))
        }
        (Value::Map { entries, .. } | Value::Object(entries), Type::Object(fields)) => {
            if let Some(extra) = entries.keys().find(|k| !fields.contains_key(*k)) {
                bail!("unsupported attribute {:?}", extra);
            }
            let mut out = BTreeMap::new();
            for (name, field_ty) in fields {
                let item = match entries.get(name) {
                    Some(item) => convert(item, field_ty)?,
                    None => Value::null(field_ty.clone()),
                };
                out.insert(name.clone(), item);
            }
            Ok(Value::Object(out))
        }
        (Value::List { items, .. } | Value::Tuple(items), Type::Tuple(tys))
            if items.len() == tys.len() =>
        {
            let items = items
                .iter()
                .zip(tys)
                .map(|(item, t)| convert(item, t))
                .collect::<anyhow::Result<Vec<_>>>()?;
            Ok(Value::Tuple(items))
        }
        _ => bail!("cannot use a {} value as {}", v.ty(), ty),
    }
}

fn convert_all(items: &[Value], elem: &Type) -> anyhow::Result<Vec<Value>> {
    items.iter().map(|item| convert(item, elem)).collect()
}

/// Whether a value's type conforms to `want`; `Dynamic` accepts any type.
pub fn conforms(got: &Type, want: &Type) -> bool {
    match (got, want) {
        (_, Type::Dynamic) => true,
        (Type::List(g), Type::List(w))
        | (Type::Set(g), Type::Set(w))
        | (Type::Map(g), Type::Map(w)) => conforms(g, w),
        (Type::Object(g), Type::Object(w)) => {
            g.len() == w.len()
                && g.iter()
                    .all(|(k, gt)| w.get(k).is_some_and(|wt| conforms(gt, wt)))
        }
        (Type::Tuple(g), Type::Tuple(w)) => {
            g.len() == w.len() && g.iter().zip(w).all(|(gt, wt)| conforms(gt, wt))
        }
        _ => got == want,
    }
}

/// A value of `ty`; `seed` varies the payload.
pub fn sample_value(ty: &Type, seed: u64) -> Value {
    match ty {
        Type::Bool => Value::Bool(seed % 2 == 0),
        Type::Number | Type::Dynamic => Value::Number(seed.into()),
        Type::String => Value::string(format!("s{}", seed)),
        Type::List(e) => Value::list(
            e.as_ref().clone(),
            vec![sample_value(e, seed), sample_value(e, seed + 1)],
        ),
        Type::Set(e) => Value::set(
            e.as_ref().clone(),
            vec![sample_value(e, seed), sample_value(e, seed + 1)],
        ),
        Type::Map(e) => {
            let mut entries = BTreeMap::new();
            entries.insert("k".to_string(), sample_value(e, seed));
            Value::map(e.as_ref().clone(), entries)
        }
        Type::Object(fields) => Value::Object(
            fields
                .iter()
                .map(|(k, t)| (k.clone(), sample_value(t, seed)))
                .collect(),
        ),
        Type::Tuple(tys) => Value::Tuple(tys.iter().map(|t| sample_value(t, seed)).collect()),
    }
}

/// A body that satisfies `schema`. `reps` drives how many optional pieces and
/// repeated blocks appear. Computed attributes get a conflicting value that the
/// decoder must ignore.
pub fn sample_body(schema: &Block, reps: u64) -> Body {
    let mut body = Body::new();

    for (name, attr) in &schema.attributes {
        if attr.computed || attr.required || reps % 2 == 1 {
            body.attributes
                .insert(name.clone(), sample_value(&attr.ty, reps));
        }
    }

    for (name, nested) in &schema.block_types {
        match nested.nesting {
            NestingMode::Single => {
                let required = nested.min_items == 1 && nested.max_items >= 1;
                if required || reps > 0 {
                    body = body.block(name, sample_body(&nested.block, reps));
                }
            }
            NestingMode::List | NestingMode::Set => {
                let mut count = reps.max(nested.min_items);
                if nested.max_items > 0 {
                    count = count.min(nested.max_items);
                }
                for i in 0..count {
                    body = body.block(name, sample_body(&nested.block, reps + i));
                }
            }
            NestingMode::Map => {
                for i in 0..reps {
                    let key = format!("key{}", i);
                    body = body.labeled_block(name, &[key.as_str()], sample_body(&nested.block, i));
                }
            }
            NestingMode::Invalid => {}
        }
    }

    body
}
