use crate::spec::DecodeSpec;
use crate::value::Value;

const INDENT: &str = "  ";

/// Render a decode spec as an indented outline, one node per line.
///
/// Example:
/// object
///   literal "id": unknown(number)
///   attr "name": string (required)
///   block_list "rule" [0..*]
///     attr "enabled": bool
pub fn render_tree(spec: &DecodeSpec) -> String {
    let mut out = String::new();
    match spec {
        DecodeSpec::Object(_) => {
            out.push_str("object\n");
            write_fields(&mut out, spec, 1);
        }
        other => write_node(&mut out, "", other, 0),
    }
    out
}

fn write_fields(out: &mut String, spec: &DecodeSpec, depth: usize) {
    match spec.as_object() {
        Some(obj) => {
            for (name, field) in &obj.fields {
                write_node(out, name, field, depth);
            }
        }
        None => write_node(out, "", spec, depth),
    }
}

fn write_node(out: &mut String, key: &str, spec: &DecodeSpec, depth: usize) {
    let required = |flag: bool| if flag { " (required)" } else { "" };

    let line = match spec {
        DecodeSpec::Object(_) => format!("object {:?}", key),
        DecodeSpec::Attr(s) => format!("attr {:?}: {}{}", s.name, s.ty, required(s.required)),
        DecodeSpec::Literal(s) => format!("literal {:?}: {}", key, literal_text(&s.value)),
        DecodeSpec::Block(s) => format!("block {:?}{}", s.type_name, required(s.required)),
        DecodeSpec::BlockList(s) => format!(
            "block_list {:?} {}",
            s.type_name,
            bounds(s.min_items, s.max_items)
        ),
        DecodeSpec::BlockSet(s) => format!(
            "block_set {:?} {}",
            s.type_name,
            bounds(s.min_items, s.max_items)
        ),
        DecodeSpec::BlockMap(s) => format!("block_map {:?}", s.type_name),
    };

    out.push_str(&INDENT.repeat(depth));
    out.push_str(&line);
    out.push('\n');

    match spec {
        DecodeSpec::Object(_) => write_fields(out, spec, depth + 1),
        _ => {
            if let Some(nested) = spec.nested() {
                write_fields(out, nested, depth + 1);
            }
        }
    }
}

fn bounds(min_items: u64, max_items: u64) -> String {
    if max_items == 0 {
        format!("[{}..*]", min_items)
    } else {
        format!("[{}..{}]", min_items, max_items)
    }
}

fn literal_text(value: &Value) -> String {
    let join = |items: Vec<String>| items.join(", ");
    match value {
        Value::Unknown(ty) => format!("unknown({})", ty),
        Value::Null(ty) => format!("null({})", ty),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => format!("{:?}", s),
        Value::List { items, .. } | Value::Tuple(items) => {
            format!("[{}]", join(items.iter().map(literal_text).collect()))
        }
        Value::Set { items, .. } => {
            format!("toset([{}])", join(items.iter().map(literal_text).collect()))
        }
        Value::Map { entries, .. } | Value::Object(entries) => format!(
            "{{{}}}",
            join(
                entries
                    .iter()
                    .map(|(k, v)| format!("{:?} = {}", k, literal_text(v)))
                    .collect()
            )
        ),
    }
}
