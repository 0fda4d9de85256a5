//! Traversal helpers for schema.org JSON-LD graphs.

use serde_json::Value;

/// Collects every node under `roots` that satisfies `predicate`.
///
/// Walks objects and arrays depth-first in document order; a matching node's
/// children are still visited.
pub fn find_nodes<'a, I, P>(roots: I, predicate: P) -> Vec<&'a Value>
where
    I: IntoIterator<Item = &'a Value>,
    P: Fn(&Value) -> bool,
{
    let mut stack: Vec<&Value> = roots.into_iter().collect();
    stack.reverse();

    let mut found = Vec::new();
    while let Some(node) = stack.pop() {
        if predicate(node) {
            found.push(node);
        }

        match node {
            Value::Object(map) => stack.extend(map.values().rev()),
            Value::Array(items) => stack.extend(items.iter().rev()),
            _ => {}
        }
    }

    found
}

/// True if an object's `@type` is `type_name` or a list containing it.
pub fn has_type(node: &Value, type_name: &str) -> bool {
    match node.get("@type") {
        Some(Value::String(t)) => t == type_name,
        Some(Value::Array(types)) => types.iter().any(|t| t.as_str() == Some(type_name)),
        _ => false,
    }
}

/// Picks the Product node, preferring top-level blocks over nested ones.
pub fn find_product(blocks: &[Value]) -> Option<&Value> {
    blocks
        .iter()
        .find(|block| has_type(block, "Product"))
        .or_else(|| find_nodes(blocks, |node| has_type(node, "Product")).into_iter().next())
}

/// Distinct names of every Person node anywhere in the blocks, in order.
pub fn person_names(blocks: &[Value]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();

    for node in find_nodes(blocks, |node| has_type(node, "Person")) {
        let Some(name) = node.get("name").and_then(Value::as_str).map(str::trim) else {
            continue;
        };
        if !name.is_empty() && !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }

    names
}

/// Reads a number that may be published as a JSON number or a string.
pub fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
