//! JSON-in-HTML extraction and traversal.
//!
//! A portal page embeds a schema-unknown JSON document in an element attribute.
//! This module pulls that document out ([`extract_json_tree`]), walks it for
//! downloadable file candidates ([`collect_candidates`]) and for the identifier
//! that turns a chosen candidate into a binary link ([`resolve_download`]).
//!
//! Every traversal is a pure function of the tree and a [`FieldMap`]. Walks use
//! explicit work stacks and never recurse; the depth of an embedded document is
//! bounded by the parser at [`MAX_JSON_DEPTH`].

mod candidates;
mod date;
mod fields;
mod filename;
mod json_tree;
mod resolution;

pub use candidates::collect_candidates;
pub use date::{format_epoch_date, format_epoch_date_in, DATE_FORMAT};
pub use fields::FieldMap;
pub use filename::{derive_file_name, to_title_case, NO_NAME, UNTITLED};
pub use json_tree::{
    extract_json_tree, extract_json_tree_from, DATA_ATTRIBUTE, MAX_JSON_DEPTH,
};
pub use resolution::resolve_download;

use serde_json::{Map, Value};

/// Text of a scalar JSON value. Containers and null have none.
pub(crate) fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// First value stored under `key` anywhere in `root`.
///
/// Entries are checked in document order and each entry's subtree is searched
/// before its next sibling, so a nested match can win over a later direct one.
pub(crate) fn find_value<'a>(root: &'a Value, key: &str) -> Option<&'a Value> {
    let mut stack: Vec<(Option<&str>, &Value)> = vec![(None, root)];
    while let Some((name, node)) = stack.pop() {
        if name == Some(key) {
            return Some(node);
        }
        match node {
            Value::Object(map) => {
                stack.extend(map.iter().rev().map(|(k, v)| (Some(k.as_str()), v)));
            }
            Value::Array(items) => stack.extend(items.iter().rev().map(|v| (None, v))),
            _ => {}
        }
    }
    None
}

/// Visit every object node in pre-order: fields in document order, array
/// elements by ascending index.
pub(crate) fn for_each_object<'a>(
    root: &'a Value,
    mut visit: impl FnMut(&'a Map<String, Value>),
) {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        match node {
            Value::Object(map) => {
                visit(map);
                stack.extend(map.values().rev());
            }
            Value::Array(items) => stack.extend(items.iter().rev()),
            _ => {}
        }
    }
}

/// Nodes examined by the one-shot probe: the root, plus each direct element
/// when the root is an array.
pub(crate) fn probe_targets(root: &Value) -> impl Iterator<Item = &Value> {
    let elements = match root {
        Value::Array(items) => items.as_slice(),
        _ => &[],
    };
    std::iter::once(root).chain(elements.iter())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_value_text() {
        assert_eq!(value_text(&json!("abc")), Some("abc".to_string()));
        assert_eq!(value_text(&json!(9)), Some("9".to_string()));
        assert_eq!(value_text(&json!(true)), Some("true".to_string()));
        assert_eq!(value_text(&json!(null)), None);
        assert_eq!(value_text(&json!([1])), None);
        assert_eq!(value_text(&json!({"a": 1})), None);
    }

    #[test]
    fn test_find_value_prefers_earlier_subtree() {
        let tree = json!({"a": {"url": "nested"}, "url": "direct"});
        assert_eq!(find_value(&tree, "url"), Some(&json!("nested")));
    }

    #[test]
    fn test_find_value_direct_before_later_subtree() {
        let tree = json!({"url": "direct", "b": {"url": "nested"}});
        assert_eq!(find_value(&tree, "url"), Some(&json!("direct")));
    }

    #[test]
    fn test_find_value_through_arrays() {
        let tree = json!([{"x": 1}, [{"y": {"url": 5}}], {"url": 6}]);
        assert_eq!(find_value(&tree, "url"), Some(&json!(5)));
        assert_eq!(find_value(&tree, "missing"), None);
    }

    #[test]
    fn test_for_each_object_pre_order() {
        let tree = json!({
            "n": 1,
            "a": {"n": 2, "b": [{"n": 3}, {"n": 4, "c": {"n": 5}}]},
            "d": {"n": 6}
        });
        let mut seen = Vec::new();
        for_each_object(&tree, |object| seen.push(object["n"].as_i64().unwrap()));
        assert_eq!(seen, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_probe_targets() {
        let object = json!({"a": 1});
        assert_eq!(probe_targets(&object).count(), 1);
        let array = json!([1, 2, 3]);
        assert_eq!(probe_targets(&array).count(), 4);
    }

    #[test]
    fn test_walks_at_parser_depth_limit() {
        let mut tree = json!({"leaf": true});
        for depth in 1..MAX_JSON_DEPTH / 2 {
            tree = json!({"depth": depth, "child": [tree]});
        }
        let mut count = 0;
        for_each_object(&tree, |_| count += 1);
        assert_eq!(count, MAX_JSON_DEPTH / 2);
        assert_eq!(find_value(&tree, "leaf"), Some(&json!(true)));
    }
}
