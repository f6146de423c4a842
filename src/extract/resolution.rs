//! Download-resolution traversal.

use serde_json::{Map, Value};

use super::{find_value, for_each_object, probe_targets, value_text, FieldMap};
use crate::models::DownloadResolution;

/// Resolve the binary-download identifier held in a detail page's JSON.
///
/// The probe's deep search runs first, then every object node is checked for
/// a direct id field in pre-order. The first retained resolution wins.
pub fn resolve_download(root: Option<&Value>, fields: &FieldMap) -> Option<DownloadResolution> {
    let Some(root) = root else {
        tracing::info!("No JSON to process.");
        return None;
    };

    let mut resolutions: Vec<DownloadResolution> = probe_targets(root)
        .map(|node| probe_resolution(node, fields))
        .filter(DownloadResolution::is_retained)
        .collect();
    for_each_object(root, |object| {
        let resolution = object_resolution(object, fields);
        if resolution.is_retained() {
            resolutions.push(resolution);
        }
    });

    tracing::debug!("Found {} download resolutions", resolutions.len());
    resolutions.into_iter().next()
}

fn probe_resolution(node: &Value, fields: &FieldMap) -> DownloadResolution {
    match find_value(node, &fields.id_field) {
        Some(Value::String(id)) => DownloadResolution {
            identifier: id.clone(),
        },
        _ => DownloadResolution::default(),
    }
}

fn object_resolution(object: &Map<String, Value>, fields: &FieldMap) -> DownloadResolution {
    DownloadResolution {
        identifier: object
            .get(fields.id_field.as_str())
            .and_then(value_text)
            .unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields() -> FieldMap {
        FieldMap {
            id_field: "binaryId".to_string(),
            ..Default::default()
        }
    }

    fn resolved(id: &str) -> Option<DownloadResolution> {
        Some(DownloadResolution {
            identifier: id.to_string(),
        })
    }

    #[test]
    fn test_absent_root() {
        assert_eq!(resolve_download(None, &fields()), None);
    }

    #[test]
    fn test_first_of_two_nested_objects() {
        let tree = json!({
            "tabs": [
                {"title": "one", "payload": {"binaryId": "first"}},
                {"title": "two", "payload": {"binaryId": "second"}}
            ]
        });
        assert_eq!(resolve_download(Some(&tree), &fields()), resolved("first"));
    }

    #[test]
    fn test_no_id_field() {
        let tree = json!({"tabs": [{"id": "1"}, {"binaryKey": "2"}]});
        assert_eq!(resolve_download(Some(&tree), &fields()), None);
    }

    #[test]
    fn test_blank_ids_are_skipped() {
        let tree = json!([{"binaryId": "  "}, {"binaryId": ""}, {"binaryId": "real"}]);
        assert_eq!(resolve_download(Some(&tree), &fields()), resolved("real"));
    }

    #[test]
    fn test_probe_result_comes_first() {
        // The deep search finds the nested id before the root's own field,
        // and probe results precede walk results.
        let tree = json!({"inner": {"binaryId": "nested"}, "binaryId": "direct"});
        assert_eq!(resolve_download(Some(&tree), &fields()), resolved("nested"));
    }

    #[test]
    fn test_numeric_id_found_by_walk() {
        // The probe only accepts text; the walk renders numbers.
        let tree = json!({"file": {"binaryId": 1234}});
        assert_eq!(resolve_download(Some(&tree), &fields()), resolved("1234"));
    }

    #[test]
    fn test_scalar_root() {
        assert_eq!(resolve_download(Some(&json!("binaryId")), &fields()), None);
    }
}
