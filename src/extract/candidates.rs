//! File-candidate traversal.

use serde_json::{Map, Value};

use super::{find_value, for_each_object, format_epoch_date, probe_targets, value_text, FieldMap};
use crate::models::FileCandidate;

/// Literal key holding a candidate's identifier.
const ID_KEY: &str = "id";
/// Literal key holding a candidate's epoch-seconds date.
const DATE_KEY: &str = "date";

/// Collect every retained file candidate in `root`.
///
/// The result starts with whatever the one-shot probe yields, followed by one
/// entry per retained object node in pre-order. Duplicates are kept.
pub fn collect_candidates(root: Option<&Value>, fields: &FieldMap) -> Vec<FileCandidate> {
    let mut candidates = Vec::new();
    let Some(root) = root else {
        tracing::info!("No JSON to process.");
        return candidates;
    };

    for node in probe_targets(root) {
        retain(probe_candidate(node, fields), fields, &mut candidates);
    }
    for_each_object(root, |object| {
        retain(object_candidate(object, fields), fields, &mut candidates);
    });

    tracing::debug!("Collected {} file candidates", candidates.len());
    candidates
}

fn retain(candidate: FileCandidate, fields: &FieldMap, out: &mut Vec<FileCandidate>) {
    if candidate.is_retained(&fields.extension_filter) {
        out.push(candidate);
    }
}

/// Representative candidate built from a deep search for the url field.
///
/// The vote is read from the node itself and only when the link matches the
/// extension filter; `-1` marks a missing or non-integer rate. No identifier is
/// read here, so the retention filter decides on the walk's records alone.
fn probe_candidate(node: &Value, fields: &FieldMap) -> FileCandidate {
    let mut candidate = FileCandidate::default();
    if let Some(Value::String(url)) = find_value(node, &fields.url_field) {
        if url.contains(&fields.extension_filter) {
            let vote = node
                .get(fields.rate_field.as_str())
                .and_then(Value::as_i64)
                .unwrap_or(-1);
            candidate.vote_score = Some(vote);
        }
        candidate.url = url.clone();
    }
    candidate
}

/// Candidate built from an object's direct fields only.
fn object_candidate(object: &Map<String, Value>, fields: &FieldMap) -> FileCandidate {
    FileCandidate {
        url: object
            .get(fields.url_field.as_str())
            .and_then(value_text)
            .unwrap_or_default(),
        identifier: object.get(ID_KEY).and_then(value_text).unwrap_or_default(),
        vote_score: object.get(fields.rate_field.as_str()).and_then(numeric_vote),
        formatted_date: object
            .get(DATE_KEY)
            .and_then(epoch_seconds)
            .and_then(format_epoch_date),
    }
}

/// Numeric rates truncate to an integer; anything else is ignored.
fn numeric_vote(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        _ => None,
    }
}

/// Integer dates, or strings that parse as one.
fn epoch_seconds(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}
