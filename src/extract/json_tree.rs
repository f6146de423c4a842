//! Locate the JSON document embedded in a page attribute.

use scraper::{Html, Selector};
use serde_json::Value;

/// Attribute carrying the serialized JSON on portal pages.
pub const DATA_ATTRIBUTE: &str = "data-content";

/// Deepest container nesting the parser accepts (serde_json's recursion limit).
///
/// Deeper documents fail to parse and are treated like any unparseable value.
pub const MAX_JSON_DEPTH: usize = 127;

/// Parse the JSON held by the first element carrying [`DATA_ATTRIBUTE`].
pub fn extract_json_tree(html: &str) -> Option<Value> {
    extract_json_tree_from(html, DATA_ATTRIBUTE)
}

/// Parse the JSON held by the first element (document order) carrying `attribute`.
///
/// Malformed markup is tolerated by the HTML parser. A missing element, an
/// unparseable attribute value or one nested deeper than [`MAX_JSON_DEPTH`]
/// yields `None` and is logged, never raised.
pub fn extract_json_tree_from(html: &str, attribute: &str) -> Option<Value> {
    let selector = match Selector::parse(&format!("[{}]", attribute)) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("Invalid data attribute name '{}': {}", attribute, e);
            return None;
        }
    };

    let document = Html::parse_document(html);
    let Some(element) = document.select(&selector).next() else {
        tracing::info!("No element with a {} attribute found.", attribute);
        return None;
    };

    let raw = element.value().attr(attribute).unwrap_or_default();
    match serde_json::from_str(raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::error!("Error parsing JSON from {}: {}", attribute, e);
            None
        }
    }
}
