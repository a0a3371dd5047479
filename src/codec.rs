//! Path codec: index paths <-> designer-id paths.
//!
//! Editor state (URLs, breadcrumbs, focus) points into a dialog document with
//! paths like `triggers[0].actions[1]`. Those indices shift whenever an array
//! is edited, so links are stored in designer form, `triggers["1234"].actions["5678"]`,
//! keyed by the `$designer.id` every node receives at creation time.
//!
//! ```text
//! triggers[0].actions[1]  ── encode ──▶  triggers["1234"].actions[1]
//!                          ◀── decode ──
//!                                        (actions[1] has no $designer.id)
//! ```
//!
//! Nothing here panics or returns an error. Path resolution runs on every
//! navigation, so a failure degrades either to `None` ("cannot resolve, fall
//! back to a default view") or to handing the caller's path back unchanged.
//!
//! The absent document is `Value::Null`.

#[path = "codec/segment.rs"]
mod segment;

pub use segment::{ArraySegment, DesignerSegment, parse_array_path, parse_designer_path};

use crate::json_path;
use serde_json::Value;
use tracing::{debug, trace, warn};

static NULL: Value = Value::Null;

/// Stable designer id of a node, if it carries one.
pub fn designer_id(node: &Value) -> Option<&str> {
    node.get("$designer")?.get("id")?.as_str().filter(|id| !id.is_empty())
}

/// Encode an index path into designer form, or `None` when it cannot.
///
/// Every segment must be `name[index]` and must resolve to an element;
/// otherwise the whole encode fails. Elements without a designer id keep
/// their numeric index, so the result may mix both forms.
pub fn try_encode_array_path(dialog: &Value, path: &str) -> Option<String> {
    if path.is_empty() {
        return Some(String::new());
    }

    let mut current = dialog;
    let mut encoded = Vec::new();

    for raw in path.split('.') {
        let Some(segment) = parse_array_path(raw) else {
            trace!(segment = raw, "not an index segment");
            return None;
        };
        let Some(element) = current.get(segment.name).and_then(|items| items.get(segment.index)) else {
            trace!(%segment, "no element at segment");
            return None;
        };

        match designer_id(element) {
            Some(id) => encoded.push(DesignerSegment { name: segment.name, id }.to_string()),
            None => encoded.push(segment.to_string()),
        }
        current = element;
    }

    Some(encoded.join("."))
}

/// Encode an index path into designer form.
///
/// When the path cannot be encoded (malformed segment, index out of range,
/// stale document) the input is returned unchanged.
pub fn encode_array_path_to_designer_path(dialog: &Value, path: &str) -> String {
    try_encode_array_path(dialog, path).unwrap_or_else(|| {
        debug!(path, "path not encodable, passing through");
        path.to_string()
    })
}

/// Decode a designer (or mixed) path back into an index path.
///
/// - Segments that are not `name["id"]` are carried through unchanged and
///   traversal continues into whatever they address.
/// - A designer segment whose `name` is not an array under the current node
///   yields `None`.
/// - A designer id that matches no element yields the whole input unchanged:
///   the node may not exist yet, and the caller's link is kept intact.
pub fn decode_designer_path_to_array_path(dialog: &Value, path: &str) -> Option<String> {
    if path.is_empty() {
        return Some(String::new());
    }

    let mut current = dialog;
    let mut decoded = Vec::new();

    for raw in path.split('.') {
        let Some(segment) = parse_designer_path(raw) else {
            decoded.push(raw.to_string());
            current = json_path::get(current, raw).unwrap_or(&NULL);
            continue;
        };

        let Some(items) = current.get(segment.name).and_then(Value::as_array) else {
            trace!(%segment, "designer segment does not address an array");
            return None;
        };

        let Some((index, element)) = items.iter().enumerate().find(|(_, item)| designer_id(item) == Some(segment.id))
        else {
            warn!(path, id = segment.id, "designer id not found, passing path through");
            return Some(path.to_string());
        };

        decoded.push(ArraySegment { name: segment.name, index }.to_string());
        current = element;
    }

    Some(decoded.join("."))
}
