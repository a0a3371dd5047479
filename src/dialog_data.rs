//! Reads and writes into a dialog collection by `dialogId` + subpath.
//!
//! Writes never touch the caller's collection: the addressed document is
//! cloned, edited and returned, so upstream code can detect a change by
//! comparing the returned document with the stored one.

use crate::DialogCollection;
use crate::error::{Error, Result};
use crate::json_path;
use serde_json::Value;
use tracing::trace;

/// Outcome of [`get_dialog_data`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DialogData<'a> {
    /// No dialog id was given. Editors render this as the empty selection.
    NoSelection,
    Found(&'a Value),
    /// The dialog or the path inside it does not exist (a broken focus path).
    Missing,
}

impl<'a> DialogData<'a> {
    pub fn value(&self) -> Option<&'a Value> {
        match self {
            DialogData::Found(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, DialogData::Missing)
    }

    /// Owned form: `""` for no selection, `None` for a missing path.
    pub fn to_value(&self) -> Option<Value> {
        match self {
            DialogData::NoSelection => Some(Value::String(String::new())),
            DialogData::Found(v) => Some((*v).clone()),
            DialogData::Missing => None,
        }
    }
}

/// Read the whole dialog (empty `subpath`) or the value at `subpath` inside it.
pub fn get_dialog_data<'a>(dialogs: &'a DialogCollection, dialog_id: &str, subpath: &str) -> DialogData<'a> {
    if dialog_id.is_empty() {
        return DialogData::NoSelection;
    }

    let Some(dialog) = dialogs.get(dialog_id) else {
        trace!(dialog_id, "dialog not in collection");
        return DialogData::Missing;
    };

    match json_path::get(dialog, subpath) {
        Some(value) => DialogData::Found(value),
        None => DialogData::Missing,
    }
}

/// Produce the dialog document with `value` written at `subpath`.
///
/// An empty `subpath` replaces the whole document with `value`. Otherwise the
/// addressed dialog must exist in `dialogs`.
pub fn set_dialog_data(dialogs: &DialogCollection, dialog_id: &str, subpath: &str, value: Value) -> Result<Value> {
    if subpath.is_empty() {
        return Ok(value);
    }

    let mut dialog = dialogs.get(dialog_id).cloned().ok_or_else(|| Error::DialogNotFound(dialog_id.to_string()))?;
    json_path::set(&mut dialog, subpath, value)?;
    Ok(dialog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn dialogs() -> DialogCollection {
        let mut dialogs = DialogCollection::new();
        dialogs.insert(
            "main".to_string(),
            json!({
                "$kind": "Microsoft.AdaptiveDialog",
                "triggers": [{ "$kind": "Microsoft.OnBeginDialog", "actions": [{ "$kind": "Microsoft.SendActivity" }] }]
            }),
        );
        dialogs
    }

    #[test]
    fn empty_dialog_id_is_no_selection() {
        let dialogs = dialogs();
        let data = get_dialog_data(&dialogs, "", "triggers[0]");
        assert_eq!(data, DialogData::NoSelection);
        assert_eq!(data.to_value(), Some(json!("")));
    }

    #[test]
    fn empty_subpath_returns_whole_dialog() {
        let dialogs = dialogs();
        assert_eq!(get_dialog_data(&dialogs, "main", "").value(), dialogs.get("main"));
    }

    #[test]
    fn reads_nested_value() {
        let dialogs = dialogs();
        let data = get_dialog_data(&dialogs, "main", "triggers[0].actions[0].$kind");
        assert_eq!(data.value(), Some(&json!("Microsoft.SendActivity")));
    }

    #[test]
    fn broken_paths_are_missing() {
        let dialogs = dialogs();
        assert!(get_dialog_data(&dialogs, "main", "triggers[3]").is_missing());
        assert!(get_dialog_data(&dialogs, "other", "").is_missing());
        assert_eq!(get_dialog_data(&dialogs, "main", "triggers[3]").to_value(), None);
    }

    #[test]
    fn set_returns_updated_copy() {
        let dialogs = dialogs();
        let updated = set_dialog_data(&dialogs, "main", "triggers[0].actions[0].activity", json!("hi")).unwrap();

        assert_eq!(updated["triggers"][0]["actions"][0]["activity"], json!("hi"));
        assert!(dialogs["main"]["triggers"][0]["actions"][0].get("activity").is_none());
        assert_ne!(&updated, &dialogs["main"]);
    }

    #[test]
    fn set_with_empty_subpath_replaces_document() {
        let dialogs = dialogs();
        let replacement = json!({ "$kind": "Microsoft.AdaptiveDialog", "triggers": [] });
        assert_eq!(set_dialog_data(&dialogs, "main", "", replacement.clone()).unwrap(), replacement);
    }

    #[test]
    fn set_of_get_is_idempotent() {
        let dialogs = dialogs();
        let path = "triggers[0].actions";
        let current = get_dialog_data(&dialogs, "main", path).to_value().unwrap();
        let updated = set_dialog_data(&dialogs, "main", path, current).unwrap();
        assert_eq!(&updated, &dialogs["main"]);
    }

    #[test]
    fn set_on_unknown_dialog_fails() {
        let err = set_dialog_data(&dialogs(), "nope", "triggers", json!([])).unwrap_err();
        assert!(matches!(err, Error::DialogNotFound(id) if id == "nope"));
    }

    #[test]
    fn set_with_huge_index_fails_without_touching_input() {
        let dialogs = dialogs();
        let err = set_dialog_data(&dialogs, "main", "triggers[18446744073709551615]", json!(1)).unwrap_err();
        assert!(matches!(err, Error::InvalidPath(_)));
        assert_eq!(dialogs["main"]["triggers"].as_array().map(Vec::len), Some(1));
    }
}
