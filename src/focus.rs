//! Focus paths: `dialogId#subpath` addresses used by editing sessions.

use crate::DialogCollection;
use crate::codec;
use serde_json::Value;
use std::fmt;

static NULL: Value = Value::Null;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FocusPath {
    pub dialog_id: String,
    /// Empty for whole-dialog focus.
    pub subpath: String,
}

impl FocusPath {
    pub fn new(dialog_id: impl Into<String>, subpath: impl Into<String>) -> Self {
        Self { dialog_id: dialog_id.into(), subpath: subpath.into() }
    }

    /// Split at the first `#`. A string without one focuses the whole dialog.
    pub fn parse(value: &str) -> Self {
        match value.split_once('#') {
            Some((dialog_id, subpath)) => Self::new(dialog_id, subpath),
            None => Self::new(value, ""),
        }
    }

    pub fn is_whole_dialog(&self) -> bool {
        self.subpath.is_empty()
    }
}

impl fmt::Display for FocusPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.dialog_id, self.subpath)
    }
}

pub fn create_selected_path(index: usize) -> String {
    format!("triggers[{index}]")
}

pub fn create_focused_path(selected: &str, index: usize) -> String {
    format!("{selected}.actions[{index}]")
}

/// The focused path wins when both are set; a focus without a selection is
/// stale and resolves to nothing.
pub fn get_focus_path(selected: &str, focused: &str) -> String {
    match (selected.is_empty(), focused.is_empty()) {
        (false, false) => focused.to_string(),
        (_, true) => selected.to_string(),
        (true, false) => String::new(),
    }
}

/// Trigger segment of a focused path.
pub fn get_selected(focused: &str) -> &str {
    focused.split('.').next().unwrap_or_default()
}

/// Translate the subpath of `focus` into designer form.
pub fn encode_focus_path(dialogs: &DialogCollection, focus: &FocusPath) -> FocusPath {
    let dialog = dialogs.get(&focus.dialog_id).unwrap_or(&NULL);
    FocusPath::new(&focus.dialog_id, codec::encode_array_path_to_designer_path(dialog, &focus.subpath))
}

/// Translate the subpath of `focus` back into index form. Unresolvable
/// subpaths are kept as they are.
pub fn decode_focus_path(dialogs: &DialogCollection, focus: &FocusPath) -> FocusPath {
    let dialog = dialogs.get(&focus.dialog_id).unwrap_or(&NULL);
    let subpath =
        codec::decode_designer_path_to_array_path(dialog, &focus.subpath).unwrap_or_else(|| focus.subpath.clone());
    FocusPath::new(&focus.dialog_id, subpath)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_and_renders() {
        let focus = FocusPath::parse("main#triggers[0].actions[1]");
        assert_eq!(focus, FocusPath::new("main", "triggers[0].actions[1]"));
        assert_eq!(focus.to_string(), "main#triggers[0].actions[1]");

        let whole = FocusPath::parse("main");
        assert!(whole.is_whole_dialog());
        assert_eq!(whole.to_string(), "main#");
        assert_eq!(FocusPath::parse("main#"), whole);
    }

    #[test]
    fn builds_selection_paths() {
        let selected = create_selected_path(2);
        assert_eq!(selected, "triggers[2]");
        assert_eq!(create_focused_path(&selected, 0), "triggers[2].actions[0]");
        assert_eq!(get_selected("triggers[2].actions[0]"), "triggers[2]");
        assert_eq!(get_selected(""), "");
    }

    #[test]
    fn focus_path_prefers_focused() {
        assert_eq!(get_focus_path("triggers[0]", "triggers[0].actions[0]"), "triggers[0].actions[0]");
        assert_eq!(get_focus_path("triggers[0]", ""), "triggers[0]");
        assert_eq!(get_focus_path("", "triggers[0].actions[0]"), "");
        assert_eq!(get_focus_path("", ""), "");
    }

    #[test]
    fn encodes_and_decodes_against_collection() {
        let mut dialogs = DialogCollection::new();
        dialogs.insert("main".to_string(), json!({ "triggers": [{ "$designer": { "id": "abc" } }] }));

        let encoded = encode_focus_path(&dialogs, &FocusPath::parse("main#triggers[0]"));
        assert_eq!(encoded.to_string(), r#"main#triggers["abc"]"#);
        assert_eq!(decode_focus_path(&dialogs, &encoded).subpath, "triggers[0]");

        let unknown = FocusPath::parse(r#"other#triggers["abc"]"#);
        assert_eq!(decode_focus_path(&dialogs, &unknown), unknown);
    }
}
