//! Per-dialog index used by the cross-train and recognizer derivations.
//!
//! A dialog document binds its resources through the `recognizer` reference
//! (`main.lu`, `main.qna`, `main.lu.qna`) and routes intents to child dialogs
//! through `Microsoft.OnIntent` triggers whose actions begin other dialogs.
//! Only those two facts are read; the rest of the document stays opaque.

use crate::kinds;
use crate::resources::{LuFile, ResourceFile};
use serde::Serialize;
use serde_json::Value;

bitflags::bitflags! {
    /// Resource kinds a recognizer reference binds.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ResourceKinds: u8 {
        const LU  = 1 << 0;
        const QNA = 1 << 1;
    }
}

impl ResourceKinds {
    /// Split a recognizer reference into its bound kinds and base name.
    ///
    /// `main.lu.qna` -> (`LU | QNA`, `main`); an optional trailing `.dialog`
    /// is ignored.
    pub fn from_recognizer(reference: &str) -> (Self, &str) {
        let mut kinds = ResourceKinds::empty();
        let mut rest = reference.strip_suffix(".dialog").unwrap_or(reference);

        loop {
            if let Some(stripped) = rest.strip_suffix(".qna") {
                kinds |= ResourceKinds::QNA;
                rest = stripped;
            } else if let Some(stripped) = rest.strip_suffix(".lu") {
                kinds |= ResourceKinds::LU;
                rest = stripped;
            } else {
                break;
            }
        }

        (kinds, rest)
    }
}

/// An intent trigger and the dialogs it may hand off to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntentTrigger {
    /// `""` matches any intent.
    pub intent: String,
    pub dialogs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogInfo {
    pub id: String,
    pub is_root: bool,
    /// Base name of the bound LU file.
    pub lu_file: Option<String>,
    /// Base name of the bound QnA file.
    pub qna_file: Option<String>,
    pub intent_triggers: Vec<IntentTrigger>,
}

impl DialogInfo {
    pub fn new(id: impl Into<String>, is_root: bool) -> Self {
        Self { id: id.into(), is_root, lu_file: None, qna_file: None, intent_triggers: Vec::new() }
    }

    pub fn with_lu_file(mut self, base_name: impl Into<String>) -> Self {
        self.lu_file = Some(base_name.into());
        self
    }

    pub fn with_qna_file(mut self, base_name: impl Into<String>) -> Self {
        self.qna_file = Some(base_name.into());
        self
    }

    pub fn with_trigger<S, I>(mut self, intent: impl Into<String>, dialogs: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = S>,
    {
        self.intent_triggers
            .push(IntentTrigger { intent: intent.into(), dialogs: dialogs.into_iter().map(Into::into).collect() });
        self
    }

    /// Index a dialog document.
    pub fn from_content(id: impl Into<String>, is_root: bool, content: &Value) -> Self {
        let mut info = Self::new(id, is_root);

        if let Some(reference) = content.get("recognizer").and_then(Value::as_str) {
            let (bound, base) = ResourceKinds::from_recognizer(reference);
            if bound.contains(ResourceKinds::LU) {
                info.lu_file = Some(base.to_string());
            }
            if bound.contains(ResourceKinds::QNA) {
                info.qna_file = Some(base.to_string());
            }
        }

        let triggers = content.get("triggers").and_then(Value::as_array).map(Vec::as_slice).unwrap_or_default();
        info.intent_triggers = triggers
            .iter()
            .filter(|trigger| trigger.get("$kind").and_then(Value::as_str) == Some(kinds::ON_INTENT))
            .map(|trigger| {
                let intent = trigger.get("intent").and_then(Value::as_str).unwrap_or_default().to_string();
                let mut dialogs = Vec::new();
                if let Some(actions) = trigger.get("actions") {
                    collect_begin_dialogs(actions, &mut dialogs);
                }
                IntentTrigger { intent, dialogs }
            })
            .collect();

        info
    }

    pub fn resource_kinds(&self) -> ResourceKinds {
        let mut kinds = ResourceKinds::empty();
        kinds.set(ResourceKinds::LU, self.lu_file.is_some());
        kinds.set(ResourceKinds::QNA, self.qna_file.is_some());
        kinds
    }
}

// Walks nested action arrays (branches, loops, cases) as opaque JSON.
fn collect_begin_dialogs(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::Array(items) => items.iter().for_each(|item| collect_begin_dialogs(item, out)),
        Value::Object(map) => {
            if map.get("$kind").and_then(Value::as_str) == Some(kinds::BEGIN_DIALOG) {
                if let Some(target) = map.get("dialog").and_then(Value::as_str) {
                    if !target.is_empty() && !out.iter().any(|d| d == target) {
                        out.push(target.to_string());
                    }
                }
            }
            map.values().for_each(|child| collect_begin_dialogs(child, out));
        }
        _ => {}
    }
}

/// LU files bound by at least one dialog.
pub fn get_referred_lu_files<'a>(lu_files: &'a [LuFile], dialogs: &[DialogInfo]) -> Vec<&'a LuFile> {
    lu_files
        .iter()
        .filter(|file| dialogs.iter().any(|dialog| dialog.lu_file.as_deref() == Some(file.base_name())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_recognizer_references() {
        assert_eq!(ResourceKinds::from_recognizer("main.lu"), (ResourceKinds::LU, "main"));
        assert_eq!(ResourceKinds::from_recognizer("main.qna"), (ResourceKinds::QNA, "main"));
        assert_eq!(ResourceKinds::from_recognizer("main.lu.qna"), (ResourceKinds::LU | ResourceKinds::QNA, "main"));
        assert_eq!(
            ResourceKinds::from_recognizer("main.lu.qna.dialog"),
            (ResourceKinds::LU | ResourceKinds::QNA, "main")
        );
        assert_eq!(ResourceKinds::from_recognizer("main"), (ResourceKinds::empty(), "main"));
    }

    #[test]
    fn indexes_dialog_content() {
        let content = json!({
            "$kind": kinds::ADAPTIVE_DIALOG,
            "recognizer": "main.lu.qna",
            "triggers": [
                {
                    "$kind": kinds::ON_INTENT,
                    "intent": "Book",
                    "actions": [
                        { "$kind": kinds::BEGIN_DIALOG, "dialog": "booking" },
                        {
                            "$kind": "Microsoft.IfCondition",
                            "actions": [{ "$kind": kinds::BEGIN_DIALOG, "dialog": "payment" }],
                            "elseActions": [{ "$kind": kinds::BEGIN_DIALOG, "dialog": "booking" }]
                        }
                    ]
                },
                { "$kind": kinds::ON_INTENT, "actions": [] },
                {
                    "$kind": "Microsoft.OnConversationUpdateActivity",
                    "actions": [{ "$kind": kinds::BEGIN_DIALOG, "dialog": "x" }]
                }
            ]
        });

        let info = DialogInfo::from_content("main", true, &content);
        assert_eq!(info.lu_file.as_deref(), Some("main"));
        assert_eq!(info.qna_file.as_deref(), Some("main"));
        assert_eq!(info.resource_kinds(), ResourceKinds::LU | ResourceKinds::QNA);
        assert_eq!(
            info.intent_triggers,
            vec![
                IntentTrigger { intent: "Book".into(), dialogs: vec!["booking".into(), "payment".into()] },
                IntentTrigger { intent: String::new(), dialogs: vec![] },
            ]
        );
    }

    #[test]
    fn dialog_without_recognizer_binds_nothing() {
        let info = DialogInfo::from_content("child", false, &json!({ "$kind": kinds::ADAPTIVE_DIALOG }));
        assert_eq!(info.resource_kinds(), ResourceKinds::empty());
        assert!(info.intent_triggers.is_empty());
    }

    #[test]
    fn finds_referred_lu_files() {
        let files = vec![LuFile::new("main.en-us", ["a"]), LuFile::new("orphan.en-us", ["b"])];
        let dialogs = vec![DialogInfo::new("main", true).with_lu_file("main")];
        let referred: Vec<&str> = get_referred_lu_files(&files, &dialogs).iter().map(|f| f.id.as_str()).collect();
        assert_eq!(referred, vec!["main.en-us"]);
    }
}
