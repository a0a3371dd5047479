//! Cross-train configuration.
//!
//! A parent dialog's routing intent (`BookFlight -> [booking]`) has its real
//! training data in the child dialog's LU file. The LU cross-trainer therefore
//! needs, per trainable file, the intents that hand off and the files that
//! hold their utterances:
//!
//! ```text
//! main.en-us ─┬─ rootDialog: true
//!             └─ triggers
//!                  ├─ BookFlight  -> ["booking.en-us"]
//!                  ├─ Cancel      -> []          (children exist, no LU files)
//!                  └─ Help        -> ""          (never hands off)
//! ```
//!
//! The config is derived on demand from dialogs, LU files and options and is
//! never stored. Dialogs that contribute nothing are absent from it.


use crate::dialog::{DialogInfo, IntentTrigger};
use crate::options::Options;
use crate::resources::{LuFile, ResourceFile, file_id, locale_file};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use tracing::{debug, trace};

/// Where an intent's training data lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerTargets {
    /// The trigger never named a child dialog. Serialized as `""`.
    NoDialog,
    /// LU file ids of the child dialogs. Empty when children were named but
    /// none had an LU file for this language.
    Files(Vec<String>),
}

impl TriggerTargets {
    pub fn files(&self) -> &[String] {
        match self {
            TriggerTargets::NoDialog => &[],
            TriggerTargets::Files(files) => files,
        }
    }

    pub fn len(&self) -> usize {
        self.files().len()
    }

    pub fn is_empty(&self) -> bool {
        self.files().is_empty()
    }

    /// Children were expected but none can provide training data.
    pub fn is_gap(&self) -> bool {
        matches!(self, TriggerTargets::Files(files) if files.is_empty())
    }

    fn merge(&mut self, other: TriggerTargets) {
        let TriggerTargets::Files(more) = other else {
            return;
        };
        match self {
            TriggerTargets::NoDialog => *self = TriggerTargets::Files(more),
            TriggerTargets::Files(files) => {
                for file in more {
                    if !files.contains(&file) {
                        files.push(file);
                    }
                }
            }
        }
    }
}

impl Serialize for TriggerTargets {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            TriggerTargets::NoDialog => serializer.serialize_str(""),
            TriggerTargets::Files(files) => files.serialize(serializer),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrossTrainEntry {
    pub root_dialog: bool,
    pub triggers: BTreeMap<String, TriggerTargets>,
}

/// LU file id -> cross-train metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CrossTrainConfig(BTreeMap<String, CrossTrainEntry>);

impl CrossTrainConfig {
    pub fn get(&self, lu_file_id: &str) -> Option<&CrossTrainEntry> {
        self.0.get(lu_file_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CrossTrainEntry)> {
        self.0.iter().map(|(id, entry)| (id.as_str(), entry))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `(lu file id, intent)` pairs whose child dialogs have no LU files.
    pub fn gaps(&self) -> Vec<(&str, &str)> {
        self.iter()
            .flat_map(|(id, entry)| {
                entry
                    .triggers
                    .iter()
                    .filter(|(_, targets)| targets.is_gap())
                    .map(move |(intent, _)| (id, intent.as_str()))
            })
            .collect()
    }
}

/// Build the cross-train config for every LUIS-capable configured language.
pub fn create_cross_train_config(dialogs: &[DialogInfo], lu_files: &[LuFile], options: &Options) -> CrossTrainConfig {
    let languages: Vec<&str> = options.luis_languages().collect();
    let mut config = BTreeMap::new();

    for dialog in dialogs {
        let Some(lu_file) = bound_lu_file(dialog, lu_files) else {
            trace!(dialog = %dialog.id, "no bound LU file");
            continue;
        };

        let triggers: Vec<&IntentTrigger> = dialog
            .intent_triggers
            .iter()
            .filter(|trigger| trigger.intent.is_empty() || lu_file.has_intent(&trigger.intent))
            .collect();
        if triggers.is_empty() {
            trace!(dialog = %dialog.id, "no intent triggers backed by LU intents");
            continue;
        }

        for &language in &languages {
            let mut targets_by_intent: BTreeMap<String, TriggerTargets> = BTreeMap::new();

            for trigger in &triggers {
                let targets = if trigger.dialogs.is_empty() {
                    TriggerTargets::NoDialog
                } else {
                    TriggerTargets::Files(
                        trigger
                            .dialogs
                            .iter()
                            .filter_map(|child| locale_file(lu_files, child, language))
                            .map(|file| file.id.clone())
                            .collect(),
                    )
                };

                match targets_by_intent.get_mut(&trigger.intent) {
                    Some(existing) => existing.merge(targets),
                    None => {
                        targets_by_intent.insert(trigger.intent.clone(), targets);
                    }
                }
            }

            let id = locale_file(lu_files, &dialog.id, language)
                .map_or_else(|| file_id(&dialog.id, language), |file| file.id.clone());
            config.insert(
                id,
                CrossTrainEntry { root_dialog: dialog.is_root, triggers: targets_by_intent },
            );
        }
    }

    debug!(entries = config.len(), languages = languages.len(), "built cross-train config");
    CrossTrainConfig(config)
}

fn bound_lu_file<'a>(dialog: &DialogInfo, lu_files: &'a [LuFile]) -> Option<&'a LuFile> {
    let base_name = dialog.lu_file.as_deref()?;
    lu_files.iter().find(|file| file.base_name() == base_name)
}
