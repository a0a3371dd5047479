//! Recognizer file generation.
//!
//! For a dialog bound to LU and/or QnA resources this produces:
//!
//! ```text
//! main.en-us.lu.dialog    LUIS (or Orchestrator) recognizer, one per locale
//! main.lu.dialog          multi-language wrapper over the LU recognizers
//! main.en-us.qna.dialog   QnA Maker recognizer, one per locale
//! main.qna.dialog         multi-language wrapper over the QnA recognizers
//! main.lu.qna.dialog      cross-trained set: [main.lu, main.qna]
//! ```
//!
//! Generation runs after every dialog, LU or QnA change. [`preserve_recognizer`]
//! keeps the content of any file that already existed, so regeneration only
//! adds files for new dialogs/locales and drops stale ones.

#[path = "recognizer/templates.rs"]
mod templates;

pub use templates::{
    CrossTrainedRecognizerSet, LuisRecognizer, MultiLanguageRecognizer, OrchestratorRecognizer, QnaRecognizer,
    cross_trained_recognizer_set_template, luis_recognizer_template, multi_language_recognizer_template,
    orchestrator_recognizer_template, qna_recognizer_template, sanitize_file_name,
};

use crate::dialog::DialogInfo;
use crate::error::Result;
use crate::options::{LuProvider, Options};
use crate::resources::{LuFile, QnaFile, ResourceFile, files_of};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

/// Resource flavor a recognizer reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flavor {
    Lu,
    Qna,
}

impl Flavor {
    pub fn extension(self) -> &'static str {
        match self {
            Flavor::Lu => "lu",
            Flavor::Qna => "qna",
        }
    }

    pub(crate) fn id_prefix(self) -> &'static str {
        match self {
            Flavor::Lu => "LUIS",
            Flavor::Qna => "QnA",
        }
    }
}

/// A generated recognizer document. `content` is free-form once written,
/// since users may hand-edit it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognizerFile {
    pub id: String,
    pub content: Value,
}

impl RecognizerFile {
    pub fn new<T: Serialize>(id: impl Into<String>, content: &T) -> Result<Self> {
        Ok(Self { id: id.into(), content: serde_json::to_value(content)? })
    }
}

/// Every recognizer file for one dialog.
///
/// Only non-empty locale files in a configured language are used; a dialog
/// with none gets no recognizers.
pub fn generate_recognizers(
    dialog: &DialogInfo,
    lu_files: &[LuFile],
    qna_files: &[QnaFile],
    options: &Options,
) -> Result<Vec<RecognizerFile>> {
    let lu = usable_files(lu_files, dialog.lu_file.as_deref(), options);
    let qna = usable_files(qna_files, dialog.qna_file.as_deref(), options);
    let mut recognizers = Vec::new();

    for file in &lu {
        let id = format!("{}.lu.dialog", file.id);
        let recognizer = match options.lu_provider {
            LuProvider::Luis => RecognizerFile::new(id, &luis_recognizer_template(&dialog.id, &file.id)),
            LuProvider::Orchestrator => {
                RecognizerFile::new(id, &orchestrator_recognizer_template(&dialog.id, &file.id))
            }
        };
        recognizers.push(recognizer?);
    }
    if !lu.is_empty() {
        let multi =
            multi_language_recognizer_template(&dialog.id, Flavor::Lu, lu.iter().copied(), &options.default_language);
        recognizers.push(RecognizerFile::new(format!("{}.lu.dialog", dialog.id), &multi)?);
    }

    for file in &qna {
        let template = qna_recognizer_template(&dialog.id, &file.id);
        recognizers.push(RecognizerFile::new(format!("{}.qna.dialog", file.id), &template)?);
    }
    if !qna.is_empty() {
        let multi =
            multi_language_recognizer_template(&dialog.id, Flavor::Qna, qna.iter().copied(), &options.default_language);
        recognizers.push(RecognizerFile::new(format!("{}.qna.dialog", dialog.id), &multi)?);
    }

    let set = cross_trained_recognizer_set_template(&dialog.id, !lu.is_empty(), !qna.is_empty());
    if !set.recognizers.is_empty() {
        recognizers.push(RecognizerFile::new(format!("{}.lu.qna.dialog", dialog.id), &set)?);
    }

    debug!(dialog = %dialog.id, count = recognizers.len(), "generated recognizers");
    Ok(recognizers)
}

fn usable_files<'a, F: ResourceFile>(files: &'a [F], base_name: Option<&'a str>, options: &Options) -> Vec<&'a F> {
    let Some(base_name) = base_name else {
        return Vec::new();
    };
    files_of(files, base_name).filter(|file| !file.is_empty() && options.has_language(file.locale())).collect()
}

/// Generate recognizers for all dialogs, keeping previously stored content.
pub fn generate_project_recognizers(
    dialogs: &[DialogInfo],
    lu_files: &[LuFile],
    qna_files: &[QnaFile],
    options: &Options,
    previous: &[RecognizerFile],
) -> Result<Vec<RecognizerFile>> {
    let mut generated = Vec::new();
    for dialog in dialogs {
        generated.extend(generate_recognizers(dialog, lu_files, qna_files, options)?);
    }
    Ok(preserve_recognizer(generated, previous))
}

/// Keep the old `content` of every generated file whose id already existed.
///
/// Files only present in `previous` are dropped; new ids keep their generated
/// content.
pub fn preserve_recognizer(generated: Vec<RecognizerFile>, previous: &[RecognizerFile]) -> Vec<RecognizerFile> {
    let existing: HashMap<&str, &Value> = previous.iter().map(|file| (file.id.as_str(), &file.content)).collect();

    generated
        .into_iter()
        .map(|file| match existing.get(file.id.as_str()) {
            Some(content) => RecognizerFile { id: file.id, content: (*content).clone() },
            None => file,
        })
        .collect()
}
