//! Per-dialog, per-locale resource files (LU, QnA).
//!
//! File ids have the shape `<dialogBaseName>.<locale>`, e.g. `main.en-us`.
//! Only the parts of a parsed resource the derivations need are modelled; a
//! file is `empty` when its parse produced no sections.

use serde::{Deserialize, Serialize};

/// Locales a LUIS application can be trained for.
pub const LUIS_LOCALES: &[&str] = &[
    "ar-ar", "zh-cn", "nl-nl", "en-us", "fr-ca", "fr-fr", "de-de", "gu-in", "hi-in", "it-it", "ja-jp", "ko-kr", "mr-in",
    "pt-br", "es-es", "es-mx", "ta-in", "te-in", "tr-tr",
];

/// Text before the last `.` (`main.en-us` -> `main`). Ids without a dot are
/// their own base name.
pub fn get_base_name(file_id: &str) -> &str {
    file_id.rsplit_once('.').map_or(file_id, |(base, _)| base)
}

/// Text after the last `.` (`main.en-us` -> `en-us`), empty without a dot.
pub fn get_locale(file_id: &str) -> &str {
    file_id.rsplit_once('.').map_or("", |(_, locale)| locale)
}

/// Extension of a file name without the dot (`main.lu` -> `lu`).
pub fn get_extension(file_name: &str) -> Option<&str> {
    file_name.rsplit_once('.').map(|(_, ext)| ext).filter(|ext| !ext.is_empty())
}

/// Locale codes compare case-insensitively: `fr-FR` and `fr-fr` are the same.
pub fn same_locale(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}

/// `<base>.<locale>`
pub fn file_id(base_name: &str, locale: &str) -> String {
    format!("{base_name}.{locale}")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LuIntent {
    #[serde(alias = "Name")]
    pub name: String,
}

/// Parsed LU file. When `empty` is absent from serialized input it is derived
/// from `intents`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "LuFileFields")]
pub struct LuFile {
    pub id: String,
    pub intents: Vec<LuIntent>,
    pub empty: bool,
}

#[derive(Deserialize)]
struct LuFileFields {
    id: String,
    #[serde(default)]
    intents: Vec<LuIntent>,
    empty: Option<bool>,
}

impl From<LuFileFields> for LuFile {
    fn from(fields: LuFileFields) -> Self {
        let empty = fields.empty.unwrap_or(fields.intents.is_empty());
        Self { id: fields.id, intents: fields.intents, empty }
    }
}

impl LuFile {
    pub fn new<I, S>(id: impl Into<String>, intents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let intents: Vec<LuIntent> = intents.into_iter().map(|name| LuIntent { name: name.into() }).collect();
        let empty = intents.is_empty();
        Self { id: id.into(), intents, empty }
    }

    pub fn has_intent(&self, name: &str) -> bool {
        self.intents.iter().any(|intent| intent.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QnaFile {
    pub id: String,
    #[serde(default)]
    pub empty: bool,
}

impl QnaFile {
    /// `sections` is the number of question/answer sections parsed.
    pub fn new(id: impl Into<String>, sections: usize) -> Self {
        Self { id: id.into(), empty: sections == 0 }
    }
}

/// Common view over LU and QnA files.
pub trait ResourceFile {
    fn id(&self) -> &str;
    fn is_empty(&self) -> bool;

    fn base_name(&self) -> &str {
        get_base_name(self.id())
    }

    fn locale(&self) -> &str {
        get_locale(self.id())
    }
}

impl ResourceFile for LuFile {
    fn id(&self) -> &str {
        &self.id
    }

    fn is_empty(&self) -> bool {
        self.empty
    }
}

impl ResourceFile for QnaFile {
    fn id(&self) -> &str {
        &self.id
    }

    fn is_empty(&self) -> bool {
        self.empty
    }
}

/// The file of `base_name` for `locale`, if one exists.
pub fn locale_file<'a, F: ResourceFile>(files: &'a [F], base_name: &str, locale: &str) -> Option<&'a F> {
    files.iter().find(|file| file.base_name() == base_name && same_locale(file.locale(), locale))
}

/// Locale files belonging to `base_name`.
pub fn files_of<'a, F: ResourceFile>(files: &'a [F], base_name: &'a str) -> impl Iterator<Item = &'a F> + 'a {
    files.iter().filter(move |file| file.base_name() == base_name)
}
