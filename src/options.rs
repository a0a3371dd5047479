//! Project configuration and the input bundle the derivations run over.

use crate::DialogCollection;
use crate::dialog::DialogInfo;
use crate::error::{Error, Result};
use crate::recognizer::RecognizerFile;
use crate::resources::{LUIS_LOCALES, LuFile, QnaFile, same_locale};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Which service recognizes intents from LU resources.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LuProvider {
    #[default]
    Luis,
    Orchestrator,
}

/// Options that shape cross-train and recognizer generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Options {
    /// Languages the bot is authored in, e.g. `["en-us", "fr-fr"]`.
    pub languages: Vec<String>,
    /// Language aliased under the `""` key of multi-language recognizers.
    pub default_language: String,
    pub lu_provider: LuProvider,
    /// Locales LUIS can train; languages outside this list get no cross-train entry.
    pub luis_locales: Vec<String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            languages: vec!["en-us".to_string()],
            default_language: "en-us".to_string(),
            lu_provider: LuProvider::Luis,
            luis_locales: LUIS_LOCALES.iter().map(|l| l.to_string()).collect(),
        }
    }
}

impl Options {
    /// Configured languages that LUIS supports, in configured order.
    pub fn luis_languages(&self) -> impl Iterator<Item = &str> {
        self.languages
            .iter()
            .map(String::as_str)
            .filter(|language| self.luis_locales.iter().any(|locale| same_locale(locale, language)))
    }

    /// Case-insensitive, like every locale comparison in the crate.
    pub fn has_language(&self, language: &str) -> bool {
        self.languages.iter().any(|l| same_locale(l, language))
    }

    pub fn validate(&self) -> Result<()> {
        if self.languages.is_empty() {
            return Err(Error::Config("at least one language is required".to_string()));
        }
        if !self.has_language(&self.default_language) {
            return Err(Error::Config(format!(
                "default language '{}' is not one of the configured languages",
                self.default_language
            )));
        }
        Ok(())
    }
}

/// A dialog as stored by the editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogEntry {
    pub id: String,
    #[serde(default)]
    pub is_root: bool,
    #[serde(default)]
    pub content: Value,
}

/// Everything the derivations read for one project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    pub dialogs: Vec<DialogEntry>,
    pub lu_files: Vec<LuFile>,
    pub qna_files: Vec<QnaFile>,
    pub options: Options,
    /// Recognizer files from the previous generation.
    pub recognizers: Vec<RecognizerFile>,
}

impl Project {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let project: Project = serde_json::from_reader(reader)?;
        project.options.validate()?;
        Ok(project)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn dialog_collection(&self) -> DialogCollection {
        self.dialogs.iter().map(|d| (d.id.clone(), d.content.clone())).collect()
    }

    pub fn dialog_infos(&self) -> Vec<DialogInfo> {
        self.dialogs.iter().map(|d| DialogInfo::from_content(&d.id, d.is_root, &d.content)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_english_luis() {
        let options = Options::default();
        assert_eq!(options.luis_languages().collect::<Vec<_>>(), vec!["en-us"]);
        assert_eq!(options.lu_provider, LuProvider::Luis);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn filters_languages_luis_cannot_train() {
        let options = Options {
            languages: vec!["en-us".into(), "sv-se".into(), "fr-FR".into()],
            ..Options::default()
        };
        assert_eq!(options.luis_languages().collect::<Vec<_>>(), vec!["en-us", "fr-FR"]);
        assert!(options.has_language("fr-fr"));
        assert!(options.has_language("EN-US"));
        assert!(!options.has_language("de-de"));
    }

    #[test]
    fn rejects_default_language_outside_languages() {
        let options = Options { default_language: "de-de".into(), ..Options::default() };
        assert!(matches!(options.validate(), Err(Error::Config(_))));
        let options = Options { languages: vec![], ..Options::default() };
        assert!(options.validate().is_err());
    }

    #[test]
    fn loads_project_bundle() {
        let json = r#"{
            "dialogs": [{ "id": "main", "isRoot": true, "content": { "recognizer": "main.lu" } }],
            "luFiles": [{ "id": "main.en-us", "intents": [{ "name": "Help" }] }],
            "options": { "luProvider": "orchestrator" }
        }"#;
        let project = Project::from_reader(json.as_bytes()).unwrap();

        assert_eq!(project.options.lu_provider, LuProvider::Orchestrator);
        assert_eq!(project.options.default_language, "en-us");
        assert_eq!(project.dialog_infos()[0].lu_file.as_deref(), Some("main"));
        assert!(project.dialog_collection().contains_key("main"));
    }

    #[test]
    fn rejects_malformed_bundle() {
        assert!(matches!(Project::from_reader("{ not json".as_bytes()), Err(Error::Json(_))));
    }
}
