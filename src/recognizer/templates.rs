//! Recognizer document factories.
//!
//! Service credentials are never written into a recognizer. Each template
//! points at a settings expression keyed by the sanitized resource file name
//! (`main.en-us` -> `main_en_us`), so one dialog can be re-pointed at another
//! LUIS app, knowledge base or snapshot per environment.

use super::Flavor;
use crate::kinds;
use crate::resources::{ResourceFile, same_locale};
use serde::Serialize;
use std::collections::BTreeMap;

/// Replace `.` and `-` with `_`.
pub fn sanitize_file_name(file_name: &str) -> String {
    regex!(r"[.\-]").replace_all(file_name, "_").into_owned()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LuisRecognizer {
    #[serde(rename = "$kind")]
    pub kind: &'static str,
    pub id: String,
    pub application_id: String,
    pub version: String,
    pub endpoint: String,
    pub endpoint_key: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QnaRecognizer {
    #[serde(rename = "$kind")]
    pub kind: &'static str,
    pub id: String,
    pub knowledge_base_id: String,
    pub hostname: String,
    pub endpoint_key: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrchestratorRecognizer {
    #[serde(rename = "$kind")]
    pub kind: &'static str,
    pub id: String,
    pub model_folder: String,
    pub snapshot_file: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MultiLanguageRecognizer {
    #[serde(rename = "$kind")]
    pub kind: &'static str,
    pub id: String,
    /// Locale -> recognizer reference; `""` is the default-language fallback.
    pub recognizers: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrossTrainedRecognizerSet {
    #[serde(rename = "$kind")]
    pub kind: &'static str,
    /// Tried in order.
    pub recognizers: Vec<String>,
}

pub fn luis_recognizer_template(target: &str, file_name: &str) -> LuisRecognizer {
    let key = sanitize_file_name(file_name);
    LuisRecognizer {
        kind: kinds::LUIS_RECOGNIZER,
        id: format!("LUIS_{target}"),
        application_id: format!("=settings.luis.{key}_lu.appId"),
        version: format!("=settings.luis.{key}_lu.version"),
        endpoint: "=settings.luis.endpoint".to_string(),
        endpoint_key: "=settings.luis.endpointKey".to_string(),
    }
}

pub fn qna_recognizer_template(target: &str, file_name: &str) -> QnaRecognizer {
    QnaRecognizer {
        kind: kinds::QNA_MAKER_RECOGNIZER,
        id: format!("QnA_{target}"),
        knowledge_base_id: format!("=settings.qna.{}_qna", sanitize_file_name(file_name)),
        hostname: "=settings.qna.hostname".to_string(),
        endpoint_key: "=settings.qna.endpointKey".to_string(),
    }
}

/// English locales share the `en` model; everything else uses `multilang`.
/// The snapshot key keeps the file name's original casing.
pub fn orchestrator_recognizer_template(target: &str, file_name: &str) -> OrchestratorRecognizer {
    let locale = file_name.rsplit_once('.').map_or("", |(_, locale)| locale).to_lowercase();
    let model = if locale.starts_with("en") { "en" } else { "multilang" };

    OrchestratorRecognizer {
        kind: kinds::ORCHESTRATOR_RECOGNIZER,
        id: format!("Orchestrator_{target}"),
        model_folder: format!("=settings.orchestrator.models.{model}"),
        snapshot_file: format!("=settings.orchestrator.snapshots.{}", sanitize_file_name(file_name)),
    }
}

/// Wrap the non-empty locale files of one dialog. The default language's
/// entry is repeated under `""`.
pub fn multi_language_recognizer_template<'a, F, I>(
    target: &str,
    flavor: Flavor,
    files: I,
    default_language: &str,
) -> MultiLanguageRecognizer
where
    F: ResourceFile + 'a,
    I: IntoIterator<Item = &'a F>,
{
    let mut recognizers: BTreeMap<String, String> = files
        .into_iter()
        .filter(|file| !file.is_empty())
        .map(|file| (file.locale().to_string(), format!("{}.{}", file.id(), flavor.extension())))
        .collect();

    let fallback =
        recognizers.iter().find(|(locale, _)| same_locale(locale, default_language)).map(|(_, id)| id.clone());
    if let Some(fallback) = fallback {
        recognizers.insert(String::new(), fallback);
    }

    MultiLanguageRecognizer {
        kind: kinds::MULTI_LANGUAGE_RECOGNIZER,
        id: format!("{}_{target}", flavor.id_prefix()),
        recognizers,
    }
}

/// `<target>.lu` then `<target>.qna`, each only when the dialog has a
/// non-empty file of that kind.
pub fn cross_trained_recognizer_set_template(target: &str, has_lu: bool, has_qna: bool) -> CrossTrainedRecognizerSet {
    let mut recognizers = Vec::new();
    if has_lu {
        recognizers.push(format!("{target}.{}", Flavor::Lu.extension()));
    }
    if has_qna {
        recognizers.push(format!("{target}.{}", Flavor::Qna.extension()));
    }
    CrossTrainedRecognizerSet { kind: kinds::CROSS_TRAINED_RECOGNIZER_SET, recognizers }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::{LuFile, QnaFile};

    #[test]
    fn sanitizes_dots_and_hyphens() {
        assert_eq!(sanitize_file_name("main.en-us"), "main_en_us");
        assert_eq!(sanitize_file_name("plain"), "plain");
    }

    #[test]
    fn luis_points_at_settings() {
        let luis = luis_recognizer_template("main", "main.en-us");
        assert_eq!(luis.id, "LUIS_main");
        assert_eq!(luis.application_id, "=settings.luis.main_en_us_lu.appId");
        assert_eq!(luis.version, "=settings.luis.main_en_us_lu.version");
        assert_eq!(luis.endpoint_key, "=settings.luis.endpointKey");
    }

    #[test]
    fn qna_points_at_settings() {
        let qna = qna_recognizer_template("main", "main.en-us");
        assert_eq!(qna.id, "QnA_main");
        assert_eq!(qna.knowledge_base_id, "=settings.qna.main_en_us_qna");
    }

    #[test]
    fn orchestrator_normalizes_locale() {
        let en = orchestrator_recognizer_template("", "Test.eN-GB");
        assert_eq!(en.model_folder, "=settings.orchestrator.models.en");
        assert_eq!(en.snapshot_file, "=settings.orchestrator.snapshots.Test_eN_GB");

        let zh = orchestrator_recognizer_template("", "Test.zh");
        assert_eq!(zh.model_folder, "=settings.orchestrator.models.multilang");
    }

    #[test]
    fn multi_language_skips_empty_files_and_aliases_default() {
        let files = vec![
            LuFile::new("main.en-us", ["Help"]),
            LuFile::new("main.fr-fr", ["Aide"]),
            LuFile::new("main.de-de", Vec::<String>::new()),
        ];
        let multi = multi_language_recognizer_template("main", Flavor::Lu, &files, "en-us");

        assert_eq!(multi.id, "LUIS_main");
        assert_eq!(multi.recognizers.len(), 3);
        assert_eq!(multi.recognizers["en-us"], "main.en-us.lu");
        assert_eq!(multi.recognizers["fr-fr"], "main.fr-fr.lu");
        assert_eq!(multi.recognizers[""], "main.en-us.lu");
        assert!(!multi.recognizers.contains_key("de-de"));
    }

    #[test]
    fn multi_language_without_default_has_no_fallback() {
        let files = vec![QnaFile::new("main.fr-fr", 2)];
        let multi = multi_language_recognizer_template("main", Flavor::Qna, &files, "en-us");
        assert_eq!(multi.id, "QnA_main");
        assert!(!multi.recognizers.contains_key(""));
    }

    #[test]
    fn cross_trained_set_orders_lu_first() {
        assert_eq!(cross_trained_recognizer_set_template("main", true, true).recognizers, vec!["main.lu", "main.qna"]);
        assert_eq!(cross_trained_recognizer_set_template("main", false, true).recognizers, vec!["main.qna"]);
        assert!(cross_trained_recognizer_set_template("main", false, false).recognizers.is_empty());
    }
}
