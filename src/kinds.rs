//! `$kind` values the derivations discriminate on.

pub const ADAPTIVE_DIALOG: &str = "Microsoft.AdaptiveDialog";
pub const ON_INTENT: &str = "Microsoft.OnIntent";
pub const BEGIN_DIALOG: &str = "Microsoft.BeginDialog";

pub const LUIS_RECOGNIZER: &str = "Microsoft.LuisRecognizer";
pub const QNA_MAKER_RECOGNIZER: &str = "Microsoft.QnAMakerRecognizer";
pub const ORCHESTRATOR_RECOGNIZER: &str = "Microsoft.OrchestratorRecognizer";
pub const MULTI_LANGUAGE_RECOGNIZER: &str = "Microsoft.MultiLanguageRecognizer";
pub const CROSS_TRAINED_RECOGNIZER_SET: &str = "Microsoft.CrossTrainedRecognizerSet";
