//! Pure derivations over visual bot-authoring dialog documents.
//!
//! A dialog is schema-less JSON: nested objects carry a `$kind` and, once
//! created in the editor, a stable `$designer.id`. Everything in this crate is
//! a synchronous function from inputs to a freshly built output; no input is
//! ever mutated.
//!
//! ```text
//! codec ──▶ dialog_data ──▶ cross_train ──▶ recognizer
//!   │            │               │               │
//!   │            │               └── dialog, resources, options
//!   │            └── json_path
//!   └── index path <-> designer-id path
//! ```

#[macro_use]
mod macros;

pub mod codec;
pub mod cross_train;
pub mod dialog;
pub mod dialog_data;
pub mod error;
pub mod focus;
pub mod json_path;
pub mod kinds;
pub mod options;
pub mod recognizer;
pub mod resources;

use serde_json::Value;
use std::collections::BTreeMap;

/// Dialog id -> dialog document.
pub type DialogCollection = BTreeMap<String, Value>;

pub use codec::{decode_designer_path_to_array_path, encode_array_path_to_designer_path, try_encode_array_path};
pub use cross_train::{CrossTrainConfig, CrossTrainEntry, TriggerTargets, create_cross_train_config};
pub use dialog::{DialogInfo, IntentTrigger, ResourceKinds, get_referred_lu_files};
pub use dialog_data::{DialogData, get_dialog_data, set_dialog_data};
pub use error::{Error, Result};
pub use focus::FocusPath;
pub use options::{LuProvider, Options, Project};
pub use recognizer::{RecognizerFile, generate_project_recognizers, generate_recognizers, preserve_recognizer};
pub use resources::{LuFile, QnaFile, ResourceFile};
