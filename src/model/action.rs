use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// The latest action reported by a running backup. A single slot, overwritten
/// on every update.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CurrentAction {
    pub time: NaiveDateTime,
    pub message: String,
    pub file: Option<String>,
}

/// In-run progress state: the current action slot plus the ledger of every
/// file path reported so far. Reset by `BackupConfig::clean_up`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ActionState {
    pub current: Option<CurrentAction>,
    pub uploaded_files: Vec<String>,
}
