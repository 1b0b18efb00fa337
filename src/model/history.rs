use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Hard cap on stored history entries. Appending past the cap evicts the
/// oldest entries first.
pub const MAX_HISTORY_ITEMS: usize = 100;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackupStatus {
    Started,
    Finished,
    Warning,
    Failed,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub time: NaiveDateTime,
    pub status: BackupStatus,
    pub message: String,
}
