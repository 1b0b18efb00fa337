use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

pub const DEFAULT_DUMP_LOCATION: &str = "backups";
pub const DEFAULT_DROPBOX_LOCATION: &str = "Dropvault";

pub const INVALID_PATH_MESSAGE: &str = "Invalid directory path. Path must only contain \
    alphanumeric characters and the forward slash ('/') to separate directories.";

/// User-configurable options for the periodic backup job. The whole record is
/// persisted as one blob and replaced wholesale on every successful update.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BackupOptions {
    pub dump_location: String,
    pub dropbox_location: String,
    pub last_backup_time: Option<NaiveDateTime>,
    pub in_progress: bool,
}

impl Default for BackupOptions {
    fn default() -> Self {
        BackupOptions {
            dump_location: DEFAULT_DUMP_LOCATION.to_string(),
            dropbox_location: DEFAULT_DROPBOX_LOCATION.to_string(),
            last_backup_time: None,
            in_progress: false,
        }
    }
}

/// Classification of the raw options blob read from the store. `Missing` and
/// `Malformed` are substituted with the default record at load time.
#[derive(Debug, Clone)]
pub enum StoredOptions {
    Valid(BackupOptions),
    Missing,
    Malformed,
}

impl StoredOptions {
    pub fn classify(raw: Option<Value>) -> Self {
        match raw {
            None => StoredOptions::Missing,
            Some(value) => match serde_json::from_value(value) {
                Ok(options) => StoredOptions::Valid(options),
                Err(_) => StoredOptions::Malformed,
            },
        }
    }

    pub fn needs_heal(&self) -> bool {
        !matches!(self, StoredOptions::Valid(_))
    }

    pub fn into_options(self) -> BackupOptions {
        match self {
            StoredOptions::Valid(options) => options,
            StoredOptions::Missing | StoredOptions::Malformed => BackupOptions::default(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FieldError {
    pub original: String,
    pub message: String,
}

/// Per-field validation failures keyed by field name. An empty mapping means
/// the proposed update was accepted in full.
#[derive(Serialize, Debug, Clone, Default)]
pub struct ValidationErrors {
    errors: HashMap<&'static str, FieldError>,
}

impl ValidationErrors {
    pub fn insert(&mut self, field: &'static str, error: FieldError) {
        self.errors.insert(field, error);
    }

    pub fn get(&self, field: &str) -> Option<&FieldError> {
        self.errors.get(field)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }
}

/// Validates a relative directory path and returns its normalized form.
///
/// Accepts only ASCII alphanumerics and `/`. Leading and trailing slashes are
/// stripped and runs of slashes collapse to a single separator, so
/// `///a////b///` normalizes to `a/b`. Rejection reports the raw input
/// untouched.
pub fn validate_directory_path(raw: &str) -> Result<String, FieldError> {
    if !raw.chars().all(|c| c.is_ascii_alphanumeric() || c == '/') {
        return Err(FieldError {
            original: raw.to_string(),
            message: INVALID_PATH_MESSAGE.to_string(),
        });
    }
    let normalized = raw
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("/");
    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_plain_alphanumeric_paths() {
        assert_eq!(validate_directory_path("content/backups").unwrap(), "content/backups");
        assert_eq!(validate_directory_path("Dropvault").unwrap(), "Dropvault");
    }

    #[test]
    fn strips_and_collapses_slashes() {
        assert_eq!(validate_directory_path("///a////b///").unwrap(), "a/b");
        assert_eq!(validate_directory_path("/content/backups").unwrap(), "content/backups");
        assert_eq!(
            validate_directory_path("////Backups///SiteOne////").unwrap(),
            "Backups/SiteOne"
        );
    }

    #[test]
    fn slash_only_input_normalizes_to_empty() {
        assert_eq!(validate_directory_path("///").unwrap(), "");
    }

    #[test]
    fn rejects_every_non_alphanumeric_character() {
        let bad_chars = [
            '!', '@', '#', '$', '%', '^', '&', '*', '(', ')', '+', '=', '{', '}', ']', '[', ':',
            ';', '"', '\'', '<', '>', '?', ',', '~', '`', '|', '\\', '.', '-', '_', ' ',
        ];
        for bad_char in bad_chars {
            let raw = format!("backups/{bad_char}");
            let error = validate_directory_path(&raw).unwrap_err();
            assert_eq!(error.original, raw);
            assert_eq!(error.message, INVALID_PATH_MESSAGE);
        }
    }

    #[test]
    fn classify_missing_and_malformed_blobs() {
        assert!(matches!(StoredOptions::classify(None), StoredOptions::Missing));
        assert!(matches!(
            StoredOptions::classify(Some(json!(["bad"]))),
            StoredOptions::Malformed
        ));
        // Missing expected keys counts as malformed, not a partial record.
        assert!(matches!(
            StoredOptions::classify(Some(json!({ "dump_location": "backups" }))),
            StoredOptions::Malformed
        ));

        let valid = serde_json::to_value(BackupOptions::default()).unwrap();
        assert!(matches!(
            StoredOptions::classify(Some(valid)),
            StoredOptions::Valid(_)
        ));
    }

    #[test]
    fn malformed_blob_substitutes_defaults() {
        let options = StoredOptions::classify(Some(json!("junk"))).into_options();
        assert_eq!(options, BackupOptions::default());
    }
}
