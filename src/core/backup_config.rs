use crate::interface::clock::Clock;
use crate::interface::scheduler::EventScheduler;
use crate::interface::store::KeyValueStore;
use crate::model::action::{ActionState, CurrentAction};
use crate::model::error::Error;
use crate::model::error::store::StoreError;
use crate::model::history::{BackupStatus, HistoryEntry, MAX_HISTORY_ITEMS};
use crate::model::options::{
    BackupOptions, StoredOptions, ValidationErrors, validate_directory_path,
};
use crate::model::schedule::{Schedule, parse_day_of_week, parse_time_of_day, resolve_next_run};
use chrono::NaiveDateTime;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::VecDeque;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const OPTIONS_KEY: &str = "backup-options";
pub const HISTORY_KEY: &str = "backup-history";
pub const ACTION_STATE_KEY: &str = "backup-action-state";
pub const SCHEDULE_KEY: &str = "backup-schedule";

/// Recurring trigger registered by `set_schedule`.
pub const EXECUTE_BACKUP_EVENT: &str = "execute-periodic-backup";
/// Triggers cleared by `clean_up`.
pub const MONITOR_BACKUP_EVENT: &str = "monitor-backup";
pub const RUN_BACKUP_EVENT: &str = "run-backup";

/// Configuration and scheduling state for the periodic backup job.
///
/// Owns the in-memory copies of the options record, the bounded history log,
/// the in-run action state, and the schedule record; every mutation that must
/// survive a restart is written straight through to the injected store.
pub struct BackupConfig {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    scheduler: Arc<dyn EventScheduler>,
    options: BackupOptions,
    history: VecDeque<HistoryEntry>,
    action_state: ActionState,
    schedule: Option<Schedule>,
}

impl BackupConfig {
    /// Loads persisted state from the store. A missing or malformed options
    /// blob is replaced by the default record, which is persisted back so the
    /// next load sees a valid blob. Malformed history, action, or schedule
    /// blobs degrade to empty state.
    pub async fn new(
        store: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
        scheduler: Arc<dyn EventScheduler>,
    ) -> Result<Self, Error> {
        let stored = StoredOptions::classify(store.get(OPTIONS_KEY).await?);
        if matches!(stored, StoredOptions::Malformed) {
            warn!("Stored backup options are malformed, resetting to defaults");
        }
        let needs_heal = stored.needs_heal();
        let options = stored.into_options();
        if needs_heal {
            let value = serde_json::to_value(&options).map_err(StoreError::EncodeFailed)?;
            store.set(OPTIONS_KEY, value).await?;
        }

        let history = Self::load_or_default(&*store, HISTORY_KEY).await?;
        let action_state = Self::load_or_default(&*store, ACTION_STATE_KEY).await?;
        let schedule = Self::load_or_default(&*store, SCHEDULE_KEY).await?;

        Ok(BackupConfig {
            store,
            clock,
            scheduler,
            options,
            history,
            action_state,
            schedule,
        })
    }

    async fn load_or_default<T>(store: &dyn KeyValueStore, key: &str) -> Result<T, Error>
    where
        T: DeserializeOwned + Default,
    {
        let value = store.get(key).await?;
        Ok(value
            .and_then(|value| serde_json::from_value(value).ok())
            .unwrap_or_default())
    }

    async fn persist<T: Serialize>(&self, key: &str, value: &T) -> Result<(), Error> {
        let value = serde_json::to_value(value).map_err(StoreError::EncodeFailed)?;
        self.store.set(key, value).await
    }

    pub fn get_options(&self) -> &BackupOptions {
        &self.options
    }

    /// Validates and applies a proposed options record.
    ///
    /// Both path fields are validated against the stored-path invariant; any
    /// failure rejects the whole update and returns the field-to-error
    /// mapping with prior state untouched. An empty mapping means the
    /// normalized record was persisted and adopted. `last_backup_time` and
    /// `in_progress` pass through unvalidated.
    pub async fn set_options(&mut self, proposed: BackupOptions) -> Result<ValidationErrors, Error> {
        let mut errors = ValidationErrors::default();
        let mut staged = proposed;

        match validate_directory_path(&staged.dump_location) {
            Ok(normalized) => staged.dump_location = normalized,
            Err(error) => errors.insert("dump_location", error),
        }
        match validate_directory_path(&staged.dropbox_location) {
            Ok(normalized) => staged.dropbox_location = normalized,
            Err(error) => errors.insert("dropbox_location", error),
        }

        if !errors.is_empty() {
            debug!("Rejected options update with {} invalid field(s)", errors.len());
            return Ok(errors);
        }

        self.persist(OPTIONS_KEY, &staged).await?;
        self.options = staged;
        Ok(errors)
    }

    /// Appends a history entry stamped with the current display time,
    /// evicting the oldest entries once the cap is exceeded.
    pub async fn log(
        &mut self,
        status: BackupStatus,
        message: impl Into<String>,
    ) -> Result<(), Error> {
        self.history.push_back(HistoryEntry {
            time: self.clock.now_in_display_tz(),
            status,
            message: message.into(),
        });
        while self.history.len() > MAX_HISTORY_ITEMS {
            self.history.pop_front();
        }
        self.persist(HISTORY_KEY, &self.history).await
    }

    pub fn get_history(&self) -> &VecDeque<HistoryEntry> {
        &self.history
    }

    pub async fn clear_history(&mut self) -> Result<(), Error> {
        self.history.clear();
        self.persist(HISTORY_KEY, &self.history).await
    }

    /// Overwrites the current-action slot. A non-empty `file` is also
    /// appended to the uploaded-files ledger.
    pub async fn set_current_action(
        &mut self,
        message: impl Into<String>,
        file: Option<&str>,
    ) -> Result<(), Error> {
        let file = file.filter(|file| !file.is_empty());
        if let Some(file) = file {
            self.action_state.uploaded_files.push(file.to_string());
        }
        self.action_state.current = Some(CurrentAction {
            time: self.clock.now_in_display_tz(),
            message: message.into(),
            file: file.map(str::to_string),
        });
        self.persist(ACTION_STATE_KEY, &self.action_state).await
    }

    pub fn get_current_action(&self) -> Option<&CurrentAction> {
        self.action_state.current.as_ref()
    }

    /// Every non-empty file path reported via `set_current_action` during
    /// this run, in call order. Duplicates are kept.
    pub fn get_uploaded_files(&self) -> &[String] {
        &self.action_state.uploaded_files
    }

    pub fn in_progress(&self) -> bool {
        self.options.in_progress
    }

    pub async fn set_in_progress(&mut self, in_progress: bool) -> Result<(), Error> {
        self.options.in_progress = in_progress;
        self.persist(OPTIONS_KEY, &self.options).await
    }

    /// Records the completion time of the last successful run.
    pub async fn set_last_backup_time(&mut self, time: NaiveDateTime) -> Result<(), Error> {
        self.options.last_backup_time = Some(time);
        self.persist(OPTIONS_KEY, &self.options).await
    }

    /// Resolves the next run instant from an optional weekday name and a
    /// time of day, registers the recurring trigger with the host scheduler
    /// in system-clock time, and persists the display-time schedule record.
    pub async fn set_schedule(
        &mut self,
        day: Option<&str>,
        time_of_day: &str,
        recurrence: impl Into<String>,
    ) -> Result<Schedule, Error> {
        let weekday = day.map(parse_day_of_week).transpose()?;
        let time_of_day = parse_time_of_day(time_of_day)?;

        let display_now = self.clock.now_in_display_tz();
        let next_run = resolve_next_run(display_now, weekday, time_of_day);

        // The host scheduler runs on the system clock, not display time.
        let first_run = next_run - (display_now - self.clock.now());
        let recurrence = recurrence.into();
        self.scheduler
            .schedule_recurring(EXECUTE_BACKUP_EVENT, first_run, &recurrence);
        info!("Next backup scheduled for {next_run} ({recurrence})");

        let schedule = Schedule {
            next_run,
            recurrence,
        };
        self.persist(SCHEDULE_KEY, &schedule).await?;
        self.schedule = Some(schedule.clone());
        Ok(schedule)
    }

    pub fn get_schedule(&self) -> Option<&Schedule> {
        self.schedule.as_ref()
    }

    /// Clears the action slot and the uploaded-files ledger and deregisters
    /// the monitoring and execution triggers. Options, history, and the
    /// periodic trigger are untouched.
    pub async fn clean_up(&mut self) -> Result<(), Error> {
        self.action_state = ActionState::default();
        self.persist(ACTION_STATE_KEY, &self.action_state).await?;
        self.scheduler.unschedule(MONITOR_BACKUP_EVENT);
        self.scheduler.unschedule(RUN_BACKUP_EVENT);
        debug!("Cleared action state and monitoring triggers");
        Ok(())
    }
}
