pub mod schedule;
pub mod store;

use crate::model::error::schedule::ScheduleError;
use crate::model::error::store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Schedule(ScheduleError),
    #[error(transparent)]
    Store(StoreError),
}

impl From<ScheduleError> for Error {
    fn from(error: ScheduleError) -> Self {
        Self::Schedule(error)
    }
}

impl From<StoreError> for Error {
    fn from(error: StoreError) -> Self {
        Self::Store(error)
    }
}
