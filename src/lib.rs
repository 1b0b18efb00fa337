pub mod core;
pub mod interface;
pub mod model;
pub mod utils;

pub use crate::core::backup_config::BackupConfig;
pub use crate::model::error::Error;
