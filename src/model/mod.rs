pub mod action;
pub mod error;
pub mod history;
pub mod options;
pub mod schedule;
