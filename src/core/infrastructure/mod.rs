pub mod memory_scheduler;
pub mod memory_store;
pub mod sqlite_store;
pub mod system_clock;
