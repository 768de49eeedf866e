pub mod config;
pub mod process;
pub mod session;
pub mod task;
pub mod validation;
pub mod watchdog;
