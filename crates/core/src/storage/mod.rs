pub mod config;
pub mod encryption;
pub mod format;
pub mod local;
pub mod manager;
pub mod records;
pub mod sheets;
pub mod traits;
