pub mod api;
pub mod clock;
pub mod config;
pub mod control;
pub mod db;
pub mod error;
pub mod sensors;
pub mod settings;
pub mod store;
pub mod sunset;
pub mod timespec;
