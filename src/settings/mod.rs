pub mod service;

pub use service::{SettingsInput, SettingsService};
