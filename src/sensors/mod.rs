pub mod service;

pub use service::{SensorInput, SensorService};
