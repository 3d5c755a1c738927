pub mod decision;
pub mod service;

pub use service::ControlService;
