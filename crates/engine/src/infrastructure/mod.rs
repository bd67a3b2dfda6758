//! Infrastructure - external dependency implementations (ports + adapters).

pub mod clock;
pub mod config;
pub mod playbook_api;
pub mod ports;
