//! Domain Layer
//!
//! Pure provisioning logic with no direct I/O:
//! - `value_objects`: stage identity, outcomes, policies, versions, hashes
//! - `entities`: the state ledger and run reports
//! - `ports`: traits the infrastructure layer implements
//! - `services`: text substitution, template rendering, write planning

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
