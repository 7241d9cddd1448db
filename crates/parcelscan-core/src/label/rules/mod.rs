//! Matching rules for the supported label layout: regex patterns and the
//! closed vocabularies for service names and handling instructions.

pub mod instruction;
pub mod patterns;
pub mod service;

pub use instruction::HandlingInstruction;
pub use service::ServiceType;
