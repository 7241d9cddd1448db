//! Data models: the label record and pipeline configuration.

pub mod config;
pub mod record;
