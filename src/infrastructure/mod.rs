//! Infrastructure layer: persistence and external integrations.

pub mod persistence;
