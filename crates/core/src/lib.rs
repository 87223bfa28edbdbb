//! Pure domain logic for the Redline page revision-history subsystem.
//!
//! This crate has zero internal dependencies so it can be used by the
//! repository layer, the API layer, and any future CLI or worker tooling.
//! Persistence lives in `redline-db`.

pub mod history;
pub mod metadata;
pub mod patch;
pub mod render;
pub mod types;
