//! # ofwtrack-entity
//!
//! Domain entity models for the OFW Track notification engine. Actors and
//! request snapshots are read-only views owned by the surrounding
//! application; notifications are the rows this engine owns. Database
//! entities additionally derive `sqlx::FromRow`.

pub mod actor;
pub mod notification;
pub mod request;
