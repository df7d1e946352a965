//! Actor (user directory) entities.

pub mod model;
pub mod role;

pub use model::Actor;
pub use role::ActorRole;
