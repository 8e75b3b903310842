//! Domain Layer - Value objects and pure derivations

pub mod identity;
pub mod slug;
pub mod term;
pub mod week;
