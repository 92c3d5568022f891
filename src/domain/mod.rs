//! Domain Layer
//!
//! Pure types and the traits at the process/operator boundary. Nothing here
//! spawns processes or prompts.

pub mod entities;
pub mod ports;
pub mod value_objects;
