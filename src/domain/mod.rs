//! Domain layer: identifiers, records and configuration model

pub mod entities;
pub mod value_objects;
