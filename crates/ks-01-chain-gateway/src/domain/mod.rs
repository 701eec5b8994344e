//! # Domain Module
//!
//! Core domain types for the Chain Gateway.

pub mod entities;
pub mod errors;
pub mod mapping;
pub mod value_objects;

pub use entities::*;
pub use errors::*;
pub use mapping::*;
pub use value_objects::*;
