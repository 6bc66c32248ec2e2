//! Pure domain logic for the Callsheet production scheduling platform.
//!
//! This crate has zero internal dependencies so it can be used by the
//! API/repository layer and by any future CLI or worker tooling. It holds
//! the scheduling conflict engine, personnel decoding, role/capability
//! definitions, and input validation.

pub mod conflicts;
pub mod error;
pub mod personnel;
pub mod roles;
pub mod types;
pub mod validation;
