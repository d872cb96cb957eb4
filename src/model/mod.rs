//! Core data structures for atomic rate data.
//!
//! - [`types`] – Periodic table elements.
//! - [`species`] – Elements and isotopes as the physical species rates refer to.
//! - [`transition`] – Energy level identifiers and transitions between them.
//! - [`array`] – Dense `f64` arrays coerced from JSON numbers and nested lists.
//! - [`rate`] – Raw rate payloads and the typed records the repository returns.
//!
//! Raw payloads ([`RawRate`](rate::RawRate)) are deliberately untyped; they
//! only become typed records after the [`crate::repository`] has validated them
//! against a rate class.

pub mod array;
pub mod rate;
pub mod species;
pub mod transition;
pub mod types;
