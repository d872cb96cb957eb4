//! A file-backed repository of atomic rate coefficient tables for plasma
//! spectroscopy modelling. Rates are validated against a per-class schema,
//! merged into one JSON document per species and charge state, and read back
//! as typed records.
//!
//! # Features
//!
//! - **Photon emission coefficients** for electron-impact excitation,
//!   recombination and thermal charge exchange
//! - **Beam emission rates** for neutral beam diagnostics
//! - **Merge-on-update** where new transitions are added to an existing
//!   document without disturbing the others
//! - **Atomic writes** through a temporary file renamed over the target
//!
//! # Quick Start
//!
//! ```
//! use adas_repo::{Element, ErrorKind, PecAddress, PecClass, RawRate, Repository, UpdateBatch};
//! use serde_json::json;
//!
//! let dir = tempfile::tempdir()?;
//! let repo = Repository::new(dir.path());
//!
//! // Two C2+ excitation lines written in a single document update
//! let address = PecAddress::new(PecClass::Excitation, Element::C, 2);
//! let payload = |scale: f64| {
//!     RawRate::new()
//!         .with("ne", json!([1e19, 1e20]))
//!         .with("te", json!([10.0, 100.0]))
//!         .with("rate", json!([[1.0 * scale, 2.0 * scale], [3.0 * scale, 4.0 * scale]]))
//! };
//!
//! let mut batch = UpdateBatch::new();
//! batch
//!     .insert(address, (3u32, 2u32), payload(1e-32))
//!     .insert(address, (4u32, 2u32), payload(1e-33));
//! repo.update_pec_rates(&batch)?;
//!
//! let rate = repo.get_pec_excitation_rate(Element::C, 2, (4u32, 2u32))?;
//! assert_eq!(rate.rate.shape(), &[2, 2]);
//!
//! // Lines never stored are reported as not found
//! let err = repo.get_pec_excitation_rate(Element::C, 2, (5u32, 2u32)).unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::NotFound);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Module Organization
//!
//! - [`repository`] – Repository handle, per-class operations, charge rules
//!   and the transition key codec
//!
//! # Data Types
//!
//! ## Addressing
//!
//! - [`Element`] – Chemical element (H through Og)
//! - [`Species`] – Element or named hydrogen isotope
//! - [`Level`] – Integer, labelled or composite energy level
//! - [`Transition`] – Upper and lower level pair
//! - [`PecAddress`], [`ThermalCxAddress`], [`BeamEmissionAddress`] – Document
//!   addresses per rate class
//!
//! ## Rates
//!
//! - [`RawRate`] – Untyped payload submitted for validation
//! - [`NdArray`] – Dense row-major float table
//! - [`PecRate`] – Excitation or recombination PEC on (ne, te)
//! - [`ThermalCxRate`] – Thermal CX PEC on (ne, te, td)
//! - [`BeamEmissionRate`] – Beam emission rate with reference conditions
//!
//! ## Configuration and errors
//!
//! - [`RepositoryConfig`] – Repository root selection
//! - [`Error`], [`ErrorKind`] – Failure reasons and their classification

mod model;

pub mod repository;

pub use model::array::{ArrayError, NdArray};
pub use model::rate::{BeamEmissionRate, PecRate, RawRate, ThermalCxRate};
pub use model::species::{Isotope, ParseSpeciesError, Species};
pub use model::transition::{Level, ParseLevelError, Transition};
pub use model::types::{Element, ParseElementError};

pub use repository::{
    AddressBatch, BeamEmissionAddress, Error, ErrorKind, PecAddress, PecClass, REPOSITORY_PATH_ENV,
    RecordAddress, Repository, RepositoryConfig, ThermalCxAddress, UpdateBatch,
};
