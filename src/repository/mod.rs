//! File-backed rate repository.
//!
//! Rates are stored as one JSON document per address (see
//! [`RecordAddress`]). Each rate class exposes the same three operations on
//! [`Repository`]: `update_*` for multi-address batches, `get_*` for a single
//! record and `add_*` as a one-record convenience wrapper around `update_*`.
//!
//! # Update pipeline
//!
//! For every address in a batch, in insertion order:
//!
//! 1. the path segments are checked to be plain names and the charge
//!    states are checked against the species (see [`charge`]),
//! 2. every payload is validated against the class schema and every
//!    transition encoded (see [`codec`]),
//! 3. the existing document is loaded, or an empty one started if the file
//!    does not exist,
//! 4. the new entries overwrite their keys, leaving other keys untouched,
//! 5. the whole document is written back with sorted keys.
//!
//! A failure in steps 1–3 leaves that address's file untouched.

mod address;
mod batch;
mod beam;
mod config;
mod error;
mod pec;
mod record;
mod store;

pub mod charge;
pub mod codec;

pub use address::{BeamEmissionAddress, PecAddress, PecClass, RecordAddress, ThermalCxAddress};
pub use batch::{AddressBatch, UpdateBatch};
pub use config::{REPOSITORY_PATH_ENV, RepositoryConfig};
pub use error::{Error, ErrorKind};
pub use record::{EntryError, RateRecord};

use std::path::Path;

use crate::model::transition::Transition;

/// Handle on a repository rooted at a directory.
///
/// The handle holds only configuration; every call performs its own
/// synchronous file I/O and keeps no state between calls.
///
/// # Examples
///
/// ```
/// use adas_repo::{Element, PecRate, Repository, NdArray};
///
/// let dir = tempfile::tempdir()?;
/// let repo = Repository::new(dir.path());
///
/// let rate = PecRate {
///     ne: vec![1e19, 1e20],
///     te: vec![1.0, 10.0, 100.0],
///     rate: NdArray::from_rows(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap(),
/// };
/// repo.add_pec_excitation_rate(Element::C, 2, (3u32, 2u32), &rate)?;
///
/// assert!(dir.path().join("pec/excitation/c/2.json").exists());
/// let stored = repo.get_pec_excitation_rate(Element::C, 2, (3u32, 2u32))?;
/// assert_eq!(stored, rate);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Repository {
    config: RepositoryConfig,
}

impl Repository {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self::with_config(RepositoryConfig::new(root.as_ref()))
    }

    pub fn with_config(config: RepositoryConfig) -> Self {
        Self { config }
    }

    pub fn root(&self) -> &Path {
        &self.config.root
    }

    pub fn config(&self) -> &RepositoryConfig {
        &self.config
    }

    /// Applies a batch of rates of any class.
    pub fn update<A: RecordAddress>(&self, batch: &UpdateBatch<A>) -> Result<(), Error> {
        store::update(self.root(), batch)
    }

    /// Reads a single rate of any class.
    pub fn get<A: RecordAddress>(
        &self,
        address: &A,
        transition: impl Into<Transition>,
    ) -> Result<A::Record, Error> {
        store::get(self.root(), address, &transition.into())
    }
}
