//! Error types for the rate repository.
//!
//! Errors are classified by [`ErrorKind`]: validation of caller input,
//! physically invalid charge states, missing data on read, I/O or decoding
//! failures of the stored documents, and unreadable configuration.

use std::path::{Path, PathBuf};

use thiserror::Error;

use super::charge::ChargeRole;
use crate::model::array::ArrayError;
use crate::model::species::Species;

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed caller input: missing fields, wrong rank, inconsistent
    /// shapes, invalid level labels. Always caller-fixable.
    Validation,
    /// A charge state outside the range allowed for the species and role.
    InvalidState,
    /// The requested document or transition does not exist.
    NotFound,
    /// File system failure or an unreadable stored document.
    Io,
    /// An unreadable repository configuration.
    Config,
}

/// Errors that can occur while updating or reading the repository.
#[derive(Debug, Error)]
pub enum Error {
    /// A required payload field is absent.
    #[error("rate data is missing the required field '{field}'")]
    MissingField {
        /// Name of the missing field.
        field: &'static str,
    },

    /// A payload field could not be coerced to a float array.
    #[error("field '{field}' is not a valid numeric array: {source}")]
    InvalidNumeric {
        field: &'static str,
        #[source]
        source: ArrayError,
    },

    /// A payload field has the wrong number of dimensions.
    #[error("{description} array '{field}' must be a {expected}D array, found {found}D")]
    InvalidRank {
        field: &'static str,
        description: &'static str,
        expected: usize,
        found: usize,
    },

    /// A table's shape does not match the lengths of its axes.
    #[error(
        "{axes} and {table} data arrays have inconsistent sizes: expected {table} shape {expected:?}, found {found:?}"
    )]
    ShapeMismatch {
        /// Human readable list of the axes involved.
        axes: &'static str,
        table: &'static str,
        expected: Vec<usize>,
        found: Vec<usize>,
    },

    /// A level label cannot be encoded into an unambiguous key.
    #[error("invalid level label '{label}': {detail}")]
    InvalidLevel { label: String, detail: &'static str },

    /// A species symbol cannot be used as a repository path segment.
    #[error("'{segment}' is not a valid repository path segment: {detail}")]
    InvalidPathSegment {
        segment: String,
        detail: &'static str,
    },

    /// The charge state is not physically valid for the species in this role.
    #[error(
        "{role} charge state {charge} is out of range for {species} (atomic number {atomic_number}{})",
        .role.range_note()
    )]
    InvalidCharge {
        role: ChargeRole,
        species: Species,
        charge: u32,
        atomic_number: u8,
    },

    /// The requested rate is not in the repository.
    #[error("requested {address} for transition '{transition}' is not available")]
    NotFound {
        /// Description of the full address: class, species and charges.
        address: String,
        transition: String,
        path: PathBuf,
    },

    /// A stored entry exists but cannot be decoded.
    #[error("stored entry '{key}' in {} is malformed: field '{field}' {detail}", .path.display())]
    MalformedEntry {
        path: PathBuf,
        key: String,
        field: &'static str,
        detail: String,
    },

    /// An existing document is not valid JSON or not a JSON object.
    #[error("failed to parse repository document {}: {detail}", .path.display())]
    MalformedDocument { path: PathBuf, detail: String },

    /// File system failure.
    #[error("I/O operation on {} failed: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse a repository configuration file.
    #[error("failed to parse repository configuration: {0}")]
    Config(#[from] toml::de::Error),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::MissingField { .. }
            | Error::InvalidNumeric { .. }
            | Error::InvalidRank { .. }
            | Error::ShapeMismatch { .. }
            | Error::InvalidLevel { .. }
            | Error::InvalidPathSegment { .. } => ErrorKind::Validation,
            Error::InvalidCharge { .. } => ErrorKind::InvalidState,
            Error::NotFound { .. } => ErrorKind::NotFound,
            Error::MalformedEntry { .. } | Error::MalformedDocument { .. } | Error::Io { .. } => {
                ErrorKind::Io
            }
            Error::Config(_) => ErrorKind::Config,
        }
    }

    #[inline]
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    /// Creates an [`InvalidRank`](Error::InvalidRank) error.
    pub fn invalid_rank(
        field: &'static str,
        description: &'static str,
        expected: usize,
        found: usize,
    ) -> Self {
        Self::InvalidRank {
            field,
            description,
            expected,
            found,
        }
    }

    /// Creates a [`ShapeMismatch`](Error::ShapeMismatch) error.
    pub fn shape_mismatch(
        axes: &'static str,
        table: &'static str,
        expected: Vec<usize>,
        found: &[usize],
    ) -> Self {
        Self::ShapeMismatch {
            axes,
            table,
            expected,
            found: found.to_vec(),
        }
    }

    /// Creates an [`InvalidLevel`](Error::InvalidLevel) error.
    pub fn invalid_level(label: impl Into<String>, detail: &'static str) -> Self {
        Self::InvalidLevel {
            label: label.into(),
            detail,
        }
    }

    /// Creates an [`Io`](Error::Io) error for the given path.
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Creates a [`MalformedDocument`](Error::MalformedDocument) error.
    pub fn malformed_document(path: &Path, detail: impl Into<String>) -> Self {
        Self::MalformedDocument {
            path: path.to_path_buf(),
            detail: detail.into(),
        }
    }
}
