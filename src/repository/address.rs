//! Document addresses.
//!
//! An address identifies exactly one JSON document: the rate class plus the
//! chain of species and charge states. Its repository-relative path is the
//! only addressing scheme and doubles as the canonical grouping key for
//! update batches.

use std::fmt;
use std::path::PathBuf;

use super::charge::{ChargeRole, check_charge};
use super::error::Error;
use super::record::RateRecord;
use crate::model::rate::{BeamEmissionRate, PecRate, ThermalCxRate};
use crate::model::species::Species;

/// Address of one repository document, tied to the record type it stores.
pub trait RecordAddress: Clone + fmt::Display {
    type Record: RateRecord;

    /// Path segments under the repository root. The last segment is the
    /// file stem (a charge state).
    fn segments(&self) -> Vec<String>;

    /// Checks every charge in the address against its species and role.
    fn check_charges(&self) -> Result<(), Error>;

    /// Checks that every segment is a plain directory or file name, so the
    /// document stays below the repository root.
    fn check_segments(&self) -> Result<(), Error> {
        self.segments().into_iter().try_for_each(|segment| {
            if segment.is_empty() {
                return Err(Error::InvalidPathSegment {
                    segment,
                    detail: "segment is empty",
                });
            }
            if !segment.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_') {
                return Err(Error::InvalidPathSegment {
                    segment,
                    detail: "only ASCII letters, digits and '_' are allowed",
                });
            }
            Ok(())
        })
    }

    /// Relative path of the document, `<segments...>.json`.
    fn relative_path(&self) -> PathBuf {
        let mut segments = self.segments();
        let mut path = PathBuf::new();
        if let Some(stem) = segments.pop() {
            for segment in segments {
                path.push(segment);
            }
            path.push(format!("{stem}.json"));
        }
        path
    }

    /// Canonical grouping key, the forward-slash joined segments.
    fn canonical_key(&self) -> String {
        self.segments().join("/")
    }
}

/// PEC classes sharing the `(ne, te)` table layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PecClass {
    Excitation,
    Recombination,
}

impl PecClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            PecClass::Excitation => "excitation",
            PecClass::Recombination => "recombination",
        }
    }
}

impl fmt::Display for PecClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `pec/<class>/<element>/<charge>.json`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PecAddress {
    pub class: PecClass,
    pub element: Species,
    pub charge: u32,
}

impl PecAddress {
    pub fn new(class: PecClass, element: impl Into<Species>, charge: u32) -> Self {
        Self {
            class,
            element: element.into(),
            charge,
        }
    }
}

impl RecordAddress for PecAddress {
    type Record = PecRate;

    fn segments(&self) -> Vec<String> {
        vec![
            "pec".into(),
            self.class.as_str().into(),
            self.element.path_symbol(),
            self.charge.to_string(),
        ]
    }

    fn check_charges(&self) -> Result<(), Error> {
        check_charge(&self.element, self.charge, ChargeRole::Ion)
    }
}

impl fmt::Display for PecAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PEC rate (class={}, element={}, charge={})",
            self.class, self.element, self.charge
        )
    }
}

/// `pec/thermal_cx/<donor>/<donor_charge>/<receiver>/<receiver_charge>.json`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ThermalCxAddress {
    pub donor: Species,
    pub donor_charge: u32,
    pub receiver: Species,
    pub receiver_charge: u32,
}

impl ThermalCxAddress {
    pub fn new(
        donor: impl Into<Species>,
        donor_charge: u32,
        receiver: impl Into<Species>,
        receiver_charge: u32,
    ) -> Self {
        Self {
            donor: donor.into(),
            donor_charge,
            receiver: receiver.into(),
            receiver_charge,
        }
    }
}

impl RecordAddress for ThermalCxAddress {
    type Record = ThermalCxRate;

    fn segments(&self) -> Vec<String> {
        vec![
            "pec".into(),
            "thermal_cx".into(),
            self.donor.path_symbol(),
            self.donor_charge.to_string(),
            self.receiver.path_symbol(),
            self.receiver_charge.to_string(),
        ]
    }

    fn check_charges(&self) -> Result<(), Error> {
        check_charge(&self.donor, self.donor_charge, ChargeRole::Donor)?;
        check_charge(&self.receiver, self.receiver_charge, ChargeRole::Receiver)
    }
}

impl fmt::Display for ThermalCxAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "thermal charge-exchange PEC (donor={}, donor charge={}, receiver={}, receiver charge={})",
            self.donor, self.donor_charge, self.receiver, self.receiver_charge
        )
    }
}

/// `beam/emission/<beam_species>/<target_ion>/<target_charge>.json`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BeamEmissionAddress {
    pub beam_species: Species,
    pub target_ion: Species,
    pub target_charge: u32,
}

impl BeamEmissionAddress {
    pub fn new(
        beam_species: impl Into<Species>,
        target_ion: impl Into<Species>,
        target_charge: u32,
    ) -> Self {
        Self {
            beam_species: beam_species.into(),
            target_ion: target_ion.into(),
            target_charge,
        }
    }
}

impl RecordAddress for BeamEmissionAddress {
    type Record = BeamEmissionRate;

    fn segments(&self) -> Vec<String> {
        vec![
            "beam".into(),
            "emission".into(),
            self.beam_species.path_symbol(),
            self.target_ion.path_symbol(),
            self.target_charge.to_string(),
        ]
    }

    fn check_charges(&self) -> Result<(), Error> {
        check_charge(&self.target_ion, self.target_charge, ChargeRole::Target)
    }
}

impl fmt::Display for BeamEmissionAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "beam emission rate (beam species={}, target ion={}, target charge={})",
            self.beam_species, self.target_ion, self.target_charge
        )
    }
}
