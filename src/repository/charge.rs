use std::fmt;

use super::error::Error;
use crate::model::species::Species;

/// The role a species plays in a rate, which determines its valid charges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChargeRole {
    /// The emitting ion of an excitation or recombination PEC.
    Ion,
    /// The electron donor in a charge-exchange process.
    Donor,
    /// The ion receiving the electron in a charge-exchange process.
    Receiver,
    /// The plasma ion a neutral beam interacts with.
    Target,
}

impl ChargeRole {
    #[inline]
    pub fn is_donor(&self) -> bool {
        matches!(self, ChargeRole::Donor)
    }

    pub(crate) fn range_note(&self) -> &'static str {
        if self.is_donor() {
            ", donor must retain an electron"
        } else {
            ""
        }
    }
}

impl fmt::Display for ChargeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChargeRole::Ion => write!(f, "ion"),
            ChargeRole::Donor => write!(f, "donor"),
            ChargeRole::Receiver => write!(f, "receiver"),
            ChargeRole::Target => write!(f, "target"),
        }
    }
}

/// Returns `true` if `0 <= charge <= Z` for the species.
#[inline]
pub fn valid_charge(species: &Species, charge: u32) -> bool {
    charge <= u32::from(species.atomic_number())
}

/// Returns `true` if the species still holds an electron to donate at this
/// charge, i.e. `0 <= charge + 1 <= Z`.
#[inline]
pub fn valid_donor_charge(species: &Species, charge: u32) -> bool {
    charge
        .checked_add(1)
        .is_some_and(|c| valid_charge(species, c))
}

/// Validity predicate for a species acting in the given role.
pub fn is_valid(species: &Species, charge: u32, role: ChargeRole) -> bool {
    if role.is_donor() {
        valid_donor_charge(species, charge)
    } else {
        valid_charge(species, charge)
    }
}

pub(crate) fn check_charge(species: &Species, charge: u32, role: ChargeRole) -> Result<(), Error> {
    if is_valid(species, charge, role) {
        Ok(())
    } else {
        Err(Error::InvalidCharge {
            role,
            species: *species,
            charge,
            atomic_number: species.atomic_number(),
        })
    }
}
