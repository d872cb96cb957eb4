//! Photon emission coefficient rates.
//!
//! Layouts:
//!
//! - `pec/<class>/<element>/<charge>.json` for excitation and recombination,
//! - `pec/thermal_cx/<donor>/<donor_charge>/<receiver>/<receiver_charge>.json`
//!   for thermal charge exchange.

use super::Repository;
use super::address::{PecAddress, PecClass, ThermalCxAddress};
use super::batch::UpdateBatch;
use super::error::Error;
use crate::model::rate::{PecRate, RawRate, ThermalCxRate};
use crate::model::species::Species;
use crate::model::transition::Transition;

impl Repository {
    /// Adds a single excitation PEC.
    ///
    /// When adding many rates prefer [`update_pec_rates`](Self::update_pec_rates),
    /// which rewrites each document once.
    pub fn add_pec_excitation_rate(
        &self,
        element: impl Into<Species>,
        charge: u32,
        transition: impl Into<Transition>,
        rate: impl Into<RawRate>,
    ) -> Result<(), Error> {
        self.add_pec_rate(PecClass::Excitation, element, charge, transition, rate)
    }

    /// Adds a single recombination PEC.
    pub fn add_pec_recombination_rate(
        &self,
        element: impl Into<Species>,
        charge: u32,
        transition: impl Into<Transition>,
        rate: impl Into<RawRate>,
    ) -> Result<(), Error> {
        self.add_pec_rate(PecClass::Recombination, element, charge, transition, rate)
    }

    fn add_pec_rate(
        &self,
        class: PecClass,
        element: impl Into<Species>,
        charge: u32,
        transition: impl Into<Transition>,
        rate: impl Into<RawRate>,
    ) -> Result<(), Error> {
        let address = PecAddress::new(class, element, charge);
        self.update_pec_rates(&UpdateBatch::single(address, transition, rate))
    }

    /// Adds a single thermal charge-exchange PEC.
    pub fn add_pec_thermal_cx_rate(
        &self,
        donor: impl Into<Species>,
        donor_charge: u32,
        receiver: impl Into<Species>,
        receiver_charge: u32,
        transition: impl Into<Transition>,
        rate: impl Into<RawRate>,
    ) -> Result<(), Error> {
        let address = ThermalCxAddress::new(donor, donor_charge, receiver, receiver_charge);
        self.update_pec_thermal_cx_rates(&UpdateBatch::single(address, transition, rate))
    }

    /// Merges excitation and recombination PECs into the repository.
    ///
    /// Each payload must provide `ne` (N), `te` (K) and `rate` (N, K).
    pub fn update_pec_rates(&self, rates: &UpdateBatch<PecAddress>) -> Result<(), Error> {
        self.update(rates)
    }

    /// Merges thermal charge-exchange PECs into the repository.
    ///
    /// Each payload must provide `ne` (N), `te` (K), `td` (L) and
    /// `rate` (N, K, L). Donor charges must leave the donor at least one
    /// electron.
    pub fn update_pec_thermal_cx_rates(
        &self,
        rates: &UpdateBatch<ThermalCxAddress>,
    ) -> Result<(), Error> {
        self.update(rates)
    }

    pub fn get_pec_excitation_rate(
        &self,
        element: impl Into<Species>,
        charge: u32,
        transition: impl Into<Transition>,
    ) -> Result<PecRate, Error> {
        self.get(&PecAddress::new(PecClass::Excitation, element, charge), transition)
    }

    pub fn get_pec_recombination_rate(
        &self,
        element: impl Into<Species>,
        charge: u32,
        transition: impl Into<Transition>,
    ) -> Result<PecRate, Error> {
        self.get(
            &PecAddress::new(PecClass::Recombination, element, charge),
            transition,
        )
    }

    pub fn get_pec_thermal_cx_rate(
        &self,
        donor: impl Into<Species>,
        donor_charge: u32,
        receiver: impl Into<Species>,
        receiver_charge: u32,
        transition: impl Into<Transition>,
    ) -> Result<ThermalCxRate, Error> {
        self.get(
            &ThermalCxAddress::new(donor, donor_charge, receiver, receiver_charge),
            transition,
        )
    }
}
