//! Beam emission rates, stored at
//! `beam/emission/<beam_species>/<target_ion>/<target_charge>.json`.

use super::Repository;
use super::address::BeamEmissionAddress;
use super::batch::UpdateBatch;
use super::error::Error;
use crate::model::rate::{BeamEmissionRate, RawRate};
use crate::model::species::Species;
use crate::model::transition::Transition;

impl Repository {
    /// Adds a single beam emission rate.
    ///
    /// The payload must provide `e` (N), `n` (M), `t` (K), `sen` (N, M),
    /// `st` (K) and the scalar references `eref`, `nref`, `tref`, `sref`.
    pub fn add_beam_emission_rate(
        &self,
        beam_species: impl Into<Species>,
        target_ion: impl Into<Species>,
        target_charge: u32,
        transition: impl Into<Transition>,
        rate: impl Into<RawRate>,
    ) -> Result<(), Error> {
        let address = BeamEmissionAddress::new(beam_species, target_ion, target_charge);
        self.update_beam_emission_rates(&UpdateBatch::single(address, transition, rate))
    }

    pub fn update_beam_emission_rates(
        &self,
        rates: &UpdateBatch<BeamEmissionAddress>,
    ) -> Result<(), Error> {
        self.update(rates)
    }

    pub fn get_beam_emission_rate(
        &self,
        beam_species: impl Into<Species>,
        target_ion: impl Into<Species>,
        target_charge: u32,
        transition: impl Into<Transition>,
    ) -> Result<BeamEmissionRate, Error> {
        self.get(
            &BeamEmissionAddress::new(beam_species, target_ion, target_charge),
            transition,
        )
    }
}
