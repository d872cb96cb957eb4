use anyhow::{Context, Result, bail};

use adas_repo::{
    BeamEmissionAddress, PecAddress, PecClass, RawRate, RecordAddress, Repository,
    ThermalCxAddress, Transition, UpdateBatch,
};

use crate::cli::{AddArgs, RateTarget};
use crate::display::Context as DisplayContext;
use crate::io::{read_payload, stdin_is_tty};

pub fn run_add(args: AddArgs, repo: &Repository, ctx: DisplayContext) -> Result<()> {
    if args.input.is_none() && stdin_is_tty() {
        bail!(
            "No payload file specified and stdin is a terminal.\n\nUsage: adasrepo add --input <FILE> <CLASS> ... or pipe JSON via stdin."
        );
    }

    let payload = read_payload(args.input.as_deref())?;
    let summary = store(repo, args.rate, payload)?;
    ctx.status(summary);
    Ok(())
}

/// Stores one payload and returns a status line describing it.
fn store(repo: &Repository, target: RateTarget, payload: RawRate) -> Result<String> {
    match target {
        RateTarget::Excitation(rate) => {
            let address = PecAddress::new(PecClass::Excitation, rate.element, rate.charge);
            store_one(repo, address, rate.transition.transition, payload)
        }
        RateTarget::Recombination(rate) => {
            let address = PecAddress::new(PecClass::Recombination, rate.element, rate.charge);
            store_one(repo, address, rate.transition.transition, payload)
        }
        RateTarget::ThermalCx(rate) => {
            let address = ThermalCxAddress::new(
                rate.donor,
                rate.donor_charge,
                rate.receiver,
                rate.receiver_charge,
            );
            store_one(repo, address, rate.transition.transition, payload)
        }
        RateTarget::BeamEmission(rate) => {
            let address = BeamEmissionAddress::new(rate.beam, rate.target, rate.target_charge);
            store_one(repo, address, rate.transition.transition, payload)
        }
    }
}

fn store_one<A: RecordAddress>(
    repo: &Repository,
    address: A,
    transition: Transition,
    payload: RawRate,
) -> Result<String> {
    let summary = format!("Stored '{transition}' in {address}");
    let context = format!("Failed to store '{transition}' for {address}");
    repo.update(&UpdateBatch::single(address, transition, payload))
        .context(context)?;
    Ok(summary)
}
