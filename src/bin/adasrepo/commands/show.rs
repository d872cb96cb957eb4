use anyhow::{Context, Result};

use adas_repo::{
    BeamEmissionAddress, PecAddress, PecClass, RawRate, RecordAddress, Repository,
    ThermalCxAddress, Transition,
};

use crate::cli::{RateTarget, ShowArgs};
use crate::io::write_output;

pub fn run_show(args: ShowArgs, repo: &Repository) -> Result<()> {
    let text = render(repo, args.rate)?;
    write_output(args.output.as_deref(), &text)
}

/// Reads one record and renders it as pretty-printed JSON.
fn render(repo: &Repository, target: RateTarget) -> Result<String> {
    let raw = match target {
        RateTarget::Excitation(rate) => {
            let address = PecAddress::new(PecClass::Excitation, rate.element, rate.charge);
            fetch(repo, &address, rate.transition.transition)?
        }
        RateTarget::Recombination(rate) => {
            let address = PecAddress::new(PecClass::Recombination, rate.element, rate.charge);
            fetch(repo, &address, rate.transition.transition)?
        }
        RateTarget::ThermalCx(rate) => {
            let address = ThermalCxAddress::new(
                rate.donor,
                rate.donor_charge,
                rate.receiver,
                rate.receiver_charge,
            );
            fetch(repo, &address, rate.transition.transition)?
        }
        RateTarget::BeamEmission(rate) => {
            let address = BeamEmissionAddress::new(rate.beam, rate.target, rate.target_charge);
            fetch(repo, &address, rate.transition.transition)?
        }
    };
    serde_json::to_string_pretty(&raw).context("Failed to render rate as JSON")
}

fn fetch<A>(repo: &Repository, address: &A, transition: Transition) -> Result<RawRate>
where
    A: RecordAddress,
    RawRate: From<A::Record>,
{
    let record = repo
        .get(address, transition)
        .context("Failed to read rate from repository")?;
    Ok(RawRate::from(record))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{BeamEmissionRate as BeamArgs, TransitionArg};
    use adas_repo::{BeamEmissionRate, Element, Isotope, NdArray, Species};

    fn target() -> RateTarget {
        RateTarget::BeamEmission(BeamArgs {
            beam: Species::Isotope(Isotope::DEUTERIUM),
            target: Species::Element(Element::H),
            target_charge: 1,
            transition: TransitionArg {
                transition: Transition::new(3u32, 2u32),
            },
        })
    }

    #[test]
    fn renders_stored_beam_emission_rate() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repository::new(dir.path());
        let rate = BeamEmissionRate {
            e: vec![40e3],
            n: vec![1e19],
            t: vec![1000.0],
            sen: NdArray::from_rows(vec![vec![1.5e-18]]).unwrap(),
            st: vec![1.0],
            eref: 40e3,
            nref: 1e19,
            tref: 1000.0,
            sref: 1.5e-18,
        };
        repo.add_beam_emission_rate(Isotope::DEUTERIUM, Element::H, 1, (3u32, 2u32), &rate)
            .unwrap();

        let text = render(&repo, target()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["sref"], serde_json::json!(1.5e-18));
        assert_eq!(value["sen"], serde_json::json!([[1.5e-18]]));
    }

    #[test]
    fn missing_rate_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repository::new(dir.path());
        let err = render(&repo, target()).unwrap_err();
        assert!(err.downcast_ref::<adas_repo::Error>().unwrap().is_not_found());
    }
}
