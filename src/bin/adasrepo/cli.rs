use std::path::PathBuf;

use adas_repo::{Species, Transition};
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "adasrepo",
    about = "Atomic rate repository for plasma spectroscopy",
    version,
    author,
    propagate_version = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOptions,

    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by all commands.
#[derive(Args)]
pub struct GlobalOptions {
    /// Repository root directory (overrides --config and ADAS_REPOSITORY_PATH)
    #[arg(long, value_name = "DIR", global = true)]
    pub root: Option<PathBuf>,

    /// Repository configuration file (TOML)
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress status output (for scripting)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Store a rate read from a JSON payload
    #[command(visible_alias = "a")]
    Add(AddArgs),

    /// Print a stored rate as JSON
    #[command(visible_alias = "s")]
    Show(ShowArgs),
}

#[derive(Args)]
pub struct AddArgs {
    /// JSON payload file (stdin if omitted)
    #[arg(short, long, value_name = "FILE", global = true)]
    pub input: Option<PathBuf>,

    #[command(subcommand)]
    pub rate: RateTarget,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Output file (stdout if omitted)
    #[arg(short, long, value_name = "FILE", global = true)]
    pub output: Option<PathBuf>,

    #[command(subcommand)]
    pub rate: RateTarget,
}

/// Rate class and the address of its document.
#[derive(Subcommand, Clone)]
pub enum RateTarget {
    /// Electron-impact excitation PEC
    Excitation(IonRate),

    /// Recombination PEC
    Recombination(IonRate),

    /// Thermal charge-exchange PEC
    #[command(name = "thermal-cx")]
    ThermalCx(ThermalCxRate),

    /// Beam emission rate
    #[command(name = "beam-emission")]
    BeamEmission(BeamEmissionRate),
}

#[derive(Args, Clone)]
pub struct IonRate {
    /// Emitting element or isotope (e.g. C, Ne, D)
    #[arg(short, long, value_name = "SPECIES")]
    pub element: Species,

    /// Charge state of the emitting ion
    #[arg(short, long, value_name = "Z")]
    pub charge: u32,

    #[command(flatten)]
    pub transition: TransitionArg,
}

#[derive(Args, Clone)]
pub struct ThermalCxRate {
    /// Electron donor species
    #[arg(long, value_name = "SPECIES")]
    pub donor: Species,

    /// Charge state of the donor
    #[arg(long = "donor-charge", value_name = "Z")]
    pub donor_charge: u32,

    /// Receiving ion species
    #[arg(long, value_name = "SPECIES")]
    pub receiver: Species,

    /// Charge state of the receiving ion
    #[arg(long = "receiver-charge", value_name = "Z")]
    pub receiver_charge: u32,

    #[command(flatten)]
    pub transition: TransitionArg,
}

#[derive(Args, Clone)]
pub struct BeamEmissionRate {
    /// Beam species (e.g. H, D)
    #[arg(long, value_name = "SPECIES")]
    pub beam: Species,

    /// Target plasma ion
    #[arg(long, value_name = "SPECIES")]
    pub target: Species,

    /// Charge state of the target ion
    #[arg(long = "target-charge", value_name = "Z")]
    pub target_charge: u32,

    #[command(flatten)]
    pub transition: TransitionArg,
}

#[derive(Args, Clone)]
pub struct TransitionArg {
    /// Transition as "UPPER -> LOWER", levels are integers, labels or
    /// composites like "(3, 1)"
    #[arg(short, long, value_name = "UPPER -> LOWER")]
    pub transition: Transition,
}

pub fn parse() -> Cli {
    Cli::parse()
}
