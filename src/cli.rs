//! Command surface: one subcommand per permutation family.
//!
//! Arguments are positional integers in the order the published scripts
//! use. Reports go to the writer passed to [`run`]; logs go to stderr.

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use num_bigint::BigUint;
use serde::Serialize;
use std::io::{self, Write};
use thiserror::Error;
use tracing::Level;

use crate::addchain;
use crate::error::EstimatorError;
use crate::estimator::{Estimate, PermutationFamily, estimate};
use crate::families::{
    Anemoi, AnemoiModel, AnemoiParams, ArionParams, GriffinParams, MimcParams, PoseidonParams,
    RescueParams,
};
use crate::field::{self, FieldModulus, ReferenceField};

/// Exit status for usage errors.
pub const USAGE_EXIT_CODE: u8 = 1;

/// Errors surfaced by the command runner.
#[derive(Error, Debug)]
pub enum CliError {
    /// Parameters rejected by an estimator
    #[error(transparent)]
    Estimator(#[from] EstimatorError),
    /// Failed to write the report
    #[error("failed to write report: {0}")]
    Io(#[from] io::Error),
    /// Failed to encode the JSON report
    #[error("failed to encode report: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "snark-rounds", version)]
#[command(about = "Estimate round counts and R1CS sizes of SNARK-friendly permutations")]
pub struct Cli {
    /// Log verbosity on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Print the report as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Anemoi with `ell` branches and S-box degree `alpha`
    Anemoi {
        ell: u64,
        alpha: u64,
        security_level: u32,
        #[arg(long, value_enum, default_value_t = AnemoiModel::Current)]
        model: AnemoiModel,
    },
    /// Arion with S-box degrees `d1` (low) and `d2` (high)
    Arion {
        branch: u64,
        d1: u64,
        d2: u64,
        security_level: u32,
        #[arg(long, value_enum, default_value_t = ReferenceField::Bn254)]
        field: ReferenceField,
    },
    /// Griffin with state width `branch` and S-box degree `d`
    Griffin {
        branch: u64,
        d: u64,
        security_level: u32,
        #[arg(long, value_enum, default_value_t = ReferenceField::Bn254)]
        field: ReferenceField,
    },
    /// MiMC over the field of order `p` (integer or reference field name)
    Mimc {
        #[arg(value_parser = parse_modulus)]
        p: FieldModulus,
        d: u64,
    },
    /// Poseidon with width `branches`; prints the legacy and Gröbner estimates
    Poseidon {
        branches: u64,
        alpha: u64,
        security_level: u32,
        #[arg(long, value_enum, default_value_t = ReferenceField::Bls12_381)]
        field: ReferenceField,
    },
    /// Rescue sponge with `rate + capacity` elements
    Rescue {
        rate: u64,
        capacity: u64,
        alpha: u64,
        security_level: u32,
    },
    /// Print the square-and-multiply steps computing `x^exp`
    Pow {
        /// Exponent, decimal or with a 0x / 0o / 0b prefix
        #[arg(value_parser = parse_exponent)]
        exp: u64,
    },
}

/// Installs the stderr log subscriber for the given `-v` count.
pub fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    // a subscriber may already be installed by an embedding program
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

/// Runs one command, writing the report to `out`.
pub fn run(cli: &Cli, out: &mut dyn Write) -> Result<(), CliError> {
    match &cli.command {
        Command::Anemoi { ell, alpha, security_level, model } => {
            let family = Anemoi { params: AnemoiParams::new(*ell, *alpha)?, model: *model };
            report(&family, *security_level, Vec::new(), cli.json, out)
        }
        Command::Arion { branch, d1, d2, security_level, field } => {
            let params = ArionParams::new(*branch, *d1, *d2, *field)?;
            let warnings = params
                .non_permutation_fields()
                .into_iter()
                .map(|f| format!("x^d2 is not a permutation in {f}"))
                .collect();
            report(&params, *security_level, warnings, cli.json, out)
        }
        Command::Griffin { branch, d, security_level, field } => {
            let params = GriffinParams::new(*branch, *d, *field)?;
            let warnings = permutation_warning("d", *d, *field);
            report(&params, *security_level, warnings, cli.json, out)
        }
        Command::Mimc { p, d } => {
            let params = MimcParams::new(p.clone(), *d)?;
            report(&params, 0, Vec::new(), cli.json, out)
        }
        Command::Poseidon { branches, alpha, security_level, field } => {
            let params = PoseidonParams::new(*branches, *alpha, *field)?;
            let warnings = permutation_warning("alpha", *alpha, *field);
            report(&params, *security_level, warnings, cli.json, out)
        }
        Command::Rescue { rate, capacity, alpha, security_level } => {
            let params = RescueParams::new(*rate, *capacity, *alpha)?;
            report(&params, *security_level, Vec::new(), cli.json, out)
        }
        Command::Pow { exp } => {
            let steps = addchain::square_and_multiply_steps(*exp);
            if cli.json {
                serde_json::to_writer_pretty(&mut *out, &steps)?;
                writeln!(out)?;
            } else {
                for step in steps {
                    writeln!(out, "{step}")?;
                }
            }
            Ok(())
        }
    }
}

#[derive(Serialize)]
struct Report<'a, R> {
    #[serde(flatten)]
    estimate: &'a Estimate<R>,
    warnings: &'a [String],
}

fn report<F: PermutationFamily>(
    family: &F,
    security_level: u32,
    warnings: Vec<String>,
    json: bool,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let estimate = estimate(family, security_level)?;

    if json {
        let report = Report { estimate: &estimate, warnings: &warnings };
        serde_json::to_writer_pretty(&mut *out, &report)?;
        writeln!(out)?;
        return Ok(());
    }

    for warning in &warnings {
        writeln!(out, "Warning: {warning}")?;
    }
    family.render_rounds(&estimate.rounds, out)?;
    match estimate.r1cs_size {
        Some(size) => writeln!(out, "R1CS size: {size}")?,
        // unsupported S-box degree
        None => writeln!(out, "R1CS size: -1")?,
    }
    Ok(())
}

fn permutation_warning(name: &str, d: u64, field: ReferenceField) -> Vec<String> {
    if field.is_permutation(d) {
        Vec::new()
    } else {
        vec![format!("x^{name} is not a permutation in {field}")]
    }
}

/// Parses a field modulus: a reference field name, decimal, or `0x` hex.
pub fn parse_modulus(s: &str) -> Result<FieldModulus, String> {
    if let Ok(field) = ReferenceField::from_str(s, true) {
        return Ok(field.modulus());
    }
    let p: BigUint = field::parse_biguint(s)?;
    FieldModulus::new(p).map_err(|e| e.to_string())
}

/// Parses an exponent with an optional `0x`, `0o` or `0b` prefix.
pub fn parse_exponent(s: &str) -> Result<u64, String> {
    let cleaned = s.trim().replace('_', "");
    let lower = cleaned.to_ascii_lowercase();
    let (digits, radix) = if let Some(hex) = lower.strip_prefix("0x") {
        (hex, 16)
    } else if let Some(oct) = lower.strip_prefix("0o") {
        (oct, 8)
    } else if let Some(bin) = lower.strip_prefix("0b") {
        (bin, 2)
    } else {
        (lower.as_str(), 10)
    };
    u64::from_str_radix(digits, radix).map_err(|e| format!("invalid exponent `{s}`: {e}"))
}
