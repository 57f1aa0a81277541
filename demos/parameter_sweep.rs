//! Sweeps a small parameter grid and prints round and constraint counts
//! for every family.

use snark_rounds::prelude::*;

fn row<F: PermutationFamily>(label: &str, family: &F, level: u32) -> EstimatorResult<()> {
    let est = estimate(family, level)?;
    let r1cs = est.r1cs_size.map_or_else(|| "-1".to_string(), |n| n.to_string());
    println!("  {label:<28} {:<48} {r1cs:>8}", est.rounds.to_string());
    Ok(())
}

fn main() -> EstimatorResult<()> {
    for level in [80u32, 128, 256] {
        println!("security level {level}");
        println!("  {:<28} {:<48} {:>8}", "instance", "rounds", "R1CS");

        for (ell, alpha) in [(1, 3), (1, 5), (2, 5), (3, 7)] {
            let params = AnemoiParams::new(ell, alpha)?;
            let family = Anemoi { params, model: AnemoiModel::Current };
            row(&format!("anemoi ell={ell} alpha={alpha}"), &family, level)?;
        }
        for (branches, d1, d2) in [(3, 2, 5), (3, 3, 257), (4, 5, 5)] {
            let params = ArionParams::new(branches, d1, d2, ReferenceField::Bn254)?;
            row(&format!("arion n={branches} d={d1},{d2}"), &params, level)?;
        }
        for (branches, d) in [(3, 5), (4, 5), (8, 5)] {
            let params = GriffinParams::new(branches, d, ReferenceField::Bn254)?;
            row(&format!("griffin t={branches} d={d}"), &params, level)?;
        }
        for width in [3, 5, 9] {
            let params = PoseidonParams::new(width, 5, ReferenceField::Bls12_381)?;
            row(&format!("poseidon t={width} alpha=5"), &params, level)?;
        }
        for (rate, capacity) in [(2, 1), (4, 2)] {
            let params = RescueParams::new(rate, capacity, 5)?;
            row(&format!("rescue {rate}+{capacity} alpha=5"), &params, level)?;
        }
        println!();
    }

    println!("MiMC (independent of the security level)");
    for field in [ReferenceField::Bn254, ReferenceField::Bls12_381, ReferenceField::Pallas] {
        for d in [3, 5, 7] {
            row(&format!("mimc {field} d={d}"), &MimcParams::new(field, d)?, 0)?;
        }
    }
    Ok(())
}
