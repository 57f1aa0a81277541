/*!
# SNARK-friendly Permutation Round Estimator

Estimates, for several families of algebraic permutations, the minimal
number of rounds reaching a target security level against known algebraic
attacks, and the R1CS size of evaluating that many rounds.

## Families

- **Anemoi** - Gröbner bound on the generalized Butterfly (three models)
- **Arion** - deterministic vs. probabilistic Gröbner cost in the log domain
- **Griffin** - interpolation bound combined with two binomial Gröbner bounds
- **MiMC** - `ceil(log_d(p))`
- **Poseidon** - legacy table estimator and Gröbner estimator, side by side
- **Rescue** - Gröbner bound over the sponge's variable count

Every searched answer carries a [`SearchOutcome`]: when a search hits its
iteration cap the family's fixed conservative default is returned and
flagged as [`SearchOutcome::Exhausted`].

## Quick Start

```rust
use snark_rounds::prelude::*;

let params = RescueParams::new(2, 1, 5)?;
let nr = rescue::rounds(&params, 128)?;
assert!(nr.is_verified());
println!("rounds: {nr}, R1CS: {}", rescue::constraint_count(&params, nr.rounds)?);

// Poseidon reports both estimators
let poseidon = PoseidonParams::new(3, 5, ReferenceField::Bls12_381)?;
let legacy = poseidon::rounds_legacy(&poseidon, 128)?;
let grobner = poseidon::rounds_grobner(&poseidon, 128)?;
println!("legacy {legacy}, grobner {grobner}");
# Ok::<(), Box<dyn std::error::Error>>(())
```

## Error Handling

```rust
use snark_rounds::prelude::*;

let params = AnemoiParams::new(2, 11)?;
match anemoi::constraint_count(&params, 12) {
    Ok(size) => println!("R1CS size: {size}"),
    Err(EstimatorError::UnsupportedDegree { degree, max }) => {
        eprintln!("no addition chain for x^{degree} (table covers 0..={max})");
    }
    Err(err) => eprintln!("{err}"),
}
# Ok::<(), Box<dyn std::error::Error>>(())
```
*/

pub mod addchain;
pub mod cli;
pub mod error;
pub mod estimator;
pub mod families;
pub mod field;
pub mod math;

pub use error::{EstimatorError, EstimatorResult};
pub use estimator::{Estimate, PermutationFamily, RoundCount, SearchOutcome, estimate};

// Re-export commonly used types
pub mod prelude {
    pub use crate::error::{EstimatorError, EstimatorResult};
    pub use crate::estimator::{Estimate, PermutationFamily, RoundCount, SearchOutcome, estimate};
    pub use crate::families::{anemoi, arion, griffin, mimc, poseidon, rescue};
    pub use crate::families::{
        Anemoi, AnemoiModel, AnemoiParams, ArionParams, ArionRounds, GriffinParams, MimcParams,
        PoseidonEstimates, PoseidonParams, PoseidonRounds, RescueParams,
    };
    pub use crate::field::{FieldModulus, ReferenceField};
}
