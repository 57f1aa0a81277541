//! Per-family round-count and constraint-count estimators.
//!
//! Each submodule is self-contained: it evaluates one published cost model
//! and shares nothing with its siblings beyond the addition-chain table and
//! the big-integer helpers.

pub mod anemoi;
pub mod arion;
pub mod griffin;
pub mod mimc;
pub mod poseidon;
pub mod rescue;

pub use anemoi::{Anemoi, AnemoiModel, AnemoiParams};
pub use arion::{ArionParams, ArionRounds};
pub use griffin::GriffinParams;
pub use mimc::MimcParams;
pub use poseidon::{PoseidonEstimates, PoseidonParams, PoseidonRounds};
pub use rescue::RescueParams;
