//! Shared estimator vocabulary.
//!
//! Every family module exposes free functions (`rounds`, `constraint_count`
//! and friends) and a params struct implementing [`PermutationFamily`], so
//! the command surface and parameter sweeps can treat all six families the
//! same way.

use serde::Serialize;
use std::fmt;
use std::io::{self, Write};

use crate::error::EstimatorResult;

/// How a bounded round-count search ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchOutcome {
    /// The attack-cost model crossed the security target.
    Converged,
    /// The iteration cap was hit; the round count is a fixed conservative
    /// default, not a verified bound.
    Exhausted,
}

/// A round count together with how it was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct RoundCount {
    pub rounds: u64,
    pub outcome: SearchOutcome,
}

impl RoundCount {
    pub fn converged(rounds: u64) -> Self {
        Self { rounds, outcome: SearchOutcome::Converged }
    }

    pub fn exhausted(rounds: u64) -> Self {
        Self { rounds, outcome: SearchOutcome::Exhausted }
    }

    /// `true` unless the search fell back to its default.
    pub fn is_verified(&self) -> bool {
        self.outcome == SearchOutcome::Converged
    }
}

impl fmt::Display for RoundCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.rounds)?;
        if !self.is_verified() {
            f.write_str(" (search exhausted, conservative default)")?;
        }
        Ok(())
    }
}

/// A permutation family with a round-count estimator and an R1CS cost model.
pub trait PermutationFamily {
    /// Estimator output; a single count for most families.
    type Rounds: fmt::Debug + fmt::Display + Clone + Serialize;

    /// Family name as used on the command line.
    const NAME: &'static str;

    /// `false` when the round count ignores the security level.
    const USES_SECURITY_LEVEL: bool = true;

    /// Minimal round count reaching `security_level` bits.
    fn rounds(&self, security_level: u32) -> EstimatorResult<Self::Rounds>;

    /// Constraints needed to evaluate the permutation with `rounds` rounds.
    fn constraint_count(&self, rounds: &Self::Rounds) -> EstimatorResult<u64>;

    /// Human-readable round lines, one `Number of rounds` line by default.
    fn render_rounds(&self, rounds: &Self::Rounds, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "Number of rounds: {rounds}")
    }
}

/// Round count and constraint count for one parameter set.
#[derive(Debug, Clone, Serialize)]
pub struct Estimate<R> {
    pub family: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security_level: Option<u32>,
    pub rounds: R,
    /// `None` when the S-box degree is outside the addition-chain table.
    pub r1cs_size: Option<u64>,
}

/// Runs both estimators of `family`.
///
/// Round-count failures are returned; an unsupported constraint-count degree
/// is recorded as `r1cs_size: None` so the round count is still reported.
pub fn estimate<F: PermutationFamily>(
    family: &F,
    security_level: u32,
) -> EstimatorResult<Estimate<F::Rounds>> {
    let rounds = family.rounds(security_level)?;
    let r1cs_size = match family.constraint_count(&rounds) {
        Ok(size) => Some(size),
        Err(err) => {
            tracing::warn!(family = F::NAME, %err, "constraint count unavailable");
            None
        }
    };
    Ok(Estimate {
        family: F::NAME,
        security_level: F::USES_SECURITY_LEVEL.then_some(security_level),
        rounds,
        r1cs_size,
    })
}

/// Multiplies constraint-count factors, failing on overflow.
pub(crate) fn checked_product(factors: &[u64]) -> EstimatorResult<u64> {
    factors
        .iter()
        .try_fold(1u64, |acc, &f| acc.checked_mul(f))
        .ok_or(crate::error::EstimatorError::ConstraintOverflow)
}

/// Adds constraint-count terms, failing on overflow.
pub(crate) fn checked_sum(terms: &[u64]) -> EstimatorResult<u64> {
    terms
        .iter()
        .try_fold(0u64, |acc, &t| acc.checked_add(t))
        .ok_or(crate::error::EstimatorError::ConstraintOverflow)
}
