//! Prime field moduli used by the attack-cost models.
//!
//! Reference moduli are the scalar fields of the supported curves, read from
//! the `ark-*` curve crates once and cached with `lazy_static`. BN254 and
//! BLS12-381 are the two fields the Arion permutation check always runs
//! against.

use ark_ff::{BigInteger, PrimeField};
use lazy_static::lazy_static;
use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::One;
use std::fmt;

use crate::error::{EstimatorError, EstimatorResult};
use crate::math;

fn scalar_modulus<F: PrimeField>() -> BigUint {
    BigUint::from_bytes_le(&F::MODULUS.to_bytes_le())
}

lazy_static! {
    /// BN254 scalar field modulus
    pub static ref BN254_MODULUS: BigUint = scalar_modulus::<ark_bn254::Fr>();
    /// BLS12-381 scalar field modulus
    pub static ref BLS12_381_MODULUS: BigUint = scalar_modulus::<ark_bls12_381::Fr>();
    /// BLS12-377 scalar field modulus
    pub static ref BLS12_377_MODULUS: BigUint = scalar_modulus::<ark_bls12_377::Fr>();
    /// Pallas scalar field modulus
    pub static ref PALLAS_MODULUS: BigUint = scalar_modulus::<ark_pallas::Fr>();
    /// Vesta scalar field modulus
    pub static ref VESTA_MODULUS: BigUint = scalar_modulus::<ark_vesta::Fr>();
}

/// Named prime fields with embedded moduli.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum ReferenceField {
    Bn254,
    #[value(name = "bls12-381")]
    Bls12_381,
    #[value(name = "bls12-377")]
    Bls12_377,
    Pallas,
    Vesta,
}

impl ReferenceField {
    pub const ALL: [ReferenceField; 5] =
        [Self::Bn254, Self::Bls12_381, Self::Bls12_377, Self::Pallas, Self::Vesta];

    /// Fields every Arion exponent is checked against.
    pub const ARION_CHECKED: [ReferenceField; 2] = [Self::Bls12_381, Self::Bn254];

    pub fn modulus(self) -> FieldModulus {
        FieldModulus(self.raw_modulus().clone())
    }

    fn raw_modulus(self) -> &'static BigUint {
        match self {
            Self::Bn254 => &BN254_MODULUS,
            Self::Bls12_381 => &BLS12_381_MODULUS,
            Self::Bls12_377 => &BLS12_377_MODULUS,
            Self::Pallas => &PALLAS_MODULUS,
            Self::Vesta => &VESTA_MODULUS,
        }
    }

    /// Short name used in warnings, e.g. `BLS381`.
    pub fn label(self) -> &'static str {
        match self {
            Self::Bn254 => "BN254",
            Self::Bls12_381 => "BLS381",
            Self::Bls12_377 => "BLS377",
            Self::Pallas => "Pallas",
            Self::Vesta => "Vesta",
        }
    }

    /// Whether `x -> x^d` permutes this field.
    pub fn is_permutation(self, d: u64) -> bool {
        is_permutation(self.raw_modulus(), d)
    }
}

impl fmt::Display for ReferenceField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A prime field modulus `p`.
///
/// Primality is not checked; the estimators only use `log p` and `p - 1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldModulus(BigUint);

impl FieldModulus {
    pub fn new(p: BigUint) -> EstimatorResult<Self> {
        if p < BigUint::from(2u8) {
            let reason = format!("field modulus must be at least 2, got {p}");
            return Err(EstimatorError::invalid("p", reason));
        }
        Ok(Self(p))
    }

    /// The reference field with this modulus, if any.
    pub fn reference(&self) -> Option<ReferenceField> {
        ReferenceField::ALL.into_iter().find(|f| *f.raw_modulus() == self.0)
    }

    /// Reference field label, or the hex modulus for any other field.
    pub fn label(&self) -> String {
        match self.reference() {
            Some(field) => field.label().to_string(),
            None => self.to_string(),
        }
    }

    pub fn value(&self) -> &BigUint {
        &self.0
    }

    /// Bit length of `p`.
    pub fn bits(&self) -> u64 {
        self.0.bits()
    }

    pub fn log2(&self) -> f64 {
        math::log2(&self.0)
    }

    pub fn ln(&self) -> f64 {
        math::ln(&self.0)
    }

    /// Whether `x -> x^d` permutes the field, i.e. `gcd(p - 1, d) == 1`.
    pub fn is_permutation(&self, d: u64) -> bool {
        is_permutation(&self.0, d)
    }
}

impl From<ReferenceField> for FieldModulus {
    fn from(field: ReferenceField) -> Self {
        field.modulus()
    }
}

impl fmt::Display for FieldModulus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

fn is_permutation(p: &BigUint, d: u64) -> bool {
    let order = p - BigUint::one();
    order.gcd(&BigUint::from(d)).is_one()
}

/// Parses a modulus given in decimal or `0x`-prefixed hex.
pub fn parse_biguint(s: &str) -> Result<BigUint, String> {
    let s = s.trim();
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => BigUint::parse_bytes(hex.as_bytes(), 16),
        None => BigUint::parse_bytes(s.as_bytes(), 10),
    };
    parsed.ok_or_else(|| format!("`{s}` is not a decimal or 0x-prefixed integer"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_moduli_match_published_values() {
        let bn254 = "0x30644e72e131a029b85045b68181585d2833e84879b9709143e1f593f0000001";
        let bls381 = "0x73eda753299d7d483339d80809a1d80553bda402fffe5bfeffffffff00000001";
        let bn254 = parse_biguint(bn254).unwrap();
        let bls381 = parse_biguint(bls381).unwrap();
        assert_eq!(*BN254_MODULUS, bn254);
        assert_eq!(*BLS12_381_MODULUS, bls381);
        assert_eq!(ReferenceField::Bn254.modulus().bits(), 254);
        assert_eq!(ReferenceField::Bls12_381.modulus().bits(), 255);
    }

    #[test]
    fn test_permutation_check() {
        // BN254 - 1 is divisible by 3 but not by 5 or 7
        assert!(!ReferenceField::Bn254.is_permutation(3));
        assert!(ReferenceField::Bn254.is_permutation(5));
        assert!(ReferenceField::Bn254.is_permutation(7));
        // BLS12-381 - 1 is divisible by 3 but not by 5
        assert!(!ReferenceField::Bls12_381.is_permutation(3));
        assert!(ReferenceField::Bls12_381.is_permutation(5));
    }

    #[test]
    fn test_modulus_validation() {
        assert!(FieldModulus::new(BigUint::from(1u8)).is_err());
        assert!(FieldModulus::new(BigUint::from(2u8)).is_ok());
        let p = FieldModulus::new(BigUint::from(101u32)).unwrap();
        assert!(p.is_permutation(3));
        assert!(!p.is_permutation(5));
    }

    #[test]
    fn test_modulus_label() {
        for field in ReferenceField::ALL {
            assert_eq!(field.modulus().reference(), Some(field));
            assert_eq!(field.modulus().label(), field.label());
        }
        let p = FieldModulus::new(BigUint::from(101u32)).unwrap();
        assert_eq!(p.reference(), None);
        assert_eq!(p.label(), "0x65");
    }

    #[test]
    fn test_parse_biguint() {
        assert_eq!(parse_biguint("101"), Ok(BigUint::from(101u32)));
        assert_eq!(parse_biguint("0x65"), Ok(BigUint::from(101u32)));
        assert!(parse_biguint("ten").is_err());
        assert!(parse_biguint("").is_err());
    }
}
