use num_bigint::BigUint;
use proptest::prelude::*;
use snark_rounds::prelude::*;

#[test]
fn test_mimc_small_field() {
    let params = MimcParams::from_modulus(BigUint::from(101u32), 3).unwrap();
    assert_eq!(mimc::rounds(&params), Ok(RoundCount::converged(5)));
}

#[test]
fn test_rescue_respects_floor_and_is_stable() {
    let params = RescueParams::new(2, 1, 5).unwrap();
    let first = rescue::rounds(&params, 128).unwrap();
    assert!(first.rounds >= rescue::MIN_ROUNDS);
    for _ in 0..3 {
        assert_eq!(rescue::rounds(&params, 128).unwrap(), first);
    }
}

#[test]
fn test_anemoi_non_decreasing_in_security_level() {
    let params = AnemoiParams::new(2, 5).unwrap();
    let counts: Vec<u64> = [64, 80, 96, 128, 160, 192, 256]
        .into_iter()
        .map(|level| anemoi::rounds(&params, level).unwrap().rounds)
        .collect();
    assert!(counts.windows(2).all(|w| w[0] <= w[1]), "{counts:?}");
    assert!(counts.iter().all(|&r| r >= anemoi::MIN_ROUNDS));
}

#[test]
fn test_anemoi_models_side_by_side() {
    let params = AnemoiParams::new(1, 5).unwrap();
    assert_eq!(AnemoiModel::Current.rounds(&params, 128).unwrap().rounds, 19);
    assert_eq!(AnemoiModel::LegacyKappa.rounds(&params, 128).unwrap().rounds, 21);
    assert_eq!(AnemoiModel::LegacyUnfloored.rounds(&params, 128).unwrap().rounds, 19);
}

#[test]
fn test_griffin_combines_both_bounds() {
    let params = GriffinParams::new(3, 5, ReferenceField::Bn254).unwrap();
    let interpolation = griffin::interpolation_rounds(&params, 128).unwrap();
    let groebner = griffin::groebner_rounds(&params, 128).unwrap();
    let nr = griffin::rounds(&params, 128).unwrap();
    let bound = griffin::MIN_ROUNDS.max(interpolation).max(1 + groebner.rounds);
    assert_eq!(nr.rounds, (griffin::SAFETY_FACTOR * bound as f64).ceil() as u64);
    assert_eq!(nr.rounds, 12);
}

#[test]
fn test_poseidon_full_rounds_fixed() {
    for (width, alpha) in [(3, 5), (5, 3), (9, 5)] {
        let params = PoseidonParams::new(width, alpha, ReferenceField::Bls12_381).unwrap();
        let legacy = poseidon::rounds_legacy(&params, 128).unwrap();
        let grobner = poseidon::rounds_grobner(&params, 128).unwrap();
        assert_eq!(legacy.full, poseidon::FULL_ROUNDS);
        assert_eq!(grobner.full, poseidon::FULL_ROUNDS);
    }
}

#[test]
fn test_exhausted_searches_are_flagged() {
    let anemoi = AnemoiParams::new(1, 5).unwrap();
    assert_eq!(anemoi::rounds(&anemoi, 4000), Ok(RoundCount::exhausted(anemoi::FALLBACK_ROUNDS)));

    let griffin = GriffinParams::new(3, 3, ReferenceField::Bn254).unwrap();
    assert!(!griffin::rounds(&griffin, 4000).unwrap().is_verified());

    let rescue = RescueParams::new(3, 1, 5).unwrap();
    assert!(!rescue::rounds(&rescue, 2000).unwrap().is_verified());
}

#[test]
fn test_generic_estimate() {
    let est = estimate(&RescueParams::new(2, 1, 5).unwrap(), 128).unwrap();
    assert_eq!(est.family, "rescue");
    assert_eq!(est.security_level, Some(128));
    assert_eq!(est.rounds, RoundCount::converged(14));
    assert_eq!(est.r1cs_size, Some(252));

    let mimc = MimcParams::from_modulus(BigUint::from(101u32), 3).unwrap();
    let est = estimate(&mimc, 128).unwrap();
    assert_eq!(est.security_level, None);
    assert_eq!(est.r1cs_size, Some(10));
}

#[test]
fn test_determinism() {
    let arion = ArionParams::new(3, 2, 5, ReferenceField::Bn254).unwrap();
    assert_eq!(arion::rounds(&arion, 128), arion::rounds(&arion, 128));

    let poseidon = PoseidonParams::new(3, 5, ReferenceField::Bn254).unwrap();
    assert_eq!(poseidon::rounds_grobner(&poseidon, 128), poseidon::rounds_grobner(&poseidon, 128));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_anemoi_monotone_in_security_level(
        ell in 1u64..=4,
        alpha in 3u64..=9,
        level in 32u32..=256,
        step in 0u32..=64,
    ) {
        let params = AnemoiParams::new(ell, alpha).unwrap();
        let low = anemoi::rounds(&params, level).unwrap();
        let high = anemoi::rounds(&params, level + step).unwrap();
        prop_assert!(low.is_verified() && high.is_verified());
        prop_assert!(low.rounds <= high.rounds);
    }

    #[test]
    fn prop_rescue_monotone_in_security_level(
        rate in 2u64..=4,
        capacity in 1u64..=2,
        alpha in 3u64..=7,
        level in 32u32..=256,
        step in 0u32..=64,
    ) {
        let params = RescueParams::new(rate, capacity, alpha).unwrap();
        let low = rescue::rounds(&params, level).unwrap();
        let high = rescue::rounds(&params, level + step).unwrap();
        prop_assert!(low.rounds <= high.rounds);
        prop_assert!(low.rounds >= rescue::MIN_ROUNDS);
    }
}
