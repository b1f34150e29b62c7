// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

#![allow(missing_docs)]
//! Property tests for the group laws over every preset.

use std::sync::Arc;

use hosh_core::{Discipline, Hosh, Variant};
use proptest::prelude::*;
use proptest::test_runner::{Config as PropConfig, RngAlgorithm, TestRng, TestRunner};

fn variant_strategy() -> impl Strategy<Value = Arc<Variant>> {
    prop_oneof![
        Just(Variant::narrow()),
        Just(Variant::default_preset()),
        Just(Variant::wide()),
    ]
}

fn discipline_strategy() -> impl Strategy<Value = Discipline> {
    prop_oneof![
        Just(Discipline::Unordered),
        Just(Discipline::Hybrid),
        Just(Discipline::Ordered),
    ]
}

fn content() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..64)
}

/// Arbitrary element of a variant: any raw digest whose digits respect the
/// per-position bases.
fn raw_element(variant: Arc<Variant>) -> impl Strategy<Value = Hosh> {
    let bases: Vec<u16> = (0..variant.digits()).map(|i| variant.digit_base(i)).collect();
    bases
        .into_iter()
        .map(|base| (0..base).prop_map(|d| u8::try_from(d).unwrap()))
        .collect::<Vec<_>>()
        .prop_map(move |raw| Hosh::from_raw(&variant, &raw).unwrap())
}

fn triple() -> impl Strategy<Value = (Hosh, Hosh, Hosh)> {
    variant_strategy().prop_flat_map(|v| {
        (
            raw_element(Arc::clone(&v)),
            raw_element(Arc::clone(&v)),
            raw_element(v),
        )
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn identity_is_neutral_on_both_sides((a, _, _) in triple()) {
        let e = Hosh::identity(a.variant());
        prop_assert_eq!(a.compose(&e).unwrap(), a.clone());
        prop_assert_eq!(e.compose(&a).unwrap(), a);
    }

    #[test]
    fn inverse_cancels_on_both_sides((a, _, _) in triple()) {
        let e = Hosh::identity(a.variant());
        prop_assert_eq!(a.compose(&a.invert()).unwrap(), e.clone());
        prop_assert_eq!(a.invert().compose(&a).unwrap(), e);
    }

    #[test]
    fn composition_is_associative((a, b, c) in triple()) {
        let left = a.compose(&b).unwrap().compose(&c).unwrap();
        let right = a.compose(&b.compose(&c).unwrap()).unwrap();
        prop_assert_eq!(left, right);
    }

    #[test]
    fn division_undoes_composition((a, b, _) in triple()) {
        prop_assert_eq!(a.compose(&b).unwrap().divide(&b).unwrap(), a);
    }

    #[test]
    fn double_inverse_is_identity_map((a, _, _) in triple()) {
        prop_assert_eq!(a.invert().invert(), a);
    }

    #[test]
    fn string_and_raw_round_trip((a, _, _) in triple()) {
        let v = Arc::clone(a.variant());
        prop_assert_eq!(Hosh::parse(&v, &a.render()).unwrap(), a.clone());
        prop_assert_eq!(Hosh::from_raw(&v, a.as_bytes()).unwrap(), a.clone());
        prop_assert_eq!(a.to_string().parse::<Hosh>().unwrap(), a);
    }

    #[test]
    fn closure_keeps_digits_in_range((a, b, _) in triple()) {
        let c = a.compose(&b).unwrap();
        let v = c.variant();
        for (i, &digit) in c.as_bytes().iter().enumerate() {
            prop_assert!(u16::from(digit) < v.digit_base(i));
        }
    }

    #[test]
    fn unordered_content_commutes_with_everything(
        v in variant_strategy(),
        x in content(),
        y in content(),
        d in discipline_strategy(),
    ) {
        let u = Hosh::from_content_in(&v, &x, Discipline::Unordered);
        let other = Hosh::from_content_in(&v, &y, d);
        prop_assert_eq!(u.compose(&other).unwrap(), other.compose(&u).unwrap());
    }

    #[test]
    fn hybrid_content_commutes_among_itself(v in variant_strategy(), x in content(), y in content()) {
        let a = Hosh::from_content_in(&v, &x, Discipline::Hybrid);
        let b = Hosh::from_content_in(&v, &y, Discipline::Hybrid);
        let ab = a.compose(&b).unwrap();
        prop_assert_eq!(&ab, &b.compose(&a).unwrap());
        prop_assert!(ab.element().discipline() <= Discipline::Hybrid);
    }

    #[test]
    fn content_scenario_cancels(v in variant_strategy(), x in content(), y in content()) {
        let a = Hosh::from_content_in(&v, &x, Discipline::Ordered);
        let b = Hosh::from_content_in(&v, &y, Discipline::Ordered);
        let c = a.compose(&b).unwrap();
        prop_assert_eq!(c.compose(&b.invert()).unwrap(), a.clone());
        prop_assert_eq!(a.invert().compose(&c).unwrap(), b);
    }

    #[test]
    fn rank_round_trips_below_the_order((a, _, _) in triple()) {
        let v = Arc::clone(a.variant());
        let rank = a.rank();
        prop_assert!(rank < v.order());
        prop_assert_eq!(Hosh::from_rank(&v, &rank).unwrap(), a);
    }

    #[test]
    fn digitwise_sum_is_an_abelian_group((a, b, c) in triple()) {
        let e = Hosh::identity(a.variant());
        prop_assert_eq!(a.plus(&b).unwrap(), b.plus(&a).unwrap());
        prop_assert_eq!(
            a.plus(&b).unwrap().plus(&c).unwrap(),
            a.plus(&b.plus(&c).unwrap()).unwrap()
        );
        prop_assert_eq!(a.plus(&e).unwrap(), a.clone());
        prop_assert_eq!(a.minus(&a).unwrap(), e);
        prop_assert_eq!(a.plus(&b).unwrap().minus(&b).unwrap(), a);
    }

    #[test]
    fn serde_json_round_trip((a, _, _) in triple()) {
        let json = serde_json::to_vec(&a).unwrap();
        prop_assert_eq!(serde_json::from_slice::<Hosh>(&json).unwrap(), a);
    }

    #[test]
    fn from_content_is_deterministic(v in variant_strategy(), x in content(), d in discipline_strategy()) {
        let first = Hosh::from_content_in(&v, &x, d);
        let second = Hosh::from_content_in(&v, &x, d);
        prop_assert_eq!(first.as_bytes(), second.as_bytes());
    }
}

#[test]
fn ordered_content_is_not_universally_commutative() {
    for v in Variant::presets() {
        let found = (0u32..16).any(|i| {
            let a = Hosh::from_content_in(&v, &i.to_le_bytes(), Discipline::Ordered);
            let b = Hosh::from_content_in(&v, &(i + 100).to_le_bytes(), Discipline::Ordered);
            a.compose(&b).unwrap() != b.compose(&a).unwrap()
        });
        assert!(found, "{} produced only commuting ordered pairs", v.name());
    }
}

#[test]
fn hybrid_and_ordered_need_not_commute() {
    let v = Variant::default_preset();
    let found = (0u32..16).any(|i| {
        let h = Hosh::from_content_in(&v, &i.to_le_bytes(), Discipline::Hybrid);
        let o = Hosh::from_content_in(&v, &(i + 100).to_le_bytes(), Discipline::Ordered);
        h.compose(&o).unwrap() != o.compose(&h).unwrap()
    });
    assert!(found);
}

// Pinned seed so a failing associativity case reproduces across machines.
// Override locally with PROPTEST_SEED if needed.
#[test]
fn proptest_seed_pinned_associativity() {
    const SEED_BYTES: [u8; 32] = [
        0x68, 0x6f, 0x73, 0x68, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
        0, 0, 0, 0, 0, 0,
    ];

    let rng = TestRng::from_seed(RngAlgorithm::ChaCha, &SEED_BYTES);
    let mut runner = TestRunner::new_with_rng(PropConfig::default(), rng);

    runner
        .run(&triple(), |(a, b, c)| {
            let left = a.compose(&b).unwrap().compose(&c).unwrap();
            let right = a.compose(&b.compose(&c).unwrap()).unwrap();
            prop_assert_eq!(left, right);
            Ok(())
        })
        .expect("pinned-seed associativity run should complete");
}
