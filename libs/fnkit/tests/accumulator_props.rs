#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Property tests for accumulator arithmetic and isolation.

use fnkit::{AccumulatorConstants, AccumulatorFactory, OverflowPolicy};
use proptest::prelude::*;

proptest! {
    #[test]
    fn nth_call_is_seed_plus_n_increments(
        seed in -1_000_000_i64..1_000_000,
        k1 in -1_000_i64..1_000,
        k2 in -1_000_i64..1_000,
        calls in 1_usize..64,
    ) {
        for policy in [OverflowPolicy::Wrap, OverflowPolicy::Saturate] {
            let factory = AccumulatorFactory::new(AccumulatorConstants::new(k1, k2), policy);
            let mut acc = factory.create(seed);

            for n in 1..=calls {
                let expected = seed + (k1 + k2) * i64::try_from(n).unwrap();
                prop_assert_eq!(acc(), expected);
            }
        }
    }

    #[test]
    fn saturating_update_matches_clamped_exact_sum(
        seed in any::<i64>(),
        k1 in any::<i32>(),
        k2 in any::<i32>(),
    ) {
        let (k1, k2) = (i64::from(k1), i64::from(k2));
        let factory =
            AccumulatorFactory::new(AccumulatorConstants::new(k1, k2), OverflowPolicy::Saturate);
        let mut acc = factory.create(seed);

        let exact = i128::from(seed) + i128::from(k1) + i128::from(k2);
        let expected = i64::try_from(exact.clamp(i128::from(i64::MIN), i128::from(i64::MAX)))
            .unwrap();
        prop_assert_eq!(acc(), expected);
    }

    #[test]
    fn invoking_one_accumulator_never_moves_another(
        seed_a in any::<i32>(),
        seed_b in any::<i32>(),
        calls_a in 0_usize..32,
    ) {
        let factory = AccumulatorFactory::default();
        let mut a = factory.create(i64::from(seed_a));
        let mut b = factory.create(i64::from(seed_b));

        for _ in 0..calls_a {
            a();
        }
        prop_assert_eq!(b(), i64::from(seed_b) + 110);
    }

    #[test]
    fn saturating_accumulator_is_monotonic_for_positive_constants(
        seed in any::<i64>(),
        calls in 1_usize..16,
    ) {
        let factory =
            AccumulatorFactory::new(AccumulatorConstants::default(), OverflowPolicy::Saturate);
        let mut acc = factory.create(seed);

        let mut previous = seed;
        for _ in 0..calls {
            let next = acc();
            prop_assert!(next >= previous);
            previous = next;
        }
    }
}
