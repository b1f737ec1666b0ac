//! Property-based tests for slice normalization
//!
//! These check the defaulting, validation and pass-through rules over
//! randomly generated concrete and symbolic slices.

use proptest::prelude::*;
use symslice::{
    unpack, Bound, NormalizedSlice, Slice, SymInt, SymbolicInt, UnpackError, MAX_INDEX, MIN_INDEX,
};

// Strategy for optional concrete bounds, biased towards the extremes
fn concrete_bound() -> impl Strategy<Value = Option<i64>> {
    prop_oneof![
        Just(None),
        Just(Some(MIN_INDEX)),
        Just(Some(MAX_INDEX)),
        (-64i64..64).prop_map(Some),
        any::<i64>().prop_map(Some),
    ]
}

// Strategy for non-zero steps
fn nonzero_step() -> impl Strategy<Value = i64> {
    prop_oneof![
        Just(MIN_INDEX),
        Just(-1i64),
        Just(1i64),
        any::<i64>().prop_filter("step must be non-zero", |step| *step != 0),
    ]
}

// Strategy for fields that are absent, concrete or a fresh symbol
fn any_bound() -> impl Strategy<Value = Bound<SymInt>> {
    prop_oneof![
        Just(Bound::None),
        any::<i64>().prop_map(Bound::<SymInt>::from),
        "[a-z][a-z0-9]{0,4}".prop_map(|name| Bound::Sym(SymInt::symbol(name))),
    ]
}

fn expected_default(value: Option<i64>, step: i64, positive: i64, negative: i64) -> i64 {
    value.unwrap_or(if step > 0 { positive } else { negative })
}

proptest! {
    #[test]
    fn concrete_slices_follow_standard_defaults(
        start in concrete_bound(),
        stop in concrete_bound(),
        step in nonzero_step(),
    ) {
        let normalized: NormalizedSlice<SymInt> =
            unpack(&Slice::new(start, stop, Some(step))).unwrap();
        let (s, e, k) = normalized.concrete().unwrap();

        prop_assert_eq!(s, expected_default(start, step, 0, MAX_INDEX));
        prop_assert_eq!(e, expected_default(stop, step, MAX_INDEX, MIN_INDEX));
        prop_assert_eq!(k, step.max(-MAX_INDEX));
        prop_assert!(k.checked_neg().is_some());
    }

    #[test]
    fn zero_step_always_fails(start in any_bound(), stop in any_bound()) {
        let slice = Slice::new(start, stop, 0i64);
        prop_assert_eq!(unpack(&slice).unwrap_err(), UnpackError::ZeroStep);
    }

    #[test]
    fn symbolic_step_always_fails(start in any_bound(), stop in any_bound()) {
        let slice = Slice::new(start, stop, SymInt::symbol("k"));
        prop_assert_eq!(unpack(&slice).unwrap_err(), UnpackError::UnsupportedSymbolicStep);
    }

    #[test]
    fn symbolic_bounds_are_passed_through(
        start in any_bound(),
        stop in any_bound(),
        step in nonzero_step(),
    ) {
        let slice = Slice::new(start, stop, step);
        let normalized: NormalizedSlice<SymInt> = unpack(&slice).unwrap();

        if let Bound::Sym(value) = &slice.start {
            prop_assert!(normalized.start().is_same(value));
        }
        if let Bound::Sym(value) = &slice.stop {
            prop_assert!(normalized.stop().is_same(value));
        }
        prop_assert!(!normalized.step().is_symbolic());
        prop_assert_ne!(normalized.step().expect_int(), 0);
    }

    #[test]
    fn normalization_is_idempotent(
        start in any_bound(),
        stop in any_bound(),
        step in nonzero_step(),
    ) {
        let once: NormalizedSlice<SymInt> = unpack(&Slice::new(start, stop, step)).unwrap();
        let twice: NormalizedSlice<SymInt> = unpack(&once.to_slice()).unwrap();

        prop_assert!(twice.start().is_same(once.start()));
        prop_assert!(twice.stop().is_same(once.stop()));
        prop_assert!(twice.step().is_same(once.step()));
    }
}

#[test]
fn test_full_slice_defaults() {
    let forward: NormalizedSlice<SymInt> = unpack(&Slice::full()).unwrap();
    assert_eq!(forward.concrete(), Some((0, MAX_INDEX, 1)));

    let reverse: Slice<SymInt> = "::-1".parse().unwrap();
    let reverse: NormalizedSlice<SymInt> = unpack(&reverse).unwrap();
    assert_eq!(reverse.concrete(), Some((MAX_INDEX, MIN_INDEX, -1)));
}
