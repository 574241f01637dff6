//! Property-based tests for set reconciliation and the limit grammar
//!
//! Uses proptest to verify properties that should hold for all inputs.

use std::collections::BTreeSet;

use gwsync::core::models::RateLimit;
use gwsync::core::services::reconcile;
use proptest::prelude::*;

fn ids() -> impl Strategy<Value = BTreeSet<String>> {
    prop::collection::btree_set("[a-f]{1,2}", 0..12)
}

proptest! {
    /// Adds and removes never overlap
    #[test]
    fn plan_sets_are_disjoint(wanted in ids(), existing in ids()) {
        let plan = reconcile(&wanted, &existing);
        prop_assert!(plan.to_add.is_disjoint(&plan.to_remove));
        prop_assert!(plan.to_add.is_disjoint(&plan.unchanged));
        prop_assert!(plan.to_remove.is_disjoint(&plan.unchanged));
    }

    /// Applying the plan to the existing set yields the wanted set
    #[test]
    fn applying_plan_reaches_wanted(wanted in ids(), existing in ids()) {
        let plan = reconcile(&wanted, &existing);
        let mut result = existing.clone();
        for id in &plan.to_remove {
            result.remove(id);
        }
        result.extend(plan.to_add.iter().cloned());
        prop_assert_eq!(result, wanted);
    }

    /// Nothing present and wanted is ever touched
    #[test]
    fn unchanged_is_the_intersection(wanted in ids(), existing in ids()) {
        let plan = reconcile(&wanted, &existing);
        let both: BTreeSet<String> = wanted.intersection(&existing).cloned().collect();
        prop_assert_eq!(&plan.unchanged, &both);
        let kept: BTreeSet<String> = plan.to_add.union(&plan.unchanged).cloned().collect();
        prop_assert_eq!(kept, wanted);
    }

    /// A converged set needs no calls
    #[test]
    fn reconciling_with_itself_converges(set in ids()) {
        prop_assert!(reconcile(&set, &set).is_converged());
    }

    /// Any spelling of a limit parses back from its canonical form
    #[test]
    fn canonical_form_is_stable(
        amount in 1u32..,
        period in 1u32..1000,
        kind in prop::sample::select(vec!["msg", "MB", "mb", "Msg"]),
        unit in prop::sample::select(vec!["s", "sec", "minutes", "h", "hour", "days", "wk"]),
        sep in prop::sample::select(vec![" per ", "/", " / "]),
    ) {
        let input = format!("{amount} {kind}{sep}{period} {unit}");
        let limit = RateLimit::parse(&input).unwrap();
        let canonical = limit.canonicalize();
        let reparsed = RateLimit::parse(&canonical).unwrap();
        prop_assert_eq!(reparsed, limit);
        prop_assert_eq!(reparsed.canonicalize(), canonical);
    }
}
