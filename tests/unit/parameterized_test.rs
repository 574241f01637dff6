//! Parameterized tests using test-case
//!
//! These tests use test-case to run the same test logic with different inputs.

use gwsync::core::models::LifecycleOp::{Deprecate, Publish, Undeprecate, Unpublish};
use gwsync::core::models::LifecycleState::{Deprecated, Published, Unpublished};
use gwsync::core::models::{LifecycleOp, LifecycleState, TimeUnit, canon_unit};
use gwsync::core::services::plan_transition;
use test_case::test_case;

use crate::common::limit;

// =============================================================================
// Canonical Forms
// =============================================================================

#[test_case("100 msg per 2 minutes", "100msg/2minute" ; "full form")]
#[test_case("20 MB per minute", "20MB/1minute" ; "implicit time amount")]
#[test_case("10MB/s", "10MB/1second" ; "compact")]
#[test_case("10 msg / 5 sec", "10msg/5second" ; "slash with spaces")]
#[test_case("  1 Msg Per Day  ", "1msg/1day" ; "padded mixed case")]
#[test_case("4 mb per 2 wks", "4MB/2week" ; "abbreviated plural")]
fn test_canonical_form(input: &str, expected: &str) {
    assert_eq!(limit(input).canonicalize(), expected);
}

// =============================================================================
// Time Units
// =============================================================================

#[test_case("s", TimeUnit::Second ; "s")]
#[test_case("secs", TimeUnit::Second ; "secs")]
#[test_case("m", TimeUnit::Minute ; "m")]
#[test_case("mins", TimeUnit::Minute ; "mins")]
#[test_case("h", TimeUnit::Hour ; "h")]
#[test_case("hours", TimeUnit::Hour ; "hours")]
#[test_case("d", TimeUnit::Day ; "d")]
#[test_case("WEEK", TimeUnit::Week ; "upper case week")]
fn test_canon_unit(raw: &str, expected: TimeUnit) {
    assert_eq!(canon_unit(raw).unwrap(), expected);
}

#[test_case("month" ; "month")]
#[test_case("year" ; "year")]
#[test_case("msec" ; "millisecond")]
#[test_case("secondss" ; "double plural")]
fn test_canon_unit_rejects(raw: &str) {
    assert!(canon_unit(raw).is_err());
}

// =============================================================================
// Lifecycle Transitions
// =============================================================================

#[test_case(Unpublished, Unpublished, &[] ; "unpublished stays")]
#[test_case(Unpublished, Published, &[Publish] ; "publish")]
#[test_case(Unpublished, Deprecated, &[Publish, Deprecate] ; "publish then deprecate")]
#[test_case(Published, Unpublished, &[Unpublish] ; "unpublish")]
#[test_case(Published, Published, &[] ; "published stays")]
#[test_case(Published, Deprecated, &[Deprecate] ; "deprecate")]
#[test_case(Deprecated, Unpublished, &[Undeprecate, Unpublish] ; "undeprecate then unpublish")]
#[test_case(Deprecated, Published, &[Undeprecate] ; "undeprecate")]
#[test_case(Deprecated, Deprecated, &[] ; "deprecated stays")]
fn test_transition_plan(from: LifecycleState, to: LifecycleState, expected: &[LifecycleOp]) {
    assert_eq!(plan_transition(from, to), expected);
}

#[test_case("unpublished", Unpublished ; "unpublished")]
#[test_case("Published", Published ; "capitalized")]
#[test_case("DEPRECATED", Deprecated ; "upper case")]
fn test_parse_lifecycle_state(input: &str, expected: LifecycleState) {
    assert_eq!(input.parse::<LifecycleState>().unwrap(), expected);
}
