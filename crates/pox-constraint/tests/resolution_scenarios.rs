//! End-to-end scenarios: combining requirements the way a resolver does

use pox_constraint::{intersection, is_empty_set, union, AdmitError, Bound, Constraint, ConstraintParser};
use semver::Version;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn v(s: &str) -> Version {
    Version::parse(s).unwrap()
}

fn requirement(s: &str) -> Constraint<Version> {
    ConstraintParser::new().parse(s).unwrap()
}

/// Pick the highest available version admitted by every requirement
fn select(available: &[&str], requirements: &[&str]) -> Option<Version> {
    let combined = intersection(requirements.iter().map(|r| requirement(r)));
    if is_empty_set(&combined) {
        return None;
    }

    available
        .iter()
        .map(|s| v(s))
        .filter(|candidate| combined.admits(candidate).is_ok())
        .max()
}

#[test]
fn test_version_inside_half_open_range() {
    init_logger();
    let range = Constraint::range(
        Some(Bound::inclusive(v("1.0.0"))),
        Some(Bound::exclusive(v("2.0.0"))),
        [],
    );

    assert_eq!(range.admits(&v("1.2.3")), Ok(()));

    let err = range.admits(&v("2.0.0")).unwrap_err();
    assert!(err.is_bound_violation());
    assert_eq!(err.to_string(), "2.0.0 is greater than or equal to 2.0.0");

    assert_eq!(Constraint::Empty.admits(&v("1.2.3")), Err(AdmitError::Empty));
}

#[test]
fn test_jointly_satisfiable_requirements() {
    init_logger();
    let available = ["1.0.0", "1.4.2", "1.5.0", "1.9.9", "2.0.0", "2.1.0"];

    assert_eq!(select(&available, &["^1.2", ">=1.4, !=1.9.9"]), Some(v("1.5.0")));
    assert_eq!(select(&available, &["~1.4", "1.4.2"]), Some(v("1.4.2")));
    assert_eq!(select(&available, &["^1.0 || ^2.0", ">1.9.9"]), Some(v("2.1.0")));
}

#[test]
fn test_conflicting_requirements() {
    init_logger();
    let combined = intersection([requirement("^1.0"), requirement(">=2.0.0")]);

    assert!(is_empty_set(&combined));
    assert!(!combined.admits_any());
    assert_eq!(select(&["1.0.0", "2.0.0"], &["^1.0", ">=2.0.0"]), None);
}

#[test]
fn test_union_rejection_explains_every_alternative() {
    init_logger();
    let requirement = requirement("~1.2 || 3.0.0");
    let err = requirement.admits(&v("2.0.0")).unwrap_err();

    assert_eq!(
        err.failures(),
        &[
            AdmitError::AtOrAboveMax {
                version: "2.0.0".to_string(),
                max: "1.3.0".to_string(),
            },
            AdmitError::NotExact {
                version: "2.0.0".to_string(),
                expected: "3.0.0".to_string(),
            },
        ]
    );
}

#[test]
fn test_union_of_alternatives_then_narrowed() {
    init_logger();
    let alternatives = union([
        requirement("1.0 - 2.0"),
        requirement("4.0 - 5.0"),
    ]);
    let narrowed = alternatives.intersect(&union([requirement("1.5 - 1.8.0"), requirement(">=4.5.0, <=6.0.0")]));

    assert_eq!(
        narrowed.to_string(),
        ">=1.5.0, <=1.8.0 || >=4.5.0, <5.1.0"
    );
    assert!(narrowed.contains(&v("5.0.9")));
    assert!(!narrowed.contains(&v("3.0.0")));
}

#[test]
fn test_prerelease_policy() {
    init_logger();
    let at_least = requirement(">=1.0.0");

    assert!(at_least.admits(&v("1.0.0-rc.1")).is_err());
    assert!(at_least.admits(&v("1.0.0")).is_ok());
    assert!(requirement("<2.0.0").admits(&v("2.0.0-alpha")).is_ok());
    assert!(requirement(">=1.0.0-rc.1").admits(&v("1.0.0-rc.2")).is_ok());
}
