//! Union members - admission, cross-product intersection and normalization

use super::bound::cmp_lower;
use super::{AdmitError, Constraint, Range};
use crate::Version;

/// Check a version against union members in order, stopping at the first match.
///
/// When no member admits the version, every member's failure is reported.
pub(crate) fn admits<V: Version>(members: &[Constraint<V>], version: &V) -> Result<(), AdmitError> {
    if members.is_empty() {
        return Err(AdmitError::Empty);
    }

    let mut failures = Vec::with_capacity(members.len());
    for member in members {
        match member.admits(version) {
            Ok(()) => return Ok(()),
            Err(err) => failures.push(err),
        }
    }

    Err(AdmitError::NoMember {
        version: version.to_string(),
        failures,
    })
}

/// Intersect every member on the left with every member on the right.
///
/// Empty pairings are dropped and the survivors are unioned back together.
pub(crate) fn cross_product<V: Version>(
    left: &[Constraint<V>],
    right: &[Constraint<V>],
) -> Constraint<V> {
    let mut survivors = Vec::new();
    for l in left {
        for r in right {
            let intersection = l.intersect(r);
            if !intersection.is_empty_set() {
                survivors.push(intersection);
            }
        }
    }

    super::union(survivors)
}

/// Merge constraints into the most compact disjunction.
///
/// Nested unions are flattened, exact versions become single-point spans and
/// spans that overlap or share an admitted boundary are merged. The caller has
/// already dealt with the trivial cases.
pub(crate) fn normalize<V: Version>(members: Vec<Constraint<V>>) -> Constraint<V> {
    let before = members.len();

    let mut ranges = Vec::with_capacity(before);
    if flatten_into(members, &mut ranges) {
        return Constraint::Universal;
    }

    ranges.sort_by(|a, b| cmp_lower(a.min(), b.min()));

    let mut merged: Vec<Range<V>> = Vec::with_capacity(ranges.len());
    for range in ranges {
        match merged.last_mut() {
            Some(last) if last.overlaps_or_touches(&range) => *last = last.merge(&range),
            _ => merged.push(range),
        }
    }

    let mut members: Vec<Constraint<V>> = merged.into_iter().map(Range::into_constraint).collect();
    log::trace!("normalized union of {} members into {}", before, members.len());

    match members.len() {
        0 => Constraint::Empty,
        1 => members.pop().unwrap_or(Constraint::Empty),
        _ => Constraint::Union(members),
    }
}

/// Collect members as spans, returning true as soon as a universal member shows up
fn flatten_into<V: Version>(members: Vec<Constraint<V>>, out: &mut Vec<Range<V>>) -> bool {
    for member in members {
        match member {
            Constraint::Universal => return true,
            Constraint::Empty => {}
            Constraint::Exact(version) => out.push(Range::point(version)),
            Constraint::Range(range) => out.push(range),
            Constraint::Union(inner) => {
                if flatten_into(inner, out) {
                    return true;
                }
            }
        }
    }
    false
}
