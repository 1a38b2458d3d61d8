//! N-ary intersection and union of constraints

use super::{multi_constraint, Constraint};
use crate::Version;

/// Compute the intersection of any number of constraints.
///
/// No error is raised when the constraints are collectively disjoint; inspect
/// the result with [`is_empty_set`] instead. An empty input yields the empty
/// set, since nothing was required to be satisfiable.
///
/// When one of the inputs is an exact version, that version is checked
/// against every other input rather than folded through them.
pub fn intersection<V, I>(constraints: I) -> Constraint<V>
where
    V: Version,
    I: IntoIterator<Item = Constraint<V>>,
{
    let mut constraints: Vec<Constraint<V>> = constraints.into_iter().collect();
    if constraints.len() <= 1 {
        return constraints.pop().unwrap_or(Constraint::Empty);
    }

    if constraints.iter().any(Constraint::is_empty_set) {
        return Constraint::Empty;
    }

    let exact = constraints.iter().find_map(|c| match c {
        Constraint::Exact(version) => Some(version),
        _ => None,
    });
    if let Some(version) = exact {
        return if constraints.iter().all(|c| c.contains(version)) {
            Constraint::Exact(version.clone())
        } else {
            Constraint::Empty
        };
    }

    let mut rest = constraints.into_iter();
    let Some(mut head) = rest.next() else {
        return Constraint::Empty;
    };
    for constraint in rest {
        head = head.intersect(&constraint);
        if head.is_empty_set() {
            log::trace!("intersection collapsed to the empty set");
            break;
        }
    }

    head
}

/// Compute the union of any number of constraints, as compactly as possible.
///
/// A universal input supersedes everything else. Otherwise overlapping and
/// adjacent members are merged, exact versions inside other members are
/// absorbed and nested unions are flattened.
pub fn union<V, I>(constraints: I) -> Constraint<V>
where
    V: Version,
    I: IntoIterator<Item = Constraint<V>>,
{
    let mut constraints: Vec<Constraint<V>> = constraints.into_iter().collect();
    if constraints.len() <= 1 {
        return constraints.pop().unwrap_or(Constraint::Empty);
    }

    if constraints.iter().any(Constraint::is_universal) {
        return Constraint::Universal;
    }

    multi_constraint::normalize(constraints)
}

/// Check if a constraint matches no version
pub fn is_empty_set<V: Version>(constraint: &Constraint<V>) -> bool {
    constraint.is_empty_set()
}

/// Check if a constraint matches every version
pub fn is_universal<V: Version>(constraint: &Constraint<V>) -> bool {
    constraint.is_universal()
}
